use pathtrace_core::{App, AppConfig};
use pathtrace_crossterm::CrosstermDriver;
use pathtrace_viz::{HEIGHT, Visualizer, WIDTH};

fn main() {
    let mut app = App::new(AppConfig {
        model: Visualizer::new(),
        driver: CrosstermDriver::new().with_mouse(true),
        width: WIDTH,
        height: HEIGHT,
    });
    if let Err(e) = app.run() {
        eprintln!("pathtrace: {e}");
        std::process::exit(1);
    }
}
