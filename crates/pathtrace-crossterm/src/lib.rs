//! Crossterm terminal driver.
//!
//! Provides a [`CrosstermDriver`] implementing [`pathtrace_core::Driver`]:
//! raw mode plus alternate screen, optional mouse capture, translation of
//! terminal events into [`Msg`]s, and patch flushing.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind},
    execute,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathtrace_core::{
    app::{Context, Driver},
    display::{Patch, Rgb},
    messages::{Key, ModMask, MouseAction, Msg},
};

/// Maps an optional [`Rgb`] to a crossterm colour, `None` meaning the
/// terminal default.
fn to_ct_color(c: Option<Rgb>) -> CtColor {
    match c {
        None => CtColor::Reset,
        Some(Rgb { r, g, b }) => CtColor::Rgb { r, g, b },
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    /// Create a new driver with mouse capture on.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Short-timeout poll so the loop stays responsive to queued
        // command messages.
        if !event::poll(Duration::from_millis(16))? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }

            let msg = match event::read()? {
                Event::Key(KeyEvent {
                    code, modifiers, ..
                }) => to_key(code).map(|key| Msg::KeyDown {
                    key,
                    modifiers: to_mod_mask(modifiers),
                    time: Instant::now(),
                }),
                Event::Mouse(me) => {
                    let action = match me.kind {
                        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Main),
                        MouseEventKind::Down(MouseButton::Right) => Some(MouseAction::Secondary),
                        MouseEventKind::Up(_) => Some(MouseAction::Release),
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(MouseAction::Move),
                        _ => None,
                    };
                    action.map(|action| Msg::Mouse {
                        action,
                        x: me.column as i32,
                        y: me.row as i32,
                        modifiers: to_mod_mask(me.modifiers),
                        time: Instant::now(),
                    })
                }
                Event::Resize(w, h) => Some(Msg::Resize {
                    width: w as i32,
                    height: h as i32,
                    time: Instant::now(),
                }),
                _ => None,
            };

            if let Some(m) = msg {
                tx.send(m).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, patch: Patch) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();

        for pc in &patch.cells {
            execute!(
                stdout,
                cursor::MoveTo(pc.x as u16, pc.y as u16),
                SetForegroundColor(to_ct_color(pc.tile.style.fg)),
                SetBackgroundColor(to_ct_color(pc.tile.style.bg))
            )?;
            if pc.tile.style.bold {
                execute!(stdout, SetAttribute(Attribute::Bold))?;
            }
            write!(stdout, "{}", pc.tile.ch)?;
            if pc.tile.style.bold {
                execute!(stdout, SetAttribute(Attribute::Reset))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_translation() {
        assert_eq!(to_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(to_key(KeyCode::Char('q')), Some(Key::Char('q')));
        assert_eq!(to_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(to_key(KeyCode::F(1)), None);
    }

    #[test]
    fn modifier_translation() {
        let m = to_mod_mask(KeyModifiers::SHIFT | KeyModifiers::CONTROL);
        assert!(m.contains(ModMask::SHIFT));
        assert!(m.contains(ModMask::CTRL));
        assert!(!m.contains(ModMask::ALT));
    }

    #[test]
    fn default_color_maps_to_reset() {
        assert_eq!(to_ct_color(None), CtColor::Reset);
        assert_eq!(
            to_ct_color(Some(Rgb::new(1, 2, 3))),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
