//! The Elm-style application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::display::{Patch, Surface, diff};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command, run off the event thread. An eventual message
    /// it returns is fed back into the update loop; commands may sleep,
    /// which is how timed animation ticks are scheduled.
    Cmd(Box<dyn FnOnce() -> Option<Msg> + Send>),
    /// Multiple effects batched together.
    Batch(Vec<Effect>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::Batch(v) => f.debug_tuple("Effect::Batch").field(&v.len()).finish(),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for an [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + Send + 'static,
{
    Effect::Cmd(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model / Driver traits
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `surface`.
    fn draw(&self, surface: &mut Surface);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input, sending messages through `tx`. Implementations
    /// should return promptly and honour `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed patch to the screen.
    fn flush(&mut self, patch: Patch) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the back-end.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner: poll → update → draw → diff → flush.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// Run the main loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Polls input and processes queued messages until the model
    ///    returns `Effect::End` or the driver fails.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();

        tx.send(Msg::Init).ok();

        let mut prev = Surface::new(self.width, self.height);
        let mut curr = Surface::new(self.width, self.height);

        self.process_pending(&rx, &ctx, &tx, &mut prev, &mut curr)?;

        while !ctx.is_done() {
            if let Err(e) = self.driver.poll_msgs(&ctx, tx.clone()) {
                ctx.cancel();
                self.driver.close();
                return Err(e);
            }

            if ctx.is_done() {
                break;
            }

            self.process_pending(&rx, &ctx, &tx, &mut prev, &mut curr)?;
        }

        self.driver.close();
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        tx: &Sender<Msg>,
        prev: &mut Surface,
        curr: &mut Surface,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(effect) = self.model.update(msg) {
                handle_effect(effect, ctx, tx);
            }
            needs_draw = true;
            if ctx.is_done() {
                return Ok(());
            }
        }

        if needs_draw {
            self.model.draw(curr);
            let patch = diff(prev, curr);
            if !patch.cells.is_empty() {
                self.driver.flush(patch)?;
            }
            prev.clone_from(curr);
        }

        Ok(())
    }
}

/// Execute an effect. Commands run on a background thread so that timed
/// ticks do not stall input handling; their resulting message is fed back
/// through `tx`.
fn handle_effect(effect: Effect, ctx: &Context, tx: &Sender<Msg>) {
    match effect {
        Effect::End => ctx.cancel(),
        Effect::Cmd(f) => {
            let tx = tx.clone();
            std::thread::spawn(move || {
                if let Some(msg) = f() {
                    tx.send(msg).ok();
                }
            });
        }
        Effect::Batch(effects) => {
            for e in effects {
                handle_effect(e, ctx, tx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_cancel() {
        let ctx = Context::new();
        assert!(!ctx.is_done());
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.is_done());
    }

    #[test]
    fn cmd_message_fed_back() {
        let ctx = Context::new();
        let (tx, rx) = mpsc::channel();
        handle_effect(cmd(|| Some(Msg::Quit)), &ctx, &tx);
        let msg = rx.recv_timeout(std::time::Duration::from_secs(1)).unwrap();
        assert!(matches!(msg, Msg::Quit));
    }

    #[test]
    fn end_cancels_context() {
        let ctx = Context::new();
        let (tx, _rx) = mpsc::channel();
        handle_effect(Effect::End, &ctx, &tx);
        assert!(ctx.is_done());
    }
}
