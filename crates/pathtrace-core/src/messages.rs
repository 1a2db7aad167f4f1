//! Input events: [`Msg`], [`Key`], [`MouseAction`], [`ModMask`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    /// A printable character.
    Char(char),
}

// ---------------------------------------------------------------------------
// ModMask
// ---------------------------------------------------------------------------

/// Bitmask of modifier keys held during an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    /// Whether this mask contains all bits of `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ModMask {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// MouseAction
// ---------------------------------------------------------------------------

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved (no button state change).
    Move,
}

// ---------------------------------------------------------------------------
// Msg
// ---------------------------------------------------------------------------

/// An input message delivered to the application model.
#[derive(Clone)]
pub enum Msg {
    /// A key was pressed.
    KeyDown {
        key: Key,
        modifiers: ModMask,
        time: Instant,
    },
    /// A mouse event at terminal cell (x, y).
    Mouse {
        action: MouseAction,
        x: i32,
        y: i32,
        modifiers: ModMask,
        time: Instant,
    },
    /// The terminal was resized.
    Resize {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
    /// A model-defined message, typically produced by a scheduled command
    /// (e.g. an animation tick). Use [`Msg::custom`] to construct and
    /// [`Msg::downcast_ref`] to inspect.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Msg {
    /// Convenience: create a `KeyDown` with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    /// Wrap a model-defined value as a custom message.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Downcast a custom message to a concrete type. Returns `None` for
    /// non-custom messages and type mismatches.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyDown { key, modifiers, .. } => f
                .debug_struct("KeyDown")
                .field("key", key)
                .field("modifiers", modifiers)
                .finish_non_exhaustive(),
            Self::Mouse { action, x, y, .. } => f
                .debug_struct("Mouse")
                .field("action", action)
                .field("x", x)
                .field("y", y)
                .finish_non_exhaustive(),
            Self::Resize { width, height, .. } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish_non_exhaustive(),
            Self::Init => f.write_str("Init"),
            Self::Quit => f.write_str("Quit"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Tick(u32);

    #[test]
    fn custom_round_trip() {
        let msg = Msg::custom(Tick(7));
        assert_eq!(msg.downcast_ref::<Tick>(), Some(&Tick(7)));
        assert!(msg.downcast_ref::<String>().is_none());
        assert!(Msg::Init.downcast_ref::<Tick>().is_none());
    }

    #[test]
    fn mod_mask_ops() {
        let m = ModMask::SHIFT | ModMask::CTRL;
        assert!(m.contains(ModMask::SHIFT));
        assert!(!m.contains(ModMask::ALT));
        assert!(ModMask::NONE.is_empty());
    }
}
