//! Pointer input vocabulary for the editor.

use serde::{Deserialize, Serialize};

/// Identifier of a pointer, mirroring the DOM `pointerId`.
pub type PointerId = i32;

/// Modifier keys accompanying a pointer or wheel event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Held pan key (space in the browser adapter).
    pub space: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        space: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    pub fn space() -> Self {
        Self {
            space: true,
            ..Self::NONE
        }
    }
}
