//! Room choices
//!
//! One selectable action per slot. Choices carry their payload by value; the
//! session passes itself in when executing, so no back-references exist.

use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::drops::{Drop, ItemDrops};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Choice {
    /// Move on to the next room.
    Advance,
    /// Fight the creature guarding this slot.
    Fight(Creature),
    /// Open a multi-drop pickup.
    Collect(ItemDrops),
    /// Grab a single drop. Empties once claimed.
    Pickup(Option<Drop>),
}

impl Choice {
    /// Slot caption shown by the presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            Choice::Advance => "Forward",
            Choice::Fight(_) => "Fight",
            Choice::Collect(_) => "Collect",
            Choice::Pickup(_) => "Pickup",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Choice::Advance.label(), "Forward");
        assert_eq!(Choice::Pickup(None).label(), "Pickup");
    }
}
