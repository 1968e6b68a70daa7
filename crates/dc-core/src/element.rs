//! Elemental tags and tag sets
//!
//! Weapons carry a strong-against and a weak-against set, armor carries the
//! set of elements it is attuned to. Matchups are plain set intersections.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::ELEMENT_COUNT;

/// One elemental tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Lightning,
}

impl Element {
    /// All elements, in bit-index order.
    pub const ALL: [Element; ELEMENT_COUNT] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Lightning,
    ];

    /// Single-letter glyph for compact status lines.
    pub fn glyph(self) -> char {
        match self {
            Element::Fire => 'F',
            Element::Water => 'W',
            Element::Earth => 'E',
            Element::Lightning => 'L',
        }
    }
}

bitflags! {
    /// A set of elemental tags, one bit per element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementSet: u8 {
        const FIRE = 1 << 0;
        const WATER = 1 << 1;
        const EARTH = 1 << 2;
        const LIGHTNING = 1 << 3;
    }
}

impl ElementSet {
    /// Bit for the element at `idx` (0..ELEMENT_COUNT).
    pub fn from_index(idx: usize) -> ElementSet {
        debug_assert!(idx < ELEMENT_COUNT);
        ElementSet::from_bits_truncate(1 << idx)
    }

    /// Compact display form, one glyph per present element ("-" when empty).
    pub fn short(&self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        Element::ALL
            .iter()
            .filter(|e| self.contains(ElementSet::from(**e)))
            .map(|e| e.glyph())
            .collect()
    }
}

impl From<Element> for ElementSet {
    fn from(e: Element) -> Self {
        match e {
            Element::Fire => ElementSet::FIRE,
            Element::Water => ElementSet::WATER,
            Element::Earth => ElementSet::EARTH,
            Element::Lightning => ElementSet::LIGHTNING,
        }
    }
}

// Serialize as the raw bit pattern, mirroring the seed-only RNG encoding.
impl Serialize for ElementSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ElementSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(ElementSet::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_matches_elements() {
        for (i, e) in Element::ALL.iter().enumerate() {
            assert_eq!(ElementSet::from_index(i), ElementSet::from(*e));
        }
    }

    #[test]
    fn test_intersection() {
        let strong = ElementSet::FIRE | ElementSet::EARTH;
        let armor = ElementSet::EARTH;
        assert!(strong.intersects(armor));
        assert!(!strong.intersects(ElementSet::WATER));
    }

    #[test]
    fn test_short_display() {
        assert_eq!(ElementSet::empty().short(), "-");
        assert_eq!((ElementSet::FIRE | ElementSet::LIGHTNING).short(), "FL");
    }

    #[test]
    fn test_serde_round_trip() {
        let set = ElementSet::WATER | ElementSet::EARTH;
        let json = serde_json::to_string(&set).unwrap();
        let restored: ElementSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, restored);
    }
}
