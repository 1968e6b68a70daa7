//! Weapons and armor
//!
//! Plain value types; creatures own their gear by value. An attack/defense of
//! -1 is the uninitialized "unarmed"/"unarmored" sentinel.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::element::ElementSet;

/// Weapon class, used by the presentation layer for icons and attack cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum WeaponClass {
    Blunt,
    Blade,
    Polearm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub attack: i32,
    pub strong_against: ElementSet,
    pub weak_against: ElementSet,
    pub class: WeaponClass,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            name: "Unarmed".to_string(),
            attack: -1,
            strong_against: ElementSet::empty(),
            weak_against: ElementSet::empty(),
            class: WeaponClass::Blunt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub defense: i32,
    pub element_types: ElementSet,
}

impl Default for Armor {
    fn default() -> Self {
        Self {
            name: "Unarmored".to_string(),
            defense: -1,
            element_types: ElementSet::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sentinels() {
        assert_eq!(Weapon::default().attack, -1);
        assert_eq!(Armor::default().defense, -1);
    }
}
