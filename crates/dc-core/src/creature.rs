//! Creatures
//!
//! Both the player and every generated enemy are a `Creature`: a name, owned
//! gear, hit points and two transient stat bonuses. The bonuses may go
//! negative through effects; the burn check in `effect` clamps them back and
//! converts the debt into damage.

use serde::{Deserialize, Serialize};

use crate::combat;
use crate::item::{Armor, Weapon};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub weapon: Weapon,
    pub armor: Armor,
    pub hit_points: i32,
    pub bonus_attack: i32,
    pub bonus_defense: i32,
}

impl Default for Creature {
    fn default() -> Self {
        Self {
            name: "Unnamed".to_string(),
            weapon: Weapon::default(),
            armor: Armor::default(),
            hit_points: -1,
            bonus_attack: 0,
            bonus_defense: 0,
        }
    }
}

impl Creature {
    pub fn is_dead(&self) -> bool {
        self.hit_points <= 0
    }

    /// Whether this creature's weapon can hurt `other` at all.
    pub fn can_damage(&self, other: &Creature) -> bool {
        combat::can_weapon_damage(
            &self.weapon,
            &other.armor,
            self.bonus_attack,
            other.bonus_defense,
        )
    }

    /// Compact status line for display: totals with base+bonus breakdown.
    pub fn status_line(&self) -> String {
        format!(
            "HPS: {}, ATK: {} ({}+{}), DEF: {} ({}+{}), Str: {}, Wk: {}",
            self.hit_points,
            self.weapon.attack + self.bonus_attack,
            self.weapon.attack,
            self.bonus_attack,
            self.armor.defense + self.bonus_defense,
            self.armor.defense,
            self.bonus_defense,
            self.weapon.strong_against.short(),
            self.weapon.weak_against.short(),
        )
    }
}
