//! Drops: single-use pickups
//!
//! A drop either swaps in a piece of gear or fires a bundle of instant
//! effects. Applying a drop consumes it; `ItemDrops` is the fixed-capacity
//! tray used by the multi-drop pickup sub-mode.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_DROPS;
use crate::creature::Creature;
use crate::effect::InstantEffect;
use crate::item::{Armor, Weapon};
use crate::log::EventLog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Drop {
    Weapon(Weapon),
    Armor(Armor),
    Effects(Vec<InstantEffect>),
}

impl Drop {
    /// Apply to `target`, consuming the drop.
    pub fn apply(self, target: &mut Creature, room: u32, difficulty: f32, log: &mut EventLog) {
        match self {
            Drop::Weapon(weapon) => {
                log.info(format!("Equipped {}!", weapon.name));
                target.weapon = weapon;
            }
            Drop::Armor(armor) => {
                log.info(format!("Equipped {}!", armor.name));
                target.armor = armor;
            }
            Drop::Effects(effects) => {
                for effect in effects {
                    effect.apply(target, room, difficulty, log);
                }
            }
        }
    }

    /// Display summary for a choice slot or the pickup tray.
    pub fn label(&self) -> String {
        match self {
            Drop::Weapon(w) => format!("{} (ATK {})", w.name, w.attack),
            Drop::Armor(a) => format!("{} (DEF {})", a.name, a.defense),
            Drop::Effects(effects) => {
                let labels: Vec<String> = effects.iter().map(InstantEffect::label).collect();
                labels.join(", ")
            }
        }
    }
}

/// Fixed-capacity tray of optional drops, each independently present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDrops {
    slots: [Option<Drop>; MAX_DROPS],
}

impl ItemDrops {
    pub fn set(&mut self, idx: usize, drop: Drop) {
        if idx < MAX_DROPS {
            self.slots[idx] = Some(drop);
        }
    }

    /// Whether `idx` holds an unclaimed drop. Out-of-range is just "no".
    pub fn has(&self, idx: usize) -> bool {
        idx < MAX_DROPS && self.slots[idx].is_some()
    }

    pub fn get(&self, idx: usize) -> Option<&Drop> {
        self.slots.get(idx).and_then(|s| s.as_ref())
    }

    /// Claim the drop at `idx` for `target`. Each drop can be claimed once;
    /// empty or out-of-range slots are a no-op returning false.
    pub fn give(
        &mut self,
        idx: usize,
        target: &mut Creature,
        room: u32,
        difficulty: f32,
        log: &mut EventLog,
    ) -> bool {
        if idx >= MAX_DROPS {
            return false;
        }
        match self.slots[idx].take() {
            Some(drop) => {
                drop.apply(target, room, difficulty, log);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectOp, TargetStat};

    fn player() -> Creature {
        Creature {
            hit_points: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_weapon_drop_replaces_gear() {
        let mut p = player();
        let mut log = EventLog::new();
        let w = Weapon {
            name: "Claymore".into(),
            attack: 9,
            ..Default::default()
        };
        Drop::Weapon(w).apply(&mut p, 1, 1.0, &mut log);
        assert_eq!(p.weapon.name, "Claymore");
        assert_eq!(p.weapon.attack, 9);
    }

    #[test]
    fn test_give_is_single_use() {
        let mut tray = ItemDrops::default();
        tray.set(
            1,
            Drop::Effects(vec![InstantEffect {
                op: EffectOp::Add,
                stat: TargetStat::Atk,
                magnitude: 2.0,
            }]),
        );
        let mut p = player();
        let mut log = EventLog::new();

        assert!(tray.has(1));
        assert!(tray.give(1, &mut p, 1, 1.0, &mut log));
        assert_eq!(p.bonus_attack, 2);

        // Second claim is a rejected no-op.
        assert!(!tray.has(1));
        assert!(!tray.give(1, &mut p, 1, 1.0, &mut log));
        assert_eq!(p.bonus_attack, 2);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut tray = ItemDrops::default();
        let mut p = player();
        let mut log = EventLog::new();
        assert!(!tray.has(MAX_DROPS));
        assert!(!tray.give(MAX_DROPS, &mut p, 1, 1.0, &mut log));
        assert!(log.is_empty());
    }
}
