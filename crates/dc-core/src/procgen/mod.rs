//! Procedural generation
//!
//! Level-scaled generation of weapons, armor, creatures, instant effects and
//! drops. Every roll goes through the caller's `GameRng`, so generation is a
//! deterministic function of (level, difficulty curve, rng state).

pub mod namegen;

use crate::consts::{ELEMENT_GATE_ROOM, MAX_DROPS};
use crate::creature::Creature;
use crate::drops::{Drop, ItemDrops};
use crate::effect::{EffectOp, InstantEffect, TargetStat};
use crate::element::ElementSet;
use crate::item::{Armor, Weapon, WeaponClass};
use crate::rng::GameRng;

/// Difficulty-curve inputs shared by every roll. Cheap to copy; the session
/// rebuilds one per call site from its current difficulty and room.
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    pub difficulty: f32,
    pub room: u32,
}

impl Generator {
    pub fn new(difficulty: f32, room: u32) -> Self {
        Self { difficulty, room }
    }

    /// Base stat roll: uniform over [0.65d, 1.55d) with
    /// d = ((level * 0.8) + 4) * difficulty, clamped non-negative.
    fn stat_roll(&self, rng: &mut GameRng, level: i32) -> i32 {
        let d = (((level as f32 * 0.8) + 4.0) * self.difficulty) as i32;
        let lo = (d as f32 * 0.65) as i32;
        let hi = (d as f32 * 1.55) as i32;
        rng.range(lo, hi).max(0)
    }

    /// Roll an elemental tag set. Nothing below the gate room; above it, up
    /// to four weighted flips (50/45/40/35%) each add one distinct element,
    /// with the later tiers gated on level * difficulty and the whole chain
    /// short-circuiting on the first failed gate.
    pub fn elements(&self, rng: &mut GameRng, level: i32) -> ElementSet {
        let mut set = ElementSet::empty();
        if self.room < ELEMENT_GATE_ROOM {
            return set;
        }

        let d = (level as f32 * self.difficulty) as i32;
        let mut indices = [0usize, 1, 2, 3];
        rng.shuffle(&mut indices);
        let mut next = 0;

        if rng.percent(50) {
            set |= ElementSet::from_index(indices[next]);
            next += 1;
        }

        if d < 20 {
            return set;
        }
        if rng.percent(45) {
            set |= ElementSet::from_index(indices[next]);
            next += 1;
        }

        if d < 30 {
            return set;
        }
        if rng.percent(40) {
            set |= ElementSet::from_index(indices[next]);
            next += 1;
        }

        if d < 40 {
            return set;
        }
        if rng.percent(35) {
            set |= ElementSet::from_index(indices[next]);
        }

        set
    }

    pub fn weapon(&self, rng: &mut GameRng, level: i32) -> Weapon {
        Weapon {
            name: namegen::weapon_name(rng),
            attack: self.stat_roll(rng, level) + 1,
            strong_against: self.elements(rng, level),
            weak_against: self.elements(rng, level),
            class: match rng.rn2(3) {
                0 => WeaponClass::Blunt,
                1 => WeaponClass::Blade,
                _ => WeaponClass::Polearm,
            },
        }
    }

    pub fn armor(&self, rng: &mut GameRng, level: i32) -> Armor {
        Armor {
            name: namegen::armor_name(rng),
            defense: (self.stat_roll(rng, level) as f32 * 0.7) as i32,
            element_types: self.elements(rng, level),
        }
    }

    pub fn creature(&self, rng: &mut GameRng, level: i32) -> Creature {
        let d = (level as f32 * self.difficulty) as i32;
        let name = namegen::creature_name(rng);
        let armor_level = ((level as f32 * 0.69) + self.difficulty - 1.0).max(1.0) as i32;
        let armor = self.armor(rng, armor_level);
        let weapon = self.weapon(rng, level - 1);
        let hit_points = d * 5 + rng.range(0, d * 3);

        Creature {
            name,
            weapon,
            armor,
            hit_points,
            bonus_attack: 0,
            bonus_defense: 0,
        }
    }

    /// Magnitude is level/8 + uniform(0, 3 + level/12), at least 1; HPS
    /// effects instead scale as level * (10 + uniform(-2, 3)).
    pub fn instant_effect(
        &self,
        rng: &mut GameRng,
        stat: TargetStat,
        op: EffectOp,
        level: i32,
    ) -> InstantEffect {
        let mut magnitude = ((level / 8) + rng.range(0, 3 + level / 12)).max(1) as f32;
        if stat == TargetStat::Hps {
            magnitude = (level * (10 + rng.range(-2, 3))) as f32;
        }
        InstantEffect {
            op,
            stat,
            magnitude,
        }
    }

    /// One shuffled-stat Add/Sub pair, doubled with probability
    /// min(level, 35)%.
    pub fn effect_bundle(&self, rng: &mut GameRng, level: i32) -> Vec<InstantEffect> {
        let mut effects = Vec::new();
        self.push_effect_pair(rng, level, &mut effects);
        if rng.percent(level.clamp(0, 35) as u32) {
            self.push_effect_pair(rng, level, &mut effects);
        }
        effects
    }

    fn push_effect_pair(&self, rng: &mut GameRng, level: i32, out: &mut Vec<InstantEffect>) {
        let mut stats = [TargetStat::Hps, TargetStat::Atk, TargetStat::Def];
        rng.shuffle(&mut stats);
        out.push(self.instant_effect(rng, stats[0], EffectOp::Add, level));
        out.push(self.instant_effect(rng, stats[1], EffectOp::Sub, level));
    }

    /// Weighted drop branch: 28/50 effects, then 30/50 weapon else armor.
    pub fn random_drop(&self, rng: &mut GameRng, level: i32) -> Drop {
        if rng.rn2(50) > 21 {
            Drop::Effects(self.effect_bundle(rng, level))
        } else if rng.rn2(50) > 19 {
            Drop::Weapon(self.weapon(rng, level))
        } else {
            Drop::Armor(self.armor(rng, level))
        }
    }

    /// Multi-drop tray: slot 0 always filled, the rest each with a 21/50
    /// chance.
    pub fn drops(&self, rng: &mut GameRng, level: i32) -> ItemDrops {
        let mut result = ItemDrops::default();
        result.set(0, self.random_drop(rng, level));
        for idx in 1..MAX_DROPS {
            if rng.rn2(50) > 20 {
                continue;
            }
            result.set(idx, self.random_drop(rng, level));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_elements_before_gate_room() {
        let g = Generator::new(5.0, ELEMENT_GATE_ROOM - 1);
        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            assert!(g.elements(&mut rng, 100).is_empty());
        }
    }

    #[test]
    fn test_low_scale_rolls_at_most_one_element() {
        // d = 10 * 1.0 < 20: only the first tier can fire.
        let g = Generator::new(1.0, ELEMENT_GATE_ROOM);
        let mut rng = GameRng::new(4);
        for _ in 0..200 {
            assert!(g.elements(&mut rng, 10).bits().count_ones() <= 1);
        }
    }

    #[test]
    fn test_stat_rolls_nonnegative() {
        let g = Generator::new(1.0, 1);
        let mut rng = GameRng::new(9);
        for level in 0..40 {
            let w = g.weapon(&mut rng, level);
            assert!(w.attack >= 1, "attack {} at level {level}", w.attack);
            let a = g.armor(&mut rng, level);
            assert!(a.defense >= 0, "defense {} at level {level}", a.defense);
        }
    }

    #[test]
    fn test_effect_magnitude_floor() {
        let g = Generator::new(1.0, 1);
        let mut rng = GameRng::new(11);
        for _ in 0..100 {
            let e = g.instant_effect(&mut rng, TargetStat::Atk, EffectOp::Sub, 0);
            assert!(e.magnitude >= 1.0);
        }
    }

    #[test]
    fn test_effect_bundle_is_add_sub_pairs() {
        let g = Generator::new(1.0, 1);
        let mut rng = GameRng::new(12);
        for _ in 0..50 {
            let bundle = g.effect_bundle(&mut rng, 10);
            assert!(bundle.len() == 2 || bundle.len() == 4);
            for pair in bundle.chunks(2) {
                assert_eq!(pair[0].op, EffectOp::Add);
                assert_eq!(pair[1].op, EffectOp::Sub);
                assert_ne!(pair[0].stat, pair[1].stat);
            }
        }
    }

    #[test]
    fn test_drops_always_fill_slot_zero() {
        let g = Generator::new(1.0, 1);
        let mut rng = GameRng::new(13);
        for _ in 0..50 {
            let tray = g.drops(&mut rng, 5);
            assert!(tray.has(0));
        }
    }

    #[test]
    fn test_generation_replays_with_seed() {
        let g = Generator::new(1.3, 12);
        let mut a = GameRng::new(21);
        let mut b = GameRng::new(21);
        for level in 1..20 {
            assert_eq!(g.creature(&mut a, level), g.creature(&mut b, level));
        }
    }

    #[test]
    fn test_creature_scales_with_level() {
        let g = Generator::new(1.0, 1);
        let mut rng = GameRng::new(30);
        let c = g.creature(&mut rng, 2);
        // d = 2: hit points in [10, 16).
        assert!((10..16).contains(&c.hit_points), "hps {}", c.hit_points);
        assert!(!c.name.is_empty());
    }
}
