//! Property tests for the combat calculator and resolver.

use proptest::prelude::*;

use dc_core::combat::{self, FightOutcome};
use dc_core::creature::Creature;
use dc_core::element::ElementSet;
use dc_core::item::{Armor, Weapon};
use dc_core::log::EventLog;
use dc_core::{BONUS_MULTIPLIER, MALUS_MULTIPLIER};

fn element_set() -> impl Strategy<Value = ElementSet> {
    (0u8..16).prop_map(ElementSet::from_bits_truncate)
}

fn arb_weapon() -> impl Strategy<Value = Weapon> {
    (0i32..200, element_set(), element_set()).prop_map(|(attack, strong, weak)| Weapon {
        attack,
        strong_against: strong,
        weak_against: weak,
        ..Default::default()
    })
}

fn arb_armor() -> impl Strategy<Value = Armor> {
    (0i32..200, element_set()).prop_map(|(defense, types)| Armor {
        defense,
        element_types: types,
        ..Default::default()
    })
}

proptest! {
    #[test]
    fn prop_damage_never_negative(
        weapon in arb_weapon(),
        armor in arb_armor(),
        bonus_atk in -50i32..50,
        bonus_def in -50i32..50,
    ) {
        prop_assert!(combat::weapon_damage(&weapon, &armor, bonus_atk, bonus_def) >= 0);
    }

    #[test]
    fn prop_multipliers_compose(
        attack in 1i32..200,
        defense in 0i32..200,
    ) {
        // Against Fire+Earth armor, a Fire-strong Earth-weak weapon deals
        // exactly trunc(raw * 2.5 * 0.8), floored at zero.
        let weapon = Weapon {
            attack,
            strong_against: ElementSet::FIRE,
            weak_against: ElementSet::EARTH,
            ..Default::default()
        };
        let armor = Armor {
            defense,
            element_types: ElementSet::FIRE | ElementSet::EARTH,
            ..Default::default()
        };
        let raw = (attack - defense) as f32;
        let expected = ((raw * BONUS_MULTIPLIER * MALUS_MULTIPLIER) as i32).max(0);
        prop_assert_eq!(combat::weapon_damage(&weapon, &armor, 0, 0), expected);
    }

    #[test]
    fn prop_elementless_strikes_are_plain(
        attack in 0i32..200,
        defense in 0i32..200,
    ) {
        let weapon = Weapon { attack, ..Default::default() };
        let armor = Armor { defense, ..Default::default() };
        prop_assert_eq!(
            combat::weapon_damage(&weapon, &armor, 0, 0),
            (attack - defense).max(0)
        );
    }

    #[test]
    fn prop_fight_leaves_exactly_one_corpse(
        atk_a in 1i32..30,
        def_a in 0i32..10,
        hps_a in 1i32..300,
        atk_b in 1i32..30,
        def_b in 0i32..10,
        hps_b in 1i32..300,
    ) {
        let mut a = Creature {
            name: "A".into(),
            weapon: Weapon { attack: atk_a + def_b + 1, ..Default::default() },
            armor: Armor { defense: def_a, ..Default::default() },
            hit_points: hps_a,
            ..Default::default()
        };
        let mut b = Creature {
            name: "B".into(),
            weapon: Weapon { attack: atk_b, ..Default::default() },
            armor: Armor { defense: def_b, ..Default::default() },
            hit_points: hps_b,
            ..Default::default()
        };
        // A can always hurt B by construction, so the fight must resolve.
        let mut log = EventLog::new();
        let outcome = combat::fight(&mut a, &mut b, &mut log).unwrap();
        prop_assert!(a.is_dead() != b.is_dead());
        match outcome {
            FightOutcome::AttackerWon => prop_assert!(b.is_dead()),
            FightOutcome::DefenderWon => prop_assert!(a.is_dead()),
        }
        prop_assert!(!log.is_empty());
    }

    #[test]
    fn prop_stalemate_always_rejected(
        hps_a in 1i32..100,
        hps_b in 1i32..100,
        defense in 50i32..100,
    ) {
        let mut a = Creature {
            name: "A".into(),
            weapon: Weapon { attack: 1, ..Default::default() },
            armor: Armor { defense, ..Default::default() },
            hit_points: hps_a,
            ..Default::default()
        };
        let mut b = a.clone();
        b.name = "B".into();
        b.hit_points = hps_b;

        let mut log = EventLog::new();
        prop_assert!(combat::fight(&mut a, &mut b, &mut log).is_err());
        prop_assert!(log.is_empty());
        prop_assert_eq!(a.hit_points, hps_a);
        prop_assert_eq!(b.hit_points, hps_b);
    }
}
