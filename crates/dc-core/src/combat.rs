//! Combat system
//!
//! The calculator half is pure functions over weapon/armor pairs; the
//! resolver half drives two creatures through an alternating-turn fight and
//! appends structured entries to the event log.

use thiserror::Error;

use crate::consts::{BONUS_MULTIPLIER, MALUS_MULTIPLIER};
use crate::creature::Creature;
use crate::item::{Armor, Weapon};
use crate::log::{EventLog, LogEntry};

/// Weapon has an elemental advantage against this armor.
pub fn is_strong_against(weapon: &Weapon, armor: &Armor) -> bool {
    weapon.strong_against.intersects(armor.element_types)
}

/// Weapon has an elemental disadvantage against this armor.
pub fn is_weak_against(weapon: &Weapon, armor: &Armor) -> bool {
    weapon.weak_against.intersects(armor.element_types)
}

/// Damage one strike deals, never negative.
///
/// Strong and weak multipliers compose when the armor carries elements from
/// both sets; the product is truncated toward zero once at the end.
pub fn weapon_damage(weapon: &Weapon, armor: &Armor, bonus_atk: i32, bonus_def: i32) -> i32 {
    let raw = ((weapon.attack + bonus_atk) - (armor.defense + bonus_def)) as f32;
    let mut dmg = raw;
    if is_strong_against(weapon, armor) {
        dmg *= BONUS_MULTIPLIER;
    }
    if is_weak_against(weapon, armor) {
        dmg *= MALUS_MULTIPLIER;
    }
    (dmg as i32).max(0)
}

/// Whether a strike with this weapon can hurt this armor at all.
pub fn can_weapon_damage(weapon: &Weapon, armor: &Armor, bonus_atk: i32, bonus_def: i32) -> bool {
    weapon_damage(weapon, armor, bonus_atk, bonus_def) > 0
}

#[derive(Debug, Error)]
pub enum CombatError {
    /// Neither side can hurt the other; entering the turn loop would never
    /// terminate. Callers must check `can_damage` before fighting.
    #[error("{attacker} and {defender} cannot harm each other")]
    Stalemate { attacker: String, defender: String },
}

/// Who was left standing after `fight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    AttackerWon,
    DefenderWon,
}

/// Resolve a full fight. The attacker strikes first; turns alternate until
/// one side dies. Every strike is logged.
pub fn fight(
    attacker: &mut Creature,
    defender: &mut Creature,
    log: &mut EventLog,
) -> Result<FightOutcome, CombatError> {
    if !attacker.can_damage(defender) && !defender.can_damage(attacker) {
        return Err(CombatError::Stalemate {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
        });
    }

    log.info(format!("{} engages {}!", attacker.name, defender.name));
    let attacker_hps_before = attacker.hit_points;
    let defender_hps_before = defender.hit_points;

    let outcome = loop {
        strike(attacker, defender, log);
        if defender.is_dead() {
            break FightOutcome::AttackerWon;
        }

        strike(defender, attacker, log);
        if attacker.is_dead() {
            break FightOutcome::DefenderWon;
        }
    };

    match outcome {
        FightOutcome::AttackerWon => log.info(format!(
            "{} wins. HPS {} -> {}!",
            attacker.name, attacker_hps_before, attacker.hit_points
        )),
        FightOutcome::DefenderWon => log.info(format!(
            "{} wins. HPS {} -> {}!",
            defender.name, defender_hps_before, defender.hit_points
        )),
    }

    Ok(outcome)
}

/// One strike from `from` against `to`.
fn strike(from: &Creature, to: &mut Creature, log: &mut EventLog) {
    let damage = weapon_damage(&from.weapon, &to.armor, from.bonus_attack, to.bonus_defense);
    to.hit_points -= damage;
    log.push(LogEntry::Strike {
        attacker: from.name.clone(),
        defender: to.name.clone(),
        damage,
        strong: is_strong_against(&from.weapon, &to.armor),
        weak: is_weak_against(&from.weapon, &to.armor),
        fatal: to.is_dead(),
    });
}
