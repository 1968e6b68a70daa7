//! Instant stat effects and the stat-burn rule
//!
//! Effects mutate one stat once and are consumed. Whenever an effect leaves
//! a bonus negative, `check_burns` clamps it back to zero and converts the
//! debt into hit-point damage scaled by game progress, so stats can never
//! stay negative.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::BURN_SCALE;
use crate::creature::Creature;
use crate::log::{EventLog, LogEntry};

/// Arithmetic applied to the target stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl EffectOp {
    pub fn symbol(self) -> &'static str {
        match self {
            EffectOp::Add => "+",
            EffectOp::Sub => "-",
            EffectOp::Mul => "*",
            EffectOp::Div => "/",
        }
    }
}

/// Which stat an effect targets. ATK and DEF hit the transient bonuses, not
/// the equipped gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStat {
    Hps,
    Atk,
    Def,
}

impl fmt::Display for TargetStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetStat::Hps => "HPS",
            TargetStat::Atk => "ATK",
            TargetStat::Def => "DEF",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstantEffect {
    pub op: EffectOp,
    pub stat: TargetStat,
    pub magnitude: f32,
}

impl InstantEffect {
    /// Display form, e.g. "+12 ATK".
    pub fn label(&self) -> String {
        format!("{}{} {}", self.op.symbol(), self.magnitude as i32, self.stat)
    }

    /// Apply once to `target`, then run the burn check. `room` and
    /// `difficulty` scale any resulting burn damage.
    pub fn apply(&self, target: &mut Creature, room: u32, difficulty: f32, log: &mut EventLog) {
        let slot = match self.stat {
            TargetStat::Hps => &mut target.hit_points,
            TargetStat::Atk => &mut target.bonus_attack,
            TargetStat::Def => &mut target.bonus_defense,
        };

        let current = *slot as f32;
        *slot = match self.op {
            EffectOp::Add => (current + self.magnitude) as i32,
            EffectOp::Sub => (current - self.magnitude) as i32,
            EffectOp::Mul => (current * self.magnitude) as i32,
            EffectOp::Div if self.magnitude != 0.0 => (current / self.magnitude) as i32,
            EffectOp::Div => *slot,
        };

        log.info(format!("Got {}!", self.label()));
        check_burns(target, room, difficulty, log);
    }
}

/// Clamp negative stat bonuses back to zero, converting the total debt into
/// hit-point damage. A no-op (no log entry either) when nothing is negative.
pub fn check_burns(creature: &mut Creature, room: u32, difficulty: f32, log: &mut EventLog) {
    let mut burn = 0;

    if creature.bonus_attack < 0 {
        burn -= creature.bonus_attack;
        creature.bonus_attack = 0;
    }
    if creature.bonus_defense < 0 {
        burn -= creature.bonus_defense;
        creature.bonus_defense = 0;
    }

    if burn == 0 {
        return;
    }

    let damage = (burn as f32 * BURN_SCALE * room as f32 * difficulty) as i32;
    creature.hit_points -= damage;
    log.push(LogEntry::Burn {
        name: creature.name.clone(),
        damage,
    });
}
