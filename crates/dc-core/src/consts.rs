//! Core tuning constants for Delver's Choice
//!
//! These are fixed at compile time; the session never reconfigures them.

/// Number of elemental tags (Fire, Water, Earth, Lightning).
pub const ELEMENT_COUNT: usize = 4;

/// Damage multiplier when the weapon is strong against the armor.
pub const BONUS_MULTIPLIER: f32 = 2.5;

/// Damage multiplier when the weapon is weak against the armor.
pub const MALUS_MULTIPLIER: f32 = 0.8;

/// Choice slots offered per room.
pub const MAX_CHOICES: usize = 4;

/// Capacity of a multi-drop pickup.
pub const MAX_DROPS: usize = 3;

/// Rooms below this number never roll elemental affinities.
pub const ELEMENT_GATE_ROOM: u32 = 10;

/// Room countdown in seconds (Normal and Practice; Practice never ticks).
pub const NORMAL_TIMER_SECS: f32 = 10.0;

/// Room countdown in seconds (Hardcore).
pub const HARDCORE_TIMER_SECS: f32 = 6.0;

/// Difficulty added every fifth room (Normal and Practice).
pub const NORMAL_DIFFICULTY_INC: f32 = 0.038;

/// Difficulty added every fifth room (Hardcore).
pub const HARDCORE_DIFFICULTY_INC: f32 = 0.087;

/// Cap on post-fight healing from `sustain`.
pub const SUSTAIN_CAP: f32 = 20.0;

/// Burn damage per point of negative stat bonus, before room scaling.
pub const BURN_SCALE: f32 = 5.0;

/// Event-log lines shown at once by the presentation layer.
pub const LOG_WINDOW: usize = 6;

/// Screen-shake magnitude after a fight.
pub const FIGHT_SHAKE: f32 = 10.0;

/// Screen-shake and text-fade magnitudes on death.
pub const DEATH_SHAKE: f32 = 250.0;
pub const DEATH_FADE: f32 = 255.0;
