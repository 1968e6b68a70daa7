//! Session state machine
//!
//! Room progression, choice slots, the drop-pickup sub-mode, the room timer
//! and the difficulty ramp. The presentation layer drives this with
//! `execute_choice` and `tick` and polls the public fields each frame; the
//! session never calls out.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::choice::Choice;
use crate::combat;
use crate::consts::{
    DEATH_FADE, DEATH_SHAKE, FIGHT_SHAKE, HARDCORE_DIFFICULTY_INC, HARDCORE_TIMER_SECS,
    LOG_WINDOW, MAX_CHOICES, NORMAL_DIFFICULTY_INC, NORMAL_TIMER_SECS, SUSTAIN_CAP,
};
use crate::creature::Creature;
use crate::drops::ItemDrops;
use crate::item::{Armor, Weapon};
use crate::log::EventLog;
use crate::procgen::Generator;
use crate::rng::GameRng;

/// Top-level session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Menu,
    Playing,
    Dead,
}

/// Difficulty mode chosen from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Mode {
    Normal,
    Practice,
    Hardcore,
}

/// Returned from `execute_choice`. The session cannot stop the process, so
/// an exit request from the menu is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub state: SessionState,
    pub mode: Mode,
    pub room_number: u32,
    pub player: Creature,
    pub choices: [Option<Choice>; MAX_CHOICES],
    /// Replacement choices staged by executing a choice; swapped in only at
    /// `refresh_choices` so a choice never mutates the slot array it is
    /// being read from.
    pub pending_choices: [Option<Choice>; MAX_CHOICES],
    /// Room countdown in seconds.
    pub timer: f32,
    pub timer_enabled: bool,
    pub difficulty: f32,
    pub difficulty_inc: f32,
    /// Set while the pickup sub-mode is open.
    pub active_drops: Option<ItemDrops>,
    /// Screen-shake magnitude, decayed by `tick`; display-only.
    pub shake: f32,
    /// Death-text fade counter, decayed by `tick`; display-only.
    pub death_fade: f32,
    pub log: EventLog,
    pub rng: GameRng,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameRng::from_entropy())
    }
}

impl GameSession {
    /// Create a session in the menu. Nothing is generated until `restart`.
    pub fn new(rng: GameRng) -> Self {
        Self {
            state: SessionState::Menu,
            mode: Mode::Normal,
            room_number: 0,
            player: Creature::default(),
            choices: Default::default(),
            pending_choices: Default::default(),
            timer: 0.0,
            timer_enabled: true,
            difficulty: 1.0,
            difficulty_inc: NORMAL_DIFFICULTY_INC,
            active_drops: None,
            shake: 0.0,
            death_fade: 0.0,
            log: EventLog::new(),
            rng,
        }
    }

    /// Start (or restart) a run in the given mode from room 1 with the fixed
    /// starting kit.
    pub fn restart(&mut self, mode: Mode) {
        self.mode = mode;
        self.difficulty = 1.0;
        self.difficulty_inc = match mode {
            Mode::Normal | Mode::Practice => NORMAL_DIFFICULTY_INC,
            Mode::Hardcore => HARDCORE_DIFFICULTY_INC,
        };
        self.timer_enabled = mode != Mode::Practice;

        self.state = SessionState::Playing;
        self.room_number = 0;
        self.shake = 0.0;
        self.death_fade = 0.0;
        self.choices = Default::default();
        self.pending_choices = Default::default();
        self.active_drops = None;

        self.player = Creature {
            name: "Player".to_string(),
            weapon: Weapon {
                name: "Starting weapon".to_string(),
                attack: 5,
                ..Default::default()
            },
            armor: Armor {
                name: "Starting armor".to_string(),
                defense: 2,
                ..Default::default()
            },
            hit_points: 150,
            bonus_attack: 1,
            bonus_defense: 1,
        };

        self.advance();
    }

    /// Back to the menu. The run's fields stay as they were; the log keeps
    /// accumulating for the lifetime of the session.
    pub fn goto_menu(&mut self) {
        self.state = SessionState::Menu;
        self.shake = 0.0;
        self.death_fade = 0.0;
    }

    /// Advance the per-frame clocks: room countdown, near-timeout warning
    /// shake, death transition, shake/fade decay. `dt` is in seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.death_fade > 0.0 {
            self.death_fade = (self.death_fade - dt * 60.0).max(0.0);
        }

        if self.state == SessionState::Playing {
            if self.timer_enabled {
                self.timer -= dt;
            }

            if !self.player.is_dead() {
                if self.timer <= 1.0 {
                    self.shake = self.shake.max(3.0);
                } else if self.timer <= 2.0 {
                    self.shake = self.shake.max(2.0);
                } else if self.timer <= 3.0 {
                    self.shake = self.shake.max(1.0);
                }
            }

            if (self.timer_enabled && self.timer <= 0.0) || self.player.is_dead() {
                self.die();
            }
        }

        if self.shake > 0.0 {
            self.shake = (self.shake - dt * 60.0).max(0.0);
        }
    }

    /// Execute the choice at `slot`. Empty or out-of-range slots are a
    /// no-op. Dispatch depends on state: menu slots pick a mode (slot 3
    /// requests exit), dead slots restart or return to the menu, playing
    /// slots run the room choice or, in the pickup sub-mode, claim drops.
    pub fn execute_choice(&mut self, slot: usize) -> SessionSignal {
        match self.state {
            SessionState::Menu => match slot {
                0 => self.restart(Mode::Normal),
                1 => self.restart(Mode::Practice),
                2 => self.restart(Mode::Hardcore),
                3 => return SessionSignal::Quit,
                _ => {}
            },
            SessionState::Dead => {
                if slot == 0 {
                    self.goto_menu();
                } else {
                    self.restart(self.mode);
                }
            }
            SessionState::Playing => {
                if self.active_drops.is_none() {
                    self.execute_room_choice(slot);
                    if self.active_drops.is_none() {
                        self.refresh_choices();
                    }
                } else if slot == 0 {
                    self.end_drops();
                    self.refresh_choices();
                } else {
                    self.try_pickup_drop(slot - 1);
                }
            }
        }
        SessionSignal::Continue
    }

    fn execute_room_choice(&mut self, slot: usize) {
        if slot >= MAX_CHOICES {
            return;
        }
        let Some(choice) = self.choices[slot].take() else {
            return;
        };

        match choice {
            Choice::Advance => self.advance(),
            Choice::Fight(mut creature) => {
                if !self.player.can_damage(&creature) {
                    self.log.info(format!(
                        "{} cannot fight {}!",
                        self.player.name, creature.name
                    ));
                    self.choices[slot] = Some(Choice::Fight(creature));
                    return;
                }
                match combat::fight(&mut self.player, &mut creature, &mut self.log) {
                    Ok(_) => {
                        self.sustain();
                        let generator = self.generator();
                        let drops = generator.drops(&mut self.rng, self.room_number as i32);
                        self.pending_choices[slot] = Some(Choice::Collect(drops));
                        self.shake = FIGHT_SHAKE;
                    }
                    Err(err) => self.log.info(err.to_string()),
                }
            }
            Choice::Collect(drops) => {
                self.active_drops = Some(drops);
                self.pending_choices[slot] = Some(Choice::Advance);
            }
            Choice::Pickup(drop) => match drop {
                Some(drop) => {
                    drop.apply(
                        &mut self.player,
                        self.room_number,
                        self.difficulty,
                        &mut self.log,
                    );
                    self.pending_choices[slot] = Some(Choice::Advance);
                }
                // Already claimed; leave the slot as-is.
                None => self.choices[slot] = Some(Choice::Pickup(None)),
            },
        }
    }

    /// Move to the next room: bump the difficulty every fifth room, roll a
    /// fresh set of choices, reset the countdown, close any pickup tray.
    pub fn advance(&mut self) {
        self.room_number += 1;

        if self.room_number % 5 == 0 {
            self.log.info("Increasing difficulty...");
            self.difficulty += self.difficulty_inc;
        }

        self.generate_choices();
        self.reset_timer();
        self.end_drops();
    }

    /// Post-fight comeback heal, capped so high rooms cannot heal-loop.
    fn sustain(&mut self) {
        if self.player.is_dead() {
            return;
        }

        let x = (1.0 + (self.room_number as f32 * 1.5 / self.difficulty)).min(SUSTAIN_CAP);
        let heal = x as i32;
        self.log
            .info(format!("You drain {heal} HPS defeating the enemy"));
        self.player.hit_points += heal;
    }

    fn die(&mut self) {
        self.state = SessionState::Dead;
        self.shake = DEATH_SHAKE;
        self.death_fade = DEATH_FADE;
    }

    /// Swap staged replacement choices into their slots.
    fn refresh_choices(&mut self) {
        for idx in 0..MAX_CHOICES {
            if self.pending_choices[idx].is_some() {
                self.choices[idx] = self.pending_choices[idx].take();
            }
        }
    }

    fn reset_timer(&mut self) {
        self.timer = match self.mode {
            Mode::Normal | Mode::Practice => NORMAL_TIMER_SECS,
            Mode::Hardcore => HARDCORE_TIMER_SECS,
        };
    }

    fn end_drops(&mut self) {
        self.active_drops = None;
    }

    fn try_pickup_drop(&mut self, idx: usize) {
        let room = self.room_number;
        let difficulty = self.difficulty;
        if let Some(drops) = self.active_drops.as_mut() {
            drops.give(idx, &mut self.player, room, difficulty, &mut self.log);
        }
    }

    /// Roll this room's choices: 2 slots early on, 3 past room 10, 4 past
    /// room 20, at shuffled positions. 85% fights; the rest split 80/20
    /// between single and multi drops.
    fn generate_choices(&mut self) {
        let count = if self.room_number > 20 {
            4
        } else if self.room_number > 10 {
            3
        } else {
            2
        };

        let mut indices = [0usize, 1, 2, 3];
        self.rng.shuffle(&mut indices);

        self.choices = Default::default();
        let generator = self.generator();
        let level = self.room_number as i32;

        for &idx in indices.iter().take(count) {
            let choice = if !self.rng.percent(15) {
                let fight_level = ((self.room_number as f32
                    + self.difficulty
                    + (self.room_number / 10) as f32)
                    * self.difficulty) as i32;
                Choice::Fight(generator.creature(&mut self.rng, fight_level))
            } else if !self.rng.percent(20) {
                Choice::Pickup(Some(generator.random_drop(&mut self.rng, level)))
            } else {
                Choice::Collect(generator.drops(&mut self.rng, level))
            };
            self.choices[idx] = Some(choice);
        }
    }

    fn generator(&self) -> Generator {
        Generator::new(self.difficulty, self.room_number)
    }

    /// Caption for a choice slot, if the slot is filled.
    pub fn choice_label(&self, slot: usize) -> Option<&'static str> {
        self.choices.get(slot).and_then(|c| c.as_ref()).map(Choice::label)
    }

    /// The display window of the event log, oldest first.
    pub fn recent_log(&self) -> Vec<String> {
        self.log.recent_lines(LOG_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drops::Drop;
    use crate::item::Weapon;

    fn session() -> GameSession {
        GameSession::new(GameRng::new(42))
    }

    fn playing(mode: Mode) -> GameSession {
        let mut s = session();
        s.restart(mode);
        s
    }

    fn find_slot(s: &GameSession, pred: impl Fn(&Choice) -> bool) -> Option<usize> {
        (0..MAX_CHOICES).find(|&i| s.choices[i].as_ref().is_some_and(&pred))
    }

    /// A fresh Normal run whose first room offers a fight, plus its slot.
    /// Scans seeds so the result is deterministic.
    fn playing_with_fight() -> (GameSession, usize) {
        for seed in 0u64..100 {
            let mut s = GameSession::new(GameRng::new(seed));
            s.restart(Mode::Normal);
            if let Some(slot) = find_slot(&s, |c| matches!(c, Choice::Fight(_))) {
                return (s, slot);
            }
        }
        panic!("no seed under 100 offers a room-1 fight");
    }

    #[test]
    fn test_new_session_is_in_menu() {
        let s = session();
        assert_eq!(s.state, SessionState::Menu);
        assert_eq!(s.room_number, 0);
    }

    #[test]
    fn test_menu_slots_pick_modes() {
        let mut s = session();
        assert_eq!(s.execute_choice(1), SessionSignal::Continue);
        assert_eq!(s.state, SessionState::Playing);
        assert_eq!(s.mode, Mode::Practice);
        assert!(!s.timer_enabled);

        s.goto_menu();
        assert_eq!(s.execute_choice(3), SessionSignal::Quit);
        assert_eq!(s.state, SessionState::Menu);
    }

    #[test]
    fn test_restart_sets_starting_kit() {
        let s = playing(Mode::Normal);
        assert_eq!(s.room_number, 1);
        assert_eq!(s.player.hit_points, 150);
        assert_eq!(s.player.weapon.attack, 5);
        assert_eq!(s.player.armor.defense, 2);
        assert_eq!(s.player.bonus_attack, 1);
        assert_eq!(s.player.bonus_defense, 1);
        assert_eq!(s.timer, NORMAL_TIMER_SECS);
        // Room 1 offers exactly two choices.
        let filled = s.choices.iter().filter(|c| c.is_some()).count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_hardcore_ramp_and_timer() {
        let s = playing(Mode::Hardcore);
        assert_eq!(s.timer, HARDCORE_TIMER_SECS);
        assert_eq!(s.difficulty_inc, HARDCORE_DIFFICULTY_INC);
        assert!(s.timer_enabled);
    }

    #[test]
    fn test_difficulty_bumps_every_fifth_room() {
        let mut s = playing(Mode::Normal);
        let base = s.difficulty;
        for _ in 0..4 {
            s.advance();
        }
        assert_eq!(s.room_number, 5);
        assert!((s.difficulty - (base + NORMAL_DIFFICULTY_INC)).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_slot_is_noop() {
        let mut s = playing(Mode::Normal);
        let before_room = s.room_number;
        let before_len = s.log.len();
        s.execute_choice(17);
        for i in 0..MAX_CHOICES {
            if s.choices[i].is_none() {
                s.execute_choice(i);
            }
        }
        assert_eq!(s.room_number, before_room);
        assert_eq!(s.log.len(), before_len);
        assert_eq!(s.state, SessionState::Playing);
    }

    #[test]
    fn test_fight_queues_collect_into_same_slot() {
        let (mut s, slot) = playing_with_fight();
        s.execute_choice(slot);
        // Player survives room 1 and the slot now offers the spoils.
        assert_eq!(s.state, SessionState::Playing);
        assert!(!s.player.is_dead());
        assert!(matches!(s.choices[slot], Some(Choice::Collect(_))));
        assert!(s.shake > 0.0);
    }

    #[test]
    fn test_collect_opens_and_back_closes_submode() {
        let (mut s, slot) = playing_with_fight();
        s.execute_choice(slot);
        assert!(matches!(s.choices[slot], Some(Choice::Collect(_))));

        s.execute_choice(slot);
        assert!(s.active_drops.is_some());
        // While the tray is open the replacement stays pending.
        assert!(matches!(s.pending_choices[slot], Some(Choice::Advance)));

        // Slot 0 backs out and commits the pending swap.
        s.execute_choice(0);
        assert!(s.active_drops.is_none());
        assert!(matches!(s.choices[slot], Some(Choice::Advance)));
    }

    #[test]
    fn test_tray_drops_claimed_once() {
        let (mut s, slot) = playing_with_fight();
        s.execute_choice(slot);
        s.execute_choice(slot);
        assert!(s.active_drops.as_ref().is_some_and(|t| t.has(0)));

        // Tray slot 0 maps to choice slot 1.
        s.execute_choice(1);
        assert!(!s.active_drops.as_ref().unwrap().has(0));
        let log_len = s.log.len();
        s.execute_choice(1);
        assert_eq!(s.log.len(), log_len);
    }

    #[test]
    fn test_advance_choice_moves_to_next_room() {
        let (mut s, slot) = playing_with_fight();
        s.execute_choice(slot); // fight
        s.execute_choice(slot); // open tray
        s.execute_choice(0); // back
        assert!(matches!(s.choices[slot], Some(Choice::Advance)));
        s.execute_choice(slot); // forward
        assert_eq!(s.room_number, 2);
        assert_eq!(s.timer, NORMAL_TIMER_SECS);
        assert!(s.active_drops.is_none());
    }

    #[test]
    fn test_pickup_single_drop_applies_once() {
        let mut s = playing(Mode::Normal);
        let w = Weapon {
            name: "Claymore".into(),
            attack: 40,
            ..Default::default()
        };
        s.choices[0] = Some(Choice::Pickup(Some(Drop::Weapon(w))));
        s.execute_choice(0);
        assert_eq!(s.player.weapon.name, "Claymore");
        // The slot was swapped for Forward at refresh.
        assert!(matches!(s.choices[0], Some(Choice::Advance)));
    }

    #[test]
    fn test_timer_expiry_kills() {
        let mut s = playing(Mode::Normal);
        s.tick(NORMAL_TIMER_SECS + 0.1);
        assert_eq!(s.state, SessionState::Dead);
        assert!(s.death_fade > 0.0);
    }

    #[test]
    fn test_practice_timer_never_ticks() {
        let mut s = playing(Mode::Practice);
        s.tick(60.0);
        assert_eq!(s.state, SessionState::Playing);
        assert_eq!(s.timer, NORMAL_TIMER_SECS);
    }

    #[test]
    fn test_player_death_detected_on_tick() {
        let mut s = playing(Mode::Normal);
        s.player.hit_points = 0;
        s.tick(0.016);
        assert_eq!(s.state, SessionState::Dead);
    }

    #[test]
    fn test_dead_slot_zero_returns_to_menu() {
        let mut s = playing(Mode::Hardcore);
        s.player.hit_points = 0;
        s.tick(0.016);
        s.execute_choice(0);
        assert_eq!(s.state, SessionState::Menu);
    }

    #[test]
    fn test_dead_other_slot_restarts_same_mode() {
        let mut s = playing(Mode::Hardcore);
        s.player.hit_points = 0;
        s.tick(0.016);
        s.execute_choice(2);
        assert_eq!(s.state, SessionState::Playing);
        assert_eq!(s.mode, Mode::Hardcore);
        assert_eq!(s.room_number, 1);
        assert_eq!(s.player.hit_points, 150);
    }

    #[test]
    fn test_cannot_fight_refusal_keeps_state() {
        let (mut s, slot) = playing_with_fight();
        // Make the enemy unhittable.
        if let Some(Choice::Fight(c)) = s.choices[slot].as_mut() {
            c.armor.defense = 1000;
        }
        let hps = s.player.hit_points;
        s.execute_choice(slot);
        assert_eq!(s.player.hit_points, hps);
        assert!(matches!(s.choices[slot], Some(Choice::Fight(_))));
        let last = s.recent_log().pop().unwrap();
        assert!(last.contains("cannot fight"), "got {last:?}");
    }

    #[test]
    fn test_session_replays_with_seed() {
        let mut a = GameSession::new(GameRng::new(7));
        let mut b = GameSession::new(GameRng::new(7));
        a.restart(Mode::Normal);
        b.restart(Mode::Normal);
        assert_eq!(a.choices, b.choices);
        for slot in 0..MAX_CHOICES {
            a.execute_choice(slot);
            b.execute_choice(slot);
            assert_eq!(a.player, b.player);
            assert_eq!(a.choices, b.choices);
        }
    }

    #[test]
    fn test_sustain_capped() {
        let mut s = playing(Mode::Normal);
        s.room_number = 100;
        let hps = s.player.hit_points;
        s.sustain();
        assert!(s.player.hit_points - hps <= SUSTAIN_CAP as i32);
    }
}
