//! Host-side frame logic
//!
//! [`Session`] runs one frame in the fixed order the game depends on:
//! reset/pause keys, points, draw, tick (or the pause screen), then round
//! delay bookkeeping and sounds. [`FramePacer`] decides how many frames a
//! host callback should run.
//!
//! The round delay after `Init`/`Score` is a deadline against the host
//! clock. While it runs the court is drawn frozen, and the reset key and
//! the host's close signal stay live.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::draw::{self, colors};
use crate::platform::{Audio, Input, Key, Renderer, SoundEffect};
use crate::settings::Settings;
use crate::sim::{Game, GamePhase, TickInput, points_system, tick};

/// Maximum frames to catch up in one host callback
pub const MAX_SUBSTEPS: u32 = 8;
/// Longest host gap (seconds) that is caught up rather than skipped
pub const MAX_FRAME_GAP: f64 = 0.1;

/// Owns the game and everything needed to advance it frame by frame
#[derive(Debug)]
pub struct Session {
    game: Game,
    rng: Pcg32,
    /// P was down last frame
    pause_held: bool,
    /// End of the running round delay, in host seconds
    resume_at: Option<f64>,
    frames: u64,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        log::info!("Session seed: {seed}");
        Self {
            game: Game::new(),
            rng: Pcg32::seed_from_u64(seed),
            pause_held: false,
            resume_at: None,
            frames: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let mut session = Self::new(seed);
        session.game.debug = settings.debug_lines;
        session
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// A round delay is in progress
    pub fn is_waiting(&self) -> bool {
        self.resume_at.is_some()
    }

    /// Run one frame. `now` is the host clock in seconds.
    pub fn frame(
        &mut self,
        now: f64,
        input: &impl Input,
        renderer: &mut impl Renderer,
        audio: &mut impl Audio,
    ) {
        self.frames += 1;

        if input.is_key_pressed(Key::R) || self.game.phase == GamePhase::Reset {
            self.game.reset();
            self.resume_at = None;
        }

        let waiting = self.is_waiting();

        let pause_down = input.is_key_down(Key::P);
        if pause_down && !self.pause_held && !waiting {
            self.game.toggle_pause();
        }
        self.pause_held = pause_down;

        renderer.begin();
        renderer.clear_background(colors::BACKGROUND);

        if !waiting {
            points_system(&mut self.game);
        }
        draw::draw_game(renderer, &self.game);
        if self.game.debug {
            draw::draw_debug_lines(renderer, &self.game);
        }
        if self.game.phase == GamePhase::Pause {
            draw::draw_paused(renderer);
        } else if !waiting {
            tick(&mut self.game, &tick_input(input), &mut self.rng);
        }

        renderer.end();

        let mut sounds: Vec<SoundEffect> = self
            .game
            .drain_events()
            .into_iter()
            .filter_map(SoundEffect::for_event)
            .collect();

        match self.resume_at {
            None if self.game.phase.is_waiting() => {
                self.resume_at = Some(now + ROUND_DELAY_SECS);
                sounds.push(SoundEffect::RoundStart);
                log::debug!("{:?}: resuming in {ROUND_DELAY_SECS}s", self.game.phase);
            }
            Some(deadline) if now >= deadline => {
                self.resume_at = None;
                self.game.resume();
                log::debug!("Round delay over");
            }
            _ => {}
        }

        // One play per effect per frame
        let mut played: Vec<SoundEffect> = Vec::with_capacity(sounds.len());
        for effect in sounds {
            if !played.contains(&effect) {
                audio.play(effect);
                played.push(effect);
            }
        }
    }
}

/// Seed for runs without a configured one
#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    rand::random()
}

/// Sample the paddle and debug keys
pub fn tick_input(input: &impl Input) -> TickInput {
    TickInput {
        left_up: input.is_key_down(Key::W),
        left_down: input.is_key_down(Key::S),
        right_up: input.is_key_down(Key::Up),
        right_down: input.is_key_down(Key::Down),
        toggle_debug: input.is_key_pressed(Key::D),
    }
}

/// Converts host callback times into a number of fixed-rate frames
#[derive(Debug, Clone)]
pub struct FramePacer {
    step: f64,
    accumulator: f64,
    last: Option<f64>,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            step: 1.0 / f64::from(fps.max(1)),
            accumulator: 0.0,
            last: None,
        }
    }

    /// Frames to run for a callback at `now` (seconds). The first call
    /// always runs one frame.
    pub fn frames_due(&mut self, now: f64) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 1;
        };
        let dt = (now - last).clamp(0.0, MAX_FRAME_GAP);
        self.accumulator += dt;

        let mut due = 0;
        while self.accumulator >= self.step && due < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(self.step);
        }
        due
    }
}
