//! Game state and core simulation types
//!
//! Everything the session owns lives on the [`GameSession`] aggregate so a
//! reset is a plain method call and tests can build worlds by hand.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tiers::{self, OutOfRange};
use crate::{highscores, sim::spawn};

/// Which ladder spawns are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionMode {
    /// Primary ladder, apex gated behind an unlock
    #[default]
    Normal,
    /// Secondary ladder only
    Secret,
}

/// A simulated soda token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soda {
    pub id: u32,
    /// Index into the tier table
    pub tier: usize,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Denormalized from the tier table at construction
    pub radius: f32,
    /// Frozen pre-removal state once a merge has claimed this body.
    /// Write-once: a merging soda is skipped by integration and the pair
    /// scan until the merge timer removes it.
    pub merging: bool,
}

impl Soda {
    /// Build a soda of the given tier; the radius comes from the tier table
    pub fn new(id: u32, tier: usize, pos: Vec2) -> Result<Self, OutOfRange> {
        Ok(Self {
            id,
            tier,
            pos,
            vel: Vec2::ZERO,
            radius: tiers::radius_of(tier)?,
            merging: false,
        })
    }

    /// Clamp an aim coordinate so this body sits fully inside the container
    pub fn clamp_aim(&self, aim_x: f32) -> f32 {
        aim_x.clamp(
            PLAY_LEFT + self.radius,
            PLAY_LEFT + PLAY_WIDTH - self.radius,
        )
    }
}

/// A fizz particle (visual only, never gameplay-affecting)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in frames
    pub life: f32,
}

/// Discrete events for the audio/presentation collaborator, drained once per
/// frame via [`GameSession::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A staged token entered the container
    Drop,
    /// A same-tier pair qualified and froze; the product appears after the
    /// merge delay
    Merge { tier: usize },
    /// The session reached its terminal state
    GameOver,
}

/// Deferred work fired from the frame loop once its wall-clock time comes up
#[derive(Debug, Clone, Copy)]
pub(crate) enum PendingAction {
    /// Stage the next token (reload cadence after a drop)
    Respawn,
    /// Consume a frozen pair and insert the merge product
    FinishMerge { a: u32, b: u32 },
}

/// A one-shot timer. Timers are not cancellable; a reset bumps the session
/// epoch instead, and stale entries are discarded when they come due.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pending {
    pub(crate) fire_at_ms: f64,
    pub(crate) epoch: u64,
    pub(crate) action: PendingAction,
}

/// The whole game: active body set, staged token, score, mode flags, fizz,
/// event queue, and pending timers
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Active bodies inside the container. Insertion order is the collision
    /// scan order, so it must stay stable for reproducibility.
    pub(crate) sodas: Vec<Soda>,
    /// The single token awaiting a drop; `None` while a drop is in flight
    pub(crate) staged: Option<Soda>,
    /// Horizontal aim, latched from input at the start of each frame
    pub(crate) aim_x: f32,
    pub(crate) score: u32,
    pub(crate) highscore: u32,
    pub(crate) mode: SessionMode,
    /// Whether the apex soda can appear in normal-mode spawns
    pub(crate) unlocked_special: bool,
    /// Apex spawn probability once unlocked
    pub(crate) special_chance: f32,
    pub(crate) game_over: bool,
    pub(crate) particles: Vec<Particle>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) pending: Vec<Pending>,
    /// Bumped on reset; pending timers from an older epoch are stale
    pub(crate) epoch: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a session, load the persisted high score, and stage the first
    /// token
    pub fn new(seed: u64) -> Self {
        let mut session = Self {
            sodas: Vec::new(),
            staged: None,
            aim_x: PLAY_LEFT + PLAY_WIDTH / 2.0,
            score: 0,
            highscore: highscores::load(),
            mode: SessionMode::Normal,
            unlocked_special: false,
            special_chance: 0.0,
            game_over: false,
            particles: Vec::new(),
            events: Vec::new(),
            pending: Vec::new(),
            epoch: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        spawn::spawn(&mut session);
        session
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a one-shot timer for the current epoch
    pub(crate) fn schedule(&mut self, delay_ms: f64, action: PendingAction, now_ms: f64) {
        self.pending.push(Pending {
            fire_at_ms: now_ms + delay_ms,
            epoch: self.epoch,
            action,
        });
    }

    /// Persist the high score whenever the score has passed it
    pub(crate) fn commit_highscore(&mut self) {
        if self.score > self.highscore {
            self.highscore = self.score;
            highscores::save(self.highscore);
        }
    }

    /// Terminal transition, triggered by the host's overflow rule. Freezes
    /// the stepper and the spawn controller; `reset` is the only way back.
    pub fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.commit_highscore();
        self.events.push(GameEvent::GameOver);
        log::info!("game over at score {}", self.score);
    }

    /// Back to a fresh running session. The final score is folded into the
    /// high score first, so it survives the wipe.
    pub fn reset(&mut self) {
        self.commit_highscore();
        self.sodas.clear();
        self.staged = None;
        self.particles.clear();
        self.events.clear();
        self.score = 0;
        self.mode = SessionMode::Normal;
        self.unlocked_special = false;
        self.special_chance = 0.0;
        self.game_over = false;
        self.epoch += 1;
        log::info!("session reset (high score {})", self.highscore);
        spawn::spawn(self);
    }

    /// Switch ladders. The external unlock condition decides when.
    pub fn set_secret_mode(&mut self, on: bool) {
        self.mode = if on {
            SessionMode::Secret
        } else {
            SessionMode::Normal
        };
    }

    /// Allow the apex soda into normal-mode spawns with the given probability
    pub fn unlock_special(&mut self, chance: f32) {
        self.unlocked_special = true;
        self.special_chance = chance.clamp(0.0, 1.0);
    }

    /// Drain queued events for the audio/presentation layer
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // Read-only snapshots for the rendering collaborator

    /// Active bodies, in scan order
    pub fn sodas(&self) -> &[Soda] {
        &self.sodas
    }

    /// The token awaiting a drop, if any
    pub fn staged(&self) -> Option<&Soda> {
        self.staged.as_ref()
    }

    /// Live fizz particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Smallest `y - radius` over the active set - the host checks this
    /// against its danger line for the overflow/loss rule
    pub fn topmost(&self) -> Option<f32> {
        self.sodas
            .iter()
            .map(|s| s.pos.y - s.radius)
            .min_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(12345)
    }

    #[test]
    fn test_new_session_stages_a_token() {
        let session = session();
        assert!(session.staged.is_some());
        assert!(session.sodas.is_empty());
        assert_eq!(session.score, 0);
        assert!(!session.game_over);
    }

    #[test]
    fn test_reset_folds_score_into_highscore() {
        let mut session = session();
        session.score = 150;
        session.highscore = 100;
        session.reset();
        assert_eq!(session.score, 0);
        assert_eq!(session.highscore, 150);
        assert!(session.sodas.is_empty());
        assert!(session.staged.is_some());
        assert!(!session.game_over);
    }

    #[test]
    fn test_reset_keeps_a_higher_highscore() {
        let mut session = session();
        session.score = 50;
        session.highscore = 100;
        session.reset();
        assert_eq!(session.highscore, 100);
    }

    #[test]
    fn test_reset_clears_mode_flags() {
        let mut session = session();
        session.set_secret_mode(true);
        session.unlock_special(0.5);
        session.reset();
        assert_eq!(session.mode, SessionMode::Normal);
        assert!(!session.unlocked_special);
        assert_eq!(session.special_chance, 0.0);
    }

    #[test]
    fn test_end_game_is_terminal_and_idempotent() {
        let mut session = session();
        session.score = 30;
        session.highscore = 10;
        session.end_game();
        session.end_game();
        assert!(session.game_over);
        assert_eq!(session.highscore, 30);
        let events = session.take_events();
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::GameOver).count(),
            1
        );
    }

    #[test]
    fn test_take_events_drains() {
        let mut session = session();
        session.events.push(GameEvent::Drop);
        assert_eq!(session.take_events(), vec![GameEvent::Drop]);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_topmost_reports_highest_extent() {
        let mut session = session();
        assert_eq!(session.topmost(), None);
        let a = Soda::new(1, 0, Vec2::new(100.0, 500.0)).unwrap();
        let b = Soda::new(2, 3, Vec2::new(200.0, 300.0)).unwrap();
        session.sodas.push(a);
        session.sodas.push(b);
        // Tier 3 has radius 27, so its top edge is 300 - 27
        assert_eq!(session.topmost(), Some(273.0));
    }

    #[test]
    fn test_clamp_aim_keeps_token_inside() {
        let soda = Soda::new(1, 0, Vec2::ZERO).unwrap();
        assert_eq!(soda.clamp_aim(0.0), PLAY_LEFT + soda.radius);
        assert_eq!(
            soda.clamp_aim(10_000.0),
            PLAY_LEFT + PLAY_WIDTH - soda.radius
        );
        assert_eq!(soda.clamp_aim(240.0), 240.0);
    }

    #[test]
    fn test_unlock_special_clamps_chance() {
        let mut session = session();
        session.unlock_special(3.0);
        assert_eq!(session.special_chance, 1.0);
        session.unlock_special(-1.0);
        assert_eq!(session.special_chance, 0.0);
    }
}
