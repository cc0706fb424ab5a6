//! Soda Drop - a soda-stacking merge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, merging, session state)
//! - `tiers`: The merge ladder - radius and display identity per tier
//! - `highscores`: Single-scalar high score persistence
//! - `platform`: Logging/panic-hook setup for the host shell
//!
//! Rendering, audio, and input wiring stay host-side: the shell drives
//! [`sim::frame`] once per animation frame, drains [`sim::GameEvent`]s for
//! sound triggers, and draws from the read-only snapshots on
//! [`sim::GameSession`].

pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tiers;

pub use sim::{FrameInput, GameEvent, GameSession, SessionMode, frame};

/// Game configuration constants
pub mod consts {
    /// Container interior - the box the sodas live in
    pub const PLAY_LEFT: f32 = 40.0;
    pub const PLAY_TOP: f32 = 60.0;
    pub const PLAY_WIDTH: f32 = 400.0;
    pub const PLAY_HEIGHT: f32 = 480.0;

    /// Downward acceleration per frame (no delta-time scaling; one call to
    /// `frame` is one nominal frame, so simulation speed tracks the display)
    pub const GRAVITY: f32 = 0.25;
    /// Per-frame velocity damping
    pub const FRICTION: f32 = 0.99;
    /// Bounce damping on wall and floor contact (applied as `v *= -0.4`)
    pub const WALL_RESTITUTION: f32 = 0.4;
    /// Below this vertical speed a floor contact rests instead of bouncing
    pub const REST_SPEED: f32 = 2.0;

    /// A pair qualifies for a merge below this fraction of the contact distance
    pub const MERGE_OVERLAP: f32 = 0.9;
    /// Per-axis relative velocity window for a qualifying merge
    pub const MERGE_SPEED_WINDOW: f32 = 2.0;
    /// Upward offset of the merge product from the pair midpoint
    pub const MERGE_RISE: f32 = 20.0;

    /// Staging height for the next token
    pub const SPAWN_Y: f32 = PLAY_TOP + 45.0;

    /// Reload cadence after a drop (wall-clock)
    pub const SPAWN_DELAY_MS: f64 = 380.0;
    /// Visual hold before a merging pair is consumed (wall-clock)
    pub const MERGE_DELAY_MS: f64 = 200.0;

    /// Fizz burst size on merge
    pub const FIZZ_COUNT: usize = 30;
    /// Downward pull on fizz particles per frame
    pub const FIZZ_GRAVITY: f32 = 0.15;
}
