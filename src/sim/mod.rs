//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `frame` call per rendered frame (no delta-time scaling; the
//!   frame-rate-dependent feel of the game is intentional)
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the active set)
//! - Deferred work runs as wall-clock timers fed from the host's `now_ms`,
//!   fired at the start of a frame, never on another thread
//! - No rendering or platform dependencies

pub mod merge;
pub mod spawn;
pub mod state;
pub mod step;

pub use merge::InvalidMerge;
pub use state::{GameEvent, GameSession, Particle, SessionMode, Soda};
pub use step::{FrameInput, frame};
