//! Per-frame simulation step
//!
//! The host calls [`frame`] once per rendered frame. There is no delta-time
//! scaling: one call advances the world by one nominal frame, so simulation
//! speed follows the display's refresh rate. That realtime coupling is part
//! of the game's feel; tests drive `frame` as a fixed logical tick with an
//! explicit clock instead.

use crate::consts::*;
use crate::tiers;

use super::state::{GameSession, PendingAction, SessionMode};
use super::{merge, spawn};

/// Input for a single frame, assembled by the host's input wiring. Aim is a
/// single scalar and the drop flag a queued request, both read here at the
/// start of the frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Target horizontal aim (pointer/keyboard), container coordinates
    pub aim_x: Option<f32>,
    /// Drop the staged token this frame
    pub drop: bool,
}

/// Advance the session by one frame. `now_ms` is the host's wall clock,
/// used only for the one-shot timers (respawn cadence, merge completion).
pub fn frame(session: &mut GameSession, input: &FrameInput, now_ms: f64) {
    if let Some(x) = input.aim_x {
        session.aim_x = x;
    }

    // Due timers run here, on the frame's own execution context, so they can
    // never race a step. Entries from before the last reset are stale and
    // get dropped unfired.
    fire_due(session, now_ms);

    // Fizz keeps animating even on the game-over screen
    update_particles(session);

    if session.game_over {
        return;
    }

    let aim = session.aim_x;
    if let Some(staged) = session.staged.as_mut() {
        staged.pos.x = staged.clamp_aim(aim);
    }
    if input.drop {
        spawn::drop_staged(session, now_ms);
    }

    integrate(session);
    resolve_pairs(session, now_ms);
}

/// Pop and run every timer whose wall-clock time has come
fn fire_due(session: &mut GameSession, now_ms: f64) {
    let mut due = Vec::new();
    session.pending.retain(|entry| {
        if entry.fire_at_ms <= now_ms {
            due.push(*entry);
            false
        } else {
            true
        }
    });

    for entry in due {
        if entry.epoch != session.epoch {
            log::debug!("dropping stale timer from epoch {}", entry.epoch);
            continue;
        }
        match entry.action {
            PendingAction::Respawn => spawn::spawn(session),
            PendingAction::FinishMerge { a, b } => merge::finish(session, a, b),
        }
    }
}

fn update_particles(session: &mut GameSession) {
    for p in session.particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += FIZZ_GRAVITY;
        p.life -= 1.0;
    }
    session.particles.retain(|p| p.life > 0.0);
}

/// Integration plus container walls for every non-merging body
fn integrate(session: &mut GameSession) {
    let floor = PLAY_TOP + PLAY_HEIGHT;
    for soda in &mut session.sodas {
        if soda.merging {
            continue;
        }

        soda.vel.y += GRAVITY;
        soda.pos += soda.vel;
        soda.vel *= FRICTION;

        let left = PLAY_LEFT + soda.radius;
        let right = PLAY_LEFT + PLAY_WIDTH - soda.radius;
        if soda.pos.x < left {
            soda.pos.x = left;
            soda.vel.x *= -WALL_RESTITUTION;
        }
        if soda.pos.x > right {
            soda.pos.x = right;
            soda.vel.x *= -WALL_RESTITUTION;
        }
        if soda.pos.y + soda.radius > floor {
            soda.pos.y = floor - soda.radius;
            if soda.vel.y.abs() > REST_SPEED {
                soda.vel.y *= -WALL_RESTITUTION;
            } else {
                // Rest threshold: kill the micro-bounce instead of iterating
                // it forever
                soda.vel.y = 0.0;
            }
        }
    }
}

/// Pairwise collision pass in fixed `i < j` scan order. At most one merge is
/// queued per frame; remaining overlaps re-evaluate next frame.
fn resolve_pairs(session: &mut GameSession, now_ms: f64) {
    let secret = session.mode == SessionMode::Secret;
    let count = session.sodas.len();
    let mut queued: Option<(usize, usize)> = None;

    'scan: for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = session.sodas.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if a.merging || b.merging {
                continue;
            }

            let delta = b.pos - a.pos;
            let dist = delta.length();
            let min_dist = a.radius + b.radius;
            if dist >= min_dist {
                continue;
            }
            if dist <= f32::EPSILON {
                // Coincident centers leave no usable normal; shove apart on x
                a.pos.x -= min_dist * 0.5;
                b.pos.x += min_dist * 0.5;
                continue;
            }

            // Split the overlap equally along the collision normal
            let normal = delta / dist;
            let push = normal * ((min_dist - dist) * 0.5);
            a.pos -= push;
            b.pos += push;

            // Exchange the normal velocity components, half-impulse to each
            // body
            let approach = (a.vel - b.vel).dot(normal);
            a.vel -= normal * approach;
            b.vel += normal * approach;

            // A deep, velocity-converged, same-tier overlap becomes a merge,
            // unless the tier is a ladder ceiling
            let rel = a.vel - b.vel;
            if rel.x.abs() < MERGE_SPEED_WINDOW
                && rel.y.abs() < MERGE_SPEED_WINDOW
                && dist < min_dist * MERGE_OVERLAP
                && a.tier == b.tier
                && !tiers::is_ceiling(a.tier, secret)
            {
                queued = Some((i, j));
                break 'scan;
            }
        }
    }

    if let Some((i, j)) = queued {
        if let Err(err) = merge::begin(session, i, j, now_ms) {
            log::error!("collision pass queued an invalid merge: {err}");
        }
    }
}
