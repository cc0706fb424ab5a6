//! Merge resolver
//!
//! A qualifying same-tier collision freezes both bodies in place, bursts
//! fizz at the contact, and schedules the real work: after the merge delay
//! the pair is consumed and one body of the next tier appears at the
//! midpoint. Scoring happens at consumption time, not qualification time.

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

use crate::consts::*;

use super::state::{GameEvent, GameSession, Particle, PendingAction, Soda};

/// A merge request that violates the resolver's preconditions. The collision
/// pass only queues same-tier, non-merging pairs, so seeing this means a
/// stepper defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMerge {
    #[error("cannot merge tier {a} with tier {b}")]
    TierMismatch { a: usize, b: usize },
    #[error("body is already part of a merge")]
    AlreadyMerging,
}

/// Freeze the pair at indices `i` and `j` and schedule their consumption.
/// The outcome is symmetric in the pair order.
pub(crate) fn begin(
    session: &mut GameSession,
    i: usize,
    j: usize,
    now_ms: f64,
) -> Result<(), InvalidMerge> {
    let (tier_a, tier_b) = (session.sodas[i].tier, session.sodas[j].tier);
    if tier_a != tier_b {
        return Err(InvalidMerge::TierMismatch {
            a: tier_a,
            b: tier_b,
        });
    }
    if session.sodas[i].merging || session.sodas[j].merging {
        return Err(InvalidMerge::AlreadyMerging);
    }

    let mid = (session.sodas[i].pos + session.sodas[j].pos) * 0.5;
    let (id_a, id_b) = (session.sodas[i].id, session.sodas[j].id);
    session.sodas[i].merging = true;
    session.sodas[j].merging = true;

    fizz_burst(session, mid);
    session.events.push(GameEvent::Merge { tier: tier_a });
    session.schedule(
        MERGE_DELAY_MS,
        PendingAction::FinishMerge { a: id_a, b: id_b },
        now_ms,
    );
    log::debug!("tier {tier_a} pair froze at ({}, {})", mid.x, mid.y);
    Ok(())
}

/// Timer callback: consume a frozen pair and insert the next-tier body.
/// No-op if either body is gone, which covers timers that outlive a reset.
pub(crate) fn finish(session: &mut GameSession, id_a: u32, id_b: u32) {
    let Some(a) = session.sodas.iter().find(|s| s.id == id_a) else {
        return;
    };
    let Some(b) = session.sodas.iter().find(|s| s.id == id_b) else {
        return;
    };

    let next_tier = a.tier + 1;
    let mid = (a.pos + b.pos) * 0.5;

    session.sodas.retain(|s| s.id != id_a && s.id != id_b);
    let id = session.next_entity_id();
    match Soda::new(id, next_tier, mid - Vec2::new(0.0, MERGE_RISE)) {
        Ok(product) => session.sodas.push(product),
        Err(err) => {
            log::error!("merge produced an impossible tier: {err}");
            return;
        }
    }

    session.score += 20 * (next_tier as u32 + 1);
    session.commit_highscore();
}

/// Celebratory burst at the contact midpoint
fn fizz_burst(session: &mut GameSession, center: Vec2) {
    for _ in 0..FIZZ_COUNT {
        let vel = Vec2::new(
            (session.rng.random::<f32>() * 2.0 - 1.0) * 4.0,
            (session.rng.random::<f32>() * 2.0 - 1.0) * 4.0,
        );
        let life = 30.0 + session.rng.random::<f32>() * 20.0;
        session.particles.push(Particle {
            pos: center,
            vel,
            life,
        });
    }
}
