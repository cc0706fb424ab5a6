//! Spawn/drop controller
//!
//! Owns the staged token's lifecycle: pick a tier, hold it at the aim
//! position, release it into the container, and restage after the reload
//! delay. Tier choice is the only randomness in the game and comes from the
//! session's seeded RNG.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::tiers;

use super::state::{GameEvent, GameSession, PendingAction, SessionMode, Soda};

/// Stage the next token at the current aim position. No-op once the game is
/// over.
pub(crate) fn spawn(session: &mut GameSession) {
    if session.game_over {
        return;
    }

    let tier = match session.mode {
        // Secret mode draws uniformly from the secondary ladder
        SessionMode::Secret => {
            tiers::SECONDARY_START + session.rng.random_range(0..tiers::SECONDARY_TIERS)
        }
        // Normal mode draws from the primary base tiers, with an apex roll
        // once the unlock has happened
        SessionMode::Normal => {
            if session.unlocked_special && session.rng.random::<f32>() < session.special_chance {
                tiers::APEX_TIER
            } else {
                session.rng.random_range(0..tiers::PRIMARY_TIERS)
            }
        }
    };

    let id = session.next_entity_id();
    match Soda::new(id, tier, Vec2::new(0.0, SPAWN_Y)) {
        Ok(mut soda) => {
            soda.pos.x = soda.clamp_aim(session.aim_x);
            session.staged = Some(soda);
        }
        Err(err) => log::error!("spawn rolled an unknown tier: {err}"),
    }
}

/// Release the staged token into the active set and schedule the reload.
/// No-op without a staged token or once the game is over.
pub(crate) fn drop_staged(session: &mut GameSession, now_ms: f64) {
    if session.game_over {
        return;
    }
    let Some(mut soda) = session.staged.take() else {
        return;
    };

    soda.pos.x = soda.clamp_aim(session.aim_x);
    soda.pos.y = SPAWN_Y;
    session.sodas.push(soda);
    session.events.push(GameEvent::Drop);
    session.schedule(SPAWN_DELAY_MS, PendingAction::Respawn, now_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_spawns_stay_on_the_base_ladder() {
        let mut session = GameSession::new(1);
        for _ in 0..200 {
            spawn(&mut session);
            let tier = session.staged.as_ref().unwrap().tier;
            assert!(tier < tiers::PRIMARY_TIERS);
        }
    }

    #[test]
    fn test_secret_spawns_stay_on_the_secondary_ladder() {
        let mut session = GameSession::new(2);
        session.set_secret_mode(true);
        for _ in 0..200 {
            spawn(&mut session);
            let tier = session.staged.as_ref().unwrap().tier;
            assert!((tiers::SECONDARY_START..tiers::TIER_COUNT).contains(&tier));
        }
    }

    #[test]
    fn test_unlocked_apex_obeys_its_chance() {
        // Chance 1.0: every spawn is the apex soda
        let mut session = GameSession::new(3);
        session.unlock_special(1.0);
        for _ in 0..50 {
            spawn(&mut session);
            assert_eq!(session.staged.as_ref().unwrap().tier, tiers::APEX_TIER);
        }

        // Chance 0.0: the apex never appears even while unlocked
        let mut session = GameSession::new(4);
        session.unlock_special(0.0);
        for _ in 0..200 {
            spawn(&mut session);
            assert!(session.staged.as_ref().unwrap().tier < tiers::PRIMARY_TIERS);
        }
    }

    #[test]
    fn test_spawn_is_a_no_op_after_game_over() {
        let mut session = GameSession::new(5);
        session.end_game();
        session.staged = None;
        spawn(&mut session);
        assert!(session.staged.is_none());
    }

    #[test]
    fn test_drop_moves_token_into_play_and_schedules_reload() {
        let mut session = GameSession::new(6);
        session.aim_x = 300.0;
        let staged_tier = session.staged.as_ref().unwrap().tier;

        drop_staged(&mut session, 1000.0);

        assert!(session.staged.is_none());
        assert_eq!(session.sodas.len(), 1);
        let dropped = &session.sodas[0];
        assert_eq!(dropped.tier, staged_tier);
        assert_eq!(dropped.pos.x, 300.0);
        assert_eq!(dropped.pos.y, SPAWN_Y);
        assert_eq!(session.take_events(), vec![GameEvent::Drop]);

        assert_eq!(session.pending.len(), 1);
        assert_eq!(session.pending[0].fire_at_ms, 1000.0 + SPAWN_DELAY_MS);
    }

    #[test]
    fn test_drop_without_staged_token_is_a_no_op() {
        let mut session = GameSession::new(7);
        session.staged = None;
        drop_staged(&mut session, 0.0);
        assert!(session.sodas.is_empty());
        assert!(session.take_events().is_empty());
        assert!(session.pending.is_empty());
    }

    #[test]
    fn test_drop_is_a_no_op_after_game_over() {
        let mut session = GameSession::new(8);
        session.end_game();
        session.take_events();
        drop_staged(&mut session, 0.0);
        assert!(session.staged.is_some());
        assert!(session.sodas.is_empty());
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_aim_is_clamped_to_the_container() {
        let mut session = GameSession::new(9);
        session.aim_x = -500.0;
        spawn(&mut session);
        let staged = session.staged.as_ref().unwrap();
        assert_eq!(staged.pos.x, PLAY_LEFT + staged.radius);

        session.aim_x = 5000.0;
        drop_staged(&mut session, 0.0);
        let dropped = session.sodas.last().unwrap();
        assert_eq!(dropped.pos.x, PLAY_LEFT + PLAY_WIDTH - dropped.radius);
    }
}
