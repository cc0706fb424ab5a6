//! The soda merge ladder
//!
//! Tiers are a plain lookup table, not a type hierarchy: each index maps to a
//! collision radius and a display identity. The table is split into a primary
//! ladder (0..=11) topped by the apex soda (12), and a secondary ladder
//! (13..=24) that only spawns in secret mode.

use thiserror::Error;

/// Total number of tiers across both ladders
pub const TIER_COUNT: usize = 25;
/// Base tiers of the primary ladder (apex excluded from normal spawns)
pub const PRIMARY_TIERS: usize = 12;
/// The distinguished top of the primary ladder
pub const APEX_TIER: usize = 12;
/// First tier of the secret-mode ladder
pub const SECONDARY_START: usize = 13;
/// Number of secondary tiers
pub const SECONDARY_TIERS: usize = 12;
/// Highest tier of all; nothing merges past it
pub const LADDER_CEILING: usize = 24;

/// Collision radius per tier. The secondary ladder restarts small and climbs
/// back up, so secret mode plays like a fresh game in the same box.
const RADII: [f32; TIER_COUNT] = [
    22.0, 24.0, 25.0, 27.0, 29.0, 32.0, 35.0, 39.0, 44.0, 50.0, 54.0, 58.0, // primary
    26.0, // apex
    23.0, 24.0, 25.0, 28.0, 29.0, 32.0, 36.0, 44.0, 50.0, 54.0, 58.0, 62.0, // secondary
];

/// Display identity per tier, for the lineup strip and token art lookup
const NAMES: [&str; TIER_COUNT] = [
    "Shasta",
    "Dr. Thunder",
    "Faygo",
    "Mug Root Beer",
    "RC Cola",
    "Barq's",
    "Sprite",
    "Mountain Dew",
    "Fanta",
    "Dr. Pepper",
    "Coca-Cola",
    "Pepsi",
    "Orange Mountain",
    "LaCroix",
    "Red Bull",
    "Monster",
    "Rockstar",
    "7Up",
    "Canada Dry",
    "Pepsi Zero",
    "Diet Coke",
    "Coke Vanilla",
    "Big Cola",
    "Fanta Exotic",
    "Coke Classic",
];

/// A tier index that is not on either ladder. This is a programmer error:
/// the spawn controller and merge resolver only ever hand out valid tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tier {tier} is outside the ladder of {count} tiers", count = TIER_COUNT)]
pub struct OutOfRange {
    /// The offending index
    pub tier: usize,
}

/// Collision radius for a tier
pub fn radius_of(tier: usize) -> Result<f32, OutOfRange> {
    RADII.get(tier).copied().ok_or(OutOfRange { tier })
}

/// Display name for a tier
pub fn name_of(tier: usize) -> Result<&'static str, OutOfRange> {
    NAMES.get(tier).copied().ok_or(OutOfRange { tier })
}

/// Whether a tier is a merge ceiling: two ceiling bodies collide like any
/// other masses but never merge. Tier 24 always is; the apex is a ceiling
/// outside secret mode (in secret mode it merges up into the secondary
/// ladder).
pub fn is_ceiling(tier: usize, secret_mode: bool) -> bool {
    tier == LADDER_CEILING || (tier == APEX_TIER && !secret_mode)
}

/// The currently unlocked tier set, in ladder order, for the preview strip
pub fn lineup(secret_mode: bool, unlocked_special: bool) -> Vec<usize> {
    if secret_mode {
        (SECONDARY_START..TIER_COUNT).collect()
    } else {
        let mut tiers: Vec<usize> = (0..PRIMARY_TIERS).collect();
        if unlocked_special {
            tiers.push(APEX_TIER);
        }
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_lookup() {
        assert_eq!(radius_of(0), Ok(22.0));
        assert_eq!(radius_of(APEX_TIER), Ok(26.0));
        assert_eq!(radius_of(LADDER_CEILING), Ok(62.0));
        assert_eq!(radius_of(TIER_COUNT), Err(OutOfRange { tier: TIER_COUNT }));
    }

    #[test]
    fn test_all_radii_positive() {
        for tier in 0..TIER_COUNT {
            assert!(radius_of(tier).unwrap() > 0.0);
        }
    }

    #[test]
    fn test_names_cover_every_tier() {
        assert_eq!(name_of(APEX_TIER), Ok("Orange Mountain"));
        assert_eq!(name_of(LADDER_CEILING), Ok("Coke Classic"));
        assert!(name_of(99).is_err());
    }

    #[test]
    fn test_ceiling_rules() {
        // Tier 24 never merges, in either mode
        assert!(is_ceiling(LADDER_CEILING, false));
        assert!(is_ceiling(LADDER_CEILING, true));
        // The apex only merges in secret mode
        assert!(is_ceiling(APEX_TIER, false));
        assert!(!is_ceiling(APEX_TIER, true));
        // Ordinary tiers always merge
        assert!(!is_ceiling(0, false));
        assert!(!is_ceiling(11, false));
        assert!(!is_ceiling(SECONDARY_START, false));
        assert!(!is_ceiling(23, true));
    }

    #[test]
    fn test_lineup_normal_mode() {
        let locked = lineup(false, false);
        assert_eq!(locked, (0..12).collect::<Vec<_>>());

        let unlocked = lineup(false, true);
        assert_eq!(unlocked.len(), 13);
        assert_eq!(unlocked.last(), Some(&APEX_TIER));
    }

    #[test]
    fn test_lineup_secret_mode() {
        // The unlock flag is irrelevant once secret mode is on
        let secret = lineup(true, true);
        assert_eq!(secret, (13..25).collect::<Vec<_>>());
    }
}
