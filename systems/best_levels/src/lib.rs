#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that extracts per-stat best wild levels from a roster.

use breeding_planner_core::{BestLevels, Creature, StatIndex, StatWeights};

/// Computes the best observed wild level per statistic across `creatures`.
///
/// For statistics with a weight of zero or greater (and always for
/// Torpidity) the best level is the maximum observed value. For negatively
/// weighted statistics, where lower levels are preferred, it is the minimum
/// observed non-negative value. Statistics without any qualifying
/// observation keep [`BestLevels::NO_DATA`].
///
/// The result only depends on the set of creatures, not on their order, and
/// must be recomputed whenever the candidate population changes.
pub fn compute_best_levels(
    creatures: &[Creature],
    stat_weights: &StatWeights,
    best_levels: &mut BestLevels,
) {
    *best_levels = BestLevels::unobserved();

    for creature in creatures {
        for stat in StatIndex::ALL {
            let level = creature.level_wild(stat);
            let best = best_levels.level(stat);
            let higher_is_better =
                stat == StatIndex::Torpidity || stat_weights.weight(stat) >= 0.0;

            if higher_is_better {
                if level > best {
                    best_levels.set_level(stat, level);
                }
            } else if level >= 0 && (level < best || best < 0) {
                best_levels.set_level(stat, level);
            }
        }
    }
}
