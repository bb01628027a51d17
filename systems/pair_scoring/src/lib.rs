#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that scores and ranks every viable breeding pair of a roster.

use std::collections::HashSet;

use breeding_planner_core::{
    BestLevels, BreedingMode, BreedingPair, Creature, CreatureId, ScoringSettings, ScoringSummary,
    Species, StatIndex, StatWeights, MUTATION_POSSIBLE_WITH_FEWER_THAN, PROBABILITY_HIGHER_LEVEL,
    PROBABILITY_LOWER_LEVEL, PROBABILITY_OF_ONE_MUTATION,
    PROBABILITY_OF_ONE_MUTATION_FROM_ONE_PARENT, STAT_COUNT,
};

/// Maximum number of levelable points per statistic; normalizes per-stat
/// contributions into a comparable range.
const MAX_LEVELS_PER_STAT: f64 = 40.0;

/// Uniform scale applied to every final breeding score.
const BREEDING_SCORE_SCALE: f64 = 1.25;

/// Bonus when both parents carry the best observed level of a statistic, so
/// the offspring inherits it regardless of which parent is drawn.
const GUARANTEED_TOP_STAT_BONUS: f64 = 1.142;

/// Factor that renders a contribution or score negligible without removing
/// the pair from the output.
const NEGLIGIBLE_FACTOR: f64 = 0.01;

/// Portion of the expected top-stat gain granted when one parent already
/// concentrates all the pairing's top stats.
const PARTIAL_TOP_STAT_FACTOR: f64 = 0.1;

/// Score discount when a male with the pairing's best possible outcome
/// already exists; males re-mate on a short cooldown and are cheap to
/// re-obtain.
const EXISTING_MALE_DISCOUNT: f64 = 0.4;

/// Score discount when a female with the pairing's best possible outcome
/// already exists; females are costlier to duplicate.
const EXISTING_FEMALE_DISCOUNT: f64 = 0.8;

/// Breeding-pair scoring system that reuses scratch buffers across pairs.
#[derive(Debug, Default)]
pub struct PairScoring {
    best_possible_levels: [i32; STAT_COUNT],
    seen_females: HashSet<CreatureId>,
}

impl PairScoring {
    /// Creates a new pair scoring system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores every viable `(female, male)` combination and writes the ranked
    /// pairs into `out`, best first.
    ///
    /// The two populations may be the same slice. When sex is ignored (by
    /// settings or because the species has no sexes) and no chosen creature
    /// is considered, symmetric duplicates and self-pairs are skipped by
    /// array position: the male loop stops at the female's index. This
    /// positional rule is only meaningful when both slices hold the same
    /// population in the same order; overlapping but reordered populations
    /// enumerate a position-dependent subset.
    ///
    /// Ranking is a stable descending sort by score, so equal-scoring pairs
    /// keep their enumeration order (female-major, then male-minor).
    #[allow(clippy::too_many_arguments)]
    pub fn handle(
        &mut self,
        females: &[Creature],
        males: &[Creature],
        species: &Species,
        stat_weights: &StatWeights,
        best_levels: &BestLevels,
        mode: BreedingMode,
        settings: &ScoringSettings,
        out: &mut Vec<BreedingPair>,
    ) -> ScoringSummary {
        out.clear();

        let ignore_sex = settings.ignore_sex || species.no_gender();
        let mut pairs_skipped_by_mutation_limit = false;

        for (female_index, female) in females.iter().enumerate() {
            for (male_index, male) in males.iter().enumerate() {
                if ignore_sex {
                    if settings.consider_chosen_creature {
                        if male.id == female.id {
                            continue;
                        }
                    } else if female_index == male_index {
                        break;
                    }
                }

                if let Some(limit) = settings.mutation_limit {
                    if female.mutations > limit && male.mutations > limit {
                        pairs_skipped_by_mutation_limit = true;
                        continue;
                    }
                }

                let pair = self.score_pair(
                    female,
                    male,
                    females,
                    males,
                    species,
                    stat_weights,
                    best_levels,
                    mode,
                    settings,
                );
                out.push(pair);
            }
        }

        out.sort_by(|a, b| b.score.total_cmp(&a.score));

        if settings.only_best_suggestion_for_each_female && !ignore_sex {
            self.seen_females.clear();
            out.retain(|pair| self.seen_females.insert(pair.female));
        }

        ScoringSummary {
            pairs_ranked: out.len(),
            pairs_skipped_by_mutation_limit,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn score_pair(
        &mut self,
        female: &Creature,
        male: &Creature,
        females: &[Creature],
        males: &[Creature],
        species: &Species,
        stat_weights: &StatWeights,
        best_levels: &BestLevels,
        mode: BreedingMode,
        settings: &ScoringSettings,
    ) -> BreedingPair {
        let mut total = 0.0;
        let mut top_stat_count = 0u32;
        let mut expected_top_stats = 0.0;
        let mut top_stats_female = 0u32;
        let mut top_stats_male = 0u32;

        // The guaranteed base level every offspring starts with.
        let mut max_possible_offspring_level = 1i32;

        for stat in StatIndex::ALL {
            if stat == StatIndex::Torpidity || !species.uses_stat(stat) {
                continue;
            }
            self.best_possible_levels[stat.index()] = 0;

            let female_level = female.level_wild(stat);
            let male_level = male.level_wild(stat);
            let higher_level = female_level.max(male_level).max(0);
            let lower_level = female_level.min(male_level).max(0);
            max_possible_offspring_level += higher_level;

            let weight = stat_weights.weight(stat);
            let best_level = best_levels.level(stat);
            let ignore_top_stats = settings.consider_only_even_for_high_stats
                && higher_level % 2 != 0
                && weight > 0.0;
            let higher_is_better = weight >= 0.0;

            let mut contribution = weight
                * (PROBABILITY_HIGHER_LEVEL * f64::from(higher_level)
                    + PROBABILITY_LOWER_LEVEL * f64::from(lower_level))
                / MAX_LEVELS_PER_STAT;

            if contribution != 0.0 {
                match mode {
                    BreedingMode::TopStatsLucky if !ignore_top_stats => {
                        if female_level == best_level || male_level == best_level {
                            if female_level == best_level && male_level == best_level {
                                contribution *= GUARANTEED_TOP_STAT_BONUS;
                            }
                        } else if best_level > 0 {
                            contribution *= NEGLIGIBLE_FACTOR;
                        }
                    }
                    BreedingMode::TopStatsConservative if best_level > 0 => {
                        self.best_possible_levels[stat.index()] = if higher_is_better {
                            female_level.max(male_level)
                        } else {
                            female_level.min(male_level)
                        };
                        contribution *= NEGLIGIBLE_FACTOR;
                        if !ignore_top_stats
                            && (female_level == best_level || male_level == best_level)
                        {
                            top_stat_count += 1;
                            expected_top_stats +=
                                if female_level == best_level && male_level == best_level {
                                    1.0
                                } else {
                                    PROBABILITY_HIGHER_LEVEL
                                };
                            if female_level == best_level {
                                top_stats_female += 1;
                            }
                            if male_level == best_level {
                                top_stats_male += 1;
                            }
                        }
                    }
                    _ => {}
                }
            }

            total += contribution;
        }

        if mode == BreedingMode::TopStatsConservative {
            if top_stats_female < top_stat_count && top_stats_male < top_stat_count {
                total += expected_top_stats;
            } else {
                total += PARTIAL_TOP_STAT_FACTOR * expected_top_stats;
            }

            if self.best_outcome_exists_in(males, species, best_levels) {
                total *= EXISTING_MALE_DISCOUNT;
            } else if self.best_outcome_exists_in(females, species, best_levels) {
                total *= EXISTING_FEMALE_DISCOUNT;
            }
        }

        let level_cap_exceeded = settings.offspring_level_limit > 0
            && settings.offspring_level_limit < max_possible_offspring_level;
        if level_cap_exceeded && settings.downgrade_over_level_limit {
            total *= NEGLIGIBLE_FACTOR;
        }

        let eligible_parents = u32::from(female.mutations < MUTATION_POSSIBLE_WITH_FEWER_THAN)
            + u32::from(male.mutations < MUTATION_POSSIBLE_WITH_FEWER_THAN);
        let mutation_probability = match eligible_parents {
            2 => PROBABILITY_OF_ONE_MUTATION,
            1 => PROBABILITY_OF_ONE_MUTATION_FROM_ONE_PARENT,
            _ => 0.0,
        };

        BreedingPair {
            female: female.id,
            male: male.id,
            score: total * BREEDING_SCORE_SCALE,
            mutation_probability,
            level_cap_exceeded,
        }
    }

    /// Reports whether `creatures` contains an individual whose wild levels
    /// already realize this pairing's best possible outcome for every scored
    /// statistic that reaches the population's best level.
    fn best_outcome_exists_in(
        &self,
        creatures: &[Creature],
        species: &Species,
        best_levels: &BestLevels,
    ) -> bool {
        'creatures: for creature in creatures {
            for stat in StatIndex::ALL {
                if stat == StatIndex::Torpidity || !species.uses_stat(stat) {
                    continue;
                }
                let best_possible = self.best_possible_levels[stat.index()];
                if creature.level_wild(stat) == best_possible
                    || best_possible != best_levels.level(stat)
                {
                    continue;
                }
                continue 'creatures;
            }
            return true;
        }
        false
    }
}
