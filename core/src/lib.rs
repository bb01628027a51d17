#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the breeding planner.
//!
//! This crate defines the vocabulary that connects the roster-loading adapter
//! and the pure scoring systems. Adapters hand the systems read-only
//! [`Creature`] and [`Species`] records together with a [`StatWeights`]
//! preference vector, systems respond with ranked [`BreedingPair`] values.
//! Nothing in here performs I/O or holds mutable global state.

use serde::{Deserialize, Serialize};

/// Number of distinct creature statistics tracked per individual.
pub const STAT_COUNT: usize = 12;

/// Probability that an offspring inherits a stat from the higher-level parent.
pub const PROBABILITY_HIGHER_LEVEL: f64 = 0.55;

/// Probability that an offspring inherits a stat from the lower-level parent.
pub const PROBABILITY_LOWER_LEVEL: f64 = 1.0 - PROBABILITY_HIGHER_LEVEL;

/// A parent contributes mutation chances only while its mutation counter is
/// strictly below this threshold.
pub const MUTATION_POSSIBLE_WITH_FEWER_THAN: u32 = 20;

/// Probability of at least one mutation when both parents are below the
/// mutation threshold.
pub const PROBABILITY_OF_ONE_MUTATION: f64 = 0.0731;

/// Probability of at least one mutation when only one parent is below the
/// mutation threshold.
pub const PROBABILITY_OF_ONE_MUTATION_FROM_ONE_PARENT: f64 = 0.0368;

/// Identifies one of the twelve fixed creature statistics.
///
/// The discriminants match the canonical stat indices used by stat-level
/// arrays throughout the planner. The enumeration is closed: statistics are
/// not extensible at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatIndex {
    /// Hit points.
    Health,
    /// Stamina points.
    Stamina,
    /// Torpidity. Never player-influenced and therefore never scored.
    Torpidity,
    /// Oxygen capacity.
    Oxygen,
    /// Food capacity.
    Food,
    /// Water capacity.
    Water,
    /// Body temperature.
    Temperature,
    /// Carry weight.
    Weight,
    /// Melee damage multiplier.
    MeleeDamageMultiplier,
    /// Movement speed multiplier.
    SpeedMultiplier,
    /// Resistance to temperature extremes.
    TemperatureFortitude,
    /// Crafting speed multiplier.
    CraftingSpeedMultiplier,
}

impl StatIndex {
    /// All statistics in canonical index order.
    pub const ALL: [StatIndex; STAT_COUNT] = [
        StatIndex::Health,
        StatIndex::Stamina,
        StatIndex::Torpidity,
        StatIndex::Oxygen,
        StatIndex::Food,
        StatIndex::Water,
        StatIndex::Temperature,
        StatIndex::Weight,
        StatIndex::MeleeDamageMultiplier,
        StatIndex::SpeedMultiplier,
        StatIndex::TemperatureFortitude,
        StatIndex::CraftingSpeedMultiplier,
    ];

    /// Position of the statistic within per-stat arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short lower-case label used in reports and configuration files.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Stamina => "stamina",
            Self::Torpidity => "torpidity",
            Self::Oxygen => "oxygen",
            Self::Food => "food",
            Self::Water => "water",
            Self::Temperature => "temperature",
            Self::Weight => "weight",
            Self::MeleeDamageMultiplier => "melee",
            Self::SpeedMultiplier => "speed",
            Self::TemperatureFortitude => "fortitude",
            Self::CraftingSpeedMultiplier => "crafting",
        }
    }
}

/// Unique identifier assigned to a creature within a roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(u32);

impl CreatureId {
    /// Creates a new creature identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Sex of a tamed creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Female individual; can appear on the left side of a breeding pair.
    Female,
    /// Male individual; can appear on the right side of a breeding pair.
    Male,
    /// Sex has not been recorded for this individual.
    Unknown,
}

/// Read-only descriptor of a species as supplied by the species catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    name: String,
    no_gender: bool,
    used_stats: u16,
}

impl Species {
    /// Creates a species descriptor from a per-stat usage table.
    #[must_use]
    pub fn new(name: impl Into<String>, no_gender: bool, used: [bool; STAT_COUNT]) -> Self {
        let mut mask = 0u16;
        for (index, uses) in used.iter().enumerate() {
            if *uses {
                mask |= 1 << index;
            }
        }
        Self {
            name: name.into(),
            no_gender,
            used_stats: mask,
        }
    }

    /// Display name of the species.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reports whether the species has no distinguishable sexes.
    ///
    /// Breeding pairs of such species are not constrained to one female and
    /// one male.
    #[must_use]
    pub const fn no_gender(&self) -> bool {
        self.no_gender
    }

    /// Reports whether the species uses the provided statistic.
    #[must_use]
    pub const fn uses_stat(&self, stat: StatIndex) -> bool {
        self.used_stats & (1 << stat.index()) != 0
    }

    /// Bitmask of used statistics, one bit per canonical stat index.
    #[must_use]
    pub const fn used_stat_mask(&self) -> u16 {
        self.used_stats
    }
}

/// One tamed individual as supplied by the creature roster.
///
/// Systems only ever read creatures; they never create, mutate, or destroy
/// them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Identifier of the creature within its roster.
    pub id: CreatureId,
    /// Display name chosen by the player.
    pub name: String,
    /// Recorded sex of the individual.
    pub sex: Sex,
    /// Wild-contribution level per statistic. Negative values mean the level
    /// is unknown or not present; they aggregate as zero but stay distinct
    /// for best-level equality checks.
    pub levels_wild: [i32; STAT_COUNT],
    /// Number of stat mutations accumulated in this individual's lineage.
    pub mutations: u32,
}

impl Creature {
    /// Wild level of the provided statistic.
    #[must_use]
    pub const fn level_wild(&self, stat: StatIndex) -> i32 {
        self.levels_wild[stat.index()]
    }
}

/// Per-statistic preference weights supplied by the player.
///
/// The sign encodes the direction of preference (negative means lower levels
/// are better), the magnitude encodes importance, and zero excludes the
/// statistic from scoring. The array length is fixed at [`STAT_COUNT`] by
/// construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatWeights([f64; STAT_COUNT]);

impl StatWeights {
    /// Creates a weight vector from explicit per-stat values.
    #[must_use]
    pub const fn new(weights: [f64; STAT_COUNT]) -> Self {
        Self(weights)
    }

    /// Weight assigned to the provided statistic.
    #[must_use]
    pub const fn weight(&self, stat: StatIndex) -> f64 {
        self.0[stat.index()]
    }

    /// All weights in canonical stat order.
    #[must_use]
    pub const fn as_array(&self) -> &[f64; STAT_COUNT] {
        &self.0
    }
}

impl Default for StatWeights {
    /// Every statistic weighted equally at `1.0`.
    fn default() -> Self {
        Self([1.0; STAT_COUNT])
    }
}

/// Per-statistic best wild level observed across a candidate population.
///
/// For positively weighted statistics this is the maximum observed level, for
/// negatively weighted statistics the minimum observed non-negative level.
/// [`BestLevels::NO_DATA`] marks statistics without any observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestLevels([i32; STAT_COUNT]);

impl BestLevels {
    /// Sentinel stored for statistics no creature has data for.
    pub const NO_DATA: i32 = -1;

    /// Creates a best-level table with every statistic marked as unobserved.
    #[must_use]
    pub const fn unobserved() -> Self {
        Self([Self::NO_DATA; STAT_COUNT])
    }

    /// Creates a best-level table from explicit per-stat values.
    #[must_use]
    pub const fn new(levels: [i32; STAT_COUNT]) -> Self {
        Self(levels)
    }

    /// Best observed level of the provided statistic.
    #[must_use]
    pub const fn level(&self, stat: StatIndex) -> i32 {
        self.0[stat.index()]
    }

    /// Overwrites the best observed level of the provided statistic.
    pub fn set_level(&mut self, stat: StatIndex, level: i32) {
        self.0[stat.index()] = level;
    }
}

impl Default for BestLevels {
    fn default() -> Self {
        Self::unobserved()
    }
}

/// Strategy applied when scoring a prospective pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreedingMode {
    /// Value the expected stats of the immediate next generation, without
    /// regard for whether a stat reaches the population's best level.
    BestNextGen,
    /// Value pairings that could luckily combine best-observed levels;
    /// pairings that cannot reach a best level are heavily down-weighted.
    TopStatsLucky,
    /// Value guaranteed progress toward accumulating best-observed levels,
    /// discounting outcomes the roster already contains.
    TopStatsConservative,
}

/// Caller-supplied switches that adjust pairing enumeration and scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Keep symmetric duplicates so a currently chosen creature appears in
    /// the results regardless of its array position. Only relevant while sex
    /// is ignored.
    pub consider_chosen_creature: bool,
    /// When set, pairs where both parents exceed this mutation count are
    /// skipped. A single parent under the limit keeps the pair, since one
    /// eligible lineage suffices for a mutation to occur.
    pub mutation_limit: Option<u32>,
    /// Server level cap for offspring. Values of zero or below disable the
    /// check.
    pub offspring_level_limit: i32,
    /// Multiply the score of pairs whose best-case offspring would exceed the
    /// level cap by a negligible factor.
    pub downgrade_over_level_limit: bool,
    /// Reduce the ranked output to the single best pairing per female.
    /// Ignored while sex is ignored, where female identity is meaningless.
    pub only_best_suggestion_for_each_female: bool,
    /// Pair creatures without respecting sex. Forced on for species without
    /// distinguishable sexes.
    pub ignore_sex: bool,
    /// Treat odd high levels of positively weighted statistics as if they
    /// were not top stats. Used by players who only track even levels.
    pub consider_only_even_for_high_stats: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            consider_chosen_creature: false,
            mutation_limit: None,
            offspring_level_limit: 0,
            downgrade_over_level_limit: false,
            only_best_suggestion_for_each_female: false,
            ignore_sex: false,
            consider_only_even_for_high_stats: false,
        }
    }
}

/// One scored pairing produced by the scoring system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreedingPair {
    /// Identifier of the female (or left) parent.
    pub female: CreatureId,
    /// Identifier of the male (or right) parent.
    pub male: CreatureId,
    /// Desirability of the pairing; higher is better.
    pub score: f64,
    /// Probability of at least one mutation in the offspring, derived from
    /// how many parents are below the mutation threshold.
    pub mutation_probability: f64,
    /// Indicates that the best-case offspring level exceeds the configured
    /// level cap.
    pub level_cap_exceeded: bool,
}

/// Out-of-band information about one scoring invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoringSummary {
    /// Number of pairs present in the ranked output.
    pub pairs_ranked: usize,
    /// At least one pair was discarded solely because both parents exceeded
    /// the mutation limit. The result set may be incomplete by design; this
    /// is information for the player, not an error.
    pub pairs_skipped_by_mutation_limit: bool,
}
