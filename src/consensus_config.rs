/*!
Contains configuration information for the gap-aware consensus.
Typical usage is to the use the builder to construct the config, e.g.
```
use gapfill_con::consensus_config::{AmbiguityTier, ConsensusConfig, ConsensusConfigBuilder};
let config: ConsensusConfig = ConsensusConfigBuilder::default()
    .gap_threshold(50)
    .ambiguity_tier(AmbiguityTier::AboveGap)
    .build()
    .unwrap();
```
*/

/// Enumeration of where full ambiguity (`N` or `?`) ranks relative to a gap.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AmbiguityTier {
    /// `N` and `?` share tier 0 with gaps
    #[default]
    WithGap,
    /// `N` and `?` sit at tier 1, one step above gaps
    AboveGap
}

/**
Contains configuration information for the gap-aware consensus.
Typical usage is to the use the builder to construct the config, e.g.
```
use gapfill_con::consensus_config::{ConsensusConfig, ConsensusConfigBuilder};
let config: ConsensusConfig = ConsensusConfigBuilder::default()
    .gap_threshold(10)
    .build()
    .unwrap();
assert_eq!(config.min_ambiguous_support, 2);
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct ConsensusConfig {
    /// Internal gap runs in the primary with length <= this value are excluded from the consensus entirely
    pub gap_threshold: usize,
    /// Minimum number of `N`/`?` symbols in a column with no informative call before an `N` is emitted instead of dropping the column
    pub min_ambiguous_support: usize,
    /// Tier placement of full ambiguity relative to gaps
    pub ambiguity_tier: AmbiguityTier
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            // long enough that only genuinely unsequenced stretches get filled
            gap_threshold: 150,
            // a single N could just be a no-call in one sequence
            min_ambiguous_support: 2,
            ambiguity_tier: AmbiguityTier::WithGap
        }
    }
}
