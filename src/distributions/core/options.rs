//! Configuration for Normal distributions and sampling.
//!
//! Purpose
//! -------
//! Collect the knobs that are not parameters of the distribution itself:
//! the default event grouping, eager numeric checks, and how random draws
//! are seeded.
//!
//! Key behaviors
//! -------------
//! - [`NormalOptions`] is stored on every distribution and consulted when a
//!   density call does not specify its own grouping.
//! - [`SampleOpts`] turns an optional seed into a concrete [`StdRng`], so a
//!   seeded run is reproducible and an unseeded run draws from OS entropy.
//!
//! Conventions
//! -----------
//! - Defaults match the un-configured behaviour: no grouping, no numeric
//!   checks, OS-seeded sampling.
//! - Options are plain `Copy` values; they carry no validation state.
use rand::{SeedableRng, rngs::StdRng};

/// NormalOptions — per-distribution configuration.
///
/// Fields
/// ------
/// - `group_event_ndims`: `usize`
///   Number of trailing dimensions treated as one joint event by
///   `log_prob`/`prob` when the call passes `None`. Default `0`.
/// - `check_numerics`: `bool`
///   When `true`, construction additionally rejects non-finite parameters
///   and non-positive `stddev` entries. Default `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalOptions {
    pub group_event_ndims: usize,
    pub check_numerics: bool,
}

impl NormalOptions {
    pub fn new(group_event_ndims: usize, check_numerics: bool) -> NormalOptions {
        NormalOptions { group_event_ndims, check_numerics }
    }
}

/// SampleOpts — random-source configuration for sampling.
///
/// `seed = Some(s)` yields the same draws on every call; `None` seeds from
/// the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleOpts {
    pub seed: Option<u64>,
}

impl SampleOpts {
    pub fn new(seed: Option<u64>) -> SampleOpts {
        SampleOpts { seed }
    }

    /// Build the generator described by these options.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
