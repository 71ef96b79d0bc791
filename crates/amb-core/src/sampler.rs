//! Stochastic durations and outcomes drawn during a run.

use crate::{DispatchConfig, MinuteRange, SimRng};

/// Draws on-scene dwell, cleaning time, transport-needed and per-minute delay.
///
/// The sampler holds only parameters; every draw takes the run's [`SimRng`]
/// explicitly so there is no hidden random state.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationSampler {
    pub dwell:                 MinuteRange,
    pub cleaning:              MinuteRange,
    pub transport_probability: f64,
    pub prob_delay:            f64,
}

impl DurationSampler {
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            dwell:                 config.dwell_minutes,
            cleaning:              config.cleaning_minutes,
            transport_probability: config.transport_probability,
            prob_delay:            config.prob_delay,
        }
    }

    /// On-scene dwell time in minutes, uniform over the configured range.
    pub fn dwell_minutes(&self, rng: &mut SimRng) -> u32 {
        sample_range(self.dwell, rng)
    }

    /// Post-delivery cleaning time in minutes.
    pub fn cleaning_minutes(&self, rng: &mut SimRng) -> u32 {
        sample_range(self.cleaning, rng)
    }

    /// Does the patient need to be taken to a hospital?
    pub fn transport_needed(&self, rng: &mut SimRng) -> bool {
        rng.gen_bool(self.transport_probability)
    }

    /// Is a moving ambulance held up this minute?
    pub fn delayed(&self, rng: &mut SimRng) -> bool {
        rng.gen_bool(self.prob_delay)
    }
}

fn sample_range(range: MinuteRange, rng: &mut SimRng) -> u32 {
    if range.min >= range.max {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}
