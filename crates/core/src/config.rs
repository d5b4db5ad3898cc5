use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::input::{DEFAULT_VALUE_RANGE, InputError, MAX_INPUT_SIZE};
use crate::model::Algorithm;
use crate::playback::Speed;

/// Everything needed to build a [`Session`](crate::model::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub algorithm: Algorithm,
    /// Number of generated elements.
    pub size: usize,
    /// Seed for input generation; the same seed replays the same inputs.
    pub seed: u64,
    pub speed: Speed,
    pub min_value: i32,
    pub max_value: i32,
    /// Search target; `None` picks one from each generated input.
    pub target: Option<i32>,
}

impl SessionConfig {
    pub fn value_range(&self) -> RangeInclusive<i32> {
        self.min_value..=self.max_value
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.size > MAX_INPUT_SIZE {
            return Err(InputError::TooLarge {
                size: self.size,
                max: MAX_INPUT_SIZE,
            });
        }
        if self.min_value > self.max_value {
            return Err(InputError::EmptyRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::BubbleSort,
            size: 10,
            seed: 0,
            speed: Speed::default(),
            min_value: *DEFAULT_VALUE_RANGE.start(),
            max_value: *DEFAULT_VALUE_RANGE.end(),
            target: None,
        }
    }
}
