use std::ops::RangeInclusive;

use algoscope_protocol::{Element, ElementId};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use thiserror::Error;

/// Largest input a generator will be asked to trace.
pub const MAX_INPUT_SIZE: usize = 64;

/// Default range for generated values (bar heights).
pub const DEFAULT_VALUE_RANGE: RangeInclusive<i32> = 5..=100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("size {size} exceeds the maximum of {max}")]
    TooLarge { size: usize, max: usize },
    #[error("value {value} is outside {min}..={max}")]
    ValueOutOfRange { value: i32, min: i32, max: i32 },
    #[error("value range {min}..={max} is empty")]
    EmptyRange { min: i32, max: i32 },
}

/// Wrap raw values as elements, assigning ids by position.
pub fn elements_from_values(values: &[i32]) -> Vec<Element> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Element::new(ElementId(i as u32), value))
        .collect()
}

/// Check user-supplied values against a range before tracing them.
pub fn validate_values(values: &[i32], range: &RangeInclusive<i32>) -> Result<(), InputError> {
    if values.len() > MAX_INPUT_SIZE {
        return Err(InputError::TooLarge {
            size: values.len(),
            max: MAX_INPUT_SIZE,
        });
    }
    match values.iter().find(|&&v| !range.contains(&v)) {
        Some(&value) => Err(InputError::ValueOutOfRange {
            value,
            min: *range.start(),
            max: *range.end(),
        }),
        None => Ok(()),
    }
}

/// Seeded source of demo inputs.
///
/// The same seed and the same sequence of calls always produce the same
/// inputs, so a session can be replayed exactly.
#[derive(Debug, Clone)]
pub struct InputGenerator {
    seed: u64,
    range: RangeInclusive<i32>,
    rng: Pcg64,
}

impl InputGenerator {
    pub fn new(seed: u64, range: RangeInclusive<i32>) -> Result<Self, InputError> {
        if range.is_empty() {
            return Err(InputError::EmptyRange {
                min: *range.start(),
                max: *range.end(),
            });
        }
        Ok(Self {
            seed,
            range,
            rng: Pcg64::seed_from_u64(seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn range(&self) -> &RangeInclusive<i32> {
        &self.range
    }

    /// `size` random values from the configured range.
    pub fn random_input(&mut self, size: usize) -> Result<Vec<Element>, InputError> {
        if size > MAX_INPUT_SIZE {
            return Err(InputError::TooLarge {
                size,
                max: MAX_INPUT_SIZE,
            });
        }
        let values: Vec<i32> = (0..size)
            .map(|_| self.rng.gen_range(self.range.clone()))
            .collect();
        Ok(elements_from_values(&values))
    }

    /// Random values in ascending order, as binary search requires.
    pub fn sorted_input(&mut self, size: usize) -> Result<Vec<Element>, InputError> {
        let mut values: Vec<i32> = self.random_input(size)?.iter().map(|e| e.value).collect();
        values.sort_unstable();
        Ok(elements_from_values(&values))
    }

    /// A search target: usually a value from `input`, sometimes one that is
    /// likely absent so the not-found path gets shown too.
    pub fn pick_target(&mut self, input: &[Element]) -> i32 {
        if !input.is_empty() && self.rng.gen_bool(0.75) {
            let index = self.rng.gen_range(0..input.len());
            input[index].value
        } else {
            self.rng.gen_range(self.range.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_input() {
        let mut a = InputGenerator::new(7, DEFAULT_VALUE_RANGE).unwrap();
        let mut b = InputGenerator::new(7, DEFAULT_VALUE_RANGE).unwrap();
        assert_eq!(a.random_input(12).unwrap(), b.random_input(12).unwrap());
        assert_eq!(a.random_input(5).unwrap(), b.random_input(5).unwrap());
    }

    #[test]
    fn values_stay_in_range() {
        let mut generator = InputGenerator::new(1, 10..=20).unwrap();
        let input = generator.random_input(40).unwrap();
        assert_eq!(input.len(), 40);
        assert!(input.iter().all(|e| (10..=20).contains(&e.value)));
    }

    #[test]
    fn ids_follow_positions() {
        let mut generator = InputGenerator::new(3, DEFAULT_VALUE_RANGE).unwrap();
        let input = generator.random_input(4).unwrap();
        let ids: Vec<u32> = input.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn sorted_input_is_ascending() {
        let mut generator = InputGenerator::new(9, DEFAULT_VALUE_RANGE).unwrap();
        let input = generator.sorted_input(15).unwrap();
        assert!(input.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn rejects_oversized_input() {
        let mut generator = InputGenerator::new(0, DEFAULT_VALUE_RANGE).unwrap();
        assert_eq!(
            generator.random_input(MAX_INPUT_SIZE + 1),
            Err(InputError::TooLarge {
                size: MAX_INPUT_SIZE + 1,
                max: MAX_INPUT_SIZE
            })
        );
    }

    #[test]
    fn rejects_empty_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let result = InputGenerator::new(0, 10..=1);
        assert!(matches!(result, Err(InputError::EmptyRange { .. })));
    }

    #[test]
    fn validate_values_reports_first_offender() {
        let err = validate_values(&[5, 200, 300], &DEFAULT_VALUE_RANGE).unwrap_err();
        assert_eq!(
            err,
            InputError::ValueOutOfRange {
                value: 200,
                min: 5,
                max: 100
            }
        );
        assert!(validate_values(&[5, 100], &DEFAULT_VALUE_RANGE).is_ok());
    }

    #[test]
    fn target_drawn_from_input_or_range() {
        let mut generator = InputGenerator::new(11, DEFAULT_VALUE_RANGE).unwrap();
        let input = generator.random_input(8).unwrap();
        for _ in 0..20 {
            let target = generator.pick_target(&input);
            assert!(DEFAULT_VALUE_RANGE.contains(&target));
        }
    }
}
