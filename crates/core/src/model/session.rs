use algoscope_protocol::{Element, RenderCommand, SharedStr, Viewport};

use crate::config::SessionConfig;
use crate::error::Error;
use crate::input::{InputGenerator, MAX_INPUT_SIZE, validate_values};
use crate::model::{Algorithm, Trace};
use crate::playback::{Playback, Speed};

/// One algorithm, its current input, the trace over that input, and the
/// playback position within it.
#[derive(Debug, Clone)]
pub struct Session {
    algorithm: Algorithm,
    generator: InputGenerator,
    fixed_target: Option<i32>,
    input: Vec<Element>,
    target: i32,
    trace: Trace,
    playback: Playback,
}

impl Session {
    /// Build a session and generate its first input from the config seed.
    pub fn new(config: &SessionConfig) -> Result<Self, Error> {
        config.validate()?;
        let generator = InputGenerator::new(config.seed, config.value_range())?;
        let mut session = Self {
            algorithm: config.algorithm,
            generator,
            fixed_target: config.target,
            input: Vec::new(),
            target: 0,
            trace: Trace::Sort(Vec::new()),
            playback: Playback::new(0, config.speed),
        };
        session.reset(config.size)?;
        Ok(session)
    }

    /// Build a session over caller-supplied input, held to the same size and
    /// value limits as [`Session::set_values`].
    pub fn with_input(
        algorithm: Algorithm,
        input: Vec<Element>,
        target: i32,
        speed: Speed,
    ) -> Result<Self, Error> {
        let config = SessionConfig::default();
        let values: Vec<i32> = input.iter().map(|e| e.value).collect();
        validate_values(&values, &config.value_range())?;
        let trace = algorithm.trace(&input, target)?;
        let playback = Playback::new(trace.len(), speed);
        Ok(Self {
            algorithm,
            generator: InputGenerator::new(config.seed, config.value_range())?,
            fixed_target: Some(target),
            input,
            target,
            trace,
            playback,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn input(&self) -> &[Element] {
        &self.input
    }

    /// Target of the current search; meaningless for sorts.
    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// Draw a new random input of `size`, regenerate the trace, and rewind.
    pub fn reset(&mut self, size: usize) -> Result<(), Error> {
        let input = if self.algorithm.needs_sorted_input() {
            self.generator.sorted_input(size)?
        } else {
            self.generator.random_input(size)?
        };
        let target = match self.fixed_target {
            Some(target) => target,
            None => self.generator.pick_target(&input),
        };
        self.trace = self.algorithm.trace(&input, target)?;
        self.input = input;
        self.target = target;
        self.playback.reset(self.trace.len());
        log::debug!(
            "session reset: {} over {} elements (seed {}), {} steps",
            self.algorithm,
            self.input.len(),
            self.generator.seed(),
            self.trace.len()
        );
        Ok(())
    }

    /// Switch algorithm and trace the current input again.
    ///
    /// Switching to binary search sorts the current values first.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), Error> {
        let mut input = self.input.clone();
        if algorithm.needs_sorted_input() {
            input.sort_by_key(|e| e.value);
        }
        self.trace = algorithm.trace(&input, self.target)?;
        self.algorithm = algorithm;
        self.input = input;
        self.playback.reset(self.trace.len());
        Ok(())
    }

    /// Replace the input with caller values (validated against the
    /// generator's range) and rewind.
    pub fn set_values(&mut self, values: &[i32]) -> Result<(), Error> {
        validate_values(values, self.generator.range())?;
        let mut input = crate::input::elements_from_values(values);
        if self.algorithm.needs_sorted_input() {
            input.sort_by_key(|e| e.value);
        }
        self.trace = self.algorithm.trace(&input, self.target)?;
        self.input = input;
        self.playback.reset(self.trace.len());
        Ok(())
    }

    /// Grow or shrink the next input by one element.
    pub fn resize(&mut self, grow: bool) -> Result<(), Error> {
        let size = if grow {
            (self.input.len() + 1).min(MAX_INPUT_SIZE)
        } else {
            self.input.len().saturating_sub(1)
        };
        self.reset(size)
    }

    pub fn message(&self) -> &str {
        self.trace
            .message(self.playback.index())
            .map_or("", SharedStr::as_str)
    }

    pub fn summary(&self) -> String {
        self.trace
            .summary(self.playback.index())
            .unwrap_or_default()
    }

    pub fn render(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        self.trace.render(self.playback.index(), viewport)
    }
}
