//! Playback over a finished trace.
//!
//! The controller only knows the trace length. Time is passed in as an
//! [`Instant`] by the caller's event loop, and the auto-advance timer is a
//! single optional deadline, so arming it always replaces the previous one.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("speed {0} is outside {min}..={max}", min = Speed::MIN, max = Speed::MAX)]
    SpeedOutOfRange(u8),
}

/// Playback speed on a 1 (slowest) to 10 (fastest) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(level: u8) -> Result<Self, PlaybackError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(PlaybackError::SpeedOutOfRange(level))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Delay between automatic steps: `1100 - speed * 100` ms.
    pub fn interval(self) -> Duration {
        Duration::from_millis(1100 - u64::from(self.0) * 100)
    }

    pub fn faster(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX))
    }

    pub fn slower(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Speed {
    type Error = PlaybackError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Fresh trace, nothing played yet.
    Idle,
    Playing,
    Paused,
    /// Sitting on the last step.
    Finished,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Finished => "Finished",
        }
    }
}

/// Step index, play state, and the one auto-advance deadline.
#[derive(Debug, Clone)]
pub struct Playback {
    len: usize,
    index: usize,
    state: PlaybackState,
    speed: Speed,
    deadline: Option<Instant>,
}

impl Playback {
    pub fn new(len: usize, speed: Speed) -> Self {
        Self {
            len,
            index: 0,
            state: PlaybackState::Idle,
            speed,
            deadline: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the next automatic step, if one is scheduled.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Start or resume. At the last step there is nothing to play.
    pub fn play(&mut self, now: Instant) {
        if self.index >= self.last_index() {
            self.set_state(PlaybackState::Finished);
            self.deadline = None;
            return;
        }
        self.set_state(PlaybackState::Playing);
        self.arm(now);
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            self.deadline = None;
            self.set_state(PlaybackState::Paused);
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Advance one step if the deadline has passed. Returns whether the
    /// index moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if self.is_playing() && now >= deadline => {
                self.index += 1;
                if self.index >= self.last_index() {
                    self.index = self.last_index();
                    self.deadline = None;
                    self.set_state(PlaybackState::Finished);
                } else {
                    self.arm(now);
                }
                true
            }
            _ => false,
        }
    }

    /// Manual step forward; ignored while playing.
    pub fn next(&mut self) -> bool {
        if self.is_playing() || self.index >= self.last_index() {
            return false;
        }
        self.index += 1;
        self.settle();
        true
    }

    /// Manual step back; ignored while playing.
    pub fn prev(&mut self) -> bool {
        if self.is_playing() || self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.settle();
        true
    }

    pub fn first(&mut self) {
        if !self.is_playing() {
            self.index = 0;
            self.settle();
        }
    }

    pub fn last(&mut self) {
        if !self.is_playing() {
            self.index = self.last_index();
            self.settle();
        }
    }

    /// Change speed; a running timer is re-armed with the new interval.
    pub fn set_speed(&mut self, speed: Speed, now: Instant) {
        self.speed = speed;
        if self.is_playing() {
            self.arm(now);
        }
    }

    /// Attach a new trace and return to the first step.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
        self.deadline = None;
        self.set_state(PlaybackState::Idle);
    }

    fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.speed.interval());
    }

    fn settle(&mut self) {
        let state = if self.index >= self.last_index() {
            PlaybackState::Finished
        } else {
            PlaybackState::Paused
        };
        self.set_state(state);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            log::debug!(
                "playback {} -> {} at step {}/{}",
                self.state.label(),
                state.label(),
                self.index,
                self.last_index()
            );
            self.state = state;
        }
    }
}
