//! Step generation and playback for algorithm visualizations.
//!
//! Every algorithm is a pure function from an input to a finished trace
//! (`Vec<Step<..>>`). Nothing here animates; a front-end walks the trace with
//! [`playback::Playback`] and renders each step, for example through
//! [`views::bars`].

pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod playback;
pub mod search;
pub mod sort;
pub mod structures;
pub mod views;

pub use error::Error;
