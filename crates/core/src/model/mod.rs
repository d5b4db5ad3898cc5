pub mod algorithm;
pub mod session;
pub mod trace;

pub use algorithm::{Algorithm, AlgorithmParseError};
pub use session::Session;
pub use trace::Trace;
