mod renderer;

use algoscope_core::config::SessionConfig;
use algoscope_core::input::MAX_INPUT_SIZE;
use algoscope_core::model::{Algorithm, Session};
use algoscope_core::playback::Speed;
use anyhow::{Result, bail};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "algoscope",
    about = "Step through sorting and searching algorithms in the terminal",
    version
)]
struct Cli {
    /// bubble, selection, insertion, merge, quick, heap, linear-search or binary-search
    #[arg(long, short, default_value = "bubble")]
    algorithm: Algorithm,
    #[arg(long, short, default_value_t = 10)]
    size: usize,
    /// Seed for input generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Playback speed from 1 (slowest) to 10 (fastest).
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    speed: u8,
    /// Search target; picked from each input when omitted.
    #[arg(long, allow_hyphen_values = true)]
    target: Option<i32>,
}

impl Cli {
    fn into_config(self) -> Result<SessionConfig> {
        if self.size > MAX_INPUT_SIZE {
            bail!("--size {} exceeds the maximum of {MAX_INPUT_SIZE}", self.size);
        }
        Ok(SessionConfig {
            algorithm: self.algorithm,
            size: self.size,
            seed: self.seed.unwrap_or_else(clock_seed),
            speed: Speed::new(self.speed)?,
            target: self.target,
            ..SessionConfig::default()
        })
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    let mut session = Session::new(&config)?;
    renderer::run(&mut session)?;
    Ok(())
}
