// Command-line / environment configuration.

use clap::Parser;
use thiserror::Error;

use crate::card::CardOptions;
use crate::joke::DEFAULT_ENDPOINT;

#[derive(Parser, Debug, Clone)]
#[command(name = "scratch-laugh")]
#[command(about = "Scratch the card to reveal a programming joke", long_about = None)]
#[command(version)]
pub struct Settings {
    /// Joke endpoint returning JokeAPI-style JSON with a `joke` field
    #[arg(long, env = "SCRATCH_JOKE_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Card width in pixels
    #[arg(long, env = "SCRATCH_WIDTH", default_value_t = 350)]
    pub width: u32,

    /// Card height in pixels
    #[arg(long, env = "SCRATCH_HEIGHT", default_value_t = 200)]
    pub height: u32,

    /// Radius of the scratch brush in pixels
    #[arg(long, env = "SCRATCH_BRUSH", default_value_t = 20.0)]
    pub brush_radius: f32,

    /// Percentage of the card that must be scratched off before it counts as revealed
    #[arg(long, env = "SCRATCH_THRESHOLD", default_value_t = 50.0)]
    pub reveal_threshold: f32,

    /// Log filter (env_logger syntax); falls back to RUST_LOG, then `info`
    #[arg(long)]
    pub log: Option<String>,
}

/// Largest card side in pixels; keeps the window layout in `i32` and the buffer small.
pub const MAX_CARD_SIDE: u32 = 4096;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("card size must be non-zero, got {0}x{1}")]
    EmptyCard(u32, u32),
    #[error("card size {0}x{1} exceeds the {MAX_CARD_SIDE}px limit")]
    CardTooLarge(u32, u32),
    #[error("brush radius must be positive, got {0}")]
    BrushRadius(f32),
    #[error("reveal threshold must be between 0 and 100 (exclusive), got {0}")]
    Threshold(f32),
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCard(self.width, self.height));
        }
        if self.width > MAX_CARD_SIDE || self.height > MAX_CARD_SIDE {
            return Err(ConfigError::CardTooLarge(self.width, self.height));
        }
        if !(self.brush_radius > 0.0 && self.brush_radius.is_finite()) {
            return Err(ConfigError::BrushRadius(self.brush_radius));
        }
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold < 100.0) {
            return Err(ConfigError::Threshold(self.reveal_threshold));
        }
        Ok(())
    }

    pub fn card_options(&self) -> CardOptions {
        CardOptions {
            brush_radius: self.brush_radius,
            reveal_threshold: self.reveal_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        let mut argv = vec!["scratch-laugh"];
        argv.extend_from_slice(args);
        Settings::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_card() {
        let s = parse(&[]);
        assert_eq!((s.width, s.height), (350, 200));
        assert_eq!(s.brush_radius, 20.0);
        assert_eq!(s.reveal_threshold, 50.0);
        assert_eq!(s.endpoint, DEFAULT_ENDPOINT);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn flags_override_defaults() {
        let s = parse(&["--width", "200", "--brush-radius", "8", "--log", "debug"]);
        assert_eq!(s.width, 200);
        assert_eq!(s.card_options().brush_radius, 8.0);
        assert_eq!(s.log.as_deref(), Some("debug"));
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert_eq!(parse(&["--height", "0"]).validate(), Err(ConfigError::EmptyCard(350, 0)));
        assert_eq!(
            parse(&["--width", "2147483647"]).validate(),
            Err(ConfigError::CardTooLarge(2_147_483_647, 200))
        );
        assert_eq!(
            parse(&["--height", "4097"]).validate(),
            Err(ConfigError::CardTooLarge(350, 4097))
        );
        assert!(parse(&["--width", "4096", "--height", "4096"]).validate().is_ok());
        assert_eq!(parse(&["--brush-radius", "0"]).validate(), Err(ConfigError::BrushRadius(0.0)));
        assert_eq!(
            parse(&["--reveal-threshold", "100"]).validate(),
            Err(ConfigError::Threshold(100.0))
        );
    }
}
