// CLI configuration, zenoh key expressions, protocol constants

use clap::Parser;

// Sender stamp reserved for the supervisory node that publishes
// switch state requests. Deliberately not configurable.
pub const SENDER_STAMP_STATE: u32 = 99;

// Switch state value that suppresses actuation output
pub const STATE_SUPPRESSED: i32 = 1;

// Zenoh key expression suffixes, namespaced by --cid (see topic helpers below)
pub const TOPIC_MOTION: &str = "ground-motion-request";
pub const TOPIC_STATE: &str = "switch-state-request";
pub const TOPIC_PEDAL: &str = "pedal-position-request";

/// Runtime configuration, immutable after parsing.
#[derive(Parser, Debug, Clone)]
#[command(
    about = "Controls a differentially steered vehicle by commanding two \
             independent motors, one on each side.",
    after_help = "Example: diffdrive-zenoh-runtime --cid=111 --freq=50 \
                  --speed-max=2.0 --track-width=0.5"
)]
pub struct Config {
    /// Session identifier, used to namespace bus topics
    #[arg(long)]
    pub cid: u16,

    /// Frequency to send actuation commands at (Hz)
    #[arg(long)]
    pub freq: f64,

    /// Maximum speed; wheel speeds are normalized against this (m/s)
    #[arg(long = "speed-max")]
    pub speed_max: f32,

    /// Half the distance between the two driven sides; scales yaw rate
    /// into a left/right speed differential (m)
    #[arg(long = "track-width")]
    pub track_width_half: f32,

    /// Sender stamp accepted on inbound motion requests
    #[arg(long = "id-input", default_value_t = 0)]
    pub id_input: u32,

    /// Sender stamp on outbound left pedal requests
    #[arg(long = "id-left", default_value_t = 0)]
    pub id_left: u32,

    /// Sender stamp on outbound right pedal requests
    #[arg(long = "id-right", default_value_t = 1)]
    pub id_right: u32,

    /// Enable per-message diagnostic logging
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("--freq must be a positive finite number, got {0}")]
    InvalidFrequency(f64),

    #[error("--speed-max must be a positive finite number, got {0}")]
    InvalidSpeedMax(f32),
}

impl Config {
    /// Range checks that clap's type parsing cannot express.
    /// Called once at startup; any error is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.freq.is_finite() || self.freq <= 0.0 {
            return Err(ConfigError::InvalidFrequency(self.freq));
        }
        if !self.speed_max.is_finite() || self.speed_max <= 0.0 {
            return Err(ConfigError::InvalidSpeedMax(self.speed_max));
        }
        Ok(())
    }

    pub fn motion_topic(&self) -> String {
        format!("diffdrive/{}/{}", self.cid, TOPIC_MOTION)
    }

    pub fn state_topic(&self) -> String {
        format!("diffdrive/{}/{}", self.cid, TOPIC_STATE)
    }

    pub fn pedal_topic(&self) -> String {
        format!("diffdrive/{}/{}", self.cid, TOPIC_PEDAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(freq: f64, speed_max: f32) -> Config {
        Config {
            cid: 111,
            freq,
            speed_max,
            track_width_half: 0.5,
            id_input: 0,
            id_left: 0,
            id_right: 1,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config(50.0, 2.0).validate().is_ok());
    }

    #[test]
    fn test_zero_speed_max_rejected() {
        assert!(config(50.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_negative_freq_rejected() {
        assert!(config(-1.0, 2.0).validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(config(f64::NAN, 2.0).validate().is_err());
        assert!(config(50.0, f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_topics_are_namespaced_by_cid() {
        let cfg = config(50.0, 2.0);
        assert_eq!(cfg.motion_topic(), "diffdrive/111/ground-motion-request");
        assert_eq!(cfg.state_topic(), "diffdrive/111/switch-state-request");
        assert_eq!(cfg.pedal_topic(), "diffdrive/111/pedal-position-request");
    }
}
