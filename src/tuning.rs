//! Game balance and playfield configuration
//!
//! Every gameplay number lives here so a session can be re-tuned from JSON
//! without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning could not be used
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("penalty chance must be within [0, 1], got {0}")]
    PenaltyChance(f64),
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("droplet size range {min}..{max} is empty")]
    SizeRange { min: f32, max: f32 },
    #[error("{0} does not fit inside the playfield")]
    DoesNotFit(&'static str),
}

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Droplets ===
    /// Edge length before the random size factor
    pub base_drop_size: f32,
    pub size_min_factor: f32,
    pub size_max_factor: f32,
    /// Bernoulli probability of a penalty droplet
    pub penalty_chance: f64,
    pub fall_duration_ms: u64,

    // === Catcher ===
    pub catcher_width: f32,
    pub catcher_height: f32,
    pub catcher_bottom_margin: f32,

    // === Cadences ===
    pub spawn_interval_ms: u64,
    pub countdown_interval_ms: u64,
    pub poll_interval_ms: u64,

    // === Scoring ===
    pub regular_points: u32,
    pub penalty_points: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            base_drop_size: BASE_DROP_SIZE,
            size_min_factor: DROP_SIZE_MIN_FACTOR,
            size_max_factor: DROP_SIZE_MAX_FACTOR,
            penalty_chance: PENALTY_CHANCE,
            fall_duration_ms: FALL_DURATION_MS,

            catcher_width: CATCHER_WIDTH,
            catcher_height: CATCHER_HEIGHT,
            catcher_bottom_margin: CATCHER_BOTTOM_MARGIN,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            poll_interval_ms: POLL_INTERVAL_MS,

            regular_points: REGULAR_POINTS,
            penalty_points: PENALTY_POINTS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning (penalty chance {})", tuning.penalty_chance);
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the parameters describe a playable session
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(0.0..=1.0).contains(&self.penalty_chance) {
            return Err(TuningError::PenaltyChance(self.penalty_chance));
        }

        let lengths = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("base_drop_size", self.base_drop_size),
            ("size_min_factor", self.size_min_factor),
            ("size_max_factor", self.size_max_factor),
            ("catcher_width", self.catcher_width),
            ("catcher_height", self.catcher_height),
            ("catcher_bottom_margin", self.catcher_bottom_margin),
        ];
        for (name, value) in lengths {
            if !value.is_finite() {
                return Err(TuningError::NonFinite(name));
            }
        }

        let positive_f32 = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("base_drop_size", self.base_drop_size),
            ("size_min_factor", self.size_min_factor),
            ("catcher_width", self.catcher_width),
            ("catcher_height", self.catcher_height),
        ];
        for (name, value) in positive_f32 {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive(name));
            }
        }

        let positive_ms = [
            ("fall_duration_ms", self.fall_duration_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("countdown_interval_ms", self.countdown_interval_ms),
            ("poll_interval_ms", self.poll_interval_ms),
        ];
        for (name, value) in positive_ms {
            if value == 0 {
                return Err(TuningError::NonPositive(name));
            }
        }

        if self.size_max_factor < self.size_min_factor {
            return Err(TuningError::SizeRange {
                min: self.size_min_factor,
                max: self.size_max_factor,
            });
        }
        if self.base_drop_size > self.playfield_width {
            return Err(TuningError::DoesNotFit("base_drop_size"));
        }
        if self.catcher_width > self.playfield_width {
            return Err(TuningError::DoesNotFit("catcher_width"));
        }
        if self.catcher_height + self.catcher_bottom_margin > self.playfield_height {
            return Err(TuningError::DoesNotFit("catcher_height"));
        }

        Ok(())
    }

    /// Leftmost catcher coordinate
    pub fn catcher_min_x(&self) -> f32 {
        0.0
    }

    /// Rightmost catcher coordinate
    pub fn catcher_max_x(&self) -> f32 {
        (self.playfield_width - self.catcher_width).max(0.0)
    }

    /// Catcher position that centers it in the playfield
    pub fn catcher_center_x(&self) -> f32 {
        self.catcher_max_x() / 2.0
    }

    /// Top edge of the catcher (screen coordinates, y grows downward)
    pub fn catcher_top(&self) -> f32 {
        self.playfield_height - self.catcher_bottom_margin - self.catcher_height
    }

    /// Rightmost spawn coordinate for a droplet's left edge
    pub fn spawn_max_x(&self) -> f32 {
        (self.playfield_width - self.base_drop_size).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "penalty_chance": 0.4 }"#).unwrap();
        assert_eq!(tuning.penalty_chance, 0.4);
        assert_eq!(tuning.fall_duration_ms, FALL_DURATION_MS);
        assert_eq!(tuning.playfield_width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_json_round_trip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.catcher_width = 140.0;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "penalty_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::PenaltyChance(_)));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let tuning = Tuning {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive("poll_interval_ms"))
        ));
    }

    #[test]
    fn test_rejects_oversized_catcher() {
        let tuning = Tuning {
            catcher_width: PLAYFIELD_WIDTH + 1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::DoesNotFit("catcher_width"))
        ));
    }

    #[test]
    fn test_rejects_overflowing_lengths() {
        // 1e39 is past f32::MAX and parses as infinity
        for (json, field) in [
            (r#"{ "size_max_factor": 1e39 }"#, "size_max_factor"),
            (r#"{ "playfield_width": 1e39 }"#, "playfield_width"),
        ] {
            match Tuning::from_json(json) {
                Err(TuningError::NonFinite(name)) => assert_eq!(name, field),
                other => panic!("{json} was accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_nan_margin() {
        let tuning = Tuning {
            catcher_bottom_margin: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonFinite("catcher_bottom_margin"))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_catcher_bounds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.catcher_max_x(), PLAYFIELD_WIDTH - CATCHER_WIDTH);
        assert_eq!(tuning.catcher_center_x(), (PLAYFIELD_WIDTH - CATCHER_WIDTH) / 2.0);
    }
}
