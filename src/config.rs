use crate::error::TrackError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_AGE: usize = 30;
pub const DEFAULT_MIN_HITS: usize = 3;
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.3;

/// Parameters of the tracker.
///
/// Deserializes with per-field defaults, so it can sit under a `tracking`
/// section of a larger application config with any subset of keys present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Frames a track may go unmatched before it is removed (default: 30)
    pub max_age: usize,
    /// Matched frames required before a track is reported (default: 3)
    pub min_hits: usize,
    /// Exclusive minimum IoU for a detection to match a track (default: 0.3)
    pub iou_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            min_hits: DEFAULT_MIN_HITS,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }
}

impl TrackerConfig {
    pub fn new(max_age: usize, min_hits: usize, iou_threshold: f64) -> Self {
        Self {
            max_age,
            min_hits,
            iou_threshold,
        }
    }

    pub fn with_max_age(self, max_age: usize) -> Self {
        Self { max_age, ..self }
    }

    pub fn with_min_hits(self, min_hits: usize) -> Self {
        Self { min_hits, ..self }
    }

    pub fn with_iou_threshold(self, iou_threshold: f64) -> Self {
        Self {
            iou_threshold,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        validate_max_age(self.max_age)?;
        validate_min_hits(self.min_hits)?;
        validate_iou_threshold(self.iou_threshold)
    }
}

pub(crate) fn validate_max_age(max_age: usize) -> Result<(), TrackError> {
    if max_age == 0 {
        return Err(TrackError::InvalidConfig(
            "max_age must be positive".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_min_hits(min_hits: usize) -> Result<(), TrackError> {
    if min_hits == 0 {
        return Err(TrackError::InvalidConfig(
            "min_hits must be positive".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_iou_threshold(iou_threshold: f64) -> Result<(), TrackError> {
    // Also rejects NaN.
    if !(0.0..1.0).contains(&iou_threshold) {
        return Err(TrackError::InvalidConfig(format!(
            "iou_threshold must be in [0, 1), got {iou_threshold}"
        )));
    }
    Ok(())
}
