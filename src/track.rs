use crate::{
    detection::Detection,
    rect::{self, Rect},
};
use serde::{Deserialize, Serialize};

/*----------------------------------------------------------------------------
Track struct
----------------------------------------------------------------------------*/

/// The tracker's record of one physical object across frames.
///
/// `rect`, `confidence`, `class_id` and `class_name` hold the values of the
/// most recently matched detection. While a track goes unmatched they are
/// simply the last known values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub track_id: usize,
    #[serde(rename = "bbox", with = "rect::xyxy_array")]
    pub rect: Rect<f64>,
    pub confidence: f64,
    pub class_id: i64,
    pub class_name: String,
    /// Frames in which this track was matched, creation frame included.
    pub hits: usize,
    /// Frames since the last match, offset by one: a track matched or
    /// created during an update leaves that update with `age == 1`.
    pub age: usize,
}

impl Track {
    pub(crate) fn new(detection: &Detection, track_id: usize) -> Self {
        Self {
            track_id,
            rect: detection.rect,
            confidence: detection.confidence,
            class_id: detection.class_id,
            class_name: detection.class_name.clone(),
            hits: 1,
            age: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn dummy_track(track_id: usize, bbox: [f64; 4], class_name: &str) -> Self {
        Self {
            track_id,
            rect: Rect::from(bbox),
            confidence: 1.0,
            class_id: 0,
            class_name: class_name.to_string(),
            hits: 1,
            age: 0,
        }
    }

    pub fn get_track_id(&self) -> usize {
        self.track_id
    }

    pub fn get_rect(&self) -> &Rect<f64> {
        &self.rect
    }

    pub fn get_bbox(&self) -> [f64; 4] {
        self.rect.get_xyxy()
    }

    pub fn get_confidence(&self) -> f64 {
        self.confidence
    }

    pub fn get_class_id(&self) -> i64 {
        self.class_id
    }

    pub fn get_class_name(&self) -> &str {
        &self.class_name
    }

    pub fn get_hits(&self) -> usize {
        self.hits
    }

    pub fn get_age(&self) -> usize {
        self.age
    }

    pub fn is_confirmed(&self, min_hits: usize) -> bool {
        self.hits >= min_hits
    }

    pub(crate) fn is_expired(&self, max_age: usize) -> bool {
        self.age >= max_age
    }

    /// Take over the values of the detection matched to this track.
    pub(crate) fn update(&mut self, detection: &Detection) {
        self.rect = detection.rect;
        self.confidence = detection.confidence;
        self.class_id = detection.class_id;
        self.class_name.clone_from(&detection.class_name);
        self.hits += 1;
        self.age = 0;
    }

    pub(crate) fn increment_age(&mut self) {
        self.age += 1;
    }
}
