use crate::rect::{self, Rect};
use serde::{Deserialize, Serialize};

/*------------------------------------------------------------------------------
Detection struct
------------------------------------------------------------------------------*/

/// One per-frame observation produced by the external detector.
///
/// Detections carry no identity across frames; the tracker assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "bbox", with = "rect::xyxy_array")]
    pub rect: Rect<f64>,
    pub confidence: f64,
    pub class_id: i64,
    pub class_name: String,
}

impl Detection {
    pub fn new(
        rect: Rect<f64>,
        confidence: f64,
        class_id: i64,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            rect,
            confidence,
            class_id,
            class_name: class_name.into(),
        }
    }

    /// Build a detection from an `[x1, y1, x2, y2]` box.
    pub fn from_xyxy(
        bbox: [f64; 4],
        confidence: f64,
        class_id: i64,
        class_name: impl Into<String>,
    ) -> Self {
        Self::new(Rect::from(bbox), confidence, class_id, class_name)
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
}
