//! # visiontrack-rs
//!
//! Turns a stream of independent per-frame object detections into tracks
//! with stable identities, for counting, overlays and analytics.
//!
//! Detections are matched to live tracks by IoU under an exact class-name
//! constraint. A track is reported once it has been matched `min_hits`
//! times and dropped after `max_age` unmatched frames. There is no motion
//! model: an unmatched track keeps its last box.
//!
//! ## Example
//!
//! ```
//! use visiontrack_rs::{Detection, IouTracker};
//!
//! let mut tracker = IouTracker::new(30, 3, 0.3).unwrap();
//! let person = Detection::from_xyxy([100.0, 100.0, 200.0, 200.0], 0.9, 0, "person");
//!
//! assert!(tracker.update(&[person.clone()]).is_empty());
//! assert!(tracker.update(&[person.clone()]).is_empty());
//! let tracks = tracker.update(&[person]);
//! assert_eq!(tracks[0].track_id, 0);
//! ```

pub mod assoc;
pub mod config;
pub mod detection;
pub mod error;
pub mod labels;
pub mod rect;
pub mod track;
pub mod tracker;

mod hungarian;

pub use assoc::{Associator, GreedyAssociator, OptimalAssociator};
pub use config::TrackerConfig;
pub use detection::Detection;
pub use error::TrackError;
pub use labels::LabelRegistry;
pub use rect::Rect;
pub use track::Track;
pub use tracker::{FrameStats, IouTracker};
