//! Main IouTracker implementation
//!
//! This module provides the `IouTracker` struct that turns per-frame
//! detections into tracks with stable identities. It owns the track store
//! and runs one lifecycle step per call to [`IouTracker::update`].

use crate::assoc::{Associator, GreedyAssociator};
use crate::config::{self, TrackerConfig};
use crate::detection::Detection;
use crate::error::TrackError;
use crate::track::Track;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Bookkeeping of a single [`IouTracker::update`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Frame number since construction or the last reset, starting at 1
    pub frame: usize,
    pub detections: usize,
    pub matched: usize,
    pub created: usize,
    pub expired: usize,
    pub confirmed: usize,
    /// Tracks left in the store, confirmed or not
    pub live: usize,
}

/// IouTracker - greedy IoU multi-object tracker
///
/// Each frame:
/// - detections are associated with live tracks by IoU and class name
/// - matched tracks take over the detection's values
/// - unmatched detections start new tracks
/// - every track is aged and those unmatched for `max_age` frames dropped
/// - tracks with at least `min_hits` matches are reported
///
/// `max_age`, `min_hits` and `iou_threshold` may be changed between frames;
/// each update reads their current values.
///
/// Not designed for concurrent use. Run one tracker per video stream and
/// call `update` once per frame in arrival order.
#[derive(Debug)]
pub struct IouTracker<A = GreedyAssociator> {
    max_age: usize,
    min_hits: usize,
    iou_threshold: f64,
    associator: A,

    // Internal state
    frame_count: usize,
    track_id_count: usize,
    tracks: Vec<Track>,
    last_stats: FrameStats,
}

impl IouTracker {
    /// Create a new IouTracker with greedy association.
    ///
    /// # Arguments
    /// * `max_age` - Frames a track may go unmatched before removal
    /// * `min_hits` - Matched frames required before a track is reported
    /// * `iou_threshold` - Exclusive minimum IoU for a match, in `[0, 1)`
    ///
    /// # Example
    /// ```
    /// use visiontrack_rs::IouTracker;
    /// let tracker = IouTracker::new(30, 3, 0.3).unwrap();
    /// ```
    pub fn new(
        max_age: usize,
        min_hits: usize,
        iou_threshold: f64,
    ) -> Result<Self, TrackError> {
        Self::from_config(TrackerConfig::new(max_age, min_hits, iou_threshold))
    }

    pub fn from_config(config: TrackerConfig) -> Result<Self, TrackError> {
        config.validate().inspect_err(|err| {
            warn!(error = %err, "rejected tracker configuration");
        })?;

        Ok(Self {
            max_age: config.max_age,
            min_hits: config.min_hits,
            iou_threshold: config.iou_threshold,
            associator: GreedyAssociator,
            frame_count: 0,
            track_id_count: 0,
            tracks: Vec::new(),
            last_stats: FrameStats::default(),
        })
    }
}

impl<A: Associator> IouTracker<A> {
    /// Replace the association strategy, keeping every other setting.
    ///
    /// # Example
    /// ```
    /// use visiontrack_rs::{IouTracker, assoc::OptimalAssociator};
    /// let tracker = IouTracker::new(30, 3, 0.3)
    ///     .unwrap()
    ///     .with_associator(OptimalAssociator);
    /// ```
    pub fn with_associator<B: Associator>(self, associator: B) -> IouTracker<B> {
        IouTracker {
            max_age: self.max_age,
            min_hits: self.min_hits,
            iou_threshold: self.iou_threshold,
            associator,
            frame_count: self.frame_count,
            track_id_count: self.track_id_count,
            tracks: self.tracks,
            last_stats: self.last_stats,
        }
    }

    /// Advance the tracker by one frame.
    ///
    /// # Arguments
    /// * `detections` - This frame's detections; order decides which
    ///   detection claims a contested track
    ///
    /// # Returns
    /// Clones of the tracks with `hits >= min_hits`, in ascending
    /// `track_id` order
    pub fn update(&mut self, detections: &[Detection]) -> Vec<Track> {
        self.frame_count += 1;
        let mut stats = FrameStats {
            frame: self.frame_count,
            detections: detections.len(),
            ..FrameStats::default()
        };

        if !detections.is_empty() {
            let result =
                self.associator
                    .associate(detections, &self.tracks, self.iou_threshold);

            for &(det_idx, trk_idx) in &result.matches {
                let track = &mut self.tracks[trk_idx];
                track.update(&detections[det_idx]);
                trace!(track_id = track.track_id, hits = track.hits, "track matched");
            }

            for &det_idx in &result.unmatched_detections {
                let track = Track::new(&detections[det_idx], self.track_id_count);
                self.track_id_count += 1;
                trace!(
                    track_id = track.track_id,
                    class_name = %track.class_name,
                    "track created"
                );
                self.tracks.push(track);
            }

            stats.matched = result.matches.len();
            stats.created = result.unmatched_detections.len();
        }

        stats.expired = self.age_tracks();

        let confirmed: Vec<Track> = self
            .tracks
            .iter()
            .filter(|t| t.is_confirmed(self.min_hits))
            .cloned()
            .collect();

        stats.confirmed = confirmed.len();
        stats.live = self.tracks.len();
        debug!(
            frame = stats.frame,
            detections = stats.detections,
            matched = stats.matched,
            created = stats.created,
            expired = stats.expired,
            confirmed = stats.confirmed,
            live = stats.live,
            "tracker updated"
        );
        self.last_stats = stats;

        confirmed
    }

    /// Drop every track and restart ids at 0.
    ///
    /// Call this whenever the frame source changes.
    pub fn reset(&mut self) {
        debug!(
            dropped = self.tracks.len(),
            frames = self.frame_count,
            "tracker reset"
        );
        self.tracks.clear();
        self.track_id_count = 0;
        self.frame_count = 0;
        self.last_stats = FrameStats::default();
    }

    pub fn max_age(&self) -> usize {
        self.max_age
    }

    pub fn set_max_age(&mut self, max_age: usize) -> Result<(), TrackError> {
        config::validate_max_age(max_age).inspect_err(|err| {
            warn!(error = %err, "rejected max_age");
        })?;
        self.max_age = max_age;
        Ok(())
    }

    pub fn min_hits(&self) -> usize {
        self.min_hits
    }

    pub fn set_min_hits(&mut self, min_hits: usize) -> Result<(), TrackError> {
        config::validate_min_hits(min_hits).inspect_err(|err| {
            warn!(error = %err, "rejected min_hits");
        })?;
        self.min_hits = min_hits;
        Ok(())
    }

    pub fn iou_threshold(&self) -> f64 {
        self.iou_threshold
    }

    pub fn set_iou_threshold(&mut self, iou_threshold: f64) -> Result<(), TrackError> {
        config::validate_iou_threshold(iou_threshold).inspect_err(|err| {
            warn!(error = %err, "rejected iou_threshold");
        })?;
        self.iou_threshold = iou_threshold;
        Ok(())
    }

    /// Current parameters as a config value.
    pub fn config(&self) -> TrackerConfig {
        TrackerConfig::new(self.max_age, self.min_hits, self.iou_threshold)
    }

    /// Every live track, confirmed or not, in ascending `track_id` order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Frames processed since construction or the last reset.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Id the next new track will get; equals the number of tracks created
    /// since construction or the last reset.
    pub fn next_track_id(&self) -> usize {
        self.track_id_count
    }

    pub fn last_frame_stats(&self) -> &FrameStats {
        &self.last_stats
    }

    // =========================================================================
    // Internal methods
    // =========================================================================

    /// Remove tracks that reached `max_age`, then age the survivors by one.
    ///
    /// Tracks matched or created this frame have `age == 0` here, so they
    /// always survive and leave the update with `age == 1`.
    fn age_tracks(&mut self) -> usize {
        let before = self.tracks.len();
        let max_age = self.max_age;
        self.tracks.retain(|track| {
            let expired = track.is_expired(max_age);
            if expired {
                trace!(track_id = track.track_id, hits = track.hits, "track expired");
            }
            !expired
        });

        for track in self.tracks.iter_mut() {
            track.increment_age();
        }

        before - self.tracks.len()
    }
}
