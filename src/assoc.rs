//! Association between the detections of one frame and the live tracks.
//!
//! Two strategies sit behind the [`Associator`] trait:
//! - [`GreedyAssociator`]: per-detection best candidate, first come first
//!   served in detection order (the default)
//! - [`OptimalAssociator`]: maximum total IoU via the Hungarian method
//!
//! Both only ever pair a detection with a track of the same class name whose
//! IoU is strictly above the threshold, and both bind each track to at most
//! one detection.

use crate::{detection::Detection, hungarian, rect::Rect, track::Track};
use nalgebra::DMatrix;

/// Compute IoU between all pairs of detections and tracks.
///
/// # Returns
/// A matrix of shape (num_detections, num_tracks) containing IoU values
pub fn iou_batch(detections: &[Rect<f64>], tracks: &[Rect<f64>]) -> DMatrix<f64> {
    DMatrix::from_fn(detections.len(), tracks.len(), |i, j| {
        detections[i].calc_iou(&tracks[j])
    })
}

/// Result of associating one frame's detections with the live tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// Matched pairs as (detection_index, track_index), in detection order
    pub matches: Vec<(usize, usize)>,
    /// Indices of unmatched detections, in detection order
    pub unmatched_detections: Vec<usize>,
    /// Indices of unmatched tracks, ascending
    pub unmatched_tracks: Vec<usize>,
}

impl AssignmentResult {
    fn from_matches(matches: Vec<(usize, usize)>, num_dets: usize, num_trks: usize) -> Self {
        let mut det_matched = vec![false; num_dets];
        let mut trk_matched = vec![false; num_trks];
        for &(d, t) in &matches {
            det_matched[d] = true;
            trk_matched[t] = true;
        }

        Self {
            matches,
            unmatched_detections: (0..num_dets).filter(|&d| !det_matched[d]).collect(),
            unmatched_tracks: (0..num_trks).filter(|&t| !trk_matched[t]).collect(),
        }
    }

    fn all_unmatched(num_dets: usize, num_trks: usize) -> Self {
        Self::from_matches(Vec::new(), num_dets, num_trks)
    }
}

/// Strategy that pairs detections with tracks for one frame.
pub trait Associator {
    fn associate(
        &self,
        detections: &[Detection],
        tracks: &[Track],
        iou_threshold: f64,
    ) -> AssignmentResult;
}

fn rects_of_detections(detections: &[Detection]) -> Vec<Rect<f64>> {
    detections.iter().map(|d| d.rect).collect()
}

fn rects_of_tracks(tracks: &[Track]) -> Vec<Rect<f64>> {
    tracks.iter().map(|t| t.rect).collect()
}

/*-----------------------------------------------------------------------------
GreedyAssociator
-----------------------------------------------------------------------------*/

/// Single pass over detections in input order. Each detection claims the
/// unclaimed same-class track with the highest IoU, provided that IoU is
/// strictly above the threshold. On equal IoU the lower track index wins.
///
/// This is not a globally optimal assignment: an earlier detection never
/// gives up a track to a later one.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssociator;

impl Associator for GreedyAssociator {
    fn associate(
        &self,
        detections: &[Detection],
        tracks: &[Track],
        iou_threshold: f64,
    ) -> AssignmentResult {
        if detections.is_empty() || tracks.is_empty() {
            return AssignmentResult::all_unmatched(detections.len(), tracks.len());
        }

        let ious = iou_batch(&rects_of_detections(detections), &rects_of_tracks(tracks));
        let mut claimed = vec![false; tracks.len()];
        let mut matches = Vec::new();

        for (d, det) in detections.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for (t, track) in tracks.iter().enumerate() {
                if claimed[t] || track.class_name != det.class_name {
                    continue;
                }
                let iou = ious[(d, t)];
                if iou > iou_threshold && best.is_none_or(|(_, best_iou)| iou > best_iou) {
                    best = Some((t, iou));
                }
            }

            if let Some((t, _)) = best {
                claimed[t] = true;
                matches.push((d, t));
            }
        }

        AssignmentResult::from_matches(matches, detections.len(), tracks.len())
    }
}

/*-----------------------------------------------------------------------------
OptimalAssociator
-----------------------------------------------------------------------------*/

/// Maximizes the total IoU over eligible (same class, IoU above threshold)
/// pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalAssociator;

impl Associator for OptimalAssociator {
    fn associate(
        &self,
        detections: &[Detection],
        tracks: &[Track],
        iou_threshold: f64,
    ) -> AssignmentResult {
        if detections.is_empty() || tracks.is_empty() {
            return AssignmentResult::all_unmatched(detections.len(), tracks.len());
        }

        let ious = iou_batch(&rects_of_detections(detections), &rects_of_tracks(tracks));
        let eligible = |d: usize, t: usize| {
            detections[d].class_name == tracks[t].class_name && ious[(d, t)] > iou_threshold
        };

        // Ineligible pairs cost nothing, so the solver never prefers them
        // over an eligible one.
        let cost = DMatrix::from_fn(detections.len(), tracks.len(), |d, t| {
            if eligible(d, t) { -ious[(d, t)] } else { 0.0 }
        });

        let matches = hungarian::solve(&cost)
            .into_iter()
            .enumerate()
            .filter_map(|(d, t)| t.map(|t| (d, t)))
            .filter(|&(d, t)| eligible(d, t))
            .collect();

        AssignmentResult::from_matches(matches, detections.len(), tracks.len())
    }
}
