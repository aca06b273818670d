//! Class label registry.
//!
//! Holds the detector's `class_id -> class_name` table and turns free-form
//! user input into canonical class names, e.g. to build the class filter
//! applied to detections before they reach the tracker.

use crate::detection::Detection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    valid_classes: BTreeMap<i64, String>,
    // lowercased name -> id
    name_to_id: HashMap<String, i64>,
}

impl LabelRegistry {
    pub fn new<I, S>(valid_classes: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        registry.set_valid_classes(valid_classes);
        registry
    }

    /// Replace the class table.
    pub fn set_valid_classes<I, S>(&mut self, valid_classes: I)
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        self.valid_classes = valid_classes
            .into_iter()
            .map(|(id, name)| (id, name.into()))
            .collect();
        self.name_to_id = self
            .valid_classes
            .iter()
            .map(|(id, name)| (name.to_lowercase(), *id))
            .collect();
    }

    pub fn is_empty(&self) -> bool {
        self.valid_classes.is_empty()
    }

    /// Case-insensitive membership test. Always false for an empty registry.
    pub fn validate_class_name(&self, class_name: &str) -> bool {
        self.name_to_id.contains_key(&class_name.to_lowercase())
    }

    /// Canonical spelling of `user_input`, ignoring case and surrounding
    /// whitespace.
    pub fn normalize_class_name(&self, user_input: &str) -> Option<&str> {
        let class_id = self.get_class_id(user_input)?;
        self.valid_classes.get(&class_id).map(String::as_str)
    }

    pub fn get_class_id(&self, class_name: &str) -> Option<i64> {
        let normalized = class_name.trim().to_lowercase();
        self.name_to_id.get(&normalized).copied()
    }

    /// Class names containing `user_input` (case-insensitive), in id order.
    pub fn suggest_similar_classes(&self, user_input: &str, max_suggestions: usize) -> Vec<&str> {
        let needle = user_input.trim().to_lowercase();
        self.valid_classes
            .values()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(max_suggestions)
            .map(String::as_str)
            .collect()
    }

    /// Parse comma-separated user input into canonical class names.
    /// Unknown entries are dropped.
    pub fn parse_class_filter(&self, user_input: &str) -> Vec<String> {
        if user_input.trim().is_empty() {
            return Vec::new();
        }

        let mut classes = Vec::new();
        for raw in user_input.split(',') {
            match self.normalize_class_name(raw) {
                Some(name) => classes.push(name.to_string()),
                None => debug!(input = raw.trim(), "ignoring unknown class in filter"),
            }
        }
        classes
    }

    pub fn get_all_class_names(&self) -> Vec<&str> {
        self.valid_classes.values().map(String::as_str).collect()
    }

    /// Every class as (id, name), sorted by id.
    pub fn get_class_info(&self) -> Vec<ClassInfo> {
        self.valid_classes
            .iter()
            .map(|(id, name)| ClassInfo {
                id: *id,
                name: name.clone(),
            })
            .collect()
    }
}

/// Keep the detections whose class name is in `class_filter`.
/// An empty filter keeps everything.
pub fn filter_detections(detections: &[Detection], class_filter: &[String]) -> Vec<Detection> {
    if class_filter.is_empty() {
        return detections.to_vec();
    }
    detections
        .iter()
        .filter(|det| class_filter.iter().any(|c| *c == det.class_name))
        .cloned()
        .collect()
}
