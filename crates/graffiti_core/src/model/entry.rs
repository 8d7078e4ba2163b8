//! Graffiti entry domain model.
//!
//! # Responsibility
//! - Define the flat record returned by read operations.
//! - Carry create input and partial-update patches.
//!
//! # Invariants
//! - `id` and `created_at` are assigned by the store and never change.
//! - `created_by` is fixed at creation; patches cannot carry it.

use serde::{Deserialize, Serialize};

/// Store-assigned integer primary key.
pub type EntryId = i64;

/// One catalogued graffiti artwork as persisted in the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraffitiEntry {
    pub id: EntryId,
    /// At most 100 characters, enforced by the store.
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Path or URL of the image. At most 255 characters.
    pub image_url: String,
    /// Unix epoch milliseconds, set by the store on insert.
    pub created_at: i64,
    /// Contributor name. At most 50 characters.
    pub created_by: String,
}

/// Input for creating a new entry.
///
/// Length limits are not checked here; the store rejects oversized values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGraffitiEntry {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub created_by: String,
}

impl NewGraffitiEntry {
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        latitude: f64,
        longitude: f64,
        image_url: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            latitude,
            longitude,
            image_url: image_url.into(),
            created_by: created_by.into(),
        }
    }
}

/// Partial update for an existing entry.
///
/// A field is applied only when it carries a non-empty string or a non-zero
/// number. `None`, `""` and `0.0` all mean "keep the stored value", so a
/// field can never be cleared to empty or zero through a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
}

impl EntryUpdate {
    /// Returns whether applying this patch can change any field.
    pub fn is_noop(&self) -> bool {
        text_value(&self.title).is_none()
            && text_value(&self.description).is_none()
            && number_value(self.latitude).is_none()
            && number_value(self.longitude).is_none()
            && text_value(&self.image_url).is_none()
    }

    /// Overwrites the fields of `entry` that this patch carries.
    pub fn apply_to(&self, entry: &mut GraffitiEntry) {
        if let Some(title) = text_value(&self.title) {
            entry.title = title.to_string();
        }
        if let Some(description) = text_value(&self.description) {
            entry.description = Some(description.to_string());
        }
        if let Some(latitude) = number_value(self.latitude) {
            entry.latitude = latitude;
        }
        if let Some(longitude) = number_value(self.longitude) {
            entry.longitude = longitude;
        }
        if let Some(image_url) = text_value(&self.image_url) {
            entry.image_url = image_url.to_string();
        }
    }
}

fn text_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

fn number_value(value: Option<f64>) -> Option<f64> {
    value.filter(|number| *number != 0.0)
}
