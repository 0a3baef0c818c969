use crate::{ModelError, ModelResult, SermonSection};
use chrono::{DateTime, Utc};
use ministry_types::SeriesId;
use serde::{Deserialize, Deserializer, Serialize};

/// A partial sermon update.
///
/// Only the whitelisted fields below can be changed through a patch; owner,
/// id and the created/updated stamps are never taken from the client. When
/// decoding JSON, any other key is ignored.
///
/// `date` and `series_id` are tri-state: absent leaves the value alone,
/// `null` clears it, a value sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub series_id: Option<Option<SeriesId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspiration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripture_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustrations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practical_applications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SermonSection>>,
}

// A key that is present decodes to `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SermonPatch {
    /// Decodes a patch from a client JSON body, dropping non-whitelisted keys.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Returns true if the patch would change nothing but `updated_at`.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks field ranges.
    pub fn validate(&self) -> ModelResult<()> {
        if let Some(progress) = self.progress {
            if progress > 100 {
                return Err(ModelError::InvalidValue {
                    field: "progress",
                    reason: format!("{progress} is above 100"),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn scripture(mut self, scripture: impl Into<String>) -> Self {
        self.scripture = Some(scripture.into());
        self
    }

    #[must_use]
    pub fn series(mut self, series_id: Option<SeriesId>) -> Self {
        self.series_id = Some(series_id);
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }
}
