use crate::{ModelError, ModelResult};
use ministry_types::{SeriesId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Colour tag given to a series created without one.
pub const DEFAULT_SERIES_COLOR: &str = "gray";

/// A sermon series owned by one user.
///
/// Series are never deleted; they are archived (`active = false`) and keep
/// the time they were archived until they are reactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonSeries {
    pub id: SeriesId,
    pub user_id: UserId,
    pub name: String,
    pub color: String,
    pub active: bool,
    pub created_at: Timestamp,
    #[serde(default)]
    pub archived_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl SermonSeries {
    /// Builds a new, active series from a validated create request.
    pub fn new(user_id: UserId, input: NewSeries, now: Timestamp) -> ModelResult<Self> {
        input.validate()?;
        let color = input
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERIES_COLOR.to_string());

        Ok(Self {
            id: SeriesId::new(),
            user_id,
            name: input.name.trim().to_string(),
            color,
            active: true,
            created_at: now,
            archived_at: None,
            updated_at: None,
        })
    }

    /// Archives or reactivates the series.
    ///
    /// Archiving records `now` as the archive time; reactivating clears it.
    pub fn set_active(&mut self, active: bool, now: Timestamp) {
        self.active = active;
        self.archived_at = if active { None } else { Some(now) };
        self.updated_at = Some(now);
    }
}

/// Request to create a series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeries {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Rejects a blank name.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField("name"));
        }
        Ok(())
    }
}
