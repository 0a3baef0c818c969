use crate::{ModelError, ModelResult, SermonPatch, SermonSeries};
use chrono::{DateTime, Utc};
use ministry_types::{SeriesId, SermonId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// The role a section plays in a sermon outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Introduction,
    MainPoint,
    Illustration,
    Application,
    Conclusion,
    Custom,
}

/// One ordered section of a sermon outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonSection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    pub content: String,
    pub order: u32,
    /// Free-form label, only meaningful for [`SectionKind::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
}

impl SermonSection {
    pub fn new(
        id: impl Into<String>,
        kind: SectionKind,
        title: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            content: String::new(),
            order,
            custom_type: None,
        }
    }
}

/// A block of rich content (heading, paragraph, scripture quote, list...).
///
/// The block type is an open string owned by the editor front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

/// A stored sermon document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sermon {
    pub id: SermonId,
    pub user_id: UserId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<SeriesId>,
    #[serde(flatten)]
    pub body: SermonBody,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The content fields shared by stored and populated sermons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspiration: Option<String>,
    /// Completion percentage, 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SermonSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripture_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub illustrations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub practical_applications: Vec<String>,
}

impl Sermon {
    /// Builds a sermon document from a validated create request.
    pub fn new(user_id: UserId, input: NewSermon, now: Timestamp) -> ModelResult<Self> {
        input.validate()?;
        Ok(Self {
            id: SermonId::new(),
            user_id,
            title: input.title.trim().to_string(),
            series_id: input.series_id,
            body: SermonBody {
                date: input.date,
                scripture: input.scripture,
                notes: input.notes,
                inspiration: input.inspiration,
                sections: input.sections,
                ..SermonBody::default()
            },
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a whitelisted partial update and stamps `updated_at`.
    ///
    /// Fields absent from the patch are left untouched.
    pub fn apply_patch(&mut self, patch: SermonPatch, now: Timestamp) -> ModelResult<()> {
        patch.validate()?;
        let body = &mut self.body;

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(series_id) = patch.series_id {
            self.series_id = series_id;
        }
        if let Some(date) = patch.date {
            body.date = date;
        }
        if let Some(v) = patch.scripture {
            body.scripture = Some(v);
        }
        if let Some(v) = patch.notes {
            body.notes = Some(v);
        }
        if let Some(v) = patch.inspiration {
            body.inspiration = Some(v);
        }
        if let Some(v) = patch.progress {
            body.progress = Some(v);
        }
        if let Some(v) = patch.key_points {
            body.key_points = v;
        }
        if let Some(v) = patch.scripture_text {
            body.scripture_text = Some(v);
        }
        if let Some(v) = patch.illustrations {
            body.illustrations = v;
        }
        if let Some(v) = patch.practical_applications {
            body.practical_applications = v;
        }
        if let Some(v) = patch.color {
            body.color = Some(v);
        }
        if let Some(v) = patch.border_color {
            body.border_color = Some(v);
        }
        if let Some(v) = patch.text_color {
            body.text_color = Some(v);
        }
        if let Some(v) = patch.sections {
            body.sections = v;
        }

        self.updated_at = now;
        Ok(())
    }

    /// Joins in the referenced series.
    ///
    /// The series is dropped if it does not match `series_id`, so a dangling
    /// or mismatched reference yields a sermon without a series.
    pub fn populate(self, series: Option<SermonSeries>) -> PopulatedSermon {
        let series = series.filter(|s| Some(s.id) == self.series_id);
        PopulatedSermon {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            series,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A sermon with its series joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedSermon {
    pub id: SermonId,
    pub user_id: UserId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<SermonSeries>,
    #[serde(flatten)]
    pub body: SermonBody,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PopulatedSermon {
    pub fn series_id(&self) -> Option<SeriesId> {
        self.series.as_ref().map(|s| s.id)
    }
}

/// Request to create a sermon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSermon {
    pub title: String,
    #[serde(default)]
    pub series_id: Option<SeriesId>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scripture: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub inspiration: Option<String>,
    #[serde(default)]
    pub sections: Vec<SermonSection>,
}

impl NewSermon {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_series(mut self, series_id: SeriesId) -> Self {
        self.series_id = Some(series_id);
        self
    }

    #[must_use]
    pub fn with_scripture(mut self, scripture: impl Into<String>) -> Self {
        self.scripture = Some(scripture.into());
        self
    }

    /// Rejects a blank title.
    pub fn validate(&self) -> ModelResult<()> {
        if self.title.trim().is_empty() {
            return Err(ModelError::MissingField("title"));
        }
        Ok(())
    }
}
