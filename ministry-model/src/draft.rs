use crate::{PopulatedSermon, SermonPatch, SermonSection};
use ministry_types::SeriesId;
use serde::{Deserialize, Serialize};

/// The fields of a sermon the editor lets the user change.
///
/// This is the value the autosave controller compares and persists; two
/// drafts are equal when every field is structurally equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonDraft {
    pub title: String,
    pub scripture: String,
    pub notes: String,
    pub sections: Vec<SermonSection>,
    pub series_id: Option<SeriesId>,
}

impl SermonDraft {
    /// Builds the editable view of a loaded sermon. Missing text becomes "".
    pub fn from_sermon(sermon: &PopulatedSermon) -> Self {
        Self {
            title: sermon.title.clone(),
            scripture: sermon.body.scripture.clone().unwrap_or_default(),
            notes: sermon.body.notes.clone().unwrap_or_default(),
            sections: sermon.body.sections.clone(),
            series_id: sermon.series_id(),
        }
    }

    /// A patch that writes every editable field.
    pub fn to_patch(&self) -> SermonPatch {
        SermonPatch {
            title: Some(self.title.clone()),
            scripture: Some(self.scripture.clone()),
            notes: Some(self.notes.clone()),
            sections: Some(self.sections.clone()),
            series_id: Some(self.series_id),
            ..SermonPatch::default()
        }
    }
}
