use crate::error::EditorError;
use async_trait::async_trait;
use ministry_autosave::SaveHandler;
use ministry_model::{PopulatedSermon, SermonDraft};
use ministry_storage::SermonStore;
use ministry_types::{SermonId, UserId};
use std::sync::Arc;
use tracing::debug;

/// Persists a [`SermonDraft`] by patching one sermon in the store.
///
/// SQLite calls are blocking, so each save runs on Tokio's blocking pool.
#[derive(Clone)]
pub struct StoreSaveHandler {
    store: Arc<SermonStore>,
    user: UserId,
    sermon_id: SermonId,
}

impl StoreSaveHandler {
    pub fn new(store: Arc<SermonStore>, user: UserId, sermon_id: SermonId) -> Self {
        Self {
            store,
            user,
            sermon_id,
        }
    }

    pub fn sermon_id(&self) -> SermonId {
        self.sermon_id
    }

    pub fn user(&self) -> UserId {
        self.user
    }
}

#[async_trait]
impl SaveHandler<SermonDraft> for StoreSaveHandler {
    type Response = PopulatedSermon;
    type Error = EditorError;

    async fn save(&self, draft: &SermonDraft) -> Result<PopulatedSermon, EditorError> {
        let store = self.store.clone();
        let (user, id) = (self.user, self.sermon_id);
        let patch = draft.to_patch();

        debug!("patching sermon {}", id);
        let updated =
            tokio::task::spawn_blocking(move || store.patch_sermon(user, id, patch)).await??;
        Ok(updated)
    }
}
