use crate::error::EditorResult;
use crate::handler::StoreSaveHandler;
use ministry_autosave::{
    AutoSaveConfig, AutoSaveController, SaveObserver, SaveOutcome, SaveState, SaveStatus,
};
use ministry_model::{PopulatedSermon, SermonDraft};
use ministry_storage::SermonStore;
use ministry_types::{SermonId, UserId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, info};

/// Keeps the editor's server copy in step with successful saves.
struct ServerCopy {
    latest: Arc<RwLock<PopulatedSermon>>,
}

impl SaveObserver<PopulatedSermon> for ServerCopy {
    fn on_success(&self, updated: &PopulatedSermon) {
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = updated.clone();
    }
}

/// One editing session over a stored sermon.
///
/// Edits go to a local [`SermonDraft`]; the draft is saved automatically
/// once edits go quiet, or immediately with [`save_now`](Self::save_now).
pub struct SermonEditor {
    store: Arc<SermonStore>,
    user: UserId,
    sermon_id: SermonId,
    draft: Mutex<SermonDraft>,
    latest: Arc<RwLock<PopulatedSermon>>,
    autosave: AutoSaveController<SermonDraft, StoreSaveHandler>,
}

impl SermonEditor {
    /// Loads a sermon and starts a session with it as the saved baseline.
    pub async fn open(
        store: Arc<SermonStore>,
        user: UserId,
        sermon_id: SermonId,
        config: AutoSaveConfig,
    ) -> EditorResult<Self> {
        let sermon = fetch(&store, user, sermon_id).await?;
        let draft = SermonDraft::from_sermon(&sermon);
        let latest = Arc::new(RwLock::new(sermon));

        let handler = StoreSaveHandler::new(store.clone(), user, sermon_id);
        let autosave = AutoSaveController::new(draft.clone(), handler, config);
        autosave.add_observer(Arc::new(ServerCopy {
            latest: latest.clone(),
        }));

        info!("opened editor for sermon {}", sermon_id);
        Ok(Self {
            store,
            user,
            sermon_id,
            draft: Mutex::new(draft),
            latest,
            autosave,
        })
    }

    fn draft_lock(&self) -> MutexGuard<'_, SermonDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn sermon_id(&self) -> SermonId {
        self.sermon_id
    }

    /// Applies a change to the draft and hands the result to autosave.
    pub fn edit(&self, f: impl FnOnce(&mut SermonDraft)) {
        let mut draft = self.draft_lock();
        f(&mut draft);
        self.autosave.update(draft.clone());
    }

    /// A copy of the local draft.
    pub fn draft(&self) -> SermonDraft {
        self.draft_lock().clone()
    }

    /// The sermon as last loaded or returned by a successful save.
    pub fn sermon(&self) -> PopulatedSermon {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-fetches the sermon and discards unsaved edits.
    pub async fn reload(&self) -> EditorResult<()> {
        let sermon = fetch(&self.store, self.user, self.sermon_id).await?;
        let draft = SermonDraft::from_sermon(&sermon);

        *self.draft_lock() = draft.clone();
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = sermon;
        self.autosave.reset(draft);
        debug!("reloaded sermon {}", self.sermon_id);
        Ok(())
    }

    /// Saves the draft now instead of waiting for the quiet period.
    pub async fn save_now(&self) -> EditorResult<SaveOutcome<PopulatedSermon>> {
        Ok(self.autosave.manual_save().await?)
    }

    pub fn status(&self) -> SaveStatus {
        self.autosave.status()
    }

    pub fn state(&self) -> SaveState {
        self.autosave.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.autosave.subscribe()
    }

    /// Turns automatic saving on or off for this session.
    pub fn set_autosave(&self, enabled: bool) {
        self.autosave.set_enabled(enabled);
    }

    /// Ends the session. Pending automatic saves are cancelled.
    pub fn close(&self) {
        self.autosave.shutdown();
        debug!("closed editor for sermon {}", self.sermon_id);
    }
}

async fn fetch(
    store: &Arc<SermonStore>,
    user: UserId,
    id: SermonId,
) -> EditorResult<PopulatedSermon> {
    let store = store.clone();
    Ok(tokio::task::spawn_blocking(move || store.get_sermon(user, id)).await??)
}
