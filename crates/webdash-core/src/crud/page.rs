// ── CrudPage state machine ──
//
// `Loading -> Loaded` on mount, a dialog sub-state
// (`Closed | Create | Edit | DeleteConfirm`) and a `submitting` flag.
// The displayed collection is always the last successful list response:
// mutations never patch it locally, they trigger a full refetch.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use webdash_api::{Acknowledgement, ApiClient};

use super::{FormMode, MutableResource, Resource};
use crate::error::CoreError;
use crate::session::SessionStore;
use crate::toast::Toaster;
use crate::validate::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog<D> {
    Closed,
    Create { draft: D },
    Edit { id: u64, draft: D },
    DeleteConfirm { id: u64 },
}

impl<D> Dialog<D> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Observable page state.
#[derive(Debug, Clone)]
pub struct PageState<T, D> {
    pub phase: Phase,
    pub records: Arc<Vec<T>>,
    pub dialog: Dialog<D>,
    pub submitting: bool,
    /// Inline field errors from the last rejected submit.
    pub errors: ValidationErrors,
}

impl<T, D> Default for PageState<T, D> {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            records: Arc::new(Vec::new()),
            dialog: Dialog::Closed,
            submitting: false,
            errors: ValidationErrors::default(),
        }
    }
}

type StateOf<R> = PageState<<R as Resource>::Record, <R as Resource>::Draft>;

/// One entity screen.
pub struct CrudPage<R: Resource> {
    resource: R,
    api: Arc<ApiClient>,
    session: SessionStore,
    toaster: Toaster,
    state: watch::Sender<StateOf<R>>,
}

impl<R: Resource> CrudPage<R> {
    pub fn new(resource: R, api: Arc<ApiClient>, session: SessionStore, toaster: Toaster) -> Self {
        let (state, _) = watch::channel(PageState::default());
        Self {
            resource,
            api,
            session,
            toaster,
            state,
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn subscribe(&self) -> watch::Receiver<StateOf<R>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> StateOf<R> {
        self.state.borrow().clone()
    }

    pub fn records(&self) -> Arc<Vec<R::Record>> {
        Arc::clone(&self.state.borrow().records)
    }

    pub fn find(&self, id: u64) -> Option<R::Record> {
        self.state
            .borrow()
            .records
            .iter()
            .find(|r| R::id(r) == id)
            .cloned()
    }

    /// Loaded records matching `needle`, without refetching.
    pub fn search(&self, needle: &str) -> Vec<R::Record> {
        self.state
            .borrow()
            .records
            .iter()
            .filter(|r| R::matches(r, needle))
            .cloned()
            .collect()
    }

    /// Fetch the collection, replacing the displayed records.
    ///
    /// A failure empties the collection and raises an error toast; the
    /// error is also returned for callers that need an exit status.
    pub async fn load(&self) -> Result<usize, CoreError> {
        debug!(entity = R::PLURAL, "loading");
        self.state.send_modify(|s| s.phase = Phase::Loading);

        match self.resource.list(&self.api).await {
            Ok(records) => {
                let count = records.len();
                let records = Arc::new(records);
                self.state.send_modify(move |s| {
                    s.records = records;
                    s.phase = Phase::Loaded;
                });
                debug!(entity = R::PLURAL, count, "loaded");
                Ok(count)
            }
            Err(e) => {
                self.session.observe(&e);
                let err = CoreError::from(e);
                warn!(entity = R::PLURAL, error = %err, "list fetch failed");
                self.state.send_modify(|s| {
                    s.records = Arc::new(Vec::new());
                    s.phase = Phase::Loaded;
                });
                self.toaster
                    .error(format!("Failed to load {}", R::PLURAL), Some(err.to_string()));
                Err(err)
            }
        }
    }
}

impl<R: MutableResource> CrudPage<R> {
    pub fn open_create(&self) {
        self.set_dialog(Dialog::Create {
            draft: R::Draft::default(),
        });
    }

    /// Open the edit dialog seeded with the record's current values.
    pub fn open_edit(&self, id: u64) -> Result<(), CoreError> {
        let record = self.find(id).ok_or_else(|| self.not_found(id))?;
        self.set_dialog(Dialog::Edit {
            id,
            draft: R::draft_from(&record),
        });
        Ok(())
    }

    pub fn open_delete(&self, id: u64) -> Result<(), CoreError> {
        if self.find(id).is_none() {
            return Err(self.not_found(id));
        }
        self.set_dialog(Dialog::DeleteConfirm { id });
        Ok(())
    }

    pub fn close_dialog(&self) {
        self.set_dialog(Dialog::Closed);
    }

    /// Change the open create/edit form.
    pub fn edit_draft(&self, f: impl FnOnce(&mut R::Draft)) -> Result<(), CoreError> {
        let mut f = Some(f);
        self.state.send_if_modified(|s| match &mut s.dialog {
            Dialog::Create { draft } | Dialog::Edit { draft, .. } => {
                if let Some(f) = f.take() {
                    f(draft);
                }
                true
            }
            _ => false,
        });
        if f.is_some() {
            return Err(CoreError::NoDialog(R::ENTITY));
        }
        Ok(())
    }

    /// Submit the open dialog.
    ///
    /// Success closes the dialog, toasts and refetches the whole list.
    /// Failure keeps the dialog open and toasts the backend message;
    /// validation failures are kept on the state instead of toasted.
    pub async fn submit(&self) -> Result<Acknowledgement, CoreError> {
        let dialog = self.state.borrow().dialog.clone();

        let (verb, result) = match dialog {
            Dialog::Closed => return Err(CoreError::NoDialog(R::ENTITY)),
            Dialog::Create { draft } => {
                self.check(&draft, FormMode::Create)?;
                self.begin_submit();
                ("created", self.resource.create(&self.api, &draft).await)
            }
            Dialog::Edit { id, draft } => {
                self.check(&draft, FormMode::Edit)?;
                self.begin_submit();
                ("updated", self.resource.update(&self.api, id, &draft).await)
            }
            Dialog::DeleteConfirm { id } => {
                self.begin_submit();
                ("deleted", self.resource.delete(&self.api, id).await)
            }
        };

        match result {
            Ok(ack) => {
                info!(entity = R::ENTITY, verb, "submitted");
                self.state.send_modify(|s| {
                    s.dialog = Dialog::Closed;
                    s.submitting = false;
                });
                let description = ack
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("{} has been {verb}.", R::ENTITY));
                self.toaster.success("Success", Some(description));
                if let Err(e) = self.load().await {
                    debug!(error = %e, "refetch after {verb} failed");
                }
                Ok(ack)
            }
            Err(e) => {
                self.session.observe(&e);
                let err = CoreError::from(e);
                warn!(entity = R::ENTITY, error = %err, "submit failed");
                self.state.send_modify(|s| s.submitting = false);
                self.toaster.error("Error", Some(err.to_string()));
                Err(err)
            }
        }
    }

    fn check(&self, draft: &R::Draft, mode: FormMode) -> Result<(), CoreError> {
        match R::validate(draft, mode) {
            Ok(()) => {
                self.state.send_modify(|s| s.errors = ValidationErrors::default());
                Ok(())
            }
            Err(errors) => {
                debug!(entity = R::ENTITY, %errors, "validation failed");
                let reported = errors.clone();
                self.state.send_modify(move |s| s.errors = errors);
                Err(CoreError::Validation(reported))
            }
        }
    }

    fn begin_submit(&self) {
        self.state.send_modify(|s| s.submitting = true);
    }

    fn set_dialog(&self, dialog: Dialog<R::Draft>) {
        self.state.send_modify(move |s| {
            s.dialog = dialog;
            s.errors = ValidationErrors::default();
        });
    }

    fn not_found(&self, id: u64) -> CoreError {
        CoreError::NotFound {
            entity: R::ENTITY.to_owned(),
            identifier: id.to_string(),
        }
    }
}
