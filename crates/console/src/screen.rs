//! List-plus-form state shared by every admin catalog screen.
//!
//! A [`CrudScreen`] owns the last fetched list, a loading flag, the last
//! error as display text, the edit form and the search box. Loads may
//! overlap; each takes a [`LoadTicket`] and only the most recently issued
//! load may replace the list.

use async_trait::async_trait;
use storefront_core::error::CoreError;
use storefront_core::search::{filter_by_name, Named};
use storefront_core::sequence::{LoadSequencer, LoadTicket};
use storefront_core::types::DbId;
use storefront_core::validation::require_name;
use tokio::sync::Mutex;

use crate::error::ClientError;

/// One catalog table as seen by the console.
#[async_trait]
pub trait Resource: Send + Sync {
    type Item: Named + Clone + Send + Sync;
    /// Form contents for both create and edit.
    type Draft: Default + Clone + Send + Sync;

    /// Display name of the entity, e.g. `"Fabric"`.
    const ENTITY: &'static str;

    fn id(item: &Self::Item) -> DbId;
    fn draft_from(item: &Self::Item) -> Self::Draft;
    fn draft_name(draft: &Self::Draft) -> &str;

    async fn list(&self) -> Result<Vec<Self::Item>, ClientError>;
    async fn create(&self, draft: &Self::Draft) -> Result<Self::Item, ClientError>;
    async fn update(&self, id: DbId, draft: &Self::Draft) -> Result<Self::Item, ClientError>;
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

/// The form. `id` is `None` while creating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm<D> {
    pub id: Option<DbId>,
    pub draft: D,
}

impl<D> EditForm<D> {
    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ScreenState<I, D> {
    pub items: Vec<I>,
    pub loading: bool,
    pub error: Option<String>,
    pub form: EditForm<D>,
    pub search: String,
}

impl<I, D: Default> Default for ScreenState<I, D> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            form: EditForm::default(),
            search: String::new(),
        }
    }
}

/// Proof that the operator was asked to confirm a delete. Only
/// [`CrudScreen::request_delete`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: DbId,
    name: String,
}

impl PendingDelete {
    pub fn id(&self) -> DbId {
        self.id
    }

    /// Name to show in the confirmation prompt.
    pub fn name(&self) -> &str {
        &self.name
    }
}

struct Inner<I, D> {
    state: ScreenState<I, D>,
    sequencer: LoadSequencer,
}

pub struct CrudScreen<R: Resource> {
    resource: R,
    inner: Mutex<Inner<R::Item, R::Draft>>,
}

impl<R: Resource> CrudScreen<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            inner: Mutex::new(Inner {
                state: ScreenState::default(),
                sequencer: LoadSequencer::new(),
            }),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub async fn snapshot(&self) -> ScreenState<R::Item, R::Draft> {
        self.inner.lock().await.state.clone()
    }

    pub async fn items(&self) -> Vec<R::Item> {
        self.inner.lock().await.state.items.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.lock().await.state.error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.state.loading
    }

    pub async fn form(&self) -> EditForm<R::Draft> {
        self.inner.lock().await.state.form.clone()
    }

    /// Fetch the full list. A response that is no longer the latest load
    /// is dropped; on failure the previous items stay.
    pub async fn load(&self) {
        let ticket = {
            let mut inner = self.inner.lock().await;
            inner.state.loading = true;
            inner.sequencer.issue()
        };

        let result = self.resource.list().await;
        self.apply_load(ticket, result).await;
    }

    async fn apply_load(&self, ticket: LoadTicket, result: Result<Vec<R::Item>, ClientError>) {
        let mut inner = self.inner.lock().await;
        if !inner.sequencer.is_current(ticket) {
            tracing::debug!(entity = R::ENTITY, ticket = ticket.value(), "Stale list response dropped");
            return;
        }
        match result {
            Ok(items) => {
                inner.state.items = items;
                inner.state.error = None;
            }
            Err(e) => {
                tracing::warn!(entity = R::ENTITY, error = %e, "List load failed");
                inner.state.error = Some(e.to_string());
            }
        }
        inner.state.loading = false;
    }

    /// Put `item` into the form for editing.
    pub async fn edit(&self, item: &R::Item) {
        let mut inner = self.inner.lock().await;
        inner.state.form = EditForm {
            id: Some(R::id(item)),
            draft: R::draft_from(item),
        };
    }

    /// Change the draft in place, as the form fields would.
    pub async fn update_draft(&self, change: impl FnOnce(&mut R::Draft) + Send) {
        let mut inner = self.inner.lock().await;
        change(&mut inner.state.form.draft);
    }

    pub async fn reset_form(&self) {
        self.inner.lock().await.state.form = EditForm::default();
    }

    /// Create or update from the form, then reload. On failure the form is
    /// kept and the error is shown.
    pub async fn submit(&self) -> Result<R::Item, ClientError> {
        let form = self.form().await;

        let result = match require_name(R::ENTITY, R::draft_name(&form.draft)) {
            Err(e) => Err(ClientError::Invalid(validation_message(e))),
            Ok(_) => match form.id {
                None => self.resource.create(&form.draft).await,
                Some(id) => self.resource.update(id, &form.draft).await,
            },
        };

        match result {
            Ok(item) => {
                {
                    let mut inner = self.inner.lock().await;
                    inner.state.form = EditForm::default();
                    inner.state.error = None;
                }
                tracing::info!(entity = R::ENTITY, id = R::id(&item), "Saved");
                self.load().await;
                Ok(item)
            }
            Err(e) => {
                self.inner.lock().await.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Start a delete. Returns `None` when `id` is not in the list.
    pub async fn request_delete(&self, id: DbId) -> Option<PendingDelete> {
        let inner = self.inner.lock().await;
        inner
            .state
            .items
            .iter()
            .find(|item| R::id(item) == id)
            .map(|item| PendingDelete {
                id,
                name: item.name().to_string(),
            })
    }

    /// Delete a confirmed item, then reload.
    pub async fn confirm_delete(&self, pending: PendingDelete) -> Result<(), ClientError> {
        match self.resource.delete(pending.id).await {
            Ok(()) => {
                tracing::info!(entity = R::ENTITY, id = pending.id, "Deleted");
                self.load().await;
                Ok(())
            }
            Err(e) => {
                self.inner.lock().await.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn set_search(&self, query: &str) {
        self.inner.lock().await.state.search = query.to_string();
    }

    /// Items whose name contains the search text, ignoring case.
    pub async fn filtered(&self) -> Vec<R::Item> {
        let inner = self.inner.lock().await;
        filter_by_name(&inner.state.items, &inner.state.search)
            .into_iter()
            .cloned()
            .collect()
    }
}

fn validation_message(err: CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    }
}
