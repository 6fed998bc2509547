//! State and operations of one paginated list page.
//!
//! `ListController<R>` owns the search params, paging, rows, selection and
//! the create/update modal of a resource. Whenever the page, the page size
//! or the filters change (or `refetch` is called) it requests the current
//! page again. Responses of superseded requests are dropped.

use contracts::domain::common::{EntityId, Resource, Status};
use contracts::shared::envelope::{DeleteResponse, PageEnvelope};
use contracts::shared::paging::{PageQuery, PageState};
use contracts::shared::query::SearchParams;
use contracts::shared::validation::{message_for, FieldError, Validate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

use super::api_client::HttpClient;
use super::manage_api;
use super::selection::Selection;
use crate::layout::toast_service::ToastService;

// ============================================================================
// Request sequencing
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Monotonic counter of page requests; only the latest ticket is current.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn next(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

// ============================================================================
// Response transitions
// ============================================================================

/// What a finished page request does to the list
#[derive(Debug, Clone, PartialEq)]
pub enum PageUpdate<T> {
    /// A newer request was issued meanwhile; the list stays as it is
    Stale,
    Loaded(PageEnvelope<T>),
    Failed(String),
}

/// Sorts a finished page request by its ticket.
pub fn settle_page<T, E: Display>(
    seq: &RequestSeq,
    ticket: RequestTicket,
    result: Result<PageEnvelope<T>, E>,
) -> PageUpdate<T> {
    if !seq.is_current(ticket) {
        return PageUpdate::Stale;
    }
    match result {
        Ok(envelope) => PageUpdate::Loaded(envelope),
        Err(err) => PageUpdate::Failed(err.to_string()),
    }
}

/// Points paging and selection at a loaded page. Returns `true` when the
/// current page no longer exists and was moved to the last one; that page
/// change fetches again.
pub fn apply_loaded_page<Id: Eq + Hash + Clone>(
    page: &mut PageState,
    selection: &mut Selection<Id>,
    ids: Vec<Id>,
    total_num: u64,
) -> bool {
    selection.replace_page(ids);
    page.set_total(total_num)
}

/// Nothing stays checked once a batch delete went through. Returns `true`
/// when the selection changed.
pub fn settle_batch_delete<Id: Eq + Hash + Clone, E>(
    selection: &mut Selection<Id>,
    result: &Result<Option<DeleteResponse>, E>,
) -> bool {
    match result {
        Ok(Some(_)) if !selection.is_empty() => {
            selection.clear();
            true
        }
        _ => false,
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct ListController<R: Resource> {
    pub rows: RwSignal<Vec<R::Row>>,
    pub page: RwSignal<PageState>,
    pub params: RwSignal<SearchParams>,
    pub selection: RwSignal<Selection<EntityId>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,

    pub modal_open: RwSignal<bool>,
    pub form: RwSignal<R::Form>,
    pub form_errors: RwSignal<Vec<FieldError>>,
    pub saving: RwSignal<bool>,

    refresh: RwSignal<u64>,
    seq: StoredValue<RequestSeq>,
    client: HttpClient,
    toasts: Option<ToastService>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ListController<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for ListController<R> {}

impl<R: Resource> ListController<R> {
    /// Creates the controller and starts fetching the first page.
    pub fn new() -> Self {
        let this = Self {
            rows: RwSignal::new(Vec::new()),
            page: RwSignal::new(PageState::default()),
            params: RwSignal::new(SearchParams::new()),
            selection: RwSignal::new(Selection::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            modal_open: RwSignal::new(false),
            form: RwSignal::new(R::Form::default()),
            form_errors: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
            refresh: RwSignal::new(0),
            seq: StoredValue::new(RequestSeq::default()),
            client: HttpClient::from_context(),
            toasts: use_context::<ToastService>(),
            _resource: PhantomData,
        };

        // `total_num` lives in the same state; only page and size should refetch.
        let page = this.page;
        let query = Memo::new(move |_| page.with(|p| p.query()));

        Effect::new(move |_| {
            let query = query.get();
            let params = this.params.get();
            this.refresh.track();
            untrack(move || this.fetch(query, params));
        });

        this
    }

    fn fetch(self, query: PageQuery, params: SearchParams) {
        let mut seq = self.seq.get_value();
        let ticket = seq.next();
        self.seq.set_value(seq);

        self.loading.set(true);
        spawn_local(async move {
            let result = manage_api::fetch_page::<R, _>(&self.client, &params, query).await;

            // The page was left while the request was in flight.
            let Some(seq) = self.seq.try_with_value(|s| *s) else {
                return;
            };
            match settle_page(&seq, ticket, result) {
                PageUpdate::Stale => {
                    log::debug!("{}: dropped stale page response", R::full_name());
                }
                PageUpdate::Loaded(envelope) => {
                    self.loading.set(false);
                    self.apply_page(envelope);
                }
                PageUpdate::Failed(message) => {
                    self.loading.set(false);
                    self.error.set(Some(message));
                }
            }
        });
    }

    fn apply_page(&self, envelope: PageEnvelope<R::Row>) {
        let ids: Vec<EntityId> = envelope.data.iter().map(R::row_id).collect();
        self.rows.set(envelope.data);
        self.error.set(None);

        let mut state = self.page.get_untracked();
        let mut selection = self.selection.get_untracked();
        let clamped = apply_loaded_page(&mut state, &mut selection, ids, envelope.total_num);
        self.selection.set(selection);
        self.page.set(state);
        if clamped {
            log::info!(
                "{}: page no longer exists, moved to the last one",
                R::full_name()
            );
        }
    }

    fn notify_success(&self, message: String) {
        if let Some(toasts) = self.toasts {
            toasts.success(message);
        }
    }

    // ------------------------------------------------------------------------
    // Search and paging
    // ------------------------------------------------------------------------

    pub fn refetch(&self) {
        self.refresh.update(|n| *n += 1);
    }

    /// Updates one filter; a real change goes back to page 1.
    pub fn handle_search_change(&self, key: &str, value: Option<String>) {
        let key = key.to_string();
        let mut changed = false;
        self.params.maybe_update(|p| {
            changed = p.set(key, value);
            changed
        });
        if changed {
            self.page.update(|p| p.reset());
        }
    }

    pub fn reset_filters(&self) {
        let mut changed = false;
        self.params.maybe_update(|p| {
            changed = !p.is_empty();
            p.clear();
            changed
        });
        if changed {
            self.page.update(|p| p.reset());
        }
    }

    pub fn handle_page_change(&self, page: u64) {
        self.page.maybe_update(|p| p.go_to(page));
    }

    pub fn handle_page_size_change(&self, page_size: u64) {
        self.page.maybe_update(|p| p.set_page_size(page_size));
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn toggle_row(&self, id: EntityId, checked: bool) {
        self.selection.update(|s| s.toggle(&id, checked));
    }

    pub fn toggle_all(&self, checked: bool) {
        self.selection.update(|s| s.toggle_all(checked));
    }

    pub fn select_all(&self) -> Signal<bool> {
        let selection = self.selection;
        Signal::derive(move || selection.with(|s| s.select_all()))
    }

    pub fn selected_count(&self) -> Signal<usize> {
        let selection = self.selection;
        Signal::derive(move || selection.with(|s| s.len()))
    }

    // ------------------------------------------------------------------------
    // Modal
    // ------------------------------------------------------------------------

    pub fn open_create(&self) {
        self.form.set(R::Form::default());
        self.form_errors.set(Vec::new());
        self.modal_open.set(true);
    }

    pub fn open_update(&self, row: &R::Row) {
        self.form.set(R::form_from_row(row));
        self.form_errors.set(Vec::new());
        self.modal_open.set(true);
    }

    pub fn close_modal(&self) {
        self.modal_open.set(false);
        self.form_errors.set(Vec::new());
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|f| R::form_id(f).is_some()))
    }

    pub fn field_error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.form_errors;
        Signal::derive(move || errors.with(|e| message_for(e, field).map(String::from)))
    }

    /// Validates locally, then sends create or update. On success the modal
    /// closes and the current page is fetched again.
    pub fn submit(&self) {
        if self.saving.get_untracked() {
            return;
        }
        let form = self.form.get_untracked();
        if let Err(errors) = form.validate() {
            self.form_errors.set(errors);
            return;
        }

        let this = *self;
        self.saving.set(true);
        spawn_local(async move {
            let result = manage_api::submit_form::<R, _>(&this.client, &form).await;
            this.saving.set(false);
            match result {
                Ok(row) => {
                    this.form_errors.set(Vec::new());
                    this.modal_open.set(false);
                    this.notify_success(format!(
                        "{} \"{}\" saved",
                        R::element_name(),
                        R::row_label(&row)
                    ));
                    this.refetch();
                }
                Err(err) => {
                    log::warn!("{}: submit rejected: {}", R::full_name(), err);
                    this.form_errors.set(err.field_errors().to_vec());
                }
            }
        });
    }

    // ------------------------------------------------------------------------
    // Row mutations
    // ------------------------------------------------------------------------

    pub fn handle_status_change(&self, id: EntityId, status: Status) {
        let this = *self;
        spawn_local(async move {
            if manage_api::change_status::<R, _>(&this.client, id, status)
                .await
                .is_ok()
            {
                this.notify_success(format!("{} #{}: {}", R::element_name(), id, status.label()));
                this.refetch();
            }
        });
    }

    pub fn handle_delete_click(&self, row: &R::Row) {
        let id = R::row_id(row);
        let label = R::row_label(row);
        if !confirm(&format!("Delete {} \"{}\"?", R::element_name(), label)) {
            return;
        }

        let this = *self;
        spawn_local(async move {
            if manage_api::remove::<R, _>(&this.client, id).await.is_ok() {
                this.notify_success(format!("{} \"{}\" deleted", R::element_name(), label));
                this.refetch();
            }
        });
    }

    pub fn handle_batch_delete(&self) {
        let ids = self.selection.with_untracked(|s| s.checked_ids());
        if ids.is_empty() {
            return;
        }
        if !confirm(&format!("Delete selected records? Count: {}", ids.len())) {
            return;
        }

        let this = *self;
        spawn_local(async move {
            let result =
                manage_api::delete_batch::<R, _, _>(&this.client, &ids, move || this.refetch())
                    .await;
            this.selection
                .maybe_update(|s| settle_batch_delete(s, &result));
            if let Ok(Some(response)) = result {
                this.notify_success(format!("Deleted: {}", response.deleted));
            }
        });
    }
}

/// Browser confirm dialog; `false` when no window is available
fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let mut seq = RequestSeq::default();
        let first = seq.next();
        assert!(seq.is_current(first));

        let second = seq.next();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_ne!(first, second);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut seq = RequestSeq::default();
        let old = seq.next();
        let latest = seq.next();

        let update = settle_page::<u32, String>(&seq, old, Ok(PageEnvelope::new(vec![1, 2], 2)));
        assert_eq!(update, PageUpdate::Stale);

        let update = settle_page::<u32, String>(&seq, old, Err("timeout".to_string()));
        assert_eq!(update, PageUpdate::Stale, "a stale failure does not show an error");

        let update = settle_page::<u32, String>(&seq, latest, Ok(PageEnvelope::new(vec![3], 1)));
        assert_eq!(update, PageUpdate::Loaded(PageEnvelope::new(vec![3], 1)));

        let update = settle_page::<u32, String>(&seq, latest, Err("timeout".to_string()));
        assert_eq!(update, PageUpdate::Failed("timeout".to_string()));
    }

    #[test]
    fn shrinking_total_moves_to_the_last_page() {
        let mut page = PageState::default();
        let mut selection = Selection::new();
        page.set_total(45);
        assert!(page.go_to(5));

        // Rows were deleted elsewhere: page 5 of 10 is gone.
        let clamped = apply_loaded_page(&mut page, &mut selection, Vec::<EntityId>::new(), 23);
        assert!(clamped);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_num, 23);

        let clamped = apply_loaded_page(&mut page, &mut selection, vec![21, 22, 23], 23);
        assert!(!clamped);
        assert_eq!(page.current_page, 3);
    }

    #[test]
    fn loaded_page_replaces_the_selection() {
        let mut page = PageState::default();
        let mut selection = Selection::new();
        apply_loaded_page(&mut page, &mut selection, vec![1, 2, 3], 3);
        selection.toggle(&2, true);

        apply_loaded_page(&mut page, &mut selection, vec![4, 5], 5);
        assert!(selection.is_empty());
        selection.toggle(&2, true);
        assert!(selection.is_empty(), "id 2 is no longer on the page");
    }

    #[test]
    fn selection_is_cleared_after_a_batch_delete() {
        let mut selection = Selection::new();
        selection.replace_page(vec![1, 2, 3]);
        selection.toggle(&1, true);
        selection.toggle(&3, true);

        let failed: Result<Option<DeleteResponse>, String> = Err("Database error".to_string());
        assert!(!settle_batch_delete(&mut selection, &failed));
        assert_eq!(selection.len(), 2, "a failed delete keeps the selection");

        let done: Result<Option<DeleteResponse>, String> = Ok(Some(DeleteResponse { deleted: 2 }));
        assert!(settle_batch_delete(&mut selection, &done));
        assert!(selection.is_empty());
        assert!(!settle_batch_delete(&mut selection, &done));
    }
}
