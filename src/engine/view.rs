//! Table model and view composition
//!
//! `TableModel` is the single owner of the authoritative collection, the
//! edit session and the view state (search term, current page). Every
//! frame asks it for a [`ViewSnapshot`]; nothing derived is stored.
//!
//! ```text
//! records ──► filter_by_title(term) ──► paginate(page) ──► ViewSnapshot
//!    ▲                                                          │
//!    └──────────────── EditSession::commit ◄────────────────────┘
//! ```

use super::edit::{DraftPatch, EditError, EditSession};
use super::filter::{filter_by_title, is_filtering};
use super::paginate::{clamp_page, paginate, total_pages};
use crate::model::{Record, RecordId};
use std::collections::HashSet;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Render-driving state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
        }
    }
}

impl ViewState {
    pub fn is_filtering(&self) -> bool {
        is_filtering(&self.search_term)
    }
}

/// What the consumer should currently see
#[derive(Debug, Clone)]
pub struct ViewSnapshot<'a> {
    pub visible_records: Vec<&'a Record>,
    pub total_pages: usize,
    pub current_page: usize,
    pub is_filtering: bool,
    /// Size of the (possibly filtered) result set
    pub matching: usize,
    pub editing_id: Option<RecordId>,
}

impl ViewSnapshot<'_> {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.visible_records.is_empty()
    }
}

/// Discrete state transitions driven by the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    Load(Vec<Record>),
    SetSearchTerm(String),
    GoToPage(usize),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    StartEditing(RecordId),
    UpdateDraft(DraftPatch),
    Commit(RecordId),
    Cancel,
}

/// Authoritative collection plus edit session and view state
#[derive(Debug, Clone)]
pub struct TableModel {
    records: Vec<Record>,
    edit: EditSession,
    view: ViewState,
    page_size: usize,
}

impl TableModel {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            edit: EditSession::default(),
            view: ViewState::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[cfg(test)]
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Apply one transition
    pub fn dispatch(&mut self, action: TableAction) -> Result<(), EditError> {
        match action {
            TableAction::Load(records) => self.load(records),
            TableAction::SetSearchTerm(term) => self.set_search_term(term),
            TableAction::GoToPage(page) => self.go_to_page(page),
            TableAction::NextPage => self.next_page(),
            TableAction::PrevPage => self.prev_page(),
            TableAction::FirstPage => self.first_page(),
            TableAction::LastPage => self.last_page(),
            TableAction::StartEditing(id) => return self.start_editing(id),
            TableAction::UpdateDraft(patch) => return self.update_draft(patch),
            TableAction::Commit(id) => return self.commit(id),
            TableAction::Cancel => self.cancel(),
        }
        Ok(())
    }

    /// Replace the collection wholesale
    ///
    /// Duplicate ids keep their first occurrence. Any edit session is
    /// dropped since its record may be gone.
    pub fn load(&mut self, records: Vec<Record>) {
        let incoming = records.len();
        let mut seen = HashSet::with_capacity(incoming);
        let records: Vec<Record> = records
            .into_iter()
            .filter(|record| seen.insert(record.id))
            .collect();
        if records.len() != incoming {
            tracing::warn!(
                "Dropped {} record(s) with duplicate ids",
                incoming - records.len()
            );
        }

        if let Some(id) = self.edit.editing_id() {
            tracing::debug!("Collection replaced while editing record {}", id);
        }
        self.edit.cancel();
        self.records = records;
        self.reclamp();
        tracing::info!("Loaded {} records", self.records.len());
    }

    /// Change the search term; always goes back to page 1
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.search_term = term.into();
        self.view.current_page = 1;
    }

    /// Jump to `page`, clamped to the available pages
    pub fn go_to_page(&mut self, page: usize) {
        self.view.current_page = clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.view.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.view.current_page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.total_pages());
    }

    pub fn start_editing(&mut self, id: RecordId) -> Result<(), EditError> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .ok_or(EditError::RecordNotFound(id))?;
        self.edit.start(record);
        tracing::debug!("Editing record {}", id);
        Ok(())
    }

    pub fn update_draft(&mut self, patch: DraftPatch) -> Result<(), EditError> {
        self.edit.update_draft(patch)
    }

    /// Commit the draft for `id` into the collection
    ///
    /// An edit can move a record out of the filtered set, so the page is
    /// clamped again afterwards.
    pub fn commit(&mut self, id: RecordId) -> Result<(), EditError> {
        self.edit.commit(id, &mut self.records)?;
        self.reclamp();
        tracing::info!("Committed edit for record {}", id);
        Ok(())
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.edit.editing_id() {
            tracing::debug!("Cancelled edit for record {}", id);
        }
        self.edit.cancel();
    }

    /// Records in the current result set (filtered when a term is active)
    pub fn matching_records(&self) -> Vec<&Record> {
        filter_by_title(&self.records, &self.view.search_term)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.matching_records().len(), self.page_size)
    }

    /// Compose the current view
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let matching = self.matching_records();
        let total = total_pages(matching.len(), self.page_size);
        let visible_records =
            paginate(&matching, self.view.current_page, self.page_size).to_vec();

        ViewSnapshot {
            visible_records,
            total_pages: total,
            current_page: self.view.current_page,
            is_filtering: self.view.is_filtering(),
            matching: matching.len(),
            editing_id: self.edit.editing_id(),
        }
    }

    fn reclamp(&mut self) {
        self.view.current_page = clamp_page(self.view.current_page, self.total_pages());
    }
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::edit::MissingField;

    fn sequential(count: i64) -> Vec<Record> {
        (1..=count)
            .map(|id| Record::new(id, format!("title {id}"), format!("body {id}")))
            .collect()
    }

    fn visible_ids(model: &TableModel) -> Vec<i64> {
        model.snapshot().visible_records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sixteen_records_page_size_fifteen() {
        let mut model = TableModel::new(15);
        model.load(sequential(16));

        let snap = model.snapshot();
        assert_eq!(snap.total_pages, 2);
        assert_eq!(snap.current_page, 1);
        assert_eq!(visible_ids(&model), (1..=15).collect::<Vec<_>>());

        model.next_page();
        assert_eq!(visible_ids(&model), vec![16]);
        assert!(!model.snapshot().has_next());
        assert!(model.snapshot().has_prev());
    }

    #[test]
    fn test_search_resets_page() {
        let mut model = TableModel::new(1);
        model.load(vec![
            Record::new(1, "Foobar", "x"),
            Record::new(2, "baz", "y"),
            Record::new(3, "food", "z"),
        ]);
        model.go_to_page(3);
        assert_eq!(model.view_state().current_page, 3);

        model.set_search_term("foo");
        let snap = model.snapshot();
        assert_eq!(snap.current_page, 1);
        assert!(snap.is_filtering);
        assert_eq!(snap.matching, 2);
        assert_eq!(snap.total_pages, 2);
        let titles: Vec<&str> = model
            .matching_records()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Foobar", "food"]);
    }

    #[test]
    fn test_rejected_commit_keeps_editing() {
        let mut model = TableModel::default();
        model.load(vec![Record::new(5, "A", "B")]);
        model.start_editing(5).unwrap();
        model.update_draft(DraftPatch::title("")).unwrap();

        assert_eq!(
            model.commit(5),
            Err(EditError::Validation(MissingField::Title))
        );
        assert_eq!(model.records(), &[Record::new(5, "A", "B")]);
        assert_eq!(model.edit_session().editing_id(), Some(5));
        assert_eq!(model.snapshot().editing_id, Some(5));
    }

    #[test]
    fn test_cancel_restores_idle() {
        let mut model = TableModel::default();
        model.load(sequential(10));
        let original = model.record(7).cloned();
        model.start_editing(7).unwrap();
        model.update_draft(DraftPatch::body("scratch")).unwrap();
        model.cancel();

        assert!(!model.edit_session().is_editing());
        assert_eq!(model.record(7).cloned(), original);
    }

    #[test]
    fn test_empty_collection() {
        let mut model = TableModel::default();
        model.load(Vec::new());
        let snap = model.snapshot();
        assert!(snap.is_empty());
        assert_eq!(snap.total_pages, 0);
        assert!(!snap.has_prev());
        assert!(!snap.has_next());

        // Navigation on an empty set stays on page 1
        model.next_page();
        model.last_page();
        assert_eq!(model.view_state().current_page, 1);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut model = TableModel::new(10);
        model.load(sequential(35));
        model.go_to_page(99);
        assert_eq!(model.view_state().current_page, 4);
        model.next_page();
        assert_eq!(model.view_state().current_page, 4);
        model.go_to_page(0);
        assert_eq!(model.view_state().current_page, 1);
        model.prev_page();
        assert_eq!(model.view_state().current_page, 1);
        model.last_page();
        assert_eq!(visible_ids(&model), (31..=35).collect::<Vec<_>>());
    }

    #[test]
    fn test_commit_reclamps_filtered_page() {
        let mut model = TableModel::new(1);
        model.load(vec![
            Record::new(1, "match one", "a"),
            Record::new(2, "match two", "b"),
        ]);
        model.set_search_term("match");
        model.last_page();
        assert_eq!(visible_ids(&model), vec![2]);

        model.start_editing(2).unwrap();
        model.update_draft(DraftPatch::title("renamed")).unwrap();
        model.commit(2).unwrap();

        let snap = model.snapshot();
        assert_eq!(snap.total_pages, 1);
        assert_eq!(snap.current_page, 1);
        assert_eq!(visible_ids(&model), vec![1]);
        assert_eq!(model.record(2).map(|r| r.title.as_str()), Some("renamed"));
    }

    #[test]
    fn test_commit_visible_in_next_snapshot() {
        let mut model = TableModel::default();
        model.load(sequential(3));
        model.start_editing(2).unwrap();
        model.update_draft(DraftPatch::title("edited")).unwrap();
        model.commit(2).unwrap();
        let snap = model.snapshot();
        assert_eq!(snap.visible_records[1].title, "edited");
        assert_eq!(snap.editing_id, None);
    }

    #[test]
    fn test_load_replaces_and_dedupes() {
        let mut model = TableModel::default();
        model.load(sequential(5));
        model.start_editing(3).unwrap();

        model.load(vec![
            Record::new(9, "first", "x"),
            Record::new(4, "four", "y"),
            Record::new(9, "second", "z"),
        ]);
        assert_eq!(model.records().len(), 2);
        assert_eq!(model.record(9).map(|r| r.title.as_str()), Some("first"));
        assert!(!model.edit_session().is_editing());
        // Arrival order is kept
        assert_eq!(visible_ids(&model), vec![9, 4]);
    }

    #[test]
    fn test_start_editing_unknown_id() {
        let mut model = TableModel::default();
        model.load(sequential(2));
        assert_eq!(model.start_editing(42), Err(EditError::RecordNotFound(42)));
        assert!(!model.edit_session().is_editing());
    }

    #[test]
    fn test_dispatch_drives_transitions() {
        let mut model = TableModel::new(2);
        model.dispatch(TableAction::Load(sequential(5))).unwrap();
        model.dispatch(TableAction::LastPage).unwrap();
        assert_eq!(model.view_state().current_page, 3);
        model
            .dispatch(TableAction::SetSearchTerm("title".into()))
            .unwrap();
        assert_eq!(model.view_state().current_page, 1);
        model.dispatch(TableAction::StartEditing(1)).unwrap();
        model
            .dispatch(TableAction::UpdateDraft(DraftPatch::body("new body")))
            .unwrap();
        model.dispatch(TableAction::Commit(1)).unwrap();
        assert_eq!(model.record(1).map(|r| r.body.as_str()), Some("new body"));
        assert_eq!(
            model.dispatch(TableAction::Commit(1)),
            Err(EditError::NotEditing)
        );
    }

    #[test]
    fn test_blank_search_matches_unfiltered_view() {
        let mut model = TableModel::new(4);
        model.load(sequential(9));
        model.go_to_page(2);
        let unfiltered = visible_ids(&model);

        model.set_search_term("   ");
        model.go_to_page(2);
        assert!(!model.snapshot().is_filtering);
        assert_eq!(visible_ids(&model), unfiltered);
    }
}
