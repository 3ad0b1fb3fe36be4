// App state for the TUI
//
// App is the single writer: the event loop owns it and every key, tick and
// fetch completion is one synchronous call into it. It wraps the
// TableModel and the RecordFetcher, plus the widgets that feed them
// (search box, editor fields, table selection) and the transient UI state
// (mode, modal, toast).

use super::clipboard;
use super::components::{EditField, TablePanel, TextInput, Toast};
use super::modal::Modal;
use super::traits::Interactive;
use crate::engine::{
    DraftPatch, EditError, FetchError, FetchTicket, RecordFetcher, TableAction, TableModel,
};
use crate::export::{ExportScope, ExportSink};
use crate::logging::LogBuffer;
use crate::model::Record;
use crate::theme::Theme;

/// Longest title the editor accepts
pub const TITLE_MAX_LEN: usize = 100;
/// Longest body the editor accepts
pub const BODY_MAX_LEN: usize = 255;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Who receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Table navigation and commands
    #[default]
    Normal,
    /// Typing into the search box
    Search,
    /// Typing into the editor
    Edit,
}

pub struct App {
    pub model: TableModel,
    pub fetcher: RecordFetcher,

    pub table: TablePanel,
    pub search: TextInput,
    pub title_input: TextInput,
    pub body_input: TextInput,
    pub edit_field: EditField,
    pub mode: InputMode,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub theme: Theme,
    pub log_buffer: LogBuffer,
    pub show_logs: bool,
    /// Shown next to the app name, e.g. the fetched URL
    pub source_label: String,

    exporter: Box<dyn ExportSink>,
    spinner_frame: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        page_size: usize,
        theme: Theme,
        log_buffer: LogBuffer,
        exporter: Box<dyn ExportSink>,
    ) -> Self {
        Self {
            model: TableModel::new(page_size),
            fetcher: RecordFetcher::new(),
            table: TablePanel::new(),
            search: TextInput::new(),
            title_input: TextInput::with_max_len(TITLE_MAX_LEN),
            body_input: TextInput::with_max_len(BODY_MAX_LEN),
            edit_field: EditField::Title,
            mode: InputMode::Normal,
            modal: None,
            toast: None,
            theme,
            log_buffer,
            show_logs: false,
            source_label: String::new(),
            exporter,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    // ─── Fetch ───────────────────────────────────────────────────────────

    /// Ask the fetcher for `endpoint`; a ticket means a fetch should start
    pub fn request_fetch(&mut self, endpoint: &str) -> Option<FetchTicket> {
        self.fetcher.request(endpoint)
    }

    /// Feed a fetch result back in; fresh data replaces the collection
    pub fn on_fetch_complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Record>, FetchError>,
    ) {
        if !self.fetcher.complete(ticket, result) {
            return;
        }
        match self.fetcher.state().data() {
            Some(records) => {
                let load = TableAction::Load(records.to_vec());
                if let Err(e) = self.model.dispatch(load) {
                    tracing::warn!("Load rejected: {}", e);
                }
                if self.mode == InputMode::Edit {
                    self.mode = InputMode::Normal;
                }
                self.table.reset();
                self.sync_rows();
            }
            None => {
                let message = self.fetcher.state().error().map(|e| format!("✗ {}", e));
                if let Some(message) = message {
                    self.show_error(message);
                }
            }
        }
    }

    // ─── Animation / toasts ──────────────────────────────────────────────

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame]
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }

    // ─── Table ───────────────────────────────────────────────────────────

    /// Keep the table selection inside the visible page
    pub fn sync_rows(&mut self) {
        let rows = self.model.snapshot().visible_records.len();
        self.table.set_row_count(rows);
    }

    /// The highlighted record on the current page
    pub fn selected_record(&self) -> Option<&Record> {
        self.model
            .snapshot()
            .visible_records
            .get(self.table.selected())
            .copied()
    }

    /// Run a page transition and put the selection back on the first row
    pub fn navigate(&mut self, action: TableAction) {
        let before = self.model.view_state().current_page;
        if let Err(e) = self.model.dispatch(action) {
            tracing::warn!("Navigation rejected: {}", e);
        }
        if self.model.view_state().current_page != before {
            self.table.reset();
        }
        self.sync_rows();
    }

    // ─── Search ──────────────────────────────────────────────────────────

    /// Push the search box contents into the model when they changed
    pub fn apply_search(&mut self) {
        if self.search.value() == self.model.view_state().search_term {
            return;
        }
        let term = self.search.value().to_string();
        tracing::debug!("Search term: {:?}", term);
        if let Err(e) = self.model.dispatch(TableAction::SetSearchTerm(term)) {
            tracing::warn!("Search rejected: {}", e);
        }
        self.table.reset();
        self.sync_rows();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.apply_search();
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Open the editor on the selected row
    pub fn start_edit(&mut self) {
        let Some(id) = self.selected_record().map(|r| r.id) else {
            return;
        };
        if let Err(e) = self.model.dispatch(TableAction::StartEditing(id)) {
            self.show_error(format!("✗ {}", e));
            return;
        }
        if let Some(draft) = self.model.edit_session().draft() {
            self.title_input.set_value(draft.title.clone());
            self.body_input.set_value(draft.body.clone());
        }
        self.edit_field = EditField::Title;
        self.mode = InputMode::Edit;
    }

    /// The editor input that has focus
    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.edit_field {
            EditField::Title => &mut self.title_input,
            EditField::Body => &mut self.body_input,
        }
    }

    /// Copy the focused input into the draft
    pub fn sync_draft(&mut self) {
        let patch = match self.edit_field {
            EditField::Title => DraftPatch::title(self.title_input.value()),
            EditField::Body => DraftPatch::body(self.body_input.value()),
        };
        if let Err(e) = self.model.dispatch(TableAction::UpdateDraft(patch)) {
            tracing::warn!("Draft update rejected: {}", e);
        }
    }

    /// Write the draft back, or explain why not
    pub fn commit_edit(&mut self) {
        let Some(id) = self.model.edit_session().editing_id() else {
            self.mode = InputMode::Normal;
            return;
        };

        match self.model.dispatch(TableAction::Commit(id)) {
            Ok(()) => {
                self.sync_rows();
                self.show_toast(format!("✓ Saved record {}", id));
            }
            Err(e @ EditError::Validation(_)) => {
                tracing::warn!("Rejected edit for record {}: {}", id, e);
                self.show_error(format!("✗ {}", e));
            }
            Err(e) => {
                tracing::error!("Commit for record {} failed: {}", id, e);
                self.show_error(format!("✗ {}", e));
            }
        }

        if !self.model.edit_session().is_editing() {
            self.mode = InputMode::Normal;
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Err(e) = self.model.dispatch(TableAction::Cancel) {
            tracing::warn!("Cancel rejected: {}", e);
        }
        self.mode = InputMode::Normal;
    }

    // ─── Export / clipboard ──────────────────────────────────────────────

    pub fn open_export_menu(&mut self) {
        self.modal = Some(Modal::export());
    }

    /// Hand one of the two record sets to the export sink
    pub fn export(&mut self, scope: ExportScope) {
        let outcome = {
            let records: Vec<&Record> = match scope {
                ExportScope::CurrentPage => self.model.snapshot().visible_records,
                ExportScope::AllRecords => self.model.records().iter().collect(),
            };
            self.exporter
                .export(&records, scope.filename())
                .map(|path| (path, records.len()))
        };

        match outcome {
            Ok((path, count)) => {
                self.show_toast(format!("✓ Exported {} rows to {}", count, path.display()));
            }
            Err(e) => {
                tracing::error!("Export of {} failed: {}", scope.filename(), e);
                self.show_error(format!("✗ Export failed: {}", e));
            }
        }
    }

    /// The selected record as pretty JSON
    pub fn selected_json(&self) -> Option<String> {
        let record = self.selected_record()?;
        serde_json::to_string_pretty(record).ok()
    }

    pub fn copy_selected(&mut self) {
        let Some(json) = self.selected_json() else {
            return;
        };
        match clipboard::copy_to_clipboard(&json) {
            Ok(()) => self.show_toast("✓ Copied to clipboard"),
            Err(e) => {
                tracing::error!("Clipboard copy failed: {:#}", e);
                self.show_error("✗ Failed to copy");
            }
        }
    }

    // ─── Status ──────────────────────────────────────────────────────────

    /// Key hints for the status bar
    pub fn focus_hint(&self) -> String {
        match self.mode {
            InputMode::Normal => format!(
                "{}  ←→:page  /:search  x:export  y:copy  ?:help  q:quit",
                self.table.focus_hint().unwrap_or_default()
            ),
            InputMode::Search => format!(
                "{}  Enter:keep  Esc:clear",
                self.search.focus_hint().unwrap_or_default()
            ),
            InputMode::Edit => "Tab:field  Enter:save  Esc:cancel".to_string(),
        }
    }
}
