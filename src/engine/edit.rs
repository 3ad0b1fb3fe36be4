//! Single-record edit session
//!
//! At most one record is in edit mode. Starting a new edit throws the
//! previous draft away without saving it. Commit and cancel are the only
//! ways out of editing.

use crate::model::{Record, RecordId};
use std::fmt;

/// Scratch copy of the editable fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

/// Partial draft update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl DraftPatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            body: None,
        }
    }

    pub fn body(value: impl Into<String>) -> Self {
        Self {
            title: None,
            body: Some(value.into()),
        }
    }
}

/// Which draft field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Title,
    Body,
    Both,
}

/// Errors from edit session transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// No record is in edit mode
    NotEditing,
    /// Commit asked for a record other than the one being edited
    WrongRecord { editing: RecordId, requested: RecordId },
    /// Title or body is blank after trimming
    Validation(MissingField),
    /// The edited record is no longer in the collection
    RecordNotFound(RecordId),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEditing => write!(f, "No record is being edited"),
            Self::WrongRecord { editing, requested } => write!(
                f,
                "Record {} is being edited, cannot commit record {}",
                editing, requested
            ),
            Self::Validation(MissingField::Title) => write!(f, "Title cannot be empty"),
            Self::Validation(MissingField::Body) => write!(f, "Body cannot be empty"),
            Self::Validation(MissingField::Both) => {
                write!(f, "Title and body cannot be empty")
            }
            Self::RecordNotFound(id) => write!(f, "Record {} no longer exists", id),
        }
    }
}

impl std::error::Error for EditError {}

/// Check a draft before it is written back
pub fn validate(draft: &Draft) -> Result<(), EditError> {
    let title_blank = draft.title.trim().is_empty();
    let body_blank = draft.body.trim().is_empty();
    match (title_blank, body_blank) {
        (false, false) => Ok(()),
        (true, false) => Err(EditError::Validation(MissingField::Title)),
        (false, true) => Err(EditError::Validation(MissingField::Body)),
        (true, true) => Err(EditError::Validation(MissingField::Both)),
    }
}

/// Edit session state machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: RecordId, draft: Draft },
}

impl EditSession {
    /// Id of the record in edit mode
    pub fn editing_id(&self) -> Option<RecordId> {
        match self {
            Self::Idle => None,
            Self::Editing { id, .. } => Some(*id),
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Idle => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Put `record` in edit mode, seeding the draft with a copy of its fields
    ///
    /// Any draft for another record is discarded.
    pub fn start(&mut self, record: &Record) {
        if let Some(previous) = self.editing_id() {
            if previous != record.id {
                tracing::debug!("Discarding unsaved draft for record {}", previous);
            }
        }
        *self = Self::Editing {
            id: record.id,
            draft: Draft {
                title: record.title.clone(),
                body: record.body.clone(),
            },
        };
    }

    /// Apply a partial update to the draft
    pub fn update_draft(&mut self, patch: DraftPatch) -> Result<(), EditError> {
        let Self::Editing { draft, .. } = self else {
            return Err(EditError::NotEditing);
        };
        if let Some(title) = patch.title {
            draft.title = title;
        }
        if let Some(body) = patch.body {
            draft.body = body;
        }
        Ok(())
    }

    /// Validate the draft and write it into `records`
    ///
    /// Values are stored as typed; trimming only decides validity. On a
    /// validation failure the session keeps editing.
    pub fn commit(&mut self, id: RecordId, records: &mut [Record]) -> Result<(), EditError> {
        let Self::Editing {
            id: editing,
            draft,
        } = self
        else {
            return Err(EditError::NotEditing);
        };
        if *editing != id {
            return Err(EditError::WrongRecord {
                editing: *editing,
                requested: id,
            });
        }
        validate(draft)?;

        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            *self = Self::Idle;
            return Err(EditError::RecordNotFound(id));
        };
        record.title = draft.title.clone();
        record.body = draft.body.clone();

        *self = Self::Idle;
        Ok(())
    }

    /// Leave edit mode without touching the collection
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Vec<Record> {
        vec![
            Record::new(5, "A", "B"),
            Record::new(7, "seven", "lucky"),
            Record::new(9, "nine", "lives"),
        ]
    }

    #[test]
    fn test_start_copies_fields() {
        let records = collection();
        let mut session = EditSession::default();
        session.start(&records[0]);
        assert_eq!(session.editing_id(), Some(5));
        assert_eq!(
            session.draft(),
            Some(&Draft {
                title: "A".into(),
                body: "B".into()
            })
        );

        // Typing into the draft leaves the record alone
        session.update_draft(DraftPatch::title("changed")).unwrap();
        assert_eq!(records[0].title, "A");
    }

    #[test]
    fn test_empty_title_commit_is_rejected() {
        let mut records = collection();
        let before = records.clone();
        let mut session = EditSession::default();
        session.start(&records[0]);
        session.update_draft(DraftPatch::title("")).unwrap();

        let err = session.commit(5, &mut records).unwrap_err();
        assert_eq!(err, EditError::Validation(MissingField::Title));
        assert_eq!(records, before);
        assert_eq!(session.editing_id(), Some(5));
    }

    #[test]
    fn test_whitespace_only_fields_are_rejected() {
        let mut records = collection();
        let mut session = EditSession::default();
        session.start(&records[1]);
        session
            .update_draft(DraftPatch {
                title: Some("   ".into()),
                body: Some("\t\n".into()),
            })
            .unwrap();
        assert_eq!(
            session.commit(7, &mut records),
            Err(EditError::Validation(MissingField::Both))
        );
        assert!(session.is_editing());
    }

    #[test]
    fn test_cancel_leaves_record_unchanged() {
        let mut records = collection();
        let mut session = EditSession::default();
        session.start(&records[1]);
        session.update_draft(DraftPatch::title("draft title")).unwrap();
        session.update_draft(DraftPatch::body("draft body")).unwrap();
        session.cancel();

        assert_eq!(session, EditSession::Idle);
        assert!(session.draft().is_none());
        assert_eq!(records[1], Record::new(7, "seven", "lucky"));
        // Nothing left to commit
        assert_eq!(session.commit(7, &mut records), Err(EditError::NotEditing));
    }

    #[test]
    fn test_commit_stores_untrimmed_values() {
        let mut records = collection();
        let mut session = EditSession::default();
        session.start(&records[2]);
        session
            .update_draft(DraftPatch {
                title: Some("  padded  ".into()),
                body: Some("body ".into()),
            })
            .unwrap();
        session.commit(9, &mut records).unwrap();

        assert_eq!(records[2], Record::new(9, "  padded  ", "body "));
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn test_commit_same_draft_twice_is_idempotent() {
        let mut once = collection();
        let mut twice = collection();
        let patch = DraftPatch {
            title: Some("new".into()),
            body: Some("text".into()),
        };

        let mut session = EditSession::default();
        session.start(&once[0]);
        session.update_draft(patch.clone()).unwrap();
        session.commit(5, &mut once).unwrap();

        for _ in 0..2 {
            let current = twice[0].clone();
            session.start(&current);
            session.update_draft(patch.clone()).unwrap();
            session.commit(5, &mut twice).unwrap();
        }
        assert_eq!(once, twice);
    }

    #[test]
    fn test_last_start_wins() {
        let mut records = collection();
        let mut session = EditSession::default();
        session.start(&records[0]);
        session.update_draft(DraftPatch::title("lost")).unwrap();
        session.start(&records[1]);

        assert_eq!(session.editing_id(), Some(7));
        assert_eq!(session.draft().map(|d| d.title.as_str()), Some("seven"));
        assert_eq!(
            session.commit(5, &mut records),
            Err(EditError::WrongRecord {
                editing: 7,
                requested: 5
            })
        );
        assert_eq!(records[0].title, "A");
    }

    #[test]
    fn test_update_while_idle_is_guarded() {
        let mut session = EditSession::default();
        assert_eq!(
            session.update_draft(DraftPatch::title("x")),
            Err(EditError::NotEditing)
        );
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn test_commit_for_vanished_record() {
        let mut records = collection();
        let mut session = EditSession::default();
        session.start(&records[0]);
        records.remove(0);
        assert_eq!(
            session.commit(5, &mut records),
            Err(EditError::RecordNotFound(5))
        );
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn test_at_most_one_editing_id() {
        let mut records = collection();
        let mut session = EditSession::default();
        let ids = [5, 7, 9];
        for step in 0..30usize {
            let record = records[step % 3].clone();
            match step % 4 {
                0 | 1 => session.start(&record),
                2 => session.cancel(),
                _ => {
                    if let Some(id) = session.editing_id() {
                        session.commit(id, &mut records).unwrap();
                    }
                }
            }
            // The enum has room for a single id only; check it is a real one
            if let Some(id) = session.editing_id() {
                assert!(ids.contains(&id));
                assert!(session.draft().is_some());
            } else {
                assert!(session.draft().is_none());
            }
        }
    }
}
