// Record model shared by the fetcher, the table engine and the exporter
//
// A record is one editable table row. The upstream payload carries more
// fields than we show (userId on the default endpoint), serde drops them.

use serde::{Deserialize, Serialize};

/// Stable record identity
pub type RecordId = i64;

/// A single table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub body: String,
}

impl Record {
    pub fn new(id: RecordId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Column names in export order
pub const COLUMNS: [&str; 3] = ["id", "title", "body"];
