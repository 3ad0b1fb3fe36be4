// Data-view engine
//
// Everything the table needs to turn one fetched collection into pages:
// - fetcher: one-shot fetch per endpoint, loading/error/data state
// - paginate: pure page slicing
// - filter: title search
// - edit: single-record edit session
// - view: TableModel, the owner of all of the above, and its snapshots

pub mod edit;
pub mod fetcher;
pub mod filter;
pub mod paginate;
pub mod view;

pub use edit::{DraftPatch, EditError};
pub use fetcher::{
    spawn_fetch, FetchError, FetchState, FetchTicket, HttpSource, PendingFetch, RecordFetcher,
    RecordSource,
};
pub use view::{TableAction, TableModel, ViewSnapshot};
