//! On-disk state for PassWeaver.
//!
//! - [`JsonSessionStore`] keeps every session record in one JSON array and
//!   replaces it atomically on save.
//! - [`RunArtifact`] streams one run's candidates to a temp file and renames
//!   it into place only when the run finished.
//!
//! ```text
//! <data-dir>/
//!   sessions.json
//!   output/
//!     temp_<id>_run<N>.txt            (while a run is active)
//!     <written>_passwords_<id>_run<N>.txt
//! ```

mod error;
mod output;
mod store;

pub use error::{PersistenceError, Result};
pub use output::{
    OUTPUT_DIR_NAME, PublishedArtifact, RunArtifact, default_file_name, final_file_name,
    next_run_index,
};
pub use store::{
    JsonSessionStore, MemorySessionStore, SESSIONS_FILE_NAME, SessionStore, select_session,
    sessions_by_recency,
};
