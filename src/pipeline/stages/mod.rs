//! The four pipeline stages
//!
//! Each stage takes its collaborators explicitly and communicates with the
//! others only through side effects: files in the scratch directory and
//! documents in the store.

pub mod archive;
pub mod extract;
pub mod load;
pub mod transform;

pub use archive::{archive, ArchiveFailure, ArchiveItem, ArchiveReport};
pub use extract::{extract, ExtractReport, ExtractedFile};
pub use load::{load, LoadError, LoadOutcome, LoadReport, LoadedFile};
pub use transform::{transform, TransformError, TransformOutcome};
