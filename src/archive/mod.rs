//! Export archive for saved results
//!
//! This module handles:
//! - The fixed category directory layout under the archive root
//! - Saving content with collision-free naming and optional metadata
//! - Listing, searching, reading back, and deleting exports

mod category;
pub mod naming;
mod record;
mod store;

pub use category::ExportCategory;
pub use naming::default_filename;
pub use record::{ContentType, ExportContent, ExportMetadata, ExportRecord};
pub use store::{DeleteOutcome, ExportArchive, INLINE_METADATA_KEY};
