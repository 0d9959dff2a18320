pub mod builder;
pub mod filename;
pub mod section;
pub mod selection;

pub use builder::{DEFAULT_TITLE_MARKER, RecordBuilder, build_record};
pub use filename::{MAX_FILENAME_LEN, paper_filename};
pub use section::{Field, FieldMap, extract_fields};
pub use selection::parse_checked_items;
// Re-export domain types from core (canonical definitions live there)
pub use intake_core::{FieldValue, PaperRecord};
