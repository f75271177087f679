//! Field mapping from heterogeneous external schemas into the canonical
//! candidate record.

pub mod error;
pub mod mapper;
pub mod path;
pub mod table;

pub use error::MappingError;
pub use mapper::map_record;
pub use path::{ExternalPath, Segment};
pub use table::{MappingEntry, MappingTable};
