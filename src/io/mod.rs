//! Input/output helpers.
//!
//! - CSV ingest + schema validation (`ingest`)
//! - adjusted-table CSV export (`export`)
//! - table JSON read/write (`table`)

pub mod export;
pub mod ingest;
pub mod table;

pub use export::*;
pub use ingest::*;
pub use table::*;
