//! Rate-table loading, import and validation for the salary calculator.
//!
//! The calculator itself treats its [`vero_core::RateTable`] as an opaque
//! immutable input; everything here sits at the data boundary in front of
//! it: parsing the JSON rate-table artifact, importing the scraped CSV
//! data it is consolidated from, and validating the result.

pub mod builder;
pub mod import;
pub mod loader;
pub mod verify;

pub use builder::RateTableBuilder;
pub use import::{BracketRecord, MunicipalRateRecord};
pub use loader::{LoadError, RateTableLoader};
pub use verify::{ValidationError, validate};
