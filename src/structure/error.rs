// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("Unknown structure: {0}")]
    UnknownStructure(String),
    #[error("Field not found: {structure}.{field}")]
    FieldNotFound { structure: &'static str, field: String },
    #[error("{structure}.{field} spans [{offset}, {end}) outside a {total_size}-byte structure")]
    FieldOutOfBounds {
        structure: &'static str,
        field: &'static str,
        offset: usize,
        end: usize,
        total_size: usize,
    },
    #[error("{structure}.{first} overlaps {structure}.{second}")]
    OverlappingFields {
        structure: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("{0} has no fields")]
    NoFields(&'static str),
    #[error("Null address for {0}")]
    NullAddress(&'static str),
    #[error("Failed to read {structure} at {address}: {source}")]
    Unreadable {
        structure: &'static str,
        address: Address,
        #[source]
        source: MemoryError,
    },
}
