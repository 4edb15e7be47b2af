// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Null address")]
    NullAddress,
    #[error("Zero-length read at {0}")]
    EmptyRead(Address),
    #[error("No region contains address {0}")]
    RegionNotFound(Address),
    #[error("Region at {0} is not committed")]
    NotCommitted(Address),
    #[error("Region at {address} is not readable ({protection})")]
    NotReadable { address: Address, protection: String },
    #[error("Span {address} + {len} crosses the end of its region")]
    SpanCrossesRegion { address: Address, len: usize },
    #[error("Address overflow: {address} + {len}")]
    Overflow { address: Address, len: usize },
    #[error("Read failed at {0}")]
    ReadFailed(Address),
    #[error("Not supported: {0}")]
    NotSupported(String),
}
