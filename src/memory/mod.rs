// Tue Jan 13 2026 - Alex

pub mod access;
pub mod address;
pub mod error;
pub mod local;
pub mod protection;
pub mod region;
pub mod snapshot;
pub mod traits;

pub use access::{check_readable, raw_value, read_prefix, try_read, MEMORY_LOG};
pub use address::Address;
pub use error::MemoryError;
pub use local::LocalMemory;
pub use protection::Protection;
pub use region::{RegionInfo, RegionState};
pub use snapshot::SnapshotMemory;
pub use traits::MemoryReader;
