// Wed Jan 15 2026 - Alex

use crate::memory::{Address, MemoryError, RegionInfo};

/// Raw access to a foreign address space.
///
/// Implementations answer region queries and perform the copy itself; the
/// protection/commit precondition lives in [`crate::memory::access::try_read`],
/// which is the only way the rest of the crate reads memory.
pub trait MemoryReader {
    fn query_region(&self, addr: Address) -> Result<RegionInfo, MemoryError>;

    /// Copy `buf.len()` bytes starting at `addr`. Must fail instead of faulting.
    fn copy_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError>;

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl<R: MemoryReader + ?Sized> MemoryReader for &R {
    fn query_region(&self, addr: Address) -> Result<RegionInfo, MemoryError> {
        (**self).query_region(addr)
    }

    fn copy_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        (**self).copy_into(addr, buf)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
