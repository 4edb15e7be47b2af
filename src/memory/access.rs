// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader, RegionInfo};

pub const MEMORY_LOG: &str = "memory";

/// Check that `[addr, addr + len)` is committed, readable and inside one region.
pub fn check_readable<R: MemoryReader + ?Sized>(
    reader: &R,
    addr: Address,
    len: usize,
) -> Result<RegionInfo, MemoryError> {
    if addr.is_null() {
        return Err(MemoryError::NullAddress);
    }
    if len == 0 {
        return Err(MemoryError::EmptyRead(addr));
    }
    if addr.checked_add(len).is_none() {
        return Err(MemoryError::Overflow { address: addr, len });
    }

    let region = reader.query_region(addr)?;
    if !region.is_committed() {
        return Err(MemoryError::NotCommitted(addr));
    }
    if !region.protection().is_readable() {
        return Err(MemoryError::NotReadable {
            address: addr,
            protection: region.protection().to_string(),
        });
    }
    if !region.contains_span(addr, len) {
        return Err(MemoryError::SpanCrossesRegion { address: addr, len });
    }

    Ok(region)
}

/// Safe read: validate the span immediately before copying, never return a
/// partial buffer. Region validity is never cached between calls.
pub fn try_read<R: MemoryReader + ?Sized>(
    reader: &R,
    addr: Address,
    len: usize,
) -> Result<Vec<u8>, MemoryError> {
    if let Err(e) = check_readable(reader, addr, len) {
        log::debug!(target: MEMORY_LOG, "[-] Invalid memory region at {} ({} bytes): {}", addr, len, e);
        return Err(e);
    }

    let mut buffer = vec![0u8; len];
    if let Err(e) = reader.copy_into(addr, &mut buffer) {
        log::debug!(target: MEMORY_LOG, "[-] Exception while reading memory at {}: {}", addr, e);
        return Err(e);
    }

    Ok(buffer)
}

/// Best-effort read of up to `len` bytes: the whole span if possible, otherwise
/// the readable prefix that lies in the region containing `addr`. The region
/// is queried once and the copy is sized from that answer.
pub fn read_prefix<R: MemoryReader + ?Sized>(reader: &R, addr: Address, len: usize) -> Option<Vec<u8>> {
    if addr.is_null() || len == 0 {
        return None;
    }

    let region = reader.query_region(addr).ok()?;
    if !region.is_committed() || !region.protection().is_readable() {
        return None;
    }
    let available = region.remaining_from(addr).min(len as u64) as usize;
    if available == 0 {
        return None;
    }

    let mut buffer = vec![0u8; available];
    if let Err(e) = reader.copy_into(addr, &mut buffer) {
        log::debug!(target: MEMORY_LOG, "[-] Exception while reading memory at {}: {}", addr, e);
        return None;
    }
    Some(buffer)
}

/// Little-endian integer from up to 8 bytes.
pub fn raw_value(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Protection, SnapshotMemory};
    use std::cell::Cell;

    struct CountingReader {
        inner: SnapshotMemory,
        queries: Cell<usize>,
    }

    impl MemoryReader for CountingReader {
        fn query_region(&self, addr: Address) -> Result<RegionInfo, MemoryError> {
            self.queries.set(self.queries.get() + 1);
            self.inner.query_region(addr)
        }

        fn copy_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
            self.inner.copy_into(addr, buf)
        }
    }

    fn snapshot() -> SnapshotMemory {
        let mut mem = SnapshotMemory::new();
        mem.add_region(Address::new(0x1000), vec![0xAA; 16], Protection::Read);
        mem.add_region(Address::new(0x2000), vec![0xBB; 16], Protection::NoAccess);
        mem.add_reserved(Address::new(0x3000), 16);
        mem
    }

    #[test]
    fn test_try_read_ok() {
        let mem = snapshot();
        let bytes = try_read(&mem, Address::new(0x1004), 8).unwrap();
        assert_eq!(bytes, vec![0xAA; 8]);
    }

    #[test]
    fn test_try_read_rejects_bad_spans() {
        let mem = snapshot();
        assert!(matches!(try_read(&mem, Address::null(), 4), Err(MemoryError::NullAddress)));
        assert!(matches!(try_read(&mem, Address::new(0x1000), 0), Err(MemoryError::EmptyRead(_))));
        assert!(matches!(
            try_read(&mem, Address::new(0x100c), 8),
            Err(MemoryError::SpanCrossesRegion { .. })
        ));
        assert!(matches!(
            try_read(&mem, Address::new(0x2000), 4),
            Err(MemoryError::NotReadable { .. })
        ));
        assert!(matches!(try_read(&mem, Address::new(0x3000), 4), Err(MemoryError::NotCommitted(_))));
        assert!(matches!(try_read(&mem, Address::new(0x5000), 4), Err(MemoryError::RegionNotFound(_))));
    }

    #[test]
    fn test_read_prefix() {
        let mem = snapshot();
        let bytes = read_prefix(&mem, Address::new(0x100d), 4).unwrap();
        assert_eq!(bytes.len(), 3);
        assert!(read_prefix(&mem, Address::new(0x2000), 4).is_none());
        assert!(read_prefix(&mem, Address::new(0x5000), 4).is_none());
        assert_eq!(read_prefix(&mem, Address::new(0x1000), 16).unwrap(), vec![0xAA; 16]);
        assert!(read_prefix(&mem, Address::null(), 4).is_none());
    }

    #[test]
    fn test_one_region_query_per_read() {
        let reader = CountingReader {
            inner: snapshot(),
            queries: Cell::new(0),
        };

        try_read(&reader, Address::new(0x1000), 8).unwrap();
        assert_eq!(reader.queries.get(), 1);

        assert_eq!(read_prefix(&reader, Address::new(0x1000), 16).unwrap().len(), 16);
        assert_eq!(reader.queries.get(), 2);

        assert_eq!(read_prefix(&reader, Address::new(0x100d), 8).unwrap().len(), 3);
        assert_eq!(reader.queries.get(), 3);

        assert!(read_prefix(&reader, Address::new(0x2000), 4).is_none());
        assert_eq!(reader.queries.get(), 4);
    }

    #[test]
    fn test_raw_value() {
        assert_eq!(raw_value(&[0x40, 0x01, 0, 0]), 0x140);
        assert_eq!(raw_value(&[1, 2, 3]), 0x030201);
        assert_eq!(raw_value(&[0xFF; 12]), u64::MAX);
    }
}
