// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader, RegionInfo};

/// The address space of the current process. Reads go through the OS so a
/// bad page is reported as an error instead of faulting.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMemory;

impl LocalMemory {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
mod platform {
    use super::*;
    use crate::memory::{Protection, RegionState};
    use std::ffi::c_void;
    use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
    use windows::Win32::System::Memory::{
        VirtualQuery, MEMORY_BASIC_INFORMATION, MEM_COMMIT, MEM_RESERVE,
    };
    use windows::Win32::System::Threading::GetCurrentProcess;

    pub fn query(addr: Address) -> Result<RegionInfo, MemoryError> {
        let ptr = addr.as_usize().ok_or(MemoryError::RegionNotFound(addr))? as *const c_void;
        let mut mbi: MEMORY_BASIC_INFORMATION = unsafe { std::mem::zeroed() };
        let written = unsafe {
            VirtualQuery(
                Some(ptr),
                &mut mbi,
                std::mem::size_of::<MEMORY_BASIC_INFORMATION>(),
            )
        };
        if written == 0 {
            return Err(MemoryError::RegionNotFound(addr));
        }

        let state = if mbi.State == MEM_COMMIT {
            RegionState::Committed
        } else if mbi.State == MEM_RESERVE {
            RegionState::Reserved
        } else {
            RegionState::Free
        };

        Ok(RegionInfo::new(
            Address::new(mbi.BaseAddress as usize as u64),
            mbi.RegionSize as u64,
            state,
            Protection::from_page_flags(mbi.Protect.0),
        ))
    }

    pub fn copy(addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        let ptr = addr.as_usize().ok_or(MemoryError::ReadFailed(addr))? as *const c_void;
        let mut bytes_read = 0usize;
        let result = unsafe {
            ReadProcessMemory(
                GetCurrentProcess(),
                ptr,
                buf.as_mut_ptr() as *mut c_void,
                buf.len(),
                Some(&mut bytes_read),
            )
        };
        if result.is_err() || bytes_read != buf.len() {
            return Err(MemoryError::ReadFailed(addr));
        }
        Ok(())
    }
}

#[cfg(target_os = "linux")]
mod platform {
    use super::*;
    use crate::memory::{Protection, RegionState};
    use std::fs;

    fn parse_maps_line(line: &str) -> Option<(u64, u64, Protection)> {
        let mut parts = line.split_whitespace();
        let range = parts.next()?;
        let perms = parts.next()?;
        let (start, end) = range.split_once('-')?;
        let start = u64::from_str_radix(start, 16).ok()?;
        let end = u64::from_str_radix(end, 16).ok()?;
        Some((start, end, Protection::from_maps_perms(perms)))
    }

    pub fn query(addr: Address) -> Result<RegionInfo, MemoryError> {
        let maps = fs::read_to_string("/proc/self/maps")?;
        let target = addr.as_u64();

        maps.lines()
            .filter_map(parse_maps_line)
            .find(|&(start, end, _)| target >= start && target < end)
            .map(|(start, end, protection)| {
                RegionInfo::new(Address::new(start), end - start, RegionState::Committed, protection)
            })
            .ok_or(MemoryError::RegionNotFound(addr))
    }

    pub fn copy(addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        let remote = addr.as_usize().ok_or(MemoryError::ReadFailed(addr))?;
        let local_iov = libc::iovec {
            iov_base: buf.as_mut_ptr() as *mut libc::c_void,
            iov_len: buf.len(),
        };
        let remote_iov = libc::iovec {
            iov_base: remote as *mut libc::c_void,
            iov_len: buf.len(),
        };

        let n = unsafe { libc::process_vm_readv(libc::getpid(), &local_iov, 1, &remote_iov, 1, 0) };
        if n < 0 || n as usize != buf.len() {
            return Err(MemoryError::ReadFailed(addr));
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_maps_line() {
            let line = "7f0000000000-7f0000001000 r-xp 00000000 08:01 1234 /usr/lib/libc.so";
            let (start, end, prot) = parse_maps_line(line).unwrap();
            assert_eq!(start, 0x7f0000000000);
            assert_eq!(end - start, 0x1000);
            assert_eq!(prot, Protection::ExecuteRead);
        }
    }
}

#[cfg(not(any(windows, target_os = "linux")))]
mod platform {
    use super::*;

    pub fn query(_addr: Address) -> Result<RegionInfo, MemoryError> {
        Err(MemoryError::NotSupported(
            "region queries on this platform".to_string(),
        ))
    }

    pub fn copy(_addr: Address, _buf: &mut [u8]) -> Result<(), MemoryError> {
        Err(MemoryError::NotSupported("local reads on this platform".to_string()))
    }
}

impl MemoryReader for LocalMemory {
    fn query_region(&self, addr: Address) -> Result<RegionInfo, MemoryError> {
        platform::query(addr)
    }

    fn copy_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        platform::copy(addr, buf)
    }

    fn describe(&self) -> String {
        format!("process {}", std::process::id())
    }
}

#[cfg(all(test, any(windows, target_os = "linux")))]
mod tests {
    use super::*;
    use crate::memory::try_read;

    #[test]
    fn test_reads_own_heap() {
        let data: Vec<u8> = (0u8..64).collect();
        let addr = Address::from_ptr(data.as_ptr());
        let bytes = try_read(&LocalMemory::new(), addr, 16).unwrap();
        assert_eq!(bytes, data[..16].to_vec());
    }

    #[test]
    fn test_null_is_rejected() {
        assert!(try_read(&LocalMemory::new(), Address::null(), 4).is_err());
    }
}
