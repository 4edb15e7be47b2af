// Tue Jan 13 2026 - Alex

use std::fmt;

/// Page protection of a queried region, normalized across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protection {
    NoAccess,
    Read,
    ReadWrite,
    WriteCopy,
    Execute,
    ExecuteRead,
    ExecuteReadWrite,
    ExecuteWriteCopy,
    Guard,
}

impl Protection {
    /// Windows `PAGE_*` constants. Modifier bits other than `PAGE_GUARD` are ignored.
    pub fn from_page_flags(flags: u32) -> Self {
        const PAGE_NOACCESS: u32 = 0x01;
        const PAGE_READONLY: u32 = 0x02;
        const PAGE_READWRITE: u32 = 0x04;
        const PAGE_WRITECOPY: u32 = 0x08;
        const PAGE_EXECUTE: u32 = 0x10;
        const PAGE_EXECUTE_READ: u32 = 0x20;
        const PAGE_EXECUTE_READWRITE: u32 = 0x40;
        const PAGE_EXECUTE_WRITECOPY: u32 = 0x80;
        const PAGE_GUARD: u32 = 0x100;

        if flags & PAGE_GUARD != 0 {
            return Self::Guard;
        }

        match flags & 0xFF {
            PAGE_READONLY => Self::Read,
            PAGE_READWRITE => Self::ReadWrite,
            PAGE_WRITECOPY => Self::WriteCopy,
            PAGE_EXECUTE => Self::Execute,
            PAGE_EXECUTE_READ => Self::ExecuteRead,
            PAGE_EXECUTE_READWRITE => Self::ExecuteReadWrite,
            PAGE_EXECUTE_WRITECOPY => Self::ExecuteWriteCopy,
            PAGE_NOACCESS => Self::NoAccess,
            _ => Self::NoAccess,
        }
    }

    /// `rwxp` permission column of `/proc/<pid>/maps`.
    pub fn from_maps_perms(perms: &str) -> Self {
        let bytes = perms.as_bytes();
        let flag = |i: usize, c: u8| bytes.get(i).copied() == Some(c);
        let private = flag(3, b'p');

        match (flag(0, b'r'), flag(1, b'w'), flag(2, b'x')) {
            (true, false, false) => Self::Read,
            (true, true, false) if private => Self::WriteCopy,
            (true, true, false) => Self::ReadWrite,
            (true, false, true) => Self::ExecuteRead,
            (true, true, true) if private => Self::ExecuteWriteCopy,
            (true, true, true) => Self::ExecuteReadWrite,
            (false, _, true) => Self::Execute,
            _ => Self::NoAccess,
        }
    }

    pub fn is_readable(self) -> bool {
        matches!(
            self,
            Self::Read
                | Self::ReadWrite
                | Self::WriteCopy
                | Self::ExecuteRead
                | Self::ExecuteReadWrite
                | Self::ExecuteWriteCopy
        )
    }

    pub fn is_writable(self) -> bool {
        matches!(
            self,
            Self::ReadWrite | Self::WriteCopy | Self::ExecuteReadWrite | Self::ExecuteWriteCopy
        )
    }

    pub fn is_executable(self) -> bool {
        matches!(
            self,
            Self::Execute | Self::ExecuteRead | Self::ExecuteReadWrite | Self::ExecuteWriteCopy
        )
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoAccess => "---",
            Self::Read => "r--",
            Self::ReadWrite => "rw-",
            Self::WriteCopy => "rwc",
            Self::Execute => "--x",
            Self::ExecuteRead => "r-x",
            Self::ExecuteReadWrite => "rwx",
            Self::ExecuteWriteCopy => "rcx",
            Self::Guard => "grd",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_flags() {
        assert_eq!(Protection::from_page_flags(0x04), Protection::ReadWrite);
        assert_eq!(Protection::from_page_flags(0x20), Protection::ExecuteRead);
        assert_eq!(Protection::from_page_flags(0x104), Protection::Guard);
        assert!(!Protection::from_page_flags(0x01).is_readable());
        assert!(!Protection::from_page_flags(0x10).is_readable());
    }

    #[test]
    fn test_maps_perms() {
        assert_eq!(Protection::from_maps_perms("r--p"), Protection::Read);
        assert_eq!(Protection::from_maps_perms("rw-p"), Protection::WriteCopy);
        assert_eq!(Protection::from_maps_perms("rw-s"), Protection::ReadWrite);
        assert_eq!(Protection::from_maps_perms("r-xp"), Protection::ExecuteRead);
        assert_eq!(Protection::from_maps_perms("---p"), Protection::NoAccess);
        assert!(Protection::from_maps_perms("rw-p").is_readable());
    }
}
