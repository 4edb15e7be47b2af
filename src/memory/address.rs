// Tue Jan 13 2026 - Alex

use std::fmt;
use std::ops::{Add, Sub};

/// An absolute address inside the scanned process. Plain integer, never dereferenced
/// outside `memory::access`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: u64,
}

impl Address {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    pub const fn null() -> Self {
        Self { value: 0 }
    }

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self { value: ptr as usize as u64 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn as_usize(&self) -> Option<usize> {
        usize::try_from(self.value).ok()
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    pub fn checked_add(&self, len: usize) -> Option<Self> {
        self.value.checked_add(len as u64).map(Self::new)
    }

    pub fn offset_from(&self, base: Address) -> Option<usize> {
        self.value
            .checked_sub(base.value)
            .and_then(|d| usize::try_from(d).ok())
    }

    pub fn is_aligned(&self, alignment: usize) -> bool {
        alignment == 0 || self.value % alignment as u64 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

impl Add<usize> for Address {
    type Output = Self;
    fn add(self, rhs: usize) -> Self::Output {
        Self { value: self.value.wrapping_add(rhs as u64) }
    }
}

impl Sub<Address> for Address {
    type Output = i64;
    fn sub(self, rhs: Address) -> Self::Output {
        self.value.wrapping_sub(rhs.value) as i64
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from() {
        let base = Address::new(0x1000);
        assert_eq!(Address::new(0x1010).offset_from(base), Some(0x10));
        assert_eq!(Address::new(0x0ff0).offset_from(base), None);
    }

    #[test]
    fn test_checked_add_overflow() {
        assert!(Address::new(u64::MAX).checked_add(1).is_none());
        assert_eq!(Address::new(4).checked_add(4), Some(Address::new(8)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Address::new(0x014ce740).to_string(), "0x014ce740");
    }
}
