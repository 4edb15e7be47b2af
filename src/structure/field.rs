// Tue Jan 13 2026 - Alex

use crate::validation::{FieldValidator, ValidationResult};
use std::fmt;

/// One field of a known layout: where it lives, how wide it is and how to judge it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub offset: usize,
    pub size: usize,
    pub name: &'static str,
    pub validator: FieldValidator,
}

impl FieldDescriptor {
    pub const fn new(offset: usize, size: usize, name: &'static str, validator: FieldValidator) -> Self {
        Self {
            offset,
            size,
            name,
            validator,
        }
    }

    /// 4-byte field, the common case in these layouts.
    pub const fn dword(offset: usize, name: &'static str, validator: FieldValidator) -> Self {
        Self::new(offset, 4, name, validator)
    }

    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Window of `structure_bytes` covered by this field, if the buffer is long enough.
    pub fn slice<'a>(&self, structure_bytes: &'a [u8]) -> Option<&'a [u8]> {
        structure_bytes.get(self.offset..self.offset.checked_add(self.size)?)
    }

    /// Validate this field inside a buffer holding the whole structure.
    /// A buffer too short for the field yields the validator's size-mismatch result.
    pub fn evaluate(&self, structure_bytes: &[u8]) -> ValidationResult {
        let window = self.slice(structure_bytes).unwrap_or(&[]);
        self.validator.validate(window, self.size, self.name)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+0x{:04x} {:<32} {:>4} bytes  {}",
            self.offset,
            self.name,
            self.size,
            self.validator.kind()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_and_evaluate() {
        let field = FieldDescriptor::dword(4, "Height", FieldValidator::RangeU32 { min: 1, max: 32768 });
        let mut bytes = vec![0u8; 8];
        bytes[4..8].copy_from_slice(&768u32.to_le_bytes());

        assert_eq!(field.slice(&bytes), Some(&bytes[4..8]));
        assert_eq!(field.evaluate(&bytes).confidence, 90);

        let short = field.evaluate(&bytes[..6]);
        assert!(!short.is_valid);
    }
}
