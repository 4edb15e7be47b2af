// Tue Jan 13 2026 - Alex

use crate::structure::{FieldDescriptor, StructureError};
use std::fmt;

/// A fixed-size structure layout: its name, total size and field table.
#[derive(Debug, PartialEq, Eq)]
pub struct StructDescriptor {
    pub name: &'static str,
    pub total_size: usize,
    pub fields: &'static [FieldDescriptor],
}

impl StructDescriptor {
    pub const fn new(name: &'static str, total_size: usize, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            name,
            total_size,
            fields,
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Result<&'static FieldDescriptor, StructureError> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| StructureError::FieldNotFound {
                structure: self.name,
                field: name.to_string(),
            })
    }

    /// Every field lies inside `total_size` and no two fields share a byte.
    pub fn check_layout(&self) -> Result<(), StructureError> {
        if self.fields.is_empty() {
            return Err(StructureError::NoFields(self.name));
        }

        for field in self.fields {
            let end = field.offset.checked_add(field.size).unwrap_or(usize::MAX);
            if field.size == 0 || end > self.total_size {
                return Err(StructureError::FieldOutOfBounds {
                    structure: self.name,
                    field: field.name,
                    offset: field.offset,
                    end,
                    total_size: self.total_size,
                });
            }
        }

        let mut ordered: Vec<&FieldDescriptor> = self.fields.iter().collect();
        ordered.sort_by_key(|f| f.offset);
        for pair in ordered.windows(2) {
            if pair[0].end() > pair[1].offset {
                return Err(StructureError::OverlappingFields {
                    structure: self.name,
                    first: pair[0].name,
                    second: pair[1].name,
                });
            }
        }

        Ok(())
    }

    /// Bytes not covered by any field (padding and unchecked members).
    pub fn unchecked_bytes(&self) -> usize {
        let covered: usize = self.fields.iter().map(|f| f.size).sum();
        self.total_size.saturating_sub(covered)
    }
}

impl fmt::Display for StructDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bytes, {} fields)",
            self.name,
            self.total_size,
            self.fields.len()
        )
    }
}
