// Tue Jan 13 2026 - Alex

use crate::memory::{try_read, Address, MemoryReader};
use crate::structure::evaluation::{evaluate_fields, FieldEvaluation, ACCEPT_CONFIDENCE};
use crate::structure::known::{D3DDEVICE_CREATION_PARAMETERS, D3DDISPLAYMODE};
use crate::structure::{StructDescriptor, StructureError};

/// Result of validating one known layout at one address.
#[derive(Debug, Clone)]
pub struct StructureVerdict {
    pub address: Address,
    pub evaluation: FieldEvaluation,
    /// The `total_size` bytes the fields were scored against.
    pub bytes: Vec<u8>,
    /// No field was invalid with confidence below the veto threshold.
    pub overall_valid: bool,
}

impl StructureVerdict {
    pub fn descriptor(&self) -> &'static StructDescriptor {
        self.evaluation.descriptor
    }

    pub fn mean_confidence(&self) -> i32 {
        self.evaluation.mean_confidence
    }

    pub fn accepted(&self) -> bool {
        self.overall_valid && self.mean_confidence() >= ACCEPT_CONFIDENCE
    }
}

/// Validates a single layout at a caller-chosen address.
pub struct StructureValidator<R: MemoryReader> {
    reader: R,
    category: String,
}

impl<R: MemoryReader> StructureValidator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            category: "CheckMemory".to_string(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Read `descriptor.total_size` bytes at `address` and score every field.
    pub fn validate_detailed(
        &self,
        address: Address,
        descriptor: &'static StructDescriptor,
    ) -> Result<StructureVerdict, StructureError> {
        let category = self.category.as_str();

        if address.is_null() {
            log::warn!(target: category, "[-] NULL parameters");
            return Err(StructureError::NullAddress(descriptor.name));
        }

        let bytes = try_read(&self.reader, address, descriptor.total_size).map_err(|source| {
            log::warn!(target: category, "[-] Failed to read memory for {}", descriptor.name);
            StructureError::Unreadable {
                structure: descriptor.name,
                address,
                source,
            }
        })?;

        log::info!(target: category, "[+] Validating {} at {}", descriptor.name, address);

        let evaluation = evaluate_fields(descriptor, &bytes);
        for verdict in &evaluation.fields {
            log::info!(
                target: category,
                "  {}: {} (confidence: {}%)",
                verdict.field.name,
                verdict.result.reason,
                verdict.result.confidence
            );
        }

        let overall_valid = evaluation.no_veto();
        log::info!(
            target: category,
            "[{}] {} validation {} (avg confidence: {}%)",
            if overall_valid { '+' } else { '-' },
            descriptor.name,
            if overall_valid { "PASSED" } else { "FAILED" },
            evaluation.mean_confidence
        );

        Ok(StructureVerdict {
            address,
            evaluation,
            bytes,
            overall_valid,
        })
    }

    /// True iff no field vetoes and the mean confidence reaches the accept threshold.
    /// Unreadable memory and a null address are rejections.
    pub fn validate_structure(&self, address: Address, descriptor: &'static StructDescriptor) -> bool {
        self.validate_detailed(address, descriptor)
            .map(|verdict| verdict.accepted())
            .unwrap_or(false)
    }

    pub fn validate_display_mode(&self, address: Address) -> bool {
        self.validate_structure(address, &D3DDISPLAYMODE)
    }

    pub fn validate_device_creation_parameters(&self, address: Address) -> bool {
        self.validate_structure(address, &D3DDEVICE_CREATION_PARAMETERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Protection, SnapshotMemory};
    use crate::structure::known::{D3DADAPTER_IDENTIFIER8, D3DVIEWPORT8};

    const BASE: u64 = 0x0040_0000;

    fn dwords(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn validator(bytes: Vec<u8>) -> StructureValidator<SnapshotMemory> {
        let mut mem = SnapshotMemory::new();
        mem.add_region(Address::new(BASE), bytes, Protection::ReadWrite);
        StructureValidator::new(mem).with_category("test")
    }

    #[test]
    fn test_display_mode_accepted() {
        let v = validator(dwords(&[1024, 768, 60, 21]));
        assert!(v.validate_display_mode(Address::new(BASE)));

        let verdict = v.validate_detailed(Address::new(BASE), &D3DDISPLAYMODE).unwrap();
        assert_eq!(verdict.mean_confidence(), 91);
        assert!(verdict.overall_valid);
        assert_eq!(verdict.bytes, dwords(&[1024, 768, 60, 21]));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let v = validator(dwords(&[0, 2, 0x0003_0000, 0x40]));
        let first = v.validate_detailed(Address::new(BASE), &D3DDEVICE_CREATION_PARAMETERS).unwrap();
        let second = v.validate_detailed(Address::new(BASE), &D3DDEVICE_CREATION_PARAMETERS).unwrap();
        assert_eq!(first.mean_confidence(), second.mean_confidence());
        assert_eq!(first.accepted(), second.accepted());
        assert!(v.validate_device_creation_parameters(Address::new(BASE)));
    }

    #[test]
    fn test_veto_blocks_high_mean() {
        // zero Height scores -50 and vetoes a mean that would otherwise pass
        let mut bytes = dwords(&[0, 0, 640, 0]);
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        let v = validator(bytes);

        let verdict = v.validate_detailed(Address::new(BASE), &D3DVIEWPORT8).unwrap();
        assert_eq!(verdict.mean_confidence(), 69);
        assert!(!verdict.overall_valid);
        assert!(!verdict.accepted());
    }

    #[test]
    fn test_zeroed_display_mode_rejected() {
        let v = validator(vec![0u8; 16]);
        assert!(!v.validate_display_mode(Address::new(BASE)));
    }

    #[test]
    fn test_unreadable_and_null() {
        let v = validator(vec![0u8; 16]);
        assert!(!v.validate_structure(Address::null(), &D3DDISPLAYMODE));
        assert!(matches!(
            v.validate_detailed(Address::null(), &D3DDISPLAYMODE),
            Err(StructureError::NullAddress(_))
        ));
        assert!(matches!(
            v.validate_detailed(Address::new(BASE), &D3DADAPTER_IDENTIFIER8),
            Err(StructureError::Unreadable { .. })
        ));
        assert!(!v.validate_display_mode(Address::new(BASE + 0x1000)));
    }
}
