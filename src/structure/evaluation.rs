// Tue Jan 13 2026 - Alex

use crate::structure::{FieldDescriptor, StructDescriptor};
use crate::validation::{mean_confidence, ValidationResult};

/// Mean confidence needed to accept a structure.
pub const ACCEPT_CONFIDENCE: i32 = 60;
/// An invalid field below this confidence fails a direct structure validation.
pub const VETO_CONFIDENCE: i32 = 50;
/// An invalid field below this confidence makes a scan candidate implausible.
pub const PLAUSIBLE_FLOOR: i32 = 30;
/// A valid field at or above this confidence counts as passing.
pub const PASSING_CONFIDENCE: i32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct FieldVerdict {
    pub field: &'static FieldDescriptor,
    pub result: ValidationResult,
}

/// Every field of one descriptor scored against one buffer.
#[derive(Debug, Clone)]
pub struct FieldEvaluation {
    pub descriptor: &'static StructDescriptor,
    pub fields: Vec<FieldVerdict>,
    pub mean_confidence: i32,
}

impl FieldEvaluation {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn passing_fields(&self) -> usize {
        self.fields
            .iter()
            .filter(|v| v.result.is_passing(PASSING_CONFIDENCE))
            .count()
    }

    /// No field is invalid with confidence below [`PLAUSIBLE_FLOOR`].
    pub fn all_plausible(&self) -> bool {
        !self.fields.iter().any(|v| v.result.is_vetoed_below(PLAUSIBLE_FLOOR))
    }

    /// No field is invalid with confidence below [`VETO_CONFIDENCE`].
    pub fn no_veto(&self) -> bool {
        !self.fields.iter().any(|v| v.result.is_vetoed_below(VETO_CONFIDENCE))
    }
}

/// Run every field validator of `descriptor` over `bytes`, which must hold the
/// whole structure. Pure: the same bytes always give the same evaluation.
pub fn evaluate_fields(descriptor: &'static StructDescriptor, bytes: &[u8]) -> FieldEvaluation {
    let fields: Vec<FieldVerdict> = descriptor
        .fields
        .iter()
        .map(|field| FieldVerdict {
            field,
            result: field.evaluate(bytes),
        })
        .collect();

    let scores: Vec<i32> = fields.iter().map(|v| v.result.confidence).collect();

    FieldEvaluation {
        descriptor,
        mean_confidence: mean_confidence(&scores),
        fields,
    }
}
