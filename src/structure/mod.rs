// Tue Jan 15 2026 - Alex

pub mod error;
pub mod evaluation;
pub mod field;
pub mod known;
pub mod layout;
pub mod validator;

pub use error::StructureError;
pub use evaluation::{evaluate_fields, FieldEvaluation, FieldVerdict};
pub use field::FieldDescriptor;
pub use known::{find_descriptor, KNOWN_STRUCTURES};
pub use layout::StructDescriptor;
pub use validator::{StructureValidator, StructureVerdict};
