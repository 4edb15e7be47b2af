// Tue Jan 15 2026 - Alex

pub mod confidence;
pub mod enums;
pub mod flags;
pub mod float;
pub mod handle;
pub mod numeric;
pub mod result;
pub mod text;
pub mod validator;

pub use confidence::{mean_confidence, ConfidenceLevel};
pub use enums::{device_type_name, format_name};
pub use handle::validate_window_handle_with;
pub use result::ValidationResult;
pub use validator::{FieldValidator, VALIDATION_LOG};

pub(crate) use validator::dword;
