// Tue Jan 13 2026 - Alex

use crate::validation::{enums, flags, float, handle, numeric, text, ValidationResult};

pub const VALIDATION_LOG: &str = "validation";

/// Little-endian DWORD, only when the window and the declared size are both 4 bytes.
pub(crate) fn dword(bytes: &[u8], expected_size: usize) -> Option<u32> {
    if expected_size != 4 {
        return None;
    }
    let raw: [u8; 4] = bytes.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}

/// Per-field plausibility heuristic. One variant per field semantic so the
/// descriptor tables can live in `static` memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidator {
    RangeU32 { min: u32, max: u32 },
    WindowHandle,
    Format,
    DeviceType,
    MultiSampleType,
    SwapEffect,
    BehaviorFlags,
    PresentFlags,
    Bool,
    ViewportCoordinate,
    ViewportDimension,
    ZDepth,
    CapsFlags,
    Caps2Flags,
    Caps3Flags,
    PresentationIntervals,
    CursorCaps,
    DevCaps,
    PrimitiveMiscCaps,
    RasterCaps,
    TextureCaps,
    TextureDimension,
    VertexIndex,
    MaxStreams,
    ShaderVersion,
    FixedString,
    DriverVersion,
    VendorId,
    PciDeviceId,
    PciSubsystem,
    Guid,
    WhqlLevel,
}

impl FieldValidator {
    /// Score `bytes` as this field. `expected_size` is the declared field width;
    /// any mismatch with the window or with the validator's own type is an
    /// invalid result, never a panic.
    pub fn validate(&self, bytes: &[u8], expected_size: usize, field_name: &str) -> ValidationResult {
        let result = match *self {
            FieldValidator::RangeU32 { min, max } => numeric::validate_range_u32(bytes, expected_size, min, max),
            FieldValidator::WindowHandle => handle::validate_window_handle(bytes, expected_size),
            FieldValidator::Format => enums::validate_format(bytes, expected_size),
            FieldValidator::DeviceType => enums::validate_device_type(bytes, expected_size),
            FieldValidator::MultiSampleType => enums::validate_multisample_type(bytes, expected_size),
            FieldValidator::SwapEffect => enums::validate_swap_effect(bytes, expected_size),
            FieldValidator::BehaviorFlags => flags::validate_behavior_flags(bytes, expected_size),
            FieldValidator::PresentFlags => flags::validate_present_flags(bytes, expected_size),
            FieldValidator::Bool => numeric::validate_bool(bytes, expected_size),
            FieldValidator::ViewportCoordinate => numeric::validate_viewport_coordinate(bytes, expected_size),
            FieldValidator::ViewportDimension => numeric::validate_viewport_dimension(bytes, expected_size),
            FieldValidator::ZDepth => float::validate_z_depth(bytes, expected_size),
            FieldValidator::CapsFlags => flags::validate_caps(bytes, expected_size),
            FieldValidator::Caps2Flags => flags::validate_caps2(bytes, expected_size),
            FieldValidator::Caps3Flags => flags::validate_caps3(bytes, expected_size),
            FieldValidator::PresentationIntervals => flags::validate_presentation_intervals(bytes, expected_size),
            FieldValidator::CursorCaps => flags::validate_cursor_caps(bytes, expected_size),
            FieldValidator::DevCaps => flags::validate_dev_caps(bytes, expected_size),
            FieldValidator::PrimitiveMiscCaps => flags::validate_primitive_misc_caps(bytes, expected_size),
            FieldValidator::RasterCaps => flags::validate_raster_caps(bytes, expected_size),
            FieldValidator::TextureCaps => flags::validate_texture_caps(bytes, expected_size),
            FieldValidator::TextureDimension => numeric::validate_texture_dimension(bytes, expected_size),
            FieldValidator::VertexIndex => numeric::validate_vertex_index(bytes, expected_size),
            FieldValidator::MaxStreams => numeric::validate_max_streams(bytes, expected_size),
            FieldValidator::ShaderVersion => numeric::validate_shader_version(bytes, expected_size),
            FieldValidator::FixedString => text::validate_fixed_string(bytes, expected_size),
            FieldValidator::DriverVersion => numeric::validate_driver_version(bytes, expected_size),
            FieldValidator::VendorId => numeric::validate_vendor_id(bytes, expected_size),
            FieldValidator::PciDeviceId => numeric::validate_pci_device_id(bytes, expected_size),
            FieldValidator::PciSubsystem => numeric::validate_pci_subsystem(bytes, expected_size),
            FieldValidator::Guid => text::validate_guid(bytes, expected_size),
            FieldValidator::WhqlLevel => numeric::validate_whql_level(bytes, expected_size),
        };

        log::trace!(target: VALIDATION_LOG, "{} [{}]: {}", field_name, self.kind(), result);
        result
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldValidator::RangeU32 { .. } => "range",
            FieldValidator::WindowHandle => "hwnd",
            FieldValidator::Format => "D3DFORMAT",
            FieldValidator::DeviceType => "D3DDEVTYPE",
            FieldValidator::MultiSampleType => "D3DMULTISAMPLE_TYPE",
            FieldValidator::SwapEffect => "D3DSWAPEFFECT",
            FieldValidator::BehaviorFlags => "behavior flags",
            FieldValidator::PresentFlags => "present flags",
            FieldValidator::Bool => "BOOL",
            FieldValidator::ViewportCoordinate => "viewport coordinate",
            FieldValidator::ViewportDimension => "viewport dimension",
            FieldValidator::ZDepth => "float depth",
            FieldValidator::CapsFlags => "caps",
            FieldValidator::Caps2Flags => "caps2",
            FieldValidator::Caps3Flags => "caps3",
            FieldValidator::PresentationIntervals => "presentation intervals",
            FieldValidator::CursorCaps => "cursor caps",
            FieldValidator::DevCaps => "device caps",
            FieldValidator::PrimitiveMiscCaps => "primitive misc caps",
            FieldValidator::RasterCaps => "raster caps",
            FieldValidator::TextureCaps => "texture caps",
            FieldValidator::TextureDimension => "texture dimension",
            FieldValidator::VertexIndex => "vertex index",
            FieldValidator::MaxStreams => "stream count",
            FieldValidator::ShaderVersion => "shader version",
            FieldValidator::FixedString => "string",
            FieldValidator::DriverVersion => "driver version",
            FieldValidator::VendorId => "vendor id",
            FieldValidator::PciDeviceId => "device id",
            FieldValidator::PciSubsystem => "subsystem id",
            FieldValidator::Guid => "GUID",
            FieldValidator::WhqlLevel => "WHQL level",
        }
    }
}
