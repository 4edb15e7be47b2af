// Tue Jan 13 2026 - Alex

//! Direct3D 8 layouts recognized by the scanner, as laid out by the 32-bit
//! runtime (4-byte handles, little-endian). Declaration order is the tie-break
//! order when two layouts score the same at one address.

use crate::structure::{FieldDescriptor, StructDescriptor, StructureError};
use crate::validation::FieldValidator as V;

pub const MAX_DEVICE_IDENTIFIER_STRING: usize = 512;

const SCREEN_DIMENSION: V = V::RangeU32 { min: 1, max: 32768 };
const REFRESH_RATE: V = V::RangeU32 { min: 0, max: 240 };
const ADAPTER_ORDINAL: V = V::RangeU32 { min: 0, max: 16 };
const BACK_BUFFER_COUNT: V = V::RangeU32 { min: 1, max: 8 };
const REVISION: V = V::RangeU32 { min: 0, max: 255 };

static DISPLAY_MODE_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::dword(0, "Width", SCREEN_DIMENSION),
    FieldDescriptor::dword(4, "Height", SCREEN_DIMENSION),
    FieldDescriptor::dword(8, "RefreshRate", REFRESH_RATE),
    FieldDescriptor::dword(12, "Format", V::Format),
];

static CREATION_PARAMETERS_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::dword(0, "AdapterOrdinal", ADAPTER_ORDINAL),
    FieldDescriptor::dword(4, "DeviceType", V::DeviceType),
    FieldDescriptor::dword(8, "hFocusWindow", V::WindowHandle),
    FieldDescriptor::dword(12, "BehaviorFlags", V::BehaviorFlags),
];

static PRESENT_PARAMETERS_FIELDS: [FieldDescriptor; 13] = [
    FieldDescriptor::dword(0, "BackBufferWidth", SCREEN_DIMENSION),
    FieldDescriptor::dword(4, "BackBufferHeight", SCREEN_DIMENSION),
    FieldDescriptor::dword(8, "BackBufferFormat", V::Format),
    FieldDescriptor::dword(12, "BackBufferCount", BACK_BUFFER_COUNT),
    FieldDescriptor::dword(16, "MultiSampleType", V::MultiSampleType),
    FieldDescriptor::dword(20, "SwapEffect", V::SwapEffect),
    FieldDescriptor::dword(24, "hDeviceWindow", V::WindowHandle),
    FieldDescriptor::dword(28, "Windowed", V::Bool),
    FieldDescriptor::dword(32, "EnableAutoDepthStencil", V::Bool),
    FieldDescriptor::dword(36, "AutoDepthStencilFormat", V::Format),
    FieldDescriptor::dword(40, "Flags", V::PresentFlags),
    FieldDescriptor::dword(44, "FullScreen_RefreshRateInHz", REFRESH_RATE),
    FieldDescriptor::dword(48, "FullScreen_PresentationInterval", V::PresentationIntervals),
];

static VIEWPORT_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::dword(0, "X", V::ViewportCoordinate),
    FieldDescriptor::dword(4, "Y", V::ViewportCoordinate),
    FieldDescriptor::dword(8, "Width", V::ViewportDimension),
    FieldDescriptor::dword(12, "Height", V::ViewportDimension),
    FieldDescriptor::dword(16, "MinZ", V::ZDepth),
    FieldDescriptor::dword(20, "MaxZ", V::ZDepth),
];

static ADAPTER_IDENTIFIER_FIELDS: [FieldDescriptor; 9] = [
    FieldDescriptor::new(0, MAX_DEVICE_IDENTIFIER_STRING, "Driver", V::FixedString),
    FieldDescriptor::new(512, MAX_DEVICE_IDENTIFIER_STRING, "Description", V::FixedString),
    FieldDescriptor::new(1024, 8, "DriverVersion", V::DriverVersion),
    FieldDescriptor::dword(1032, "VendorId", V::VendorId),
    FieldDescriptor::dword(1036, "DeviceId", V::PciDeviceId),
    FieldDescriptor::dword(1040, "SubSysId", V::PciSubsystem),
    FieldDescriptor::dword(1044, "Revision", REVISION),
    FieldDescriptor::new(1048, 16, "DeviceIdentifier", V::Guid),
    FieldDescriptor::dword(1064, "WHQLLevel", V::WhqlLevel),
];

static CAPS_FIELDS: [FieldDescriptor; 19] = [
    FieldDescriptor::dword(0, "DeviceType", V::DeviceType),
    FieldDescriptor::dword(4, "AdapterOrdinal", ADAPTER_ORDINAL),
    FieldDescriptor::dword(8, "Caps", V::CapsFlags),
    FieldDescriptor::dword(12, "Caps2", V::Caps2Flags),
    FieldDescriptor::dword(16, "Caps3", V::Caps3Flags),
    FieldDescriptor::dword(20, "PresentationIntervals", V::PresentationIntervals),
    FieldDescriptor::dword(24, "CursorCaps", V::CursorCaps),
    FieldDescriptor::dword(28, "DevCaps", V::DevCaps),
    FieldDescriptor::dword(32, "PrimitiveMiscCaps", V::PrimitiveMiscCaps),
    FieldDescriptor::dword(36, "RasterCaps", V::RasterCaps),
    FieldDescriptor::dword(60, "TextureCaps", V::TextureCaps),
    FieldDescriptor::dword(88, "MaxTextureWidth", V::TextureDimension),
    FieldDescriptor::dword(92, "MaxTextureHeight", V::TextureDimension),
    FieldDescriptor::dword(96, "MaxVolumeExtent", V::TextureDimension),
    FieldDescriptor::dword(100, "MaxTextureRepeat", V::TextureDimension),
    FieldDescriptor::dword(184, "MaxVertexIndex", V::VertexIndex),
    FieldDescriptor::dword(188, "MaxStreams", V::MaxStreams),
    FieldDescriptor::dword(196, "VertexShaderVersion", V::ShaderVersion),
    FieldDescriptor::dword(204, "PixelShaderVersion", V::ShaderVersion),
];

pub static D3DDISPLAYMODE: StructDescriptor = StructDescriptor::new("D3DDISPLAYMODE", 16, &DISPLAY_MODE_FIELDS);

pub static D3DDEVICE_CREATION_PARAMETERS: StructDescriptor =
    StructDescriptor::new("D3DDEVICE_CREATION_PARAMETERS", 16, &CREATION_PARAMETERS_FIELDS);

pub static D3DPRESENT_PARAMETERS: StructDescriptor =
    StructDescriptor::new("D3DPRESENT_PARAMETERS", 52, &PRESENT_PARAMETERS_FIELDS);

pub static D3DVIEWPORT8: StructDescriptor = StructDescriptor::new("D3DVIEWPORT8", 24, &VIEWPORT_FIELDS);

pub static D3DADAPTER_IDENTIFIER8: StructDescriptor =
    StructDescriptor::new("D3DADAPTER_IDENTIFIER8", 1072, &ADAPTER_IDENTIFIER_FIELDS);

pub static D3DCAPS8: StructDescriptor = StructDescriptor::new("D3DCAPS8", 212, &CAPS_FIELDS);

pub static KNOWN_STRUCTURES: [&StructDescriptor; 6] = [
    &D3DDISPLAYMODE,
    &D3DDEVICE_CREATION_PARAMETERS,
    &D3DPRESENT_PARAMETERS,
    &D3DVIEWPORT8,
    &D3DADAPTER_IDENTIFIER8,
    &D3DCAPS8,
];

/// Case-insensitive lookup in [`KNOWN_STRUCTURES`].
pub fn find_descriptor(name: &str) -> Result<&'static StructDescriptor, StructureError> {
    KNOWN_STRUCTURES
        .iter()
        .copied()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| StructureError::UnknownStructure(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_layouts_are_consistent() {
        for desc in KNOWN_STRUCTURES {
            desc.check_layout().unwrap();
        }
    }

    #[test]
    fn test_sizes() {
        assert_eq!(D3DDISPLAYMODE.total_size, 16);
        assert_eq!(D3DDEVICE_CREATION_PARAMETERS.total_size, 16);
        assert_eq!(D3DPRESENT_PARAMETERS.total_size, 52);
        assert_eq!(D3DVIEWPORT8.total_size, 24);
        assert_eq!(D3DADAPTER_IDENTIFIER8.total_size, 1072);
        assert_eq!(D3DCAPS8.total_size, 212);
        assert_eq!(D3DPRESENT_PARAMETERS.unchecked_bytes(), 0);
    }

    #[test]
    fn test_every_validator_backs_a_field() {
        let used: std::collections::HashSet<&str> = KNOWN_STRUCTURES
            .iter()
            .flat_map(|desc| desc.fields.iter())
            .map(|field| field.validator.kind())
            .collect();
        // one kind per FieldValidator variant
        assert_eq!(used.len(), 32);
    }

    #[test]
    fn test_declaration_order() {
        let names: Vec<&str> = KNOWN_STRUCTURES.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            [
                "D3DDISPLAYMODE",
                "D3DDEVICE_CREATION_PARAMETERS",
                "D3DPRESENT_PARAMETERS",
                "D3DVIEWPORT8",
                "D3DADAPTER_IDENTIFIER8",
                "D3DCAPS8",
            ]
        );
    }

    #[test]
    fn test_range_fields_reject_just_past_max() {
        for desc in KNOWN_STRUCTURES {
            for field in desc.fields {
                let V::RangeU32 { min, max } = field.validator else {
                    continue;
                };
                let accept = field.validator.validate(&min.max(1).to_le_bytes(), 4, field.name);
                assert!(accept.is_valid && accept.confidence >= 50, "{}.{}", desc.name, field.name);

                let reject = field.validator.validate(&(max + 1).to_le_bytes(), 4, field.name);
                assert!(!reject.is_valid, "{}.{}", desc.name, field.name);
            }
        }
    }

    #[test]
    fn test_find_descriptor() {
        assert_eq!(find_descriptor("d3dviewport8").unwrap().total_size, 24);
        assert!(matches!(
            find_descriptor("D3DCAPS9"),
            Err(StructureError::UnknownStructure(_))
        ));
    }
}
