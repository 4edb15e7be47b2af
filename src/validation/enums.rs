// Tue Jan 13 2026 - Alex

//! Enumerated Direct3D 8 codes: surface formats, device types, multisample
//! levels and swap effects.

use crate::validation::{dword, ValidationResult};

pub mod format {
    pub const UNKNOWN: u32 = 0;
    pub const R8G8B8: u32 = 20;
    pub const A8R8G8B8: u32 = 21;
    pub const X8R8G8B8: u32 = 22;
    pub const R5G6B5: u32 = 23;
    pub const X1R5G5B5: u32 = 24;
    pub const A1R5G5B5: u32 = 25;
    pub const A4R4G4B4: u32 = 26;
    pub const R3G3B2: u32 = 27;
    pub const A8: u32 = 28;
    pub const A8R3G3B2: u32 = 29;
    pub const X4R4G4B4: u32 = 30;
    pub const A2B10G10R10: u32 = 31;
    pub const G16R16: u32 = 34;
    pub const A8P8: u32 = 40;
    pub const P8: u32 = 41;
    pub const L8: u32 = 50;
    pub const A8L8: u32 = 51;
    pub const A4L4: u32 = 52;
    pub const V8U8: u32 = 60;
    pub const L6V5U5: u32 = 61;
    pub const X8L8V8U8: u32 = 62;
    pub const Q8W8V8U8: u32 = 63;
    pub const V16U16: u32 = 64;
    pub const W11V11U10: u32 = 65;
    pub const A2W10V10U10: u32 = 67;
    pub const D16_LOCKABLE: u32 = 70;
    pub const D32: u32 = 71;
    pub const D15S1: u32 = 73;
    pub const D24S8: u32 = 75;
    pub const D24X8: u32 = 77;
    pub const D24X4S4: u32 = 79;
    pub const D16: u32 = 80;
    pub const VERTEXDATA: u32 = 100;
    pub const INDEX16: u32 = 101;
    pub const INDEX32: u32 = 102;
}

pub mod devtype {
    pub const HAL: u32 = 1;
    pub const REF: u32 = 2;
    pub const SW: u32 = 3;
}

pub mod swap {
    pub const DISCARD: u32 = 1;
    pub const FLIP: u32 = 2;
    pub const COPY: u32 = 3;
    pub const COPY_VSYNC: u32 = 4;
}

const COLOR_FORMATS: [(u32, &str); 16] = [
    (format::R8G8B8, "D3DFMT_R8G8B8"),
    (format::A8R8G8B8, "D3DFMT_A8R8G8B8"),
    (format::X8R8G8B8, "D3DFMT_X8R8G8B8"),
    (format::R5G6B5, "D3DFMT_R5G6B5"),
    (format::X1R5G5B5, "D3DFMT_X1R5G5B5"),
    (format::A1R5G5B5, "D3DFMT_A1R5G5B5"),
    (format::A4R4G4B4, "D3DFMT_A4R4G4B4"),
    (format::R3G3B2, "D3DFMT_R3G3B2"),
    (format::A8, "D3DFMT_A8"),
    (format::A8R3G3B2, "D3DFMT_A8R3G3B2"),
    (format::X4R4G4B4, "D3DFMT_X4R4G4B4"),
    (format::A8P8, "D3DFMT_A8P8"),
    (format::P8, "D3DFMT_P8"),
    (format::L8, "D3DFMT_L8"),
    (format::A8L8, "D3DFMT_A8L8"),
    (format::A4L4, "D3DFMT_A4L4"),
];

const OTHER_FORMATS: [(u32, &str); 19] = [
    (format::A2B10G10R10, "D3DFMT_A2B10G10R10"),
    (format::G16R16, "D3DFMT_G16R16"),
    (format::V8U8, "D3DFMT_V8U8"),
    (format::L6V5U5, "D3DFMT_L6V5U5"),
    (format::X8L8V8U8, "D3DFMT_X8L8V8U8"),
    (format::Q8W8V8U8, "D3DFMT_Q8W8V8U8"),
    (format::V16U16, "D3DFMT_V16U16"),
    (format::W11V11U10, "D3DFMT_W11V11U10"),
    (format::A2W10V10U10, "D3DFMT_A2W10V10U10"),
    (format::D16_LOCKABLE, "D3DFMT_D16_LOCKABLE"),
    (format::D32, "D3DFMT_D32"),
    (format::D15S1, "D3DFMT_D15S1"),
    (format::D24S8, "D3DFMT_D24S8"),
    (format::D24X8, "D3DFMT_D24X8"),
    (format::D24X4S4, "D3DFMT_D24X4S4"),
    (format::D16, "D3DFMT_D16"),
    (format::VERTEXDATA, "D3DFMT_VERTEXDATA"),
    (format::INDEX16, "D3DFMT_INDEX16"),
    (format::INDEX32, "D3DFMT_INDEX32"),
];

fn lookup(table: &[(u32, &'static str)], value: u32) -> Option<&'static str> {
    table.iter().find(|(v, _)| *v == value).map(|(_, name)| *name)
}

pub fn format_name(value: u32) -> &'static str {
    if value == format::UNKNOWN {
        return "D3DFMT_UNKNOWN";
    }
    lookup(&COLOR_FORMATS, value)
        .or_else(|| lookup(&OTHER_FORMATS, value))
        .unwrap_or("UNKNOWN_D3DFORMAT")
}

pub fn device_type_name(value: u32) -> &'static str {
    match value {
        devtype::HAL => "D3DDEVTYPE_HAL",
        devtype::REF => "D3DDEVTYPE_REF",
        devtype::SW => "D3DDEVTYPE_SW",
        _ => "UNKNOWN_DEVICE_TYPE",
    }
}

pub fn validate_format(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(value) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for D3DFORMAT", -50);
    };

    if lookup(&COLOR_FORMATS, value).is_some() {
        ValidationResult::valid("Known D3DFORMAT", 95)
    } else if lookup(&OTHER_FORMATS, value).is_some() {
        ValidationResult::valid("Known depth/index/bump D3DFORMAT", 85)
    } else if value == format::UNKNOWN {
        ValidationResult::valid("D3DFMT_UNKNOWN (valid but unusual)", 60)
    } else if (32..=200).contains(&value) {
        ValidationResult::valid("Plausible D3DFORMAT value", 40)
    } else {
        ValidationResult::invalid("Unlikely D3DFORMAT value", 10)
    }
}

pub fn validate_device_type(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(value) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for D3DDEVTYPE", 0);
    };

    match value {
        devtype::HAL | devtype::REF | devtype::SW => ValidationResult::valid("Valid D3DDEVTYPE", 95),
        v if v <= 10 => ValidationResult::valid("Plausible D3DDEVTYPE value", 10),
        _ => ValidationResult::invalid("Invalid D3DDEVTYPE", -50),
    }
}

pub fn validate_multisample_type(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(value) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for D3DMULTISAMPLE_TYPE", 0);
    };

    match value {
        0 => ValidationResult::valid("No multisampling (most common)", 95),
        2..=16 => ValidationResult::valid("Valid multisampling level", 90),
        v if v <= 20 => ValidationResult::valid("Plausible multisampling value", 40),
        _ => ValidationResult::invalid("Invalid multisampling value", -25),
    }
}

pub fn validate_swap_effect(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(value) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for D3DSWAPEFFECT", 0);
    };

    match value {
        swap::DISCARD => ValidationResult::valid("Discard swap effect (most common)", 95),
        swap::FLIP => ValidationResult::valid("Flip swap effect", 90),
        swap::COPY => ValidationResult::valid("Copy swap effect", 85),
        swap::COPY_VSYNC => ValidationResult::valid("Copy with VSync swap effect", 80),
        v if v <= 10 => ValidationResult::valid("Plausible swap effect value", 20),
        _ => ValidationResult::invalid("Invalid swap effect", -5),
    }
}
