// Tue Jan 13 2026 - Alex

use crate::validation::{dword, ValidationResult};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BehaviorFlags: u32 {
        const FPU_PRESERVE = 0x0000_0002;
        const MULTITHREADED = 0x0000_0004;
        const PUREDEVICE = 0x0000_0010;
        const SOFTWARE_VERTEXPROCESSING = 0x0000_0020;
        const HARDWARE_VERTEXPROCESSING = 0x0000_0040;
        const MIXED_VERTEXPROCESSING = 0x0000_0080;
    }
}

impl BehaviorFlags {
    pub const VERTEX_PROCESSING: Self = Self::SOFTWARE_VERTEXPROCESSING
        .union(Self::HARDWARE_VERTEXPROCESSING)
        .union(Self::MIXED_VERTEXPROCESSING);
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PresentFlags: u32 {
        const LOCKABLE_BACKBUFFER = 0x0000_0001;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Caps: u32 {
        const READ_SCANLINE = 0x0002_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Caps2: u32 {
        const NO2DDURING3DSCENE = 0x0000_0002;
        const FULLSCREENGAMMA = 0x0002_0000;
        const CANRENDERWINDOWED = 0x0008_0000;
        const CANCALIBRATEGAMMA = 0x0010_0000;
        const RESERVED = 0x0200_0000;
        const CANMANAGERESOURCE = 0x1000_0000;
        const DYNAMICTEXTURES = 0x2000_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Caps3: u32 {
        const RESERVED = 0x8000_001f;
        const ALPHA_FULLSCREEN_FLIP_OR_DISCARD = 0x0000_0020;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PresentInterval: u32 {
        const ONE = 0x0000_0001;
        const TWO = 0x0000_0002;
        const THREE = 0x0000_0004;
        const FOUR = 0x0000_0008;
        const IMMEDIATE = 0x8000_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CursorCaps: u32 {
        const COLOR = 0x0000_0001;
        const LOWRES = 0x0000_0002;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DevCaps: u32 {
        const EXECUTESYSTEMMEMORY = 0x0000_0010;
        const EXECUTEVIDEOMEMORY = 0x0000_0020;
        const TLVERTEXSYSTEMMEMORY = 0x0000_0040;
        const TLVERTEXVIDEOMEMORY = 0x0000_0080;
        const TEXTURESYSTEMMEMORY = 0x0000_0100;
        const TEXTUREVIDEOMEMORY = 0x0000_0200;
        const DRAWPRIMTLVERTEX = 0x0000_0400;
        const CANRENDERAFTERFLIP = 0x0000_0800;
        const TEXTURENONLOCALVIDMEM = 0x0000_1000;
        const DRAWPRIMITIVES2 = 0x0000_2000;
        const SEPARATETEXTUREMEMORIES = 0x0000_4000;
        const DRAWPRIMITIVES2EX = 0x0000_8000;
        const HWTRANSFORMANDLIGHT = 0x0001_0000;
        const CANBLTSYSTONONLOCAL = 0x0002_0000;
        const HWRASTERIZATION = 0x0008_0000;
        const PUREDEVICE = 0x0010_0000;
        const QUINTICRTPATCHES = 0x0020_0000;
        const RTPATCHES = 0x0040_0000;
        const RTPATCHHANDLEZERO = 0x0080_0000;
        const NPATCHES = 0x0100_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PrimitiveMiscCaps: u32 {
        const MASKZ = 0x0000_0002;
        const CULLNONE = 0x0000_0010;
        const CULLCW = 0x0000_0020;
        const CULLCCW = 0x0000_0040;
        const COLORWRITEENABLE = 0x0000_0080;
        const CLIPPLANESCALEDPOINTS = 0x0000_0100;
        const CLIPTLVERTS = 0x0000_0200;
        const TSSARGTEMP = 0x0000_0400;
        const BLENDOP = 0x0000_0800;
        const NULLREFERENCE = 0x0000_1000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RasterCaps: u32 {
        const DITHER = 0x0000_0001;
        const PAT = 0x0000_0008;
        const ZTEST = 0x0000_0010;
        const FOGVERTEX = 0x0000_0080;
        const FOGTABLE = 0x0000_0100;
        const ANTIALIASEDGES = 0x0000_1000;
        const MIPMAPLODBIAS = 0x0000_2000;
        const ZBIAS = 0x0000_4000;
        const ZBUFFERLESSHSR = 0x0000_8000;
        const FOGRANGE = 0x0001_0000;
        const ANISOTROPY = 0x0002_0000;
        const WBUFFER = 0x0004_0000;
        const WFOG = 0x0010_0000;
        const ZFOG = 0x0020_0000;
        const COLORPERSPECTIVE = 0x0040_0000;
        const STRETCHBLTMULTISAMPLE = 0x0080_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureCaps: u32 {
        const PERSPECTIVE = 0x0000_0001;
        const POW2 = 0x0000_0002;
        const ALPHA = 0x0000_0004;
        const SQUAREONLY = 0x0000_0020;
        const TEXREPEATNOTSCALEDBYSIZE = 0x0000_0040;
        const ALPHAPALETTE = 0x0000_0080;
        const NONPOW2CONDITIONAL = 0x0000_0100;
        const PROJECTED = 0x0000_0400;
        const CUBEMAP = 0x0000_0800;
        const VOLUMEMAP = 0x0000_2000;
        const MIPMAP = 0x0000_4000;
        const MIPVOLUMEMAP = 0x0000_8000;
        const MIPCUBEMAP = 0x0001_0000;
        const CUBEMAP_POW2 = 0x0002_0000;
        const VOLUMEMAP_POW2 = 0x0004_0000;
    }
}

pub fn validate_behavior_flags(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for DWORD behavior flags", 0);
    };

    if raw == 0 {
        return ValidationResult::valid("No behavior flags set (valid but unusual)", 40);
    }

    let flags = BehaviorFlags::from_bits_retain(raw);
    let vertex_modes = flags.intersection(BehaviorFlags::VERTEX_PROCESSING).bits().count_ones();

    if vertex_modes > 1 {
        return ValidationResult::invalid("Invalid: Multiple vertex processing flags set", -50);
    }
    if vertex_modes == 0 {
        return ValidationResult::invalid("Missing vertex processing flag (required)", 20);
    }
    if flags.contains(BehaviorFlags::PUREDEVICE | BehaviorFlags::SOFTWARE_VERTEXPROCESSING) {
        return ValidationResult::invalid("Invalid: Pure device cannot use software vertex processing", -50);
    }
    if BehaviorFlags::from_bits(raw).is_none() {
        return ValidationResult::valid("Contains unknown flags (may be valid for newer runtimes)", 30);
    }

    let hw = BehaviorFlags::HARDWARE_VERTEXPROCESSING;
    if flags == hw {
        ValidationResult::valid("Standard hardware vertex processing", 95)
    } else if flags == BehaviorFlags::SOFTWARE_VERTEXPROCESSING {
        ValidationResult::valid("Software vertex processing", 90)
    } else if flags == BehaviorFlags::MIXED_VERTEXPROCESSING {
        ValidationResult::valid("Mixed vertex processing", 85)
    } else if flags == hw | BehaviorFlags::PUREDEVICE {
        ValidationResult::valid("Pure hardware device (high performance)", 95)
    } else if flags.contains(BehaviorFlags::MULTITHREADED) {
        ValidationResult::valid("Valid flags with multithreading", 85)
    } else {
        ValidationResult::valid("Valid flag combination", 80)
    }
}

pub fn validate_present_flags(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for present flags", 0);
    };

    if raw == 0 {
        return ValidationResult::valid("No present flags (common)", 90);
    }

    let unknown = raw & !PresentFlags::all().bits();
    if unknown == 0 {
        ValidationResult::valid("Valid present flags", 85)
    } else if unknown < 0x100 {
        ValidationResult::valid("Contains unknown flags (may be valid)", 25)
    } else {
        ValidationResult::invalid("Invalid flags detected", -10)
    }
}

pub fn validate_caps(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for DWORD caps flags", 0);
    };

    if raw == 0 {
        ValidationResult::valid("No caps flags (common)", 85)
    } else if raw == Caps::READ_SCANLINE.bits() {
        ValidationResult::valid("READ_SCANLINE cap", 90)
    } else if Caps::from_bits(raw).is_some() {
        ValidationResult::valid("Valid caps combination", 80)
    } else if raw < 0x10_0000 {
        ValidationResult::valid("Plausible caps value", 50)
    } else {
        ValidationResult::invalid("Suspicious caps value", 20)
    }
}

pub fn validate_caps2(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for DWORD caps2 flags", 0);
    };

    if raw == 0 {
        ValidationResult::valid("No caps2 flags", 70)
    } else if Caps2::from_bits(raw).is_some() {
        ValidationResult::valid("Valid caps2 combination", 90)
    } else if raw < 0x8000_0000 {
        ValidationResult::valid("Plausible caps2 value", 50)
    } else {
        ValidationResult::invalid("Suspicious caps2 value", 10)
    }
}

pub fn validate_caps3(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for DWORD caps3 flags", 0);
    };

    if raw == 0 {
        ValidationResult::valid("No caps3 flags", 80)
    } else if raw & !Caps3::all().bits() == 0 {
        ValidationResult::valid("Valid caps3 combination", 85)
    } else if raw < 0x100 {
        ValidationResult::valid("Plausible caps3 value", 50)
    } else {
        ValidationResult::invalid("Suspicious caps3 value", 25)
    }
}

pub fn validate_presentation_intervals(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for presentation intervals", 0);
    };

    if raw == 0 {
        ValidationResult::valid("Default presentation interval", 90)
    } else if PresentInterval::from_bits(raw).is_some() {
        ValidationResult::valid("Valid presentation intervals", 95)
    } else if raw < 0x100 {
        ValidationResult::valid("Plausible presentation interval", 60)
    } else {
        ValidationResult::invalid("Invalid presentation intervals", 20)
    }
}

pub fn validate_cursor_caps(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for cursor caps", 0);
    };

    if raw == 0 {
        ValidationResult::valid("No cursor capabilities", 85)
    } else if CursorCaps::from_bits(raw).is_some() {
        ValidationResult::valid("Valid cursor capabilities", 90)
    } else if raw < 0x10 {
        ValidationResult::valid("Plausible cursor caps", 50)
    } else {
        ValidationResult::invalid("Invalid cursor capabilities", 20)
    }
}

pub fn validate_dev_caps(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for device caps", 0);
    };

    if raw == 0 {
        return ValidationResult::invalid("No device capabilities (suspicious)", 30);
    }

    let caps = DevCaps::from_bits_retain(raw);
    if caps.intersects(DevCaps::DRAWPRIMITIVES2 | DevCaps::HWRASTERIZATION) {
        ValidationResult::valid("Valid device capabilities", 90)
    } else if DevCaps::from_bits(raw).is_some() {
        ValidationResult::valid("Recognized device caps", 80)
    } else if raw < 0x1000_0000 {
        ValidationResult::valid("Plausible device caps", 60)
    } else {
        ValidationResult::invalid("Suspicious device capabilities", 30)
    }
}

pub fn validate_primitive_misc_caps(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for PrimitiveMiscCaps", 0);
    };

    if PrimitiveMiscCaps::from_bits(raw).is_some() {
        ValidationResult::valid("All PrimitiveMiscCaps flags are valid", 90)
    } else {
        ValidationResult::valid("Contains unknown PrimitiveMiscCaps flags", 40)
    }
}

pub fn validate_raster_caps(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for RasterCaps", 0);
    };

    if RasterCaps::from_bits(raw).is_some() {
        ValidationResult::valid("All RasterCaps flags are valid", 90)
    } else {
        ValidationResult::valid("Contains unknown RasterCaps flags", 40)
    }
}

// Capabilities that only make sense together with a parent bit.
const TEXTURE_DEPENDENCIES: [(TextureCaps, TextureCaps, &str); 4] = [
    (TextureCaps::MIPCUBEMAP, TextureCaps::CUBEMAP, "Valid caps but MIPCUBEMAP without CUBEMAP"),
    (TextureCaps::MIPVOLUMEMAP, TextureCaps::VOLUMEMAP, "Valid caps but MIPVOLUMEMAP without VOLUMEMAP"),
    (TextureCaps::CUBEMAP_POW2, TextureCaps::CUBEMAP, "Valid caps but CUBEMAP_POW2 without CUBEMAP"),
    (TextureCaps::VOLUMEMAP_POW2, TextureCaps::VOLUMEMAP, "Valid caps but VOLUMEMAP_POW2 without VOLUMEMAP"),
];

pub fn validate_texture_caps(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for texture caps", 0);
    };

    if raw == 0 {
        return ValidationResult::valid("No texture capabilities", 60);
    }

    if let Some(caps) = TextureCaps::from_bits(raw) {
        for (child, parent, reason) in TEXTURE_DEPENDENCIES {
            if caps.contains(child) && !caps.contains(parent) {
                return ValidationResult::valid(reason, 80);
            }
        }
        return ValidationResult::valid("Valid D3D8 texture caps", 95);
    }

    let known = TextureCaps::from_bits_truncate(raw);
    let unknown = raw & !TextureCaps::all().bits();
    if unknown & 0xFFFF_0000 == 0 {
        ValidationResult::valid("Seems to contain unknown D3D texture caps", 70)
    } else if !known.is_empty() {
        ValidationResult::valid("Mixed valid/invalid texture caps", 50)
    } else {
        ValidationResult::invalid("Invalid texture caps flags", -50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le(v: u32) -> [u8; 4] {
        v.to_le_bytes()
    }

    #[test]
    fn test_behavior_flags() {
        let hw = BehaviorFlags::HARDWARE_VERTEXPROCESSING.bits();
        let sw = BehaviorFlags::SOFTWARE_VERTEXPROCESSING.bits();
        let pure = BehaviorFlags::PUREDEVICE.bits();
        let mt = BehaviorFlags::MULTITHREADED.bits();

        assert_eq!(validate_behavior_flags(&le(hw), 4).confidence, 95);
        assert_eq!(validate_behavior_flags(&le(sw), 4).confidence, 90);
        assert_eq!(validate_behavior_flags(&le(hw | pure), 4).confidence, 95);
        assert_eq!(validate_behavior_flags(&le(hw | mt), 4).confidence, 85);
        assert_eq!(validate_behavior_flags(&le(hw | 0x2), 4).confidence, 80);

        let zero = validate_behavior_flags(&le(0), 4);
        assert!(zero.is_valid);
        assert_eq!(zero.confidence, 40);
    }

    #[test]
    fn test_behavior_flags_rejections() {
        let hw = BehaviorFlags::HARDWARE_VERTEXPROCESSING.bits();
        let sw = BehaviorFlags::SOFTWARE_VERTEXPROCESSING.bits();

        let both = validate_behavior_flags(&le(hw | sw), 4);
        assert!(!both.is_valid);
        assert_eq!(both.confidence, -50);

        let none = validate_behavior_flags(&le(0x4), 4);
        assert!(!none.is_valid);
        assert_eq!(none.confidence, 20);

        let pure_sw = validate_behavior_flags(&le(sw | 0x10), 4);
        assert!(!pure_sw.is_valid);
        assert_eq!(pure_sw.confidence, -50);

        let unknown = validate_behavior_flags(&le(hw | 0x1000), 4);
        assert!(unknown.is_valid);
        assert_eq!(unknown.confidence, 30);
    }

    #[test]
    fn test_present_flags() {
        assert_eq!(validate_present_flags(&le(0), 4).confidence, 90);
        assert_eq!(validate_present_flags(&le(1), 4).confidence, 85);
        assert_eq!(validate_present_flags(&le(0x10), 4).confidence, 25);
        assert!(!validate_present_flags(&le(0x1000), 4).is_valid);
    }

    #[test]
    fn test_caps_zero_is_not_strongly_negative() {
        for validate in [
            validate_caps,
            validate_caps2,
            validate_caps3,
            validate_presentation_intervals,
            validate_cursor_caps,
            validate_primitive_misc_caps,
            validate_raster_caps,
            validate_texture_caps,
        ] {
            let r = validate(&le(0), 4);
            assert!(r.is_valid);
            assert!(r.confidence >= 60);
        }

        let dev = validate_dev_caps(&le(0), 4);
        assert!(!dev.is_valid);
        assert_eq!(dev.confidence, 30);
    }

    #[test]
    fn test_dev_caps() {
        let essential = DevCaps::DRAWPRIMITIVES2 | DevCaps::HWRASTERIZATION;
        assert_eq!(validate_dev_caps(&le(essential.bits()), 4).confidence, 90);
        assert_eq!(validate_dev_caps(&le(DevCaps::EXECUTEVIDEOMEMORY.bits()), 4).confidence, 80);
        assert_eq!(validate_dev_caps(&le(0x0400_0000), 4).confidence, 60);
        assert!(!validate_dev_caps(&le(0x4000_0000), 4).is_valid);
    }

    #[test]
    fn test_texture_caps_dependencies() {
        let orphan = TextureCaps::MIPCUBEMAP | TextureCaps::MIPMAP;
        let r = validate_texture_caps(&le(orphan.bits()), 4);
        assert_eq!(r.confidence, 80);

        let complete = TextureCaps::MIPCUBEMAP | TextureCaps::CUBEMAP | TextureCaps::MIPMAP;
        assert_eq!(validate_texture_caps(&le(complete.bits()), 4).confidence, 95);

        assert_eq!(validate_texture_caps(&le(0x8 | 0x1), 4).confidence, 70);
        assert_eq!(validate_texture_caps(&le(0x1000_0001), 4).confidence, 50);
        assert!(!validate_texture_caps(&le(0x1000_0000), 4).is_valid);
    }

    #[test]
    fn test_caps_bands() {
        assert_eq!(validate_caps(&le(Caps::READ_SCANLINE.bits()), 4).confidence, 90);
        assert_eq!(validate_caps(&le(0x40), 4).confidence, 50);
        assert!(!validate_caps(&le(0x0100_0000), 4).is_valid);

        assert_eq!(validate_caps2(&le(Caps2::CANRENDERWINDOWED.bits()), 4).confidence, 90);
        assert_eq!(validate_caps3(&le(0x20), 4).confidence, 85);
        assert_eq!(validate_presentation_intervals(&le(0x8000_0001), 4).confidence, 95);
        assert_eq!(validate_cursor_caps(&le(0x3), 4).confidence, 90);
        assert_eq!(validate_raster_caps(&le(0x4), 4).confidence, 40);
    }
}
