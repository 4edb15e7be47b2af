// Tue Jan 13 2026 - Alex

use crate::validation::{dword, ValidationResult};

// open bounds for an unverifiable 32-bit user-mode handle
const PLAUSIBLE_HANDLE_MIN: u32 = 0x0001_0000;
const PLAUSIBLE_HANDLE_MAX: u32 = 0x7FFF_FFFF;

/// Asks the host window manager whether `handle` names a live window.
#[cfg(windows)]
pub fn is_live_window(handle: u32) -> bool {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::IsWindow;

    let hwnd = HWND(handle as usize as *mut std::ffi::c_void);
    unsafe { IsWindow(hwnd).as_bool() }
}

#[cfg(not(windows))]
pub fn is_live_window(_handle: u32) -> bool {
    false
}

pub fn validate_window_handle(bytes: &[u8], expected_size: usize) -> ValidationResult {
    validate_window_handle_with(bytes, expected_size, is_live_window)
}

/// Window-handle heuristic with an injected liveness check.
pub fn validate_window_handle_with<F>(bytes: &[u8], expected_size: usize, is_live: F) -> ValidationResult
where
    F: Fn(u32) -> bool,
{
    let Some(handle) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for HWND", -50);
    };

    if handle == 0 {
        ValidationResult::valid("NULL HWND (valid)", 80)
    } else if is_live(handle) {
        ValidationResult::valid("Valid window handle", 95)
    } else if handle > PLAUSIBLE_HANDLE_MIN && handle < PLAUSIBLE_HANDLE_MAX {
        ValidationResult::valid("Plausible window handle (cannot verify)", 50)
    } else {
        ValidationResult::invalid("Invalid window handle", -50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le(v: u32) -> [u8; 4] {
        v.to_le_bytes()
    }

    #[test]
    fn test_null_handle() {
        let r = validate_window_handle_with(&le(0), 4, |_| false);
        assert!(r.is_valid);
        assert_eq!(r.confidence, 80);
    }

    #[test]
    fn test_live_window_wins() {
        let r = validate_window_handle_with(&le(0x0002_0A4C), 4, |h| h == 0x0002_0A4C);
        assert_eq!(r.confidence, 95);
    }

    #[test]
    fn test_unverifiable_handles() {
        let plausible = validate_window_handle_with(&le(0x0003_0000), 4, |_| false);
        assert!(plausible.is_valid);
        assert_eq!(plausible.confidence, 50);

        for v in [0x1234, 0x0001_0000, 0x7FFF_FFFF, 0xFFFF_FFFF] {
            let r = validate_window_handle_with(&le(v), 4, |_| false);
            assert!(!r.is_valid);
            assert_eq!(r.confidence, -50);
        }
    }

    #[test]
    fn test_size_mismatch() {
        let r = validate_window_handle(&[0; 8], 8);
        assert!(!r.is_valid);
        assert_eq!(r.confidence, -50);
    }
}
