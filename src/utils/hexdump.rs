// Tue Jan 13 2026 - Alex

use crate::memory::{read_prefix, Address, MemoryReader};

pub const BYTES_PER_LINE: usize = 16;

/// 16 bytes per line: offset, hex bytes, printable ASCII.
/// With `interpret`, each complete 4-byte group is also shown as a
/// little-endian DWORD in hex and unsigned decimal.
pub fn format_hexdump(bytes: &[u8], interpret: bool) -> Vec<String> {
    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(line, chunk)| {
            let hex = chunk
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ");
            let ascii: String = chunk
                .iter()
                .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '.' })
                .collect();
            if !interpret {
                return format!("  {:04X}: {:<47} {}", line * BYTES_PER_LINE, hex, ascii);
            }
            format!(
                "  {:04X}: {:<47} {:<16} | {}",
                line * BYTES_PER_LINE,
                hex,
                ascii,
                interpret_dwords(chunk)
            )
        })
        .collect()
}

fn interpret_dwords(chunk: &[u8]) -> String {
    chunk
        .chunks_exact(4)
        .map(|group| {
            let value = u32::from_le_bytes([group[0], group[1], group[2], group[3]]);
            format!("0x{:08X} ({})", value, value)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Dump `length` bytes at `address`, stopping at the first unreadable byte.
/// The header line names the range; a trailer notes a short read.
pub fn dump_memory<R: MemoryReader + ?Sized>(
    reader: &R,
    address: Address,
    length: usize,
    interpret: bool,
) -> Vec<String> {
    let mut lines = vec![format!("Memory at {} ({} bytes):", address, length)];

    match read_prefix(reader, address, length) {
        Some(bytes) => {
            lines.extend(format_hexdump(&bytes, interpret));
            if bytes.len() < length {
                lines.push(format!("  ... {} bytes unreadable", length - bytes.len()));
            }
        }
        None => lines.push("  <unreadable>".to_string()),
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Protection, SnapshotMemory};

    #[test]
    fn test_format_hexdump() {
        let mut bytes = b"D3DDISPLAYMODE".to_vec();
        bytes.extend_from_slice(&[0x00, 0x01, 0xFF]);
        let lines = format_hexdump(&bytes, false);

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "  0000: 44 33 44 44 49 53 50 4C 41 59 4D 4F 44 45 00 01 D3DDISPLAYMODE.."
        );
        assert_eq!(lines[1], format!("  0010: {:<47} .", "FF"));
        assert!(format_hexdump(&[], false).is_empty());
    }

    #[test]
    fn test_dump_memory_short_read() {
        let mut mem = SnapshotMemory::new();
        mem.add_region(Address::new(0x1000), vec![0x41; 20], Protection::Read);

        let lines = dump_memory(&mem, Address::new(0x1000), 32, false);
        assert_eq!(lines[0], "Memory at 0x00001000 (32 bytes):");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "  ... 12 bytes unreadable");

        let lines = dump_memory(&mem, Address::new(0x9000), 16, false);
        assert_eq!(lines[1], "  <unreadable>");
    }

    #[test]
    fn test_format_hexdump_interpreted() {
        let mut bytes: Vec<u8> = [1024u32, 768, 60, 21].iter().flat_map(|v| v.to_le_bytes()).collect();
        bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x02]);
        let lines = format_hexdump(&bytes, true);

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "  0000: 00 04 00 00 00 03 00 00 3C 00 00 00 15 00 00 00 ........<....... | \
             0x00000400 (1024)  0x00000300 (768)  0x0000003C (60)  0x00000015 (21)"
        );
        // trailing partial group has no DWORD
        assert_eq!(
            lines[1],
            format!("  0010: {:<47} {:<16} | 0xFFFFFFFF (4294967295)", "FF FF FF FF 01 02", "......")
        );
    }

    #[test]
    fn test_dump_memory_interpreted() {
        let mut mem = SnapshotMemory::new();
        mem.add_region(Address::new(0x1000), 0x15u32.to_le_bytes().to_vec(), Protection::Read);

        let lines = dump_memory(&mem, Address::new(0x1000), 4, true);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("| 0x00000015 (21)"));
    }
}
