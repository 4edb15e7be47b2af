// Tue Jan 15 2026 - Alex

pub mod memory_scanner;
pub mod report;
pub mod result;

pub use memory_scanner::{MemoryScanner, SCAN_STEP};
pub use report::{describe_value, format_raw_value, ScanReport, ScanStatistics, SCAN_COMPLETE_LOG};
pub use result::{IdentifiedStruct, ScanResult, NO_MATCH};
