// Tue Jan 15 2026 - Alex

pub mod config;
pub mod memory;
pub mod scanner;
pub mod structure;
pub mod ui;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use memory::{Address, LocalMemory, MemoryReader, SnapshotMemory};
pub use scanner::{MemoryScanner, ScanReport};
pub use structure::{StructureValidator, KNOWN_STRUCTURES};
pub use validation::{FieldValidator, ValidationResult};

/// Scan the configured range of the current process against every known layout.
pub fn run_validation(config: &Config) -> ScanReport {
    log::info!(
        target: config.scan.category.as_str(),
        "=== D3D8 structure scan: {} + {} bytes ===",
        config.scan_address(),
        config.scan.length
    );

    MemoryScanner::new(LocalMemory::new())
        .with_category(config.scan.category.as_str())
        .scan(config.scan_address(), config.scan.length)
}
