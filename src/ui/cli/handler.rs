// Wed Jan 15 2026 - Alex

use anyhow::Context;
use colored::Colorize;

use super::args::{Args, Command, DumpArgs, ListArgs, ScanArgs, SourceArgs, ValidateArgs};
use crate::config::Config;
use crate::memory::{Address, LocalMemory, MemoryReader, SnapshotMemory};
use crate::scanner::{describe_value, MemoryScanner, ScanReport};
use crate::structure::{find_descriptor, FieldVerdict, StructDescriptor, StructureValidator, KNOWN_STRUCTURES};
use crate::ui::banner::Banner;
use crate::utils::{dump_memory, format_bytes, logging};

/// Memory backing a command.
enum Source {
    Local(LocalMemory),
    Snapshot(SnapshotMemory),
}

impl Source {
    fn open(args: &SourceArgs, default_base: u64) -> anyhow::Result<Self> {
        let Some(path) = &args.snapshot else {
            return Ok(Source::Local(LocalMemory::new()));
        };

        let base = Address::new(args.base.unwrap_or(default_base));
        let snapshot = SnapshotMemory::from_file(path, base)
            .with_context(|| format!("failed to map snapshot {:?}", path))?;
        Ok(Source::Snapshot(snapshot))
    }

    fn reader(&self) -> &dyn MemoryReader {
        match self {
            Source::Local(mem) => mem,
            Source::Snapshot(mem) => mem,
        }
    }
}

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        if args.no_color {
            colored::control::set_override(false);
        }
        if !args.quiet {
            Banner::print_default();
        }

        let config = self.load_config(&args)?;
        self.setup_logging(&args, &config)?;

        match args.command {
            Command::Run => self.handle_run(&config),
            Command::Scan(scan_args) => self.handle_scan(scan_args, config),
            Command::Validate(validate_args) => self.handle_validate(validate_args, &config),
            Command::Dump(dump_args) => self.handle_dump(dump_args),
            Command::List(list_args) => self.handle_list(list_args),
        }
    }

    fn load_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path).with_context(|| format!("failed to load config {:?}", path))?,
            None => Config::default(),
        };

        if let Some(dir) = &args.log_dir {
            config.logging.directory = dir.clone();
        }
        if let Some(level) = &args.log_level {
            config.logging.level = level.clone();
        }
        Ok(config)
    }

    fn setup_logging(&self, args: &Args, config: &Config) -> anyhow::Result<()> {
        let level = logging::level_from_str(&config.logging.level);

        if args.no_file_log {
            logging::init_stderr(level);
            return Ok(());
        }

        logging::init(&config.logging).context("failed to initialize file logging")?;
        self.info(&format!(
            "Logging to {:?} ({})",
            config.logging.directory.join(format!("{}.log", config.logging.prefix)),
            config.logging.level
        ));
        Ok(())
    }

    fn handle_run(&self, config: &Config) -> anyhow::Result<()> {
        config.validate()?;
        self.info(&format!(
            "Scanning {} bytes at {} in this process",
            config.scan.length,
            config.scan_address()
        ));

        let report = crate::run_validation(config);
        self.print_report(&report);
        Ok(())
    }

    fn handle_scan(&self, args: ScanArgs, mut config: Config) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        if let Some(address) = args.address {
            config.scan.address = address;
        }
        if let Some(length) = args.length {
            config.scan.length = length;
        }
        if let Some(category) = args.category {
            config.scan.category = category;
        }
        config.validate()?;

        let structures = args
            .structures
            .iter()
            .map(|name| find_descriptor(name))
            .collect::<Result<Vec<&'static StructDescriptor>, _>>()?;

        let source = Source::open(&args.source, config.scan.address)?;
        self.info(&format!(
            "Scanning {} at {} in {}",
            format_bytes(config.scan.length as u64),
            config.scan_address(),
            source.reader().describe()
        ));

        let mut scanner = MemoryScanner::new(source.reader()).with_category(config.scan.category.as_str());
        if !structures.is_empty() {
            scanner = scanner.with_structures(&structures);
        }

        let report = scanner.scan(config.scan_address(), config.scan.length);
        self.print_report(&report);
        Ok(())
    }

    fn handle_validate(&self, args: ValidateArgs, config: &Config) -> anyhow::Result<()> {
        args.source.validate().map_err(|e| anyhow::anyhow!(e))?;

        let descriptor = find_descriptor(&args.structure)?;
        let source = Source::open(&args.source, args.address)?;
        let category = args.category.as_deref().unwrap_or(config.scan.category.as_str());
        let validator = StructureValidator::new(source.reader()).with_category(category);

        let verdict = validator.validate_detailed(Address::new(args.address), descriptor)?;

        if !self.quiet {
            println!("{}", format!("{} at {}", descriptor.name, verdict.address).cyan().bold());
            for field in &verdict.evaluation.fields {
                let confidence = format!("{:>4}%", field.result.confidence);
                let confidence = if field.result.is_passing(50) {
                    confidence.green()
                } else if field.result.is_valid {
                    confidence.yellow()
                } else {
                    confidence.red()
                };
                println!(
                    "  {:<32} {} {} ({})",
                    field.field.name,
                    confidence,
                    field_value(field, &verdict.bytes),
                    field.result.reason
                );
            }
        }

        if verdict.accepted() {
            self.success(&format!(
                "{} validation PASSED (avg confidence: {}%)",
                descriptor.name,
                verdict.mean_confidence()
            ));
            Ok(())
        } else {
            anyhow::bail!(
                "{} validation FAILED (avg confidence: {}%{})",
                descriptor.name,
                verdict.mean_confidence(),
                if verdict.overall_valid { "" } else { ", vetoed" }
            )
        }
    }

    fn handle_dump(&self, args: DumpArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let source = Source::open(&args.source, args.address)?;
        for line in dump_memory(source.reader(), Address::new(args.address), args.length, args.interpret) {
            log::info!(target: "dump", "{}", line);
            if !self.quiet {
                println!("{}", line);
            }
        }
        Ok(())
    }

    fn handle_list(&self, args: ListArgs) -> anyhow::Result<()> {
        let structures: Vec<&'static StructDescriptor> = match &args.structure {
            Some(name) => vec![find_descriptor(name)?],
            None => KNOWN_STRUCTURES.to_vec(),
        };
        let show_fields = args.fields || args.structure.is_some();

        for descriptor in structures {
            println!(
                "{} ({} bytes, {} fields)",
                descriptor.name.cyan().bold(),
                descriptor.total_size,
                descriptor.field_count()
            );
            if show_fields {
                for field in descriptor.fields {
                    println!(
                        "  +0x{:04x} {:>4}  {:<36} {}",
                        field.offset,
                        field.size,
                        field.name,
                        field.validator.kind().dimmed()
                    );
                }
            }
        }
        Ok(())
    }

    fn print_report(&self, report: &ScanReport) {
        if self.quiet {
            return;
        }
        for line in report.render_lines() {
            println!("{}", line);
        }

        let stats = &report.statistics;
        self.success(&format!(
            "Identified {} structures covering {} of {} bytes ({:.1}%)",
            stats.structures_found, stats.identified_bytes, stats.total_scanned, stats.identified_percentage
        ));
        if stats.unreadable_offsets > 0 {
            self.warn(&format!("{} offsets were unreadable", stats.unreadable_offsets));
        }
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[*]".blue(), message);
        }
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[+]".green(), message);
        }
    }

    fn warn(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[!]".yellow(), message);
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded value of one scored field, taken from the structure's bytes.
fn field_value(field: &FieldVerdict, bytes: &[u8]) -> String {
    field
        .field
        .slice(bytes)
        .map(|raw| describe_value(field.field, raw))
        .unwrap_or_else(|| "<missing>".to_string())
}
