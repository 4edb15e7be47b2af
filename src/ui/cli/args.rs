// Wed Jan 15 2026 - Alex

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::parse_address;

#[derive(Parser, Debug)]
#[command(name = "d3d8-struct-scan")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Heuristic Direct3D 8 structure recognition over live or dumped memory", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log to stderr through env_logger instead of category files
    #[arg(long, global = true)]
    pub no_file_log: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the configured address range of this process
    Run,
    Scan(ScanArgs),
    Validate(ValidateArgs),
    Dump(DumpArgs),
    /// Print the known structure layouts
    List(ListArgs),
}

/// Where memory comes from: this process, or a raw dump mapped at `base`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Address the first snapshot byte maps to (defaults to --address)
    #[arg(long, value_parser = parse_address_arg, requires = "snapshot")]
    pub base: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[arg(short, long, value_parser = parse_address_arg)]
    pub address: Option<u64>,

    #[arg(short = 'n', long)]
    pub length: Option<usize>,

    #[arg(long)]
    pub category: Option<String>,

    /// Restrict the scan to these structures, in tie-break order
    #[arg(short, long, value_delimiter = ',')]
    pub structures: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[arg(short, long, value_parser = parse_address_arg)]
    pub address: u64,

    #[arg(short, long)]
    pub structure: String,

    #[arg(long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug)]
pub struct DumpArgs {
    #[arg(short, long, value_parser = parse_address_arg)]
    pub address: u64,

    #[arg(short = 'n', long, default_value = "256")]
    pub length: usize,

    /// Show each 4-byte group as a little-endian DWORD
    #[arg(long)]
    pub interpret: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only this structure
    pub structure: Option<String>,

    #[arg(long)]
    pub fields: bool,
}

pub fn parse_address_arg(s: &str) -> Result<u64, String> {
    parse_address(s).ok_or_else(|| format!("invalid address: {}", s))
}

impl ScanArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.length == Some(0) {
            return Err("Scan length must be at least 1".to_string());
        }
        if self.address == Some(0) {
            return Err("Scan address must not be null".to_string());
        }
        self.source.validate()
    }
}

impl DumpArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.length == 0 {
            return Err("Dump length must be at least 1".to_string());
        }
        self.source.validate()
    }
}

impl SourceArgs {
    pub fn validate(&self) -> Result<(), String> {
        match &self.snapshot {
            Some(path) if !path.exists() => Err(format!("Snapshot file does not exist: {:?}", path)),
            _ => Ok(()),
        }
    }
}
