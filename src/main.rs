// Tue Jan 13 2026 - Alex

use colored::Colorize;

fn main() {
    if let Err(e) = d3d8_struct_scan::ui::cli::run() {
        log::error!("{:#}", e);
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
