// Wed Jan 15 2026 - Alex

pub mod banner;
pub mod cli;

pub use banner::Banner;
pub use cli::{Args, Command, CommandHandler};
