pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, ReportFormat};
pub use loader::load_config;
