// Hostfacts Core - Inventory Records & Ports
// NO infrastructure dependencies: interpreter adapters live in infra-shell

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
