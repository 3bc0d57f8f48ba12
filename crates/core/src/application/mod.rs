// Application Layer - Query orchestration over the ports

pub mod constants;
pub mod inventory;
pub mod payload;

// Re-exports
pub use inventory::{Execution, FacetQuery};
pub use payload::{map_to_many, map_to_one, PayloadError};
