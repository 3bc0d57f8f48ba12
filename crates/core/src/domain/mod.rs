// Domain Layer - Inventory records and the query catalog

pub mod catalog;
pub mod facets;

// Re-exports
pub use facets::{
    BaseBoard, Bios, ComputerSystem, DiskDrive, LogicalDisk, NetworkAdapter, OperatingSystem,
    PhysicalMemory, Processor, VideoController,
};
