// Facet catalog
// Literal interpreter queries per facet. The execution core treats this
// text as opaque; query correctness is owned here, next to the record
// shapes it feeds.

use super::facets::{
    BaseBoard, Bios, ComputerSystem, DiskDrive, LogicalDisk, NetworkAdapter, OperatingSystem,
    PhysicalMemory, Processor, VideoController,
};
use crate::application::inventory::FacetQuery;

/// Catalog row for display surfaces
#[derive(Debug, Clone, Copy)]
pub struct FacetInfo {
    pub name: &'static str,
    pub class: &'static str,
}

/// Every facet this catalog knows, in display order
pub const FACETS: &[FacetInfo] = &[
    FacetInfo { name: "bios", class: "Win32_BIOS" },
    FacetInfo { name: "baseboard", class: "Win32_BaseBoard" },
    FacetInfo { name: "computer-system", class: "Win32_ComputerSystem" },
    FacetInfo { name: "os", class: "Win32_OperatingSystem" },
    FacetInfo { name: "processor", class: "Win32_Processor" },
    FacetInfo { name: "memory", class: "Win32_PhysicalMemory" },
    FacetInfo { name: "disk", class: "Win32_DiskDrive" },
    FacetInfo { name: "logical-disk", class: "Win32_LogicalDisk" },
    FacetInfo { name: "network-adapter", class: "Win32_NetworkAdapter" },
    FacetInfo { name: "video-controller", class: "Win32_VideoController" },
];

fn cim_query(class: &str, properties: &str) -> String {
    format!(
        "Get-CimInstance -ClassName {class} | Select-Object {properties} | ConvertTo-Json -Depth 2"
    )
}

pub fn bios() -> FacetQuery<Bios> {
    FacetQuery::new(
        "bios",
        cim_query(
            "Win32_BIOS",
            "Manufacturer,Name,SerialNumber,Version,SMBIOSBIOSVersion,ReleaseDate",
        ),
    )
}

pub fn baseboard() -> FacetQuery<BaseBoard> {
    FacetQuery::new(
        "baseboard",
        cim_query("Win32_BaseBoard", "Manufacturer,Product,SerialNumber,Version"),
    )
}

pub fn computer_system() -> FacetQuery<ComputerSystem> {
    FacetQuery::new(
        "computer-system",
        cim_query(
            "Win32_ComputerSystem",
            "Name,Manufacturer,Model,Domain,TotalPhysicalMemory,NumberOfLogicalProcessors",
        ),
    )
}

pub fn operating_system() -> FacetQuery<OperatingSystem> {
    FacetQuery::new(
        "os",
        cim_query(
            "Win32_OperatingSystem",
            "Caption,Version,BuildNumber,OSArchitecture,SerialNumber,InstallDate,LastBootUpTime",
        ),
    )
}

pub fn processor() -> FacetQuery<Processor> {
    FacetQuery::new(
        "processor",
        cim_query(
            "Win32_Processor",
            "Name,Manufacturer,NumberOfCores,NumberOfLogicalProcessors,MaxClockSpeed,SocketDesignation",
        ),
    )
}

pub fn physical_memory() -> FacetQuery<PhysicalMemory> {
    FacetQuery::new(
        "memory",
        cim_query(
            "Win32_PhysicalMemory",
            "Manufacturer,PartNumber,SerialNumber,Capacity,Speed,DeviceLocator",
        ),
    )
}

pub fn disk_drive() -> FacetQuery<DiskDrive> {
    FacetQuery::new(
        "disk",
        cim_query(
            "Win32_DiskDrive",
            "Model,SerialNumber,InterfaceType,MediaType,Size,Partitions",
        ),
    )
}

pub fn logical_disk() -> FacetQuery<LogicalDisk> {
    FacetQuery::new(
        "logical-disk",
        cim_query("Win32_LogicalDisk", "DeviceID,VolumeName,FileSystem,Size,FreeSpace"),
    )
}

pub fn network_adapter() -> FacetQuery<NetworkAdapter> {
    FacetQuery::new(
        "network-adapter",
        cim_query(
            "Win32_NetworkAdapter",
            "Name,MACAddress,AdapterType,Speed,NetEnabled",
        ),
    )
}

pub fn video_controller() -> FacetQuery<VideoController> {
    FacetQuery::new(
        "video-controller",
        cim_query(
            "Win32_VideoController",
            "Name,AdapterRAM,DriverVersion,VideoProcessor",
        ),
    )
}
