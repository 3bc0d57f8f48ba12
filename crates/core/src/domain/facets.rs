// Typed inventory records
// Wire keys follow CIM property casing. Every field is optional: not every
// property is populated on every host, and partial records are normal.
// Unknown wire fields are ignored on deserialize.

use serde::{Deserialize, Serialize};

/// Win32_BIOS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bios {
    pub manufacturer: Option<String>,
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "SMBIOSBIOSVersion")]
    pub smbios_version: Option<String>,
    pub release_date: Option<String>,
}

/// Win32_BaseBoard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseBoard {
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<String>,
    pub version: Option<String>,
}

/// Win32_ComputerSystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComputerSystem {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub domain: Option<String>,
    pub total_physical_memory: Option<u64>,
    pub number_of_logical_processors: Option<u32>,
}

/// Win32_OperatingSystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperatingSystem {
    pub caption: Option<String>,
    pub version: Option<String>,
    pub build_number: Option<String>,
    #[serde(rename = "OSArchitecture")]
    pub os_architecture: Option<String>,
    pub serial_number: Option<String>,
    pub install_date: Option<String>,
    pub last_boot_up_time: Option<String>,
}

/// Win32_Processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Processor {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub number_of_cores: Option<u32>,
    pub number_of_logical_processors: Option<u32>,
    pub max_clock_speed: Option<u32>,
    pub socket_designation: Option<String>,
}

/// Win32_PhysicalMemory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicalMemory {
    pub manufacturer: Option<String>,
    pub part_number: Option<String>,
    pub serial_number: Option<String>,
    pub capacity: Option<u64>,
    pub speed: Option<u32>,
    pub device_locator: Option<String>,
}

/// Win32_DiskDrive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiskDrive {
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub interface_type: Option<String>,
    pub media_type: Option<String>,
    pub size: Option<u64>,
    pub partitions: Option<u32>,
}

/// Win32_LogicalDisk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogicalDisk {
    #[serde(rename = "DeviceID")]
    pub device_id: Option<String>,
    pub volume_name: Option<String>,
    pub file_system: Option<String>,
    pub size: Option<u64>,
    pub free_space: Option<u64>,
}

/// Win32_NetworkAdapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkAdapter {
    pub name: Option<String>,
    #[serde(rename = "MACAddress")]
    pub mac_address: Option<String>,
    pub adapter_type: Option<String>,
    pub speed: Option<u64>,
    pub net_enabled: Option<bool>,
}

/// Win32_VideoController
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoController {
    pub name: Option<String>,
    #[serde(rename = "AdapterRAM")]
    pub adapter_ram: Option<u64>,
    pub driver_version: Option<String>,
    pub video_processor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bios_maps_cim_property_casing() {
        let bios: Bios = serde_json::from_str(
            r#"{"Manufacturer":"Acme","SerialNumber":"S-1","SMBIOSBIOSVersion":"1.2.3"}"#,
        )
        .unwrap();

        assert_eq!(bios.manufacturer.as_deref(), Some("Acme"));
        assert_eq!(bios.serial_number.as_deref(), Some("S-1"));
        assert_eq!(bios.smbios_version.as_deref(), Some("1.2.3"));
        assert_eq!(bios.release_date, None);
    }

    #[test]
    fn logical_disk_maps_irregular_device_id_key() {
        let disk: LogicalDisk =
            serde_json::from_str(r#"{"DeviceID":"C:","FreeSpace":1024}"#).unwrap();

        assert_eq!(disk.device_id.as_deref(), Some("C:"));
        assert_eq!(disk.free_space, Some(1024));
        assert_eq!(disk.volume_name, None);
    }

    #[test]
    fn operating_system_tolerates_extra_cim_noise() {
        let os: OperatingSystem = serde_json::from_str(
            r#"{"Caption":"Microsoft Windows 11 Pro","OSArchitecture":"64-bit","CSName":"HOST-1","FreePhysicalMemory":123}"#,
        )
        .unwrap();

        assert_eq!(os.caption.as_deref(), Some("Microsoft Windows 11 Pro"));
        assert_eq!(os.os_architecture.as_deref(), Some("64-bit"));
    }
}
