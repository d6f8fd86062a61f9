use serde::Serialize;

/// Which inventory family a group or record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DeviceKind {
    Computers,
    Devices,
}

impl DeviceKind {
    /// Classic resource listing the groups of this kind
    pub fn groups_resource(&self) -> &'static str {
        match self {
            DeviceKind::Computers => super::constants::resources::COMPUTER_GROUPS,
            DeviceKind::Devices => super::constants::resources::MOBILE_DEVICE_GROUPS,
        }
    }

    /// Classic resource holding individual records of this kind
    pub fn records_resource(&self) -> &'static str {
        match self {
            DeviceKind::Computers => super::constants::resources::COMPUTERS,
            DeviceKind::Devices => super::constants::resources::MOBILE_DEVICES,
        }
    }

    /// Element name of one group in a group listing
    pub fn group_tag(&self) -> &'static str {
        match self {
            DeviceKind::Computers => "computer_group",
            DeviceKind::Devices => "mobile_device_group",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Computers => "computers",
            DeviceKind::Devices => "devices",
        }
    }
}

/// One computer or mobile device group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub is_smart: bool,
}

impl Group {
    pub fn kind_label(&self) -> &'static str {
        if self.is_smart { "Smart" } else { "Static" }
    }
}

/// A computer or mobile device listed as a group member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: String,
    pub name: String,
}
