//! Inventory views of the server: dashboard counts, groups, members and device details
//!
//! All functions degrade to `None` or `N/A` placeholders; nothing here fails.

use log::{debug, error, warn};

use crate::api::constants::resources;
use crate::api::xml::{self, NOT_AVAILABLE};
use crate::api::{DeviceKind, Group, Member};
use crate::session::Session;

/// Groups of one kind together with their smart/static split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub groups: Vec<Group>,
    pub smart_count: usize,
    pub static_count: usize,
}

impl GroupSummary {
    pub fn new(groups: Vec<Group>) -> Self {
        let smart_count = groups.iter().filter(|g| g.is_smart).count();
        Self {
            static_count: groups.len() - smart_count,
            smart_count,
            groups,
        }
    }

    /// Keep only groups whose name contains `term`, ignoring case
    pub fn filtered(self, term: &str) -> Self {
        let term = term.to_lowercase();
        Self::new(
            self.groups
                .into_iter()
                .filter(|g| g.name.to_lowercase().contains(&term))
                .collect(),
        )
    }
}

/// Everything shown on the overview screen, already rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub version: String,
    pub managed_computers: String,
    pub smart_computer_groups: String,
    pub static_computer_groups: String,
    pub computer_policies: String,
    pub computer_profiles: String,
    pub managed_mobile_devices: String,
    pub smart_mobile_groups: String,
    pub static_mobile_groups: String,
    pub mobile_profiles: String,
}

impl Dashboard {
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Jamf Pro Version", self.version.as_str()),
            ("Managed Computers", self.managed_computers.as_str()),
            ("Smart Computer Groups", self.smart_computer_groups.as_str()),
            ("Static Computer Groups", self.static_computer_groups.as_str()),
            ("Computer Policies", self.computer_policies.as_str()),
            ("Computer Profiles", self.computer_profiles.as_str()),
            ("Managed Mobile Devices", self.managed_mobile_devices.as_str()),
            ("Smart Mobile Device Groups", self.smart_mobile_groups.as_str()),
            ("Static Mobile Device Groups", self.static_mobile_groups.as_str()),
            ("Mobile Device Profiles", self.mobile_profiles.as_str()),
        ]
    }
}

/// Server version from the modern API
pub async fn fetch_jamf_pro_version(session: &Session) -> Option<String> {
    let data = session.modern(resources::JAMF_PRO_VERSION).await?;
    match data.get("version").and_then(|v| v.as_str()) {
        Some(version) => Some(version.to_string()),
        None => {
            warn!("Version response without a 'version' field");
            None
        }
    }
}

/// `<size>` of a classic resource listing, or `N/A`
pub async fn fetch_count(session: &Session, resource: &str) -> String {
    match session.classic(resource).await {
        Some(body) => xml::get_size_from_xml(&body),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// All groups of the given kind with their smart/static split
pub async fn fetch_groups(session: &Session, kind: DeviceKind) -> Option<GroupSummary> {
    let body = session.classic(kind.groups_resource()).await?;
    match xml::parse_groups(&body, kind.group_tag()) {
        Ok(groups) => {
            debug!("Fetched {} {} groups", groups.len(), kind.as_str());
            Some(GroupSummary::new(groups))
        }
        Err(e) => {
            error!("Failed to parse {} groups: {:#}", kind.as_str(), e);
            None
        }
    }
}

pub async fn fetch_computer_groups(session: &Session) -> Option<GroupSummary> {
    fetch_groups(session, DeviceKind::Computers).await
}

pub async fn fetch_mobile_device_groups(session: &Session) -> Option<GroupSummary> {
    fetch_groups(session, DeviceKind::Devices).await
}

/// Members of one group; the raw response is cached as `<kind>_<id>.xml`
pub async fn fetch_group_members(session: &Session, kind: DeviceKind, group_id: &str) -> Option<Vec<Member>> {
    let endpoint = format!("{}/id/{}", kind.groups_resource(), group_id);
    let body = session.classic(&endpoint).await?;

    cache_response(session, &format!("{}_{}.xml", kind.as_str(), group_id), &body);

    match xml::parse_group_members(&body) {
        Ok(members) => Some(members),
        Err(e) => {
            error!("Failed to parse members of group {}: {:#}", group_id, e);
            None
        }
    }
}

/// The `<general>` section of a computer or mobile device record
pub async fn fetch_general_info(session: &Session, kind: DeviceKind, id: &str) -> Option<Vec<(String, String)>> {
    let endpoint = format!("{}/id/{}", kind.records_resource(), id);
    let body = session.classic(&endpoint).await?;

    match xml::parse_general_info(&body) {
        Ok(info) => Some(info),
        Err(e) => {
            error!("Failed to parse {} record {}: {:#}", kind.as_str(), id, e);
            None
        }
    }
}

/// Gather every overview value, one request after another
pub async fn dashboard(session: &Session) -> Dashboard {
    let version = fetch_jamf_pro_version(session)
        .await
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let managed_computers = fetch_count(session, resources::COMPUTERS).await;
    let (smart_computer_groups, static_computer_groups) = split_counts(fetch_computer_groups(session).await);
    let computer_policies = fetch_count(session, resources::POLICIES).await;
    let computer_profiles = fetch_count(session, resources::COMPUTER_PROFILES).await;
    let managed_mobile_devices = fetch_count(session, resources::MOBILE_DEVICES).await;
    let (smart_mobile_groups, static_mobile_groups) = split_counts(fetch_mobile_device_groups(session).await);
    let mobile_profiles = fetch_count(session, resources::MOBILE_DEVICE_PROFILES).await;

    Dashboard {
        version,
        managed_computers,
        smart_computer_groups,
        static_computer_groups,
        computer_policies,
        computer_profiles,
        managed_mobile_devices,
        smart_mobile_groups,
        static_mobile_groups,
        mobile_profiles,
    }
}

fn split_counts(summary: Option<GroupSummary>) -> (String, String) {
    match summary {
        Some(s) => (s.smart_count.to_string(), s.static_count.to_string()),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    }
}

fn cache_response(session: &Session, file_name: &str, body: &str) {
    let dir = session.cache_dir();
    let result = std::fs::create_dir_all(dir).and_then(|_| std::fs::write(dir.join(file_name), body));
    match result {
        Ok(()) => debug!("Cached response as {:?}", dir.join(file_name)),
        Err(e) => warn!("Failed to cache response as {:?}: {}", dir.join(file_name), e),
    }
}
