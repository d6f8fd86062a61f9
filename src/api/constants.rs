//! API paths and header values for the Jamf Pro server

/// OAuth token endpoint, relative to the server root
pub const TOKEN_PATH: &str = "api/oauth/token";

/// Root of the classic, XML-oriented resource tree
pub const CLASSIC_API_PREFIX: &str = "JSSResource";

/// Root of the modern, JSON-oriented info surface
pub const MODERN_API_PREFIX: &str = "api/v1";

/// Standard headers
pub mod headers {
    pub const ACCEPT_JSON: &str = "application/json";
    pub const ACCEPT_XML: &str = "application/xml";
}

/// Classic API resources used by the dashboard and inventory views
pub mod resources {
    pub const COMPUTERS: &str = "computers";
    pub const COMPUTER_GROUPS: &str = "computergroups";
    pub const POLICIES: &str = "policies";
    pub const COMPUTER_PROFILES: &str = "osxconfigurationprofiles";
    pub const MOBILE_DEVICES: &str = "mobiledevices";
    pub const MOBILE_DEVICE_GROUPS: &str = "mobiledevicegroups";
    pub const MOBILE_DEVICE_PROFILES: &str = "mobiledeviceconfigurationprofiles";

    /// Modern API
    pub const JAMF_PRO_VERSION: &str = "jamf-pro-version";
}

/// Prefix `https://` when no scheme is given and drop trailing slashes
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    url.trim_end_matches('/').to_string()
}

/// Build the token endpoint URL
pub fn token_endpoint(base_url: &str) -> String {
    join(base_url, TOKEN_PATH)
}

/// Build a classic API URL; `endpoint` may or may not already carry the `JSSResource/` prefix
pub fn classic_endpoint(base_url: &str, endpoint: &str) -> String {
    join(base_url, &with_prefix(CLASSIC_API_PREFIX, endpoint))
}

/// Build a modern API URL; `endpoint` may or may not already carry the `api/v1/` prefix
pub fn modern_endpoint(base_url: &str, endpoint: &str) -> String {
    join(base_url, &with_prefix(MODERN_API_PREFIX, endpoint))
}

fn with_prefix(prefix: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    if endpoint == prefix || endpoint.starts_with(&format!("{}/", prefix)) {
        endpoint.to_string()
    } else {
        format!("{}/{}", prefix, endpoint)
    }
}

fn join(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("example.test"), "https://example.test");
        assert_eq!(normalize_base_url("https://example.test/"), "https://example.test");
        assert_eq!(normalize_base_url(" http://localhost:8080 "), "http://localhost:8080");
    }

    #[test]
    fn test_endpoint_building() {
        let base = "https://example.test";
        assert_eq!(token_endpoint(base), "https://example.test/api/oauth/token");
        assert_eq!(classic_endpoint(base, "computers"), "https://example.test/JSSResource/computers");
        assert_eq!(
            classic_endpoint(base, "JSSResource/computers/id/7"),
            "https://example.test/JSSResource/computers/id/7"
        );
        assert_eq!(
            modern_endpoint(base, "jamf-pro-version"),
            "https://example.test/api/v1/jamf-pro-version"
        );
        assert_eq!(
            modern_endpoint("https://example.test/", "/api/v1/jamf-pro-version"),
            "https://example.test/api/v1/jamf-pro-version"
        );
    }
}
