//! Authenticated access to the Jamf Pro API
//!
//! Two surfaces share the bearer-token contract: the classic `JSSResource`
//! tree answering in XML, and the modern `api/v1` endpoints answering in JSON.
//! Every call returns `None` on failure after logging a classified reason.

pub mod client;
pub mod constants;
pub mod error;
pub mod models;
pub mod xml;

pub use client::{JamfClient, build_http_client};
pub use error::RequestFailure;
pub use models::{DeviceKind, Group, Member};
