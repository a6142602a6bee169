//! Headers every Cloudant request carries.

use cloudant_core::ServiceRequest;
use http::Method;

pub const SERVICE_NAME: &str = "cloudant";
pub const SERVICE_VERSION: &str = "V1";

const ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

/// `cloudant-rust-sdk/<version> (lang=rust; os=<os>; arch=<arch>)`
#[must_use]
pub fn user_agent() -> String {
    format!(
        "cloudant-rust-sdk/{} (lang=rust; os={}; arch={})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Value of the analytics header for one operation
#[must_use]
pub fn analytics_header(operation_id: &str) -> String {
    format!("service_name={SERVICE_NAME};service_version={SERVICE_VERSION};operation_id={operation_id}")
}

/// Start a request for `operation_id` with the SDK headers attached
pub(crate) fn request(method: Method, template: &'static str, operation_id: &'static str) -> ServiceRequest {
    ServiceRequest::new(method, template)
        .operation(operation_id)
        .header(ANALYTICS_HEADER, analytics_header(operation_id))
}
