//! Request metrics.
//!
//! # Metrics
//! - `dakora_client_requests_total` (counter): requests by method and status
//!   ("error" when no response arrived)
//! - `dakora_client_request_duration_seconds` (histogram): latency by method

use std::time::Duration;

pub const REQUESTS_TOTAL: &str = "dakora_client_requests_total";
pub const REQUEST_DURATION: &str = "dakora_client_request_duration_seconds";

/// Record one finished request.
pub fn record_request(method: &str, status: Option<u16>, elapsed: Duration) {
    let status = status_label(status);
    ::metrics::counter!(REQUESTS_TOTAL, "method" => method.to_string(), "status" => status).increment(1);
    ::metrics::histogram!(REQUEST_DURATION, "method" => method.to_string()).record(elapsed.as_secs_f64());
}

fn status_label(status: Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "error".to_string(),
    }
}
