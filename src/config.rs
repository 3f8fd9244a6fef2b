/// Default origin of the generation service for local development, matching
/// the backend's standard dev port.
pub const DEV_API_BASE: &str = "http://localhost:8000";

/// Resolve where the generation service lives.
///
/// `ADCOPY_API_BASE` points a deployed install at its real endpoint;
/// without it the client talks to the local development server.
pub fn api_base() -> String {
    match std::env::var("ADCOPY_API_BASE") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => DEV_API_BASE.to_string(),
    }
}
