// Version information for the imgparse node

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-30";

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("imgparse-node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
