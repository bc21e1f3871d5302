//! Version information for the RoomBook application.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns a formatted version string for display purposes
pub fn get_display_version() -> String {
    format!("roombook v{}", VERSION)
}
