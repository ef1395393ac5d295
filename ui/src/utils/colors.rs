//! Shared color constants for the UI.

use egui::Color32;
use gove_business::table::ActionColor;

/// Green for success notifications.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for destructive actions and errors.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Blue for regular row actions.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

/// Subtle gray used for table borders.
pub const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Light gray header background.
pub const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

pub fn action_color(color: ActionColor) -> Color32 {
    match color {
        ActionColor::Blue => COLOR_BLUE,
        ActionColor::Red => COLOR_RED,
    }
}
