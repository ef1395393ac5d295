//! Page selector: first/previous, numbered pages with ellipses, next/last.

use egui::{Button, Ui};
use gove_business::pagination::{PageItemKind, PaginationState, page_items};

pub const FIRST_LABEL: &str = "⏮";
pub const PREVIOUS_LABEL: &str = "⏴";
pub const NEXT_LABEL: &str = "⏵";
pub const LAST_LABEL: &str = "⏭";

/// Renders the selector and returns the page the user picked, if any.
pub fn page_selector(ui: &mut Ui, state: &PaginationState) -> Option<u32> {
    let mut picked = None;

    ui.horizontal(|ui| {
        for item in page_items(state) {
            let text = match item.kind {
                PageItemKind::First => FIRST_LABEL.to_owned(),
                PageItemKind::Previous => PREVIOUS_LABEL.to_owned(),
                PageItemKind::Next => NEXT_LABEL.to_owned(),
                PageItemKind::Last => LAST_LABEL.to_owned(),
                PageItemKind::Page => item.page.to_string(),
                PageItemKind::Ellipsis => {
                    ui.label("…");
                    continue;
                }
            };

            let button = Button::new(text).selected(item.selected);
            if ui.add_enabled(item.enabled, button).clicked() {
                picked = Some(item.page);
            }
        }
    });

    picked
}
