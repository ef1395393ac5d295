//! Table header: one clickable label per column, plus the actions column.

use egui::{Button, RichText, Ui};
use gove_business::table::{ACTIONS_HEADER, Columns, SortState};

use super::cells::{header_cell, sort_arrow};

/// Renders the header row and returns the key of the clicked column, if any.
pub fn render_header<T>(
    ui: &mut Ui,
    columns: &Columns<T>,
    sort: &SortState,
    has_actions: bool,
) -> Option<&'static str> {
    let mut clicked = None;

    for column in columns {
        header_cell(ui, |ui| {
            ui.horizontal(|ui| {
                let title = Button::new(RichText::new(column.label).strong()).frame(false);
                if ui.add(title).clicked() {
                    clicked = Some(column.key);
                }
                if let Some(direction) = sort.indicator_for(column.key) {
                    ui.label(sort_arrow(direction));
                }
            });
        });
    }

    if has_actions {
        header_cell(ui, |ui| {
            ui.strong(ACTIONS_HEADER);
        });
    }

    clicked
}
