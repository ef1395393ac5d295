use egui::Ui;
use gove_business::pagination::PaginationState;

use crate::widgets::pagination::page_selector;

/// Total count and page selector; returns the picked page.
pub fn render_footer(ui: &mut Ui, pagination: &PaginationState) -> Option<u32> {
    ui.horizontal(|ui| {
        ui.label(format!("Total: {}", pagination.total_items));
        ui.add_space(16.0);
        page_selector(ui, pagination)
    })
    .inner
}
