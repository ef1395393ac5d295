//! Cell helpers shared by the header and the rows.

use egui::{Frame, InnerResponse, Layout, Margin, Ui};
use gove_business::SortDirection;
use gove_business::table::Align;

use crate::utils::colors::HEADER_BG_COLOR;

/// Header cell with background.
pub fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

/// Data cell with padding.
pub fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

/// Renders `text` with the column alignment.
pub fn aligned_label(ui: &mut Ui, text: &str, align: Align) {
    let layout = match align {
        Align::Left => Layout::left_to_right(egui::Align::Center),
        Align::Center => Layout::top_down(egui::Align::Center),
        Align::Right => Layout::right_to_left(egui::Align::Center),
    };
    ui.with_layout(layout, |ui| {
        ui.label(text);
    });
}

pub fn sort_arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "⏶",
        SortDirection::Desc => "⏷",
    }
}
