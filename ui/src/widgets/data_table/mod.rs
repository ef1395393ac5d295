//! Generic data table.
//!
//! Split into smaller components:
//! - `header`: clickable column labels with the sort indicator
//! - `row`: data cells and the row action affordance
//! - `cells`: cell frames and alignment helpers
//! - `footer`: total count and page selector
//!
//! The table owns no data. It renders its inputs and reports the sort and page
//! intents in [`TableResponse`]; row actions call their handlers directly.

mod cells;
mod footer;
mod header;
mod row;

use bon::Builder;
use egui::{Frame, Margin, Stroke, Ui};
use gove_business::pagination::PaginationState;
use gove_business::table::{Action, ActionLayout, Columns, EMPTY_MESSAGE, SortState, TableBody};

pub use row::MENU_TRIGGER;

use crate::utils::colors::TABLE_BORDER_COLOR;

/// Intents emitted by one render of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableResponse {
    pub sort_requested: Option<&'static str>,
    pub page_requested: Option<u32>,
}

#[derive(Builder)]
pub struct DataTable<'a, T> {
    id_salt: &'a str,
    rows: &'a [T],
    columns: &'a Columns<T>,
    #[builder(default)]
    loading: bool,
    #[builder(default)]
    pagination: PaginationState,
    #[builder(default)]
    sort: SortState,
    actions: Option<&'a [Action<'a, T>]>,
    #[builder(default)]
    layout: ActionLayout,
}

impl<T> DataTable<'_, T> {
    pub fn show(self, ui: &mut Ui) -> TableResponse {
        let id = ui.make_persistent_id(self.id_salt);
        let actions = self.actions.unwrap_or_default();
        let has_actions = !actions.is_empty();
        let body = TableBody::build(self.rows, self.columns, self.loading, has_actions);
        let mut response = TableResponse::default();
        let mut menu = row::load_menu(ui, id);

        Frame::NONE
            .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
            .inner_margin(Margin::ZERO)
            .show(ui, |ui| {
                egui::Grid::new(id.with("grid"))
                    .num_columns(self.columns.len() + usize::from(has_actions))
                    .striped(true)
                    .spacing([16.0, 0.0])
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        response.sort_requested =
                            header::render_header(ui, self.columns, &self.sort, has_actions);
                        ui.end_row();

                        if let TableBody::Rows(rows) = &body {
                            for cells in rows {
                                row::render_row(
                                    ui,
                                    id,
                                    cells,
                                    &self.rows[cells.index],
                                    actions,
                                    self.layout,
                                    &mut menu,
                                );
                                ui.end_row();
                            }
                        }
                    });

                match body {
                    TableBody::Loading { .. } => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(12.0);
                            ui.spinner();
                            ui.add_space(12.0);
                        });
                    }
                    TableBody::Empty { .. } => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(12.0);
                            ui.label(EMPTY_MESSAGE);
                            ui.add_space(12.0);
                        });
                    }
                    TableBody::Rows(_) => {}
                }
            });

        row::store_menu(ui, id, menu);

        ui.add_space(8.0);
        response.page_requested = footer::render_footer(ui, &self.pagination);
        response
    }
}
