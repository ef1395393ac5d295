//! Row rendering and the row action affordance.

use egui::{Area, Button, Frame, Id, Key, Order, RichText, Ui};
use gove_business::table::{Action, ActionLayout, RowCells, RowMenu};

use super::cells::{aligned_label, data_cell};
use crate::utils::colors::action_color;

/// Label of the overflow menu trigger.
pub const MENU_TRIGGER: &str = "☰";

pub fn load_menu(ui: &Ui, id: Id) -> RowMenu {
    ui.data(|d| d.get_temp::<RowMenu>(id)).unwrap_or_default()
}

pub fn store_menu(ui: &Ui, id: Id, menu: RowMenu) {
    ui.data_mut(|d| d.insert_temp(id, menu));
}

/// Renders one data row. Actions are invoked with `row` when triggered.
pub fn render_row<T>(
    ui: &mut Ui,
    table_id: Id,
    cells: &RowCells,
    row: &T,
    actions: &[Action<'_, T>],
    layout: ActionLayout,
    menu: &mut RowMenu,
) {
    for cell in &cells.cells {
        data_cell(ui, |ui| aligned_label(ui, &cell.text, cell.align));
    }

    if actions.is_empty() {
        return;
    }

    data_cell(ui, |ui| match layout {
        ActionLayout::Inline => render_inline_actions(ui, row, actions),
        ActionLayout::Menu => render_menu_actions(ui, table_id, cells.index, row, actions, menu),
    });
}

fn action_text<T>(action: &Action<'_, T>, text: String) -> RichText {
    let text = RichText::new(text);
    match action.color {
        Some(color) => text.color(action_color(color)),
        None => text,
    }
}

fn render_inline_actions<T>(ui: &mut Ui, row: &T, actions: &[Action<'_, T>]) {
    ui.horizontal(|ui| {
        for action in actions {
            let button = Button::new(action_text(action, action.icon.to_owned()));
            if ui.add(button).on_hover_text(action.label).clicked() {
                action.invoke(row);
            }
        }
    });
}

fn render_menu_actions<T>(
    ui: &mut Ui,
    table_id: Id,
    index: usize,
    row: &T,
    actions: &[Action<'_, T>],
    menu: &mut RowMenu,
) {
    let trigger = ui.button(MENU_TRIGGER);
    if trigger.clicked() {
        *menu = menu.toggled(index);
    }
    if !menu.is_open_for(index) {
        return;
    }

    let area = Area::new(table_id.with(("row_menu", index)))
        .order(Order::Foreground)
        .fixed_pos(trigger.rect.left_bottom())
        .show(ui.ctx(), |ui| {
            Frame::menu(ui.style()).show(ui, |ui| {
                for action in actions {
                    let text = action_text(action, format!("{} {}", action.icon, action.label));
                    if ui.add(Button::new(text).frame(false)).clicked() {
                        action.invoke(row);
                        *menu = RowMenu::Closed;
                    }
                }
            });
        });

    let (escape, clicked_outside) = ui.input(|i| {
        let outside = i.pointer.any_click()
            && i
                .pointer
                .interact_pos()
                .is_some_and(|pos| !area.response.rect.contains(pos));
        (i.key_pressed(Key::Escape), outside)
    });
    if escape || (clicked_outside && !trigger.clicked()) {
        *menu = RowMenu::Closed;
    }
}
