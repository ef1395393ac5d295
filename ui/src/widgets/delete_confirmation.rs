//! Confirmation window shown before a user is deleted.

use egui::{Align2, RichText, Window};
use gove_business::users::{DeleteTarget, UsersListState, cancel_delete, confirm_delete, is_deleting};
use gove_states::StateCtx;

use crate::utils::colors::COLOR_RED;

pub const DELETE_TITLE: &str = "Atenção";
pub const CANCEL_LABEL: &str = "Cancelar";
pub const CONFIRM_LABEL: &str = "Excluir";

pub fn delete_message(name: &str) -> String {
    format!("Você deseja excluir o usuário {name}?")
}

/// Shows the window while a user is awaiting confirmation. Both buttons are
/// disabled while the delete request runs.
pub fn delete_confirmation(state_ctx: &mut StateCtx, ctx: &egui::Context) {
    let DeleteTarget::Confirming(user) = state_ctx.state::<UsersListState>().delete_target() else {
        return;
    };
    let message = delete_message(&user.name);
    let deleting = is_deleting(state_ctx);

    let mut open = true;
    let mut cancel = false;
    let mut confirm = false;

    Window::new(DELETE_TITLE)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                cancel = ui.add_enabled(!deleting, egui::Button::new(CANCEL_LABEL)).clicked();
                let label = RichText::new(CONFIRM_LABEL).color(COLOR_RED);
                confirm = ui.add_enabled(!deleting, egui::Button::new(label)).clicked();
                if deleting {
                    ui.spinner();
                }
            });
        });

    if confirm {
        confirm_delete(state_ctx);
    } else if cancel || !open {
        cancel_delete(state_ctx);
    }
}
