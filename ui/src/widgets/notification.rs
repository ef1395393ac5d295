//! Modal message window for success and error notifications.

use egui::{Align2, Id, RichText, Window};
use gove_business::{NotificationKind, Notifications, dismiss_notification};
use gove_states::StateCtx;

use crate::utils::colors::{COLOR_GREEN, COLOR_RED};

pub const OK_LABEL: &str = "OK";

pub fn notification_dialog(state_ctx: &mut StateCtx, ctx: &egui::Context) {
    let Some(notification) = state_ctx.state::<Notifications>().current() else {
        return;
    };
    let (icon, color) = match notification.kind {
        NotificationKind::Success => ("✔", COLOR_GREEN),
        NotificationKind::Error => ("✖", COLOR_RED),
    };
    let title = RichText::new(format!("{icon} {}", notification.title))
        .color(color)
        .strong();
    let text = notification.text.clone();

    let mut dismissed = false;

    Window::new("notification")
        .id(Id::new("notification_dialog"))
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(title);
            ui.add_space(4.0);
            ui.label(text);
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                dismissed = ui.button(OK_LABEL).clicked();
            });
        });

    if dismissed {
        dismiss_notification(state_ctx);
    }
}
