use std::time::Duration;

use gove_business::{Route, is_busy, reconcile};

use crate::state::State;
use crate::{pages, widgets};

pub const APP_TITLE: &str = "Gove Admin";

pub struct AdminApp {
    state: State,
}

impl AdminApp {
    /// Called once before the first frame; opens the users list.
    pub fn new(mut state: State) -> Self {
        gove_business::navigate(&mut state.ctx, Route::Users);
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for AdminApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up finished requests before rendering
        self.state.ctx.sync_computes();
        reconcile(&mut self.state.ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.strong(APP_TITLE);
                ui.separator();
                widgets::breadcrumbs(&mut self.state.ctx, ui);
            });
        });

        let route = *self.state.ctx.state::<Route>();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match route {
                Route::Users => pages::users_page(&mut self.state, ui),
                Route::CreateUser | Route::EditUser(_) => pages::user_form_page(&mut self.state, ui),
            });
        });

        widgets::delete_confirmation(&mut self.state.ctx, ctx);
        widgets::notification_dialog(&mut self.state.ctx, ctx);

        // Run background jobs
        self.state.ctx.run_computed();
        self.state.ctx.flush_commands();

        if is_busy(&self.state.ctx) {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
