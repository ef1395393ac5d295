//! Create and edit pages share this form.

use egui::{Button, Response, Ui};
use gove_business::permissions::PermissionsCompute;
use gove_business::users::form::USER_NOT_FOUND;
use gove_business::users::{FormField, FormLoad, UserFormState, submit_form};
use gove_business::{Route, navigate};

use crate::state::State;
use crate::utils::colors::COLOR_RED;
use crate::widgets::{permissions_tree, text_field, user_type_field};

pub const BACK_LABEL: &str = "Voltar";
pub const SAVE_LABEL: &str = "Salvar";
pub const BACK_TO_LIST_LABEL: &str = "Voltar para a lista";
pub const PERMISSIONS_ERROR: &str = "Não foi possível carregar as permissões.";

pub fn user_form_page(state: &mut State, ui: &mut Ui) -> Response {
    let route = *state.ctx.state::<Route>();

    ui.vertical(|ui| {
        ui.heading(route.title());
        ui.add_space(8.0);

        let load = state.ctx.state::<UserFormState>().load();
        match load {
            FormLoad::Loading => {
                ui.spinner();
                return;
            }
            FormLoad::NotFound => {
                ui.label(USER_NOT_FOUND);
                if ui.link(BACK_TO_LIST_LABEL).clicked() {
                    navigate(&mut state.ctx, Route::Users);
                }
                return;
            }
            FormLoad::Ready => {}
        }

        let (groups, permissions_loading, permissions_failed) = state
            .ctx
            .cached::<PermissionsCompute>()
            .map(|c| (c.groups().to_vec(), c.is_loading(), c.error().is_some()))
            .unwrap_or_default();

        let form = state.ctx.state_mut::<UserFormState>();
        let enabled = !form.is_submitting();

        text_field(ui, form, FormField::Name, enabled);
        text_field(ui, form, FormField::Email, enabled);
        text_field(ui, form, FormField::Phone, enabled);
        user_type_field(ui, form, enabled);
        text_field(ui, form, FormField::Sector, enabled);

        ui.add_space(12.0);
        if permissions_loading {
            ui.spinner();
        } else if permissions_failed {
            ui.colored_label(COLOR_RED, PERMISSIONS_ERROR);
        } else {
            permissions_tree(ui, &groups, form, enabled);
        }

        ui.add_space(16.0);
        let mut back = false;
        let mut save = false;
        ui.horizontal(|ui| {
            back = ui.add_enabled(enabled, Button::new(BACK_LABEL)).clicked();
            save = ui.add_enabled(enabled, Button::new(SAVE_LABEL)).clicked();
            if !enabled {
                ui.spinner();
            }
        });

        if save {
            submit_form(&mut state.ctx);
        } else if back {
            navigate(&mut state.ctx, Route::Users);
        }
    })
    .response
}
