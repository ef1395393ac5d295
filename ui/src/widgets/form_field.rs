//! Labelled inputs bound to the user form, with their validation message.

use egui::{ComboBox, RichText, TextEdit, Ui};
use gove_business::users::{FormField, USER_TYPES, UserFormState};

use crate::utils::colors::COLOR_RED;

pub fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Nome*",
        FormField::Email => "Email*",
        FormField::Phone => "Telefone*",
        FormField::UserType => "Tipo de usuário*",
        FormField::Sector => "Orgão/Secretaria*",
    }
}

fn error_line(ui: &mut Ui, form: &UserFormState, field: FormField) {
    if let Some(message) = form.visible_error(field) {
        ui.label(RichText::new(message).color(COLOR_RED).small());
    }
}

/// Single line text input. Edits go through the form so the phone mask applies;
/// the field counts as touched once it loses focus.
pub fn text_field(ui: &mut Ui, form: &mut UserFormState, field: FormField, enabled: bool) {
    ui.vertical(|ui| {
        let label = ui.label(field_label(field));
        let mut text = form.value(field).to_owned();
        let response = ui
            .add_enabled(
                enabled,
                TextEdit::singleline(&mut text)
                    .id_salt(field_label(field))
                    .desired_width(f32::INFINITY),
            )
            .labelled_by(label.id);

        if response.changed() {
            form.set_value(field, &text);
        }
        if response.lost_focus() {
            form.touch(field);
        }
        error_line(ui, form, field);
    });
}

/// User type select.
pub fn user_type_field(ui: &mut Ui, form: &mut UserFormState, enabled: bool) {
    let field = FormField::UserType;
    ui.vertical(|ui| {
        ui.label(field_label(field));
        let current = form.value(field).to_owned();
        let selected_text = USER_TYPES
            .iter()
            .find(|(value, _)| *value == current)
            .map_or("Selecione", |(_, label)| *label);

        let mut picked = None;
        ui.add_enabled_ui(enabled, |ui| {
            ComboBox::from_id_salt(field_label(field))
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for (value, label) in USER_TYPES {
                        if ui.selectable_label(current == value, label).clicked() {
                            picked = Some(value);
                        }
                    }
                });
        });

        if let Some(value) = picked {
            form.set_value(field, value);
            form.touch(field);
        }
        error_line(ui, form, field);
    });
}

#[cfg(test)]
mod tests {
    use egui::accesskit::Role;
    use egui_kittest::Harness;
    use kittest::Queryable;

    use super::*;

    const SHORT_NAME: &str = "Nome deve ter pelo menos 3 caracteres";

    /// A focused text edit blinks its cursor, so frames are stepped by hand.
    fn settle(harness: &mut Harness<'_, UserFormState>) {
        for _ in 0..3 {
            harness.step();
        }
    }

    fn name_harness() -> Harness<'static, UserFormState> {
        let mut harness = Harness::new_ui_state(
            |ui, form: &mut UserFormState| text_field(ui, form, FormField::Name, true),
            UserFormState::create(),
        );
        settle(&mut harness);
        harness
    }

    #[test]
    fn error_waits_for_blur() {
        let mut harness = name_harness();

        harness.get_by_role(Role::TextInput).click();
        settle(&mut harness);
        harness.get_by_role(Role::TextInput).type_text("J");
        settle(&mut harness);

        assert_eq!(harness.state().value(FormField::Name), "J");
        assert!(harness.query_by_label(SHORT_NAME).is_none());

        harness.key_press(egui::Key::Escape);
        settle(&mut harness);

        assert!(harness.state().is_touched(FormField::Name));
        assert!(harness.query_by_label(SHORT_NAME).is_some());
    }
}
