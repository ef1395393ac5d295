use egui::{RichText, Ui};
use gove_business::Permission;
use gove_business::users::UserFormState;

pub const PERMISSIONS_HEADING: &str = "Permissões";

/// Root permissions as headings, their children as checkboxes.
pub fn permissions_tree(ui: &mut Ui, groups: &[Permission], form: &mut UserFormState, enabled: bool) {
    ui.label(RichText::new(PERMISSIONS_HEADING).strong());
    ui.add_enabled_ui(enabled, |ui| {
        for group in groups {
            ui.add_space(6.0);
            ui.label(RichText::new(&group.name).strong());
            ui.indent(group.id, |ui| {
                for child in &group.children {
                    let mut checked = form.is_permission_checked(child.id);
                    if ui.checkbox(&mut checked, &child.name).changed() {
                        form.set_permission(child.id, checked);
                    }
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use egui_kittest::Harness;
    use kittest::Queryable;

    use super::*;

    fn permission(id: u64, name: &str, parent_id: Option<u64>, children: Vec<Permission>) -> Permission {
        Permission {
            id,
            name: name.to_owned(),
            parent_id,
            created_at: None,
            updated_at: None,
            deleted_at: None,
            children,
        }
    }

    struct TreeState {
        groups: Vec<Permission>,
        form: UserFormState,
    }

    #[test]
    fn toggling_children_updates_form_ids() {
        let groups = vec![permission(
            1,
            "Usuários",
            None,
            vec![
                permission(2, "Listar", Some(1), vec![]),
                permission(3, "Editar", Some(1), vec![]),
            ],
        )];
        let mut harness = Harness::new_ui_state(
            |ui, state: &mut TreeState| permissions_tree(ui, &state.groups, &mut state.form, true),
            TreeState {
                groups,
                form: UserFormState::create(),
            },
        );
        harness.run();

        harness.get_by_label("Editar").click();
        harness.run();
        harness.get_by_label("Listar").click();
        harness.run();
        harness.get_by_label("Editar").click();
        harness.run();

        assert_eq!(harness.state().form.values().permissions, vec![2]);
        assert!(harness.query_by_label("Usuários").is_some());
    }
}
