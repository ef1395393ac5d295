//! Users list: toolbar, the paginated table and the row actions.

use std::cell::RefCell;

use egui::{ComboBox, Response, Ui};
use gove_business::format::format_optional_date;
use gove_business::table::{Action, ActionColor, CellValue, Column, Columns, TableError};
use gove_business::users::{UsersListState, change_page, change_per_page, change_sort, open_delete};
use gove_business::{Route, User, navigate};
use log::error;

use crate::state::State;
use crate::widgets::DataTable;

pub const NEW_USER_LABEL: &str = "+ Novo Usuário";
pub const PER_PAGE_OPTIONS: [u32; 4] = [5, 10, 25, 50];

enum RowIntent {
    Edit(u64),
    Delete(User),
}

pub fn users_columns() -> Result<Columns<User>, TableError> {
    Columns::new(vec![
        Column::new("name", "Nome", |user: &User| CellValue::from(user.name.as_str())),
        Column::new("email", "E-mail", |user: &User| CellValue::from(user.email.as_str())),
        Column::new("phone", "Telefone", |user: &User| CellValue::from(user.phone.as_deref())),
        Column::new("created_at", "Data de criação", |user: &User| {
            CellValue::from(user.created_at.as_deref())
        })
        .render(|value, _| format_optional_date(value.as_str())),
        Column::new("last_login", "Último login", |user: &User| {
            CellValue::from(user.last_login.as_deref())
        })
        .render(|value, _| format_optional_date(value.as_str())),
    ])
}

pub fn users_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical(|ui| {
        let mut new_user = false;
        let mut per_page = None;

        ui.horizontal(|ui| {
            ui.heading(Route::Users.title());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                new_user = ui.button(NEW_USER_LABEL).clicked();
                per_page = per_page_select(ui, state.ctx.state::<UsersListState>().per_page());
            });
        });
        ui.add_space(8.0);

        users_table(state, ui);

        if let Some(per_page) = per_page {
            change_per_page(&mut state.ctx, per_page);
        }
        if new_user {
            navigate(&mut state.ctx, Route::CreateUser);
        }
    })
    .response
}

fn per_page_select(ui: &mut Ui, current: u32) -> Option<u32> {
    let mut picked = None;
    ComboBox::from_id_salt("users_per_page")
        .selected_text(format!("{current} por página"))
        .show_ui(ui, |ui| {
            for option in PER_PAGE_OPTIONS {
                if ui.selectable_label(option == current, option.to_string()).clicked() {
                    picked = Some(option);
                }
            }
        });
    picked
}

fn users_table(state: &mut State, ui: &mut Ui) {
    let columns = match users_columns() {
        Ok(columns) => columns,
        Err(err) => {
            error!("Invalid users table columns: {err}");
            return;
        }
    };

    let intent = RefCell::new(None);
    let actions = [
        Action::new("✏", "Editar", |user: &User| {
            intent.replace(Some(RowIntent::Edit(user.id)));
        })
        .color(ActionColor::Blue),
        Action::new("🗑", "Excluir", |user: &User| {
            intent.replace(Some(RowIntent::Delete(user.clone())));
        })
        .color(ActionColor::Red),
    ];

    let list = state.ctx.state::<UsersListState>();
    let response = DataTable::builder()
        .id_salt("users_table")
        .rows(list.rows())
        .columns(&columns)
        .loading(list.is_loading())
        .pagination(list.pagination())
        .sort(list.sort())
        .actions(&actions)
        .build()
        .show(ui);
    drop(actions);

    if let Some(key) = response.sort_requested {
        change_sort(&mut state.ctx, key);
    }
    if let Some(page) = response.page_requested {
        change_page(&mut state.ctx, page);
    }
    match intent.into_inner() {
        Some(RowIntent::Edit(id)) => navigate(&mut state.ctx, Route::EditUser(id)),
        Some(RowIntent::Delete(user)) => open_delete(&mut state.ctx, user),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use gove_business::format::format_date;

    use super::*;

    fn user() -> User {
        User {
            id: 4,
            name: "Ana Souza".to_owned(),
            email: "ana@gov.br".to_owned(),
            phone: None,
            last_login: None,
            user_type: Some("admin".to_owned()),
            sector: Some("SEDUC".to_owned()),
            created_at: Some("2024-03-05T14:07:00Z".to_owned()),
            updated_at: None,
            deleted_at: None,
            permissions: vec![],
        }
    }

    #[test]
    fn columns_format_dates_and_missing_values() {
        let columns = users_columns().expect("unique keys");
        let texts: Vec<String> = columns.iter().map(|column| column.display(&user())).collect();
        let created = format_date("2024-03-05T14:07:00Z");
        assert_eq!(texts, vec!["Ana Souza", "ana@gov.br", "", created.as_str(), "-"]);
    }
}
