//! Pages, one per route:
//! - `users_page`: the paginated users list
//! - `user_form_page`: create and edit user form

mod user_form_page;
mod users_page;

pub use user_form_page::user_form_page;
pub use users_page::{users_columns, users_page};
