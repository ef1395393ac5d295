mod breadcrumbs;
pub mod data_table;
pub mod delete_confirmation;
pub mod form_field;
pub mod notification;
pub mod pagination;
pub mod permissions_tree;

pub use breadcrumbs::breadcrumbs;
pub use data_table::{DataTable, TableResponse};
pub use delete_confirmation::delete_confirmation;
pub use form_field::{text_field, user_type_field};
pub use notification::notification_dialog;
pub use pagination::page_selector;
pub use permissions_tree::permissions_tree;
