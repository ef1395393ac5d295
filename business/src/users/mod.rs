//! Users domain module.
//!
//! This module is the single home for:
//! - the list controller and its fetch command
//! - the delete confirmation flow
//! - the create/edit form, its validation and its commands
//! - API helpers for `/users`
//!
//! UI code should not define domain `State`/`Compute`/`Command`. It reads via
//! `ctx.state::<T>()` / `ctx.cached::<T>()` and changes things through the
//! functions re-exported here.

pub mod api;
pub mod delete;
pub mod form;
pub mod list;
pub mod validation;

pub use api::ListUsersQuery;
pub use delete::{
    DeleteUserCommand, DeleteUserCompute, DeleteUserResult, cancel_delete, confirm_delete,
    is_deleting, open_delete, reconcile_delete,
};
pub use form::{
    FormLoad, FormMode, LoadUserCommand, LoadUserCompute, LoadUserResult, SubmitUserCommand,
    SubmitUserCompute, SubmitUserResult, USER_TYPES, UserFormState, reconcile_form, submit_form,
};
pub use list::{
    DeleteTarget, FetchUsersCommand, UsersListCompute, UsersListResult, UsersListState,
    change_page, change_per_page, change_sort, fetch_users, reconcile_list,
};
pub use validation::{FieldErrors, FormField, validate};
