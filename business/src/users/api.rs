//! Users API client helpers.
//!
//! These functions perform network IO against `/users` and are called from
//! commands only. Callers map results into compute updates.

use log::info;

use crate::http::ApiClient;
use crate::types::{Paginated, SortDirection, User, UserFormValues};
use crate::ApiResult;

/// Query of `GET /users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListUsersQuery {
    pub page: u32,
    pub per_page: u32,
    pub order_by: ustr::Ustr,
    pub order: SortDirection,
}

/// GET `/users?page&per_page&order_by&order`
pub async fn list_users(client: &ApiClient, query: &ListUsersQuery) -> ApiResult<Paginated<User>> {
    let request = client
        .get("users")
        .query("page", query.page)
        .query("per_page", query.per_page)
        .query("order_by", query.order_by)
        .query("order", query.order);
    info!("Listing users: {}", request.url());

    request.send().await?.error_for_status()?.json()
}

/// GET `/users/{id}`
pub async fn get_user(client: &ApiClient, id: u64) -> ApiResult<User> {
    client
        .get(&format!("users/{id}"))
        .send()
        .await?
        .error_for_status()?
        .json()
}

/// POST `/users`
pub async fn create_user(client: &ApiClient, values: &UserFormValues) -> ApiResult<User> {
    info!("Creating user {}", values.email);
    client
        .post("users")
        .json(values)?
        .send()
        .await?
        .error_for_status()?
        .json()
}

/// PUT `/users/{id}`
pub async fn update_user(
    client: &ApiClient,
    id: u64,
    values: &UserFormValues,
) -> ApiResult<User> {
    info!("Updating user {id}");
    client
        .put(&format!("users/{id}"))
        .json(values)?
        .send()
        .await?
        .error_for_status()?
        .json()
}

/// DELETE `/users/{id}`; any 2xx counts, the body is ignored.
pub async fn delete_user(client: &ApiClient, id: u64) -> ApiResult<()> {
    info!("Deleting user {id}");
    client
        .delete(&format!("users/{id}"))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
