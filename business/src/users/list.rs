//! Users list controller: query, rows, loading flag and delete target.
//!
//! The page reads [`UsersListState`] every frame and turns table intents into
//! [`change_page`] / [`change_sort`]. Both queue [`FetchUsersCommand`] when the
//! query changed; [`reconcile_list`] folds the fetch result back into the state.

use gove_states::{
    Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State, StateCtx,
};
use log::{error, info};
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::http::ApiClient;
use crate::notification::{Notification, Notifications};
use crate::pagination::PaginationState;
use crate::table::SortState;
use crate::types::{Paginated, SortDirection, User};
use crate::users::api::{self, ListUsersQuery};
use crate::{ApiError, DEFAULT_PER_PAGE};

pub const FETCH_ERROR_TITLE: &str = "Erro ao buscar usuários";
pub const FETCH_ERROR_TEXT: &str =
    "Ocorreu um erro ao tentar buscar a lista de usuários. Por favor, tente novamente.";

/// Column the list is ordered by until the user picks another one.
pub const DEFAULT_ORDER_BY: &str = "created_at";

/// Visibility of the delete confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteTarget {
    #[default]
    Closed,
    Confirming(User),
}

impl DeleteTarget {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Closed => None,
            Self::Confirming(user) => Some(user),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersListState {
    page: u32,
    per_page: u32,
    order_by: Ustr,
    order: SortDirection,
    total: u64,
    rows: Vec<User>,
    loading: bool,
    delete_target: DeleteTarget,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl UsersListState {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            order_by: Ustr::from(DEFAULT_ORDER_BY),
            order: SortDirection::Desc,
            total: 0,
            rows: Vec::new(),
            loading: false,
            delete_target: DeleteTarget::Closed,
        }
    }

    pub fn query(&self) -> ListUsersQuery {
        ListUsersQuery {
            page: self.page,
            per_page: self.per_page,
            order_by: self.order_by,
            order: self.order,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn rows(&self) -> &[User] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pagination(&self) -> PaginationState {
        PaginationState::new(self.page, self.per_page, self.total)
    }

    pub fn sort(&self) -> SortState {
        SortState {
            column: Some(self.order_by),
            direction: self.order,
        }
    }

    pub fn delete_target(&self) -> &DeleteTarget {
        &self.delete_target
    }

    /// Returns whether the page changed.
    pub fn request_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Orders by `key` and flips the direction, whichever column was active.
    pub fn request_sort(&mut self, key: &str) {
        self.order_by = Ustr::from(key);
        self.order = self.order.toggled();
    }

    /// Returns whether the page size changed; a new size restarts at page 1.
    pub fn request_per_page(&mut self, per_page: u32) -> bool {
        let per_page = per_page.max(1);
        if per_page == self.per_page {
            return false;
        }
        self.per_page = per_page;
        self.page = 1;
        true
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Stores a fetched page. Returns `true` when the reported total puts the
    /// current page out of range; the page is then moved to the last valid one
    /// and the caller must fetch again.
    pub fn apply_page(&mut self, page: Paginated<User>) -> bool {
        self.total = page.total;
        let pagination = self.pagination();
        if pagination.is_out_of_range() {
            info!(
                "Page {} is past the last page {}, moving back",
                self.page, pagination.total_pages
            );
            self.page = pagination.clamped_page();
            return true;
        }
        self.rows = page.data;
        self.loading = false;
        false
    }

    pub fn fail_fetch(&mut self) {
        self.loading = false;
    }

    pub fn open_delete(&mut self, user: User) {
        self.delete_target = DeleteTarget::Confirming(user);
    }

    pub fn close_delete(&mut self) {
        self.delete_target = DeleteTarget::Closed;
    }

    /// Shown while the delete call runs; cleared by the fetch that follows.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

impl State for UsersListState {
    fn snapshot(&self) -> Option<Box<dyn State>> {
        Some(Box::new(self.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UsersListResult {
    #[default]
    Idle,
    Loaded {
        query: ListUsersQuery,
        page: Paginated<User>,
    },
    Error(ApiError),
}

/// Latest result of [`FetchUsersCommand`]; consumed by [`reconcile_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersListCompute {
    pub result: UsersListResult,
}

impl State for UsersListCompute {}
impl Compute for UsersListCompute {}

/// Fetches the page described by [`UsersListState::query`].
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let (client, query) = match (
            snap.try_state::<ApiClient>(),
            snap.try_state::<UsersListState>(),
        ) {
            (Ok(client), Ok(list)) => (client.clone(), list.query()),
            (Err(err), _) | (_, Err(err)) => {
                error!("FetchUsersCommand: {err}");
                return Box::pin(async {});
            }
        };

        Box::pin(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("FetchUsersCommand generation {} cancelled", updater.task().generation());
                }
                result = api::list_users(&client, &query) => {
                    let result = match result {
                        Ok(page) => {
                            info!("Fetched {} of {} users (page {})", page.data.len(), page.total, query.page);
                            UsersListResult::Loaded { query, page }
                        }
                        Err(err) => {
                            error!("Failed to fetch users: {err}");
                            UsersListResult::Error(err)
                        }
                    };
                    updater.set(UsersListCompute { result });
                }
            }
        })
    }
}

/// Shows the loading indicator and queues a fetch of the current query.
pub fn fetch_users(ctx: &mut StateCtx) {
    ctx.update::<UsersListState>(UsersListState::begin_fetch);
    ctx.enqueue_command::<FetchUsersCommand>();
}

pub fn change_page(ctx: &mut StateCtx, page: u32) {
    if ctx.state_mut::<UsersListState>().request_page(page) {
        fetch_users(ctx);
    }
}

pub fn change_sort(ctx: &mut StateCtx, key: &str) {
    ctx.update::<UsersListState>(|list| list.request_sort(key));
    fetch_users(ctx);
}

pub fn change_per_page(ctx: &mut StateCtx, per_page: u32) {
    if ctx.state_mut::<UsersListState>().request_per_page(per_page) {
        fetch_users(ctx);
    }
}

/// Applies a finished fetch to the list, at most once per result.
pub fn reconcile_list(ctx: &mut StateCtx) {
    if matches!(
        ctx.cached::<UsersListCompute>().map(|c| &c.result),
        None | Some(UsersListResult::Idle)
    ) {
        return;
    }

    match std::mem::take(&mut ctx.state_mut::<UsersListCompute>().result) {
        UsersListResult::Idle => {}
        UsersListResult::Loaded { page, .. } => {
            if ctx.state_mut::<UsersListState>().apply_page(page) {
                fetch_users(ctx);
            }
        }
        UsersListResult::Error(_) => {
            ctx.update::<UsersListState>(UsersListState::fail_fetch);
            ctx.update::<Notifications>(|n| {
                n.show(Notification::error(FETCH_ERROR_TITLE, FETCH_ERROR_TEXT));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> User {
        User {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@gove.br"),
            phone: None,
            last_login: None,
            user_type: None,
            sector: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
            permissions: Vec::new(),
        }
    }

    #[test]
    fn initial_query_orders_newest_first() {
        let query = UsersListState::default().query();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.order_by.as_str(), "created_at");
        assert_eq!(query.order, SortDirection::Desc);
    }

    #[test]
    fn same_page_is_a_no_op() {
        let mut list = UsersListState::default();
        assert!(!list.request_page(1));
        assert!(list.request_page(3));
        assert_eq!(list.page(), 3);
    }

    #[test]
    fn sort_always_flips_direction() {
        let mut list = UsersListState::default();
        list.request_sort("name");
        assert_eq!(list.sort(), SortState::new("name", SortDirection::Asc));
        list.request_sort("email");
        assert_eq!(list.sort(), SortState::new("email", SortDirection::Desc));
        list.request_sort("email");
        assert_eq!(list.sort().direction, SortDirection::Asc);
    }

    #[test]
    fn new_page_size_restarts_at_first_page() {
        let mut list = UsersListState::default();
        list.request_page(4);
        assert!(list.request_per_page(25));
        assert_eq!(list.page(), 1);
        assert!(!list.request_per_page(25));
    }

    #[test]
    fn applied_page_clears_loading() {
        let mut list = UsersListState::default();
        list.begin_fetch();
        let refetch = list.apply_page(Paginated {
            data: vec![user(1), user(2)],
            total: 12,
            current_page: 1,
            last_page: 2,
        });

        assert!(!refetch);
        assert!(!list.is_loading());
        assert_eq!(list.rows().len(), 2);
        assert_eq!(list.pagination().total_pages, 2);
    }

    #[test]
    fn out_of_range_page_moves_to_last_and_refetches() {
        let mut list = UsersListState::default();
        list.request_page(3);
        list.begin_fetch();
        let refetch = list.apply_page(Paginated {
            data: Vec::new(),
            total: 20,
            current_page: 3,
            last_page: 2,
        });

        assert!(refetch);
        assert_eq!(list.page(), 2);
        assert!(list.is_loading());
    }

    #[test]
    fn failed_fetch_notifies_once() {
        let mut ctx = StateCtx::new();
        ctx.add_state(UsersListState::default());
        ctx.add_state(Notifications::default());
        ctx.record_compute(UsersListCompute {
            result: UsersListResult::Error(ApiError::Transport("refused".into())),
        });
        ctx.update::<UsersListState>(UsersListState::begin_fetch);

        reconcile_list(&mut ctx);

        assert!(!ctx.state::<UsersListState>().is_loading());
        let shown = ctx.state_mut::<Notifications>().dismiss();
        assert_eq!(shown.map(|n| n.title), Some(FETCH_ERROR_TITLE.to_owned()));

        reconcile_list(&mut ctx);
        assert!(ctx.state::<Notifications>().current().is_none());
    }
}
