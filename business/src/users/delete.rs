//! Two-step delete: [`open_delete`] asks for confirmation, [`confirm_delete`]
//! calls the API, and a success refetches the list.

use gove_states::{
    Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State, StateCtx,
};
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::ApiError;
use crate::http::ApiClient;
use crate::notification::{Notification, Notifications};
use crate::types::User;
use crate::users::api;
use crate::users::list::{UsersListState, fetch_users};

pub const DELETE_SUCCESS_TITLE: &str = "Usuário excluído com sucesso!";
pub const DELETE_SUCCESS_TEXT: &str = "O usuário foi removido da lista.";
pub const DELETE_ERROR_TITLE: &str = "Erro ao excluir usuário";
pub const DELETE_ERROR_TEXT: &str =
    "Ocorreu um erro ao tentar excluir o usuário. Por favor, tente novamente.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteUserResult {
    #[default]
    Idle,
    /// The call for this user id is in flight.
    Deleting(u64),
    Deleted(u64),
    Error { id: u64, error: ApiError },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteUserCompute {
    pub result: DeleteUserResult,
}

impl DeleteUserCompute {
    pub fn is_deleting(&self) -> bool {
        matches!(self.result, DeleteUserResult::Deleting(_))
    }
}

impl State for DeleteUserCompute {}
impl Compute for DeleteUserCompute {}

/// Deletes the user held by [`UsersListState::delete_target`].
#[derive(Debug, Default)]
pub struct DeleteUserCommand;

impl Command for DeleteUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let (client, id) = match (
            snap.try_state::<ApiClient>(),
            snap.try_state::<UsersListState>(),
        ) {
            (Ok(client), Ok(list)) => match list.delete_target().user() {
                Some(user) => (client.clone(), user.id),
                None => {
                    warn!("DeleteUserCommand dispatched without a confirmed user");
                    return Box::pin(async {});
                }
            },
            (Err(err), _) | (_, Err(err)) => {
                error!("DeleteUserCommand: {err}");
                return Box::pin(async {});
            }
        };

        Box::pin(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("DeleteUserCommand for user {id} cancelled");
                }
                result = api::delete_user(&client, id) => {
                    let result = match result {
                        Ok(()) => DeleteUserResult::Deleted(id),
                        Err(error) => {
                            error!("Failed to delete user {id}: {error}");
                            DeleteUserResult::Error { id, error }
                        }
                    };
                    updater.set(DeleteUserCompute { result });
                }
            }
        })
    }
}

pub fn is_deleting(ctx: &StateCtx) -> bool {
    ctx.cached::<DeleteUserCompute>()
        .is_some_and(DeleteUserCompute::is_deleting)
}

/// Opens the confirmation; nothing is deleted yet.
pub fn open_delete(ctx: &mut StateCtx, user: User) {
    ctx.update::<UsersListState>(|list| list.open_delete(user));
}

/// Closes the confirmation unless the delete is already running.
pub fn cancel_delete(ctx: &mut StateCtx) {
    if !is_deleting(ctx) {
        ctx.update::<UsersListState>(UsersListState::close_delete);
    }
}

pub fn confirm_delete(ctx: &mut StateCtx) {
    if is_deleting(ctx) {
        return;
    }
    let Some(id) = ctx
        .state::<UsersListState>()
        .delete_target()
        .user()
        .map(|user| user.id)
    else {
        return;
    };

    ctx.update::<DeleteUserCompute>(|c| c.result = DeleteUserResult::Deleting(id));
    ctx.update::<UsersListState>(|list| list.set_loading(true));
    ctx.enqueue_command::<DeleteUserCommand>();
}

/// Applies a finished delete: success closes the dialog and refetches, failure
/// keeps it open.
pub fn reconcile_delete(ctx: &mut StateCtx) {
    if !matches!(
        ctx.cached::<DeleteUserCompute>().map(|c| &c.result),
        Some(DeleteUserResult::Deleted(_) | DeleteUserResult::Error { .. })
    ) {
        return;
    }

    match std::mem::take(&mut ctx.state_mut::<DeleteUserCompute>().result) {
        DeleteUserResult::Deleted(id) => {
            info!("User {id} deleted");
            ctx.update::<UsersListState>(UsersListState::close_delete);
            ctx.update::<Notifications>(|n| {
                n.show(Notification::success(
                    DELETE_SUCCESS_TITLE,
                    DELETE_SUCCESS_TEXT,
                ));
            });
            fetch_users(ctx);
        }
        DeleteUserResult::Error { .. } => {
            ctx.update::<UsersListState>(|list| list.set_loading(false));
            ctx.update::<Notifications>(|n| {
                n.show(Notification::error(DELETE_ERROR_TITLE, DELETE_ERROR_TEXT));
            });
        }
        DeleteUserResult::Idle | DeleteUserResult::Deleting(_) => {}
    }
}
