//! Wiring of every state and command, navigation and the per-frame reconcile.

use gove_states::StateCtx;
use log::info;

use crate::http::ApiClient;
use crate::notification::Notifications;
use crate::permissions::{FetchPermissionsCommand, PermissionsCompute, fetch_permissions};
use crate::route::Route;
use crate::users::{
    DeleteUserCommand, DeleteUserCompute, FetchUsersCommand, FormLoad, LoadUserCommand, LoadUserCompute,
    SubmitUserCommand, SubmitUserCompute, UserFormState, UsersListCompute, UsersListState,
    fetch_users, reconcile_delete, reconcile_form, reconcile_list,
};
use crate::BusinessConfig;

/// Registers the states, computes and commands of the application.
pub fn register(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(ApiClient::from_config(&config));
    ctx.add_state(UsersListState::new(config.per_page));
    ctx.add_state(config);
    ctx.add_state(Route::default());
    ctx.add_state(Notifications::default());
    ctx.add_state(UserFormState::create());

    ctx.record_compute(UsersListCompute::default());
    ctx.record_compute(DeleteUserCompute::default());
    ctx.record_compute(LoadUserCompute::default());
    ctx.record_compute(SubmitUserCompute::default());
    ctx.record_compute(PermissionsCompute::default());

    ctx.record_command(FetchUsersCommand);
    ctx.record_command(DeleteUserCommand);
    ctx.record_command(LoadUserCommand);
    ctx.record_command(SubmitUserCommand);
    ctx.record_command(FetchPermissionsCommand);
}

/// Switches page and queues what the page needs on entry.
pub fn navigate(ctx: &mut StateCtx, route: Route) {
    info!("Navigating to {route:?}");
    *ctx.state_mut::<Route>() = route;
    match route {
        Route::Users => fetch_users(ctx),
        Route::CreateUser => {
            *ctx.state_mut::<UserFormState>() = UserFormState::create();
            fetch_permissions(ctx);
        }
        Route::EditUser(id) => {
            *ctx.state_mut::<UserFormState>() = UserFormState::edit(id);
            ctx.enqueue_command::<LoadUserCommand>();
            fetch_permissions(ctx);
        }
    }
}

/// Closes the current notification and follows its route, if any.
pub fn dismiss_notification(ctx: &mut StateCtx) {
    let then = ctx
        .state_mut::<Notifications>()
        .dismiss()
        .and_then(|n| n.then);
    if let Some(route) = then {
        navigate(ctx, route);
    }
}

/// Whether a request is in flight; the UI keeps repainting while it is.
pub fn is_busy(ctx: &StateCtx) -> bool {
    let form = ctx.state::<UserFormState>();
    ctx.state::<UsersListState>().is_loading()
        || ctx.cached::<DeleteUserCompute>().is_some_and(DeleteUserCompute::is_deleting)
        || ctx.cached::<PermissionsCompute>().is_some_and(PermissionsCompute::is_loading)
        || form.is_submitting()
        || form.load() == FormLoad::Loading
}

/// Folds finished command results into page state. Call after
/// `StateCtx::sync_computes`.
pub fn reconcile(ctx: &mut StateCtx) {
    reconcile_list(ctx);
    reconcile_delete(ctx);
    reconcile_form(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Notification;

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        register(&mut ctx, BusinessConfig::new("http://localhost:700/api"));
        ctx
    }

    #[test]
    fn navigating_to_edit_starts_loading() {
        let mut ctx = ctx();
        navigate(&mut ctx, Route::EditUser(5));

        assert_eq!(*ctx.state::<Route>(), Route::EditUser(5));
        assert_eq!(ctx.state::<UserFormState>().load(), FormLoad::Loading);
        assert!(ctx.has_pending_commands());
    }

    #[test]
    fn navigating_to_users_shows_loading() {
        let mut ctx = ctx();
        assert!(!is_busy(&ctx));
        navigate(&mut ctx, Route::Users);
        assert!(ctx.state::<UsersListState>().is_loading());
        assert!(is_busy(&ctx));
    }

    #[test]
    fn dismiss_follows_the_notification_route() {
        let mut ctx = ctx();
        *ctx.state_mut::<Route>() = Route::CreateUser;
        ctx.state_mut::<Notifications>()
            .show(Notification::success("ok", "ok").then_navigate(Route::Users));

        dismiss_notification(&mut ctx);

        assert_eq!(*ctx.state::<Route>(), Route::Users);
        assert!(ctx.state::<Notifications>().current().is_none());
    }
}
