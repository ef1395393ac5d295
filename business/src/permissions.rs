//! Permission tree: API call, cache and fetch command.

use gove_states::{
    Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State, StateCtx,
};
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::http::ApiClient;
use crate::types::Permission;
use crate::{ApiError, ApiResult};

/// GET `/permissions`
pub async fn list_permissions(client: &ApiClient) -> ApiResult<Vec<Permission>> {
    client
        .get("permissions")
        .send()
        .await?
        .error_for_status()?
        .json()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PermissionsResult {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Permission>),
    Error(ApiError),
}

/// Latest permission tree, shown as checkbox groups by the user form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionsCompute {
    pub result: PermissionsResult,
}

impl PermissionsCompute {
    pub fn is_loading(&self) -> bool {
        matches!(self.result, PermissionsResult::Loading)
    }

    /// Root permissions, each holding its children.
    pub fn groups(&self) -> &[Permission] {
        match &self.result {
            PermissionsResult::Loaded(permissions) => permissions,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.result {
            PermissionsResult::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl State for PermissionsCompute {}
impl Compute for PermissionsCompute {}

/// Fetches `/permissions` into [`PermissionsCompute`].
#[derive(Debug, Default)]
pub struct FetchPermissionsCommand;

impl Command for FetchPermissionsCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let client = match snap.try_state::<ApiClient>() {
            Ok(client) => client.clone(),
            Err(err) => {
                error!("FetchPermissionsCommand: {err}");
                return Box::pin(async {});
            }
        };

        Box::pin(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("FetchPermissionsCommand cancelled");
                }
                result = list_permissions(&client) => {
                    let result = match result {
                        Ok(permissions) => {
                            info!("Loaded {} permission groups", permissions.len());
                            PermissionsResult::Loaded(permissions)
                        }
                        Err(err) => {
                            warn!("Failed to load permissions: {err}");
                            PermissionsResult::Error(err)
                        }
                    };
                    updater.set(PermissionsCompute { result });
                }
            }
        })
    }
}

/// Marks the tree as loading and queues a fetch.
pub fn fetch_permissions(ctx: &mut StateCtx) {
    ctx.update::<PermissionsCompute>(|c| c.result = PermissionsResult::Loading);
    ctx.enqueue_command::<FetchPermissionsCommand>();
}
