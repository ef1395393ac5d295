use std::{future::Future, pin::Pin};

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Manual-only unit of async work.
///
/// A command never runs implicitly: the UI calls `StateCtx::dispatch` (or
/// `enqueue_command` + `flush_commands`). It reads its inputs from the snapshot
/// taken at dispatch time and publishes results through the updater, which
/// silently drops writes once a newer dispatch of the same command exists.
pub trait Command: Send + Sync + 'static {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
