use std::any::{TypeId, type_name};

use flume::Sender;
use log::{debug, warn};

use crate::{LatestGeneration, State, TaskId};

/// A value waiting to be applied by `StateCtx::sync_computes`.
pub(crate) struct Update {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) value: Box<dyn State>,
    pub(crate) guard: Option<(u64, LatestGeneration)>,
}

impl Update {
    /// Whether the dispatch that produced this update is still the latest one.
    pub(crate) fn is_current(&self) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|(generation, latest)| latest.is_latest(*generation))
    }
}

/// Publishes new values for states or computes from outside the frame loop.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: State>(&self, value: T) {
        self.send_update(Update {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
            guard: None,
        });
    }

    fn send_update(&self, update: Update) {
        if self.send.send(update).is_err() {
            warn!("Updater: state context dropped, update discarded");
        }
    }
}

/// Updater owned by one command dispatch.
///
/// Writes are dropped once a newer dispatch of the same command was issued.
/// The check is repeated when the update is applied, so a write racing with
/// a re-dispatch cannot land after the newer one.
#[derive(Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
    latest: LatestGeneration,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, task: TaskId, latest: LatestGeneration) -> Self {
        Self {
            inner,
            task,
            latest,
        }
    }

    pub fn task(&self) -> TaskId {
        self.task
    }

    pub fn is_current(&self) -> bool {
        self.latest.is_latest(self.task.generation())
    }

    pub fn set<T: State>(&self, value: T) {
        if !self.is_current() {
            debug!(
                "Dropping stale {} from generation {} (latest is {})",
                type_name::<T>(),
                self.task.generation(),
                self.latest.current()
            );
            return;
        }
        self.inner.send_update(Update {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
            guard: Some((self.task.generation(), self.latest.clone())),
        });
    }
}
