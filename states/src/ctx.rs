use std::{
    any::{TypeId, type_name},
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use flume::{Receiver, Sender};
use log::{debug, error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::{
    Command, CommandSnapshot, Compute, Dep, Error, LatestGeneration, LatestOnlyUpdater, State,
    StateSyncStatus, TaskHandle, TaskId, Updater,
    state::{downcast_mut, downcast_ref},
    updater::Update,
};

pub(crate) struct Entry {
    pub(crate) name: &'static str,
    pub(crate) value: Box<dyn State>,
    pub(crate) status: StateSyncStatus,
}

type ComputeRunner = for<'a> fn(&'a dyn State, Dep<'a>, Updater);

struct ComputeEntry {
    id: TypeId,
    deps: Vec<TypeId>,
    run: ComputeRunner,
}

struct CommandEntry {
    name: &'static str,
    command: Arc<dyn Command>,
    latest: LatestGeneration,
    running: Option<TaskHandle>,
}

fn run_compute<'a, T: Compute>(value: &'a dyn State, deps: Dep<'a>, updater: Updater) {
    if let Some(compute) = downcast_ref::<T>(value) {
        compute.compute(deps, updater);
    }
}

/// Owns every state, compute and command of the application.
///
/// The UI loop is expected to call, once per frame:
/// 1. [`sync_computes`](Self::sync_computes) to apply results published by commands,
/// 2. render, reading via `state`/`cached` and writing via `state_mut`/`update`,
/// 3. [`run_computed`](Self::run_computed) and [`flush_commands`](Self::flush_commands).
pub struct StateCtx {
    entries: BTreeMap<TypeId, Entry>,
    computes: Vec<ComputeEntry>,
    commands: BTreeMap<TypeId, CommandEntry>,
    pending: Vec<TypeId>,
    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field(
                "entries",
                &self.entries.values().map(|e| e.name).collect::<Vec<_>>(),
            )
            .field(
                "commands",
                &self.commands.values().map(|c| c.name).collect::<Vec<_>>(),
            )
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            entries: BTreeMap::new(),
            computes: Vec::new(),
            commands: BTreeMap::new(),
            pending: Vec::new(),
            send,
            recv,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                name: type_name::<T>(),
                value: Box::new(state),
                status: StateSyncStatus::BeforeInit,
            },
        );
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let deps = compute.deps();
        self.computes.retain(|c| c.id != id);
        self.computes.push(ComputeEntry {
            id,
            deps,
            run: run_compute::<T>,
        });
        self.add_state(compute);
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(
            TypeId::of::<C>(),
            CommandEntry {
                name: type_name::<C>(),
                command: Arc::new(command),
                latest: LatestGeneration::default(),
                running: None,
            },
        );
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| downcast_ref::<T>(entry.value.as_ref()))
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never added.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutable access; marks `T` dirty so dependent computes run again.
    ///
    /// # Panics
    /// Panics if `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let entry = self
            .entries
            .get_mut(&TypeId::of::<T>())
            .unwrap_or_else(|| panic!("State not found: {}", type_name::<T>()));
        entry.status = StateSyncStatus::Dirty;
        downcast_mut::<T>(entry.value.as_mut())
            .unwrap_or_else(|| panic!("State type mismatch: {}", type_name::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.try_state::<T>().ok()
    }

    pub fn status<T: State>(&self) -> Option<StateSyncStatus> {
        self.entries.get(&TypeId::of::<T>()).map(|entry| entry.status)
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Runs every compute seen for the first time or whose dependencies changed,
    /// then marks everything clean.
    pub fn run_computed(&mut self) {
        let dirty: BTreeSet<TypeId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.status.needs_compute())
            .map(|(id, _)| *id)
            .collect();

        for compute in &self.computes {
            let Some(entry) = self.entries.get(&compute.id) else {
                continue;
            };
            let first_run = entry.status == StateSyncStatus::BeforeInit;
            if first_run || compute.deps.iter().any(|dep| dirty.contains(dep)) {
                debug!("Running compute {}", entry.name);
                (compute.run)(
                    entry.value.as_ref(),
                    Dep::new(&self.entries),
                    Updater::new(self.send.clone()),
                );
            }
        }

        for entry in self.entries.values_mut() {
            entry.status = StateSyncStatus::Clean;
        }
    }

    /// Applies every pending update and returns how many were applied.
    pub fn sync_computes(&mut self) -> usize {
        let mut applied = 0;
        for update in self.recv.try_iter() {
            if !update.is_current() {
                debug!("Discarding stale update for {}", update.name);
                continue;
            }
            match self.entries.get_mut(&update.id) {
                Some(entry) => {
                    entry.value = update.value;
                    entry.status = StateSyncStatus::Dirty;
                    applied += 1;
                }
                None => warn!("Update for unregistered state {}", update.name),
            }
        }
        applied
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, entry) in &self.entries {
            if let Some(value) = entry.value.snapshot() {
                snap.insert_boxed(*id, value);
            }
        }
        snap
    }

    /// Dispatches `C` now. Failures are logged; use [`try_dispatch`](Self::try_dispatch)
    /// to handle them.
    pub fn dispatch<C: Command>(&mut self) {
        if let Err(err) = self.try_dispatch::<C>() {
            error!("dispatch failed: {err}");
        }
    }

    pub fn try_dispatch<C: Command>(&mut self) -> Result<TaskId, Error> {
        self.dispatch_id(TypeId::of::<C>(), type_name::<C>())
    }

    fn dispatch_id(&mut self, id: TypeId, name: &str) -> Result<TaskId, Error> {
        let handle =
            tokio::runtime::Handle::try_current().map_err(|_| Error::no_runtime(name))?;
        let snap = self.snapshot();
        let updater = Updater::new(self.send.clone());

        let entry = self
            .commands
            .get_mut(&id)
            .ok_or_else(|| Error::command_not_found(id, name))?;

        let generation = entry.latest.advance();
        if let Some(previous) = entry.running.take() {
            previous.cancel();
        }

        let task = TaskId::new(id, generation);
        let token = CancellationToken::new();
        let updater = LatestOnlyUpdater::new(updater, task, entry.latest.clone());
        handle.spawn(entry.command.run(snap, updater, token.clone()));
        entry.running = Some(TaskHandle::new(task, token));

        info!("Dispatched {} (generation {generation})", entry.name);
        Ok(task)
    }

    /// Queues `C` for the next [`flush_commands`](Self::flush_commands).
    /// Queuing the same command twice in one frame dispatches it once.
    pub fn enqueue_command<C: Command>(&mut self) {
        let id = TypeId::of::<C>();
        if !self.pending.contains(&id) {
            self.pending.push(id);
        }
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn flush_commands(&mut self) {
        for id in std::mem::take(&mut self.pending) {
            let name = self
                .commands
                .get(&id)
                .map(|entry| entry.name)
                .unwrap_or("<unregistered command>");
            if let Err(err) = self.dispatch_id(id, name) {
                error!("flush_commands: {err}");
            }
        }
    }

    /// Latest generation issued for `C`; zero if it was never dispatched.
    pub fn generation<C: Command>(&self) -> u64 {
        self.commands
            .get(&TypeId::of::<C>())
            .map_or(0, |entry| entry.latest.current())
    }
}
