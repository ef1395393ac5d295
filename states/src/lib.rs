//! Type-keyed state container used by the business and UI crates.
//!
//! - [`State`]: plain values, read and written by the UI every frame.
//! - [`Compute`]: cached values, derived from states or written by commands.
//! - [`Command`]: manual-only async work (network IO) publishing through an updater.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod snapshot;
mod state;
mod state_sync_status;
mod task;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::Compute;
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::{AsAny, State};
pub use state_sync_status::StateSyncStatus;
pub use task::{LatestGeneration, TaskHandle, TaskId};
pub use updater::{LatestOnlyUpdater, Updater};

#[cfg(test)]
mod state_ctx_tests {
    use std::any::TypeId;
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter {
        value: i32,
    }

    impl State for Counter {
        fn snapshot(&self) -> Option<Box<dyn State>> {
            Some(Box::new(self.clone()))
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Doubled {
        value: i32,
    }

    impl State for Doubled {}

    impl Compute for Doubled {
        fn deps(&self) -> Vec<TypeId> {
            vec![TypeId::of::<Counter>()]
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            let counter = deps.get::<Counter>();
            updater.set(Doubled {
                value: counter.value * 2,
            });
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Echo {
        value: i32,
    }

    impl State for Echo {}
    impl Compute for Echo {}

    /// Publishes the counter after a delay that shrinks with every dispatch,
    /// so later dispatches resolve first.
    struct SlowEcho;

    impl Command for SlowEcho {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: LatestOnlyUpdater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let value = snap.state::<Counter>().value;
            Box::pin(async move {
                let delay = 60_u64.saturating_sub(20 * updater.task().generation());
                tokio::time::sleep(Duration::from_millis(delay)).await;
                updater.set(Echo { value });
            })
        }
    }

    #[test]
    fn state_roundtrip() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter { value: 1 });

        ctx.update::<Counter>(|c| c.value += 41);

        assert_eq!(ctx.state::<Counter>().value, 42);
        assert_eq!(ctx.status::<Counter>(), Some(StateSyncStatus::Dirty));
    }

    #[test]
    fn missing_state_is_an_error() {
        let ctx = StateCtx::new();
        assert!(matches!(
            ctx.try_state::<Counter>(),
            Err(Error::StateNotFound { .. })
        ));
        assert!(ctx.cached::<Doubled>().is_none());
    }

    #[test]
    fn derived_compute_follows_its_dependency() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter { value: 2 });
        ctx.record_compute(Doubled::default());

        ctx.run_computed();
        ctx.sync_computes();
        assert_eq!(ctx.cached::<Doubled>().map(|d| d.value), Some(4));

        ctx.update::<Counter>(|c| c.value = 5);
        ctx.run_computed();
        ctx.sync_computes();
        assert_eq!(ctx.cached::<Doubled>().map(|d| d.value), Some(10));
    }

    #[test]
    fn clean_dependencies_do_not_rerun_computes() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter { value: 2 });
        ctx.record_compute(Doubled::default());
        ctx.run_computed();
        ctx.sync_computes();
        ctx.run_computed();

        // Nothing changed, so nothing was published.
        assert_eq!(ctx.sync_computes(), 0);
    }

    #[test]
    fn updater_writes_are_applied_on_sync() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter::default());

        ctx.updater().set(Counter { value: 7 });
        assert_eq!(ctx.state::<Counter>().value, 0);

        assert_eq!(ctx.sync_computes(), 1);
        assert_eq!(ctx.state::<Counter>().value, 7);
    }

    #[test]
    fn dispatch_without_runtime_fails() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter::default());
        ctx.record_compute(Echo::default());
        ctx.record_command(SlowEcho);

        assert!(matches!(
            ctx.try_dispatch::<SlowEcho>(),
            Err(Error::NoRuntime { .. })
        ));
    }

    #[tokio::test]
    async fn unregistered_command_fails() {
        let mut ctx = StateCtx::new();
        assert!(matches!(
            ctx.try_dispatch::<SlowEcho>(),
            Err(Error::CommandNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn latest_dispatch_wins_even_if_it_resolves_first() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter { value: 1 });
        ctx.record_compute(Echo::default());
        ctx.record_command(SlowEcho);

        ctx.dispatch::<SlowEcho>();
        ctx.update::<Counter>(|c| c.value = 2);
        ctx.dispatch::<SlowEcho>();
        assert_eq!(ctx.generation::<SlowEcho>(), 2);

        tokio::time::sleep(Duration::from_millis(150)).await;
        ctx.sync_computes();

        assert_eq!(ctx.cached::<Echo>().map(|e| e.value), Some(2));
    }

    #[tokio::test]
    async fn enqueued_commands_run_once_per_flush() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter { value: 3 });
        ctx.record_compute(Echo::default());
        ctx.record_command(SlowEcho);

        ctx.enqueue_command::<SlowEcho>();
        ctx.enqueue_command::<SlowEcho>();
        assert!(ctx.has_pending_commands());
        ctx.flush_commands();
        assert!(!ctx.has_pending_commands());
        assert_eq!(ctx.generation::<SlowEcho>(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        ctx.sync_computes();
        assert_eq!(ctx.cached::<Echo>().map(|e| e.value), Some(3));
    }
}
