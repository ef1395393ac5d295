//! Dispatch bookkeeping for commands.
//!
//! Every dispatch of a command type gets the next generation number. Only the
//! task holding the latest generation may publish results; older tasks are
//! cancelled cooperatively and anything they still send is discarded.

use std::any::TypeId;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Identifies one dispatch of one command type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    command: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(command: TypeId, generation: u64) -> Self {
        Self {
            command,
            generation,
        }
    }

    pub fn command(&self) -> TypeId {
        self.command
    }

    /// Higher generations were dispatched later.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Shared "latest issued generation" counter of a command type.
#[derive(Debug, Clone, Default)]
pub struct LatestGeneration(Arc<AtomicU64>);

impl LatestGeneration {
    /// Issues the next generation and returns it.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// A running dispatch and the token used to cancel it.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase_from_one() {
        let latest = LatestGeneration::default();
        assert_eq!(latest.current(), 0);
        assert_eq!(latest.advance(), 1);
        assert_eq!(latest.advance(), 2);
        assert!(latest.is_latest(2));
        assert!(!latest.is_latest(1));
    }

    #[test]
    fn clones_share_the_counter() {
        let latest = LatestGeneration::default();
        let other = latest.clone();
        latest.advance();
        assert_eq!(other.current(), 1);
    }

    #[test]
    fn cancelling_a_handle_cancels_its_token() {
        let token = CancellationToken::new();
        let handle = TaskHandle::new(TaskId::new(TypeId::of::<u8>(), 3), token.clone());

        assert_eq!(handle.id().generation(), 3);
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(handle.is_cancelled());
    }
}
