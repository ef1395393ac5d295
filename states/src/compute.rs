use std::any::TypeId;

use crate::{Dep, State, Updater};

/// A cached value kept next to the states.
///
/// Two flavours exist:
/// - derived computes list their `deps` and publish a new value from `compute`
///   whenever one of those states changed;
/// - caches written by commands keep the default no-op `compute` and no deps.
///
/// `compute` must not perform IO. Side effects belong in a [`Command`](crate::Command).
pub trait Compute: State {
    fn deps(&self) -> Vec<TypeId> {
        Vec::new()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}
}
