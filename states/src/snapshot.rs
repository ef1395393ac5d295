use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Error, State, state::downcast_ref};

/// Owned clones of every snapshot-capable state, taken when a command is dispatched.
#[derive(Default)]
pub struct CommandSnapshot {
    inner: BTreeMap<TypeId, Box<dyn State>>,
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: State>(&mut self, value: T) {
        self.inner.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub(crate) fn insert_boxed(&mut self, id: TypeId, value: Box<dyn State>) {
        self.inner.insert(id, value);
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|value| downcast_ref::<T>(value.as_ref()))
            .ok_or_else(|| {
                Error::state_not_found(
                    TypeId::of::<T>(),
                    format!("{} is missing from the command snapshot", type_name::<T>()),
                )
            })
    }

    /// # Panics
    /// Panics if `T` is not registered or does not implement `State::snapshot`.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
