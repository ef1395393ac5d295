use std::{
    any::{TypeId, type_name},
    collections::BTreeMap,
};

use crate::{Error, State, ctx::Entry, state::downcast_ref};

/// Read-only view of the context handed to [`Compute::compute`](crate::Compute::compute).
#[derive(Clone, Copy)]
pub struct Dep<'a> {
    entries: &'a BTreeMap<TypeId, Entry>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(entries: &'a BTreeMap<TypeId, Entry>) -> Self {
        Self { entries }
    }

    pub fn try_get<T: State>(&self) -> Result<&'a T, Error> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| downcast_ref::<T>(entry.value.as_ref()))
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was never registered. Declaring a dependency that is not
    /// registered is a wiring bug.
    pub fn get<T: State>(&self) -> &'a T {
        self.try_get::<T>().unwrap_or_else(|err| panic!("{err}"))
    }
}
