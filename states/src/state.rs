use std::any::Any;

/// Type-erased access to the concrete value behind a `dyn State`.
///
/// Implemented for every `'static` type; call it on `&dyn State`, never on
/// `Box<dyn State>` (the box itself is `Any`).
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A value stored in [`StateCtx`](crate::StateCtx), keyed by its type.
pub trait State: AsAny + Send + 'static {
    /// Clone handed to commands when they are dispatched.
    ///
    /// Commands can only read states that return `Some` here.
    fn snapshot(&self) -> Option<Box<dyn State>> {
        None
    }
}

pub(crate) fn downcast_ref<T: State>(value: &dyn State) -> Option<&T> {
    value.as_any().downcast_ref::<T>()
}

pub(crate) fn downcast_mut<T: State>(value: &mut dyn State) -> Option<&mut T> {
    value.as_any_mut().downcast_mut::<T>()
}
