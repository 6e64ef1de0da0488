//! Generated values and the shrink context attached to them.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Opaque data an arbitrary attaches to a value to shrink it later.
///
/// Only the arbitrary that produced a value knows how to read its context,
/// so contexts are stored type-erased and recovered with
/// [`Value::context_as`].
pub type ShrinkContext = Rc<dyn Any>;

/// One generated input plus the bookkeeping needed to shrink it further.
///
/// Values are never mutated after construction; shrinking always produces
/// new instances.
pub struct Value<T> {
    pub value: T,
    pub context: Option<ShrinkContext>,
}

impl<T> Value<T> {
    /// A value without any shrink context.
    pub fn new(value: T) -> Self {
        Value {
            value,
            context: None,
        }
    }

    /// A value carrying a shrink context.
    pub fn with_context<C: Any>(value: T, context: C) -> Self {
        Value {
            value,
            context: Some(Rc::new(context) as ShrinkContext),
        }
    }

    /// Borrow the context as `C` when it has that type.
    pub fn context_as<C: Any>(&self) -> Option<&C> {
        self.context.as_ref().and_then(|context| context.downcast_ref::<C>())
    }

    /// Transform the wrapped value, keeping the context untouched.
    pub fn map<U, F>(self, f: F) -> Value<U>
    where
        F: FnOnce(T) -> U,
    {
        Value {
            value: f(self.value),
            context: self.context,
        }
    }
}

impl<T: Clone> Clone for Value<T> {
    fn clone(&self) -> Self {
        Value {
            value: self.value.clone(),
            context: self.context.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("value", &self.value)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::new(value)
    }
}
