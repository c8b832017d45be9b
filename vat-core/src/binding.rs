use crate::{Binder, Direction, Error, Result, TypeHandler};
use std::collections::VecDeque;

/// Single-use request to move one host value into parameter position(s).
///
/// Binding twice without [`reset`](Binding::reset) is a structural misuse
/// reported as [`Error::Binding`], distinct from any data conversion error.
pub struct Binding<T: TypeHandler> {
    value: T,
    direction: Direction,
    bound: bool,
}

impl<T: TypeHandler> Binding<T> {
    pub fn new(value: T, direction: Direction) -> Self {
        Self {
            value,
            direction,
            bound: false,
        }
    }

    /// Parameter slots this binding occupies.
    pub fn width(&self) -> usize {
        T::width()
    }

    /// Execution steps this binding can satisfy, always one.
    pub fn rows(&self) -> usize {
        1
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn reset(&mut self) {
        self.bound = false;
    }

    pub fn bind(&mut self, offset: usize, sink: &mut dyn Binder) -> Result<()> {
        if self.bound {
            return Err(Error::Binding(
                "the value was already bound, call reset() before binding again".into(),
            ));
        }
        self.value.bind(offset, sink, self.direction)?;
        self.bound = true;
        Ok(())
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Bind request over a homogeneous collection, one element consumed per
/// execution step. An empty collection is rejected at construction, before
/// any statement is touched.
pub struct SequenceBinding<T: TypeHandler> {
    values: VecDeque<T>,
    direction: Direction,
}

impl<T: TypeHandler> SequenceBinding<T> {
    pub fn new(values: impl IntoIterator<Item = T>, direction: Direction) -> Result<Self> {
        let values = values.into_iter().collect::<VecDeque<_>>();
        if values.is_empty() {
            return Err(Error::Binding("cannot bind an empty collection".into()));
        }
        Ok(Self { values, direction })
    }

    pub fn width(&self) -> usize {
        T::width()
    }

    /// Execution steps left.
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes and binds the next element.
    pub fn bind_next(&mut self, offset: usize, sink: &mut dyn Binder) -> Result<()> {
        let Some(value) = self.values.pop_front() else {
            return Err(Error::Binding(
                "every element of the collection was already bound".into(),
            ));
        };
        value.bind(offset, sink, self.direction)
    }
}
