use crate::{AsValue, Result, Value, ValueKind};

/// Parameter direction of a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    InOut,
}

/// Connector-supplied capability that writes one primitive value into a
/// parameter slot. The dispatch layer is written purely against this trait
/// and works with any connector implementing it.
pub trait Binder {
    fn bind(&mut self, offset: usize, value: &Value, direction: Direction) -> Result<()>;
    /// Binds a NULL carrying the static type tag of the absent value.
    fn bind_null(&mut self, offset: usize, kind: ValueKind, direction: Direction) -> Result<()>;
}

/// Connector-supplied capability that reads one primitive value out of a
/// result slot. `Ok(None)` reports a NULL.
pub trait Extractor {
    fn extract(&mut self, offset: usize) -> Result<Option<Value>>;
    fn is_null(&self, offset: usize, row: usize) -> bool;
}

/// Pre-fetch allocation hook for connectors that fill whole buffers ahead of
/// extraction. Connectors with no such need keep the no-op default.
pub trait Preparator {
    fn reserve(&mut self, offset: usize, kind: ValueKind, rows: usize) -> Result<()> {
        let _ = (offset, kind, rows);
        Ok(())
    }
}

/// Structural recursion over host types: how many slots a type occupies and
/// how it moves through a [`Binder`]/[`Extractor`] at a given offset.
///
/// Scalars are width 1. Composite types recurse member by member in
/// declaration order, advancing the offset by each member's width, so a
/// stateful connector observes strictly ascending offsets.
pub trait TypeHandler {
    /// Number of consecutive slots occupied.
    fn width() -> usize
    where
        Self: Sized,
    {
        1
    }
    fn bind(&self, offset: usize, sink: &mut dyn Binder, direction: Direction) -> Result<()>;
    /// Reads the slot into `self`. Returns `false` when the source reported
    /// NULL, in which case `self` is set to `default` instead of being left
    /// stale.
    fn extract(
        &mut self,
        default: &Self,
        offset: usize,
        source: &mut dyn Extractor,
    ) -> Result<bool>
    where
        Self: Sized;
    fn prepare(hint: &Self, offset: usize, rows: usize, sink: &mut dyn Preparator) -> Result<()>
    where
        Self: Sized;
}

impl<T: AsValue + Clone> TypeHandler for T {
    fn bind(&self, offset: usize, sink: &mut dyn Binder, direction: Direction) -> Result<()> {
        let value = self.clone().as_value();
        if value.is_empty() {
            // An absent Option binds a typed NULL, not an untyped empty.
            return sink.bind_null(offset, T::kind(), direction);
        }
        sink.bind(offset, &value, direction)
    }
    fn extract(
        &mut self,
        default: &Self,
        offset: usize,
        source: &mut dyn Extractor,
    ) -> Result<bool> {
        match source.extract(offset)? {
            Some(value) if !value.is_empty() => {
                *self = T::try_from_value(&value)?;
                Ok(true)
            }
            _ => {
                // A nullable wrapper clears; anything else takes the default.
                *self = T::cleared().unwrap_or_else(|| default.clone());
                Ok(false)
            }
        }
    }
    fn prepare(hint: &Self, offset: usize, rows: usize, sink: &mut dyn Preparator) -> Result<()> {
        let _ = hint;
        sink.reserve(offset, T::kind(), rows)
    }
}

impl TypeHandler for Value {
    fn bind(&self, offset: usize, sink: &mut dyn Binder, direction: Direction) -> Result<()> {
        if self.is_empty() {
            return sink.bind_null(offset, ValueKind::Empty, direction);
        }
        sink.bind(offset, self, direction)
    }
    fn extract(
        &mut self,
        default: &Self,
        offset: usize,
        source: &mut dyn Extractor,
    ) -> Result<bool> {
        match source.extract(offset)? {
            Some(value) if !value.is_empty() => {
                *self = value;
                Ok(true)
            }
            _ => {
                *self = default.clone();
                Ok(false)
            }
        }
    }
    fn prepare(hint: &Self, offset: usize, rows: usize, sink: &mut dyn Preparator) -> Result<()> {
        sink.reserve(offset, hint.kind(), rows)
    }
}

macro_rules! impl_tuple {
    ($($t:ident: $i:tt),+) => {
        impl<$($t: TypeHandler),+> TypeHandler for ($($t,)+) {
            fn width() -> usize {
                0 $(+ $t::width())+
            }
            fn bind(
                &self,
                mut offset: usize,
                sink: &mut dyn Binder,
                direction: Direction,
            ) -> Result<()> {
                $(
                    self.$i.bind(offset, sink, direction)?;
                    offset += $t::width();
                )+
                let _ = offset;
                Ok(())
            }
            fn extract(
                &mut self,
                default: &Self,
                mut offset: usize,
                source: &mut dyn Extractor,
            ) -> Result<bool> {
                let mut found = true;
                $(
                    found &= self.$i.extract(&default.$i, offset, source)?;
                    offset += $t::width();
                )+
                let _ = offset;
                Ok(found)
            }
            fn prepare(
                hint: &Self,
                mut offset: usize,
                rows: usize,
                sink: &mut dyn Preparator,
            ) -> Result<()> {
                $(
                    $t::prepare(&hint.$i, offset, rows, sink)?;
                    offset += $t::width();
                )+
                let _ = offset;
                Ok(())
            }
        }
    };
}
impl_tuple!(T0: 0, T1: 1);
impl_tuple!(T0: 0, T1: 1, T2: 2);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9, T10: 10);
impl_tuple!(
    T0: 0,
    T1: 1,
    T2: 2,
    T3: 3,
    T4: 4,
    T5: 5,
    T6: 6,
    T7: 7,
    T8: 8,
    T9: 9,
    T10: 10,
    T11: 11
);
