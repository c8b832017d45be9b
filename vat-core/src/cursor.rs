use crate::{Entries, Error, Result, Value};

/// Bidirectional position cursor over the elements of a [`Value`].
///
/// A scalar iterates as a single element, an empty value as none. The cursor
/// may sit one past the last element; dereferencing there fails instead of
/// yielding garbage.
pub struct ValueCursor<'a> {
    value: &'a Value,
    position: usize,
}

impl<'a> ValueCursor<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Dereferences the current position.
    pub fn item(&self) -> Result<&'a Value> {
        if self.position >= self.value.size() {
            return Err(Error::Access(format!(
                "cannot dereference position {} of a value with {} elements",
                self.position,
                self.value.size()
            )));
        }
        Ok(match self.value {
            Value::Sequence(v) => &v[self.position],
            Value::Struct(v) => element_at(v.as_ref(), self.position),
            Value::OrderedStruct(v) => element_at(v.as_ref(), self.position),
            v => v,
        })
    }

    pub fn advance(&mut self) -> Result<()> {
        if self.position >= self.value.size() {
            return Err(Error::Range(format!(
                "cannot advance past the end of a value with {} elements",
                self.value.size()
            )));
        }
        self.position += 1;
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<()> {
        if self.position == 0 {
            return Err(Error::Range(
                "cannot retreat before the first position".into(),
            ));
        }
        self.position -= 1;
        Ok(())
    }
}

fn element_at<E: Entries>(entries: &E, position: usize) -> &Value {
    entries
        .values()
        .nth(position)
        .expect("position was bounds checked against size()")
}

impl<'a> Iterator for ValueCursor<'a> {
    type Item = &'a Value;
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.item().ok()?;
        let _ = self.advance();
        Some(result)
    }
}

impl Value {
    pub fn cursor(&self) -> ValueCursor<'_> {
        ValueCursor::new(self)
    }
}
