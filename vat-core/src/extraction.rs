use crate::{Error, Extractor, Limit, Preparator, Result, TypeHandler};

/// Single-use request to move one result slot into a host value, with a
/// default substituted when the source reports NULL.
pub struct Extraction<T: TypeHandler + Clone> {
    value: T,
    default: T,
    null: bool,
    extracted: bool,
}

impl<T: TypeHandler + Clone> Extraction<T> {
    pub fn new(default: T) -> Self {
        Self {
            value: default.clone(),
            default,
            null: false,
            extracted: false,
        }
    }

    pub fn width(&self) -> usize {
        T::width()
    }

    pub fn rows(&self) -> usize {
        self.extracted as usize
    }

    /// Whether the extracted slot was NULL, in which case [`value`]
    /// holds the default.
    ///
    /// [`value`]: Extraction::value
    pub fn is_null(&self) -> bool {
        self.null
    }

    pub fn reset(&mut self) {
        self.extracted = false;
        self.null = false;
    }

    pub fn extract(&mut self, offset: usize, source: &mut dyn Extractor) -> Result<()> {
        if self.extracted {
            return Err(Error::Binding(
                "the value was already extracted, call reset() before extracting again".into(),
            ));
        }
        let found = self.value.extract(&self.default, offset, source)?;
        self.null = !found;
        self.extracted = true;
        Ok(())
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Extraction into any growable collection, one element appended per row.
///
/// The per-row null flag lives in a side list because the element type may
/// have no way to store it inline, and a NULL row still contributes an
/// element, the default.
pub struct SequenceExtraction<C, T> {
    values: C,
    default: T,
    nulls: Vec<bool>,
}

impl<C, T> SequenceExtraction<C, T>
where
    C: Default + Extend<T>,
    T: TypeHandler + Clone,
{
    pub fn new(default: T) -> Self {
        Self {
            values: C::default(),
            default,
            nulls: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        T::width()
    }

    /// Rows extracted so far.
    pub fn rows(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_null(&self, row: usize) -> Result<bool> {
        self.nulls.get(row).copied().ok_or_else(|| {
            Error::Range(format!(
                "row {row} is out of bounds, {} rows were extracted",
                self.nulls.len()
            ))
        })
    }

    /// Extracts a single row, appending one element.
    pub fn extract(&mut self, offset: usize, source: &mut dyn Extractor) -> Result<()> {
        let mut value = self.default.clone();
        let found = value.extract(&self.default, offset, source)?;
        self.nulls.push(!found);
        self.values.extend(Some(value));
        Ok(())
    }

    /// Extracts up to `available` rows, never more than the limit allows.
    /// A hard limit that cannot be filled from `available` is an error.
    pub fn extract_rows(
        &mut self,
        offset: usize,
        source: &mut dyn Extractor,
        available: usize,
        limit: &Limit,
    ) -> Result<usize> {
        let allowed = limit.allowed_row_count();
        let count = available.min(allowed);
        if limit.is_hard() && count < allowed {
            return Err(Error::Binding(format!(
                "hard limit of {allowed} rows cannot be satisfied, only {count} available"
            )));
        }
        log::trace!("extracting {count} rows at offset {offset}");
        for _ in 0..count {
            self.extract(offset, source)?;
        }
        Ok(count)
    }

    pub fn values(&self) -> &C {
        &self.values
    }

    pub fn into_values(self) -> C {
        self.values
    }
}

/// Extraction into a buffer whose size is fixed at construction and filled
/// in one pass. A zero size is rejected before any I/O happens.
pub struct BulkExtraction<T: TypeHandler + Clone> {
    values: Vec<T>,
    default: T,
    nulls: Vec<bool>,
    filled: usize,
}

impl<T: TypeHandler + Clone> BulkExtraction<T> {
    pub fn new(default: T, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::Binding(
                "cannot bulk extract into a zero-sized buffer".into(),
            ));
        }
        Ok(Self {
            values: vec![default.clone(); size],
            default,
            nulls: vec![false; size],
            filled: 0,
        })
    }

    pub fn width(&self) -> usize {
        T::width()
    }

    /// Buffer size fixed at construction.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Rows filled so far.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_null(&self, row: usize) -> Result<bool> {
        self.nulls.get(row).copied().ok_or_else(|| {
            Error::Range(format!(
                "row {row} is out of bounds for a buffer of {} rows",
                self.nulls.len()
            ))
        })
    }

    /// Reserves the whole buffer ahead of the fetch, as one reservation
    /// rather than per element.
    pub fn prepare(&self, offset: usize, sink: &mut dyn Preparator) -> Result<()> {
        T::prepare(&self.default, offset, self.values.len(), sink)
    }

    pub fn extract(&mut self, offset: usize, source: &mut dyn Extractor) -> Result<()> {
        let Some(slot) = self.values.get_mut(self.filled) else {
            return Err(Error::Range(format!(
                "the buffer of {} rows is already full",
                self.values.len()
            )));
        };
        let found = slot.extract(&self.default, offset, source)?;
        self.nulls[self.filled] = !found;
        self.filled += 1;
        Ok(())
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}
