use crate::{Error, Result, Value};
use std::{cmp::Ordering, sync::Arc};

/// Column names shared by every row of a result set.
pub type RowNames = Arc<[String]>;

/// Comparison domain of one sort field, captured once when the field is
/// added, never recomputed per comparison. If the column's dynamic kind
/// varies row to row the captured domain goes stale; inherited behavior,
/// kept as documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    Empty,
    Integer,
    Float,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub position: usize,
    pub kind: ComparisonKind,
}

/// One tuple of extracted values plus shared column names and sort criteria.
///
/// At least one sort field is always present, defaulting to column 0, so any
/// two rows of the same result set remain totally ordered.
#[derive(Debug, Clone)]
pub struct Row {
    names: RowNames,
    values: Vec<Value>,
    sort_fields: Vec<SortField>,
}

fn comparison_kind(value: &Value) -> ComparisonKind {
    if value.is_empty() {
        ComparisonKind::Empty
    } else if value.is_integer() {
        ComparisonKind::Integer
    } else if value.is_float() {
        ComparisonKind::Float
    } else {
        ComparisonKind::String
    }
}

impl Row {
    pub fn new(names: RowNames) -> Self {
        let values = vec![Value::Empty; names.len()];
        Self {
            names,
            values,
            sort_fields: vec![SortField {
                position: 0,
                kind: ComparisonKind::Empty,
            }],
        }
    }

    pub fn names(&self) -> &RowNames {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sort_fields(&self) -> &[SortField] {
        &self.sort_fields
    }

    pub fn get(&self, position: usize) -> Result<&Value> {
        self.values.get(position).ok_or_else(|| {
            Error::Range(format!(
                "position {position} is out of bounds for a row of {} fields",
                self.values.len()
            ))
        })
    }

    pub fn set(&mut self, position: usize, value: impl Into<Value>) -> Result<()> {
        let len = self.values.len();
        let Some(slot) = self.values.get_mut(position) else {
            return Err(Error::Range(format!(
                "position {position} is out of bounds for a row of {len} fields"
            )));
        };
        *slot = value.into();
        Ok(())
    }

    /// Column lookup by name is case-insensitive, a linear scan.
    pub fn position_of(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Access(format!("no column named `{name}`")))
    }

    pub fn get_named(&self, name: &str) -> Result<&Value> {
        self.get(self.position_of(name)?)
    }

    pub fn set_named(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.set(self.position_of(name)?, value)
    }

    /// Adds a sort field, capturing the comparison domain from the value the
    /// row currently holds at that position. Adding an already present field
    /// is a no-op.
    pub fn add_sort_field(&mut self, position: usize) -> Result<()> {
        let kind = comparison_kind(self.get(position)?);
        if self.sort_fields.iter().any(|f| f.position == position) {
            return Ok(());
        }
        self.sort_fields.push(SortField { position, kind });
        Ok(())
    }

    /// Removes a sort field. When the last one is removed the default field
    /// on column 0 is restored, so the criteria never go empty.
    pub fn remove_sort_field(&mut self, position: usize) -> Result<()> {
        self.sort_fields.retain(|f| f.position != position);
        if self.sort_fields.is_empty() {
            let kind = comparison_kind(self.get(0)?);
            self.sort_fields.push(SortField { position: 0, kind });
        }
        Ok(())
    }

    /// Swaps one sort field for another, recapturing the comparison domain
    /// of the new field from the row's current value.
    pub fn replace_sort_field(&mut self, old: usize, new: usize) -> Result<()> {
        if !self.sort_fields.iter().any(|f| f.position == old) {
            return Err(Error::Access(format!(
                "position {old} is not among the sort fields"
            )));
        }
        let kind = comparison_kind(self.get(new)?);
        self.sort_fields.retain(|f| f.position != old);
        if !self.sort_fields.iter().any(|f| f.position == new) {
            self.sort_fields.push(SortField {
                position: new,
                kind,
            });
        }
        Ok(())
    }

    /// Lexicographic comparison over the sort fields. Both rows must carry
    /// identical sort criteria or the comparison is refused.
    pub fn less_than(&self, other: &Row) -> Result<bool> {
        if self.sort_fields != other.sort_fields {
            return Err(Error::Access(
                "cannot compare rows with different sort criteria".into(),
            ));
        }
        for field in &self.sort_fields {
            let l = self.get(field.position)?;
            let r = other.get(field.position)?;
            match compare(field.kind, l, r)? {
                Ordering::Less => return Ok(true),
                Ordering::Greater => return Ok(false),
                Ordering::Equal => {}
            }
        }
        Ok(false)
    }
}

fn compare(kind: ComparisonKind, l: &Value, r: &Value) -> Result<Ordering> {
    Ok(match kind {
        ComparisonKind::Integer => l.convert::<i64>()?.cmp(&r.convert::<i64>()?),
        ComparisonKind::Float => l
            .convert::<f64>()?
            .partial_cmp(&r.convert::<f64>()?)
            .unwrap_or(Ordering::Equal),
        // The empty domain still orders deterministically, by rendering.
        ComparisonKind::String | ComparisonKind::Empty => l.to_string().cmp(&r.to_string()),
    })
}

/// Equal field count, equal held kind per field, and equal rendered text.
/// Sort criteria take no part in equality.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(l, r)| l.kind() == r.kind() && l.to_string() == r.to_string())
    }
}
