use crate::{Error, Result, ValueKind};
use std::sync::Arc;

/// Immutable metadata of one result-set column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ValueKind,
    pub length: usize,
    pub precision: usize,
    pub position: usize,
}

/// One extracted column with reference-counted backing storage, shared
/// between the result set and every reader.
#[derive(Debug)]
pub struct Column<T> {
    info: ColumnInfo,
    data: Arc<Vec<T>>,
}

impl<T> Column<T> {
    pub fn new(info: ColumnInfo, data: Arc<Vec<T>>) -> Self {
        Self { info, data }
    }

    pub fn info(&self) -> &ColumnInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn kind(&self) -> ValueKind {
        self.info.kind
    }

    pub fn length(&self) -> usize {
        self.info.length
    }

    pub fn precision(&self) -> usize {
        self.info.precision
    }

    pub fn position(&self) -> usize {
        self.info.position
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn value(&self, row: usize) -> Result<&T> {
        self.data.get(row).ok_or_else(|| {
            Error::Range(format!(
                "row {row} is out of bounds for column `{}` with {} rows",
                self.info.name,
                self.data.len()
            ))
        })
    }

    pub fn data(&self) -> &Arc<Vec<T>> {
        &self.data
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            data: Arc::clone(&self.data),
        }
    }
}
