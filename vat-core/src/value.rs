use crate::{AsValue, Entries, Error, ExactRef, OrderedStruct, Result, Struct, separated_by};
use std::{
    cmp::Ordering,
    fmt::{self, Display, Write},
};
use time::{Date, PrimitiveDateTime, Time, macros::format_description};

/// The type-erased dynamic value.
///
/// Exactly one kind is active at a time. Primitive payloads live inline in
/// the enum; struct payloads are boxed so the enum stays small. `Empty` is
/// the null of this layer: every conversion and extraction on it fails, it
/// never silently yields a default.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Empty,
    Boolean(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Varchar(String),
    Date(Date),
    Time(Time),
    Timestamp(PrimitiveDateTime),
    Sequence(Vec<Value>),
    Struct(Box<Struct>),
    OrderedStruct(Box<OrderedStruct>),
}

/// Discriminant tag of a [`Value`], also used as the static type marker when
/// binding typed NULL parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Empty,
    Boolean,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Varchar,
    Date,
    Time,
    Timestamp,
    Sequence,
    Struct,
    OrderedStruct,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Boolean(..) => ValueKind::Boolean,
            Value::Char(..) => ValueKind::Char,
            Value::Int8(..) => ValueKind::Int8,
            Value::Int16(..) => ValueKind::Int16,
            Value::Int32(..) => ValueKind::Int32,
            Value::Int64(..) => ValueKind::Int64,
            Value::UInt8(..) => ValueKind::UInt8,
            Value::UInt16(..) => ValueKind::UInt16,
            Value::UInt32(..) => ValueKind::UInt32,
            Value::UInt64(..) => ValueKind::UInt64,
            Value::Float32(..) => ValueKind::Float32,
            Value::Float64(..) => ValueKind::Float64,
            Value::Varchar(..) => ValueKind::Varchar,
            Value::Date(..) => ValueKind::Date,
            Value::Time(..) => ValueKind::Time,
            Value::Timestamp(..) => ValueKind::Timestamp,
            Value::Sequence(..) => ValueKind::Sequence,
            Value::Struct(..) => ValueKind::Struct,
            Value::OrderedStruct(..) => ValueKind::OrderedStruct,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(..))
    }
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int8(..)
                | Value::Int16(..)
                | Value::Int32(..)
                | Value::Int64(..)
                | Value::UInt8(..)
                | Value::UInt16(..)
                | Value::UInt32(..)
                | Value::UInt64(..)
        )
    }
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Value::Int8(..)
                | Value::Int16(..)
                | Value::Int32(..)
                | Value::Int64(..)
                | Value::Float32(..)
                | Value::Float64(..)
        )
    }
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float32(..) | Value::Float64(..))
    }
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Varchar(..))
    }
    pub fn is_temporal(&self) -> bool {
        matches!(self, Value::Date(..) | Value::Time(..) | Value::Timestamp(..))
    }
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(..))
    }
    pub fn is_struct(&self) -> bool {
        matches!(self, Value::Struct(..) | Value::OrderedStruct(..))
    }
    /// True for the insertion-order-preserving struct kind.
    pub fn is_ordered(&self) -> bool {
        matches!(self, Value::OrderedStruct(..))
    }

    /// Number of iterable positions: 0 for `Empty`, the element count for
    /// sequences and structs, 1 for any scalar.
    pub fn size(&self) -> usize {
        match self {
            Value::Empty => 0,
            Value::Sequence(v) => v.len(),
            Value::Struct(v) => v.len(),
            Value::OrderedStruct(v) => v.len(),
            _ => 1,
        }
    }

    /// Converts the held payload to `T` applying the numeric/string coercion
    /// rules. When the held kind matches `T` exactly this is a plain copy of
    /// the payload, no conversion logic runs.
    pub fn convert<T: AsValue>(&self) -> Result<T> {
        T::try_from_value(self)
    }

    /// Borrows the payload only if the held kind is exactly `T`; a merely
    /// convertible kind fails with [`Error::BadCast`].
    pub fn get_exact<T: ExactRef + ?Sized>(&self) -> Result<&T> {
        T::exact_ref(self)
    }

    /// Positional access. A sequence is indexed with bounds checking; a
    /// non-empty scalar behaves as a one-element sequence, so index 0 yields
    /// the value itself. Structs are indexed by name only.
    pub fn at(&self, index: usize) -> Result<&Value> {
        match self {
            Value::Empty => Err(Error::Access("cannot index an empty value".into())),
            Value::Sequence(v) => v.get(index).ok_or_else(|| {
                Error::Range(format!(
                    "index {index} is out of bounds for a sequence of {} elements",
                    v.len()
                ))
            }),
            Value::Struct(..) | Value::OrderedStruct(..) => {
                Err(Error::Access("structs are indexed by name".into()))
            }
            Value::Varchar(..) => Err(Error::Access(
                "strings are not positionally indexable".into(),
            )),
            _ if index == 0 => Ok(self),
            _ => Err(Error::Range(format!(
                "index {index} is out of bounds for a scalar value"
            ))),
        }
    }

    /// Member access by name, valid only for struct kinds.
    pub fn get(&self, name: &str) -> Result<&Value> {
        match self {
            Value::Struct(v) => v.get(name),
            Value::OrderedStruct(v) => v.get(name),
            _ => {
                return Err(Error::Access(format!(
                    "only structs support member access by name, value holds {:?}",
                    self.kind()
                )));
            }
        }
        .ok_or_else(|| Error::Access(format!("no member named `{name}`")))
    }

    pub(crate) fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int8(v) => Some(*v as i128),
            Value::Int16(v) => Some(*v as i128),
            Value::Int32(v) => Some(*v as i128),
            Value::Int64(v) => Some(*v as i128),
            Value::UInt8(v) => Some(*v as i128),
            Value::UInt16(v) => Some(*v as i128),
            Value::UInt32(v) => Some(*v as i128),
            Value::UInt64(v) => Some(*v as i128),
            _ => None,
        }
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => self.as_i128().map(|v| v as f64),
        }
    }

    pub fn try_add(&self, rhs: &Value) -> Result<Value> {
        if let Value::Varchar(l) = self {
            let mut result = l.clone();
            result.push_str(&rhs.convert::<String>()?);
            return Ok(Value::Varchar(result));
        }
        self.numeric_binop(rhs, "add", i64::checked_add, u64::checked_add, |a, b| a + b)
    }
    pub fn try_sub(&self, rhs: &Value) -> Result<Value> {
        self.numeric_binop(rhs, "subtract", i64::checked_sub, u64::checked_sub, |a, b| {
            a - b
        })
    }
    pub fn try_mul(&self, rhs: &Value) -> Result<Value> {
        self.numeric_binop(rhs, "multiply", i64::checked_mul, u64::checked_mul, |a, b| {
            a * b
        })
    }
    pub fn try_div(&self, rhs: &Value) -> Result<Value> {
        // An integer division truncates the divisor first, so any divisor
        // smaller than one in magnitude divides by zero.
        if self.is_integer() && rhs.as_f64().is_some_and(|v| v.abs() < 1.0) {
            return Err(Error::InvalidOperation("division by zero".into()));
        }
        self.numeric_binop(rhs, "divide", i64::checked_div, u64::checked_div, |a, b| {
            a / b
        })
    }
    pub fn try_inc(&self) -> Result<Value> {
        self.checked_numeric("increment")?.try_add(&Value::UInt8(1))
    }
    pub fn try_dec(&self) -> Result<Value> {
        self.checked_numeric("decrement")?.try_sub(&Value::UInt8(1))
    }

    fn checked_numeric(&self, op: &str) -> Result<&Value> {
        if !self.is_numeric() {
            return Err(Error::InvalidOperation(format!(
                "cannot {op} a value of kind {:?}",
                self.kind()
            )));
        }
        Ok(self)
    }

    /// The result category follows the left operand: a signed integer
    /// operation yields `Int64`, an unsigned one `UInt64`, a float one
    /// `Float64`.
    fn numeric_binop(
        &self,
        rhs: &Value,
        op: &str,
        f_signed: impl Fn(i64, i64) -> Option<i64>,
        f_unsigned: impl Fn(u64, u64) -> Option<u64>,
        f_float: impl Fn(f64, f64) -> f64,
    ) -> Result<Value> {
        if !self.is_numeric() || !rhs.is_numeric() {
            return Err(Error::InvalidOperation(format!(
                "cannot {op} {:?} and {:?}",
                self.kind(),
                rhs.kind()
            )));
        }
        if self.is_float() {
            let (l, r): (f64, f64) = (self.convert()?, rhs.convert()?);
            return Ok(Value::Float64(f_float(l, r)));
        }
        if self.is_signed() {
            let (l, r): (i64, i64) = (self.convert()?, rhs.convert()?);
            return f_signed(l, r)
                .map(Value::Int64)
                .ok_or_else(|| Error::Range(format!("overflow while trying to {op} {l} and {r}")));
        }
        let (l, r): (u64, u64) = (self.convert()?, rhs.convert()?);
        f_unsigned(l, r)
            .map(Value::UInt64)
            .ok_or_else(|| Error::Range(format!("overflow while trying to {op} {l} and {r}")))
    }

    fn write_scalar(&self, out: &mut String) {
        macro_rules! write_integer {
            ($value:expr) => {{
                let mut buffer = itoa::Buffer::new();
                out.push_str(buffer.format($value));
            }};
        }
        match self {
            Value::Boolean(v) => out.push_str(if *v { "true" } else { "false" }),
            Value::Char(v) => out.push(*v),
            Value::Int8(v) => write_integer!(*v),
            Value::Int16(v) => write_integer!(*v),
            Value::Int32(v) => write_integer!(*v),
            Value::Int64(v) => write_integer!(*v),
            Value::UInt8(v) => write_integer!(*v),
            Value::UInt16(v) => write_integer!(*v),
            Value::UInt32(v) => write_integer!(*v),
            Value::UInt64(v) => write_integer!(*v),
            Value::Float32(v) => {
                let mut buffer = ryu::Buffer::new();
                out.push_str(buffer.format(*v));
            }
            Value::Float64(v) => {
                let mut buffer = ryu::Buffer::new();
                out.push_str(buffer.format(*v));
            }
            Value::Varchar(v) => out.push_str(v),
            Value::Date(v) => {
                if let Ok(text) = v.format(format_description!("[year]-[month]-[day]")) {
                    out.push_str(&text);
                }
            }
            Value::Time(v) => {
                let result = if v.nanosecond() == 0 {
                    v.format(format_description!("[hour]:[minute]:[second]"))
                } else {
                    v.format(format_description!("[hour]:[minute]:[second].[subsecond]"))
                };
                if let Ok(text) = result {
                    out.push_str(&text);
                }
            }
            Value::Timestamp(v) => {
                let result = if v.nanosecond() == 0 {
                    v.format(format_description!(
                        "[year]-[month]-[day]T[hour]:[minute]:[second]"
                    ))
                } else {
                    v.format(format_description!(
                        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"
                    ))
                };
                if let Ok(text) = result {
                    out.push_str(&text);
                }
            }
            _ => {}
        }
    }

    /// Renders the value in its textual interchange form. The spacing of the
    /// container forms (`"{ "`, `" : "`, `", "`, `" }"`) is part of the
    /// format and preserved for compatibility.
    pub fn write_interchange(&self, out: &mut String) {
        match self {
            Value::Empty => out.push_str("null"),
            Value::Varchar(v) => write_escaped_string(out, v),
            Value::Char(v) => {
                let mut buffer = [0u8; 4];
                write_escaped_string(out, v.encode_utf8(&mut buffer));
            }
            Value::Date(..) | Value::Time(..) | Value::Timestamp(..) => {
                out.push('"');
                self.write_scalar(out);
                out.push('"');
            }
            Value::Sequence(values) => {
                if values.is_empty() {
                    out.push_str("[ ]");
                } else {
                    out.push_str("[ ");
                    separated_by(out, values, |out, v| v.write_interchange(out), ", ");
                    out.push_str(" ]");
                }
            }
            Value::Struct(v) => write_entries(out, v.iter()),
            Value::OrderedStruct(v) => write_entries(out, v.iter()),
            _ => self.write_scalar(out),
        }
    }
}

fn write_entries<'a>(out: &mut String, entries: impl Iterator<Item = (&'a str, &'a Value)>) {
    let mut entries = entries.peekable();
    if entries.peek().is_none() {
        out.push_str("{ }");
        return;
    }
    out.push_str("{ ");
    separated_by(
        out,
        entries,
        |out, (key, value)| {
            write_escaped_string(out, key);
            out.push_str(" : ");
            value.write_interchange(out);
        },
        ", ",
    );
    out.push_str(" }");
}

fn write_escaped_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => f.write_str("null"),
            Value::Varchar(v) => f.write_str(v),
            Value::Char(v) => f.write_char(*v),
            Value::Sequence(..) | Value::Struct(..) | Value::OrderedStruct(..) => {
                let mut out = String::new();
                self.write_interchange(&mut out);
                f.write_str(&out)
            }
            _ => {
                let mut out = String::new();
                self.write_scalar(&mut out);
                f.write_str(&out)
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Empty, _) | (_, Self::Empty) => false,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Char(l), Self::Char(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::Sequence(l), Self::Sequence(r)) => l == r,
            (Self::Struct(l), Self::Struct(r)) => l == r,
            (Self::OrderedStruct(l), Self::OrderedStruct(r)) => l == r,
            (l, r) if l.is_numeric() && r.is_numeric() => {
                match (l.as_i128(), r.as_i128()) {
                    (Some(a), Some(b)) => a == b,
                    // At least one float side, compare in the float domain.
                    _ => l.as_f64() == r.as_f64(),
                }
            }
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    /// Any comparison involving an `Empty` side is undefined, which makes
    /// all of `< <= > >=` evaluate to false; two empties are still equal
    /// through `PartialEq`. This asymmetry is deliberate and preserved.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => None,
            (Self::Boolean(l), Self::Boolean(r)) => l.partial_cmp(r),
            (Self::Char(l), Self::Char(r)) => l.partial_cmp(r),
            (Self::Varchar(l), Self::Varchar(r)) => l.partial_cmp(r),
            (Self::Date(l), Self::Date(r)) => l.partial_cmp(r),
            (Self::Time(l), Self::Time(r)) => l.partial_cmp(r),
            (Self::Timestamp(l), Self::Timestamp(r)) => l.partial_cmp(r),
            (l, r) if l.is_numeric() && r.is_numeric() => match (l.as_i128(), r.as_i128()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => l.as_f64().partial_cmp(&r.as_f64()),
            },
            _ => None,
        }
    }
}
