use crate::{Entries, Error, OrderedStruct, Result, Struct, Value, ValueKind, truncate_long};
use atoi::{FromRadix10Checked, FromRadix10SignedChecked};
use fast_float::parse_partial;
use std::{
    any,
    borrow::Cow,
    collections::{BTreeMap, LinkedList, VecDeque},
    rc::Rc,
    sync::Arc,
};
use time::{Date, PrimitiveDateTime, Time, macros::format_description};

/// Conversion and parsing contract between native Rust types and the
/// dynamically typed [`Value`] representation.
///
/// # Conversion semantics
/// - When the value holds exactly the implementing type, `try_from_value` is
///   a plain copy of the payload; no conversion logic runs.
/// - Narrowing and sign-changing numeric conversions are range checked and
///   fail with [`Error::Range`]; they never silently truncate or wrap.
/// - Float to integer conversion may lose precision silently as long as the
///   value fits the target's finite range.
/// - Converting an empty value fails with [`Error::Access`] for every target
///   except `Option`, which is the one type allowed to observe emptiness.
/// - A (source kind, target) pair with no rule fails with
///   [`Error::NotSupported`].
///
/// # Parsing contract
/// - `parse` delegates to `extract` and then verifies the input is exhausted,
///   guarding against accidentally accepting things like `123abc`.
/// - `extract` consumes a prefix of the slice and MUST update it only on
///   success, enabling backtracking without a buffering strategy.
pub trait AsValue {
    /// Static kind tag of this type, used to bind typed NULL parameters.
    fn kind() -> ValueKind;
    /// Converts this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempts to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: &Value) -> Result<Self>
    where
        Self: Sized;
    /// The state a nullable wrapper assumes when its storage comes back
    /// NULL; `None` for types with no cleared state.
    fn cleared() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
    /// Parses a full string into `Self`, failing on residual input.
    fn parse(input: impl AsRef<str>) -> Result<Self>
    where
        Self: Sized,
    {
        let mut value = input.as_ref();
        let result = Self::extract(&mut value)?;
        if !value.is_empty() {
            return Err(Error::DataFormat(format!(
                "value `{}` parsed as {} without consuming all the input (remaining: `{}`)",
                truncate_long!(input.as_ref()),
                any::type_name::<Self>(),
                truncate_long!(value),
            )));
        }
        Ok(result)
    }
    /// Parses a prefix of the slice, advancing it past the consumed portion.
    fn extract(value: &mut &str) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::NotSupported(format!(
            "cannot parse `{}` as {}",
            truncate_long!(value),
            any::type_name::<Self>()
        )))
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.into())
    }
}

fn access_empty<T>() -> Error {
    Error::Access(format!(
        "cannot convert an empty value to {}",
        any::type_name::<T>()
    ))
}

fn not_supported<T>(value: &Value) -> Error {
    Error::NotSupported(format!(
        "no conversion from {:?} to {}",
        value.kind(),
        any::type_name::<T>()
    ))
}

macro_rules! impl_integer {
    ($t:ty, $variant:ident, signed) => {
        impl_integer!($t, $variant, from_radix_10_signed_checked);
    };
    ($t:ty, $variant:ident, unsigned) => {
        impl_integer!($t, $variant, from_radix_10_checked);
    };
    ($t:ty, $variant:ident, $radix:ident) => {
        impl AsValue for $t {
            fn kind() -> ValueKind {
                ValueKind::$variant
            }
            fn as_value(self) -> Value {
                Value::$variant(self)
            }
            fn try_from_value(value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(*v),
                    Value::Empty => Err(access_empty::<Self>()),
                    v if v.is_integer() => {
                        // Widening through i128 makes the range check also a
                        // sign check: -1 never fits any unsigned target.
                        if let Some(wide) = v.as_i128() {
                            <$t>::try_from(wide).map_err(|_| {
                                Error::Range(format!(
                                    "value {wide} is out of range for {}",
                                    any::type_name::<$t>()
                                ))
                            })
                        } else {
                            Err(not_supported::<Self>(v))
                        }
                    }
                    Value::Float32(v) => float_to_integer::<$t>(*v as f64),
                    Value::Float64(v) => float_to_integer::<$t>(*v),
                    Value::Boolean(v) => Ok(if *v { 1 } else { 0 }),
                    Value::Varchar(v) => <Self as AsValue>::parse(v),
                    v => Err(not_supported::<Self>(v)),
                }
            }
            fn extract(input: &mut &str) -> Result<Self> {
                let (num, used) = <$t>::$radix(input.as_bytes());
                if used == 0 {
                    return Err(Error::DataFormat(format!(
                        "cannot extract {} from `{}`",
                        any::type_name::<Self>(),
                        truncate_long!(input),
                    )));
                }
                let Some(num) = num else {
                    return Err(Error::Range(format!(
                        "value `{}` is out of range for {}",
                        truncate_long!(input),
                        any::type_name::<Self>(),
                    )));
                };
                *input = &input[used..];
                Ok(num)
            }
        }
    };
}
impl_integer!(i8, Int8, signed);
impl_integer!(i16, Int16, signed);
impl_integer!(i32, Int32, signed);
impl_integer!(i64, Int64, signed);
impl_integer!(u8, UInt8, unsigned);
impl_integer!(u16, UInt16, unsigned);
impl_integer!(u32, UInt32, unsigned);
impl_integer!(u64, UInt64, unsigned);

fn float_to_integer<T: TryFrom<i128>>(value: f64) -> Result<T> {
    let error = || {
        Error::Range(format!(
            "value {value} is out of range for {}",
            any::type_name::<T>()
        ))
    };
    if !value.is_finite() {
        return Err(error());
    }
    // Truncation towards zero is deliberate; only the integral part must fit.
    let truncated = value.trunc();
    if truncated < i128::MIN as f64 || truncated > i128::MAX as f64 {
        return Err(error());
    }
    T::try_from(truncated as i128).map_err(|_| error())
}

macro_rules! impl_size {
    ($t:ty, $wide:ty, $variant:ident) => {
        impl AsValue for $t {
            fn kind() -> ValueKind {
                ValueKind::$variant
            }
            fn as_value(self) -> Value {
                Value::$variant(self as $wide)
            }
            fn try_from_value(value: &Value) -> Result<Self> {
                let wide = <$wide>::try_from_value(value)?;
                <$t>::try_from(wide).map_err(|_| {
                    Error::Range(format!(
                        "value {wide} is out of range for {}",
                        any::type_name::<$t>()
                    ))
                })
            }
            fn extract(input: &mut &str) -> Result<Self> {
                let wide = <$wide>::extract(input)?;
                <$t>::try_from(wide).map_err(|_| {
                    Error::Range(format!(
                        "value {wide} is out of range for {}",
                        any::type_name::<$t>()
                    ))
                })
            }
        }
    };
}
impl_size!(usize, u64, UInt64);
impl_size!(isize, i64, Int64);

macro_rules! impl_float {
    ($t:ty, $variant:ident $(, $pat:pat => $expr:expr)* $(,)?) => {
        impl AsValue for $t {
            fn kind() -> ValueKind {
                ValueKind::$variant
            }
            fn as_value(self) -> Value {
                Value::$variant(self)
            }
            fn try_from_value(value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(*v),
                    Value::Empty => Err(access_empty::<Self>()),
                    $($pat => $expr,)*
                    v if v.is_integer() => match v.as_i128() {
                        Some(wide) => Ok(wide as $t),
                        None => Err(not_supported::<Self>(v)),
                    },
                    Value::Boolean(v) => Ok(if *v { 1.0 } else { 0.0 }),
                    Value::Varchar(v) => <Self as AsValue>::parse(v),
                    v => Err(not_supported::<Self>(v)),
                }
            }
            fn extract(input: &mut &str) -> Result<Self> {
                let (num, used) = parse_partial::<$t, _>(*input).map_err(|_| {
                    Error::DataFormat(format!(
                        "cannot extract a floating point value from `{}`",
                        truncate_long!(input)
                    ))
                })?;
                *input = &input[used..];
                Ok(num)
            }
        }
    };
}
impl_float!(
    f32,
    Float32,
    Value::Float64(v) => {
        if v.is_finite() && (*v > f32::MAX as f64 || *v < f32::MIN as f64) {
            return Err(Error::Range(format!("value {v} is out of range for f32")));
        }
        Ok(*v as f32)
    },
);
impl_float!(
    f64,
    Float64,
    Value::Float32(v) => Ok(*v as f64),
);

impl AsValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Boolean
    }
    fn as_value(self) -> Value {
        Value::Boolean(self)
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Boolean(v) => Ok(*v),
            Value::Empty => Err(access_empty::<Self>()),
            v if v.is_integer() => Ok(v.as_i128() != Some(0)),
            // Values at or below the minimal representable magnitude count
            // as false; legacy convention, kept as is.
            Value::Float32(v) => Ok(v.abs() > f32::MIN_POSITIVE),
            Value::Float64(v) => Ok(v.abs() > f64::MIN_POSITIVE),
            Value::Varchar(v) => {
                Ok(!(v.is_empty() || v.eq_ignore_ascii_case("false") || v == "0"))
            }
            v => Err(not_supported::<Self>(v)),
        }
    }
    fn extract(input: &mut &str) -> Result<Self> {
        let mut value = *input;
        let token = crate::consume_while(&mut value, |v| v.is_alphanumeric() || *v == '_');
        let result = match token {
            x if x.eq_ignore_ascii_case("true") || x.eq_ignore_ascii_case("t") || x == "1" => true,
            x if x.eq_ignore_ascii_case("false") || x.eq_ignore_ascii_case("f") || x == "0" => {
                false
            }
            _ => {
                return Err(Error::DataFormat(format!(
                    "cannot parse a boolean from `{}`",
                    truncate_long!(input)
                )));
            }
        };
        *input = value;
        Ok(result)
    }
}

impl AsValue for char {
    fn kind() -> ValueKind {
        ValueKind::Char
    }
    fn as_value(self) -> Value {
        Value::Char(self)
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Char(v) => Ok(*v),
            Value::Empty => Err(access_empty::<Self>()),
            // Deliberate truncation: the empty string maps to NUL, anything
            // else to its first character.
            Value::Varchar(v) => Ok(v.chars().next().unwrap_or('\0')),
            v => Err(not_supported::<Self>(v)),
        }
    }
}

impl AsValue for String {
    fn kind() -> ValueKind {
        ValueKind::Varchar
    }
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Varchar(v) => Ok(v.clone()),
            Value::Empty => Err(access_empty::<Self>()),
            v => Ok(v.to_string()),
        }
    }
}

impl<'a> AsValue for Cow<'a, str> {
    fn kind() -> ValueKind {
        ValueKind::Varchar
    }
    fn as_value(self) -> Value {
        Value::Varchar(self.into())
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        String::try_from_value(value).map(Into::into)
    }
}

impl AsValue for Date {
    fn kind() -> ValueKind {
        ValueKind::Date
    }
    fn as_value(self) -> Value {
        Value::Date(self)
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Date(v) => Ok(*v),
            Value::Empty => Err(access_empty::<Self>()),
            Value::Timestamp(v) => Ok(v.date()),
            Value::Varchar(v) => <Self as AsValue>::parse(v),
            v => Err(not_supported::<Self>(v)),
        }
    }
    fn parse(input: impl AsRef<str>) -> Result<Self> {
        let value = input.as_ref();
        Date::parse(value, format_description!("[year]-[month]-[day]"))
            .map_err(|_| Error::DataFormat(format!("cannot parse `{value}` as a date")))
    }
}

impl AsValue for Time {
    fn kind() -> ValueKind {
        ValueKind::Time
    }
    fn as_value(self) -> Value {
        Value::Time(self)
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Time(v) => Ok(*v),
            Value::Empty => Err(access_empty::<Self>()),
            Value::Timestamp(v) => Ok(v.time()),
            Value::Varchar(v) => <Self as AsValue>::parse(v),
            v => Err(not_supported::<Self>(v)),
        }
    }
    fn parse(input: impl AsRef<str>) -> Result<Self> {
        let value = input.as_ref();
        Time::parse(
            value,
            format_description!("[hour]:[minute]:[second].[subsecond]"),
        )
        .or(Time::parse(
            value,
            format_description!("[hour]:[minute]:[second]"),
        ))
        .or(Time::parse(value, format_description!("[hour]:[minute]")))
        .map_err(|_| Error::DataFormat(format!("cannot parse `{value}` as a time")))
    }
}

impl AsValue for PrimitiveDateTime {
    fn kind() -> ValueKind {
        ValueKind::Timestamp
    }
    fn as_value(self) -> Value {
        Value::Timestamp(self)
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Timestamp(v) => Ok(*v),
            Value::Empty => Err(access_empty::<Self>()),
            Value::Date(v) => Ok(PrimitiveDateTime::new(*v, Time::MIDNIGHT)),
            Value::Varchar(v) => <Self as AsValue>::parse(v),
            v => Err(not_supported::<Self>(v)),
        }
    }
    fn parse(input: impl AsRef<str>) -> Result<Self> {
        let value = input.as_ref();
        PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        )
        .or(PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        ))
        .or(PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        ))
        .or(PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        ))
        .or(PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        ))
        .or(PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]"),
        ))
        .map_err(|_| Error::DataFormat(format!("cannot parse `{value}` as a timestamp")))
    }
}

macro_rules! impl_sequence {
    ($container:ident) => {
        impl<T: AsValue> AsValue for $container<T> {
            fn kind() -> ValueKind {
                ValueKind::Sequence
            }
            fn as_value(self) -> Value {
                Value::Sequence(self.into_iter().map(AsValue::as_value).collect())
            }
            fn try_from_value(value: &Value) -> Result<Self> {
                match value {
                    Value::Sequence(v) => v.iter().map(T::try_from_value).collect(),
                    Value::Empty => Err(access_empty::<Self>()),
                    v => Err(not_supported::<Self>(v)),
                }
            }
        }
    };
}
impl_sequence!(Vec);
impl_sequence!(VecDeque);
impl_sequence!(LinkedList);

impl<V: AsValue> AsValue for BTreeMap<String, V> {
    fn kind() -> ValueKind {
        ValueKind::Struct
    }
    fn as_value(self) -> Value {
        Value::Struct(Box::new(
            self.into_iter().map(|(k, v)| (k, v.as_value())).collect(),
        ))
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        let collect = |entries: &mut dyn Iterator<Item = (&str, &Value)>| {
            entries
                .map(|(k, v)| Ok((k.to_owned(), V::try_from_value(v)?)))
                .collect::<Result<Self>>()
        };
        match value {
            Value::Struct(v) => collect(&mut v.iter()),
            Value::OrderedStruct(v) => collect(&mut v.iter()),
            Value::Empty => Err(access_empty::<Self>()),
            v => Err(not_supported::<Self>(v)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn kind() -> ValueKind {
        T::kind()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Empty,
        }
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        if value.is_empty() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
    fn cleared() -> Option<Self> {
        Some(None)
    }
    fn extract(input: &mut &str) -> Result<Self> {
        let mut value = *input;
        let token = crate::consume_while(&mut value, |v| v.is_alphanumeric() || *v == '_');
        if token.eq_ignore_ascii_case("null") {
            *input = value;
            return Ok(None);
        }
        T::extract(input).map(Some)
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn kind() -> ValueKind {
        T::kind()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_from_value(value: &Value) -> Result<Self> {
        T::try_from_value(value).map(Self::new)
    }
    fn extract(value: &mut &str) -> Result<Self> {
        T::extract(value).map(Self::new)
    }
}

macro_rules! impl_shared {
    ($source:ident) => {
        impl<T: AsValue + Clone> AsValue for $source<T> {
            fn kind() -> ValueKind {
                T::kind()
            }
            fn as_value(self) -> Value {
                $source::try_unwrap(self)
                    .unwrap_or_else(|shared| (*shared).clone())
                    .as_value()
            }
            fn try_from_value(value: &Value) -> Result<Self> {
                T::try_from_value(value).map(Self::new)
            }
            fn extract(value: &mut &str) -> Result<Self> {
                T::extract(value).map(Self::new)
            }
        }
    };
}
impl_shared!(Rc);
impl_shared!(Arc);

/// Borrowed access to the payload of a [`Value`] when the held kind matches
/// exactly. Merely convertible kinds fail with [`Error::BadCast`].
pub trait ExactRef {
    fn exact_ref(value: &Value) -> Result<&Self>;
}

macro_rules! impl_exact_ref {
    ($t:ty, $variant:ident) => {
        impl ExactRef for $t {
            fn exact_ref(value: &Value) -> Result<&Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    v => Err(Error::BadCast(format!(
                        "value holds {:?}, not {}",
                        v.kind(),
                        any::type_name::<$t>()
                    ))),
                }
            }
        }
    };
}
impl_exact_ref!(bool, Boolean);
impl_exact_ref!(char, Char);
impl_exact_ref!(i8, Int8);
impl_exact_ref!(i16, Int16);
impl_exact_ref!(i32, Int32);
impl_exact_ref!(i64, Int64);
impl_exact_ref!(u8, UInt8);
impl_exact_ref!(u16, UInt16);
impl_exact_ref!(u32, UInt32);
impl_exact_ref!(u64, UInt64);
impl_exact_ref!(f32, Float32);
impl_exact_ref!(f64, Float64);
impl_exact_ref!(String, Varchar);
impl_exact_ref!(Date, Date);
impl_exact_ref!(Time, Time);
impl_exact_ref!(PrimitiveDateTime, Timestamp);
impl_exact_ref!(Vec<Value>, Sequence);

impl ExactRef for Struct {
    fn exact_ref(value: &Value) -> Result<&Self> {
        match value {
            Value::Struct(v) => Ok(v),
            v => Err(Error::BadCast(format!(
                "value holds {:?}, not a sorted struct",
                v.kind()
            ))),
        }
    }
}

impl ExactRef for OrderedStruct {
    fn exact_ref(value: &Value) -> Result<&Self> {
        match value {
            Value::OrderedStruct(v) => Ok(v),
            v => Err(Error::BadCast(format!(
                "value holds {:?}, not an ordered struct",
                v.kind()
            ))),
        }
    }
}
