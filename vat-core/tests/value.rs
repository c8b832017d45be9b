#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use time::macros::{date, datetime, time};
    use vat_core::{AsValue, Entries, Error, Struct, Value};

    #[test]
    fn value_empty() {
        assert_eq!(Value::Empty, Value::Empty);
        assert_ne!(Value::Float32(1.0), Value::Empty);
        assert!(Value::Empty.is_empty());
        assert_eq!(Value::Empty.size(), 0);
        // Equality is defined for two empties, ordering never is.
        assert!(!(Value::Empty < Value::Empty));
        assert!(!(Value::Empty <= Value::Empty));
        assert!(!(Value::Empty > Value::Empty));
        assert!(matches!(
            Value::Empty.convert::<i32>(),
            Err(Error::Access(..))
        ));
        assert!(matches!(
            Value::Empty.convert::<String>(),
            Err(Error::Access(..))
        ));
        assert!(matches!(
            Value::Empty.get_exact::<bool>(),
            Err(Error::BadCast(..))
        ));
        assert!(matches!(
            Value::Empty.try_add(&Value::Int32(1)),
            Err(Error::InvalidOperation(..))
        ));
        assert!(matches!(
            Value::Empty.try_inc(),
            Err(Error::InvalidOperation(..))
        ));
        assert!(matches!(Value::Empty.at(0), Err(Error::Access(..))));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(true));
        assert_ne!(val, Value::Boolean(false));
        assert_ne!(val, Value::Varchar("true".into()));
        let var: bool = val.convert().unwrap();
        assert_eq!(var, true);
        assert_eq!(bool::try_from_value(&(1 as i8).into()).unwrap(), true);
        assert_eq!(bool::try_from_value(&(0 as i32).into()).unwrap(), false);
        assert_eq!(bool::try_from_value(&(5 as u64).into()).unwrap(), true);
        assert_eq!(bool::try_from_value(&"FALSE".into()).unwrap(), false);
        assert_eq!(bool::try_from_value(&"".into()).unwrap(), false);
        assert_eq!(bool::try_from_value(&"0".into()).unwrap(), false);
        assert_eq!(bool::try_from_value(&"anything".into()).unwrap(), true);
        assert_eq!(bool::try_from_value(&Value::Float64(0.5)).unwrap(), true);
        assert_eq!(bool::try_from_value(&Value::Float64(0.0)).unwrap(), false);
    }

    #[test]
    fn value_integers() {
        let val: Value = (127 as i8).into();
        assert_eq!(val, Value::Int8(127));
        assert_ne!(val, Value::Int8(126));
        let var: i8 = val.convert().unwrap();
        assert_eq!(var, 127);
        assert_eq!(i8::try_from_value(&(99 as u8).into()).unwrap(), 99);
        assert_eq!(i16::try_from_value(&(-32768 as i16).into()).unwrap(), -32768);
        assert_eq!(i32::try_from_value(&(-1 as i16).into()).unwrap(), -1);
        assert_eq!(i64::try_from_value(&(123456 as u32).into()).unwrap(), 123456);
        assert_eq!(u8::try_from_value(&(255 as u8).into()).unwrap(), 255);
        assert_eq!(
            u64::try_from_value(&(9223372036854775807 as i64).into()).unwrap(),
            9223372036854775807
        );
        assert_eq!(usize::try_from_value(&(42 as u64).into()).unwrap(), 42);
        assert_eq!(isize::try_from_value(&(-42 as i64).into()).unwrap(), -42);
    }

    #[test]
    fn value_sign_and_range_rejection() {
        assert!(matches!(
            u32::try_from_value(&(-1 as i32).into()),
            Err(Error::Range(..))
        ));
        assert!(matches!(
            u64::try_from_value(&(-1 as i8).into()),
            Err(Error::Range(..))
        ));
        assert!(matches!(
            i8::try_from_value(&(1000 as i32).into()),
            Err(Error::Range(..))
        ));
        assert!(matches!(
            u8::try_from_value(&(256 as u16).into()),
            Err(Error::Range(..))
        ));
        assert!(matches!(
            i32::try_from_value(&Value::Float64(1e300)),
            Err(Error::Range(..))
        ));
        // In range floats truncate silently.
        assert_eq!(i32::try_from_value(&Value::Float64(2.9)).unwrap(), 2);
        assert_eq!(i32::try_from_value(&Value::Float64(-2.9)).unwrap(), -2);
    }

    #[test]
    fn value_floats() {
        let val: Value = (1.5 as f32).into();
        assert_eq!(val, Value::Float32(1.5));
        let var: f32 = val.convert().unwrap();
        assert_eq!(var, 1.5);
        assert_eq!(f64::try_from_value(&Value::Float32(0.25)).unwrap(), 0.25);
        assert_eq!(f64::try_from_value(&(10 as i32).into()).unwrap(), 10.0);
        assert_eq!(f32::try_from_value(&Value::Float64(0.5)).unwrap(), 0.5);
        assert!(matches!(
            f32::try_from_value(&Value::Float64(1e300)),
            Err(Error::Range(..))
        ));
    }

    #[test]
    fn value_strings() {
        let val: Value = "hello".into();
        assert_eq!(val, Value::Varchar("hello".into()));
        assert_eq!(val.convert::<String>().unwrap(), "hello");
        assert_eq!(char::try_from_value(&"hello".into()).unwrap(), 'h');
        assert_eq!(char::try_from_value(&"".into()).unwrap(), '\0');
        assert_eq!(String::try_from_value(&Value::Char('x')).unwrap(), "x");
        assert_eq!(String::try_from_value(&Value::Int32(-5)).unwrap(), "-5");
        assert_eq!(String::try_from_value(&Value::Boolean(true)).unwrap(), "true");
        assert_eq!(i32::try_from_value(&"123".into()).unwrap(), 123);
        assert!(matches!(
            i32::try_from_value(&"123abc".into()),
            Err(Error::DataFormat(..))
        ));
        assert_eq!(f64::try_from_value(&"2.5".into()).unwrap(), 2.5);
    }

    #[test]
    fn long_multibyte_input_is_quoted_safely() {
        // Byte 497 falls in the middle of a two-byte character; the quoted
        // excerpt in the error must clamp to a char boundary, not panic.
        let input = "é".repeat(300);
        assert!(matches!(i32::parse(&input), Err(Error::DataFormat(..))));
        assert!(matches!(f64::parse(&input), Err(Error::DataFormat(..))));
    }

    #[test]
    fn value_exact_access() {
        let val: Value = (42 as i32).into();
        assert_eq!(*val.get_exact::<i32>().unwrap(), 42);
        // Convertible is not enough, the held kind must match.
        assert!(matches!(val.get_exact::<i64>(), Err(Error::BadCast(..))));
        let val: Value = "abc".into();
        assert_eq!(*val.get_exact::<String>().unwrap(), "abc");
        assert!(matches!(val.get_exact::<char>(), Err(Error::BadCast(..))));
    }

    #[test]
    fn value_temporal() {
        let val: Value = date!(2024 - 02 - 29).into();
        assert_eq!(val, Value::Date(date!(2024 - 02 - 29)));
        assert_eq!(val.to_string(), "2024-02-29");
        let val: Value = datetime!(2024-02-29 12:30:45).into();
        assert_eq!(val.to_string(), "2024-02-29T12:30:45");
        assert_eq!(
            time::Date::try_from_value(&val).unwrap(),
            date!(2024 - 02 - 29)
        );
        assert_eq!(time::Time::try_from_value(&val).unwrap(), time!(12:30:45));
        assert_eq!(
            time::Date::try_from_value(&"2024-02-29".into()).unwrap(),
            date!(2024 - 02 - 29)
        );
        assert_eq!(
            time::PrimitiveDateTime::try_from_value(&"2024-02-29 12:30:45".into()).unwrap(),
            datetime!(2024-02-29 12:30:45)
        );
        assert!(matches!(
            time::Date::try_from_value(&"not a date".into()),
            Err(Error::DataFormat(..))
        ));
    }

    #[test]
    fn value_arithmetic() {
        let l: Value = (3 as i32).into();
        let r: Value = (4 as u8).into();
        // The result category follows the left operand.
        assert_eq!(l.try_add(&r).unwrap(), Value::Int64(7));
        assert_eq!(r.try_add(&l).unwrap(), Value::UInt64(7));
        assert_eq!(Value::Float32(1.5).try_mul(&l).unwrap(), Value::Float64(4.5));
        assert_eq!(l.try_sub(&r).unwrap(), Value::Int64(-1));
        assert_eq!(l.try_div(&r).unwrap(), Value::Int64(0));
        assert_eq!(Value::UInt8(10).try_inc().unwrap(), Value::UInt64(11));
        assert_eq!(Value::Int8(10).try_dec().unwrap(), Value::Int64(9));
        assert_eq!(
            Value::Varchar("ab".into()).try_add(&"cd".into()).unwrap(),
            Value::Varchar("abcd".into())
        );
        assert!(matches!(
            l.try_div(&Value::Int32(0)),
            Err(Error::InvalidOperation(..))
        ));
        // A fractional divisor truncates to zero in the integer domain.
        assert!(matches!(
            l.try_div(&Value::Float64(0.5)),
            Err(Error::InvalidOperation(..))
        ));
        assert_eq!(
            Value::Float64(1.0).try_div(&Value::Float64(0.5)).unwrap(),
            Value::Float64(2.0)
        );
        assert!(matches!(
            Value::Boolean(true).try_add(&l),
            Err(Error::InvalidOperation(..))
        ));
        assert!(matches!(
            Value::Int64(i64::MAX).try_add(&Value::Int64(1)),
            Err(Error::Range(..))
        ));
        assert!(matches!(
            Value::UInt64(0).try_sub(&Value::UInt64(1)),
            Err(Error::Range(..))
        ));
    }

    #[test]
    fn value_comparison() {
        assert!(Value::Int32(1) < Value::Int32(2));
        assert!(Value::Int32(2) == Value::UInt8(2));
        assert!(Value::UInt64(3) > Value::Float64(2.5));
        assert!(Value::Varchar("a".into()) < Value::Varchar("b".into()));
        assert!(!(Value::Empty < Value::Int32(1)));
        assert!(!(Value::Int32(1) < Value::Empty));
        assert_ne!(Value::Empty, Value::Int32(1));
    }

    #[test]
    fn value_indexing() {
        let seq = Value::Sequence(vec![Value::Int32(1), Value::Varchar("x".into())]);
        assert_eq!(*seq.at(0).unwrap(), Value::Int32(1));
        assert!(matches!(seq.at(2), Err(Error::Range(..))));
        // A non-empty scalar is a one-element sequence.
        let scalar = Value::Int32(7);
        assert_eq!(*scalar.at(0).unwrap(), Value::Int32(7));
        assert!(matches!(scalar.at(1), Err(Error::Range(..))));
        assert!(matches!(scalar.get("name"), Err(Error::Access(..))));
        assert!(matches!(
            Value::Varchar("abc".into()).at(0),
            Err(Error::Access(..))
        ));
        let record: Value = BTreeMap::from([("a".to_string(), 1 as i32)]).into();
        assert_eq!(*record.get("a").unwrap(), Value::Int32(1));
        assert!(matches!(record.get("b"), Err(Error::Access(..))));
        assert!(matches!(record.at(0), Err(Error::Access(..))));
    }

    #[test]
    fn value_cursor() {
        let seq = Value::Sequence(vec![Value::Int32(1), Value::Int32(2)]);
        let mut cursor = seq.cursor();
        assert_eq!(*cursor.item().unwrap(), Value::Int32(1));
        assert!(matches!(cursor.retreat(), Err(Error::Range(..))));
        cursor.advance().unwrap();
        assert_eq!(*cursor.item().unwrap(), Value::Int32(2));
        cursor.advance().unwrap();
        assert!(matches!(cursor.item(), Err(Error::Access(..))));
        assert!(matches!(cursor.advance(), Err(Error::Range(..))));
        cursor.retreat().unwrap();
        assert_eq!(*cursor.item().unwrap(), Value::Int32(2));
        assert_eq!(seq.cursor().count(), 2);
        assert_eq!(Value::Empty.cursor().count(), 0);
        assert_eq!(Value::Int32(1).cursor().count(), 1);
    }

    #[test]
    fn value_struct_uniqueness() {
        let mut record = Struct::default();
        assert!(record.insert("a".into(), Value::Int32(1)));
        assert!(!record.insert("a".into(), Value::Int32(2)));
        assert_eq!(*record.get("a").unwrap(), Value::Int32(1));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn value_interchange_format() {
        let mut record = Struct::default();
        record.insert("name".into(), "O'Hara \"O\"".into());
        record.insert("age".into(), Value::UInt8(40));
        let val = Value::Struct(Box::new(record));
        assert_eq!(
            val.to_string(),
            r#"{ "age" : 40, "name" : "O'Hara \"O\"" }"#
        );
        assert_eq!(Value::Struct(Box::new(Struct::default())).to_string(), "{ }");
        assert_eq!(Value::Sequence(vec![]).to_string(), "[ ]");
        assert_eq!(
            Value::Sequence(vec![Value::UInt64(1), Value::Empty]).to_string(),
            "[ 1, null ]"
        );
        assert_eq!(Value::Empty.to_string(), "null");
    }

    #[test]
    fn value_option_round_trip() {
        let val: Value = Some(5 as i32).into();
        assert_eq!(val, Value::Int32(5));
        let val: Value = Option::<i32>::None.into();
        assert!(val.is_empty());
        assert_eq!(Option::<i32>::try_from_value(&Value::Empty).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(&Value::Int32(5)).unwrap(),
            Some(5)
        );
    }

    #[test]
    fn value_collections() {
        let val: Value = vec![1 as u8, 2, 3].into();
        assert_eq!(
            val,
            Value::Sequence(vec![Value::UInt8(1), Value::UInt8(2), Value::UInt8(3)])
        );
        assert_eq!(val.size(), 3);
        assert_eq!(val.convert::<Vec<u8>>().unwrap(), vec![1, 2, 3]);
        assert_eq!(val.convert::<Vec<i64>>().unwrap(), vec![1, 2, 3]);
        let map: BTreeMap<String, i32> = BTreeMap::from([("x".to_string(), 1)]);
        let val: Value = map.clone().into();
        assert!(val.is_struct());
        assert!(!val.is_ordered());
        assert_eq!(val.convert::<BTreeMap<String, i32>>().unwrap(), map);
    }
}
