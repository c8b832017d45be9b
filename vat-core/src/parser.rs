use crate::{Entries, Error, Result, Struct, Value, consume_while, truncate_long};

/// Parses a complete textual value, the JSON subset produced by
/// [`Value::write_interchange`](crate::Value::write_interchange).
///
/// Objects materialize as key-sorted structs, arrays as sequences. Bare
/// tokens are classified by the numeric scan documented on
/// [`classify_token`]. Trailing non-whitespace input is rejected.
pub fn parse(input: impl AsRef<str>) -> Result<Value> {
    let mut cursor = input.as_ref();
    let result = extract_value(&mut cursor)?;
    skip_whitespace(&mut cursor);
    if !cursor.is_empty() {
        return Err(Error::DataFormat(format!(
            "value parsed without consuming all the input (remaining: `{}`)",
            truncate_long!(cursor)
        )));
    }
    Ok(result)
}

/// Parses one value from the cursor, leaving it on the first character after
/// the consumed token.
pub fn extract_value(input: &mut &str) -> Result<Value> {
    skip_whitespace(input);
    match input.chars().next() {
        None => Err(Error::DataFormat("unexpected end of input".into())),
        Some('{') => extract_struct(input),
        Some('[') => extract_sequence(input),
        Some('"') => extract_string(input).map(Value::Varchar),
        Some(..) => {
            let token = extract_bare_token(input);
            if token.is_empty() {
                return Err(Error::DataFormat(format!(
                    "unexpected character at `{}`",
                    truncate_long!(input)
                )));
            }
            Ok(classify_token(token))
        }
    }
}

fn skip_whitespace(input: &mut &str) {
    consume_while(input, |c| c.is_whitespace());
}

fn extract_struct(input: &mut &str) -> Result<Value> {
    *input = &input[1..];
    let mut result = Struct::default();
    skip_whitespace(input);
    if let Some(rest) = input.strip_prefix('}') {
        *input = rest;
        return Ok(Value::Struct(Box::new(result)));
    }
    loop {
        skip_whitespace(input);
        let key = match input.chars().next() {
            Some('"') => extract_string(input)?,
            Some(..) => {
                let key = extract_bare_key(input);
                if key.is_empty() {
                    return Err(Error::DataFormat(format!(
                        "expected a key at `{}`",
                        truncate_long!(input)
                    )));
                }
                key.into()
            }
            None => return Err(Error::DataFormat("unterminated object".into())),
        };
        skip_whitespace(input);
        let Some(rest) = input.strip_prefix(':') else {
            return Err(Error::DataFormat(format!(
                "expected `:` after key `{key}` at `{}`",
                truncate_long!(input)
            )));
        };
        *input = rest;
        let value = extract_value(input)?;
        result.insert(key, value);
        skip_whitespace(input);
        if let Some(rest) = input.strip_prefix(',') {
            *input = rest;
            continue;
        }
        if let Some(rest) = input.strip_prefix('}') {
            *input = rest;
            break;
        }
        return Err(Error::DataFormat(format!(
            "unterminated object at `{}`",
            truncate_long!(input)
        )));
    }
    Ok(Value::Struct(Box::new(result)))
}

fn extract_sequence(input: &mut &str) -> Result<Value> {
    *input = &input[1..];
    let mut result = Vec::new();
    skip_whitespace(input);
    if let Some(rest) = input.strip_prefix(']') {
        *input = rest;
        return Ok(Value::Sequence(result));
    }
    loop {
        result.push(extract_value(input)?);
        skip_whitespace(input);
        if let Some(rest) = input.strip_prefix(',') {
            *input = rest;
            continue;
        }
        if let Some(rest) = input.strip_prefix(']') {
            *input = rest;
            break;
        }
        return Err(Error::DataFormat(format!(
            "unterminated array at `{}`",
            truncate_long!(input)
        )));
    }
    Ok(Value::Sequence(result))
}

/// Consumes a quoted string starting at the opening quote, resolving the
/// `\b \f \n \r \t \" \\` escapes. An unknown escaped character is passed
/// through literally.
fn extract_string(input: &mut &str) -> Result<String> {
    let mut result = String::new();
    let mut escaped = false;
    let mut chars = input.char_indices();
    chars.next();
    for (i, c) in chars {
        if escaped {
            result.push(match c {
                'b' => '\u{8}',
                'f' => '\u{c}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                c => c,
            });
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            *input = &input[i + 1..];
            return Ok(result);
        } else {
            result.push(c);
        }
    }
    Err(Error::DataFormat(format!(
        "unterminated string `{}`",
        truncate_long!(input)
    )))
}

fn extract_bare_token<'s>(input: &mut &'s str) -> &'s str {
    consume_while(input, |c| !c.is_whitespace() && !matches!(c, ',' | ']' | '}'))
}

/// A bare key additionally stops at `:` and `"`, which a value token does
/// not.
fn extract_bare_key<'s>(input: &mut &'s str) -> &'s str {
    consume_while(input, |c| {
        !c.is_whitespace() && !matches!(c, ',' | ':' | ']' | '}' | '"')
    })
}

/// Classifies a bare token. The scan accepts one leading sign and at most one
/// fractional separator, with both `.` and `,` recognized as a separator; a
/// second occurrence demotes the token to a string. A separator makes the
/// token a `Float64`, a leading `-` an `Int64`, plain digits a `UInt64`, so
/// `01` is the number 1 rather than a string. Everything else, including a
/// numeric token too large for 64 bits, stays a string.
fn classify_token(token: &str) -> Value {
    use crate::AsValue;
    match token {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }
    let mut digits = false;
    let mut separator = false;
    let mut numeric = true;
    for (position, c) in token.chars().enumerate() {
        match c {
            '0'..='9' => digits = true,
            '+' | '-' if position == 0 => {}
            '.' | ',' if !separator => separator = true,
            _ => {
                numeric = false;
                break;
            }
        }
    }
    if !numeric || !digits {
        return Value::Varchar(token.into());
    }
    if separator {
        let normalized = token.replace(',', ".");
        return match fast_float::parse(&normalized) {
            Ok(v) => Value::Float64(v),
            Err(..) => Value::Varchar(token.into()),
        };
    }
    if token.starts_with('-') {
        return match i64::parse(token) {
            Ok(v) => Value::Int64(v),
            Err(..) => Value::Varchar(token.into()),
        };
    }
    match u64::parse(token.trim_start_matches('+')) {
        Ok(v) => Value::UInt64(v),
        Err(..) => Value::Varchar(token.into()),
    }
}

impl Value {
    /// See [`parse`].
    pub fn parse(input: impl AsRef<str>) -> Result<Value> {
        parse(input)
    }
}
