/// Consumes the longest prefix of `input` whose characters satisfy the
/// predicate and returns it, advancing the slice past it.
pub fn consume_while<'s>(input: &mut &'s str, predicate: impl FnMut(&char) -> bool) -> &'s str {
    let len = input.chars().take_while(predicate).count();
    if len == 0 {
        return "";
    }
    let split = input
        .char_indices()
        .nth(len)
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let result = &input[..split];
    *input = &input[split..];
    result
}

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Largest index not past `max` that sits on a char boundary of `text`.
pub fn truncate_boundary(text: &str, max: usize) -> usize {
    if text.len() <= max {
        return text.len();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[macro_export]
macro_rules! truncate_long {
    ($text:expr) => {
        format_args!(
            "{}{}",
            $text[..$crate::truncate_boundary(&$text[..], 497)].trim_end(),
            if $text.len() > 497 { "..." } else { "" },
        )
    };
}
