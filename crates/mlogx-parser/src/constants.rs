//! Compiler constant substitution
//!
//! References are `$name` or `$(name)`, optionally followed by `.field`,
//! `[index]` or `.length` segments. A reference resolves to the longest
//! prefix of its path that names a value; the rest of the path stays in the
//! text. References whose name is undefined are left as written.

use mlogx_core::types::{CompilerConstants, ConstValue};
use std::borrow::Cow;

enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn name_len(text: &str) -> usize {
    text.find(|c: char| !is_name_char(c)).unwrap_or(text.len())
}

/// Parse `.field` / `[index]` segments, returning each with the byte offset
/// just past it
fn parse_segments(text: &str) -> Vec<(Segment<'_>, usize)> {
    let mut segments = Vec::new();
    let mut offset = 0;
    loop {
        let rest = &text[offset..];
        if let Some(field) = rest.strip_prefix('.') {
            let len = name_len(field);
            if len == 0 {
                break;
            }
            offset += 1 + len;
            segments.push((Segment::Field(&field[..len]), offset));
        } else if let Some(index) = rest.strip_prefix('[') {
            let Some(close) = index.find(']') else {
                break;
            };
            let Ok(value) = index[..close].trim().parse::<usize>() else {
                break;
            };
            offset += close + 2;
            segments.push((Segment::Index(value), offset));
        } else {
            break;
        }
    }
    segments
}

fn step<'v>(value: &'v ConstValue, segment: &Segment<'_>) -> Option<Cow<'v, ConstValue>> {
    match segment {
        Segment::Index(index) => value.index(*index).map(Cow::Borrowed),
        Segment::Field(field) => value.field(field).map(Cow::Borrowed).or_else(|| {
            (*field == "length")
                .then(|| value.length())
                .flatten()
                .map(|len| Cow::Owned(ConstValue::Number(len as f64)))
        }),
    }
}

/// Resolve as many segments as possible; returns the value and the number of
/// segments used
fn resolve<'v>(
    root: &'v ConstValue,
    segments: &[(Segment<'_>, usize)],
) -> (Cow<'v, ConstValue>, usize) {
    let mut current = Cow::Borrowed(root);
    let mut used = 0;
    for (segment, _) in segments {
        let next = match &current {
            Cow::Borrowed(value) => step(*value, segment),
            // `.length` yields a number, which has no further segments
            Cow::Owned(_) => None,
        };
        match next {
            Some(value) => {
                current = value;
                used += 1;
            }
            None => break,
        }
    }
    (current, used)
}

/// Replace `$name` / `$(name)` references with constant values
pub fn substitute_constants(text: &str, constants: &CompilerConstants) -> String {
    if !text.contains('$') || constants.is_empty() {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('$') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        // $(path)
        if let Some(inner_start) = after.strip_prefix('(') {
            if let Some(close) = inner_start.find(')') {
                let inner = inner_start[..close].trim();
                let len = name_len(inner);
                let segments = parse_segments(&inner[len..]);
                let fully_parsed = segments.last().map_or(len, |(_, end)| len + end) == inner.len();
                let resolved = constants.get(&inner[..len]).and_then(|root| {
                    let (value, used) = resolve(root, &segments);
                    (fully_parsed && used == segments.len()).then(|| value.render())
                });
                if let Some(rendered) = resolved {
                    output.push_str(&rendered);
                    rest = &inner_start[close + 1..];
                    continue;
                }
                log::trace!("Constant reference $({}) left unresolved", inner);
            }
            output.push('$');
            rest = after;
            continue;
        }

        // $path
        let len = name_len(after);
        match constants.get(&after[..len]).filter(|_| len > 0) {
            Some(root) => {
                let segments = parse_segments(&after[len..]);
                let (value, used) = resolve(root, &segments);
                let consumed = if used == 0 { 0 } else { segments[used - 1].1 };
                output.push_str(&value.render());
                rest = &after[len + consumed..];
            }
            None => {
                if len > 0 {
                    log::trace!("Constant reference ${} left unresolved", &after[..len]);
                }
                output.push('$');
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}
