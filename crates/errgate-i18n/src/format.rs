use errgate_core::render_value;
use serde_json::Value;

/// Fill a message template with positional arguments
///
/// - `{n}` is replaced by argument `n`; strings are inserted without quotes
///   and other values as compact JSON (`null` for absent values). A
///   format suffix such as `{0,number}` is accepted and ignored.
/// - `''` is a literal single quote, anywhere in the template.
/// - Text between single quotes is copied literally, braces included.
///
/// Placeholders that are malformed or refer to a missing argument are
/// copied to the output unchanged.
pub fn format_message(template: &str, args: &[Value]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        match c {
            '\'' => {
                if let Some(after) = rest.strip_prefix("''") {
                    output.push('\'');
                    rest = after;
                } else {
                    rest = copy_quoted(&rest[1..], &mut output);
                }
            }
            '{' => {
                rest = match placeholder(rest, args) {
                    Some((value, after)) => {
                        output.push_str(&value);
                        after
                    }
                    None => {
                        output.push('{');
                        &rest[1..]
                    }
                };
            }
            _ => {
                output.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    output
}

/// Copy a quoted span up to its closing quote, returning what follows it
fn copy_quoted<'a>(mut rest: &'a str, output: &mut String) -> &'a str {
    loop {
        match rest.find('\'') {
            None => {
                output.push_str(rest);
                return "";
            }
            Some(pos) => {
                output.push_str(&rest[..pos]);
                rest = &rest[pos + 1..];
                match rest.strip_prefix('\'') {
                    Some(after) => {
                        output.push('\'');
                        rest = after;
                    }
                    None => return rest,
                }
            }
        }
    }
}

/// Resolve the placeholder starting at `rest`, which begins with `{`
fn placeholder<'a>(rest: &'a str, args: &[Value]) -> Option<(String, &'a str)> {
    let close = rest.find('}')?;
    let inner = &rest[1..close];
    let index_part = inner.split(',').next().unwrap_or(inner).trim();

    if index_part.is_empty() || !index_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let arg = args.get(index_part.parse::<usize>().ok()?)?;
    Some((render_value(arg), &rest[close + 1..]))
}

/// Double every single quote so the text formats back to itself
pub fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', "''")
}
