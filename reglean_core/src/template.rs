//! Replacement template normalization.
//!
//! Substitution rules may reference capture groups either with the regex
//! crate's own `$1` / `${name}` syntax or with backslash references
//! (`\1`, `\g<1>`, `\g<name>`). Templates are rewritten once, at
//! registration, into the form `Regex::replacen` understands.

use std::borrow::Cow;

/// Rewrite backslash group references in `template` into `${..}` form.
///
/// `\\` becomes a literal backslash, `\$` a literal dollar, and `\n`,
/// `\t`, `\r` become their control characters. Any other escaped
/// character is kept as written.
/// `$` references are left untouched.
#[must_use]
pub fn normalize(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 4);
    let mut rest = template;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (piece, consumed) = escape(after);
        out.push_str(&piece);
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

/// Translate the escape starting right after a backslash.
///
/// Returns the replacement text and how many bytes of `after` it used.
fn escape(after: &str) -> (Cow<'static, str>, usize) {
    let digits = after
        .bytes()
        .take(2)
        .take_while(u8::is_ascii_digit)
        .count();
    if digits > 0 {
        return (Cow::Owned(format!("${{{}}}", &after[..digits])), digits);
    }

    if let Some(named) = after.strip_prefix("g<") {
        if let Some(end) = named.find('>') {
            let name = &named[..end];
            if is_group_name(name) {
                return (Cow::Owned(format!("${{{name}}}")), 2 + end + 1);
            }
        }
    }

    let Some(c) = after.chars().next() else {
        return (Cow::Borrowed("\\"), 0);
    };
    let piece = match c {
        '\\' => Cow::Borrowed("\\"),
        '$' => Cow::Borrowed("$$"),
        'n' => Cow::Borrowed("\n"),
        't' => Cow::Borrowed("\t"),
        'r' => Cow::Borrowed("\r"),
        other => Cow::Owned(format!("\\{other}")),
    };
    (piece, c.len_utf8())
}

fn is_group_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
