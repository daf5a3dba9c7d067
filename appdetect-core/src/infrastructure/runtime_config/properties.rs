//! `.properties` file parser
//!
//! Supports the subset of the format that appears in application configuration:
//! `#`/`!` comments, `=`, `:` or whitespace separators, backslash line continuations
//! and the usual escapes including `\uXXXX`.

use crate::application::errors::RuntimeConfigError;

/// Parse properties text into ordered `(key, value)` pairs.
///
/// Duplicate keys are returned as they appear; the caller decides precedence.
pub fn parse_properties(content: &str) -> Result<Vec<(String, String)>, RuntimeConfigError> {
    let mut entries = Vec::new();

    for (line_number, logical) in logical_lines(content) {
        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line_number)?;
        let value = unescape(raw_value, line_number)?;
        entries.push((key, value));
    }

    Ok(entries)
}

/// Join continuation lines, dropping blank and comment lines.
/// Yields the 1-based number of the first physical line of each logical line.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, physical) in content.lines().enumerate() {
        let trimmed = physical.trim_start();

        match current.as_mut() {
            Some((_, buffer)) => buffer.push_str(trimmed),
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                current = Some((index + 1, trimmed.to_string()));
            }
        }

        let continues = current
            .as_ref()
            .map(|(_, buffer)| trailing_backslashes(buffer) % 2 == 1)
            .unwrap_or(false);

        if continues {
            if let Some((_, buffer)) = current.as_mut() {
                buffer.pop();
            }
        } else if let Some(done) = current.take() {
            lines.push(done);
        }
    }

    // a dangling continuation at end of input still counts
    if let Some(done) = current {
        lines.push(done);
    }

    lines
}

fn trailing_backslashes(line: &str) -> usize {
    line.chars().rev().take_while(|c| *c == '\\').count()
}

/// Split at the first unescaped separator (`=`, `:` or whitespace).
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                return (&line[..index], line[index + 1..].trim_start());
            }
            c if c.is_whitespace() => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    if key_end == line.len() {
        return (line, "");
    }

    // whitespace ended the key; an `=` or `:` may still follow it
    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .map(str::trim_start)
        .unwrap_or(rest);

    (&line[..key_end], rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, RuntimeConfigError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| RuntimeConfigError::Properties {
                        line,
                        message: format!("malformed \\uxxxx encoding '\\u{}'", hex),
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
