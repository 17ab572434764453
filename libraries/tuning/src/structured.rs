// Best-effort extraction of `axis: { kp, ki, kd }` blocks from a `return { .. }` block.
// Only the return block is read; everything around it is ignored.
use pid::{Axis, GainField};

use crate::compiler::{resolve_value, Resolved};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::telemetry::Telemetry;

pub(crate) fn parse(tokens: &[Token], telemetry: &Telemetry) -> Result<Resolved, ParseError> {
    check_balance(tokens)?;
    let body = return_block(tokens).ok_or(ParseError::MissingReturn)?;

    let mut resolved = Resolved::default();
    for axis in Axis::ALL {
        let Some(block) = find_block(body, axis.name()) else {
            continue;
        };
        for field in GainField::ALL {
            let Some(value) = find_value(block, field.name()) else {
                continue;
            };
            match resolve_value(value, telemetry) {
                Some(value) => resolved.set(axis, field, value),
                None => log::warn!("{axis}.{field} has a value that cannot be read, ignoring it"),
            }
        }
    }

    Ok(resolved)
}

fn opening(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

fn check_balance(tokens: &[Token]) -> Result<(), ParseError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    for token in tokens {
        for open in ['(', '[', '{'] {
            if token.is_punct(open) {
                stack.push((open, token.line));
            }
        }
        for close in [')', ']', '}'] {
            if token.is_punct(close) {
                match stack.pop() {
                    Some((open, _)) if Some(open) == opening(close) => {}
                    _ => return Err(ParseError::UnexpectedDelimiter { line: token.line, found: close }),
                }
            }
        }
    }

    match stack.pop() {
        Some((open, line)) => Err(ParseError::Unclosed { line, open }),
        None => Ok(()),
    }
}

/// Index of the token closing the bracket opened at `open`. Assumes balanced input.
fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.is_punct('{') || token.is_punct('(') || token.is_punct('[') {
            depth += 1;
        } else if token.is_punct('}') || token.is_punct(')') || token.is_punct(']') {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Tokens between the braces of the first `return {` (or `return ({`)
fn return_block(tokens: &[Token]) -> Option<&[Token]> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_ident("return"))
        .find_map(|(i, _)| {
            let open = (i + 1..tokens.len()).find(|&j| !tokens[j].is_punct('('))?;
            if !tokens[open].is_punct('{') {
                return None;
            }
            let close = matching_close(tokens, open)?;
            Some(&tokens[open + 1..close])
        })
}

/// Start of the value bound to `key` at the top level of `tokens`, i.e. the token after
/// `key:` or `key =`
fn find_entry(tokens: &[Token], key: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, token) in tokens.iter().enumerate() {
        if token.is_punct('{') || token.is_punct('(') || token.is_punct('[') {
            depth += 1;
        } else if token.is_punct('}') || token.is_punct(')') || token.is_punct(']') {
            depth -= 1;
        } else if depth == 0 && token.key() == Some(key) {
            let separated = tokens.get(i + 1).is_some_and(|t| t.is_punct(':') || t.is_punct('='));
            if separated && i + 2 < tokens.len() {
                return Some(i + 2);
            }
        }
    }
    None
}

fn find_block<'a>(tokens: &'a [Token], key: &str) -> Option<&'a [Token]> {
    let start = find_entry(tokens, key)?;
    if !tokens[start].is_punct('{') {
        return None;
    }
    let close = matching_close(tokens, start)?;
    Some(&tokens[start + 1..close])
}

fn find_value<'a>(tokens: &'a [Token], key: &str) -> Option<&'a [Token]> {
    let start = find_entry(tokens, key)?;
    let end = tokens[start..]
        .iter()
        .position(|t| t.is_punct(',') || t.is_punct(';'))
        .map_or(tokens.len(), |offset| start + offset);
    Some(&tokens[start..end])
}
