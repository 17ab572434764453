// Line-based `axis_field = value` dialect
use pid::{Axis, GainField};

use crate::compiler::{resolve_value, Resolved};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::telemetry::Telemetry;

pub(crate) fn parse(tokens: &[Token], telemetry: &Telemetry) -> Result<Resolved, ParseError> {
    let mut resolved = Resolved::default();

    for line in tokens.chunk_by(|a, b| a.line == b.line) {
        let number = line[0].line;
        let line = match line {
            [rest @ .., last] if last.is_punct(';') => rest,
            _ => line,
        };

        let (key, value) = match line {
            [Token { kind: TokenKind::Ident(key), .. }, eq, value @ ..] if eq.is_punct('=') => (key, value),
            _ => {
                return Err(ParseError::Syntax {
                    line: number,
                    message: "expected '<axis>_<kp|ki|kd> = <value>'".into(),
                })
            }
        };

        if Telemetry::is_variable(key) {
            return Err(ParseError::ReadOnly { line: number, name: key.clone() });
        }
        let (axis, field) = parse_key(key).ok_or_else(|| ParseError::UnknownKey {
            line: number,
            key: key.clone(),
        })?;
        if resolved.get(axis, field).is_some() {
            return Err(ParseError::Duplicate { line: number, key: key.clone() });
        }
        let value = resolve_value(value, telemetry).ok_or_else(|| ParseError::InvalidValue {
            line: number,
            key: key.clone(),
        })?;

        resolved.set(axis, field, value);
    }

    Ok(resolved)
}

fn parse_key(key: &str) -> Option<(Axis, GainField)> {
    let (axis, field) = key.split_once('_')?;
    Some((Axis::from_name(axis)?, GainField::from_name(field)?))
}
