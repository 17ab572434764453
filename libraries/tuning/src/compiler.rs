use pid::{Axis, GainField, GainSet};

use crate::error::{CompileError, ParseError};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::telemetry::Telemetry;
use crate::{flat, structured};

/// Which script syntax a source was read as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `axis_field = value` lines
    Flat,
    /// `return { axis: { kp: .., ki: .., kd: .. } }` blocks, extracted best-effort
    Structured,
}

/// Successful compilation with the details a UI may want to surface
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub gains: GainSet,
    pub dialect: Dialect,
    /// Gains the script did not set, filled from `GainSet::default()`
    pub defaulted: Vec<(Axis, GainField)>,
}

/// Compile a gain script into a validated gain set.
///
/// Nothing is applied here; the caller swaps the returned set in as a whole.
pub fn compile(source: &str, telemetry: &Telemetry) -> Result<GainSet, CompileError> {
    compile_with_report(source, telemetry).map(|compilation| compilation.gains)
}

pub fn compile_with_report(source: &str, telemetry: &Telemetry) -> Result<Compilation, CompileError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty.into());
    }

    let dialect = detect_dialect(&tokens);
    let resolved = match dialect {
        Dialect::Flat => flat::parse(&tokens, telemetry)?,
        Dialect::Structured => structured::parse(&tokens, telemetry)?,
    };
    if resolved.is_empty() {
        return Err(ParseError::Empty.into());
    }

    let (gains, defaulted) = resolved.finish();
    if dialect == Dialect::Structured {
        for (axis, field) in &defaulted {
            log::warn!("{axis}.{field} not found in script, using default {}", GainSet::default().axis(*axis).get(*field));
        }
    }
    gains.validate()?;

    log::debug!("compiled {dialect:?} gain script ({} defaulted)", defaulted.len());
    Ok(Compilation { gains, dialect, defaulted })
}

fn detect_dialect(tokens: &[Token]) -> Dialect {
    if tokens.iter().any(|t| t.is_punct('{') || t.is_ident("return")) {
        Dialect::Structured
    } else {
        Dialect::Flat
    }
}

/// Gains located by a parser, before defaults are filled in
#[derive(Debug, Default, Clone)]
pub(crate) struct Resolved {
    values: [[Option<f32>; 3]; 4],
}

impl Resolved {
    pub fn get(&self, axis: Axis, field: GainField) -> Option<f32> {
        self.values[axis_index(axis)][field_index(field)]
    }

    pub fn set(&mut self, axis: Axis, field: GainField, value: f32) {
        self.values[axis_index(axis)][field_index(field)] = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().flatten().all(Option::is_none)
    }

    /// Fill gaps from the default set and list which gains were filled
    pub fn finish(self) -> (GainSet, Vec<(Axis, GainField)>) {
        let mut gains = GainSet::default();
        let mut defaulted = Vec::new();
        for axis in Axis::ALL {
            for field in GainField::ALL {
                match self.get(axis, field) {
                    Some(value) => gains.axis_mut(axis).set(field, value),
                    None => defaulted.push((axis, field)),
                }
            }
        }
        (gains, defaulted)
    }
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Pitch => 0,
        Axis::Roll => 1,
        Axis::Yaw => 2,
        Axis::Altitude => 3,
    }
}

fn field_index(field: GainField) -> usize {
    match field {
        GainField::Kp => 0,
        GainField::Ki => 1,
        GainField::Kd => 2,
    }
}

/// Resolve a value expression: an optionally signed number or a telemetry variable,
/// optionally qualified (`t.altitude`). Anything else resolves to `None`.
pub(crate) fn resolve_value(tokens: &[Token], telemetry: &Telemetry) -> Option<f32> {
    let (sign, rest) = match tokens.first() {
        Some(t) if t.is_punct('-') => (-1.0, &tokens[1..]),
        Some(t) if t.is_punct('+') => (1.0, &tokens[1..]),
        _ => (1.0, tokens),
    };

    match rest {
        [Token { kind: TokenKind::Number(value), .. }] => Some(sign * value),
        [Token { kind: TokenKind::Ident(_), .. }, ..] => {
            // ident ( '.' ident )*
            let mut name = None;
            for (i, token) in rest.iter().enumerate() {
                match (&token.kind, i % 2) {
                    (TokenKind::Ident(ident), 0) => name = Some(ident.as_str()),
                    (TokenKind::Punct('.'), 1) if i + 1 < rest.len() => {}
                    _ => return None,
                }
            }
            name.and_then(|name| telemetry.get(name)).map(|value| sign * value)
        }
        _ => None,
    }
}
