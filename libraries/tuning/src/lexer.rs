// Tokenizer shared by both script dialects
use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    /// Unsigned literal; signs are separate punctuation
    Number(f32),
    Punct(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based source line
    pub line: usize,
}

impl Token {
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    /// Identifier or string contents, the two ways a key can be written
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) | TokenKind::Str(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(ident) if ident == name)
    }
}

const PUNCTUATION: &[char] = &['=', ':', '{', '}', '(', ')', '[', ']', ',', ';', '.', '-', '+', '*', '/', '<', '>', '!', '&', '|', '?'];

/// Split `source` into tokens. `#`, `//` and `/* */` comments are dropped.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            c if c.is_whitespace() => i += 1,
            '#' => i = skip_line(&chars, i),
            '/' if chars.get(i + 1) == Some(&'/') => i = skip_line(&chars, i),
            '/' if chars.get(i + 1) == Some(&'*') => {
                let start_line = line;
                i += 2;
                loop {
                    match chars.get(i) {
                        None => {
                            return Err(ParseError::Syntax {
                                line: start_line,
                                message: "unterminated block comment".into(),
                            })
                        }
                        Some('*') if chars.get(i + 1) == Some(&'/') => {
                            i += 2;
                            break;
                        }
                        Some('\n') => {
                            line += 1;
                            i += 1;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            '"' | '\'' | '`' => {
                let quote = c;
                let start_line = line;
                let start = i + 1;
                i = start;
                while i < chars.len() && chars[i] != quote {
                    if chars[i] == '\n' {
                        line += 1;
                    }
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(ParseError::Syntax {
                        line: start_line,
                        message: format!("unterminated string starting with {quote}"),
                    });
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token { kind: TokenKind::Str(text), line: start_line });
                i += 1;
            }
            c if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) => {
                let start = i;
                i = scan_number(&chars, i);
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f32>().map_err(|_| ParseError::Syntax {
                    line,
                    message: format!("invalid number '{text}'"),
                })?;
                tokens.push(Token { kind: TokenKind::Number(value), line });
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token { kind: TokenKind::Ident(text), line });
            }
            c if PUNCTUATION.contains(&c) => {
                tokens.push(Token { kind: TokenKind::Punct(c), line });
                i += 1;
            }
            other => {
                return Err(ParseError::Syntax {
                    line,
                    message: format!("unexpected character '{other}'"),
                })
            }
        }
    }

    Ok(tokens)
}

fn skip_line(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i] != '\n' {
        i += 1;
    }
    i
}

fn scan_number(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        i += 1;
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            i = j;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}
