use crate::script::ScriptError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Persistent,
    Transpose,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Newline,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

pub fn lex(source: &str) -> Result<Vec<Token>, ScriptError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut index = 0usize;
    let mut line = 1usize;

    while index < chars.len() {
        let ch = chars[index];

        if ch == '\n' {
            tokens.push(Token {
                kind: TokenKind::Newline,
                line,
            });
            index += 1;
            line += 1;
            continue;
        }

        if ch.is_whitespace() {
            index += 1;
            continue;
        }

        // `#` comments run to end-of-line.
        if ch == '#' {
            while index < chars.len() && chars[index] != '\n' {
                index += 1;
            }
            continue;
        }

        if ch.is_ascii_digit() {
            let start = index;
            while index < chars.len() && chars[index].is_ascii_digit() {
                index += 1;
            }
            let text: String = chars[start..index].iter().collect();
            let value = text.parse::<i64>().map_err(|_| ScriptError::Syntax {
                line,
                message: format!("integer literal '{}' is out of range", text),
            })?;
            tokens.push(Token {
                kind: TokenKind::Int(value),
                line,
            });
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let start = index;
            while index < chars.len() && (chars[index].is_alphanumeric() || chars[index] == '_') {
                index += 1;
            }
            let text: String = chars[start..index].iter().collect();
            let kind = match text.as_str() {
                "persistent" => TokenKind::Persistent,
                "transpose" => TokenKind::Transpose,
                _ => TokenKind::Ident(text),
            };
            tokens.push(Token { kind, line });
            continue;
        }

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Assign,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            other => {
                return Err(ScriptError::Syntax {
                    line,
                    message: format!("unexpected character '{}'", other),
                })
            }
        };
        tokens.push(Token { kind, line });
        index += 1;
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
    });
    Ok(tokens)
}
