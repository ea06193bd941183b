use crate::script::ast::{BinOp, Expr, Program, Stmt, StmtKind};
use crate::script::lexer::{lex, Token, TokenKind};
use crate::script::ScriptError;

/// Deepest expression tree the parser will build. Each parenthesis, index,
/// prefix operator and chained binary operator adds one level.
pub const MAX_NESTING: usize = 256;

pub fn parse_program(source: &str) -> Result<Program, ScriptError> {
    let tokens = lex(source)?;
    Parser::new(tokens).parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn line(&self) -> usize {
        self.tokens[self.pos].line
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.tokens[self.pos].kind.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn expect(&mut self, expected: TokenKind, what: &str) -> Result<(), ScriptError> {
        if *self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected {}, found {}", what, describe(self.peek()))))
        }
    }

    fn error(&self, message: String) -> ScriptError {
        ScriptError::Syntax {
            line: self.line(),
            message,
        }
    }

    fn descend(&mut self) -> Result<(), ScriptError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error("expression nested too deeply".to_string()));
        }
        Ok(())
    }

    fn parse_program(mut self) -> Result<Program, ScriptError> {
        let mut program = Program::default();
        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::Newline => {
                    self.advance();
                }
                _ => {
                    let stmt = self.parse_statement()?;
                    program.statements.push(stmt);
                    match self.peek() {
                        TokenKind::Newline | TokenKind::Eof => {}
                        other => {
                            return Err(self.error(format!(
                                "expected end of statement, found {}",
                                describe(other)
                            )))
                        }
                    }
                }
            }
        }
        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ScriptError> {
        let line = self.line();
        let next_is_assign = *self.peek_at(1) == TokenKind::Assign;
        let kind = match self.peek().clone() {
            TokenKind::Persistent => {
                self.advance();
                match self.advance() {
                    TokenKind::Ident(name) => StmtKind::Persistent(name),
                    other => {
                        return Err(ScriptError::Syntax {
                            line,
                            message: format!(
                                "expected a matrix name after 'persistent', found {}",
                                describe(&other)
                            ),
                        })
                    }
                }
            }
            TokenKind::Ident(name) if next_is_assign => {
                self.advance();
                self.advance();
                let value = self.parse_expr()?;
                StmtKind::Assign { name, value }
            }
            _ => StmtKind::Expr(self.parse_expr()?),
        };
        Ok(Stmt { line, kind })
    }

    fn parse_expr(&mut self) -> Result<Expr, ScriptError> {
        let base = self.depth;
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.parse_term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, ScriptError> {
        let base = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ScriptError> {
        let base = self.depth;
        let mut prefixes = Vec::new();
        while matches!(self.peek(), TokenKind::Minus | TokenKind::Transpose) {
            prefixes.push(self.advance());
            self.descend()?;
        }
        let mut expr = self.parse_postfix()?;
        for prefix in prefixes.into_iter().rev() {
            expr = match prefix {
                TokenKind::Minus => Expr::Neg(Box::new(expr)),
                _ => Expr::Transpose(Box::new(expr)),
            };
        }
        self.depth = base;
        Ok(expr)
    }

    fn parse_postfix(&mut self) -> Result<Expr, ScriptError> {
        let base = self.depth;
        let mut expr = self.parse_primary()?;
        while *self.peek() == TokenKind::LBracket {
            self.advance();
            self.descend()?;
            let index = self.parse_expr()?;
            self.expect(TokenKind::RBracket, "']'")?;
            expr = Expr::Index {
                target: Box::new(expr),
                index: Box::new(index),
            };
        }
        self.depth = base;
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ScriptError> {
        match self.peek().clone() {
            TokenKind::Int(value) => {
                self.advance();
                Ok(Expr::Int(value))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Var(name))
            }
            TokenKind::LParen => {
                self.advance();
                self.descend()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                self.depth -= 1;
                Ok(expr)
            }
            other => Err(self.error(format!("expected an expression, found {}", describe(&other)))),
        }
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(name) => format!("'{}'", name),
        TokenKind::Int(value) => format!("'{}'", value),
        TokenKind::Persistent => "'persistent'".to_string(),
        TokenKind::Transpose => "'transpose'".to_string(),
        TokenKind::Plus => "'+'".to_string(),
        TokenKind::Minus => "'-'".to_string(),
        TokenKind::Star => "'*'".to_string(),
        TokenKind::Slash => "'/'".to_string(),
        TokenKind::Assign => "'='".to_string(),
        TokenKind::LBracket => "'['".to_string(),
        TokenKind::RBracket => "']'".to_string(),
        TokenKind::LParen => "'('".to_string(),
        TokenKind::RParen => "')'".to_string(),
        TokenKind::Newline => "end of line".to_string(),
        TokenKind::Eof => "end of input".to_string(),
    }
}
