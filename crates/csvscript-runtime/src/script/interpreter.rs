use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::config::RunConfig;
use crate::error::MatrixError;
use crate::io;
use crate::math::{Matrix, Vector};
use crate::script::ast::{BinOp, Expr, Program, Stmt, StmtKind};
use crate::script::parser::parse_program;
use crate::script::ScriptError;

/// A script value. Every variable holds its own copy; reading a variable
/// clones it, so no two bindings share storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Matrix(Matrix),
    Vector(Vector),
    Scalar(i64),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Matrix(_) => "matrix",
            Value::Vector(_) => "vector",
            Value::Scalar(_) => "scalar",
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<i64> {
        match self {
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Matrix(m) => write!(f, "{}", m),
            Value::Vector(v) => write!(f, "{}", v),
            Value::Scalar(s) => write!(f, "{}", s),
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Values of bare expression statements, with their line numbers.
    pub echoed: Vec<(usize, Value)>,
    /// CSV files written for persistent variables.
    pub saved: Vec<PathBuf>,
}

/// Parse and execute `source`, then persist according to `config`.
pub fn run_script(source: &str, config: &RunConfig) -> Result<RunReport, ScriptError> {
    let program = parse_program(source)?;
    let mut interpreter = Interpreter::new(config.clone());
    interpreter.run(&program)
}

pub struct Interpreter {
    config: RunConfig,
    variables: HashMap<String, Value>,
    persistent: Vec<(String, usize)>,
}

impl Interpreter {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            variables: HashMap::new(),
            persistent: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn bind<S: Into<String>>(&mut self, name: S, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Names of persistent variables in declaration order.
    pub fn persistent_names(&self) -> impl Iterator<Item = &str> {
        self.persistent.iter().map(|(name, _)| name.as_str())
    }

    /// Execute every statement and, when configured, save persistent matrices.
    pub fn run(&mut self, program: &Program) -> Result<RunReport, ScriptError> {
        let echoed = self.execute(program)?;
        let saved = if self.config.save_persistent {
            self.save_persistent()?
        } else {
            Vec::new()
        };
        Ok(RunReport { echoed, saved })
    }

    /// Execute statements without persisting anything.
    pub fn execute(&mut self, program: &Program) -> Result<Vec<(usize, Value)>, ScriptError> {
        let mut echoed = Vec::new();
        for stmt in &program.statements {
            if let Some(value) = self.execute_statement(stmt)? {
                echoed.push((stmt.line, value));
            }
        }
        Ok(echoed)
    }

    fn execute_statement(&mut self, stmt: &Stmt) -> Result<Option<Value>, ScriptError> {
        let line = stmt.line;
        match &stmt.kind {
            StmtKind::Persistent(name) => {
                let path = self.config.csv_path(name);
                let matrix: Matrix = io::load(&path).map_err(|source| runtime(line, source))?;
                log::debug!(
                    "line {}: persistent {} loaded as {}x{}",
                    line,
                    name,
                    matrix.nrows(),
                    matrix.ncols()
                );
                self.variables.insert(name.clone(), Value::Matrix(matrix));
                if !self.persistent.iter().any(|(n, _)| n == name) {
                    self.persistent.push((name.clone(), line));
                }
                Ok(None)
            }
            StmtKind::Assign { name, value } => {
                let value = self.eval(value, line)?;
                log::debug!("line {}: {} = <{}>", line, name, value.kind());
                self.variables.insert(name.clone(), value);
                Ok(None)
            }
            StmtKind::Expr(expr) => {
                let value = self.eval(expr, line)?;
                if self.config.echo_expressions {
                    Ok(Some(value))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Save every persistent variable that still holds a matrix.
    pub fn save_persistent(&self) -> Result<Vec<PathBuf>, ScriptError> {
        let mut saved = Vec::new();
        for (name, line) in &self.persistent {
            match self.variables.get(name) {
                Some(Value::Matrix(matrix)) => {
                    let path = self.config.csv_path(name);
                    io::save(&path, matrix).map_err(|source| runtime(*line, source))?;
                    saved.push(path);
                }
                Some(other) => {
                    log::warn!(
                        "Persistent variable '{}' holds a {}, not a matrix; skipping save",
                        name,
                        other.kind()
                    );
                }
                None => {}
            }
        }
        Ok(saved)
    }

    fn eval(&self, expr: &Expr, line: usize) -> Result<Value, ScriptError> {
        match expr {
            Expr::Int(value) => Ok(Value::Scalar(*value)),
            Expr::Var(name) => {
                self.variables
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ScriptError::UndefinedVariable {
                        line,
                        name: name.clone(),
                    })
            }
            Expr::Neg(inner) => match self.eval(inner, line)? {
                Value::Scalar(s) => Ok(Value::Scalar(s.wrapping_neg())),
                Value::Matrix(m) => Ok(Value::Matrix(m.scalar_mul(-1))),
                Value::Vector(v) => Ok(Value::Vector(v.scalar_mul(-1))),
            },
            Expr::Transpose(inner) => match self.eval(inner, line)? {
                Value::Matrix(m) => Ok(Value::Matrix(m.transpose())),
                other => Err(unsupported(line, "transpose", other.kind().to_string())),
            },
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs, line)?;
                let rhs = self.eval(rhs, line)?;
                binary(*op, lhs, rhs, line)
            }
            Expr::Index { target, index } => {
                // `M[i][j]` reads one element with both bounds checked.
                if let Expr::Index {
                    target: inner,
                    index: row,
                } = target.as_ref()
                {
                    if let Value::Matrix(m) = self.eval(inner, line)? {
                        let row = self.eval_index(row, line)?;
                        let col = self.eval_index(index, line)?;
                        let value = m.get(row, col).map_err(|e| runtime(line, e))?;
                        return Ok(Value::Scalar(*value));
                    }
                }
                let target = self.eval(target, line)?;
                let idx = self.eval_index(index, line)?;
                match target {
                    Value::Matrix(m) => m
                        .extract_row(idx)
                        .map(Value::Vector)
                        .map_err(|e| runtime(line, e)),
                    Value::Vector(v) => v
                        .get(idx)
                        .map(|value| Value::Scalar(*value))
                        .map_err(|e| runtime(line, e)),
                    Value::Scalar(_) => Err(unsupported(line, "[]", "scalar".to_string())),
                }
            }
        }
    }

    fn eval_index(&self, expr: &Expr, line: usize) -> Result<usize, ScriptError> {
        match self.eval(expr, line)? {
            Value::Scalar(value) => {
                usize::try_from(value).map_err(|_| ScriptError::InvalidIndex { line, value })
            }
            other => Err(unsupported(line, "[]", format!("{} index", other.kind()))),
        }
    }
}

fn binary(op: BinOp, lhs: Value, rhs: Value, line: usize) -> Result<Value, ScriptError> {
    use Value::{Matrix as M, Scalar as S, Vector as V};

    let value = match (op, lhs, rhs) {
        (BinOp::Add, S(a), S(b)) => S(a.wrapping_add(b)),
        (BinOp::Sub, S(a), S(b)) => S(a.wrapping_sub(b)),
        (BinOp::Mul, S(a), S(b)) => S(a.wrapping_mul(b)),
        (BinOp::Div, S(_), S(0)) => return Err(ScriptError::DivisionByZero { line }),
        (BinOp::Div, S(a), S(b)) => S(a.wrapping_div(b)),

        (BinOp::Add, M(a), M(b)) => M(a.add(&b).map_err(|e| runtime(line, e))?),
        (BinOp::Mul, M(a), M(b)) => M(a.multiply(&b).map_err(|e| runtime(line, e))?),

        (BinOp::Add, M(m), S(s)) | (BinOp::Add, S(s), M(m)) => M(m.scalar_add(s)),
        (BinOp::Sub, M(m), S(s)) => M(m.scalar_add(s.wrapping_neg())),
        (BinOp::Mul, M(m), S(s)) | (BinOp::Mul, S(s), M(m)) => M(m.scalar_mul(s)),
        (BinOp::Div, M(m), S(s)) => {
            M(m.scalar_div(s).ok_or(ScriptError::DivisionByZero { line })?)
        }

        (BinOp::Add, V(v), S(s)) | (BinOp::Add, S(s), V(v)) => V(v.scalar_add(s)),
        (BinOp::Sub, V(v), S(s)) => V(v.scalar_add(s.wrapping_neg())),
        (BinOp::Mul, V(v), S(s)) | (BinOp::Mul, S(s), V(v)) => V(v.scalar_mul(s)),
        (BinOp::Div, V(v), S(s)) => {
            V(v.scalar_div(s).ok_or(ScriptError::DivisionByZero { line })?)
        }

        (op, lhs, rhs) => {
            return Err(unsupported(
                line,
                op.symbol(),
                format!("{} and {}", lhs.kind(), rhs.kind()),
            ))
        }
    };
    Ok(value)
}

fn runtime(line: usize, source: MatrixError) -> ScriptError {
    ScriptError::Runtime { line, source }
}

fn unsupported(line: usize, op: &'static str, operands: String) -> ScriptError {
    ScriptError::UnsupportedOperation { line, op, operands }
}
