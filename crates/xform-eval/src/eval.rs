//! Reduction of call-argument expressions to concrete values.
//!
//! The evaluator decides, for one expression, whether it can be reduced to
//! a literal using only the fixed environment: the two ambient file
//! strings and the recognized path-join helper. Everything else fails with
//! the precise reason. Reduction is a pure function of `(expr, env)` with
//! no side effects, and it terminates because expression depth is bounded
//! by the source file itself.

use std::fmt;
use std::path::MAIN_SEPARATOR;

use crate::ast::{Expr, Span};
use crate::env::EvalEnv;
use crate::error::{EvalError, Result};

/// A concrete value an expression reduced to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
}

impl Value {
    /// String form of the value. Numbers use their display form, which
    /// prints whole numbers without a fraction (`2`, not `2.0`).
    pub fn as_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => n.to_string(),
        }
    }

    /// The string inside, when the value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Num(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Num(n) => write!(f, "{n}"),
        }
    }
}

/// What a sub-expression reduced to. The join namespace and the join
/// function flow through member and callee positions but are not values.
enum Reduced {
    Value(Value),
    /// The bare join alias: `path`.
    JoinNamespace,
    /// The join function itself: `path.join`.
    JoinFn,
}

/// Reduce `expr` to a concrete value under `env`.
///
/// The expression must reduce completely: a reference to the join helper
/// that is never applied is recognized but is not a standalone value, and
/// fails like any other unsupported shape.
pub fn evaluate(expr: &Expr, env: &EvalEnv) -> Result<Value> {
    match reduce(expr, env)? {
        Reduced::Value(value) => Ok(value),
        Reduced::JoinNamespace | Reduced::JoinFn => Err(EvalError::Unsupported {
            what: format!("unapplied reference to `{}`", env.join_alias()),
            span: expr.span(),
        }),
    }
}

fn reduce(expr: &Expr, env: &EvalEnv) -> Result<Reduced> {
    match expr {
        Expr::Str { value, .. } => Ok(Reduced::Value(Value::Str(value.clone()))),
        Expr::Num { value, .. } => Ok(Reduced::Value(Value::Num(*value))),
        Expr::Ident { name, span } => reduce_ident(name, *span, env),
        Expr::Member {
            object,
            property,
            span,
        } => reduce_member(object, property, *span, env),
        Expr::Add { left, right, .. } => reduce_add(left, right, env),
        Expr::Call { callee, args, span } => reduce_call(callee, args, *span, env),
        Expr::Unsupported { kind, span } => Err(EvalError::Unsupported {
            what: kind.clone(),
            span: *span,
        }),
    }
}

fn reduce_ident(name: &str, span: Span, env: &EvalEnv) -> Result<Reduced> {
    if name == EvalEnv::FILE_BINDING {
        Ok(Reduced::Value(Value::Str(env.file().to_string())))
    } else if name == EvalEnv::DIR_BINDING {
        Ok(Reduced::Value(Value::Str(env.dir().to_string())))
    } else if name == env.join_alias() {
        Ok(Reduced::JoinNamespace)
    } else {
        Err(EvalError::UnboundIdentifier {
            name: name.to_string(),
            span,
        })
    }
}

fn reduce_member(object: &Expr, property: &str, span: Span, env: &EvalEnv) -> Result<Reduced> {
    // The only meaningful member access is the one naming the join
    // function itself.
    if let Expr::Ident { name, .. } = object {
        if name == env.join_alias() && property == "join" {
            return Ok(Reduced::JoinFn);
        }
    }
    Err(EvalError::Unsupported {
        what: format!("member access `.{property}`"),
        span,
    })
}

fn reduce_add(left: &Expr, right: &Expr, env: &EvalEnv) -> Result<Reduced> {
    let left = reduce_operand(left, env)?;
    let right = reduce_operand(right, env)?;
    let mut text = left.as_text();
    text.push_str(&right.as_text());
    Ok(Reduced::Value(Value::Str(text)))
}

fn reduce_call(callee: &Expr, args: &[Expr], span: Span, env: &EvalEnv) -> Result<Reduced> {
    // Any callee other than the join function is out of reach, including
    // callees that are themselves unevaluable.
    if !matches!(reduce(callee, env), Ok(Reduced::JoinFn)) {
        return Err(EvalError::UnknownCall { span });
    }
    if args.len() < 2 {
        return Err(EvalError::JoinArity {
            callee: join_callee_name(env),
            found: args.len(),
            span,
        });
    }
    let mut segments = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        match reduce_operand(arg, env)? {
            Value::Str(segment) => segments.push(segment),
            Value::Num(_) => {
                return Err(EvalError::JoinArgumentType {
                    callee: join_callee_name(env),
                    index,
                    span: arg.span(),
                });
            }
        }
    }
    Ok(Reduced::Value(Value::Str(join_segments(&segments))))
}

/// Reduce a position that must produce a value.
fn reduce_operand(expr: &Expr, env: &EvalEnv) -> Result<Value> {
    match reduce(expr, env)? {
        Reduced::Value(value) => Ok(value),
        Reduced::JoinNamespace | Reduced::JoinFn => Err(EvalError::Unsupported {
            what: format!("unapplied reference to `{}`", env.join_alias()),
            span: expr.span(),
        }),
    }
}

fn join_callee_name(env: &EvalEnv) -> String {
    format!("{}.join", env.join_alias())
}

/// Textual platform join: seam separators collapse, empty segments are
/// skipped, and `..`/`.` components are kept as written. This mirrors a
/// join utility, not path resolution.
fn join_segments(segments: &[String]) -> String {
    let mut joined = String::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        if joined.is_empty() {
            joined.push_str(segment);
            continue;
        }
        while joined.ends_with(MAIN_SEPARATOR) {
            joined.pop();
        }
        joined.push(MAIN_SEPARATOR);
        joined.push_str(segment.trim_start_matches(MAIN_SEPARATOR));
    }
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
