//! Caller-facing helper for module-loading call sites.
//!
//! A require-style transform hands over the arguments of one call plus the
//! file's source text; what comes back depends on the transform's own
//! policy. With evaluation enabled every argument must reduce to a value.
//! With evaluation disabled the evaluator is bypassed entirely and the
//! verbatim source text spanning the argument list is returned, even for
//! arguments that could never evaluate.

use crate::ast::Expr;
use crate::env::EvalEnv;
use crate::error::Result;
use crate::eval::{Value, evaluate};

/// Evaluation policy supplied by the transform author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Reduce arguments to values before handing them to the transform.
    /// When false, raw argument-list source text is passed through.
    pub evaluate_arguments: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            evaluate_arguments: true,
        }
    }
}

/// The arguments of one module-loading call, after policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RequireArguments {
    /// Every argument reduced to a concrete value.
    Evaluated(Vec<Value>),
    /// Evaluation bypassed; verbatim source text spanning the argument
    /// list.
    Raw(String),
}

/// Apply `options` to the arguments of one call site.
///
/// With evaluation enabled the first failing argument aborts with its
/// reason; the caller decides whether to fall back to raw text or surface
/// a build error. With evaluation disabled the exact `source` text from
/// the first argument to the last is returned, whitespace included.
///
/// # Panics
///
/// Panics if the argument spans do not fall inside `source`, which means
/// the nodes were built against a different file.
pub fn evaluate_require_arguments(
    args: &[Expr],
    source: &str,
    env: &EvalEnv,
    options: &EvalOptions,
) -> Result<RequireArguments> {
    if !options.evaluate_arguments {
        let raw = match (args.first(), args.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()).text(source).to_string(),
            _ => String::new(),
        };
        return Ok(RequireArguments::Raw(raw));
    }
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(evaluate(arg, env)?);
    }
    Ok(RequireArguments::Evaluated(values))
}
