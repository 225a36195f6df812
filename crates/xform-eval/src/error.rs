//! Evaluation failures.

use crate::ast::Span;

/// Result type for evaluation.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Why an expression could not be reduced to a value.
///
/// Evaluation is all-or-nothing: the first failing node aborts the whole
/// reduction, and the error keeps that node's span so the caller can point
/// back into the original source, or fall back to raw text per its own
/// policy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Node kind with no evaluation rule.
    #[error("unsupported expression ({what}) at {span}")]
    Unsupported { what: String, span: Span },

    /// Identifier outside the fixed environment.
    #[error("identifier `{name}` is not bound at {span}")]
    UnboundIdentifier { name: String, span: Span },

    /// Call whose callee is not the recognized join function.
    #[error("cannot evaluate call to an unknown function at {span}")]
    UnknownCall { span: Span },

    /// Join call with fewer than two segments.
    #[error("`{callee}` expects at least two segments, found {found}")]
    JoinArity {
        callee: String,
        found: usize,
        span: Span,
    },

    /// Join segment that did not reduce to a string.
    #[error("`{callee}` segment {index} did not reduce to a string")]
    JoinArgumentType {
        callee: String,
        index: usize,
        span: Span,
    },
}

impl EvalError {
    /// Span of the node the failure points at.
    pub fn span(&self) -> Span {
        match self {
            EvalError::Unsupported { span, .. }
            | EvalError::UnboundIdentifier { span, .. }
            | EvalError::UnknownCall { span }
            | EvalError::JoinArity { span, .. }
            | EvalError::JoinArgumentType { span, .. } => *span,
        }
    }
}
