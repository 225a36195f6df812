//! Expression nodes handed over by the host parser.
//!
//! The variant set is closed: exactly the shapes the evaluator has a rule
//! for, plus [`Expr::Unsupported`] as the catchall. Anything the host
//! parser sees beyond these (a ternary, a template string) is lowered
//! into the catchall with the parser's own label, so a failure can name
//! what it saw. Nodes are immutable; the evaluator only reads them, and
//! rewriting stays with the host.

use std::fmt;

/// Byte range of a node in the host source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The source text this span covers.
    ///
    /// # Panics
    ///
    /// Panics if the span does not fall on character boundaries inside
    /// `source`, which means the nodes were built against a different file.
    pub fn text(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A call-argument expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// String literal: `"./views"`.
    Str { value: String, span: Span },
    /// Numeric literal: `2`, `1.5`.
    Num { value: f64, span: Span },
    /// Identifier reference: `__dirname`.
    Ident { name: String, span: Span },
    /// Property access: `path.join`.
    Member {
        object: Box<Expr>,
        property: String,
        span: Span,
    },
    /// Binary `+`: `"./locales/" + lang`. The only binary operator with an
    /// evaluation rule; hosts lower every other operator to
    /// [`Expr::Unsupported`].
    Add {
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// Call: `path.join(__dirname, "lib")`.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
    /// Any construct without an evaluation rule. `kind` is the host
    /// parser's label for the node (`"ConditionalExpression"`, ...).
    Unsupported { kind: String, span: Span },
}

impl Expr {
    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Expr::Str {
            value: value.into(),
            span,
        }
    }

    pub fn number(value: f64, span: Span) -> Self {
        Expr::Num { value, span }
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Expr::Ident {
            name: name.into(),
            span,
        }
    }

    pub fn member(object: Expr, property: impl Into<String>, span: Span) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
            span,
        }
    }

    pub fn add(left: Expr, right: Expr, span: Span) -> Self {
        Expr::Add {
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>, span: Span) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
            span,
        }
    }

    pub fn unsupported(kind: impl Into<String>, span: Span) -> Self {
        Expr::Unsupported {
            kind: kind.into(),
            span,
        }
    }

    /// Source span of this node.
    pub fn span(&self) -> Span {
        match self {
            Expr::Str { span, .. }
            | Expr::Num { span, .. }
            | Expr::Ident { span, .. }
            | Expr::Member { span, .. }
            | Expr::Add { span, .. }
            | Expr::Call { span, .. }
            | Expr::Unsupported { span, .. } => *span,
        }
    }
}
