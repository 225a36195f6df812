//! Static evaluation of module-loading call arguments.
//!
//! A call-rewriting transform needs to know what `require("./views/" + name)`
//! points at without running the module. This crate reduces one call
//! argument at a time against a fixed environment of ambient bindings
//! (the current file path and its directory) plus a recognized path-join
//! helper, and either produces the concrete value or says exactly why it
//! cannot. It never guesses: evaluation is all-or-nothing per expression,
//! and the fallback to raw source text is the caller's policy, not the
//! evaluator's.
//!
//! The host parser owns the real syntax tree. Before asking for an
//! evaluation it lowers each argument into the closed [`Expr`] form defined
//! here, keeping byte spans so failures point back into the source.
//!
//! # Example
//!
//! ```
//! use xform_eval::{evaluate, EvalEnv, Expr, Span, Value};
//!
//! // __dirname + "/lib", as lowered from `require(__dirname + "/lib")`
//! let arg = Expr::add(
//!     Expr::ident("__dirname", Span::new(8, 17)),
//!     Expr::string("/lib", Span::new(20, 26)),
//!     Span::new(8, 26),
//! );
//! let env = EvalEnv::for_file("/srv/app/index.js");
//! assert_eq!(evaluate(&arg, &env), Ok(Value::Str("/srv/app/lib".into())));
//! ```

pub mod ast;
pub mod env;
pub mod error;
pub mod eval;
pub mod require;

pub use ast::{Expr, Span};
pub use env::EvalEnv;
pub use error::{EvalError, Result};
pub use eval::{Value, evaluate};
pub use require::{EvalOptions, RequireArguments, evaluate_require_arguments};
