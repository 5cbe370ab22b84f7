//! condcfg - layered configuration with compiled `N`-conditions
//!
//! # Overview
//!
//! A [`Config`] holds values loaded from JSON or YAML, overridden by
//! environment variables and host-supplied flags. Values can be checked
//! against a [`Pattern`]: numbers with a small condition language over the
//! placeholder `N`, strings with a regular expression.
//!
//! # Quick Start
//!
//! ```
//! use condcfg::{Config, MapEnvironment, Pattern};
//!
//! let config = Config::from_json(r#"{"workers": 12, "name": "api-01"}"#)
//!     .unwrap()
//!     .with_environment(MapEnvironment::new());
//!
//! assert_eq!(config.int_and("workers", "N>=1&&N<=64"), Some(12));
//! assert_eq!(config.int_and("workers", "N%8==0"), None);
//! assert_eq!(config.string_and("name", "^[a-z]+-[0-9]+$").as_deref(), Some("api-01"));
//!
//! let pattern = Pattern::new("(N/100>0.3)&&(N/100<=0.8)");
//! assert!(pattern.validate_int(40));
//! assert!(!pattern.validate_int(81));
//! ```
//!
//! # Conditions
//!
//! Conditions are compiled once to Reverse Polish Notation by
//! [`condcfg_core`] and evaluated on a small stack machine. The operators are
//! `+ - * / %`, the comparisons `> < >= <= == !=`, the logical `&& ||` and a
//! `!` that negates a parenthesized group.

mod config;
mod environment;
mod error;
mod error_renderer;
mod format;
mod pattern;
mod value;

pub use config::Config;
pub use environment::{Environment, MapEnvironment, ProcessEnvironment};
pub use error::{ConfigError, PatternError};
pub use error_renderer::{
    error_code, render_error, render_error_to, render_error_to_string,
    render_error_to_string_no_color,
};
pub use format::Format;
pub use pattern::Pattern;
pub use value::Value;

// Re-export the condition compiler and VM
pub use condcfg_core::{
    ExecutionError, Instruction, Instructions, Operator, SyntaxError, SyntaxErrorKind, compile,
    evaluate,
};
