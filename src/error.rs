/*!

Error types. Declaration-time errors (`DefinitionError`, `PatternError`) abort the declaration they occur in, so a
record type or rule set that failed to build never exists. `DispatchError` is the only error raised at run time.

A pattern that simply does not match a value is not an error. The matcher signals it with `None`.

*/

use strum_macros::{Display, EnumDiscriminants};
use thiserror::Error;

use crate::value::{Value, ValueKind};


/// An invalid record type declaration or an invalid record construction.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum DefinitionError {
  #[error("type name must start with an uppercase letter: {0:?}")]
  InvalidTypeName(String),

  #[error("type `{0}` must declare at least one field")]
  NoFields(String),

  #[error("type `{type_name}`: invalid field name {field:?}")]
  InvalidFieldName { type_name: String, field: String },

  #[error("type `{type_name}`: duplicate field `{field}`")]
  DuplicateField { type_name: String, field: String },

  #[error("type `{type_name}` has {expected} fields, got {found}")]
  Arity { type_name: String, expected: usize, found: usize },

  #[error("type `{type_name}` has no field `{field}`")]
  UnknownField { type_name: String, field: String },

  #[error("type `{type_name}`: no value given for field `{field}`")]
  MissingField { type_name: String, field: String },
}


/// A pattern that failed to compile.
#[derive(Error, Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(PatternErrorKind))]
#[strum_discriminants(derive(Display))]
pub enum PatternError {
  /// The token stream is malformed.
  #[error("syntax error in pattern `{pattern}` at offset {offset}: {message}")]
  Syntax { pattern: String, offset: usize, message: String },

  /// The text is well formed but names a type the type context does not know.
  #[error("unknown type `{name}` in pattern `{pattern}`")]
  Context { pattern: String, name: String },

  /// Two bindings in one pattern share a name.
  #[error("duplicate binding `{name}` in pattern `{pattern}`")]
  DuplicateBinding { pattern: String, name: String },
}

impl PatternError {
  pub fn kind(&self) -> PatternErrorKind {
    self.into()
  }

  /// The pattern text the error was found in.
  pub fn pattern(&self) -> &str {
    match self {
      | PatternError::Syntax { pattern, .. }
      | PatternError::Context { pattern, .. }
      | PatternError::DuplicateBinding { pattern, .. } => pattern.as_str(),
    }
  }
}


#[derive(Error, Clone, Debug, PartialEq)]
pub enum DispatchError {
  /// No rule matched and the rule set has no default handler. Carries the unmatched value.
  #[error("no case matches {0}")]
  MissingCase(Value),

  /// A handler expected a value of one kind and was given another.
  #[error("expected a value of kind {expected}, found {found}")]
  UnexpectedValue { expected: ValueKind, found: Value },

  /// A handler failed to construct a record.
  #[error(transparent)]
  Definition(#[from] DefinitionError),

  /// A lazily built rule set failed to compile and can never dispatch.
  #[error("rule set is unusable: {0}")]
  InvalidRuleSet(#[from] PatternError),

  /// A handler reported a failure of its own.
  #[error("{0}")]
  Handler(String),
}

impl DispatchError {
  pub fn unexpected(expected: ValueKind, found: &Value) -> DispatchError {
    DispatchError::UnexpectedValue { expected, found: found.clone() }
  }
}
