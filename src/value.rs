/*!

The dynamic values pattern matching operates on. Leaves are primitives; the only compound value is a `Record`, an
instance of a declared `RecordType`. We use `EnumDiscriminants` from `strum` to derive the `ValueKind` enum whose
variants are only the names (no data) of the variants in `Value`.

Values are cheap to clone: a string's text and a record's fields live behind an `Arc`. Strings are owned by the
values that hold them and are freed with the last of them.

*/

use std::{
  fmt::{Display, Formatter},
  sync::Arc
};

use strum_macros::{Display as StrumDisplay, EnumDiscriminants, IntoStaticStr};

use crate::{
  error::DispatchError,
  record::Record
};


#[derive(Clone, Debug, PartialEq, IntoStaticStr, EnumDiscriminants)]
#[strum_discriminants(name(ValueKind))]
#[strum_discriminants(derive(StrumDisplay, Hash))]
pub enum Value {
  Nil,
  Boolean(bool),
  Integer(i64),
  Real(f64),
  String(Arc<str>),
  Record(Record),
}


impl Value {

  /// Reports the `ValueKind` of `self`.
  pub fn kind(&self) -> ValueKind {
    self.into()
  }

  pub fn string(text: &str) -> Value {
    Value::String(Arc::from(text))
  }

  pub fn is_nil(&self) -> bool {
    matches!(self, Value::Nil)
  }

  // region Checked accessors

  pub fn as_boolean(&self) -> Option<bool> {
    match self {
      Value::Boolean(b) => Some(*b),
      _ => None
    }
  }

  pub fn as_integer(&self) -> Option<i64> {
    match self {
      Value::Integer(n) => Some(*n),
      _ => None
    }
  }

  /// Integers widen to reals.
  pub fn as_real(&self) -> Option<f64> {
    match self {
      Value::Real(x) => Some(*x),
      Value::Integer(n) => Some(*n as f64),
      _ => None
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(text) => Some(&**text),
      _ => None
    }
  }

  pub fn as_record(&self) -> Option<&Record> {
    match self {
      Value::Record(record) => Some(record),
      _ => None
    }
  }

  // endregion

  // region Accessors for handlers
  // Handlers return `Result<_, DispatchError>`, so these let them use `?` on a value of the wrong kind.

  pub fn expect_boolean(&self) -> Result<bool, DispatchError> {
    self.as_boolean().ok_or_else(|| DispatchError::unexpected(ValueKind::Boolean, self))
  }

  pub fn expect_integer(&self) -> Result<i64, DispatchError> {
    self.as_integer().ok_or_else(|| DispatchError::unexpected(ValueKind::Integer, self))
  }

  pub fn expect_real(&self) -> Result<f64, DispatchError> {
    self.as_real().ok_or_else(|| DispatchError::unexpected(ValueKind::Real, self))
  }

  pub fn expect_str(&self) -> Result<&str, DispatchError> {
    self.as_str().ok_or_else(|| DispatchError::unexpected(ValueKind::String, self))
  }

  pub fn expect_record(&self) -> Result<&Record, DispatchError> {
    self.as_record().ok_or_else(|| DispatchError::unexpected(ValueKind::Record, self))
  }

  // endregion
}


impl Default for Value {
  fn default() -> Self {
    Value::Nil
  }
}


impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Nil         => write!(f, "Nil"),
      Value::Boolean(b)  => write!(f, "{}", b),
      Value::Integer(n)  => write!(f, "{}", n),
      Value::Real(x)     => write!(f, "{:?}", x),
      Value::String(s)   => write!(f, "{:?}", s),
      Value::Record(r)   => write!(f, "{}", r),
    }
  }
}


// region Conversions

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Boolean(b)
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Value::Integer(n)
  }
}

impl From<i32> for Value {
  fn from(n: i32) -> Self {
    Value::Integer(n.into())
  }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self {
    Value::Real(x)
  }
}

impl From<&str> for Value {
  fn from(text: &str) -> Self {
    Value::string(text)
  }
}

impl From<String> for Value {
  fn from(text: String) -> Self {
    Value::String(Arc::from(text))
  }
}

impl From<Record> for Value {
  fn from(record: Record) -> Self {
    Value::Record(record)
  }
}

impl From<()> for Value {
  fn from(_: ()) -> Self {
    Value::Nil
  }
}

// endregion
