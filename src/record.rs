/*!

Tagged records: immutable, fixed-arity, ordered tuples that know which declared type they are an instance of.

A `RecordType` is created once per declaration. Its identity is the declaration itself, not its name, so declaring
`Num(val)` twice yields two distinct types whose instances never compare equal. A type may be declared as a subtype of
another; the matcher accepts instances of a subtype wherever the parent type is expected.

*/

use std::{
  fmt::{Debug, Display, Formatter},
  hash::{Hash, Hasher},
  ops::Index,
  sync::Arc,
};

use crate::{
  abstractions::HashSet,
  error::DefinitionError,
  value::Value
};


struct RecordTypeData {
  name  : String,
  fields: Vec<String>,
  parent: Option<RecordType>,
}

/// A declared record type. Cloning is cheap and preserves identity.
#[derive(Clone)]
pub struct RecordType(Arc<RecordTypeData>);


fn is_identifier(text: &str) -> bool {
  let mut chars = text.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false
  }
}


impl RecordType {

  /// Declares a fresh record type. `name` must be an identifier starting with an uppercase letter; `fields` must be
  /// a non-empty sequence of distinct identifiers.
  pub fn new<I, F>(name: &str, fields: I) -> Result<RecordType, DefinitionError>
    where I: IntoIterator<Item = F>,
          F: Into<String>
  {
    RecordType::declare(name, fields.into_iter().map(Into::into).collect(), None)
  }

  /// Declares a fresh subtype of `self` with the same fields.
  pub fn subtype(&self, name: &str) -> Result<RecordType, DefinitionError> {
    RecordType::declare(name, self.0.fields.clone(), Some(self.clone()))
  }

  fn declare(name: &str, fields: Vec<String>, parent: Option<RecordType>)
    -> Result<RecordType, DefinitionError>
  {
    if !is_identifier(name) || !name.starts_with(|c: char| c.is_ascii_uppercase()) {
      return Err(DefinitionError::InvalidTypeName(name.to_string()));
    }
    if fields.is_empty() {
      return Err(DefinitionError::NoFields(name.to_string()));
    }

    let mut seen = HashSet::default();
    for field in fields.iter() {
      if !is_identifier(field) {
        return Err(DefinitionError::InvalidFieldName {
          type_name: name.to_string(),
          field    : field.clone()
        });
      }
      if !seen.insert(field.as_str()) {
        return Err(DefinitionError::DuplicateField {
          type_name: name.to_string(),
          field    : field.clone()
        });
      }
    }

    Ok(RecordType(Arc::new(RecordTypeData { name: name.to_string(), fields, parent })))
  }

  pub fn name(&self) -> &str {
    self.0.name.as_str()
  }

  pub fn fields(&self) -> &[String] {
    self.0.fields.as_slice()
  }

  pub fn arity(&self) -> usize {
    self.0.fields.len()
  }

  pub fn parent(&self) -> Option<&RecordType> {
    self.0.parent.as_ref()
  }

  pub fn field_index(&self, field: &str) -> Option<usize> {
    self.0.fields.iter().position(|f| f == field)
  }

  /// Is `self` the type `other` or a (transitive) subtype of it?
  pub fn is_subtype_of(&self, other: &RecordType) -> bool {
    let mut current = Some(self);
    while let Some(record_type) = current {
      if record_type == other {
        return true;
      }
      current = record_type.parent();
    }
    false
  }

  /// Creates an instance from positional values. The number of values must equal the arity.
  pub fn instance<I, V>(&self, values: I) -> Result<Record, DefinitionError>
    where I: IntoIterator<Item = V>,
          V: Into<Value>
  {
    let fields: Vec<Value> = values.into_iter().map(Into::into).collect();
    if fields.len() != self.arity() {
      return Err(DefinitionError::Arity {
        type_name: self.0.name.clone(),
        expected : self.arity(),
        found    : fields.len()
      });
    }
    Ok(Record { record_type: self.clone(), fields: fields.into() })
  }

  /// Creates an instance from `(field name, value)` pairs given in any order. Every field must be given exactly once.
  pub fn record_from_pairs<I, N, V>(&self, pairs: I) -> Result<Record, DefinitionError>
    where I: IntoIterator<Item = (N, V)>,
          N: AsRef<str>,
          V: Into<Value>
  {
    let mut slots: Vec<Option<Value>> = vec![None; self.arity()];
    for (name, value) in pairs {
      let name = name.as_ref();
      let index = self.field_index(name).ok_or_else(|| DefinitionError::UnknownField {
        type_name: self.0.name.clone(),
        field    : name.to_string()
      })?;
      if slots[index].replace(value.into()).is_some() {
        return Err(DefinitionError::DuplicateField {
          type_name: self.0.name.clone(),
          field    : name.to_string()
        });
      }
    }

    let mut fields = Vec::with_capacity(slots.len());
    for (slot, field) in slots.into_iter().zip(self.0.fields.iter()) {
      match slot {
        Some(value) => fields.push(value),
        None => {
          return Err(DefinitionError::MissingField {
            type_name: self.0.name.clone(),
            field    : field.clone()
          });
        }
      }
    }
    Ok(Record { record_type: self.clone(), fields: fields.into() })
  }
}


impl PartialEq for RecordType {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl Eq for RecordType {}

impl Hash for RecordType {
  fn hash<H: Hasher>(&self, state: &mut H) {
    (Arc::as_ptr(&self.0) as usize).hash(state);
  }
}

impl Debug for RecordType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}({})", self.0.name, self.0.fields.join(", "))
  }
}

impl Display for RecordType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0.name)
  }
}


/// An instance of a `RecordType`.
#[derive(Clone)]
pub struct Record {
  record_type: RecordType,
  fields     : Arc<[Value]>,
}


impl Record {

  pub fn record_type(&self) -> &RecordType {
    &self.record_type
  }

  pub fn type_name(&self) -> &str {
    self.record_type.name()
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  /// The field at position `index`.
  pub fn get(&self, index: usize) -> Option<&Value> {
    self.fields.get(index)
  }

  /// The field named `name`.
  pub fn field(&self, name: &str) -> Option<&Value> {
    self.record_type.field_index(name).and_then(|index| self.fields.get(index))
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Value> {
    self.fields.iter()
  }

  pub fn values(&self) -> &[Value] {
    &self.fields
  }

  /// Is `self` an instance of `record_type` or of one of its subtypes?
  pub fn is_instance_of(&self, record_type: &RecordType) -> bool {
    self.record_type.is_subtype_of(record_type)
  }
}


impl PartialEq for Record {
  fn eq(&self, other: &Self) -> bool {
    self.record_type == other.record_type && self.fields == other.fields
  }
}


impl Index<usize> for Record {
  type Output = Value;

  fn index(&self, index: usize) -> &Self::Output {
    &self.fields[index]
  }
}

impl Index<&str> for Record {
  type Output = Value;

  fn index(&self, name: &str) -> &Self::Output {
    match self.field(name) {
      Some(value) => value,
      None => panic!("type `{}` has no field `{}`", self.type_name(), name),
    }
  }
}

impl<'r> IntoIterator for &'r Record {
  type Item = &'r Value;
  type IntoIter = std::slice::Iter<'r, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.fields.iter()
  }
}


impl Display for Record {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let fields = self.record_type.fields()
                     .iter()
                     .zip(self.fields.iter())
                     .map(|(name, value)| format!("{}={}", name, value))
                     .collect::<Vec<String>>()
                     .join(", ");
    write!(f, "{}({})", self.type_name(), fields)
  }
}

impl Debug for Record {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn color() -> RecordType {
    RecordType::new("Color", ["red", "green", "blue"]).unwrap()
  }

  #[test]
  fn fields_by_position_and_name() {
    let color = color();
    let c = color.instance([1, 2, 3]).unwrap();
    assert_eq!(c.len(), 3);
    assert_eq!(c[0], Value::Integer(1));
    assert_eq!(c["green"], Value::Integer(2));
    assert_eq!(c.field("blue"), Some(&Value::Integer(3)));
    assert_eq!(c.field("alpha"), None);
    assert_eq!(c.iter().cloned().collect::<Vec<_>>(), vec![Value::from(1), Value::from(2), Value::from(3)]);
  }

  #[test]
  fn structural_equality() {
    let color = color();
    assert_eq!(color.instance([1, 2, 3]).unwrap(), color.instance([1, 2, 3]).unwrap());
    assert_ne!(color.instance([1, 2, 3]).unwrap(), color.instance([1, 2, 4]).unwrap());
  }

  #[test]
  fn redeclared_types_are_distinct() {
    let first  = color();
    let second = color();
    assert_ne!(first, second);
    assert_ne!(first.instance([1, 2, 3]).unwrap(), second.instance([1, 2, 3]).unwrap());
  }

  #[test]
  fn construction_by_field_name() {
    let color = color();
    let c = color.record_from_pairs([("blue", 3), ("red", 1), ("green", 2)]).unwrap();
    assert_eq!(c, color.instance([1, 2, 3]).unwrap());
    assert_eq!(
      color.record_from_pairs([("red", 1), ("green", 2)]),
      Err(DefinitionError::MissingField { type_name: "Color".into(), field: "blue".into() })
    );
    assert!(matches!(
      color.record_from_pairs([("red", 1), ("hue", 2)]),
      Err(DefinitionError::UnknownField { .. })
    ));
  }

  #[test]
  fn declaration_errors() {
    assert_eq!(
      RecordType::new("color", ["red"]).unwrap_err(),
      DefinitionError::InvalidTypeName("color".into())
    );
    assert_eq!(
      RecordType::new("Empty", Vec::<String>::new()).unwrap_err(),
      DefinitionError::NoFields("Empty".into())
    );
    assert!(matches!(
      RecordType::new("Pair", ["a", "a"]),
      Err(DefinitionError::DuplicateField { .. })
    ));
    assert!(matches!(
      RecordType::new("Pair", ["a", "1b"]),
      Err(DefinitionError::InvalidFieldName { .. })
    ));
    assert!(matches!(color().instance([1, 2]), Err(DefinitionError::Arity { expected: 3, found: 2, .. })));
  }

  #[test]
  fn subtypes() {
    let color = color();
    let bright = color.subtype("Bright").unwrap();
    let c = bright.instance([255, 255, 255]).unwrap();
    assert!(c.is_instance_of(&bright));
    assert!(c.is_instance_of(&color));
    assert!(!color.instance([0, 0, 0]).unwrap().is_instance_of(&bright));
    assert_ne!(c, color.instance([255, 255, 255]).unwrap());
  }

  #[test]
  fn display() {
    let num = RecordType::new("Num", ["val"]).unwrap();
    let add = RecordType::new("Add", ["lhs", "rhs"]).unwrap();
    let e = add.instance([num.instance([1]).unwrap(), num.instance([2]).unwrap()]).unwrap();
    assert_eq!(e.to_string(), "Add(lhs=Num(val=1), rhs=Num(val=2))");
  }
}
