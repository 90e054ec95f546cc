/*!

A context is a namespace. A `TypeContext` is the symbol table that pattern compilation resolves type names against.
It maps a name to the `RecordType` registered under it at the time a pattern is compiled. Registering a type under an
existing name shadows the old one for patterns compiled afterwards; patterns compiled earlier keep the type they
resolved.

*/

use crate::{
  abstractions::HashMap,
  error::DefinitionError,
  record::RecordType
};


#[derive(Clone, Default)]
pub struct TypeContext {
  types: HashMap<String, RecordType>,
}


impl TypeContext {

  pub fn new() -> Self {
    TypeContext::default()
  }

  /// Builds a context from the given types, each registered under its own name.
  pub fn with_types<'t, I>(types: I) -> Self
    where I: IntoIterator<Item = &'t RecordType>
  {
    let mut context = TypeContext::new();
    for record_type in types {
      context.register(record_type);
    }
    context
  }

  /// Registers `record_type` under its own name, returning the type it shadows, if any.
  pub fn register(&mut self, record_type: &RecordType) -> Option<RecordType> {
    self.register_as(record_type.name(), record_type)
  }

  /// Registers `record_type` under an alias.
  pub fn register_as(&mut self, name: &str, record_type: &RecordType) -> Option<RecordType> {
    self.types.insert(name.to_string(), record_type.clone())
  }

  /// Declares a fresh record type and registers it.
  pub fn define<I, F>(&mut self, name: &str, fields: I) -> Result<RecordType, DefinitionError>
    where I: IntoIterator<Item = F>,
          F: Into<String>
  {
    let record_type = RecordType::new(name, fields)?;
    self.register(&record_type);
    Ok(record_type)
  }

  pub fn get(&self, name: &str) -> Option<&RecordType> {
    self.types.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.types.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }
}
