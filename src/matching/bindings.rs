/*!

A `Bindings` is the binding environment one successful match produces: a map from capture names to the values they
matched. Patterns rarely bind more than a handful of names, so the entries live inline in a `SmallVec` in capture
order and lookup is a linear scan over interned symbols.

*/

use std::{
  fmt::{Display, Formatter},
  ops::Index
};

use smallvec::SmallVec;

use crate::{
  abstractions::HashMap,
  interner::{
    InternedString,
    get_interned,
    resolve_string
  },
  value::Value
};


#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
  entries: SmallVec<[(InternedString, Value); 4]>,
}


impl Bindings {

  pub fn new() -> Self {
    Bindings::default()
  }

  /// Records a capture. Parsed patterns never bind a name twice, but a `Pattern` built by hand can. Matching such a
  /// tree is a bug in the caller and panics in every build profile rather than returning ambiguous bindings.
  pub(crate) fn bind(&mut self, name: InternedString, value: Value) {
    if self.get_symbol(name).is_some() {
      panic!("binding `{}` bound twice in one pattern", resolve_string(name));
    }
    self.entries.push((name, value));
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    // A name that was never interned cannot have been bound.
    get_interned(name).and_then(|symbol| self.get_symbol(symbol))
  }

  pub fn get_symbol(&self, name: InternedString) -> Option<&Value> {
    self.entries
        .iter()
        .find(|(bound, _)| *bound == name)
        .map(|(_, value)| value)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The captures in the order the pattern binds them.
  pub fn iter(&self) -> impl Iterator<Item = (InternedString, &Value)> {
    self.entries.iter().map(|(name, value)| (*name, value))
  }

  pub fn names(&self) -> Vec<String> {
    self.entries.iter().map(|(name, _)| resolve_string(*name)).collect()
  }

  pub fn to_map(&self) -> HashMap<String, Value> {
    self.entries
        .iter()
        .map(|(name, value)| (resolve_string(*name), value.clone()))
        .collect()
  }
}


impl Index<&str> for Bindings {
  type Output = Value;

  fn index(&self, name: &str) -> &Self::Output {
    match self.get(name) {
      Some(value) => value,
      None => panic!("no binding named `{}`", name),
    }
  }
}


impl Display for Bindings {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let entries = self.entries
                      .iter()
                      .map(|(name, value)| format!("{}→{}", resolve_string(*name), value))
                      .collect::<Vec<String>>()
                      .join(", ");
    write!(f, "{{{}}}", entries)
  }
}
