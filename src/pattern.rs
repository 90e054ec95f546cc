/*!

The compiled form of a pattern. A `Pattern` is an immutable tree built once by the parser and reused for every match
attempt. Type nodes hold the `RecordType` their name resolved to at compile time, so later changes to the
`TypeContext` never affect an existing pattern.

*/

use crate::{
  format::{
    display_formattable_impl,
    DisplayForm,
    Formattable,
    Formatter
  },
  interner::{
    InternedString,
    interned,
    resolve_string
  },
  record::RecordType
};

/// Child patterns of a type node. A `Pattern` contains its children, so they have to live on the heap.
pub type PatternList = Vec<Pattern>;


#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
  /// Matches an instance of `record_type` (or a subtype) whose fields match `children` positionally.
  Type {
    record_type: RecordType,
    children   : PatternList,
  },

  /// Matches anything and captures it under the name.
  Binding(InternedString),

  /// Matches anything and captures nothing.
  Wildcard,
}


impl Pattern {

  pub fn record<I>(record_type: &RecordType, children: I) -> Pattern
    where I: IntoIterator<Item = Pattern>
  {
    Pattern::Type {
      record_type: record_type.clone(),
      children   : children.into_iter().collect()
    }
  }

  pub fn binding(name: &str) -> Pattern {
    Pattern::Binding(interned(name))
  }

  /// The capture names of the pattern in left-to-right order.
  pub fn binding_names(&self) -> Vec<String> {
    let mut names = Vec::new();
    self.walk(&mut |node| {
      if let Pattern::Binding(name) = node {
        names.push(resolve_string(*name));
      }
    });
    names
  }

  /// The number of nodes in the tree. Matching is linear in this.
  pub fn node_count(&self) -> usize {
    let mut count = 0;
    self.walk(&mut |_| count += 1);
    count
  }

  /// Visits every node in pre-order.
  pub fn walk<F>(&self, visit: &mut F)
    where F: FnMut(&Pattern)
  {
    visit(self);
    if let Pattern::Type { children, .. } = self {
      for child in children.iter() {
        child.walk(visit);
      }
    }
  }
}


impl Formattable for Pattern {
  fn format(&self, formatter: &Formatter) -> String {
    match (self, formatter.form) {

      (Pattern::Type { record_type, children }, form) => {
        let children = children.iter()
                               .map(|child| child.format(formatter))
                               .collect::<Vec<String>>()
                               .join(", ");
        match form {
          DisplayForm::Input => format!("{}({})", record_type.name(), children),
          DisplayForm::Full  => format!("Type[{}]({})", record_type.name(), children),
        }
      }

      (Pattern::Binding(name), DisplayForm::Input) => resolve_string(*name),
      (Pattern::Binding(name), DisplayForm::Full)  => format!("Bind[{}]", resolve_string(*name)),

      (Pattern::Wildcard, DisplayForm::Input) => "_".to_string(),
      (Pattern::Wildcard, DisplayForm::Full)  => "Blank[]".to_string(),

    }
  }
}

display_formattable_impl!(Pattern);
