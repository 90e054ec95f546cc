/*!

# Structural matching

Matching answers one question: does a value have the shape a `Pattern` describes, and if so, what did each binding
capture? There are two matchers with identical results.

  * `match_pattern` walks the pattern tree recursively. It is the reference matcher, and
    `MatchEngine::Tree` dispatches with it.
  * `Program` compiles the tree once into a flat instruction sequence for a small stack machine. Rule sets compile
    every rule this way, and `MatchEngine::Compiled` (the default) dispatches with it.

# Algorithm

Start state: bindings = Ø, subject = the whole value.

1. A type node matches if the subject is an instance of the node's type (or of a subtype) and has exactly as many
   fields as the node has children. The children are then matched against the fields, left to right.
2. A binding node matches anything and records subject ↦ name.
3. A wildcard matches anything and records nothing.

The first failing node fails the whole attempt, and the bindings collected so far are dropped. There is no
backtracking; at most one way to match exists, because no node can match a variable number of fields.

*/

mod bindings;
mod matcher;
mod program;

use strum_macros::{Display, EnumString};

pub use bindings::Bindings;
pub use matcher::match_pattern;
pub use program::{Instruction, Program};


/// Which matcher a rule set dispatches with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MatchEngine {
  /// Walk the pattern tree.
  Tree,
  /// Run the compiled stack machine program.
  Compiled,
}

impl Default for MatchEngine {
  fn default() -> Self {
    MatchEngine::Compiled
  }
}


#[cfg(test)]
mod tests {
  use std::str::FromStr;
  use super::*;

  #[test]
  fn engine_names() {
    assert_eq!(MatchEngine::from_str("tree"), Ok(MatchEngine::Tree));
    assert_eq!(MatchEngine::Compiled.to_string(), "compiled");
    assert_eq!(MatchEngine::default(), MatchEngine::Compiled);
  }
}
