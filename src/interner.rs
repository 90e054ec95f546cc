/*!
A global dictionary of interned strings. Provides an abstraction API for any interner library.

Binding names are interned, so comparing two of them is an integer comparison. Only names written in pattern text
are interned, which bounds the dictionary by the rules a program declares. String values are not interned. The
dictionary lives behind a `RwLock` so that compiled rule sets can be shared across threads.

*/

use std::sync::RwLock;

use lazy_static::lazy_static;
use string_interner::{
  StringInterner,
  symbol::SymbolU32
};

pub type InternedString = SymbolU32;

lazy_static! {
  static ref STRING_INTERNER: RwLock<StringInterner> = RwLock::new(StringInterner::default());
}


pub fn interned(string: &str) -> InternedString {
  // Fast path: most lookups hit strings that are already interned.
  if let Some(symbol) = get_interned(string) {
    return symbol;
  }
  let mut interner = match STRING_INTERNER.write() {
    Ok(guard) => guard,
    Err(poisoned) => poisoned.into_inner(),
  };
  interner.get_or_intern(string)
}


pub fn get_interned(string: &str) -> Option<InternedString> {
  let interner = match STRING_INTERNER.read() {
    Ok(guard) => guard,
    Err(poisoned) => poisoned.into_inner(),
  };
  interner.get(string)
}


/// The string `symbol` stands for. The guard is released before returning, so callers never format or call out
/// while holding the interner's lock. Symbols are only ever produced by `interned`, so an unknown symbol cannot occur
/// in practice; it resolves to the empty string.
pub fn resolve_string(symbol: InternedString) -> String {
  let interner = match STRING_INTERNER.read() {
    Ok(guard) => guard,
    Err(poisoned) => poisoned.into_inner(),
  };
  interner.resolve(symbol).unwrap_or("").to_string()
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn intern_is_idempotent() {
    let first  = interned("intensity");
    let second = interned("intensity");
    assert_eq!(first, second);
    assert_ne!(first, interned("color"));
    assert_eq!(resolve_string(first), "intensity");
  }

  #[test]
  fn get_does_not_intern() {
    assert_eq!(get_interned("never_interned_anywhere_else"), None);
    let symbol = interned("now_interned");
    assert_eq!(get_interned("now_interned"), Some(symbol));
  }
}
