/*!

The tree-walking matcher. It walks a `Pattern` and a `Value` in lockstep, depth first, and either produces the
complete `Bindings` for the pattern or fails. There is no backtracking: each child either matches completely,
including its own nested captures, or the whole attempt fails and every capture made so far is discarded.

*/

use crate::{
  pattern::Pattern,
  value::Value
};

use super::Bindings;


/// Matches `pattern` against `value`. Returns `None` if it does not match.
pub fn match_pattern(pattern: &Pattern, value: &Value) -> Option<Bindings> {
  let mut bindings = Bindings::new();
  if match_into(pattern, value, &mut bindings) {
    Some(bindings)
  } else {
    // Whatever was captured before the failure is dropped with `bindings`.
    None
  }
}


fn match_into(pattern: &Pattern, value: &Value, bindings: &mut Bindings) -> bool {
  match pattern {

    Pattern::Type { record_type, children } => {
      let record = match value {
        Value::Record(record) if record.is_instance_of(record_type) => record,
        _ => return false,
      };
      if record.len() != children.len() {
        return false;
      }
      children.iter()
              .zip(record.iter())
              .all(|(child, field)| match_into(child, field, bindings))
    }

    Pattern::Binding(name) => {
      bindings.bind(*name, value.clone());
      true
    }

    Pattern::Wildcard => true,

  }
}


#[cfg(test)]
mod tests {
  use crate::{
    context::TypeContext,
    parsing::parse,
    record::RecordType
  };
  use super::*;

  struct Fixture {
    context: TypeContext,
    color  : RecordType,
    record : RecordType,
  }

  fn fixture() -> Fixture {
    let mut context = TypeContext::new();
    let color  = context.define("Color", ["red", "green", "blue"]).unwrap();
    let record = context.define("Record", ["color", "intensity"]).unwrap();
    Fixture { context, color, record }
  }

  #[test]
  fn wildcard_captures_nothing() {
    let f = fixture();
    let pattern = parse("Color(r, g, _)", &f.context).unwrap();
    let bindings = match_pattern(&pattern, &f.color.instance([1, 2, 3]).unwrap().into()).unwrap();

    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings["r"], Value::from(1));
    assert_eq!(bindings["g"], Value::from(2));
    assert!(!bindings.contains("b"));
  }

  #[test]
  fn nested_match_binds_every_name() {
    let f = fixture();
    let pattern = parse("Record(Color(r, g, b), intensity)", &f.context).unwrap();
    let color = f.color.instance([1, 2, 3]).unwrap();
    let value = f.record.instance([Value::from(color), Value::from(123)]).unwrap().into();

    let bindings = match_pattern(&pattern, &value).unwrap();
    assert_eq!(bindings.names(), pattern.binding_names());
    assert_eq!(bindings["intensity"], Value::from(123));
    assert_eq!(bindings["b"], Value::from(3));
  }

  #[test]
  fn binding_captures_whole_subvalue() {
    let f = fixture();
    let pattern = parse("Record(c, _)", &f.context).unwrap();
    let color = f.color.instance([1, 2, 3]).unwrap();
    let value = f.record.instance([Value::from(color.clone()), Value::from(0)]).unwrap().into();

    assert_eq!(match_pattern(&pattern, &value).unwrap()["c"], Value::from(color));
  }

  #[test]
  fn failure_in_late_child_discards_everything() {
    let f = fixture();
    let pattern = parse("Record(c, Color(r, g, b))", &f.context).unwrap();
    // The first child binds, then the second is not a `Color`.
    let value = f.record.instance([1, 2]).unwrap().into();
    assert_eq!(match_pattern(&pattern, &value), None);
  }

  #[test]
  fn type_mismatch() {
    let f = fixture();
    let pattern = parse("Record(Color(r, g, b), i)", &f.context).unwrap();
    let value = f.record.instance([321, 123]).unwrap().into();
    assert_eq!(match_pattern(&pattern, &value), None);
    assert_eq!(match_pattern(&pattern, &Value::from(5)), None);
  }

  #[test]
  fn arity_is_checked_against_the_value() {
    let f = fixture();
    // Under-specified: parses, but never matches a three-field `Color`.
    let pattern = parse("Color(r, g)", &f.context).unwrap();
    assert_eq!(match_pattern(&pattern, &f.color.instance([1, 2, 3]).unwrap().into()), None);
  }

  #[test]
  fn same_name_different_declaration_does_not_match() {
    let f = fixture();
    let pattern = parse("Color(r, g, b)", &f.context).unwrap();
    let impostor = RecordType::new("Color", ["red", "green", "blue"]).unwrap();
    assert_eq!(match_pattern(&pattern, &impostor.instance([1, 2, 3]).unwrap().into()), None);
  }

  #[test]
  #[should_panic(expected = "binding `x` bound twice in one pattern")]
  fn hand_built_duplicate_binding_panics() {
    let pair = RecordType::new("Pair", ["first", "second"]).unwrap();
    let pattern = Pattern::record(&pair, [Pattern::binding("x"), Pattern::binding("x")]);
    let _ = match_pattern(&pattern, &pair.instance([1, 2]).unwrap().into());
  }

  #[test]
  fn subtypes_match_parent_patterns() {
    let mut f = fixture();
    let bright = f.color.subtype("Bright").unwrap();
    f.context.register(&bright);

    let parent_pattern = parse("Color(r, _, _)", &f.context).unwrap();
    let child_pattern  = parse("Bright(r, _, _)", &f.context).unwrap();
    let plain: Value = f.color.instance([1, 2, 3]).unwrap().into();
    let shiny: Value = bright.instance([9, 9, 9]).unwrap().into();

    assert_eq!(match_pattern(&parent_pattern, &shiny).unwrap()["r"], Value::from(9));
    assert!(match_pattern(&child_pattern, &plain).is_none());
  }
}
