/*!

A pattern compiled to a flat instruction sequence and run on a small stack machine. This is the matcher rule sets use
by default. It produces exactly the same result as `match_pattern` on every input; it just avoids the recursion and
pointer chasing of walking the tree.

The machine starts with the subject value on the stack. Compiling a type node emits

```text
TypeCheck(type)   ; fail unless the top of the stack is an instance of `type`
Enter(arity)      ; fail unless it has `arity` fields; push them, first field on top
  …children…      ; each child consumes exactly one stack slot
Exit              ; pop the record itself
```

a binding emits `Capture(name)`, which pops the top value into the bindings, and a wildcard emits `Skip`, which pops
it and discards it.

*/

use smallvec::SmallVec;

use crate::{
  format::{
    display_formattable_impl,
    DisplayForm,
    Formattable,
    Formatter
  },
  interner::{
    InternedString,
    resolve_string
  },
  pattern::Pattern,
  record::RecordType,
  value::Value
};

use super::Bindings;


#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
  TypeCheck(RecordType),
  Enter(usize),
  Exit,
  Skip,
  Capture(InternedString),
}


#[derive(Clone, Debug, PartialEq)]
pub struct Program {
  code     : Vec<Instruction>,
  /// The deepest the value stack gets while running.
  max_stack: usize,
}


impl Program {

  pub fn compile(pattern: &Pattern) -> Program {
    let mut code = Vec::with_capacity(pattern.node_count() * 2);
    let mut max_stack = 1;
    emit(pattern, 1, &mut code, &mut max_stack);
    Program { code, max_stack }
  }

  pub fn instructions(&self) -> &[Instruction] {
    self.code.as_slice()
  }

  pub fn max_stack(&self) -> usize {
    self.max_stack
  }

  /// Runs the program against `value`. Returns `None` if it does not match.
  pub fn run(&self, value: &Value) -> Option<Bindings> {
    let mut stack: SmallVec<[&Value; 16]> = SmallVec::with_capacity(self.max_stack);
    let mut bindings = Bindings::new();
    stack.push(value);

    for instruction in self.code.iter() {
      match instruction {

        Instruction::TypeCheck(record_type) => {
          match stack.last() {
            Some(Value::Record(record)) if record.is_instance_of(record_type) => {}
            _ => return None,
          }
        }

        Instruction::Enter(arity) => {
          // Copy the reference out so the fields borrow from `value`, not from the stack.
          let top: &Value = *stack.last()?;
          let record = match top {
            Value::Record(record) => record,
            _ => return None,
          };
          if record.len() != *arity {
            return None;
          }
          // Reversed, so the first field is on top and is consumed first.
          stack.extend(record.iter().rev());
        }

        Instruction::Exit
        | Instruction::Skip => {
          stack.pop()?;
        }

        Instruction::Capture(name) => {
          let captured = stack.pop()?;
          bindings.bind(*name, captured.clone());
        }

      }
    }

    Some(bindings)
  }
}


/// Appends the code for `pattern`, whose subject sits at stack depth `depth`.
fn emit(pattern: &Pattern, depth: usize, code: &mut Vec<Instruction>, max_stack: &mut usize) {
  match pattern {

    Pattern::Type { record_type, children } => {
      code.push(Instruction::TypeCheck(record_type.clone()));
      code.push(Instruction::Enter(children.len()));
      *max_stack = (*max_stack).max(depth + children.len());
      // After Enter the i-th child's subject is at depth + (len - i); earlier children are popped by then.
      for (index, child) in children.iter().enumerate() {
        emit(child, depth + children.len() - index, code, max_stack);
      }
      code.push(Instruction::Exit);
    }

    Pattern::Binding(name) => code.push(Instruction::Capture(*name)),

    Pattern::Wildcard => code.push(Instruction::Skip),

  }
}


impl Formattable for Instruction {
  fn format(&self, formatter: &Formatter) -> String {
    match (self, formatter.form) {
      (Instruction::TypeCheck(record_type), _) => format!("TypeCheck {}", record_type.name()),
      (Instruction::Enter(arity), _)           => format!("Enter {}", arity),
      (Instruction::Exit, _)                   => "Exit".to_string(),
      (Instruction::Skip, _)                   => "Skip".to_string(),
      (Instruction::Capture(name), DisplayForm::Input) => format!("Capture {}", resolve_string(*name)),
      (Instruction::Capture(name), DisplayForm::Full)  => format!("Capture {} (#{:?})", resolve_string(*name), name),
    }
  }
}

display_formattable_impl!(Instruction);


impl Formattable for Program {
  fn format(&self, formatter: &Formatter) -> String {
    self.code
        .iter()
        .map(|instruction| instruction.format(formatter))
        .collect::<Vec<String>>()
        .join("; ")
  }
}

display_formattable_impl!(Program);


#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use crate::{
    context::TypeContext,
    matching::match_pattern,
    parsing::parse
  };
  use super::*;

  fn context() -> TypeContext {
    let mut context = TypeContext::new();
    context.define("Add", ["lhs", "rhs"]).unwrap();
    context.define("Num", ["val"]).unwrap();
    context.define("Color", ["red", "green", "blue"]).unwrap();
    context
  }

  fn num(context: &TypeContext, n: i64) -> Value {
    context.get("Num").unwrap().instance([n]).unwrap().into()
  }

  fn add(context: &TypeContext, lhs: Value, rhs: Value) -> Value {
    context.get("Add").unwrap().instance([lhs, rhs]).unwrap().into()
  }

  #[test]
  fn compiled_code_listing() {
    let program = Program::compile(&parse("Add(Num(a), _)", &context()).unwrap());
    assert_eq!(
      program.to_string(),
      "TypeCheck Add; Enter 2; TypeCheck Num; Enter 1; Capture a; Exit; Skip; Exit"
    );
    assert_eq!(program.max_stack(), 4);
  }

  #[test]
  fn agrees_with_tree_matcher() {
    let context = context();
    let patterns = [
      "Add(Num(a), Num(b))",
      "Add(a, b)",
      "Add(Add(a, _), Num(n))",
      "Num(n)",
      "Add(_, _)",
      "Add(Num(a))",
      "Color(r, g, _)",
    ];
    let values = [
      add(&context, num(&context, 1), num(&context, 2)),
      add(&context, add(&context, num(&context, 1), num(&context, 3)), num(&context, 2)),
      add(&context, Value::from(1), Value::from("x")),
      num(&context, 4),
      Value::from(4),
      context.get("Color").unwrap().instance([1, 2, 3]).unwrap().into(),
    ];

    for text in patterns.iter() {
      let pattern = parse(text, &context).unwrap();
      let program = Program::compile(&pattern);
      for value in values.iter() {
        assert_eq!(program.run(value), match_pattern(&pattern, value), "{} against {}", text, value);
      }
    }
  }

  #[test]
  #[should_panic(expected = "binding `x` bound twice in one pattern")]
  fn hand_built_duplicate_binding_panics() {
    let pair = RecordType::new("Pair", ["first", "second"]).unwrap();
    let program = Program::compile(&Pattern::record(&pair, [Pattern::binding("x"), Pattern::binding("x")]));
    let _ = program.run(&pair.instance([1, 2]).unwrap().into());
  }

  #[test]
  fn nested_captures() {
    let context = context();
    let program = Program::compile(&parse("Add(Add(a, _), Num(n))", &context).unwrap());
    let value = add(&context, add(&context, num(&context, 1), num(&context, 3)), num(&context, 2));

    let bindings = program.run(&value).unwrap();
    assert_eq!(bindings["a"], num(&context, 1));
    assert_eq!(bindings["n"], Value::from(2));
    assert_eq!(bindings.len(), 2);
  }
}
