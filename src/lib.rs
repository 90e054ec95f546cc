/*!

Tagged records and ordered, first-match-wins structural pattern dispatch.

Record types are declared at run time with an ordered list of field names. A rule set maps pattern texts such as
`Add(Num(a), _)` to handlers; dispatching a value runs the handler of the first rule whose pattern describes the
value's shape, passing it whatever the pattern's bindings captured.

```ignore
let mut context = TypeContext::new();
let add = context.define("Add", ["lhs", "rhs"])?;
let num = context.define("Num", ["val"])?;

let calc = RuleSet::<(), i64>::builder()
  .rule("Add(a, b)", |b, case| Ok(case.recurse(&b["a"])? + case.recurse(&b["b"])?))
  .rule("Num(n)",    |b, _| b["n"].expect_integer())
  .build(&context)?;

let three = add.instance([num.instance([1])?, num.instance([2])?])?;
assert_eq!(calc.call(&three.into())?, 3);
```

Set the `ADTMATCH_VERBOSITY` environment variable (or call `logging::set_verbosity`) to watch parsing, matching,
and dispatch.

*/

mod abstractions;
mod context;
mod dispatch;
mod error;
mod format;
mod interner;
mod matching;
mod parsing;
mod pattern;
mod record;
mod value;
pub mod logging;

pub use context::TypeContext;
pub use dispatch::{
  Case,
  Handler,
  LazyRuleSet,
  Otherwise,
  Rule,
  RuleSet,
  RuleSetBuilder,
  RuleSetInit
};
pub use error::{
  DefinitionError,
  DispatchError,
  PatternError,
  PatternErrorKind
};
pub use format::{DisplayForm, Formatter, Formattable};
pub use matching::{
  match_pattern,
  Bindings,
  Instruction,
  MatchEngine,
  Program
};
pub use parsing::parse;
pub use pattern::{Pattern, PatternList};
pub use record::{Record, RecordType};
pub use value::{Value, ValueKind};
