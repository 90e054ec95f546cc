/*!

Ordered-rule dispatch. Data carries no behavior; a transformation is a `RuleSet` mapping value shapes to handlers.

```ignore
let calc = RuleSet::<(), i64>::builder()
  .rule("Add(Num(a), Num(b))", |b, _| Ok(b["a"].expect_integer()? + b["b"].expect_integer()?))
  .rule("Add(a, b)",           |b, case| Ok(case.recurse(&b["a"])? + case.recurse(&b["b"])?))
  .rule("Num(n)",              |b, _| b["n"].expect_integer())
  .build(&context)?;
```

Rules are tried in the order they were added, and the first match wins. There is no notion of one pattern being
more specific than another other than that order. Handlers often dispatch again on sub-values through
`Case::recurse`; each such call is an independent dispatch that shares only the threaded state. Nothing bounds the
depth of that recursion except the thread's stack, so very deep structures can overflow it.

A built `RuleSet` is immutable, and is `Send + Sync`, so one rule set may serve dispatches on many threads at once.
The shared state is the caller's; the engine only passes it along.

*/

mod case;
mod lazy;
mod rule_set;

pub use case::Case;
pub use lazy::{LazyRuleSet, RuleSetInit};
pub use rule_set::{Handler, Otherwise, Rule, RuleSet, RuleSetBuilder};
