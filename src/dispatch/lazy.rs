/*!

A rule set that is built on first use. The build runs at most once, even when the first dispatches race on several
threads; every later dispatch reuses the result. A build that fails is remembered too, and every dispatch on it
reports the pattern error.

```ignore
fn calculator() -> Result<RuleSet<(), i64>, PatternError> { … }

static CALC: LazyRuleSet<(), i64> = LazyRuleSet::new(calculator);

let two = CALC.call(&expression)?;
```

*/

use std::sync::OnceLock;

use crate::{
  error::{
    DispatchError,
    PatternError
  },
  logging::{
    log,
    Channel
  },
  value::Value
};

use super::RuleSet;


pub type RuleSetInit<S, R> = fn() -> Result<RuleSet<S, R>, PatternError>;


pub struct LazyRuleSet<S, R> {
  cell: OnceLock<Result<RuleSet<S, R>, PatternError>>,
  init: RuleSetInit<S, R>,
}


impl<S, R> LazyRuleSet<S, R> {

  pub const fn new(init: RuleSetInit<S, R>) -> Self {
    LazyRuleSet {
      cell: OnceLock::new(),
      init,
    }
  }

  /// The rule set, building it if this is the first use.
  pub fn get(&self) -> Result<&RuleSet<S, R>, PatternError> {
    let built = self.cell.get_or_init(|| {
      log(Channel::Debug, 4, "Building rule set on first use.");
      (self.init)()
    });
    match built {
      Ok(rule_set) => Ok(rule_set),
      Err(error) => Err(error.clone()),
    }
  }

  pub fn is_built(&self) -> bool {
    self.cell.get().is_some()
  }

  pub fn dispatch(&self, value: &Value, state: &mut S) -> Result<R, DispatchError> {
    self.get()?.dispatch(value, state)
  }
}


impl<R> LazyRuleSet<(), R> {
  pub fn call(&self, value: &Value) -> Result<R, DispatchError> {
    self.dispatch(value, &mut ())
  }
}
