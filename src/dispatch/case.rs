/*!

A `Case` is what a handler sees besides its bindings: the value that was dispatched, the shared state, and a way to
dispatch again on the same rule set.

*/

use crate::{
  error::DispatchError,
  value::Value
};

use super::RuleSet;


pub struct Case<'a, S, R> {
  rule_set: &'a RuleSet<S, R>,
  value   : &'a Value,
  state   : &'a mut S,
}


impl<'a, S, R> Case<'a, S, R> {

  pub(crate) fn new(rule_set: &'a RuleSet<S, R>, value: &'a Value, state: &'a mut S) -> Self {
    Case { rule_set, value, state }
  }

  /// The value that was dispatched, as a whole.
  pub fn value(&self) -> &'a Value {
    self.value
  }

  /// The shared state threaded through the current chain of dispatches.
  pub fn state(&mut self) -> &mut S {
    &mut *self.state
  }

  pub fn rule_set(&self) -> &'a RuleSet<S, R> {
    self.rule_set
  }

  /// Dispatches `value` on the same rule set, passing the shared state along. Recursion depth is bounded only by
  /// the thread's stack.
  pub fn recurse(&mut self, value: &Value) -> Result<R, DispatchError> {
    self.rule_set.dispatch(value, &mut *self.state)
  }
}
