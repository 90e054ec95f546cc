/*!

Rule sets and the first-match-wins dispatch loop.

A `RuleSet` is built once from an ordered list of `(pattern text, handler)` pairs. The order rules are added to the
builder is their priority: a specific pattern added before a general one wins on inputs both match. Every pattern is
parsed and compiled when the rule set is built, so a rule set with a bad pattern never exists.

*/

use crate::{
  context::TypeContext,
  error::{
    DispatchError,
    PatternError
  },
  format::{
    DisplayForm,
    Formattable
  },
  logging::{
    log,
    verbosity_is_at_least,
    Channel
  },
  matching::{
    match_pattern,
    Bindings,
    MatchEngine,
    Program
  },
  parsing::parse,
  pattern::Pattern,
  value::Value
};

use super::Case;


/// The signature of a rule's handler: the captures of the matching pattern and the case being dispatched.
pub type Handler<S, R> =
  Box<dyn Fn(&Bindings, &mut Case<'_, S, R>) -> Result<R, DispatchError> + Send + Sync>;

/// The signature of the default handler, called when no rule matches.
pub type Otherwise<S, R> =
  Box<dyn Fn(&mut Case<'_, S, R>) -> Result<R, DispatchError> + Send + Sync>;


pub struct Rule<S, R> {
  pattern: Pattern,
  program: Program,
  handler: Handler<S, R>,
}

impl<S, R> Rule<S, R> {

  pub fn pattern(&self) -> &Pattern {
    &self.pattern
  }

  pub fn program(&self) -> &Program {
    &self.program
  }

  fn try_match(&self, engine: MatchEngine, value: &Value) -> Option<Bindings> {
    match engine {
      MatchEngine::Tree     => match_pattern(&self.pattern, value),
      MatchEngine::Compiled => self.program.run(value),
    }
  }
}


/// An ordered collection of rules plus an optional default handler.
pub struct RuleSet<S = (), R = Value> {
  rules    : Vec<Rule<S, R>>,
  otherwise: Option<Otherwise<S, R>>,
  engine   : MatchEngine,
}


impl<S, R> RuleSet<S, R> {

  pub fn builder() -> RuleSetBuilder<S, R> {
    RuleSetBuilder::new()
  }

  /// Tries each rule in order and runs the handler of the first one whose pattern matches `value`. If none matches,
  /// runs the default handler, or fails with `DispatchError::MissingCase` if there is none.
  pub fn dispatch(&self, value: &Value, state: &mut S) -> Result<R, DispatchError> {
    for (index, rule) in self.rules.iter().enumerate() {
      if let Some(bindings) = rule.try_match(self.engine, value) {
        if verbosity_is_at_least(4) {
          log(
            Channel::Debug,
            4,
            format!("Rule {} `{}` matched {} with {}", index, rule.pattern, value, bindings).as_str()
          );
        }
        let mut case = Case::new(self, value, state);
        return (rule.handler)(&bindings, &mut case);
      }
    }

    match &self.otherwise {

      Some(otherwise) => {
        if verbosity_is_at_least(4) {
          log(Channel::Debug, 4, format!("No rule matched {}. Running default handler.", value).as_str());
        }
        let mut case = Case::new(self, value, state);
        otherwise(&mut case)
      }

      None => {
        log(Channel::Debug, 4, format!("No rule matched {} and there is no default handler.", value).as_str());
        Err(DispatchError::MissingCase(value.clone()))
      }

    }
  }

  /// The index of the first rule matching `value`, with its bindings. Runs no handler.
  pub fn find_rule(&self, value: &Value) -> Option<(usize, Bindings)> {
    self.rules
        .iter()
        .enumerate()
        .find_map(|(index, rule)| rule.try_match(self.engine, value).map(|bindings| (index, bindings)))
  }

  pub fn rules(&self) -> &[Rule<S, R>] {
    self.rules.as_slice()
  }

  /// The patterns in priority order.
  pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
    self.rules.iter().map(|rule| &rule.pattern)
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  pub fn has_default(&self) -> bool {
    self.otherwise.is_some()
  }

  pub fn engine(&self) -> MatchEngine {
    self.engine
  }
}


impl<R> RuleSet<(), R> {
  /// Dispatches on a rule set that has no shared state.
  pub fn call(&self, value: &Value) -> Result<R, DispatchError> {
    self.dispatch(value, &mut ())
  }
}


/// Collects rules in priority order. Nothing is parsed until `build`.
pub struct RuleSetBuilder<S, R> {
  rules    : Vec<(String, Handler<S, R>)>,
  otherwise: Option<Otherwise<S, R>>,
  engine   : MatchEngine,
}


impl<S, R> RuleSetBuilder<S, R> {

  pub fn new() -> Self {
    RuleSetBuilder {
      rules    : Vec::new(),
      otherwise: None,
      engine   : MatchEngine::default(),
    }
  }

  /// Appends a rule. Rules added earlier take priority over rules added later.
  pub fn rule<F>(mut self, pattern: &str, handler: F) -> Self
    where F: Fn(&Bindings, &mut Case<'_, S, R>) -> Result<R, DispatchError> + Send + Sync + 'static
  {
    self.rules.push((pattern.to_string(), Box::new(handler)));
    self
  }

  /// Sets the handler run when no rule matches. Replaces any previous default handler.
  pub fn otherwise<F>(mut self, handler: F) -> Self
    where F: Fn(&mut Case<'_, S, R>) -> Result<R, DispatchError> + Send + Sync + 'static
  {
    self.otherwise = Some(Box::new(handler));
    self
  }

  pub fn engine(mut self, engine: MatchEngine) -> Self {
    self.engine = engine;
    self
  }

  /// Parses and compiles every pattern against `context`. The first bad pattern aborts the build.
  pub fn build(self, context: &TypeContext) -> Result<RuleSet<S, R>, PatternError> {
    let mut rules = Vec::with_capacity(self.rules.len());

    for (text, handler) in self.rules {
      let pattern = parse(text.as_str(), context)?;
      let program = Program::compile(&pattern);
      log(
        Channel::Debug,
        5,
        format!("Compiled rule {} `{}`: {}", rules.len(), pattern.format(&DisplayForm::Full.into()), program).as_str()
      );
      rules.push(Rule { pattern, program, handler });
    }

    Ok(RuleSet {
      rules,
      otherwise: self.otherwise,
      engine   : self.engine,
    })
  }
}

impl<S, R> Default for RuleSetBuilder<S, R> {
  fn default() -> Self {
    RuleSetBuilder::new()
  }
}
