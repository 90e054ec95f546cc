/*!
Recursive descent parser for the pattern language:

```text
Pattern     := TypeName '(' PatternList ')'
PatternList := PatternElem (',' PatternElem)* [',']
PatternElem := Pattern | Binding | Wildcard
TypeName    := identifier starting with an uppercase letter
Binding     := identifier starting with a lowercase letter
Wildcard    := identifier starting with an underscore
```

Parsing runs in two passes. The first checks the grammar over the whole text; the second resolves type names against
the `TypeContext` and rejects duplicate bindings. A successfully parsed `Pattern` refers only to types that existed at
compile time, and malformed text is reported as a syntax error even when it also names an unknown type.

Arity is not checked here. It is a property of the value being matched, and a pattern with the wrong number of
children simply never matches.

Parsing happens once per rule, so the parser favors precise error messages over speed.

*/

use crate::{
  abstractions::HashSet,
  context::TypeContext,
  error::PatternError,
  interner::interned,
  logging::{
    log,
    Channel
  },
  pattern::{
    Pattern,
    PatternList
  },
  parsing::lexer::{
    Lexer,
    Token
  },
  format::{
    DisplayForm,
    Formattable
  }
};


/// Compiles `text` into a `Pattern`, resolving type names in `context`.
pub fn parse(text: &str, context: &TypeContext) -> Result<Pattern, PatternError> {
  let mut parser = PatternParser::new(text, context);

  match parser.parse() {

    Err(error) => {
      log(Channel::Error, 1, format!("Parse failed: {}", error).as_str());
      Err(error)
    }

    Ok(pattern) => {
      log(
        Channel::Debug,
        5,
        format!("Successfully parsed pattern: {}", pattern.format(&DisplayForm::Full.into())).as_str()
      );
      Ok(pattern)
    }

  }
}


/// A syntactically valid pattern whose type names are not resolved yet.
enum Syntax {
  Type {
    name    : String,
    children: Vec<Syntax>,
  },
  Binding(String),
  Wildcard,
}


struct PatternParser<'t, 'c> {
  text    : &'t str,
  lexer   : Lexer<'t>,
  context : &'c TypeContext,
  /// Binding names seen so far. A name may only be bound once per pattern.
  bindings: HashSet<String>,
}


impl<'t, 'c> PatternParser<'t, 'c> {

  fn new(text: &'t str, context: &'c TypeContext) -> Self {
    PatternParser {
      text,
      lexer: Lexer::new(text),
      context,
      bindings: HashSet::default(),
    }
  }

  /// Checks the grammar over the whole text first, then resolves names. A malformed pattern is always a syntax
  /// error, whatever names it mentions.
  fn parse(&mut self) -> Result<Pattern, PatternError> {
    let (offset, name) = self.expect_name()?;
    let tree = self.parse_type_body(offset, name)?;

    // The whole text must be consumed.
    if let Some((offset, token)) = self.lexer.next() {
      return Err(self.syntax_error(offset, format!("unexpected trailing input: {:?}", token.to_string())));
    }

    self.resolve(tree)
  }

  // region Grammar

  fn parse_type_body(&mut self, offset: usize, name: String) -> Result<Syntax, PatternError> {
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
      return Err(self.syntax_error(
        offset,
        format!("type name must start with an uppercase letter: {:?}", name)
      ));
    }

    self.expect_token(Token::LeftParen)?;

    let mut children = Vec::new();
    loop {
      children.push(self.parse_element()?);
      if !self.next_is(&Token::Comma) {
        break;
      }
      // A trailing comma before the closing parenthesis is allowed.
      if let Some((_, Token::RightParen)) = self.lexer.peek() {
        break;
      }
    }

    self.expect_token(Token::RightParen)?;
    log(Channel::Debug, 5, format!("Parsed type pattern {} with {} children", name, children.len()).as_str());

    Ok(Syntax::Type { name, children })
  }

  fn parse_element(&mut self) -> Result<Syntax, PatternError> {
    let (offset, name) = self.expect_name()?;

    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
      self.parse_type_body(offset, name)
    } else if name.starts_with('_') {
      Ok(Syntax::Wildcard)
    } else if name.starts_with(|c: char| c.is_ascii_lowercase()) {
      Ok(Syntax::Binding(name))
    } else {
      Err(self.syntax_error(
        offset,
        format!("binding name must start with a lowercase letter: {:?}", name)
      ))
    }
  }

  // endregion

  /// Resolves type names against the context and checks that no name is bound twice, left to right.
  fn resolve(&mut self, tree: Syntax) -> Result<Pattern, PatternError> {
    match tree {

      Syntax::Type { name, children } => {
        let record_type = match self.context.get(name.as_str()) {
          Some(record_type) => record_type.clone(),
          None => {
            return Err(PatternError::Context {
              pattern: self.text.to_string(),
              name
            });
          }
        };
        let children = children.into_iter()
                               .map(|child| self.resolve(child))
                               .collect::<Result<PatternList, PatternError>>()?;
        Ok(Pattern::Type { record_type, children })
      }

      Syntax::Binding(name) => {
        let symbol = interned(name.as_str());
        if !self.bindings.insert(name.clone()) {
          return Err(PatternError::DuplicateBinding {
            pattern: self.text.to_string(),
            name
          });
        }
        Ok(Pattern::Binding(symbol))
      }

      Syntax::Wildcard => Ok(Pattern::Wildcard),

    }
  }

  // region Token helpers

  fn expect_name(&mut self) -> Result<(usize, String), PatternError> {
    match self.lexer.next() {
      Some((offset, Token::Name(name))) => Ok((offset, name)),
      Some((offset, token)) => Err(self.syntax_error(offset, format!("expected name; got {:?}", token.to_string()))),
      None => Err(self.end_of_input("a name")),
    }
  }

  fn expect_token(&mut self, expected: Token) -> Result<(), PatternError> {
    match self.lexer.next() {
      Some((_, token)) if token == expected => Ok(()),
      Some((offset, token)) => {
        Err(self.syntax_error(offset, format!("expected '{}'; got {:?}", expected, token.to_string())))
      }
      None => Err(self.end_of_input(format!("'{}'", expected).as_str())),
    }
  }

  /// Consumes the next token if it is `token`.
  fn next_is(&mut self, token: &Token) -> bool {
    let found = matches!(self.lexer.peek(), Some((_, next)) if next == token);
    if found {
      self.lexer.next();
    }
    found
  }

  fn syntax_error(&self, offset: usize, message: String) -> PatternError {
    PatternError::Syntax {
      pattern: self.text.to_string(),
      offset,
      message
    }
  }

  fn end_of_input(&self, expected: &str) -> PatternError {
    self.syntax_error(self.text.len(), format!("unterminated pattern; expected {}", expected))
  }

  // endregion
}


#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  #[allow(unused_imports)]
  use crate::logging::set_verbosity;
  use crate::{
    error::PatternErrorKind,
    record::RecordType
  };
  use super::*;

  fn context() -> TypeContext {
    let mut context = TypeContext::new();
    context.define("Color", ["red", "green", "blue"]).unwrap();
    context.define("Record", ["color", "intensity"]).unwrap();
    context
  }

  fn parse_kind(text: &str) -> PatternErrorKind {
    match parse(text, &context()) {
      Ok(pattern) => panic!("expected {:?} to fail, parsed {}", text, pattern),
      Err(error) => error.kind(),
    }
  }

  #[test]
  fn nested_test() {
    set_verbosity(5);
    let context = context();
    let pattern = parse("Record(Color(r, g, b), intensity)", &context).unwrap();
    assert_eq!(pattern.to_string(), "Record(Color(r, g, b), intensity)");
    assert_eq!(pattern.binding_names(), ["r", "g", "b", "intensity"].map(String::from).to_vec());

    match &pattern {
      Pattern::Type { record_type, children } => {
        assert_eq!(record_type, context.get("Record").unwrap());
        assert_eq!(children.len(), 2);
      }
      other => panic!("expected a type pattern, got {}", other),
    }
  }

  #[test]
  fn whitespace_is_insignificant() {
    set_verbosity(5);
    let context = context();
    let spaced  = parse("  Color (\n r ,g,\t_ ) ", &context).unwrap();
    let compact = parse("Color(r,g,_)", &context).unwrap();
    let unusual = parse("Color(\u{0C}r,\u{0B}g,\u{A0}_)", &context).unwrap();
    assert_eq!(spaced, compact);
    assert_eq!(unusual, compact);
  }

  #[test]
  fn wildcard_test() {
    set_verbosity(5);
    let pattern = parse("Color(r, _, _ignored)", &context()).unwrap();
    assert_eq!(pattern.to_string(), "Color(r, _, _)");
    assert_eq!(pattern.binding_names(), vec!["r".to_string()]);
  }

  #[test]
  fn trailing_comma_test() {
    set_verbosity(5);
    let context = context();
    assert_eq!(parse("Record(a,)", &context).unwrap(), parse("Record(a)", &context).unwrap());
  }

  #[test]
  fn missing_rpar_test() {
    set_verbosity(5);
    assert_eq!(parse_kind("Record(a,"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record(a"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record("), PatternErrorKind::Syntax);
    assert_eq!(parse_kind(""), PatternErrorKind::Syntax);
  }

  #[test]
  fn unterminated_offset_is_end_of_text() {
    match parse("Record(a,", &context()) {
      Err(PatternError::Syntax { offset, .. }) => assert_eq!(offset, 9),
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  fn num_test() {
    set_verbosity(5);
    assert_eq!(parse_kind("Record(1)"), PatternErrorKind::Syntax);
  }

  #[test]
  fn malformed_token_streams() {
    set_verbosity(5);
    assert_eq!(parse_kind("record(a)"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record a"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record()"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record(a,,)"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record(a b)"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record(a) extra"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record(a, *)"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("a"), PatternErrorKind::Syntax);
  }

  #[test]
  fn unknown_type_test() {
    set_verbosity(5);
    assert_eq!(parse_kind("Record(Shade(a), b)"), PatternErrorKind::Context);
    assert_eq!(parse_kind("Missing(a)"), PatternErrorKind::Context);
  }

  #[test]
  fn malformed_text_with_unknown_type_is_a_syntax_error() {
    set_verbosity(5);
    assert_eq!(parse_kind("Shade(a,"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Shade a"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record(Shade(a) b)"), PatternErrorKind::Syntax);
    assert_eq!(parse_kind("Record(a, Shade("), PatternErrorKind::Syntax);
    // Well formed, so the unknown name is what gets reported.
    match parse("Record(Shade(a), b)", &context()) {
      Err(PatternError::Context { name, .. }) => assert_eq!(name, "Shade"),
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  fn duplicate_binding_test() {
    set_verbosity(5);
    assert_eq!(parse_kind("Record(Color(a, b, a), c)"), PatternErrorKind::DuplicateBinding);
    assert_eq!(parse_kind("Record(a, a"), PatternErrorKind::Syntax);
    // Wildcards never collide.
    assert!(parse("Color(_, _, _)", &context()).is_ok());
  }

  #[test]
  fn resolution_happens_at_parse_time() {
    let mut context = context();
    let pattern = parse("Color(r, g, b)", &context).unwrap();
    let original = context.get("Color").unwrap().clone();
    context.register(&RecordType::new("Color", ["r", "g", "b"]).unwrap());

    match pattern {
      Pattern::Type { record_type, .. } => assert_eq!(record_type, original),
      other => panic!("expected a type pattern, got {}", other),
    }
  }
}
