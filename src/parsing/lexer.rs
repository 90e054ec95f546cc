/*!

Minimal lexer for the pattern language. There are only four kinds of tokens: identifiers, `(`, `)`, and `,`.
Anything else is lexed as `Token::Unexpected` so the parser can report it in context. Whitespace between tokens is
insignificant.

*/

use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use regex::Regex;
use strum_macros::AsRefStr;


lazy_static! {
  // The crate is built without Unicode tables, so whitespace is spelled out instead of using `\s`: space, tab,
  // line feed, vertical tab, form feed, carriage return, and no-break space.
  static ref TOKEN_REGEX: Regex = Regex::new(concat!(
    r"\A[ \t\n\x0B\x0C\r\x{A0}]*",
    r"(?:(?P<name>[A-Za-z_][A-Za-z0-9_]*)|(?P<punct>[(),])|(?P<other>[0-9]+|[^ \t\n\x0B\x0C\r\x{A0}]))"
  )).unwrap();
}


#[derive(Clone, PartialEq, Eq, Debug, AsRefStr)]
pub enum Token {
  Name(String),
  LeftParen,
  RightParen,
  Comma,
  Unexpected(String),
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Token::Name(name)       => write!(f, "{}", name),
      Token::LeftParen        => write!(f, "("),
      Token::RightParen       => write!(f, ")"),
      Token::Comma            => write!(f, ","),
      Token::Unexpected(text) => write!(f, "{}", text),
    }
  }
}


/// A token together with the byte offset it starts at.
pub type Spanned = (usize, Token);


pub struct Lexer<'t> {
  text    : &'t str,
  position: usize,
  peeked  : Option<Option<Spanned>>,
}


impl<'t> Lexer<'t> {

  pub fn new(text: &'t str) -> Self {
    Lexer {
      text,
      position: 0,
      peeked  : None,
    }
  }

  pub fn peek(&mut self) -> Option<&Spanned> {
    if self.peeked.is_none() {
      let next = self.scan();
      self.peeked = Some(next);
    }
    match &self.peeked {
      Some(next) => next.as_ref(),
      None => None,
    }
  }

  fn scan(&mut self) -> Option<Spanned> {
    let rest     = &self.text[self.position..];
    let captures = TOKEN_REGEX.captures(rest)?;
    let whole    = captures.get(0)?;

    let (matched, token) =
        if let Some(name) = captures.name("name") {
          (name, Token::Name(name.as_str().to_string()))
        } else if let Some(punct) = captures.name("punct") {
          let token = match punct.as_str() {
            "(" => Token::LeftParen,
            ")" => Token::RightParen,
            _   => Token::Comma,
          };
          (punct, token)
        } else {
          let other = captures.name("other")?;
          (other, Token::Unexpected(other.as_str().to_string()))
        };

    let offset = self.position + matched.start();
    self.position += whole.end();
    Some((offset, token))
  }
}


impl<'t> Iterator for Lexer<'t> {
  type Item = Spanned;

  fn next(&mut self) -> Option<Self::Item> {
    match self.peeked.take() {
      Some(next) => next,
      None => self.scan(),
    }
  }
}
