/*!

  A `Formatter` holds information about how to format a pattern, that is, how to express it as a string.

  "Formatting" needs to be distinct from Rust's standard `Display` trait, because patterns are formatted differently
  depending on the context: the input form is the pattern text a rule was declared with, while the full form spells
  out every node kind and is what the debug log prints.

*/

use strum_macros::{Display, EnumString};


#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString, Hash)]
pub enum DisplayForm {
  /// `Add(Num(a), _)`
  #[strum(serialize = "InputForm")]
  Input,
  /// `Type[Add](Type[Num](Bind[a]), Blank[])`
  #[strum(serialize = "FullForm")]
  Full,
}

impl Default for DisplayForm {
  fn default() -> DisplayForm {
    DisplayForm::Input
  }
}

/// Parameters used in methods that transform patterns into strings.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub struct Formatter {
  pub form: DisplayForm,
}

impl From<DisplayForm> for Formatter {
  fn from(form: DisplayForm) -> Self {
    Formatter {
      form
    }
  }
}

pub trait Formattable {
  fn format(&self, formatter: &Formatter) -> String;
}


macro_rules! display_formattable_impl {
  ($type_name:ty) => {
    impl std::fmt::Display for $type_name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(&$crate::format::Formatter::default()))
      }
    }
  }
}
pub(crate) use display_formattable_impl;


#[cfg(test)]
mod tests {
  use std::str::FromStr;
  use super::*;

  #[test]
  fn forms_parse_from_names() {
    assert_eq!(DisplayForm::from_str("FullForm"), Ok(DisplayForm::Full));
    assert_eq!(Formatter::default().form, DisplayForm::Input);
  }
}
