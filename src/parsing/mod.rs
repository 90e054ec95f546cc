/*!

Compiles pattern text into `Pattern` trees. The lexer splits the text into identifiers and punctuation; the parser
checks the grammar, resolves type names, and rejects duplicate bindings.

*/
mod parser;
mod lexer;

// Re-export `parse`.
pub use parser::parse;
