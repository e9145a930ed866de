//! A parser and writer for the JSON->URL text encoding: a URL-safe
//! alternative rendering of the JSON data model that uses `(`, `)`, `,`,
//! and `:` as structural characters in place of percent-encoded brackets.
//!
//! ```
//! use jsonurl::{Value, parse};
//!
//! let v = parse("(name:'Bob+Smith',age:42,tags:(a,b))").unwrap();
//! let Value::Object(obj) = &v else { panic!("expected an object") };
//! assert_eq!(obj["name"], Value::String("Bob Smith".to_string()));
//! assert_eq!(obj["age"], Value::from(42i64));
//! ```

mod appender;
mod builder;
mod char_class;
mod encoder;
mod error;
mod factory;
mod literal;
mod number;
mod options;
mod parser;
mod percent;
mod value;

pub use encoder::{
    Strategy as StringEncodeStrategy, choose_strategy, choose_strategy_for, encode_implied_string_literal,
    encode_literal_string, encode_literal_string_for,
};
pub use error::{ParserError, SyntaxError, WriterError};
pub use factory::{ValueFactory, ValueKind};
pub use number::{BigMathConfig, BuildOptions, IntegerBoundary, Number, OverflowPolicy};
pub use options::{ImpliedComposite, Limits, Options};
pub use parser::Parser;
pub use value::{Array, Object, StdFactory, Value};

/// Parse `text` into the crate's built-in [`Value`] type, using default
/// [`Options`] and [`Limits`].
pub fn parse(text: &str) -> Result<Value, ParserError> {
    Parser::new(StdFactory).parse(text)
}

/// Parse `text` with caller-supplied [`Options`] and [`Limits`].
pub fn parse_with(text: &str, options: Options, limits: Limits) -> Result<Value, ParserError> {
    let mut parser = Parser::new(StdFactory);
    parser.options = options;
    parser.limits = limits;
    parser.parse(text)
}

/// Render `v` to JSON->URL text using default [`Options`].
pub fn to_string(v: &Value) -> Result<std::string::String, WriterError> {
    appender::to_string(v, Options::default())
}

/// Render `v` to JSON->URL text using caller-supplied [`Options`].
pub fn to_string_with(v: &Value, options: Options) -> Result<std::string::String, WriterError> {
    appender::to_string(v, options)
}

#[cfg(test)]
mod tests;
