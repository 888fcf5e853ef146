// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![deny(
    anonymous_parameters,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![warn(bare_trait_objects, unreachable_pub, unused_qualifications)]

//! argparser is a library for command-line argument parsing. Programs declare
//! their flags with `FlagBuilder` and their positional arguments with
//! `PositionalArgument`, register them with a `ParserBuilder`, and then call
//! `Parser::parse` once. After a successful parse, values are read back
//! through the same handles that were registered.
//!
//! ```
//! use argparser::*;
//!
//! let verbose = FlagBuilder::new("-v", "Print more output.")
//!     .unwrap()
//!     .build();
//! let src = PositionalArgument::new("src", "The file to read.");
//! let parser = ParserBuilder::new("example")
//!     .add_flag(&verbose)
//!     .unwrap()
//!     .add_positional_argument(&src)
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(Outcome::Success, parser.parse(&["-v", "in.txt"]).unwrap());
//! assert!(verbose.has_appeared().unwrap());
//! assert_eq!("in.txt", src.value().unwrap());
//! ```

/// argument defines positional arguments.
pub mod argument;
/// error defines the errors this crate produces.
pub mod error;
/// flag defines the four kinds of flags, and the handles used to read their
/// values after parsing.
pub mod flag;
pub mod flag_builder;
/// logging provides a Logger implementation suitable for command-line
/// applications.
#[cfg(feature = "logging")]
pub mod logging;
/// main_impl provides the glue between a Parser and a program's main().
pub mod main_impl;
/// parser defines ParserBuilder and Parser, which bind command-line arguments
/// to the declared flags and positional arguments.
pub mod parser;

mod help;

#[cfg(test)]
mod tests;

// Re-export most commonly used symbols, to allow using this library with just
// one "use".

pub use self::argument::PositionalArgument;
pub use self::error::{AccessError, ConstructionError, Error, ParseError, Result};
pub use self::flag::{
    Flag, OptionalFlagWithDefaultValue, OptionalFlagWithValue, OptionalFlagWithoutValue,
    RequiredFlagWithValue,
};
pub use self::flag_builder::FlagBuilder;
pub use self::parser::{Outcome, Parser, ParserBuilder};
