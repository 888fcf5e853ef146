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

use thiserror::Error;

/// ConstructionError covers mistakes made while declaring flags, positional
/// arguments, or parsers. These are always raised before any parsing happens.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConstructionError {
    /// A short or long flag name didn't match the naming rules.
    #[error("Invalid flag name '{0}'")]
    InvalidName(String),
    /// A flag tried to use a name reserved for the built-in help flag.
    #[error("Reserved flag name '{0}'")]
    ReservedName(String),
    /// A flag's short or long name collides with an already registered flag.
    #[error("Flag '{0}' is already registered")]
    DuplicateFlag(String),
    /// The same positional argument was registered twice.
    #[error("Positional argument '{0}' is already registered")]
    DuplicatePositional(String),
    /// A flag or positional argument was already handed to another parser, or
    /// was already parsed.
    #[error("'{0}' has already been registered with a parser")]
    AlreadyUsed(String),
}

/// ParseError covers problems with the command-line arguments themselves. Any
/// of these aborts the whole parse, and nothing becomes readable.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    /// A token looked like a flag, but no such flag was declared.
    #[error("Unknown flag '{0}'")]
    UnknownFlag(String),
    /// A value-bearing flag was the last argument, so it has no value.
    #[error("Flag '{0}' provided without any value")]
    MissingValue(String),
    /// A value was found after every positional argument was already bound.
    #[error("Unexpected positional argument '{0}'")]
    UnexpectedPositional(String),
    /// A declared positional argument never received a value.
    #[error("Missing positional argument '{0}'")]
    MissingPositional(String),
    /// A flag declared with `must_appear` never appeared.
    #[error("No value provided for required flag '{0}'")]
    MissingRequiredFlag(String),
    /// A flag's converter rejected the raw value it was given.
    #[error("Invalid value '{value}' for flag '{flag}': {reason}")]
    InvalidValue {
        /// The flag token the value was given for, e.g. "--port".
        flag: String,
        /// The raw value which could not be converted.
        value: String,
        /// The converter's explanation.
        reason: String,
    },
}

/// AccessError is raised when reading flag or argument state at a point where
/// that state isn't meaningful. It always indicates a bug in the calling code
/// (or in this library), never bad user input.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AccessError {
    /// State was read before a successful call to `Parser::parse`.
    #[error("'{0}' has not been parsed yet; make sure Parser::parse succeeded first")]
    NotParsed(String),
    /// Parsing succeeded, but the state it left behind is inconsistent.
    #[error("Internal error: {0}")]
    InvariantViolation(String),
}

/// Error aggregates every kind of error this crate can produce.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// An error declaring flags, arguments, or parsers.
    #[error("{0}")]
    Construction(#[from] ConstructionError),
    /// An error in the command-line arguments being parsed.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// An error reading parsed state.
    #[error("{0}")]
    Access(#[from] AccessError),
}

/// A Result type which uses this crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
