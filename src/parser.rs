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

use crate::argument::{ArgumentState, PositionalArgument};
use crate::error::*;
use crate::flag::{Flag, FlagRecord, HELP_LONG_NAME, HELP_SHORT_NAME};
use crate::help::Usage;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::collections::HashMap;
use std::rc::Rc;

lazy_static! {
    static ref SHORT_FLAG_RE: Regex = Regex::new(r"^-(?P<name>[a-zA-Z0-9])$").unwrap();
    static ref LONG_FLAG_RE: Regex = Regex::new(r"^--(?P<name>[a-zA-Z0-9_]{2,})$").unwrap();
}

/// Token is the classification of a single command-line argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Token<'a> {
    /// "-x": a flag identified by its short name.
    Short(char),
    /// "--name": a flag identified by its long name.
    Long(&'a str),
    /// Anything else is a value for the next positional argument.
    Positional(&'a str),
}

pub(crate) fn classify(arg: &str) -> Token<'_> {
    if let Some(name) = SHORT_FLAG_RE
        .captures(arg)
        .and_then(|c| c.name("name"))
        .and_then(|m| m.as_str().chars().next())
    {
        return Token::Short(name);
    }
    if let Some(name) = LONG_FLAG_RE.captures(arg).and_then(|c| c.name("name")) {
        return Token::Long(name.as_str());
    }
    Token::Positional(arg)
}

fn is_help_request(arg: &str) -> bool {
    match classify(arg) {
        Token::Short(name) => name == HELP_SHORT_NAME,
        Token::Long(name) => name == HELP_LONG_NAME,
        Token::Positional(_) => false,
    }
}

/// Outcome describes how a successful call to `Parser::parse` ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Help was requested with "-h" or "--help". Nothing was bound or
    /// validated; the contained text is the program's usage, which the caller
    /// should print before exiting.
    Help(String),
    /// All arguments were bound and validated. Every registered flag and
    /// positional argument is now readable.
    Success,
}

/// ParserBuilder collects flag and positional argument declarations, and
/// checks that they are consistent with one another.
#[derive(Debug)]
pub struct ParserBuilder {
    program_name: String,
    program_description: Option<String>,
    flags: Vec<Rc<FlagRecord>>,
    positional_arguments: Vec<Rc<ArgumentState>>,
}

impl ParserBuilder {
    /// Start building a parser for the program with the given name.
    pub fn new(program_name: &str) -> Self {
        ParserBuilder {
            program_name: program_name.to_owned(),
            program_description: None,
            flags: vec![],
            positional_arguments: vec![],
        }
    }

    /// Set the description printed under the usage line.
    pub fn set_program_description(mut self, program_description: &str) -> Self {
        self.program_description = Some(program_description.to_owned());
        self
    }

    /// Register a flag with this parser. A flag can only ever be registered
    /// with one parser, and its names must not collide with any flag which
    /// was already registered.
    pub fn add_flag(mut self, flag: &dyn Flag) -> Result<Self> {
        let record = flag.record();
        if record.is_parsed() {
            return Err(ConstructionError::AlreadyUsed(record.display_name()).into());
        }

        let short_name_taken = self
            .flags
            .iter()
            .any(|f| f.short_name() == record.short_name());
        let long_name_taken = record.long_name().map_or(false, |long_name| {
            self.flags
                .iter()
                .any(|f| f.long_name().map_or(false, |n| n == long_name))
        });
        if short_name_taken || long_name_taken {
            return Err(ConstructionError::DuplicateFlag(record.display_name()).into());
        }

        if record.is_registered() {
            return Err(ConstructionError::AlreadyUsed(record.display_name()).into());
        }

        record.mark_registered();
        self.flags.push(Rc::clone(record));
        Ok(self)
    }

    /// Register several flags at once, in the given order.
    pub fn add_flags(self, flags: &[&dyn Flag]) -> Result<Self> {
        flags.iter().try_fold(self, |builder, flag| builder.add_flag(*flag))
    }

    /// Register a positional argument. Positional arguments are bound in the
    /// order they are registered.
    pub fn add_positional_argument(mut self, argument: &PositionalArgument) -> Result<Self> {
        let state = argument.state();
        if state.is_parsed() {
            return Err(ConstructionError::AlreadyUsed(state.name().to_owned()).into());
        }
        if self
            .positional_arguments
            .iter()
            .any(|a| Rc::ptr_eq(a, state))
        {
            return Err(ConstructionError::DuplicatePositional(state.name().to_owned()).into());
        }
        if state.is_registered() {
            return Err(ConstructionError::AlreadyUsed(state.name().to_owned()).into());
        }

        state.mark_registered();
        self.positional_arguments.push(Rc::clone(state));
        Ok(self)
    }

    /// Register several positional arguments at once, in the given order.
    pub fn add_positional_arguments(self, arguments: &[&PositionalArgument]) -> Result<Self> {
        arguments
            .iter()
            .try_fold(self, |builder, argument| builder.add_positional_argument(argument))
    }

    /// Freeze the registered declarations into a Parser.
    pub fn build(self) -> Parser {
        let mut short_names = HashMap::new();
        let mut long_names = HashMap::new();
        for (idx, flag) in self.flags.iter().enumerate() {
            short_names.insert(flag.short_name(), idx);
            if let Some(long_name) = flag.long_name() {
                long_names.insert(long_name.to_owned(), idx);
            }
        }

        Parser {
            program_name: self.program_name,
            program_description: self.program_description,
            flags: self.flags,
            short_names: short_names,
            long_names: long_names,
            positional_arguments: self.positional_arguments,
        }
    }
}

/// Parser binds a program's command-line arguments to the flags and
/// positional arguments it was built with.
#[derive(Debug)]
pub struct Parser {
    program_name: String,
    program_description: Option<String>,
    /// Flags in registration order.
    flags: Vec<Rc<FlagRecord>>,
    /// Indexes into `flags`.
    short_names: HashMap<char, usize>,
    /// Indexes into `flags`.
    long_names: HashMap<String, usize>,
    positional_arguments: Vec<Rc<ArgumentState>>,
}

impl Parser {
    pub(crate) fn program_name(&self) -> &str {
        self.program_name.as_str()
    }

    pub(crate) fn program_description(&self) -> Option<&str> {
        self.program_description.as_ref().map(|d| d.as_str())
    }

    pub(crate) fn flags(&self) -> &[Rc<FlagRecord>] {
        self.flags.as_slice()
    }

    pub(crate) fn positional_arguments(&self) -> &[Rc<ArgumentState>] {
        self.positional_arguments.as_slice()
    }

    /// Returns this program's usage text. This doesn't depend on whether or
    /// not anything has been parsed.
    pub fn usage(&self) -> String {
        Usage::new(self).to_string()
    }

    fn find_flag(&self, token: Token<'_>) -> Option<&FlagRecord> {
        let idx = match token {
            Token::Short(name) => self.short_names.get(&name),
            Token::Long(name) => self.long_names.get(name),
            Token::Positional(_) => None,
        };
        idx.map(|&idx| &*self.flags[idx])
    }

    /// Walk the arguments once from left to right, binding flag values and
    /// positional values as they are encountered. Returns the number of
    /// positional arguments which were bound.
    fn bind(&self, args: &[String]) -> Result<usize> {
        let mut next_positional: usize = 0;
        let mut i: usize = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            let token = classify(arg);
            trace!("Classified argument '{}' as {:?}", arg, token);

            if let Token::Positional(value) = token {
                let argument = self
                    .positional_arguments
                    .get(next_positional)
                    .ok_or_else(|| ParseError::UnexpectedPositional(value.to_owned()))?;
                argument.bind(value);
                next_positional += 1;
                i += 1;
                continue;
            }

            let flag = self
                .find_flag(token)
                .ok_or_else(|| ParseError::UnknownFlag(arg.to_owned()))?;
            flag.mark_appeared();
            if flag.kind().needs_value() {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| ParseError::MissingValue(arg.to_owned()))?;
                flag.bind(value.as_str())
                    .map_err(|reason| ParseError::InvalidValue {
                        flag: arg.to_owned(),
                        value: value.clone(),
                        reason: reason,
                    })?;
                i += 2;
            } else {
                i += 1;
            }
        }
        Ok(next_positional)
    }

    fn validate(&self, bound_positionals: usize) -> Result<()> {
        if let Some(missing) = self.positional_arguments.get(bound_positionals) {
            return Err(ParseError::MissingPositional(missing.name().to_owned()).into());
        }

        if let Some(missing) = self
            .flags
            .iter()
            .find(|f| f.kind().is_required() && !f.appeared())
        {
            return Err(ParseError::MissingRequiredFlag(missing.display_name()).into());
        }

        Ok(())
    }

    fn commit(&self) {
        for flag in self.flags.iter() {
            flag.mark_parsed();
        }
        for argument in self.positional_arguments.iter() {
            argument.mark_parsed();
        }
    }

    /// Parse the given command-line arguments (not including the program
    /// name itself). A Parser can only be used once.
    ///
    /// If any argument is "-h" or "--help", `Outcome::Help` is returned
    /// without looking at anything else. Otherwise, either every flag and
    /// positional argument is bound and `Outcome::Success` is returned, or an
    /// error is returned and none of them become readable.
    pub fn parse<I, S>(self, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();

        if args.iter().any(|a| is_help_request(a)) {
            debug!("Help requested for {}, skipping parsing", self.program_name);
            return Ok(Outcome::Help(self.usage()));
        }

        debug!(
            "Parsing {} arguments for {} ({} flags, {} positional arguments)",
            args.len(),
            self.program_name,
            self.flags.len(),
            self.positional_arguments.len()
        );
        let bound_positionals = self.bind(&args)?;
        self.validate(bound_positionals)?;
        self.commit();
        debug!("Parsed arguments for {}", self.program_name);
        Ok(Outcome::Success)
    }
}
