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

use crate::flag::{FlagRecord, Kind, HELP_LONG_NAME, HELP_SHORT_NAME};
use crate::parser::Parser;
use std::fmt;

const INDENTATION: &str = "    ";
const HELP_DESCRIPTION: &str = "Print the program usage.";

fn write_flag_usage(
    f: &mut fmt::Formatter,
    short_name: char,
    long_name: Option<&str>,
    kind: &Kind,
    description: &str,
) -> fmt::Result {
    f.write_fmt(format_args!("{}-{}", INDENTATION, short_name))?;
    if let Some(long_name) = long_name {
        f.write_fmt(format_args!(" --{}", long_name))?;
    }
    if kind.needs_value() {
        f.write_str(" <value>")?;
    }
    f.write_fmt(format_args!(
        "\n{}{} : [{}] ",
        INDENTATION,
        INDENTATION,
        match kind.is_required() {
            false => "Optional",
            true => "Required",
        }
    ))?;
    if let Some(default_value) = kind.default_value() {
        f.write_fmt(format_args!("(default={}) ", default_value))?;
    }
    f.write_fmt(format_args!("{}\n", description))
}

fn write_flag_record_usage(f: &mut fmt::Formatter, flag: &FlagRecord) -> fmt::Result {
    write_flag_usage(
        f,
        flag.short_name(),
        flag.long_name(),
        flag.kind(),
        flag.description(),
    )
}

/// Usage renders a Parser's usage text. It only looks at the Parser's
/// declarations, never at any parsed state.
pub(crate) struct Usage<'a> {
    parser: &'a Parser,
}

impl<'a> Usage<'a> {
    pub(crate) fn new(parser: &'a Parser) -> Self {
        Usage { parser: parser }
    }

    fn required_flags(&self) -> impl Iterator<Item = &'a FlagRecord> {
        let parser: &'a Parser = self.parser;
        parser
            .flags()
            .iter()
            .map(|f| &**f)
            .filter(|f| f.kind().is_required())
    }

    fn optional_flags(&self) -> impl Iterator<Item = &'a FlagRecord> {
        let parser: &'a Parser = self.parser;
        parser
            .flags()
            .iter()
            .map(|f| &**f)
            .filter(|f| !f.kind().is_required())
    }

    fn write_usage_line(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_fmt(format_args!("USAGE: {} ", self.parser.program_name()))?;

        let optional: Vec<String> = self
            .optional_flags()
            .map(|flag| format!("-{}", flag.short_name()))
            .collect();
        if !optional.is_empty() {
            f.write_fmt(format_args!("[{}] ", optional.join(" ")))?;
        }

        let required: Vec<String> = self
            .required_flags()
            .map(|flag| format!("-{}", flag.short_name()))
            .collect();
        if !required.is_empty() {
            f.write_fmt(format_args!("{} ", required.join(" ")))?;
        }

        for argument in self.parser.positional_arguments() {
            f.write_fmt(format_args!("{} ", argument.name()))?;
        }
        Ok(())
    }

    fn write_positional_arguments(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = match self
            .parser
            .positional_arguments()
            .iter()
            .map(|a| a.name().chars().count())
            .max()
        {
            None => return Ok(()),
            Some(width) => width,
        };

        f.write_str("POSITIONAL ARGUMENTS\n")?;
        for argument in self.parser.positional_arguments() {
            f.write_fmt(format_args!(
                "{}{:<width$} : {}\n",
                INDENTATION,
                argument.name(),
                argument.description(),
                width = width
            ))?;
        }
        f.write_str("\n")
    }

    fn write_flags(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("FLAGS\n")?;
        write_flag_usage(
            f,
            HELP_SHORT_NAME,
            Some(HELP_LONG_NAME),
            &Kind::OptionalWithoutValue,
            HELP_DESCRIPTION,
        )?;
        for flag in self.required_flags() {
            write_flag_record_usage(f, flag)?;
        }
        for flag in self.optional_flags() {
            write_flag_record_usage(f, flag)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for Usage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_usage_line(f)?;
        if let Some(description) = self.parser.program_description() {
            f.write_fmt(format_args!("\n{}", description))?;
        }
        f.write_str("\n\n")?;
        self.write_positional_arguments(f)?;
        self.write_flags(f)
    }
}
