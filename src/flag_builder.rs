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

//! Flags are constructed in stages. Every flag starts out as a switch
//! (`FlagBuilder`); calling `require_value` turns it into a flag which takes a
//! value (`ValueFlagBuilder`), which can in turn either be given a default
//! value (`DefaultValueFlagBuilder`) or be made mandatory
//! (`RequiredFlagBuilder`). Each stage's `build` produces the matching typed
//! flag handle.

use crate::error::*;
use crate::flag::*;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

lazy_static! {
    static ref SHORT_NAME_RE: Regex = Regex::new(r"^-?(?P<name>[a-zA-Z0-9])$").unwrap();
    static ref LONG_NAME_RE: Regex = Regex::new(r"^(?:--)?(?P<name>[a-zA-Z0-9_]{2,})$").unwrap();
}

fn parse_short_name(short_name: &str) -> Result<char> {
    let name = SHORT_NAME_RE
        .captures(short_name)
        .and_then(|c| c.name("name"))
        .and_then(|m| m.as_str().chars().next())
        .ok_or_else(|| ConstructionError::InvalidName(short_name.to_owned()))?;
    if name == HELP_SHORT_NAME {
        return Err(ConstructionError::ReservedName(format!("-{}", name)).into());
    }
    Ok(name)
}

fn parse_long_name(long_name: &str) -> Result<String> {
    let name = LONG_NAME_RE
        .captures(long_name)
        .and_then(|c| c.name("name"))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| ConstructionError::InvalidName(long_name.to_owned()))?;
    if name == HELP_LONG_NAME {
        return Err(ConstructionError::ReservedName(format!("--{}", name)).into());
    }
    Ok(name)
}

fn identity_converter() -> Converter<String> {
    Rc::new(|raw: &str| Ok(raw.to_owned()))
}

fn infallible_converter<V: 'static, F: Fn(&str) -> V + 'static>(converter: F) -> Converter<V> {
    Rc::new(move |raw: &str| Ok(converter(raw)))
}

fn fallible_converter<V, E, F>(converter: F) -> Converter<V>
where
    V: 'static,
    E: Display + 'static,
    F: Fn(&str) -> std::result::Result<V, E> + 'static,
{
    Rc::new(move |raw: &str| converter(raw).map_err(|e| e.to_string()))
}

fn from_str_converter<V: FromStr + 'static>() -> Converter<V>
where
    <V as FromStr>::Err: Display + 'static,
{
    fallible_converter(|raw: &str| raw.parse::<V>())
}

/// The first stage of building a flag. Flags built from this stage are
/// switches, which take no value.
#[derive(Debug)]
pub struct FlagBuilder {
    names: FlagNames,
}

impl FlagBuilder {
    /// Start building a flag with the given short name (e.g. "-c" or just
    /// "c") and description. The short name must be exactly one ASCII letter
    /// or digit, and must not be "h", which is reserved for help.
    pub fn new(short_name: &str, description: &str) -> Result<Self> {
        Ok(FlagBuilder {
            names: FlagNames {
                short_name: parse_short_name(short_name)?,
                long_name: None,
                description: description.to_owned(),
            },
        })
    }

    /// Give this flag a long name (e.g. "--cert_file" or just "cert_file").
    /// Long names are at least two ASCII letters, digits or underscores, and
    /// must not be "help".
    pub fn use_long_name(mut self, long_name: &str) -> Result<Self> {
        self.names.long_name = Some(parse_long_name(long_name)?);
        Ok(self)
    }

    /// Make this flag take a value. By default the value is the raw string
    /// from the command line; see `ValueFlagBuilder::use_converter`.
    pub fn require_value(self) -> ValueFlagBuilder<String> {
        ValueFlagBuilder {
            names: self.names,
            converter: identity_converter(),
        }
    }

    /// Build a switch flag.
    pub fn build(self) -> OptionalFlagWithoutValue {
        OptionalFlagWithoutValue::new(self.names)
    }
}

/// The stage of building a flag which takes a value, but which doesn't have
/// to appear.
pub struct ValueFlagBuilder<V> {
    names: FlagNames,
    converter: Converter<V>,
}

impl<V: 'static> ValueFlagBuilder<V> {
    /// Give this flag a long name. See `FlagBuilder::use_long_name`.
    pub fn use_long_name(mut self, long_name: &str) -> Result<Self> {
        self.names.long_name = Some(parse_long_name(long_name)?);
        Ok(self)
    }

    /// Replace the function which turns this flag's raw command-line text into
    /// its value, possibly changing the value's type.
    pub fn use_converter<U: 'static, F: Fn(&str) -> U + 'static>(
        self,
        converter: F,
    ) -> ValueFlagBuilder<U> {
        ValueFlagBuilder {
            names: self.names,
            converter: infallible_converter(converter),
        }
    }

    /// Like `use_converter`, but the converter may reject the text it is
    /// given, in which case parsing fails with `ParseError::InvalidValue`.
    pub fn use_fallible_converter<U, E, F>(self, converter: F) -> ValueFlagBuilder<U>
    where
        U: 'static,
        E: Display + 'static,
        F: Fn(&str) -> std::result::Result<U, E> + 'static,
    {
        ValueFlagBuilder {
            names: self.names,
            converter: fallible_converter(converter),
        }
    }

    /// Convert this flag's value using `U`'s `FromStr` implementation.
    pub fn parse_value<U: FromStr + 'static>(self) -> ValueFlagBuilder<U>
    where
        <U as FromStr>::Err: Display + 'static,
    {
        ValueFlagBuilder {
            names: self.names,
            converter: from_str_converter(),
        }
    }

    /// Give this flag a default value, used if it doesn't appear on the
    /// command line.
    pub fn use_default_value(self, default_value: V) -> DefaultValueFlagBuilder<V>
    where
        V: Clone + Display,
    {
        DefaultValueFlagBuilder {
            names: self.names,
            converter: self.converter,
            default_value: default_value,
        }
    }

    /// Make it an error for this flag not to appear on the command line.
    pub fn must_appear(self) -> RequiredFlagBuilder<V> {
        RequiredFlagBuilder {
            names: self.names,
            converter: self.converter,
        }
    }

    /// Build an optional flag which takes a value.
    pub fn build(self) -> OptionalFlagWithValue<V> {
        OptionalFlagWithValue::new(self.names, self.converter)
    }
}

/// The stage of building an optional flag with a default value.
pub struct DefaultValueFlagBuilder<V> {
    names: FlagNames,
    converter: Converter<V>,
    default_value: V,
}

impl<V: Clone + Display + 'static> DefaultValueFlagBuilder<V> {
    /// Give this flag a long name. See `FlagBuilder::use_long_name`.
    pub fn use_long_name(mut self, long_name: &str) -> Result<Self> {
        self.names.long_name = Some(parse_long_name(long_name)?);
        Ok(self)
    }

    /// Replace this flag's converter, keeping the value type (and thus the
    /// default value) the same.
    pub fn use_converter<F: Fn(&str) -> V + 'static>(mut self, converter: F) -> Self {
        self.converter = infallible_converter(converter);
        self
    }

    /// Like `use_converter`, but the converter may reject the text it is
    /// given.
    pub fn use_fallible_converter<E, F>(mut self, converter: F) -> Self
    where
        E: Display + 'static,
        F: Fn(&str) -> std::result::Result<V, E> + 'static,
    {
        self.converter = fallible_converter(converter);
        self
    }

    /// Replace this flag's converter with one producing a different type. The
    /// old default value can't be converted, so a new one must be given.
    pub fn use_converter_with_default_value<U, F>(
        self,
        default_value: U,
        converter: F,
    ) -> DefaultValueFlagBuilder<U>
    where
        U: Clone + Display + 'static,
        F: Fn(&str) -> U + 'static,
    {
        DefaultValueFlagBuilder {
            names: self.names,
            converter: infallible_converter(converter),
            default_value: default_value,
        }
    }

    /// Switch to `U`'s `FromStr` implementation for conversion, with a new
    /// default value of that type.
    pub fn parse_value_with_default_value<U>(self, default_value: U) -> DefaultValueFlagBuilder<U>
    where
        U: Clone + Display + FromStr + 'static,
        <U as FromStr>::Err: Display + 'static,
    {
        DefaultValueFlagBuilder {
            names: self.names,
            converter: from_str_converter(),
            default_value: default_value,
        }
    }

    /// Build an optional flag with a default value.
    pub fn build(self) -> OptionalFlagWithDefaultValue<V> {
        OptionalFlagWithDefaultValue::new(self.names, self.converter, self.default_value)
    }
}

/// The stage of building a flag which must appear, with a value.
pub struct RequiredFlagBuilder<V> {
    names: FlagNames,
    converter: Converter<V>,
}

impl<V: 'static> RequiredFlagBuilder<V> {
    /// Give this flag a long name. See `FlagBuilder::use_long_name`.
    pub fn use_long_name(mut self, long_name: &str) -> Result<Self> {
        self.names.long_name = Some(parse_long_name(long_name)?);
        Ok(self)
    }

    /// Replace the function which turns this flag's raw command-line text into
    /// its value, possibly changing the value's type.
    pub fn use_converter<U: 'static, F: Fn(&str) -> U + 'static>(
        self,
        converter: F,
    ) -> RequiredFlagBuilder<U> {
        RequiredFlagBuilder {
            names: self.names,
            converter: infallible_converter(converter),
        }
    }

    /// Like `use_converter`, but the converter may reject the text it is
    /// given.
    pub fn use_fallible_converter<U, E, F>(self, converter: F) -> RequiredFlagBuilder<U>
    where
        U: 'static,
        E: Display + 'static,
        F: Fn(&str) -> std::result::Result<U, E> + 'static,
    {
        RequiredFlagBuilder {
            names: self.names,
            converter: fallible_converter(converter),
        }
    }

    /// Convert this flag's value using `U`'s `FromStr` implementation.
    pub fn parse_value<U: FromStr + 'static>(self) -> RequiredFlagBuilder<U>
    where
        <U as FromStr>::Err: Display + 'static,
    {
        RequiredFlagBuilder {
            names: self.names,
            converter: from_str_converter(),
        }
    }

    /// Build a required flag.
    pub fn build(self) -> RequiredFlagWithValue<V> {
        RequiredFlagWithValue::new(self.names, self.converter)
    }
}
