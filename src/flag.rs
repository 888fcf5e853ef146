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

use crate::error::*;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// The short name reserved for the built-in help flag.
pub(crate) const HELP_SHORT_NAME: char = 'h';
/// The long name reserved for the built-in help flag.
pub(crate) const HELP_LONG_NAME: &str = "help";

/// Converts a flag's raw command-line text into its typed value. An Err holds
/// a human-readable reason the text was rejected.
pub(crate) type Converter<V> = Rc<dyn Fn(&str) -> std::result::Result<V, String>>;

/// A type-erased Converter, which stores its result in the owning flag's
/// typed value slot instead of returning it.
type Binder = Box<dyn Fn(&str) -> std::result::Result<(), String>>;

/// Kind denotes which of the four flag variants a FlagRecord describes. Every
/// capability question the parser or the usage renderer asks is answered by
/// matching on this.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Kind {
    /// Must appear, and must be given a value.
    RequiredWithValue,
    /// May appear; if it does, it must be given a value.
    OptionalWithValue,
    /// May appear; if it does not, its value is the default.
    OptionalWithDefaultValue {
        /// The default value, rendered as text for usage output.
        default_value: String,
    },
    /// A switch, which is either present or not.
    OptionalWithoutValue,
}

impl Kind {
    /// Whether the token following this flag is consumed as its value.
    pub(crate) fn needs_value(&self) -> bool {
        match *self {
            Kind::RequiredWithValue => true,
            Kind::OptionalWithValue => true,
            Kind::OptionalWithDefaultValue { .. } => true,
            Kind::OptionalWithoutValue => false,
        }
    }

    /// Whether parsing fails if this flag never appears.
    pub(crate) fn is_required(&self) -> bool {
        match *self {
            Kind::RequiredWithValue => true,
            Kind::OptionalWithValue
            | Kind::OptionalWithDefaultValue { .. }
            | Kind::OptionalWithoutValue => false,
        }
    }

    pub(crate) fn default_value(&self) -> Option<&str> {
        match *self {
            Kind::OptionalWithDefaultValue { ref default_value } => Some(default_value.as_str()),
            Kind::RequiredWithValue | Kind::OptionalWithValue | Kind::OptionalWithoutValue => {
                None
            }
        }
    }
}

/// FlagNames holds a flag's validated identity, as assembled by a builder.
#[derive(Clone, Debug)]
pub(crate) struct FlagNames {
    pub(crate) short_name: char,
    pub(crate) long_name: Option<String>,
    pub(crate) description: String,
}

/// FlagRecord is the type-erased state of a single flag. It is shared between
/// the typed handle returned by a builder and the Parser the flag is
/// registered with; only the Parser ever writes to it.
pub struct FlagRecord {
    names: FlagNames,
    kind: Kind,
    binder: Option<Binder>,
    appeared: Cell<bool>,
    parsed: Cell<bool>,
    registered: Cell<bool>,
}

impl FlagRecord {
    fn new(names: FlagNames, kind: Kind, binder: Option<Binder>) -> Rc<Self> {
        Rc::new(FlagRecord {
            names: names,
            kind: kind,
            binder: binder,
            appeared: Cell::new(false),
            parsed: Cell::new(false),
            registered: Cell::new(false),
        })
    }

    pub(crate) fn short_name(&self) -> char {
        self.names.short_name
    }

    pub(crate) fn long_name(&self) -> Option<&str> {
        self.names.long_name.as_ref().map(|n| n.as_str())
    }

    pub(crate) fn description(&self) -> &str {
        self.names.description.as_str()
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The name used to refer to this flag in error messages: its long name if
    /// it has one, or else its short name.
    pub(crate) fn display_name(&self) -> String {
        match self.long_name() {
            Some(long_name) => long_name.to_owned(),
            None => self.short_name().to_string(),
        }
    }

    pub(crate) fn appeared(&self) -> bool {
        self.appeared.get()
    }

    pub(crate) fn mark_appeared(&self) {
        self.appeared.set(true);
    }

    /// Convert the given raw value and store it, replacing any value stored by
    /// an earlier occurrence of this flag.
    pub(crate) fn bind(&self, raw: &str) -> std::result::Result<(), String> {
        match self.binder {
            Some(ref binder) => binder(raw),
            None => Err(format!(
                "flag '{}' does not take a value",
                self.display_name()
            )),
        }
    }

    pub(crate) fn is_parsed(&self) -> bool {
        self.parsed.get()
    }

    pub(crate) fn mark_parsed(&self) {
        self.parsed.set(true);
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.registered.get()
    }

    pub(crate) fn mark_registered(&self) {
        self.registered.set(true);
    }

    pub(crate) fn check_parsed(&self) -> Result<()> {
        if !self.is_parsed() {
            return Err(AccessError::NotParsed(self.display_name()).into());
        }
        Ok(())
    }
}

impl fmt::Debug for FlagRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FlagRecord")
            .field("names", &self.names)
            .field("kind", &self.kind)
            .field("appeared", &self.appeared.get())
            .field("parsed", &self.parsed.get())
            .finish()
    }
}

/// Build a FlagRecord for a value-bearing flag, along with the typed slot its
/// converted values are stored in.
fn new_value_record<V: 'static>(
    names: FlagNames,
    kind: Kind,
    converter: Converter<V>,
    initial_value: Option<V>,
) -> (Rc<FlagRecord>, Rc<RefCell<Option<V>>>) {
    let slot = Rc::new(RefCell::new(initial_value));
    let binder_slot = Rc::clone(&slot);
    let binder: Binder = Box::new(move |raw: &str| {
        let value = converter(raw)?;
        *binder_slot.borrow_mut() = Some(value);
        Ok(())
    });
    (FlagRecord::new(names, kind, Some(binder)), slot)
}

/// Flag is implemented by every typed flag handle. It exposes a flag's
/// identity, and lets a ParserBuilder register the flag regardless of its
/// value type.
pub trait Flag {
    /// The shared state backing this flag. This is an implementation detail
    /// used when registering flags with a ParserBuilder.
    #[doc(hidden)]
    fn record(&self) -> &Rc<FlagRecord>;

    /// This flag's single-character name, e.g. 'c' for "-c".
    fn short_name(&self) -> char {
        self.record().short_name()
    }

    /// This flag's long name (without the leading "--"), if it has one.
    fn long_name(&self) -> Option<&str> {
        self.record().long_name()
    }

    /// The human-readable description of this flag.
    fn description(&self) -> &str {
        self.record().description()
    }

    /// Returns whether this flag appeared at least once on the command line.
    /// This fails if the flag hasn't been successfully parsed yet.
    fn has_appeared(&self) -> Result<bool> {
        self.record().check_parsed()?;
        Ok(self.record().appeared())
    }
}

/// Read the value out of a slot which must be populated after a successful
/// parse.
fn read_bound_value<V: Clone>(record: &FlagRecord, slot: &RefCell<Option<V>>) -> Result<V> {
    record.check_parsed()?;
    match *slot.borrow() {
        Some(ref value) => Ok(value.clone()),
        None => Err(AccessError::InvariantViolation(format!(
            "flag '{}' was parsed without a value",
            record.display_name()
        ))
        .into()),
    }
}

/// A flag which must appear on the command line, with a value.
pub struct RequiredFlagWithValue<V> {
    record: Rc<FlagRecord>,
    value: Rc<RefCell<Option<V>>>,
}

impl<V: 'static> RequiredFlagWithValue<V> {
    pub(crate) fn new(names: FlagNames, converter: Converter<V>) -> Self {
        let (record, value) = new_value_record(names, Kind::RequiredWithValue, converter, None);
        RequiredFlagWithValue {
            record: record,
            value: value,
        }
    }
}

impl<V: Clone> RequiredFlagWithValue<V> {
    /// Returns the value given for this flag. If the flag appeared more than
    /// once, the last occurrence's value is returned.
    pub fn value(&self) -> Result<V> {
        read_bound_value(&self.record, &self.value)
    }
}

impl<V> Flag for RequiredFlagWithValue<V> {
    fn record(&self) -> &Rc<FlagRecord> {
        &self.record
    }
}

/// A flag which may appear on the command line, with a value.
pub struct OptionalFlagWithValue<V> {
    record: Rc<FlagRecord>,
    value: Rc<RefCell<Option<V>>>,
}

impl<V: 'static> OptionalFlagWithValue<V> {
    pub(crate) fn new(names: FlagNames, converter: Converter<V>) -> Self {
        let (record, value) = new_value_record(names, Kind::OptionalWithValue, converter, None);
        OptionalFlagWithValue {
            record: record,
            value: value,
        }
    }
}

impl<V: Clone> OptionalFlagWithValue<V> {
    /// Returns the value given for this flag, or None if it never appeared.
    pub fn value(&self) -> Result<Option<V>> {
        self.record.check_parsed()?;
        Ok(self.value.borrow().clone())
    }
}

impl<V> Flag for OptionalFlagWithValue<V> {
    fn record(&self) -> &Rc<FlagRecord> {
        &self.record
    }
}

/// A flag which may appear on the command line with a value, and which falls
/// back to a default value otherwise.
pub struct OptionalFlagWithDefaultValue<V> {
    record: Rc<FlagRecord>,
    value: Rc<RefCell<Option<V>>>,
    default_value: V,
}

impl<V: Clone + fmt::Display + 'static> OptionalFlagWithDefaultValue<V> {
    pub(crate) fn new(names: FlagNames, converter: Converter<V>, default_value: V) -> Self {
        let kind = Kind::OptionalWithDefaultValue {
            default_value: default_value.to_string(),
        };
        let (record, value) =
            new_value_record(names, kind, converter, Some(default_value.clone()));
        OptionalFlagWithDefaultValue {
            record: record,
            value: value,
            default_value: default_value,
        }
    }
}

impl<V: Clone> OptionalFlagWithDefaultValue<V> {
    /// Returns the value given for this flag, or its default value if it never
    /// appeared.
    pub fn value(&self) -> Result<V> {
        read_bound_value(&self.record, &self.value)
    }

    /// Returns the default value this flag was declared with. Unlike value(),
    /// this is available at any time.
    pub fn default_value(&self) -> &V {
        &self.default_value
    }
}

impl<V> Flag for OptionalFlagWithDefaultValue<V> {
    fn record(&self) -> &Rc<FlagRecord> {
        &self.record
    }
}

/// A switch flag, which takes no value; all that matters is whether or not it
/// appeared. Use `has_appeared` to read it.
pub struct OptionalFlagWithoutValue {
    record: Rc<FlagRecord>,
}

impl OptionalFlagWithoutValue {
    pub(crate) fn new(names: FlagNames) -> Self {
        OptionalFlagWithoutValue {
            record: FlagRecord::new(names, Kind::OptionalWithoutValue, None),
        }
    }
}

impl Flag for OptionalFlagWithoutValue {
    fn record(&self) -> &Rc<FlagRecord> {
        &self.record
    }
}
