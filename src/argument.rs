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

#[derive(Debug)]
pub(crate) struct ArgumentState {
    name: String,
    description: String,
    value: RefCell<Option<String>>,
    parsed: Cell<bool>,
    registered: Cell<bool>,
}

impl ArgumentState {
    pub(crate) fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn description(&self) -> &str {
        self.description.as_str()
    }

    pub(crate) fn bind(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_owned());
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
}

/// A PositionalArgument is an unnamed command-line value, identified purely by
/// its position among the non-flag arguments. Positional arguments are bound
/// in the order they were added to a ParserBuilder.
pub struct PositionalArgument {
    state: Rc<ArgumentState>,
}

impl PositionalArgument {
    /// Declare a new positional argument. The name is only used for usage
    /// output and error messages.
    pub fn new(name: &str, description: &str) -> Self {
        PositionalArgument {
            state: Rc::new(ArgumentState {
                name: name.to_owned(),
                description: description.to_owned(),
                value: RefCell::new(None),
                parsed: Cell::new(false),
                registered: Cell::new(false),
            }),
        }
    }

    pub(crate) fn state(&self) -> &Rc<ArgumentState> {
        &self.state
    }

    /// This argument's name.
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// This argument's human-readable description.
    pub fn description(&self) -> &str {
        self.state.description()
    }

    /// Returns the value bound to this argument. This fails if parsing hasn't
    /// succeeded yet.
    pub fn value(&self) -> Result<String> {
        if !self.state.is_parsed() {
            return Err(AccessError::NotParsed(self.state.name.clone()).into());
        }
        match *self.state.value.borrow() {
            Some(ref value) => Ok(value.clone()),
            None => Err(AccessError::InvariantViolation(format!(
                "positional argument '{}' was parsed without a value",
                self.state.name
            ))
            .into()),
        }
    }
}

impl fmt::Debug for PositionalArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PositionalArgument")
            .field("name", &self.state.name)
            .field("value", &self.state.value.borrow())
            .field("parsed", &self.state.parsed.get())
            .finish()
    }
}
