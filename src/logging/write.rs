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

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A LogOutputFactory hands out a fresh Write for every log statement.
/// `Log::log` only gets `&self`, so the Logger can't hold a `&mut` writer.
pub type LogOutputFactory = Box<dyn Fn() -> Box<dyn Write> + Send + Sync>;

/// SharedWriter lets any Write implementor be cloned and shared between
/// threads, by putting it behind a Mutex.
pub struct SharedWriter<T: Write> {
    writer: Arc<Mutex<T>>,
}

impl<T: Write + Send + 'static> SharedWriter<T> {
    /// Wrap the given writer.
    pub fn new(writer: T) -> Self {
        SharedWriter {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Lock the wrapped writer, e.g. to inspect what was written to it. A
    /// poisoned lock is recovered, since a half-written log line is harmless.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Write + Send + 'static> Write for SharedWriter<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<T: Write + Send + 'static> Clone for SharedWriter<T> {
    fn clone(&self) -> Self {
        SharedWriter {
            writer: Arc::clone(&self.writer),
        }
    }
}

/// Build a LogOutputFactory which sends all output to the given writer.
pub fn new_log_output_factory<T: Write + Send + 'static>(
    writer: SharedWriter<T>,
) -> LogOutputFactory {
    Box::new(move || -> Box<dyn Write> { Box::new(writer.clone()) })
}
