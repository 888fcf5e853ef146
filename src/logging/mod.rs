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

//! A `log::Log` implementation for programs which parse their arguments with
//! this crate. The parser itself only ever logs through the `log` facade, so
//! using this Logger is entirely optional.

/// write provides the plumbing to send log output to arbitrary writers.
pub mod write;

use crate::logging::write::*;
use log::{LevelFilter, Log, Metadata, Record};
use regex::Regex;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

const RUST_LOG_ENV_VAR: &str = "RUST_LOG";

/// LoggingError describes the ways configuring a Logger can fail.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The environment variable holding log filters wasn't valid unicode.
    #[error("{0}")]
    EnvVar(#[from] std::env::VarError),
    /// A log level string wasn't recognized.
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),
    /// A log filter's module pattern wasn't a valid regular expression.
    #[error("{0}")]
    Regex(#[from] regex::Error),
    /// A global logger was already installed.
    #[error("{0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// A Result type which uses LoggingError.
pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

/// Parse a LevelFilter, ignoring case and surrounding whitespace.
pub fn parse_log_level_filter(s: &str) -> LoggingResult<LevelFilter> {
    s.trim()
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(s.to_owned()))
}

/// LogFilter limits the level of log statements from the modules whose paths
/// match its pattern (or from every module, if it has no pattern).
#[derive(Debug)]
pub struct LogFilter {
    /// Matched against the start of a module path. None matches everything.
    pub module: Option<Regex>,
    /// The most verbose level allowed for matching modules.
    pub level: LevelFilter,
}

impl LogFilter {
    /// The level this filter allows for the given module, or None if the
    /// filter doesn't apply to it.
    pub fn max_level_for(&self, module_path: &str) -> Option<LevelFilter> {
        match self.module {
            None => Some(self.level),
            Some(ref module) => match module.is_match(module_path) {
                false => None,
                true => Some(self.level),
            },
        }
    }
}

impl FromStr for LogFilter {
    type Err = LoggingError;

    /// Filters look like "level" or "module_regex=level".
    fn from_str(s: &str) -> LoggingResult<LogFilter> {
        match s.rfind('=') {
            None => Ok(LogFilter {
                module: None,
                level: parse_log_level_filter(s)?,
            }),
            Some(eq_pos) => Ok(LogFilter {
                module: Some(Regex::new(&format!("^{}", &s[..eq_pos]))?),
                level: parse_log_level_filter(&s[eq_pos + 1..])?,
            }),
        }
    }
}

/// LogFilters is the complete set of filters a Logger applies.
#[derive(Debug)]
pub struct LogFilters(pub Vec<LogFilter>);

impl LogFilters {
    /// The level allowed for the given module: the most restrictive level of
    /// any matching filter, or Trace if no filter matches.
    pub fn max_level_for(&self, module_path: &str) -> LevelFilter {
        self.0
            .iter()
            .filter_map(|f| f.max_level_for(module_path))
            .min()
            .unwrap_or(LevelFilter::Trace)
    }

    /// The most verbose level any filter allows, or Trace with no filters.
    pub fn max_level(&self) -> LevelFilter {
        self.0
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(LevelFilter::Trace)
    }
}

impl FromStr for LogFilters {
    type Err = LoggingError;

    /// Multiple filters are separated by ';', e.g.
    /// "argparser::parser=trace;warn". An empty string means no filters.
    fn from_str(s: &str) -> LoggingResult<LogFilters> {
        let filters: LoggingResult<Vec<LogFilter>> = s
            .split(';')
            .filter(|f| !f.trim().is_empty())
            .map(|f| f.parse())
            .collect();
        Ok(LogFilters(filters?))
    }
}

/// Options controls a Logger's behavior. Construct it with OptionsBuilder.
pub struct Options {
    /// Per-module level filters.
    pub filters: LogFilters,
    /// Where log output is written.
    pub output_factory: LogOutputFactory,
    /// Flush after every log statement.
    pub always_flush: bool,
}

/// OptionsBuilder provides a builder-style interface to construct Options.
#[derive(Default)]
pub struct OptionsBuilder {
    filters: Option<LogFilters>,
    output_factory: Option<LogOutputFactory>,
    always_flush: Option<bool>,
}

impl OptionsBuilder {
    /// Start with every option at its default.
    pub fn new() -> Self {
        OptionsBuilder::default()
    }

    /// Use the given filters, instead of reading them from RUST_LOG.
    pub fn set_filters(mut self, filters: LogFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Send log output to the given writer instead of stderr.
    pub fn set_output_to<T: Write + Send + 'static>(mut self, writer: SharedWriter<T>) -> Self {
        self.output_factory = Some(new_log_output_factory(writer));
        self
    }

    /// Flush after every log statement. Slow, but nothing is lost if the
    /// process dies abruptly.
    pub fn set_always_flush(mut self, always_flush: bool) -> Self {
        self.always_flush = Some(always_flush);
        self
    }

    /// Build the Options. If no filters were set explicitly they are read from
    /// the RUST_LOG environment variable, which may fail.
    pub fn build(self) -> LoggingResult<Options> {
        let filters = match self.filters {
            Some(filters) => filters,
            None => match std::env::var(RUST_LOG_ENV_VAR) {
                Ok(filters) => filters.parse()?,
                Err(std::env::VarError::NotPresent) => LogFilters(vec![]),
                Err(e) => return Err(e.into()),
            },
        };

        Ok(Options {
            filters: filters,
            output_factory: self
                .output_factory
                .unwrap_or_else(|| Box::new(|| -> Box<dyn Write> { Box::new(std::io::stderr()) })),
            always_flush: self.always_flush.unwrap_or(false),
        })
    }
}

/// Format a log Record as a single line of output (without the newline).
pub fn format_log_record(record: &Record) -> String {
    format!(
        "[{} {} {}] {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        record.level(),
        record.module_path().unwrap_or_else(|| record.target()),
        record.args()
    )
}

/// Logger writes formatted log records to the output configured in its
/// Options. Write failures are ignored.
pub struct Logger {
    options: Options,
}

impl Logger {
    /// Construct a new Logger with the given Options.
    pub fn new(options: Options) -> Self {
        Logger { options: options }
    }

    /// The most verbose level this Logger will ever output.
    pub fn max_level(&self) -> LevelFilter {
        self.options.filters.max_level()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level()
    }

    fn log(&self, record: &Record) {
        let module_path = record.module_path().unwrap_or_else(|| record.target());
        if record.level() > self.options.filters.max_level_for(module_path) {
            return;
        }

        let mut output = (self.options.output_factory)();
        let _ = writeln!(output, "{}", format_log_record(record));
        if self.options.always_flush {
            let _ = output.flush();
        }
    }

    fn flush(&self) {
        let _ = (self.options.output_factory)().flush();
    }
}

/// Install a Logger with the given Options as the global logger.
pub fn try_init(options: Options) -> LoggingResult<()> {
    let logger = Logger::new(options);
    log::set_max_level(logger.max_level());
    log::set_boxed_logger(Box::new(logger))?;
    Ok(())
}

/// Install a Logger configured from the RUST_LOG environment variable, writing
/// to stderr.
pub fn init_from_env() -> LoggingResult<()> {
    try_init(OptionsBuilder::new().build()?)
}
