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
use crate::parser::{Outcome, Parser};
use std::env;
use std::io::{self, Write};
use std::process;

/// The integer which is returned from main() if the program exits successfully.
pub const EXIT_SUCCESS: i32 = 0;
/// The integer which is returned from main() if the program exits with any
/// error.
pub const EXIT_FAILURE: i32 = 1;

/// Returns the current program's parameters (accessed essentially via
/// `std::env::args`) collected into a Vec. The 0'th parameter (the executable)
/// is omitted.
pub fn get_program_parameters() -> Vec<String> {
    env::args()
        .skip(1) // Skip the first argument, which is our executable.
        .collect()
}

/// Decide what a program should do with the result of `Parser::parse`.
///
/// - On success, None is returned: the program should carry on and read its
///   flag values.
/// - If help was requested, the usage text is written to `output_writer` and
///   EXIT_SUCCESS is returned.
/// - On error, the error is written to `error_writer` and EXIT_FAILURE is
///   returned.
pub fn handle_outcome<O: Write, E: Write>(
    r: Result<Outcome>,
    output_writer: &mut O,
    error_writer: &mut E,
) -> Option<i32> {
    match r {
        Ok(Outcome::Success) => None,
        Ok(Outcome::Help(usage)) => Some(match output_writer.write_all(usage.as_bytes()) {
            Ok(_) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        }),
        Err(e) => {
            // If even this fails there is nowhere left to report it.
            let _ = writeln!(
                error_writer,
                "Error parsing command-line flags: {}",
                match cfg!(debug_assertions) {
                    false => e.to_string(),
                    true => format!("{:?}", e),
                }
            );
            Some(EXIT_FAILURE)
        }
    }
}

/// Parses this process' command-line parameters with the given Parser.
///
/// If parsing succeeds, this simply returns, and the flags and positional
/// arguments registered with the Parser can be read. Otherwise (including if
/// help was requested) this exits the process with an appropriate exit code.
/// Like `std::process::exit`, no destructors on the current stack or any other
/// thread's stack will be run in that case.
pub fn parse_or_exit(parser: Parser) {
    let r = parser.parse(get_program_parameters());
    if let Some(code) = handle_outcome(r, &mut io::stdout(), &mut io::stderr()) {
        process::exit(code);
    }
}
