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

use crate::argument::PositionalArgument;
use crate::error::*;
use crate::flag::*;
use crate::flag_builder::FlagBuilder;
use crate::parser::*;

struct Haddis {
    cert_file: RequiredFlagWithValue<String>,
    dard: OptionalFlagWithoutValue,
    levi: OptionalFlagWithValue<String>,
    frank: OptionalFlagWithDefaultValue<String>,
    src: PositionalArgument,
    destination: PositionalArgument,
}

impl Haddis {
    fn new() -> Self {
        Haddis {
            cert_file: FlagBuilder::new("-c", "The certificate file.")
                .unwrap()
                .use_long_name("--cert_file")
                .unwrap()
                .require_value()
                .must_appear()
                .build(),
            dard: FlagBuilder::new("-d", "Darde Disco.")
                .unwrap()
                .use_long_name("--dard")
                .unwrap()
                .build(),
            levi: FlagBuilder::new("-l", "Levi's haddi location")
                .unwrap()
                .use_long_name("--levi")
                .unwrap()
                .require_value()
                .build(),
            frank: FlagBuilder::new("-f", "Frankkkkiiieeee....")
                .unwrap()
                .use_long_name("--frank")
                .unwrap()
                .require_value()
                .use_default_value("Meow!".to_owned())
                .build(),
            src: PositionalArgument::new("src", "source file location"),
            destination: PositionalArgument::new("destination", "destination file location"),
        }
    }

    fn parser(&self) -> Parser {
        ParserBuilder::new("haddis")
            .set_program_description("cool program")
            .add_flags(&[&self.cert_file, &self.dard, &self.levi, &self.frank])
            .unwrap()
            .add_positional_arguments(&[&self.src, &self.destination])
            .unwrap()
            .build()
    }

    fn assert_nothing_readable(&self) {
        assert!(matches!(
            self.cert_file.value(),
            Err(Error::Access(AccessError::NotParsed(_)))
        ));
        assert!(matches!(
            self.dard.has_appeared(),
            Err(Error::Access(AccessError::NotParsed(_)))
        ));
        assert!(matches!(
            self.levi.value(),
            Err(Error::Access(AccessError::NotParsed(_)))
        ));
        assert!(matches!(
            self.frank.value(),
            Err(Error::Access(AccessError::NotParsed(_)))
        ));
        assert!(matches!(
            self.src.value(),
            Err(Error::Access(AccessError::NotParsed(_)))
        ));
        assert!(matches!(
            self.destination.value(),
            Err(Error::Access(AccessError::NotParsed(_)))
        ));
    }
}

#[test]
fn test_classify() {
    assert_eq!(Token::Short('c'), classify("-c"));
    assert_eq!(Token::Short('7'), classify("-7"));
    assert_eq!(Token::Long("cert_file"), classify("--cert_file"));
    assert_eq!(Token::Long("ab"), classify("--ab"));

    assert_eq!(Token::Positional("-"), classify("-"));
    assert_eq!(Token::Positional("--"), classify("--"));
    assert_eq!(Token::Positional("--a"), classify("--a"));
    assert_eq!(Token::Positional("-abc"), classify("-abc"));
    assert_eq!(Token::Positional("---abc"), classify("---abc"));
    assert_eq!(Token::Positional("--cert-file"), classify("--cert-file"));
    assert_eq!(Token::Positional("~/file"), classify("~/file"));
}

#[test]
fn test_valid_input() {
    let h = Haddis::new();
    let parser = h.parser();
    assert_eq!(
        Ok(Outcome::Success),
        parser.parse(&[
            "-c",
            "./cert.pem",
            "--dard",
            "~/source_file",
            "--levi",
            "/tmp/haddi",
            "~/destination_file",
        ])
    );

    assert_eq!(Ok("./cert.pem".to_owned()), h.cert_file.value());
    assert_eq!(Ok(true), h.cert_file.has_appeared());
    assert_eq!(Ok(true), h.dard.has_appeared());
    assert_eq!(Ok(Some("/tmp/haddi".to_owned())), h.levi.value());
    assert_eq!(Ok("Meow!".to_owned()), h.frank.value());
    assert_eq!(Ok(false), h.frank.has_appeared());
    assert_eq!(Ok("~/source_file".to_owned()), h.src.value());
    assert_eq!(Ok("~/destination_file".to_owned()), h.destination.value());
}

#[test]
fn test_absent_optional_flags() {
    let h = Haddis::new();
    assert_eq!(
        Ok(Outcome::Success),
        h.parser().parse(&["--cert_file", "c", "s", "d"])
    );

    assert_eq!(Ok(false), h.dard.has_appeared());
    assert_eq!(Ok(false), h.levi.has_appeared());
    assert_eq!(Ok(None), h.levi.value());
    assert_eq!(Ok("Meow!".to_owned()), h.frank.value());
}

#[test]
fn test_empty_input() {
    let h = Haddis::new();
    let empty: Vec<String> = vec![];
    assert_eq!(
        Err(Error::Parse(ParseError::MissingPositional("src".to_owned()))),
        h.parser().parse(empty)
    );
    h.assert_nothing_readable();
}

#[test]
fn test_missing_second_positional() {
    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::MissingPositional(
            "destination".to_owned()
        ))),
        h.parser().parse(&["-c", "c", "s"])
    );
    h.assert_nothing_readable();
}

#[test]
fn test_missing_required_flag() {
    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::MissingRequiredFlag(
            "cert_file".to_owned()
        ))),
        h.parser().parse(&["-d", "s", "d"])
    );
    h.assert_nothing_readable();
}

#[test]
fn test_positionals_checked_before_required_flags() {
    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::MissingPositional("src".to_owned()))),
        h.parser().parse(&["-d"])
    );
}

#[test]
fn test_last_value_wins() {
    let h = Haddis::new();
    assert_eq!(
        Ok(Outcome::Success),
        h.parser()
            .parse(&["-c", "c", "-f", "A", "s", "--frank", "B", "d", "-c", "C"])
    );
    assert_eq!(Ok("B".to_owned()), h.frank.value());
    assert_eq!(Ok(true), h.frank.has_appeared());
    assert_eq!(Ok("C".to_owned()), h.cert_file.value());
}

#[test]
fn test_repeated_switch() {
    let h = Haddis::new();
    assert_eq!(
        Ok(Outcome::Success),
        h.parser().parse(&["-d", "-c", "c", "--dard", "s", "d", "-d"])
    );
    assert_eq!(Ok(true), h.dard.has_appeared());
}

#[test]
fn test_unknown_flag() {
    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::UnknownFlag("--bogus".to_owned()))),
        h.parser().parse(&["-c", "c", "--bogus", "s", "d"])
    );
    h.assert_nothing_readable();

    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::UnknownFlag("-z".to_owned()))),
        h.parser().parse(&["-z"])
    );
}

#[test]
fn test_missing_value() {
    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::MissingValue("-c".to_owned()))),
        h.parser().parse(&["s", "d", "-c"])
    );
    h.assert_nothing_readable();

    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::MissingValue("--levi".to_owned()))),
        h.parser().parse(&["-c", "c", "s", "d", "--levi"])
    );
}

#[test]
fn test_unexpected_positional() {
    let h = Haddis::new();
    assert_eq!(
        Err(Error::Parse(ParseError::UnexpectedPositional(
            "extra".to_owned()
        ))),
        h.parser().parse(&["-c", "c", "s", "d", "extra"])
    );
    h.assert_nothing_readable();
}

#[test]
fn test_value_which_looks_like_a_flag() {
    let h = Haddis::new();
    assert_eq!(
        Ok(Outcome::Success),
        h.parser().parse(&["-l", "-d", "-c", "--frank", "s", "d"])
    );
    assert_eq!(Ok(Some("-d".to_owned())), h.levi.value());
    assert_eq!(Ok(false), h.dard.has_appeared());
    assert_eq!(Ok("--frank".to_owned()), h.cert_file.value());
    assert_eq!(Ok("Meow!".to_owned()), h.frank.value());
}

#[test]
fn test_dash_is_positional() {
    let h = Haddis::new();
    assert_eq!(
        Ok(Outcome::Success),
        h.parser().parse(&["-", "-c", "c", "--"])
    );
    assert_eq!(Ok("-".to_owned()), h.src.value());
    assert_eq!(Ok("--".to_owned()), h.destination.value());
}

#[test]
fn test_help() {
    for args in &[
        vec!["-h"],
        vec!["--help"],
        vec!["-c", "c", "s", "d", "-h"],
        vec!["--bogus", "--help"],
        vec!["s", "d", "extra", "-h", "-c"],
    ] {
        let h = Haddis::new();
        let parser = h.parser();
        let usage = parser.usage();
        assert_eq!(Ok(Outcome::Help(usage)), parser.parse(args));
        h.assert_nothing_readable();
    }
}

#[test]
fn test_help_as_flag_value() {
    // A help token is recognized anywhere, even where a value is expected.
    let h = Haddis::new();
    assert!(matches!(
        h.parser().parse(&["-c", "--help", "s", "d"]),
        Ok(Outcome::Help(_))
    ));
}

#[test]
fn test_no_declarations() {
    let parser = ParserBuilder::new("prog").build();
    let empty: Vec<&str> = vec![];
    assert_eq!(Ok(Outcome::Success), parser.parse(empty));

    let parser = ParserBuilder::new("prog").build();
    assert_eq!(
        Err(Error::Parse(ParseError::UnexpectedPositional("x".to_owned()))),
        parser.parse(&["x"])
    );
}

#[test]
fn test_parse_value() {
    let port = FlagBuilder::new("-p", "The port.")
        .unwrap()
        .use_long_name("port")
        .unwrap()
        .require_value()
        .parse_value::<u16>()
        .must_appear()
        .build();
    let parser = ParserBuilder::new("server").add_flag(&port).unwrap().build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["--port", "8080"]));
    assert_eq!(Ok(8080), port.value());
}

#[test]
fn test_parse_value_invalid() {
    let port = FlagBuilder::new("-p", "The port.")
        .unwrap()
        .require_value()
        .parse_value::<u16>()
        .build();
    let parser = ParserBuilder::new("server").add_flag(&port).unwrap().build();
    match parser.parse(&["-p", "http"]) {
        Err(Error::Parse(ParseError::InvalidValue { flag, value, .. })) => {
            assert_eq!("-p", flag);
            assert_eq!("http", value);
        }
        r => panic!("expected InvalidValue error, got {:?}", r),
    }
    assert!(matches!(
        port.value(),
        Err(Error::Access(AccessError::NotParsed(_)))
    ));
}

#[test]
fn test_use_converter() {
    let words = FlagBuilder::new("-w", "Words.")
        .unwrap()
        .require_value()
        .use_converter(|raw| {
            raw.split(',')
                .map(|w| w.to_owned())
                .collect::<Vec<String>>()
        })
        .build();
    let parser = ParserBuilder::new("prog").add_flag(&words).unwrap().build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["-w", "a,b"]));
    assert_eq!(
        Ok(Some(vec!["a".to_owned(), "b".to_owned()])),
        words.value()
    );
}

#[test]
fn test_use_fallible_converter() {
    let even = FlagBuilder::new("-e", "An even number.")
        .unwrap()
        .require_value()
        .must_appear()
        .use_fallible_converter(|raw| -> std::result::Result<i32, String> {
            let n: i32 = raw.parse().map_err(|_| "not a number".to_owned())?;
            match n % 2 {
                0 => Ok(n),
                _ => Err(format!("{} is odd", n)),
            }
        })
        .build();
    let parser = ParserBuilder::new("prog").add_flag(&even).unwrap().build();
    assert_eq!(
        Err(Error::Parse(ParseError::InvalidValue {
            flag: "-e".to_owned(),
            value: "3".to_owned(),
            reason: "3 is odd".to_owned(),
        })),
        parser.parse(&["-e", "3"])
    );

    let even = FlagBuilder::new("-e", "An even number.")
        .unwrap()
        .require_value()
        .must_appear()
        .use_fallible_converter(|raw| raw.parse::<i32>())
        .build();
    let parser = ParserBuilder::new("prog").add_flag(&even).unwrap().build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["-e", "4"]));
    assert_eq!(Ok(4), even.value());
}

#[test]
fn test_converter_with_default_value() {
    let length = FlagBuilder::new("-n", "A length.")
        .unwrap()
        .require_value()
        .use_default_value("abc".to_owned())
        .use_converter_with_default_value(7_usize, |raw| raw.len())
        .build();
    assert_eq!(7, *length.default_value());
    let parser = ParserBuilder::new("prog").add_flag(&length).unwrap().build();
    let empty: Vec<&str> = vec![];
    assert_eq!(Ok(Outcome::Success), parser.parse(empty));
    assert_eq!(Ok(7), length.value());

    let length = FlagBuilder::new("-n", "A length.")
        .unwrap()
        .require_value()
        .use_default_value("abc".to_owned())
        .parse_value_with_default_value(7_usize)
        .build();
    let parser = ParserBuilder::new("prog").add_flag(&length).unwrap().build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["-n", "42"]));
    assert_eq!(Ok(42), length.value());
}

#[test]
fn test_default_value_flag_converter() {
    let shout = FlagBuilder::new("-s", "Shout.")
        .unwrap()
        .require_value()
        .use_default_value("QUIET".to_owned())
        .use_converter(|raw| raw.to_uppercase())
        .build();
    let parser = ParserBuilder::new("prog").add_flag(&shout).unwrap().build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["-s", "loud"]));
    assert_eq!(Ok("LOUD".to_owned()), shout.value());
}

#[test]
fn test_duplicate_flags() {
    let a = FlagBuilder::new("-a", "").unwrap().build();
    let also_a = FlagBuilder::new("-a", "")
        .unwrap()
        .use_long_name("other")
        .unwrap()
        .build();
    assert_eq!(
        Err(Error::Construction(ConstructionError::DuplicateFlag(
            "other".to_owned()
        ))),
        ParserBuilder::new("prog")
            .add_flag(&a)
            .unwrap()
            .add_flag(&also_a)
            .map(|_| ())
    );

    let long = FlagBuilder::new("-x", "")
        .unwrap()
        .use_long_name("name")
        .unwrap()
        .build();
    let also_long = FlagBuilder::new("-y", "")
        .unwrap()
        .use_long_name("name")
        .unwrap()
        .build();
    assert_eq!(
        Err(Error::Construction(ConstructionError::DuplicateFlag(
            "name".to_owned()
        ))),
        ParserBuilder::new("prog")
            .add_flags(&[&long, &also_long])
            .map(|_| ())
    );

    let same = FlagBuilder::new("-s", "").unwrap().build();
    assert_eq!(
        Err(Error::Construction(ConstructionError::DuplicateFlag(
            "s".to_owned()
        ))),
        ParserBuilder::new("prog")
            .add_flag(&same)
            .unwrap()
            .add_flag(&same)
            .map(|_| ())
    );
}

#[test]
fn test_flag_registered_twice() {
    let a = FlagBuilder::new("-a", "").unwrap().build();
    let _first = ParserBuilder::new("first").add_flag(&a).unwrap();
    assert_eq!(
        Err(Error::Construction(ConstructionError::AlreadyUsed(
            "a".to_owned()
        ))),
        ParserBuilder::new("second").add_flag(&a).map(|_| ())
    );
}

#[test]
fn test_flag_used_after_parsing() {
    let a = FlagBuilder::new("-a", "").unwrap().build();
    let parser = ParserBuilder::new("first").add_flag(&a).unwrap().build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["-a"]));
    assert_eq!(
        Err(Error::Construction(ConstructionError::AlreadyUsed(
            "a".to_owned()
        ))),
        ParserBuilder::new("second").add_flag(&a).map(|_| ())
    );
}

#[test]
fn test_positional_registration() {
    let src = PositionalArgument::new("src", "");
    assert_eq!(
        Err(Error::Construction(ConstructionError::DuplicatePositional(
            "src".to_owned()
        ))),
        ParserBuilder::new("prog")
            .add_positional_arguments(&[&src, &src])
            .map(|_| ())
    );

    let dst = PositionalArgument::new("dst", "");
    let _first = ParserBuilder::new("first")
        .add_positional_argument(&dst)
        .unwrap();
    assert_eq!(
        Err(Error::Construction(ConstructionError::AlreadyUsed(
            "dst".to_owned()
        ))),
        ParserBuilder::new("second")
            .add_positional_argument(&dst)
            .map(|_| ())
    );

    // Distinct arguments may share a name.
    let a = PositionalArgument::new("file", "");
    let b = PositionalArgument::new("file", "");
    let parser = ParserBuilder::new("prog")
        .add_positional_arguments(&[&a, &b])
        .unwrap()
        .build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["x", "y"]));
    assert_eq!(Ok("x".to_owned()), a.value());
    assert_eq!(Ok("y".to_owned()), b.value());
}

#[test]
fn test_positional_used_after_parsing() {
    let src = PositionalArgument::new("src", "");
    let parser = ParserBuilder::new("first")
        .add_positional_argument(&src)
        .unwrap()
        .build();
    assert_eq!(Ok(Outcome::Success), parser.parse(&["x"]));
    assert_eq!(
        Err(Error::Construction(ConstructionError::AlreadyUsed(
            "src".to_owned()
        ))),
        ParserBuilder::new("second")
            .add_positional_argument(&src)
            .map(|_| ())
    );
}

#[test]
fn test_failed_parse_keeps_nothing() {
    // Values bound before the failure must not leak out.
    let h = Haddis::new();
    assert!(h
        .parser()
        .parse(&["-c", "c", "-l", "haddi", "s", "d", "extra"])
        .is_err());
    h.assert_nothing_readable();
}
