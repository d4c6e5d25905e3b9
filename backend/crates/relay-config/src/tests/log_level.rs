use crate::LogLevel;

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::eq;
use log::LevelFilter;

#[test]
fn given_known_level_names_when_parsed_then_mapped() {
    let cases = [
        ("off", LevelFilter::Off),
        ("ERROR", LevelFilter::Error),
        ("warn", LevelFilter::Warn),
        ("Info", LevelFilter::Info),
        ("debug", LevelFilter::Debug),
        ("trace", LevelFilter::Trace),
    ];

    for (input, expected) in cases {
        let level = LogLevel::from_str(input).unwrap();
        assert_that!(*level, eq(expected));
    }
}

#[test]
fn given_unknown_level_when_parsed_then_defaults_to_info() {
    let level = LogLevel::from_str("loud").unwrap();
    assert_that!(*level, eq(LevelFilter::Info));
}

#[test]
fn given_toml_level_when_deserialized_then_lenient() {
    // Given
    #[derive(serde::Deserialize)]
    struct Wrapper {
        level: LogLevel,
    }

    // When
    let parsed: Wrapper = toml::from_str("level = \"nonsense\"").unwrap();

    // Then
    assert_that!(*parsed.level, eq(LevelFilter::Info));
}
