//! Tests for command parsing through the public entry points.

use gantry_core::command::{Action, CommandPattern, ParsedCommand};

use crate::{Span, error::ErrorCode, parse, parse_command};

fn parsed(text: &str) -> ParsedCommand {
    match parse_command(text) {
        Some(command) => command,
        None => panic!("Expected `{text}` to parse"),
    }
}

#[cfg(test)]
mod rule_tests {
    use super::*;

    #[test]
    fn test_place_count() {
        let command = parsed("place 6 containers");

        assert_eq!(command.action(), Action::Place);
        assert_eq!(command.count(), Some(6));
        assert_eq!(command.module_type(), "HD5");
        assert!(command.pattern().is_none());
        assert!(command.params().is_none());
    }

    #[test]
    fn test_place_count_accepts_every_noun() {
        for noun in ["container", "modules", "hd5", "HD5s"] {
            assert_eq!(parsed(&format!("place 3 {noun}")).count(), Some(3));
        }
    }

    #[test]
    fn test_arrange_grid() {
        let command = parsed("arrange containers in a grid 3x4");

        assert_eq!(command.action(), Action::Arrange);
        assert_eq!(command.pattern(), Some(CommandPattern::Grid));
        let params = command.params().unwrap();
        assert_eq!(params.rows(), Some(3));
        assert_eq!(params.columns(), Some(4));
        assert!(command.count().is_none());
    }

    #[test]
    fn test_arrange_grid_takes_last_dimensions() {
        let command = parsed("arrange modules like grid 1x1, no, grid 5x6");
        let params = command.params().unwrap();

        assert_eq!(params.rows(), Some(5));
        assert_eq!(params.columns(), Some(6));
    }

    #[test]
    fn test_arrange_needs_noun_before_grid() {
        assert!(parse_command("arrange a grid 3x4 of containers").is_none());
    }

    #[test]
    fn test_create_line() {
        for text in ["create a line of 5 containers", "create line of 5"] {
            let command = parsed(text);

            assert_eq!(command.action(), Action::Create);
            assert_eq!(command.pattern(), Some(CommandPattern::Line));
            assert_eq!(command.count(), Some(5));
        }
    }

    #[test]
    fn test_place_circle() {
        let command = parsed("place containers in a circle with radius 15");

        assert_eq!(command.action(), Action::Place);
        assert_eq!(command.pattern(), Some(CommandPattern::Circle));
        assert_eq!(command.params().and_then(|p| p.radius()), Some(15.0));
        assert!(command.count().is_none());
    }

    #[test]
    fn test_place_circle_takes_last_radius() {
        let command = parsed("place them in a circle, radius 4 or maybe radius 9");
        assert_eq!(command.params().and_then(|p| p.radius()), Some(9.0));
    }

    #[test]
    fn test_circle_must_follow_place() {
        assert!(parse_command("circle radius 5 then place").is_none());
    }
}

#[cfg(test)]
mod precedence_tests {
    use super::*;

    #[test]
    fn test_place_count_wins_over_circle() {
        let command = parsed("place 5 containers in a circle with radius 15");

        assert_eq!(command.count(), Some(5));
        assert!(command.pattern().is_none());
        assert!(command.params().is_none());
    }

    #[test]
    fn test_rows_override_after_place_count() {
        let command = parsed("place 10 containers in 2 rows");

        assert_eq!(command.action(), Action::Place);
        assert_eq!(command.count(), Some(10));
        assert_eq!(command.pattern(), Some(CommandPattern::Rows));
        assert_eq!(command.params().and_then(|p| p.rows()), Some(2));
    }

    #[test]
    fn test_rows_override_replaces_params() {
        let command = parsed("arrange containers in a grid 3x4 across 2 rows");
        let params = command.params().unwrap();

        assert_eq!(command.action(), Action::Arrange);
        assert_eq!(command.pattern(), Some(CommandPattern::Rows));
        assert_eq!(params.rows(), Some(2));
        assert_eq!(params.columns(), None);
    }

    #[test]
    fn test_rows_alone_is_not_a_command() {
        assert!(parse_command("10 containers in 2 rows").is_none());
    }
}

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn test_case_and_surrounding_whitespace() {
        let command = parsed("   PLACE 4 Containers\n");
        assert_eq!(command.count(), Some(4));
    }

    #[test]
    fn test_surrounding_words_are_ignored() {
        let command = parsed("please could you place 2 modules near the gate");
        assert_eq!(command.count(), Some(2));
    }

    #[test]
    fn test_empty_and_unrelated_text() {
        assert!(parse_command("").is_none());
        assert!(parse_command("   ").is_none());
        assert!(parse_command("stack the containers").is_none());
    }

    #[test]
    fn test_zero_count_is_accepted() {
        assert_eq!(parsed("place 0 containers").count(), Some(0));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_unrecognized_command_diagnostic() {
        let text = "  stack the containers ";
        let err = parse(text).unwrap_err();
        let diag = &err.diagnostics()[0];

        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert!(diag.help().is_some());
        assert_eq!(diag.labels()[0].span(), Span::new(2..22));
        assert_eq!(&text[diag.labels()[0].span().range()], "stack the containers");
    }

    #[test]
    fn test_overflow_diagnostic_points_at_number() {
        let text = " place 99999999999 containers";
        let err = parse(text).unwrap_err();
        let diag = &err.diagnostics()[0];

        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(&text[diag.labels()[0].span().range()], "99999999999");
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(
            &text[diag.labels()[1].span().range()],
            "place 99999999999 containers"
        );
        assert_eq!(err.to_string(), "error[E101]: number is too large");
    }

    #[test]
    fn test_every_oversized_phrase_is_reported() {
        let text = "place 99999999999 containers in a circle with radius 88888888888";
        let err = parse(text).unwrap_err();

        let numbers: Vec<_> = err
            .diagnostics()
            .iter()
            .map(|diag| &text[diag.labels()[0].span().range()])
            .collect();
        assert_eq!(numbers, ["99999999999", "88888888888"]);
        assert_eq!(err.to_string(), "error[E101]: number is too large (+1 more)");
    }

    #[test]
    fn test_unrelated_oversized_number_keeps_rows_override() {
        let text = "place 10 containers tagged 99999999999 in 2 rows";

        let command = parsed(text);
        assert_eq!(command.count(), Some(10));
        assert_eq!(command.pattern(), Some(CommandPattern::Rows));
        assert_eq!(command.params().and_then(|p| p.rows()), Some(2));

        assert_eq!(parse(text).unwrap(), command);
    }

    #[test]
    fn test_unrelated_oversized_number_is_not_an_error() {
        let command = parse("place 5 containers at plot 12345678901").unwrap();

        assert_eq!(command.count(), Some(5));
        assert!(command.pattern().is_none());
    }

    #[test]
    fn test_oversized_rows_count_is_an_error() {
        let text = "place 10 containers in 99999999999 rows";

        assert_eq!(parsed(text).count(), Some(10));
        let err = parse(text).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
        assert_eq!(&text[err.diagnostics()[0].labels()[1].span().range()], "99999999999 row");
    }

    #[test]
    fn test_overflow_skips_rule_in_lenient_parse() {
        let text = "place 99999999999 containers in a circle with radius 5";

        let command = parsed(text);
        assert_eq!(command.pattern(), Some(CommandPattern::Circle));

        let err = parse(text).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
    }

    #[test]
    fn test_strict_parse_accepts_valid_command() {
        let command = parse("create a line of 5 containers").unwrap();
        assert_eq!(command, parsed("create a line of 5 containers"));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_parse_never_panics(text in "\\PC{0,64}") {
            let _ = parse_command(&text);
            let _ = parse(&text);
        }

        #[test]
        fn prop_place_count_round_trips(count in 0u32..100_000, noun in "(container|module|hd5)s?") {
            let command = parsed(&format!("place {count} {noun}"));
            prop_assert_eq!(command.count(), Some(count));
        }

        #[test]
        fn prop_parse_is_case_insensitive(rows in 1u32..50, columns in 1u32..50) {
            let lower = format!("arrange containers in a grid {rows}x{columns}");
            let upper = lower.to_uppercase();
            prop_assert_eq!(parse_command(&lower), parse_command(&upper));
        }

        #[test]
        fn prop_strict_and_lenient_agree_on_success(text in "(place|create a line of) [0-9]{1,6} containers( in [0-9] rows)?") {
            if let Ok(command) = parse(&text) {
                prop_assert_eq!(Some(command), parse_command(&text));
            }
        }
    }
}
