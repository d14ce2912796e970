use chumsky::Parser;

use crate::{
	parse::{notation, Notation, NotationParser},
	roll::roller::Iter as IterRoller,
	Config, ParseError, RollSpec, Verdict,
};

#[test]
fn plain_dice() {
	let spec = crate::parse("2d20").unwrap();
	assert_eq!(spec.count, 2);
	assert_eq!(spec.sides, 20);
	assert_eq!(spec.modifier, 0);
	assert_eq!(spec.threshold, 0);
	assert_eq!(spec.text, "2d20");
}

#[test]
fn modifier_and_threshold() {
	let spec = crate::parse("3d6+2|10").unwrap();
	assert_eq!((spec.count, spec.sides, spec.modifier, spec.threshold), (3, 6, 2, 10));

	let outcome = spec.roll(&mut IterRoller::new([4, 5, 6]));
	assert_eq!(outcome.rolls, vec![4, 5, 6]);
	assert_eq!(outcome.total, 17);
	assert_eq!(outcome.verdict, Verdict::Succeeded);
}

#[test]
fn negative_modifier() {
	let spec = crate::parse("1d8-3").unwrap();
	assert_eq!(spec.modifier, -3);
	assert_eq!(spec.threshold, 0);
}

#[test]
fn threshold_at_or_below() {
	let spec = crate::parse("1d20|15-").unwrap();
	assert_eq!(spec.threshold, -15);

	let outcome = spec.roll(&mut IterRoller::new([10]));
	assert_eq!(outcome.total, 10);
	assert_eq!(outcome.verdict, Verdict::Succeeded);
}

#[test]
fn threshold_explicitly_at_or_above() {
	let spec = crate::parse("1d20-1|15+").unwrap();
	assert_eq!(spec.modifier, -1);
	assert_eq!(spec.threshold, 15);
}

#[test]
fn zero_threshold_means_none() {
	let spec = crate::parse("1d20|0").unwrap();
	assert_eq!(spec.threshold, 0);
	assert_eq!(spec.threshold(), None);
}

#[test]
fn text_is_kept_verbatim() {
	let spec = crate::parse("  02D020+03 ").unwrap();
	assert_eq!((spec.count, spec.sides, spec.modifier), (2, 20, 3));
	assert_eq!(spec.text, "  02D020+03 ");
	assert_eq!(spec.to_string(), "2d20+3");
}

#[test]
fn unsupported_format() {
	for text in [
		"", "d20", "2d", "2x20", "2d20+", "2d20|", "2d20|-15", "2d20 + 3", "2d20+3+4", "2d20kh1", "(2d20)", "2d20|15-+",
		"roll 2d20", "-2d20",
	] {
		assert!(
			matches!(crate::parse(text), Err(ParseError::UnsupportedFormat { .. })),
			"{text:?} should be an unsupported format"
		);
	}
}

#[test]
fn format_error_points_at_problem() {
	let err = crate::parse("2d20x").unwrap_err();
	let ParseError::UnsupportedFormat { span, .. } = &err else {
		panic!("expected an unsupported format error, got {err:?}");
	};
	assert_eq!(span.start, 4);
}

#[test]
fn zero_dice_is_unsupported_format() {
	assert!(matches!(crate::parse("0d6"), Err(ParseError::UnsupportedFormat { .. })));
}

#[test]
fn oversized_modifier_is_unsupported_format() {
	assert!(matches!(
		crate::parse("1d6+99999999999999999999"),
		Err(ParseError::UnsupportedFormat { .. })
	));
	assert!(matches!(
		crate::parse("1d6|99999999999999999999"),
		Err(ParseError::UnsupportedFormat { .. })
	));
}

#[test]
fn request_too_large() {
	assert_eq!(crate::parse("2000d6"), Err(ParseError::RequestTooLarge { limit: 1000 }));
	assert_eq!(
		crate::parse("99999999999999999999d6"),
		Err(ParseError::RequestTooLarge { limit: 1000 })
	);
	assert!(crate::parse("1000d6").is_ok());
}

#[test]
fn unsupported_dice() {
	assert_eq!(
		crate::parse("5d7"),
		Err(ParseError::UnsupportedDice { sides: "7".into() })
	);
	assert_eq!(
		crate::parse("1d0"),
		Err(ParseError::UnsupportedDice { sides: "0".into() })
	);
	assert_eq!(
		crate::parse("1d0100"),
		Err(ParseError::UnsupportedDice { sides: "100".into() })
	);
	assert_eq!(
		crate::parse("1d99999999999999999999"),
		Err(ParseError::UnsupportedDice {
			sides: "99999999999999999999".into()
		})
	);
}

#[test]
fn all_default_sides_supported() {
	for sides in [2, 4, 6, 8, 10, 12, 20] {
		let spec = crate::parse(&format!("1d{sides}")).unwrap();
		assert_eq!(spec.sides, sides);
	}
}

#[test]
fn error_precedence() {
	// Malformed notation wins over everything else
	assert!(matches!(
		crate::parse("2000d7+"),
		Err(ParseError::UnsupportedFormat { .. })
	));

	// Too many dice wins over unsupported dice
	assert_eq!(crate::parse("2000d7"), Err(ParseError::RequestTooLarge { limit: 1000 }));
}

#[test]
fn custom_config() {
	let parser = NotationParser::new(Config::builder().max_dice(3).sides([3, 100]).build());
	assert!(parser.parse("3d100").is_ok());
	assert!(parser.parse("1d3").is_ok());
	assert_eq!(parser.parse("4d3"), Err(ParseError::RequestTooLarge { limit: 3 }));
	assert_eq!(parser.parse("1d20"), Err(ParseError::UnsupportedDice { sides: "20".into() }));
}

#[test]
fn zero_sides_never_supported() {
	let config = Config::builder().side(0).side(6).build();
	assert!(!config.supports(0));
	assert!(config.supports(6));

	let parser = NotationParser::new(config);
	assert_eq!(parser.parse("1d0"), Err(ParseError::UnsupportedDice { sides: "0".into() }));
	assert_eq!(parser.parse("3d000"), Err(ParseError::UnsupportedDice { sides: "0".into() }));
	assert!(parser.parse("1d6").is_ok());
}

#[test]
fn error_messages() {
	assert_eq!(
		crate::parse("2000d6").unwrap_err().to_string(),
		"cannot roll more than 1000 dice"
	);
	assert_eq!(crate::parse("5d7").unwrap_err().to_string(), "cannot roll dice with 7 sides");
	assert!(crate::parse("nope")
		.unwrap_err()
		.to_string()
		.contains("format your request in the style of 2d20"));
}

#[test]
fn from_str() {
	let spec: RollSpec = "4d8+1|12-".parse().unwrap();
	assert_eq!(spec, crate::parse("4d8+1|12-").unwrap());
}

#[test]
fn display_reparses() {
	for text in ["2d20", "3d6+2|10", "1d20-1|15-", "10d10|3"] {
		let spec = crate::parse(text).unwrap();
		let reparsed = crate::parse(&spec.to_string()).unwrap();
		assert_eq!(
			(reparsed.count, reparsed.sides, reparsed.modifier, reparsed.threshold),
			(spec.count, spec.sides, spec.modifier, spec.threshold)
		);
	}
}

#[test]
fn raw_notation() {
	assert_eq!(
		notation().parse("12d4-7|3+").into_output(),
		Some(Notation {
			count: "12",
			sides: "4",
			modifier: Some(('-', "7")),
			threshold: Some(("3", Some('+'))),
		})
	);
	assert!(notation().parse("12d4-7|3+x").has_errors());
}
