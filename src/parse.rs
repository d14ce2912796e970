//! Parser generators for dice notation and the validation that turns parsed notation into a [`RollSpec`].
//! Requires the `parse` feature (enabled by default).

use alloc::{
	string::{String, ToString},
	vec::Vec,
};
use core::{ops::Range, str::FromStr};

use chumsky::prelude::*;

use crate::{config::Config, roll::RollSpec};

/// Pieces of a roll request that matched the notation grammar, prior to any numeric validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Notation<'src> {
	/// Digits of the dice count
	pub count: &'src str,

	/// Digits of the number of sides
	pub sides: &'src str,

	/// Sign and digits of the modifier, if any
	pub modifier: Option<(char, &'src str)>,

	/// Digits of the success threshold and its trailing direction marker, if any
	pub threshold: Option<(&'src str, Option<char>)>,
}

/// Generates a parser that recognizes dice notation like "2d20", "3d6+2", or "1d20-1|15-", and expects end of input.
/// Surrounding whitespace is ignored.
///
/// The grammar is `<count>d<sides>[(+|-)<modifier>][|<threshold>[+|-]]`. Numbers are left as their digits; see
/// [`NotationParser`] for turning the result into a validated [`RollSpec`].
///
/// # Examples
/// ```
/// use chumsky::Parser;
/// use ddroller::parse::{notation, Notation};
///
/// let parsed = notation().parse("2d20+3|15-").into_output();
/// assert_eq!(
/// 	parsed,
/// 	Some(Notation {
/// 		count: "2",
/// 		sides: "20",
/// 		modifier: Some(('+', "3")),
/// 		threshold: Some(("15", Some('-'))),
/// 	})
/// );
/// ```
pub fn notation<'src>() -> impl Parser<'src, &'src str, Notation<'src>, extra::Err<Rich<'src, char>>> + Clone {
	// Parser for unsigned decimal numbers (leading zeros are allowed)
	let number = text::digits(10).to_slice();

	// Parser for the sign of a modifier or the direction marker of a threshold
	let sign = one_of("+-");

	// Parser for the modifier (e.g. +2, -1)
	let modifier = sign.clone().then(number.clone());

	// Parser for the success threshold (e.g. |15, |15+, |15-)
	let threshold = just('|').ignore_then(number.clone()).then(sign.or_not());

	number
		.clone()
		.then_ignore(one_of("dD"))
		.then(number)
		.then(modifier.or_not())
		.then(threshold.or_not())
		.map(|(((count, sides), modifier), threshold)| Notation {
			count,
			sides,
			modifier,
			threshold,
		})
		.padded()
		.then_ignore(end())
}

/// Parses roll requests written in dice notation and validates them against a [`Config`].
///
/// # Examples
/// ```
/// use ddroller::{Config, NotationParser, ParseError};
///
/// let parser = NotationParser::new(Config::builder().max_dice(4).side(6).build());
/// assert!(parser.parse("4d6").is_ok());
/// assert!(matches!(parser.parse("5d6"), Err(ParseError::RequestTooLarge { limit: 4 })));
/// assert!(matches!(parser.parse("1d20"), Err(ParseError::UnsupportedDice { .. })));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotationParser {
	/// Limits that parsed requests are validated against
	config: Config,
}

impl NotationParser {
	/// Creates a new parser that validates requests against the given config.
	#[must_use]
	#[inline]
	pub const fn new(config: Config) -> Self {
		Self { config }
	}

	/// Gets the config that requests are validated against.
	#[must_use]
	#[inline]
	pub const fn config(&self) -> &Config {
		&self.config
	}

	/// Parses a roll request into a validated roll spec. The spec's text is the request exactly as given.
	///
	/// When a request has more than one problem, only one is reported, checked in this order:
	/// 1. [`ParseError::UnsupportedFormat`] if the text doesn't match the notation grammar, requests zero dice, or has a
	///    modifier or threshold too large to represent
	/// 2. [`ParseError::RequestTooLarge`] if more dice are requested than the configured limit
	/// 3. [`ParseError::UnsupportedDice`] if the number of sides isn't one of the configured sides
	///
	/// # Errors
	/// If any of the above problems are found with the request, the corresponding error variant is returned.
	///
	/// # Examples
	/// ```
	/// use ddroller::{NotationParser, ParseError};
	///
	/// let parser = NotationParser::default();
	///
	/// let spec = parser.parse("1d20|15-")?;
	/// assert_eq!(spec.threshold, -15);
	///
	/// // Both too large and unsupported, but the size is checked first
	/// assert!(matches!(parser.parse("2000d7"), Err(ParseError::RequestTooLarge { .. })));
	/// # Ok::<(), ParseError>(())
	/// ```
	pub fn parse(&self, text: &str) -> Result<RollSpec, ParseError> {
		let result = notation()
			.parse(text)
			.into_result()
			.map_err(|errs| ParseError::from_rich(text, &errs))
			.and_then(|parsed| self.validate(text, parsed));

		match &result {
			Ok(spec) => tracing::debug!(text, %spec, "parsed roll request"),
			Err(err) => tracing::trace!(text, error = %err, "rejected roll request"),
		}

		result
	}

	/// Converts the pieces of matched notation into a roll spec, checking it against the config.
	fn validate(&self, text: &str, parsed: Notation<'_>) -> Result<RollSpec, ParseError> {
		let whole = 0..text.len();

		let modifier = match parsed.modifier {
			Some((sign, digits)) => {
				let val = digits.parse::<i64>().map_err(|_err| ParseError::UnsupportedFormat {
					span: whole.clone(),
					reason: String::from("modifier is too large"),
				})?;
				if sign == '-' {
					val.saturating_neg()
				} else {
					val
				}
			}
			None => 0,
		};

		let threshold = match parsed.threshold {
			Some((digits, marker)) => {
				let val = digits.parse::<i64>().map_err(|_err| ParseError::UnsupportedFormat {
					span: whole.clone(),
					reason: String::from("success threshold is too large"),
				})?;
				if marker == Some('-') {
					val.saturating_neg()
				} else {
					val
				}
			}
			None => 0,
		};

		// Digits that don't fit the count type are necessarily over any limit
		let count = parsed.count.parse::<u32>().map_err(|_err| ParseError::RequestTooLarge {
			limit: self.config.max_dice,
		})?;
		if count == 0 {
			return Err(ParseError::UnsupportedFormat {
				span: whole,
				reason: String::from("at least one die must be rolled"),
			});
		}
		if !self.config.allows_count(count) {
			return Err(ParseError::RequestTooLarge {
				limit: self.config.max_dice,
			});
		}

		let sides = parsed
			.sides
			.parse::<u32>()
			.ok()
			.filter(|&sides| self.config.supports(sides))
			.ok_or_else(|| ParseError::UnsupportedDice {
				sides: trim_leading_zeros(parsed.sides).to_string(),
			})?;

		Ok(RollSpec {
			count,
			sides,
			modifier,
			threshold,
			text: text.to_string(),
		})
	}
}

/// Strips any zero padding from a string of digits, leaving at least one digit.
fn trim_leading_zeros(digits: &str) -> &str {
	let trimmed = digits.trim_start_matches('0');
	if trimmed.is_empty() && !digits.is_empty() {
		"0"
	} else {
		trimmed
	}
}

/// An error resulting from parsing a roll request
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
	/// The request isn't written in dice notation.
	///
	/// # Examples
	/// ```
	/// use ddroller::ParseError;
	///
	/// assert!(matches!(ddroller::parse("roll a d20"), Err(ParseError::UnsupportedFormat { .. })));
	/// ```
	#[error(
		"your request was not in valid dice roll syntax ({reason}); format your request in the style of 2d20, which \
		 rolls two dice with 20 sides each"
	)]
	UnsupportedFormat {
		/// Byte range of the request where the problem was found
		span: Range<usize>,

		/// Short description of the problem
		reason: String,
	},

	/// The request asks for more dice than allowed.
	///
	/// # Examples
	/// ```
	/// use ddroller::ParseError;
	///
	/// let err = ddroller::parse("2000d6").unwrap_err();
	/// assert_eq!(err.to_string(), "cannot roll more than 1000 dice");
	/// ```
	#[error("cannot roll more than {limit} dice")]
	RequestTooLarge {
		/// Maximum number of dice allowed
		limit: u32,
	},

	/// The request asks for dice with a number of sides that isn't allowed.
	///
	/// # Examples
	/// ```
	/// use ddroller::ParseError;
	///
	/// let err = ddroller::parse("5d7").unwrap_err();
	/// assert_eq!(err.to_string(), "cannot roll dice with 7 sides");
	/// ```
	#[error("cannot roll dice with {sides} sides")]
	UnsupportedDice {
		/// Requested number of sides, without any zero padding
		sides: String,
	},
}

impl ParseError {
	/// Creates an [`Self::UnsupportedFormat`] error from the errors produced by the notation grammar, using the first
	/// error's location and combining all of their messages.
	fn from_rich(text: &str, errs: &[Rich<'_, char>]) -> Self {
		let span = errs
			.first()
			.map_or(0..text.len(), |err| err.span().start()..err.span().end());
		let reason = errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
		Self::UnsupportedFormat { span, reason }
	}
}

impl FromStr for RollSpec {
	type Err = ParseError;

	/// Parses a roll request using the [default configuration](Config::default()). See [`NotationParser::parse()`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		NotationParser::default().parse(s)
	}
}
