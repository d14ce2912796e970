//! Short public identifiers for stored rolls.
//!
//! Roll records are numbered with a strictly increasing sequence number. Rather than exposing that number directly in
//! permalinks, it is written in base 36 (`0`-`9` then `a`-`z`) and padded with zeros to at least [`MIN_SLUG_LEN`]
//! characters.

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

/// Minimum number of characters in an encoded identifier
pub const MIN_SLUG_LEN: usize = 4;

/// Number base that identifiers are written in
const RADIX: u32 = 36;

/// Encodes a sequence number as an identifier. Larger numbers simply produce longer identifiers.
///
/// # Examples
/// ```
/// use ddroller::slug;
///
/// assert_eq!(slug::encode(5), "0005");
/// assert_eq!(slug::encode(36), "0010");
/// assert_eq!(slug::encode(u64::MAX), "3w5e11264sgsf");
/// ```
#[must_use]
pub fn encode(mut seq: u64) -> String {
	let mut digits = Vec::with_capacity(13);
	while seq > 0 {
		let digit = u32::try_from(seq % u64::from(RADIX)).unwrap_or_default();
		digits.push(char::from_digit(digit, RADIX).unwrap_or('0'));
		seq /= u64::from(RADIX);
	}
	while digits.len() < MIN_SLUG_LEN {
		digits.push('0');
	}
	digits.iter().rev().collect()
}

/// Decodes an identifier back into a sequence number. Digits may be upper or lower case, and any amount of zero padding
/// is accepted, so differently-padded identifiers can decode to the same number.
///
/// # Errors
/// If the identifier is empty, contains any characters that aren't base-36 digits, or represents a number too large for
/// a [`u64`], an error variant is returned.
///
/// # Examples
/// ```
/// use ddroller::slug::{self, DecodeError};
///
/// assert_eq!(slug::decode("0005")?, 5);
/// assert_eq!(slug::decode("5")?, 5);
/// assert_eq!(slug::decode("00ZZ")?, 1295);
/// assert_eq!(slug::decode("00-5"), Err(DecodeError::InvalidCharacter { ch: '-', index: 2 }));
/// # Ok::<(), DecodeError>(())
/// ```
pub fn decode(slug: &str) -> Result<u64, DecodeError> {
	if slug.is_empty() {
		return Err(DecodeError::Empty);
	}

	slug.char_indices().try_fold(0_u64, |seq, (index, ch)| {
		let digit = ch
			.to_digit(RADIX)
			.ok_or(DecodeError::InvalidCharacter { ch, index })?;
		seq.checked_mul(u64::from(RADIX))
			.and_then(|seq| seq.checked_add(u64::from(digit)))
			.ok_or(DecodeError::Overflow)
	})
}

/// A roll record sequence number that is displayed and parsed as its encoded identifier.
///
/// # Examples
/// ```
/// use ddroller::Slug;
///
/// let slug: Slug = "00a1".parse()?;
/// assert_eq!(slug.get(), 361);
/// assert_eq!(slug.to_string(), "00a1");
/// assert_eq!(Slug::new(5).to_string(), "0005");
/// # Ok::<(), ddroller::DecodeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[expect(clippy::exhaustive_structs, reason = "Plain wrapper around a sequence number")]
pub struct Slug(pub u64);

impl Slug {
	/// Wraps a sequence number.
	#[must_use]
	#[inline]
	pub const fn new(seq: u64) -> Self {
		Self(seq)
	}

	/// Gets the wrapped sequence number.
	#[must_use]
	#[inline]
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl From<u64> for Slug {
	#[inline]
	fn from(seq: u64) -> Self {
		Self(seq)
	}
}

impl From<Slug> for u64 {
	#[inline]
	fn from(slug: Slug) -> Self {
		slug.0
	}
}

impl fmt::Display for Slug {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&encode(self.0))
	}
}

impl FromStr for Slug {
	type Err = DecodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		decode(s).map(Self)
	}
}

/// An error resulting from decoding an identifier
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
	/// The identifier contains a character that isn't a base-36 digit.
	#[error("invalid character {ch:?} at position {index} in roll identifier")]
	InvalidCharacter {
		/// Offending character
		ch: char,

		/// Byte offset of the character in the identifier
		index: usize,
	},

	/// The identifier is empty.
	#[error("roll identifier is empty")]
	Empty,

	/// The identifier represents a number too large to be a sequence number.
	#[error("roll identifier is too large")]
	Overflow,
}
