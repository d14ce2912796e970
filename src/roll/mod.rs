//! Roll specifications, rolling them, and working with their outcomes.
//!
//! A [`RollSpec`] is usually obtained by parsing dice notation (see [`NotationParser`]), then rolled with a
//! [`Roller`] to produce a [`RollOutcome`].
//!
//! [`NotationParser`]: crate::parse::NotationParser

pub mod roller;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::roller::Roller;

/// Builds a description of a value, optionally truncating any lists of items contained within it.
pub trait Describe {
	/// Builds a string describing the value. If `list_limit` is given, any lists of items in the description should be
	/// truncated to that many items.
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// A validated request to roll some dice: how many, how many sides each, what to add to their sum, and what the
/// total needs to reach to count as a success.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct RollSpec {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,

	/// Amount to add to the sum of the rolled dice
	pub modifier: i64,

	/// Success threshold. A positive value succeeds at or above it, a negative value succeeds at or below its absolute
	/// value, and zero means no threshold was requested. See [`Self::threshold()`] for a friendlier form.
	pub threshold: i64,

	/// Text of the request exactly as it was received
	pub text: String,
}

impl RollSpec {
	/// Creates a new spec for plain dice with a given count and number of sides, with no modifier or threshold.
	/// The spec's text is set to its canonical notation.
	#[must_use]
	pub fn new(count: u32, sides: u32) -> Self {
		Self::builder().count(count).sides(sides).build()
	}

	/// Creates a new roll spec builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Interprets [`Self::threshold`], returning `None` if there isn't one.
	#[must_use]
	#[inline]
	pub const fn threshold(&self) -> Option<Threshold> {
		Threshold::from_signed(self.threshold)
	}

	/// Formats the modifier with an explicit sign, even when it is zero.
	///
	/// # Examples
	/// ```
	/// use ddroller::RollSpec;
	///
	/// assert_eq!(RollSpec::new(1, 20).modifier_label(), "+0");
	/// assert_eq!(RollSpec::builder().count(1).sides(20).modifier(-2).build().modifier_label(), "-2");
	/// ```
	#[must_use]
	pub fn modifier_label(&self) -> String {
		format!("{:+}", self.modifier)
	}

	/// Formats the threshold with its direction marker after it (`15+` or `15-`), or `∅` if there is no threshold.
	///
	/// # Examples
	/// ```
	/// use ddroller::RollSpec;
	///
	/// assert_eq!(RollSpec::new(1, 20).threshold_label(), "∅");
	/// assert_eq!(RollSpec::builder().count(1).sides(20).threshold(-15).build().threshold_label(), "15-");
	/// ```
	#[must_use]
	pub fn threshold_label(&self) -> String {
		self.threshold()
			.map_or_else(|| String::from("∅"), |threshold| threshold.to_string())
	}

	/// Rolls the dice using the given roller and totals them up.
	///
	/// Each die is rolled in order, and the resulting values are kept in that order. The roller is expected to only
	/// produce values between 1 and [`Self::sides`] (inclusive).
	///
	/// # Examples
	/// ```
	/// use ddroller::{roll::roller::Iter as IterRoller, RollSpec, Verdict};
	///
	/// let spec = RollSpec::builder().count(3).sides(6).modifier(2).threshold(10).build();
	/// let outcome = spec.roll(&mut IterRoller::new([4, 5, 6]));
	/// assert_eq!(outcome.rolls, vec![4, 5, 6]);
	/// assert_eq!(outcome.total, 17);
	/// assert_eq!(outcome.verdict, Verdict::Succeeded);
	/// ```
	pub fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> RollOutcome {
		let mut rolls = Vec::with_capacity(self.count as usize);
		for _ in 0..self.count {
			let val = roller.roll_die(self.sides);
			debug_assert!(
				(1..=self.sides).contains(&val),
				"roller produced {val} for a die with {} sides",
				self.sides
			);
			rolls.push(val);
		}

		let outcome = RollOutcome::from_spec_and_rolls(self, rolls);
		tracing::debug!(
			spec = %self,
			total = outcome.total,
			verdict = %outcome.verdict,
			"rolled dice"
		);
		outcome
	}
}

impl Default for RollSpec {
	/// Creates the default roll spec (1d20).
	fn default() -> Self {
		Self {
			count: 1,
			sides: 20,
			modifier: 0,
			threshold: 0,
			text: String::from("1d20"),
		}
	}
}

impl Describe for RollSpec {
	/// Builds the canonical notation for the spec. `list_limit` has no effect.
	fn describe(&self, _list_limit: Option<usize>) -> String {
		self.to_string()
	}
}

impl fmt::Display for RollSpec {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is the canonical notation for the spec, which parses back into an equivalent spec. The modifier is
	/// omitted when it is zero, and the threshold is omitted when there isn't one.
	///
	/// # Examples
	/// ```
	/// use ddroller::RollSpec;
	///
	/// let spec = RollSpec::builder().count(2).sides(20).modifier(3).threshold(-15).build();
	/// assert_eq!(spec.to_string(), "2d20+3|15-");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)?;
		if self.modifier != 0 {
			write!(f, "{:+}", self.modifier)?;
		}
		match self.threshold() {
			Some(Threshold::AtLeast(val)) => write!(f, "|{val}"),
			Some(Threshold::AtMost(val)) => write!(f, "|{val}-"),
			None => Ok(()),
		}
	}
}

/// Builds a [`RollSpec`] with a fluent interface.
///
/// # Examples
/// ```
/// use ddroller::RollSpec;
///
/// let spec = RollSpec::builder().count(2).sides(8).modifier(1).build();
/// assert_eq!((spec.count, spec.sides, spec.modifier, spec.threshold), (2, 8, 1, 0));
/// assert_eq!(spec.text, "2d8+1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
	/// Spec being built
	spec: RollSpec,

	/// Whether the text has been explicitly set
	has_text: bool,
}

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub const fn count(mut self, count: u32) -> Self {
		self.spec.count = count;
		self
	}

	/// Sets the number of sides per die.
	#[must_use]
	pub const fn sides(mut self, sides: u32) -> Self {
		self.spec.sides = sides;
		self
	}

	/// Sets the amount to add to the sum of the dice.
	#[must_use]
	pub const fn modifier(mut self, modifier: i64) -> Self {
		self.spec.modifier = modifier;
		self
	}

	/// Sets the success threshold (in its signed form, see [`RollSpec::threshold`]).
	#[must_use]
	pub const fn threshold(mut self, threshold: i64) -> Self {
		self.spec.threshold = threshold;
		self
	}

	/// Sets the original request text. If this isn't called, the canonical notation is used.
	#[must_use]
	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.spec.text = text.into();
		self.has_text = true;
		self
	}

	/// Finalizes the roll spec.
	#[must_use]
	pub fn build(mut self) -> RollSpec {
		if !self.has_text {
			self.spec.text = self.spec.to_string();
		}
		self.spec
	}
}

/// Target that the total of a roll must meet in order to succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Threshold {
	/// Succeed when the total is at or above the value
	AtLeast(u64),

	/// Succeed when the total is at or below the value
	AtMost(u64),
}

impl Threshold {
	/// Interprets a signed threshold: positive values are [`Self::AtLeast`], negative values are [`Self::AtMost`] their
	/// absolute value, and zero is no threshold at all.
	///
	/// # Examples
	/// ```
	/// use ddroller::roll::Threshold;
	///
	/// assert_eq!(Threshold::from_signed(15), Some(Threshold::AtLeast(15)));
	/// assert_eq!(Threshold::from_signed(-15), Some(Threshold::AtMost(15)));
	/// assert_eq!(Threshold::from_signed(0), None);
	/// ```
	#[must_use]
	pub const fn from_signed(val: i64) -> Option<Self> {
		match val {
			0 => None,
			1.. => Some(Self::AtLeast(val.unsigned_abs())),
			_ => Some(Self::AtMost(val.unsigned_abs())),
		}
	}

	/// Converts the threshold into its signed form, saturating at the bounds of [`i64`].
	#[must_use]
	pub fn to_signed(self) -> i64 {
		match self {
			Self::AtLeast(val) => i64::try_from(val).unwrap_or(i64::MAX),
			Self::AtMost(val) => i64::try_from(val).map_or(i64::MIN, i64::saturating_neg),
		}
	}

	/// Checks whether a total meets the threshold.
	#[must_use]
	pub fn is_met_by(self, total: i64) -> bool {
		match self {
			Self::AtLeast(val) => u64::try_from(total).is_ok_and(|total| total >= val),
			Self::AtMost(val) => u64::try_from(total).map_or(true, |total| total <= val),
		}
	}
}

impl fmt::Display for Threshold {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The threshold is written as its value followed by `+` for [`Self::AtLeast`] or `-` for [`Self::AtMost`].
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AtLeast(val) => write!(f, "{val}+"),
			Self::AtMost(val) => write!(f, "{val}-"),
		}
	}
}

/// Judgment of whether a roll succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[expect(clippy::exhaustive_enums, reason = "A roll can only succeed, fail, or not be judged")]
pub enum Verdict {
	/// The total met the threshold
	Succeeded,

	/// The total did not meet the threshold
	Failed,

	/// No threshold was requested
	NoThreshold,
}

impl Verdict {
	/// Judges a total against an optional threshold.
	#[must_use]
	pub fn judge(threshold: Option<Threshold>, total: i64) -> Self {
		match threshold {
			Some(threshold) if threshold.is_met_by(total) => Self::Succeeded,
			Some(_) => Self::Failed,
			None => Self::NoThreshold,
		}
	}

	/// Converts the verdict to a signed integer: 1 for success, -1 for failure, and 0 when there was no threshold.
	#[must_use]
	pub const fn as_sign(self) -> i8 {
		match self {
			Self::Succeeded => 1,
			Self::Failed => -1,
			Self::NoThreshold => 0,
		}
	}
}

impl fmt::Display for Verdict {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Succeeded => "SUCCESS",
			Self::Failed => "FAILURE",
			Self::NoThreshold => "RESULT",
		})
	}
}

/// Representation of the result from rolling a [`RollSpec`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct RollOutcome {
	/// Value of each individual die, in the order they were rolled
	pub rolls: Vec<u32>,

	/// Sum of all of the rolls plus the spec's modifier
	pub total: i64,

	/// Whether the total met the spec's threshold
	pub verdict: Verdict,
}

impl RollOutcome {
	/// Creates an outcome from a spec and the values that were rolled for it, calculating the total and verdict.
	/// The total saturates at the bounds of [`i64`] rather than overflowing.
	///
	/// # Examples
	/// ```
	/// use ddroller::{RollOutcome, RollSpec, Verdict};
	///
	/// let spec = RollSpec::builder().count(1).sides(20).threshold(-15).build();
	/// let outcome = RollOutcome::from_spec_and_rolls(&spec, [10]);
	/// assert_eq!(outcome.total, 10);
	/// assert_eq!(outcome.verdict, Verdict::Succeeded);
	/// ```
	#[must_use]
	pub fn from_spec_and_rolls(spec: &RollSpec, rolls: impl IntoIterator<Item = u32>) -> Self {
		let rolls: Vec<u32> = rolls.into_iter().collect();
		let total = rolls
			.iter()
			.fold(spec.modifier, |sum, &val| sum.saturating_add(i64::from(val)));

		Self {
			rolls,
			total,
			verdict: Verdict::judge(spec.threshold(), total),
		}
	}

	/// Builds a string of the spec the outcome is from, a list of all of the individual rolled dice, the total, and
	/// the verdict.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use ddroller::{RollOutcome, RollSpec};
	///
	/// let spec = RollSpec::builder().count(3).sides(6).modifier(2).threshold(10).build();
	/// let outcome = RollOutcome::from_spec_and_rolls(&spec, [4, 5, 6]);
	/// assert_eq!(outcome.describe_for(&spec, None), "3d6+2|10[4, 5, 6] = 17 (SUCCESS)");
	/// assert_eq!(outcome.describe_for(&spec, Some(1)), "3d6+2|10[4, 2 more...] = 17 (SUCCESS)");
	/// assert_eq!(outcome.describe_for(&spec, Some(0)), "3d6+2|10[3 more...] = 17 (SUCCESS)");
	/// ```
	#[must_use]
	pub fn describe_for(&self, spec: &RollSpec, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let mut listed = self
			.rolls
			.iter()
			.take(list_limit)
			.map(ToString::to_string)
			.collect::<Vec<_>>();

		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);
		if truncated_rolls > 0 {
			listed.push(format!("{truncated_rolls} more..."));
		}

		format!(
			"{}[{}] = {} ({})",
			spec,
			listed.join(", "),
			self.total,
			self.verdict
		)
	}
}
