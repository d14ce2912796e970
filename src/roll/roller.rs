//! Abstractions for rolling individual dice using various sources of randomness.

use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{RollOutcome, RollSpec};

/// Rolls dice - what else is there to say?
///
/// Rollers are owned by the caller and passed into each roll, so concurrent rolls can each use their own roller
/// without any shared state.
pub trait Roller {
	/// Rolls a single die, producing a value between 1 and `sides` (inclusive).
	#[must_use]
	fn roll_die(&mut self, sides: u32) -> u32;

	/// Rolls all of the dice in a roll spec. This is the same as calling [`RollSpec::roll()`] with this roller.
	fn roll(&mut self, spec: &RollSpec) -> RollOutcome {
		spec.roll(self)
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use ddroller::{roll::roller::{FastRand as FastRandRoller, Roller}, RollSpec};
///
/// let mut roller = FastRandRoller::default();
///
/// let spec = RollSpec::new(4, 6);
/// let outcome = roller.roll(&spec);
/// assert_eq!(outcome.rolls.len(), 4);
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use ddroller::{roll::roller::{FastRand as FastRandRoller, Roller}, RollSpec};
///
/// let spec = RollSpec::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&spec);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&spec);
/// assert_eq!(first, second);
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		if sides > 0 {
			self.0.u32(1..=sides)
		} else {
			0
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use ddroller::{roll::roller::{Roller, Val as ValRoller}, RollSpec};
///
/// let outcome = ValRoller(3).roll(&RollSpec::new(4, 6));
/// assert_eq!(outcome.rolls, vec![3, 3, 3, 3]);
/// assert_eq!(outcome.total, 12);
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use ddroller::{roll::roller::{Max as MaxRoller, Roller}, RollSpec};
///
/// let outcome = MaxRoller.roll(&RollSpec::new(2, 20));
/// assert_eq!(outcome.rolls, vec![20, 20]);
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		sides
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use ddroller::{roll::roller::{Iter as IterRoller, Roller}, RollSpec};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 5]);
/// assert_eq!(roller.roll(&RollSpec::new(3, 6)).rolls, vec![1, 2, 3]);
/// assert_eq!(roller.roll(&RollSpec::new(2, 6)).rolls, vec![4, 5]);
/// assert!(!roller.can_roll());
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
