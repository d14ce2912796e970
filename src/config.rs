//! Static limits that roll requests are validated against.

use alloc::collections::BTreeSet;

/// Maximum number of dice that can be rolled in a single request by default
pub const DEFAULT_MAX_DICE: u32 = 1000;

/// Numbers of sides that dice are allowed to have by default (the standard polyhedral set)
pub const DEFAULT_SIDES: [u32; 7] = [2, 4, 6, 8, 10, 12, 20];

/// Limits applied to roll requests when they are parsed.
///
/// # Examples
/// ```
/// use ddroller::Config;
///
/// let config = Config::default();
/// assert_eq!(config.max_dice, 1000);
/// assert!(config.supports(20));
/// assert!(!config.supports(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct Config {
	/// Maximum number of dice allowed in a single request
	pub max_dice: u32,

	/// Allowed numbers of sides per die
	pub sides: BTreeSet<u32>,
}

impl Config {
	/// Creates a new config with the given dice limit and allowed sides.
	#[must_use]
	pub fn new(max_dice: u32, sides: impl IntoIterator<Item = u32>) -> Self {
		Self {
			max_dice,
			sides: sides.into_iter().collect(),
		}
	}

	/// Creates a new config builder, starting out with no allowed sides and the default dice limit.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Checks whether dice with the given number of sides are allowed. Dice with zero sides never are, even if the
	/// config lists them.
	#[must_use]
	#[inline]
	pub fn supports(&self, sides: u32) -> bool {
		sides > 0 && self.sides.contains(&sides)
	}

	/// Checks whether the given number of dice is within the limit.
	#[must_use]
	#[inline]
	pub const fn allows_count(&self, count: u32) -> bool {
		count <= self.max_dice
	}
}

impl Default for Config {
	/// Creates the default config ([`DEFAULT_MAX_DICE`] dice of any of the [`DEFAULT_SIDES`]).
	fn default() -> Self {
		Self::new(DEFAULT_MAX_DICE, DEFAULT_SIDES)
	}
}

/// Builds a [`Config`] with a fluent interface.
///
/// # Examples
/// ```
/// use ddroller::Config;
///
/// let config = Config::builder().max_dice(10).side(6).side(20).build();
/// assert_eq!(config, Config::new(10, [6, 20]));
/// ```
#[derive(Debug, Clone)]
pub struct Builder(Config);

impl Builder {
	/// Sets the maximum number of dice allowed in a single request.
	#[must_use]
	pub const fn max_dice(mut self, max_dice: u32) -> Self {
		self.0.max_dice = max_dice;
		self
	}

	/// Allows dice with the given number of sides.
	#[must_use]
	pub fn side(mut self, sides: u32) -> Self {
		self.0.sides.insert(sides);
		self
	}

	/// Allows dice with any of the given numbers of sides.
	#[must_use]
	pub fn sides(mut self, sides: impl IntoIterator<Item = u32>) -> Self {
		self.0.sides.extend(sides);
		self
	}

	/// Finalizes the config.
	#[must_use]
	pub fn build(self) -> Config {
		self.0
	}
}

impl Default for Builder {
	fn default() -> Self {
		Self(Config::new(DEFAULT_MAX_DICE, []))
	}
}
