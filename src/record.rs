//! Stored rolls and the collaborators responsible for numbering and keeping them.
//!
//! Storage itself lives outside of this crate. The [`Sequencer`] and [`RecordStore`] traits describe what a storage
//! backend needs to provide, and [`MemoryStore`] (with the `std` feature) is a simple in-memory implementation.

use alloc::{string::String, vec::Vec};
use core::sync::atomic::{AtomicU64, Ordering};

use crate::{
	roll::{Describe, RollOutcome, RollSpec},
	slug::{self, DecodeError, Slug},
};

/// Maximum (and default) number of records returned by a [`RecentQuery`]
pub const RECENT_LIMIT: usize = 20;

/// A roll that has been performed and saved, along with who performed it and when
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct RollRecord {
	/// Sequence number assigned when the record was saved
	pub seq: u64,

	/// Identifier of the user that performed the roll
	pub user: String,

	/// When the roll was performed, in seconds since the Unix epoch
	pub timestamp: u64,

	/// What was requested
	pub spec: RollSpec,

	/// What was rolled
	pub outcome: RollOutcome,
}

impl RollRecord {
	/// Creates a new record.
	#[must_use]
	pub fn new(seq: u64, user: impl Into<String>, timestamp: u64, spec: RollSpec, outcome: RollOutcome) -> Self {
		Self {
			seq,
			user: user.into(),
			timestamp,
			spec,
			outcome,
		}
	}

	/// Gets the public identifier for the record.
	#[must_use]
	#[inline]
	pub const fn slug(&self) -> Slug {
		Slug::new(self.seq)
	}
}

impl Describe for RollRecord {
	/// Builds a description of the roll. See [`RollOutcome::describe_for()`].
	fn describe(&self, list_limit: Option<usize>) -> String {
		self.outcome.describe_for(&self.spec, list_limit)
	}
}

/// Hands out sequence numbers for new records.
///
/// Every call to [`Self::next_seq()`] must return a number greater than any it has returned before, even when called
/// concurrently, so that no two records are ever assigned the same number.
pub trait Sequencer {
	/// Allocates the next sequence number.
	///
	/// # Errors
	/// If no more sequence numbers can be allocated, an error variant is returned.
	fn next_seq(&self) -> Result<u64, RecordError>;
}

/// Sequencer backed by an atomic counter
///
/// # Examples
/// ```
/// use ddroller::record::{AtomicSequencer, Sequencer};
///
/// let sequencer = AtomicSequencer::default();
/// assert_eq!(sequencer.next_seq()?, 1);
/// assert_eq!(sequencer.next_seq()?, 2);
///
/// let sequencer = AtomicSequencer::starting_after(41);
/// assert_eq!(sequencer.next_seq()?, 42);
/// # Ok::<(), ddroller::record::RecordError>(())
/// ```
#[derive(Debug, Default)]
pub struct AtomicSequencer(AtomicU64);

impl AtomicSequencer {
	/// Creates a sequencer whose first sequence number is one past the given number.
	#[must_use]
	#[inline]
	pub const fn starting_after(last: u64) -> Self {
		Self(AtomicU64::new(last))
	}

	/// Gets the most recently allocated sequence number, or the starting point if none have been allocated yet.
	#[must_use]
	#[inline]
	pub fn current(&self) -> u64 {
		self.0.load(Ordering::SeqCst)
	}
}

impl Sequencer for AtomicSequencer {
	fn next_seq(&self) -> Result<u64, RecordError> {
		self.0
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |seq| seq.checked_add(1))
			.ok()
			.and_then(|prev| prev.checked_add(1))
			.ok_or(RecordError::Exhausted)
	}
}

/// Filter for listing recently saved records
///
/// When [`Self::since`] is set, the records numbered after it are listed oldest first. Otherwise, the newest records are
/// listed newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct RecentQuery {
	/// Only list records from this user
	pub user: Option<String>,

	/// Only list records with a sequence number greater than this
	pub since: Option<u64>,

	/// Maximum number of records to list. Zero or anything above [`RECENT_LIMIT`] means [`RECENT_LIMIT`].
	pub limit: usize,
}

impl RecentQuery {
	/// Creates a query for the most recent records from anyone.
	#[must_use]
	#[inline]
	pub fn new() -> Self {
		Self::default()
	}

	/// Restricts the query to records from a single user.
	#[must_use]
	pub fn user(mut self, user: impl Into<String>) -> Self {
		self.user = Some(user.into());
		self
	}

	/// Restricts the query to records numbered after the given sequence number.
	#[must_use]
	pub const fn since(mut self, seq: u64) -> Self {
		self.since = Some(seq);
		self
	}

	/// Sets the maximum number of records to list.
	#[must_use]
	pub const fn limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}

	/// Gets the number of records that will actually be listed at most.
	#[must_use]
	pub const fn effective_limit(&self) -> usize {
		if self.limit == 0 || self.limit > RECENT_LIMIT {
			RECENT_LIMIT
		} else {
			self.limit
		}
	}

	/// Checks whether a record passes the query's filters (not accounting for the limit).
	#[must_use]
	pub fn matches(&self, record: &RollRecord) -> bool {
		self.user.as_ref().map_or(true, |user| *user == record.user)
			&& self.since.map_or(true, |since| record.seq > since)
	}
}

/// Keeps roll records, keyed by their sequence numbers.
pub trait RecordStore {
	/// Saves a record.
	///
	/// # Errors
	/// If a record with the same sequence number has already been saved, or the store fails, an error variant is
	/// returned.
	fn insert(&self, record: RollRecord) -> Result<(), RecordError>;

	/// Retrieves a record by its sequence number.
	///
	/// # Errors
	/// If there is no record with the sequence number, or the store fails, an error variant is returned.
	fn get(&self, seq: u64) -> Result<RollRecord, RecordError>;

	/// Lists recently saved records matching a query.
	///
	/// # Errors
	/// If the store fails, an error variant is returned.
	fn recent(&self, query: &RecentQuery) -> Result<Vec<RollRecord>, RecordError>;

	/// Retrieves a record by its public identifier.
	///
	/// # Errors
	/// If the identifier can't be decoded, there is no matching record, or the store fails, an error variant is returned.
	fn get_by_slug(&self, slug: &str) -> Result<RollRecord, RecordError> {
		self.get(slug::decode(slug)?)
	}
}

/// Numbers a performed roll with the next sequence number and saves it.
///
/// # Errors
/// If a sequence number can't be allocated or the record can't be saved, an error variant is returned.
///
/// # Examples
/// ```
/// use ddroller::{
/// 	record::{self, AtomicSequencer, MemoryStore, RecordStore},
/// 	roll::roller::Val as ValRoller,
/// };
///
/// let store = MemoryStore::new();
/// let sequencer = AtomicSequencer::default();
///
/// let spec = ddroller::parse("2d6")?;
/// let outcome = spec.roll(&mut ValRoller(3));
/// let record = record::save(&store, &sequencer, "w8kerr", 1_700_000_000, spec, outcome)?;
///
/// assert_eq!(record.slug().to_string(), "0001");
/// assert_eq!(store.get_by_slug("0001")?, record);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn save<S, Q>(
	store: &S,
	sequencer: &Q,
	user: impl Into<String>,
	timestamp: u64,
	spec: RollSpec,
	outcome: RollOutcome,
) -> Result<RollRecord, RecordError>
where
	S: RecordStore + ?Sized,
	Q: Sequencer + ?Sized,
{
	let record = RollRecord::new(sequencer.next_seq()?, user, timestamp, spec, outcome);
	store.insert(record.clone())?;
	tracing::debug!(seq = record.seq, slug = %record.slug(), user = %record.user, "saved roll record");
	Ok(record)
}

#[cfg(feature = "std")]
pub use self::memory::MemoryStore;

/// In-memory record storage. Requires the `std` feature (enabled by default).
#[cfg(feature = "std")]
mod memory {
	use alloc::{collections::BTreeMap, vec::Vec};
	use core::ops::Bound;
	use std::sync::{Mutex, MutexGuard};

	use super::{RecentQuery, RecordError, RecordStore, RollRecord};

	/// Record store that keeps everything in memory, mainly useful for testing and short-lived processes.
	/// It is safe to share between threads.
	#[derive(Debug, Default)]
	pub struct MemoryStore(Mutex<BTreeMap<u64, RollRecord>>);

	impl MemoryStore {
		/// Creates a new empty store.
		#[must_use]
		#[inline]
		pub fn new() -> Self {
			Self::default()
		}

		/// Gets the number of records in the store.
		///
		/// # Errors
		/// If the store's lock has been poisoned, an error variant is returned.
		pub fn len(&self) -> Result<usize, RecordError> {
			Ok(self.lock()?.len())
		}

		/// Checks whether the store has no records.
		///
		/// # Errors
		/// If the store's lock has been poisoned, an error variant is returned.
		pub fn is_empty(&self) -> Result<bool, RecordError> {
			Ok(self.lock()?.is_empty())
		}

		/// Locks the records for access.
		fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<u64, RollRecord>>, RecordError> {
			self.0.lock().map_err(|_err| RecordError::Poisoned)
		}
	}

	impl RecordStore for MemoryStore {
		fn insert(&self, record: RollRecord) -> Result<(), RecordError> {
			let mut records = self.lock()?;
			if records.contains_key(&record.seq) {
				return Err(RecordError::Duplicate(record.seq));
			}
			records.insert(record.seq, record);
			Ok(())
		}

		fn get(&self, seq: u64) -> Result<RollRecord, RecordError> {
			self.lock()?.get(&seq).cloned().ok_or(RecordError::NotFound(seq))
		}

		fn recent(&self, query: &RecentQuery) -> Result<Vec<RollRecord>, RecordError> {
			let records = self.lock()?;
			let limit = query.effective_limit();

			let found = match query.since {
				Some(since) => records
					.range((Bound::Excluded(since), Bound::Unbounded))
					.map(|(_, record)| record)
					.filter(|record| query.matches(record))
					.take(limit)
					.cloned()
					.collect(),
				None => records
					.values()
					.rev()
					.filter(|record| query.matches(record))
					.take(limit)
					.cloned()
					.collect(),
			};

			Ok(found)
		}
	}
}

/// An error resulting from numbering, saving, or retrieving roll records
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
	/// There is no record with the sequence number.
	#[error("no roll found with sequence number {0}")]
	NotFound(u64),

	/// A record with the sequence number has already been saved.
	#[error("a roll with sequence number {0} has already been saved")]
	Duplicate(u64),

	/// The sequencer has run out of sequence numbers.
	#[error("no more roll sequence numbers are available")]
	Exhausted,

	/// A public identifier couldn't be decoded.
	#[error("invalid roll identifier: {0}")]
	Slug(#[from] DecodeError),

	/// The store's lock was poisoned by a panic in another thread.
	#[error("roll store lock was poisoned")]
	Poisoned,
}
