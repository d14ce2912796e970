#![doc = pretty_readme::docify!("README.md", "https://docs.rs/ddroller/latest/ddroller/", "./")]
#![cfg_attr(not(any(doc, test)), no_std)]
#![expect(
	clippy::tabs_in_doc_comments,
	reason = "Consistency with source, user-configurability & accessibility"
)]
#![deny(macro_use_extern_crate, meta_variable_misuse, unit_bindings)]
#![warn(
	explicit_outlives_requirements,
	missing_docs,
	missing_debug_implementations,
	unreachable_pub,
	unused_crate_dependencies,
	unused_qualifications,
	clippy::pedantic,
	clippy::absolute_paths,
	clippy::alloc_instead_of_core,
	clippy::allow_attributes,
	clippy::allow_attributes_without_reason,
	clippy::arithmetic_side_effects,
	clippy::cfg_not_test,
	clippy::clone_on_ref_ptr,
	clippy::cognitive_complexity,
	clippy::dbg_macro,
	clippy::doc_include_without_cfg,
	clippy::empty_enum_variants_with_brackets,
	clippy::empty_structs_with_brackets,
	clippy::exhaustive_enums,
	clippy::exhaustive_structs,
	clippy::exit,
	clippy::expect_used,
	clippy::field_scoped_visibility_modifiers,
	clippy::filetype_is_file,
	clippy::fn_to_numeric_cast_any,
	clippy::get_unwrap,
	clippy::if_then_some_else_none,
	clippy::infinite_loop,
	clippy::lossy_float_literal,
	clippy::map_err_ignore,
	clippy::map_with_unused_argument_over_ranges,
	clippy::missing_const_for_fn,
	clippy::missing_docs_in_private_items,
	clippy::multiple_inherent_impl,
	clippy::mutex_atomic,
	clippy::needless_raw_strings,
	clippy::non_zero_suggestions,
	clippy::panic_in_result_fn,
	clippy::pathbuf_init_then_push,
	clippy::pointer_format,
	clippy::precedence_bits,
	clippy::print_stderr,
	clippy::print_stdout,
	clippy::pub_without_shorthand,
	clippy::rc_buffer,
	clippy::rc_mutex,
	clippy::redundant_test_prefix,
	clippy::redundant_type_annotations,
	clippy::ref_patterns,
	clippy::renamed_function_params,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::return_and_then,
	clippy::same_name_method,
	clippy::self_named_module_files,
	clippy::semicolon_inside_block,
	clippy::std_instead_of_alloc,
	clippy::std_instead_of_core,
	clippy::str_to_string,
	clippy::string_lit_chars_any,
	clippy::suspicious_xor_used_as_pow,
	clippy::tests_outside_test_module,
	clippy::try_err,
	clippy::undocumented_unsafe_blocks,
	clippy::unnecessary_safety_comment,
	clippy::unnecessary_safety_doc,
	clippy::unnecessary_self_imports,
	clippy::unneeded_field_pattern,
	clippy::unused_result_ok,
	clippy::unwrap_in_result,
	clippy::unwrap_used,
	clippy::verbose_file_reads
)]

extern crate alloc;
extern crate core;
#[cfg(all(feature = "std", not(any(doc, test))))]
extern crate std;

pub mod config;
#[cfg(feature = "parse")]
pub mod parse;
pub mod record;
pub mod roll;
pub mod slug;

use alloc::string::String;

pub use config::Config;
#[cfg(feature = "parse")]
pub use parse::{notation as parser, NotationParser, ParseError};
pub use record::RollRecord;
pub use roll::{roller::Roller, RollOutcome, RollSpec, Verdict};
pub use slug::{DecodeError, Slug};

/// Parses a roll request in dice notation using the [default configuration](Config::default()).
///
/// See [`NotationParser::parse()`] for details on the accepted notation and the order in which errors are reported.
///
/// # Errors
/// If the text isn't valid dice notation, requests too many dice, or requests dice with an unsupported number of
/// sides, an error variant is returned.
///
/// # Examples
/// ```
/// use ddroller::ParseError;
///
/// let spec = ddroller::parse("2d20")?;
/// assert_eq!((spec.count, spec.sides, spec.modifier, spec.threshold), (2, 20, 0, 0));
///
/// assert!(matches!(ddroller::parse("2000d6"), Err(ParseError::RequestTooLarge { .. })));
/// assert!(matches!(ddroller::parse("5d7"), Err(ParseError::UnsupportedDice { .. })));
/// # Ok::<(), ParseError>(())
/// ```
#[cfg(feature = "parse")]
#[inline]
pub fn parse(text: &str) -> Result<RollSpec, ParseError> {
	NotationParser::default().parse(text)
}

/// Rolls the dice described by a roll specification using the given roller as the source of randomness.
/// This is a shorthand for [`RollSpec::roll()`].
#[inline]
pub fn evaluate<R: Roller + ?Sized>(spec: &RollSpec, roller: &mut R) -> RollOutcome {
	spec.roll(roller)
}

/// Encodes a roll record sequence number as a public identifier. This is a shorthand for [`slug::encode()`].
#[must_use]
#[inline]
pub fn encode_identifier(seq: u64) -> String {
	slug::encode(seq)
}

/// Decodes a public identifier back into a roll record sequence number. This is a shorthand for [`slug::decode()`].
///
/// # Errors
/// If the identifier is empty, contains anything other than base-36 digits, or is too large to be a sequence number,
/// an error variant is returned.
#[inline]
pub fn decode_identifier(slug: &str) -> Result<u64, DecodeError> {
	slug::decode(slug)
}

#[cfg(test)]
mod tests;

#[cfg(feature = "build-binary")]
use ariadne as _;
#[cfg(feature = "build-binary")]
use clap as _;
#[cfg(feature = "build-binary")]
use tracing_subscriber as _;
