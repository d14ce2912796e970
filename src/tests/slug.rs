use crate::slug::{self, DecodeError, Slug, MIN_SLUG_LEN};

#[test]
fn pads_to_minimum_length() {
	assert_eq!(slug::encode(0), "0000");
	assert_eq!(slug::encode(5), "0005");
	assert_eq!(slug::encode(35), "000z");
	assert_eq!(slug::encode(36 * 36 * 36 - 1), "0zzz");
}

#[test]
fn grows_past_minimum_length() {
	assert_eq!(slug::encode(36 * 36 * 36 * 36), "10000");
	assert_eq!(slug::encode(u64::MAX), "3w5e11264sgsf");
}

#[test]
fn round_trips() {
	for seq in [0, 1, 5, 35, 36, 1295, 46_655, 1_679_616, 123_456_789, u64::MAX - 1, u64::MAX] {
		let encoded = slug::encode(seq);
		assert!(encoded.len() >= MIN_SLUG_LEN);
		assert_eq!(slug::decode(&encoded), Ok(seq));
	}
}

#[test]
fn decodes_any_padding_and_case() {
	assert_eq!(slug::decode("5"), Ok(5));
	assert_eq!(slug::decode("00000005"), Ok(5));
	assert_eq!(slug::decode("00A1"), Ok(361));
	assert_eq!(slug::encode(slug::decode("000000A1").unwrap()), "00a1");
}

#[test]
fn rejects_invalid_characters() {
	assert_eq!(
		slug::decode("00_1"),
		Err(DecodeError::InvalidCharacter { ch: '_', index: 2 })
	);
	assert_eq!(
		slug::decode(" 001"),
		Err(DecodeError::InvalidCharacter { ch: ' ', index: 0 })
	);
	assert_eq!(
		slug::decode("0é1"),
		Err(DecodeError::InvalidCharacter { ch: 'é', index: 1 })
	);
}

#[test]
fn rejects_empty() {
	assert_eq!(slug::decode(""), Err(DecodeError::Empty));
}

#[test]
fn rejects_overflow() {
	assert_eq!(slug::decode("3w5e11264sgsg"), Err(DecodeError::Overflow));
	assert_eq!(slug::decode("zzzzzzzzzzzzzzzzzzzz"), Err(DecodeError::Overflow));
}

#[test]
fn slug_newtype() {
	let slug: Slug = "0010".parse().unwrap();
	assert_eq!(slug, Slug::new(36));
	assert_eq!(u64::from(slug), 36);
	assert_eq!(Slug::from(36).to_string(), "0010");
	assert!("".parse::<Slug>().is_err());
}

#[test]
fn crate_shorthands() {
	assert_eq!(crate::encode_identifier(5), "0005");
	assert_eq!(crate::decode_identifier("0005"), Ok(5));
}
