#![feature(test)]

extern crate test;

use test::Bencher;

use ddroller::roll::{roller::FastRand, Describe, RollOutcome, RollSpec};

#[bench]
fn roll_4d8(b: &mut Bencher) {
	let spec = RollSpec::new(4, 8);
	let mut rng = FastRand::default();
	b.iter(|| spec.roll(&mut rng));
}

#[bench]
fn roll_100d20(b: &mut Bencher) {
	let spec = RollSpec::new(100, 20);
	let mut rng = FastRand::default();
	b.iter(|| spec.roll(&mut rng));
}

#[bench]
fn roll_max_dice(b: &mut Bencher) {
	let spec = RollSpec::builder().count(1000).sides(20).modifier(-7).threshold(-10_000).build();
	let mut rng = FastRand::default();
	b.iter(|| spec.roll(&mut rng));
}

#[bench]
fn describe_4d8_outcome(b: &mut Bencher) {
	let spec = RollSpec::new(4, 8);
	let outcome = RollOutcome::from_spec_and_rolls(&spec, [6, 6, 6, 6]);
	b.iter(|| outcome.describe_for(&spec, None));
}

#[bench]
fn describe_truncated_outcome(b: &mut Bencher) {
	let spec = RollSpec::new(1000, 6);
	let outcome = RollOutcome::from_spec_and_rolls(&spec, (0..1000).map(|i| i % 6 + 1));
	b.iter(|| outcome.describe_for(&spec, Some(20)));
}

#[bench]
fn describe_spec(b: &mut Bencher) {
	let spec = RollSpec::builder().count(2).sides(20).modifier(3).threshold(-15).build();
	b.iter(|| spec.describe(None));
}
