#![allow(clippy::unwrap_used, reason = "allow in test files")]

use std::num::NonZeroUsize;

use super::*;

fn params() -> ConvolveParams {
    ConvolveParams::new(
        InterpolationFilter::EightTap,
        InterpolationFilter::EightTapSharp,
        NonZeroUsize::new(16).unwrap(),
        NonZeroUsize::new(8).unwrap(),
    )
}

#[test]
fn interpolation_filter_from_id() {
    assert_eq!(
        InterpolationFilter::try_from(0).unwrap(),
        InterpolationFilter::EightTap
    );
    assert_eq!(
        InterpolationFilter::try_from(1).unwrap(),
        InterpolationFilter::EightTapSmooth
    );
    assert_eq!(
        InterpolationFilter::try_from(2).unwrap(),
        InterpolationFilter::EightTapSharp
    );
    assert_eq!(
        InterpolationFilter::try_from(3).unwrap(),
        InterpolationFilter::Bilinear
    );
}

#[test]
fn interpolation_filter_rejects_unknown_ids() {
    for id in [-1, 4, 5, 100] {
        let err = InterpolationFilter::try_from(id).unwrap_err();
        assert!(err.to_string().contains(&id.to_string()), "{err}");
    }
}

#[test]
fn integer_position_has_no_flags() {
    assert_eq!(params().flags(false), ConvolveFlags::empty());
    assert_eq!(params().flags(true), ConvolveFlags::COMPOUND);
}

#[test]
fn flags_follow_the_phase_not_the_raw_position() {
    // Bits below the phase do not select a filter.
    let p = params().with_subpixel(63, 0);
    assert_eq!(p.flags(false), ConvolveFlags::empty());

    let p = params().with_subpixel(64, 0);
    assert_eq!(p.flags(false), ConvolveFlags::HORIZONTAL);

    let p = params().with_subpixel(0, 512);
    assert_eq!(p.flags(false), ConvolveFlags::VERTICAL);

    // Integer part of the position is ignored.
    let p = params().with_subpixel(1024 + 512, 2048);
    assert_eq!(p.flags(true), ConvolveFlags::HORIZONTAL | ConvolveFlags::COMPOUND);
}

#[test]
fn step_marks_the_block_as_scaled() {
    let p = params().with_step(UNSCALED_STEP, UNSCALED_STEP);
    assert!(!p.is_scaled());

    let p = params().with_step(UNSCALED_STEP + 1, UNSCALED_STEP);
    assert!(p.is_scaled());
    assert!(p.flags(true).contains(ConvolveFlags::SCALED));

    let p = params().with_step(UNSCALED_STEP, MAX_STEP);
    assert!(p.is_scaled());
}

#[test]
fn new_params_default_to_compound_rounding() {
    let p = params();
    assert_eq!(
        p.inter_round_bits_vertical,
        crate::round::COMPOUND_INTER_ROUND_BITS_VERTICAL
    );
    assert_eq!(p.with_inter_round_bits_vertical(11).inter_round_bits_vertical, 11);
}

#[test]
fn supported_block_sizes() {
    for size in [2, 4, 8, 16, 32, 64, 128] {
        assert!(is_block_size(size), "{size}");
    }
    for size in [0, 1, 3, 6, 12, 256] {
        assert!(!is_block_size(size), "{size}");
    }
}
