//! Narrowing of filter sums into prediction samples.
//!
//! Every convolution computes a raw sum of `sample * tap` products and then
//! narrows it with one of the [`Rounding`] implementations below. Two-axis
//! paths add a bias before shifting so every intermediate stays non-negative.
//! The bias is cancelled exactly at the last step: subtracted and clamped for
//! single prediction, or left in place as the compound offset that blending
//! expects.


use std::fmt::Debug;

pub const BITDEPTH: u32 = 8;
pub const PIXEL_MAX: i32 = (1 << BITDEPTH) - 1;
/// Precision of the filter coefficients.
pub const FILTER_BITS: u32 = 7;
pub const INTER_ROUND_BITS_HORIZONTAL: u32 = 3;
pub const INTER_ROUND_BITS_VERTICAL: u32 = 11;
pub const COMPOUND_INTER_ROUND_BITS_VERTICAL: u32 = 7;

/// Added to each horizontal sum before it is stored as an intermediate.
pub const HORIZONTAL_OFFSET: i32 = 1 << (BITDEPTH + FILTER_BITS - 1);
/// Added to each vertical sum over intermediate rows.
pub const VERTICAL_OFFSET: i32 =
    1 << (BITDEPTH + 2 * FILTER_BITS - INTER_ROUND_BITS_HORIZONTAL);
/// Bias left in a single-prediction two-axis result, 1.5x the sample range.
pub const SINGLE_ROUND_OFFSET: i32 = (1 << BITDEPTH) + (1 << (BITDEPTH - 1));
/// Bias carried by every compound prediction sample.
pub const COMPOUND_ROUND_OFFSET: i32 = (1 << (BITDEPTH + 4)) + (1 << (BITDEPTH + 3));

/// Divides by `2^bits`, rounding halves up.
#[inline]
#[must_use]
pub const fn round_shift(value: i32, bits: u32) -> i32 {
    (value + ((1 << bits) >> 1)) >> bits
}

#[inline]
#[must_use]
pub const fn clip_pixel(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > PIXEL_MAX {
        PIXEL_MAX as u8
    } else {
        value as u8
    }
}

/// Integer-pel compound prediction: the sample at compound precision plus
/// the compound offset.
#[inline]
#[must_use]
pub const fn compound_copy(sample: u8) -> u16 {
    (((sample as i32) << (FILTER_BITS - INTER_ROUND_BITS_HORIZONTAL)) + COMPOUND_ROUND_OFFSET)
        as u16
}

/// Final narrowing of a raw filter sum.
pub trait Rounding: Copy + Debug {
    type Output: Copy + Default + Debug + PartialEq;

    #[must_use]
    fn narrow(self, sum: i32) -> Self::Output;
}

/// Horizontal-only single prediction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleHorizontal;

impl Rounding for SingleHorizontal {
    type Output = u8;

    #[inline]
    fn narrow(self, sum: i32) -> u8 {
        clip_pixel(round_shift(
            round_shift(sum, INTER_ROUND_BITS_HORIZONTAL),
            FILTER_BITS - INTER_ROUND_BITS_HORIZONTAL,
        ))
    }
}

/// Vertical-only single prediction over raw reference rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleVertical;

impl Rounding for SingleVertical {
    type Output = u8;

    #[inline]
    fn narrow(self, sum: i32) -> u8 {
        clip_pixel(round_shift(sum, FILTER_BITS))
    }
}

/// One-axis compound prediction, either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compound;

impl Rounding for Compound {
    type Output = u16;

    #[inline]
    fn narrow(self, sum: i32) -> u16 {
        let value = round_shift(sum, INTER_ROUND_BITS_HORIZONTAL) + COMPOUND_ROUND_OFFSET;
        debug_assert!((0..=i32::from(u16::MAX)).contains(&value));
        value as u16
    }
}

/// First pass of a two-axis convolution. Results land in `[263, 7913]` for
/// 8-bit input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intermediate;

impl Rounding for Intermediate {
    type Output = u16;

    #[inline]
    fn narrow(self, sum: i32) -> u16 {
        let value = round_shift(sum + HORIZONTAL_OFFSET, INTER_ROUND_BITS_HORIZONTAL);
        debug_assert!(value >= 0 && value < 1 << 13, "intermediate {value} out of range");
        value as u16
    }
}

/// Second pass of a two-axis single prediction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Single2D;

impl Rounding for Single2D {
    type Output = u8;

    #[inline]
    fn narrow(self, sum: i32) -> u8 {
        clip_pixel(
            round_shift(sum + VERTICAL_OFFSET, INTER_ROUND_BITS_VERTICAL) - SINGLE_ROUND_OFFSET,
        )
    }
}

/// Second pass of a two-axis compound prediction, scaled or not.
#[derive(Debug, Clone, Copy)]
pub struct Compound2D {
    pub inter_round_bits_vertical: u32,
}

impl Default for Compound2D {
    fn default() -> Self {
        Self {
            inter_round_bits_vertical: COMPOUND_INTER_ROUND_BITS_VERTICAL,
        }
    }
}

impl Rounding for Compound2D {
    type Output = u16;

    #[inline]
    fn narrow(self, sum: i32) -> u16 {
        let value = round_shift(sum + VERTICAL_OFFSET, self.inter_round_bits_vertical);
        debug_assert!((0..=i32::from(u16::MAX)).contains(&value));
        value as u16
    }
}
