#[cfg(test)]
mod tests;

use bitflags::bitflags;
use std::num::NonZeroUsize;

use anyhow::{Result, bail};

use crate::filter::subpixel_phase;

/// Fractional bits of a sub-pixel position or a scaling step.
pub const SCALE_SUBPIXEL_BITS: u32 = 10;
/// Step for a reference with the same dimensions as the current frame.
pub const UNSCALED_STEP: u32 = 1 << SCALE_SUBPIXEL_BITS;
/// Largest supported step, i.e. a reference twice as large as the current frame.
pub const MAX_STEP: u32 = 2 * UNSCALED_STEP;
pub const MIN_BLOCK_SIZE: usize = 2;
pub const MAX_BLOCK_SIZE: usize = 128;
/// Width of every kernel in the coefficient table, including the zero padding
/// of the shorter filters.
pub const SUBPIXEL_TAPS: usize = 8;

/// Interpolation filter as signalled in the bitstream for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationFilter {
    EightTap = 0,
    EightTapSmooth = 1,
    EightTapSharp = 2,
    Bilinear = 3,
}

impl TryFrom<i64> for InterpolationFilter {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            0 => Self::EightTap,
            1 => Self::EightTapSmooth,
            2 => Self::EightTapSharp,
            3 => Self::Bilinear,
            _ => bail!("Invalid value for 'interpolation_filter', must be 0-3, got {val}."),
        })
    }
}

bitflags! {
    /// Key into the convolution dispatch table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConvolveFlags: u8 {
        /// The horizontal position has a non-zero sub-pixel phase.
        const HORIZONTAL = 0x01;
        /// The vertical position has a non-zero sub-pixel phase.
        const VERTICAL = 0x02;
        /// Output is the wide, biased compound accumulator.
        const COMPOUND = 0x04;
        /// The reference has different dimensions than the current frame.
        const SCALED = 0x08;
    }
}

/// Per-block inputs to a convolution.
///
/// Positions and steps are fixed point with [`SCALE_SUBPIXEL_BITS`] fractional
/// bits. The filter phase is taken from bits 6..10 of the position, which gives
/// 16 phases per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveParams {
    pub horizontal_filter: InterpolationFilter,
    pub vertical_filter: InterpolationFilter,
    pub subpixel_x: u32,
    pub subpixel_y: u32,
    pub step_x: u32,
    pub step_y: u32,
    pub width: NonZeroUsize,
    pub height: NonZeroUsize,
    /// Final shift of the vertical pass for compound two-axis output.
    pub inter_round_bits_vertical: u32,
}

impl ConvolveParams {
    /// Parameters for an integer-pel, unscaled block.
    #[must_use]
    pub const fn new(
        horizontal_filter: InterpolationFilter,
        vertical_filter: InterpolationFilter,
        width: NonZeroUsize,
        height: NonZeroUsize,
    ) -> Self {
        Self {
            horizontal_filter,
            vertical_filter,
            subpixel_x: 0,
            subpixel_y: 0,
            step_x: UNSCALED_STEP,
            step_y: UNSCALED_STEP,
            width,
            height,
            inter_round_bits_vertical: crate::round::COMPOUND_INTER_ROUND_BITS_VERTICAL,
        }
    }

    #[must_use]
    pub const fn with_subpixel(mut self, subpixel_x: u32, subpixel_y: u32) -> Self {
        self.subpixel_x = subpixel_x;
        self.subpixel_y = subpixel_y;
        self
    }

    #[must_use]
    pub const fn with_step(mut self, step_x: u32, step_y: u32) -> Self {
        self.step_x = step_x;
        self.step_y = step_y;
        self
    }

    #[must_use]
    pub const fn with_inter_round_bits_vertical(mut self, bits: u32) -> Self {
        self.inter_round_bits_vertical = bits;
        self
    }

    #[must_use]
    pub fn phase_x(&self) -> usize {
        subpixel_phase(self.subpixel_x)
    }

    #[must_use]
    pub fn phase_y(&self) -> usize {
        subpixel_phase(self.subpixel_y)
    }

    #[must_use]
    pub fn is_scaled(&self) -> bool {
        self.step_x != UNSCALED_STEP || self.step_y != UNSCALED_STEP
    }

    /// Computes the dispatch key for this block.
    #[must_use]
    pub fn flags(&self, compound: bool) -> ConvolveFlags {
        let mut flags = ConvolveFlags::empty();
        flags.set(ConvolveFlags::HORIZONTAL, self.phase_x() != 0);
        flags.set(ConvolveFlags::VERTICAL, self.phase_y() != 0);
        flags.set(ConvolveFlags::COMPOUND, compound);
        flags.set(ConvolveFlags::SCALED, self.is_scaled());
        flags
    }

    pub(crate) fn debug_assert_valid(&self) {
        debug_assert!(
            is_block_size(self.width.get()),
            "unsupported block width {}",
            self.width
        );
        debug_assert!(
            is_block_size(self.height.get()),
            "unsupported block height {}",
            self.height
        );
        debug_assert!(self.step_x <= MAX_STEP && self.step_y <= MAX_STEP);
    }
}

/// Prediction blocks are powers of two between 2 and 128 on each axis.
#[must_use]
pub const fn is_block_size(extent: usize) -> bool {
    extent.is_power_of_two() && extent >= MIN_BLOCK_SIZE && extent <= MAX_BLOCK_SIZE
}
