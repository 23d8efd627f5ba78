
use std::num::NonZeroUsize;

use anyhow::{Result, bail};

use crate::params::{InterpolationFilter, SUBPIXEL_TAPS};

/// Number of filter phases per sample.
pub const SUBPIXEL_PHASES: usize = 16;
const SUBPIXEL_PHASE_SHIFT: u32 = 6;
const SUBPIXEL_PHASE_MASK: u32 = SUBPIXEL_PHASES as u32 - 1;

/// A row of the coefficient table, after adjusting the signalled filter for
/// the block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFamily {
    Regular = 0,
    Smooth = 1,
    Sharp = 2,
    Bilinear = 3,
    /// 4-tap kernel used for regular and sharp filtering of narrow blocks.
    SmallRegular = 4,
    /// 4-tap kernel used for smooth filtering of narrow blocks.
    SmallSmooth = 5,
}

impl TryFrom<i64> for FilterFamily {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            0 => Self::Regular,
            1 => Self::Smooth,
            2 => Self::Sharp,
            3 => Self::Bilinear,
            4 => Self::SmallRegular,
            5 => Self::SmallSmooth,
            _ => bail!("Invalid value for 'filter_index', must be 0-5, got {val}."),
        })
    }
}

impl FilterFamily {
    /// Picks the kernel used for a block `extent` samples long on the filtered
    /// axis. Blocks of 4 or fewer samples never use more than 4 taps.
    #[must_use]
    pub fn resolve(filter: InterpolationFilter, extent: NonZeroUsize) -> Self {
        let small = extent.get() <= 4;
        match filter {
            InterpolationFilter::EightTap | InterpolationFilter::EightTapSharp if small => {
                Self::SmallRegular
            }
            InterpolationFilter::EightTapSmooth if small => Self::SmallSmooth,
            InterpolationFilter::EightTap => Self::Regular,
            InterpolationFilter::EightTapSmooth => Self::Smooth,
            InterpolationFilter::EightTapSharp => Self::Sharp,
            InterpolationFilter::Bilinear => Self::Bilinear,
        }
    }

    /// Number of non-zero taps across all phases of this kernel.
    #[must_use]
    pub const fn tap_count(self) -> TapCount {
        match self {
            Self::Regular | Self::Smooth => TapCount::Six,
            Self::Sharp => TapCount::Eight,
            Self::Bilinear => TapCount::Two,
            Self::SmallRegular | Self::SmallSmooth => TapCount::Four,
        }
    }

    /// Full 8-entry kernel for `phase`. Shorter filters are centered and
    /// padded with zeroes.
    #[must_use]
    pub fn taps(self, phase: usize) -> &'static [i16; SUBPIXEL_TAPS] {
        &SUBPEL_FILTERS[self as usize][phase]
    }

    /// Only the taps counted by [`FilterFamily::tap_count`].
    #[must_use]
    pub fn effective_taps(self, phase: usize) -> &'static [i16] {
        let count = self.tap_count();
        &self.taps(phase)[count.offset()..][..count.get()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapCount {
    Two = 2,
    Four = 4,
    Six = 6,
    Eight = 8,
}

impl TapCount {
    #[must_use]
    pub const fn get(self) -> usize {
        self as usize
    }

    /// Index of the first effective tap inside an 8-entry kernel.
    #[must_use]
    pub const fn offset(self) -> usize {
        (SUBPIXEL_TAPS - self.get()) / 2
    }

    /// How many samples the filter reads before the position it is centered on.
    #[must_use]
    pub const fn lead(self) -> usize {
        self.get() / 2 - 1
    }
}

/// Extracts the filter phase from a position with 10 fractional bits.
#[must_use]
pub const fn subpixel_phase(position: u32) -> usize {
    ((position >> SUBPIXEL_PHASE_SHIFT) & SUBPIXEL_PHASE_MASK) as usize
}

#[must_use]
pub fn get_taps(family: FilterFamily, phase: usize) -> &'static [i16; SUBPIXEL_TAPS] {
    family.taps(phase)
}

/// Interpolation kernels indexed by [`FilterFamily`] and phase. Every kernel
/// sums to 128.
pub static SUBPEL_FILTERS: [[[i16; SUBPIXEL_TAPS]; SUBPIXEL_PHASES]; 6] = [
    // regular
    [
        [0, 0, 0, 128, 0, 0, 0, 0],
        [0, 2, -6, 126, 8, -2, 0, 0],
        [0, 2, -10, 122, 18, -4, 0, 0],
        [0, 2, -12, 116, 28, -8, 2, 0],
        [0, 2, -14, 110, 38, -10, 2, 0],
        [0, 2, -14, 102, 48, -12, 2, 0],
        [0, 2, -16, 94, 58, -12, 2, 0],
        [0, 2, -14, 84, 66, -12, 2, 0],
        [0, 2, -14, 76, 76, -14, 2, 0],
        [0, 2, -12, 66, 84, -14, 2, 0],
        [0, 2, -12, 58, 94, -16, 2, 0],
        [0, 2, -12, 48, 102, -14, 2, 0],
        [0, 2, -10, 38, 110, -14, 2, 0],
        [0, 2, -8, 28, 116, -12, 2, 0],
        [0, 0, -4, 18, 122, -10, 2, 0],
        [0, 0, -2, 8, 126, -6, 2, 0],
    ],
    // smooth
    [
        [0, 0, 0, 128, 0, 0, 0, 0],
        [0, 2, 28, 62, 34, 2, 0, 0],
        [0, 0, 26, 62, 36, 4, 0, 0],
        [0, 0, 22, 62, 40, 4, 0, 0],
        [0, 0, 20, 60, 42, 6, 0, 0],
        [0, 0, 18, 58, 44, 8, 0, 0],
        [0, 0, 16, 56, 46, 10, 0, 0],
        [0, -2, 16, 54, 48, 12, 0, 0],
        [0, -2, 14, 52, 52, 14, -2, 0],
        [0, 0, 12, 48, 54, 16, -2, 0],
        [0, 0, 10, 46, 56, 16, 0, 0],
        [0, 0, 8, 44, 58, 18, 0, 0],
        [0, 0, 6, 42, 60, 20, 0, 0],
        [0, 0, 4, 40, 62, 22, 0, 0],
        [0, 0, 4, 36, 62, 26, 0, 0],
        [0, 0, 2, 34, 62, 28, 2, 0],
    ],
    // sharp
    [
        [0, 0, 0, 128, 0, 0, 0, 0],
        [-2, 2, -6, 126, 8, -2, 2, 0],
        [-2, 6, -12, 124, 16, -6, 4, -2],
        [-2, 8, -18, 120, 26, -10, 6, -2],
        [-4, 10, -22, 116, 38, -14, 6, -2],
        [-4, 10, -22, 108, 48, -18, 8, -2],
        [-4, 10, -24, 100, 60, -20, 8, -2],
        [-4, 10, -24, 90, 70, -22, 10, -2],
        [-4, 12, -24, 80, 80, -24, 12, -4],
        [-2, 10, -22, 70, 90, -24, 10, -4],
        [-2, 8, -20, 60, 100, -24, 10, -4],
        [-2, 8, -18, 48, 108, -22, 10, -4],
        [-2, 6, -14, 38, 116, -22, 10, -4],
        [-2, 6, -10, 26, 120, -18, 8, -2],
        [-2, 4, -6, 16, 124, -12, 6, -2],
        [0, 2, -2, 8, 126, -6, 2, -2],
    ],
    // bilinear
    [
        [0, 0, 0, 128, 0, 0, 0, 0],
        [0, 0, 0, 120, 8, 0, 0, 0],
        [0, 0, 0, 112, 16, 0, 0, 0],
        [0, 0, 0, 104, 24, 0, 0, 0],
        [0, 0, 0, 96, 32, 0, 0, 0],
        [0, 0, 0, 88, 40, 0, 0, 0],
        [0, 0, 0, 80, 48, 0, 0, 0],
        [0, 0, 0, 72, 56, 0, 0, 0],
        [0, 0, 0, 64, 64, 0, 0, 0],
        [0, 0, 0, 56, 72, 0, 0, 0],
        [0, 0, 0, 48, 80, 0, 0, 0],
        [0, 0, 0, 40, 88, 0, 0, 0],
        [0, 0, 0, 32, 96, 0, 0, 0],
        [0, 0, 0, 24, 104, 0, 0, 0],
        [0, 0, 0, 16, 112, 0, 0, 0],
        [0, 0, 0, 8, 120, 0, 0, 0],
    ],
    // 4-tap regular, also used for sharp
    [
        [0, 0, 0, 128, 0, 0, 0, 0],
        [0, 0, -4, 126, 8, -2, 0, 0],
        [0, 0, -8, 122, 18, -4, 0, 0],
        [0, 0, -10, 116, 28, -6, 0, 0],
        [0, 0, -12, 110, 38, -8, 0, 0],
        [0, 0, -12, 102, 48, -10, 0, 0],
        [0, 0, -14, 94, 58, -10, 0, 0],
        [0, 0, -12, 84, 66, -10, 0, 0],
        [0, 0, -12, 76, 76, -12, 0, 0],
        [0, 0, -10, 66, 84, -12, 0, 0],
        [0, 0, -10, 58, 94, -14, 0, 0],
        [0, 0, -10, 48, 102, -12, 0, 0],
        [0, 0, -8, 38, 110, -12, 0, 0],
        [0, 0, -6, 28, 116, -10, 0, 0],
        [0, 0, -4, 18, 122, -8, 0, 0],
        [0, 0, -2, 8, 126, -4, 0, 0],
    ],
    // 4-tap smooth
    [
        [0, 0, 0, 128, 0, 0, 0, 0],
        [0, 0, 30, 62, 34, 2, 0, 0],
        [0, 0, 26, 62, 36, 4, 0, 0],
        [0, 0, 22, 62, 40, 4, 0, 0],
        [0, 0, 20, 60, 42, 6, 0, 0],
        [0, 0, 18, 58, 44, 8, 0, 0],
        [0, 0, 16, 56, 46, 10, 0, 0],
        [0, 0, 14, 54, 48, 12, 0, 0],
        [0, 0, 12, 52, 52, 12, 0, 0],
        [0, 0, 12, 48, 54, 14, 0, 0],
        [0, 0, 10, 46, 56, 16, 0, 0],
        [0, 0, 8, 44, 58, 18, 0, 0],
        [0, 0, 6, 42, 60, 20, 0, 0],
        [0, 0, 4, 40, 62, 22, 0, 0],
        [0, 0, 4, 36, 62, 26, 0, 0],
        [0, 0, 2, 34, 62, 30, 0, 0],
    ],
];
