mod rust;


use std::num::NonZeroUsize;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    convolve::IntermediateBuffer,
    filter::{FilterFamily, TapCount, subpixel_phase},
    params::{ConvolveParams, MAX_BLOCK_SIZE, SCALE_SUBPIXEL_BITS, SUBPIXEL_TAPS},
    plane::ReferencePlane,
    round::Compound2D,
    vertical::filter_vertical,
};

/// Rows needed by the tallest block at the largest step.
const SCALED_INTERMEDIATE_ROWS: usize = 2 * MAX_BLOCK_SIZE + SUBPIXEL_TAPS;
const POSITION_FRACTION_MASK: u32 = (1 << SCALE_SUBPIXEL_BITS) - 1;

/// Where one output column reads the reference in the horizontal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledColumn {
    /// Start of the 8-sample window, relative to 3 samples left of the block.
    pub offset: usize,
    pub phase: usize,
}

/// Per-column window offsets and phases for a horizontal step.
#[must_use]
pub fn scaled_columns(
    subpixel_x: u32,
    step_x: u32,
    width: NonZeroUsize,
) -> SmallVec<[ScaledColumn; MAX_BLOCK_SIZE]> {
    let ref_x = (subpixel_x >> SCALE_SUBPIXEL_BITS) as usize;
    (0..width.get() as u32)
        .map(|x| {
            let position = subpixel_x + x * step_x;
            ScaledColumn {
                offset: (position >> SCALE_SUBPIXEL_BITS) as usize - ref_x,
                phase: subpixel_phase(position),
            }
        })
        .collect()
}

/// Number of horizontally filtered rows the vertical pass reads for a block
/// `height` rows tall. Includes a full 8-tap footprint past the last
/// position.
#[must_use]
pub const fn intermediate_height(height: NonZeroUsize, step_y: u32) -> usize {
    ((((height.get() - 1) as u32 * step_y + POSITION_FRACTION_MASK) >> SCALE_SUBPIXEL_BITS)
        as usize)
        + SUBPIXEL_TAPS
}

/// Compound prediction from a reference with different dimensions.
///
/// Each output column and row computes its own position
/// `subpixel + index * step`, so the filter phase and source window can change
/// from one sample to the next. The horizontal pass filters every reference
/// row the vertical pass can reach into a scratch buffer, starting 3 rows and
/// 3 columns before the block.
pub fn convolve_scale_2d(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u16],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();

    let width = params.width;
    let family_x = FilterFamily::resolve(params.horizontal_filter, width);
    let family_y = FilterFamily::resolve(params.vertical_filter, params.height);
    let rows = intermediate_height(params.height, params.step_y);
    debug_assert!(rows <= SCALED_INTERMEDIATE_ROWS);
    debug!(
        step_x = params.step_x,
        step_y = params.step_y,
        width = width.get(),
        height = params.height.get(),
        "scaled prediction"
    );

    let columns = scaled_columns(params.subpixel_x, params.step_x, width);
    let mut intermediate = IntermediateBuffer::<SCALED_INTERMEDIATE_ROWS>::new();
    scale_horizontal(
        intermediate.rows_mut(width, rows),
        reference.window(3, 3),
        reference.stride(),
        family_x,
        &columns,
        rows,
    );

    let intermediate = intermediate.rows(width, rows);
    let taps_y = family_y.tap_count();
    let rounding = Compound2D {
        inter_round_bits_vertical: params.inter_round_bits_vertical,
    };
    let fraction_y = params.subpixel_y & POSITION_FRACTION_MASK;
    let mut dest_offset = 0;
    for y in 0..params.height.get() as u32 {
        let position = fraction_y + y * params.step_y;
        let first_row = (position >> SCALE_SUBPIXEL_BITS) as usize + taps_y.offset();
        filter_vertical(
            &mut dest[dest_offset..],
            dest_stride,
            &intermediate[first_row * width.get()..],
            width,
            family_y.taps(subpixel_phase(position)),
            taps_y,
            width,
            NonZeroUsize::MIN,
            rounding,
        );
        dest_offset += dest_stride.get();
    }
}

/// Horizontal pass of a scaled prediction. Writes `rows` rows packed at
/// `columns.len()` samples.
///
/// Bilinear and both 4-tap kernels go through table-driven kernels that
/// produce the same sums as the generic one.
pub fn scale_horizontal(
    dest: &mut [u16],
    src: &[u8],
    src_stride: NonZeroUsize,
    family: FilterFamily,
    columns: &[ScaledColumn],
    rows: usize,
) {
    match family {
        FilterFamily::Bilinear => {
            trace!("scaled horizontal pass with 2-tap tables");
            rust::horizontal_2tap(dest, src, src_stride, columns, rows);
        }
        FilterFamily::SmallRegular => {
            trace!("scaled horizontal pass with signed 4-tap tables");
            rust::horizontal_4tap_signed(dest, src, src_stride, columns, rows);
        }
        FilterFamily::SmallSmooth => {
            trace!("scaled horizontal pass with positive 4-tap tables");
            rust::horizontal_4tap_positive(dest, src, src_stride, columns, rows);
        }
        _ => scale_horizontal_generic(dest, src, src_stride, family, columns, rows),
    }
}

/// Horizontal pass of a scaled prediction for any kernel, straight from the
/// coefficient table.
pub fn scale_horizontal_generic(
    dest: &mut [u16],
    src: &[u8],
    src_stride: NonZeroUsize,
    family: FilterFamily,
    columns: &[ScaledColumn],
    rows: usize,
) {
    match family.tap_count() {
        TapCount::Two => rust::horizontal::<2>(dest, src, src_stride, family, columns, rows),
        TapCount::Four => rust::horizontal::<4>(dest, src, src_stride, family, columns, rows),
        TapCount::Six => rust::horizontal::<6>(dest, src, src_stride, family, columns, rows),
        TapCount::Eight => rust::horizontal::<8>(dest, src, src_stride, family, columns, rows),
    }
}
