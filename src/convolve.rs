//! Prediction of one block from a reference plane.
//!
//! The eight unscaled operations cover every combination of single/compound
//! output and integer/fractional position on each axis. [`convolve`] picks
//! the right one from the block's parameters, the same way the decoder's
//! function table is indexed.

#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use tracing::trace;

use crate::{
    filter::FilterFamily,
    horizontal::filter_horizontal,
    params::{ConvolveFlags, ConvolveParams, MAX_BLOCK_SIZE, SUBPIXEL_TAPS},
    plane::ReferencePlane,
    round::{
        Compound, Compound2D, Intermediate, Rounding, Single2D, SingleHorizontal, SingleVertical,
        compound_copy,
    },
    scale::convolve_scale_2d,
    util::copy_block,
    vertical::filter_vertical,
};

/// Rows needed by an unscaled two-axis convolution of the tallest block.
pub(crate) const INTERMEDIATE_ROWS: usize = MAX_BLOCK_SIZE + SUBPIXEL_TAPS - 1;

/// Scratch for the output of the horizontal pass of a two-axis convolution.
///
/// Rows are packed at the block width. Lives on the stack for a single call.
pub(crate) struct IntermediateBuffer<const ROWS: usize> {
    data: [[u16; MAX_BLOCK_SIZE]; ROWS],
}

impl<const ROWS: usize> IntermediateBuffer<ROWS> {
    #[allow(
        clippy::large_stack_arrays,
        reason = "sized for the largest block to avoid allocating per call"
    )]
    pub(crate) const fn new() -> Self {
        Self {
            data: [[0; MAX_BLOCK_SIZE]; ROWS],
        }
    }

    pub(crate) fn rows_mut(&mut self, width: NonZeroUsize, rows: usize) -> &mut [u16] {
        debug_assert!(rows <= ROWS);
        &mut self.data.as_flattened_mut()[..width.get() * rows]
    }

    pub(crate) fn rows(&self, width: NonZeroUsize, rows: usize) -> &[u16] {
        &self.data.as_flattened()[..width.get() * rows]
    }
}

/// Output of a prediction: final 8-bit samples, or the biased 16-bit
/// accumulator that compound blending consumes.
#[derive(Debug)]
pub enum Prediction<'a> {
    Single(&'a mut [u8]),
    Compound(&'a mut [u16]),
}

impl Prediction<'_> {
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::Compound(_))
    }
}

/// Entry in the dispatch table.
pub type ConvolveFn = fn(&ReferencePlane<'_>, &ConvolveParams, Prediction<'_>, NonZeroUsize);

/// Copies the block unchanged.
pub fn convolve_copy(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u8],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    copy_block(
        dest,
        dest_stride,
        reference.window(0, 0),
        reference.stride(),
        params.width,
        params.height,
    );
}

pub fn convolve_horizontal(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u8],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    horizontal_only(reference, params, dest, dest_stride, SingleHorizontal);
}

/// Vertical-only single prediction. A zero vertical phase copies the
/// reference rows, which is exactly what the identity kernel would produce.
pub fn convolve_vertical(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u8],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    if params.phase_y() == 0 {
        convolve_copy(reference, params, dest, dest_stride);
        return;
    }
    vertical_only(reference, params, dest, dest_stride, SingleVertical);
}

pub fn convolve_2d(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u8],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    two_axis(reference, params, dest, dest_stride, Single2D);
}

pub fn convolve_compound_copy(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u16],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    let src = reference.window(0, 0);
    let width = params.width.get();
    let mut src_offset = 0;
    let mut dest_offset = 0;
    for _y in 0..params.height.get() {
        for (out, &sample) in dest[dest_offset..][..width]
            .iter_mut()
            .zip(&src[src_offset..][..width])
        {
            *out = compound_copy(sample);
        }
        src_offset += reference.stride().get();
        dest_offset += dest_stride.get();
    }
}

pub fn convolve_compound_horizontal(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u16],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    horizontal_only(reference, params, dest, dest_stride, Compound);
}

pub fn convolve_compound_vertical(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u16],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    vertical_only(reference, params, dest, dest_stride, Compound);
}

pub fn convolve_compound_2d(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [u16],
    dest_stride: NonZeroUsize,
) {
    params.debug_assert_valid();
    let rounding = Compound2D {
        inter_round_bits_vertical: params.inter_round_bits_vertical,
    };
    two_axis(reference, params, dest, dest_stride, rounding);
}

fn horizontal_only<R: Rounding>(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [R::Output],
    dest_stride: NonZeroUsize,
    rounding: R,
) {
    let family = FilterFamily::resolve(params.horizontal_filter, params.width);
    let taps = family.tap_count();
    filter_horizontal(
        dest,
        dest_stride,
        reference.window(taps.lead(), 0),
        reference.stride(),
        family.taps(params.phase_x()),
        taps,
        params.width,
        params.height,
        rounding,
    );
}

fn vertical_only<R: Rounding>(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [R::Output],
    dest_stride: NonZeroUsize,
    rounding: R,
) {
    let family = FilterFamily::resolve(params.vertical_filter, params.height);
    let taps = family.tap_count();
    filter_vertical(
        dest,
        dest_stride,
        reference.window(0, taps.lead()),
        reference.stride(),
        family.taps(params.phase_y()),
        taps,
        params.width,
        params.height,
        rounding,
    );
}

/// Horizontal pass into an intermediate buffer, then vertical pass over it.
///
/// The horizontal pass starts `lead` rows above the block and produces
/// `height + taps - 1` rows so every output row has its full vertical
/// footprint.
fn two_axis<R: Rounding>(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    dest: &mut [R::Output],
    dest_stride: NonZeroUsize,
    rounding: R,
) {
    let family_x = FilterFamily::resolve(params.horizontal_filter, params.width);
    let family_y = FilterFamily::resolve(params.vertical_filter, params.height);
    let taps_x = family_x.tap_count();
    let taps_y = family_y.tap_count();
    let rows = params.height.saturating_add(taps_y.get() - 1);

    let mut intermediate = IntermediateBuffer::<INTERMEDIATE_ROWS>::new();
    filter_horizontal(
        intermediate.rows_mut(params.width, rows.get()),
        params.width,
        reference.window(taps_x.lead(), taps_y.lead()),
        reference.stride(),
        family_x.taps(params.phase_x()),
        taps_x,
        params.width,
        rows,
        Intermediate,
    );
    filter_vertical(
        dest,
        dest_stride,
        intermediate.rows(params.width, rows.get()),
        params.width,
        family_y.taps(params.phase_y()),
        taps_y,
        params.width,
        params.height,
        rounding,
    );
}

macro_rules! table_entry {
    ($name:ident, $op:ident, $variant:ident) => {
        fn $name(
            reference: &ReferencePlane<'_>,
            params: &ConvolveParams,
            prediction: Prediction<'_>,
            stride: NonZeroUsize,
        ) {
            let Prediction::$variant(dest) = prediction else {
                panic!(concat!(
                    stringify!($op),
                    " writes ",
                    stringify!($variant),
                    " predictions"
                ));
            };
            $op(reference, params, dest, stride);
        }
    };
}

table_entry!(copy_entry, convolve_copy, Single);
table_entry!(horizontal_entry, convolve_horizontal, Single);
table_entry!(vertical_entry, convolve_vertical, Single);
table_entry!(two_axis_entry, convolve_2d, Single);
table_entry!(compound_copy_entry, convolve_compound_copy, Compound);
table_entry!(compound_horizontal_entry, convolve_compound_horizontal, Compound);
table_entry!(compound_vertical_entry, convolve_compound_vertical, Compound);
table_entry!(compound_two_axis_entry, convolve_compound_2d, Compound);
table_entry!(scale_entry, convolve_scale_2d, Compound);

/// Indexed by `[compound][vertical][horizontal]`.
static CONVOLVE_TABLE: [[[ConvolveFn; 2]; 2]; 2] = [
    [
        [copy_entry, horizontal_entry],
        [vertical_entry, two_axis_entry],
    ],
    [
        [compound_copy_entry, compound_horizontal_entry],
        [compound_vertical_entry, compound_two_axis_entry],
    ],
];

/// Looks up the operation for a dispatch key. Scaled blocks always use the
/// scaled two-axis operation, which only produces compound output.
#[must_use]
pub fn convolve_fn(flags: ConvolveFlags) -> ConvolveFn {
    if flags.contains(ConvolveFlags::SCALED) {
        return scale_entry;
    }
    CONVOLVE_TABLE[usize::from(flags.contains(ConvolveFlags::COMPOUND))]
        [usize::from(flags.contains(ConvolveFlags::VERTICAL))]
        [usize::from(flags.contains(ConvolveFlags::HORIZONTAL))]
}

/// Predicts one block, choosing the operation from the block's sub-pixel
/// phases, its step and the kind of `prediction`.
///
/// # Panics
/// If a scaled block is predicted into a single (8-bit) output.
pub fn convolve(
    reference: &ReferencePlane<'_>,
    params: &ConvolveParams,
    prediction: Prediction<'_>,
    dest_stride: NonZeroUsize,
) {
    let flags = params.flags(prediction.is_compound());
    trace!(
        ?flags,
        width = params.width.get(),
        height = params.height.get(),
        "convolve"
    );
    convolve_fn(flags)(reference, params, prediction, dest_stride);
}
