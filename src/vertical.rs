#[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))]
mod avx2;
mod rust;


use std::num::NonZeroUsize;

use cfg_if::cfg_if;

use crate::{
    filter::TapCount,
    params::SUBPIXEL_TAPS,
    round::Rounding,
    util::Sample,
};

/// Filters each column of a block along the vertical axis at a fixed phase.
///
/// `src` is either raw reference rows or the output of the horizontal pass,
/// starting `tap_count.lead()` rows above the block. Output row `y` reads
/// rows `y..y + tap_count` of `src`. Sums are accumulated in 32 bits so
/// intermediate input cannot overflow.
///
/// # Parameters
/// - `dest`: Destination buffer for the filtered block
/// - `dest_stride`: Number of samples per row in `dest`
/// - `src`: Input rows, starting at the first tap
/// - `src_stride`: Number of samples per row in `src`
/// - `kernel`: 8-entry kernel for the block's phase
/// - `tap_count`: Number of effective taps in `kernel`
/// - `width`: Width of the block
/// - `height`: Number of output rows
/// - `rounding`: Narrowing applied to each sum
pub fn filter_vertical<S: Sample, R: Rounding>(
    dest: &mut [R::Output],
    dest_stride: NonZeroUsize,
    src: &[S],
    src_stride: NonZeroUsize,
    kernel: &[i16; SUBPIXEL_TAPS],
    tap_count: TapCount,
    width: NonZeroUsize,
    height: NonZeroUsize,
    rounding: R,
) {
    debug_assert!(dest.len() >= (height.get() - 1) * dest_stride.get() + width.get());
    debug_assert!(
        src.len() >= (height.get() + tap_count.get() - 2) * src_stride.get() + width.get()
    );

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if width.get() % 8 == 0 && crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first
                unsafe {
                    match tap_count {
                        TapCount::Two => avx2::filter_vertical::<S, R, 2>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                        TapCount::Four => avx2::filter_vertical::<S, R, 4>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                        TapCount::Six => avx2::filter_vertical::<S, R, 6>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                        TapCount::Eight => avx2::filter_vertical::<S, R, 8>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                    }
                }
                return;
            }
        }
    }

    match tap_count {
        TapCount::Two => rust::filter_vertical::<S, R, 2>(
            dest,
            dest_stride,
            src,
            src_stride,
            kernel,
            width,
            height,
            rounding,
        ),
        TapCount::Four => rust::filter_vertical::<S, R, 4>(
            dest,
            dest_stride,
            src,
            src_stride,
            kernel,
            width,
            height,
            rounding,
        ),
        TapCount::Six => rust::filter_vertical::<S, R, 6>(
            dest,
            dest_stride,
            src,
            src_stride,
            kernel,
            width,
            height,
            rounding,
        ),
        TapCount::Eight => rust::filter_vertical::<S, R, 8>(
            dest,
            dest_stride,
            src,
            src_stride,
            kernel,
            width,
            height,
            rounding,
        ),
    }
}
