#[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))]
mod avx2;
mod rust;


use std::num::NonZeroUsize;

use cfg_if::cfg_if;

use crate::{filter::TapCount, params::SUBPIXEL_TAPS, round::Rounding};

/// Filters each row of a block along the horizontal axis at a fixed phase.
///
/// `src` starts at the first sample read by the filter, i.e. `tap_count.lead()`
/// columns left of the block. Each output column `x` is the sum of
/// `src[x..x + tap_count]` weighted by the effective taps of `kernel`,
/// narrowed by `rounding`.
///
/// Blocks whose width is a multiple of 8 use the AVX2 kernel when available.
/// Narrower blocks always use the portable kernel. Both produce identical
/// results.
///
/// # Parameters
/// - `dest`: Destination buffer for the filtered block
/// - `dest_stride`: Number of samples per row in `dest`
/// - `src`: Reference samples, starting at the first tap of the first row
/// - `src_stride`: Number of samples per row in `src`
/// - `kernel`: 8-entry kernel for the block's phase
/// - `tap_count`: Number of effective taps in `kernel`
/// - `width`: Width of the block
/// - `height`: Number of rows to filter
/// - `rounding`: Narrowing applied to each sum
pub fn filter_horizontal<R: Rounding>(
    dest: &mut [R::Output],
    dest_stride: NonZeroUsize,
    src: &[u8],
    src_stride: NonZeroUsize,
    kernel: &[i16; SUBPIXEL_TAPS],
    tap_count: TapCount,
    width: NonZeroUsize,
    height: NonZeroUsize,
    rounding: R,
) {
    debug_assert!(dest.len() >= (height.get() - 1) * dest_stride.get() + width.get());
    debug_assert!(
        src.len() >= (height.get() - 1) * src_stride.get() + width.get() + tap_count.get() - 1
    );

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if width.get() % 8 == 0 && crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first
                unsafe {
                    match tap_count {
                        TapCount::Two => avx2::filter_horizontal::<R, 2>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                        TapCount::Four => avx2::filter_horizontal::<R, 4>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                        TapCount::Six => avx2::filter_horizontal::<R, 6>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                        TapCount::Eight => avx2::filter_horizontal::<R, 8>(dest, dest_stride, src, src_stride, kernel, width, height, rounding),
                    }
                }
                return;
            }
        }
    }

    match tap_count {
        TapCount::Two => rust::filter_horizontal::<R, 2>(
            dest,
            dest_stride,
            src,
            src_stride,
            kernel,
            width,
            height,
            rounding,
        ),
        TapCount::Four => rust::filter_horizontal::<R, 4>(
            dest,
            dest_stride,
            src,
            src_stride,
            kernel,
            width,
            height,
            rounding,
        ),
        TapCount::Six => rust::filter_horizontal::<R, 6>(
            dest,
            dest_stride,
            src,
            src_stride,
            kernel,
            width,
            height,
            rounding,
        ),
        TapCount::Eight => rust::filter_horizontal::<R, 8>(
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
