#![allow(clippy::undocumented_unsafe_blocks)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use crate::{params::SUBPIXEL_TAPS, round::Rounding, util::Sample};

/// Eight output columns per iteration. `S` is either `u8` reference rows or
/// `u16` intermediate rows; both are zero-extended to 32-bit lanes.
#[target_feature(enable = "avx2")]
pub(super) fn filter_vertical<S: Sample, R: Rounding, const N: usize>(
    dest: &mut [R::Output],
    dest_stride: NonZeroUsize,
    src: &[S],
    src_stride: NonZeroUsize,
    kernel: &[i16; SUBPIXEL_TAPS],
    width: NonZeroUsize,
    height: NonZeroUsize,
    rounding: R,
) {
    debug_assert!(width.get() % 8 == 0);

    let taps = &kernel[(SUBPIXEL_TAPS - N) / 2..][..N];
    let src_stride = src_stride.get();
    let mut lanes = [0i32; 8];
    let mut src_offset = 0;
    let mut dest_offset = 0;

    unsafe {
        let mut coeffs = [_mm256_setzero_si256(); N];
        for (coeff, &tap) in coeffs.iter_mut().zip(taps) {
            *coeff = _mm256_set1_epi32(i32::from(tap));
        }

        for _y in 0..height.get() {
            for x in (0..width.get()).step_by(8) {
                let mut acc = _mm256_setzero_si256();
                for (k, coeff) in coeffs.iter().enumerate() {
                    let samples = &src[src_offset + k * src_stride + x..][..8];
                    let widened = match size_of::<S>() {
                        1 => _mm256_cvtepu8_epi32(_mm_loadl_epi64(samples.as_ptr().cast())),
                        2 => _mm256_cvtepu16_epi32(_mm_loadu_si128(samples.as_ptr().cast())),
                        _ => unreachable!(),
                    };
                    acc = _mm256_add_epi32(acc, _mm256_mullo_epi32(widened, *coeff));
                }
                _mm256_storeu_si256(lanes.as_mut_ptr().cast(), acc);

                for (out, &sum) in dest[dest_offset + x..][..8].iter_mut().zip(&lanes) {
                    *out = rounding.narrow(sum);
                }
            }
            src_offset += src_stride;
            dest_offset += dest_stride.get();
        }
    }
}
