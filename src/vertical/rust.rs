use std::num::NonZeroUsize;

use crate::{params::SUBPIXEL_TAPS, round::Rounding, util::Sample};

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
    let taps = &kernel[(SUBPIXEL_TAPS - N) / 2..][..N];
    let src_stride = src_stride.get();
    let mut src_offset = 0;
    let mut dest_offset = 0;

    for _y in 0..height.get() {
        for x in 0..width.get() {
            let mut sum = 0i32;
            for (k, &tap) in taps.iter().enumerate() {
                let sample: i32 = src[src_offset + k * src_stride + x].into();
                sum += sample * i32::from(tap);
            }
            dest[dest_offset + x] = rounding.narrow(sum);
        }
        src_offset += src_stride;
        dest_offset += dest_stride.get();
    }
}
