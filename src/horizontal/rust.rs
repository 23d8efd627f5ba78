use std::num::NonZeroUsize;

use crate::{params::SUBPIXEL_TAPS, round::Rounding};

pub(super) fn filter_horizontal<R: Rounding, const N: usize>(
    dest: &mut [R::Output],
    dest_stride: NonZeroUsize,
    src: &[u8],
    src_stride: NonZeroUsize,
    kernel: &[i16; SUBPIXEL_TAPS],
    width: NonZeroUsize,
    height: NonZeroUsize,
    rounding: R,
) {
    let taps = &kernel[(SUBPIXEL_TAPS - N) / 2..][..N];
    let mut src_offset = 0;
    let mut dest_offset = 0;

    for _y in 0..height.get() {
        let src_row = &src[src_offset..][..width.get() + N - 1];
        let dest_row = &mut dest[dest_offset..][..width.get()];
        for (out, window) in dest_row.iter_mut().zip(src_row.windows(N)) {
            let sum: i32 = window
                .iter()
                .zip(taps)
                .map(|(&sample, &tap)| i32::from(sample) * i32::from(tap))
                .sum();
            *out = rounding.narrow(sum);
        }
        src_offset += src_stride.get();
        dest_offset += dest_stride.get();
    }
}
