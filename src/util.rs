
use std::{fmt::Debug, num::NonZeroUsize};

#[cfg(target_arch = "x86_64")]
cpufeatures::new!(cpuid_avx2, "avx2");

#[cfg(target_arch = "x86_64")]
pub use cpuid_avx2::get as has_avx2;

/// A sample a filter pass can read: raw 8-bit reference samples, or the
/// 16-bit output of a horizontal pass.
pub trait Sample: Copy + Debug + Into<i32> + 'static {}

impl Sample for u8 {}

impl Sample for u16 {}

/// Copies a `width` x `height` block between two strided buffers.
///
/// Uses a single bulk copy when both buffers are tightly packed.
pub fn copy_block<T: Copy>(
    dest: &mut [T],
    dest_stride: NonZeroUsize,
    src: &[T],
    src_stride: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let height = height.get();
    let width = width.get();
    let src_stride = src_stride.get();
    let dest_stride = dest_stride.get();

    if src_stride == dest_stride && src_stride == width {
        dest[..width * height].copy_from_slice(&src[..width * height]);
    } else {
        for i in 0..height {
            let src_start = i * src_stride;
            let dest_start = i * dest_stride;
            dest[dest_start..dest_start + width].copy_from_slice(&src[src_start..src_start + width]);
        }
    }
}
