use std::num::NonZeroUsize;

/// Read-only view of an 8-bit reference plane, positioned at the integer-pel
/// origin of one prediction block.
///
/// Filters read up to 3 samples before and 4 samples after the block on each
/// axis, more for scaled references. The frame buffer owner pads the plane so
/// those reads stay inside `data`; a read that falls outside it panics.
#[derive(Debug, Clone, Copy)]
pub struct ReferencePlane<'a> {
    data: &'a [u8],
    stride: NonZeroUsize,
    origin: usize,
}

impl<'a> ReferencePlane<'a> {
    /// `x` and `y` locate the block's top-left integer sample inside `data`.
    #[must_use]
    pub fn new(data: &'a [u8], stride: NonZeroUsize, x: usize, y: usize) -> Self {
        debug_assert!(x < stride.get());
        Self {
            data,
            stride,
            origin: y * stride.get() + x,
        }
    }

    #[must_use]
    pub const fn stride(&self) -> NonZeroUsize {
        self.stride
    }

    /// Samples starting `left` columns and `up` rows before the block origin.
    #[must_use]
    pub fn window(&self, left: usize, up: usize) -> &'a [u8] {
        let start = self
            .origin
            .checked_sub(up * self.stride.get() + left)
            .expect("reference window starts before the plane");
        &self.data[start..]
    }
}
