#![allow(dead_code)]

use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;
use subpel_convolve::ReferencePlane;

/// Padding on every side of a test frame. Enough for the filter footprint
/// of a block predicted from a reference twice as large.
pub const BORDER: usize = 16;

/// A padded frame standing in for a decoder's reference buffer.
pub struct Frame {
    pub data: Vec<u8>,
    pub stride: NonZeroUsize,
}

impl Frame {
    pub fn new(width: usize, height: usize, mut fill: impl FnMut(usize, usize) -> u8) -> Self {
        let stride = 2 * width + 2 * BORDER;
        let rows = 2 * height + 2 * BORDER;
        let mut data = Vec::with_capacity(stride * rows);
        for y in 0..rows {
            for x in 0..stride {
                data.push(fill(x, y));
            }
        }
        Self {
            data,
            stride: NonZeroUsize::new(stride).unwrap(),
        }
    }

    pub fn random(width: usize, height: usize) -> Self {
        let mut rng = Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes");
        Self::new(width, height, |_, _| rng.random())
    }

    pub fn reference(&self) -> ReferencePlane<'_> {
        ReferencePlane::new(&self.data, self.stride, BORDER, BORDER)
    }
}

pub fn nz(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap()
}
