use std::num::NonZeroUsize;

use super::ScaledColumn;
use crate::{
    filter::FilterFamily,
    params::SUBPIXEL_TAPS,
    round::{Intermediate, Rounding},
};

// Magnitudes of the non-zero taps, one table per tap position.
static BILINEAR_TAPS: [[i32; 16]; 2] = [
    [
        128, 120, 112, 104, 96, 88, 80, 72, 64, 56, 48, 40, 32, 24, 16, 8,
    ],
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 72, 80, 88, 96, 104, 112, 120],
];

static SMOOTH_4TAP: [[i32; 16]; 4] = [
    [0, 30, 26, 22, 20, 18, 16, 14, 12, 12, 10, 8, 6, 4, 4, 2],
    [
        128, 62, 62, 62, 60, 58, 56, 54, 52, 48, 46, 44, 42, 40, 36, 34,
    ],
    [0, 34, 36, 40, 42, 44, 46, 48, 52, 54, 56, 58, 60, 62, 62, 62],
    [0, 2, 4, 4, 6, 8, 10, 12, 12, 14, 16, 18, 20, 22, 26, 30],
];

// The outer taps are never positive.
static REGULAR_4TAP: [[i32; 16]; 4] = [
    [0, 4, 8, 10, 12, 12, 14, 12, 12, 10, 10, 10, 8, 6, 4, 2],
    [
        128, 126, 122, 116, 110, 102, 94, 84, 76, 66, 58, 48, 38, 28, 18, 8,
    ],
    [
        0, 8, 18, 28, 38, 48, 58, 66, 76, 84, 94, 102, 110, 116, 122, 126,
    ],
    [0, 2, 4, 6, 8, 10, 10, 10, 12, 12, 14, 12, 12, 10, 8, 4],
];

pub(super) fn horizontal<const N: usize>(
    dest: &mut [u16],
    src: &[u8],
    src_stride: NonZeroUsize,
    family: FilterFamily,
    columns: &[ScaledColumn],
    rows: usize,
) {
    let offset = (SUBPIXEL_TAPS - N) / 2;
    filter_rows(dest, src, src_stride, columns, rows, |row, column| {
        let taps = &family.taps(column.phase)[offset..][..N];
        row[column.offset + offset..][..N]
            .iter()
            .zip(taps)
            .map(|(&sample, &tap)| i32::from(sample) * i32::from(tap))
            .sum()
    });
}

pub(super) fn horizontal_2tap(
    dest: &mut [u16],
    src: &[u8],
    src_stride: NonZeroUsize,
    columns: &[ScaledColumn],
    rows: usize,
) {
    filter_rows(dest, src, src_stride, columns, rows, |row, column| {
        let window = &row[column.offset + 3..][..2];
        i32::from(window[0]) * BILINEAR_TAPS[0][column.phase]
            + i32::from(window[1]) * BILINEAR_TAPS[1][column.phase]
    });
}

pub(super) fn horizontal_4tap_positive(
    dest: &mut [u16],
    src: &[u8],
    src_stride: NonZeroUsize,
    columns: &[ScaledColumn],
    rows: usize,
) {
    filter_rows(dest, src, src_stride, columns, rows, |row, column| {
        row[column.offset + 2..][..4]
            .iter()
            .zip(&SMOOTH_4TAP)
            .map(|(&sample, taps)| i32::from(sample) * taps[column.phase])
            .sum()
    });
}

pub(super) fn horizontal_4tap_signed(
    dest: &mut [u16],
    src: &[u8],
    src_stride: NonZeroUsize,
    columns: &[ScaledColumn],
    rows: usize,
) {
    filter_rows(dest, src, src_stride, columns, rows, |row, column| {
        let window = &row[column.offset + 2..][..4];
        let phase = column.phase;
        i32::from(window[1]) * REGULAR_4TAP[1][phase] + i32::from(window[2]) * REGULAR_4TAP[2][phase]
            - i32::from(window[0]) * REGULAR_4TAP[0][phase]
            - i32::from(window[3]) * REGULAR_4TAP[3][phase]
    });
}

/// Runs `sum` for every column of every row and stores the narrowed result.
fn filter_rows(
    dest: &mut [u16],
    src: &[u8],
    src_stride: NonZeroUsize,
    columns: &[ScaledColumn],
    rows: usize,
    sum: impl Fn(&[u8], &ScaledColumn) -> i32,
) {
    let width = columns.len();
    debug_assert!(dest.len() >= width * rows);
    let mut src_offset = 0;
    for dest_row in dest.chunks_exact_mut(width).take(rows) {
        let row = &src[src_offset..];
        for (out, column) in dest_row.iter_mut().zip(columns) {
            *out = Intermediate.narrow(sum(row, column));
        }
        src_offset += src_stride.get();
    }
}
