#![allow(clippy::unwrap_used, reason = "allow in test files")]

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::*;
use crate::{
    params::{InterpolationFilter, UNSCALED_STEP},
    tests::{
        BLOCK_SIZES,
        TestPlane,
        naive_2d,
        naive_horizontal,
        naive_vertical,
        nz,
        rng,
    },
};

const FILTERS: [InterpolationFilter; 4] = [
    InterpolationFilter::EightTap,
    InterpolationFilter::EightTapSmooth,
    InterpolationFilter::EightTapSharp,
    InterpolationFilter::Bilinear,
];

const SHAPES: [(usize, usize); 9] = [
    (2, 2),
    (2, 4),
    (4, 2),
    (4, 4),
    (8, 4),
    (8, 8),
    (16, 8),
    (32, 32),
    (128, 128),
];

fn params(
    filter_x: InterpolationFilter,
    filter_y: InterpolationFilter,
    width: usize,
    height: usize,
    phase_x: u32,
    phase_y: u32,
) -> ConvolveParams {
    ConvolveParams::new(filter_x, filter_y, nz(width), nz(height))
        .with_subpixel(phase_x << 6, phase_y << 6)
}

fn kernel_x(p: &ConvolveParams) -> &'static [i16; SUBPIXEL_TAPS] {
    FilterFamily::resolve(p.horizontal_filter, p.width).taps(p.phase_x())
}

fn kernel_y(p: &ConvolveParams) -> &'static [i16; SUBPIXEL_TAPS] {
    FilterFamily::resolve(p.vertical_filter, p.height).taps(p.phase_y())
}

fn single(
    op: fn(&ReferencePlane<'_>, &ConvolveParams, &mut [u8], NonZeroUsize),
    plane: &TestPlane,
    p: &ConvolveParams,
) -> Vec<u8> {
    let mut dest = vec![0u8; p.width.get() * p.height.get()];
    op(&plane.reference(), p, &mut dest, p.width);
    dest
}

fn compound(
    op: fn(&ReferencePlane<'_>, &ConvolveParams, &mut [u16], NonZeroUsize),
    plane: &TestPlane,
    p: &ConvolveParams,
) -> Vec<u16> {
    let mut dest = vec![0u16; p.width.get() * p.height.get()];
    op(&plane.reference(), p, &mut dest, p.width);
    dest
}

#[test]
fn copy_is_exact_for_every_block_size() {
    let mut rng = rng();
    for width in BLOCK_SIZES {
        for height in BLOCK_SIZES {
            let plane = TestPlane::random(&mut rng, width, height);
            let p = params(
                InterpolationFilter::EightTap,
                InterpolationFilter::EightTap,
                width,
                height,
                0,
                0,
            );
            let out = single(convolve_copy, &plane, &p);
            for y in 0..height {
                for x in 0..width {
                    assert_eq!(
                        i32::from(out[y * width + x]),
                        plane.at(x as isize, y as isize),
                        "{width}x{height} at ({x}, {y})"
                    );
                }
            }
        }
    }
}

#[test]
fn compound_copy_scales_and_offsets() {
    let mut rng = rng();
    let plane = TestPlane::random(&mut rng, 16, 8);
    let p = params(
        InterpolationFilter::EightTap,
        InterpolationFilter::EightTap,
        16,
        8,
        0,
        0,
    );
    let out = compound(convolve_compound_copy, &plane, &p);
    for y in 0..8 {
        for x in 0..16 {
            let expected = (plane.at(x as isize, y as isize) << 4) + 6144;
            assert_eq!(i32::from(out[y * 16 + x]), expected);
        }
    }
}

#[test]
fn half_pel_regular_on_constant_plane() {
    let plane = TestPlane::filled(100, 8, 8);
    let p = params(
        InterpolationFilter::EightTap,
        InterpolationFilter::EightTap,
        8,
        8,
        8,
        0,
    );
    assert_eq!(single(convolve_horizontal, &plane, &p), vec![100u8; 64]);
    assert_eq!(single(convolve_2d, &plane, &p), vec![100u8; 64]);
}

#[test]
fn bilinear_half_pel_between_black_and_white() {
    let mut plane = TestPlane::filled(0, 2, 2);
    let stride = plane.stride.get();
    for (i, sample) in plane.data.iter_mut().enumerate() {
        if (i / stride) % 2 == 1 {
            *sample = 255;
        }
    }
    let p = params(
        InterpolationFilter::Bilinear,
        InterpolationFilter::Bilinear,
        2,
        2,
        0,
        8,
    );
    assert_eq!(single(convolve_vertical, &plane, &p), vec![128u8; 4]);
}

#[test]
fn one_axis_operations_match_direct_formula() {
    let mut rng = rng();
    for (width, height) in SHAPES {
        let plane = TestPlane::random(&mut rng, width, height);
        for filter in FILTERS {
            for phase in [1, 4, 8, 12, 15] {
                let p = params(filter, filter, width, height, phase, 0);
                assert_eq!(
                    single(convolve_horizontal, &plane, &p),
                    naive_horizontal(&plane, kernel_x(&p), width, height, SingleHorizontal),
                    "{filter:?} phase {phase} {width}x{height}"
                );
                assert_eq!(
                    compound(convolve_compound_horizontal, &plane, &p),
                    naive_horizontal(&plane, kernel_x(&p), width, height, Compound),
                    "{filter:?} phase {phase} {width}x{height}"
                );

                let p = params(filter, filter, width, height, 0, phase);
                assert_eq!(
                    single(convolve_vertical, &plane, &p),
                    naive_vertical(&plane, kernel_y(&p), width, height, SingleVertical),
                    "{filter:?} phase {phase} {width}x{height}"
                );
                assert_eq!(
                    compound(convolve_compound_vertical, &plane, &p),
                    naive_vertical(&plane, kernel_y(&p), width, height, Compound),
                    "{filter:?} phase {phase} {width}x{height}"
                );
            }
        }
    }
}

#[test]
fn two_axis_operations_match_direct_formula() {
    let mut rng = rng();
    for (width, height) in SHAPES {
        let plane = TestPlane::random(&mut rng, width, height);
        for filter_x in FILTERS {
            for filter_y in FILTERS {
                let p = params(filter_x, filter_y, width, height, 5, 11);
                assert_eq!(
                    single(convolve_2d, &plane, &p),
                    naive_2d(&plane, kernel_x(&p), kernel_y(&p), width, height, Single2D),
                    "{filter_x:?}/{filter_y:?} {width}x{height}"
                );
                assert_eq!(
                    compound(convolve_compound_2d, &plane, &p),
                    naive_2d(
                        &plane,
                        kernel_x(&p),
                        kernel_y(&p),
                        width,
                        height,
                        Compound2D::default()
                    ),
                    "{filter_x:?}/{filter_y:?} {width}x{height}"
                );
            }
        }
    }
}

#[test]
fn vertical_phase_zero_matches_filtered_result() {
    let mut rng = rng();
    for size in BLOCK_SIZES {
        let plane = TestPlane::random(&mut rng, size, size);
        for filter in FILTERS {
            let p = params(filter, filter, size, size, 0, 0);
            let family = FilterFamily::resolve(filter, p.height);

            let mut filtered = vec![0u8; size * size];
            vertical_only(&plane.reference(), &p, &mut filtered, p.width, SingleVertical);

            assert_eq!(single(convolve_vertical, &plane, &p), filtered, "{family:?}");
            assert_eq!(
                filtered,
                naive_vertical(&plane, family.taps(0), size, size, SingleVertical),
                "{family:?}"
            );
        }
    }
}

#[test]
fn two_axis_with_one_integer_axis_matches_one_axis() {
    let mut rng = rng();
    for (width, height) in SHAPES {
        let plane = TestPlane::random(&mut rng, width, height);
        for filter in FILTERS {
            for phase in [3, 8, 14] {
                let p = params(filter, filter, width, height, phase, 0);
                assert_eq!(
                    single(convolve_2d, &plane, &p),
                    single(convolve_horizontal, &plane, &p)
                );
                assert_eq!(
                    compound(convolve_compound_2d, &plane, &p),
                    compound(convolve_compound_horizontal, &plane, &p)
                );

                let p = params(filter, filter, width, height, 0, phase);
                assert_eq!(
                    single(convolve_2d, &plane, &p),
                    single(convolve_vertical, &plane, &p)
                );
                assert_eq!(
                    compound(convolve_compound_2d, &plane, &p),
                    compound(convolve_compound_vertical, &plane, &p)
                );
            }
        }
    }
}

#[test]
fn operations_respect_destination_stride() {
    let mut rng = rng();
    let plane = TestPlane::random(&mut rng, 8, 4);
    let p = params(
        InterpolationFilter::EightTapSharp,
        InterpolationFilter::EightTapSmooth,
        8,
        4,
        6,
        9,
    );
    let packed = single(convolve_2d, &plane, &p);

    let stride = 20;
    let mut dest = vec![7u8; stride * 4];
    convolve_2d(&plane.reference(), &p, &mut dest, nz(stride));
    for y in 0..4 {
        assert_eq!(&dest[y * stride..][..8], &packed[y * 8..][..8]);
        assert!(dest[y * stride + 8..][..12].iter().all(|&v| v == 7));
    }
}

#[test]
fn dispatcher_routes_by_phase_and_output() {
    let mut rng = rng();
    let plane = TestPlane::random(&mut rng, 16, 16);
    for (phase_x, phase_y) in [(0, 0), (7, 0), (0, 7), (7, 9)] {
        let p = params(
            InterpolationFilter::EightTap,
            InterpolationFilter::EightTapSharp,
            16,
            16,
            phase_x,
            phase_y,
        );

        let expected_single = match (phase_x != 0, phase_y != 0) {
            (false, false) => single(convolve_copy, &plane, &p),
            (true, false) => single(convolve_horizontal, &plane, &p),
            (false, true) => single(convolve_vertical, &plane, &p),
            (true, true) => single(convolve_2d, &plane, &p),
        };
        let mut dest = vec![0u8; 256];
        convolve(&plane.reference(), &p, Prediction::Single(&mut dest), nz(16));
        assert_eq!(dest, expected_single, "phases ({phase_x}, {phase_y})");

        let expected_compound = match (phase_x != 0, phase_y != 0) {
            (false, false) => compound(convolve_compound_copy, &plane, &p),
            (true, false) => compound(convolve_compound_horizontal, &plane, &p),
            (false, true) => compound(convolve_compound_vertical, &plane, &p),
            (true, true) => compound(convolve_compound_2d, &plane, &p),
        };
        let mut dest = vec![0u16; 256];
        convolve(&plane.reference(), &p, Prediction::Compound(&mut dest), nz(16));
        assert_eq!(dest, expected_compound, "phases ({phase_x}, {phase_y})");
    }
}

#[test]
fn dispatcher_sends_scaled_blocks_to_the_scaled_path() {
    let mut rng = rng();
    let plane = TestPlane::random(&mut rng, 8, 8);
    let p = params(
        InterpolationFilter::EightTap,
        InterpolationFilter::EightTap,
        8,
        8,
        3,
        3,
    )
    .with_step(UNSCALED_STEP + 256, UNSCALED_STEP + 512);

    let mut expected = vec![0u16; 64];
    convolve_scale_2d(&plane.reference(), &p, &mut expected, nz(8));

    let mut dest = vec![0u16; 64];
    convolve(&plane.reference(), &p, Prediction::Compound(&mut dest), nz(8));
    assert_eq!(dest, expected);
}

#[test]
#[should_panic(expected = "Compound")]
fn scaled_single_prediction_panics() {
    let plane = TestPlane::filled(0, 8, 8);
    let p = params(
        InterpolationFilter::EightTap,
        InterpolationFilter::EightTap,
        8,
        8,
        0,
        0,
    )
    .with_step(2 * UNSCALED_STEP, UNSCALED_STEP);
    let mut dest = vec![0u8; 64];
    convolve(&plane.reference(), &p, Prediction::Single(&mut dest), nz(8));
}

#[quickcheck]
fn two_axis_single_matches_direct_formula(
    filter_x: u8,
    filter_y: u8,
    size: (u8, u8),
    phases: (u8, u8),
    seed: u64,
) -> TestResult {
    use rand::SeedableRng;

    let width = BLOCK_SIZES[usize::from(size.0) % 5];
    let height = BLOCK_SIZES[usize::from(size.1) % 5];
    let filter_x = FILTERS[usize::from(filter_x) % 4];
    let filter_y = FILTERS[usize::from(filter_y) % 4];
    let mut rng = rand_xoshiro::Xoshiro128StarStar::seed_from_u64(seed);
    let plane = TestPlane::random(&mut rng, width, height);
    let p = params(
        filter_x,
        filter_y,
        width,
        height,
        u32::from(phases.0 % 16),
        u32::from(phases.1 % 16),
    );

    TestResult::from_bool(
        single(convolve_2d, &plane, &p)
            == naive_2d(&plane, kernel_x(&p), kernel_y(&p), width, height, Single2D),
    )
}
