//! Sub-pixel motion compensation for 8-bit AV1 prediction blocks.
//!
//! Every operation filters a block of a padded reference plane with the
//! codec's interpolation kernels, horizontally, vertically or both, and
//! writes either final 8-bit samples or the 16-bit compound accumulator.
//! Use [`convolve`] to pick the operation from a block's parameters.

// Performance
#![warn(clippy::inline_always)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::needless_bitwise_bool)]
#![warn(clippy::needless_collect)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::non_zero_suggestions)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::stable_sort_primitive)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnecessary_box_returns)]
// Readability/Code Intention
#![warn(clippy::checked_conversions)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::enum_glob_use)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::invalid_upcast_comparisons)]
#![warn(clippy::iter_on_empty_collections)]
#![warn(clippy::iter_on_single_items)]
#![warn(clippy::macro_use_imports)]
#![warn(clippy::manual_assert)]
#![warn(clippy::manual_is_power_of_two)]
#![warn(clippy::manual_is_variant_and)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_bool)]
#![warn(clippy::mod_module_files)]
#![warn(clippy::needless_continue)]
#![warn(clippy::needless_pass_by_ref_mut)]
#![warn(clippy::option_if_let_else)]
#![warn(clippy::precedence_bits)]
#![warn(clippy::range_minus_one)]
#![warn(clippy::range_plus_one)]
#![warn(clippy::redundant_test_prefix)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::tests_outside_test_module)]
#![warn(clippy::unused_rounding)]
#![warn(clippy::verbose_bit_mask)]
// Correctness/Safety
#![deny(clippy::cfg_not_test)]
#![warn(clippy::collection_is_never_read)]
#![warn(clippy::dbg_macro)]
#![deny(clippy::debug_assert_with_mut_call)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![warn(clippy::ignore_without_reason)]
#![warn(clippy::large_stack_arrays)]
#![warn(clippy::large_stack_frames)]
#![warn(clippy::mismatching_type_param_order)]
#![warn(clippy::mixed_read_write_in_expression)]
#![warn(clippy::mut_mut)]
#![warn(clippy::suspicious_operation_groupings)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::unwrap_used)]
// Annoyances
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::uninlined_format_args)]
#![allow(unsafe_op_in_unsafe_fn)]


#[cfg(feature = "bench")]
pub mod convolve;
#[cfg(feature = "bench")]
pub mod filter;
#[cfg(feature = "bench")]
pub mod horizontal;
#[cfg(feature = "bench")]
pub mod params;
#[cfg(feature = "bench")]
pub mod plane;
#[cfg(feature = "bench")]
pub mod round;
#[cfg(feature = "bench")]
pub mod scale;
#[cfg(feature = "bench")]
pub mod util;
#[cfg(feature = "bench")]
pub mod vertical;

#[cfg(not(feature = "bench"))]
mod convolve;
#[cfg(not(feature = "bench"))]
mod filter;
#[cfg(not(feature = "bench"))]
mod horizontal;
#[cfg(not(feature = "bench"))]
mod params;
#[cfg(not(feature = "bench"))]
mod plane;
#[cfg(not(feature = "bench"))]
mod round;
#[cfg(not(feature = "bench"))]
mod scale;
#[cfg(not(feature = "bench"))]
mod util;
#[cfg(not(feature = "bench"))]
mod vertical;

pub use convolve::{
    ConvolveFn,
    Prediction,
    convolve,
    convolve_2d,
    convolve_compound_2d,
    convolve_compound_copy,
    convolve_compound_horizontal,
    convolve_compound_vertical,
    convolve_copy,
    convolve_fn,
    convolve_horizontal,
    convolve_vertical,
};
pub use filter::{FilterFamily, SUBPEL_FILTERS, TapCount, get_taps};
pub use params::{
    ConvolveFlags,
    ConvolveParams,
    InterpolationFilter,
    MAX_BLOCK_SIZE,
    MAX_STEP,
    UNSCALED_STEP,
};
pub use plane::ReferencePlane;
pub use round::{COMPOUND_INTER_ROUND_BITS_VERTICAL, COMPOUND_ROUND_OFFSET};
pub use scale::convolve_scale_2d;
