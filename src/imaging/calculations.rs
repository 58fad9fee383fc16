//! Pure calculation functions for output geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// How the planner treats sources whose longer side already fits the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalePolicy {
    /// Always scale so the longer side equals the bound, upscaling small
    /// sources.
    #[default]
    AlwaysFit,
    /// Keep the source dimensions when the longer side is already within the
    /// bound; otherwise behave like [`ScalePolicy::AlwaysFit`].
    ShrinkOnly,
}

/// Calculate the output dimensions for a source image.
///
/// The width branch is taken only when the source is strictly wider than it
/// is tall; squares scale on height. The derived side is rounded and floored
/// at 1 so extreme aspect ratios never produce an empty image.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `max_resolution` - Bound on the longer output side
/// * `policy` - Whether sources smaller than the bound are upscaled
///
/// # Examples
/// ```
/// # use downsize::imaging::{ScalePolicy, plan_geometry};
/// // Landscape: width pinned to the bound
/// assert_eq!(plan_geometry((2000, 1000), 500, ScalePolicy::AlwaysFit), (500, 250));
///
/// // Portrait smaller than the bound is still scaled up
/// assert_eq!(plan_geometry((400, 800), 1024, ScalePolicy::AlwaysFit), (512, 1024));
/// ```
pub fn plan_geometry(source: (u32, u32), max_resolution: u32, policy: ScalePolicy) -> (u32, u32) {
    let (src_w, src_h) = source;

    if policy == ScalePolicy::ShrinkOnly && src_w.max(src_h) <= max_resolution {
        return (src_w.max(1), src_h.max(1));
    }

    let max_resolution = max_resolution.max(1);
    if src_w > src_h {
        let h = scale_side(src_h, max_resolution, src_w);
        (max_resolution, h)
    } else {
        let w = scale_side(src_w, max_resolution, src_h);
        (w, max_resolution)
    }
}

/// `round(side * bound / longer)`, never less than 1.
fn scale_side(side: u32, bound: u32, longer: u32) -> u32 {
    if longer == 0 {
        return 1;
    }
    let scaled = (side as f64 * bound as f64 / longer as f64).round();
    (scaled as u32).max(1)
}
