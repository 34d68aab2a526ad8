//! Uniform tessellation of closed parametric curves into flat vertex buffers.
//!
//! The main entry point is [`generate`], which samples a torus knot ("weaver
//! geometry") and returns its points as a flat `x, y, z, x, y, z, ...` buffer
//! of `f32` values, ready to be handed to a renderer.
//!
//! # Resolution
//!
//! The number of segments is `detail * segments_per_detail`. Sampling runs
//! from `i = 0` to `i = segments` inclusive, so the buffer always holds
//! `3 * (segments + 1)` scalars and the last point repeats the first one.
//!
//! ```ignore
//! use weaver_geometry::geom::{CurveParameters, generate};
//!
//! let buffer = generate(&CurveParameters::new(10, 1.5, 0.1, 5, 7))?;
//! assert_eq!(buffer.count(), 3 * (10 * 100 + 1));
//! ```
//!
//! # Limits
//!
//! - `detail` must be at least 1; `0` and negative values are rejected with
//!   [`TessellationError::InvalidDetail`] instead of dividing by zero.
//! - Buffers larger than [`TessellationOptions::max_scalars`] are rejected with
//!   [`TessellationError::AllocationFailure`] before anything is allocated.

use serde::{Deserialize, Serialize};

use super::core::{BBox, Point3, Tolerance};
use super::curve::{Curve3, TorusKnot3};

/// Segments generated per unit of `detail`.
pub const DEFAULT_SEGMENTS_PER_DETAIL: usize = 100;

/// Largest buffer (in scalars) a single call may allocate: 256 MiB of `f32`.
pub const DEFAULT_MAX_SCALARS: usize = 1 << 26;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TessellationError {
    #[error("detail must be at least 1 and yield at least one segment, got {detail}")]
    InvalidDetail { detail: i32 },
    #[error("vertex buffer of {requested} floats cannot be allocated")]
    AllocationFailure { requested: u128 },
}

/// Shape parameters of a weaver curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    /// Sampling resolution; multiplied by the segment density.
    pub detail: i32,
    /// Major radius of the central loop.
    pub radius: f32,
    /// Radius of the secondary winding.
    pub tube: f32,
    /// Winding count around the Z axis.
    pub p: i32,
    /// Winding count around the tube.
    pub q: i32,
}

impl CurveParameters {
    #[must_use]
    pub const fn new(detail: i32, radius: f32, tube: f32, p: i32, q: i32) -> Self {
        Self {
            detail,
            radius,
            tube,
            p,
            q,
        }
    }

    /// Parameters used for the "Dialogue Weaver" badge.
    #[must_use]
    pub const fn badge_preset() -> Self {
        Self::new(10, 1.5, 0.1, 5, 7)
    }

    #[must_use]
    pub fn to_curve(&self) -> TorusKnot3 {
        TorusKnot3::new(
            f64::from(self.radius),
            f64::from(self.tube),
            self.p,
            self.q,
        )
    }
}

/// Options controlling weaver tessellation.
///
/// # Example
/// ```ignore
/// use weaver_geometry::geom::TessellationOptions;
///
/// // Denser sampling, capped at one million floats.
/// let options = TessellationOptions::new(120).with_max_scalars(1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationOptions {
    /// Segments generated per unit of `detail` (`K`).
    pub segments_per_detail: usize,
    /// Upper bound on the number of `f32` values in one buffer.
    pub max_scalars: usize,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            segments_per_detail: DEFAULT_SEGMENTS_PER_DETAIL,
            max_scalars: DEFAULT_MAX_SCALARS,
        }
    }
}

impl TessellationOptions {
    #[must_use]
    pub const fn new(segments_per_detail: usize) -> Self {
        Self {
            segments_per_detail,
            max_scalars: DEFAULT_MAX_SCALARS,
        }
    }

    #[must_use]
    pub const fn with_max_scalars(mut self, max_scalars: usize) -> Self {
        self.max_scalars = max_scalars;
        self
    }

    /// Resolves `detail` into a segment count.
    ///
    /// # Errors
    /// [`TessellationError::InvalidDetail`] when no segment would be produced,
    /// [`TessellationError::AllocationFailure`] when the resulting buffer
    /// exceeds `max_scalars`.
    pub fn segments_for(&self, detail: i32) -> Result<usize, TessellationError> {
        let Ok(detail_count) = usize::try_from(detail) else {
            return Err(TessellationError::InvalidDetail { detail });
        };
        if detail_count == 0 || self.segments_per_detail == 0 {
            return Err(TessellationError::InvalidDetail { detail });
        }

        let requested = (detail_count as u128 * self.segments_per_detail as u128 + 1) * 3;
        if requested > self.max_scalars as u128 {
            return Err(TessellationError::AllocationFailure { requested });
        }

        Ok(detail_count * self.segments_per_detail)
    }
}

/// Flat `f32` vertex buffer with its scalar count.
///
/// Each consecutive triple is one point, in curve order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexBuffer {
    vertices: Vec<f32>,
    count: usize,
}

impl VertexBuffer {
    fn from_vec(vertices: Vec<f32>) -> Self {
        let count = vertices.len();
        Self { vertices, count }
    }

    /// Number of scalars (not points) in the buffer.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.count / 3
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.vertices
    }

    /// Raw view for hosts that read linear memory directly.
    /// Valid for [`count`](Self::count) scalars while `self` is alive.
    #[must_use]
    pub fn as_ptr(&self) -> *const f32 {
        self.vertices.as_ptr()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.vertices
    }

    /// Splits into the buffer and its out-of-band count.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f32>, usize) {
        (self.vertices, self.count)
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = [f32; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
    }

    #[must_use]
    pub fn first_point(&self) -> Option<[f32; 3]> {
        self.points().next()
    }

    #[must_use]
    pub fn last_point(&self) -> Option<[f32; 3]> {
        self.points().last()
    }

    /// True when the last point coincides with the first within `tol`.
    #[must_use]
    pub fn is_closed(&self, tol: Tolerance) -> bool {
        match (self.first_point(), self.last_point()) {
            (Some(first), Some(last)) => {
                tol.points_eq(Point3::from_f32(first), Point3::from_f32(last))
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        BBox::from_points(self.points().map(Point3::from_f32))
    }
}

/// Samples a closed curve at `segments + 1` evenly spaced parameters.
///
/// The closing sample at the end of the domain is kept, so consumers that
/// connect consecutive points get a visually closed loop without wrapping.
pub fn tessellate_closed_curve_uniform(
    curve: &impl Curve3,
    segments: usize,
) -> impl Iterator<Item = Point3> + '_ {
    let (t0, t1) = curve.domain();
    let span = t1 - t0;
    (0..=segments).map(move |i| {
        let s = if segments == 0 {
            0.0
        } else {
            i as f64 / segments as f64
        };
        curve.point_at(t0 + span * s)
    })
}

/// Generates the weaver vertex buffer using [`TessellationOptions::default`].
///
/// # Errors
/// See [`generate_with_options`].
pub fn generate(params: &CurveParameters) -> Result<VertexBuffer, TessellationError> {
    generate_with_options(params, TessellationOptions::default())
}

/// Generates the weaver vertex buffer.
///
/// The buffer is allocated once with its exact final size before any point is
/// computed; on error nothing is returned.
///
/// # Errors
/// - [`TessellationError::InvalidDetail`] if `detail <= 0` or the options
///   produce zero segments.
/// - [`TessellationError::AllocationFailure`] if the buffer is larger than
///   `max_scalars` or the allocator refuses it.
pub fn generate_with_options(
    params: &CurveParameters,
    options: TessellationOptions,
) -> Result<VertexBuffer, TessellationError> {
    let segments = options.segments_for(params.detail).inspect_err(|err| {
        log::debug!("weaver tessellation rejected {params:?}: {err}");
    })?;
    let scalars = 3 * (segments + 1);

    let mut vertices: Vec<f32> = Vec::new();
    vertices.try_reserve_exact(scalars).map_err(|_| {
        log::debug!("weaver tessellation could not reserve {scalars} floats");
        TessellationError::AllocationFailure {
            requested: scalars as u128,
        }
    })?;

    log::debug!(
        "weaver tessellation: detail={} segments={segments} scalars={scalars}",
        params.detail
    );

    let curve = params.to_curve();
    for point in tessellate_closed_curve_uniform(&curve, segments) {
        vertices.extend_from_slice(&[point.x as f32, point.y as f32, point.z as f32]);
    }
    debug_assert_eq!(vertices.len(), scalars);

    Ok(VertexBuffer::from_vec(vertices))
}
