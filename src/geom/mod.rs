mod core;
mod curve;
mod tessellation;

pub use self::core::{BBox, Point3, Tolerance};
pub use curve::{Curve3, TorusKnot3};
pub use tessellation::{
    CurveParameters, DEFAULT_MAX_SCALARS, DEFAULT_SEGMENTS_PER_DETAIL, TessellationError,
    TessellationOptions, VertexBuffer, generate, generate_with_options,
    tessellate_closed_curve_uniform,
};
