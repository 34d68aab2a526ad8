use weaver_geometry::WeaverGeometry;
use weaver_geometry::geom::{CurveParameters, Tolerance, generate};

#[test]
fn raw_view_matches_reported_length() {
    let preset = CurveParameters::badge_preset();
    let geometry = WeaverGeometry::new(
        preset.detail,
        preset.radius,
        preset.tube,
        preset.p,
        preset.q,
    )
    .expect("badge preset is valid");

    // Read the buffer the way a host reads linear memory: pointer plus count.
    let view = unsafe { std::slice::from_raw_parts(geometry.ptr(), geometry.len()) };
    assert_eq!(view.len(), 3 * (10 * 100 + 1));
    assert_eq!(view, geometry.buffer().as_slice());
}

#[test]
fn handle_releases_into_owned_buffer() {
    let geometry = WeaverGeometry::new(3, 2.0, 0.5, 2, 3).expect("valid detail");
    let count = geometry.len();

    let buffer = geometry.into_buffer();
    assert_eq!(buffer.count(), count);
    assert!(buffer.is_closed(Tolerance::new(1e-5)));
    assert_eq!(
        buffer,
        generate(&CurveParameters::new(3, 2.0, 0.5, 2, 3)).expect("valid detail")
    );
}

#[test]
fn invalid_detail_never_produces_a_handle() {
    for detail in [0, -1, i32::MIN] {
        assert!(
            WeaverGeometry::new(detail, 1.5, 0.1, 5, 7).is_err(),
            "detail {detail} should be rejected"
        );
    }
}

#[test]
fn points_pair_up_into_triples() {
    let geometry = WeaverGeometry::new(1, 1.5, 0.1, 5, 7).expect("valid detail");
    let vertices = geometry.vertices();
    let points: Vec<[f32; 3]> = geometry.buffer().points().collect();

    assert_eq!(points.len() * 3, vertices.len());
    for (i, point) in points.iter().enumerate() {
        assert_eq!(point, &[vertices[3 * i], vertices[3 * i + 1], vertices[3 * i + 2]]);
    }
}
