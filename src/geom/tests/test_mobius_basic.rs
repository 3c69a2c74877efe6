use std::f64::consts::PI;

use crate::geom::{
    MobiusError, MobiusParams, MobiusStrip, Tolerance, round_to_precision,
};

fn strip(central_radius: f64, width: f64, resolution: usize) -> MobiusStrip {
    MobiusStrip::new(MobiusParams::new(central_radius, width, resolution)).unwrap()
}

#[test]
fn mesh_has_square_shape_and_finite_values() {
    let strip = strip(1.0, 0.4, 150);
    assert_eq!(strip.x().shape(), (150, 150));
    assert_eq!(strip.y().shape(), (150, 150));
    assert_eq!(strip.z().shape(), (150, 150));
    assert!(strip.mesh().is_all_finite());
    assert_eq!(strip.u().len(), 150);
    assert_eq!(strip.v().len(), 150);
    assert_eq!(strip.u()[149], 2.0 * PI);
    assert_eq!(strip.v()[0], -0.2);
    assert_eq!(strip.v()[149], 0.2);
}

#[test]
fn mesh_corners_land_on_the_rims() {
    let strip = strip(1.0, 0.4, 150);
    let tol = Tolerance::new(1e-12);
    let mesh = strip.mesh();

    let p = mesh.point(0, 0).unwrap();
    assert!(tol.approx_eq_f64(p.x, 0.8) && tol.approx_eq_f64(p.y, 0.0) && tol.approx_eq_f64(p.z, 0.0));
    // (u = 2π, v = -w/2) sits on the outer side after the half-twist.
    let p = mesh.point(0, 149).unwrap();
    assert!(tol.approx_eq_f64(p.x, 1.2) && tol.approx_eq_f64(p.y, 0.0) && tol.approx_eq_f64(p.z, 0.0));
    let p = mesh.point(149, 0).unwrap();
    assert!(tol.approx_eq_f64(p.x, 1.2));
    let p = mesh.point(149, 149).unwrap();
    assert!(tol.approx_eq_f64(p.x, 0.8));
    assert!(mesh.point(150, 0).is_none());
}

#[test]
fn reference_values_at_example_parameters() {
    let strip = strip(1.0, 0.4, 150);
    let area = strip.surface_area_default();
    let edge = strip.edge_length_default();
    assert!(area.is_finite() && area > 0.0);
    assert!(edge.is_finite() && edge > 0.0);
    assert!((area - 2.551_471_465_729_511).abs() < 1e-6, "area {area}");
    assert!((edge - 12.629_378_832_504_191).abs() < 1e-6, "edge {edge}");
    assert_eq!(strip.surface_area(6), 2.551_471);
    assert_eq!(strip.edge_length(6), 12.629_379);
}

#[test]
fn measurements_are_deterministic() {
    let a = strip(1.0, 0.4, 150);
    let b = strip(1.0, 0.4, 150);
    assert_eq!(a.surface_area_default().to_bits(), b.surface_area_default().to_bits());
    assert_eq!(a.edge_length_default().to_bits(), b.edge_length_default().to_bits());
    assert_eq!(a.edge_length_default().to_bits(), a.edge_length_default().to_bits());
    assert_eq!(a.mesh(), b.mesh());
}

#[test]
fn precision_only_affects_final_rounding() {
    let strip = strip(1.0, 0.4, 150);
    for digits in [0, 2, 6, 10] {
        assert_eq!(
            strip.surface_area(digits),
            round_to_precision(strip.surface_area(14), digits)
        );
        assert_eq!(
            strip.edge_length(digits),
            round_to_precision(strip.edge_length(14), digits)
        );
    }
}

#[test]
fn surface_area_converges_from_above() {
    let areas: Vec<f64> = [10, 20, 50, 100, 200]
        .into_iter()
        .map(|n| strip(1.0, 0.4, n).surface_area_default())
        .collect();
    for pair in areas.windows(2) {
        assert!(pair[1] < pair[0], "areas not decreasing: {areas:?}");
    }
    assert!(areas.iter().all(|a| *a > 0.0));
}

#[test]
fn edge_length_grows_with_resolution() {
    let edges: Vec<f64> = [3, 10, 50, 150, 400]
        .into_iter()
        .map(|n| strip(1.0, 0.4, n).edge_length_default())
        .collect();
    for pair in edges.windows(2) {
        assert!(pair[1] > pair[0], "edges not increasing: {edges:?}");
    }
}

#[test]
fn thin_strip_area_approaches_band_area() {
    for (r, w, n) in [(1.0, 0.1, 100), (2.0, 0.1, 100), (1.0, 0.05, 200)] {
        let area = strip(r, w, n).surface_area_default();
        let band = 2.0 * PI * r * w;
        assert!(((area - band) / band).abs() < 0.05, "R={r} w={w} n={n}: {area} vs {band}");
    }
}

#[test]
fn two_samples_per_axis_is_enough() {
    let strip = strip(1.0, 0.1, 2);
    assert_eq!(strip.mesh().shape(), (2, 2));
    let area = strip.surface_area_default();
    assert!((area - 2.514_061_364_920_671).abs() < 1e-9, "area {area}");
    assert!((strip.edge_length_default() - 0.2).abs() < 1e-12);
}

#[test]
fn zero_width_degenerates_gracefully() {
    let strip = strip(1.0, 0.0, 50);
    assert_eq!(strip.surface_area_default(), 0.0);
    let edge = strip.edge_length_default();
    assert!((edge - 12.557_763_116_219_734).abs() < 1e-9, "edge {edge}");
    assert!(edge < 4.0 * PI);
}

#[test]
fn invalid_parameters_are_rejected() {
    for (r, w, n, name) in [
        (1.0, 0.3, 1, "resolution"),
        (1.0, 0.3, 0, "resolution"),
        (0.0, 0.3, 10, "central_radius"),
        (-1.0, 0.3, 10, "central_radius"),
        (f64::NAN, 0.3, 10, "central_radius"),
        (1.0, -0.3, 10, "width"),
        (1.0, f64::INFINITY, 10, "width"),
    ] {
        let err = MobiusStrip::new(MobiusParams::new(r, w, n)).unwrap_err();
        let MobiusError::InvalidParameter { name: got, .. } = &err;
        assert_eq!(*got, name, "R={r} w={w} n={n}: {err}");
    }
}
