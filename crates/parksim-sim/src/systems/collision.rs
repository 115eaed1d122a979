//! Footprint overlap checks.
//!
//! Read-only overlay on top of the scene: reports which vehicles overlap,
//! never changes a pose.

use glam::DVec2;

use parksim_core::catalog::VehicleSpec;
use parksim_core::types::{Pose, WorldPoint};

/// Body rectangle corners: front-left, front-right, rear-right, rear-left.
pub fn footprint(pose: &Pose, spec: &VehicleSpec) -> [WorldPoint; 4] {
    corners(pose, spec).map(WorldPoint::from)
}

/// Whether two vehicle bodies intersect (separating axis test).
/// Rectangles that only touch along an edge do not count as overlapping.
pub fn footprints_overlap(a: (&Pose, &VehicleSpec), b: (&Pose, &VehicleSpec)) -> bool {
    let corners_a = corners(a.0, a.1);
    let corners_b = corners(b.0, b.1);

    // Two rectangles have only four distinct edge normals between them.
    let axes = [a.0.forward(), a.0.left(), b.0.forward(), b.0.left()];
    axes.iter()
        .all(|axis| intervals_overlap(project(&corners_a, *axis), project(&corners_b, *axis)))
}

fn corners(pose: &Pose, spec: &VehicleSpec) -> [DVec2; 4] {
    let center = DVec2::new(pose.x, pose.y);
    let half_length = pose.forward() * (spec.length_feet() / 2.0);
    let half_width = pose.left() * (spec.width_feet() / 2.0);
    [
        center + half_length + half_width,
        center + half_length - half_width,
        center - half_length - half_width,
        center - half_length + half_width,
    ]
}

fn project(corners: &[DVec2; 4], axis: DVec2) -> (f64, f64) {
    corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), c| {
        let d = c.dot(axis);
        (min.min(d), max.max(d))
    })
}

fn intervals_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}
