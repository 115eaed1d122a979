//! Kinematic bicycle model.
//!
//! Fixed-speed motion along either a straight line or a circular arc of the
//! vehicle's turning radius. Turning steps re-derive the position from the
//! arc center instead of integrating velocity, so the path stays on the
//! circle for any step size.

use glam::DVec2;

use parksim_core::catalog::VehicleSpec;
use parksim_core::enums::{SteerDirection, WheelPosition};
use parksim_core::types::{ControlInput, Pose, TrailPoint, WorldPoint};

/// Advance a pose by `dt` seconds at `speed` feet per second.
///
/// Returns the pose unchanged when `dt` is not a positive finite number.
pub fn advance(pose: Pose, spec: &VehicleSpec, control: &ControlInput, dt: f64, speed: f64) -> Pose {
    if !(dt.is_finite() && dt > 0.0) {
        return pose;
    }

    let ds = speed * dt * control.gear.sign();

    let Some(center) = arc_center(&pose, spec, control.steer) else {
        let forward = pose.forward();
        return Pose::new(pose.x + forward.x * ds, pose.y + forward.y * ds, pose.heading);
    };

    let turn_sign = control.steer.turn_sign();
    let radius = spec.turning_radius_feet();
    let heading = pose.heading + (ds / radius) * turn_sign;

    // Center-to-vehicle vector is the new heading's normal, pointing away from the center.
    let offset = DVec2::new(heading.sin(), -heading.cos()) * (turn_sign * radius);
    let position = center.as_dvec2() + offset;

    Pose::new(position.x, position.y, heading)
}

/// Instantaneous center of rotation for the current steering input.
///
/// Sits one turning radius out from the vehicle center, on the side the
/// wheels point. `None` when driving straight.
pub fn arc_center(pose: &Pose, spec: &VehicleSpec, steer: SteerDirection) -> Option<WorldPoint> {
    if steer == SteerDirection::Straight {
        return None;
    }
    let offset = pose.left() * (steer.turn_sign() * spec.turning_radius_feet());
    Some(WorldPoint::from(DVec2::new(pose.x, pose.y) + offset))
}

/// Ground contact points of all four wheels, in `WheelPosition::ALL` order.
pub fn wheel_contacts(pose: &Pose, spec: &VehicleSpec) -> [TrailPoint; 4] {
    let half_wheelbase = spec.wheelbase_feet() / 2.0;
    let half_width = spec.width_feet() / 2.0;
    let rotation = pose.forward();
    let center = DVec2::new(pose.x, pose.y);

    WheelPosition::ALL.map(|wheel| {
        let (along, across) = wheel.axle_signs();
        let local = DVec2::new(along * half_wheelbase, across * half_width);
        TrailPoint {
            wheel,
            point: WorldPoint::from(center + rotation.rotate(local)),
        }
    })
}
