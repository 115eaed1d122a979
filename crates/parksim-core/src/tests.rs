#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::catalog::{Catalog, VehicleSpec};
    use crate::commands::SceneCommand;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::state::{SceneSnapshot, TrailView};
    use crate::types::{ControlInput, Pose, VehicleId, WorldPoint};

    fn spec(name: &str, turning_circle_feet: f64) -> VehicleSpec {
        VehicleSpec {
            name: name.to_string(),
            length_inches: 180.0,
            width_inches: 72.0,
            wheelbase_inches: 108.0,
            turning_circle_feet,
            display_color: "#ffffff".to_string(),
        }
    }

    // ---- Catalog ----

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        for vehicle in catalog.list() {
            vehicle
                .validate()
                .unwrap_or_else(|e| panic!("builtin vehicle invalid: {e}"));
        }
    }

    #[test]
    fn test_builtin_names_unique() {
        let catalog = Catalog::builtin();
        let specs: Vec<VehicleSpec> = catalog.list().iter().map(|s| (**s).clone()).collect();
        // from_specs rejects duplicates, so the builtin table must pass it.
        let rebuilt = Catalog::from_specs(specs).unwrap();
        assert_eq!(rebuilt.len(), catalog.len());
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = Catalog::builtin();
        let corolla = catalog.get("Toyota Corolla").unwrap();
        assert_eq!(corolla.wheelbase_inches, 106.3);
        assert_eq!(corolla.turning_circle_feet, 34.8);
        assert!((corolla.turning_radius_feet() - 17.4).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_miss_is_config_error() {
        let catalog = Catalog::builtin();
        let err = catalog.get("DeLorean").unwrap_err();
        assert_eq!(err, ConfigError::UnknownVehicle("DeLorean".to_string()));
        assert!(err.to_string().contains("DeLorean"));
    }

    #[test]
    fn test_invalid_setting_message_names_field() {
        let err = ConfigError::InvalidSetting {
            field: "max_step_dt",
            value: 0.0,
        };
        let message = err.to_string();
        assert!(message.contains("max_step_dt"));
        assert!(message.contains("must be positive"));
    }

    #[test]
    fn test_list_preserves_order() {
        let catalog = Catalog::from_specs(vec![spec("B", 30.0), spec("A", 32.0)]).unwrap();
        let names: Vec<&str> = catalog.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(
            Catalog::from_specs(Vec::new()).unwrap_err(),
            ConfigError::EmptyCatalog
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Catalog::from_specs(vec![spec("Twin", 30.0), spec("Twin", 31.0)]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateVehicle("Twin".to_string()));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let zero_turn = spec("Zero", 0.0);
        assert!(matches!(
            zero_turn.validate(),
            Err(ConfigError::NonPositiveDimension {
                field: "turning_circle_feet",
                ..
            })
        ));

        let mut negative_width = spec("Narrow", 30.0);
        negative_width.width_inches = -1.0;
        assert!(matches!(
            negative_width.validate(),
            Err(ConfigError::NonPositiveDimension {
                field: "width_inches",
                ..
            })
        ));

        let mut nan_length = spec("Ghost", 30.0);
        nan_length.length_inches = f64::NAN;
        assert!(nan_length.validate().is_err());

        assert!(Catalog::from_specs(vec![spec("Ok", 30.0), zero_turn]).is_err());
    }

    #[test]
    fn test_unit_conversions() {
        let s = spec("Box", 36.0);
        assert!((s.length_feet() - 15.0).abs() < 1e-12);
        assert!((s.width_feet() - 6.0).abs() < 1e-12);
        assert!((s.wheelbase_feet() - 9.0).abs() < 1e-12);
        assert!((s.turning_radius_feet() - 18.0).abs() < 1e-12);
    }

    // ---- Types ----

    #[test]
    fn test_pose_axes() {
        let east = Pose::new(0.0, 0.0, 0.0);
        assert!((east.forward().x - 1.0).abs() < 1e-12);
        assert!(east.forward().y.abs() < 1e-12);
        // Left of an east-facing vehicle is +y.
        assert!((east.left().y - 1.0).abs() < 1e-12);

        let north = Pose::new(0.0, 0.0, FRAC_PI_2);
        assert!(north.forward().x.abs() < 1e-12);
        assert!((north.forward().y - 1.0).abs() < 1e-12);
        assert!((north.left().x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_heading() {
        assert!((Pose::new(0.0, 0.0, -FRAC_PI_2).normalized_heading() - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((Pose::new(0.0, 0.0, TAU + PI).normalized_heading() - PI).abs() < 1e-9);
        assert!(Pose::new(0.0, 0.0, 0.0).normalized_heading().abs() < 1e-12);
    }

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sign_conventions() {
        assert_eq!(SteerDirection::Left.turn_sign(), 1.0);
        assert_eq!(SteerDirection::Right.turn_sign(), -1.0);
        assert_eq!(SteerDirection::Straight.turn_sign(), 0.0);
        assert_eq!(Gear::Forward.sign(), 1.0);
        assert_eq!(Gear::Reverse.sign(), -1.0);
        assert_eq!(RotationDirection::CounterClockwise.sign(), 1.0);
    }

    #[test]
    fn test_wheel_channel_indices() {
        for (i, wheel) in WheelPosition::ALL.iter().enumerate() {
            assert_eq!(wheel.index(), i);
        }
    }

    #[test]
    fn test_rotation_step_is_fifteen_degrees() {
        assert!((ROTATION_STEP.to_degrees() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_control_idle_default() {
        let idle = ControlInput::idle();
        assert_eq!(idle.steer, SteerDirection::Straight);
        assert_eq!(idle.gear, Gear::Forward);
        assert!(!idle.throttle);
    }

    // ---- Serialization ----

    /// Script files rely on this exact tagged shape.
    #[test]
    fn test_scene_command_json_shape() {
        let json = r##"[
            {"type": "PlacePlayer", "vehicle": "Toyota Corolla", "x": 1.5, "y": -2.0},
            {"type": "RemoveObstacle", "id": 3},
            {"type": "RotateStep", "id": 0, "direction": "Clockwise"},
            {"type": "SetControl", "steer": "Left", "gear": "Reverse", "throttle": true},
            {"type": "LoadScenario", "scenario": "RandomLot", "seed": 9},
            {"type": "ClearTrails"}
        ]"##;
        let commands: Vec<SceneCommand> = serde_json::from_str(json).unwrap();
        assert_eq!(
            commands,
            vec![
                SceneCommand::PlacePlayer {
                    vehicle: "Toyota Corolla".to_string(),
                    x: 1.5,
                    y: -2.0
                },
                SceneCommand::RemoveObstacle { id: VehicleId(3) },
                SceneCommand::RotateStep {
                    id: VehicleId(0),
                    direction: RotationDirection::Clockwise
                },
                SceneCommand::SetControl {
                    steer: SteerDirection::Left,
                    gear: Gear::Reverse,
                    throttle: true
                },
                SceneCommand::LoadScenario {
                    scenario: ScenarioId::RandomLot,
                    seed: 9
                },
                SceneCommand::ClearTrails,
            ]
        );
    }

    #[test]
    fn test_empty_snapshot_serde() {
        let snapshot = SceneSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.steps, 0);
        assert!(back.player.is_none());
        assert_eq!(back.drive_state, DriveState::Idle);
        assert_eq!(back.trails.total_points(), 0);
    }

    #[test]
    fn test_trail_view_channels() {
        let view = TrailView {
            front_left: vec![WorldPoint::new(1.0, 0.0)],
            rear_right: vec![WorldPoint::new(2.0, 0.0), WorldPoint::new(3.0, 0.0)],
            ..Default::default()
        };
        assert_eq!(view.channel(WheelPosition::FrontLeft).len(), 1);
        assert_eq!(view.channel(WheelPosition::FrontRight).len(), 0);
        assert_eq!(view.channel(WheelPosition::RearRight).len(), 2);
        assert_eq!(view.total_points(), 3);
    }
}
