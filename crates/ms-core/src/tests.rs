//! Unit tests for ms-core primitives.

#[cfg(test)]
mod ids {
    use std::collections::HashMap;

    use crate::{ActorId, EquipmentId, ZoneId};

    #[test]
    fn display_is_raw_string() {
        assert_eq!(ZoneId::new("bay1").to_string(), "bay1");
        assert_eq!(EquipmentId::from("eaf1").as_str(), "eaf1");
    }

    #[test]
    fn lookup_by_str() {
        let mut m: HashMap<ZoneId, u32> = HashMap::new();
        m.insert(ZoneId::new("bay2"), 7);
        assert_eq!(m.get("bay2"), Some(&7));
        assert_eq!(m.get("bay3"), None);
    }

    #[test]
    fn actor_slot_naming_is_one_based() {
        let zone = ZoneId::new("bay1");
        assert_eq!(ActorId::for_slot(&zone, 0).as_str(), "bay1_crane_1");
        assert_eq!(ActorId::for_slot(&zone, 1).as_str(), "bay1_crane_2");
    }
}

#[cfg(test)]
mod geo {
    use crate::{CoreError, FALLBACK_DISTANCE, Point};

    #[test]
    fn zero_distance() {
        let p = Point::new(12.5, -3.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn three_four_five() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(-7.25, 310.0),
            Point::new(1e6, -1e6),
        ];
        for &a in &pts {
            for &b in &pts {
                assert_eq!(a.distance(b), b.distance(a));
            }
        }
    }

    #[test]
    fn malformed_point_is_reported() {
        let bad = Point::new(f64::NAN, 1.0);
        let err = Point::ORIGIN.try_distance(bad).unwrap_err();
        assert!(matches!(err, CoreError::MalformedPoint(_)));
    }

    #[test]
    fn malformed_point_falls_back() {
        let bad = Point::new(0.0, f64::INFINITY);
        assert_eq!(bad.distance(Point::ORIGIN), FALLBACK_DISTANCE);
        assert_eq!(Point::ORIGIN.distance(bad), FALLBACK_DISTANCE);
    }

    #[test]
    fn midpoint() {
        let m = Point::new(0.0, 0.0).midpoint(Point::new(100.0, 50.0));
        assert_eq!(m, Point::new(50.0, 25.0));
    }
}

#[cfg(test)]
mod transport {
    use crate::{Anchor, Point};

    #[test]
    fn direct_has_no_waypoint() {
        let w = Anchor::Direct.waypoints(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn corner_runs_along_x_first() {
        let from = Point::new(50.0, 50.0);
        let to = Point::new(250.0, 150.0);
        assert_eq!(Anchor::Corner.waypoint(from, to), Some(Point::new(250.0, 50.0)));
    }

    #[test]
    fn only_corner_is_direction_dependent() {
        assert!(Anchor::Direct.is_reversible());
        assert!(Anchor::Fixed { x: 0.0, y: 0.0 }.is_reversible());
        assert!(!Anchor::Corner.is_reversible());
    }

    #[test]
    fn fixed_ignores_endpoints() {
        let a = Anchor::Fixed { x: 5.0, y: 6.0 };
        let w = a.waypoints(Point::ORIGIN, Point::new(100.0, 0.0));
        assert_eq!(w, vec![Point::ORIGIN, Point::new(5.0, 6.0), Point::new(100.0, 0.0)]);
    }
}

#[cfg(test)]
mod config {
    use crate::{Anchor, CoreError, LayoutConfig, ZoneConfig};

    const LAYOUT: &str = r#"{
        "ladle_car_speed": 100.0,
        "zones": {
            "A": { "x": 0, "y": 0, "width": 100, "height": 100, "routes": ["tapping"] },
            "B": { "x_offset": 200, "y_offset": 0, "width": 100, "height": 100,
                   "crane_rails": [{ "start_x": 210, "end_x": 290, "y": 20 }] },
            "C": { "x": "not a number", "y": 0 }
        },
        "transport_classes": {
            "treatment": { "anchor": { "kind": "fixed", "x": 150, "y": 300 } }
        }
    }"#;

    #[test]
    fn defaults() {
        let c = LayoutConfig::default();
        assert_eq!(c.ladle_car_speed, 150.0);
        assert_eq!(c.actors_per_zone, 2);
        assert_eq!(c.cache.path_capacity, 1_000);
        assert_eq!(c.anchor_for("tapping"), Some(Anchor::Corner));
        assert_eq!(c.anchor_for("rh"), Some(Anchor::Direct));
        assert_eq!(c.anchor_for("unknown"), None);
    }

    #[test]
    fn loads_and_skips_malformed_zone() {
        let c = LayoutConfig::from_json_str(LAYOUT).unwrap();
        assert_eq!(c.ladle_car_speed, 100.0);
        assert_eq!(c.zones.len(), 2, "zone C has a string x and is dropped");
        assert!(c.zones.contains_key("A"));
        assert_eq!(c.zones["A"].routes, vec!["tapping".to_string()]);
        assert_eq!(c.zones["B"].crane_rails.len(), 1);
        assert_eq!(
            c.anchor_for("treatment"),
            Some(Anchor::Fixed { x: 150.0, y: 300.0 })
        );
    }

    #[test]
    fn not_json_is_parse_error() {
        let err = LayoutConfig::from_json_str("bays: [").unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn zones_must_be_an_object() {
        let err = LayoutConfig::from_json_str(r#"{ "zones": [1, 2] }"#).unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn offset_spelling_resolves() {
        let c = LayoutConfig::from_json_str(LAYOUT).unwrap();
        let (tl, br) = c.zones["B"].corners().unwrap();
        assert_eq!((tl.x, tl.y, br.x, br.y), (200.0, 0.0, 300.0, 100.0));
    }

    #[test]
    fn missing_extent_defaults_to_100() {
        let z = ZoneConfig { x: Some(10.0), y: Some(20.0), ..ZoneConfig::default() };
        let (_, br) = z.corners().unwrap();
        assert_eq!((br.x, br.y), (110.0, 120.0));
    }

    #[test]
    fn missing_corner_is_config_error() {
        let z = ZoneConfig { y: Some(0.0), ..ZoneConfig::default() };
        assert!(matches!(z.corners(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zone_order_defaults_to_id_order() {
        let mut c = LayoutConfig::default();
        c.zones.insert("b".into(), ZoneConfig::rect(200.0, 0.0, 10.0, 10.0));
        c.zones.insert("a".into(), ZoneConfig::rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(c.ordered_zone_ids(), vec!["a".to_string(), "b".to_string()]);
        c.zone_order = Some(vec!["b".into(), "a".into()]);
        assert_eq!(c.ordered_zone_ids(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn per_zone_actor_slots() {
        let mut c = LayoutConfig::default();
        let mut z = ZoneConfig::rect(0.0, 0.0, 10.0, 10.0);
        z.actor_slots = Some(3);
        c.zones.insert("a".into(), z);
        assert_eq!(c.actor_slots("a"), 3);
        assert_eq!(c.actor_slots("missing"), 2);
    }
}
