//! # Configuration Tests
//!
//! Geometry validation, derived sizes, JSON loading, and layering of partial
//! configurations.

use csim_core::CacheParams;
use csim_core::common::ConfigError;
use csim_core::config::ParamOverrides;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn derived_sizes() {
    let p = CacheParams::new(4, 2, 5).unwrap();
    assert_eq!(p.num_sets(), 16);
    assert_eq!(p.block_size(), 32);
    assert_eq!(p.capacity_bytes(), 16 * 2 * 32);
}

#[test]
fn degenerate_but_valid_geometry() {
    let p = CacheParams::new(0, 1, 0).unwrap();
    assert_eq!(p.num_sets(), 1);
    assert_eq!(p.block_size(), 1);
    assert_eq!(p.capacity_bytes(), 1);
}

#[rstest]
#[case(4, 0, 4, ConfigError::ZeroAssociativity)]
#[case(32, 1, 32, ConfigError::AddressBitsOverflow { s: 32, b: 32 })]
#[case(0, 1, 64, ConfigError::AddressBitsOverflow { s: 0, b: 64 })]
#[case(u32::MAX, 1, 1, ConfigError::AddressBitsOverflow { s: u32::MAX, b: 1 })]
fn invalid_geometry_is_rejected(
    #[case] s: u32,
    #[case] e: usize,
    #[case] b: u32,
    #[case] expected: ConfigError,
) {
    assert_eq!(CacheParams::new(s, e, b), Err(expected));
}

#[test]
fn largest_address_split_is_accepted() {
    assert!(CacheParams::new(20, 1, 43).is_ok());
    assert!(CacheParams::new(20, 1, 44).is_err());
}

#[test]
fn display_includes_geometry() {
    let p = CacheParams::new(4, 1, 4).unwrap();
    assert_eq!(p.to_string(), "s=4 E=1 b=4 (16 sets, 1-way, 16-byte blocks)");
}

#[test]
fn from_json_uses_lab_field_names() {
    let p = CacheParams::from_json(r#"{ "s": 5, "E": 1, "b": 5 }"#).unwrap();
    assert_eq!(p, CacheParams { s: 5, e: 1, b: 5 });
}

#[test]
fn from_json_reports_missing_field() {
    let err = CacheParams::from_json(r#"{ "s": 5, "b": 5 }"#).unwrap_err();
    assert_eq!(err, ConfigError::Missing("E"));
}

#[test]
fn from_json_validates() {
    let err = CacheParams::from_json(r#"{ "s": 1, "E": 0, "b": 1 }"#).unwrap_err();
    assert_eq!(err, ConfigError::ZeroAssociativity);
}

#[test]
fn from_json_rejects_garbage() {
    assert!(matches!(
        CacheParams::from_json("s=4"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        CacheParams::from_json(r#"{ "s": 1, "E": 1, "b": 1, "ways": 2 }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        CacheParams::from_json(r#"{ "s": -1, "E": 1, "b": 1 }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn serializes_round_trip_through_json() {
    let p = CacheParams::new(6, 8, 6).unwrap();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, r#"{"s":6,"E":8,"b":6}"#);
}

#[test]
fn overrides_prefer_their_own_values() {
    let flags = ParamOverrides {
        s: Some(2),
        e: None,
        b: None,
    };
    let file = ParamOverrides {
        s: Some(8),
        e: Some(4),
        b: None,
    };
    let merged = flags.or(file);
    assert_eq!(
        merged,
        ParamOverrides {
            s: Some(2),
            e: Some(4),
            b: None
        }
    );
    assert_eq!(merged.resolve(), Err(ConfigError::Missing("b")));
}

#[test]
fn empty_overrides_report_first_missing_field() {
    assert_eq!(
        ParamOverrides::default().resolve(),
        Err(ConfigError::Missing("s"))
    );
}

#[test]
fn partial_json_overrides() {
    let o = ParamOverrides::from_json(r#"{ "E": 2 }"#).unwrap();
    assert_eq!(o.e, Some(2));
    assert_eq!(o.s, None);
}
