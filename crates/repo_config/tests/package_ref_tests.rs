//! Integration tests for package references

use proptest::prelude::*;
use repo_config::{is_identifier, PackageRef};

#[test]
fn test_serde_round_trip_preserves_path() {
    let package = PackageRef::parse("app::repositories::policy").unwrap();
    let json = serde_json::to_string(&package).unwrap();
    assert_eq!(json, "\"app::repositories::policy\"");

    let back: PackageRef = serde_json::from_str(&json).unwrap();
    assert_eq!(back, package);
}

#[test]
fn test_deserialization_validates() {
    let result: Result<PackageRef, _> = serde_json::from_str("\"app::\"");
    assert!(result.is_err());

    let result: Result<PackageRef, _> = serde_json::from_str("\"\"");
    assert!(result.is_err());
}

#[test]
fn test_whitespace_is_trimmed_on_parse() {
    let package = PackageRef::parse("  app::repos  ").unwrap();
    assert_eq!(package.as_str(), "app::repos");
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,12}"
}

proptest! {
    #[test]
    fn prop_valid_segments_always_parse(segments in prop::collection::vec(identifier_strategy(), 1..5)) {
        let path = segments.join("::");
        let package = PackageRef::parse(&path).unwrap();
        prop_assert_eq!(package.as_str(), path.as_str());
        prop_assert_eq!(package.segments().count(), segments.len());
    }

    #[test]
    fn prop_join_produces_contained_child(
        segments in prop::collection::vec(identifier_strategy(), 1..4),
        child in identifier_strategy(),
    ) {
        let parent = PackageRef::parse(segments.join("::")).unwrap();
        let joined = parent.join(&child).unwrap();
        prop_assert!(parent.contains(&joined));
        prop_assert_eq!(joined.parent().unwrap(), parent);
    }

    #[test]
    fn prop_identifier_check_matches_parse(candidate in "[a-zA-Z0-9_ :-]{0,8}") {
        prop_assert_eq!(is_identifier(&candidate), PackageRef::parse(&candidate).is_ok() && !candidate.contains("::") && candidate.trim() == candidate);
    }
}
