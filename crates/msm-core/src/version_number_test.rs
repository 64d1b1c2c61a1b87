use super::*;
use std::cmp::Ordering;

#[test]
fn test_parse_valid() {
    let v = VersionNumber::parse("1.2.3.4").unwrap();
    assert_eq!(v.major, 1);
    assert_eq!(v.minor, 2);
    assert_eq!(v.patch, 3);
    assert_eq!(v.enums, 4);
    assert_eq!(v.enums_revision(), 4);
}

#[test]
fn test_to_string_and_short_string() {
    let v: VersionNumber = "1.2.3.4".parse().unwrap();
    assert_eq!(v.to_string(), "1.2.3.4");
    assert_eq!(v.short_string(), "1.2.3");
}

#[test]
fn test_parse_rejects_wrong_segment_count() {
    for bad in ["1.2.3", "1.2.3.4.5", "", "1"] {
        let err = VersionNumber::parse(bad).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidVersion { .. }),
            "expected InvalidVersion for {bad:?}"
        );
    }
}

#[test]
fn test_parse_rejects_non_numeric_segments() {
    for bad in ["1.2.3.a", "1..3.4", "1.2.3.-4", "1.2. 3.4", "v1.2.3.4", "1.2.3.4 "] {
        assert!(VersionNumber::parse(bad).is_err(), "{bad:?} should fail");
    }
}

#[test]
fn test_compare_is_lexicographic() {
    let cases = [
        ("1.0.0.0", "0.9.9.9", Ordering::Greater),
        ("1.2.0.0", "1.10.0.0", Ordering::Less),
        ("1.2.3.0", "1.2.3.0", Ordering::Equal),
        ("1.2.3.1", "1.2.3.0", Ordering::Greater),
        ("1.2.3.9", "1.2.4.0", Ordering::Less),
        ("0.0.0.1", "0.0.0.0", Ordering::Greater),
    ];
    for (a, b, expected) in cases {
        let a = VersionNumber::parse(a).unwrap();
        let b = VersionNumber::parse(b).unwrap();
        assert_eq!(a.cmp(&b), expected, "{a} vs {b}");
    }
}

#[test]
fn test_is_newer_than() {
    let current = VersionNumber::parse("1.0.0.0").unwrap();
    assert!(VersionNumber::parse("2.0.0.0").unwrap().is_newer_than(&current));
    assert!(!current.is_newer_than(&current));
    assert!(!VersionNumber::default().is_newer_than(&current));
}

#[test]
fn test_initial_version_is_default() {
    assert_eq!(
        VersionNumber::parse(INITIAL_VERSION).unwrap(),
        VersionNumber::default()
    );
}

#[test]
fn test_serde_as_string() {
    let v: VersionNumber = serde_json::from_str("\"3.1.4.1\"").unwrap();
    assert_eq!(v, VersionNumber::new(3, 1, 4, 1));
    assert_eq!(serde_json::to_string(&v).unwrap(), "\"3.1.4.1\"");
    assert!(serde_json::from_str::<VersionNumber>("\"3.1.4\"").is_err());
}
