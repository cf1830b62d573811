//! The process-wide entry points
//!
//! Kept in its own test binary so no other test shares the global parser.

use pto::pto::types::ProjectionType;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn global_parse_and_parse_script() {
    let pto = pto::parse(fixture_path("concrete.pto")).unwrap();
    assert_eq!(pto.project.projection, ProjectionType::Equirectangular);
    assert_eq!(pto.images.len(), 2);

    // the global parser is free again after each call
    let script = pto::parse_script(fixture_path("concrete.pto")).unwrap();
    assert_eq!(script.image_count(), 2);
    assert_eq!(script.ctrl_point_count(), 1);
    assert_eq!(pto::project(&script, None), pto);

    let err = pto::parse(fixture_path("no_project.pto")).unwrap_err();
    assert_eq!(err, pto::ParseError::MissingProject);
    assert!(pto::parse(fixture_path("concrete.pto")).is_ok());
}
