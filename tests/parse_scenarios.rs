use pto::pto::config::ParserConfig;
use pto::pto::types::{
    CompressionMethod, FileType, Interpolator, LinkedValue, MaskType, OptimisationParameter,
    Point, ProjectionType,
};
use pto::{FormatVersion, ParseError, Parser};
use rstest::rstest;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn concrete_panorama_projects_as_expected() {
    let pto = Parser::default()
        .parse_file(fixture_path("concrete.pto"))
        .unwrap();

    assert_eq!(pto.project.projection, ProjectionType::Equirectangular);
    assert_eq!(pto.project.size.width, 3000);
    assert_eq!(pto.project.size.height, 1500);
    assert_eq!(pto.project.field_of_view, 120.0);

    assert_eq!(pto.images.len(), 2);
    assert_eq!(pto.images[0].id, 0);
    assert_eq!(pto.images[1].id, 1);
    assert_eq!(
        pto.images[1].lens_barrel_coefficient_a,
        LinkedValue::Reference(0)
    );

    assert_eq!(pto.control_points.len(), 1);
    let cp = &pto.control_points[0];
    assert_eq!((cp.image1_id, cp.image2_id), (0, 1));
    assert_eq!(
        (cp.point1_x, cp.point1_y, cp.point2_x, cp.point2_y),
        (100.0, 100.0, 50.0, 60.0)
    );
    assert_eq!(cp.control_point_type, 0);
}

#[test]
fn full_hugin_script() {
    let pto = Parser::default()
        .parse_file(fixture_path("panorama.pto"))
        .unwrap();

    assert_eq!(pto.version, FormatVersion::V2014);
    assert_eq!(
        pto.project.previous_comments,
        vec!["# hugin project file", "#hugin_ptoversion 2"]
    );
    assert_eq!(pto.project.exposure, 11.2);
    assert!(!pto.project.hdr);
    assert_eq!(pto.project.crop.top, 200);
    assert_eq!(pto.project.crop.right, 6000);
    assert_eq!(pto.project.file_format.file_type, FileType::TiffM);
    assert_eq!(pto.project.file_format.crop, Some(true));
    assert_eq!(pto.project.file_format.save_positions, Some(false));
    assert_eq!(pto.stitcher.interpolator, Interpolator::Poly3);

    let names: Vec<&str> = pto.images.iter().map(|i| i.file_name.as_str()).collect();
    assert_eq!(names, vec!["IMG_0001.JPG", "IMG_0002.JPG", "IMG_0003.JPG"]);
    assert_eq!(pto.images[0].lens_barrel_coefficient_b, LinkedValue::Value(-0.01));
    assert_eq!(pto.images[2].field_of_view, LinkedValue::Reference(0));
    assert_eq!(pto.images[1].white_balance_red, LinkedValue::Value(1.02));
    assert_eq!(pto.images[1].pitch, -1.25);
    assert_eq!(
        pto.images[0].previous_comments,
        vec!["# image lines", "#-hugin  cropFactor=1.5 autoCenterCrop=1"]
    );

    let image2: Vec<OptimisationParameter> = pto.images[2]
        .optimisation_parameters
        .iter()
        .map(|o| o.parameter)
        .collect();
    assert_eq!(
        image2,
        vec![
            OptimisationParameter::Yaw,
            OptimisationParameter::Pitch,
            OptimisationParameter::Roll
        ]
    );

    let mask = &pto.images[2].masks[0];
    assert_eq!(mask.mask_type, MaskType::Positive);
    assert_eq!(mask.hull[1], Point { x: 200, y: 10 });
    assert_eq!(pto.images[1].masks[0].previous_comments, vec!["#masks"]);

    assert_eq!(pto.control_points.len(), 4);
    assert_eq!(pto.control_points[0].previous_comments, vec!["# control points"]);
    assert_eq!(
        pto.last_comments,
        vec![
            "#hugin_optimizeReferenceImage 0",
            "#hugin_blender enblend",
            "#hugin_remapper nona"
        ]
    );
}

#[test]
fn counts_match_section_lines() {
    let source = std::fs::read_to_string(fixture_path("panorama.pto")).unwrap();
    let pto = Parser::default().parse_str(&source).unwrap();

    let count = |keyword: &str| {
        source
            .lines()
            .filter(|line| line.split_whitespace().next() == Some(keyword))
            .count()
    };
    assert_eq!(pto.images.len(), count("i"));
    assert_eq!(pto.control_points.len(), count("c"));
    assert_eq!(pto.mask_count(), count("k"));
    // one marker per variable named on a v line
    let vars: usize = source
        .lines()
        .filter(|line| line.split_whitespace().next() == Some("v"))
        .map(|line| line.split_whitespace().count() - 1)
        .sum();
    assert_eq!(pto.optimisation_count(), vars);
}

#[rstest(
    fixture,
    expected,
    case("comments_only.pto", ParseError::EmptyInput),
    case("no_project.pto", ParseError::MissingProject)
)]
fn structural_failures(fixture: &str, expected: ParseError) {
    let err = Parser::default()
        .parse_file(fixture_path(fixture))
        .unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn malformed_number_reports_row_and_token() {
    let err = Parser::default()
        .parse_file(fixture_path("bad_number.pto"))
        .unwrap_err();
    let syntax = match err {
        ParseError::Syntax(syntax) => syntax,
        other => panic!("expected a syntax error, got {:?}", other),
    };
    assert_eq!(syntax.row, 3);
    assert_eq!(syntax.token, "abc");
    assert_eq!(syntax.column, 17);
    assert_eq!(syntax.line, "i w1500 h1000 y=abc n\"a.jpg\"");
    let expected_underline = format!("\n{}^^^", " ".repeat(16));
    assert!(syntax.to_string().ends_with(&expected_underline));
}

#[test]
fn missing_file() {
    let err = Parser::default()
        .parse_file(fixture_path("not-there.pto"))
        .unwrap_err();
    assert!(matches!(err, ParseError::FileNotFound(_)));
}

#[test]
fn dangling_references_depend_on_configuration() {
    let lenient = Parser::default()
        .parse_file(fixture_path("dangling.pto"))
        .unwrap();
    assert_eq!(lenient.images[0].field_of_view, LinkedValue::Reference(3));

    let strict = Parser::new(ParserConfig {
        validate_references: true,
        ..ParserConfig::default()
    });
    let err = strict.parse_file(fixture_path("dangling.pto")).unwrap_err();
    assert_eq!(
        err,
        ParseError::DanglingReference {
            row: 2,
            what: "parameter 'v'".to_string(),
            index: 3,
            image_count: 1,
        }
    );
}

#[test]
fn long_lines_are_truncated_not_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let padding = "x".repeat(200);
    writeln!(file, "p w10 h10 {}", padding).unwrap();
    writeln!(file, "i w1 n\"{}\"", padding).unwrap();

    let parser = Parser::new(ParserConfig {
        max_line_length: 64,
        ..ParserConfig::default()
    });
    // the image name loses its closing quote
    let err = parser.parse_file(file.path()).unwrap_err();
    assert!(matches!(err, ParseError::Syntax(ref s) if s.row == 2));

    let pto = Parser::default().parse_file(file.path()).unwrap();
    assert_eq!(pto.images[0].file_name.len(), 200);
}

#[test]
fn tiff_compression_reaches_the_model() {
    let pto = Parser::default()
        .parse_str("p f0 w10 h10 n\"TIFF c:DEFLATE\"\n")
        .unwrap();
    assert_eq!(
        pto.project.file_format.compression,
        Some(CompressionMethod::Deflate)
    );
    assert_eq!(pto.project.projection, ProjectionType::Rectilinear);
}

#[test]
fn unknown_keys_never_change_known_values() {
    let pto = Parser::default()
        .parse_str("p w10 zz=abc\ni w1 a0.5 K0a1 n\"x.jpg\"\n")
        .unwrap();
    assert_eq!(pto.images[0].lens_barrel_coefficient_a, LinkedValue::Value(0.5));
    assert_eq!(pto.images[0].unmatched_parameters, vec!["K0a1"]);
    assert_eq!(pto.project.unmatched_parameters, vec!["zz=abc"]);

    let err = Parser::default()
        .parse_str("p w10\ni w1 y=abc\n")
        .unwrap_err();
    assert!(matches!(err, ParseError::Syntax(ref s) if s.token == "abc"));
}
