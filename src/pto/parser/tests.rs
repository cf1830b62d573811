use super::*;
use crate::pto::config::ParserConfig;
use rstest::rstest;

fn read(source: &str) -> Result<Script, ParseError> {
    Parser::default().read_script(source.as_bytes())
}

fn comments(list: &RecordList<String>) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

const PANORAMA: &str = "\
# hugin project file
#hugin_ptoversion 2
p f2 w3000 h1500 v120 E0 R0 n\"TIFF_m c:LZW r:CROP\"
m g1 i0 f0 m2 p0.00784314

# image lines
#-hugin  cropFactor=1
i w1500 h1000 f0 v50 Ra0 Rb0 Rc0 Rd0 Re0 Eev0 Er1 Eb1 r0 p0 y0 n\"a.jpg\"
i w1500 h1000 f0 v=0 a=0 b0 c0 d0 e0 g0 t0 Eev0 Er1 Eb1 r0 p0 y45 n\"b.jpg\"

# specify variables that should be optimized
v Ra1 Rb1
v y1
v

# control points
c n0 N1 x100 y100 X50 Y60 t0
c n0 N1 x200 y210 X150 Y160 t0
k i1 t0 p\"0 0 10 0 10 10\"

#hugin_optimizeReferenceImage 0
";

#[test]
fn test_reads_every_section() {
    let script = read(PANORAMA).unwrap();
    assert_eq!(script.pano.width, 3000);
    assert_eq!(script.pano.projection, 2);
    assert_eq!(script.pano.row, 3);
    assert_eq!(script.images.len(), 2);
    assert_eq!(script.images[0].name, "a.jpg");
    assert_eq!(script.images[1].row, 9);
    assert_eq!(script.images[1].geometry[0].reference, Some(0));
    assert_eq!(script.vars.len(), 3);
    assert_eq!(script.ctrl_points.len(), 2);
    assert_eq!(script.masks.len(), 1);
    assert_eq!(script.optimize.huber_sigma, 2.0);
}

#[test]
fn test_comments_attach_to_following_record() {
    let script = read(PANORAMA).unwrap();
    assert_eq!(
        comments(&script.pano.prev_comments),
        vec!["# hugin project file", "#hugin_ptoversion 2"]
    );
    assert!(script.optimize.prev_comments.is_empty());
    assert_eq!(
        comments(&script.images[0].prev_comments),
        vec!["# image lines", "#-hugin  cropFactor=1"]
    );
    assert!(script.images[1].prev_comments.is_empty());
    assert_eq!(
        comments(&script.vars[0].prev_comments),
        vec!["# specify variables that should be optimized"]
    );
    assert!(script.vars[1].prev_comments.is_empty());
    assert_eq!(
        comments(&script.ctrl_points[0].prev_comments),
        vec!["# control points"]
    );
    assert_eq!(
        comments(&script.ending_comments),
        vec!["#hugin_optimizeReferenceImage 0"]
    );
}

#[test]
fn test_variables_one_record_per_entry() {
    let script = read(PANORAMA).unwrap();
    let vars: Vec<(&str, usize)> = script
        .vars
        .iter()
        .map(|v| (v.name.as_str(), v.image))
        .collect();
    assert_eq!(vars, vec![("Ra", 1), ("Rb", 1), ("y", 1)]);
}

#[test]
fn test_empty_variable_line_keeps_comments_pending() {
    let script = read("p w1\n# before\nv\ni w1\n").unwrap();
    assert!(script.vars.is_empty());
    assert_eq!(comments(&script.images[0].prev_comments), vec!["# before"]);
}

#[test]
fn test_keyword_needs_separator() {
    let script = read("p w1\npanorama notes\ni\tw2\nimage\n").unwrap();
    assert_eq!(script.images.len(), 1);
    assert_eq!(script.images[0].width, 2);
    assert_eq!(
        comments(&script.images[0].prev_comments),
        vec!["panorama notes"]
    );
    assert_eq!(comments(&script.ending_comments), vec!["image"]);
}

#[test]
fn test_repeated_project_lines_merge() {
    let script = read("# one\np w100 h50\n# two\np h60 f1\n").unwrap();
    assert_eq!((script.pano.width, script.pano.height), (100, 60));
    assert_eq!(script.pano.projection, 1);
    assert_eq!(script.pano.row, 2);
    assert_eq!(comments(&script.pano.prev_comments), vec!["# one", "# two"]);
}

#[test]
fn test_o_is_an_alias_of_m() {
    let script = read("p w1\no g2.2 i3\nm f1\n").unwrap();
    assert_eq!(script.optimize.gamma, 2.2);
    assert_eq!(script.optimize.interpolator, 3);
    assert_eq!(script.optimize.speed_up, 1);
}

#[test]
fn test_projection_defaults_to_unset() {
    let script = read("p w10 h10\n").unwrap();
    assert_eq!(script.pano.projection, crate::pto::script::PROJECTION_UNSET);
}

#[test]
fn test_unmatched_parameters_kept_in_order() {
    let script = read("p w1 u10 nona\ni w1 K0 Ib\nm g1 zz\n").unwrap();
    assert_eq!(comments(&script.pano.unmatched), vec!["u10", "nona"]);
    assert_eq!(comments(&script.images[0].unmatched), vec!["K0", "Ib"]);
    assert_eq!(comments(&script.optimize.unmatched), vec!["zz"]);
}

#[test]
fn test_glued_unknown_key_leaves_known_values_alone() {
    let script = read("p w10\ni w1 a0.5 K0a1 n\"x.jpg\"\nv y0 K0a1\n").unwrap();
    let image = &script.images[0];
    assert_eq!(image.geometry[0].value, 0.5);
    assert_eq!(image.geometry[0].reference, None);
    assert_eq!(comments(&image.unmatched), vec!["K0a1"]);
    assert_eq!(image.name, "x.jpg");
    assert_eq!(script.vars.len(), 1);
}

#[test]
fn test_unknown_key_with_bare_value_is_unmatched() {
    let script = read("p w10 zz=abc\ni w1 q= n\"x.jpg\"\n").unwrap();
    assert_eq!(script.pano.width, 10);
    assert_eq!(comments(&script.pano.unmatched), vec!["zz=abc"]);
    assert_eq!(comments(&script.images[0].unmatched), vec!["q="]);
}

#[test]
fn test_indented_section_lines() {
    let script = read("  p w10\n\t i w1 n\"x.jpg\"\n   # note\n").unwrap();
    assert_eq!(script.pano.width, 10);
    assert_eq!(script.images.len(), 1);
    assert_eq!(script.images[0].name, "x.jpg");
    assert_eq!(comments(&script.ending_comments), vec!["   # note"]);
}

#[test]
fn test_unmatched_parameters_can_be_dropped() {
    let parser = Parser::new(ParserConfig {
        keep_unmatched_parameters: false,
        ..ParserConfig::default()
    });
    let script = parser.read_script("p w1 u10\n".as_bytes()).unwrap();
    assert!(script.pano.unmatched.is_empty());
}

#[rstest(
    source,
    case(""),
    case("\n\n   \n"),
    case("# only a comment\n")
)]
fn test_empty_input(source: &str) {
    assert_eq!(read(source).unwrap_err(), ParseError::EmptyInput);
}

#[test]
fn test_missing_project() {
    assert_eq!(
        read("i w10 h10\n").unwrap_err(),
        ParseError::MissingProject
    );
}

#[rstest(
    source,
    row,
    token,
    case("p w10\ni y=abc\n", 2, "abc"),
    case("p w10\ni v=x n\"a.jpg\"\n", 2, "x"),
    case("p w10\n\n# c\ni y1.2.3\n", 4, ".3"),
    case("p w10 h1.5\n", 1, "1.5"),
    case("p w10\nc n0 N1 x\"a\"\n", 2, "\"a\""),
    case("p w10\ni n\"open\n", 2, "\"")
)]
fn test_syntax_error_location(source: &str, row: usize, token: &str) {
    match read(source).unwrap_err() {
        ParseError::Syntax(err) => {
            assert_eq!(err.row, row);
            assert!(err.token.starts_with(token), "token {:?}", err.token);
            assert!(!err.line.is_empty());
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_busy_parser_rejects_second_parse() {
    let parser = Parser::default();
    let guard = parser.acquire().unwrap();
    assert_eq!(
        parser.read_script("p w1\n".as_bytes()).unwrap_err(),
        ParseError::ParserBusy
    );
    drop(guard);
    assert!(parser.read_script("p w1\n".as_bytes()).is_ok());
}

#[test]
fn test_failed_parse_releases_parser() {
    let parser = Parser::default();
    assert!(parser.read_script("i w1\n".as_bytes()).is_err());
    assert!(parser.load_script("/no/such/file.pto").is_err());
    assert!(parser.read_script("p w1\n".as_bytes()).is_ok());
}

#[test]
fn test_reference_validation_is_opt_in() {
    let source = "p w1\ni w1 a=4\n";
    assert!(read(source).is_ok());

    let parser = Parser::new(ParserConfig {
        validate_references: true,
        ..ParserConfig::default()
    });
    match parser.read_script(source.as_bytes()).unwrap_err() {
        ParseError::DanglingReference { row, index, .. } => {
            assert_eq!(row, 2);
            assert_eq!(index, 4);
        }
        other => panic!("expected a dangling reference, got {:?}", other),
    }
}

#[test]
fn test_parse_str_projects() {
    let pto = Parser::default().parse_str(PANORAMA).unwrap();
    assert_eq!(pto.images.len(), 2);
    assert_eq!(pto.control_points.len(), 2);
}
