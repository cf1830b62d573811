//! Output format descriptor decoding
//!
//! The `n` key of the `p` line describes the stitched file, for example
//! `TIFF_m c:LZW r:CROP p1` or `JPEG q:90`. The first word names the file
//! type; the remaining whitespace separated flags refine it:
//!
//!     c:NONE | c:LZW | c:DEFLATE     compression (TIFF)
//!     q:<int>                        quality (JPEG)
//!     r:CROP                         crop to the image area (TIFF_m, TIFF_multilayer)
//!     p1                             save image positions (TIFF_m, TIFF_multilayer)
//!
//! Flags may come in any order. Only the first flag of each kind counts and
//! unknown flags are ignored. A flag that does not apply to the file type is
//! reported as absent.

use chumsky::prelude::*;

use super::types::{CompressionMethod, FileFormat, FileType};

type ParserError = Simple<char>;

#[derive(Debug, Clone, PartialEq)]
enum Flag {
    Compression(Option<CompressionMethod>),
    Crop(bool),
    SavePositions(bool),
    Quality(Option<u32>),
    Other,
}

fn word() -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect()
}

fn gap() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .ignored()
}

/// Rest of the current word, ignored
fn tail() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| !c.is_whitespace()).repeated().ignored()
}

fn flag() -> impl Parser<char, Flag, Error = ParserError> + Clone {
    let compression = just("c:")
        .ignore_then(
            choice((
                just("NONE").to(CompressionMethod::Uncompressed),
                just("LZW").to(CompressionMethod::Lzw),
                just("DEFLATE").to(CompressionMethod::Deflate),
            ))
            .or_not(),
        )
        .then_ignore(tail())
        .map(Flag::Compression);

    let crop = just('r')
        .ignore_then(just(":CROP").or_not())
        .then_ignore(tail())
        .map(|found| Flag::Crop(found.is_some()));

    let positions = just('p')
        .ignore_then(just('1').or_not())
        .then_ignore(tail())
        .map(|found| Flag::SavePositions(found.is_some()));

    let quality = just('q')
        .ignore_then(just(':').ignore_then(text::int::<_, ParserError>(10)).or_not())
        .then_ignore(tail())
        .map(|digits| Flag::Quality(digits.and_then(|d| d.parse().ok())));

    let other = word().to(Flag::Other);

    choice((compression, crop, positions, quality, other))
}

fn descriptor_parser() -> impl Parser<char, (String, Vec<Flag>), Error = ParserError> {
    gap()
        .or_not()
        .ignore_then(word())
        .then(gap().ignore_then(flag()).repeated())
        .then_ignore(gap().or_not())
        .then_ignore(end())
}

fn file_type(keyword: &str) -> FileType {
    if keyword.starts_with("PNG") {
        FileType::Png
    } else if keyword.starts_with("TIFF_multilayer") {
        FileType::TiffMultilayer
    } else if keyword.starts_with("TIFF_m") {
        FileType::TiffM
    } else if keyword.starts_with("TIFF") {
        FileType::Tiff
    } else if keyword.starts_with("JPEG") {
        FileType::Jpeg
    } else {
        FileType::Unknown
    }
}

/// Decode the file type word only
///
/// A script without an `n` key on its `p` line produces JPEG.
pub fn decode_file_type(descriptor: Option<&str>) -> FileType {
    decode(descriptor).file_type
}

/// Decode a whole descriptor
pub fn decode(descriptor: Option<&str>) -> FileFormat {
    let Some(text) = descriptor else {
        return FileFormat {
            file_type: FileType::Jpeg,
            compression: None,
            quality: None,
            crop: None,
            save_positions: None,
        };
    };

    let (keyword, flags) = descriptor_parser()
        .parse(text)
        .unwrap_or_else(|_| (String::new(), Vec::new()));
    let file_type = file_type(&keyword);

    let compression = flags.iter().find_map(|f| match f {
        Flag::Compression(method) => Some(*method),
        _ => None,
    });
    let crop = flags.iter().find_map(|f| match f {
        Flag::Crop(on) => Some(*on),
        _ => None,
    });
    let save_positions = flags.iter().find_map(|f| match f {
        Flag::SavePositions(on) => Some(*on),
        _ => None,
    });
    let quality = flags.iter().find_map(|f| match f {
        Flag::Quality(q) => Some(*q),
        _ => None,
    });

    let layered = matches!(file_type, FileType::TiffM | FileType::TiffMultilayer);
    FileFormat {
        file_type,
        compression: match file_type {
            FileType::Tiff => compression.flatten(),
            _ => None,
        },
        quality: match file_type {
            FileType::Jpeg => quality.flatten(),
            _ => None,
        },
        crop: layered.then(|| crop.unwrap_or(false)),
        save_positions: layered.then(|| save_positions.unwrap_or(false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest(
        text,
        expected,
        case("PNG", FileType::Png),
        case("TIFF", FileType::Tiff),
        case("TIFF c:LZW", FileType::Tiff),
        case("TIFF_m", FileType::TiffM),
        case("TIFF_multilayer r:CROP", FileType::TiffMultilayer),
        case("JPEG q:95", FileType::Jpeg),
        case("EXR", FileType::Unknown),
        case("", FileType::Unknown),
        case("tiff", FileType::Unknown)
    )]
    fn test_file_types(text: &str, expected: FileType) {
        assert_eq!(decode_file_type(Some(text)), expected);
    }

    #[test]
    fn test_missing_descriptor_is_jpeg() {
        let format = decode(None);
        assert_eq!(format.file_type, FileType::Jpeg);
        assert_eq!(format.quality, None);
    }

    #[test]
    fn test_layered_tiff_flags() {
        let format = decode(Some("TIFF_m c:LZW r:CROP p1"));
        assert_eq!(format.file_type, FileType::TiffM);
        assert_eq!(format.crop, Some(true));
        assert_eq!(format.save_positions, Some(true));
        assert_eq!(format.compression, None);
        assert_eq!(format.quality, None);

        let format = decode(Some("TIFF_m c:LZW p1"));
        assert_eq!(format.crop, Some(false));
        assert_eq!(format.save_positions, Some(true));
        assert_eq!(format.compression, None);
    }

    #[test]
    fn test_layered_flags_default_off() {
        let format = decode(Some("TIFF_multilayer"));
        assert_eq!(format.crop, Some(false));
        assert_eq!(format.save_positions, Some(false));

        let format = decode(Some("TIFF_multilayer p0 r:NONE"));
        assert_eq!(format.crop, Some(false));
        assert_eq!(format.save_positions, Some(false));
    }

    #[rstest(
        text,
        expected,
        case("TIFF c:NONE", Some(CompressionMethod::Uncompressed)),
        case("TIFF c:LZW", Some(CompressionMethod::Lzw)),
        case("TIFF r:CROP c:DEFLATE", Some(CompressionMethod::Deflate)),
        case("TIFF c:ZIP", None),
        case("TIFF", None),
        case("TIFF c:LZW c:DEFLATE", Some(CompressionMethod::Lzw))
    )]
    fn test_tiff_compression(text: &str, expected: Option<CompressionMethod>) {
        let format = decode(Some(text));
        assert_eq!(format.compression, expected);
        assert_eq!(format.crop, None);
        assert_eq!(format.save_positions, None);
    }

    #[rstest(
        text,
        expected,
        case("JPEG q:90", Some(90)),
        case("JPEG  p1   q:75 ", Some(75)),
        case("JPEG q:", None),
        case("JPEG", None)
    )]
    fn test_jpeg_quality(text: &str, expected: Option<u32>) {
        let format = decode(Some(text));
        assert_eq!(format.quality, expected);
        assert_eq!(format.compression, None);
    }

    #[test]
    fn test_png_has_no_options() {
        let format = decode(Some("PNG c:LZW q:90 r:CROP p1"));
        assert_eq!(format.file_type, FileType::Png);
        assert_eq!(format.compression, None);
        assert_eq!(format.quality, None);
        assert_eq!(format.crop, None);
        assert_eq!(format.save_positions, None);
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let format = decode(Some("TIFF_m blend:on r:CROP"));
        assert_eq!(format.crop, Some(true));
    }
}
