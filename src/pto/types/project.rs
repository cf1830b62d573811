//! Output canvas of a panorama

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crop {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Panorama projection, `f` key of the `p` line
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionType {
    Rectilinear,
    Cylindrical,
    Equirectangular,
    FullFrameFisheye,
    Stereographic,
    Mercator,
    TransverseMercator,
    Sinusoidal,
    LambertEqualAreaConic,
    LambertAzimuthal,
    AlbersEqualAreaConic,
    MillerCylindrical,
    Panini,
    Architectural,
    Orthographic,
    Equisolid,
    EquirectangularPanini,
    Biplane,
    Triplane,
    PaniniGeneral,
    Thoby,
    Hammer,
    /// No `f` key, or a code this crate does not know
    Unknown,
}

impl ProjectionType {
    const TABLE: [ProjectionType; 22] = [
        ProjectionType::Rectilinear,
        ProjectionType::Cylindrical,
        ProjectionType::Equirectangular,
        ProjectionType::FullFrameFisheye,
        ProjectionType::Stereographic,
        ProjectionType::Mercator,
        ProjectionType::TransverseMercator,
        ProjectionType::Sinusoidal,
        ProjectionType::LambertEqualAreaConic,
        ProjectionType::LambertAzimuthal,
        ProjectionType::AlbersEqualAreaConic,
        ProjectionType::MillerCylindrical,
        ProjectionType::Panini,
        ProjectionType::Architectural,
        ProjectionType::Orthographic,
        ProjectionType::Equisolid,
        ProjectionType::EquirectangularPanini,
        ProjectionType::Biplane,
        ProjectionType::Triplane,
        ProjectionType::PaniniGeneral,
        ProjectionType::Thoby,
        ProjectionType::Hammer,
    ];

    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::TABLE.get(i).copied())
            .unwrap_or(ProjectionType::Unknown)
    }

    pub fn code(&self) -> Option<i32> {
        Self::TABLE
            .iter()
            .position(|p| p == self)
            .and_then(|i| i32::try_from(i).ok())
    }
}

/// Container format of the stitched result
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    Png,
    Tiff,
    TiffM,
    TiffMultilayer,
    Jpeg,
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CompressionMethod {
    Uncompressed,
    Lzw,
    Deflate,
}

/// Decoded output format descriptor
///
/// The optional fields only carry a value for the file types they apply to:
/// compression for TIFF, quality for JPEG, crop and position saving for the
/// layered TIFF variants.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileFormat {
    pub file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub compression: Option<CompressionMethod>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quality: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub crop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub save_positions: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BitDepth {
    Uint8,
    Uint16,
    Float,
    Unknown,
}

impl BitDepth {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => BitDepth::Uint8,
            1 => BitDepth::Uint16,
            2 => BitDepth::Float,
            _ => BitDepth::Unknown,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub previous_comments: Vec<String>,
    pub size: Size,
    pub crop: Crop,
    pub projection: ProjectionType,
    pub projection_parameters: Vec<f64>,
    pub field_of_view: f64,
    pub file_format: FileFormat,
    pub exposure: f64,
    pub hdr: bool,
    pub bit_depth: BitDepth,
    pub photometric_reference_id: usize,
    pub unmatched_parameters: Vec<String>,
}
