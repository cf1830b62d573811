//! Input images with their masks and optimizer markers

use serde::{Deserialize, Serialize};

use super::linked::LinkedValue;
use super::project::{Crop, Size};

/// Lens model of a source image, `f` key of an `i` line
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LensProjection {
    Rectilinear,
    Panoramic,
    CircularFisheye,
    FullFrameFisheye,
    Equirectangular,
    FisheyeOrthographic,
    FisheyeStereographic,
    FisheyeEquisolid,
    FisheyeThoby,
    Unknown,
}

impl LensProjection {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => LensProjection::Rectilinear,
            1 => LensProjection::Panoramic,
            2 => LensProjection::CircularFisheye,
            3 => LensProjection::FullFrameFisheye,
            4 => LensProjection::Equirectangular,
            8 => LensProjection::FisheyeOrthographic,
            10 => LensProjection::FisheyeStereographic,
            19 => LensProjection::FisheyeEquisolid,
            20 => LensProjection::FisheyeThoby,
            _ => LensProjection::Unknown,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MaskType {
    Negative,
    Positive,
    NegativeStack,
    PositiveStack,
    NegativeLens,
    Unknown,
}

impl MaskType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => MaskType::Negative,
            1 => MaskType::Positive,
            2 => MaskType::NegativeStack,
            3 => MaskType::PositiveStack,
            4 => MaskType::NegativeLens,
            _ => MaskType::Unknown,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mask {
    pub previous_comments: Vec<String>,
    pub mask_type: MaskType,
    pub hull: Vec<Point>,
}

/// Image parameter the optimizer may vary, named on a `v` line
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OptimisationParameter {
    LensA,
    LensB,
    LensC,
    LensD,
    LensE,
    Hfov,
    Yaw,
    Pitch,
    Roll,
    Exposure,
    WbRed,
    WbBlue,
    VignettingA,
    VignettingB,
    VignettingC,
    VignettingD,
    VignettingX,
    VignettingY,
    PhotometricA,
    PhotometricB,
    PhotometricC,
    PhotometricD,
    PhotometricE,
    Unknown,
}

impl OptimisationParameter {
    /// Decode the variable name used on `v` lines
    pub fn from_name(name: &str) -> Self {
        use OptimisationParameter::*;
        match name {
            "a" => LensA,
            "b" => LensB,
            "c" => LensC,
            "d" => LensD,
            "e" => LensE,
            "v" => Hfov,
            "y" => Yaw,
            "p" => Pitch,
            "r" => Roll,
            "Eev" => Exposure,
            "Er" => WbRed,
            "Eb" => WbBlue,
            "Va" => VignettingA,
            "Vb" => VignettingB,
            "Vc" => VignettingC,
            "Vd" => VignettingD,
            "Vx" => VignettingX,
            "Vy" => VignettingY,
            "Ra" => PhotometricA,
            "Rb" => PhotometricB,
            "Rc" => PhotometricC,
            "Rd" => PhotometricD,
            "Re" => PhotometricE,
            _ => Unknown,
        }
    }

    /// Numeric code, in declaration order
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Optimisation {
    pub previous_comments: Vec<String>,
    pub parameter: OptimisationParameter,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub previous_comments: Vec<String>,
    pub id: usize,
    pub size: Size,
    pub lens_projection: LensProjection,
    pub field_of_view: LinkedValue<f64>,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    pub lens_barrel_coefficient_a: LinkedValue<f64>,
    pub lens_barrel_coefficient_b: LinkedValue<f64>,
    pub lens_barrel_coefficient_c: LinkedValue<f64>,
    pub lens_center_offset_x: LinkedValue<f64>,
    pub lens_center_offset_y: LinkedValue<f64>,
    pub lens_shear_x: LinkedValue<f64>,
    pub lens_shear_y: LinkedValue<f64>,
    pub exposure: LinkedValue<f64>,
    pub white_balance_red: LinkedValue<f64>,
    pub white_balance_blue: LinkedValue<f64>,
    pub photometric_emor_a: LinkedValue<f64>,
    pub photometric_emor_b: LinkedValue<f64>,
    pub photometric_emor_c: LinkedValue<f64>,
    pub photometric_emor_d: LinkedValue<f64>,
    pub photometric_emor_e: LinkedValue<f64>,
    pub vignetting_mode: LinkedValue<i32>,
    pub vignetting_correction_i: LinkedValue<f64>,
    pub vignetting_correction_ii: LinkedValue<f64>,
    pub vignetting_correction_iii: LinkedValue<f64>,
    pub vignetting_correction_iv: LinkedValue<f64>,
    pub vignetting_offset_x: LinkedValue<f64>,
    pub vignetting_offset_y: LinkedValue<f64>,
    pub vignetting_flatfield_image_name: Option<String>,
    pub mosaic_camera_position_x: f64,
    pub mosaic_camera_position_y: f64,
    pub mosaic_camera_position_z: f64,
    pub mosaic_projection_plane_yaw: f64,
    pub mosaic_projection_plane_pitch: f64,
    pub crop: Crop,
    pub stack_number: LinkedValue<i32>,
    pub file_name: String,
    pub masks: Vec<Mask>,
    pub optimisation_parameters: Vec<Optimisation>,
    pub unmatched_parameters: Vec<String>,
}
