use serde::{Deserialize, Serialize};

/// Pixel interpolator used while remapping, `i` key of the `m` line
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Interpolator {
    Poly3,
    Spline16,
    Spline36,
    Sinc256,
    Spline64,
    Bilinear,
    NearestNeighbor,
    Sinc1024,
    Unknown,
}

impl Interpolator {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Interpolator::Poly3,
            1 => Interpolator::Spline16,
            2 => Interpolator::Spline36,
            3 => Interpolator::Sinc256,
            4 => Interpolator::Spline64,
            5 => Interpolator::Bilinear,
            6 => Interpolator::NearestNeighbor,
            7 => Interpolator::Sinc1024,
            _ => Interpolator::Unknown,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SpeedUp {
    Slow,
    Medium,
    Fast,
    Unknown,
}

impl SpeedUp {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => SpeedUp::Slow,
            1 => SpeedUp::Medium,
            2 => SpeedUp::Fast,
            _ => SpeedUp::Unknown,
        }
    }
}

/// Global optimizer and stitcher settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stitcher {
    pub previous_comments: Vec<String>,
    pub gamma: f64,
    pub interpolator: Interpolator,
    pub speed_up: SpeedUp,
    pub huber_sigma: f64,
    pub photometric_huber_sigma: f64,
    pub unmatched_parameters: Vec<String>,
}
