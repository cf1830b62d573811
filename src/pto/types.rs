//! Domain model of a panorama project
//!
//! These types are what [`project`](super::projection::project) builds out of a
//! parsed script. They own all their data, carry decoded enums instead of raw
//! codes, and serialize with camelCase field names.

mod control_point;
mod image;
mod linked;
mod project;
mod stitcher;

use serde::{Deserialize, Serialize};

pub use control_point::ControlPoint;
pub use image::{Image, LensProjection, Mask, MaskType, Optimisation, OptimisationParameter, Point};
pub use linked::LinkedValue;
pub use project::{
    BitDepth, CompressionMethod, Crop, FileFormat, FileType, Project, ProjectionType, Size,
};
pub use stitcher::{Interpolator, SpeedUp, Stitcher};

/// Script format generation
///
/// Scripts written since 2014 may place images on projection planes (`Tpy`,
/// `Tpp` keys); older scripts cannot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FormatVersion {
    PreV2014,
    V2014,
}

/// A whole panorama project
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PtoType {
    pub project: Project,
    pub stitcher: Stitcher,
    pub images: Vec<Image>,
    pub control_points: Vec<ControlPoint>,
    pub last_comments: Vec<String>,
    pub version: FormatVersion,
}

impl PtoType {
    /// Number of masks over all images
    pub fn mask_count(&self) -> usize {
        self.images.iter().map(|i| i.masks.len()).sum()
    }

    /// Number of optimizer markers over all images
    pub fn optimisation_count(&self) -> usize {
        self.images
            .iter()
            .map(|i| i.optimisation_parameters.len())
            .sum()
    }
}
