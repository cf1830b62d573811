//! Raw parse result
//!
//! [`Script`] mirrors the script line by line: one record per `i`, `c`, `k`
//! and `v` entry, the merged `p` and `m` settings, and the comment lists that
//! precede each record. Fields are crate-private; readers go through the
//! getter layer in [`getters`](super::getters).

use super::records::RecordList;

/// A per-image parameter that may be linked to the same parameter of another image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkedParam<T> {
    pub(crate) value: T,
    pub(crate) reference: Option<usize>,
}

impl<T> LinkedParam<T> {
    pub(crate) fn with_value(value: T) -> Self {
        Self {
            value,
            reference: None,
        }
    }
}

impl<T: Default> Default for LinkedParam<T> {
    fn default() -> Self {
        Self::with_value(T::default())
    }
}

/// Indices into [`ImageSpec::geometry`]
pub(crate) mod geometry {
    pub const A: usize = 0;
    pub const B: usize = 1;
    pub const C: usize = 2;
    pub const D: usize = 3;
    pub const E: usize = 4;
    pub const SHEAR_X: usize = 5;
    pub const SHEAR_Y: usize = 6;
}

/// Indices into [`ImageSpec::vignetting`]
pub(crate) mod vignetting {
    pub const A: usize = 0;
    pub const B: usize = 1;
    pub const C: usize = 2;
    pub const D: usize = 3;
    pub const X: usize = 4;
    pub const Y: usize = 5;
}

/// Crop rectangle in pto order: left, right, top, bottom
pub(crate) type CropArea = [i32; 4];

/// The `p` line
#[derive(Debug, Clone, PartialEq)]
pub struct PanoSpec {
    pub(crate) prev_comments: RecordList<String>,
    /// Row of the first `p` line
    pub(crate) row: usize,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) crop: CropArea,
    pub(crate) projection: i32,
    pub(crate) projection_parms: Vec<f64>,
    pub(crate) hfov: f64,
    pub(crate) output_format: Option<String>,
    pub(crate) dynamic_range_mode: i32,
    pub(crate) bit_depth: i32,
    pub(crate) exposure: f64,
    pub(crate) photometric_reference: usize,
    pub(crate) unmatched: RecordList<String>,
}

/// Projection code of a canvas whose `p` line has no `f` key
pub const PROJECTION_UNSET: i32 = -1;

impl Default for PanoSpec {
    fn default() -> Self {
        Self {
            prev_comments: RecordList::new(),
            row: 0,
            width: 0,
            height: 0,
            crop: [0; 4],
            projection: PROJECTION_UNSET,
            projection_parms: Vec::new(),
            hfov: 0.0,
            output_format: None,
            dynamic_range_mode: 0,
            bit_depth: 0,
            exposure: 0.0,
            photometric_reference: 0,
            unmatched: RecordList::new(),
        }
    }
}

/// One `i` line
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSpec {
    pub(crate) prev_comments: RecordList<String>,
    pub(crate) row: usize,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) projection: i32,
    pub(crate) hfov: LinkedParam<f64>,
    pub(crate) yaw: f64,
    pub(crate) pitch: f64,
    pub(crate) roll: f64,
    pub(crate) geometry: [LinkedParam<f64>; 7],
    pub(crate) exposure: LinkedParam<f64>,
    pub(crate) wb_red: LinkedParam<f64>,
    pub(crate) wb_blue: LinkedParam<f64>,
    pub(crate) photometric: [LinkedParam<f64>; 5],
    pub(crate) vignetting_mode: LinkedParam<i32>,
    pub(crate) vignetting: [LinkedParam<f64>; 6],
    pub(crate) flat_field: Option<String>,
    pub(crate) camera_position: [f64; 3],
    pub(crate) plane_rotation: [f64; 2],
    pub(crate) has_plane_rotation: bool,
    pub(crate) crop: CropArea,
    pub(crate) stack: LinkedParam<i32>,
    pub(crate) name: String,
    pub(crate) unmatched: RecordList<String>,
}

impl Default for ImageSpec {
    fn default() -> Self {
        let mut vig = [LinkedParam::default(); 6];
        vig[vignetting::A] = LinkedParam::with_value(1.0);
        Self {
            prev_comments: RecordList::new(),
            row: 0,
            width: 0,
            height: 0,
            projection: 0,
            hfov: LinkedParam::default(),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            geometry: [LinkedParam::default(); 7],
            exposure: LinkedParam::default(),
            wb_red: LinkedParam::with_value(1.0),
            wb_blue: LinkedParam::with_value(1.0),
            photometric: [LinkedParam::default(); 5],
            vignetting_mode: LinkedParam::default(),
            vignetting: vig,
            flat_field: None,
            camera_position: [0.0; 3],
            plane_rotation: [0.0; 2],
            has_plane_rotation: false,
            crop: [0; 4],
            stack: LinkedParam::default(),
            name: String::new(),
            unmatched: RecordList::new(),
        }
    }
}

/// The `m` (or `o`) line
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeSpec {
    pub(crate) prev_comments: RecordList<String>,
    pub(crate) gamma: f64,
    pub(crate) interpolator: i32,
    pub(crate) speed_up: i32,
    pub(crate) huber_sigma: f64,
    pub(crate) photometric_huber_sigma: f64,
    pub(crate) unmatched: RecordList<String>,
}

impl Default for OptimizeSpec {
    fn default() -> Self {
        Self {
            prev_comments: RecordList::new(),
            gamma: 1.0,
            interpolator: 0,
            speed_up: 0,
            huber_sigma: 2.0,
            photometric_huber_sigma: 0.0,
            unmatched: RecordList::new(),
        }
    }
}

/// One variable named on a `v` line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptVarSpec {
    pub(crate) prev_comments: RecordList<String>,
    pub(crate) row: usize,
    pub(crate) name: String,
    pub(crate) image: usize,
}

/// Image-space coordinates of one side of a control point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointF {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

/// One `c` line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CtrlPointSpec {
    pub(crate) prev_comments: RecordList<String>,
    pub(crate) row: usize,
    pub(crate) image1: usize,
    pub(crate) image2: usize,
    pub(crate) p1: PointF,
    pub(crate) p2: PointF,
    pub(crate) kind: i32,
}

/// One `k` line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskSpec {
    pub(crate) prev_comments: RecordList<String>,
    pub(crate) row: usize,
    pub(crate) image: usize,
    pub(crate) kind: i32,
    pub(crate) points: Vec<(i32, i32)>,
}

/// The whole parsed script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub(crate) pano: PanoSpec,
    pub(crate) images: RecordList<ImageSpec>,
    pub(crate) optimize: OptimizeSpec,
    pub(crate) vars: RecordList<OptVarSpec>,
    pub(crate) ctrl_points: RecordList<CtrlPointSpec>,
    pub(crate) masks: RecordList<MaskSpec>,
    pub(crate) ending_comments: RecordList<String>,
}
