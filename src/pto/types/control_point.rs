use serde::{Deserialize, Serialize};

/// A pair of corresponding pixel positions in two images
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControlPoint {
    pub previous_comments: Vec<String>,
    pub image1_id: usize,
    pub image2_id: usize,
    pub point1_x: f64,
    pub point1_y: f64,
    pub point2_x: f64,
    pub point2_y: f64,
    /// 0 for a normal point; other codes mark line constraints
    pub control_point_type: i32,
}
