//! Read-only accessors over a parsed [`Script`]
//!
//! Every getter that takes an index asserts it is in range and panics
//! otherwise; an out-of-range index is a bug in the caller, never something a
//! script can cause. Linked parameters come back as [`LinkedValue`], so a
//! caller cannot read the literal without first seeing whether it is
//! authoritative.

use super::output_format;
use super::records::RecordList;
use super::script::{
    geometry, vignetting, CropArea, CtrlPointSpec, ImageSpec, LinkedParam, MaskSpec, OptVarSpec,
    Script,
};
use super::types::{
    CompressionMethod, Crop, FileFormat, FileType, LinkedValue, OptimisationParameter,
};

impl<T: Copy> From<&LinkedParam<T>> for LinkedValue<T> {
    fn from(param: &LinkedParam<T>) -> Self {
        match param.reference {
            Some(image) => LinkedValue::Reference(image),
            None => LinkedValue::Value(param.value),
        }
    }
}

fn crop_of(area: &CropArea) -> Crop {
    let [left, right, top, bottom] = *area;
    Crop {
        left,
        top,
        right,
        bottom,
    }
}

fn comment<'a>(list: &'a RecordList<String>, c: usize, owner: &str) -> &'a str {
    assert!(
        c < list.len(),
        "comment index {} out of range for {} ({} comments)",
        c,
        owner,
        list.len()
    );
    &list[c]
}

impl Script {
    fn image(&self, i: usize) -> &ImageSpec {
        assert!(
            i < self.images.len(),
            "image index {} out of range ({} images)",
            i,
            self.images.len()
        );
        &self.images[i]
    }

    fn var(&self, v: usize) -> &OptVarSpec {
        assert!(
            v < self.vars.len(),
            "variable index {} out of range ({} variables)",
            v,
            self.vars.len()
        );
        &self.vars[v]
    }

    fn ctrl_point(&self, cp: usize) -> &CtrlPointSpec {
        assert!(
            cp < self.ctrl_points.len(),
            "control point index {} out of range ({} control points)",
            cp,
            self.ctrl_points.len()
        );
        &self.ctrl_points[cp]
    }

    fn mask(&self, m: usize) -> &MaskSpec {
        assert!(
            m < self.masks.len(),
            "mask index {} out of range ({} masks)",
            m,
            self.masks.len()
        );
        &self.masks[m]
    }

    // Project line

    pub fn pano_comment_count(&self) -> usize {
        self.pano.prev_comments.len()
    }

    pub fn pano_comment(&self, c: usize) -> &str {
        comment(&self.pano.prev_comments, c, "the project line")
    }

    pub fn pano_width(&self) -> u32 {
        self.pano.width
    }

    pub fn pano_height(&self) -> u32 {
        self.pano.height
    }

    pub fn pano_crop(&self) -> Crop {
        crop_of(&self.pano.crop)
    }

    /// Raw projection code, -1 when the `p` line has no `f` key
    pub fn pano_projection(&self) -> i32 {
        self.pano.projection
    }

    pub fn pano_projection_parm_count(&self) -> usize {
        self.pano.projection_parms.len()
    }

    pub fn pano_projection_parm(&self, i: usize) -> f64 {
        assert!(
            i < self.pano.projection_parms.len(),
            "projection parameter index {} out of range ({} parameters)",
            i,
            self.pano.projection_parms.len()
        );
        self.pano.projection_parms[i]
    }

    pub fn pano_hfov(&self) -> f64 {
        self.pano.hfov
    }

    /// The raw `n` descriptor, if the `p` line has one
    pub fn pano_output_descriptor(&self) -> Option<&str> {
        self.pano.output_format.as_deref()
    }

    pub fn pano_output(&self) -> FileFormat {
        output_format::decode(self.pano_output_descriptor())
    }

    pub fn pano_output_format(&self) -> FileType {
        output_format::decode_file_type(self.pano_output_descriptor())
    }

    /// `None` unless the output is plain TIFF with a known compression
    pub fn pano_output_compression(&self) -> Option<CompressionMethod> {
        self.pano_output().compression
    }

    /// `None` unless the output is JPEG with a quality flag
    pub fn pano_output_quality(&self) -> Option<u32> {
        self.pano_output().quality
    }

    /// `None` unless the output is a layered TIFF
    pub fn pano_output_cropped(&self) -> Option<bool> {
        self.pano_output().crop
    }

    /// `None` unless the output is a layered TIFF
    pub fn pano_output_save_coordinates(&self) -> Option<bool> {
        self.pano_output().save_positions
    }

    pub fn pano_is_hdr(&self) -> bool {
        self.pano.dynamic_range_mode != 0
    }

    pub fn pano_bit_depth(&self) -> i32 {
        self.pano.bit_depth
    }

    pub fn pano_exposure(&self) -> f64 {
        self.pano.exposure
    }

    pub fn pano_image_reference(&self) -> usize {
        self.pano.photometric_reference
    }

    pub fn pano_unmatched_count(&self) -> usize {
        self.pano.unmatched.len()
    }

    pub fn pano_unmatched(&self, u: usize) -> &str {
        comment(&self.pano.unmatched, u, "the project line")
    }

    // Optimizer line

    pub fn optimize_comment_count(&self) -> usize {
        self.optimize.prev_comments.len()
    }

    pub fn optimize_comment(&self, c: usize) -> &str {
        comment(&self.optimize.prev_comments, c, "the optimizer line")
    }

    pub fn optimize_gamma(&self) -> f64 {
        self.optimize.gamma
    }

    pub fn optimize_interpolator(&self) -> i32 {
        self.optimize.interpolator
    }

    pub fn optimize_speed_up(&self) -> i32 {
        self.optimize.speed_up
    }

    pub fn optimize_huber_sigma(&self) -> f64 {
        self.optimize.huber_sigma
    }

    pub fn optimize_photometric_huber_sigma(&self) -> f64 {
        self.optimize.photometric_huber_sigma
    }

    pub fn optimize_unmatched_count(&self) -> usize {
        self.optimize.unmatched.len()
    }

    pub fn optimize_unmatched(&self, u: usize) -> &str {
        comment(&self.optimize.unmatched, u, "the optimizer line")
    }

    // Images

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn image_comment_count(&self, i: usize) -> usize {
        self.image(i).prev_comments.len()
    }

    pub fn image_comment(&self, i: usize, c: usize) -> &str {
        comment(&self.image(i).prev_comments, c, "an image line")
    }

    /// Source line of image `i`
    pub fn image_row(&self, i: usize) -> usize {
        self.image(i).row
    }

    pub fn image_width(&self, i: usize) -> u32 {
        self.image(i).width
    }

    pub fn image_height(&self, i: usize) -> u32 {
        self.image(i).height
    }

    pub fn image_projection(&self, i: usize) -> i32 {
        self.image(i).projection
    }

    pub fn image_hfov(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).hfov).into()
    }

    pub fn image_yaw(&self, i: usize) -> f64 {
        self.image(i).yaw
    }

    pub fn image_pitch(&self, i: usize) -> f64 {
        self.image(i).pitch
    }

    pub fn image_roll(&self, i: usize) -> f64 {
        self.image(i).roll
    }

    /// Lens coefficient `k`: 0..=2 are barrel a, b, c; 3 and 4 are the
    /// center offsets d and e
    pub fn image_coef(&self, i: usize, k: usize) -> LinkedValue<f64> {
        assert!(k <= geometry::E, "lens coefficient {} out of range", k);
        (&self.image(i).geometry[k]).into()
    }

    pub fn image_shear_x(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).geometry[geometry::SHEAR_X]).into()
    }

    pub fn image_shear_y(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).geometry[geometry::SHEAR_Y]).into()
    }

    pub fn image_exposure(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).exposure).into()
    }

    pub fn image_wb_red(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).wb_red).into()
    }

    pub fn image_wb_blue(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).wb_blue).into()
    }

    /// EMoR response coefficient `k`, 0..=4 for `Ra`..`Re`
    pub fn image_photometric_coef(&self, i: usize, k: usize) -> LinkedValue<f64> {
        let image = self.image(i);
        assert!(
            k < image.photometric.len(),
            "photometric coefficient {} out of range",
            k
        );
        (&image.photometric[k]).into()
    }

    pub fn image_vignetting_mode(&self, i: usize) -> LinkedValue<i32> {
        (&self.image(i).vignetting_mode).into()
    }

    /// Vignetting polynomial coefficient `k`, 0..=3 for `Va`..`Vd`
    pub fn image_vignetting_coef(&self, i: usize, k: usize) -> LinkedValue<f64> {
        assert!(k <= vignetting::D, "vignetting coefficient {} out of range", k);
        (&self.image(i).vignetting[k]).into()
    }

    pub fn image_vignetting_offset_x(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).vignetting[vignetting::X]).into()
    }

    pub fn image_vignetting_offset_y(&self, i: usize) -> LinkedValue<f64> {
        (&self.image(i).vignetting[vignetting::Y]).into()
    }

    pub fn image_flat_field(&self, i: usize) -> Option<&str> {
        self.image(i).flat_field.as_deref()
    }

    pub fn image_camera_position_x(&self, i: usize) -> f64 {
        self.image(i).camera_position[0]
    }

    pub fn image_camera_position_y(&self, i: usize) -> f64 {
        self.image(i).camera_position[1]
    }

    pub fn image_camera_position_z(&self, i: usize) -> f64 {
        self.image(i).camera_position[2]
    }

    pub fn image_plane_yaw(&self, i: usize) -> f64 {
        self.image(i).plane_rotation[0]
    }

    pub fn image_plane_pitch(&self, i: usize) -> f64 {
        self.image(i).plane_rotation[1]
    }

    pub fn image_crop(&self, i: usize) -> Crop {
        crop_of(&self.image(i).crop)
    }

    pub fn image_stack(&self, i: usize) -> LinkedValue<i32> {
        (&self.image(i).stack).into()
    }

    pub fn image_name(&self, i: usize) -> &str {
        &self.image(i).name
    }

    pub fn image_unmatched_count(&self, i: usize) -> usize {
        self.image(i).unmatched.len()
    }

    pub fn image_unmatched(&self, i: usize, u: usize) -> &str {
        comment(&self.image(i).unmatched, u, "an image line")
    }

    /// Whether any image line placed its image on a projection plane
    pub fn uses_projection_plane(&self) -> bool {
        self.images.iter().any(|image| image.has_plane_rotation)
    }

    // Optimizer variables

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn var_comment_count(&self, v: usize) -> usize {
        self.var(v).prev_comments.len()
    }

    pub fn var_comment(&self, v: usize, c: usize) -> &str {
        comment(&self.var(v).prev_comments, c, "a variable")
    }

    pub fn var_name(&self, v: usize) -> &str {
        &self.var(v).name
    }

    pub fn var_parameter(&self, v: usize) -> OptimisationParameter {
        OptimisationParameter::from_name(&self.var(v).name)
    }

    pub fn var_image(&self, v: usize) -> usize {
        self.var(v).image
    }

    pub fn var_row(&self, v: usize) -> usize {
        self.var(v).row
    }

    // Control points

    pub fn ctrl_point_count(&self) -> usize {
        self.ctrl_points.len()
    }

    pub fn ctrl_point_comment_count(&self, cp: usize) -> usize {
        self.ctrl_point(cp).prev_comments.len()
    }

    pub fn ctrl_point_comment(&self, cp: usize, c: usize) -> &str {
        comment(&self.ctrl_point(cp).prev_comments, c, "a control point")
    }

    pub fn ctrl_point_image1(&self, cp: usize) -> usize {
        self.ctrl_point(cp).image1
    }

    pub fn ctrl_point_image2(&self, cp: usize) -> usize {
        self.ctrl_point(cp).image2
    }

    pub fn ctrl_point_p1_x(&self, cp: usize) -> f64 {
        self.ctrl_point(cp).p1.x
    }

    pub fn ctrl_point_p1_y(&self, cp: usize) -> f64 {
        self.ctrl_point(cp).p1.y
    }

    pub fn ctrl_point_p2_x(&self, cp: usize) -> f64 {
        self.ctrl_point(cp).p2.x
    }

    pub fn ctrl_point_p2_y(&self, cp: usize) -> f64 {
        self.ctrl_point(cp).p2.y
    }

    pub fn ctrl_point_type(&self, cp: usize) -> i32 {
        self.ctrl_point(cp).kind
    }

    pub fn ctrl_point_row(&self, cp: usize) -> usize {
        self.ctrl_point(cp).row
    }

    // Masks

    pub fn mask_count(&self) -> usize {
        self.masks.len()
    }

    pub fn mask_comment_count(&self, m: usize) -> usize {
        self.mask(m).prev_comments.len()
    }

    pub fn mask_comment(&self, m: usize, c: usize) -> &str {
        comment(&self.mask(m).prev_comments, c, "a mask")
    }

    pub fn mask_image(&self, m: usize) -> usize {
        self.mask(m).image
    }

    pub fn mask_type(&self, m: usize) -> i32 {
        self.mask(m).kind
    }

    pub fn mask_point_count(&self, m: usize) -> usize {
        self.mask(m).points.len()
    }

    fn mask_point(&self, m: usize, p: usize) -> (i32, i32) {
        let mask = self.mask(m);
        assert!(
            p < mask.points.len(),
            "mask point {} out of range ({} points)",
            p,
            mask.points.len()
        );
        mask.points[p]
    }

    pub fn mask_point_x(&self, m: usize, p: usize) -> i32 {
        self.mask_point(m, p).0
    }

    pub fn mask_point_y(&self, m: usize, p: usize) -> i32 {
        self.mask_point(m, p).1
    }

    pub fn mask_row(&self, m: usize) -> usize {
        self.mask(m).row
    }

    // Trailing comments

    pub fn ending_comment_count(&self) -> usize {
        self.ending_comments.len()
    }

    pub fn ending_comment(&self, c: usize) -> &str {
        comment(&self.ending_comments, c, "the end of the script")
    }
}
