//! Projection of a raw [`Script`] into the [`PtoType`] domain model
//!
//! Reads the script exclusively through its getters. Masks and optimizer
//! variables are listed flat in the script; here they are moved onto the
//! image they name. A record naming an image that does not exist cannot be
//! placed and is dropped with a warning.

use tracing::{debug, warn};

use super::script::Script;
use super::types::{
    BitDepth, ControlPoint, FormatVersion, Image, Interpolator, LensProjection, Mask, MaskType,
    Optimisation, Point, Project, ProjectionType, PtoType, Size, SpeedUp, Stitcher,
};

/// Build the domain model of `script`
///
/// Without a version hint the version is inferred from the script: any use of
/// projection planes makes it [`FormatVersion::V2014`].
pub fn project(script: &Script, version: Option<FormatVersion>) -> PtoType {
    let version = version.unwrap_or_else(|| {
        if script.uses_projection_plane() {
            FormatVersion::V2014
        } else {
            FormatVersion::PreV2014
        }
    });

    let mut images: Vec<Image> = (0..script.image_count())
        .map(|i| project_image(script, i))
        .collect();

    for m in 0..script.mask_count() {
        let target = script.mask_image(m);
        match images.get_mut(target) {
            Some(image) => image.masks.push(project_mask(script, m)),
            None => warn!(
                row = script.mask_row(m),
                image = target,
                "mask refers to a missing image, dropped"
            ),
        }
    }

    for v in 0..script.var_count() {
        let target = script.var_image(v);
        match images.get_mut(target) {
            Some(image) => image.optimisation_parameters.push(Optimisation {
                previous_comments: comments(script.var_comment_count(v), |c| {
                    script.var_comment(v, c)
                }),
                parameter: script.var_parameter(v),
            }),
            None => warn!(
                row = script.var_row(v),
                image = target,
                "optimizer variable refers to a missing image, dropped"
            ),
        }
    }

    let control_points = (0..script.ctrl_point_count())
        .map(|cp| project_control_point(script, cp))
        .collect();

    debug!(?version, images = images.len(), "projected script");
    PtoType {
        project: project_pano(script),
        stitcher: project_stitcher(script),
        images,
        control_points,
        last_comments: comments(script.ending_comment_count(), |c| script.ending_comment(c)),
        version,
    }
}

fn comments<'a>(count: usize, get: impl Fn(usize) -> &'a str) -> Vec<String> {
    (0..count).map(|c| get(c).to_string()).collect()
}

fn project_pano(script: &Script) -> Project {
    Project {
        previous_comments: comments(script.pano_comment_count(), |c| script.pano_comment(c)),
        size: Size {
            width: script.pano_width(),
            height: script.pano_height(),
        },
        crop: script.pano_crop(),
        projection: ProjectionType::from_code(script.pano_projection()),
        projection_parameters: (0..script.pano_projection_parm_count())
            .map(|i| script.pano_projection_parm(i))
            .collect(),
        field_of_view: script.pano_hfov(),
        file_format: script.pano_output(),
        exposure: script.pano_exposure(),
        hdr: script.pano_is_hdr(),
        bit_depth: BitDepth::from_code(script.pano_bit_depth()),
        photometric_reference_id: script.pano_image_reference(),
        unmatched_parameters: comments(script.pano_unmatched_count(), |u| {
            script.pano_unmatched(u)
        }),
    }
}

fn project_stitcher(script: &Script) -> Stitcher {
    Stitcher {
        previous_comments: comments(script.optimize_comment_count(), |c| {
            script.optimize_comment(c)
        }),
        gamma: script.optimize_gamma(),
        interpolator: Interpolator::from_code(script.optimize_interpolator()),
        speed_up: SpeedUp::from_code(script.optimize_speed_up()),
        huber_sigma: script.optimize_huber_sigma(),
        photometric_huber_sigma: script.optimize_photometric_huber_sigma(),
        unmatched_parameters: comments(script.optimize_unmatched_count(), |u| {
            script.optimize_unmatched(u)
        }),
    }
}

fn project_image(script: &Script, i: usize) -> Image {
    Image {
        previous_comments: comments(script.image_comment_count(i), |c| {
            script.image_comment(i, c)
        }),
        id: i,
        size: Size {
            width: script.image_width(i),
            height: script.image_height(i),
        },
        lens_projection: LensProjection::from_code(script.image_projection(i)),
        field_of_view: script.image_hfov(i),
        yaw: script.image_yaw(i),
        pitch: script.image_pitch(i),
        roll: script.image_roll(i),
        lens_barrel_coefficient_a: script.image_coef(i, 0),
        lens_barrel_coefficient_b: script.image_coef(i, 1),
        lens_barrel_coefficient_c: script.image_coef(i, 2),
        lens_center_offset_x: script.image_coef(i, 3),
        lens_center_offset_y: script.image_coef(i, 4),
        lens_shear_x: script.image_shear_x(i),
        lens_shear_y: script.image_shear_y(i),
        exposure: script.image_exposure(i),
        white_balance_red: script.image_wb_red(i),
        white_balance_blue: script.image_wb_blue(i),
        photometric_emor_a: script.image_photometric_coef(i, 0),
        photometric_emor_b: script.image_photometric_coef(i, 1),
        photometric_emor_c: script.image_photometric_coef(i, 2),
        photometric_emor_d: script.image_photometric_coef(i, 3),
        photometric_emor_e: script.image_photometric_coef(i, 4),
        vignetting_mode: script.image_vignetting_mode(i),
        vignetting_correction_i: script.image_vignetting_coef(i, 0),
        vignetting_correction_ii: script.image_vignetting_coef(i, 1),
        vignetting_correction_iii: script.image_vignetting_coef(i, 2),
        vignetting_correction_iv: script.image_vignetting_coef(i, 3),
        vignetting_offset_x: script.image_vignetting_offset_x(i),
        vignetting_offset_y: script.image_vignetting_offset_y(i),
        vignetting_flatfield_image_name: script.image_flat_field(i).map(str::to_string),
        mosaic_camera_position_x: script.image_camera_position_x(i),
        mosaic_camera_position_y: script.image_camera_position_y(i),
        mosaic_camera_position_z: script.image_camera_position_z(i),
        mosaic_projection_plane_yaw: script.image_plane_yaw(i),
        mosaic_projection_plane_pitch: script.image_plane_pitch(i),
        crop: script.image_crop(i),
        stack_number: script.image_stack(i),
        file_name: script.image_name(i).to_string(),
        masks: Vec::new(),
        optimisation_parameters: Vec::new(),
        unmatched_parameters: comments(script.image_unmatched_count(i), |u| {
            script.image_unmatched(i, u)
        }),
    }
}

fn project_mask(script: &Script, m: usize) -> Mask {
    Mask {
        previous_comments: comments(script.mask_comment_count(m), |c| script.mask_comment(m, c)),
        mask_type: MaskType::from_code(script.mask_type(m)),
        hull: (0..script.mask_point_count(m))
            .map(|p| Point {
                x: script.mask_point_x(m, p),
                y: script.mask_point_y(m, p),
            })
            .collect(),
    }
}

fn project_control_point(script: &Script, cp: usize) -> ControlPoint {
    ControlPoint {
        previous_comments: comments(script.ctrl_point_comment_count(cp), |c| {
            script.ctrl_point_comment(cp, c)
        }),
        image1_id: script.ctrl_point_image1(cp),
        image2_id: script.ctrl_point_image2(cp),
        point1_x: script.ctrl_point_p1_x(cp),
        point1_y: script.ctrl_point_p1_y(cp),
        point2_x: script.ctrl_point_p2_x(cp),
        point2_y: script.ctrl_point_p2_y(cp),
        control_point_type: script.ctrl_point_type(cp),
    }
}
