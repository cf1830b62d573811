//! Image reference checks
//!
//! A script may link a parameter to an image that appears later in the file,
//! so the parser cannot check references while it reads. This pass runs once
//! the whole script is known and rejects any image index past the end of the
//! image list. It is off unless `parser.validate_references` is set.

use super::error::ParseError;
use super::script::{LinkedParam, Script};

fn check(row: usize, what: &str, index: usize, image_count: usize) -> Result<(), ParseError> {
    if index < image_count {
        return Ok(());
    }
    Err(ParseError::DanglingReference {
        row,
        what: what.to_string(),
        index,
        image_count,
    })
}

fn check_linked<T>(
    row: usize,
    key: &str,
    param: &LinkedParam<T>,
    image_count: usize,
) -> Result<(), ParseError> {
    match param.reference {
        Some(index) => check(row, &format!("parameter '{}'", key), index, image_count),
        None => Ok(()),
    }
}

/// Check every image index in `script` against its image count
pub fn validate_references(script: &Script) -> Result<(), ParseError> {
    let count = script.images.len();

    if count > 0 {
        check(
            script.pano.row,
            "photometric reference",
            script.pano.photometric_reference,
            count,
        )?;
    }

    for image in &script.images {
        let row = image.row;
        check_linked(row, "v", &image.hfov, count)?;
        for (key, param) in ["a", "b", "c", "d", "e", "g", "t"]
            .iter()
            .zip(&image.geometry)
        {
            check_linked(row, key, param, count)?;
        }
        check_linked(row, "Eev", &image.exposure, count)?;
        check_linked(row, "Er", &image.wb_red, count)?;
        check_linked(row, "Eb", &image.wb_blue, count)?;
        for (key, param) in ["Ra", "Rb", "Rc", "Rd", "Re"]
            .iter()
            .zip(&image.photometric)
        {
            check_linked(row, key, param, count)?;
        }
        check_linked(row, "Vm", &image.vignetting_mode, count)?;
        for (key, param) in ["Va", "Vb", "Vc", "Vd", "Vx", "Vy"]
            .iter()
            .zip(&image.vignetting)
        {
            check_linked(row, key, param, count)?;
        }
        check_linked(row, "j", &image.stack, count)?;
    }

    for var in &script.vars {
        check(
            var.row,
            &format!("optimizer variable '{}'", var.name),
            var.image,
            count,
        )?;
    }
    for point in &script.ctrl_points {
        check(point.row, "control point", point.image1, count)?;
        check(point.row, "control point", point.image2, count)?;
    }
    for mask in &script.masks {
        check(mask.row, "mask", mask.image, count)?;
    }
    Ok(())
}
