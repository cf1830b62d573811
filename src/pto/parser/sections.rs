//! Reduction routines, one per section keyword
//!
//! Each routine consumes the entries of a single line in whatever order they
//! appear and stores them on the record the parser created for that line.
//! Parameters a routine does not know are handed back as unmatched so the
//! caller can keep their source text.

use crate::pto::error::Diagnostic;
use crate::pto::script::{
    geometry, vignetting, CtrlPointSpec, ImageSpec, MaskSpec, OptimizeSpec, PanoSpec,
};

use super::cursor::{Entry, EntryValue};

/// What a reducer did with an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reduced {
    Stored,
    Unmatched,
}

/// Bit depth codes stored for the `T` key of the `p` line
pub(crate) fn bit_depth_code(name: &str) -> Option<i32> {
    match name {
        "UINT8" => Some(0),
        "UINT16" => Some(1),
        "FLOAT" => Some(2),
        _ => None,
    }
}

pub(crate) fn reduce_project(pano: &mut PanoSpec, entry: &Entry) -> Result<Reduced, Diagnostic> {
    match entry.key {
        "w" => pano.width = entry.integer()?,
        "h" => pano.height = entry.integer()?,
        "f" => pano.projection = entry.integer()?,
        "v" => pano.hfov = entry.float()?,
        "n" => pano.output_format = Some(entry.string()?.to_string()),
        "E" => pano.exposure = entry.float()?,
        "R" => pano.dynamic_range_mode = entry.integer()?,
        "T" => {
            let name = entry.string()?;
            pano.bit_depth = bit_depth_code(name).ok_or_else(|| {
                Diagnostic::new(
                    entry.key_span.start..entry.key_span.start + entry.raw.len(),
                    format!("unknown bit depth '{}'", name),
                )
            })?;
        }
        "S" => pano.crop = entry.crop()?,
        "k" => pano.photometric_reference = entry.integer()?,
        "P" => pano.projection_parms = entry.quoted_numbers()?,
        _ => return Ok(Reduced::Unmatched),
    }
    Ok(Reduced::Stored)
}

pub(crate) fn reduce_image(image: &mut ImageSpec, entry: &Entry) -> Result<Reduced, Diagnostic> {
    match entry.key {
        "w" => image.width = entry.integer()?,
        "h" => image.height = entry.integer()?,
        "f" => image.projection = entry.integer()?,
        "v" => image.hfov = entry.linked_float()?,
        "y" => image.yaw = entry.float()?,
        "p" => image.pitch = entry.float()?,
        "r" => image.roll = entry.float()?,
        "a" => image.geometry[geometry::A] = entry.linked_float()?,
        "b" => image.geometry[geometry::B] = entry.linked_float()?,
        "c" => image.geometry[geometry::C] = entry.linked_float()?,
        "d" => image.geometry[geometry::D] = entry.linked_float()?,
        "e" => image.geometry[geometry::E] = entry.linked_float()?,
        "g" => image.geometry[geometry::SHEAR_X] = entry.linked_float()?,
        "t" => image.geometry[geometry::SHEAR_Y] = entry.linked_float()?,
        "Eev" => image.exposure = entry.linked_float()?,
        "Er" => image.wb_red = entry.linked_float()?,
        "Eb" => image.wb_blue = entry.linked_float()?,
        "Ra" => image.photometric[0] = entry.linked_float()?,
        "Rb" => image.photometric[1] = entry.linked_float()?,
        "Rc" => image.photometric[2] = entry.linked_float()?,
        "Rd" => image.photometric[3] = entry.linked_float()?,
        "Re" => image.photometric[4] = entry.linked_float()?,
        "Vm" => image.vignetting_mode = entry.linked_integer()?,
        "Va" => image.vignetting[vignetting::A] = entry.linked_float()?,
        "Vb" => image.vignetting[vignetting::B] = entry.linked_float()?,
        "Vc" => image.vignetting[vignetting::C] = entry.linked_float()?,
        "Vd" => image.vignetting[vignetting::D] = entry.linked_float()?,
        "Vx" => image.vignetting[vignetting::X] = entry.linked_float()?,
        "Vy" => image.vignetting[vignetting::Y] = entry.linked_float()?,
        "Vf" => image.flat_field = Some(entry.string()?.to_string()),
        "TrX" => image.camera_position[0] = entry.float()?,
        "TrY" => image.camera_position[1] = entry.float()?,
        "TrZ" => image.camera_position[2] = entry.float()?,
        "Tpy" => {
            image.plane_rotation[0] = entry.float()?;
            image.has_plane_rotation = true;
        }
        "Tpp" => {
            image.plane_rotation[1] = entry.float()?;
            image.has_plane_rotation = true;
        }
        "S" => image.crop = entry.crop()?,
        "j" => image.stack = entry.linked_integer()?,
        "n" => image.name = entry.string()?.to_string(),
        _ => return Ok(Reduced::Unmatched),
    }
    Ok(Reduced::Stored)
}

pub(crate) fn reduce_optimize(
    optimize: &mut OptimizeSpec,
    entry: &Entry,
) -> Result<Reduced, Diagnostic> {
    match entry.key {
        "g" => optimize.gamma = entry.float()?,
        "i" => optimize.interpolator = entry.integer()?,
        "f" => optimize.speed_up = entry.integer()?,
        "m" => optimize.huber_sigma = entry.float()?,
        "p" => optimize.photometric_huber_sigma = entry.float()?,
        _ => return Ok(Reduced::Unmatched),
    }
    Ok(Reduced::Stored)
}

/// Name and image index of one optimizer variable
pub(crate) fn optimizer_variable<'a>(entry: &Entry<'a>) -> Result<(&'a str, usize), Diagnostic> {
    match entry.value {
        EntryValue::Reference(_, ref span) => Err(Diagnostic::new(
            span.clone(),
            format!("variable '{}' takes an image index, not a reference", entry.key),
        )),
        _ => Ok((entry.key, entry.integer()?)),
    }
}

pub(crate) fn reduce_control_point(
    point: &mut CtrlPointSpec,
    entry: &Entry,
) -> Result<Reduced, Diagnostic> {
    match entry.key {
        "n" => point.image1 = entry.integer()?,
        "N" => point.image2 = entry.integer()?,
        "x" => point.p1.x = entry.float()?,
        "y" => point.p1.y = entry.float()?,
        "X" => point.p2.x = entry.float()?,
        "Y" => point.p2.y = entry.float()?,
        "t" => point.kind = entry.integer()?,
        _ => return Ok(Reduced::Unmatched),
    }
    Ok(Reduced::Stored)
}

pub(crate) fn reduce_mask(mask: &mut MaskSpec, entry: &Entry) -> Result<Reduced, Diagnostic> {
    match entry.key {
        "i" => mask.image = entry.integer()?,
        "t" => mask.kind = entry.integer()?,
        "p" => {
            let numbers = entry.quoted_numbers()?;
            if numbers.len() % 2 != 0 {
                return Err(Diagnostic::new(
                    entry.key_span.start..entry.key_span.start + entry.raw.len(),
                    "mask polygon has an odd number of coordinates",
                ));
            }
            // polygon vertices are kept as whole pixels
            mask.points = numbers
                .chunks_exact(2)
                .map(|pair| (pair[0] as i32, pair[1] as i32))
                .collect();
        }
        _ => return Ok(Reduced::Unmatched),
    }
    Ok(Reduced::Stored)
}
