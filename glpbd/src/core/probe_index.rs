use glam::UVec3;

use crate::{Error, Result, param::consts::MAX_DATA_OFFSET};

use super::{BoundingBox, GridStep};

/// Every grid cell stores its eight corner probes.
pub const PROBES_PER_CELL: usize = 8;

/// Largest probe index buffer a box may hold. The packed buffer takes two
/// bytes per index and the data buffer after it must stay within the 24-bit
/// data offset of the parameter format.
pub const MAX_PROBE_INDICES: usize = MAX_DATA_OFFSET;

/// Number of grid cells along each axis, rounding partial cells up.
pub fn cells_per_axis(bounds: &BoundingBox, step: GridStep) -> Result<UVec3> {
    let step = step.as_vec3();
    debug_assert!(step.cmpgt(glam::Vec3::ZERO).all(), "Grid step must be positive");

    let cells = (bounds.size() / step).ceil();

    if !cells.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "bounds {bounds} are not finite"
        )));
    }

    if cells.max_element() > u32::MAX as f32 {
        return Err(Error::DocumentTooLarge(format!(
            "{cells} grid cells per axis exceed 32 bits"
        )));
    }

    Ok(cells.max(glam::Vec3::ZERO).as_uvec3())
}

/// Total number of probe indices covering `bounds` at the given spacing.
pub fn probe_cell_count(bounds: &BoundingBox, step: GridStep) -> Result<usize> {
    let cells = cells_per_axis(bounds, step)?;

    let count = (cells.x as usize)
        .checked_mul(cells.y as usize)
        .and_then(|count| count.checked_mul(cells.z as usize))
        .and_then(|count| count.checked_mul(PROBES_PER_CELL))
        .filter(|&count| count <= MAX_PROBE_INDICES)
        .ok_or_else(|| {
            Error::DocumentTooLarge(format!(
                "{cells} grid cells need more than {MAX_PROBE_INDICES} probe indices"
            ))
        })?;

    Ok(count)
}

/// Packs pairs of 16-bit indices into 32-bit words, first value in the high half.
///
/// An odd trailing index has no partner and is dropped.
pub fn pack_indices(values: &[u16]) -> Vec<u32> {
    if values.len() % 2 != 0 {
        log::warn!(
            "Dropping trailing probe index of an odd-length buffer ({} indices)",
            values.len()
        );
    }

    values
        .chunks_exact(2)
        .map(|pair| (u32::from(pair[0]) << 16) | u32::from(pair[1]))
        .collect()
}

/// Splits each word back into two indices, high half first.
pub fn unpack_indices(words: &[u32]) -> Vec<u16> {
    words
        .iter()
        .flat_map(|&word| [(word >> 16) as u16, (word & 0xFFFF) as u16])
        .collect()
}
