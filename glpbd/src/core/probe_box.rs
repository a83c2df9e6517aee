use glam::Vec3;

use crate::{
    Result,
    sh::{self, FLOATS_PER_PROBE},
};

use super::{BoundingBox, GridStep, probe_cell_count};

/// Contents of one probe grid region before it is encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeBox {
    pub index: i32,
    pub bounds: BoundingBox,
    pub step: GridStep,
    /// One 16-bit probe index per grid corner.
    pub index_buffer: Vec<u16>,
    /// [`FLOATS_PER_PROBE`] coefficients per probe.
    pub sh_buffer: Vec<f32>,
}

impl ProbeBox {
    /// A box whose every grid corner points at probe 0, a single probe lit
    /// with the constant `color`.
    ///
    /// No per-cell probe lookup is computed: the index buffer is all zeros.
    /// Bounds needing more indices than the format can address are
    /// rejected before anything is allocated.
    pub fn constant_color(
        index: i32,
        bounds: BoundingBox,
        step: GridStep,
        color: Vec3,
    ) -> Result<Self> {
        let index_count = probe_cell_count(&bounds, step)?;

        Ok(Self {
            index,
            bounds,
            step,
            index_buffer: vec![0; index_count],
            sh_buffer: sh::encode_constant_color(color).to_vec(),
        })
    }

    pub fn probe_count(&self) -> usize {
        debug_assert_eq!(self.sh_buffer.len() % FLOATS_PER_PROBE, 0);
        self.sh_buffer.len() / FLOATS_PER_PROBE
    }

    pub fn name(&self) -> String {
        format!("b_{}", self.index)
    }
}
