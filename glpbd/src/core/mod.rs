mod aabb;
mod grid_step;
mod probe_box;
mod probe_index;

pub use aabb::{BoundingBox, compute_bounds};
pub use grid_step::GridStep;
pub use probe_box::ProbeBox;
pub use probe_index::{
    PROBES_PER_CELL, cells_per_axis, pack_indices, probe_cell_count, unpack_indices,
};
