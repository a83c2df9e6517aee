//! Spherical harmonic probe data.
//!
//! A probe stores 27 floats: nine second order coefficients per color
//! channel, channel-major (`R[0..9], G[9..18], B[18..27]`), each channel
//! ordered `L00, L1-1, L10, L11, L2-2, L2-1, L20, L21, L22`.
//!
//! Generation only ever writes the constant `L00` term. The shader layout
//! conversion and [`evaluate`] mirror what the engine does with the buffer
//! at runtime.

use glam::{Vec3, Vec4};

pub const COEFFICIENTS_PER_CHANNEL: usize = 9;
pub const CHANNELS: usize = 3;
pub const FLOATS_PER_PROBE: usize = COEFFICIENTS_PER_CHANNEL * CHANNELS;

/// Coefficients of a single probe.
pub type ShBuffer = [f32; FLOATS_PER_PROBE];

/// Number of `Vec4` registers in the shader side layout.
pub const SHADER_VECTORS: usize = 7;

// Basis normalisation constants folded in by the engine.
const L1_SCALE: f32 = 0.3253434;
const L00_SCALE: f32 = 0.2817569;
const L20_BIAS: f32 = 0.07875311;
const L2_SCALE: f32 = 0.2728088;
const L20_SCALE: f32 = 0.2362593;
const L22_SCALE: f32 = 0.1364044;

/// Encodes a constant color: only the `L00` term of each channel is set.
pub fn encode_constant_color(color: Vec3) -> ShBuffer {
    let mut buffer = [0.0; FLOATS_PER_PROBE];
    buffer[0] = color.x;
    buffer[COEFFICIENTS_PER_CHANNEL] = color.y;
    buffer[COEFFICIENTS_PER_CHANNEL * 2] = color.z;
    buffer
}

/// Reads back the `L00` term of each channel.
pub fn decode_constant_color(buffer: &ShBuffer) -> Vec3 {
    Vec3::new(
        buffer[0],
        buffer[COEFFICIENTS_PER_CHANNEL],
        buffer[COEFFICIENTS_PER_CHANNEL * 2],
    )
}

/// Packs nine RGB coefficients into the channel-major probe layout.
pub fn coefficients_to_buffer(coefficients: &[Vec3; COEFFICIENTS_PER_CHANNEL]) -> ShBuffer {
    let mut buffer = [0.0; FLOATS_PER_PROBE];

    for (i, coefficient) in coefficients.iter().enumerate() {
        buffer[i] = coefficient.x;
        buffer[COEFFICIENTS_PER_CHANNEL + i] = coefficient.y;
        buffer[COEFFICIENTS_PER_CHANNEL * 2 + i] = coefficient.z;
    }

    buffer
}

/// Converts a probe buffer into the seven registers consumed by [`evaluate`].
///
/// Registers 0..3 hold the linear terms plus the biased constant of the R, G
/// and B channels, registers 3..6 the first four quadratic terms, and
/// register 6 the `L22` term of each channel.
pub fn convert_to_shader_layout(buffer: &ShBuffer) -> [Vec4; SHADER_VECTORS] {
    let mut registers = [Vec4::ZERO; SHADER_VECTORS];

    for channel in 0..CHANNELS {
        let start = channel * COEFFICIENTS_PER_CHANNEL;
        let c = &buffer[start..start + COEFFICIENTS_PER_CHANNEL];

        registers[channel] = Vec4::new(
            c[3] * L1_SCALE,
            c[1] * L1_SCALE,
            c[2] * L1_SCALE,
            c[0] * L00_SCALE - c[6] * L20_BIAS,
        );
        registers[CHANNELS + channel] = Vec4::new(
            c[4] * L2_SCALE,
            c[5] * L2_SCALE,
            c[6] * L20_SCALE,
            c[7] * L2_SCALE,
        );
    }

    let last = COEFFICIENTS_PER_CHANNEL - 1;
    registers[6] = Vec4::new(
        buffer[last] * L22_SCALE,
        buffer[COEFFICIENTS_PER_CHANNEL + last] * L22_SCALE,
        buffer[COEFFICIENTS_PER_CHANNEL * 2 + last] * L22_SCALE,
        1.0,
    );

    registers
}

/// Shades a surface normal with shader layout registers, clamped to non-negative.
pub fn evaluate(normal: Vec3, registers: &[Vec4; SHADER_VECTORS]) -> Vec3 {
    let n = normal.extend(1.0);

    let x0 = Vec3::new(
        registers[0].dot(n),
        registers[1].dot(n),
        registers[2].dot(n),
    );

    let quadratic = Vec4::new(n.x * n.y, n.y * n.z, n.z * n.x, n.z * n.z);
    let x1 = Vec3::new(
        registers[3].dot(quadratic),
        registers[4].dot(quadratic),
        registers[5].dot(quadratic),
    );

    let x2 = registers[6].truncate() * (n.x * n.x - n.y * n.y);

    (x0 + x1 + x2).max(Vec3::ZERO)
}
