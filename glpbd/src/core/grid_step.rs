use glam::Vec3;

use crate::{Error, Result};

/// Probe spacing along each axis.
///
/// Every component is finite and strictly positive, so the cell count
/// division can never divide by zero.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStep(Vec3);

impl GridStep {
    /// 1000 units per axis.
    pub const COARSE: GridStep = GridStep(Vec3::new(1000.0, 1000.0, 1000.0));

    pub fn new(step: Vec3) -> Result<Self> {
        if !step.is_finite() || !step.cmpgt(Vec3::ZERO).all() {
            return Err(Error::InvalidConfiguration(format!(
                "grid step must be positive on every axis, got {step}"
            )));
        }

        Ok(Self(step))
    }

    #[must_use]
    #[inline(always)]
    pub const fn as_vec3(&self) -> Vec3 {
        self.0
    }
}

impl Default for GridStep {
    fn default() -> Self {
        Self::COARSE
    }
}

impl From<GridStep> for Vec3 {
    #[inline]
    fn from(step: GridStep) -> Vec3 {
        step.0
    }
}

impl TryFrom<Vec3> for GridStep {
    type Error = Error;

    fn try_from(step: Vec3) -> Result<Self> {
        Self::new(step)
    }
}

impl std::fmt::Display for GridStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let step = GridStep::new(Vec3::new(100.0, 50.0, 25.0)).unwrap();
        assert_eq!(step.as_vec3(), Vec3::new(100.0, 50.0, 25.0));
    }

    #[test]
    fn test_coarse_default() {
        assert_eq!(GridStep::default(), GridStep::COARSE);
        assert_eq!(Vec3::from(GridStep::COARSE), Vec3::splat(1000.0));
    }

    #[test]
    fn test_zero_component() {
        let result = GridStep::new(Vec3::new(100.0, 0.0, 100.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_negative_component() {
        let result = GridStep::try_from(Vec3::new(-1.0, 1.0, 1.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_non_finite_component() {
        assert!(GridStep::new(Vec3::new(f32::NAN, 1.0, 1.0)).is_err());
        assert!(GridStep::new(Vec3::new(1.0, f32::INFINITY, 1.0)).is_err());
    }
}
