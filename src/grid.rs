//! Grid descriptor and index math shared by kernels, images, and the engine.

use serde::{Deserialize, Serialize};

use crate::error::{PhaseSymmetryError, PhaseSymmetryResult};

/// Describes the sampling grid an image or frequency-domain kernel lives on.
///
/// Every kernel in a filter bank and every image filtered with that bank must
/// share an identical descriptor; the engine rejects mismatches before doing
/// any transform work.
///
/// # Examples
///
/// ```
/// use phasesym::GridDescriptor;
///
/// let grid = GridDescriptor::isotropic(&[64, 64]).unwrap();
/// assert_eq!(grid.dimension(), 2);
/// assert_eq!(grid.pixel_count(), 4096);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridDescriptor {
    /// Extent per dimension.
    size: Vec<usize>,
    /// Physical spacing between samples per dimension.
    spacing: Vec<f64>,
    /// Physical coordinates of index zero per dimension.
    origin: Vec<f64>,
    /// Direction cosines, flattened row-major D x D.
    direction: Vec<f64>,
}

impl GridDescriptor {
    /// Create a descriptor with unit spacing, zero origin, and identity
    /// direction.
    pub fn isotropic(size: &[usize]) -> PhaseSymmetryResult<Self> {
        let dims = size.len();
        Self::new(
            size.to_vec(),
            vec![1.0; dims],
            vec![0.0; dims],
            identity_direction(dims),
        )
    }

    /// Create a descriptor from explicit metadata.
    pub fn new(
        size: Vec<usize>,
        spacing: Vec<f64>,
        origin: Vec<f64>,
        direction: Vec<f64>,
    ) -> PhaseSymmetryResult<Self> {
        let dims = size.len();
        if dims == 0 {
            return Err(PhaseSymmetryError::configuration(
                "size",
                "[]",
                "at least one dimension",
            ));
        }
        if size.iter().any(|&extent| extent == 0) {
            return Err(PhaseSymmetryError::configuration(
                "size",
                format!("{size:?}"),
                "every extent > 0",
            ));
        }
        if spacing.len() != dims || origin.len() != dims {
            return Err(PhaseSymmetryError::configuration(
                "spacing/origin",
                format!("{}/{}", spacing.len(), origin.len()),
                format!("length {dims} matching size"),
            ));
        }
        if spacing.iter().any(|&s| !s.is_finite() || s <= 0.0) {
            return Err(PhaseSymmetryError::configuration(
                "spacing",
                format!("{spacing:?}"),
                "every spacing finite and > 0",
            ));
        }
        if direction.len() != dims * dims {
            return Err(PhaseSymmetryError::configuration(
                "direction",
                format!("{} entries", direction.len()),
                format!("{dims}x{dims} row-major matrix"),
            ));
        }
        Ok(Self {
            size,
            spacing,
            origin,
            direction,
        })
    }

    pub fn dimension(&self) -> usize {
        self.size.len()
    }

    pub fn size(&self) -> &[usize] {
        &self.size
    }

    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    pub fn origin(&self) -> &[f64] {
        &self.origin
    }

    pub fn direction(&self) -> &[f64] {
        &self.direction
    }

    /// Total number of samples on the grid.
    pub fn pixel_count(&self) -> usize {
        self.size.iter().product()
    }

    /// Grid center, size/2 per axis. Kernel generation measures frequency
    /// radius and orientation from this point.
    pub fn center(&self) -> Vec<f64> {
        self.size.iter().map(|&extent| extent as f64 / 2.0).collect()
    }

    /// Physical coordinate of a grid index.
    pub fn physical_point(&self, index: &[usize], out: &mut [f64]) {
        for ((dst, &i), (&sp, &or)) in out
            .iter_mut()
            .zip(index.iter())
            .zip(self.spacing.iter().zip(self.origin.iter()))
        {
            *dst = or + i as f64 * sp;
        }
    }
}

fn identity_direction(dims: usize) -> Vec<f64> {
    let mut direction = vec![0.0; dims * dims];
    for i in 0..dims {
        direction[i * dims + i] = 1.0;
    }
    direction
}

/// Convert a row-major linear offset into a multi-index.
pub fn unravel_index(mut linear: usize, shape: &[usize], out: &mut [usize]) {
    for (slot, &extent) in out.iter_mut().zip(shape.iter()).rev() {
        *slot = linear % extent;
        linear /= extent;
    }
}

/// Convert a multi-index into a row-major linear offset.
pub fn ravel_index(index: &[usize], shape: &[usize]) -> usize {
    let mut linear = 0;
    for (&i, &extent) in index.iter().zip(shape.iter()) {
        linear = linear * extent + i;
    }
    linear
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isotropic_has_unit_metadata() {
        let grid = GridDescriptor::isotropic(&[8, 16]).unwrap();
        assert_eq!(grid.size(), &[8, 16]);
        assert_eq!(grid.spacing(), &[1.0, 1.0]);
        assert_eq!(grid.origin(), &[0.0, 0.0]);
        assert_eq!(grid.direction(), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(grid.pixel_count(), 128);
    }

    #[test]
    fn center_is_half_extent() {
        let grid = GridDescriptor::isotropic(&[10, 20, 30]).unwrap();
        assert_eq!(grid.center(), vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn rejects_zero_extent() {
        assert!(GridDescriptor::isotropic(&[4, 0]).is_err());
    }

    #[test]
    fn rejects_empty_size() {
        assert!(GridDescriptor::isotropic(&[]).is_err());
    }

    #[test]
    fn rejects_mismatched_spacing() {
        let result = GridDescriptor::new(
            vec![4, 4],
            vec![1.0],
            vec![0.0, 0.0],
            vec![1.0, 0.0, 0.0, 1.0],
        );
        assert!(result.is_err());
    }

    #[test]
    fn ravel_unravel_round_trip() {
        let shape = [3, 4, 5];
        let mut index = [0usize; 3];
        for linear in 0..60 {
            unravel_index(linear, &shape, &mut index);
            assert_eq!(ravel_index(&index, &shape), linear);
        }
    }

    #[test]
    fn unravel_is_row_major() {
        let shape = [2, 3];
        let mut index = [0usize; 2];
        unravel_index(4, &shape, &mut index);
        assert_eq!(index, [1, 1]);
    }

    #[test]
    fn physical_point_applies_spacing_and_origin() {
        let grid = GridDescriptor::new(
            vec![4, 4],
            vec![0.5, 2.0],
            vec![10.0, -1.0],
            vec![1.0, 0.0, 0.0, 1.0],
        )
        .unwrap();
        let mut point = [0.0; 2];
        grid.physical_point(&[2, 3], &mut point);
        assert_eq!(point, [11.0, 5.0]);
    }
}
