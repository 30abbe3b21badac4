//! Square, padded axis limits for point clouds

use ndarray::ArrayView2;

use crate::error::ToolkitError;

/// Relative padding applied to the bounding-box radius by default.
pub const DEFAULT_PAD: f64 = 0.15;

/// Per-axis display intervals, always square and centered on the cloud's
/// bounding-box center so scatter panels keep an undistorted aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl AxisLimits {
    /// The fixed fallback box [-1, 1] × [-1, 1].
    pub fn unit() -> Self {
        Self {
            x: (-1.0, 1.0),
            y: (-1.0, 1.0),
        }
    }

    /// Compute limits from a point cloud.
    ///
    /// Absent or empty input yields the unit box. Only the first two columns
    /// are considered; fewer than two columns is a shape error. The larger
    /// per-axis half-span becomes a uniform radius (1.0 when all points
    /// coincide), inflated by `1 + pad`.
    pub fn from_points(
        points: Option<ArrayView2<'_, f64>>,
        pad: f64,
    ) -> Result<Self, ToolkitError> {
        let Some(pts) = points else {
            return Ok(Self::unit());
        };
        if pts.is_empty() {
            return Ok(Self::unit());
        }
        if pts.ncols() < 2 {
            return Err(ToolkitError::InvalidPointShape(pts.shape().to_vec()));
        }

        let mut mins = [f64::INFINITY; 2];
        let mut maxs = [f64::NEG_INFINITY; 2];
        for row in pts.rows() {
            for axis in 0..2 {
                mins[axis] = mins[axis].min(row[axis]);
                maxs[axis] = maxs[axis].max(row[axis]);
            }
        }

        let center = [
            0.5 * (mins[0] + maxs[0]),
            0.5 * (mins[1] + maxs[1]),
        ];
        let half_span = [
            0.5 * (maxs[0] - mins[0]),
            0.5 * (maxs[1] - mins[1]),
        ];

        let mut radius = half_span[0].max(half_span[1]);
        if radius <= 0.0 {
            radius = 1.0;
        }
        radius *= 1.0 + pad;

        Ok(Self {
            x: (center[0] - radius, center[0] + radius),
            y: (center[1] - radius, center[1] + radius),
        })
    }

    /// Compute limits from a single flat point.
    ///
    /// Errors unless the slice has exactly two elements.
    pub fn from_flat(point: &[f64], pad: f64) -> Result<Self, ToolkitError> {
        if point.len() != 2 {
            return Err(ToolkitError::InvalidPointShape(vec![point.len()]));
        }
        let as_row = ndarray::ArrayView2::from_shape((1, 2), point)
            .map_err(|_| ToolkitError::InvalidPointShape(vec![point.len()]))?;
        Self::from_points(Some(as_row), pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_absent_and_empty_are_unit_box() {
        assert_eq!(
            AxisLimits::from_points(None, DEFAULT_PAD).unwrap(),
            AxisLimits::unit()
        );

        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            AxisLimits::from_points(Some(empty.view()), DEFAULT_PAD).unwrap(),
            AxisLimits::unit()
        );
    }

    #[test]
    fn test_limits_are_square_and_centered() {
        let pts = array![[0.0, 0.0], [4.0, 1.0], [2.0, -1.0]];
        let limits = AxisLimits::from_points(Some(pts.view()), DEFAULT_PAD).unwrap();

        let width_x = limits.x.1 - limits.x.0;
        let width_y = limits.y.1 - limits.y.0;
        assert!((width_x - width_y).abs() < 1e-12);

        // Centered on the bounding-box center (2, 0)
        assert!((0.5 * (limits.x.0 + limits.x.1) - 2.0).abs() < 1e-12);
        assert!((0.5 * (limits.y.0 + limits.y.1)).abs() < 1e-12);

        // Radius is the larger half-span (2.0) inflated by 1.15
        assert!((limits.x.1 - 2.0 - 2.0 * 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_points_get_unit_radius() {
        let pts = array![[3.0, 3.0], [3.0, 3.0]];
        let limits = AxisLimits::from_points(Some(pts.view()), 0.0).unwrap();
        assert_eq!(limits.x, (2.0, 4.0));
        assert_eq!(limits.y, (2.0, 4.0));
    }

    #[test]
    fn test_single_flat_point() {
        let limits = AxisLimits::from_flat(&[1.0, -1.0], 0.0).unwrap();
        assert_eq!(limits.x, (0.0, 2.0));
        assert_eq!(limits.y, (-2.0, 0.0));
    }

    #[test]
    fn test_bad_flat_shape_errors() {
        let err = AxisLimits::from_flat(&[1.0, 2.0, 3.0], DEFAULT_PAD).unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidPointShape(_)));
    }

    #[test]
    fn test_narrow_cloud_errors() {
        let pts = Array2::<f64>::zeros((3, 1));
        let err = AxisLimits::from_points(Some(pts.view()), DEFAULT_PAD).unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidPointShape(_)));
    }

    #[test]
    fn test_higher_dimensional_cloud_uses_first_two_columns() {
        let pts = array![[0.0, 0.0, 99.0], [2.0, 2.0, -99.0]];
        let limits = AxisLimits::from_points(Some(pts.view()), 0.0).unwrap();
        assert_eq!(limits.x, (0.0, 2.0));
        assert_eq!(limits.y, (0.0, 2.0));
    }
}
