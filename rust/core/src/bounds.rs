// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Horizontal (X/Z) extents of a scan point cloud

use serde::{Deserialize, Serialize};

/// Footprint bounds in f64 precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintBounds {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
    /// Number of points sampled
    pub sample_count: usize,
}

impl FootprintBounds {
    /// Create new bounds initialized to invalid state
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            min_z: f64::MAX,
            max_x: f64::MIN,
            max_z: f64::MIN,
            sample_count: 0,
        }
    }

    /// Check if bounds are valid (at least one point added)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.sample_count > 0
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand(&mut self, x: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.min_z = self.min_z.min(z);
        self.max_x = self.max_x.max(x);
        self.max_z = self.max_z.max(z);
        self.sample_count += 1;
    }

    /// Minimum corner as (x, z)
    #[inline]
    pub fn min(&self) -> (f64, f64) {
        (self.min_x, self.min_z)
    }

    /// Maximum corner as (x, z)
    #[inline]
    pub fn max(&self) -> (f64, f64) {
        (self.max_x, self.max_z)
    }

    /// Center of the footprint, origin when empty
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        if !self.is_valid() {
            return (0.0, 0.0);
        }
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Extent along X and Z
    #[inline]
    pub fn size(&self) -> (f64, f64) {
        if !self.is_valid() {
            return (0.0, 0.0);
        }
        (self.max_x - self.min_x, self.max_z - self.min_z)
    }
}

impl Default for FootprintBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<(f64, f64)> for FootprintBounds {
    fn extend<I: IntoIterator<Item = (f64, f64)>>(&mut self, iter: I) {
        for (x, z) in iter {
            self.expand(x, z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let bounds = FootprintBounds::new();
        assert!(!bounds.is_valid());
        assert_eq!(bounds.center(), (0.0, 0.0));
        assert_eq!(bounds.size(), (0.0, 0.0));
    }

    #[test]
    fn test_expand() {
        let mut bounds = FootprintBounds::new();
        bounds.expand(1.0, -2.0);
        bounds.expand(-3.0, 4.0);

        assert!(bounds.is_valid());
        assert_eq!(bounds.sample_count, 2);
        assert_eq!(bounds.min(), (-3.0, -2.0));
        assert_eq!(bounds.max(), (1.0, 4.0));
        assert_eq!(bounds.center(), (-1.0, 1.0));
        assert_eq!(bounds.size(), (4.0, 6.0));
    }

    #[test]
    fn test_extend_from_iterator() {
        let mut bounds = FootprintBounds::default();
        bounds.extend(vec![(0.0, 0.0), (10.0, 5.0), (5.0, 10.0)]);
        assert_eq!(bounds.sample_count, 3);
        assert_eq!(bounds.max(), (10.0, 10.0));
    }
}
