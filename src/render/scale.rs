//! Color buckets for radar figures.
//!
//! Values are mapped to palette entries through a list of bucket boundaries:
//! bucket `i` holds values in `[b[i], b[i + 1])`. When the palette has more
//! colors than there are buckets, bucket indices are spread evenly over the
//! palette so that the last bucket always gets the last color.

use crate::render::palette::radar_palette;
use crate::types::output_units::OutputUnits;
use image::Rgba;

/// Evenly spaced values in `[start, stop)`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// Bucket boundaries for reflectivity (dBZ), 31 values from 6 to 76.
pub fn dbz_bounds() -> Vec<f64> {
    [
        arange(6.0, 18.0, 2.0),
        arange(18.0, 30.0, 2.0),
        arange(30.0, 42.0, 2.0),
        arange(42.0, 56.0, 2.0),
        arange(56.0, 80.0, 4.0),
    ]
    .concat()
}

/// Bucket boundaries for rain rate (mm/h), 30 values from 0.01 to 500.
///
/// 0.5 appears twice; the empty bucket between the two is never hit.
pub fn rainrate_bounds() -> Vec<f64> {
    [
        linspace(0.01, 0.5, 6),
        linspace(0.5, 5.0, 6),
        linspace(6.0, 30.0, 6),
        linspace(31.0, 150.0, 6),
        linspace(151.0, 500.0, 6),
    ]
    .concat()
}

/// Maps values onto palette indices through bucket boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryNorm {
    boundaries: Vec<f64>,
    ncolors: usize,
}

impl BoundaryNorm {
    /// Returns `None` with fewer than two boundaries or an empty palette.
    pub fn new(boundaries: Vec<f64>, ncolors: usize) -> Option<Self> {
        (boundaries.len() >= 2 && ncolors > 0).then_some(Self {
            boundaries,
            ncolors,
        })
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Palette index for `value`.
    ///
    /// Values below the first boundary take the first color, values at or
    /// above the last boundary the last color. NaN has no color.
    pub fn color_index(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let first = self.boundaries[0];
        let last = self.boundaries[self.boundaries.len() - 1];
        if value < first {
            return Some(0);
        }
        if value >= last {
            return Some(self.ncolors - 1);
        }

        let bucket = self.boundaries.partition_point(|&b| b <= value) - 1;
        Some(self.bucket_color_index(bucket))
    }

    /// Number of buckets between the boundaries.
    pub fn regions(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Palette index of bucket `bucket`.
    pub fn bucket_color_index(&self, bucket: usize) -> usize {
        let regions = self.regions();
        let index = if self.ncolors > regions {
            if regions == 1 {
                (self.ncolors - 1) / 2
            } else {
                (bucket as f64 * (self.ncolors - 1) as f64 / (regions - 1) as f64) as usize
            }
        } else {
            bucket
        };
        index.min(self.ncolors - 1)
    }
}

/// Boundaries plus palette: the full value-to-color mapping of a figure.
#[derive(Debug, Clone)]
pub struct ColorScale {
    norm: BoundaryNorm,
    palette: Vec<Rgba<u8>>,
}

impl ColorScale {
    pub fn new(boundaries: Vec<f64>, palette: Vec<Rgba<u8>>) -> Option<Self> {
        let norm = BoundaryNorm::new(boundaries, palette.len())?;
        Some(Self { norm, palette })
    }

    /// The radar palette with the boundaries for `units`.
    pub fn for_units(units: OutputUnits) -> Self {
        let boundaries = match units {
            OutputUnits::Dbz => dbz_bounds(),
            OutputUnits::RainRate => rainrate_bounds(),
        };
        let palette = radar_palette();
        Self {
            norm: BoundaryNorm {
                boundaries,
                ncolors: palette.len(),
            },
            palette,
        }
    }

    pub fn boundaries(&self) -> &[f64] {
        self.norm.boundaries()
    }

    pub fn palette(&self) -> &[Rgba<u8>] {
        &self.palette
    }

    /// Color of a cell; masked cells (`None`) and NaN get no color.
    pub fn color(&self, value: Option<f64>) -> Option<Rgba<u8>> {
        let index = self.norm.color_index(value?)?;
        self.palette.get(index).copied()
    }

    /// One color per bucket, lowest bucket first, as shown on the colorbar.
    pub fn bucket_colors(&self) -> Vec<Rgba<u8>> {
        (0..self.norm.regions())
            .filter_map(|bucket| self.palette.get(self.norm.bucket_color_index(bucket)).copied())
            .collect()
    }
}
