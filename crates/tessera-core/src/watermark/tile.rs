//! Tiling geometry and the intermediate overlay layer.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::GeometryError;

/// Tiles per row, independent of the source size.
pub const TILE_COLUMNS: u32 = 10;

/// Grid of square cells the mark is stamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Edge length of one cell: `floor(source_width / 10)`.
    pub cell: u32,
    pub columns: u32,
    /// Rows whose origin lies within the source height, inclusive.
    pub rows: u32,
}

impl TileGrid {
    /// Lay out the grid for a `width x height` source.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateTile` when the source is narrower
    /// than [`TILE_COLUMNS`] pixels and the cell would be empty.
    pub fn for_source(width: u32, height: u32) -> Result<Self, GeometryError> {
        let cell = width / TILE_COLUMNS;
        if cell == 0 {
            return Err(GeometryError::DegenerateTile {
                width,
                min: TILE_COLUMNS,
            });
        }
        Ok(Self {
            cell,
            columns: TILE_COLUMNS,
            rows: height / cell + 1,
        })
    }

    /// Top-left corner of every cell, row by row.
    pub fn origins(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| (col * self.cell, row * self.cell))
        })
    }
}

/// Fit `mark` inside a `cell x cell` box, preserving its aspect ratio.
///
/// Marks that already fit are returned unchanged; larger ones are downscaled
/// with Lanczos3.
pub fn fit_mark(mark: &RgbaImage, cell: u32) -> RgbaImage {
    let (w, h) = mark.dimensions();
    if w <= cell && h <= cell {
        return mark.clone();
    }
    let (fit_w, fit_h) = fit_dimensions(w, h, cell);
    imageops::resize(mark, fit_w, fit_h, FilterType::Lanczos3)
}

/// Largest dimensions with the aspect ratio of `width x height` inside a
/// `max_edge` square.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    if width >= height {
        let new_height = (height as f64 * max_edge as f64 / width as f64).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (width as f64 * max_edge as f64 / height as f64).round() as u32;
        (new_width.max(1), max_edge)
    }
}

/// Build a transparent `width x height` layer with `tile` stamped at every
/// grid origin using "over" compositing. Tiles are clipped at the edges.
pub fn build_layer(width: u32, height: u32, tile: &RgbaImage, grid: &TileGrid) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    for (x, y) in grid.origins() {
        imageops::overlay(&mut layer, tile, x as i64, y as i64);
    }
    layer
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ten columns with cell floor(W/10), rows reach the height.
        #[test]
        fn test_prop_grid_shape(width in 10u32..=20_000, height in 1u32..=20_000) {
            let grid = TileGrid::for_source(width, height).unwrap();

            prop_assert_eq!(grid.columns, 10);
            prop_assert_eq!(grid.cell, width / 10);
            prop_assert!((grid.rows - 1) * grid.cell <= height);
            prop_assert!(grid.rows * grid.cell > height);
        }

        /// Property: a fitted mark always lies inside the cell.
        #[test]
        fn test_prop_fit_within_cell(w in 1u32..=64, h in 1u32..=64, cell in 1u32..=32) {
            let mark = RgbaImage::new(w, h);
            let fitted = fit_mark(&mark, cell);

            prop_assert!(fitted.width() <= cell.max(1));
            prop_assert!(fitted.height() <= cell.max(1));
            prop_assert!(fitted.width() >= 1 && fitted.height() >= 1);
        }
    }
}
