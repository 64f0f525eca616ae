//! Pointer and scroll mapping.
//!
//! [`IconLayout`] models the geometry of the rendered pager icon — its pixel
//! size, outer padding, and inter-cell spacing — and resolves pointer
//! coordinates to grid cells ([`IconLayout::cell_at`]).  The same geometry
//! yields the per-cell pixel rectangles ([`IconLayout::cell_rect`]) that
//! external renderers draw, so the hit-test and the picture can never
//! disagree.
//!
//! [`step_from`] implements the scroll-wheel traversal: a 1-D walk over the
//! 2-D grid with wraparound at the edges.

use crate::config::Config;
use crate::event::{Edge, PanelGeometry, ScrollDirection};
use log::warn;

/// Geometry of the rendered pager icon, in pixels.
///
/// Every `cols × rows` grid divides the padded icon area into equal
/// continuous steps of `step_x × step_y`; the trailing `spacing` pixels of
/// each step form the gap between cells and belong to no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconLayout {
    /// Icon width.
    pub width: u32,
    /// Icon height.
    pub height: u32,
    /// Padding between the icon border and the outermost cells.
    pub padding: u32,
    /// Gap between adjacent cells.
    pub spacing: u32,
}

/// Rounded pixel rectangle of one cell, as a renderer should draw it.
///
/// `width`/`height` can come out non-positive when the spacing swallows a
/// whole step; renderers treat such rectangles as invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IconLayout {
    /// Derive the icon geometry from the host panel.
    ///
    /// A vertical panel (left/right edge) fixes the icon width to the panel
    /// thickness and scales the height by the configured aspect ratio; a
    /// horizontal panel does the reverse.  The panel thickness is
    /// lower-bounded at 16 pixels, and a non-positive aspect ratio falls
    /// back to 1.0 instead of producing degenerate geometry.
    pub fn from_panel(panel: &PanelGeometry, config: &Config) -> Self {
        let size = panel.size.max(16);
        let aspect = if config.aspect_ratio > 0.0 {
            config.aspect_ratio
        } else {
            warn!("non-positive aspect ratio {}, using 1.0", config.aspect_ratio);
            1.0
        };
        let (width, height) = match panel.edge {
            Edge::Left | Edge::Right => (size, (size as f64 * aspect) as u32),
            Edge::Top | Edge::Bottom => ((size as f64 / aspect) as u32, size),
        };
        Self {
            width,
            height,
            padding: config.padding,
            spacing: config.cell_spacing,
        }
    }

    /// Continuous cell step `(step_x, step_y)` for a `cols × rows` grid.
    ///
    /// Returns `None` when either step would fall below one pixel — the
    /// icon is too small to resolve (or draw) individual cells — or when
    /// the grid has no extent at all.
    pub fn steps(&self, cols: usize, rows: usize) -> Option<(f64, f64)> {
        if cols == 0 || rows == 0 {
            return None;
        }
        let span_x = self.width as f64 - 2.0 * self.padding as f64 + self.spacing as f64;
        let span_y = self.height as f64 - 2.0 * self.padding as f64 + self.spacing as f64;
        let step_x = span_x / cols as f64;
        let step_y = span_y / rows as f64;
        if step_x < 1.0 || step_y < 1.0 {
            return None;
        }
        Some((step_x, step_y))
    }

    /// Resolve icon-pixel coordinates to the cell under them.
    ///
    /// Returns `None` when the icon is too small to subdivide, when the
    /// point lies outside the grid area, or when it lands in the spacing
    /// gap between cells (a click on the gap must not activate anything).
    pub fn cell_at(&self, x: f64, y: f64, cols: usize, rows: usize) -> Option<(usize, usize)> {
        let (step_x, step_y) = self.steps(cols, rows)?;
        let fx = (x - self.padding as f64) / step_x;
        let fy = (y - self.padding as f64) / step_y;
        // Distance from the point to the end of its step; the trailing
        // `spacing` pixels of every step are the gap.
        let gap_x = (1.0 - fx + fx.floor()) * step_x;
        let gap_y = (1.0 - fy + fy.floor()) * step_y;
        let spacing = self.spacing as f64;
        let inside = fx >= 0.0 && fy >= 0.0 && fx < cols as f64 && fy < rows as f64;
        if inside && gap_x > spacing && gap_y > spacing {
            Some((fx as usize, fy as usize))
        } else {
            None
        }
    }

    /// Rounded pixel rectangle for the cell at `(col, row)`, or `None` when
    /// the coordinate is out of range or the icon is too small to draw.
    ///
    /// Positions are rounded per cell and the spacing is subtracted from the
    /// rounded span, so adjacent cells may differ by one pixel in size.
    pub fn cell_rect(&self, col: usize, row: usize, cols: usize, rows: usize) -> Option<CellRect> {
        if col >= cols || row >= rows {
            return None;
        }
        let (step_x, step_y) = self.steps(cols, rows)?;
        let xpos = self.padding as f64 + col as f64 * step_x;
        let ypos = self.padding as f64 + row as f64 * step_y;
        let x = xpos.round() as i32;
        let y = ypos.round() as i32;
        Some(CellRect {
            x,
            y,
            width: (xpos + step_x).round() as i32 - x - self.spacing as i32,
            height: (ypos + step_y).round() as i32 - y - self.spacing as i32,
        })
    }
}

/// Step from `(col, row)` one cell forward or backward through a
/// `cols × rows` grid, wrapping at the edges.
///
/// The walk advances down (or up) the current column first; stepping past
/// the last row wraps to the first row of the *next* column, and past the
/// first row to the last row of the *previous* column.  A column that runs
/// off either edge wraps around on its own, without touching the row — a
/// snake traversal, not a toroidal one.
pub fn step_from(
    col: usize,
    row: usize,
    cols: usize,
    rows: usize,
    direction: ScrollDirection,
) -> (usize, usize) {
    let step = direction.step();
    let cols = cols as i32;
    let rows = rows as i32;
    let mut col = col as i32;
    let mut row = row as i32 + step;
    if row >= rows {
        row = 0;
        col += step;
    } else if row < 0 {
        row = rows - 1;
        col += step;
    }
    if col >= cols {
        col = 0;
    } else if col < 0 {
        col = cols - 1;
    }
    (col as usize, row as usize)
}

//  Tests
