//! Grid workspace model.
//!
//! The [`Grid`] struct holds the pager's `cols × rows` picture of the
//! compositor's workspace topology.  It is rebuilt from scratch via
//! [`Grid::build`] whenever the topology changes shape, and nudged in place
//! via [`Grid::refresh_active`] on pure focus changes.
//!
//! Two topologies hide behind the one grid:
//!
//! * *flat mode* — every compositor workspace occupies one cell at its own
//!   layout position.  The mapping may be sparse; a coordinate with no
//!   workspace is simply absent and can never be activated.
//! * *viewport mode* — a single "virtual" workspace larger than the screen
//!   is subdivided into screen-sized viewports, one cell per viewport.
//!
//! Each cell is a [`Cell`], polymorphic over the two bindings, with the
//! shared capabilities [`Cell::is_active`] and [`Cell::activate`].

use crate::event::{WorkspaceId, WorkspaceInfo};
use crate::traits::WorkspaceManager;
use log::{debug, warn};
use std::collections::HashMap;

/// One addressable slot in the grid, bound to a real workspace or to a
/// viewport of a virtual workspace.
///
/// Both capabilities degrade gracefully when the underlying workspace has
/// vanished: [`is_active`](Cell::is_active) reports `false` and
/// [`activate`](Cell::activate) becomes a logged no-op.  Races between the
/// grid and the live compositor are routine, not exceptional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// A real workspace occupying exactly this cell.
    Desk {
        /// The bound workspace.
        workspace: WorkspaceId,
    },
    /// One screen-sized viewport of a single large virtual workspace.
    Viewport {
        /// The virtual workspace all viewport cells share.
        workspace: WorkspaceId,
        /// Pixel offset of this viewport's left edge within the workspace.
        left: i32,
        /// Pixel offset of this viewport's top edge within the workspace.
        top: i32,
    },
}

impl Cell {
    /// Whether this cell corresponds to the compositor's current focus.
    ///
    /// A desk cell is active when its workspace is the active workspace; a
    /// viewport cell is active when the active workspace's viewport origin
    /// sits at this cell's offset.  Manager errors read as "not active".
    pub fn is_active<M: WorkspaceManager>(&self, wm: &M) -> bool {
        match self {
            Cell::Desk { workspace } => match wm.active_workspace() {
                Ok(active) => active == Some(*workspace),
                Err(e) => {
                    debug!("active-workspace query failed: {}", e);
                    false
                }
            },
            Cell::Viewport { left, top, .. } => match wm.viewport() {
                Ok(origin) => origin == (*left, *top),
                Err(e) => {
                    debug!("viewport query failed: {}", e);
                    false
                }
            },
        }
    }

    /// Ask the manager to make this cell current.
    ///
    /// For a desk cell this is a plain workspace activation.  For a viewport
    /// cell the workspace is activated first if it is not already current,
    /// then the viewport is panned to the cell's offset.  All failures are
    /// logged and swallowed; the ensuing change notification (or its
    /// absence) is what the pager trusts.
    pub fn activate<M: WorkspaceManager>(&self, wm: &M) {
        match self {
            Cell::Desk { workspace } => {
                if let Err(e) = wm.activate(*workspace) {
                    debug!("activating workspace {} failed: {}", workspace, e);
                }
            }
            Cell::Viewport { workspace, left, top } => {
                let needs_switch = match wm.active_workspace() {
                    Ok(active) => active != Some(*workspace),
                    Err(e) => {
                        debug!("active-workspace query failed: {}", e);
                        true
                    }
                };
                if needs_switch {
                    if let Err(e) = wm.activate(*workspace) {
                        debug!("activating workspace {} failed: {}", workspace, e);
                    }
                }
                if let Err(e) = wm.move_viewport(*workspace, *left, *top) {
                    debug!(
                        "moving viewport of workspace {} to ({}, {}) failed: {}",
                        workspace, left, top, e
                    );
                }
            }
        }
    }
}

/// The pager's grid of workspace cells.
///
/// Tracks the grid dimensions, the sparse cell mapping, the active cell
/// coordinate, and the topology signature (workspace count and active
/// workspace extent) that [`needs_rebuild`](Grid::needs_rebuild) compares
/// against when a `viewports-changed` notification arrives.
///
/// The active coordinate is a cache: it is re-derived on every
/// [`build`](Grid::build) and [`refresh_active`](Grid::refresh_active), and
/// stays inside `[0, cols) × [0, rows)` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns (≥ 1).
    cols: usize,
    /// Number of rows (≥ 1).
    rows: usize,
    /// Column of the active cell (0-indexed).
    active_col: usize,
    /// Row of the active cell (0-indexed).
    active_row: usize,
    /// `(col, row) -> Cell`.  Sparse: a missing coordinate has no workspace.
    cells: HashMap<(usize, usize), Cell>,
    /// Workspace count at build time.
    workspace_count: usize,
    /// Active workspace pixel extent at build time; `(0, 0)` when no active
    /// workspace was reported.
    active_extent: (u32, u32),
}

impl Grid {
    /// Build a fresh grid from the manager's current topology.
    ///
    /// Viewport mode is chosen when exactly one workspace is reported and it
    /// is flagged virtual; its dimensions come from integer division of the
    /// workspace extent by the screen extent (partial rows/columns are
    /// silently dropped) and are clamped to at least 1×1.  Any other topology builds a flat grid from
    /// the workspaces' layout positions, 1×1 minimum even when the
    /// enumeration is empty.
    ///
    /// Never fails: a manager error degrades to the empty topology.  The
    /// active coordinate is re-derived from scratch and defaults to `(0, 0)`
    /// when no cell reports itself active.
    pub fn build<M: WorkspaceManager>(wm: &M) -> Self {
        let workspaces = match wm.workspaces() {
            Ok(list) => list,
            Err(e) => {
                warn!("workspace enumeration failed: {}", e);
                Vec::new()
            }
        };

        let mut cells = HashMap::new();
        let mut cols = 1;
        let mut rows = 1;

        if workspaces.len() == 1 && workspaces[0].is_virtual {
            let workspace = &workspaces[0];
            let (screen_w, screen_h) = match wm.screen_size() {
                Ok(size) => size,
                Err(e) => {
                    warn!("screen-size query failed: {}", e);
                    (0, 0)
                }
            };
            if screen_w > 0 {
                cols = (workspace.width / screen_w).max(1) as usize;
            }
            if screen_h > 0 {
                rows = (workspace.height / screen_h).max(1) as usize;
            }
            for col in 0..cols {
                for row in 0..rows {
                    cells.insert(
                        (col, row),
                        Cell::Viewport {
                            workspace: workspace.id,
                            left: col as i32 * screen_w as i32,
                            top: row as i32 * screen_h as i32,
                        },
                    );
                }
            }
        } else {
            for workspace in &workspaces {
                cells.insert(
                    (workspace.layout_col, workspace.layout_row),
                    Cell::Desk { workspace: workspace.id },
                );
                cols = cols.max(workspace.layout_col + 1);
                rows = rows.max(workspace.layout_row + 1);
            }
        }

        let mut grid = Self {
            cols,
            rows,
            active_col: 0,
            active_row: 0,
            cells,
            workspace_count: workspaces.len(),
            active_extent: active_extent(wm, &workspaces),
        };
        if let Some((col, row)) = grid.scan_active(wm) {
            grid.active_col = col;
            grid.active_row = row;
        }
        grid
    }

    //  Accessors

    /// Grid dimensions as `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Coordinate of the active cell as `(col, row)`.
    pub fn active_cell(&self) -> (usize, usize) {
        (self.active_col, self.active_row)
    }

    /// The cell at `(col, row)`, if a workspace backs that coordinate.
    pub fn cell_at(&self, col: usize, row: usize) -> Option<&Cell> {
        self.cells.get(&(col, row))
    }

    //  Synchronization

    /// Re-derive the active coordinate by asking every cell whether it is
    /// active.
    ///
    /// If no cell matches — stale handles, a notification racing a topology
    /// change — the previous coordinate is kept as last-known-good rather
    /// than snapping to the origin.  (A full [`build`](Grid::build) does
    /// start over from `(0, 0)`.)
    pub fn refresh_active<M: WorkspaceManager>(&mut self, wm: &M) {
        if let Some((col, row)) = self.scan_active(wm) {
            self.active_col = col;
            self.active_row = row;
        }
    }

    /// Activate the cell at `(col, row)`.
    ///
    /// A coordinate that is out of range or has no cell is a silent no-op:
    /// no state change, no manager call.  Input races against topology
    /// changes are expected and must not crash or surface errors.
    ///
    /// On a hit, the active coordinate is set optimistically so the icon can
    /// respond immediately; the change notification that follows the
    /// manager call remains authoritative and re-derives the same (or a
    /// corrected) coordinate.
    pub fn activate_at<M: WorkspaceManager>(&mut self, wm: &M, col: usize, row: usize) {
        let cell = match self.cells.get(&(col, row)) {
            Some(cell) => *cell,
            None => {
                debug!("no cell at ({}, {}), ignoring activation", col, row);
                return;
            }
        };
        self.active_col = col;
        self.active_row = row;
        cell.activate(wm);
    }

    /// Whether a `viewports-changed` notification implies a topology reshape
    /// (full rebuild) rather than a pure viewport move (refresh only).
    ///
    /// True when the workspace count differs from the one cached at build
    /// time, or when the grid was built from a single workspace whose pixel
    /// extent has since changed.  A manager error reads as "no reshape", so
    /// the caller falls back to the cheap refresh path.
    pub fn needs_rebuild<M: WorkspaceManager>(&self, wm: &M) -> bool {
        let workspaces = match wm.workspaces() {
            Ok(list) => list,
            Err(e) => {
                debug!("workspace enumeration failed: {}", e);
                return false;
            }
        };
        if workspaces.len() != self.workspace_count {
            return true;
        }
        self.workspace_count == 1 && active_extent(wm, &workspaces) != self.active_extent
    }

    //  Internal

    /// Scan all in-range coordinates, column by column, for the cell that
    /// reports itself active.  The scan always runs to completion and the
    /// last match wins; the one-active-cell invariant makes the order moot
    /// in practice.
    fn scan_active<M: WorkspaceManager>(&self, wm: &M) -> Option<(usize, usize)> {
        let mut found = None;
        for col in 0..self.cols {
            for row in 0..self.rows {
                if let Some(cell) = self.cells.get(&(col, row)) {
                    if cell.is_active(wm) {
                        found = Some((col, row));
                    }
                }
            }
        }
        found
    }
}

/// Pixel extent of the manager's active workspace, `(0, 0)` when it cannot
/// be determined.
fn active_extent<M: WorkspaceManager>(wm: &M, workspaces: &[WorkspaceInfo]) -> (u32, u32) {
    let active = match wm.active_workspace() {
        Ok(active) => active,
        Err(e) => {
            debug!("active-workspace query failed: {}", e);
            None
        }
    };
    active
        .and_then(|id| workspaces.iter().find(|w| w.id == id))
        .map(|w| (w.width, w.height))
        .unwrap_or((0, 0))
}

//  Tests
