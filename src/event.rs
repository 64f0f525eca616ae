//! Events and types used throughout deskgrid.
//!
//! This module defines the vocabulary that all components share:
//! [`Event`] describes everything the host applet can deliver to the
//! [`Pager`](crate::pager::Pager) — pointer presses, scroll steps, menu
//! selections, settings pushes, and screen notifications — and
//! [`WorkspaceInfo`] / [`PanelGeometry`] provide the supporting data types.
//!
//! The host toolkit produces these from its own callbacks; the pager consumes
//! them on the host's single dispatch thread.

use crate::config::SettingValue;
use crate::menu::MenuAction;
use std::fmt;

/// Opaque identifier for a compositor workspace.
///
/// Allocated by the [`WorkspaceManager`](crate::traits::WorkspaceManager) and
/// meaningful only to it. Ids may go stale at any time: the manager is
/// required to treat calls carrying an unknown id as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkspaceId(pub u32);

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static information about one workspace, as enumerated by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceInfo {
    /// Manager-assigned id.
    pub id: WorkspaceId,
    /// Pixel width of the workspace (for a virtual workspace this spans all
    /// of its viewports).
    pub width: u32,
    /// Pixel height of the workspace.
    pub height: u32,
    /// Column this workspace occupies in the manager's layout.
    pub layout_col: usize,
    /// Row this workspace occupies in the manager's layout.
    pub layout_row: usize,
    /// Whether this workspace is a single large "virtual" desktop that the
    /// compositor pans across viewport by viewport.
    pub is_virtual: bool,
}

//  Pointer input

/// Pointer button of a press event, already translated by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// A pointer press on the pager icon.
///
/// Coordinates are in icon pixels, relative to the icon's top-left corner —
/// the same space [`IconLayout`](crate::input::IconLayout) works in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
}

/// Scroll-wheel direction over the pager icon.
///
/// Scrolling up walks to the previous cell, scrolling down to the next, in
/// the snake order implemented by [`step_from`](crate::input::step_from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Signed step this direction contributes to the traversal: `-1` for
    /// [`Up`](ScrollDirection::Up), `+1` for [`Down`](ScrollDirection::Down).
    pub fn step(self) -> i32 {
        match self {
            ScrollDirection::Up => -1,
            ScrollDirection::Down => 1,
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollDirection::Up => write!(f, "up"),
            ScrollDirection::Down => write!(f, "down"),
        }
    }
}

//  Panel geometry

/// Which screen edge the host panel is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

/// Parse a panel-edge string as hosts report it (case-insensitive; accepts
/// "top", "Bottom", " left ", etc.).
pub fn parse_edge(s: &str) -> Option<Edge> {
    match s.trim().to_lowercase().as_str() {
        "top" => Some(Edge::Top),
        "bottom" => Some(Edge::Bottom),
        "left" => Some(Edge::Left),
        "right" => Some(Edge::Right),
        _ => None,
    }
}

/// Geometry the host panel grants the applet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Screen edge the panel is docked to. A panel on the left or right edge
    /// is vertical; its thickness constrains the icon width. Top/bottom
    /// panels constrain the icon height.
    pub edge: Edge,
    /// Panel thickness in pixels.
    pub size: u32,
}

//  Screen notifications

/// Topology and focus notifications from the compositor, forwarded by the
/// host one at a time.
///
/// Each variant maps to a fixed [`Grid`](crate::grid::Grid) operation — see
/// the screen-event arm of [`Pager::handle`](crate::pager::Pager::handle).
/// The pager must stay correct under arbitrary orderings of these for the
/// same underlying change; a notification that arrives "too early" for the
/// current grid degrades to a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The focused workspace changed.
    ActiveWorkspaceChanged,
    /// A viewport moved or the viewport area changed shape.
    ViewportsChanged,
    /// A workspace was added.
    WorkspaceCreated,
    /// A workspace was removed.
    WorkspaceDestroyed,
}

//  Top-level event

/// Everything the host applet can deliver to the pager.
///
/// Events are produced by the host's toolkit callbacks and consumed by
/// [`Pager::handle`](crate::pager::Pager::handle), one at a time, on the
/// host's dispatch thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A pointer button was pressed on the icon.
    ///
    /// Left press hit-tests the grid and activates the cell under the
    /// pointer; right press asks the host to open the context menu; middle
    /// press does nothing.
    Pressed(PointerPress),

    /// The scroll wheel moved over the icon.
    ///
    /// Steps the active cell through the grid in snake order, if scrolling
    /// is enabled in the configuration.
    Scrolled(ScrollDirection),

    /// The user picked a context-menu entry previously handed to the host
    /// via [`UiEvent::OpenMenu`](crate::traits::UiEvent::OpenMenu).
    MenuActivated(MenuAction),

    /// The host's settings store pushed a changed value.
    SettingChanged {
        /// Settings key, e.g. `"cell_spacing"`.
        key: String,
        /// New value, already typed by the store.
        value: SettingValue,
    },

    /// The host panel was resized or moved to another edge.
    PanelChanged(PanelGeometry),

    /// A compositor notification arrived.
    Screen(ScreenEvent),
}
