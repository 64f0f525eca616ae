//! Core trait that decouples deskgrid from any specific compositor or panel
//! host, plus the payloads sent to the host's UI over the pager's event
//! channel.
//!
//! Every concrete backend (an X11 session, a Wayland workspace protocol, a
//! test harness, …) implements [`WorkspaceManager`].  The
//! [`Pager`](crate::pager::Pager) only depends on this abstraction.

use crate::config::Rgba;
use crate::event::{WorkspaceId, WorkspaceInfo};
use crate::input::IconLayout;
use crate::menu::MenuEntry;

/// Abstraction over a workspace manager that can enumerate workspaces,
/// report focus, and switch the current workspace or viewport.
///
/// An implementation might wrap a live compositor session, or it might be a
/// record-keeping stub used in tests.
///
/// # Contract
///
/// Workspace ids go stale whenever the topology changes underneath the
/// pager; that is routine, not exceptional.  Implementations must treat
/// [`activate`](WorkspaceManager::activate) and
/// [`move_viewport`](WorkspaceManager::move_viewport) calls carrying an
/// unknown id as no-ops (or report an error — the pager swallows and logs
/// either way, and never lets it propagate).
pub trait WorkspaceManager {
    /// The error type produced by this workspace manager.
    type Error: std::error::Error + Send + 'static;

    /// Enumerate the workspaces the manager currently knows about, with
    /// their geometry and layout positions.
    fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, Self::Error>;

    /// Pixel size of one screen, `(width, height)`.
    ///
    /// A virtual workspace larger than this is subdivided into
    /// screen-sized viewports.
    fn screen_size(&self) -> Result<(u32, u32), Self::Error>;

    /// Id of the currently focused workspace, or `None` if the manager
    /// reports no focus (e.g. mid-transition or an empty session).
    fn active_workspace(&self) -> Result<Option<WorkspaceId>, Self::Error>;

    /// Viewport origin `(left, top)` of the currently focused workspace, in
    /// pixels.  `(0, 0)` for workspaces that do not pan.
    fn viewport(&self) -> Result<(i32, i32), Self::Error>;

    /// Make `workspace` the current workspace.
    ///
    /// Fire-and-forget: the pager does not await a confirmation, it relies
    /// on the ensuing change notification to converge its state.
    fn activate(&self, workspace: WorkspaceId) -> Result<(), Self::Error>;

    /// Pan `workspace` so that its viewport origin becomes `(left, top)`.
    fn move_viewport(&self, workspace: WorkspaceId, left: i32, top: i32)
        -> Result<(), Self::Error>;
}

//  UI channel

/// A snapshot of everything the host needs in order to redraw the pager
/// icon: grid shape, active cell, icon geometry, and colors.
///
/// [`IconLayout::cell_rect`](crate::input::IconLayout::cell_rect) turns this
/// into per-cell pixel rectangles; every coordinate in `[0, cols) × [0,
/// rows)` is drawn, whether or not a workspace backs it, with the active
/// coordinate in `active_color` and the rest in `color`.
#[derive(Debug, Clone, PartialEq)]
pub struct IconState {
    /// Total columns in the grid.
    pub cols: usize,
    /// Total rows in the grid.
    pub rows: usize,
    /// Column of the active cell (0-indexed).
    pub active_col: usize,
    /// Row of the active cell (0-indexed).
    pub active_row: usize,
    /// Icon geometry the pager currently lays cells out in.
    pub layout: IconLayout,
    /// Fill color for inactive cells.
    pub color: Rgba,
    /// Fill color for the active cell.
    pub active_color: Rgba,
}

/// Requests sent from the [`Pager`](crate::pager::Pager) to the host UI over
/// an [`mpsc`](std::sync::mpsc) channel.
///
/// The pager holds an `Option<mpsc::Sender<UiEvent>>`.  Any listener — a
/// panel widget, a debug logger, a test collector — can receive these events
/// without being owned by the pager.  Sends never block and a missing
/// receiver is silently ignored; the pager's own state does not depend on
/// anyone listening.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Redraw the pager icon from the given snapshot.
    ///
    /// Emitted after every state-affecting operation: activations, scroll
    /// steps, screen notifications, settings and panel changes.
    Redraw(IconState),

    /// Pop up the context menu with the given entries.
    ///
    /// Emitted on a right press.  The host renders the entries in order
    /// (conventionally with a separator before the trailing Preferences
    /// entry) and reports a selection back as
    /// [`Event::MenuActivated`](crate::event::Event::MenuActivated).
    OpenMenu(Vec<MenuEntry>),

    /// Open the host's preferences dialog for this applet.
    ///
    /// Emitted when the Preferences menu entry is activated.  The dialog
    /// itself is host glue; changed values come back one at a time as
    /// [`Event::SettingChanged`](crate::event::Event::SettingChanged).
    OpenPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{WorkspaceId, WorkspaceInfo};
    use std::cell::RefCell;

    /// A test double that records every command issued to it.
    #[derive(Debug, Default)]
    struct RecorderManager {
        activations: RefCell<Vec<WorkspaceId>>,
        viewport_moves: RefCell<Vec<(WorkspaceId, i32, i32)>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("recorder error")]
    struct RecorderError;

    impl WorkspaceManager for RecorderManager {
        type Error = RecorderError;

        fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, RecorderError> {
            Ok(vec![WorkspaceInfo {
                id: WorkspaceId(1),
                width: 1920,
                height: 1080,
                layout_col: 0,
                layout_row: 0,
                is_virtual: false,
            }])
        }

        fn screen_size(&self) -> Result<(u32, u32), RecorderError> {
            Ok((1920, 1080))
        }

        fn active_workspace(&self) -> Result<Option<WorkspaceId>, RecorderError> {
            Ok(Some(WorkspaceId(1)))
        }

        fn viewport(&self) -> Result<(i32, i32), RecorderError> {
            Ok((0, 0))
        }

        fn activate(&self, workspace: WorkspaceId) -> Result<(), RecorderError> {
            self.activations.borrow_mut().push(workspace);
            Ok(())
        }

        fn move_viewport(
            &self,
            workspace: WorkspaceId,
            left: i32,
            top: i32,
        ) -> Result<(), RecorderError> {
            self.viewport_moves.borrow_mut().push((workspace, left, top));
            Ok(())
        }
    }

    #[test]
    fn recorder_manager_records_commands() {
        let wm = RecorderManager::default();
        wm.activate(WorkspaceId(3)).unwrap();
        wm.move_viewport(WorkspaceId(3), 1920, 0).unwrap();
        assert_eq!(*wm.activations.borrow(), vec![WorkspaceId(3)]);
        assert_eq!(*wm.viewport_moves.borrow(), vec![(WorkspaceId(3), 1920, 0)]);
    }

    #[test]
    fn recorder_manager_reports_one_workspace() {
        let wm = RecorderManager::default();
        let infos = wm.workspaces().unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].id, WorkspaceId(1));
        assert!(!infos[0].is_virtual);
    }
}
