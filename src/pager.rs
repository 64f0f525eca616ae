//! The applet core that ties the grid, the workspace manager, and the host
//! panel together.
//!
//! [`Pager`] owns the [`Grid`] and reacts to [`Event`]s by updating grid
//! state, issuing calls to the [`WorkspaceManager`] trait, and sending
//! [`UiEvent`]s back to the host.

use crate::config::Config;
use crate::event::{Event, PanelGeometry, PointerButton, PointerPress, ScreenEvent, ScrollDirection};
use crate::grid::Grid;
use crate::input::{self, IconLayout};
use crate::menu::{self, MenuAction, MenuEntry};
use crate::traits::{IconState, UiEvent, WorkspaceManager};
use log::{debug, info};
use std::sync::mpsc;

/// Orchestrates the workspace grid behind a panel icon.
///
/// The pager is generic over any [`WorkspaceManager`] implementation, making
/// it independent of the concrete compositor behind it.  The host panel
/// feeds it [`Event`]s; everything the host must do in response (repaint
/// the icon, pop up a menu) comes back as [`UiEvent`]s on the channel
/// attached with [`set_ui`](Pager::set_ui).
///
/// # Typical usage
///
/// ```ignore
/// let wm = WnckScreen::connect()?;
/// let mut pager = Pager::new(wm, Config::default(), panel);
/// pager.set_ui(tx);
/// pager.handle(Event::Scrolled(ScrollDirection::Down));
/// ```
pub struct Pager<M: WorkspaceManager> {
    wm: M,
    grid: Grid,
    config: Config,
    panel: PanelGeometry,
    layout: IconLayout,
    ui_tx: Option<mpsc::Sender<UiEvent>>,
}

impl<M: WorkspaceManager> Pager<M> {
    /// Create a pager and build its grid from the manager's current state.
    pub fn new(wm: M, config: Config, panel: PanelGeometry) -> Self {
        let grid = Grid::build(&wm);
        let layout = IconLayout::from_panel(&panel, &config);
        Self {
            wm,
            grid,
            config,
            panel,
            layout,
            ui_tx: None,
        }
    }

    /// Attach the host UI channel.
    ///
    /// The pager will send:
    ///
    /// - [`UiEvent::Redraw`] whenever anything visible changed (activation,
    ///   compositor notification, setting or panel change)
    /// - [`UiEvent::OpenMenu`] on a right press
    /// - [`UiEvent::OpenPreferences`] when the menu's preferences entry is
    ///   picked
    ///
    /// The receiver end can be owned by any host — a panel applet, a debug
    /// logger, a test harness.  Send failures are ignored, so a host that
    /// dropped its receiver quietly stops being painted.
    pub fn set_ui(&mut self, tx: mpsc::Sender<UiEvent>) {
        self.ui_tx = Some(tx);
    }

    /// Return a shared reference to the underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Everything a renderer needs to paint the icon right now.
    pub fn icon_state(&self) -> IconState {
        let (cols, rows) = self.grid.dimensions();
        let (active_col, active_row) = self.grid.active_cell();
        IconState {
            cols,
            rows,
            active_col,
            active_row,
            layout: self.layout,
            color: self.config.color,
            active_color: self.config.active_color,
        }
    }

    /// Context-menu entries for the current grid, in display order.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        let (cols, rows) = self.grid.dimensions();
        menu::entries(&self.config.desk_name_pattern, cols, rows)
    }

    /// Process a single [`Event`].
    ///
    /// Processing never fails: a panel applet must keep running whatever the
    /// compositor does, so manager errors degrade to stale state or dropped
    /// actions with a log line, and inputs that resolve to nothing (a click
    /// in a gap, a scroll with scrolling disabled) are simply ignored.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Pressed(press) => self.handle_press(press),
            Event::Scrolled(direction) => self.handle_scroll(direction),
            Event::MenuActivated(MenuAction::Activate { col, row }) => {
                info!("menu activation of cell ({}, {})", col, row);
                self.grid.activate_at(&self.wm, col, row);
                self.redraw();
            }
            Event::MenuActivated(MenuAction::Preferences) => {
                debug!("menu requested the preferences dialog");
                self.send(UiEvent::OpenPreferences);
            }
            Event::SettingChanged { key, value } => {
                debug!("setting {key:?} changed");
                self.config.apply(&key, &value);
                self.update();
            }
            Event::PanelChanged(panel) => {
                debug!("panel is now {} px at the {} edge", panel.size, panel.edge);
                self.panel = panel;
                self.update();
            }
            Event::Screen(screen_event) => self.handle_screen(screen_event),
        }
    }

    //  Input

    fn handle_press(&mut self, press: PointerPress) {
        match press.button {
            PointerButton::Left => {
                let (cols, rows) = self.grid.dimensions();
                if let Some((col, row)) = self.layout.cell_at(press.x, press.y, cols, rows) {
                    info!("click on cell ({}, {})", col, row);
                    self.grid.activate_at(&self.wm, col, row);
                    self.redraw();
                }
            }
            PointerButton::Middle => {}
            PointerButton::Right => {
                self.send(UiEvent::OpenMenu(self.menu_entries()));
            }
        }
    }

    fn handle_scroll(&mut self, direction: ScrollDirection) {
        if !self.config.scroll_enabled {
            return;
        }
        let (cols, rows) = self.grid.dimensions();
        let (col, row) = self.grid.active_cell();
        let (col, row) = input::step_from(col, row, cols, rows, direction);
        info!("scroll {} to cell ({}, {})", direction, col, row);
        self.grid.activate_at(&self.wm, col, row);
        self.redraw();
    }

    //  Compositor notifications

    fn handle_screen(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::ActiveWorkspaceChanged => self.grid.refresh_active(&self.wm),
            ScreenEvent::ViewportsChanged => {
                // A viewport notification is usually just the view panning
                // around inside an unchanged workspace; only a topology
                // change warrants throwing the grid away.
                if self.grid.needs_rebuild(&self.wm) {
                    debug!("viewport change reshaped the grid, rebuilding");
                    self.grid = Grid::build(&self.wm);
                } else {
                    self.grid.refresh_active(&self.wm);
                }
            }
            ScreenEvent::WorkspaceCreated | ScreenEvent::WorkspaceDestroyed => {
                debug!("workspace count changed, rebuilding");
                self.grid = Grid::build(&self.wm);
            }
        }
        self.redraw();
    }

    //  UI helpers

    /// Recompute everything that depends on configuration or panel geometry,
    /// then repaint.
    fn update(&mut self) {
        self.layout = IconLayout::from_panel(&self.panel, &self.config);
        self.grid = Grid::build(&self.wm);
        self.redraw();
    }

    fn redraw(&self) {
        self.send(UiEvent::Redraw(self.icon_state()));
    }

    fn send(&self, event: UiEvent) {
        if let Some(tx) = &self.ui_tx {
            let _ = tx.send(event);
        }
    }
}

//  Tests
