//! **deskgrid** — the workspace-grid core of a panel pager applet.
//!
//! A pager applet shows the compositor's workspaces as a small grid icon on
//! the panel: one cell per workspace, the active cell highlighted.  Clicking
//! a cell, scrolling over the icon, or picking a context-menu entry switches
//! workspaces.  A compositor that exposes a single large *virtual* workspace
//! is shown as a grid of its screen-sized viewports instead.
//!
//! This crate implements the model behind that icon — the grid, its
//! synchronization with compositor notifications, and the mapping from
//! pointer and scroll input to cells.  Rendering, menu widgets, and settings
//! storage stay in the host panel.
//!
//! # Architecture
//!
//! The crate is organised around one core trait:
//!
//! * [`traits::WorkspaceManager`] — abstracts workspace enumeration, focus
//!   queries, and activation so the grid logic is not coupled to any
//!   specific compositor.
//!
//! [`pager::Pager`] owns the [`grid::Grid`] and consumes the [`event::Event`]s
//! the host delivers; everything the host must do in response comes back as
//! [`traits::UiEvent`]s on an [`mpsc`](std::sync::mpsc) channel.

pub mod config;
pub mod event;
pub mod grid;
pub mod input;
pub mod menu;
pub mod pager;
pub mod traits;
