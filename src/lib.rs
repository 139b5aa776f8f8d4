//! Hierarchical navigation for a teaching-materials drawer.
//!
//! Two independent folder forests (public and personal) are browsed through
//! per-forest breadcrumb paths, while course and lesson catalogues and tool
//! panels are layered on top through a view stack. [`drawer::Drawer`] ties
//! them together behind one "where am I" projection.

pub mod catalogue;
pub mod cli;
pub mod command;
pub mod config;
pub mod context;
pub mod drawer;
pub mod error;
pub mod executor;
pub mod library;
pub mod main_lib;
pub mod navigation;
pub mod notification;
pub mod tree;
pub mod view_stack;

pub use drawer::Drawer;
pub use error::{DrawerError, Result};
