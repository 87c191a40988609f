//! Docker build-context discovery and image hierarchy rendering.
//!
//! The core is [`domain::HierarchyIndex`], a forest built from a
//! "parent id → children" mapping, and [`domain::TreeRenderer`], which draws
//! it with box-drawing characters. The remaining layers discover contexts on
//! disk and expose the result through the `docktree` CLI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
