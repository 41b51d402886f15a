//! zstudio - headless core of a low-code IDE workspace.
//!
//! Modules:
//! - models: project nodes, node taxonomy and forest algorithms
//! - kernel: state/action/effect core (tree store, explorer, tabs, dispatcher) and services
//! - app: the workspace shell that runs effects against a backend

pub mod app;
pub mod kernel;
pub mod models;
