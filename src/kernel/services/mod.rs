//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the app (kernel-facing).
//! - `adapters`: runtime specific implementations (async, filesystem, mock backend).

pub mod adapters;
pub mod ports;
