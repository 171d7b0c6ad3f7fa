//! SeaCast - short-horizon vessel trajectory forecasting.
//!
//! Given a short history of timestamped AIS position fixes, SeaCast
//! produces future position estimates at +1 h, +3 h, and +6 h with
//! per-estimate confidence scores, by combining three independent
//! extrapolation strategies into a single ensemble estimate.
//!
//! # Pipeline
//!
//! Data flows strictly top-down; no component holds state across
//! invocations:
//!
//! 1. [`window`] validates and orders raw records into a
//!    [`window::TrajectoryWindow`] (most recent first, capped at 10).
//! 2. [`forecast`] runs the linear, polynomial, and weighted-velocity
//!    strategies against the window, each built on the [`geodesic`]
//!    primitives.
//! 3. The ensemble combiner averages the surviving strategies per
//!    horizon.
//! 4. [`predictor`] wires it all together behind a total
//!    [`predictor::predict`] entry point.
//!
//! # Example
//!
//! ```ignore
//! use seacast::predictor::{predict, PredictionRequest};
//!
//! let request: PredictionRequest = serde_json::from_str(&input)?;
//! let report = predict(&request)?;
//! println!("{} positions used", report.samples_used);
//! ```

pub mod forecast;
pub mod geodesic;
pub mod predictor;
pub mod window;

/// Version of the SeaCast library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
