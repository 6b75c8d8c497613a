//! Browser binding of the hazard map viewer.
//!
//! The page must contain the elements listed in [`dom`]. The map is drawn to a 2D canvas, user input is read from
//! DOM events and passed to the [`HazardMapApp`](hazard_map::HazardMapApp).

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod run;

#[cfg(target_arch = "wasm32")]
pub use run::init;
