//! Hazard map viewer core. It shows flood, landslide and liquefaction susceptibility overlays loaded from a backend
//! as GeoJSON, inspects clicked locations and uploads new datasets.
//!
//! # Quick start
//!
//! ```no_run
//! use hazard_map::platform::PlatformServiceImpl;
//! use hazard_map::{HazardDataLoader, HazardMapConfig};
//!
//! # tokio_test::block_on(async {
//! let config = HazardMapConfig::default().with_base_url("http://localhost:8000");
//! let loader = HazardDataLoader::new(PlatformServiceImpl::new().unwrap(), &config);
//! let summary = loader
//!     .load_all(|kind, result| println!("{kind}: {:?}", result.map(|c| c.len())))
//!     .await;
//! println!("{} layers loaded", summary.loaded.len());
//! # });
//! ```
//!
//! # Main components
//!
//! * [`Map`] holds the current [`MapView`], the three [`layers`](layer) and the selection marker, and draws them to
//!   any [`Canvas`](render::Canvas).
//! * [`HazardDataLoader`] fetches the hazard datasets through a [`PlatformService`](platform::PlatformService),
//!   concurrently and tolerating failures of single datasets.
//! * [`HazardMapApp`] is the application state. It implements [`MapEventHandler`] for map clicks, layer toggles and
//!   the upload form, and reports everything the user should see to a [`ViewBinding`].
//! * [`control`] turns pointer input into clicks, drags and zooms.
//!
//! The crate does not touch any user interface toolkit directly. A platform binding implements
//! [`ViewBinding`], [`Canvas`](render::Canvas) and [`Messenger`] and feeds user input into the app.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod app;
pub mod async_runtime;
mod binding;
mod color;
mod config;
pub mod control;
pub mod error;
mod hazard;
pub mod inspect;
pub mod layer;
mod loader;
mod map;
mod messenger;
pub mod platform;
pub mod render;
mod search;
pub mod upload;
mod view;

pub use app::{HazardMapApp, MapEventHandler};
pub use binding::ViewBinding;
pub use color::Color;
pub use config::{Endpoints, HazardMapConfig};
pub use hazard::{HazardKind, SusceptibilityLevel};
pub use loader::{DatasetInfo, HazardDataLoader, LoadSummary};
pub use map::{LayerCollection, Map};
pub use messenger::Messenger;
pub use search::{search, SEARCH_UNSUPPORTED_NOTICE};
pub use view::MapView;

// Reexport hazard_map_types
pub use hazard_map_types;

#[cfg(test)]
pub(crate) mod tests;
