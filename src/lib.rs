pub mod document;
pub mod error;
pub mod extract;
pub mod gpx_types;
pub mod layers;
pub mod metrics;
pub mod parser;
pub mod route;
pub mod selection;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod app;

#[cfg(not(target_arch = "wasm32"))]
pub mod site;

pub use error::RouteMapError;
pub use route::Route;
