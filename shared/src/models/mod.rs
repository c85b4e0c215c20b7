//! Domain models for the Maize Advisor Platform

mod forecast;
mod geojson;
mod ndvi;

pub use forecast::*;
pub use geojson::*;
pub use ndvi::*;
