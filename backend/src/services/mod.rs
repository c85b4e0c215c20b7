//! Request pipeline services for the Maize Advisor Platform

pub mod crop_health;
pub mod planting;
pub mod polygon;

pub use crop_health::CropHealthService;
pub use planting::PlantingService;
pub use polygon::PolygonService;
