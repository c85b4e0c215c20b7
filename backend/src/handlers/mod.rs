//! HTTP handlers for the Maize Advisor Platform

pub mod crop_health;
pub mod health;
pub mod planting;
pub mod polygon;

pub use crop_health::get_crop_health;
pub use health::health_check;
pub use planting::get_planting_advice;
pub use polygon::create_polygon;
