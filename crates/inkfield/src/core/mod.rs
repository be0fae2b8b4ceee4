pub mod raster;
pub mod field;
pub mod params;
pub mod rng;
pub mod time;
