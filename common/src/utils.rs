pub mod decimal;
pub mod geometry;
