pub mod arc;
pub mod curved;
pub mod plan;
pub mod straight;
