pub mod compositor;
pub mod shadow;
pub mod surface;
