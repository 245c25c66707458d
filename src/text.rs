pub mod engine;
pub mod fonts;
