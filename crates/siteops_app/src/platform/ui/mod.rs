pub mod convert;
pub mod render;
