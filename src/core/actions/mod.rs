pub mod navigate;
pub mod render;
