pub mod angle;
pub mod mesh;
