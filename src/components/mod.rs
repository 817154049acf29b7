pub mod employment;
pub mod identity;
pub mod world;
