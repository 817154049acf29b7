pub mod application;
pub mod ladder;
pub mod lifecycle;
pub mod probation;
pub mod relationships;
pub mod shift;
pub mod time;
