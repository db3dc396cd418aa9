pub mod orrery;
pub mod path;
