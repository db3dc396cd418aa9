pub mod astro;
pub mod consts;
pub mod error;
pub mod math;
pub mod model;
