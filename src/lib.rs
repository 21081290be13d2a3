pub mod besselian;
pub mod circumstances;
pub mod constants;
pub mod delta_t;
pub mod display;
pub mod eclipse_type;
pub mod errors;
pub mod location;
pub mod lookup;
mod maths;
pub mod polynomial;
pub mod worksheet;
