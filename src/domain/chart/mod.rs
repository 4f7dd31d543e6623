//! Candle chart aggregate: render options, price scale and axis helpers.

pub mod services;
pub mod value_objects;

pub use services::*;
pub use value_objects::*;
