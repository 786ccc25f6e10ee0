pub mod authorization;
pub mod booking;
pub mod classifier;
pub mod commands;
pub mod errors;
pub mod value_objects;

pub use classifier::BookingState;
pub use errors::*;
pub use value_objects::*;
