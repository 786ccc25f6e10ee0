mod booking_service;
mod errors;
mod item_history;
mod listing;

pub use booking_service::{ServiceDependencies, approve_booking, create_booking, get_booking};
pub use errors::{BookingApplicationError, ErrorKind, Result};
pub use item_history::{has_finished_booking, item_booking_window};
pub use listing::{list_bookings, list_for_booker, list_for_owner};
