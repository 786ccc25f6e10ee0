pub mod booking_store;
pub mod item_catalog;
pub mod user_directory;

pub use booking_store::BookingStore as InMemoryBookingStore;
pub use item_catalog::ItemCatalog as InMemoryItemCatalog;
pub use user_directory::UserDirectory as InMemoryUserDirectory;
