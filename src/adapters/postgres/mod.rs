pub mod booking_store;
pub mod item_catalog;
pub mod user_directory;

// パブリックに型を再エクスポート
pub use booking_store::BookingStore as PostgresBookingStore;
pub use item_catalog::ItemCatalog as PostgresItemCatalog;
pub use user_directory::UserDirectory as PostgresUserDirectory;
