pub mod ctx;
pub mod list;
pub mod single;
pub mod sitemap;
pub mod utils;
