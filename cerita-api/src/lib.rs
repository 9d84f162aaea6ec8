mod inner;
pub mod model;
pub mod source;

pub use inner::{API, POSTS_PATH};
pub use source::{PostSource, Site, StaticDir};

pub use reqwest;
pub use serde_json;
