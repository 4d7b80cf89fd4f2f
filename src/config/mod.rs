//! Configuration module

mod mode;
mod site;

pub use mode::Mode;
pub use site::FeedConfig;
pub use site::HighlightConfig;
pub use site::HomeConfig;
pub use site::SeoConfig;
pub use site::SiteConfig;
