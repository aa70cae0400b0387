//! Configuration module

mod site;

pub use site::GiscusConfig;
pub use site::HighlightConfig;
pub use site::MetaConfig;
pub use site::NavLink;
pub use site::ProfileConfig;
pub use site::SiteConfig;
pub use site::SocialConfig;
pub use site::TagMatching;
