//! URL helper functions

use crate::config::SiteConfig;

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/tags/") // -> "https://example.com/tags/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.meta.url.trim_end_matches('/');
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.meta.url = "https://youth-dev-log.vercel.app/".to_string();
        config
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/tags/"),
            "https://youth-dev-log.vercel.app/tags/"
        );
        assert_eq!(full_url_for(&config, ""), "https://youth-dev-log.vercel.app/");
        assert_eq!(
            full_url_for(&config, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }
}
