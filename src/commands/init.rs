//! Initialize a new blog site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# devlog configuration

# Site
header_title: "<dev.log/>;"
author: John Doe
repo: https://github.com/johndoe/dev-blog

meta:
  url: http://localhost:4000
  title: "John's <dev.log/>;"
  description: 개발 관련 글을 남깁니다.
  locale: ko_KR
  og_image: /images/og_image.png

social:
  email: johndoe@example.com
  github: https://github.com/johndoe
  resume: ''

# Comments (https://giscus.app)
giscus:
  enable: false
  id: johndoe
  repo: dev-blog
  repo_id: ''
  category: General
  category_id: ''
  lang: ko

profile:
  greeting: 안녕하세요!
  intro: 공부하며 정리한 내용을 공유합니다.
  notes_url: ''
  image: /images/mimoji.png

nav:
  - title: Blog
    href: /blog
  - title: Tags
    href: /tags

# Directory
content_dir: posts
static_dir: static
public_dir: public
blog_dir: blog
tag_dir: tags

# Listing
recent_posts: 5
# normalized: "Web Dev" and "web-dev" share one tag page
# literal: a tag page lists only posts whose tag matches its title exactly
tag_matching: normalized

# Writing
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static/images"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
summary: 첫 번째 포스트입니다.
tags: [devlog]
---

## 시작하기

`posts/` 아래에 마크다운 파일을 추가하면 포스트가 됩니다. 파일 이름이 주소가 됩니다.

```bash
$ devlog new "My New Post"
$ devlog server
```

## 배포

```bash
$ devlog generate
```

`public/` 디렉터리를 그대로 배포하면 됩니다.
"#,
        today
    );

    fs::write(target_dir.join("posts/hello-world.md"), sample_post)?;
    tracing::debug!("Scaffolded site in {:?}", target_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, TagMatching};
    use crate::Blog;

    #[test]
    fn test_config_template_parses() {
        let config: SiteConfig = serde_yaml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.header_title, "<dev.log/>;");
        assert_eq!(config.nav.len(), 2);
        assert_eq!(config.tag_matching, TagMatching::Normalized);
        assert_eq!(config.giscus.full_repo(), "johndoe/dev-blog");
    }

    #[test]
    fn test_init_site_builds() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let library = blog.load().unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.posts()[0].slug, "hello-world");

        assert!(init_site(dir.path()).is_err());
    }
}
