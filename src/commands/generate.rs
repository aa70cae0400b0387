//! Generate static files

use anyhow::{Context, Result};
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::content::Library;
use crate::generator::Generator;
use crate::Blog;

/// Load every post and build the site
///
/// Returns the library the site was built from. A malformed post fails the
/// whole build before anything is written.
pub fn run(blog: &Blog) -> Result<Library> {
    let start = Instant::now();

    let library = blog
        .load()
        .with_context(|| format!("Failed to load posts from {:?}", blog.content_dir))?;
    tracing::info!(
        "Loaded {} posts with {} tags",
        library.len(),
        library.tag_counts().len()
    );

    let generator = Generator::new(blog)?;
    generator.generate(&library)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {:?} in {:.2}s",
        blog.public_dir,
        duration.as_secs_f64()
    );

    Ok(library)
}

/// Watch posts, static files and the config, rebuilding on every change
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&blog.content_dir, &blog.static_dir] {
        if dir.exists() {
            watcher.watch(dir, notify::RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(Path::new(&config_path), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: editors emit several events per save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = rebuild(&blog.base_dir) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the config and rebuild from scratch
pub fn rebuild(base_dir: &Path) -> Result<Library> {
    let blog = Blog::new(base_dir)?;
    run(&blog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_returns_library() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/first.md"),
            "---\ntitle: First\ndate: 2024-03-01\nsummary: One\ntags: [Rust]\n---\n\n# Hello\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let library = run(&blog).unwrap();
        assert_eq!(library.len(), 1);
        assert!(blog.public_dir.join("blog/first/index.html").exists());
        assert!(blog.public_dir.join("tags/rust/index.html").exists());
    }

    #[test]
    fn test_run_fails_on_bad_post() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/broken.md"),
            "---\ntitle: Broken\ndate: 2024-03-01\ntags: []\n---\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let err = run(&blog).unwrap_err();
        assert!(format!("{:#}", err).contains("summary"));
        assert!(!blog.public_dir.join("index.html").exists());
    }
}
