//! On-disk template caches
//!
//! Both files hold a plain JSON array of template ids. The primary cache is
//! trusted for as long as it exists; there is no TTL or staleness check.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::TemplateSet;
use crate::error::{CourierError, Result};

#[derive(Debug, Clone)]
pub struct TemplateCache {
    primary: PathBuf,
    fallback: PathBuf,
}

impl TemplateCache {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    pub fn fallback_path(&self) -> &Path {
        &self.fallback
    }

    /// Read the primary cache, `None` if the file does not exist
    pub async fn load_primary(&self) -> Result<Option<TemplateSet>> {
        match tokio::fs::metadata(&self.primary).await {
            Ok(meta) if meta.is_file() => read_set(&self.primary).await.map(Some),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CourierError::io(&self.primary, e)),
        }
    }

    pub async fn store_primary(&self, templates: &TemplateSet) -> Result<()> {
        write_set(&self.primary, templates).await
    }

    /// Read the fallback list; a missing file is an error
    pub async fn load_fallback(&self) -> Result<TemplateSet> {
        read_set(&self.fallback).await
    }

    pub async fn store_fallback(&self, templates: &TemplateSet) -> Result<()> {
        write_set(&self.fallback, templates).await
    }
}

async fn read_set(path: &Path) -> Result<TemplateSet> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|e| CourierError::io(path, e))?;

    serde_json::from_slice(&raw)
        .map_err(|e| CourierError::parse(format!("template cache {}", path.display()), e))
}

async fn write_set(path: &Path, templates: &TemplateSet) -> Result<()> {
    let body = serde_json::to_vec(templates)
        .map_err(|e| CourierError::parse("template set", e))?;

    tokio::fs::write(path, body)
        .await
        .map_err(|e| CourierError::io(path, e))?;

    tracing::debug!(path = %path.display(), count = templates.len(), "Wrote template cache");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_in(dir: &tempfile::TempDir) -> TemplateCache {
        TemplateCache::new(
            dir.path().join("templates.json"),
            dir.path().join("fallback-templates.json"),
        )
    }

    fn set(ids: &[&str]) -> TemplateSet {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_missing_primary_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);

        assert!(cache.load_primary().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_primary_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);

        cache.store_primary(&set(&["x", "y"])).await.unwrap();

        let raw = std::fs::read_to_string(cache.primary_path()).unwrap();
        assert_eq!(raw, r#"["x","y"]"#);
        assert_eq!(cache.load_primary().await.unwrap(), Some(set(&["x", "y"])));
    }

    #[tokio::test]
    async fn test_malformed_primary_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        std::fs::write(cache.primary_path(), "{not json").unwrap();

        let err = cache.load_primary().await.unwrap_err();
        assert!(matches!(err, CourierError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_missing_fallback_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);

        let err = cache.load_fallback().await.unwrap_err();
        assert!(matches!(err, CourierError::Io { .. }));
    }

    #[tokio::test]
    async fn test_fallback_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        std::fs::write(cache.fallback_path(), r#"["old"]"#).unwrap();

        cache.store_fallback(&set(&["f1", "f2"])).await.unwrap();

        assert_eq!(cache.load_fallback().await.unwrap(), set(&["f1", "f2"]));
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TemplateCache::new(
            dir.path().join("nope/templates.json"),
            dir.path().join("nope/fallback.json"),
        );

        let err = cache.store_primary(&set(&["a"])).await.unwrap_err();
        assert!(matches!(err, CourierError::Io { .. }));
    }
}
