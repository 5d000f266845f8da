//! Skill augmentation for job descriptions
//!
//! Augmenters look up related skill terms for a detected job title. An
//! augmenter never fails: any internal error collapses to the empty set so
//! the scan proceeds unaffected.

pub mod knowledge_graph;

use crate::config::AugmenterConfig;
use crate::error::Result;
use async_trait::async_trait;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

pub use knowledge_graph::KnowledgeGraphClient;

#[async_trait]
pub trait SkillAugmenter: Send + Sync {
    /// Related lowercase skill terms for a job title; empty on any failure.
    async fn related_skills(&self, job_title: &str) -> HashSet<String>;
}

/// Augmenter that never adds anything. Used for `--no-augment` runs.
pub struct NoopAugmenter;

#[async_trait]
impl SkillAugmenter for NoopAugmenter {
    async fn related_skills(&self, _job_title: &str) -> HashSet<String> {
        HashSet::new()
    }
}

/// Read-through cache keyed by job title in front of another augmenter.
pub struct CachingAugmenter {
    inner: Box<dyn SkillAugmenter>,
    cache: Mutex<HashMap<String, HashSet<String>>>,
}

impl CachingAugmenter {
    pub fn new(inner: Box<dyn SkillAugmenter>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SkillAugmenter for CachingAugmenter {
    async fn related_skills(&self, job_title: &str) -> HashSet<String> {
        if let Some(cached) = self.cache.lock().await.get(job_title) {
            debug!("Using cached skills for '{}'", job_title);
            return cached.clone();
        }

        let skills = self.inner.related_skills(job_title).await;
        self.cache
            .lock()
            .await
            .insert(job_title.to_string(), skills.clone());
        skills
    }
}

/// Builds the configured augmenter: the knowledge-graph client, fronted by
/// a cache when enabled.
pub fn from_config(config: &AugmenterConfig) -> Result<Arc<dyn SkillAugmenter>> {
    let client = KnowledgeGraphClient::new(config)?;
    if config.enable_cache {
        Ok(Arc::new(CachingAugmenter::new(Box::new(client))))
    } else {
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStub {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SkillAugmenter for CountingStub {
        async fn related_skills(&self, _job_title: &str) -> HashSet<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ["rust".to_string()].into_iter().collect()
        }
    }

    #[tokio::test]
    async fn test_noop_augmenter_returns_empty_set() {
        assert!(NoopAugmenter.related_skills("developer").await.is_empty());
    }

    #[tokio::test]
    async fn test_cache_calls_inner_once_per_title() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = CachingAugmenter::new(Box::new(CountingStub {
            calls: calls.clone(),
        }));

        let first = cached.related_skills("python developer").await;
        let second = cached.related_skills("python developer").await;
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cached.related_skills("data analyst").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
