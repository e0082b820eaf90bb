//! In-process capability doubles for service tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::model::verdicts::ExtractedVerdict;
use crate::service::capability::{CapabilityError, SearchHit, TextGenerator, WebSearch};

type GenerateFn = Box<dyn Fn(&str) -> Result<String, CapabilityError> + Send + Sync>;
type VerdictFn = Box<dyn Fn(&str) -> Result<ExtractedVerdict, CapabilityError> + Send + Sync>;
type SearchFn = Box<dyn Fn(&str, usize) -> Result<Vec<SearchHit>, CapabilityError> + Send + Sync>;

/// Text generator answering from a script
pub struct ScriptedGenerator {
    generate: GenerateFn,
    verdict: VerdictFn,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn from_fn(f: impl Fn(&str) -> Result<String, CapabilityError> + Send + Sync + 'static) -> Self {
        Self {
            generate: Box::new(f),
            verdict: Box::new(|_| Err(CapabilityError::Malformed("no verdict scripted".into()))),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Replies in sequence; the last reply repeats once the script runs out
    pub fn replying(replies: Vec<&str>) -> Self {
        let queue: Mutex<VecDeque<String>> =
            Mutex::new(replies.into_iter().map(str::to_string).collect());
        Self::from_fn(move |_| {
            let mut queue = queue.lock().unwrap();
            let reply = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            reply.ok_or(CapabilityError::EmptyResponse)
        })
    }

    pub fn failing() -> Self {
        Self::from_fn(|_| Err(CapabilityError::Request("connection refused".into())))
    }

    pub fn with_verdict(
        mut self,
        f: impl Fn(&str) -> Result<ExtractedVerdict, CapabilityError> + Send + Sync + 'static,
    ) -> Self {
        self.verdict = Box::new(f);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn before_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CapabilityError> {
        self.before_call().await;
        (self.generate)(prompt)
    }

    async fn extract_verdict(&self, prompt: &str) -> Result<ExtractedVerdict, CapabilityError> {
        self.before_call().await;
        (self.verdict)(prompt)
    }
}

/// Web search answering from a script
pub struct ScriptedSearch {
    search: SearchFn,
    calls: AtomicUsize,
}

impl ScriptedSearch {
    pub fn from_fn(
        f: impl Fn(&str, usize) -> Result<Vec<SearchHit>, CapabilityError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            search: Box::new(f),
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns `count` hits titled after the query, ignoring the requested cap
    pub fn with_hits(count: usize) -> Self {
        Self::from_fn(move |query, _| Ok((0..count).map(|i| hit(query, i)).collect()))
    }

    pub fn failing() -> Self {
        Self::from_fn(|_, _| Err(CapabilityError::Request("quota exceeded".into())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebSearch for ScriptedSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.search)(query, max_results)
    }
}

pub fn hit(query: &str, rank: usize) -> SearchHit {
    SearchHit {
        title: format!("{} #{}", query, rank),
        snippet: format!("snippet {}", rank),
        link: format!("https://example.org/{}", rank),
    }
}
