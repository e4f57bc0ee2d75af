//! Batch runner — walks keywords × content types one call at a time.
//!
//! Flow: validate inputs → reset progress → for each keyword, for each type:
//!       build prompt → generate → post-process → accumulate → prepend to history.
//!
//! The first failed call ends the batch. Its item is marked failed, later items
//! are never attempted, and nothing from the batch reaches the history.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::generation::content_type::{ContentType, Language};
use crate::generation::postprocess::build_artifact;
use crate::generation::progress::{
    progress_key, GenerationProgress, ProgressTracker, PROGRESS_COMPLETE,
};
use crate::generation::prompts::build_prompt;
use crate::history::History;
use crate::llm_client::TextGenerator;
use crate::models::content::GeneratedContent;

/// Fully resolved input for one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub api_key: Option<String>,
    /// Raw keyword input, one keyword per line.
    pub keywords: String,
    pub content_types: Vec<ContentType>,
    pub language: Language,
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub generated: Vec<GeneratedContent>,
    pub history_len: usize,
    pub progress: GenerationProgress,
}

/// Splits keyword input on newlines, trimming and dropping blank lines.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deduplicates the selection and puts it in declaration order.
pub fn selected_types(types: &[ContentType]) -> Vec<ContentType> {
    types.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

#[derive(Clone)]
pub struct BatchRunner {
    generator: Arc<dyn TextGenerator>,
    progress: ProgressTracker,
    history: History,
    gate: Arc<Mutex<()>>,
}

impl BatchRunner {
    pub fn new(generator: Arc<dyn TextGenerator>, progress: ProgressTracker, history: History) -> Self {
        Self {
            generator,
            progress,
            history,
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub async fn run(&self, request: BatchRequest) -> Result<BatchOutcome, AppError> {
        let api_key = request
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AppError::MissingApiKey)?;

        let keywords = split_keywords(&request.keywords);
        if keywords.is_empty() {
            return Err(AppError::MissingKeywords);
        }

        let types = selected_types(&request.content_types);
        if types.is_empty() {
            return Err(AppError::NoContentTypes);
        }

        let _guard = self.gate.try_lock().map_err(|_| AppError::BatchInProgress)?;

        info!(
            "Starting batch: {} keywords × {} content types ({})",
            keywords.len(),
            types.len(),
            request.language
        );

        self.progress.reset().await;
        let mut generated = Vec::with_capacity(keywords.len() * types.len());

        for keyword in &keywords {
            for &content_type in &types {
                let prompt = build_prompt(
                    content_type,
                    keyword,
                    request.language,
                    request.custom_prompt.as_deref(),
                );
                let ticker = self.progress.start(progress_key(keyword, content_type)).await;

                debug!("Generating {content_type} for '{keyword}'");
                let text = match self.generator.generate(api_key, &prompt).await {
                    Ok(text) => {
                        ticker.finish(true).await;
                        text
                    }
                    Err(e) => {
                        ticker.finish(false).await;
                        warn!(
                            "Batch halted at {content_type} for '{keyword}' after {} of {} items",
                            generated.len(),
                            keywords.len() * types.len()
                        );
                        return Err(AppError::Generation(format!(
                            "{content_type} for '{keyword}': {e}"
                        )));
                    }
                };

                let mut content = build_artifact(content_type, keyword, text);
                content.progress = Some(PROGRESS_COMPLETE);
                generated.push(content);
            }
        }

        let history_len = self.history.prepend(generated.clone()).await?;

        info!(
            "Batch finished: {} artifacts generated, history now {}",
            generated.len(),
            history_len
        );

        Ok(BatchOutcome {
            generated,
            history_len,
            progress: self.progress.snapshot().await,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::generation::progress::PROGRESS_FAILED;
    use crate::history::store::SlotStore;
    use crate::llm_client::LlmError;

    /// Counts calls and fails on the call number given in `fail_on` (1-based).
    #[derive(Default)]
    pub(crate) struct FakeGenerator {
        pub calls: AtomicUsize,
        pub fail_on: Option<usize>,
        pub prompts: std::sync::Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub(crate) fn failing_on(call: usize) -> Self {
            Self {
                fail_on: Some(call),
                ..Self::default()
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, _api_key: &str, prompt: &str) -> Result<String, LlmError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail_on == Some(call) {
                return Err(LlmError::Api {
                    status: 429,
                    message: "quota exceeded".to_string(),
                });
            }
            Ok(format!("generated #{call}\n\nPrimary Keywords:\nalpha, beta"))
        }
    }

    fn runner(generator: Arc<FakeGenerator>, dir: &std::path::Path) -> (BatchRunner, History) {
        let history = History::load(SlotStore::open(dir).unwrap(), None).unwrap();
        let progress = ProgressTracker::new(Duration::from_millis(500));
        (
            BatchRunner::new(generator, progress, history.clone()),
            history,
        )
    }

    fn request(keywords: &str, types: &[ContentType]) -> BatchRequest {
        BatchRequest {
            api_key: Some("test-key".to_string()),
            keywords: keywords.to_string(),
            content_types: types.to_vec(),
            ..BatchRequest::default()
        }
    }

    #[test]
    fn test_split_keywords_drops_blank_lines() {
        assert_eq!(
            split_keywords("  pho \n\n\t\nlemon tart\r\n"),
            vec!["pho", "lemon tart"]
        );
        assert!(split_keywords(" \n ").is_empty());
    }

    #[test]
    fn test_selected_types_dedupes_in_declaration_order() {
        let types = selected_types(&[ContentType::Seo, ContentType::Recipe, ContentType::Seo]);
        assert_eq!(types, vec![ContentType::Recipe, ContentType::Seo]);
    }

    #[tokio::test]
    async fn test_history_grows_by_keywords_times_types() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::default());
        let (runner, history) = runner(generator.clone(), dir.path());
        history
            .prepend(vec![GeneratedContent::new(ContentType::Article, "old", "x".into())])
            .await
            .unwrap();

        let outcome = runner
            .run(request(
                "pho\nlemon tart\nramen",
                &[ContentType::Recipe, ContentType::Seo],
            ))
            .await
            .unwrap();

        assert_eq!(outcome.generated.len(), 6);
        assert_eq!(outcome.history_len, 7);
        assert_eq!(history.len().await, 7);
        assert_eq!(generator.call_count(), 6);
        assert!(outcome.progress.values().all(|&v| v == PROGRESS_COMPLETE));
        assert_eq!(outcome.progress.len(), 6);
    }

    #[tokio::test]
    async fn test_items_run_keyword_major_in_type_order() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::default());
        let (runner, history) = runner(generator, dir.path());

        let outcome = runner
            .run(request("a\nb", &[ContentType::Seo, ContentType::Image]))
            .await
            .unwrap();

        let generated: Vec<_> = outcome
            .generated
            .iter()
            .map(|c| format!("{}-{}", c.name, c.content_type))
            .collect();
        assert_eq!(generated, vec!["a-image", "a-seo", "b-image", "b-seo"]);

        let order: Vec<_> = history
            .all()
            .await
            .into_iter()
            .map(|c| format!("{}-{}", c.name, c.content_type))
            .collect();
        // History is newest first: the last generated item leads.
        assert_eq!(order, vec!["b-seo", "b-image", "a-seo", "a-image"]);
    }

    #[tokio::test]
    async fn test_post_processing_applied_per_type() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, _) = runner(Arc::new(FakeGenerator::default()), dir.path());

        let outcome = runner
            .run(request("pho", &[ContentType::Recipe, ContentType::Seo]))
            .await
            .unwrap();

        let recipe = &outcome.generated[0];
        assert!(recipe.image_url.is_some());
        let seo = &outcome.generated[1];
        assert_eq!(
            seo.seo_keywords.as_deref(),
            Some(&["alpha".to_string(), "beta".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_calls() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::default());
        let (runner, _) = runner(generator.clone(), dir.path());

        for key in [None, Some(String::new()), Some("   ".to_string())] {
            let mut req = request("pho", &[ContentType::Recipe]);
            req.api_key = key;
            let err = runner.run(req).await.unwrap_err();
            assert!(matches!(err, AppError::MissingApiKey));
        }
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_keywords_makes_no_calls() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::default());
        let (runner, _) = runner(generator.clone(), dir.path());

        for keywords in ["", "\n  \n"] {
            let err = runner
                .run(request(keywords, &[ContentType::Recipe]))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::MissingKeywords));
        }
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_api_key_checked_before_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, _) = runner(Arc::new(FakeGenerator::default()), dir.path());
        let mut req = request("", &[ContentType::Recipe]);
        req.api_key = None;
        assert!(matches!(
            runner.run(req).await.unwrap_err(),
            AppError::MissingApiKey
        ));
    }

    #[tokio::test]
    async fn test_no_content_types_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::default());
        let (runner, _) = runner(generator.clone(), dir.path());
        let err = runner.run(request("pho", &[])).await.unwrap_err();
        assert!(matches!(err, AppError::NoContentTypes));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_halts_batch_and_discards_it() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::failing_on(2));
        let (runner, history) = runner(generator.clone(), dir.path());

        let err = runner
            .run(request("pho\nramen", &[ContentType::Recipe, ContentType::Seo]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(generator.call_count(), 2, "no items after the failure");
        assert_eq!(history.len().await, 0);

        let progress = runner.progress().snapshot().await;
        assert_eq!(progress.get("pho-recipe"), Some(&PROGRESS_COMPLETE));
        assert_eq!(progress.get("pho-seo"), Some(&PROGRESS_FAILED));
        assert!(!progress.contains_key("ramen-recipe"));
    }

    #[tokio::test]
    async fn test_progress_reset_between_batches() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, _) = runner(Arc::new(FakeGenerator::default()), dir.path());

        runner.run(request("pho", &[ContentType::Image])).await.unwrap();
        let outcome = runner.run(request("ramen", &[ContentType::Image])).await.unwrap();

        assert_eq!(outcome.progress.len(), 1);
        assert!(outcome.progress.contains_key("ramen-image"));
    }

    #[tokio::test]
    async fn test_language_and_custom_prompt_reach_generator() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(FakeGenerator::default());
        let (runner, _) = runner(generator.clone(), dir.path());

        let mut req = request("churros", &[ContentType::Article]);
        req.language = Language::Spanish;
        req.custom_prompt = Some("Write a short story about".to_string());
        runner.run(req).await.unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            "Write a short story about churros\n\nGenerate in Spanish language."
        );
    }

    #[tokio::test]
    async fn test_concurrent_batch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, _) = runner(Arc::new(FakeGenerator::default()), dir.path());

        let _held = runner.gate.try_lock().unwrap();
        let err = runner
            .run(request("pho", &[ContentType::Recipe]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BatchInProgress));
    }
}
