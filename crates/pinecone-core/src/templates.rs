//! Template loading.
//!
//! The router does not fetch or render anything itself. When a route with
//! templates commits, it hands the template URLs and the target element to a
//! [`TemplateLoader`]. [`CachedTemplates`] is the stock implementation: it
//! composes a [`TemplateFetcher`] (network) with a [`TemplateRenderer`]
//! (DOM), caching fetched bodies by URL.

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Template loading errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
	/// The template body could not be retrieved.
	#[error("Failed to fetch template {url}: {message}")]
	Fetch {
		/// URL of the template.
		url: String,
		/// Reason reported by the fetcher.
		message: String,
	},

	/// The fetched templates could not be written into the target element.
	#[error("Failed to render into #{target}: {message}")]
	Render {
		/// Id of the target element.
		target: String,
		/// Reason reported by the renderer.
		message: String,
	},
}

/// Collaborator that loads route templates into the page.
#[async_trait]
pub trait TemplateLoader: Send + Sync {
	/// Fetches `urls` and renders them, in order, into `target_id`.
	async fn load(&self, urls: &[String], target_id: &str) -> Result<(), TemplateError>;

	/// Warms the cache for `urls` without rendering. Fire-and-forget.
	fn preload(&self, urls: &[String]);
}

/// Retrieves a template body.
#[async_trait]
pub trait TemplateFetcher: Send + Sync + 'static {
	async fn fetch(&self, url: &str) -> Result<String, TemplateError>;
}

/// Writes template bodies into a target element.
pub trait TemplateRenderer: Send + Sync + 'static {
	fn render(&self, target_id: &str, templates: &[Arc<str>]) -> Result<(), TemplateError>;
}

/// A [`TemplateLoader`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTemplates;

#[async_trait]
impl TemplateLoader for NoopTemplates {
	async fn load(&self, urls: &[String], target_id: &str) -> Result<(), TemplateError> {
		tracing::debug!(target_id = %target_id, count = urls.len(), "template loading disabled");
		Ok(())
	}

	fn preload(&self, _urls: &[String]) {}
}

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<str>, TemplateError>>>;
type TemplateCache = Mutex<HashMap<String, SharedFetch>>;

/// Caching [`TemplateLoader`].
///
/// Concurrent requests for the same URL share one in-flight fetch. Failed
/// fetches are evicted so a later navigation retries them.
pub struct CachedTemplates<F, R> {
	fetcher: Arc<F>,
	renderer: R,
	cache: Arc<TemplateCache>,
}

impl<F, R> std::fmt::Debug for CachedTemplates<F, R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CachedTemplates")
			.field("cached_count", &self.cache.lock().len())
			.finish()
	}
}

impl<F, R> CachedTemplates<F, R>
where
	F: TemplateFetcher,
	R: TemplateRenderer,
{
	/// Creates an empty cache.
	pub fn new(fetcher: F, renderer: R) -> Self {
		Self {
			fetcher: Arc::new(fetcher),
			renderer,
			cache: Arc::new(Mutex::new(HashMap::new())),
		}
	}

	/// Returns the body of `url`, fetching it on first use.
	pub async fn fetch(&self, url: &str) -> Result<Arc<str>, TemplateError> {
		Self::fetch_cached(
			Arc::clone(&self.fetcher),
			Arc::clone(&self.cache),
			url.to_string(),
		)
		.await
	}

	/// Returns whether `url` is cached or being fetched.
	pub fn is_cached(&self, url: &str) -> bool {
		self.cache.lock().contains_key(url)
	}

	/// Empties the cache.
	pub fn clear(&self) {
		self.cache.lock().clear();
	}

	async fn fetch_cached(
		fetcher: Arc<F>,
		cache: Arc<TemplateCache>,
		url: String,
	) -> Result<Arc<str>, TemplateError> {
		let shared = {
			let mut entries = cache.lock();
			entries
				.entry(url.clone())
				.or_insert_with(|| {
					let url = url.clone();
					async move { fetcher.fetch(&url).await.map(Arc::<str>::from) }
						.boxed()
						.shared()
				})
				.clone()
		};

		let result = shared.clone().await;
		if let Err(error) = &result {
			tracing::warn!(url = %url, error = %error, "template fetch failed");
			let mut entries = cache.lock();
			if entries.get(&url).is_some_and(|entry| entry.ptr_eq(&shared)) {
				entries.remove(&url);
			}
		}
		result
	}
}

#[async_trait]
impl<F, R> TemplateLoader for CachedTemplates<F, R>
where
	F: TemplateFetcher,
	R: TemplateRenderer,
{
	async fn load(&self, urls: &[String], target_id: &str) -> Result<(), TemplateError> {
		let bodies = futures::future::try_join_all(urls.iter().map(|url| self.fetch(url))).await?;
		self.renderer.render(target_id, &bodies)
	}

	fn preload(&self, urls: &[String]) {
		for url in urls {
			if self.is_cached(url) {
				continue;
			}
			tracing::debug!(url = %url, "preloading template");
			let fetch = Self::fetch_cached(
				Arc::clone(&self.fetcher),
				Arc::clone(&self.cache),
				url.clone(),
			);
			spawn_detached(async move {
				let _ = fetch.await;
			});
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_detached<Fut>(future: Fut)
where
	Fut: Future<Output = ()> + Send + 'static,
{
	match tokio::runtime::Handle::try_current() {
		Ok(handle) => {
			handle.spawn(future);
		}
		Err(_) => tracing::debug!("no async runtime, skipping template preload"),
	}
}

#[cfg(target_arch = "wasm32")]
fn spawn_detached<Fut>(future: Fut)
where
	Fut: Future<Output = ()> + 'static,
{
	wasm_bindgen_futures::spawn_local(future);
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::time::Duration;

	#[derive(Default)]
	struct CountingFetcher {
		calls: Arc<AtomicUsize>,
		failures: usize,
	}

	#[async_trait]
	impl TemplateFetcher for CountingFetcher {
		async fn fetch(&self, url: &str) -> Result<String, TemplateError> {
			let call = self.calls.fetch_add(1, Ordering::SeqCst);
			tokio::task::yield_now().await;
			if call < self.failures {
				return Err(TemplateError::Fetch {
					url: url.to_string(),
					message: "unavailable".to_string(),
				});
			}
			Ok(format!("<p>{url}</p>"))
		}
	}

	#[derive(Default, Clone)]
	struct RecordingRenderer {
		rendered: Arc<Mutex<Vec<(String, Vec<String>)>>>,
	}

	impl TemplateRenderer for RecordingRenderer {
		fn render(&self, target_id: &str, templates: &[Arc<str>]) -> Result<(), TemplateError> {
			self.rendered.lock().push((
				target_id.to_string(),
				templates.iter().map(|t| t.to_string()).collect(),
			));
			Ok(())
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_concurrent_fetches_share_one_request() {
		// Arrange
		let fetcher = CountingFetcher::default();
		let calls = Arc::clone(&fetcher.calls);
		let templates = CachedTemplates::new(fetcher, RecordingRenderer::default());

		// Act
		let (a, b) = tokio::join!(templates.fetch("/a.html"), templates.fetch("/a.html"));

		// Assert
		assert_eq!(a.unwrap().as_ref(), "<p>/a.html</p>");
		assert_eq!(b.unwrap().as_ref(), "<p>/a.html</p>");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(templates.is_cached("/a.html"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_failed_fetch_is_evicted() {
		// Arrange
		let fetcher = CountingFetcher {
			failures: 1,
			..Default::default()
		};
		let calls = Arc::clone(&fetcher.calls);
		let templates = CachedTemplates::new(fetcher, RecordingRenderer::default());

		// Act
		let first = templates.fetch("/a.html").await;
		let cached_after_failure = templates.is_cached("/a.html");
		let second = templates.fetch("/a.html").await;

		// Assert
		assert!(matches!(first, Err(TemplateError::Fetch { .. })));
		assert!(!cached_after_failure);
		assert!(second.is_ok());
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[rstest]
	#[tokio::test]
	async fn test_load_renders_in_order() {
		let renderer = RecordingRenderer::default();
		let templates = CachedTemplates::new(CountingFetcher::default(), renderer.clone());

		templates
			.load(&["/a.html".to_string(), "/b.html".to_string()], "content")
			.await
			.unwrap();

		let rendered = renderer.rendered.lock().clone();
		assert_eq!(
			rendered,
			vec![(
				"content".to_string(),
				vec!["<p>/a.html</p>".to_string(), "<p>/b.html</p>".to_string()]
			)]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_preload_warms_cache() {
		// Arrange
		let fetcher = CountingFetcher::default();
		let calls = Arc::clone(&fetcher.calls);
		let templates = CachedTemplates::new(fetcher, RecordingRenderer::default());

		// Act
		templates.preload(&["/a.html".to_string()]);
		tokio::time::sleep(Duration::from_millis(20)).await;
		templates.fetch("/a.html").await.unwrap();

		// Assert
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_clear_forgets_templates() {
		let fetcher = CountingFetcher::default();
		let calls = Arc::clone(&fetcher.calls);
		let templates = CachedTemplates::new(fetcher, RecordingRenderer::default());

		templates.fetch("/a.html").await.unwrap();
		templates.clear();
		templates.fetch("/a.html").await.unwrap();

		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}
}
