// Stale-response guarding for catalog browsing.
//
// Repeated requests for the same listing and search keystrokes race: an
// older request can resolve after a newer one and would otherwise be
// shown over fresher results. Each logical stream carries a generation
// counter, and a response is only surfaced when its generation is still
// the latest issued on that stream. Every category is its own stream
// (a home page fetches several listings side by side, and none of them
// supersedes another); all searches share one stream (one search box).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Category, Movie};
use crate::services::tmdb::TmdbClient;

/// Generation counter for one logical request stream.
#[derive(Debug, Default)]
pub struct RequestStream {
    latest: AtomicU64,
}

impl RequestStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every previously issued one.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the ticket is still the latest issued on this stream.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

/// Browsing facade over the TMDB client: one stream per category, one
/// stream for searches. `None` means the response was superseded while
/// in flight and must be discarded, not rendered.
pub struct CatalogBrowser {
    client: Arc<TmdbClient>,
    categories: [RequestStream; Category::ALL.len()],
    searches: RequestStream,
}

impl CatalogBrowser {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self {
            client,
            categories: std::array::from_fn(|_| RequestStream::new()),
            searches: RequestStream::new(),
        }
    }

    /// The stream for one category. `Category::ALL` lists the variants in
    /// declaration order, so the discriminant indexes the table.
    fn stream(&self, category: Category) -> &RequestStream {
        &self.categories[category as usize]
    }

    pub async fn category(&self, category: Category) -> Result<Option<Vec<Movie>>> {
        let stream = self.stream(category);
        let ticket = stream.begin();
        let movies = self.client.category(category).await?;

        if stream.is_current(ticket) {
            Ok(Some(movies))
        } else {
            tracing::debug!(category = category.as_str(), "discarding superseded listing");
            Ok(None)
        }
    }

    pub async fn search(&self, query: &str) -> Result<Option<Vec<Movie>>> {
        let ticket = self.searches.begin();
        let movies = self.client.search(query).await?;

        if self.searches.is_current(ticket) {
            Ok(Some(movies))
        } else {
            tracing::debug!(query, "discarding superseded search");
            Ok(None)
        }
    }
}
