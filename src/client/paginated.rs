//! Lazy iteration over HAL collections.
//!
//! Collection responses embed one page of items and advertise the following
//! page as their `next` relation. [`PaginatedStream`] yields the items one
//! by one and follows `next` only when the current page is exhausted.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;

use super::ClientInner;
use crate::models::{HalCollection, ResourceKind};
use crate::Result;

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type PageFetcher<T> = Box<dyn Fn(String) -> BoxFuture<'static, Result<HalCollection<T>>> + Send + Sync>;

/// A stream that lazily walks a HAL collection.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
///
/// # async fn example(client: dwolla_rs::DwollaClient) -> dwolla_rs::Result<()> {
/// let mut customers = client.customers().list_stream()?;
///
/// while let Some(customer) = customers.next().await {
///     let customer = customer?;
///     println!("{} {}", customer.id, customer.status);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    fetch_page: PageFetcher<T>,
    /// Key under `_embedded` holding the items.
    relation: String,
    current_items: VecDeque<T>,
    /// URL of the next page to fetch, None once exhausted.
    next_url: Option<String>,
    pending_fetch: Option<BoxFuture<'static, Result<HalCollection<T>>>>,
}

impl<T> PaginatedStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Create a stream starting at `first_page`.
    pub(crate) fn new<F>(first_page: impl Into<String>, relation: impl Into<String>, fetch_page: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, Result<HalCollection<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            relation: relation.into(),
            current_items: VecDeque::new(),
            next_url: Some(first_page.into()),
            pending_fetch: None,
        }
    }

    /// Stream the collection at `first_page` through the client.
    pub(crate) fn follow(
        inner: Arc<ClientInner>,
        first_page: impl Into<String>,
        relation: impl Into<String>,
        resource: ResourceKind,
    ) -> Self {
        Self::new(first_page, relation, move |url: String| {
            let inner = inner.clone();
            Box::pin(async move { inner.get::<HalCollection<T>>(&url, resource).await })
        })
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.next_url = page.next_page().map(str::to_string);
                        this.current_items = page.into_items(&this.relation).into();

                        // An empty page ends the walk even if `next` is advertised.
                        if this.current_items.is_empty() {
                            this.next_url = None;
                            return Poll::Ready(None);
                        }
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_url = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if let Some(url) = this.next_url.take() {
                this.pending_fetch = Some((this.fetch_page)(url));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}
