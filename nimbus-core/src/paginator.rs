//! Lazy iteration over paginated results
//!
//! A [`Paginator`] issues no request until its stream is polled. Every call
//! to [`Paginator::pages`] or [`Paginator::items`] starts over from the first
//! input. With prefetch enabled, the request for page N+1 is spawned as soon
//! as page N arrives, so it runs while the caller works through page N.

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::operation::{Dispatch, PaginatedOperation};
use crate::Error;

/// Pages of a paginated operation
pub struct Paginator<D, O> {
    dispatcher: D,
    input: O,
    prefetch: bool,
}

impl<D, O> Paginator<D, O>
where
    D: Dispatch,
    O: PaginatedOperation,
{
    pub fn new(dispatcher: D, input: O) -> Self {
        let prefetch = dispatcher.prefetch();
        Self {
            dispatcher,
            input,
            prefetch,
        }
    }

    /// Override the client's prefetch setting for this paginator
    #[must_use]
    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// The input of the first page
    pub fn input(&self) -> &O {
        &self.input
    }

    /// Stream of whole pages; stops after the first error
    pub fn pages(&self) -> BoxStream<'static, Result<O::Output, Error>> {
        let dispatcher = self.dispatcher.clone();
        let prefetch = self.prefetch;

        stream::unfold(State::Next(self.input.clone()), move |state| {
            step(dispatcher.clone(), state, prefetch)
        })
        .boxed()
    }

    /// Stream of items across all pages
    pub fn items(&self) -> BoxStream<'static, Result<O::Item, Error>> {
        self.pages()
            .map_ok(|page| stream::iter(O::into_items(page).into_iter().map(Ok::<_, Error>)))
            .try_flatten()
            .boxed()
    }

    /// Items of the first page only, without following the token
    pub async fn current_page_only(&self) -> Result<Vec<O::Item>, Error> {
        let page = self.dispatcher.dispatch(self.input.clone()).await?;
        Ok(O::into_items(page))
    }

    /// Every item of every page
    pub async fn collect_items(&self) -> Result<Vec<O::Item>, Error> {
        self.items().try_collect().await
    }
}

enum State<O: PaginatedOperation> {
    Next(O),
    Prefetched(O, Prefetch<O::Output>),
    Done,
}

async fn step<D, O>(
    dispatcher: D,
    state: State<O>,
    prefetch: bool,
) -> Option<(Result<O::Output, Error>, State<O>)>
where
    D: Dispatch,
    O: PaginatedOperation,
{
    let (input, result) = match state {
        State::Next(input) => {
            let result = dispatcher.dispatch(input.clone()).await;
            (input, result)
        }
        State::Prefetched(input, handle) => (input, handle.join().await),
        State::Done => return None,
    };

    let page = match result {
        Ok(page) => page,
        Err(e) => return Some((Err(e), State::Done)),
    };

    let next = match input.next_page(&page) {
        None => State::Done,
        Some(next) if prefetch => {
            debug!(operation = O::OPERATION, "Prefetching next page");
            let handle = Prefetch::spawn(dispatcher, next.clone());
            State::Prefetched(next, handle)
        }
        Some(next) => State::Next(next),
    };

    Some((Ok(page), next))
}

/// An in-flight request for the next page; aborted if dropped unconsumed
struct Prefetch<T> {
    handle: JoinHandle<Result<T, Error>>,
}

impl<T: Send + 'static> Prefetch<T> {
    fn spawn<D, O>(dispatcher: D, input: O) -> Self
    where
        D: Dispatch,
        O: PaginatedOperation<Output = T>,
    {
        Self {
            handle: tokio::spawn(async move { dispatcher.dispatch(input).await }),
        }
    }

    async fn join(mut self) -> Result<T, Error> {
        (&mut self.handle).await?
    }
}

impl<T> Drop for Prefetch<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
