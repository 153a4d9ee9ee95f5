//! Traits tying inputs, results and clients together

use async_trait::async_trait;

use crate::request::{Request, Response};
use crate::Error;

/// Parameters of one API call
pub trait Input {
    /// Wire name of the operation, e.g. `DescribeStacks`
    const OPERATION: &'static str;

    /// Validate required fields and serialize
    fn request(&self) -> Result<Request, Error>;
}

/// An input together with how to read its result
pub trait Operation: Input + Clone + Send + Sync + 'static {
    type Output: Send + 'static;

    fn parse(response: Response) -> Result<Self::Output, Error>;
}

/// An operation whose results continue on further pages
pub trait PaginatedOperation: Operation {
    /// What one page holds a list of, e.g. a stack
    type Item: Send + 'static;

    /// Input for the page following `output`, or `None` on the last page
    fn next_page(&self, output: &Self::Output) -> Option<Self>;

    fn into_items(output: Self::Output) -> Vec<Self::Item>;
}

/// Something that can run operations, i.e. a service client
#[async_trait]
pub trait Dispatch: Clone + Send + Sync + 'static {
    async fn dispatch<O: Operation>(&self, operation: O) -> Result<O::Output, Error>;

    /// Whether paginators built for this client should prefetch
    fn prefetch(&self) -> bool {
        true
    }
}

/// Rejects a required field that was left unset
pub fn required<'a, T>(
    value: &'a Option<T>,
    operation: &'static str,
    field: &'static str,
) -> Result<&'a T, Error> {
    value
        .as_ref()
        .ok_or(Error::MissingParameter { operation, field })
}
