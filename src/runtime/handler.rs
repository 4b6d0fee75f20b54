use crate::http::{
    request::{HttpError, Request},
    response::Response,
};

/// A trait that determines the handling for each server.
pub trait Handler: Send + Sync {
    /// Determines what happens to a given request.
    ///
    /// # Errors
    /// Throws a `HttpError` if processing the request fails.
    fn call(&self, req: &Request) -> impl Future<Output = Result<Response, HttpError>> + Send;
}
