//! Error response logging middleware.

use std::task::{Context, Poll};

use axum::http::{Request, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use super::error::ErrorMessage;

/// Layer that logs every error response before it is sent.
///
/// Client errors are logged at `warn`, server errors at `error`. The message
/// is read from the [`ErrorMessage`] extension set by
/// [`ApiError`](super::ApiError).
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLogLayer;

impl ErrorLogLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<InnerService> Layer<InnerService> for ErrorLogLayer {
    type Service = ErrorLogService<InnerService>;

    fn layer(&self, inner: InnerService) -> Self::Service {
        ErrorLogService { inner }
    }
}

/// Service produced by [`ErrorLogLayer`].
#[derive(Debug, Clone)]
pub struct ErrorLogService<InnerService> {
    inner: InnerService,
}

impl<InnerService, RequestBody, ResponseBody> Service<Request<RequestBody>>
    for ErrorLogService<InnerService>
where
    InnerService:
        Service<Request<RequestBody>, Response = Response<ResponseBody>> + Clone + Send + 'static,
    InnerService::Future: Send,
    RequestBody: Send + 'static,
    ResponseBody: Send + 'static,
{
    type Response = Response<ResponseBody>;
    type Error = InnerService::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, request: Request<RequestBody>) -> Self::Future {
        let method = request.method().clone();
        let path = request.uri().path().to_owned();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(request).await?;
            let status = response.status();
            let message = response
                .extensions()
                .get::<ErrorMessage>()
                .map_or("", |ErrorMessage(text)| text.as_str());

            if status.is_server_error() {
                tracing::error!(method = %method, path = %path, status = %status, error = message, "request failed");
            } else if status.is_client_error() {
                tracing::warn!(method = %method, path = %path, status = %status, error = message, "request rejected");
            }

            Ok(response)
        })
    }
}
