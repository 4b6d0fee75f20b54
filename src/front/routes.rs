use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::front::assets::{self, ERROR_PAGE, INDEX_PAGE, MESSAGE_PAGE};
use crate::http::{
    form::parse_form,
    request::{HttpError, Request},
    response::{Response, StatusCode, file_response, html_response, redirect_response},
};
use crate::relay::{message, sender};
use crate::runtime::handler::Handler;

/// The handler behind the HTTP front: three fixed routes, a static-file
/// fallback and the form relay.
#[derive(Debug)]
pub struct FrontHandler {
    serve_dir: PathBuf,
    relay_addr: String,
}

impl FrontHandler {
    /// Creates the front serving from `serve_dir` and relaying submissions
    /// to `relay_addr`.
    #[must_use]
    pub fn new(serve_dir: impl Into<PathBuf>, relay_addr: impl Into<String>) -> Self {
        Self {
            serve_dir: serve_dir.into(),
            relay_addr: relay_addr.into(),
        }
    }

    async fn page(&self, name: &str, status: StatusCode) -> Result<Response, HttpError> {
        let body = fs::read(self.serve_dir.join(name)).await?;
        Ok(html_response(status, body))
    }

    async fn not_found(&self) -> Result<Response, HttpError> {
        self.page(ERROR_PAGE, StatusCode::NotFound).await
    }

    async fn serve_static(&self, path: &str) -> Result<Response, HttpError> {
        let Some(relative) = sanitize(path) else {
            return self.not_found().await;
        };
        let file = self.serve_dir.join(relative);
        if !file.is_file() {
            return self.not_found().await;
        }
        let body = fs::read(&file).await?;
        Ok(file_response(
            StatusCode::Ok,
            assets::content_type_for(&file),
            body,
        ))
    }

    async fn relay_submission(&self, request: &Request) -> Result<Response, HttpError> {
        let fields = match parse_form(&request.body) {
            Ok(fields) => fields,
            Err(e) => {
                warn!("rejecting submission: {e}");
                return self.page(ERROR_PAGE, StatusCode::BadRequest).await;
            }
        };
        if !message::has_required_fields(&fields) {
            warn!("rejecting submission with missing fields");
            return self.page(ERROR_PAGE, StatusCode::BadRequest).await;
        }

        // Fire-and-forget: a lost datagram is not surfaced to the client.
        if let Err(e) = sender::send(&self.relay_addr, &fields).await {
            warn!("failed to relay submission: {e}");
        }

        Ok(redirect_response("/message"))
    }
}

impl Handler for FrontHandler {
    async fn call(&self, request: &Request) -> Result<Response, HttpError> {
        let method = request.request_line.method.as_str();
        let target = request.request_line.request_target.as_str();
        let path = target.split('?').next().unwrap_or(target);

        match method {
            "GET" => match path {
                "/" => self.page(INDEX_PAGE, StatusCode::Ok).await,
                "/message" => self.page(MESSAGE_PAGE, StatusCode::Ok).await,
                _ => self.serve_static(path).await,
            },
            // The path is ignored for submissions.
            "POST" => self.relay_submission(request).await,
            _ => self.not_found().await,
        }
    }
}

/// Turns a request path into a relative filesystem path under the serve
/// directory. Rejects empty and parent-escaping paths.
fn sanitize(path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(relative.to_path_buf())
}
