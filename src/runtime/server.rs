use std::{
    io::Error,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    time::sleep,
};
use tracing::{debug, error, info, warn};

use crate::http::{
    request::{HttpError, request_from_reader},
    response::{Response, StatusCode, html_response, write_headers, write_status_line},
};
use crate::runtime::handler::Handler;

/// A struct representing an instance of a `HttpServer`, containing the state of the server.
#[derive(Debug)]
pub struct Server<H: Handler> {
    server_state: Arc<ServerState<H>>,
}

/// A struct representing the state of a server with the associated listener, whether or not the server has been closed and the handler.
#[derive(Debug)]
struct ServerState<H: Handler> {
    listener: TcpListener,
    closed: AtomicBool,
    handler: Arc<H>,
}

impl<H: Handler> Server<H> {
    /// Stops the server it is called on from accepting further connections.
    pub fn close(&self) {
        self.server_state.closed.store(true, Ordering::SeqCst);
    }
}

impl<H: Handler + Send + Sync + 'static> ServerState<H> {
    /// Called on a `ServerState`, listening for connections.
    async fn listen(self: Arc<Self>) {
        loop {
            if self.closed.load(Ordering::SeqCst) {
                info!("server closed, no longer accepting connections");
                return;
            }
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    debug!("accepted connection from {peer}");
                    let handler_clone = Arc::clone(&self.handler);
                    tokio::spawn(async move {
                        if let Err(e) = handle(stream, &*handler_clone).await {
                            warn!("error handling the connection: {e}");
                        }
                    });
                }
                Err(error) => {
                    if self.closed.load(Ordering::SeqCst) {
                        break;
                    }
                    warn!("error accepting connection: {error}");
                    sleep(Duration::from_millis(50)).await;
                }
            }
        }
    }
}

/// Serves an instance of the Http Server based on the passed handler on the specified address.
///
/// # Errors
///
/// Throws an Error if binding the tcp listener fails.
pub async fn serve<H: Handler + Send + Sync + 'static>(
    host: &str,
    port: u16,
    handler: Arc<H>,
) -> Result<Server<H>, Error> {
    let listener = TcpListener::bind((host, port)).await?;
    let state = Arc::new(ServerState {
        listener,
        handler,
        closed: AtomicBool::new(false),
    });
    let state_for_loop = Arc::clone(&state);
    tokio::spawn(async move {
        state_for_loop.listen().await;
    });
    Ok(Server {
        server_state: state,
    })
}

/// Handles a single connection: parse one request, dispatch it to the
/// handler, write the response and close.
///
/// # Errors
///
/// Throws a `HttpError` if writing the response fails.
async fn handle<H: Handler>(mut stream: TcpStream, handler: &H) -> Result<(), HttpError> {
    let request = match request_from_reader(&mut stream).await {
        Ok(request) => request,
        Err(HttpError::UnexpectedEOF) => return Ok(()),
        Err(e) => {
            debug!("failed to parse request: {e}");
            let body = "<html><body><h1>Bad Request</h1></body></html>";
            let response = html_response(StatusCode::BadRequest, body.as_bytes().to_vec());
            return write_response(&mut stream, response).await;
        }
    };

    let response = match handler.call(&request).await {
        Ok(response) => response,
        Err(e) => {
            error!(
                "handler failed for {}: {e}",
                request.request_line.request_target
            );
            let body = "<html><body><h1>Internal Server Error</h1></body></html>";
            html_response(StatusCode::InternalServerError, body.as_bytes().to_vec())
        }
    };

    write_response(&mut stream, response).await
}

/// Helper function to group together the write operations given a TCP Stream and a response object.
///
/// # Errors
///
/// Throws a `HttpError` if the write process fails.
async fn write_response(stream: &mut TcpStream, response: Response) -> Result<(), HttpError> {
    write_status_line(stream, response.status).await?;
    // One request per connection; announce the close.
    let mut headers = response.headers;
    headers.insert("connection", "close");
    write_headers(stream, &headers).await?;
    stream.write_all(&response.body).await?;
    stream.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use reqwest::Client;
    use tokio::time::timeout;

    use crate::{
        http::{
            request::{HttpError, Request},
            response::{Response, StatusCode, html_response},
        },
        runtime::{handler::Handler, server::serve},
    };

    struct MyHandler;

    impl Handler for MyHandler {
        async fn call(&self, request: &Request) -> Result<Response, HttpError> {
            if request.request_line.request_target.as_str() == "/yourproblem" {
                let body = "<html><body><h1>Bad Request</h1></body></html>";
                Ok(html_response(
                    StatusCode::BadRequest,
                    body.as_bytes().to_vec(),
                ))
            } else {
                let body = "<html><body><h1>All good!</h1></body></html>";
                Ok(html_response(StatusCode::Ok, body.as_bytes().to_vec()))
            }
        }
    }

    fn client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn server_can_establish_connection() {
        let handler_arc = Arc::new(MyHandler);
        let server = serve("127.0.0.1", 9080, handler_arc)
            .await
            .expect("Failed to start server");

        let url = "http://127.0.0.1:9080/test".to_string();
        let client = client();

        let task = tokio::spawn(async move {
            let resp = client.get(&url).send().await.expect("Request failed");
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            (status, text)
        });

        let result = timeout(Duration::from_secs(10), task)
            .await
            .expect("Test timed out");
        let (status, body) = result.unwrap();
        assert!(status.is_success());
        assert!(body.contains("All good!"));
        server.close();
    }

    #[tokio::test]
    async fn endpoints_write_correct_response() {
        let handler_arc = Arc::new(MyHandler);
        let server = serve("127.0.0.1", 9081, handler_arc)
            .await
            .expect("Failed to start server");

        let url = "http://127.0.0.1:9081/yourproblem".to_string();
        let client = client();

        let task = tokio::spawn(async move {
            let resp = client.get(&url).send().await.expect("Request failed");
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            (status, text)
        });

        let result = timeout(Duration::from_secs(10), task)
            .await
            .expect("Test timed out");
        let (status, _body) = result.unwrap();
        assert!(status.is_client_error());
        server.close();
    }

    #[tokio::test]
    async fn server_works_concurrently() {
        const CONCURRENT_REQUESTS: usize = 20;
        let handler_arc = Arc::new(MyHandler);
        let server = serve("127.0.0.1", 9082, handler_arc)
            .await
            .expect("Failed to start server");

        let client = client();

        let tasks: Vec<_> = (0..CONCURRENT_REQUESTS)
            .map(|_| {
                let client = client.clone();
                let url = "http://127.0.0.1:9082/test".to_string();
                tokio::spawn(async move {
                    let resp = client.get(&url).send().await.expect("Request failed");
                    let status = resp.status();
                    let text = resp.text().await.unwrap_or_default();
                    (status, text)
                })
            })
            .collect();

        let results = futures::future::join_all(tasks).await;

        for res in results {
            let (status, _body) = res.unwrap();
            assert!(status.is_success());
        }

        server.close();
    }
}
