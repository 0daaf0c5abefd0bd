//! HTTP transport for the snippet service
//!
//! Maps method and path onto [`SnippetService`] handlers and marshals the
//! structured responses back onto the wire.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, Path, Query, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use snipbox_storage::SnippetStore;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{ApiError, MAX_BODY_SIZE};
use crate::request::{ApiRequest, ApiResponse};
use crate::service::SnippetService;

type AppState<S> = Arc<SnippetService<S>>;
type Params = Query<Vec<(String, String)>>;
type RawBody = Result<Bytes, BytesRejection>;

/// Create the HTTP router
pub fn create_router<S: SnippetStore + 'static>(service: Arc<SnippetService<S>>) -> Router {
    // The browser frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/add", post(add_handler::<S>).fallback(method_not_allowed))
        .route(
            "/snippet/:id",
            get(get_handler::<S>).fallback(method_not_allowed),
        )
        .route(
            "/delete/:id",
            delete(delete_handler::<S>).fallback(method_not_allowed),
        )
        .route(
            "/snippets",
            get(list_handler::<S>).fallback(method_not_allowed),
        )
        .route(
            "/search",
            get(search_handler::<S>).fallback(method_not_allowed),
        )
        .route(
            "/health",
            get(health_handler::<S>).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(service)
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
                .layer(cors),
        )
}

fn api_request(
    id: Option<String>,
    Query(params): Params,
    body: RawBody,
) -> Result<ApiRequest, ApiError> {
    let request = ApiRequest {
        id,
        query: params,
        body: None,
    };
    Ok(request.with_body(body?.to_vec()))
}

/// Request logging
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    tracing::info!("{} {} -> {}", method, uri, response.status().as_u16());
    response
}

async fn add_handler<S: SnippetStore + 'static>(
    State(service): State<AppState<S>>,
    params: Params,
    body: RawBody,
) -> Result<ApiResponse, ApiError> {
    service.create(api_request(None, params, body)?).await
}

async fn get_handler<S: SnippetStore + 'static>(
    State(service): State<AppState<S>>,
    Path(id): Path<String>,
    params: Params,
    body: RawBody,
) -> Result<ApiResponse, ApiError> {
    service.get_by_id(api_request(Some(id), params, body)?).await
}

async fn delete_handler<S: SnippetStore + 'static>(
    State(service): State<AppState<S>>,
    Path(id): Path<String>,
    params: Params,
    body: RawBody,
) -> Result<ApiResponse, ApiError> {
    service.delete_by_id(api_request(Some(id), params, body)?).await
}

async fn list_handler<S: SnippetStore + 'static>(
    State(service): State<AppState<S>>,
    params: Params,
    body: RawBody,
) -> Result<ApiResponse, ApiError> {
    service.list_all(api_request(None, params, body)?).await
}

async fn search_handler<S: SnippetStore + 'static>(
    State(service): State<AppState<S>>,
    params: Params,
    body: RawBody,
) -> Result<ApiResponse, ApiError> {
    service.search(api_request(None, params, body)?).await
}

async fn health_handler<S: SnippetStore + 'static>(
    State(service): State<AppState<S>>,
) -> Result<ApiResponse, ApiError> {
    service.health(ApiRequest::new()).await
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found(request: Request) -> ApiError {
    ApiError::NotFound(format!("no route for {}", request.uri().path()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Run the HTTP server until Ctrl-C
pub async fn run_http_server<S: SnippetStore + 'static>(
    service: Arc<SnippetService<S>>,
    addr: &str,
) -> anyhow::Result<()> {
    let store = service.store().clone();
    if !store.health_check().await? {
        anyhow::bail!("snippet store failed its health check");
    }

    let router = create_router(service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Snippet server listening on http://{}", listener.local_addr()?);
    tracing::info!("  Store namespace: {}", store.namespace());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await?;
    tracing::info!("Snippet server stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use snipbox_storage::ScratchStore;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<ScratchStore>) {
        let store = Arc::new(ScratchStore::new().unwrap());
        let service = Arc::new(SnippetService::new(store.clone()));
        (create_router(service), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    async fn add(app: &Router, title: &str, content: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/add",
            Some(json!({"title": title, "content": content})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json_body(&body)["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_add_and_fetch() {
        let (app, _store) = app();
        let id = add(&app, "Find me", "I am here").await;

        let (status, first) = send(&app, Method::GET, &format!("/snippet/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(&first);
        assert_eq!(body["id"], id.as_str());
        assert_eq!(body["title"], "Find me");
        assert_eq!(body["content"], "I am here");

        let (_, second) = send(&app, Method::GET, &format!("/snippet/{}", id), None).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_add_errors() {
        let (app, _store) = app();

        let (status, body) = send(&app, Method::POST, "/add", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"], "missing request body");

        let (status, body) = send(
            &app,
            Method::POST,
            "/add",
            Some(json!({"content": "No title here"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(&body)["error"],
            "`title` and `content` are required"
        );
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let (app, _store) = app();

        let (status, body) = send(&app, Method::GET, "/snippet/doesnotexist", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(&body)["error"],
            "no snippet by id doesnotexist exists "
        );

        let (status, _) = send(&app, Method::DELETE, "/delete/doesnotexist", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/snippet/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete() {
        let (app, _store) = app();
        let id = add(&app, "Delete me", "Temporary snippet").await;

        let (status, _) = send(&app, Method::DELETE, &format!("/delete/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, &format!("/snippet/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(&body)["error"],
            format!("no snippet by id {} exists ", id)
        );
    }

    #[tokio::test]
    async fn test_list_snippets() {
        let (app, store) = app();

        let (status, body) = send(&app, Method::GET, "/snippets", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!([]));

        for i in 1..=3 {
            add(&app, &format!("Snippet {}", i), &format!("Content {}", i)).await;
        }
        let (_, body) = send(&app, Method::GET, "/snippets", None).await;
        assert_eq!(json_body(&body).as_array().unwrap().len(), 3);

        store.reset().await.unwrap();
        let (_, body) = send(&app, Method::GET, "/snippets", None).await;
        assert_eq!(json_body(&body), json!([]));

        let (status, _) = send(&app, Method::GET, "/snippets?page=notanumber", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let (app, _store) = app();

        let (status, body) = send(&app, Method::POST, "/snippets", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(&body)["error"], "method not allowed");

        let (status, _) = send(&app, Method::GET, "/add", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_search() {
        let (app, _store) = app();
        let python = add(&app, "Python Poetry installation", "How to install Python packages").await;
        add(&app, "Deno KV basics", "Introduction to key-value stores").await;
        let js = add(&app, "JavaScript async/await", "Asynchronous programming").await;

        let (status, body) = send(&app, Method::GET, "/search?query=Python%20Poetry%20install", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!([{"id": python, "score": 3}]));

        let (_, body) = send(&app, Method::GET, "/search?query=async+programming", None).await;
        assert_eq!(json_body(&body), json!([{"id": js, "score": 1}]));

        let (_, body) = send(&app, Method::GET, "/search?query=nonexistent+term", None).await;
        assert_eq!(json_body(&body), json!([]));
    }

    #[tokio::test]
    async fn test_search_rejections() {
        let (app, _store) = app();
        let long = format!("/search?query={}", "a".repeat(81));

        for uri in [
            "/search",
            "/search?query=",
            "/search?query=deno&limit=5",
            long.as_str(),
            "/search?query=abc!%40%23",
        ] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(json_body(&body)["error"].is_string());
        }

        let (status, body) = send(&app, Method::GET, "/search?query=deno", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(&body)["error"],
            "GET /search does not accept a body"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _store) = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);

        let body = json_body(&body);
        assert_eq!(body["status"], "ok");
        let ts = body["timestamp"].as_str().unwrap();
        let bytes = ts.as_bytes();
        assert_eq!(ts.len(), 24);
        assert_eq!(bytes[10], b'T');
        assert_eq!(bytes[19], b'.');
        assert!(ts.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_oversized_body_is_json_413() {
        let (app, store) = app();
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/add")
            .header("content-type", "application/json")
            .body(Body::from(vec![b' '; MAX_BODY_SIZE + 1]))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            json_body(&bytes)["error"],
            format!("request body too large (max {} bytes)", MAX_BODY_SIZE)
        );
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _store) = app();
        let (status, body) = send(&app, Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(&body)["error"], "no route for /nope");
    }
}
