//! Integration tests for serving the web client

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::test_utils::{INDEX_HTML, body_to_string, test_app};

    async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
        let app = test_app("http://127.0.0.1:1");
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache_control = response
            .headers()
            .get("cache-control")
            .map(|v| v.to_str().unwrap().to_string());
        let body = body_to_string(response.into_body()).await;
        (status, cache_control, body)
    }

    /// Tests the root path serves the index document
    #[tokio::test]
    async fn it_serves_index_at_root() {
        let (status, cache_control, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-cache"));
        assert_eq!(body, INDEX_HTML);
    }

    /// Tests existing assets are served as is
    #[tokio::test]
    async fn it_serves_static_assets() {
        let (status, _, body) = get("/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('hi');");
    }

    /// Tests unknown paths fall back to the index document
    #[tokio::test]
    async fn it_falls_back_to_index() {
        let (status, _, body) = get("/some/client/route").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX_HTML);
    }
}
