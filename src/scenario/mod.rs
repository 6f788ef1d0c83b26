//! The fixed probe sequence run against the configured API. Public
//! endpoints come first, then the ones that should turn anonymous callers
//! away, then the upload round trip and the repeat-read check.

pub mod protected;
pub mod public;
pub mod repeat;
pub mod upload;

use std::future::Future;

use crate::check::CheckError;
use crate::check::outcome::Outcomes;
use crate::config::app_config::AppConfig;
use crate::http_probe::prelude::*;
use crate::report;

pub struct Suite {
    client: reqwest::Client,
    config: AppConfig,
}

impl Suite {
    pub fn new(client: reqwest::Client, config: AppConfig) -> Self {
        Self { client, config }
    }

    /// Probes and prints the result.
    async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
        let result = self.probe_quiet(request).await;
        report::print_result(&result);
        result
    }

    /// Like `probe`, also printing the response headers.
    async fn probe_with_headers(&self, request: &ProbeRequest) -> ProbeResult {
        let result = self.probe(request).await;
        report::print_headers(&result);
        result
    }

    async fn probe_quiet(&self, request: &ProbeRequest) -> ProbeResult {
        probe(&self.client, &self.config.base_url, request).await
    }

    pub async fn run(&self) -> Outcomes {
        let mut outcomes = Outcomes::new();

        println!("🚀 BACKEND API PROBE STARTED");
        println!("Base URL: {}", self.config.base_url);

        let o = &mut outcomes;
        run_step(o, "health_check", "HEALTH CHECK: GET /api", public::health_check(self)).await;
        run_step(o, "tools_list", "TOOLS: GET /api/tools", public::tools_list(self)).await;
        run_step(
            o,
            "categories",
            "CATEGORIES: GET /api/categories",
            public::categories(self),
        )
        .await;
        run_step(
            o,
            "featured_tools",
            "FEATURED: GET /api/featured",
            public::featured_tools(self),
        )
        .await;
        run_step(
            o,
            "blogs_list",
            "BLOGS: GET /api/blogs?limit=3",
            public::blogs_list(self),
        )
        .await;
        run_step(
            o,
            "admin_check_anonymous",
            "ADMIN CHECK: GET /api/admin/check (anonymous)",
            public::admin_check_anonymous(self),
        )
        .await;

        for (name, request) in protected::anonymous_probes(&self.config) {
            let title = format!(
                "PROTECTED: {} {} (anonymous)",
                request.method(),
                request.path()
            );
            run_step(o, name, &title, protected::anonymous_denied(self, &request)).await;
        }

        run_step(
            o,
            "tool_submission",
            "TOOL SUBMISSION: POST /api/tools",
            protected::tool_submission(self),
        )
        .await;
        run_step(
            o,
            "file_upload",
            "FILE UPLOAD: POST /api/upload",
            upload::file_upload(self),
        )
        .await;
        run_step(
            o,
            "repeatable_reads",
            "REPEATABLE READS: same status and body shape",
            repeat::repeatable_reads(self),
        )
        .await;

        outcomes
    }
}

async fn run_step<F>(outcomes: &mut Outcomes, name: &str, title: &str, step: F)
where
    F: Future<Output = Result<(), CheckError>>,
{
    report::banner(title);
    let verdict = step.await;
    if let Err(e) = &verdict {
        log::debug!("{name} failed: {e:?}");
    }
    report::print_verdict(name, &verdict);
    outcomes.record(name, verdict.is_ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::probe_config::ProbeConfig;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn suite_for(server: &MockServer) -> Suite {
        let config = ProbeConfig {
            base_url: server.uri(),
            target_user_id: "u-42".to_string(),
            ..ProbeConfig::default()
        };
        let config = AppConfig::try_from(config).expect("valid config");
        Suite::new(reqwest::Client::new(), config)
    }

    fn unauthorized() -> ResponseTemplate {
        ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" }))
    }

    async fn mount(server: &MockServer, verb: &str, route: &str, response: ResponseTemplate) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(response)
            .mount(server)
            .await;
    }

    /// A server that honours every contract the suite checks.
    async fn healthy_api() -> MockServer {
        let server = MockServer::start().await;
        let ok = |body: serde_json::Value| ResponseTemplate::new(200).set_body_json(body);

        let status = json!({ "status": "ok", "message": "AI Directory API" });
        mount(&server, "GET", "/api", ok(status)).await;
        mount(
            &server,
            "GET",
            "/api/tools",
            ok(json!({ "tools": [{ "name": "A" }], "total": 1, "page": 1, "totalPages": 1 })),
        )
        .await;
        let categories = json!([{ "slug": "ai-tools", "count": 3 }]);
        mount(&server, "GET", "/api/categories", ok(categories)).await;
        mount(&server, "GET", "/api/featured", ok(json!([]))).await;
        mount(
            &server,
            "GET",
            "/api/blogs",
            ok(json!({
                "blogs": [{
                    "_id": "1", "title": "Hello", "slug": "hello", "excerpt": "...",
                    "coverImage": "/c.png", "category": "news", "readTime": 3, "views": 10
                }],
                "total": 1, "page": 1, "totalPages": 1
            })),
        )
        .await;
        mount(&server, "GET", "/api/admin/check", ok(json!({ "isAdmin": false }))).await;

        mount(&server, "GET", "/api/admin/users", unauthorized()).await;
        mount(&server, "PUT", "/api/admin/users/u-42/make-admin", unauthorized()).await;
        mount(&server, "PUT", "/api/admin/users/u-42/remove-admin", unauthorized()).await;
        mount(&server, "GET", "/api/my-submissions", unauthorized()).await;
        mount(&server, "GET", "/api/my-blog-submissions", unauthorized()).await;
        mount(&server, "POST", "/api/tools", unauthorized()).await;

        mount(
            &server,
            "POST",
            "/api/upload",
            ok(json!({
                "success": true,
                "url": "/uploads/apiprobe-test.png",
                "filename": "apiprobe-test.png"
            })),
        )
        .await;
        mount(
            &server,
            "GET",
            "/uploads/apiprobe-test.png",
            ResponseTemplate::new(200).set_body_bytes(upload::PROBE_IMAGE.to_vec()),
        )
        .await;

        server
    }

    #[tokio::test]
    async fn test_healthy_api_passes_every_step() {
        let server = healthy_api().await;
        let outcomes = suite_for(&server).run().await;

        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| o.name.as_str())
            .collect();
        assert!(failed.is_empty(), "failed: {failed:?}");
        assert_eq!(outcomes.total(), 14);
        assert!(outcomes.all_passed());
    }

    #[tokio::test]
    async fn test_leaky_endpoint_fails_only_its_step() {
        let server = MockServer::start().await;
        mount(&server, "GET", "/api/admin/users", unauthorized()).await;
        mount(&server, "PUT", "/api/admin/users/u-42/make-admin", unauthorized()).await;
        mount(&server, "PUT", "/api/admin/users/u-42/remove-admin", unauthorized()).await;
        let leak = ResponseTemplate::new(200).set_body_json(json!([]));
        mount(&server, "GET", "/api/my-submissions", leak).await;
        mount(&server, "GET", "/api/my-blog-submissions", unauthorized()).await;

        let suite = suite_for(&server);
        let mut outcomes = Outcomes::new();
        for (name, request) in protected::anonymous_probes(&suite.config) {
            let verdict = protected::anonymous_denied(&suite, &request).await;
            outcomes.record(name, verdict.is_ok());
        }

        let leaked: Vec<&str> = outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(leaked, ["my_submissions_anonymous"]);
        assert_eq!(outcomes.total(), 5);
    }

    #[tokio::test]
    async fn test_bearer_token_bypass_fails_submission() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tools"))
            .and(header("Authorization", "Bearer mock-token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "new" })))
            .with_priority(1)
            .mount(&server)
            .await;
        mount(&server, "POST", "/api/tools", unauthorized()).await;

        let verdict = protected::tool_submission(&suite_for(&server)).await;
        assert_eq!(
            verdict,
            Err(CheckError::UnexpectedStatus {
                expected: 401,
                actual: 201
            })
        );
    }

    #[tokio::test]
    async fn test_blog_missing_fields_is_reported() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/api/blogs",
            ResponseTemplate::new(200).set_body_json(json!({
                "blogs": [{ "_id": "1", "title": "Hello", "slug": "hello" }],
                "total": 1, "page": 1, "totalPages": 1
            })),
        )
        .await;

        let err = public::blogs_list(&suite_for(&server)).await.unwrap_err();
        match err {
            CheckError::MissingFields {
                context, missing, present, ..
            } => {
                assert_eq!(context, "blogs[0]");
                assert_eq!(
                    missing,
                    ["excerpt", "coverImage", "category", "readTime", "views"]
                );
                assert_eq!(present, ["_id", "slug", "title"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_blog_list_passes() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/api/blogs",
            ResponseTemplate::new(200).set_body_json(json!({
                "blogs": [], "total": 0, "page": 1, "totalPages": 0
            })),
        )
        .await;

        assert_eq!(public::blogs_list(&suite_for(&server)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_blog_entry_must_be_an_object() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/api/blogs",
            ResponseTemplate::new(200).set_body_json(json!({
                "blogs": ["hello-world"], "total": 1, "page": 1, "totalPages": 1
            })),
        )
        .await;

        assert_eq!(
            public::blogs_list(&suite_for(&server)).await,
            Err(CheckError::WrongType {
                expected: "object",
                actual: "string"
            })
        );
    }

    #[tokio::test]
    async fn test_blog_list_that_is_not_an_array_names_its_type() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/api/blogs",
            ResponseTemplate::new(200).set_body_json(json!({
                "blogs": {}, "total": 0, "page": 1, "totalPages": 0
            })),
        )
        .await;

        assert_eq!(
            public::blogs_list(&suite_for(&server)).await,
            Err(CheckError::FieldType {
                field: "blogs".to_string(),
                expected: "array",
                actual: "object"
            })
        );
    }

    #[tokio::test]
    async fn test_admin_check_must_deny_anonymous() {
        let server = MockServer::start().await;
        mount(
            &server,
            "GET",
            "/api/admin/check",
            ResponseTemplate::new(200).set_body_json(json!({ "isAdmin": true })),
        )
        .await;

        let verdict = public::admin_check_anonymous(&suite_for(&server)).await;
        assert!(matches!(
            verdict,
            Err(CheckError::FieldMismatch { ref field, .. }) if field == "isAdmin"
        ));
    }

    #[tokio::test]
    async fn test_upload_follows_absolute_url() {
        let server = MockServer::start().await;
        let absolute = format!("{}/cdn/logos/abc.png", server.uri());
        mount(
            &server,
            "POST",
            "/api/upload",
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "url": absolute,
                "filename": "logos/abc"
            })),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/cdn/logos/abc.png"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(upload::file_upload(&suite_for(&server)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_upload_follows_uppercase_scheme_url() {
        let server = MockServer::start().await;
        let shouting = server.uri().replacen("http://", "HTTP://", 1) + "/cdn/logos/abc.png";
        mount(
            &server,
            "POST",
            "/api/upload",
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "url": shouting,
                "filename": "logos/abc"
            })),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/cdn/logos/abc.png"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(upload::file_upload(&suite_for(&server)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_upload_fails_when_file_is_not_served() {
        let server = MockServer::start().await;
        mount(
            &server,
            "POST",
            "/api/upload",
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "url": "/uploads/gone.png",
                "filename": "gone.png"
            })),
        )
        .await;

        assert_eq!(
            upload::file_upload(&suite_for(&server)).await,
            Err(CheckError::UnexpectedStatus {
                expected: 200,
                actual: 404
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_completes_with_failures() {
        let config = ProbeConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..ProbeConfig::default()
        };
        let suite = Suite::new(
            reqwest::Client::new(),
            AppConfig::try_from(config).expect("valid config"),
        );
        let outcomes = suite.run().await;

        assert_eq!(outcomes.total(), 14);
        assert_eq!(outcomes.passed(), 0);
    }
}
