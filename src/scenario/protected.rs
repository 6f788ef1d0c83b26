use serde_json::json;

use super::Suite;
use crate::check::CheckError;
use crate::check::expect::{expect_status, expect_unauthorized};
use crate::config::app_config::AppConfig;
use crate::http_probe::request::ProbeRequest;

/// User and admin scoped endpoints that must turn away anonymous callers.
pub fn anonymous_probes(config: &AppConfig) -> Vec<(&'static str, ProbeRequest)> {
    let user_id = &config.target_user_id;
    vec![
        ("admin_users_anonymous", ProbeRequest::get("/api/admin/users")),
        (
            "make_admin_anonymous",
            ProbeRequest::put(format!("/api/admin/users/{user_id}/make-admin")),
        ),
        (
            "remove_admin_anonymous",
            ProbeRequest::put(format!("/api/admin/users/{user_id}/remove-admin")),
        ),
        ("my_submissions_anonymous", ProbeRequest::get("/api/my-submissions")),
        (
            "my_blog_submissions_anonymous",
            ProbeRequest::get("/api/my-blog-submissions"),
        ),
    ]
}

pub async fn anonymous_denied(suite: &Suite, request: &ProbeRequest) -> Result<(), CheckError> {
    let result = suite.probe(request).await;
    expect_unauthorized(&result)
}

pub fn tool_payload() -> serde_json::Value {
    json!({
        "name": "TestAI Tool",
        "website": "https://testai-tool.example.com",
        "shortDescription": "A comprehensive AI tool for testing purposes",
        "description": concat!(
            "This is a detailed description of the TestAI tool that provides ",
            "various AI capabilities for testing and development purposes."
        ),
        "logo": "/uploads/test-logo.jpg",
        "categories": ["ai-tools", "productivity"],
        "pricing": "Free"
    })
}

/// A valid submission is still refused without a session, and a
/// well-formed bearer token the API never issued does not get around that.
pub async fn tool_submission(suite: &Suite) -> Result<(), CheckError> {
    crate::report::section("Without authentication");
    let request = ProbeRequest::post("/api/tools").with_json(tool_payload());
    let result = suite.probe_with_headers(&request).await;
    expect_unauthorized(&result)?;

    crate::report::section("With an unissued bearer token");
    let request = request.with_bearer(&suite.config.mock_bearer_token);
    let result = suite.probe_with_headers(&request).await;
    expect_status(&result, 401)
}
