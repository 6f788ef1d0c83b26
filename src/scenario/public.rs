use serde_json::Value;

use super::Suite;
use crate::check::CheckError;
use crate::check::expect::{
    as_object, expect_array_field, expect_field, expect_fields, expect_status, json_array,
    json_object,
};
use crate::http_probe::request::ProbeRequest;

pub const TOOL_LIST_FIELDS: [&str; 4] = ["tools", "total", "page", "totalPages"];

pub const BLOG_LIST_FIELDS: [&str; 4] = ["blogs", "total", "page", "totalPages"];

pub const BLOG_FIELDS: [&str; 8] = [
    "_id",
    "title",
    "slug",
    "excerpt",
    "coverImage",
    "category",
    "readTime",
    "views",
];

pub async fn health_check(suite: &Suite) -> Result<(), CheckError> {
    let request = ProbeRequest::get("/api").with_timeout(suite.config.fetch_timeout);
    let result = suite.probe(&request).await;
    expect_status(&result, 200)?;
    json_object(&result)?;
    Ok(())
}

pub async fn tools_list(suite: &Suite) -> Result<(), CheckError> {
    let result = suite.probe(&ProbeRequest::get("/api/tools")).await;
    expect_status(&result, 200)?;
    let body = json_object(&result)?;
    expect_fields("tool list", body, &TOOL_LIST_FIELDS)?;
    expect_array_field(body, "tools")?;
    Ok(())
}

pub async fn categories(suite: &Suite) -> Result<(), CheckError> {
    let result = suite.probe(&ProbeRequest::get("/api/categories")).await;
    expect_status(&result, 200)?;
    let categories = json_array(&result)?;
    println!("Categories returned: {}", categories.len());
    Ok(())
}

pub async fn featured_tools(suite: &Suite) -> Result<(), CheckError> {
    let result = suite.probe(&ProbeRequest::get("/api/featured")).await;
    expect_status(&result, 200)?;
    let featured = json_array(&result)?;
    println!("Featured tools returned: {}", featured.len());
    Ok(())
}

/// Paged blog listing; every returned blog must carry the card fields.
pub async fn blogs_list(suite: &Suite) -> Result<(), CheckError> {
    let result = suite.probe(&ProbeRequest::get("/api/blogs?limit=3")).await;
    expect_status(&result, 200)?;
    let body = json_object(&result)?;
    expect_fields("blog list", body, &BLOG_LIST_FIELDS)?;
    let blogs = expect_array_field(body, "blogs")?;
    println!("Blogs returned: {}", blogs.len());

    for (i, blog) in blogs.iter().enumerate() {
        expect_fields(&format!("blogs[{i}]"), as_object(blog)?, &BLOG_FIELDS)?;
    }
    Ok(())
}

/// The one admin endpoint that answers anonymous callers with 200.
pub async fn admin_check_anonymous(suite: &Suite) -> Result<(), CheckError> {
    let result = suite.probe(&ProbeRequest::get("/api/admin/check")).await;
    expect_status(&result, 200)?;
    let body = json_object(&result)?;
    expect_field(body, "isAdmin", &Value::Bool(false))
}
