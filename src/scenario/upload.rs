use serde_json::Value;

use super::Suite;
use crate::check::CheckError;
use crate::check::expect::{expect_field, expect_status, expect_string_field, json_object};
use crate::http_probe::request::{FilePart, ProbeRequest};

/// A 1x1 transparent PNG.
pub const PROBE_IMAGE: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn probe_image() -> FilePart {
    FilePart {
        field: "file".to_string(),
        file_name: "apiprobe-test.png".to_string(),
        mime: "image/png".to_string(),
        bytes: PROBE_IMAGE.to_vec(),
    }
}

/// Uploads the probe image, then fetches the returned `url` to prove the
/// content is retrievable. The url may be relative to the API or absolute.
pub async fn file_upload(suite: &Suite) -> Result<(), CheckError> {
    println!("File size: {} bytes", PROBE_IMAGE.len());
    let request = ProbeRequest::post("/api/upload").with_file(probe_image());
    let result = suite.probe_with_headers(&request).await;
    expect_status(&result, 200)?;

    let body = json_object(&result)?;
    expect_field(body, "success", &Value::Bool(true))?;
    let url = expect_string_field(body, "url")?;
    let filename = expect_string_field(body, "filename")?;
    println!("Uploaded as {filename}");

    crate::report::section("Fetching uploaded file");
    let fetch = ProbeRequest::get(url).with_timeout(suite.config.fetch_timeout);
    let fetched = suite.probe(&fetch).await;
    expect_status(&fetched, 200)
}
