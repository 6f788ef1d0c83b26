use super::Suite;
use crate::check::CheckError;
use crate::check::shape::{Shape, shape_of};
use crate::http_probe::request::ProbeRequest;
use crate::http_probe::result::{ProbeResult, ResponseBody};

/// Read-only endpoints probed twice in a row.
pub const REPEATABLE_PATHS: [&str; 4] = [
    "/api",
    "/api/categories",
    "/api/blogs?limit=3",
    "/api/admin/check",
];

fn body_shape(result: &ProbeResult) -> Shape {
    match &result.body {
        ResponseBody::Json(value) => shape_of(value),
        ResponseBody::Text(_) => Shape::String,
    }
}

fn compare(path: &str, first: &ProbeResult, second: &ProbeResult) -> Result<(), CheckError> {
    if let Some(error) = first.error.as_ref().or(second.error.as_ref()) {
        return Err(CheckError::Transport(error.clone()));
    }
    if first.status_code != second.status_code {
        return Err(CheckError::StatusDrift {
            path: path.to_string(),
            first: first.status_code,
            second: second.status_code,
        });
    }
    let (first_shape, second_shape) = (body_shape(first), body_shape(second));
    if first_shape != second_shape {
        return Err(CheckError::ShapeDrift {
            path: path.to_string(),
            first: first_shape,
            second: second_shape,
        });
    }
    Ok(())
}

/// Every path is probed even after a drift; the first drift is returned.
pub async fn repeatable_reads(suite: &Suite) -> Result<(), CheckError> {
    let mut verdict = Ok(());

    for path in REPEATABLE_PATHS {
        let request = ProbeRequest::get(path);
        let first = suite.probe_quiet(&request).await;
        let second = suite.probe_quiet(&request).await;

        match compare(path, &first, &second) {
            Ok(()) => println!(
                "✅ {path}: {} twice, same shape",
                first.status_code.map(|s| s.to_string()).unwrap_or_default()
            ),
            Err(e) => {
                println!("❌ {e}");
                if verdict.is_ok() {
                    verdict = Err(e);
                }
            }
        }
    }

    verdict
}
