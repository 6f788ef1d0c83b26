pub mod probe;
pub mod request;
pub mod result;

pub mod prelude {
    pub use super::probe::{probe, resolve_url};
    pub use super::request::{FilePart, Method, ProbeRequest, RequestBody};
    pub use super::result::{ProbeResult, ResponseBody};
}

use std::fmt::Write;

/// Flattens an error and its `source()` chain into one line.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": caused by: {}", src);
        err = src;
    }
    s
}
