//! Compression eligibility policy
//!
//! A pure predicate over request metadata: no side effects and no
//! failure mode, so the same input always yields the same answer.

use http::header::{ACCEPT_ENCODING, CONNECTION};
use nautilus_core::RequestHead;

/// Path extensions that are already compressed; re-encoding them burns
/// CPU without shrinking the body.
const BLOCKED_EXTENSIONS: [&str; 4] = [".png", ".gif", ".jpeg", ".jpg"];

/// Decide from request metadata alone whether the response should be
/// gzip-compressed.
pub fn should_compress(req: &RequestHead) -> bool {
    let accepts_gzip = req
        .header(&ACCEPT_ENCODING)
        .is_some_and(|v| v.contains("gzip"));
    if !accepts_gzip {
        return false;
    }

    // Compressing an upgrade handshake (WebSocket et al.) would break it.
    let is_upgrade = req
        .header(&CONNECTION)
        .is_some_and(|v| v.contains("Upgrade"));
    if is_upgrade {
        return false;
    }

    let extension = path_extension(req.path());

    // Shorter than every blocked extension, skip the set lookup.
    if extension.len() < 4 {
        return true;
    }

    !BLOCKED_EXTENSIONS.contains(&extension)
}

/// Extension of the final path segment, dot included; empty when that
/// segment has no dot.
fn path_extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}
