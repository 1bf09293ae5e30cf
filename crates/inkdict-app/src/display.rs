use std::io::{self, Write};

/// Stand-in for the device's paging text viewer: documents go to
/// stdout, one per line-terminated write.
pub fn present(document: &str) {
    let mut out = io::stdout().lock();
    let _ = out.write_all(document.as_bytes());
    let _ = out.write_all(b"\n");
}
