//! Document assembly.
//!
//! The output document is plain text with three inline constructs the
//! viewer understands: `<h2>`, `<p>` and `<br>`. Nothing else is ever
//! emitted, and articles pass through byte-for-byte except that literal
//! newlines become `<br>`.

const H2_OPEN: &str = "<h2>";
const H2_CLOSE: &str = "</h2>";
const P_OPEN: &str = "<p>";
const P_CLOSE: &str = "</p>";
const BR: &str = "<br>";

/// Append-only builder for the result document.
///
/// Backed by a `String`, which already gives amortized O(1) appends.
pub struct DocumentBuilder {
    buf: String,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(1024),
        }
    }

    /// Heading section for one dictionary: `<p><h2>{name}</h2></p>`.
    pub fn push_dict_name(&mut self, name: &str) {
        self.buf.push_str(P_OPEN);
        self.buf.push_str(H2_OPEN);
        self.buf.push_str(name);
        self.buf.push_str(H2_CLOSE);
        self.buf.push_str(P_CLOSE);
    }

    /// One article as a paragraph, newlines translated to line breaks.
    pub fn push_article(&mut self, text: &str) {
        self.buf.push_str(P_OPEN);
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                self.buf.push_str(BR);
            }
            self.buf.push_str(line);
            first = false;
        }
        self.buf.push_str(P_CLOSE);
    }

    /// The whole-document marker shown when no dictionary matched.
    pub fn push_no_results(&mut self, label: &str) {
        self.buf.push_str(H2_OPEN);
        self.buf.push_str(label);
        self.buf.push_str(H2_CLOSE);
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
