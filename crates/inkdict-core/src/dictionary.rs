use crate::error::LookupError;

/// One matched entry, decompressed and decoded.
#[derive(Debug, Clone)]
pub struct Article {
    pub text: String,
}

/// Lazy sequence of search results.
///
/// Finite, bounded by the actual matches, not restartable. Callers may
/// drop it early; nothing past the consumed articles is materialized.
pub type ArticleIter<'a> = Box<dyn Iterator<Item = Result<Article, LookupError>> + 'a>;

/// Prefix-search operations over one opened dictionary
pub trait Dictionary: Send + Sync {
    /// The dictionary's self-described display name, if it carries one.
    fn name(&self) -> Option<&str>;

    /// All articles whose headword starts with `query`, in the
    /// dictionary's native sort order, produced one at a time.
    fn find_prefix<'a>(&'a self, query: &str) -> ArticleIter<'a>;
}
