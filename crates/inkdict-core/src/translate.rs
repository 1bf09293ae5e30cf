use inkdict_config::lookup::LookupConfig;

use crate::collection::DictionaryCollection;
use crate::markup::DocumentBuilder;

/// Knobs for one translation pass.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Upper bound on articles emitted per dictionary.
    pub articles_max: usize,
    /// Already-localized "no results" label. Callers without a message
    /// catalog pass the default, which is the literal lookup key.
    pub no_results: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            articles_max: 10,
            no_results: "No results".to_string(),
        }
    }
}

impl TranslateOptions {
    pub fn from_config(config: &LookupConfig) -> Self {
        Self {
            articles_max: config.articles_max,
            ..Self::default()
        }
    }
}

/// Run `query` across every dictionary and build one document.
///
/// Dictionaries are visited in collection order; articles within one
/// dictionary keep its native order, truncated at `articles_max`. A
/// dictionary that matched and has a name contributes a heading before
/// its articles. A blank query searches nothing and yields an empty
/// document. If nothing matched anywhere, the document is the single
/// "no results" marker.
pub fn translate(
    dicts: &DictionaryCollection,
    query: &str,
    options: &TranslateOptions,
) -> String {
    if query.trim().is_empty() {
        return String::new();
    }

    let mut doc = DocumentBuilder::new();

    for dict in dicts.iter() {
        let mut results = dict.find_prefix(query);
        let mut emitted = 0;

        while emitted < options.articles_max {
            match results.next() {
                Some(Ok(article)) => {
                    if emitted == 0 {
                        if let Some(name) = dict.name() {
                            doc.push_dict_name(name);
                        }
                    }
                    doc.push_article(&article.text);
                    emitted += 1;
                }
                Some(Err(e)) => {
                    // One broken dictionary must not take down the rest.
                    tracing::warn!(
                        dictionary = dict.name().unwrap_or("<unnamed>"),
                        "stopping result consumption: {e}"
                    );
                    break;
                }
                None => break,
            }
        }
    }

    if doc.is_empty() {
        doc.push_no_results(&options.no_results);
    }

    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Article, ArticleIter, Dictionary};
    use crate::error::LookupError;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted dictionary: yields its articles for any query whose
    /// prefix matches, optionally failing partway through.
    struct FakeDict {
        name: Option<&'static str>,
        headword: &'static str,
        articles: Vec<String>,
        fail_after: Option<usize>,
        searches: Arc<AtomicUsize>,
    }

    impl FakeDict {
        fn new(name: Option<&'static str>, headword: &'static str, articles: &[&str]) -> Self {
            Self {
                name,
                headword,
                articles: articles.iter().map(|s| s.to_string()).collect(),
                fail_after: None,
                searches: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Dictionary for FakeDict {
        fn name(&self) -> Option<&str> {
            self.name
        }

        fn find_prefix<'a>(&'a self, query: &str) -> ArticleIter<'a> {
            self.searches.fetch_add(1, Ordering::Relaxed);
            if !self.headword.starts_with(query) {
                return Box::new(std::iter::empty());
            }
            let fail_after = self.fail_after;
            Box::new(
                self.articles
                    .iter()
                    .enumerate()
                    .map(move |(i, text)| match fail_after {
                        Some(n) if i >= n => {
                            Err(LookupError::Corrupt("truncated chunk".into()))
                        }
                        _ => Ok(Article { text: text.clone() }),
                    }),
            )
        }
    }

    fn collection(dicts: Vec<FakeDict>) -> DictionaryCollection {
        // Build in discovery order: first pushed = first found = last in list.
        let mut coll = DictionaryCollection::new();
        for d in dicts {
            coll.insert_front(Box::new(d));
        }
        coll
    }

    #[test]
    fn blank_query_yields_empty_document_without_searching() {
        let dict = FakeDict::new(Some("D"), "cat", &["chat"]);
        let searches = Arc::clone(&dict.searches);
        let coll = collection(vec![dict]);

        assert_eq!(translate(&coll, "", &TranslateOptions::default()), "");
        assert_eq!(translate(&coll, "   \n", &TranslateOptions::default()), "");
        assert_eq!(translate(&coll, "\t  ", &TranslateOptions::default()), "");
        assert_eq!(searches.load(Ordering::Relaxed), 0);

        translate(&coll, "cat", &TranslateOptions::default());
        assert_eq!(searches.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn no_matches_anywhere_yields_localized_marker() {
        let coll = collection(vec![
            FakeDict::new(Some("English-French"), "cat", &["chat"]),
            FakeDict::new(Some("English-German"), "cat", &["Katze"]),
        ]);

        let doc = translate(&coll, "zzznomatch", &TranslateOptions::default());
        assert_eq!(doc, "<h2>No results</h2>");

        let opts = TranslateOptions {
            no_results: "Keine Ergebnisse".to_string(),
            ..TranslateOptions::default()
        };
        assert_eq!(
            translate(&coll, "zzznomatch", &opts),
            "<h2>Keine Ergebnisse</h2>"
        );
    }

    #[test]
    fn later_found_dictionary_is_emitted_first() {
        // English-German is found later in the scan, so it sits earlier
        // in the collection and leads the document.
        let coll = collection(vec![
            FakeDict::new(Some("English-French"), "cat", &["chat"]),
            FakeDict::new(Some("English-German"), "cat", &["Katze"]),
        ]);

        let doc = translate(&coll, "cat", &TranslateOptions::default());
        assert_eq!(
            doc,
            "<p><h2>English-German</h2></p><p>Katze</p>\
             <p><h2>English-French</h2></p><p>chat</p>"
        );
    }

    #[test]
    fn articles_are_capped_per_dictionary() {
        let many: Vec<String> = (0..25).map(|i| format!("article {i}")).collect();
        let many_refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let coll = collection(vec![FakeDict::new(Some("Big"), "cat", &many_refs)]);

        let doc = translate(&coll, "cat", &TranslateOptions::default());
        assert_eq!(doc.matches("<p>article").count(), 10);
        assert!(doc.contains("article 9"));
        assert!(!doc.contains("article 10"));
    }

    #[test]
    fn unnamed_dictionary_emits_articles_without_heading() {
        let coll = collection(vec![FakeDict::new(None, "cat", &["chat"])]);

        let doc = translate(&coll, "cat", &TranslateOptions::default());
        assert_eq!(doc, "<p>chat</p>");
    }

    #[test]
    fn matching_dictionary_suppresses_no_results_marker() {
        let coll = collection(vec![
            FakeDict::new(Some("Misses"), "dog", &["chien"]),
            FakeDict::new(Some("Hits"), "cat", &["Katze"]),
        ]);

        let doc = translate(&coll, "cat", &TranslateOptions::default());
        assert!(!doc.contains("No results"));
        assert!(doc.contains("<p><h2>Hits</h2></p>"));
        assert!(!doc.contains("Misses"));
    }

    #[test]
    fn failing_dictionary_keeps_earlier_articles_and_other_dictionaries() {
        let mut broken = FakeDict::new(Some("Broken"), "cat", &["one", "two", "three"]);
        broken.fail_after = Some(1);
        let coll = collection(vec![
            FakeDict::new(Some("Healthy"), "cat", &["chat"]),
            broken,
        ]);

        let doc = translate(&coll, "cat", &TranslateOptions::default());
        // Broken comes first (found later), keeps its one good article.
        assert!(doc.contains("<p><h2>Broken</h2></p><p>one</p>"));
        assert!(!doc.contains("two"));
        assert!(doc.contains("<p><h2>Healthy</h2></p><p>chat</p>"));
    }

    #[test]
    fn options_pick_up_configured_cap() {
        let config = LookupConfig {
            articles_max: 2,
        };
        let many: Vec<String> = (0..5).map(|i| format!("a{i}")).collect();
        let many_refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let coll = collection(vec![FakeDict::new(Some("D"), "cat", &many_refs)]);

        let doc = translate(&coll, "cat", &TranslateOptions::from_config(&config));
        assert_eq!(doc.matches("<p>a").count(), 2);
    }
}
