use std::fs;
use std::path::Path;

use inkdict_core::dictionary::{Article, ArticleIter, Dictionary};
use inkdict_core::error::LookupError;

use crate::data::DataFile;
use crate::error::Result;
use crate::index::{self, Index, IndexEntry, SortMode};

/// Headwords the display name may be stored under.
const NAME_HEADWORDS: [&str; 2] = ["00-database-short", "00databaseshort"];

/// One opened index/data pair.
///
/// Only constructed from a pair that passed [`validate`]; dropping it
/// releases the underlying file handle.
///
/// [`validate`]: DictdDictionary::validate
pub struct DictdDictionary {
    name: Option<String>,
    index: Index,
    data: DataFile,
}

impl DictdDictionary {
    /// Inspect a candidate pair without committing to it.
    ///
    /// Returns the collation the index is sorted by, or `None` when the
    /// pair is not a dictionary. Many scanned files are not; this is a
    /// normal outcome, never an error.
    pub fn validate(index_path: &Path, data_path: &Path) -> Option<SortMode> {
        if !DataFile::probe(data_path) {
            return None;
        }
        let text = fs::read_to_string(index_path).ok()?;
        let entries = index::parse(&text).ok()?;
        index::detect_sort_mode(&entries)
    }

    /// Open a validated pair for searching.
    pub fn open(index_path: &Path, data_path: &Path, sort: SortMode) -> Result<Self> {
        let text = fs::read_to_string(index_path)?;
        let entries = index::parse(&text)?;
        let index = Index::new(entries, sort);
        let data = DataFile::open(data_path)?;

        let mut dict = Self {
            name: None,
            index,
            data,
        };
        dict.name = dict.read_name();
        Ok(dict)
    }

    pub fn sort_mode(&self) -> SortMode {
        self.index.sort_mode()
    }

    pub fn entry_count(&self) -> usize {
        self.index.len()
    }

    fn read_name(&self) -> Option<String> {
        let entry = NAME_HEADWORDS
            .iter()
            .find_map(|h| self.index.lookup_exact(h))?;
        let bytes = self.data.fetch(entry.offset, entry.size).ok()?;
        parse_short_name(&String::from_utf8_lossy(&bytes))
    }

    fn fetch_article(&self, entry: &IndexEntry) -> Result<Article> {
        let bytes = self.data.fetch(entry.offset, entry.size)?;
        Ok(Article {
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// The name article usually repeats its own headword on the first line;
/// the name proper is the first line that isn't metadata.
fn parse_short_name(article: &str) -> Option<String> {
    article
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !index::is_metadata(line))
        .map(str::to_string)
}

impl Dictionary for DictdDictionary {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn find_prefix<'a>(&'a self, query: &str) -> ArticleIter<'a> {
        Box::new(FindPrefix {
            dict: self,
            entries: self.index.prefix_range(query).iter(),
        })
    }
}

/// Lazy article sequence for one query: each step decompresses exactly
/// one article.
struct FindPrefix<'a> {
    dict: &'a DictdDictionary,
    entries: std::slice::Iter<'a, IndexEntry>,
}

impl Iterator for FindPrefix<'_> {
    type Item = std::result::Result<Article, LookupError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = self.entries.next()?;
            if index::is_metadata(&entry.headword) {
                continue;
            }
            return Some(self.dict.fetch_article(entry).map_err(Into::into));
        }
    }
}
