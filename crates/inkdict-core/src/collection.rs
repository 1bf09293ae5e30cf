use crate::dictionary::Dictionary;

/// An ordered, owned set of opened dictionaries.
///
/// The order is most-recently-discovered first: discovery inserts at the
/// front, so a dictionary found later in the scan is queried (and shown)
/// before one found earlier. Section order in the output document
/// follows this order.
#[derive(Default)]
pub struct DictionaryCollection {
    dicts: Vec<Box<dyn Dictionary>>,
}

impl DictionaryCollection {
    pub fn new() -> Self {
        Self { dicts: Vec::new() }
    }

    /// Insert at the front, making `dict` the first queried.
    pub fn insert_front(&mut self, dict: Box<dyn Dictionary>) {
        self.dicts.insert(0, dict);
    }

    pub fn len(&self) -> usize {
        self.dicts.len()
    }

    /// An empty collection is the "no dictionaries available" signal,
    /// not an error.
    pub fn is_empty(&self) -> bool {
        self.dicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Dictionary> {
        self.dicts.iter().map(|d| d.as_ref())
    }

    /// Display names in collection order (`None` for anonymous ones).
    pub fn names(&self) -> Vec<Option<String>> {
        self.dicts
            .iter()
            .map(|d| d.name().map(str::to_string))
            .collect()
    }
}
