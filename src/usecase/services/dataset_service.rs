use crate::domain::entities::course::Course;
use crate::domain::entities::lecturer::Lecturer;

/// Projection the listing UI needs from a canonical record: a stable natural
/// key (React list key, duplicate baseline) and a searchable haystack.
pub trait ListEntity {
    fn natural_key(&self) -> String;
    fn search_text(&self) -> String;
}

impl ListEntity for Lecturer {
    fn natural_key(&self) -> String {
        self.nid.clone()
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.nid, self.nidn, self.nama, self.username, self.email, self.telepon
        )
    }
}

impl ListEntity for Course {
    fn natural_key(&self) -> String {
        self.kode.clone()
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} semester {}",
            self.kode,
            self.nama,
            self.periode,
            self.jenis.label(),
            self.semester
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    pub page: usize,
    pub page_size: usize,
    pub search: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Per-item result of a fan-out bulk delete, keyed by natural key or id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl DeleteOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The canonical in-memory collection. Replaced wholesale on every refresh;
/// never patched incrementally. The generation counter stops a stale
/// in-flight response from overwriting newer state.
#[derive(Debug, Clone)]
pub struct DatasetStore<T> {
    items: Vec<T>,
    generation: u64,
}

impl<T> Default for DatasetStore<T> {
    fn default() -> Self {
        DatasetStore {
            items: Vec::new(),
            generation: 0,
        }
    }
}

impl<T> DatasetStore<T> {
    pub fn new() -> Self {
        DatasetStore::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Applies a fetched collection only if no newer refresh has started.
    pub fn apply(&mut self, generation: u64, items: Vec<T>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.items = items;
        true
    }
}

impl<T: Clone + ListEntity> DatasetStore<T> {
    pub fn query_page(&self, query: &PageQuery) -> PageResult<T> {
        let needle = query.search.trim().to_lowercase();
        let filtered: Vec<&T> = self
            .items
            .iter()
            .filter(|item| needle.is_empty() || item.search_text().to_lowercase().contains(&needle))
            .collect();

        let total = filtered.len();
        if query.page_size == 0 {
            return PageResult {
                items: filtered.into_iter().cloned().collect(),
                total,
            };
        }

        let start = query.page * query.page_size;
        let items = filtered
            .into_iter()
            .skip(start)
            .take(query.page_size)
            .cloned()
            .collect();
        PageResult { items, total }
    }

    pub fn find(&self, natural_key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.natural_key() == natural_key)
    }
}
