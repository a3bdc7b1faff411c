//! Generic list query state for admin panels.
//!
//! Every admin list view takes the same four user-supplied controls (free
//! text search, a categorical filter, a sort key, a page number) and turns an
//! unordered set of records into a deterministic paginated slice. The
//! pipeline is always filter, then sort, then paginate. Controls serialize
//! to and from flat string parameters so admin views stay bookmarkable, and
//! malformed parameters normalize to defaults instead of failing the view.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

pub const PARAM_SEARCH: &str = "q";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_PAGE: &str = "page";

/// A control drawn from a closed set of named values.
///
/// `Default` is the sentinel the control falls back to when a raw parameter
/// is missing or not a member of the set. For category filters the default
/// is the "all" sentinel that matches every record.
pub trait ControlValue: Copy + Default + PartialEq {
    /// Accept a raw string only if it names a member of the set.
    fn parse(raw: &str) -> Option<Self>;
    /// The string this value writes into query parameters.
    fn as_param(&self) -> &'static str;
}

/// The combined search/filter/sort/page state of a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListControls<C, S> {
    pub search: String,
    pub category: C,
    pub sort: S,
    pub page: u64,
}

impl<C: ControlValue, S: ControlValue> Default for ListControls<C, S> {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: C::default(),
            sort: S::default(),
            page: 1,
        }
    }
}

impl<C: ControlValue, S: ControlValue> ListControls<C, S> {
    /// Parse controls from a flat parameter map.
    ///
    /// Never fails: unknown enum values, non-positive or non-numeric pages
    /// and missing keys all substitute the declared defaults, so manually
    /// edited or stale admin URLs still render.
    pub fn parse(params: &HashMap<String, String>) -> Self {
        Self {
            search: params.get(PARAM_SEARCH).cloned().unwrap_or_default(),
            category: params
                .get(PARAM_CATEGORY)
                .and_then(|raw| C::parse(raw))
                .unwrap_or_default(),
            sort: params
                .get(PARAM_SORT)
                .and_then(|raw| S::parse(raw))
                .unwrap_or_default(),
            page: params
                .get(PARAM_PAGE)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|page| *page >= 1)
                .unwrap_or(1),
        }
    }

    /// Serialize controls to a flat parameter map, omitting every control
    /// that still holds its default so shared URLs stay minimal.
    pub fn serialize(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if !self.search.is_empty() {
            params.insert(PARAM_SEARCH.to_string(), self.search.clone());
        }
        if self.category != C::default() {
            params.insert(
                PARAM_CATEGORY.to_string(),
                self.category.as_param().to_string(),
            );
        }
        if self.sort != S::default() {
            params.insert(PARAM_SORT.to_string(), self.sort.as_param().to_string());
        }
        if self.page != 1 {
            params.insert(PARAM_PAGE.to_string(), self.page.to_string());
        }
        params
    }
}

/// Per-entity wiring for the generic pipeline: which fields free-text search
/// scans, which field the category filter compares against, and how each
/// sort key orders two records.
pub struct ListSpec<T, S> {
    pub search_fields: fn(&T) -> Vec<Option<&str>>,
    pub category_key: fn(&T) -> Option<&str>,
    pub comparator: fn(S, &T, &T) -> Ordering,
}

/// One page of a filtered and sorted result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub safe_page: u64,
    pub total_pages: u64,
    pub total_items: usize,
}

/// Retain the records matching both the search and the category filter.
///
/// The search needle is trimmed and lower-cased; an empty needle matches
/// everything. A record matches the search when any designated field
/// contains the needle case-insensitively; absent fields are skipped. The
/// category matches when the control is at its "all" default or the record's
/// category key equals the control's parameter value. Output order is not
/// part of the contract; sorting is a separate step.
pub fn apply_filters<T, C: ControlValue>(
    mut records: Vec<T>,
    search: &str,
    category: C,
    search_fields: fn(&T) -> Vec<Option<&str>>,
    category_key: fn(&T) -> Option<&str>,
) -> Vec<T> {
    let needle = search.trim().to_lowercase();
    let match_all_categories = category == C::default();

    records.retain(|record| {
        let search_ok = needle.is_empty()
            || search_fields(record)
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle));
        let category_ok =
            match_all_categories || category_key(record) == Some(category.as_param());
        search_ok && category_ok
    });
    records
}

/// Order records by the named sort strategy.
///
/// The sort is stable so records comparing equal (colliding timestamps)
/// retain their relative order. Always applied after filtering.
pub fn apply_sort<T, S: Copy>(
    mut records: Vec<T>,
    sort: S,
    comparator: fn(S, &T, &T) -> Ordering,
) -> Vec<T> {
    records.sort_by(|a, b| comparator(sort, a, b));
    records
}

/// Slice one page out of an already filtered and sorted result set.
///
/// An out-of-range requested page is clamped, never an error, and an empty
/// input yields a single empty page.
pub fn paginate<T>(records: Vec<T>, page: u64, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = records.len();
    let total_pages = (total_items.div_ceil(page_size)).max(1) as u64;
    let safe_page = page.clamp(1, total_pages);
    let start = (safe_page - 1) as usize * page_size;

    let items = records.into_iter().skip(start).take(page_size).collect();
    Page {
        items,
        safe_page,
        total_pages,
        total_items,
    }
}

/// Run the full pipeline: filter, then sort, then paginate.
pub fn run_query<T, C: ControlValue, S: ControlValue>(
    records: Vec<T>,
    controls: &ListControls<C, S>,
    spec: &ListSpec<T, S>,
    page_size: usize,
) -> Page<T> {
    let filtered = apply_filters(
        records,
        &controls.search,
        controls.category,
        spec.search_fields,
        spec.category_key,
    );
    let sorted = apply_sort(filtered, controls.sort, spec.comparator);
    paginate(sorted, controls.page, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        title: String,
        subtitle: Option<String>,
        kind: &'static str,
        stamp: i64,
    }

    fn item(title: &str, kind: &'static str, stamp: i64) -> Item {
        Item {
            title: title.to_string(),
            subtitle: None,
            kind,
            stamp,
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum KindFilter {
        #[default]
        All,
        Workshop,
        Social,
    }

    impl ControlValue for KindFilter {
        fn parse(raw: &str) -> Option<Self> {
            match raw {
                "all" => Some(KindFilter::All),
                "workshop" => Some(KindFilter::Workshop),
                "social" => Some(KindFilter::Social),
                _ => None,
            }
        }

        fn as_param(&self) -> &'static str {
            match self {
                KindFilter::All => "all",
                KindFilter::Workshop => "workshop",
                KindFilter::Social => "social",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum Sort {
        #[default]
        Newest,
        Oldest,
        Title,
    }

    impl ControlValue for Sort {
        fn parse(raw: &str) -> Option<Self> {
            match raw {
                "newest" => Some(Sort::Newest),
                "oldest" => Some(Sort::Oldest),
                "title" => Some(Sort::Title),
                _ => None,
            }
        }

        fn as_param(&self) -> &'static str {
            match self {
                Sort::Newest => "newest",
                Sort::Oldest => "oldest",
                Sort::Title => "title",
            }
        }
    }

    fn search_fields(item: &Item) -> Vec<Option<&str>> {
        vec![Some(item.title.as_str()), item.subtitle.as_deref()]
    }

    fn category_key(item: &Item) -> Option<&str> {
        Some(item.kind)
    }

    fn comparator(sort: Sort, a: &Item, b: &Item) -> Ordering {
        match sort {
            Sort::Newest => b.stamp.cmp(&a.stamp),
            Sort::Oldest => a.stamp.cmp(&b.stamp),
            Sort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }

    fn spec() -> ListSpec<Item, Sort> {
        ListSpec {
            search_fields,
            category_key,
            comparator,
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            item("Rust Workshop", "workshop", 30),
            item("Summer Barbecue", "social", 20),
            item("Intro to Git", "workshop", 10),
        ]
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let filtered =
            apply_filters(sample(), "", KindFilter::All, search_fields, category_key);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filtered =
            apply_filters(sample(), "  RUST ", KindFilter::All, search_fields, category_key);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Rust Workshop");
    }

    #[test]
    fn test_absent_fields_are_skipped_not_failed() {
        let mut records = sample();
        records[0].subtitle = Some("hands-on session".to_string());
        let filtered = apply_filters(
            records,
            "hands-on",
            KindFilter::All,
            search_fields,
            category_key,
        );
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_category_filter_and_search_are_anded() {
        let filtered = apply_filters(
            sample(),
            "i",
            KindFilter::Workshop,
            search_fields,
            category_key,
        );
        // "Summer Barbecue" fails the category, "Rust Workshop" fails the
        // search; only "Intro to Git" passes both.
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Intro to Git");
    }

    #[test]
    fn test_filter_output_is_a_subset_of_the_input() {
        let input = sample();
        let filtered = apply_filters(
            input.clone(),
            "workshop",
            KindFilter::All,
            search_fields,
            category_key,
        );
        assert!(filtered.iter().all(|f| input.contains(f)));

        let none = apply_filters(
            input,
            "no such record",
            KindFilter::All,
            search_fields,
            category_key,
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_sort_strategies() {
        let sorted = apply_sort(sample(), Sort::Newest, comparator);
        assert_eq!(sorted[0].stamp, 30);
        assert_eq!(sorted[2].stamp, 10);

        let sorted = apply_sort(sample(), Sort::Oldest, comparator);
        assert_eq!(sorted[0].stamp, 10);

        let sorted = apply_sort(sample(), Sort::Title, comparator);
        assert_eq!(sorted[0].title, "Intro to Git");
    }

    #[test]
    fn test_sort_is_stable_on_colliding_timestamps() {
        let records = vec![
            item("First", "social", 5),
            item("Second", "social", 5),
            item("Third", "social", 5),
        ];
        let sorted = apply_sort(records, Sort::Newest, comparator);
        let titles: Vec<&str> = sorted.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_paginate_clamps_out_of_range_pages() {
        let records: Vec<i32> = (0..23).collect();

        // Requested page far beyond the end.
        let page = paginate(records.clone(), 99, 10);
        assert_eq!(page.safe_page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 23);
        assert_eq!(page.items.len(), 3);

        // Page zero clamps to one.
        let page = paginate(records, 0, 10);
        assert_eq!(page.safe_page, 1);
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn test_paginate_empty_input() {
        let page = paginate(Vec::<i32>::new(), 7, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.safe_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn test_pages_concatenate_to_the_full_input() {
        let records: Vec<i32> = (0..23).collect();
        let total_pages = paginate(records.clone(), 1, 10).total_pages;

        let mut reassembled = Vec::new();
        for page_no in 1..=total_pages {
            let page = paginate(records.clone(), page_no, 10);
            assert!(page.items.len() <= 10);
            reassembled.extend(page.items);
        }
        assert_eq!(reassembled, records);
    }

    #[test]
    fn test_parse_substitutes_defaults_for_malformed_input() {
        let mut params = HashMap::new();
        params.insert(PARAM_CATEGORY.to_string(), "bogus".to_string());
        params.insert(PARAM_PAGE.to_string(), "-4".to_string());

        let controls: ListControls<KindFilter, Sort> = ListControls::parse(&params);
        assert_eq!(controls.category, KindFilter::All);
        assert_eq!(controls.page, 1);
        assert_eq!(controls.sort, Sort::Newest);
        assert_eq!(controls.search, "");
    }

    #[test]
    fn test_parse_rejects_zero_and_non_numeric_pages() {
        for raw in ["0", "abc", "1.5", ""] {
            let mut params = HashMap::new();
            params.insert(PARAM_PAGE.to_string(), raw.to_string());
            let controls: ListControls<KindFilter, Sort> = ListControls::parse(&params);
            assert_eq!(controls.page, 1, "page {:?} should normalize to 1", raw);
        }
    }

    #[test]
    fn test_serialize_omits_defaults() {
        let controls: ListControls<KindFilter, Sort> = ListControls::default();
        assert!(controls.serialize().is_empty());

        let controls = ListControls {
            search: "rust".to_string(),
            category: KindFilter::Workshop,
            sort: Sort::Title,
            page: 3,
        };
        let params = controls.serialize();
        assert_eq!(params.get(PARAM_SEARCH).map(String::as_str), Some("rust"));
        assert_eq!(
            params.get(PARAM_CATEGORY).map(String::as_str),
            Some("workshop")
        );
        assert_eq!(params.get(PARAM_SORT).map(String::as_str), Some("title"));
        assert_eq!(params.get(PARAM_PAGE).map(String::as_str), Some("3"));
    }

    #[test]
    fn test_serialize_parse_round_trip_is_idempotent() {
        let cases = vec![
            ListControls::<KindFilter, Sort>::default(),
            ListControls {
                search: "git".to_string(),
                category: KindFilter::Social,
                sort: Sort::Oldest,
                page: 2,
            },
            ListControls {
                search: String::new(),
                category: KindFilter::All,
                sort: Sort::Title,
                page: 1,
            },
        ];

        for controls in cases {
            let serialized = controls.serialize();
            let as_map: HashMap<String, String> = serialized.clone().into_iter().collect();
            let reparsed: ListControls<KindFilter, Sort> = ListControls::parse(&as_map);
            assert_eq!(reparsed.serialize(), serialized);
        }
    }

    #[test]
    fn test_run_query_composes_filter_sort_paginate() {
        let controls = ListControls {
            search: String::new(),
            category: KindFilter::Workshop,
            sort: Sort::Oldest,
            page: 1,
        };
        let page = run_query(sample(), &controls, &spec(), 10);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].title, "Intro to Git");
        assert_eq!(page.items[1].title, "Rust Workshop");
    }
}
