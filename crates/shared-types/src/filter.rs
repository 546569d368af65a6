//! Client-side search, tab partitioning and search debouncing.

use std::collections::BTreeMap;

/// Records that can be matched by a free-text search box.
pub trait Searchable {
    /// Text fields the query is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match over `fields`. A blank query matches.
pub fn matches_query(fields: &[&str], query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the items whose search fields contain `query`.
pub fn filter_by_query<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_query(&item.search_fields(), query))
        .collect()
}

/// Selected tab of a category or status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabFilter<K> {
    #[default]
    All,
    Only(K),
}

impl<K: PartialEq> TabFilter<K> {
    pub fn admits(&self, key: &K) -> bool {
        match self {
            TabFilter::All => true,
            TabFilter::Only(selected) => selected == key,
        }
    }
}

/// Apply a search query and a tab filter together.
pub fn apply_filters<'a, T, K, F>(items: &'a [T], query: &str, tab: &TabFilter<K>, key: F) -> Vec<&'a T>
where
    T: Searchable,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    items
        .iter()
        .filter(|item| tab.admits(&key(*item)))
        .filter(|item| matches_query(&item.search_fields(), query))
        .collect()
}

/// Group items by `key`. Every item lands in exactly one group; group order
/// follows the key's ordering.
pub fn partition<'a, T, K, F>(items: &'a [T], key: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Generation counter for debounced input.
///
/// Each keystroke takes a ticket; after the delay only the holder of the
/// latest ticket may commit the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceGate {
    generation: u64,
}

impl DebounceGate {
    pub fn ticket(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.generation == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Doc {
        title: &'static str,
        description: &'static str,
        category: u8,
    }

    impl Searchable for Doc {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.title, self.description]
        }
    }

    fn docs() -> Vec<Doc> {
        vec![
            Doc { title: "Leave Policy", description: "Annual leave rules", category: 1 },
            Doc { title: "Contract", description: "Employment CONTRACT for staff", category: 2 },
            Doc { title: "Payslip March", description: "", category: 3 },
            Doc { title: "Code of conduct", description: "policy on behaviour", category: 1 },
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let docs = docs();
        let hits: Vec<&str> = filter_by_query(&docs, "POLICY").iter().map(|d| d.title).collect();
        assert_eq!(hits, vec!["Leave Policy", "Code of conduct"]);

        let hits: Vec<&str> = filter_by_query(&docs, "contract").iter().map(|d| d.title).collect();
        assert_eq!(hits, vec!["Contract"]);
    }

    #[test]
    fn blank_query_matches_everything() {
        let docs = docs();
        assert_eq!(filter_by_query(&docs, "").len(), docs.len());
        assert_eq!(filter_by_query(&docs, "   ").len(), docs.len());
    }

    #[test]
    fn partition_has_no_overlap_and_no_omission() {
        let docs = docs();
        let groups = partition(&docs, |d| d.category);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, docs.len());
        for doc in &docs {
            let homes = groups
                .iter()
                .filter(|(_, members)| members.iter().any(|m| std::ptr::eq(*m, doc)))
                .count();
            assert_eq!(homes, 1);
        }
        assert_eq!(groups[&1].len(), 2);
    }

    #[test]
    fn tabs_and_query_combine() {
        let docs = docs();
        let hits = apply_filters(&docs, "policy", &TabFilter::Only(1), |d| d.category);
        assert_eq!(hits.len(), 2);
        let hits = apply_filters(&docs, "policy", &TabFilter::Only(2), |d| d.category);
        assert!(hits.is_empty());
        let hits = apply_filters(&docs, "", &TabFilter::All, |d| d.category);
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn only_latest_debounce_ticket_commits() {
        let mut gate = DebounceGate::default();
        let first = gate.ticket();
        let second = gate.ticket();
        assert!(!gate.is_latest(first));
        assert!(gate.is_latest(second));
    }
}
