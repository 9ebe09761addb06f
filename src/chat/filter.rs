//! Sidebar derivation: which conversations show, in what order, and which
//! substrings light up.
//!
//! Search text is treated as a literal substring, never a pattern, so
//! characters like `(` or `*` match themselves.

use std::ops::Range;

use super::store::Conversation;

/// Derive the sidebar's view of `conversations` for the current search text.
///
/// A conversation is shown when the query is empty or occurs
/// case-insensitively in its title or last-message preview. Starred
/// conversations sort first; inside each group, most recent activity first.
/// The sort is stable, so conversations with equal timestamps keep their
/// list order.
pub fn visible<'a>(conversations: &'a [Conversation], query: &str) -> Vec<&'a Conversation> {
    let needle = query.to_lowercase();
    let mut shown: Vec<&Conversation> = conversations
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.title.to_lowercase().contains(&needle)
                || c.last_message.to_lowercase().contains(&needle)
        })
        .collect();

    shown.sort_by(|a, b| {
        b.starred
            .cmp(&a.starred)
            .then_with(|| b.last_activity.cmp(&a.last_activity))
    });
    shown
}

/// Byte ranges of case-insensitive occurrences of `query` in `text`, used to
/// emphasize matches in rendered titles.
///
/// Offsets are computed on a lowercase folding of both strings. When folding
/// changes a byte length (a handful of non-ASCII cases) the offsets no longer
/// line up with `text`, so no ranges are returned and the title renders
/// unhighlighted rather than sliced at a bad boundary.
pub fn match_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let trimmed = query.trim();
    let needle = trimmed.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_lowercase();
    if haystack.len() != text.len() || needle.len() != trimmed.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        ranges.push(start..start + needle.len());
        from = start + needle.len();
    }

    ranges.retain(|r| text.is_char_boundary(r.start) && text.is_char_boundary(r.end));
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::store::ChatStore;

    fn store_with_titles(titles: &[&str]) -> ChatStore {
        let mut store = ChatStore::new();
        let seed = store.conversations()[0].id.clone();
        store.delete(&seed);
        for title in titles {
            store.new_chat();
            let id = store.conversations()[0].id.clone();
            store.rename(&id, title);
        }
        store
    }

    #[test]
    fn test_filter_matches_title_case_insensitively() {
        let store = store_with_titles(&["Pasta Night", "Grocery List"]);

        let shown = visible(store.conversations(), "past");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Pasta Night");

        assert!(visible(store.conversations(), "zzz").is_empty());
    }

    #[test]
    fn test_filter_matches_last_message_too() {
        let mut store = store_with_titles(&["Untitled"]);
        store.send_message("how much protein in lentils?");

        let shown = visible(store.conversations(), "LENTILS");
        assert_eq!(shown.len(), 1);
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let store = store_with_titles(&["A", "B", "C"]);
        assert_eq!(visible(store.conversations(), "").len(), 3);
    }

    #[test]
    fn test_starred_sort_before_unstarred_newest_first_within_groups() {
        // Created oldest-to-newest; new_chat prepends, so the raw list is
        // [newest .. oldest].
        let mut store = store_with_titles(&["old starred", "plain", "new starred"]);
        let ids: Vec<String> = store
            .conversations()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        // ids = [new starred, plain, old starred]
        store.set_starred(&ids[0], true);
        store.set_starred(&ids[2], true);

        let shown = visible(store.conversations(), "");
        let titles: Vec<&str> = shown.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["new starred", "old starred", "plain"]);
    }

    #[test]
    fn test_recency_orders_within_the_unstarred_group() {
        let mut store = store_with_titles(&["first", "second"]);
        let first = store
            .conversations()
            .iter()
            .find(|c| c.title == "first")
            .unwrap()
            .id
            .clone();

        // Activity bumps "first" ahead of "second".
        store.select(first);
        store.send_message("bump");

        let shown = visible(store.conversations(), "");
        assert_eq!(shown[0].title, "first");
        assert_eq!(shown[1].title, "second");
    }

    #[test]
    fn test_match_ranges_finds_every_occurrence() {
        let ranges = match_ranges("Pasta and more pasta", "pasta");
        assert_eq!(ranges, vec![0..5, 15..20]);
    }

    #[test]
    fn test_match_ranges_is_literal_not_a_pattern() {
        let ranges = match_ranges("Dinner (vegan)", "(vegan)");
        assert_eq!(ranges, vec![7..14]);
        assert!(match_ranges("Dinner", ".*").is_empty());
    }

    #[test]
    fn test_match_ranges_ignores_blank_queries() {
        assert!(match_ranges("Pasta Night", "").is_empty());
        assert!(match_ranges("Pasta Night", "   ").is_empty());
    }

    #[test]
    fn test_match_ranges_slices_on_char_boundaries() {
        for range in match_ranges("Crème brûlée time", "e") {
            // Slicing must never panic.
            let _ = &"Crème brûlée time"[range];
        }
    }
}
