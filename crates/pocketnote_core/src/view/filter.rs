//! Free-text note filter for the search bar.
//!
//! # Responsibility
//! - Match notes against lower-cased whitespace-split search terms.
//!
//! # Invariants
//! - Blank queries return the whole collection unchanged.
//! - A note matches iff every term appears in its title or content
//!   (AND across terms, OR across the two fields per term).
//! - Result order is the input order.

use crate::model::note::Note;

/// Filters notes by a free-text query.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return notes.iter().collect();
    }

    let terms: Vec<String> = trimmed
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    notes
        .iter()
        .filter(|note| {
            let title = note.title.to_lowercase();
            let content = note.content.as_deref().unwrap_or("").to_lowercase();
            terms
                .iter()
                .all(|term| title.contains(term.as_str()) || content.contains(term.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_notes;
    use crate::model::note::Note;

    fn note(title: &str, content: Option<&str>) -> Note {
        let mut note = Note::new(title);
        note.content = content.map(str::to_string);
        note
    }

    #[test]
    fn terms_match_across_title_and_content() {
        let notes = vec![
            note("Team Meeting", Some("notes for the call")),
            note("Meeting", Some("agenda")),
        ];

        let hits = filter_notes(&notes, "meeting notes");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Team Meeting");
    }

    #[test]
    fn whitespace_only_query_is_identity() {
        let notes = vec![note("a", None), note("b", None)];
        assert_eq!(filter_notes(&notes, "   ").len(), 2);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let notes = vec![note("Groceries", Some("Buy MILK"))];
        assert_eq!(filter_notes(&notes, "milk groceries").len(), 1);
    }
}
