// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hash-based section navigation.

use crate::ui::dom::Document;

/// Scroll to the element with this id, if it exists.
pub fn scroll_to_section(doc: &mut Document, section_id: &str) -> bool {
    doc.scroll_into_view(section_id)
}

/// React to the current location hash.
pub fn handle_hash_change(doc: &mut Document) -> bool {
    let section = doc.location_hash().trim_start_matches('#').to_string();
    if section.is_empty() {
        return false;
    }
    scroll_to_section(doc, &section)
}

/// Set the location hash and scroll to the matching section.
pub fn navigate_to(doc: &mut Document, hash: &str) -> bool {
    doc.set_location_hash(hash);
    handle_hash_change(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dom::Element;

    #[test]
    fn test_navigate_scrolls_to_existing_section() {
        let mut doc = Document::new();
        doc.append(Element::new("section").id("pricing"));

        assert!(navigate_to(&mut doc, "#pricing"));
        assert_eq!(doc.scrolled_to(), Some("pricing"));
        assert_eq!(doc.location_hash(), "#pricing");
    }

    #[test]
    fn test_unknown_or_empty_hash_does_nothing() {
        let mut doc = Document::new();
        assert!(!navigate_to(&mut doc, "#missing"));
        assert!(!navigate_to(&mut doc, "#"));
        assert_eq!(doc.scrolled_to(), None);
    }
}
