// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lazy image loading.

use crate::ui::dom::{Document, Element, NodeId};

const DATA_SRC: &str = "data-src";

/// An `img` whose real source is deferred until it scrolls into view.
pub fn lazy_image(data_src: &str, alt: &str) -> Element {
    Element::new("img")
        .class("lazy")
        .attr(DATA_SRC, data_src)
        .attr("alt", alt)
}

/// Observe every deferred image, or load them all at once when the
/// environment has no intersection observer. Returns how many were found.
pub fn setup_lazy_loading(doc: &mut Document) -> usize {
    let images = doc.node_ids(&|e| e.tag() == "img" && e.get_attr(DATA_SRC).is_some());

    if doc.supports_intersection_observer() {
        for image in &images {
            doc.observe(*image);
        }
    } else {
        for image in &images {
            load_image(doc, *image);
        }
    }

    tracing::debug!(count = images.len(), "Lazy images registered");
    images.len()
}

/// Intersection callback: load an observed image and stop observing it.
pub fn handle_intersection(doc: &mut Document, image: NodeId) -> bool {
    if !doc.unobserve(image) {
        return false;
    }
    load_image(doc, image);
    true
}

fn load_image(doc: &mut Document, image: NodeId) {
    if let Some(img) = doc.get_mut(image) {
        if let Some(src) = img.get_attr(DATA_SRC).map(str::to_string) {
            img.set_attr("src", src);
            img.remove_class("lazy");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_loads_on_intersection() {
        let mut doc = Document::new();
        let img = doc.append(lazy_image("/img/hero.webp", "Hero"));

        assert_eq!(setup_lazy_loading(&mut doc), 1);
        assert!(doc.get(img).unwrap().get_attr("src").is_none());

        assert!(handle_intersection(&mut doc, img));
        let loaded = doc.get(img).unwrap();
        assert_eq!(loaded.get_attr("src"), Some("/img/hero.webp"));
        assert!(!loaded.has_class("lazy"));

        // already unobserved
        assert!(!handle_intersection(&mut doc, img));
    }

    #[test]
    fn test_fallback_loads_everything() {
        let mut doc = Document::new();
        doc.set_intersection_observer(false);
        doc.append(lazy_image("/a.webp", "a"));
        doc.append(lazy_image("/b.webp", "b"));
        doc.append(Element::new("img").attr("src", "/c.webp"));

        assert_eq!(setup_lazy_loading(&mut doc), 2);
        let sources: Vec<_> = doc
            .select(&|e| e.tag() == "img")
            .iter()
            .filter_map(|e| e.get_attr("src"))
            .map(str::to_string)
            .collect();
        assert_eq!(sources, vec!["/a.webp", "/b.webp", "/c.webp"]);
    }
}
