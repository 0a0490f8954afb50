//! Literal catalog matching with the earlier-line context rule.

use tracing::{debug, trace};

use crate::models::annotation::Annotation;
use crate::models::catalog::{CatalogEntry, EntityCatalog};
use crate::models::document::NormalizedDocument;

use super::EntityAnnotator;

/// Annotator over a fixed [`EntityCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogAnnotator {
    catalog: EntityCatalog,
}

impl CatalogAnnotator {
    pub fn new(catalog: EntityCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }
}

impl EntityAnnotator for CatalogAnnotator {
    fn annotate(&self, document: &NormalizedDocument) -> Vec<Annotation> {
        annotate(document, &self.catalog)
    }
}

/// Annotate every line against every catalog entry.
///
/// Records come out ordered by line, then by catalog declaration order. Only
/// the first occurrence of an entry per line is recorded. An entry with a
/// context qualifies on a line only if the first line containing the context
/// text comes strictly before it.
pub fn annotate(document: &NormalizedDocument, catalog: &EntityCatalog) -> Vec<Annotation> {
    let lines = document.lines();

    // 0-based index of the first line containing each entry's context.
    let context_lines: Vec<Option<Option<usize>>> = catalog
        .iter()
        .map(|entry| {
            entry
                .context
                .as_deref()
                .map(|ctx| lines.iter().position(|line| line.contains(ctx)))
        })
        .collect();

    let mut annotations = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        for (entry, context_line) in catalog.iter().zip(&context_lines) {
            let Some((begin, end)) = find_char_span(line, &entry.text) else {
                continue;
            };

            if let Some(first) = context_line {
                if !first.is_some_and(|first| first < idx) {
                    trace!(
                        "Skipping {:?} on line {}: context {:?} not on an earlier line",
                        entry.text,
                        idx + 1,
                        entry.context
                    );
                    continue;
                }
            }

            annotations.push(annotation(entry, idx + 1, begin, end));
        }
    }

    debug!(
        "Annotated {} lines against {} catalog entries: {} records",
        lines.len(),
        catalog.len(),
        annotations.len()
    );

    annotations
}

fn annotation(entry: &CatalogEntry, line: usize, begin: usize, end: usize) -> Annotation {
    Annotation {
        line,
        begin_offset: begin,
        end_offset: end,
        text: entry.text.clone(),
        entity_type: entry.entity_type.clone(),
    }
}

/// Character span `(begin, end)` of the first occurrence of `needle` in `haystack`.
///
/// Offsets count characters, not bytes.
pub fn find_char_span(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let byte_start = haystack.find(needle)?;
    let begin = haystack[..byte_start].chars().count();
    Some((begin, begin + needle.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use pretty_assertions::assert_eq;

    fn ann(line: usize, begin: usize, end: usize, text: &str, ty: &str) -> Annotation {
        Annotation {
            line,
            begin_offset: begin,
            end_offset: end,
            text: text.to_string(),
            entity_type: ty.to_string(),
        }
    }

    fn char_slice(line: &str, begin: usize, end: usize) -> String {
        line.chars().skip(begin).take(end - begin).collect()
    }

    #[test]
    fn test_global_tiles_purchase_order() {
        let pages = ["Global Tiles\nPO 95481\n", "02920099399\nCF24 5EF\n"];
        let doc = Normalizer::default().normalize(&pages).unwrap();
        let annotations = annotate(&doc, &EntityCatalog::global_tiles());

        assert_eq!(
            annotations,
            vec![
                ann(1, 0, 12, "Global Tiles", "COMPANY_NAME"),
                ann(2, 3, 8, "95481", "CUSTOMER_PO_NUMBER"),
                ann(3, 0, 8, "CF24 5EF", "POSTCODE"),
                ann(4, 9, 16, "TIS3067", "PRODUCT"),
                ann(5, 10, 11, "1", "QUANTITY"),
                ann(6, 9, 16, "TIS4294", "PRODUCT"),
                ann(7, 10, 11, "1", "QUANTITY"),
                ann(7, 10, 11, "1", "QUANTITY"),
            ]
        );
    }

    #[test]
    fn test_offsets_slice_back_to_text() {
        let doc = NormalizedDocument::from_text(
            "Global Tiles Ltd\ninfo@globaltiles.co.uk / Global Tiles\nPostcode: CF24 5EF",
        );
        for a in annotate(&doc, &EntityCatalog::global_tiles()) {
            let line = doc.line(a.line).unwrap();
            assert_eq!(char_slice(line, a.begin_offset, a.end_offset), a.text);
        }
    }

    #[test]
    fn test_email_offsets() {
        let doc = NormalizedDocument::from_text("Contact\nEmail: info@globaltiles.co.uk");
        assert_eq!(
            annotate(&doc, &EntityCatalog::global_tiles()),
            vec![ann(2, 7, 29, "info@globaltiles.co.uk", "EMAIL")]
        );
    }

    #[test]
    fn test_first_occurrence_per_line_only() {
        let doc = NormalizedDocument::from_text("TIS3067 and TIS3067");
        let catalog = EntityCatalog::new(vec![CatalogEntry::new("TIS3067", "PRODUCT")]);
        assert_eq!(annotate(&doc, &catalog), vec![ann(1, 0, 7, "TIS3067", "PRODUCT")]);
    }

    #[test]
    fn test_context_on_same_line_does_not_qualify() {
        let doc = NormalizedDocument::from_text("TIS3067 x1\nQty 1");
        let catalog = EntityCatalog::new(vec![
            CatalogEntry::new("1", "QUANTITY").with_context("TIS3067"),
        ]);
        assert_eq!(annotate(&doc, &catalog), vec![ann(2, 4, 5, "1", "QUANTITY")]);
    }

    #[test]
    fn test_context_absent_discards_matches() {
        let doc = NormalizedDocument::from_text("Quantity: 1\nQuantity: 1");
        let catalog = EntityCatalog::new(vec![
            CatalogEntry::new("1", "QUANTITY").with_context("TIS9999"),
        ]);
        assert!(annotate(&doc, &catalog).is_empty());
    }

    #[test]
    fn test_nothing_on_or_before_first_context_line() {
        let doc = NormalizedDocument::from_text("1 box\nTIS3067\n1 box\nTIS3067\n1 box");
        let catalog = EntityCatalog::new(vec![
            CatalogEntry::new("1", "QUANTITY").with_context("TIS3067"),
        ]);
        let lines: Vec<usize> = annotate(&doc, &catalog).iter().map(|a| a.line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn test_catalog_order_within_line() {
        let doc = NormalizedDocument::from_text("CF24 5EF Global Tiles");
        let catalog = EntityCatalog::new(vec![
            CatalogEntry::new("Global Tiles", "COMPANY_NAME"),
            CatalogEntry::new("CF24 5EF", "POSTCODE"),
        ]);
        assert_eq!(
            annotate(&doc, &catalog),
            vec![
                ann(1, 9, 21, "Global Tiles", "COMPANY_NAME"),
                ann(1, 0, 8, "CF24 5EF", "POSTCODE"),
            ]
        );
    }

    #[test]
    fn test_empty_inputs_yield_no_records() {
        let doc = NormalizedDocument::from_text("Global Tiles");
        assert!(annotate(&doc, &EntityCatalog::default()).is_empty());

        let empty = NormalizedDocument::from_text("");
        assert!(annotate(&empty, &EntityCatalog::global_tiles()).is_empty());
    }

    #[test]
    fn test_char_offsets_after_multibyte() {
        assert_eq!(find_char_span("Łódź TIS3067", "TIS3067"), Some((5, 12)));
        assert_eq!(find_char_span("abc", ""), None);
        assert_eq!(find_char_span("abc", "d"), None);
    }

    #[test]
    fn test_trait_object() {
        let annotator: Box<dyn EntityAnnotator> =
            Box::new(CatalogAnnotator::new(EntityCatalog::global_tiles()));
        let doc = NormalizedDocument::from_text("Global Tiles");
        assert_eq!(annotator.annotate(&doc).len(), 1);
    }
}
