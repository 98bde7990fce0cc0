//! Catalog row extraction
//!
//! Locates catalog rows by their marker class, falling back to a looser marker
//! when the primary one finds nothing, and turns each row into a [`RawRowRecord`].
//! A bad row is reported and skipped; it never stops the remaining rows.

use std::fmt;
use tracing::{debug, warn};

use super::config::ParsingConfig;
use super::document::DocumentNode;
use super::error::{ParsingError, ParsingResult};
use crate::domain::vehicle::RawRowRecord;

/// Which marker produced the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    Primary,
    Fallback,
    /// Neither marker matched; the document has no catalog data
    NotFound,
}

impl fmt::Display for RowMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Fallback => f.write_str("fallback"),
            Self::NotFound => f.write_str("none"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowExtraction {
    pub marker: RowMarker,
    /// One entry per matched row, in document order
    pub rows: Vec<ParsingResult<RawRowRecord>>,
}

impl RowExtraction {
    pub fn matched_rows(&self) -> usize {
        self.rows.len()
    }
}

pub struct CatalogRowExtractor {
    config: ParsingConfig,
}

impl CatalogRowExtractor {
    pub const fn new(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Select catalog row nodes, trying the primary marker first
    pub fn select_rows<N: DocumentNode>(&self, root: &N) -> (RowMarker, Vec<N>) {
        let rows = root.find_all(&self.config.row_tag, Some(self.config.primary_row_class.as_str()));
        if !rows.is_empty() {
            debug!(
                "Found {} rows with primary marker '{}'",
                rows.len(),
                self.config.primary_row_class
            );
            return (RowMarker::Primary, rows);
        }

        warn!(
            "No rows with class '{}', trying fallback '{}'",
            self.config.primary_row_class, self.config.fallback_row_class
        );
        let rows = root.find_all(&self.config.row_tag, Some(self.config.fallback_row_class.as_str()));
        if rows.is_empty() {
            (RowMarker::NotFound, rows)
        } else {
            debug!("Found {} rows with fallback marker", rows.len());
            (RowMarker::Fallback, rows)
        }
    }

    /// Read one row: cell texts plus the anchor of the model column
    pub fn extract_row<N: DocumentNode>(&self, row: &N, row_index: usize) -> ParsingResult<RawRowRecord> {
        let cells = row.find_all(&self.config.cell_tag, None);
        if cells.len() < self.config.min_cells {
            return Err(ParsingError::TooFewCells {
                row_index,
                found: cells.len(),
                required: self.config.min_cells,
            });
        }

        let link = cells.get(1).and_then(|cell| cell.find_first(&self.config.link_tag));

        Ok(RawRowRecord {
            columns: cells.iter().map(DocumentNode::text).collect(),
            link_href: link.as_ref().and_then(|a| a.attribute("href")),
            link_text: link.as_ref().map(DocumentNode::text),
            row_index,
        })
    }

    pub fn extract<N: DocumentNode>(&self, root: &N) -> RowExtraction {
        let (marker, nodes) = self.select_rows(root);
        let rows = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let result = self.extract_row(node, index);
                if let Err(e) = &result {
                    debug!("Skipping row: {}", e);
                }
                result
            })
            .collect();

        RowExtraction { marker, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::document::HtmlDocument;

    fn page(rows: &str) -> String {
        format!("<html><body><table class=\"banggia\"><tbody>{rows}</tbody></table></body></html>")
    }

    fn row(class: &str, brand: &str, link: &str, version: &str, kind: &str) -> String {
        format!(
            "<tr class=\"{class}\"><td>{brand}</td><td>{link}</td><td>{version}</td><td>{kind}</td><td>30.000.000</td></tr>"
        )
    }

    fn extractor() -> CatalogRowExtractor {
        CatalogRowExtractor::new(ParsingConfig::default())
    }

    #[test]
    fn test_primary_marker_rows() {
        let html = page(&format!(
            "{}{}",
            row("banggiaxe-item", "Honda", r#"<a href="/xe/vision#gia">Vision</a>"#, "Tiêu chuẩn", "Xe tay ga"),
            row("init-banggia", "Yamaha", r#"<a href="/xe/janus">Janus</a>"#, "2024", "Xe tay ga"),
        ));
        let doc = HtmlDocument::parse(&html);
        let extraction = extractor().extract(&doc.root());

        assert_eq!(extraction.marker, RowMarker::Primary);
        assert_eq!(extraction.matched_rows(), 1);
        let record = extraction.rows[0].as_ref().unwrap();
        assert_eq!(record.brand(), "Honda");
        assert_eq!(record.model_name(), "Vision");
        assert_eq!(record.link_href.as_deref(), Some("/xe/vision#gia"));
        assert_eq!(record.version(), "Tiêu chuẩn");
        assert_eq!(record.raw_type(), "Xe tay ga");
        assert_eq!(record.columns.len(), 5);
    }

    #[test]
    fn test_fallback_marker_used_when_primary_is_absent() {
        let html = page(&format!(
            "{}{}",
            row("init-banggia", "Yamaha", r#"<a href="/xe/janus">Janus</a>"#, "2024", "Xe tay ga"),
            row("init-banggia", "Yamaha", r#"<a href="/xe/exciter">Exciter</a>"#, "2024", "Xe côn tay"),
        ));
        let doc = HtmlDocument::parse(&html);
        let extraction = extractor().extract(&doc.root());

        assert_eq!(extraction.marker, RowMarker::Fallback);
        assert_eq!(extraction.matched_rows(), 2);
        assert!(extraction.rows.iter().all(Result::is_ok));
    }

    #[test]
    fn test_no_marker_yields_no_rows() {
        let html = page(&row("something-else", "Honda", "Wave", "2024", "Xe số"));
        let doc = HtmlDocument::parse(&html);
        let extraction = extractor().extract(&doc.root());

        assert_eq!(extraction.marker, RowMarker::NotFound);
        assert!(extraction.rows.is_empty());
    }

    #[test]
    fn test_short_row_is_skipped_without_stopping_others() {
        let html = page(&format!(
            "<tr class=\"banggiaxe-item\"><td>Honda</td><td>Wave</td></tr>{}",
            row("banggiaxe-item", "Honda", r#"<a href="/xe/wave">Wave</a>"#, "2024", "Xe số"),
        ));
        let doc = HtmlDocument::parse(&html);
        let extraction = extractor().extract(&doc.root());

        assert_eq!(extraction.matched_rows(), 2);
        assert_eq!(
            extraction.rows[0],
            Err(ParsingError::TooFewCells {
                row_index: 0,
                found: 2,
                required: 5
            })
        );
        assert_eq!(extraction.rows[1].as_ref().unwrap().row_index, 1);
    }

    #[test]
    fn test_row_without_anchor_uses_cell_text() {
        let html = page(&row("banggiaxe-item", "Honda", "Future 125", "2024", "Xe số"));
        let doc = HtmlDocument::parse(&html);
        let extraction = extractor().extract(&doc.root());

        let record = extraction.rows[0].as_ref().unwrap();
        assert_eq!(record.model_name(), "Future 125");
        assert_eq!(record.link_href, None);
        assert_eq!(record.link_text, None);
    }

    #[test]
    fn test_anchor_without_href() {
        let html = page(&row("banggiaxe-item", "Honda", "<a>SH 160i</a>", "ABS", "Xe tay ga"));
        let doc = HtmlDocument::parse(&html);
        let extraction = extractor().extract(&doc.root());

        let record = extraction.rows[0].as_ref().unwrap();
        assert_eq!(record.link_text.as_deref(), Some("SH 160i"));
        assert_eq!(record.link_href, None);
    }
}
