//! Availability extraction from upstream responses.
//!
//! The endpoint answers with JSON on some requests and server-rendered HTML
//! on others, and the JSON payload is not always at the top level of the
//! body. Strategies are tried in order and the first one that yields records
//! wins:
//!
//! 1. JSON: whole body, then the outermost `{…}` span, then the outermost
//!    `[…]` span ([`json`]).
//! 2. HTML `.divTable` rows ([`html`]).

mod fields;
mod html;
mod json;

pub use fields::first_present;

use carpark_core::{CarparkNames, RawRecord};

/// Which strategy produced an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    Json,
    Html,
    /// No strategy found any rows.
    Empty,
}

impl std::fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionSource::Json => write!(f, "json"),
            ExtractionSource::Html => write!(f, "html"),
            ExtractionSource::Empty => write!(f, "empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<RawRecord>,
    pub source: ExtractionSource,
}

/// Extract raw availability rows from a response body.
///
/// Never fails: unparseable input yields an empty list.
#[must_use]
pub fn extract(body: &str, content_type: &str, names: &CarparkNames) -> Vec<RawRecord> {
    extract_with_source(body, content_type, names).records
}

/// Like [`extract`], also reporting which strategy produced the rows.
///
/// `content_type` is only a hint; JSON is attempted regardless of what the
/// server declared.
#[must_use]
pub fn extract_with_source(body: &str, content_type: &str, names: &CarparkNames) -> Extraction {
    if let Some(payload) = json::parse_json_payload(body) {
        let records = json::records_from_json(&payload);
        if !records.is_empty() {
            tracing::debug!(count = records.len(), "extracted rows from JSON payload");
            return Extraction {
                records,
                source: ExtractionSource::Json,
            };
        }
        tracing::debug!("JSON payload contained no availability rows");
    }

    if content_type.to_ascii_lowercase().contains("json") {
        tracing::warn!(
            content_type,
            "response declared JSON but yielded no rows; trying HTML table"
        );
    }

    let records = html::extract_table_rows(body, names);
    let source = if records.is_empty() {
        tracing::warn!("no availability rows found in response");
        ExtractionSource::Empty
    } else {
        tracing::debug!(count = records.len(), "extracted rows from HTML table");
        ExtractionSource::Html
    };

    Extraction { records, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> CarparkNames {
        CarparkNames::default()
    }

    #[test]
    fn json_array_body_never_reaches_html() {
        let body = r#"[{"carParkName":"Civic","category":"<div class=\"divTable\">","availableSpaces":12}]"#;
        let extraction = extract_with_source(body, "text/html", &names());
        assert_eq!(extraction.source, ExtractionSource::Json);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].carpark, "Civic");
        assert_eq!(extraction.records[0].parking_option, "<div class=\"divTable\">");
    }

    #[test]
    fn json_without_rows_falls_back_to_html() {
        let body = r#"<html><script>var cfg = {"theme":"dark"};</script>
            <div class="divTable"><div class="divTableRow">
              <div class="divTableCell">Civic</div>
              <div class="divTableCell">Short Stay</div>
              <div class="divTableCell">88 spaces</div>
            </div></div></html>"#;
        let extraction = extract_with_source(body, "text/html; charset=utf-8", &names());
        assert_eq!(extraction.source, ExtractionSource::Html);
        assert_eq!(
            extraction.records,
            vec![RawRecord {
                carpark: "Civic".to_string(),
                parking_option: "Short Stay".to_string(),
                available_spaces: Some(88),
            }]
        );
    }

    #[test]
    fn nothing_recognisable_is_empty() {
        let extraction = extract_with_source("Service Unavailable", "text/plain", &names());
        assert_eq!(extraction.source, ExtractionSource::Empty);
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn declared_json_that_is_html_still_extracts() {
        let body = r#"<div class="divTable"><div class="divTableRow">
            <div class="divTableCell">Downtown</div>
            <div class="divTableCell">Casual</div>
            <div class="divTableCell">5</div></div></div>"#;
        let records = extract(body, "application/json", &names());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].available_spaces, Some(5));
    }

    #[test]
    fn source_display() {
        assert_eq!(ExtractionSource::Json.to_string(), "json");
        assert_eq!(ExtractionSource::Html.to_string(), "html");
        assert_eq!(ExtractionSource::Empty.to_string(), "empty");
    }
}
