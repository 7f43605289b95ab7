//! Server-rendered `.divTable` extraction.

use scraper::{ElementRef, Html, Selector};

use carpark_core::{CarparkNames, RawRecord};

const ROW_SELECTOR: &str = ".divTable .divTableRow";
const CELL_SELECTOR: &str = ".divTableCell";

/// Rows of the availability `.divTable`.
///
/// Each row contributes its first three cells as carpark, parking option
/// and available spaces. Rows with fewer cells are skipped, as are rows
/// for ignored carparks.
pub(super) fn extract_table_rows(body: &str, names: &CarparkNames) -> Vec<RawRecord> {
    let document = Html::parse_document(body);
    let row_selector = Selector::parse(ROW_SELECTOR).expect("valid selector");
    let cell_selector = Selector::parse(CELL_SELECTOR).expect("valid selector");

    let mut records = Vec::new();
    for row in document.select(&row_selector) {
        let mut cells = row.select(&cell_selector).map(cell_text);
        let (Some(carpark), Some(parking_option), Some(available)) =
            (cells.next(), cells.next(), cells.next())
        else {
            tracing::trace!("skipping table row with fewer than three cells");
            continue;
        };

        if names.is_ignored(&carpark) {
            tracing::info!(carpark = %carpark, "skipping ignored carpark row");
            continue;
        }

        records.push(RawRecord {
            available_spaces: digits_to_count(&available),
            carpark,
            parking_option,
        });
    }

    records
}

/// Cell text with each text node trimmed and the pieces joined directly.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}

/// Keep only ASCII digits and parse them, so `"45 spaces"` becomes `45`.
fn digits_to_count(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
