//! Cell payload decoding.
//!
//! Only two representations survive a paste: text, passed through verbatim,
//! and dates, turned into epoch milliseconds so the grid can store them as
//! numbers.

use chrono::{Local, NaiveDateTime, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::{SpreadsheetElement, DATA_TAG, DATE_TIME_TYPE, TYPE_ATTR};
use crate::error::PasteError;

/// `yyyy-MM-dd'T'HH:mm:ss.SSS`, the only date layout Excel writes.
pub const EXCEL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3f";

/// Byte length of a timestamp in [`EXCEL_DATE_FORMAT`].
const EXCEL_DATE_LEN: usize = 23;

/// Value handed to the sink for one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PasteValue {
    Text(String),
    /// Milliseconds since the Unix epoch.
    DateMillis(f64),
}

impl PasteValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PasteValue::Text(s) => Some(s),
            PasteValue::DateMillis(_) => None,
        }
    }

    pub fn as_millis(&self) -> Option<f64> {
        match self {
            PasteValue::DateMillis(ms) => Some(*ms),
            PasteValue::Text(_) => None,
        }
    }

    /// Display form used by text outputs.
    pub fn raw_display(&self) -> String {
        match self {
            PasteValue::Text(s) => s.clone(),
            PasteValue::DateMillis(ms) => format!("{}", *ms as i64),
        }
    }
}

/// Zone a naive Excel timestamp is read in.
///
/// Excel writes `DateTime` cells without an offset. The default is `Utc`, so
/// a payload decodes to the same milliseconds on every host. Paste handlers
/// that read dates in the machine's own zone, as spreadsheet desktop apps
/// commonly do, need `Local`; on a host that is not on UTC the two differ
/// by the zone offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBasis {
    #[default]
    Utc,
    /// The host's local zone.
    Local,
}

impl std::str::FromStr for DateBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utc" => Ok(DateBasis::Utc),
            "local" => Ok(DateBasis::Local),
            other => Err(format!("unknown date basis '{other}' (expected utc or local)")),
        }
    }
}

/// Decode the cell's single `<Data>` child.
///
/// `Ok(None)` means a blank cell: no `<Data>`, or more than one.
pub fn decode_cell<E: SpreadsheetElement>(
    cell: &E,
    basis: DateBasis,
) -> Result<Option<PasteValue>, PasteError> {
    let datas = cell.elements_by_tag(DATA_TAG);
    let [data] = datas.as_slice() else {
        if datas.len() > 1 {
            debug!("cell with {} <Data> children treated as blank", datas.len());
        }
        return Ok(None);
    };

    let text = data.text_content();
    let value = match data.attribute(TYPE_ATTR) {
        Some(DATE_TIME_TYPE) => PasteValue::DateMillis(parse_excel_date(&text, basis)?),
        _ => PasteValue::Text(text),
    };
    Ok(Some(value))
}

/// Epoch milliseconds for an Excel `DateTime` payload.
///
/// The milliseconds are mandatory: `2015-06-01T00:00:00` is rejected.
pub fn parse_excel_date(text: &str, basis: DateBasis) -> Result<f64, PasteError> {
    if text.len() != EXCEL_DATE_LEN {
        return Err(PasteError::InvalidDate { value: text.to_string() });
    }
    let naive = NaiveDateTime::parse_from_str(text, EXCEL_DATE_FORMAT)
        .map_err(|_| PasteError::InvalidDate { value: text.to_string() })?;

    let millis = match basis {
        DateBasis::Utc => naive.and_utc().timestamp_millis(),
        DateBasis::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| PasteError::UnmappableDate { value: text.to_string() })?
            .timestamp_millis(),
    };
    Ok(millis as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{blank_cell, text_cell, Node};

    fn date_cell(text: &str) -> Node {
        Node::new("Cell").child(Node::new("Data").attr("ss:Type", "DateTime").text(text))
    }

    #[test]
    fn text_passes_through_verbatim() {
        let cell = text_cell("  padded & <odd>  ");
        assert_eq!(
            decode_cell(&cell, DateBasis::Utc),
            Ok(Some(PasteValue::Text("  padded & <odd>  ".into())))
        );
    }

    #[test]
    fn empty_data_is_empty_text() {
        let cell = text_cell("");
        assert_eq!(decode_cell(&cell, DateBasis::Utc), Ok(Some(PasteValue::Text(String::new()))));
    }

    #[test]
    fn numbers_stay_text() {
        let cell = Node::new("Cell").child(Node::new("Data").attr("ss:Type", "Number").text("3.25"));
        assert_eq!(decode_cell(&cell, DateBasis::Utc), Ok(Some(PasteValue::Text("3.25".into()))));
    }

    #[test]
    fn rich_text_concatenates_runs() {
        let data = Node::new("Data")
            .attr("ss:Type", "String")
            .child(Node::new("B").text("bold"))
            .child(Node::new("Font").text(" plain"));
        let cell = Node::new("Cell").child(data);
        assert_eq!(
            decode_cell(&cell, DateBasis::Utc),
            Ok(Some(PasteValue::Text("bold plain".into())))
        );
    }

    #[test]
    fn blank_and_ambiguous_cells_yield_nothing() {
        assert_eq!(decode_cell(&blank_cell(), DateBasis::Utc), Ok(None));

        let twice = text_cell("a").child(Node::new("Data").text("b"));
        assert_eq!(decode_cell(&twice, DateBasis::Utc), Ok(None));
    }

    #[test]
    fn comment_data_is_not_the_cell_payload() {
        let cell = text_cell("value")
            .child(Node::new("Comment").child(Node::new("ss:Data").text("note")));
        assert_eq!(decode_cell(&cell, DateBasis::Utc), Ok(Some(PasteValue::Text("value".into()))));
    }

    #[test]
    fn date_decodes_to_epoch_millis() {
        let cell = date_cell("2015-06-01T00:00:00.000");
        assert_eq!(
            decode_cell(&cell, DateBasis::Utc),
            Ok(Some(PasteValue::DateMillis(1_433_116_800_000.0)))
        );
    }

    #[test]
    fn date_keeps_milliseconds() {
        let ms = parse_excel_date("1970-01-01T00:00:01.250", DateBasis::Utc).unwrap();
        assert_eq!(ms, 1250.0);

        let before_epoch = parse_excel_date("1899-12-31T00:00:00.000", DateBasis::Utc).unwrap();
        assert_eq!(before_epoch, -2_209_075_200_000.0);
    }

    #[test]
    fn local_basis_matches_chrono_local() {
        let naive = NaiveDateTime::parse_from_str("2015-06-01T12:00:00.000", EXCEL_DATE_FORMAT).unwrap();
        let expected = Local.from_local_datetime(&naive).earliest().unwrap().timestamp_millis() as f64;
        assert_eq!(parse_excel_date("2015-06-01T12:00:00.000", DateBasis::Local), Ok(expected));
    }

    #[test]
    fn malformed_date_is_an_error() {
        for bad in [
            "yesterday",
            "2015-06-01",
            "2015-13-01T00:00:00.000",
            "2015-06-01T00:00:00",
            "2015-06-01T00:00:00.",
            "2015-06-01T00:00:00.5",
            "2015-06-01T00:00:00.0000",
            "2015-6-01T00:00:00.000",
            " 2015-06-01T00:00:00.000",
        ] {
            assert_eq!(
                decode_cell(&date_cell(bad), DateBasis::Utc),
                Err(PasteError::InvalidDate { value: bad.into() }),
                "value {bad:?}"
            );
        }
    }

    #[test]
    fn date_basis_from_str() {
        assert_eq!("UTC".parse::<DateBasis>(), Ok(DateBasis::Utc));
        assert_eq!("local".parse::<DateBasis>(), Ok(DateBasis::Local));
        assert!("mars".parse::<DateBasis>().is_err());
    }
}
