//! Delimited text parsing.
//!
//! Turns comma separated text into [`Record`]s keyed by the header line.
//! Quoted fields may contain commas, doubled quotes and literal newlines.
//! Parsing never fails: malformed or short rows are padded, blank lines are
//! skipped, header-only input yields no records.
//!
//! The file edge ([`read_text_file`], [`decode_bytes`]) detects the encoding
//! and strips a UTF-8 BOM before the text reaches the parser.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;
use std::path::Path;

use crate::config::MAX_IMPORT_FILE_SIZE;
use crate::error::{CsvError, CsvResult};

// =============================================================================
// Record
// =============================================================================

/// One data row keyed by header, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Value for an exact header.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for a header, ignoring ASCII and Unicode case.
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.fields
            .iter()
            .find(|(k, _)| k.to_lowercase() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Parsed rows plus the header line they are keyed by.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ParseResult {
    /// Column headers, trimmed, in source order
    pub headers: Vec<String>,
    /// One record per non-blank data row
    pub records: Vec<Record>,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse comma separated text into records keyed by the first line.
///
/// # Example
/// ```
/// use cvkit::parse_delimited;
///
/// let rows = parse_delimited("Name,Note\nAlice,\"Hello, \"\"World\"\"\"\n");
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("Note"), Some("Hello, \"World\""));
/// ```
pub fn parse_delimited(text: &str) -> Vec<Record> {
    parse_with_headers(text).records
}

/// Parse comma separated text and keep the header list.
pub fn parse_with_headers(text: &str) -> ParseResult {
    let text = unpad_quoted_fields(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    // A flexible reader over a &str cannot fail on shape or UTF-8.
    let mut rows = reader
        .records()
        .filter_map(Result::ok)
        .filter(|row| !is_blank(row));

    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(String::from).collect(),
        None => return ParseResult::default(),
    };

    let records = rows
        .map(|row| {
            let mut record = Record::new();
            for (i, header) in headers.iter().enumerate() {
                record.insert(header.as_str(), row.get(i).unwrap_or(""));
            }
            record
        })
        .collect();

    ParseResult { headers, records }
}

/// Drop blanks between a field start and its opening quote.
///
/// The reader only honours a quote as the first byte of a field, so
/// `a, "b, c"` would otherwise split inside the quotes.
fn unpad_quoted_fields(text: &str) -> Cow<'_, str> {
    if !text.contains(" \"") && !text.contains("\t\"") {
        return Cow::Borrowed(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;
    let mut field_start = true;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_quotes {
            out.push(c);
            if c == '"' {
                if chars.get(i + 1) == Some(&'"') {
                    out.push('"');
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
            i += 1;
            continue;
        }

        match c {
            ' ' | '\t' if field_start => {
                let mut j = i;
                while matches!(chars.get(j), Some(' ' | '\t')) {
                    j += 1;
                }
                if chars.get(j) == Some(&'"') {
                    i = j;
                    continue;
                }
                out.extend(&chars[i..j]);
                field_start = false;
                i = j;
                continue;
            }
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            ',' | '\n' | '\r' => field_start = true,
            _ => field_start = false,
        }
        out.push(c);
        i += 1;
    }

    Cow::Owned(out)
}

/// A line holding nothing but whitespace comes back as one empty field.
fn is_blank(row: &csv::StringRecord) -> bool {
    row.len() == 0 || (row.len() == 1 && row[0].is_empty())
}

// =============================================================================
// Decoding
// =============================================================================

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the given encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => {
            String::from_utf8(bytes.to_vec()).map_err(|e| CsvError::Encoding {
                encoding: encoding.to_string(),
                message: e.to_string(),
            })
        }
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.into_owned())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()),
        _ => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Decode a section file: strip a UTF-8 BOM, detect the encoding, decode.
///
/// Valid UTF-8 always wins over the detector's guess.
pub fn decode_bytes(bytes: &[u8]) -> CsvResult<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }
    let encoding = detect_encoding(bytes);
    decode_content(bytes, &encoding)
}

/// Read and decode a text file, refusing files over the import size limit.
pub fn read_text_file<P: AsRef<Path>>(path: P) -> CsvResult<String> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();
    if size > MAX_IMPORT_FILE_SIZE {
        return Err(CsvError::TooLarge { size, limit: MAX_IMPORT_FILE_SIZE });
    }
    let bytes = std::fs::read(path)?;
    decode_bytes(&bytes)
}
