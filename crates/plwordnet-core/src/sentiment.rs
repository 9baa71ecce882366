//! Sentiment annotation side table
//!
//! A delimited file with a header row and nine columns:
//! lemma, variant, part of speech, charge flag, emotions, valuations,
//! polarity, first example, second example. Emotions and valuations are
//! `;`-joined lists.

use crate::entity::{EmotionalAnnotation, Polarity};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::io::Read;

/// Number of columns every row must have
pub const SENTIMENT_COLUMNS: usize = 9;

/// Cell values that mean "no data"
const NO_DATA: &[&str] = &["NULL", "null", "brak", "NA", "-"];

/// Annotations keyed by `(lemma, variant)`
#[derive(Debug, Clone, Default)]
pub struct SentimentTable {
    entries: HashMap<(String, u32), Vec<EmotionalAnnotation>>,
    skipped_rows: usize,
}

impl SentimentTable {
    /// Read the table from a delimited source.
    ///
    /// A header with the wrong column count is a schema error. Rows that do
    /// not have the expected shape are skipped and counted.
    pub fn from_reader<R: Read>(source: R, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let header_len = reader.headers()?.len();
        if header_len != SENTIMENT_COLUMNS {
            return Err(Error::schema(
                "sentiment table header",
                format!(
                    "expected {} columns, found {}",
                    SENTIMENT_COLUMNS, header_len
                ),
            ));
        }

        let mut table = Self::default();
        for (idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::debug!("Skipping sentiment row {}: {}", idx + 2, e);
                    table.skipped_rows += 1;
                    continue;
                }
            };

            let cells: Vec<&str> = record.iter().map(normalize).collect();
            match parse_row(&cells) {
                Some((key, Some(annotation))) => {
                    table.entries.entry(key).or_default().push(annotation);
                }
                Some((_, None)) => {}
                None => {
                    tracing::debug!("Skipping malformed sentiment row {}", idx + 2);
                    table.skipped_rows += 1;
                }
            }
        }

        if table.skipped_rows > 0 {
            tracing::warn!("Skipped {} malformed sentiment rows", table.skipped_rows);
        }
        tracing::info!(
            "Read sentiment annotations for {} lemma variants",
            table.entries.len()
        );

        Ok(table)
    }

    /// Annotations for one lemma variant
    pub fn get(&self, lemma: &str, variant: u32) -> &[EmotionalAnnotation] {
        self.entries
            .get(&(lemma.to_string(), variant))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

fn normalize(cell: &str) -> &str {
    let cell = cell.trim();
    if NO_DATA.contains(&cell) {
        ""
    } else {
        cell
    }
}

fn split_labels(cell: &str) -> BTreeSet<String> {
    cell.split(';')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// `None` for a malformed row; `Some((key, None))` for a well-formed row
/// that carries no annotation data.
fn parse_row(cells: &[&str]) -> Option<((String, u32), Option<EmotionalAnnotation>)> {
    if cells.len() != SENTIMENT_COLUMNS {
        return None;
    }
    let lemma = cells[0];
    if lemma.is_empty() {
        return None;
    }
    let variant = cells[1].parse::<u32>().ok()?;
    let key = (lemma.to_string(), variant);

    let (emotions, valuations, polarity) = (cells[4], cells[5], cells[6]);
    let examples: Vec<String> = cells[7..9]
        .iter()
        .filter(|e| !e.is_empty())
        .map(|e| e.to_string())
        .collect();

    if polarity.is_empty() && emotions.is_empty() && valuations.is_empty() && examples.is_empty()
    {
        return Some((key, None));
    }

    let annotation = EmotionalAnnotation {
        polarity: Polarity::from_code(polarity),
        emotions: split_labels(emotions),
        valuations: split_labels(valuations),
        examples,
    };
    Some((key, Some(annotation)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "lemma,variant,pos,charge,emotions,valuations,polarity,example1,example2\n";

    #[test]
    fn test_read_annotations() {
        let data = format!(
            "{}{}{}{}",
            HEADER,
            "kot,1,rzeczownik,amb,radość;zaufanie,piękno,+ m,Kot mruczy.,NULL\n",
            "kot,1,rzeczownik,amb,smutek,,- s,,\n",
            "pies,2,rzeczownik,NULL,NULL,NULL,NULL,NULL,NULL\n",
        );
        let table = SentimentTable::from_reader(data.as_bytes(), b',').unwrap();

        let kot = table.get("kot", 1);
        assert_eq!(kot.len(), 2);
        assert_eq!(kot[0].polarity, Polarity::StrongPositive);
        assert!(kot[0].emotions.contains("radość"));
        assert!(kot[0].emotions.contains("zaufanie"));
        assert_eq!(kot[0].examples, vec!["Kot mruczy."]);
        assert_eq!(kot[1].polarity, Polarity::WeakNegative);

        assert!(table.get("pies", 2).is_empty());
        assert_eq!(table.skipped_rows(), 0);
    }

    #[test]
    fn test_wrong_header_width() {
        let data = "lemma,variant,pos\nkot,1,rzeczownik\n";
        let err = SentimentTable::from_reader(data.as_bytes(), b',').unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let data = format!(
            "{}{}{}{}",
            HEADER,
            "kot,1,rzeczownik\n",
            "kot,x,rzeczownik,,radość,,0,,\n",
            "kot,2,rzeczownik,,radość,,0,,\n",
        );
        let table = SentimentTable::from_reader(data.as_bytes(), b',').unwrap();
        assert_eq!(table.skipped_rows(), 2);
        assert_eq!(table.get("kot", 2)[0].polarity, Polarity::Neutral);
    }

    #[test]
    fn test_tab_delimiter() {
        let data = "a\tb\tc\td\te\tf\tg\th\ti\nkot\t3\trzeczownik\t\t\t\t+ s\t\t\n";
        let table = SentimentTable::from_reader(data.as_bytes(), b'\t').unwrap();
        assert_eq!(table.get("kot", 3)[0].polarity, Polarity::WeakPositive);
    }
}
