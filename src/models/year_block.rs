use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Row-records belonging to one year of a reconstruction file
#[derive(Debug, Clone, PartialEq)]
pub struct YearBlock {
    pub label: String,
    pub rows: Vec<Vec<String>>,
}

impl YearBlock {
    pub fn new(label: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Cells in row-major order (north row first, as stored in the file)
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// Year blocks of one input file, in file order.
///
/// Serializes as a JSON object keyed by year label with keys kept in file
/// order, which is the layout of the on-disk cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDataset {
    blocks: Vec<YearBlock>,
}

impl ParsedDataset {
    pub fn new(blocks: Vec<YearBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[YearBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn year_labels(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&YearBlock> {
        self.blocks.iter().find(|b| b.label == label)
    }

    pub fn total_cells(&self) -> usize {
        self.blocks.iter().map(YearBlock::cell_count).sum()
    }

    /// Flattened year -> row -> cell sequence, borrowed
    pub fn flatten(&self) -> Vec<&str> {
        let mut values = Vec::with_capacity(self.total_cells());
        for block in &self.blocks {
            values.extend(block.cells());
        }
        values
    }

    /// Position in the flattened sequence where the block for `label` starts
    pub fn cell_offset(&self, label: &str) -> Option<usize> {
        let mut offset = 0;
        for block in &self.blocks {
            if block.label == label {
                return Some(offset);
            }
            offset += block.cell_count();
        }
        None
    }
}

impl Serialize for ParsedDataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.blocks.len()))?;
        for block in &self.blocks {
            map.serialize_entry(&block.label, &block.rows)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParsedDataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BlocksVisitor;

        impl<'de> Visitor<'de> for BlocksVisitor {
            type Value = ParsedDataset;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of year label to row blocks")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut blocks = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, rows)) = access.next_entry::<String, Vec<Vec<String>>>()? {
                    blocks.push(YearBlock { label, rows });
                }
                Ok(ParsedDataset { blocks })
            }
        }

        deserializer.deserialize_map(BlocksVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(label: &str, rows: &[&[&str]]) -> YearBlock {
        YearBlock::new(
            label,
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn sample() -> ParsedDataset {
        ParsedDataset::new(vec![
            block("1500", &[&["1.0", "2.0"], &["3.0", "4.0"]]),
            block("1501", &[&["5.0", "6.0"], &["7.0", "8.0"]]),
        ])
    }

    #[test]
    fn test_flatten_keeps_year_row_cell_order() {
        let dataset = sample();
        assert_eq!(
            dataset.flatten(),
            vec!["1.0", "2.0", "3.0", "4.0", "5.0", "6.0", "7.0", "8.0"]
        );
        assert_eq!(dataset.total_cells(), 8);
    }

    #[test]
    fn test_cell_offset() {
        let dataset = sample();
        assert_eq!(dataset.cell_offset("1500"), Some(0));
        assert_eq!(dataset.cell_offset("1501"), Some(4));
        assert_eq!(dataset.cell_offset("1502"), None);
    }

    #[test]
    fn test_json_keeps_file_order() {
        // Lexical order would put "10" before "9"
        let dataset = ParsedDataset::new(vec![block("9", &[&["1"]]), block("10", &[&["2"]])]);
        let json = serde_json::to_string(&dataset).unwrap();
        assert_eq!(json, r#"{"9":[["1"]],"10":[["2"]]}"#);

        let parsed: ParsedDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.year_labels().collect::<Vec<_>>(), vec!["9", "10"]);
    }
}
