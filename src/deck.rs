//! Medication decks: CSV files with one medication per line and a header
//! naming the six matrix columns.

use crate::error::DeckError;
use crate::models::{FieldName, MedicationRecord};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DECKS_DIR: &str = "decks";

pub fn list_decks(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            if let Some(ext) = entry.path().extension()
                && ext.eq_ignore_ascii_case("csv")
            {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files
}

pub fn load_deck(path: impl AsRef<Path>) -> Result<Vec<MedicationRecord>, DeckError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deck(&content)
}

pub fn parse_deck(content: &str) -> Result<Vec<MedicationRecord>, DeckError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(DeckError::Empty);
    };
    let header: Vec<String> = split_csv_line(header)
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect();
    let positions = FieldName::ALL
        .iter()
        .map(|field| {
            header
                .iter()
                .position(|name| name.parse::<FieldName>() == Ok(*field))
                .ok_or(DeckError::MissingColumn(*field))
        })
        .collect::<Result<Vec<usize>, DeckError>>()?;

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for (line_number, line) in lines {
        let values = split_csv_line(line);
        if values.len() != header.len() {
            return Err(DeckError::ColumnCount {
                line: line_number,
                expected: header.len(),
                found: values.len(),
            });
        }
        let value = |index: usize| values[positions[index]].trim();
        let record = MedicationRecord::new(
            value(0),
            value(1),
            value(2),
            value(3),
            value(4),
            value(5),
        );
        if seen.insert(record.clone()) {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(DeckError::Empty);
    }
    Ok(records)
}

/// Splits one CSV line, honoring double-quoted fields and `""` escapes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Drug,Class,Route,Indication,Contra,Dose";

    #[test]
    fn test_split_simple() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_commas() {
        assert_eq!(
            split_csv_line("Narcan,\"IM, IN\",\"0.4 - 2.0 mg\""),
            vec!["Narcan", "IM, IN", "0.4 - 2.0 mg"]
        );
    }

    #[test]
    fn test_split_escaped_quotes() {
        assert_eq!(
            split_csv_line("\"say \"\"hi\"\"\",x"),
            vec!["say \"hi\"", "x"]
        );
    }

    #[test]
    fn test_split_trailing_empty_field() {
        assert_eq!(split_csv_line("a,"), vec!["a", ""]);
    }

    #[test]
    fn test_parse_deck() {
        let content = format!(
            "{}\nAspirin,Anti-platelet,Oral,Cardiac Chest Pain,Active or recent bleeding,324 mg\n\n\
             Narcan,Opiate Antagonist,\"IM, IN\",Opiate Overdose,None in true emergency,0.4 - 2.0 mg\n",
            HEADER
        );
        let records = parse_deck(&content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].drug, "Aspirin");
        assert_eq!(records[1].route, "IM, IN");
    }

    #[test]
    fn test_parse_deck_header_any_order() {
        let content = "dose,DRUG,class,route,indication,contra\n5 mg,X,C,R,I,N\n";
        let records = parse_deck(content).unwrap();
        assert_eq!(records[0], MedicationRecord::new("X", "C", "R", "I", "N", "5 mg"));
    }

    #[test]
    fn test_parse_deck_missing_column() {
        let content = "Drug,Class,Route,Indication,Contra\nA,B,C,D,E\n";
        assert!(matches!(
            parse_deck(content),
            Err(DeckError::MissingColumn(FieldName::Dose))
        ));
    }

    #[test]
    fn test_parse_deck_column_count() {
        let content = format!("{}\nA,B,C\n", HEADER);
        assert!(matches!(
            parse_deck(&content),
            Err(DeckError::ColumnCount {
                line: 2,
                expected: 6,
                found: 3
            })
        ));
    }

    #[test]
    fn test_parse_deck_empty() {
        assert!(matches!(parse_deck(""), Err(DeckError::Empty)));
        assert!(matches!(parse_deck(HEADER), Err(DeckError::Empty)));
    }

    #[test]
    fn test_parse_deck_drops_duplicates() {
        let content = format!("{}\nA,B,C,D,E,F\nA,B,C,D,E,F\n", HEADER);
        assert_eq!(parse_deck(&content).unwrap().len(), 1);
    }

    #[test]
    fn test_load_and_list_decks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), format!("{}\nA,B,C,D,E,F\n", HEADER)).unwrap();
        fs::write(dir.path().join("a.csv"), format!("{}\nG,H,I,J,K,L\n", HEADER)).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let decks = list_decks(dir.path());
        assert_eq!(decks.len(), 2);
        assert!(decks[0].ends_with("a.csv"));

        let records = load_deck(&decks[1]).unwrap();
        assert_eq!(records[0].drug, "A");
    }

    #[test]
    fn test_load_missing_deck() {
        assert!(matches!(
            load_deck("/definitely/not/here.csv"),
            Err(DeckError::Io { .. })
        ));
    }

    #[test]
    fn test_bundled_deck_matches_builtin_catalog() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(DECKS_DIR)
            .join("emt_core.csv");
        let records = load_deck(path).unwrap();
        assert_eq!(records, crate::catalog::builtin_catalog());
    }

    #[test]
    fn test_list_decks_missing_dir() {
        assert!(list_decks("/definitely/not/here").is_empty());
    }
}
