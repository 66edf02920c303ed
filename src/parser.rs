use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Loads the people roster from a CSV file.
///
/// If the first row looks like a header (see `header_name_column`), names
/// are read from that column and the first row is skipped. Otherwise
/// every row counts and the first column holds the name. Blank names are
/// dropped and repeated names are kept once, at their first position.
pub fn load_people<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    read_people(file)
}

pub fn read_people<R: Read>(source: R) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut names = Vec::new();
    let mut name_col = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        if row == 0 {
            let cells: Vec<&str> = record.iter().collect();
            if let Some(col) = header_name_column(&cells) {
                name_col = col;
                continue;
            }
        }

        if let Some(name) = record.get(name_col) {
            names.push(name.to_string());
        }
    }

    Ok(dedupe_names(names))
}

/// Finds the name column of a header row.
///
/// A cell reading exactly `name` or `names` (any case) always counts. Longer
/// headers such as "Full name" only count when the row has several columns,
/// so a one-column list starting with e.g. "Renamed" keeps its first person.
fn header_name_column(cells: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = cells.iter().map(|c| c.trim().to_lowercase()).collect();

    if let Some(col) = lowered.iter().position(|c| c == "name" || c == "names") {
        return Some(col);
    }
    if cells.len() > 1 {
        return lowered.iter().position(|c| c.contains("name"));
    }
    None
}

/// Splits a comma separated list such as `"Ada, Linus,Grace"`.
pub fn parse_people_list(list: &str) -> Vec<String> {
    dedupe_names(list.split(',').map(|s| s.to_string()).collect())
}

fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && seen.insert(n.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_named_column() {
        let csv = "team,Name,email\nops,Ada,ada@example.com\nops,Linus,linus@example.com\n";
        let people = read_people(csv.as_bytes()).unwrap();
        assert_eq!(people, vec!["Ada", "Linus"]);
    }

    #[test]
    fn test_plain_list_without_header() {
        let list = "Ada\n\nLinus\n  Grace  \nAda\n";
        let people = read_people(list.as_bytes()).unwrap();
        assert_eq!(people, vec!["Ada", "Linus", "Grace"]);
    }

    #[test]
    fn test_name_like_first_person_is_not_a_header() {
        let people = read_people("Renamed\nAda\n".as_bytes()).unwrap();
        assert_eq!(people, vec!["Renamed", "Ada"]);

        let people = read_people("Names\nAda\n".as_bytes()).unwrap();
        assert_eq!(people, vec!["Ada"]);
    }

    #[test]
    fn test_descriptive_header_in_wide_file() {
        let csv = "Full name,team\nAda,ops\nLinus,dev\n";
        let people = read_people(csv.as_bytes()).unwrap();
        assert_eq!(people, vec!["Ada", "Linus"]);
    }

    #[test]
    fn test_parse_people_list() {
        assert_eq!(parse_people_list("Ada, Linus,,Grace ,Linus"), vec!["Ada", "Linus", "Grace"]);
        assert!(parse_people_list(" , ").is_empty());
    }

    #[test]
    fn test_load_people_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name").unwrap();
        writeln!(file, "Ada").unwrap();
        writeln!(file, "Grace").unwrap();

        let people = load_people(file.path()).unwrap();
        assert_eq!(people, vec!["Ada", "Grace"]);
    }
}
