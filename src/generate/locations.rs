//! Locations input file parsing.
//!
//! One location per line, whitespace-separated fields:
//!
//! ```text
//! Zulia 2383 19
//! Miranda 2096 17
//! ```
//!
//! meaning `name voterCount centerCount`.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// One parsed line of the locations file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub name: String,
    pub voters: u64,
    pub centers: u64,
}

/// Parse a locations file from disk.
pub fn parse_locations_file(path: impl AsRef<Path>) -> Result<Vec<LocationRecord>> {
    parse_locations(&fs::read_to_string(path)?)
}

/// Parse locations from file contents. Blank lines are skipped.
pub fn parse_locations(contents: &str) -> Result<Vec<LocationRecord>> {
    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [name, voters, centers] = fields[..] else {
            return Err(Error::malformed(format!(
                "Line {}: expected `name voterCount centerCount`",
                index + 1
            )));
        };
        let voters = voters.parse().map_err(|_| {
            Error::malformed(format!(
                "Line {}: voter count {voters:?} is not a number",
                index + 1
            ))
        })?;
        let centers = centers.parse().map_err(|_| {
            Error::malformed(format!(
                "Line {}: center count {centers:?} is not a number",
                index + 1
            ))
        })?;
        records.push(LocationRecord {
            name: name.to_string(),
            voters,
            centers,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed() {
        let contents = "Zulia 2383 19\nMiranda 2096 17\n\nTachira 800 6\n";
        let records = parse_locations(contents).unwrap();
        assert_eq!(
            records,
            vec![
                LocationRecord {
                    name: "Zulia".to_string(),
                    voters: 2383,
                    centers: 19,
                },
                LocationRecord {
                    name: "Miranda".to_string(),
                    voters: 2096,
                    centers: 17,
                },
                LocationRecord {
                    name: "Tachira".to_string(),
                    voters: 800,
                    centers: 6,
                },
            ]
        );
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let err = parse_locations("Zulia 2383\n").unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedInput(_)));

        let err = parse_locations("Zulia 2383 19 extra\n").unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedInput(_)));
    }

    #[test]
    fn parse_rejects_non_numeric_counts() {
        let err = parse_locations("Zulia many 19\n").unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedInput(_)));

        let err = parse_locations("Zulia 2383 some\n").unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedInput(_)));
    }
}
