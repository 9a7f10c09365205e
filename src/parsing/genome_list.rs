use std::collections::BTreeSet;
use std::path::Path;

use crate::parsing::pangenome::PanGenomeError;

/// Parse a genome list file: genome name in the first column
///
/// # Errors
///
/// Returns `PanGenomeError::Io` if the file cannot be read, or
/// `PanGenomeError::InvalidFormat` if it lists no genome.
pub fn parse_genome_list_file(path: &Path) -> Result<BTreeSet<String>, PanGenomeError> {
    let content = std::fs::read_to_string(path)?;
    parse_genome_list_text(&content)
}

/// Parse genome list text.
///
/// Accepts the LSTINFO layout (`gembase_name orig_name ...` header, tab-separated
/// columns) as well as a bare list of names, one per line.
///
/// # Errors
///
/// Returns `PanGenomeError::InvalidFormat` if no genome is listed.
pub fn parse_genome_list_text(text: &str) -> Result<BTreeSet<String>, PanGenomeError> {
    let mut genomes = BTreeSet::new();
    let mut first_data_line = true;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(name) = line.split_whitespace().next() else {
            continue;
        };

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            if name.eq_ignore_ascii_case("gembase_name") {
                continue;
            }
        }

        genomes.insert(name.to_string());
    }

    if genomes.is_empty() {
        return Err(PanGenomeError::InvalidFormat(
            "No genomes found in genome list".to_string(),
        ));
    }

    Ok(genomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lstinfo_layout() {
        let text = "gembase_name\torig_name\tgsize\tnb_prot\n\
                    ESCO.1216.00002\tgenome2.fna\t4800000\t4500\n\
                    ESCO.1216.00001\tgenome1.fna\t4700000\t4400\n";
        let genomes = parse_genome_list_text(text).unwrap();
        assert_eq!(genomes.len(), 2);
        assert!(genomes.contains("ESCO.1216.00001"));
        assert!(!genomes.contains("gembase_name"));
    }

    #[test]
    fn test_parse_bare_list_with_comments() {
        let text = "# selected strains\n\nGEN1\nGEN2\nGEN1\n";
        let genomes = parse_genome_list_text(text).unwrap();
        assert_eq!(genomes.into_iter().collect::<Vec<_>>(), vec!["GEN1", "GEN2"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(matches!(
            parse_genome_list_text("gembase_name\n# nothing\n"),
            Err(PanGenomeError::InvalidFormat(_))
        ));
    }
}
