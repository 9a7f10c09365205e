//! Writer for persistent-genome files.
//!
//! Same line shape as the pan-genome input, restricted to the selected families:
//! numeric family order, members grouped by genome (see [`MemberKey`](crate::core::member::MemberKey)).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::member::sort_members;
use crate::core::types::ThresholdRounding;
use crate::persistent::{PersistentConfig, PersistentGenome};
use crate::utils::validation::format_tolerance;

/// Name of the output file for a pan-genome and a selection.
///
/// `PersGenome_<pangenome file name>[-<subset>]_[F]<tolerance>[-multi|-mixed].lst`
#[must_use]
pub fn persistent_genome_filename(
    pangenome: &Path,
    config: &PersistentConfig,
    subset: Option<&str>,
) -> String {
    let base = pangenome
        .file_name()
        .map_or_else(|| "pangenome".to_string(), |n| n.to_string_lossy().into_owned());
    let subset = subset.map(|s| format!("-{s}")).unwrap_or_default();
    let floor = if config.rounding == ThresholdRounding::Floor {
        "F"
    } else {
        ""
    };

    format!(
        "PersGenome_{base}{subset}_{floor}{}{}.lst",
        format_tolerance(config.tolerance),
        config.policy.file_suffix()
    )
}

/// Write the persistent genome to `writer`, one sorted line per family
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_persistent_genome_to<W: Write>(
    genome: &PersistentGenome,
    mut writer: W,
) -> std::io::Result<()> {
    for (id, members) in &genome.families {
        let mut members = members.clone();
        sort_members(&mut members);
        writeln!(writer, "{id} {}", members.join(" "))?;
    }
    writer.flush()
}

/// Create (or overwrite) `path` with the persistent genome
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_persistent_genome(genome: &PersistentGenome, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    write_persistent_genome_to(genome, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FamilyId, FamilyPolicy};
    use tempfile::TempDir;

    fn genome() -> PersistentGenome {
        let mut genome = PersistentGenome::default();
        genome.families.insert(
            FamilyId(10),
            vec![
                "GEN2.1017.00002.i0001_00012".to_string(),
                "GEN1.1017.00001.i0001_00003".to_string(),
            ],
        );
        genome.families.insert(
            FamilyId(2),
            vec![
                "GEN1.1017.00001.i0001_00010".to_string(),
                "GEN1.1017.00001.i0001_00009".to_string(),
            ],
        );
        genome
    }

    #[test]
    fn test_lines_sorted_numerically_with_sorted_members() {
        let mut out = Vec::new();
        write_persistent_genome_to(&genome(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "2 GEN1.1017.00001.i0001_00009 GEN1.1017.00001.i0001_00010\n\
             10 GEN1.1017.00001.i0001_00003 GEN2.1017.00002.i0001_00012\n"
        );
    }

    #[test]
    fn test_empty_genome_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.lst");
        write_persistent_genome(&PersistentGenome::default(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.lst");
        std::fs::write(&path, "stale content that is much longer than the new one\n").unwrap();
        write_persistent_genome(&genome(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("2 "));
    }

    #[test]
    fn test_unwritable_path() {
        let result = write_persistent_genome(&genome(), Path::new("/nonexistent/dir/out.lst"));
        assert!(result.is_err());
    }

    #[test]
    fn test_filename() {
        let pan = Path::new("/data/PanGenome-TEST4.All.prt-clust-0.8-mode1.lst");
        assert_eq!(
            persistent_genome_filename(pan, &PersistentConfig::default(), None),
            "PersGenome_PanGenome-TEST4.All.prt-clust-0.8-mode1.lst_1.0.lst"
        );

        let mixed = PersistentConfig::new(0.99, FamilyPolicy::Mixed, ThresholdRounding::Floor);
        assert_eq!(
            persistent_genome_filename(Path::new("pan.lst"), &mixed, None),
            "PersGenome_pan.lst_F0.99-mixed.lst"
        );

        let multi = PersistentConfig::new(0.95, FamilyPolicy::Multi, ThresholdRounding::Ceil);
        assert_eq!(
            persistent_genome_filename(Path::new("pan.lst"), &multi, Some("subset")),
            "PersGenome_pan.lst-subset_0.95-multi.lst"
        );
    }
}
