//! Reader for pan-genome files.
//!
//! One family per line, whitespace separated:
//!
//! ```text
//! 1 ESCO.1216.00002.i0001_00001 ESCO.1216.00003.i0001_00001
//! 2 ESCO.1216.00002.i0001_00002 ESCO.1216.00002.i0001_00007
//! ```
//!
//! Files ending in `.gz` are decompressed on the fly. Parsed pan-genomes can be
//! cached next to the input as `<pangenome>.bin` so that running several
//! thresholds over the same clustering only parses the text once.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::pangenome::PanGenome;
use crate::core::types::FamilyId;
use crate::utils::validation::{check_family_limit, MAX_MEMBERS_PER_FAMILY};

#[derive(Error, Debug)]
pub enum PanGenomeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pan-genome format: {0}")]
    InvalidFormat(String),

    #[error("Too many families: {0} exceeds maximum allowed")]
    TooManyFamilies(usize),

    #[error("Too many members in family {family}: {count} exceeds maximum allowed")]
    TooManyMembers { family: FamilyId, count: usize },
}

/// Whether to use the `<pangenome>.bin` cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Load a fresh cache if there is one, write one otherwise
    #[default]
    Use,
    /// Always parse the text file, never touch the cache
    Ignore,
}

/// What the cache remembers about the text file it was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SourceStamp {
    len: u64,
    modified_secs: u64,
    modified_nanos: u32,
}

impl SourceStamp {
    fn of(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let modified = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Ok(Self {
            len: metadata.len(),
            modified_secs: modified.as_secs(),
            modified_nanos: modified.subsec_nanos(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedPanGenome {
    source: SourceStamp,
    pangenome: PanGenome,
}

/// Path of the binary cache for a pan-genome file
#[must_use]
pub fn cache_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bin");
    PathBuf::from(name)
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Read a pan-genome file, going through the binary cache according to `cache`.
///
/// # Errors
///
/// Returns `PanGenomeError::Io` if the file cannot be read, or
/// `PanGenomeError::InvalidFormat` / `TooManyFamilies` / `TooManyMembers` if its
/// content is invalid. Cache problems are logged, never returned.
pub fn read_pangenome(path: &Path, cache: CacheMode) -> Result<PanGenome, PanGenomeError> {
    let stamp = SourceStamp::of(path)?;

    if cache == CacheMode::Use {
        if let Some(pangenome) = load_cache(&cache_path(path), stamp) {
            info!(
                path = %path.display(),
                families = pangenome.len(),
                "Loaded pan-genome from binary cache"
            );
            return Ok(pangenome);
        }
    }

    let pangenome = parse_pangenome_file(path)?;
    info!(
        path = %path.display(),
        families = pangenome.len(),
        genomes = pangenome.genome_count(),
        "Read pan-genome"
    );

    if cache == CacheMode::Use {
        let bin = cache_path(path);
        if let Err(e) = save_cache(&bin, stamp, &pangenome) {
            warn!(path = %bin.display(), error = %e, "Could not write pan-genome cache");
        }
    }

    Ok(pangenome)
}

/// Parse a pan-genome text file (plain or gzip) without any caching
///
/// # Errors
///
/// See [`read_pangenome`].
pub fn parse_pangenome_file(path: &Path) -> Result<PanGenome, PanGenomeError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        parse_pangenome_reader(BufReader::new(GzDecoder::new(file)))
    } else {
        parse_pangenome_reader(BufReader::new(file))
    }
}

/// Parse pan-genome text
///
/// # Errors
///
/// See [`parse_pangenome_reader`].
pub fn parse_pangenome_text(text: &str) -> Result<PanGenome, PanGenomeError> {
    parse_pangenome_reader(text.as_bytes())
}

/// Parse pan-genome lines from any buffered reader.
///
/// # Errors
///
/// Returns `PanGenomeError::InvalidFormat` if a line has no members, a family id
/// is not a positive integer or appears twice, or no family is found.
pub fn parse_pangenome_reader<R: BufRead>(reader: R) -> Result<PanGenome, PanGenomeError> {
    let mut pangenome = PanGenome::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(id_field) = fields.next() else {
            continue;
        };

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let id: FamilyId = id_field
            .parse()
            .ok()
            .filter(|id: &FamilyId| id.0 > 0)
            .ok_or_else(|| {
                PanGenomeError::InvalidFormat(format!(
                    "Invalid family id on line {line_num}: '{id_field}'"
                ))
            })?;

        let members: Vec<String> = fields.map(str::to_string).collect();
        if members.is_empty() {
            return Err(PanGenomeError::InvalidFormat(format!(
                "Family {id} on line {line_num} has no members"
            )));
        }
        if members.len() > MAX_MEMBERS_PER_FAMILY {
            return Err(PanGenomeError::TooManyMembers {
                family: id,
                count: members.len(),
            });
        }

        if check_family_limit(pangenome.len()).is_some() {
            return Err(PanGenomeError::TooManyFamilies(pangenome.len()));
        }

        if !pangenome.insert_family(id, members) {
            return Err(PanGenomeError::InvalidFormat(format!(
                "Family {id} on line {line_num} was already defined"
            )));
        }
    }

    if pangenome.is_empty() {
        return Err(PanGenomeError::InvalidFormat(
            "No families found in pan-genome".to_string(),
        ));
    }

    Ok(pangenome)
}

fn load_cache(bin: &Path, stamp: SourceStamp) -> Option<PanGenome> {
    let file = match File::open(bin) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %bin.display(), error = %e, "No pan-genome cache");
            return None;
        }
    };

    match bincode::deserialize_from::<_, CachedPanGenome>(BufReader::new(file)) {
        Ok(cached) if cached.source == stamp => Some(cached.pangenome),
        Ok(_) => {
            warn!(path = %bin.display(), "Pan-genome cache is stale, re-reading text file");
            None
        }
        Err(e) => {
            warn!(path = %bin.display(), error = %e, "Pan-genome cache is unreadable, re-reading text file");
            None
        }
    }
}

fn save_cache(bin: &Path, stamp: SourceStamp, pangenome: &PanGenome) -> Result<(), bincode::Error> {
    let writer = BufWriter::new(File::create(bin)?);
    bincode::serialize_into(
        writer,
        &CachedPanGenome {
            source: stamp,
            pangenome: pangenome.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const PAN: &str = "\
1 GEN1.1017.00001.i0001_00001 GEN2.1017.00001.i0001_00001
2 GEN1.1017.00001.i0001_00002 GEN1.1017.00001.i0001_00003 GEN3.1017.00001.b0001_00004

10 GEN3.1017.00001.b0001_00005
";

    #[test]
    fn test_parse_pangenome_text() {
        let pan = parse_pangenome_text(PAN).unwrap();
        assert_eq!(pan.len(), 3);
        assert_eq!(pan.genome_count(), 3);
        assert!(pan.genomes.contains("GEN3.1017.00001"));

        let fam2 = &pan.family_by_strain[&FamilyId(2)];
        assert_eq!(fam2["GEN1.1017.00001"].len(), 2);
        assert_eq!(fam2["GEN3.1017.00001"].len(), 1);
        assert_eq!(pan.members[&FamilyId(2)].len(), 3);
        // Numeric ordering of ids
        let ids: Vec<u64> = pan.members.keys().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 2, 10]);
    }

    #[test]
    fn test_parse_tab_separated() {
        let pan = parse_pangenome_text("7\tGEN1.c.i1_1\tGEN2.c.i1_1\n").unwrap();
        assert_eq!(pan.members[&FamilyId(7)].len(), 2);
    }

    #[test]
    fn test_family_without_members() {
        let err = parse_pangenome_text("1 GEN1.c.i1_1\n2\n").unwrap_err();
        match err {
            PanGenomeError::InvalidFormat(msg) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_family_id() {
        assert!(matches!(
            parse_pangenome_text("fam GEN1.c.i1_1\n"),
            Err(PanGenomeError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_pangenome_text("0 GEN1.c.i1_1\n"),
            Err(PanGenomeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_duplicate_family_id() {
        let err = parse_pangenome_text("1 GEN1.c.i1_1\n1 GEN2.c.i1_1\n").unwrap_err();
        assert!(err.to_string().contains("already defined"));
    }

    #[test]
    fn test_empty_pangenome() {
        assert!(matches!(
            parse_pangenome_text("\n   \n"),
            Err(PanGenomeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_pangenome(Path::new("/nonexistent/pangenome.lst"), CacheMode::Ignore);
        assert!(matches!(result, Err(PanGenomeError::Io(_))));
    }

    #[test]
    fn test_read_gzipped() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut file = NamedTempFile::with_suffix(".lst.gz").unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(PAN.as_bytes()).unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file.flush().unwrap();

        let pan = read_pangenome(file.path(), CacheMode::Ignore).unwrap();
        assert_eq!(pan.len(), 3);
    }

    #[test]
    fn test_cache_written_and_reused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pangenome.lst");
        std::fs::write(&path, PAN).unwrap();

        let first = read_pangenome(&path, CacheMode::Use).unwrap();
        let bin = cache_path(&path);
        assert!(bin.exists());
        assert_eq!(bin.file_name().unwrap(), "pangenome.lst.bin");

        let second = read_pangenome(&path, CacheMode::Use).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_cache_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pangenome.lst");
        std::fs::write(&path, PAN).unwrap();
        read_pangenome(&path, CacheMode::Use).unwrap();

        // Different length invalidates the stamp regardless of mtime resolution
        std::fs::write(&path, "5 GEN9.c.i1_1 GEN8.c.i1_1\n").unwrap();
        let pan = read_pangenome(&path, CacheMode::Use).unwrap();
        assert_eq!(pan.len(), 1);
        assert!(pan.members.contains_key(&FamilyId(5)));
    }

    #[test]
    fn test_corrupt_cache_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pangenome.lst");
        std::fs::write(&path, PAN).unwrap();
        std::fs::write(cache_path(&path), b"not bincode").unwrap();

        let pan = read_pangenome(&path, CacheMode::Use).unwrap();
        assert_eq!(pan.len(), 3);
    }

    #[test]
    fn test_ignore_mode_writes_no_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pangenome.lst");
        std::fs::write(&path, PAN).unwrap();

        read_pangenome(&path, CacheMode::Ignore).unwrap();
        assert!(!cache_path(&path).exists());
    }
}
