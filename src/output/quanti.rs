//! Quantitative pan-genome matrix: member count of each family in each genome.
//!
//! ```text
//! num_fam	GEN1	GEN2
//! 1	1	1
//! 2	2	0
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::pangenome::PanGenome;

/// Write the matrix to `writer`: genomes in sorted order, families in numeric order
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_quanti_to<W: Write>(pangenome: &PanGenome, mut writer: W) -> std::io::Result<()> {
    write!(writer, "num_fam")?;
    for genome in &pangenome.genomes {
        write!(writer, "\t{genome}")?;
    }
    writeln!(writer)?;

    for (id, strains) in &pangenome.family_by_strain {
        write!(writer, "{id}")?;
        for genome in &pangenome.genomes {
            write!(writer, "\t{}", strains.get(genome).map_or(0, Vec::len))?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

/// Create (or overwrite) `path` with the quantitative matrix
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_quanti(pangenome: &PanGenome, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    write_quanti_to(pangenome, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::pangenome::parse_pangenome_text;

    #[test]
    fn test_quanti_matrix() {
        let pan = parse_pangenome_text(
            "2 GEN1.c.i1_2 GEN1.c.i1_3\n1 GEN1.c.i1_1 GEN2.c.i1_1\n",
        )
        .unwrap();
        let mut out = Vec::new();
        write_quanti_to(&pan, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "num_fam\tGEN1.c\tGEN2.c\n1\t1\t1\n2\t2\t0\n"
        );
    }
}
