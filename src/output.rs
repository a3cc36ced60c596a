use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::lattice::Lattice;

/// First free path for `stem` under `dir`: the plain stem if nothing is
/// there yet, otherwise `stem (1)`, `stem (2)`, … with the first unused n.
pub fn unique_path(dir: &Path, stem: &str) -> PathBuf {
    let candidate = dir.join(stem);
    if !candidate.exists() {
        return candidate;
    }
    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{stem} ({counter})"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Save the final spin configuration: '1' per up spin, '0' per down spin,
/// one line per lattice row. Returns the path actually written.
pub fn save_lattice(dir: &Path, stem: &str, lattice: &Lattice) -> io::Result<PathBuf> {
    let path = unique_path(dir, stem);
    let mut file = BufWriter::new(File::create(&path)?);
    for row in lattice.rows() {
        for &spin in row {
            file.write_all(if spin > 0 { b"1" } else { b"0" })?;
        }
        file.write_all(b"\n")?;
    }
    file.flush()?;
    Ok(path)
}

/// Save the magnetization trajectory, one sample per line, initial sample
/// first. Returns the path actually written.
pub fn save_trajectory(dir: &Path, stem: &str, samples: &[f64]) -> io::Result<PathBuf> {
    let path = unique_path(dir, stem);
    let mut file = BufWriter::new(File::create(&path)?);
    for sample in samples {
        writeln!(file, "{sample}")?;
    }
    file.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ising-mc-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_unique_path_increments() {
        let dir = scratch_dir("unique");
        assert_eq!(unique_path(&dir, "out"), dir.join("out"));
        fs::write(dir.join("out"), "x").unwrap();
        assert_eq!(unique_path(&dir, "out"), dir.join("out (1)"));
        fs::write(dir.join("out (1)"), "x").unwrap();
        assert_eq!(unique_path(&dir, "out"), dir.join("out (2)"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_lattice_format() {
        let dir = scratch_dir("lattice");
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let mut lat = Lattice::random(2, 1.0, &mut rng);
        lat.flip(1, 0);
        let path = save_lattice(&dir, "lattice", &lat).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "11\n01\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_trajectory_format() {
        let dir = scratch_dir("trajectory");
        let path = save_trajectory(&dir, "mag", &[0.0, -0.5, 1.0]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "0\n-0.5\n1\n");
        fs::remove_dir_all(&dir).unwrap();
    }
}
