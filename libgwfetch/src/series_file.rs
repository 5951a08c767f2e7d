use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use ndarray::Array1;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::error::SeriesFileError;
use super::series::FetchedSeries;

// On-disk layout (all little-endian):
// magic(u32) version(u16) t0(f64) dt(f64) n_samples(u64) samples(n * f64)
const MAGIC: u32 = 0x4757_4431; // "GWD1"
const FORMAT_VERSION: u16 = 1;

/// Write a series to `path`, truncating any existing file. Re-running a batch
/// therefore overwrites output files in place rather than accumulating copies.
pub fn write_series(series: &FetchedSeries, path: &Path) -> Result<(), SeriesFileError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_u32::<LittleEndian>(MAGIC)?;
    writer.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_f64::<LittleEndian>(series.t0)?;
    writer.write_f64::<LittleEndian>(series.dt)?;
    writer.write_u64::<LittleEndian>(series.n_samples() as u64)?;
    for sample in series.samples.iter() {
        writer.write_f64::<LittleEndian>(*sample)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a series back from `path`.
pub fn read_series(path: &Path) -> Result<FetchedSeries, SeriesFileError> {
    if !path.exists() {
        return Err(SeriesFileError::BadFilePath(path.to_path_buf()));
    }
    let mut reader = BufReader::new(File::open(path)?);

    let magic = reader.read_u32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(SeriesFileError::BadMagic(magic));
    }
    let version = reader.read_u16::<LittleEndian>()?;
    if version != FORMAT_VERSION {
        return Err(SeriesFileError::BadVersion(version, FORMAT_VERSION));
    }

    let t0 = reader.read_f64::<LittleEndian>()?;
    let dt = reader.read_f64::<LittleEndian>()?;
    let n_samples = reader.read_u64::<LittleEndian>()? as usize;
    let mut samples: Vec<f64> = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        samples.push(reader.read_f64::<LittleEndian>()?);
    }

    Ok(FetchedSeries::new(t0, dt, Array1::from_vec(samples)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.gwd");
        let series = FetchedSeries::new(
            1238166018.0,
            0.0625,
            Array1::from_vec(vec![0.5, -0.25, 1.0, 0.0]),
        );

        write_series(&series, &path).unwrap();
        let back = read_series(&path).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_overwrite_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.gwd");
        let long = FetchedSeries::new(0.0, 1.0, Array1::from_vec(vec![1.0; 128]));
        let short = FetchedSeries::new(0.0, 1.0, Array1::from_vec(vec![2.0; 4]));

        write_series(&long, &path).unwrap();
        write_series(&short, &path).unwrap();
        let back = read_series(&path).unwrap();
        assert_eq!(back.n_samples(), 4);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_series.gwd");
        std::fs::write(&path, b"this is not a gwd file at all").unwrap();

        match read_series(&path) {
            Err(SeriesFileError::BadMagic(_)) => (),
            _ => panic!("expected BadMagic"),
        }
    }
}
