// Saves the retained frame as `<output_dir>/YYYY-MM-DD_HH-MM-SS.jpg`.
// Two snapshots within the same second share a name; the later one wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use log::info;

use crate::error::{Error, Result};
use crate::types::RetainedImage;

pub struct SnapshotWriter {
    output_dir: PathBuf,
    quality: u8,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self { output_dir: output_dir.into(), quality }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save using the current local time for the filename.
    pub fn save(&self, retained: Option<&RetainedImage>) -> Result<PathBuf> {
        self.save_at(retained, Local::now().naive_local())
    }

    /// Save with an explicit timestamp. Nothing is written when there is no
    /// retained frame yet.
    pub fn save_at(&self, retained: Option<&RetainedImage>, ts: NaiveDateTime) -> Result<PathBuf> {
        let img = retained.ok_or(Error::SnapshotNotReady)?;
        let bytes = encode_jpeg(img, self.quality)?;

        let filename = snapshot_filename(ts);
        let path = self.output_dir.join(&filename);
        fs::write(&path, bytes)?;
        info!("saved {}", path.display());
        Ok(path)
    }
}

pub fn snapshot_filename(ts: NaiveDateTime) -> String {
    format!("{}.jpg", ts.format("%Y-%m-%d_%H-%M-%S"))
}

/// JPEG has no alpha, so the frame is flattened to RGB first.
pub fn encode_jpeg(img: &RetainedImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode_image(&rgb)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::{tests::gradient_4x4, to_retained};
    use chrono::NaiveDate;
    use image::{Rgba, RgbaImage};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn filename_uses_dashed_timestamp() {
        assert_eq!(snapshot_filename(noon()), "2024-01-01_12-00-00.jpg");
    }

    #[test]
    fn filename_zero_pads_fields() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap().and_hms_opt(4, 5, 9).unwrap();
        assert_eq!(snapshot_filename(ts), "2025-03-07_04-05-09.jpg");
    }

    #[test]
    fn save_writes_encoded_frame_at_timestamp_path() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path(), 75);
        let img = to_retained(&gradient_4x4());

        let path = writer.save_at(Some(&img), noon()).unwrap();

        assert_eq!(path, dir.path().join("2024-01-01_12-00-00.jpg"));
        assert_eq!(fs::read(&path).unwrap(), encode_jpeg(&img, 75).unwrap());
    }

    #[test]
    fn saved_file_decodes_to_frame_size() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path(), 75);
        let img = to_retained(&gradient_4x4());
        let path = writer.save_at(Some(&img), noon()).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn save_before_first_frame_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path(), 75);

        let err = writer.save_at(None, noon()).unwrap_err();

        assert!(matches!(err, Error::SnapshotNotReady));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn same_second_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path(), 75);
        let first = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        let second = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));

        let p1 = writer.save_at(Some(&first), noon()).unwrap();
        let p2 = writer.save_at(Some(&second), noon()).unwrap();

        assert_eq!(p1, p2);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(fs::read(&p2).unwrap(), encode_jpeg(&second, 75).unwrap());
    }

    #[test]
    fn saved_path_is_inside_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("booth");
        fs::create_dir(&out).unwrap();
        let writer = SnapshotWriter::new(&out, 75);
        let img = to_retained(&gradient_4x4());

        let path = writer.save_at(Some(&img), noon()).unwrap();

        assert_eq!(path.parent(), Some(writer.output_dir()));
        assert!(path.is_file());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("nope"), 75);
        let img = to_retained(&gradient_4x4());

        let err = writer.save_at(Some(&img), noon()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
