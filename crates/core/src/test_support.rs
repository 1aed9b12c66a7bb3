//! In-memory JPEG fixtures for tests.

use std::fs;
use std::path::{Path, PathBuf};

const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_DIGITIZED: u16 = 0x9004;
pub const TYPE_ASCII: u16 = 2;
pub const TYPE_LONG: u16 = 4;

/// SOI, an APP1 EXIF segment whose EXIF IFD holds an ASCII
/// `DateTimeDigitized`, EOI.
pub fn jpeg_with_creation_date(date: &str) -> Vec<u8> {
    let mut ascii = date.as_bytes().to_vec();
    ascii.push(0);
    jpeg_with_creation_date_field(TYPE_ASCII, ascii.len() as u32, &ascii)
}

/// Same layout with an arbitrary type, count and encoded value for the
/// `DateTimeDigitized` entry.
pub fn jpeg_with_creation_date_field(kind: u16, count: u32, value: &[u8]) -> Vec<u8> {
    // Little-endian TIFF: header, IFD0 with the EXIF pointer, EXIF IFD.
    let ifd0_offset: u32 = 8;
    let exif_ifd_offset: u32 = ifd0_offset + 2 + 12 + 4;
    let data_offset: u32 = exif_ifd_offset + 2 + 12 + 4;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&ifd0_offset.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_entry(
        &mut tiff,
        TAG_EXIF_IFD_POINTER,
        TYPE_LONG,
        1,
        exif_ifd_offset.to_le_bytes(),
    );
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Values of four bytes or less live inline in the entry.
    let inline = value.len() <= 4;
    let value_field = if inline {
        let mut field = [0u8; 4];
        field[..value.len()].copy_from_slice(value);
        field
    } else {
        data_offset.to_le_bytes()
    };
    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_entry(&mut tiff, TAG_DATE_TIME_DIGITIZED, kind, count, value_field);
    tiff.extend_from_slice(&0u32.to_le_bytes());
    if !inline {
        tiff.extend_from_slice(value);
    }

    let mut app1 = b"Exif\0\0".to_vec();
    app1.extend_from_slice(&tiff);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

pub fn jpeg_without_exif() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

pub fn write_file(dir: &Path, name: &str, body: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read fixture dir")
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

fn push_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value);
}
