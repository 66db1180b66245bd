use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use proptest::collection::vec;
use proptest::prelude::*;

use arcpack::container::{ArcReader, ArcWriter, PackOptions, ARC_MAGIC};
use arcpack::ArcError;

fn write_archive(writer: &ArcWriter) -> Vec<u8> {
    let mut bytes = Vec::new();
    writer.write_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn test_pack_directory_and_extract() {
    let base = std::env::temp_dir().join(format!("arcpack-it-{}", std::process::id()));
    let _ = fs::remove_dir_all(&base);

    let src = base.join("game");
    fs::create_dir_all(src.join("maps")).unwrap();
    fs::write(src.join("readme.txt"), b"hello").unwrap();
    fs::write(src.join("maps").join("level1.map"), vec![3u8; 5000]).unwrap();

    let mut writer = ArcWriter::new(PackOptions::default());
    assert_eq!(writer.add_directory(&src).unwrap(), 2);
    let bytes = write_archive(&writer);
    assert_eq!(&bytes[..4], &ARC_MAGIC);

    let mut reader = ArcReader::open(Cursor::new(bytes)).unwrap();
    let entries = reader.entries().to_vec();
    assert!(entries[0].name.ends_with("game/readme.txt"));
    assert!(entries[1].name.ends_with("game/maps/level1.map"));
    assert!(!entries[0].is_compressed());
    assert!(entries[1].is_compressed());

    let out = base.join("out");
    let written = reader.extract_to(&out).unwrap();
    let extracted: Vec<PathBuf> = written
        .iter()
        .map(|p| p.strip_prefix(&out).unwrap().to_path_buf())
        .collect();
    assert!(extracted[0].ends_with(PathBuf::from("game").join("readme.txt")));
    assert_eq!(fs::read(&written[0]).unwrap(), b"hello");
    assert_eq!(fs::read(&written[1]).unwrap(), vec![3u8; 5000]);

    fs::remove_dir_all(&base).unwrap();
}

#[test]
fn test_no_compression_keeps_sizes_equal() {
    let mut writer = ArcWriter::new(PackOptions {
        compression: false,
        ..PackOptions::default()
    });
    writer.add_file("a/zeros.bin", &[0u8; 8000]).unwrap();

    let reader = ArcReader::open(Cursor::new(write_archive(&writer))).unwrap();
    let entry = &reader.entries()[0];
    assert_eq!(entry.stored_size(), 8000);
    assert_eq!(entry.decompressed_size(), 8000);
}

#[test]
fn test_not_an_archive() {
    let bytes = b"this is not an archive at all".to_vec();
    assert!(matches!(
        ArcReader::open(Cursor::new(bytes)),
        Err(ArcError::InvalidMagic(_))
    ));
}

#[test]
fn test_corrupt_compressed_entry() {
    let mut writer = ArcWriter::new(PackOptions::default());
    writer.add_file("x", &vec![9u8; 3000]).unwrap();

    let mut bytes = write_archive(&writer);
    // Drop the end-of-stream marker of the only entry and shrink its size
    bytes.truncate(bytes.len() - 1);
    let stored = u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]) - 1;
    bytes[28..32].copy_from_slice(&stored.to_le_bytes());

    let mut reader = ArcReader::open(Cursor::new(bytes)).unwrap();
    let entry = reader.entries()[0].clone();
    assert!(matches!(
        reader.read_entry(&entry),
        Err(ArcError::TruncatedInput(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_archive_roundtrip(
        files in vec(vec(0u8..8, 0..3000), 0..6),
        compression in any::<bool>(),
    ) {
        let mut writer = ArcWriter::new(PackOptions {
            compression,
            ..PackOptions::default()
        });
        for (i, data) in files.iter().enumerate() {
            writer.add_file(&format!("dir/file{}.bin", i), data).unwrap();
        }

        let mut reader = ArcReader::open(Cursor::new(write_archive(&writer))).unwrap();
        prop_assert_eq!(reader.len(), files.len());

        let entries = reader.entries().to_vec();
        for (i, (entry, data)) in entries.iter().zip(&files).enumerate() {
            prop_assert_eq!(&entry.name, &format!("dir/file{}.bin", i));
            prop_assert!(entry.stored_size() <= entry.decompressed_size());
            prop_assert_eq!(&reader.read_entry(entry).unwrap(), data);
        }
    }
}
