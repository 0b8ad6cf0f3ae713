/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;
use etlcheck::file_utils::{FileManager, decode_utf8_dropping_invalid};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "mapping.xml", "<POWERMART/>")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(
        Path::new("/tmp/input/load_orders.py"),
        Path::new("/tmp/output"),
        "validation",
        "pdf",
    );

    assert_eq!(output_path, Path::new("/tmp/output/load_orders.validation.pdf"));
}

#[test]
fn test_write_bytes_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested/dir/report.pdf");

    FileManager::write_bytes(&path, b"%PDF-1.4")?;

    assert_eq!(FileManager::read_bytes(&path)?, b"%PDF-1.4");
    Ok(())
}

#[test]
fn test_read_bytes_withMissingFile_shouldFailWithPath() {
    let err = FileManager::read_bytes("missing/job.dsx").unwrap_err();
    assert!(err.to_string().contains("job.dsx"));
}

#[test]
fn test_decode_withLatin1Bytes_shouldDropThemAndCount() {
    // "café" encoded as Latin-1
    let (text, dropped) = decode_utf8_dropping_invalid(&[b'c', b'a', b'f', 0xE9]);
    assert_eq!(text, "caf");
    assert_eq!(dropped, 1);
}
