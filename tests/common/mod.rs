/*!
 * Common test utilities for the etlcheck test suite
 */

use anyhow::Result;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Routes library logs through env_logger; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small Informatica mapping export
pub fn create_test_mapping(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<POWERMART>
  <REPOSITORY NAME="DEV">
    <FOLDER NAME="SALES">
      <MAPPING NAME="m_load_orders">
        <TRANSFORMATION NAME="SQ_ORDERS" TYPE="Source Qualifier"/>
        <TRANSFORMATION NAME="FIL_ACTIVE" TYPE="Filter">
          <TABLEATTRIBUTE NAME="Filter Condition" VALUE="STATUS = 'A'"/>
        </TRANSFORMATION>
        <TRANSFORMATION NAME="LKP_CUSTOMER" TYPE="Lookup Procedure"/>
      </MAPPING>
    </FOLDER>
  </REPOSITORY>
</POWERMART>
"#;
    create_test_file(dir, filename, content)
}

/// Creates a small converted PySpark script
pub fn create_test_script(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"from pyspark.sql import SparkSession
from pyspark.sql.functions import col

spark = SparkSession.builder.appName("m_load_orders").getOrCreate()
orders = spark.read.table("sales.orders")
active = orders.filter(col("STATUS") == "A")
active.write.mode("overwrite").saveAsTable("sales.active_orders")
"#;
    create_test_file(dir, filename, content)
}

/// Reads the main document part of a DOCX package
pub fn read_docx_document_xml(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Counts non-overlapping occurrences of a byte pattern
pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}
