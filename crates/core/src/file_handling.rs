//! YAML-backed configuration store.
//!
//! The configuration file is a YAML mapping of sections, each section mapping
//! option names to string values, in file order:
//!
//! ```yaml
//! alias:
//!   SAY: msg *
//!   J: join
//! ```

use std::fs::{self, File};
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::persistence::{quote, unquote, SectionWriter};

pub type Section = IndexMap<String, String>;

type Document = IndexMap<String, Option<Section>>;

fn read_document(path: &str) -> Result<Document> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::io_error("config".to_string(), path.to_string(), e))?;

    if contents.trim().is_empty() {
        return Ok(Document::new());
    }

    serde_yaml::from_str(&contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            path.to_string(),
            e,
        )
    })
}

/// A configuration file and the sections read from it.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: String,
    sections: IndexMap<String, Section>,
}

impl ConfigFile {
    /// Opens the configuration file at `path`, without reading it yet.
    pub fn open(path: &str) -> Self {
        Self {
            path: path.to_string(),
            sections: IndexMap::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn exists(&self) -> bool {
        Path::new(&self.path).exists()
    }

    /// Reads every section from disk, replacing what was read before.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not a mapping of sections to string mappings
    pub fn read(&mut self) -> Result<()> {
        let document = read_document(&self.path)?;
        self.sections = document
            .into_iter()
            .map(|(name, section)| (name, section.unwrap_or_default()))
            .collect();

        debug!(
            "Read {} sections from `{}`",
            self.sections.len(),
            self.path
        );
        Ok(())
    }

    /// Reads the file again. Same as [`ConfigFile::read`].
    ///
    /// # Errors
    ///
    /// See [`ConfigFile::read`].
    pub fn reload(&mut self) -> Result<()> {
        self.read()
    }

    /// Writes every section to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file or its directory cannot be created
    /// - Serialization to YAML fails
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::io_error("config directory".to_string(), self.path.clone(), e)
                })?;
            }
        }

        let f = File::create(&self.path)
            .map_err(|e| Error::io_error("config".to_string(), self.path.clone(), e))?;

        serde_yaml::to_writer(f, &self.sections).map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                "config".to_string(),
                self.path.clone(),
                e,
            )
        })?;

        info!("Wrote config file `{}`", self.path);
        Ok(())
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// The lines of section `name` as `(option, quoted value)` records, the
    /// form [`SectionLines`] takes them in.
    pub fn section_records(&self, name: &str) -> Vec<(String, String)> {
        self.section(name)
            .map(|section| {
                section
                    .iter()
                    .map(|(option, value)| (option.clone(), quote(value)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Empties the section `name` and returns a writer for its new lines.
    pub fn section_writer(&mut self, name: &str) -> SectionLines<'_> {
        let section = self.sections.entry(name.to_string()).or_default();
        section.clear();
        SectionLines { section }
    }

    /// Forgets the sections read so far.
    pub fn close(&mut self) {
        self.sections.clear();
    }
}

/// Writer for the lines of one section of a [`ConfigFile`].
pub struct SectionLines<'a> {
    section: &'a mut Section,
}

impl SectionWriter for SectionLines<'_> {
    fn write_line(&mut self, option: &str, value: &str) -> Result<()> {
        // YAML has its own quoting
        self.section
            .insert(option.to_string(), unquote(value).to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_with(yaml_content: &str) -> (NamedTempFile, ConfigFile) {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{yaml_content}").unwrap();
        let config = ConfigFile::open(temp_file.path().to_str().unwrap());
        (temp_file, config)
    }

    #[test]
    fn test_read_keeps_file_order() {
        let (_file, mut config) = config_with(
            r#"
alias:
  ZED: "zoom"
  ALPHA: "away $*"
  MID: msg *
"#,
        );

        config.read().unwrap();
        let section = config.section("alias").unwrap();
        let keys: Vec<&String> = section.keys().collect();
        assert_eq!(keys, vec!["ZED", "ALPHA", "MID"]);
        assert_eq!(section["ALPHA"], "away $*");
        assert_eq!(section["MID"], "msg *");
    }

    #[test]
    fn test_read_empty_file_and_section() {
        let (_file, mut config) = config_with("");
        config.read().unwrap();
        assert!(config.section("alias").is_none());

        let (_file, mut config) = config_with("alias:\n");
        config.read().unwrap();
        assert!(config.section("alias").unwrap().is_empty());
    }

    #[test]
    fn test_read_invalid_yaml() {
        let (_file, mut config) = config_with("alias: [unclosed");
        assert!(matches!(config.read(), Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_read_missing_file() {
        let mut config = ConfigFile::open("/this/path/does/not/exist.yml");
        assert!(!config.exists());
        assert!(matches!(config.read(), Err(Error::Io { .. })));
    }

    #[test]
    fn test_write_and_read_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("alias.yml");
        let path = path.to_str().unwrap();

        let mut config = ConfigFile::open(path);
        {
            let mut lines = config.section_writer("alias");
            lines.write_line("SAY", "\"msg *\"").unwrap();
            lines.write_line("HOP", "\"part $1;join $1\"").unwrap();
        }
        config.write().unwrap();

        let mut reread = ConfigFile::open(path);
        reread.read().unwrap();
        let section = reread.section("alias").unwrap();
        assert_eq!(section["SAY"], "msg *");
        assert_eq!(section["HOP"], "part $1;join $1");
    }

    #[test]
    fn test_records_keep_inner_quotes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("alias.yml");
        let path = path.to_str().unwrap();

        let mut config = ConfigFile::open(path);
        config
            .section_writer("alias")
            .write_line("Q", &quote("\"hello world\""))
            .unwrap();
        config.write().unwrap();

        let mut reread = ConfigFile::open(path);
        reread.read().unwrap();
        assert_eq!(reread.section("alias").unwrap()["Q"], "\"hello world\"");
        assert_eq!(
            reread.section_records("alias"),
            vec![("Q".to_string(), "\"\"hello world\"\"".to_string())]
        );
        assert!(reread.section_records("missing").is_empty());
    }

    #[test]
    fn test_section_writer_replaces_section() {
        let mut config = ConfigFile::open("unused.yml");
        config.section_writer("alias").write_line("A", "\"a\"").unwrap();
        config.section_writer("alias").write_line("B", "\"b\"").unwrap();

        let keys: Vec<&String> = config.section("alias").unwrap().keys().collect();
        assert_eq!(keys, vec!["B"]);

        config.close();
        assert!(config.section("alias").is_none());
    }
}
