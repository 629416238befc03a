use crate::domain::{Partner, Registry};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column header of the partner file.
pub const HEADER: [&str; 4] = ["name", "type", "resources", "contact"];

pub const DEFAULT_PATH: &str = "partners.csv";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed partner file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Reads and writes the registry as a CSV file.
///
/// Every save rewrites the whole file: header first, then one row per
/// partner in current registry order.
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    path: PathBuf,
}

impl Default for PartnerRepository {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl PartnerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the registry. A missing file yields an empty registry.
    pub fn load(&self) -> Result<Registry, PersistenceError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.path.display(),
                    "partner data not found, starting with a new list"
                );
                return Ok(Registry::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers().map_err(|e| self.csv_error(e))?;
        if headers.iter().ne(HEADER) {
            tracing::warn!(
                path = %self.path.display(),
                found = ?headers,
                "unexpected header, reading columns by position"
            );
        }

        // Columns are mapped by position, not by header name.
        let mut partners = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_error(e))?;
            let partner: Partner = record.deserialize(None).map_err(|e| self.csv_error(e))?;
            partners.push(partner);
        }

        tracing::info!(
            path = %self.path.display(),
            count = partners.len(),
            "partners loaded"
        );
        Ok(partners.into_iter().collect())
    }

    /// Replaces the file with the full registry.
    ///
    /// Rows go to a temporary file next to the target, which is then
    /// renamed over it, so a failed save leaves the previous file intact.
    pub fn save(&self, registry: &Registry) -> Result<(), PersistenceError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;

        {
            // Header is written by hand so an empty registry still gets one.
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut temp);

            writer.write_record(HEADER).map_err(|e| self.csv_error(e))?;
            for partner in registry {
                writer.serialize(partner).map_err(|e| self.csv_error(e))?;
            }
            writer.flush().map_err(|e| self.io_error(e))?;
        }

        temp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        temp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            count = registry.len(),
            "partners saved"
        );
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> PersistenceError {
        PersistenceError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repository_in(dir: &TempDir) -> PartnerRepository {
        PartnerRepository::new(dir.path().join("partners.csv"))
    }

    #[test]
    fn test_missing_file_loads_empty_registry() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);

        let registry = repository.load().unwrap();
        assert!(registry.is_empty());
        assert!(!repository.path().exists());
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);

        let mut registry = Registry::new();
        registry.add("Acme Foodbank", "Nonprofit", "Food,Shelter", "555-0100");
        registry.add("true", "false", "Says \"hi\", often", "line one\nline two");
        registry.add("  padded  ", "Café", "日本語", "x");

        repository.save(&registry).unwrap();
        let loaded = repository.load().unwrap();

        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_save_writes_header_and_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);

        let mut registry = Registry::new();
        registry.add("B", "t", "r", "c");
        registry.add("A", "t", "Food,Shelter", "c");
        repository.save(&registry).unwrap();

        let content = fs::read_to_string(repository.path()).unwrap();
        assert_eq!(
            content,
            "name,type,resources,contact\nB,t,r,c\nA,t,\"Food,Shelter\",c\n"
        );
    }

    #[test]
    fn test_save_empty_registry_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);

        repository.save(&Registry::new()).unwrap();

        let content = fs::read_to_string(repository.path()).unwrap();
        assert_eq!(content, "name,type,resources,contact\n");
        assert!(repository.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_fully_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);

        let mut registry = Registry::new();
        registry.add("One", "t", "r", "c");
        registry.add("Two", "t", "r", "c");
        repository.save(&registry).unwrap();

        registry.remove("One");
        repository.save(&registry).unwrap();

        let loaded = repository.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.partners()[0].name, "Two");
    }

    #[test]
    fn test_load_maps_columns_by_position() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);
        fs::write(
            repository.path(),
            "Name,Kind,What,Who\nLibrary,Public,Books,555-0199\n",
        )
        .unwrap();

        let registry = repository.load().unwrap();
        let partner = registry.find_by_name("Library").unwrap();
        assert_eq!(partner.partner_type, "Public");
        assert_eq!(partner.resources, "Books");
        assert_eq!(partner.contact, "555-0199");
    }

    #[test]
    fn test_load_rejects_rows_with_wrong_field_count() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);
        fs::write(
            repository.path(),
            "name,type,resources,contact\nOnly,three,fields\n",
        )
        .unwrap();

        let err = repository.load().unwrap_err();
        assert!(matches!(err, PersistenceError::Csv { .. }));
        assert!(err.to_string().contains("malformed partner file"));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let repository = PartnerRepository::new(dir.path().join("nope").join("partners.csv"));

        let err = repository.save(&Registry::new()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }

    fn entries(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_leaves_no_temporary_files() {
        let dir = TempDir::new().unwrap();
        let repository = repository_in(&dir);

        let mut registry = Registry::new();
        registry.add("Acme Foodbank", "Nonprofit", "Food", "555-0100");
        repository.save(&registry).unwrap();
        repository.save(&registry).unwrap();

        assert_eq!(entries(&dir), vec!["partners.csv"]);
    }

    #[test]
    fn test_failed_save_keeps_existing_data() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("partners.csv");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "untouched").unwrap();
        let repository = PartnerRepository::new(&target);

        let mut registry = Registry::new();
        registry.add("Acme Foodbank", "Nonprofit", "Food", "555-0100");
        let err = repository.save(&registry).unwrap_err();

        assert!(matches!(err, PersistenceError::Io { .. }));
        assert_eq!(entries(&dir), vec!["partners.csv"]);
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "untouched");
    }
}
