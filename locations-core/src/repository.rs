//! Saved locations on top of a [`ConfigStore`].
//!
//! Two sources feed the combined view: sensitive locations, injected at
//! construction and never written anywhere, and the user's own locations
//! under `locations` in the config document. Only the latter can be
//! saved or deleted.

use crate::{
    config::{ConfigError, ConfigStore},
    model::Locations,
    validate::is_valid_location,
};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Location '{0}' not found among saved locations")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct LocationRepository<S> {
    store: S,
    sensitive: Locations,
}

impl<S: ConfigStore> LocationRepository<S> {
    pub fn new(store: S, sensitive: Locations) -> Self {
        Self { store, sensitive }
    }

    /// Load saved locations, optionally merged over valid sensitive ones.
    ///
    /// Sensitive locations come first. A saved location with the same name
    /// keeps the sensitive entry's position but replaces its value.
    pub fn load(&self, include_sensitive: bool) -> Result<Locations, RepositoryError> {
        tracing::debug!("Loading locations...");
        let saved = self.store.load()?.locations;

        if !include_sensitive {
            return Ok(saved);
        }

        let mut merged: Locations = self
            .sensitive
            .iter()
            .filter(|(_, value)| is_valid_location(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        merged.extend(saved);

        tracing::debug!("Loaded {} locations", merged.len());
        Ok(merged)
    }

    /// Insert or overwrite a saved location.
    pub fn save(&self, name: &str, coordinate: &str) -> Result<(), RepositoryError> {
        tracing::debug!("Saving location: {name}...");
        let mut config = self.store.load()?;
        config.locations.insert(name.to_string(), coordinate.to_string());
        self.store.save(&config)?;
        tracing::debug!("{name} location saved successfully");
        Ok(())
    }

    /// Remove a saved location. Sensitive locations are never found here.
    pub fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let mut config = self.store.load()?;
        if config.locations.shift_remove(name).is_none() {
            return Err(RepositoryError::NotFound(name.to_string()));
        }
        self.store.save(&config)?;
        tracing::debug!("{name} location deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfigStore;
    use std::fs;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir, sensitive: Locations) -> LocationRepository<FileConfigStore> {
        LocationRepository::new(FileConfigStore::new(dir.path().join("config.toml")), sensitive)
    }

    fn sensitive(entries: &[(&str, &str)]) -> Locations {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn save_then_load_round_trips_exact_string() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, Locations::new());

        repo.save("Home", "1.599, 12.6168").unwrap();

        let locations = repo.load(false).unwrap();
        assert_eq!(locations.get("Home").map(String::as_str), Some("1.599, 12.6168"));
    }

    #[test]
    fn save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, Locations::new());

        repo.save("A", "1, 1").unwrap();
        repo.save("A", "2, 2").unwrap();

        let locations = repo.load(false).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations["A"], "2, 2");
    }

    #[test]
    fn delete_removes_saved_location() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, Locations::new());
        repo.save("A", "1, 1").unwrap();
        repo.save("B", "2, 2").unwrap();

        repo.delete("A").unwrap();

        let locations = repo.load(false).unwrap();
        assert!(!locations.contains_key("A"));
        assert!(locations.contains_key("B"));
    }

    #[test]
    fn delete_missing_name_is_not_found_and_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, Locations::new());
        repo.save("A", "1, 1").unwrap();
        let before = fs::read_to_string(dir.path().join("config.toml")).unwrap();

        let err = repo.delete("Missing").unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound(ref name) if name == "Missing"));
        let after = fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn sensitive_locations_cannot_be_deleted() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, sensitive(&[("secret base", "10, 10")]));

        let err = repo.delete("secret base").unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
        assert!(repo.load(true).unwrap().contains_key("secret base"));
    }

    #[test]
    fn load_excludes_sensitive_by_default() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, sensitive(&[("secret base", "10, 10")]));
        repo.save("A", "1, 1").unwrap();

        let locations = repo.load(false).unwrap();
        assert_eq!(locations.len(), 1);
        assert!(locations.contains_key("A"));
    }

    #[test]
    fn invalid_sensitive_values_are_dropped() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(
            &dir,
            sensitive(&[
                ("secret base", "10, 10"),
                ("api key", "abc123"),
                ("too far north", "95, 10"),
            ]),
        );

        let locations = repo.load(true).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations["secret base"], "10, 10");
    }

    #[test]
    fn saved_location_wins_name_collision() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, sensitive(&[("home", "10, 10"), ("work", "20, 20")]));
        repo.save("home", "1, 1").unwrap();

        let locations = repo.load(true).unwrap();
        assert_eq!(locations["home"], "1, 1");
        assert_eq!(locations["work"], "20, 20");
    }

    #[test]
    fn load_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, Locations::new());
        repo.save("zeta", "1, 1").unwrap();
        repo.save("alpha", "2, 2").unwrap();
        repo.save("mid", "3, 3").unwrap();
        repo.delete("alpha").unwrap();
        repo.save("alpha", "4, 4").unwrap();

        let names: Vec<_> = repo.load(false).unwrap().into_keys().collect();
        assert_eq!(names, ["zeta", "mid", "alpha"]);
    }

    #[test]
    fn merged_view_lists_sensitive_first() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, sensitive(&[("zz home", "10, 10"), ("alpha", "20, 20")]));
        repo.save("zeta", "1, 1").unwrap();
        repo.save("alpha", "2, 2").unwrap();

        let merged = repo.load(true).unwrap();
        let names: Vec<_> = merged.keys().map(String::as_str).collect();
        assert_eq!(names, ["zz home", "alpha", "zeta"]);
        assert_eq!(merged["alpha"], "2, 2");
    }

    #[test]
    fn sensitive_locations_are_never_persisted() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir, sensitive(&[("secret base", "10, 10")]));
        repo.save("A", "1, 1").unwrap();

        let contents = fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert!(!contents.contains("secret base"));
    }
}
