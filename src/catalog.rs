//! City catalog: which CSV backs which city, and loading it.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::config::CatalogConfig;
use crate::dataset::{RawDataset, read_csv};
use crate::error::{ExploreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }

    /// File name of the city's dataset inside the data directory.
    pub fn default_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york" | "new york city" | "new_york_city" | "nyc" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            _ => Err(ExploreError::UnknownCity(s.trim().to_string())),
        }
    }
}

/// Resolves cities to dataset files under a data directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl Catalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Applies per-city file overrides. Relative paths resolve against the
    /// data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExploreError::UnknownCity`] for an entry naming no known city.
    pub fn with_config(mut self, config: &CatalogConfig) -> Result<Self> {
        for (name, path) in config.iter() {
            let city: City = name.parse()?;
            self.overrides.insert(city, PathBuf::from(path));
        }
        Ok(self)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, city: City) -> PathBuf {
        match self.overrides.get(&city) {
            Some(path) => self.data_dir.join(path),
            None => self.data_dir.join(city.default_file()),
        }
    }

    /// Loads the city's raw dataset.
    ///
    /// # Errors
    ///
    /// [`ExploreError::DatasetNotFound`] if the file does not exist, or a
    /// CSV error if it cannot be read.
    #[tracing::instrument(skip_all, fields(city = %city))]
    pub fn load(&self, city: City) -> Result<RawDataset> {
        let path = self.path_for(city);
        if !path.is_file() {
            return Err(ExploreError::DatasetNotFound { city, path });
        }

        let dataset = read_csv(File::open(&path)?)?;
        info!(path = %path.display(), rows = dataset.len(), "Dataset loaded");
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_city_parse_aliases() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("new york".parse::<City>().unwrap(), City::NewYork);
        assert_eq!(" NYC ".parse::<City>().unwrap(), City::NewYork);
        assert_eq!("WASHINGTON".parse::<City>().unwrap(), City::Washington);
        assert!(matches!(
            "boston".parse::<City>(),
            Err(ExploreError::UnknownCity(name)) if name == "boston"
        ));
    }

    #[test]
    fn test_path_for_defaults() {
        let catalog = Catalog::new("data");
        assert_eq!(
            catalog.path_for(City::NewYork),
            PathBuf::from("data/new_york_city.csv")
        );
    }

    #[test]
    fn test_path_for_override() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{"washington": "dc/2017.csv"}"#).unwrap();
        let catalog = Catalog::new("data").with_config(&config).unwrap();

        assert_eq!(
            catalog.path_for(City::Washington),
            PathBuf::from("data/dc/2017.csv")
        );
        assert_eq!(
            catalog.path_for(City::Chicago),
            PathBuf::from("data/chicago.csv")
        );
    }

    #[test]
    fn test_override_with_unknown_city_fails() {
        let config: CatalogConfig = serde_json::from_str(r#"{"gotham": "g.csv"}"#).unwrap();
        assert!(Catalog::new("data").with_config(&config).is_err());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::new(dir.path()).load(City::Chicago).unwrap_err();

        match err {
            ExploreError::DatasetNotFound { city, path } => {
                assert_eq!(city, City::Chicago);
                assert_eq!(path, dir.path().join("chicago.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("washington.csv"),
            "Start Time,Trip Duration,User Type\n2017-06-21 08:36:34,489.066,Subscriber\n",
        )
        .unwrap();

        let ds = Catalog::new(dir.path()).load(City::Washington).unwrap();
        assert_eq!(ds.len(), 1);
    }
}
