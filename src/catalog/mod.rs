use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self},
    path::PathBuf,
};
use thiserror::Error;
use zip::{ZipArchive, read::ZipFile};

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
}

/// Streaming reader over the static commute catalogue: connector stops,
/// campus buildings, shuttle schedules and precomputed isochrones, bundled
/// as CSV files inside a zip archive.
#[derive(Default)]
pub struct Catalog {
    config: Config,
    storage: StorageType,
}

impl Catalog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn from_zip(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Zip(path);
        self
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, StopRecord)),
    {
        self.stream(&self.config.stops_file_name, f)
    }

    pub fn stream_buildings<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, BuildingRecord)),
    {
        self.stream(&self.config.buildings_file_name, f)
    }

    pub fn stream_calls<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, CallRecord)),
    {
        self.stream(&self.config.schedules_file_name, f)
    }

    pub fn stream_isochrones<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, IsochroneRecord)),
    {
        self.stream(&self.config.isochrones_file_name, f)
    }

    pub fn stream_isochrone_points<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, IsochronePointRecord)),
    {
        self.stream(&self.config.isochrone_points_file_name, f)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => stream_from_zip::<T, F>(path, file_name, f),
        }
    }
}

fn stream_from_zip<T, F>(zip_path: &PathBuf, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let file = get_file(&mut archive, file_name)?;
    let mut reader = csv::Reader::from_reader(file);
    reader
        .deserialize()
        .filter_map(|record| record.ok())
        .enumerate()
        .for_each(f);
    Ok(())
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
