use std::{
    hash::{Hash, Hasher},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use fxhash::{FxHashMap, FxHasher64};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    coordinates::GeoPoint, geo_estimator::GeoEstimatorKind, travel_estimate::TravelEstimate,
};

pub const CACHE_FOLDER_ENV_VAR: &str = "DISPATCH_CACHE_FOLDER";

/// Coordinates are rounded to 5 decimals (~1m) before being used as a key.
const COORDINATE_PRECISION: f64 = 100_000.0;

fn round_coordinate(value: f64) -> i64 {
    (value * COORDINATE_PRECISION).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    from: (i64, i64),
    to: (i64, i64),
}

impl RouteKey {
    pub fn new(from: &GeoPoint, to: &GeoPoint) -> Self {
        RouteKey {
            from: (round_coordinate(from.lat), round_coordinate(from.lng)),
            to: (round_coordinate(to.lat), round_coordinate(to.lng)),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CachedRoute {
    key: RouteKey,
    estimate: TravelEstimate,
}

/// Append-only memoization of travel estimates, shared between concurrent strategy runs.
///
/// Values for a key are computed identically, so a racing insert simply overwrites.
#[derive(Default)]
pub struct RouteCache {
    entries: RwLock<FxHashMap<RouteKey, TravelEstimate>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn get(&self, key: &RouteKey) -> Option<TravelEstimate> {
        self.entries.read().get(key).copied()
    }

    pub fn insert(&self, key: RouteKey, estimate: TravelEstimate) {
        self.entries.write().insert(key, estimate);
    }

    /// The lock is not held while `compute` runs, it may perform I/O.
    pub fn get_or_compute<F>(&self, key: RouteKey, compute: F) -> TravelEstimate
    where
        F: FnOnce() -> TravelEstimate,
    {
        if let Some(estimate) = self.get(&key) {
            return estimate;
        }

        let estimate = compute();
        self.insert(key, estimate);
        estimate
    }

    pub fn save_to_folder(
        &self,
        folder: &Path,
        kind: &GeoEstimatorKind,
    ) -> Result<PathBuf, anyhow::Error> {
        if !folder.is_dir() {
            return Err(anyhow::anyhow!(format!(
                "Path {} is not a directory",
                folder.display()
            )));
        }

        let routes = self
            .entries
            .read()
            .iter()
            .map(|(key, estimate)| CachedRoute {
                key: *key,
                estimate: *estimate,
            })
            .collect::<Vec<_>>();

        let file_path = folder.join(get_filename(kind));
        let file = std::fs::File::create(&file_path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        serde_json::to_writer(&mut writer, &routes)?;
        writer.flush()?;

        Ok(file_path)
    }

    pub fn load_from_folder(
        folder: &Path,
        kind: &GeoEstimatorKind,
    ) -> Result<Option<RouteCache>, anyhow::Error> {
        if !folder.is_dir() {
            return Err(anyhow::anyhow!(format!(
                "Path {} is not a directory",
                folder.display()
            )));
        }

        let file_path = folder.join(get_filename(kind));
        if !file_path.is_file() {
            return Ok(None);
        }

        let file = std::fs::File::open(file_path)?;
        let routes: Vec<CachedRoute> = serde_json::from_reader(BufReader::new(file))?;

        let entries = routes
            .into_iter()
            .map(|route| (route.key, route.estimate))
            .collect::<FxHashMap<_, _>>();

        Ok(Some(RouteCache {
            entries: RwLock::new(entries),
        }))
    }
}

pub fn cache_folder_from_env() -> Option<PathBuf> {
    std::env::var(CACHE_FOLDER_ENV_VAR).ok().map(PathBuf::from)
}

fn get_filename(kind: &GeoEstimatorKind) -> String {
    let mut hasher = FxHasher64::default();
    kind.hash(&mut hasher);
    format!("{:016x}.json", hasher.finish())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_key_rounds_coordinates() {
        let a = GeoPoint::new(48.856_600_1, 2.352_200_4);
        let b = GeoPoint::new(48.856_6, 2.352_2);
        let to = GeoPoint::new(48.87, 2.29);

        assert_eq!(RouteKey::new(&a, &to), RouteKey::new(&b, &to));
        assert_ne!(RouteKey::new(&a, &to), RouteKey::new(&to, &a));
    }

    #[test]
    fn test_get_or_compute_computes_once() {
        let cache = RouteCache::new();
        let key = RouteKey::new(&GeoPoint::new(1.0, 1.0), &GeoPoint::new(2.0, 2.0));
        let calls = Cell::new(0);

        for _ in 0..3 {
            let estimate = cache.get_or_compute(key, || {
                calls.set(calls.get() + 1);
                TravelEstimate::new(3.0, 7)
            });
            assert_eq!(estimate, TravelEstimate::new(3.0, 7));
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let folder = tempfile::tempdir().unwrap();
        let kind = GeoEstimatorKind::Osrm {
            url: String::from("http://localhost:5000"),
            fallback_speed_kmh: 40.0,
        };

        let cache = RouteCache::new();
        let key = RouteKey::new(&GeoPoint::new(1.0, 1.0), &GeoPoint::new(2.0, 2.0));
        cache.insert(key, TravelEstimate::new(12.5, 19));
        cache.save_to_folder(folder.path(), &kind).unwrap();

        let loaded = RouteCache::load_from_folder(folder.path(), &kind)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.get(&key), Some(TravelEstimate::new(12.5, 19)));

        let other_kind = GeoEstimatorKind::AsTheCrowFlies { speed_kmh: 40.0 };
        assert!(
            RouteCache::load_from_folder(folder.path(), &other_kind)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let kind = GeoEstimatorKind::default();
        assert!(RouteCache::load_from_folder(Path::new("/definitely/not/here"), &kind).is_err());
    }
}
