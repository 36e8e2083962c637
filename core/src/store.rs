use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::*;

/// Best score per difficulty key.
pub type Scores = BTreeMap<String, Score>;

/// Persistence for best scores.
///
/// Stores never fail towards the player: unreadable data reads as no scores, and failed writes are only logged.
pub trait ScoreStore {
    fn get_all(&self) -> Scores;

    /// Insert or replace the score of `difficulty`, persisting the whole table.
    fn save(&mut self, difficulty: &str, score: Score);
}

/// Offers `score` to `store`, keeping it only when it beats the stored best for `difficulty`.
///
/// Returns whether the score was saved.
pub fn record_best(store: &mut impl ScoreStore, difficulty: Difficulty, score: Score) -> bool {
    let best = store.get_all().get(difficulty.key()).copied().unwrap_or(0);
    if score > best {
        log::info!("New best score for {}: {} (was {})", difficulty, score, best);
        store.save(difficulty.key(), score);
        true
    } else {
        false
    }
}

/// Scores kept in memory only, lost when dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryScoreStore {
    scores: Scores,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get_all(&self) -> Scores {
        self.scores.clone()
    }

    fn save(&mut self, difficulty: &str, score: Score) {
        self.scores.insert(difficulty.to_owned(), score);
    }
}

/// Scores kept as a JSON object in a single file, like `{"easy": 5333}`.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<Scores> {
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn write(&self, scores: &Scores) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(scores)?;

        // written aside, then renamed over the old table
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn get_all(&self) -> Scores {
        match self.read() {
            Ok(scores) => scores,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No scores stored at {} yet", self.path.display());
                Scores::new()
            }
            Err(err) => {
                log::warn!("Could not read scores from {}: {}", self.path.display(), err);
                Scores::new()
            }
        }
    }

    fn save(&mut self, difficulty: &str, score: Score) {
        let mut scores = self.get_all();
        scores.insert(difficulty.to_owned(), score);
        if let Err(err) = self.write(&scores) {
            log::error!("Could not save scores to {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let path =
                std::env::temp_dir().join(format!("minado-store-{}-{}", name, std::process::id()));
            let _ = fs::remove_dir_all(&path);
            Self(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn memory_store_upserts() {
        let mut store = MemoryScoreStore::new();
        assert!(store.get_all().is_empty());

        store.save("easy", 10);
        store.save("easy", 20);
        store.save("hard", 5);

        assert_eq!(
            store.get_all(),
            Scores::from([("easy".into(), 20), ("hard".into(), 5)])
        );
    }

    #[test]
    fn record_best_keeps_only_improvements() {
        let mut store = MemoryScoreStore::new();

        assert!(record_best(&mut store, Difficulty::Easy, 100));
        assert!(!record_best(&mut store, Difficulty::Easy, 90));
        assert!(!record_best(&mut store, Difficulty::Easy, 100));
        assert!(record_best(&mut store, Difficulty::Easy, 150));
        assert!(record_best(&mut store, Difficulty::Hard, 1));

        let scores = store.get_all();
        assert_eq!(scores.get("easy"), Some(&150));
        assert_eq!(scores.get("hard"), Some(&1));
        assert_eq!(scores.get("medium"), None);
    }

    #[test]
    fn record_best_ignores_zero_scores() {
        let mut store = MemoryScoreStore::new();
        assert!(!record_best(&mut store, Difficulty::Medium, 0));
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let dir = TempDir::new("missing");
        let store = JsonFileScoreStore::new(dir.0.join("scores.json"));
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn json_store_persists_across_instances() {
        let dir = TempDir::new("persist");
        let path = dir.0.join("nested").join("scores.json");

        let mut store = JsonFileScoreStore::new(&path);
        store.save("easy", 5333);
        store.save("hard", 12000);
        store.save("easy", 6000);

        let reopened = JsonFileScoreStore::new(&path);
        assert_eq!(
            reopened.get_all(),
            Scores::from([("easy".into(), 6000), ("hard".into(), 12000)])
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn json_store_writes_flat_object() {
        let dir = TempDir::new("format");
        let path = dir.0.join("scores.json");

        JsonFileScoreStore::new(&path).save("medium", 42);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "medium": 42 }));
    }

    #[test]
    fn json_store_corrupt_file_reads_as_empty() {
        let dir = TempDir::new("corrupt");
        fs::create_dir_all(&dir.0).unwrap();
        let path = dir.0.join("scores.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileScoreStore::new(&path);
        assert!(store.get_all().is_empty());

        // saving over a corrupt table starts a fresh one
        store.save("easy", 7);
        assert_eq!(store.get_all(), Scores::from([("easy".into(), 7)]));
    }

    #[test]
    fn json_store_unwritable_location_fails_soft() {
        let dir = TempDir::new("unwritable");
        fs::create_dir_all(&dir.0).unwrap();
        // a file where the parent directory should be
        let blocker = dir.0.join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = JsonFileScoreStore::new(blocker.join("scores.json"));
        store.save("easy", 7);
        assert!(store.get_all().is_empty());
    }
}
