use crate::vault::model::{Arc, EpisodeArchiveEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Append-only ledger of every file variant ever observed, keyed by
/// checksum. `insert_if_absent` is the only mutating operation the type
/// exposes; existing entries can never be replaced or removed through
/// this interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodesArchive {
    entries: BTreeMap<String, EpisodeArchiveEntry>,
}

impl EpisodesArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, crc32: &str) -> Option<&EpisodeArchiveEntry> {
        self.entries.get(crc32)
    }

    /// Insert under `crc32` unless the key is empty or already present.
    /// Returns true only when a new entry landed.
    pub fn insert_if_absent(&mut self, crc32: &str, entry: EpisodeArchiveEntry) -> bool {
        if crc32.is_empty() || self.entries.contains_key(crc32) {
            return false;
        }
        self.entries.insert(crc32.to_string(), entry);
        true
    }
}

#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub archive: EpisodesArchive,
    pub added: usize,
    pub changed: bool,
}

/// Merge the current run's arcs into the persisted archive. Existing
/// entries are authoritative and are left untouched even when the fresh
/// fetch reports different metadata for the same checksum; the live arc
/// export carries the fresh values independently.
pub fn reconcile(arcs: &[Arc], mut archive: EpisodesArchive) -> ReconcileOutcome {
    let mut added = 0usize;

    for arc in arcs {
        for episode in &arc.episodes {
            for file in episode.files.iter() {
                if file.crc32.is_empty() {
                    continue;
                }
                let entry = EpisodeArchiveEntry::from_episode(episode, file.clone());
                if archive.insert_if_absent(&file.crc32, entry) {
                    added += 1;
                }
            }
        }
    }

    ReconcileOutcome {
        changed: added > 0,
        added,
        archive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::model::{ArcStatus, Episode, EpisodeFile, FileVariants, FileVersion};

    fn file(version: FileVersion, crc32: &str) -> EpisodeFile {
        EpisodeFile {
            version,
            crc32: crc32.to_string(),
            length: "22:30".to_string(),
            url: "https://example.net/view/1".to_string(),
        }
    }

    fn episode(arc: u32, number: u32, title: &str, files: FileVariants) -> Episode {
        Episode {
            arc,
            episode: number,
            title: title.to_string(),
            description: format!("{title} description"),
            chapters: "1-7".to_string(),
            anime_episodes: "1-3".to_string(),
            released: "2024-01-15".to_string(),
            files,
        }
    }

    fn arc_with(episodes: Vec<Episode>) -> Arc {
        Arc {
            arc: 1,
            title: "Romance Dawn".to_string(),
            description: None,
            poster: None,
            audio_languages: "ja".to_string(),
            subtitle_languages: "en".to_string(),
            resolution: "1080p".to_string(),
            status: ArcStatus::Released,
            episodes,
        }
    }

    #[test]
    fn new_checksums_are_added_and_flagged_as_changed() {
        let arcs = vec![arc_with(vec![episode(
            1,
            1,
            "Romance Dawn 01",
            FileVariants {
                normal: Some(file(FileVersion::Normal, "ABCD1234")),
                extended: Some(file(FileVersion::Extended, "EF567890")),
            },
        )])];

        let outcome = reconcile(&arcs, EpisodesArchive::new());
        assert!(outcome.changed);
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.archive.len(), 2);
        assert_eq!(
            outcome.archive.get("ABCD1234").unwrap().file.version,
            FileVersion::Normal
        );
        assert_eq!(
            outcome.archive.get("EF567890").unwrap().file.version,
            FileVersion::Extended
        );
    }

    #[test]
    fn existing_entries_survive_metadata_changes_upstream() {
        let first = vec![arc_with(vec![episode(
            1,
            1,
            "Original Title",
            FileVariants {
                normal: Some(file(FileVersion::Normal, "ABCD1234")),
                extended: None,
            },
        )])];
        let run1 = reconcile(&first, EpisodesArchive::new());
        assert_eq!(run1.archive.len(), 1);
        let archived = run1.archive.get("ABCD1234").unwrap().clone();

        let second = vec![arc_with(vec![episode(
            1,
            1,
            "Renamed Title",
            FileVariants {
                normal: Some(file(FileVersion::Normal, "ABCD1234")),
                extended: None,
            },
        )])];
        let run2 = reconcile(&second, run1.archive);
        assert!(!run2.changed);
        assert_eq!(run2.added, 0);
        assert_eq!(run2.archive.len(), 1);
        assert_eq!(run2.archive.get("ABCD1234").unwrap(), &archived);
        assert_eq!(
            run2.archive.get("ABCD1234").unwrap().title,
            "Original Title"
        );
    }

    #[test]
    fn empty_checksums_are_never_archived() {
        let arcs = vec![arc_with(vec![episode(
            1,
            1,
            "Unreleased",
            FileVariants {
                normal: Some(file(FileVersion::Normal, "")),
                extended: None,
            },
        )])];

        let outcome = reconcile(&arcs, EpisodesArchive::new());
        assert!(!outcome.changed);
        assert!(outcome.archive.is_empty());
    }

    #[test]
    fn insert_if_absent_rejects_empty_and_duplicate_keys() {
        let mut archive = EpisodesArchive::new();
        let entry = EpisodeArchiveEntry::from_episode(
            &episode(1, 1, "ep", FileVariants::default()),
            file(FileVersion::Normal, "AAAA0000"),
        );

        assert!(!archive.insert_if_absent("", entry.clone()));
        assert!(archive.insert_if_absent("AAAA0000", entry.clone()));
        assert!(!archive.insert_if_absent("AAAA0000", entry));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn reconciliation_walks_arcs_in_list_order() {
        let mut arc_a = arc_with(vec![episode(
            1,
            1,
            "first",
            FileVariants {
                normal: Some(file(FileVersion::Normal, "SAME0000")),
                extended: None,
            },
        )]);
        arc_a.arc = 1;
        let mut arc_b = arc_with(vec![episode(
            2,
            1,
            "second",
            FileVariants {
                normal: Some(file(FileVersion::Normal, "SAME0000")),
                extended: None,
            },
        )]);
        arc_b.arc = 2;

        let outcome = reconcile(&[arc_a, arc_b], EpisodesArchive::new());
        // First observation wins; the later duplicate is skipped.
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.archive.get("SAME0000").unwrap().title, "first");
    }
}
