use serde::{Deserialize, Serialize};

/// Release state of an arc. An empty tag on the wire means released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcStatus {
    #[serde(rename = "WIP")]
    Wip,
    #[serde(rename = "TBR")]
    Tbr,
    #[default]
    #[serde(rename = "")]
    Released,
}

/// One story arc as exported on every run. Never loaded back from disk;
/// the arc list is rebuilt from the fetch layer each time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub arc: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub audio_languages: String,
    pub subtitle_languages: String,
    pub resolution: String,
    #[serde(default)]
    pub status: ArcStatus,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub arc: u32,
    pub episode: u32,
    pub title: String,
    pub description: String,
    pub chapters: String,
    /// Anime episode cross-reference. Serialized as `episodes` to match
    /// the historical wire format.
    #[serde(rename = "episodes")]
    pub anime_episodes: String,
    pub released: String,
    #[serde(default)]
    pub files: FileVariants,
}

/// At most one file per variant slot. A slot is either absent or a
/// concrete file; there is no shared ownership between slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileVariants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<EpisodeFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended: Option<EpisodeFile>,
}

impl FileVariants {
    /// Present variants in reconciliation order: normal, then extended.
    pub fn iter(&self) -> impl Iterator<Item = &EpisodeFile> {
        self.normal.iter().chain(self.extended.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileVersion {
    Normal,
    Extended,
}

/// One concrete releasable asset. The checksum is the sole identity used
/// for archival deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeFile {
    pub version: FileVersion,
    pub crc32: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub length: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Self-contained historical record for a single checksum: the episode's
/// descriptive fields as they read when the checksum was first observed,
/// plus the one file variant that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeArchiveEntry {
    pub arc: u32,
    pub episode: u32,
    pub title: String,
    pub description: String,
    pub chapters: String,
    #[serde(rename = "episodes")]
    pub anime_episodes: String,
    pub released: String,
    pub file: EpisodeFile,
}

impl EpisodeArchiveEntry {
    pub fn from_episode(episode: &Episode, file: EpisodeFile) -> Self {
        Self {
            arc: episode.arc,
            episode: episode.episode,
            title: episode.title.clone(),
            description: episode.description.clone(),
            chapters: episode.chapters.clone(),
            anime_episodes: episode.anime_episodes.clone(),
            released: episode.released.clone(),
            file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_status_uses_historical_wire_tags() {
        assert_eq!(serde_json::to_string(&ArcStatus::Wip).unwrap(), "\"WIP\"");
        assert_eq!(serde_json::to_string(&ArcStatus::Tbr).unwrap(), "\"TBR\"");
        assert_eq!(
            serde_json::to_string(&ArcStatus::Released).unwrap(),
            "\"\""
        );
    }

    #[test]
    fn absent_variant_slots_are_omitted() {
        let variants = FileVariants {
            normal: Some(EpisodeFile {
                version: FileVersion::Normal,
                crc32: "ABCD1234".to_string(),
                length: String::new(),
                url: String::new(),
            }),
            extended: None,
        };
        let json = serde_json::to_string(&variants).unwrap();
        assert!(json.contains("\"normal\""));
        assert!(!json.contains("extended"));
        assert!(!json.contains("length"));
    }

    #[test]
    fn variant_iteration_visits_normal_before_extended() {
        let variants = FileVariants {
            normal: Some(EpisodeFile {
                version: FileVersion::Normal,
                crc32: "AAAA0000".to_string(),
                length: String::new(),
                url: String::new(),
            }),
            extended: Some(EpisodeFile {
                version: FileVersion::Extended,
                crc32: "BBBB1111".to_string(),
                length: String::new(),
                url: String::new(),
            }),
        };
        let order: Vec<&str> = variants.iter().map(|f| f.crc32.as_str()).collect();
        assert_eq!(order, vec!["AAAA0000", "BBBB1111"]);
    }
}
