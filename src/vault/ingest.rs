use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::vault::model::{Arc, ArcStatus, Episode, EpisodeFile, FileVariants, FileVersion};
use crate::vault::warn;

/// Row shapes as the fetch layer hands them over. Everything is optional
/// or defaulted; malformed rows are dropped with a warning, never fatally.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArcRow {
    arc: Option<f64>,
    title: String,
    description: Option<String>,
    poster: Option<String>,
    audio_languages: String,
    subtitle_languages: String,
    resolution: String,
    status: Option<String>,
    episodes: Vec<RawEpisodeRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEpisodeRow {
    episode: Option<u32>,
    title: String,
    description: String,
    chapters: String,
    #[serde(rename = "episodes")]
    anime_episodes: String,
    released: String,
    files: RawFileSlots,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFileSlots {
    normal: Option<RawFileRow>,
    extended: Option<RawFileRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFileRow {
    crc32: String,
    length: String,
    url: String,
}

/// Load the parsed arc list the fetch layer wrote as a JSON array.
/// Arc numbers still carry their raw fractional values here; callers
/// normalize afterwards.
pub fn load_arcs(path: &Path) -> Result<Vec<Arc>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read input {}", path.display()))?;
    parse_rows(&raw).with_context(|| format!("failed to parse input {}", path.display()))
}

pub fn parse_rows(raw: &str) -> Result<Vec<Arc>> {
    let rows: Vec<Value> = serde_json::from_str(raw).context("input is not a JSON array")?;

    let mut arcs = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let parsed: RawArcRow = match serde_json::from_value(row) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn::emit(
                    "ARC_ROW_MALFORMED",
                    "ingest",
                    &format!("row {index}"),
                    "row dropped",
                    &err.to_string(),
                );
                continue;
            }
        };
        match build_arc(parsed) {
            Some(arc) => arcs.push(arc),
            None => warn::emit(
                "ARC_ROW_INCOMPLETE",
                "ingest",
                &format!("row {index}"),
                "missing arc number or title",
                "",
            ),
        }
    }

    Ok(arcs)
}

fn build_arc(row: RawArcRow) -> Option<Arc> {
    let raw_number = row.arc.filter(|v| v.is_finite() && *v >= 0.0)?;
    let title = row.title.trim();
    if title.is_empty() {
        return None;
    }

    // Decimal arc numbers are held as tenths from here on, so 6.5
    // survives without float comparisons downstream.
    let raw_tenths = (raw_number * 10.0).round() as u32;

    let (clean_title, status) = split_status(title, row.status.as_deref());

    let mut episodes: Vec<Episode> = row.episodes.into_iter().filter_map(build_episode).collect();
    episodes.sort_by_key(|ep| ep.episode);

    Some(Arc {
        arc: raw_tenths,
        title: clean_title,
        description: row.description.filter(|d| !d.trim().is_empty()),
        poster: row.poster.filter(|p| !p.trim().is_empty()),
        audio_languages: row.audio_languages.trim().to_string(),
        subtitle_languages: row.subtitle_languages.trim().to_string(),
        resolution: row.resolution.trim().to_string(),
        status,
        episodes,
    })
}

/// Lift `(WIP)` / `(TBR)` markers out of a title. An explicit status
/// field wins over markers when both are present.
fn split_status(title: &str, explicit: Option<&str>) -> (String, ArcStatus) {
    if let Some(tag) = explicit {
        let status = match tag.trim().to_ascii_uppercase().as_str() {
            "WIP" => ArcStatus::Wip,
            "TBR" => ArcStatus::Tbr,
            _ => ArcStatus::Released,
        };
        return (strip_markers(title), status);
    }

    let upper = title.to_ascii_uppercase();
    let status = if upper.contains("(WIP)") {
        ArcStatus::Wip
    } else if upper.contains("(TBR)") {
        ArcStatus::Tbr
    } else {
        ArcStatus::Released
    };
    (strip_markers(title), status)
}

fn strip_markers(title: &str) -> String {
    let mut out = title.to_string();
    for marker in ["(WIP)", "(wip)", "(TBR)", "(tbr)"] {
        out = out.replace(marker, "");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn build_episode(row: RawEpisodeRow) -> Option<Episode> {
    let number = row.episode.or_else(|| trailing_number(&row.title))?;

    Some(Episode {
        // Owner id is stamped during normalization.
        arc: 0,
        episode: number,
        title: row.title.trim().to_string(),
        description: row.description.trim().to_string(),
        chapters: row.chapters.trim().to_string(),
        anime_episodes: row.anime_episodes.trim().to_string(),
        released: normalize_date(&row.released),
        files: FileVariants {
            normal: build_file(row.files.normal, FileVersion::Normal),
            extended: build_file(row.files.extended, FileVersion::Extended),
        },
    })
}

fn build_file(slot: Option<RawFileRow>, version: FileVersion) -> Option<EpisodeFile> {
    let raw = slot?;
    let crc32 = raw.crc32.trim().to_string();
    if crc32.is_empty() {
        return None;
    }
    Some(EpisodeFile {
        version,
        crc32,
        length: raw.length.trim().to_string(),
        url: raw.url.trim().to_string(),
    })
}

/// Extract a trailing episode number from titles like "Romance Dawn 03".
fn trailing_number(title: &str) -> Option<u32> {
    let last = title.split_whitespace().last()?;
    let digits = last.trim_start_matches('0');
    if digits.is_empty() && last.chars().all(|c| c == '0') && !last.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

/// Upstream sheets use `2025.05.03`; the wire format uses dashes.
fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('.') {
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() == 3 {
            return format!("{}-{}-{}", parts[0], parts[1], parts[2]);
        }
    }
    trimmed.to_string()
}
