//! Command-line interface: `scrollkeep ingest|reingest|inspect`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use scrollkeep_detect::Marker;
use scrollkeep_pipeline::{process, PipelineConfig, RunConfig};
use scrollkeep_store::{JsonFileSectionStore, NewSession, SectionStore, SectionType};
use scrollkeep_vt::Snapshot;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrollkeep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory the JSON file store keeps session documents under.
    /// Defaults to the XDG data directory.
    #[arg(long, global = true)]
    pub storage_root: Option<PathBuf>,

    /// Path to a scrollkeep.toml config file. Missing file falls back
    /// to defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a new asciicast recording: register it with the store and
    /// run the pipeline to completion.
    Ingest {
        /// Path to the .cast (NDJSON) recording.
        path: PathBuf,

        /// Path to a JSON file holding an array of `{event_index, label}`
        /// markers to apply in addition to any `m`-kind events already
        /// present in the recording.
        #[arg(long)]
        markers: Option<PathBuf>,
    },
    /// Re-run detection against the stored `.cast` file for a session
    /// that was already ingested.
    Reingest {
        /// The session id to reprocess.
        session_id: uuid::Uuid,
    },
    /// Dump a session's sections, optionally one section's snapshot as
    /// wire-format JSON.
    Inspect {
        /// The session id to inspect.
        session_id: uuid::Uuid,

        /// Print this section's snapshot as JSON instead of the summary
        /// listing.
        #[arg(long = "section")]
        section_index: Option<usize>,
    },
}

#[derive(serde::Deserialize)]
struct MarkerFileEntry {
    event_index: usize,
    label: String,
}

fn load_markers_file(path: &PathBuf) -> Result<Vec<Marker>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading markers file {}", path.display()))?;
    let entries: Vec<MarkerFileEntry> = serde_json::from_str(&text)
        .with_context(|| format!("parsing markers file {}", path.display()))?;
    Ok(entries.into_iter().map(|e| Marker { event_index: e.event_index, label: e.label }).collect())
}

fn default_storage_root() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("scrollkeep").join("sessions")
}

fn open_store(storage_root: Option<PathBuf>) -> Result<JsonFileSectionStore> {
    let root = storage_root.unwrap_or_else(default_storage_root);
    std::fs::create_dir_all(&root)
        .with_context(|| format!("creating storage root {}", root.display()))?;
    Ok(JsonFileSectionStore::new(root))
}

fn load_config(path: Option<PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_toml_file(&path),
        None => Ok(PipelineConfig::default()),
    }
}

fn stored_markers(store: &JsonFileSectionStore, session_id: uuid::Uuid) -> Result<Vec<Marker>> {
    Ok(store
        .list_sections(session_id)?
        .into_iter()
        .filter(|s| s.section_type == SectionType::Marker)
        .map(|s| Marker { event_index: s.start_event, label: s.label })
        .collect())
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config)?;
    let store = open_store(cli.storage_root)?;
    let run_config = RunConfig::from(config);

    match cli.command {
        Commands::Ingest { path, markers } => {
            if !path.exists() {
                bail!("recording not found: {}", path.display());
            }
            let extra_markers = match markers {
                Some(markers_path) => load_markers_file(&markers_path)?,
                None => Vec::new(),
            };
            let size_bytes = std::fs::metadata(&path)?.len();
            let session_id = store.create_session(NewSession {
                filename: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                filepath: path.to_string_lossy().into_owned(),
                size_bytes,
                marker_count: extra_markers.len(),
                uploaded_at: chrono::Utc::now(),
            })?;

            process(&path, session_id, &extra_markers, &store, run_config)?;

            let sections = store.list_sections(session_id)?;
            println!("session {session_id}: {} sections detected", sections.len());
            Ok(())
        }
        Commands::Reingest { session_id } => {
            let session = store
                .get_session(session_id)?
                .ok_or_else(|| anyhow::anyhow!("unknown session {session_id}"))?;
            let markers = stored_markers(&store, session_id)?;

            process(PathBuf::from(&session.filepath).as_path(), session_id, &markers, &store, run_config)?;

            let sections = store.list_sections(session_id)?;
            println!("session {session_id}: {} sections after re-detection", sections.len());
            Ok(())
        }
        Commands::Inspect { session_id, section_index } => {
            let session = store
                .get_session(session_id)?
                .ok_or_else(|| anyhow::anyhow!("unknown session {session_id}"))?;
            let sections = store.list_sections(session_id)?;

            if let Some(index) = section_index {
                let section = sections
                    .get(index)
                    .ok_or_else(|| anyhow::anyhow!("session {session_id} has no section {index}"))?;
                let snapshot: &Option<Snapshot> = &section.snapshot;
                println!("{}", serde_json::to_string_pretty(snapshot)?);
                return Ok(());
            }

            println!("{} ({:?})", session.filename, session.detection_status);
            println!(
                "events={} sections={}",
                session.event_count.unwrap_or(0),
                session.detected_sections_count
            );
            for (i, section) in sections.iter().enumerate() {
                println!(
                    "  [{i}] [{:?}] {} .. {:?} — {}",
                    section.section_type, section.start_event, section.end_event, section.label
                );
            }
            Ok(())
        }
    }
}
