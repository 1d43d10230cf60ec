use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, bail};
use carte_core::{DishCatalog, StatsReport};
use carte_types::MenuDocument;
use serde::Serialize;

pub const STATS_FILE: &str = "stats.json";
pub const DISHES_FILE: &str = "dishes.json";

/// Every `*.json` file under `dir`, sorted
fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

/// Relative path with `/` separators and an `.html` extension
fn document_id(input_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(input_dir).unwrap_or(path).with_extension("html");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Load parsed menu documents from `input_dir`, recursively, in path order.
/// Documents without an `id` get one derived from their path.
pub fn load_documents(input_dir: &Path) -> anyhow::Result<Vec<MenuDocument>> {
    let mut paths = Vec::new();
    collect_json_files(input_dir, &mut paths)?;
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut document: MenuDocument = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid menu document {}", path.display()))?;
        if document.id.is_empty() {
            document.id = document_id(input_dir, &path);
        }
        tracing::debug!("Loaded {} from {}", document.id, path.display());
        documents.push(document);
    }

    tracing::info!("Loaded {} documents from {}", documents.len(), input_dir.display());
    Ok(documents)
}

/// Output path for a document; ids may not escape the output directory
fn document_output_path(output_dir: &Path, id: &str) -> anyhow::Result<PathBuf> {
    let relative = PathBuf::from(format!("{id}.json"));
    if id.is_empty() || !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        bail!("Document id '{id}' is not a relative path");
    }
    Ok(output_dir.join(relative))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write annotated documents, the stats report and the dish catalog
pub fn write_artifacts(
    output_dir: &Path,
    pretty: bool,
    documents: &[MenuDocument],
    report: &StatsReport,
    catalog: &DishCatalog,
) -> anyhow::Result<()> {
    for document in documents {
        let path = document_output_path(output_dir, &document.id)?;
        write_json(&path, document, pretty)?;
    }
    write_json(&output_dir.join(STATS_FILE), report, pretty)?;
    write_json(&output_dir.join(DISHES_FILE), catalog, pretty)?;

    tracing::info!(
        "Wrote {} documents, {STATS_FILE} and {DISHES_FILE} to {}",
        documents.len(),
        output_dir.display()
    );
    Ok(())
}
