// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Drives generation for a whole batch of institutions.
use crate::docx::render_docx;
use crate::error::FactoryError;
use crate::file_io::write_output;
use crate::layout::resolve;
use crate::profile::{InstitutionProfile, record_id};
use crate::readme::render_readme;
use crate::site::{IndexEntry, render_index_page, render_landing_page};
use crate::skeleton::assemble;
use crate::slug::{document_file_name, output_dir_name};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "Output";
pub const README_FILE: &str = "README.md";
pub const PAGE_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    /// Year that `verified_year` is compared against for the staleness banner.
    pub reference_year: i32,
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>, reference_year: i32) -> Self {
        Self {
            output_dir: output_dir.into(),
            reference_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub id: String,
    pub dir: PathBuf,
    pub document: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub id: String,
    pub message: String,
}

/// Outcome of a batch. Per-profile failures end up here rather than aborting the run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub generated: Vec<Generated>,
    pub failed: Vec<Failure>,
    pub index_page: PathBuf,
    pub indexed: usize,
    /// Directories written by more than one profile in this run. The last
    /// profile to be written wins.
    pub overwritten: Vec<PathBuf>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generates every institution's files, then the global index.
///
/// A record that fails is logged with its identifier and skipped. The index is
/// built from all loaded records, including the ones that failed, and only
/// after every record has been attempted.
pub async fn run(records: &[Value], config: &GeneratorConfig) -> Result<RunReport, FactoryError> {
    let mut report = RunReport::default();
    let mut seen_dirs = HashSet::new();

    for record in records {
        match process_record(record, config).await {
            Ok(generated) => {
                log::info!(
                    "Generated {} -> {}",
                    generated.id,
                    generated.document.display()
                );
                if !seen_dirs.insert(generated.dir.clone()) {
                    log::warn!(
                        "{} was already written earlier in this run; {} overwrote it",
                        generated.dir.display(),
                        generated.id
                    );
                    report.overwritten.push(generated.dir.clone());
                }
                report.generated.push(generated);
            }
            Err(e) => {
                let id = record_id(record).to_owned();
                log::warn!("Failed to process {id}: {e}");
                report.failed.push(Failure {
                    id,
                    message: e.to_string(),
                });
            }
        }
    }

    let entries: Vec<IndexEntry> = records.iter().map(IndexEntry::from_record).collect();
    report.index_page = config.output_dir.join(PAGE_FILE);
    write_output(&report.index_page, render_index_page(&entries)).await?;
    report.indexed = entries.len();
    log::info!(
        "Website index with {} entries written to {}",
        report.indexed,
        report.index_page.display()
    );

    Ok(report)
}

async fn process_record(
    record: &Value,
    config: &GeneratorConfig,
) -> Result<Generated, FactoryError> {
    let profile = InstitutionProfile::from_record(record)?;
    generate(&profile, config).await
}

/// Writes the document, README and landing page for one institution.
pub async fn generate(
    profile: &InstitutionProfile,
    config: &GeneratorConfig,
) -> Result<Generated, FactoryError> {
    let layout = resolve(profile);
    let skeleton = assemble(profile);
    let document_file = document_file_name(profile);

    let docx = render_docx(&layout, &skeleton)?;
    let readme = render_readme(profile, &layout, &document_file);
    let page = render_landing_page(profile, &layout, &document_file, config.reference_year);

    let dir = config.output_dir.join(output_dir_name(profile.id()));
    let document = dir.join(&document_file);
    write_output(&document, docx).await?;
    write_output(&dir.join(README_FILE), readme).await?;
    write_output(&dir.join(PAGE_FILE), page).await?;

    Ok(Generated {
        id: profile.id().to_owned(),
        dir,
        document,
    })
}
