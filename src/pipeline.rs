//! Pipeline orchestrator
//!
//! Locate once, then for each document: parse, and for each requested
//! target render and write. A failing document is recorded in the report
//! and the batch moves on; only a missing source root aborts the run.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{DiscoveryConfig, InstallerConfig};
use crate::error::{Error, FailureKind, Result};
use crate::render::Renderer;
use crate::skills::{discover_skills, parse_document, slugify, ParsedSkill, SourceDocument};
use crate::targets::{TargetId, TargetRegistry};
use crate::writer::OutputWriter;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Locating,
    Parsing(usize),
    Rendering(usize),
    Writing(usize),
    Done,
}

/// One (document, target) pair that did not produce output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Source path relative to the skills root
    pub document: String,
    pub target: TargetId,
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    fn new(document: &SourceDocument, target: TargetId, err: &Error) -> Self {
        Failure {
            document: document.relative_display(),
            target,
            kind: err.failure_kind().unwrap_or(FailureKind::Transform),
            message: err.to_string(),
        }
    }
}

/// Outcome of one target within a run
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub target: TargetId,
    pub discovered: usize,
    /// Written files (planned files on a dry run)
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl TargetReport {
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Documents found by the locator
    pub discovered: usize,
    pub targets: Vec<TargetReport>,
    /// Stopped early by the cancellation flag
    pub cancelled: bool,
    pub dry_run: bool,
}

impl RunReport {
    fn new(discovered: usize, targets: &[TargetId], dry_run: bool) -> Self {
        RunReport {
            discovered,
            targets: targets
                .iter()
                .map(|&target| TargetReport {
                    target,
                    discovered,
                    written: Vec::new(),
                    failures: Vec::new(),
                })
                .collect(),
            cancelled: false,
            dry_run,
        }
    }

    pub fn target(&self, id: TargetId) -> Option<&TargetReport> {
        self.targets.iter().find(|t| t.target == id)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.targets.iter().flat_map(|t| t.failures.iter())
    }

    pub fn total_written(&self) -> usize {
        self.targets.iter().map(TargetReport::succeeded).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// What happened to one (document, target) pair
#[derive(Debug, Clone, Copy)]
pub enum ArtifactOutcome<'a> {
    Written(&'a Path),
    /// Dry run: the file that would have been written
    Planned(&'a Path),
    Failed(&'a Failure),
}

/// Progress notification for one (document, target) pair
#[derive(Debug, Clone, Copy)]
pub struct ArtifactEvent<'a> {
    pub target: TargetId,
    pub document: &'a SourceDocument,
    /// Zero-based position of the document
    pub index: usize,
    pub total: usize,
    pub outcome: ArtifactOutcome<'a>,
}

/// Receives progress while a run is in flight
pub trait ProgressObserver {
    fn on_stage(&self, _stage: PipelineStage) {}

    fn on_artifact(&self, _event: ArtifactEvent<'_>) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Skill discovery and transformation pipeline
pub struct Pipeline {
    source_dir: PathBuf,
    discovery: DiscoveryConfig,
    targets: TargetRegistry,
    renderer: Renderer,
    writer: OutputWriter,
    dry_run: bool,
    cancel: Arc<AtomicBool>,
}

impl Pipeline {
    /// Build a pipeline from configuration, applying template overrides
    pub fn new(config: &InstallerConfig) -> Result<Self> {
        let targets = TargetRegistry::from_config(config)?;
        Self::with_registry(config, targets)
    }

    /// Build a pipeline with an explicit profile registry
    pub fn with_registry(config: &InstallerConfig, targets: TargetRegistry) -> Result<Self> {
        let renderer = Renderer::new(&targets, &config.project)?;

        Ok(Pipeline {
            source_dir: config.source_dir(),
            discovery: config.discovery.clone(),
            targets,
            renderer,
            writer: OutputWriter::new(config.project_root()),
            dry_run: false,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Render without writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Share a cancellation flag; once set, no new document is started
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Run the locator only
    pub fn discover(&self) -> Result<Vec<SourceDocument>> {
        discover_skills(&self.source_dir, &self.discovery)
    }

    /// Run the pipeline for the given targets
    pub fn run(&self, targets: &[TargetId], generated_at: NaiveDateTime) -> Result<RunReport> {
        self.run_with_observer(targets, generated_at, &NoopObserver)
    }

    /// Run the pipeline, reporting progress to `observer`
    pub fn run_with_observer(
        &self,
        targets: &[TargetId],
        generated_at: NaiveDateTime,
        observer: &dyn ProgressObserver,
    ) -> Result<RunReport> {
        observer.on_stage(PipelineStage::Idle);
        let mut selected: Vec<TargetId> = Vec::with_capacity(targets.len());
        for &target in targets {
            if !selected.contains(&target) {
                selected.push(target);
            }
        }

        observer.on_stage(PipelineStage::Locating);
        let documents = self.discover()?;
        let total = documents.len();
        info!("Discovered {} skills in {}", total, self.source_dir.display());

        let mut report = RunReport::new(total, &selected, self.dry_run);
        let mut claimed_slugs: HashMap<String, String> = HashMap::new();

        for (index, document) in documents.iter().enumerate() {
            if self.cancel.load(Ordering::SeqCst) {
                warn!("Run cancelled before {}", document.relative_display());
                report.cancelled = true;
                break;
            }

            observer.on_stage(PipelineStage::Parsing(index));
            let parsed = self.parse_unique(document, &mut claimed_slugs);

            for (slot, &target) in selected.iter().enumerate() {
                let outcome = match &parsed {
                    Ok(skill) => self
                        .produce(skill, target, generated_at, index, observer)
                        .map_err(|e| Failure::new(document, target, &e)),
                    Err(e) => Err(Failure::new(document, target, e)),
                };

                let target_report = &mut report.targets[slot];
                match outcome {
                    Ok(path) => {
                        target_report.written.push(path);
                        let path = target_report.written.last().map(PathBuf::as_path);
                        if let Some(path) = path {
                            let outcome = if self.dry_run {
                                ArtifactOutcome::Planned(path)
                            } else {
                                ArtifactOutcome::Written(path)
                            };
                            observer.on_artifact(ArtifactEvent {
                                target,
                                document,
                                index,
                                total,
                                outcome,
                            });
                        }
                    }
                    Err(failure) => {
                        warn!("{} failed for {}: {}", failure.document, target, failure.message);
                        target_report.failures.push(failure);
                        if let Some(failure) = target_report.failures.last() {
                            observer.on_artifact(ArtifactEvent {
                                target,
                                document,
                                index,
                                total,
                                outcome: ArtifactOutcome::Failed(failure),
                            });
                        }
                    }
                }
            }
        }

        observer.on_stage(PipelineStage::Done);
        info!(
            "Run finished: {} discovered, {} written, {} failed",
            report.discovered,
            report.total_written(),
            report.failures().count()
        );
        Ok(report)
    }

    /// Parse a document unless its slug was already claimed earlier in the run
    fn parse_unique(
        &self,
        document: &SourceDocument,
        claimed: &mut HashMap<String, String>,
    ) -> Result<ParsedSkill> {
        let slug = slugify(&document.stem);
        if let Some(first) = claimed.get(&slug) {
            return Err(Error::Conflict(format!(
                "{} resolves to slug '{}' already used by {}",
                document.relative_display(),
                slug,
                first
            )));
        }
        claimed.insert(slug, document.relative_display());

        debug!("Parsing {}", document.path.display());
        parse_document(document)
    }

    /// Render one skill for one target and write it (or just resolve the
    /// path on a dry run)
    fn produce(
        &self,
        skill: &ParsedSkill,
        target: TargetId,
        generated_at: NaiveDateTime,
        index: usize,
        observer: &dyn ProgressObserver,
    ) -> Result<PathBuf> {
        observer.on_stage(PipelineStage::Rendering(index));
        let artifact = self
            .renderer
            .render(skill, self.targets.get(target), generated_at)?;

        if self.dry_run {
            return self.writer.resolve(&artifact.path);
        }

        observer.on_stage(PipelineStage::Writing(index));
        self.writer.write(&artifact)
    }
}
