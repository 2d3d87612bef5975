use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tumbling_core::{
    Catalog, ElementCatalog, Language, Pass, Routine, RoutineReport, RuleBook, Slot,
};

use crate::config::{JudgeConfig, SlotEntry};

/// Outcome of one judging run.
#[derive(Debug, Clone)]
pub struct JudgeSummary {
    pub routine: Routine,
    pub report: RoutineReport,
    pub json_path: Option<PathBuf>,
}

impl JudgeSummary {
    pub fn is_legal(&self) -> bool {
        self.report.is_legal
    }
}

pub struct JudgeRunner {
    config: JudgeConfig,
    catalog: Catalog,
    rules: RuleBook,
}

impl JudgeRunner {
    pub fn new(config: JudgeConfig) -> Result<Self> {
        let catalog = match config.catalog.as_deref() {
            Some(path) => load_catalog(path)?,
            None => Catalog::standard(),
        };
        tracing::debug!(
            target: "tumbling_cli::judge",
            elements = catalog.len(),
            custom = config.catalog.is_some(),
            "catalog ready"
        );
        Ok(Self {
            config,
            catalog,
            rules: RuleBook::standard(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn language(&self) -> Language {
        self.config.language()
    }

    /// Build the typed routine, filling missing values from the catalog.
    pub fn routine(&self) -> Result<Routine> {
        let meta = self.config.routine.meta();
        let capacity = meta.track.pass_capacity();
        let mut passes = Vec::with_capacity(2);
        for (index, entries) in self.config.routine.passes.iter().enumerate() {
            let slots = entries
                .iter()
                .map(|entry| entry.as_ref().and_then(|entry| self.resolve_slot(entry)))
                .collect();
            let pass = Pass::with_slots(capacity, slots)
                .with_context(|| format!("building pass {}", index + 1))?;
            passes.push(pass);
        }
        let second = passes.pop().context("routine is missing its second pass")?;
        let first = passes.pop().context("routine is missing its first pass")?;
        Ok(Routine::new(meta, first, second))
    }

    pub fn run(&self) -> Result<JudgeSummary> {
        let routine = self.routine()?;
        let report = RoutineReport::evaluate(&routine, &self.catalog, &self.rules, self.language());

        let json_path = match self.config.output.json.as_deref() {
            Some(path) => {
                write_report(path, &report)?;
                Some(path.to_path_buf())
            }
            None => None,
        };

        tracing::info!(
            target: "tumbling_cli::judge",
            track = %routine.meta.track,
            legal = report.is_legal,
            bonus = %report.total_bonus(),
            difficulty = report.total_difficulty(),
            "routine judged"
        );

        Ok(JudgeSummary {
            routine,
            report,
            json_path,
        })
    }

    fn resolve_slot(&self, entry: &SlotEntry) -> Option<Slot> {
        let id = entry.id();
        if id.is_empty() {
            return None;
        }
        let known = self.catalog.element(id).is_some();
        if !known {
            tracing::warn!(
                target: "tumbling_cli::judge",
                element = id,
                "element not in catalog; direction rules will skip it"
            );
        }
        let value = match entry.value() {
            Some(value) => value.to_f64(),
            None => self.catalog.difficulty(id).unwrap_or(0.0),
        };
        Some(Slot::new(id, value))
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading catalog at {}", path.display()))?;
    Catalog::from_json(&json).with_context(|| format!("loading catalog at {}", path.display()))
}

fn write_report(path: &Path, report: &RoutineReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory at {}", parent.display()))?;
    }
    let json = report.to_json().context("serializing report")?;
    fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))
}
