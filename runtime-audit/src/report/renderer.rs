//! Markdown rendering.

use super::{Report, ReportEntry, RepositoryReport};
use crate::version::{ModuleStatus, RuntimeStatus};
use std::fmt::{self, Display, Formatter};

/// Renders a report as Markdown.
///
/// Output depends only on the report, so identical inputs always render
/// identical text.
#[must_use]
pub fn render_markdown(report: &Report) -> String {
    Markdown(report).to_string()
}

struct Markdown<'a>(&'a Report);

impl Display for Markdown<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "# Runtime audit for `{}`", report.owner)?;
        writeln!(f)?;
        writeln!(
            f,
            "**Filter:** repositories whose name contains `{}`  ",
            report.name_filter
        )?;
        writeln!(
            f,
            "**Recommended {}:** `{}` or later  ",
            report.language, report.recommended
        )?;
        writeln!(f, "**Repositories found:** {}  ", report.repositories.len())?;
        writeln!(f, "**Files scanned:** {}  ", report.file_count())?;
        writeln!(f, "**Outdated declarations:** {}  ", report.outdated_count())?;
        writeln!(
            f,
            "**Generated:** {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;
        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;

        if report.repositories.is_empty() {
            writeln!(f, "No repositories matched.")?;
            return Ok(());
        }

        for repository in &report.repositories {
            write_repository(f, report, repository)?;
        }

        Ok(())
    }
}

fn write_repository(f: &mut Formatter<'_>, report: &Report, repo: &RepositoryReport) -> fmt::Result {
    let descriptor = &repo.repository;

    writeln!(f, "## [{}]({})", descriptor.name, descriptor.html_url)?;
    writeln!(f)?;
    writeln!(
        f,
        "**Description:** {}  ",
        descriptor
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description")
    )?;
    match descriptor.updated_at {
        Some(updated) => writeln!(f, "**Last updated:** {}  ", updated.format("%d/%m/%Y"))?,
        None => writeln!(f, "**Last updated:** unknown  ")?,
    }
    writeln!(f, "**Default branch:** `{}`", descriptor.default_branch)?;
    writeln!(f)?;

    if repo.entries.is_empty() {
        writeln!(f, "No tracked files found.")?;
        writeln!(f)?;
    }

    for entry in &repo.entries {
        write_entry(f, report, entry)?;
    }

    writeln!(f, "---")?;
    writeln!(f)
}

fn write_entry(f: &mut Formatter<'_>, report: &Report, entry: &ReportEntry) -> fmt::Result {
    let marker = if entry.outdated { " (needs update)" } else { "" };
    writeln!(f, "### `{}`{marker}", entry.file.path)?;
    writeln!(f)?;

    if entry.is_empty() {
        writeln!(f, "_No runtime or module declarations found._")?;
        writeln!(f)?;
        return Ok(());
    }

    for runtime in &entry.runtimes {
        write!(f, "- Runtime `{}` → ", runtime.raw)?;
        match runtime.status(report.recommended) {
            RuntimeStatus::NotApplicable => writeln!(
                f,
                "not applicable (not {} or version not readable)",
                report.language
            )?,
            RuntimeStatus::Outdated {
                current,
                recommended,
            } => writeln!(
                f,
                "**outdated**: current `{current}`, recommended `{recommended}`"
            )?,
            RuntimeStatus::Current { version } => writeln!(f, "current: `{version}`")?,
        }
    }

    for source in &entry.sources {
        write!(f, "- Module `{}` → ", source.url)?;
        match source.status() {
            ModuleStatus::Unknown => match (source.current, source.expected) {
                (None, _) => writeln!(f, "unknown: no `ref` tag")?,
                (Some(current), None) => {
                    writeln!(f, "unknown: pinned `{current}`, no expected version for origin")?
                }
                (Some(_), Some(_)) => writeln!(f, "unknown")?,
            },
            ModuleStatus::Outdated { current, expected } => writeln!(
                f,
                "**outdated**: current `{current}`, expected `{expected}`"
            )?,
            ModuleStatus::Current { version } => writeln!(f, "current: `{version}`")?,
        }
    }

    writeln!(f)
}
