//! Human and JSON rendering of a [`RunSummary`].

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use prerender_sync::{BuildOutcome, Fix, ReconcileOutcome, RunSummary};

#[derive(Serialize)]
struct RunReportJson {
    finished_at: DateTime<Utc>,
    dry_run: bool,
    summary: SummaryJson,
    posts: Vec<PostJson>,
    build: BuildJson,
}

#[derive(Serialize)]
struct SummaryJson {
    posts: usize,
    created: usize,
    written: usize,
    unchanged: usize,
    malformed: usize,
}

#[derive(Serialize)]
struct PostJson {
    path: String,
    status: &'static str,
    date_fixed: bool,
    doi_issued: bool,
}

#[derive(Serialize)]
struct BuildJson {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
}

fn status_label(outcome: &ReconcileOutcome) -> &'static str {
    match outcome {
        ReconcileOutcome::Written { .. } => "written",
        ReconcileOutcome::WouldWrite { .. } => "would_write",
        ReconcileOutcome::Unchanged { .. } => "unchanged",
        ReconcileOutcome::SkippedMalformed { .. } => "malformed",
    }
}

fn fix_of(outcome: &ReconcileOutcome) -> Fix {
    match outcome {
        ReconcileOutcome::Written { fix, .. } | ReconcileOutcome::WouldWrite { fix, .. } => *fix,
        _ => Fix::default(),
    }
}

fn count(summary: &RunSummary, pred: fn(&ReconcileOutcome) -> bool) -> usize {
    summary.posts.iter().filter(|o| pred(o)).count()
}

pub fn print_json(summary: &RunSummary, dry_run: bool) -> Result<()> {
    let (status, exit_code) = match &summary.build {
        BuildOutcome::Succeeded => ("succeeded", None),
        BuildOutcome::FailedTolerated { code } => ("failed", *code),
        BuildOutcome::Skipped => ("skipped", None),
    };
    let report = RunReportJson {
        finished_at: Utc::now(),
        dry_run,
        summary: SummaryJson {
            posts: summary.posts.len(),
            created: summary.created,
            written: count(summary, |o| {
                matches!(
                    o,
                    ReconcileOutcome::Written { .. } | ReconcileOutcome::WouldWrite { .. }
                )
            }),
            unchanged: count(summary, |o| matches!(o, ReconcileOutcome::Unchanged { .. })),
            malformed: count(summary, |o| {
                matches!(o, ReconcileOutcome::SkippedMalformed { .. })
            }),
        },
        posts: summary
            .posts
            .iter()
            .map(|o| {
                let fix = fix_of(o);
                PostJson {
                    path: o.post().to_string(),
                    status: status_label(o),
                    date_fixed: fix.date,
                    doi_issued: fix.doi,
                }
            })
            .collect(),
        build: BuildJson { status, exit_code },
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to render JSON report")?
    );
    Ok(())
}

pub fn print_human(summary: &RunSummary, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if summary.posts.is_empty() {
        println!("{prefix}No posts found.");
    } else {
        let written = count(summary, |o| {
            matches!(
                o,
                ReconcileOutcome::Written { .. } | ReconcileOutcome::WouldWrite { .. }
            )
        });
        let malformed = count(summary, |o| {
            matches!(o, ReconcileOutcome::SkippedMalformed { .. })
        });
        println!(
            "{prefix}✓ {} posts ({} updated, {} unchanged, {} malformed)",
            summary.posts.len(),
            written,
            summary.posts.len() - written - malformed,
            malformed
        );
    }

    for outcome in &summary.posts {
        let path = outcome.post().to_string();
        match outcome {
            ReconcileOutcome::Written { fix, .. } => {
                println!("  {}  {} {}", "✎".green(), path, describe(fix))
            }
            ReconcileOutcome::WouldWrite { fix, .. } => {
                println!("  {}  {} {}", "~".yellow(), path, describe(fix))
            }
            ReconcileOutcome::Unchanged { .. } => println!("  ·  {}", path.dimmed()),
            ReconcileOutcome::SkippedMalformed { .. } => {
                println!("  {}  {} (not a mapping; skipped)", "!".red(), path)
            }
        }
    }

    match &summary.build {
        BuildOutcome::Succeeded => println!("{} build succeeded", "✓".green()),
        BuildOutcome::FailedTolerated { code } => println!(
            "{} build failed{}",
            "!".red(),
            code.map(|c| format!(" (exit code {c})")).unwrap_or_default()
        ),
        BuildOutcome::Skipped => {}
    }
}

fn describe(fix: &Fix) -> String {
    if fix.populated {
        return "(new metadata)".to_owned();
    }
    let mut parts = Vec::new();
    if fix.date {
        parts.push("date");
    }
    if fix.doi {
        parts.push("doi");
    }
    format!("({})", parts.join(", "))
}
