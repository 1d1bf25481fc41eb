//! CLI command handlers for `scan`, `missing` and `parse`.
//!
//! Text output goes to stdout one line per item so it pipes cleanly;
//! JSON and table output are for people and scripts that want structure.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::{info, instrument, warn};

use crate::cli::{AppContext, MissingArgs, OutputFormat, ParseArgs, ScanArgs, SourceArgs};
use crate::core::filename::parse_filename;
use crate::core::scanner::{ExtensionFilter, SequenceScanner};
use crate::core::sequence::{Sequence, SequenceReport};
use crate::infra::config::{Config, load_config};
use crate::infra::lister::FsLister;

/// Directory, filter and step resolved from CLI flags over config.
struct ScanPlan
{
    path: Utf8PathBuf,
    filter: ExtensionFilter,
    config: Config,
}

impl ScanPlan
{
    fn resolve(source: &SourceArgs) -> Result<Self>
    {
        let config = load_config().unwrap_or_else(|err| {
            warn!("ignoring unreadable config: {err:#}");
            Config::default()
        });

        let expanded = shellexpand::tilde(&source.path);
        let path = Utf8PathBuf::from(expanded.as_ref());

        // CLI extensions replace the configured list
        let filter = if source
            .extensions
            .is_empty()
        {
            ExtensionFilter::new(&config.scan.extensions)
        }
        else
        {
            ExtensionFilter::new(&source.extensions)
        };

        Ok(Self { path, filter, config })
    }

    fn lister(&self) -> Result<FsLister>
    {
        let lister = FsLister::new(&self.config.scan.ignore_patterns)
            .context("Invalid scan.ignore_patterns")?
            .with_include_hidden(self.config.scan.include_hidden)
            .with_respect_ignore_files(self.config.scan.respect_ignore_files);
        Ok(lister)
    }

    fn step(
        &self,
        source: &SourceArgs,
    ) -> rust_decimal::Decimal
    {
        source
            .step
            .unwrap_or(self.config.missing.step)
    }

    /// Run the scan; an empty result is an empty list.
    fn sequences(&self) -> Result<Vec<Sequence>>
    {
        let scanner = SequenceScanner::new(self.lister()?);
        let found = scanner
            .find_sequences(&self.path, Some(&self.filter))
            .with_context(|| format!("Failed to scan {}", self.path))?;
        Ok(found.unwrap_or_default())
    }
}

#[derive(Clone, Copy)]
enum Paint
{
    Good,
    Bad,
    Warn,
    Name,
}

fn paint(
    text: &str,
    style: Paint,
    ctx: &AppContext,
) -> String
{
    if ctx.no_color
    {
        return text.to_string();
    }
    match style
    {
        Paint::Good => text
            .green()
            .to_string(),
        Paint::Bad => text
            .red()
            .bold()
            .to_string(),
        Paint::Warn => text
            .yellow()
            .to_string(),
        Paint::Name => text
            .cyan()
            .to_string(),
    }
}

fn frame_range(report: &SequenceReport) -> String
{
    match (report.first, report.last)
    {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => String::new(),
    }
}

/// `fscan scan`: one line (or row) per sequence.
#[instrument(skip_all, fields(path = %args.source.path))]
pub fn run_scan(
    args: ScanArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let plan = ScanPlan::resolve(&args.source)?;

    let step = plan.step(&args.source);
    let reports = plan
        .sequences()?
        .iter()
        .map(|seq| seq.report(step))
        .collect::<Result<Vec<_>, _>>()?;
    info!(sequences = reports.len(), "scan finished");

    match args.format
    {
        OutputFormat::Json =>
        {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Table =>
        {
            #[derive(Tabled)]
            struct Row
            {
                sequence: String,
                files: usize,
                frames: String,
                missing: usize,
            }

            let rows: Vec<Row> = reports
                .iter()
                .map(|r| Row {
                    sequence: r.pattern.clone(),
                    files: r.count,
                    frames: frame_range(r),
                    missing: r.missing.len(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        OutputFormat::Text =>
        {
            if reports.is_empty() && !ctx.quiet
            {
                println!("{}", paint(&format!("No sequences found in {}", plan.path), Paint::Warn, ctx));
            }
            for r in &reports
            {
                let status = if r.missing.is_empty()
                {
                    paint("complete", Paint::Good, ctx)
                }
                else
                {
                    paint(&format!("{} missing", r.missing.len()), Paint::Bad, ctx)
                };
                println!(
                    "{} [{}] {} files, {}",
                    paint(&r.pattern, Paint::Name, ctx),
                    frame_range(r),
                    r.count,
                    status
                );
            }
        }
    }

    Ok(())
}

/// `fscan missing`: every absent frame path, optionally failing the run.
#[instrument(skip_all, fields(path = %args.source.path))]
pub fn run_missing(
    args: MissingArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let plan = ScanPlan::resolve(&args.source)?;

    let step = plan.step(&args.source);
    let mut gaps: Vec<(String, Vec<String>)> = Vec::new();
    for seq in plan.sequences()?
    {
        let missing = seq
            .find_missing_frames(step, args.start, args.end)
            .with_context(|| format!("Failed to check {seq}"))?
            .unwrap_or_default();
        gaps.push((seq.to_string(), missing));
    }
    let total: usize = gaps
        .iter()
        .map(|(_, m)| m.len())
        .sum();

    match args.format
    {
        OutputFormat::Json =>
        {
            let out: Vec<_> = gaps
                .iter()
                .map(|(seq, missing)| json!({ "sequence": seq, "missing": missing }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table =>
        {
            #[derive(Tabled)]
            struct Row
            {
                sequence: String,
                missing: String,
            }

            let rows: Vec<Row> = gaps
                .iter()
                .flat_map(|(seq, missing)| {
                    missing
                        .iter()
                        .map(move |path| Row { sequence: seq.clone(), missing: path.clone() })
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        OutputFormat::Text =>
        {
            for (_, missing) in &gaps
            {
                for path in missing
                {
                    println!("{path}");
                }
            }
            if total == 0 && !ctx.quiet
            {
                eprintln!("{}", paint("No missing frames", Paint::Good, ctx));
            }
        }
    }

    if args.check && total > 0
    {
        anyhow::bail!("{total} missing frame(s) in {}", plan.path);
    }
    Ok(())
}

/// `fscan parse`: grammar breakdown of each name.
pub fn run_parse(
    args: ParseArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let parsed: Vec<_> = args
        .names
        .iter()
        .map(|name| (name, parse_filename(name)))
        .collect();

    match args.format
    {
        OutputFormat::Json =>
        {
            let out: Vec<_> = parsed
                .iter()
                .map(|(name, p)| {
                    json!({
                        "name": name,
                        "parsed": p,
                        "padding": p.as_ref().map(|p| p.padding()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table =>
        {
            #[derive(Tabled)]
            struct Row
            {
                name: String,
                prefix: String,
                number: String,
                suffix: String,
                extension: String,
                padding: String,
            }

            let rows: Vec<Row> = parsed
                .iter()
                .map(|(name, p)| match p
                {
                    Some(p) => Row {
                        name: name.to_string(),
                        prefix: p.prefix.clone(),
                        number: p.number.to_string(),
                        suffix: p.suffix.clone(),
                        extension: p.extension.clone(),
                        padding: p.padding().to_string(),
                    },
                    None => Row {
                        name: name.to_string(),
                        prefix: "-".into(),
                        number: "-".into(),
                        suffix: "-".into(),
                        extension: "-".into(),
                        padding: "-".into(),
                    },
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        OutputFormat::Text =>
        {
            for (name, p) in &parsed
            {
                match p
                {
                    Some(p) => println!(
                        "{}: prefix={:?} number={} suffix={:?} extension={:?} padding={}",
                        paint(name, Paint::Name, ctx),
                        p.prefix,
                        p.number,
                        p.suffix,
                        p.extension,
                        p.padding()
                    ),
                    None => println!("{}: {}", paint(name, Paint::Name, ctx), paint("no match", Paint::Bad, ctx)),
                }
            }
        }
    }

    Ok(())
}
