//! roster - generate monthly nursing rosters.
//!
//! Reads nurse names (one per line) from a file or stdin and writes the
//! month's roster as JSON to a file or stdout.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use u_roster::audit::RosterAudit;
use u_roster::constraints::{rules, ConstraintChain};
use u_roster::staff::{read_staff, DuplicatePolicy};
use u_roster::{
    GeneratorConfig, Month, NurseId, NurseScheduler, Roster, RosterGenerator, ShortfallPolicy,
};

/// Generate nursing rosters.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Year to produce the roster for.
    #[arg(value_name = "YYYY")]
    year: i32,

    /// Month to produce the roster for (1-12).
    #[arg(value_name = "MM")]
    month: u32,

    /// Read names of available nurses from file (default is stdin).
    #[arg(short = 'i', long = "nurses", value_name = "FILE")]
    nurses: Option<PathBuf>,

    /// Write output to file (default is stdout).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Use compact output.
    #[arg(short, long)]
    compact: bool,

    /// Skip duplicate nurse names instead of renaming them.
    #[arg(long)]
    skip_dups: bool,

    /// Skip constraint 1 (at most five consecutive days).
    #[arg(long = "no-c1")]
    no_c1: bool,

    /// Skip constraint 2 (at most five night shifts per month).
    #[arg(long = "no-c2")]
    no_c2: bool,

    /// Skip constraint 3 (at most one shift per day).
    #[arg(long = "no-c3")]
    no_c3: bool,

    /// Skip constraint 4 (no single days off).
    #[arg(long = "no-c4")]
    no_c4: bool,

    /// Generator settings (TOML: shifts, night_label, on_shortfall).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Leave unfillable shifts short instead of failing.
    #[arg(long)]
    understaff: bool,

    /// Check the finished roster and log any rule violations.
    #[arg(long)]
    audit: bool,

    /// Enable debug output.
    #[arg(short, long)]
    debug: bool,

    /// Do not color the output.
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `--debug` selects debug, else warn.
fn init_logging(cli: &Cli) {
    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(!cli.no_color)
                .with_target(cli.debug),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let month = Month::new(cli.year, cli.month)?;

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    if cli.understaff {
        config.on_shortfall = ShortfallPolicy::Understaff;
    }

    let staff = read_nurses(cli)?;
    let constraints = constraint_chain(cli, &config.night_label);
    let mut generator = RosterGenerator::new(config).with_constraints(constraints);
    debug!(
        scheduler = generator.scheduler().name(),
        constraints = ?generator.constraints().names(),
        "configured generator"
    );

    let roster = generator
        .generate(cli.year, cli.month, &staff)
        .with_context(|| format!("failed to generate roster for {month}"))?;

    if cli.audit {
        report_audit(&RosterAudit::evaluate(&roster, &generator.config().night_label));
    }

    write_roster(&roster, cli)
}

fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {:?}", path))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config from {:?}", path))
}

fn read_nurses(cli: &Cli) -> Result<Vec<NurseId>> {
    let policy = if cli.skip_dups {
        DuplicatePolicy::Skip
    } else {
        DuplicatePolicy::Rename
    };

    match &cli.nurses {
        Some(path) => {
            debug!(path = ?path, "reading nurses list");
            let file = File::open(path)
                .with_context(|| format!("failed to open {:?} for reading", path))?;
            read_staff(BufReader::new(file), policy)
                .with_context(|| format!("failed to read nurses from {:?}", path))
        }
        None => {
            debug!("reading nurses list from stdin");
            read_staff(io::stdin().lock(), policy).context("failed to read nurses from stdin")
        }
    }
}

/// Standard rules, minus any switched off on the command line.
fn constraint_chain(cli: &Cli, night_label: &str) -> ConstraintChain {
    let mut chain = ConstraintChain::new();
    if !cli.no_c1 {
        chain.push(rules::AtMostFiveConsecutiveDays);
    }
    if !cli.no_c2 {
        chain.push(rules::AtMostFiveNightShiftsPerMonth::new(night_label));
    }
    if !cli.no_c3 {
        chain.push(rules::AtMostOneShiftPerDay);
    }
    if !cli.no_c4 {
        chain.push(rules::NoSingleDaysOff);
    }
    chain
}

fn report_audit(audit: &RosterAudit) {
    for violation in &audit.violations {
        warn!(kind = ?violation.kind, day = violation.day, "{}", violation.message);
    }
    for (nurse, stats) in &audit.nurses {
        info!(
            nurse = %nurse,
            shifts = stats.shifts,
            nights = stats.nights,
            longest_run = stats.longest_run,
            "workload"
        );
    }
    if audit.is_clean() {
        info!("audit found no violations");
    }
}

fn write_roster(roster: &Roster, cli: &Cli) -> Result<()> {
    let json = if cli.compact {
        serde_json::to_string(roster)?
    } else {
        serde_json::to_string_pretty(roster)?
    };

    match &cli.output {
        Some(path) => {
            debug!(path = ?path, "writing roster");
            let file = File::create(path)
                .with_context(|| format!("failed to open {:?} for writing", path))?;
            let mut out = BufWriter::new(file);
            writeln!(out, "{json}").context("failed to write JSON to file")?;
            out.flush().context("failed to write JSON to file")?;
        }
        None => {
            debug!("writing roster to stdout");
            let mut out = io::stdout().lock();
            writeln!(out, "{json}").context("failed to write JSON to stdout")?;
        }
    }
    Ok(())
}
