//! cvkit CLI - import résumé data from CSV exports and check it
//!
//! # Main Commands
//!
//! ```bash
//! cvkit import ./Basic_LinkedInDataExport   # Export directory → application data JSON
//! cvkit gaps data.json                      # Employment gaps
//! cvkit ats data.json                       # ATS checklist
//! cvkit keywords --job ad.txt --cv data.json
//! cvkit tone anschreiben.txt
//! ```
//!
//! # Helper Commands
//!
//! ```bash
//! cvkit parse Positions.csv    # Just parse CSV to JSON records
//! cvkit validate data.json     # Validate JSON against schema
//! cvkit duration 14            # "1 Jahr, 2 Monate"
//! cvkit month 2024-03          # "März 2024"
//! ```

use clap::{Parser, Subcommand};
use cvkit::analysis::{analyze_tonality, check_ats, match_keywords};
use cvkit::config::{Settings, MAX_KEYWORDS};
use cvkit::error::{CliError, CliResult};
use cvkit::import::{import_export_dir, Provider};
use cvkit::logs::set_echo;
use cvkit::models::{ApplicationData, YearMonth};
use cvkit::parser::{parse_with_headers, read_text_file};
use cvkit::timeline::{
    detect_gaps_with_threshold, format_date_range, format_duration, format_month_label, Clock,
    FixedClock,
};
use cvkit::validation::validate_application_data;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cvkit")]
#[command(about = "Import LinkedIn/XING CSV exports and check résumé data", long_about = None)]
struct Cli {
    /// Mute progress output on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output JSON records
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import an unpacked LinkedIn or XING export directory
    Import {
        /// Directory containing the export's CSV files
        dir: PathBuf,

        /// Provider (linkedin, xing); detected from file names if omitted
        #[arg(short, long)]
        provider: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect employment gaps in application data
    Gaps {
        /// Application data JSON
        input: PathBuf,

        /// Current month as YYYY-MM (default: CVKIT_NOW or system clock)
        #[arg(long)]
        now: Option<String>,

        /// Minimum gap length in months (exclusive)
        #[arg(long)]
        threshold: Option<u32>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Format a number of months as German duration
    Duration {
        months: u32,
    },

    /// Format a YYYY-MM date as German month label
    Month {
        date: String,
    },

    /// Validate application data JSON against the schema
    Validate {
        /// Application data JSON
        input: PathBuf,
    },

    /// Match a job description against application data
    Keywords {
        /// Job description text file
        #[arg(short, long)]
        job: PathBuf,

        /// Application data JSON
        #[arg(short, long)]
        cv: PathBuf,

        /// Number of job keywords to consider
        #[arg(short, long, default_value_t = MAX_KEYWORDS)]
        limit: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze the tonality of a text file or application data JSON
    Tone {
        /// Text file, or `.json` application data
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the ATS compliance checklist
    Ats {
        /// Application data JSON
        input: PathBuf,

        /// Current month as YYYY-MM (default: CVKIT_NOW or system clock)
        #[arg(long)]
        now: Option<String>,

        /// Minimum gap length in months (exclusive)
        #[arg(long)]
        threshold: Option<u32>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let settings = Settings::from_env()?;
    set_echo(!(cli.quiet || settings.quiet));

    match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Import {
            dir,
            provider,
            output,
        } => cmd_import(&dir, provider.as_deref(), output.as_deref()).await,

        Commands::Gaps {
            input,
            now,
            threshold,
            output,
        } => cmd_gaps(
            &settings,
            &input,
            now.as_deref(),
            threshold,
            output.as_deref(),
        ),

        Commands::Duration { months } => {
            println!("{}", format_duration(months));
            Ok(())
        }

        Commands::Month { date } => {
            println!("{}", format_month_label(&date));
            Ok(())
        }

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Keywords {
            job,
            cv,
            limit,
            output,
        } => cmd_keywords(&job, &cv, limit, output.as_deref()),

        Commands::Tone { input, output } => cmd_tone(&input, output.as_deref()),

        Commands::Ats {
            input,
            now,
            threshold,
            output,
        } => cmd_ats(
            &settings,
            &input,
            now.as_deref(),
            threshold,
            output.as_deref(),
        ),
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> CliResult<()> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let text = read_text_file(input)?;
    let result = parse_with_headers(&text);

    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    write_json(&result.records, output)
}

async fn cmd_import(dir: &Path, provider: Option<&str>, output: Option<&Path>) -> CliResult<()> {
    let provider = provider.map(str::parse::<Provider>).transpose()?;

    let report = import_export_dir(dir, provider).await?;

    if !report.warnings.is_empty() {
        eprintln!("⚠️  {} warning(s)", report.warnings.len());
    }

    write_json(&report, output)
}

fn cmd_gaps(
    settings: &Settings,
    input: &Path,
    now: Option<&str>,
    threshold: Option<u32>,
    output: Option<&Path>,
) -> CliResult<()> {
    let data = read_application_data(input)?;
    let clock = resolve_clock(settings, now)?;
    let threshold = threshold.unwrap_or(settings.gap_threshold);

    let gaps = detect_gaps_with_threshold(&data.work_intervals(), clock.as_ref(), threshold);

    if gaps.is_empty() {
        eprintln!("✅ No gaps longer than {}", format_duration(threshold));
    }
    for gap in &gaps {
        eprintln!(
            "   {}: {}",
            format_date_range(&gap.start_date, &gap.end_date, false),
            format_duration(gap.months)
        );
    }

    write_json(&gaps, output)
}

fn cmd_validate(input: &Path) -> CliResult<()> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let value: Value = serde_json::from_str(&content)?;

    match validate_application_data(&value) {
        Ok(()) => {
            eprintln!("✅ Valid");
            Ok(())
        }
        Err(errors) => {
            for err in errors.iter().take(10) {
                eprintln!("   - {}", err);
            }
            Err(CliError::Invalid(errors.len()))
        }
    }
}

fn cmd_keywords(job: &Path, cv: &Path, limit: usize, output: Option<&Path>) -> CliResult<()> {
    let job_text = fs::read_to_string(job)?;
    let data = read_application_data(cv)?;

    let report = match_keywords(&job_text, &data.searchable_text(), limit);
    eprintln!(
        "📊 Match: {}/100 ({} matched, {} missing)",
        report.score,
        report.matched.len(),
        report.missing.len()
    );

    write_json(&report, output)
}

fn cmd_tone(input: &Path, output: Option<&Path>) -> CliResult<()> {
    let is_json = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let text = if is_json {
        read_application_data(input)?.searchable_text()
    } else {
        fs::read_to_string(input)?
    };

    let report = analyze_tonality(&text);
    eprintln!("📊 Tonality: {}/100 ({:?})", report.score, report.tone);

    write_json(&report, output)
}

fn cmd_ats(
    settings: &Settings,
    input: &Path,
    now: Option<&str>,
    threshold: Option<u32>,
    output: Option<&Path>,
) -> CliResult<()> {
    let data = read_application_data(input)?;
    let clock = resolve_clock(settings, now)?;
    let threshold = threshold.unwrap_or(settings.gap_threshold);

    let report = check_ats(&data, clock.as_ref(), threshold);
    eprintln!("📊 ATS score: {}/100", report.score);
    for check in report.failed() {
        eprintln!("   ❌ {}: {}", check.id, check.message);
    }

    write_json(&report, output)
}

/// `--now` overrides the configured clock.
fn resolve_clock(settings: &Settings, now: Option<&str>) -> CliResult<Box<dyn Clock>> {
    match now {
        Some(raw) => {
            let month = raw
                .parse::<YearMonth>()
                .map_err(|e| CliError::InvalidArgument(format!("--now: {}", e)))?;
            Ok(Box::new(FixedClock(month)))
        }
        None => Ok(settings.clock()),
    }
}

fn read_application_data(path: &Path) -> CliResult<ApplicationData> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_output(&json, path)
}

fn write_output(content: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
