//! depscope - dependency version intelligence CLI
//!
//! Looks up dependency versions on Maven Central, classifies their
//! stability, detects update types, and scores overall project health.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use depscope::analyzer::{AnalysisOptions, DependencyAnalyzer};
use depscope::cli::{expand_dependency_args, CliArgs, Command};
use depscope::error::ToolError;
use depscope::orchestrator::BatchOrchestrator;
use depscope::output::{render, ClassificationReport, ComparisonReport, OutputFormat, Report};
use depscope::progress::Progress;
use depscope::registry::{default_source, CachedSource, HttpClient, MavenCentralClient};
use depscope::scan::{OsvScanner, PomLicenseScanner};
use depscope::version::StabilityTier;

/// Analyzer bound to the cached Maven Central source
type MavenAnalyzer = DependencyAnalyzer<CachedSource<MavenCentralClient>>;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic: execute the command and render its report
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let format = OutputFormat::from_cli(args.json);
    let mut progress = Progress::new(!args.quiet && !args.json);

    let report = match execute(&args, &mut progress).await {
        Ok(report) => report,
        Err(error) => Report::Failure(error),
    };
    progress.finish_and_clear();

    let mut stdout = io::stdout().lock();
    render(&report, format, &mut stdout)?;
    stdout.flush()?;

    Ok(if report.is_failure() {
        ExitCode::FAILURE
    } else if report.has_partial_errors() {
        // Partial success: some dependencies errored but results exist
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

/// Log to stderr via tracing; RUST_LOG overrides the default filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "depscope=debug"
    } else {
        "depscope=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Dispatch the parsed command to the analyzer
async fn execute(args: &CliArgs, progress: &mut Progress) -> Result<Report, ToolError> {
    match &args.command {
        Command::Classify { version } => {
            let tier = MavenAnalyzer::classify_version(version);
            Ok(Report::Classification(ClassificationReport {
                version: version.clone(),
                tier,
                is_stable: tier == StabilityTier::Stable,
            }))
        }

        Command::Compare { current, latest } => Ok(Report::Comparison(ComparisonReport {
            current: current.clone(),
            latest: latest.clone(),
            comparison: MavenAnalyzer::compare_versions(current, latest),
        })),

        Command::Latest {
            dependency,
            prefer_stable,
        } => {
            let analyzer = build_analyzer(BatchOrchestrator::new(), false, false)?;
            progress.spinner(&format!("Fetching versions of {}", dependency));
            let report = analyzer.latest_version(dependency, *prefer_stable).await?;
            Ok(Report::Latest(report))
        }

        Command::Exists {
            dependency,
            version,
        } => {
            let analyzer = build_analyzer(BatchOrchestrator::new(), false, false)?;
            progress.spinner(&format!("Checking {}", dependency));
            let report = analyzer
                .check_version_exists(dependency, version.as_deref())
                .await?;
            Ok(Report::Exists(report))
        }

        Command::Batch {
            dependencies,
            concurrency,
            timeout,
            ..
        } => {
            let analyzer = build_analyzer(
                configure_orchestrator(*concurrency, *timeout),
                false,
                false,
            )?;
            let dependencies = expand_dependency_args(dependencies);
            progress.spinner(&format!("Analyzing {} dependencies", dependencies.len()));
            let options = AnalysisOptions {
                stability_filter: args.command.stability_filter(),
                ..AnalysisOptions::default()
            };
            let batch = analyzer.analyze_batch(&dependencies, options).await?;
            Ok(Report::Batch(batch))
        }

        Command::Health {
            dependencies,
            security,
            licenses,
            concurrency,
            timeout,
        } => {
            let analyzer = build_analyzer(
                configure_orchestrator(*concurrency, *timeout),
                *security,
                *licenses,
            )?;
            let dependencies = expand_dependency_args(dependencies);
            progress.spinner(&format!("Scoring {} dependencies", dependencies.len()));
            let options = AnalysisOptions {
                stability_filter: args.command.stability_filter(),
                include_security_scan: *security,
                include_license_scan: *licenses,
            };
            let health = analyzer.project_health(&dependencies, options).await?;
            Ok(Report::Health(health))
        }
    }
}

fn configure_orchestrator(concurrency: usize, timeout: Option<Duration>) -> BatchOrchestrator {
    let mut orchestrator = BatchOrchestrator::new().with_concurrency(concurrency);
    if let Some(timeout) = timeout {
        orchestrator = orchestrator.with_batch_timeout(timeout);
    }
    orchestrator
}

/// Wire the cached Maven Central source and the requested scanners
fn build_analyzer(
    orchestrator: BatchOrchestrator,
    security: bool,
    licenses: bool,
) -> Result<MavenAnalyzer, ToolError> {
    let source = default_source()?;
    let mut analyzer = DependencyAnalyzer::new(source).with_orchestrator(orchestrator);
    if security {
        analyzer = analyzer.with_security_scanner(Arc::new(OsvScanner::new(HttpClient::new()?)));
    }
    if licenses {
        analyzer =
            analyzer.with_license_scanner(Arc::new(PomLicenseScanner::new(HttpClient::new()?)));
    }
    Ok(analyzer)
}
