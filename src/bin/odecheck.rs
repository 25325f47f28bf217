use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use odecheck::{
    AnalysisError, AnalysisResult, Analyzer, AnalyzerOptions, pretty_analysis_details,
};

#[derive(Parser)]
#[command(
    name = "odecheck",
    version,
    about = "Check whether M(x,y)dx + N(x,y)dy is homogeneous and exact",
    after_help = "Without an EQUATION argument, equations are read from stdin, one per line."
)]
struct Cli {
    /// Equation to analyze, e.g. "(x+y)dx + (x-y)dy = 0"
    equation: Option<String>,

    /// Largest integer power of a sum expanded by the identical-zero test
    #[arg(long, env = "ODECHECK_MAX_EXPAND_POWER", default_value_t = odecheck::simplify::DEFAULT_MAX_EXPAND_POWER)]
    max_expand_power: u32,

    /// Iteration cap for simplifying the cross partials
    #[arg(long, env = "ODECHECK_SIMPLIFY_ITERATIONS", default_value_t = odecheck::simplify::DEFAULT_SIMPLIFY_ITERATIONS)]
    simplify_iterations: usize,

    /// Log filter; RUST_LOG is used when absent
    #[arg(long, value_enum, env = "ODECHECK_LOG")]
    log_level: Option<LogLevel>,

    /// Also print M, N and the cross partials
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Front-end state: the configured analyzer and how many equations it has handled.
struct App {
    analyzer: Analyzer,
    verbose: bool,
    analyzed: usize,
}

impl App {
    fn new(options: AnalyzerOptions, verbose: bool) -> Self {
        App {
            analyzer: Analyzer::new(options),
            verbose,
            analyzed: 0,
        }
    }

    /// Analyze one equation and return the lines to display.
    fn submit(&mut self, text: &str) -> std::result::Result<Vec<String>, AnalysisError> {
        self.analyzed += 1;
        let result = self.analyzer.analyze(text)?;
        Ok(self.render(&result))
    }

    fn render(&self, result: &AnalysisResult) -> Vec<String> {
        if self.verbose {
            pretty_analysis_details(result)
        } else {
            odecheck::pretty_analysis(result)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    let options = AnalyzerOptions {
        simplify_iterations: cli.simplify_iterations,
        max_expand_power: cli.max_expand_power,
    };
    debug!("options: {options:?}");
    let mut app = App::new(options, cli.verbose);

    match cli.equation {
        Some(text) => match app.submit(&text) {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("error: {err}");
                Ok(ExitCode::FAILURE)
            }
        },
        None => {
            run_stdin(&mut app)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_stdin(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read equation from stdin")?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        match app.submit(text) {
            Ok(lines) => {
                writeln!(out, "{text}").context("failed to write result")?;
                for line in lines {
                    writeln!(out, "  {line}").context("failed to write result")?;
                }
            }
            Err(err) => writeln!(out, "{text}\n  error: {err}").context("failed to write result")?,
        }
    }
    info!("analyzed {} equation(s)", app.analyzed);
    Ok(())
}
