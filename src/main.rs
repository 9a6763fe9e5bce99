mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::{BufRead, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use safecalc::calculator::{
    CalcResult, ErrorKind, check_operators, evaluate_expression, format_display,
    looks_like_expression,
};
use safecalc::config::Config;
use safecalc::session::Session;

/// One evaluated expression, as printed by `eval --json`.
#[derive(Serialize)]
struct Report<'a> {
    expression: &'a str,
    value: Option<f64>,
    display: &'a str,
    error: Option<ErrorReport>,
}

#[derive(Serialize)]
struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

impl<'a> From<&'a CalcResult> for Report<'a> {
    fn from(result: &'a CalcResult) -> Self {
        let value = match result {
            CalcResult::Success { value, .. } => Some(*value),
            CalcResult::Error { .. } => None,
        };

        Self {
            expression: result.expression(),
            value,
            display: result.display(),
            error: result.error().map(|e| ErrorReport {
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default(),
    };
    let config = args.apply(config);
    tracing::debug!(?config, "configuration loaded");

    match &args.command {
        Command::Eval { expressions, json } => run_eval(&config, expressions, *json),
        Command::Repl => run_repl(&config),
    }
}

fn run_eval(config: &Config, expressions: &[String], json: bool) -> Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    let mut failed = false;

    for expression in expressions {
        let result = evaluate_expression(expression, &config.limits, config.display.group_thousands);
        failed |= !result.is_success();

        if json {
            serde_json::to_writer(&mut stdout, &Report::from(&result))
                .context("Failed to write JSON output")?;
            writeln!(stdout)?;
        } else {
            match result.error() {
                None => writeln!(stdout, "{}", result.display())?,
                Some(e) => writeln!(stdout, "{}: {}", CalcResult::ERROR_DISPLAY, e)?,
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Check if a REPL line extends the previous result rather than replacing it.
///
/// `-` only continues when followed by whitespace, so `-5` stays a fresh
/// negative number.
fn continues_result(line: &str) -> bool {
    let mut chars = line.chars();
    match chars.next() {
        Some('+' | '*' | '/') => true,
        Some('-') => chars.next().is_some_and(char::is_whitespace),
        _ => false,
    }
}

const REPL_HELP: &str = "\
Type an expression and press Enter. Start a line with an operator
(`*2`, `/ 4`, `- 1`) to continue from the previous result; `-1` with no
space is a new negative number.
Commands: clear, help, quit";

fn run_repl(config: &Config) -> Result<ExitCode> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = std::io::stdout().lock();
    let mut session = Session::new(config.limits.clone());

    if interactive {
        writeln!(stdout, "{}", REPL_HELP)?;
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(stdout, "{}> ", session.expression())?;
            stdout.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "clear" => {
                session.clear();
                continue;
            }
            "help" => {
                writeln!(stdout, "{}", REPL_HELP)?;
                continue;
            }
            text if !looks_like_expression(text) => {
                writeln!(stdout, "Unknown command: {} (try 'help')", text)?;
                continue;
            }
            text => {
                if !continues_result(text) {
                    session.clear();
                }
                // Report refused operators instead of silently dropping them.
                let candidate = format!("{}{}", session.expression(), text);
                if let Err(e) = check_operators(&candidate) {
                    writeln!(stdout, "{}: {}", CalcResult::ERROR_DISPLAY, e)?;
                    continue;
                }
                session.append(text);
            }
        }

        match session.calculate() {
            Some(Ok(value)) if config.display.group_thousands => {
                writeln!(stdout, "{}", format_display(value))?
            }
            Some(Ok(_)) => writeln!(stdout, "{}", session.display())?,
            Some(Err(e)) => writeln!(stdout, "{}: {}", session.display(), e)?,
            None => {}
        }
    }

    Ok(ExitCode::SUCCESS)
}
