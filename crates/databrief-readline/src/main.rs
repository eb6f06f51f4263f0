use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use databrief_application::{
    CHART_FILE_NAME, ParticleSink, REPORT_FILE_NAME, ReportExporter, SessionController,
    SubmitOutcome, capture_chart,
};
use databrief_core::capability::{SpeechRecognition, SpeechSynthesis};
use databrief_core::error::BriefError;
use databrief_core::{Attachment, ChartModel};
use databrief_service::HttpAnalysisService;

mod host;

use host::{ConsoleParticles, ConsoleSynthesis, PlainTextDocumentWriter, UnsupportedRecognition};

const COMMANDS: &[&str] = &[
    "/chart", "/attach", "/detach", "/factor", "/follow", "/speak", "/stop", "/history",
    "/report", "/export", "/dismiss", "/download", "/reset", "/help", "/quit",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// The DataBrief terminal session.
///
/// Plain input submits a query; `/chart` toggles whether submissions
/// request a chart; everything else is a slash command. Presentation
/// only - all session semantics live in the application layer.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let service = Arc::new(HttpAnalysisService::from_env());
    println!(
        "{} {}",
        "DataBrief AI".bold().bright_magenta(),
        format!("({})", service.base_url()).dimmed()
    );

    let synthesis: Arc<dyn SpeechSynthesis> = Arc::new(ConsoleSynthesis);
    let recognition: Arc<dyn SpeechRecognition> = Arc::new(UnsupportedRecognition);
    let controller = Arc::new(SessionController::new(service.clone(), synthesis, recognition));
    controller.start().await;

    let particles: Arc<dyn ParticleSink> = Arc::new(ConsoleParticles);
    let mut reporter = ReportExporter::new(service, particles);

    let mut editor: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CliHelper::new()));

    let mut wants_chart = false;
    println!("{}", "Type a question, or /help for commands.".dimmed());

    loop {
        let prompt = if wants_chart { "chart> " } else { "> " };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Input error: {err}").red());
                break;
            }
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        match input.split_once(' ').map_or((input, ""), |(c, r)| (c, r.trim())) {
            ("/quit", _) => break,
            ("/help", _) => print_help(),
            ("/chart", _) => {
                wants_chart = !wants_chart;
                let state = if wants_chart { "ON".green() } else { "off".dimmed() };
                println!("Chart generation: {state}");
            }
            ("/attach", path) if !path.is_empty() => match std::fs::read(path) {
                Ok(bytes) => {
                    let name = std::path::Path::new(path)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.to_string());
                    println!("Attached {}", name.bright_cyan());
                    controller.attach(Attachment::new(name, bytes)).await;
                }
                Err(err) => notice(&BriefError::from(err)),
            },
            ("/attach", _) => println!("{}", "Usage: /attach <path to csv>".yellow()),
            ("/detach", _) => {
                controller.detach().await;
                println!("{}", "Attachment removed.".dimmed());
            }
            ("/factor", value) => match value.parse::<i32>() {
                Ok(percent) => {
                    controller.set_simulation_factor(percent).await;
                    render_chart(controller.chart().await.as_ref());
                }
                Err(_) => println!("{}", "Usage: /factor <-50..50>".yellow()),
            },
            ("/follow", index) => {
                let suggestion = match (index.parse::<usize>(), controller.chart().await) {
                    (Ok(n), Some(chart)) => chart.suggestions().get(n.wrapping_sub(1)).cloned(),
                    _ => None,
                };
                match suggestion {
                    Some(text) => {
                        println!("{} {}", "→".bright_cyan(), text);
                        run_submission(&controller, controller.submit_suggestion(text).await).await;
                    }
                    None => println!("{}", "Usage: /follow <suggestion number>".yellow()),
                }
            }
            ("/speak", _) => {
                if let Err(err) = controller.narrate_summary().await {
                    notice(&err);
                } else {
                    // Console narration completes as soon as it prints.
                    controller.narration_finished().await;
                }
            }
            ("/stop", _) => controller.stop_narration().await,
            ("/history", _) => render_history(&controller).await,
            ("/report", _) => {
                match reporter.compile(controller.history_is_empty().await).await {
                    Ok(report) => render_report(report),
                    Err(err) => notice(&err),
                }
            }
            ("/export", _) => match reporter.export(&PlainTextDocumentWriter) {
                Ok(bytes) => save(REPORT_FILE_NAME, &bytes),
                Err(err) => notice(&err),
            },
            ("/dismiss", _) => {
                reporter.dismiss();
                println!("{}", "Report dismissed.".dimmed());
            }
            ("/download", _) => {
                let chart = controller.chart().await;
                match capture_chart(chart.as_ref(), &host::NoChartSurface) {
                    Ok(bytes) => save(CHART_FILE_NAME, &bytes),
                    Err(err) => notice(&err),
                }
            }
            ("/reset", _) => {
                reporter.dismiss();
                match controller.reset().await {
                    Ok(()) => println!("{}", "Session cleared.".dimmed()),
                    Err(err) => notice(&err),
                }
            }
            (command, _) if command.starts_with('/') => {
                println!("{}", format!("Unknown command: {command}").yellow());
            }
            _ => {
                controller.set_query(input).await;
                run_submission(&controller, controller.submit(wants_chart).await).await;
            }
        }
    }

    println!("{}", "Bye.".dimmed());
    Ok(())
}

async fn run_submission(
    controller: &SessionController,
    outcome: databrief_core::Result<SubmitOutcome>,
) {
    match outcome {
        Ok(SubmitOutcome::Assimilated) => {
            if let Some(chart) = controller.chart().await {
                render_result(&chart);
            }
        }
        Ok(SubmitOutcome::Skipped) => {
            println!("{}", "Nothing to submit - type a question or attach a file.".dimmed());
        }
        Ok(SubmitOutcome::Stale) => {}
        Err(err) => notice(&err),
    }
}

fn render_result(chart: &ChartModel) {
    println!();
    println!("{}", chart.title().bold());
    render_chart(Some(chart));
    println!("{}", chart.summary());
    if !chart.suggestions().is_empty() {
        println!("{}", "Follow-ups (/follow <n>):".dimmed());
        for (i, suggestion) in chart.suggestions().iter().enumerate() {
            println!("  {} {}", format!("{}.", i + 1).bright_cyan(), suggestion);
        }
    }
    println!();
}

/// Textual stand-in for the chart surface: one scaled bar per point.
fn render_chart(chart: Option<&ChartModel>) {
    let Some(chart) = chart.filter(|c| c.has_chart()) else {
        return;
    };

    let simulated = chart.simulated_series();
    let peak = simulated
        .iter()
        .map(|p| p.value.abs())
        .fold(f64::EPSILON, f64::max);

    if !chart.factor().is_identity() {
        println!(
            "{}",
            format!("Simulation: {:+}% impact", chart.factor().percent()).bright_magenta()
        );
    }
    for point in &simulated {
        let width = ((point.value.abs() / peak) * 40.0).round() as usize;
        println!(
            "  {:>12} {} {}",
            point.name.dimmed(),
            "█".repeat(width.max(1)).bright_blue(),
            chart.format_value(point.value)
        );
    }
}

async fn render_history(controller: &SessionController) {
    let history = controller.history().await;
    if history.is_empty() {
        println!("{}", "No history yet.".dimmed());
        return;
    }
    for entry in history {
        let role = match entry.role {
            databrief_core::MessageRole::User => "user".bright_cyan(),
            databrief_core::MessageRole::Assistant => "assistant".bright_magenta(),
        };
        println!("{role}: {}", entry.content);
    }
}

fn render_report(report: &databrief_core::SessionReport) {
    println!();
    println!("{}", "Executive Briefing".bold());
    println!("{}", report.title.dimmed());
    println!("{}", "KEY INSIGHTS".bright_magenta());
    for finding in &report.key_findings {
        println!("  • {finding}");
    }
    println!("{}", "STRATEGIC MOVES".green());
    for suggestion in &report.suggestions {
        println!("  ➜ {suggestion}");
    }
    println!("{}", "/export to save, /dismiss to close.".dimmed());
    println!();
}

fn notice(err: &BriefError) {
    eprintln!("{}", err.user_message().red());
}

fn save(name: &str, bytes: &[u8]) {
    match std::fs::write(name, bytes) {
        Ok(()) => println!("Saved {}", name.bright_cyan()),
        Err(err) => notice(&BriefError::from(err)),
    }
}

fn print_help() {
    let lines = [
        ("<question>", "submit a query (chart per /chart toggle)"),
        ("/chart", "toggle chart generation for submissions"),
        ("/attach <path>", "attach a CSV to the next submissions"),
        ("/detach", "remove the attachment"),
        ("/factor <n>", "what-if adjustment, -50..50 percent"),
        ("/follow <n>", "submit a suggested follow-up"),
        ("/speak", "narrate the current summary"),
        ("/stop", "stop narration"),
        ("/history", "show the session history"),
        ("/report", "compile the executive report"),
        ("/export", "save the report document"),
        ("/dismiss", "discard the displayed report"),
        ("/download", "save the chart image"),
        ("/reset", "clear the whole session"),
        ("/quit", "leave"),
    ];
    for (command, text) in lines {
        println!("  {:<16} {}", command.bright_cyan(), text.dimmed());
    }
}
