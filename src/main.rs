mod api;
mod server;
mod store;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

use growth_desk::draft::{build_draft, generate_hook, DraftParts, DraftScore, DraftScorer, NoteKind};
use growth_desk::ingest::demo_rows;
use growth_desk::review::{assign_study, candidate_benchmarks, find_benchmark, RECENT_LOG_LIMIT};
use growth_desk::{
    format_float, format_number, format_signed, AppConfig, DashboardReport, DiagnosticEngine, KpiSnapshot,
    ReviewInsights, DAILY_TASKS,
};

use crate::api::{GoalRequest, HookRequest, PostLogRequest, PromptRequest};
use crate::store::StateStore;

#[derive(Parser)]
#[command(name = "growth-desk", about = "Growth dashboard engine")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the dashboard state file, overriding the config.
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the analytics import with a CSV export.
    Import(ImportArgs),
    /// Load the built-in sample export.
    Demo,
    /// Show KPIs, diagnostics, next actions and readiness.
    Status(StatusArgs),
    /// Score a draft from --text or stdin.
    Score(ScoreArgs),
    /// Generate a hook line.
    Hook(HookArgs),
    /// Assemble a flagship draft from its parts and score it.
    Draft(DraftArgs),
    /// Log a published post.
    Log(LogArgs),
    /// Show winning patterns from the post log.
    Review,
    /// Pick benchmark accounts to study.
    Study,
    /// Project days to a follower goal.
    Goal(GoalArgs),
    /// Mark a daily task done (or not done with --undo).
    Check(CheckArgs),
    /// Update the objective, voice rules or intel notes.
    Settings(SettingsArgs),
    /// Print the generation-service request payload as JSON.
    Prompt(PromptArgs),
    /// Serve the JSON API.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ImportArgs {
    path: PathBuf,
}

#[derive(Args, Debug, Default)]
struct StatusArgs {
    #[arg(long)]
    brief: bool,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    #[arg(long)]
    text: Option<String>,
    /// Comma-separated pillar keywords, overriding the config.
    #[arg(long)]
    pillars: Option<String>,
}

#[derive(Args, Debug)]
struct HookArgs {
    #[arg(long, default_value = "thesis")]
    style: String,
    #[arg(long, default_value = "none")]
    objective: String,
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long, default_value = "")]
    hook: String,
    #[arg(long)]
    source: Option<String>,
    #[arg(long, default_value = "")]
    signal: String,
    #[arg(long, default_value = "")]
    insight: String,
    #[arg(long, default_value = "")]
    close: String,
}

#[derive(Args, Debug)]
struct LogArgs {
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    format: String,
    #[arg(long)]
    pillar: String,
    #[arg(long)]
    source: Option<String>,
    #[arg(long, default_value_t = 0)]
    impressions: i64,
    #[arg(long, default_value_t = 0)]
    engagements: i64,
    #[arg(long, default_value_t = 0)]
    follows: i64,
    #[arg(long, default_value_t = 0)]
    profile_visits: i64,
    #[arg(long)]
    note: Option<String>,
}

#[derive(Args, Debug)]
struct GoalArgs {
    #[arg(long)]
    current: Option<i64>,
    #[arg(long)]
    target: Option<i64>,
    #[arg(long)]
    by: Option<String>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    id: String,
    #[arg(long)]
    undo: bool,
}

#[derive(Args, Debug)]
struct SettingsArgs {
    #[arg(long)]
    objective: Option<String>,
    #[arg(long)]
    voice_rules: Option<String>,
    #[arg(long)]
    intel_notes: Option<String>,
}

#[derive(Args, Debug)]
struct PromptArgs {
    #[arg(long, default_value = "improve")]
    mode: String,
    #[arg(long)]
    draft: Option<String>,
    #[arg(long)]
    signal: Option<String>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (mut config, _) = AppConfig::load(cli.config).map_err(|err| err.to_string())?;
    if let Some(path) = cli.state {
        config.state.path = path;
    }
    init_tracing(&config.log_level)?;

    let store = StateStore::load(config.state.path.clone()).await?;
    let engine = DiagnosticEngine::new(config.diagnostics.clone());
    let command = cli
        .command
        .unwrap_or(Command::Status(StatusArgs::default()));

    match command {
        Command::Import(args) => run_import(&store, &engine, &args.path).await,
        Command::Demo => run_demo(&store, &engine).await,
        Command::Status(args) => run_status(&store, &engine, &config, args.brief).await,
        Command::Score(args) => run_score(args, &config),
        Command::Hook(args) => run_hook(args),
        Command::Draft(args) => run_draft(args, &config),
        Command::Log(args) => run_log(&store, args).await,
        Command::Review => run_review(&store).await,
        Command::Study => run_study(&store, &engine, &config).await,
        Command::Goal(args) => run_goal(&store, &config, args).await,
        Command::Check(args) => run_check(&store, args).await,
        Command::Settings(args) => run_settings(&store, args).await,
        Command::Prompt(args) => run_prompt(&store, &config, args).await,
        Command::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            server::serve(config, store).await
        }
    }
}

async fn run_import(store: &StateStore, engine: &DiagnosticEngine, path: &Path) -> Result<(), String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let imported = store
        .update(|dashboard| {
            let analysis = dashboard.import_csv(&text);
            let changed = analysis.is_some();
            (analysis, changed)
        })
        .await?;

    let analysis = imported.ok_or_else(|| "Could not parse CSV. Check export format.".to_string())?;
    println!("Imported {} daily records.", analysis.records.len());
    let report = store.snapshot().await.report(engine);
    print_report(&report, &report.diagnostics.actions, false);
    Ok(())
}

async fn run_demo(store: &StateStore, engine: &DiagnosticEngine) -> Result<(), String> {
    store
        .update(|dashboard| {
            let changed = dashboard.import_rows(demo_rows()).is_some();
            ((), changed)
        })
        .await?;
    println!("Loaded sample analytics.");
    let report = store.snapshot().await.report(engine);
    print_report(&report, &report.diagnostics.actions, false);
    Ok(())
}

async fn run_status(
    store: &StateStore,
    engine: &DiagnosticEngine,
    config: &AppConfig,
    brief: bool,
) -> Result<(), String> {
    let dashboard = store.snapshot().await;
    let report = dashboard.report(engine);
    let actions = if brief {
        engine.next_actions(report.kpi.as_ref(), &dashboard.facts(), true)
    } else {
        report.diagnostics.actions.clone()
    };
    print_report(&report, &actions, brief);

    if !brief {
        let goal = dashboard.default_goal(config, today());
        println!(
            "\nGoal: {} more followers at {}/day -> {} days",
            format_number(goal.remaining as f64),
            format_float(goal.pace_per_day, 2),
            goal.days_to_target
        );
    }
    Ok(())
}

fn print_report(report: &DashboardReport, actions: &[String], brief: bool) {
    if let Some(kpi) = report.kpi.as_ref() {
        print_kpis(kpi);
    }

    if !brief {
        println!("\nDiagnostics:");
        for line in &report.diagnostics.statements {
            println!("- {}", line);
        }
    }

    println!("\nNext actions:");
    for action in actions {
        println!("- {}", action);
    }

    println!(
        "\nReadiness: {} / 100 ({})",
        report.diagnostics.readiness.score,
        report.diagnostics.readiness.tier.label()
    );
    println!(
        "Daily sprint: {}/{} complete",
        report.checklist.done, report.checklist.total
    );
}

fn print_kpis(kpi: &KpiSnapshot) {
    println!(
        "Impressions/day: {} ({})",
        format_number(kpi.impressions_per_day),
        format_signed(kpi.delta_impressions_per_day)
    );
    println!(
        "Engagement rate: {}% ({}pp)",
        format_float(kpi.engagement_rate, 2),
        format_signed(kpi.delta_engagement_rate)
    );
    println!(
        "Follow conversion: {} f/1k ({})",
        format_float(kpi.follow_conversion, 2),
        format_signed(kpi.delta_follow_conversion)
    );
    println!(
        "Net follows/day: {} | profile visits/day: {} | posts/day: {}",
        format_float(kpi.net_follows_per_day, 2),
        format_float(kpi.profile_visits_per_day, 1),
        format_float(kpi.posts_per_day, 1)
    );
}

fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<(), String> {
    let scorer = match args.pillars.as_deref() {
        Some(pillars) => DraftScorer::new(growth_desk::config::parse_list(pillars)),
        None => config.draft.scorer(),
    };
    let text = read_text(args.text)?;
    print_score(&scorer.score(&text));
    Ok(())
}

fn print_score(score: &DraftScore) {
    println!("Score: {} / 100 (grade {})", score.score, score.grade.label());
    for note in &score.notes {
        let marker = match note.kind {
            NoteKind::Credit => "+",
            NoteKind::Deficiency => "-",
        };
        println!("{} {}", marker, note.message);
    }
}

fn run_hook(args: HookArgs) -> Result<(), String> {
    let request = HookRequest {
        style: Some(args.style),
        objective: Some(args.objective),
    };
    let (style, objective) = request.parse()?;
    println!("{}", generate_hook(style, objective, &mut rand::thread_rng()));
    Ok(())
}

fn run_draft(args: DraftArgs, config: &AppConfig) -> Result<(), String> {
    if let Some(source) = args.source.as_deref() {
        if find_benchmark(source).is_none() {
            tracing::debug!(source, "source account is not a known benchmark");
        }
    }
    let parts = DraftParts {
        hook: args.hook,
        source_handle: args.source,
        signal: args.signal,
        insight: args.insight,
        close: args.close,
    };
    let draft = build_draft(&parts);
    println!("{}\n", draft);
    print_score(&config.draft.scorer().score(&draft));
    Ok(())
}

async fn run_log(store: &StateStore, args: LogArgs) -> Result<(), String> {
    let request = PostLogRequest {
        date: args.date,
        format: Some(args.format),
        pillar: Some(args.pillar),
        source_handle: args.source,
        impressions: Some(args.impressions),
        engagements: Some(args.engagements),
        follows: Some(args.follows),
        profile_visits: Some(args.profile_visits),
        note: args.note,
    };
    let entry = request.into_entry(today(), now_ms())?;
    let total = store
        .update(|dashboard| match dashboard.add_post_log(entry) {
            Ok(()) => (Ok(dashboard.post_logs.len()), true),
            Err(reason) => (Err(reason), false),
        })
        .await?
        .map_err(|reason| format!("post not logged: {}", reason))?;
    println!("Logged post ({} total).", total);
    Ok(())
}

async fn run_review(store: &StateStore) -> Result<(), String> {
    let dashboard = store.snapshot().await;
    if dashboard.post_logs.is_empty() {
        println!("No logs yet. Log at least 5 posts to unlock pattern insights.");
        return Ok(());
    }

    println!("Recent posts (date | format | pillar | f/1k | ER%):");
    for entry in dashboard.post_logs.recent(RECENT_LOG_LIMIT) {
        println!(
            "  {} | {} | {} | {} | {}",
            if entry.date.is_empty() { "-" } else { entry.date.as_str() },
            entry.format,
            entry.pillar,
            format_float(entry.follow_conversion(), 2),
            format_float(entry.engagement_rate(), 2)
        );
    }

    println!();
    for line in ReviewInsights::from_entries(dashboard.post_logs.entries()).lines() {
        println!("{}", line);
    }
    Ok(())
}

async fn run_study(store: &StateStore, engine: &DiagnosticEngine, config: &AppConfig) -> Result<(), String> {
    let kpi = store.snapshot().await.analysis().kpi;
    let pool = candidate_benchmarks(kpi.as_ref(), engine.thresholds());
    let picks = assign_study(&pool, config.study.sample_size, &mut rand::thread_rng());
    for (index, pick) in picks.iter().enumerate() {
        println!("{}\n", pick.describe(index));
    }
    Ok(())
}

async fn run_goal(store: &StateStore, config: &AppConfig, args: GoalArgs) -> Result<(), String> {
    let request = GoalRequest {
        current_followers: args.current,
        target_followers: args.target,
        target_date: args.by,
    };
    let input = request.into_input(&config.goal, today())?;
    let projection = store.snapshot().await.goal(&input, config);

    println!(
        "Remaining: {} followers at {} per day",
        format_number(projection.remaining as f64),
        format_float(projection.pace_per_day, 2)
    );
    match projection.projected_date {
        Some(date) => println!("Days to target: {} (around {})", projection.days_to_target, date),
        None => println!("Days to target: {}", projection.days_to_target),
    }
    if let Some(required) = projection.required_pace {
        println!("Required pace: {} per day", format_float(required, 2));
    }
    Ok(())
}

async fn run_check(store: &StateStore, args: CheckArgs) -> Result<(), String> {
    let checked = !args.undo;
    let id = args.id.clone();
    let known = store
        .update(|dashboard| {
            let known = dashboard.checklist.set(&id, checked);
            (known, known)
        })
        .await?;
    if !known {
        let ids: Vec<&str> = DAILY_TASKS.iter().map(|task| task.id).collect();
        return Err(format!("unknown task {} (expected one of {})", args.id, ids.join(", ")));
    }
    let progress = store.snapshot().await.checklist.progress();
    println!("{}/{} complete", progress.done, progress.total);
    Ok(())
}

async fn run_settings(store: &StateStore, args: SettingsArgs) -> Result<(), String> {
    store
        .update(|dashboard| {
            let mut changed = false;
            if let Some(objective) = args.objective {
                dashboard.objective = objective;
                changed = true;
            }
            if let Some(voice_rules) = args.voice_rules {
                dashboard.voice_rules = voice_rules;
                changed = true;
            }
            if let Some(intel_notes) = args.intel_notes {
                dashboard.intel_notes = intel_notes;
                changed = true;
            }
            ((), changed)
        })
        .await
}

async fn run_prompt(store: &StateStore, config: &AppConfig, args: PromptArgs) -> Result<(), String> {
    let request = PromptRequest {
        mode: Some(args.mode),
        draft: args.draft,
        signal: args.signal,
    };
    let mode = request.mode()?;
    let payload = store.snapshot().await.prompt(
        mode,
        request.draft.as_deref().unwrap_or_default(),
        request.signal.as_deref().unwrap_or_default(),
        config,
    );
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|err| format!("failed to serialize prompt: {}", err))?;
    println!("{}", json);
    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    Ok(buffer)
}

fn init_tracing(level: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| format!("invalid log level: {}", err))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0)
}
