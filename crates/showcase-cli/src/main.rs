use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use showcase_cli::{
    config::{LOG_ENV, RuntimeConfig, clamp_page_size},
    error::{
        AppError, ERROR_CODE_RUNTIME_SERIALIZE, ERROR_CODE_USER_INVALID_INPUT,
        ERROR_CODE_USER_MISSING_PROJECTS, ERROR_CODE_USER_OUTPUT_MODE_CONFLICT,
    },
    feedback::{self, Feedback, Item},
    output_contract::{
        OutputMode, error_envelope, redact_sensitive, select_output_mode, success_envelope,
    },
    source::{ContributorApi, GithubContributors, ProjectSource},
};
use showcase_core::{BookmarkSet, ProjectVisibilityEngine, ShowcaseState, SortOrder};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Project showcase search CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter, sort and page project cards.
    Search(SearchArgs),
    /// List categories with project counts.
    Categories {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List repository contributors from GitHub.
    Contributors {
        /// Repository slug (`owner/name`); falls back to SHOWCASE_REPO.
        #[arg(long)]
        repo: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Path or http(s) URL of projects.json; falls back to SHOWCASE_PROJECTS.
    #[arg(long)]
    projects: Option<String>,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Explicit output mode (`human`, `json`, `alfred-json`).
    #[arg(long, value_enum)]
    output: Option<OutputModeArg>,
    /// Shorthand for `--output json`.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Free-text query over title, description and tech.
    #[arg(long, short, default_value = "")]
    query: String,
    /// Category filter; `all` disables it.
    #[arg(long, short, default_value = "all")]
    category: String,
    /// Required tech tag; repeat to require several.
    #[arg(long = "tech")]
    tech: Vec<String>,
    /// Sort order (`default`, `title-asc`, `title-desc`, `category`).
    #[arg(long, default_value = "default")]
    sort: String,
    /// 1-based page number; out-of-range pages are clamped.
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Cards per page; overrides SHOWCASE_PAGE_SIZE.
    #[arg(long)]
    page_size: Option<usize>,
    /// Bookmarked project title; repeatable.
    #[arg(long = "bookmark")]
    bookmarks: Vec<String>,
    /// Show only bookmarked projects.
    #[arg(long)]
    bookmarked: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputModeArg {
    Human,
    Json,
    AlfredJson,
}

impl From<OutputModeArg> for OutputMode {
    fn from(value: OutputModeArg) -> Self {
        match value {
            OutputModeArg::Human => OutputMode::Human,
            OutputModeArg::Json => OutputMode::Json,
            OutputModeArg::AlfredJson => OutputMode::AlfredJson,
        }
    }
}

impl OutputArgs {
    fn hint(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            self.output.map(Into::into).unwrap_or(OutputMode::AlfredJson)
        }
    }

    fn select(&self) -> Result<OutputMode, AppError> {
        select_output_mode(self.output.map(Into::into), self.json, OutputMode::AlfredJson)
            .map_err(|error| {
                AppError::user(ERROR_CODE_USER_OUTPUT_MODE_CONFLICT, error.to_string())
            })
    }
}

impl Cli {
    fn command_name(&self) -> &'static str {
        match &self.command {
            Commands::Search(_) => "showcase.search",
            Commands::Categories { .. } => "showcase.categories",
            Commands::Contributors { .. } => "showcase.contributors",
        }
    }

    fn output_mode_hint(&self) -> OutputMode {
        match &self.command {
            Commands::Search(args) => args.output.hint(),
            Commands::Categories { output, .. } | Commands::Contributors { output, .. } => {
                output.hint()
            }
        }
    }
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let command = cli.command_name();
    let output_mode = cli.output_mode_hint();

    match run(cli) {
        Ok(stdout) => {
            println!("{stdout}");
        }
        Err(err) => {
            emit_error(command, output_mode, &err);
            std::process::exit(err.exit_code());
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<String, AppError> {
    let config = RuntimeConfig::from_env()?;
    run_with(cli, &config, &GithubContributors)
}

fn run_with<C>(cli: Cli, config: &RuntimeConfig, contributors: &C) -> Result<String, AppError>
where
    C: ContributorApi,
{
    let command = cli.command_name();
    match cli.command {
        Commands::Search(args) => run_search(command, args, config),
        Commands::Categories { source, output } => {
            run_categories(command, &source, &output, config)
        }
        Commands::Contributors { repo, output } => {
            run_contributors(command, repo.as_deref(), &output, config, contributors)
        }
    }
}

fn run_search(
    command: &str,
    args: SearchArgs,
    config: &RuntimeConfig,
) -> Result<String, AppError> {
    let output_mode = args.output.select()?;
    let sort = SortOrder::parse(&args.sort).ok_or_else(|| {
        AppError::user(
            ERROR_CODE_USER_INVALID_INPUT,
            format!("unknown sort order: {}", args.sort),
        )
    })?;

    let projects = load_projects(&args.source, config)?;
    let page_size = args.page_size.map_or(config.page_size, clamp_page_size);

    let mut bookmarks = BookmarkSet::new();
    for title in &args.bookmarks {
        if !bookmarks.contains(title) {
            bookmarks.toggle(title);
        }
    }
    let mut state = ShowcaseState::new(projects)
        .with_page_size(page_size)
        .with_bookmarks(bookmarks);
    state.set_search_query(args.query.as_str());
    state.set_category(args.category.as_str());
    state.set_tech_tags(args.tech.iter().map(String::as_str));
    state.set_bookmarked_only(args.bookmarked);
    state.set_sort_order(sort);
    state.go_to_page(args.page);

    let view = state.current_page();
    match output_mode {
        OutputMode::AlfredJson => {
            serialize_feedback(&feedback::page_to_feedback(&view, state.bookmarks()))
        }
        OutputMode::Json => {
            let result = json!({
                "query": state.engine().search_query(),
                "category": state.engine().category(),
                "tech": state.engine().tech_tags(),
                "sort": state.sort_order().as_str(),
                "page": view.page,
                "page_size": state.page_size(),
                "total_pages": view.total_pages,
                "total_items": view.total_items,
                "has_previous": view.has_previous,
                "has_next": view.has_next,
                "bookmarks": state.bookmarks().titles(),
                "projects": view.projects,
            });
            Ok(success_envelope(command, result).to_string())
        }
        OutputMode::Human => Ok(feedback::render_page_human(&view, state.bookmarks())),
    }
}

fn run_categories(
    command: &str,
    source: &SourceArgs,
    output: &OutputArgs,
    config: &RuntimeConfig,
) -> Result<String, AppError> {
    let output_mode = output.select()?;
    let mut engine = ProjectVisibilityEngine::new(load_projects(source, config)?);
    let total = engine.all_projects().len();

    let mut counts = Vec::new();
    for category in engine.categories() {
        engine.set_category(category.as_str());
        let visible = engine.visible_projects().len();
        counts.push((category, visible));
    }

    match output_mode {
        OutputMode::AlfredJson => {
            serialize_feedback(&feedback::categories_to_feedback(total, &counts))
        }
        OutputMode::Json => {
            let categories: Vec<Value> = counts
                .iter()
                .map(|(name, count)| json!({"name": name, "count": count}))
                .collect();
            let result = json!({"total_items": total, "categories": categories});
            Ok(success_envelope(command, result).to_string())
        }
        OutputMode::Human => Ok(feedback::render_categories_human(total, &counts)),
    }
}

fn run_contributors<C>(
    command: &str,
    repo: Option<&str>,
    output: &OutputArgs,
    config: &RuntimeConfig,
    api: &C,
) -> Result<String, AppError>
where
    C: ContributorApi,
{
    let output_mode = output.select()?;
    let repo = repo
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or(config.repo.as_deref())
        .ok_or_else(|| {
            AppError::user(
                ERROR_CODE_USER_INVALID_INPUT,
                "missing repository: pass --repo owner/name or set SHOWCASE_REPO",
            )
        })?;

    let contributors = api.contributors(repo, config.timeout_secs)?;
    match output_mode {
        OutputMode::AlfredJson => {
            serialize_feedback(&feedback::contributors_to_feedback(&contributors))
        }
        OutputMode::Json => Ok(success_envelope(
            command,
            json!({"repo": repo, "contributors": contributors}),
        )
        .to_string()),
        OutputMode::Human => Ok(feedback::render_contributors_human(&contributors)),
    }
}

fn load_projects(
    source: &SourceArgs,
    config: &RuntimeConfig,
) -> Result<Vec<showcase_core::ProjectRecord>, AppError> {
    let raw = source
        .projects
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or(config.projects_source.as_deref())
        .ok_or_else(|| {
            AppError::user(
                ERROR_CODE_USER_MISSING_PROJECTS,
                "missing project source: pass --projects or set SHOWCASE_PROJECTS",
            )
        })?;

    let report = ProjectSource::parse(raw).load(config.timeout_secs)?;
    Ok(report.projects)
}

fn serialize_feedback(feedback: &Feedback) -> Result<String, AppError> {
    feedback.to_json().map_err(|error| {
        AppError::runtime(
            ERROR_CODE_RUNTIME_SERIALIZE,
            format!("failed to serialize Alfred feedback: {error}"),
        )
    })
}

fn emit_error(command: &str, output_mode: OutputMode, error: &AppError) {
    match output_mode {
        OutputMode::Json => {
            let envelope = error_envelope(
                command,
                error.code,
                &error.message,
                error.kind.as_str(),
                error.exit_code(),
            );
            println!("{envelope}");
        }
        OutputMode::AlfredJson => {
            let payload = Feedback::new(vec![
                Item::new(format!("Error [{}]", error.code))
                    .with_subtitle(redact_sensitive(&error.message))
                    .with_valid(false),
            ]);
            match payload.to_json() {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("error[{}]", error.code),
            }
        }
        OutputMode::Human => {
            eprintln!("error[{}]: {}", error.code, redact_sensitive(&error.message));
        }
    }
}
