//! DSA Dashboard CLI - Command-line interface for the problems repository
//!
//! Prints the problem tree, inspects single files and edits the progress statistics

use clap::{Parser, Subcommand};
use dsadash_core::{
    config_error, init_logging, log_operation_error, log_operation_start, validation_error,
    DashConfig, DashError, DashResult, Difficulty, ErrorContext, LoggingConfig, ProblemDetail,
    StatisticsDocument, TreeNode,
};
use dsadash_repo::RepositoryProcessor;
use dsadash_stats::StatisticsService;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "dsadash")]
#[command(about = "Browse DSA problem notes and track solving progress")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Problems directory (overrides the configuration)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Statistics file (overrides the configuration)
    #[arg(long, global = true)]
    statistics: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the repository tree
    Tree {
        /// Print the tree as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },

    /// Show a file's inferred metadata
    Show {
        /// Absolute path or path relative to the problems directory
        file: String,

        /// Also print the file content
        #[arg(long)]
        content: bool,
    },

    /// List every markdown file
    Problems,

    /// Inspect or edit the progress statistics
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Set a configuration value (key=value format)
        #[arg(long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(long)]
        get: Option<String>,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Subcommand)]
enum StatsAction {
    /// Print the statistics summary
    Show {
        /// Print the raw document
        #[arg(long)]
        json: bool,
    },

    /// Mark a tracked problem as solved (or unsolved)
    Mark {
        topic: String,
        problem: String,

        /// Mark as unsolved instead
        #[arg(long)]
        unsolved: bool,
    },

    /// Start tracking a problem
    Add {
        topic: String,
        problem: String,

        /// Easy, Medium or Hard
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Already solved
        #[arg(long)]
        solved: bool,
    },
}

#[tokio::main]
async fn main() -> DashResult<()> {
    let cli = Cli::parse();

    // Keep stdout for command output unless asked for more
    let mut logging_config = LoggingConfig {
        level: "warn".to_string(),
        filter_directives: Vec::new(),
        ..LoggingConfig::default()
    };
    if cli.verbose {
        logging_config = logging_config.verbose();
    }

    init_logging(&logging_config).map_err(|e| DashError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting dsadash CLI v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(root) = cli.root {
        config.repository.root = root;
    }
    if let Some(statistics) = cli.statistics {
        config.storage.statistics_path = statistics;
    }

    let result = match cli.command {
        Commands::Tree { json } => handle_tree(&config, json),
        Commands::Show { file, content } => handle_show(&config, &file, content),
        Commands::Problems => handle_problems(&config),
        Commands::Stats { action } => handle_stats(&config, action).await,
        Commands::Config {
            show,
            init,
            set,
            get,
            validate,
        } => handle_config(cli.config.as_ref(), show, init, set, get, validate),
    };

    if let Err(e) = &result {
        e.log();
    }
    result
}

fn load_config(config_path: Option<&PathBuf>) -> DashResult<DashConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return DashConfig::from_file(path);
    }

    for path in default_config_paths() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return DashConfig::from_file(&path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(DashConfig::default())
}

/// Candidate configuration files, most specific first
fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|d| d.join("dsadash").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".dsadash").join("config.toml")),
        Some(PathBuf::from("dsadash.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn handle_tree(config: &DashConfig, json: bool) -> DashResult<()> {
    log_operation_start!("tree", root = %config.repository.root.display());
    let processor = RepositoryProcessor::from_config(&config.repository);

    let tree = match processor.build_tree() {
        Ok(tree) => tree,
        Err(e) => {
            log_operation_error!("tree", e);
            return Err(e);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render_tree(&tree));
        println!("\n{} files", tree.file_count());
    }
    Ok(())
}

fn handle_show(config: &DashConfig, file: &str, content: bool) -> DashResult<()> {
    let processor = RepositoryProcessor::from_config(&config.repository);
    let file = processor.file_with_metadata(file)?;

    println!("Path:       {}", file.path.display());
    match &file.metadata {
        Some(metadata) => {
            println!("Title:      {}", metadata.title);
            println!(
                "Difficulty: {}",
                metadata
                    .difficulty
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("Solved:     {}", if metadata.is_solved { "yes" } else { "no" });
            if !metadata.tags.is_empty() {
                println!("Tags:       {}", metadata.tags.join(", "));
            }
        }
        None => println!("(not a markdown file, no metadata)"),
    }

    if content {
        println!("\n{}", file.content);
    }
    Ok(())
}

fn handle_problems(config: &DashConfig) -> DashResult<()> {
    let processor = RepositoryProcessor::from_config(&config.repository);
    let files = processor.list_markdown_files()?;

    for file in &files {
        println!("{}", file.relative_path);
    }
    println!("\n{} markdown files", files.len());
    Ok(())
}

async fn handle_stats(config: &DashConfig, action: StatsAction) -> DashResult<()> {
    let service = StatisticsService::from_config(&config.storage);

    match action {
        StatsAction::Show { json } => match service.load().await? {
            Some(document) if json => println!("{}", serde_json::to_string_pretty(&document)?),
            Some(document) => print!("{}", render_summary(&document)),
            None => println!(
                "No statistics recorded yet at {}",
                config.storage.statistics_path.display()
            ),
        },
        StatsAction::Mark {
            topic,
            problem,
            unsolved,
        } => {
            let solved = !unsolved;
            match service.update_problem_status(&topic, &problem, solved).await? {
                Some(document) => {
                    let tracked = document
                        .problem_details
                        .get(&topic)
                        .and_then(|details| details.iter().find(|d| d.name == problem));
                    match tracked {
                        Some(detail) => println!(
                            "{} / {} is {}",
                            topic,
                            problem,
                            if detail.solved { "solved" } else { "unsolved" }
                        ),
                        None => println!("{} / {} is not tracked; nothing changed", topic, problem),
                    }
                    println!(
                        "Solved {} of {}",
                        document.solved_problems, document.total_problems
                    );
                }
                None => println!("No statistics recorded yet; add a problem first"),
            }
        }
        StatsAction::Add {
            topic,
            problem,
            difficulty,
            solved,
        } => {
            let difficulty = match difficulty {
                Some(label) => label
                    .parse::<Difficulty>()
                    .map_err(|e| validation_error!(e, "difficulty", "cli"))?,
                None => Difficulty::Unknown,
            };
            let document = service
                .add_problem(&topic, ProblemDetail::new(problem.clone(), solved, difficulty))
                .await?;
            println!(
                "Added {} / {} ({}); tracking {} problems",
                topic, problem, difficulty, document.total_problems
            );
        }
    }
    Ok(())
}

fn handle_config(
    config_path: Option<&PathBuf>,
    show: bool,
    init: bool,
    set: Option<String>,
    get: Option<String>,
    validate: bool,
) -> DashResult<()> {
    if init {
        let path = match config_path {
            Some(path) => path.clone(),
            None => get_config_path()?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        DashConfig::default().save_to_file(&path)?;
        println!("Configuration initialized at: {:?}", path);
    }

    if show {
        let config = load_config(config_path)?;
        let text = toml::to_string_pretty(&config)
            .map_err(|e| config_error!(format!("Failed to render configuration: {}", e), "cli"))?;
        println!("{}", text);
    }

    if validate {
        let config = load_config(config_path)?;
        match config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => {
                println!("Configuration validation failed: {}", e);
                return Err(e);
            }
        }
    }

    if let Some(key_value) = set {
        let Some((key, value)) = key_value.split_once('=') else {
            return Err(DashError::Config {
                message: "Invalid format. Use key=value format".to_string(),
                source: None,
                context: ErrorContext::new("config_set")
                    .with_suggestion("Example: --set server.port=3001"),
            });
        };

        let path = match config_path {
            Some(path) => path.clone(),
            None => get_config_path()?,
        };
        let mut config = if path.exists() {
            DashConfig::from_file(&path)?
        } else {
            DashConfig::default()
        };
        set_config_value(&mut config, key.trim(), value.trim())?;
        config.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        config.save_to_file(&path)?;
        println!("Set {} = {}", key.trim(), value.trim());
    }

    if let Some(key) = get {
        let config = load_config(config_path)?;
        println!("{} = {}", key, get_config_value(&config, &key)?);
    }

    Ok(())
}

/// Get the default configuration file path
fn get_config_path() -> DashResult<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
        .map(|dir| dir.join("dsadash").join("config.toml"))
        .ok_or_else(|| config_error!("Cannot determine a configuration directory", "cli"))
}

fn set_config_value(config: &mut DashConfig, key: &str, value: &str) -> DashResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["repository", "root"] => config.repository.root = PathBuf::from(value),
        ["repository", "markdown_extension"] => {
            config.repository.markdown_extension = value.to_string()
        }
        ["repository", "prune_empty_dirs"] => {
            config.repository.prune_empty_dirs = parse_value(key, value, "boolean")?
        }
        ["repository", "ignored_names"] => {
            config.repository.ignored_names = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        }
        ["storage", "statistics_path"] => config.storage.statistics_path = PathBuf::from(value),
        ["server", "host"] => config.server.host = value.to_string(),
        ["server", "port"] => config.server.port = parse_value(key, value, "port")?,
        _ => {
            return Err(DashError::Config {
                message: format!("Unknown configuration key: {}", key),
                source: None,
                context: ErrorContext::new("config_set")
                    .with_suggestion("Use --show to see available configuration keys"),
            });
        }
    }
    Ok(())
}

fn get_config_value(config: &DashConfig, key: &str) -> DashResult<String> {
    let parts: Vec<&str> = key.split('.').collect();
    let value = match parts.as_slice() {
        ["repository", "root"] => config.repository.root.display().to_string(),
        ["repository", "markdown_extension"] => config.repository.markdown_extension.clone(),
        ["repository", "prune_empty_dirs"] => config.repository.prune_empty_dirs.to_string(),
        ["repository", "ignored_names"] => config.repository.ignored_names.join(","),
        ["storage", "statistics_path"] => config.storage.statistics_path.display().to_string(),
        ["server", "host"] => config.server.host.clone(),
        ["server", "port"] => config.server.port.to_string(),
        _ => {
            return Err(DashError::Config {
                message: format!("Unknown configuration key: {}", key),
                source: None,
                context: ErrorContext::new("config_get")
                    .with_suggestion("Use --show to see available configuration keys"),
            });
        }
    };
    Ok(value)
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> DashResult<T> {
    value.parse().map_err(|_| DashError::Config {
        message: format!("Invalid {} value for {}: {}", kind, key, value),
        source: None,
        context: ErrorContext::new("config_set"),
    })
}

/// Outline of the tree, one entry per line, with a status column for problem files
fn render_tree(root: &TreeNode) -> String {
    let mut lines = vec![format!("{}/", root.name())];
    let children = root.children();
    for (i, child) in children.iter().enumerate() {
        render_node(child, "", i + 1 == children.len(), &mut lines);
    }
    finish_lines(lines)
}

fn render_node(node: &TreeNode, prefix: &str, last: bool, lines: &mut Vec<String>) {
    let branch = if last { "└── " } else { "├── " };
    match node {
        TreeNode::Directory(dir) => {
            lines.push(format!("{}{}{}/", prefix, branch, dir.name));
            let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
            for (i, child) in dir.children.iter().enumerate() {
                render_node(child, &nested, i + 1 == dir.children.len(), lines);
            }
        }
        TreeNode::File(file) => {
            let status = match &file.metadata {
                Some(metadata) => match metadata.difficulty {
                    Some(difficulty) => format!(
                        "  [{}] {}",
                        if metadata.is_solved { "x" } else { " " },
                        difficulty
                    ),
                    None => String::new(),
                },
                None => String::new(),
            };
            lines.push(format!("{}{}{}{}", prefix, branch, file.name, status));
        }
    }
}

fn render_summary(document: &StatisticsDocument) -> String {
    let mut lines = vec![format!(
        "Solved {} of {} problems",
        document.solved_problems, document.total_problems
    )];

    if !document.topic_stats.is_empty() {
        lines.push(String::new());
        lines.push("Topics:".to_string());
        lines.extend(document.topic_stats.iter().map(|stat| {
            format!("  {:<28} {:>3} / {:<3}", stat.name, stat.solved, stat.total)
        }));
    }

    if !document.difficulty_stats.is_empty() {
        lines.push(String::new());
        lines.push("Difficulty:".to_string());
        lines.extend(
            document
                .difficulty_stats
                .iter()
                .map(|(label, count)| format!("  {:<28} {:>3}", label, count)),
        );
    }

    if let Some(updated) = &document.last_updated {
        lines.push(String::new());
        lines.push(format!("Last updated {}", updated));
    }
    finish_lines(lines)
}

/// One line per entry, newline-terminated
fn finish_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
