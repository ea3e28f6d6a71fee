use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::engine::{Engine, EngineOptions};
use crate::ui::UiConfig;

#[derive(Debug, Parser)]
#[command(
    name = "sitediet",
    version,
    about = "Analyze a Lighthouse report and generate prioritized, templated fixes"
)]
pub struct Cli {
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub quiet: bool,
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Analyze(AnalyzeArgs),
    Fixes(FixesArgs),
    Init(InitArgs),
    Completion(CompletionArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    pub report: Option<PathBuf>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub min_score: Option<f64>,
    #[arg(long, value_enum, default_value = "markdown")]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct FixesArgs {
    pub report: Option<PathBuf>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let stdout_is_tty = io::stdout().is_terminal();
    let stderr_is_tty = io::stderr().is_terminal();

    let home_dir = effective_home_dir()?;

    let env_config_path = std::env::var_os("SITEDIET_CONFIG").map(PathBuf::from);
    let cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        &home_dir,
    )
    .map_err(crate::exit::invalid_args_err)?;

    let color = stdout_is_tty && cfg.ui.color && !cli.no_color;

    let ui_cfg = UiConfig {
        color,
        stdout_is_tty,
        stderr_is_tty,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Analyze(args) => {
            let category = validate_category(args.category.as_deref())?;
            let min_score = match args.min_score {
                Some(value) => crate::config::validate_min_score(value)
                    .map_err(crate::exit::invalid_args_err)?,
                None => cfg.analyze.min_score,
            };
            let json = args.output == OutputFormat::Json;

            let engine = Engine::new(EngineOptions {
                min_score,
                show_progress: ui_cfg.stderr_is_tty && !cli.quiet && !json,
            });

            let report_path =
                crate::loader::resolve_report_path(args.report.as_deref(), Path::new(&cfg.reports.dir))?;
            let report = crate::loader::load(&report_path)?;
            let doc = engine.analyze(&report, category);

            match args.output {
                OutputFormat::Json => crate::report::write_json(&doc)?,
                OutputFormat::Markdown => {
                    if ui_cfg.stdout_is_tty {
                        crate::ui::print_analysis(&doc, &ui_cfg);
                    } else {
                        crate::report::write_stdout(&crate::report::render_analysis_markdown(
                            &doc,
                        ))?;
                    }
                }
            }
        }
        Commands::Fixes(args) => {
            let category = validate_category(args.category.as_deref())?;

            let engine = Engine::new(EngineOptions {
                min_score: cfg.analyze.min_score,
                show_progress: ui_cfg.stderr_is_tty && !cli.quiet,
            });

            let report_path =
                crate::loader::resolve_report_path(args.report.as_deref(), Path::new(&cfg.reports.dir))?;
            let report = crate::loader::load(&report_path)?;
            let doc = engine.fixes(&report, category);
            let markdown = crate::report::render_fix_doc_markdown(&doc);

            // console first; the save may still fail independently
            crate::ui::print_fixes_summary(&doc, &ui_cfg);

            let out_path = match args.out {
                Some(path) => path,
                None => default_fixes_path(Path::new(&cfg.fixes.output_dir)),
            };
            crate::report::save_markdown(&out_path, &markdown)?;
            if !ui_cfg.quiet {
                println!("Saved: {}", out_path.display());
            }
        }
        Commands::Init(args) => {
            init_workspace(&cfg, &home_dir, args.force, &ui_cfg)?;
        }
        Commands::Completion(args) => {
            let shell = parse_shell(&args.shell)?;
            let mut cmd = Cli::command();
            let mut out = std::io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "sitediet", &mut out);
        }
        Commands::Config(args) => {
            if args.show {
                println!("{}", toml::to_string_pretty(&cfg)?);
            } else if !ui_cfg.quiet {
                eprintln!("config: use `sitediet config --show`");
            }
        }
    }

    Ok(())
}

fn effective_home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| crate::exit::invalid_args("HOME is not set"))
}

fn validate_category(category: Option<&str>) -> Result<Option<&str>> {
    let Some(category) = category else {
        return Ok(None);
    };
    if crate::core::CATEGORY_ORDER.contains(&category) {
        Ok(Some(category))
    } else {
        Err(crate::exit::invalid_args(format!(
            "unknown category: {category} (expected performance|accessibility|seo|best-practices)"
        )))
    }
}

fn default_fixes_path(output_dir: &Path) -> PathBuf {
    let date_format = time::macros::format_description!("[year]-[month]-[day]");
    let date = time::OffsetDateTime::now_utc()
        .format(&date_format)
        .unwrap_or_else(|_| "undated".to_string());
    output_dir.join(format!("fixes-{date}.md"))
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sitediet configuration

[ui]
color = true

[analyze]
min_score = 0.5

[reports]
dir = ".lighthouse/reports"

[fixes]
output_dir = ".lighthouse/fixes"
"#;

fn init_workspace(
    cfg: &crate::config::EffectiveConfig,
    home_dir: &Path,
    force: bool,
    ui_cfg: &UiConfig,
) -> Result<()> {
    let create = |dir: &Path| -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))
            .map_err(crate::exit::write_failed_err)
    };
    create(Path::new(&cfg.reports.dir))?;
    create(Path::new(&cfg.fixes.output_dir))?;

    let config_path = crate::config::default_config_path(home_dir);
    if config_path.exists() && !force {
        if !ui_cfg.quiet {
            println!(
                "config already exists: {} (use --force to overwrite)",
                config_path.display()
            );
        }
    } else {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))
                .map_err(crate::exit::write_failed_err)?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
            .with_context(|| format!("failed to write {}", config_path.display()))
            .map_err(crate::exit::write_failed_err)?;
        if !ui_cfg.quiet {
            println!("Wrote: {}", config_path.display());
        }
    }

    if !ui_cfg.quiet {
        println!("Ready: {} and {}", cfg.reports.dir, cfg.fixes.output_dir);
    }
    Ok(())
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        "fish" => Ok(clap_complete::Shell::Fish),
        other => Err(crate::exit::invalid_args(format!(
            "unsupported shell: {other} (expected bash|zsh|fish)"
        ))),
    }
}
