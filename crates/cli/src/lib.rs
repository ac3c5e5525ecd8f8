mod intern;
mod render;
mod serve;

use clap::{Parser, Subcommand};
use pagebundle_core::config::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pagebundle",
    version,
    about = "Per-page asset deduplication and a content-addressed inline asset cache",
    long_about = "pagebundle collects stylesheets and scripts contributed by the parts of a page, \
                  renders each once in a stable order, and serves inline snippets as cacheable \
                  resources with conditional GET."
)]
pub struct Cli {
    /// JSON settings file. Falls back to $PAGEBUNDLE_CONFIG, then defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip inline normalization
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit provenance comments
    #[arg(long, global = true)]
    pub diagnostics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve interned inline content over HTTP
    Serve {
        /// Address to bind, overriding the settings file
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
        /// URL area segment, overriding the settings file
        #[arg(long)]
        area: Option<String>,
        /// Inline <script> markup to serve from startup (repeatable)
        #[arg(long = "script", value_name = "FILE")]
        scripts: Vec<PathBuf>,
        /// Inline <style> markup to serve from startup (repeatable)
        #[arg(long = "style", value_name = "FILE")]
        styles: Vec<PathBuf>,
    },
    /// Intern an inline snippet and print its reference id and link
    Intern {
        /// File holding the raw <script> or <style> markup
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Treat the snippet as a stylesheet
        #[arg(long)]
        style: bool,
    },
    /// Render the asset zones of a page built from the given paths
    Render {
        /// Stylesheet path or bundle (repeatable)
        #[arg(long = "style", value_name = "PATH")]
        styles: Vec<String>,
        /// Head script path or bundle (repeatable)
        #[arg(long = "head", value_name = "PATH")]
        head_scripts: Vec<String>,
        /// Body script path or bundle (repeatable)
        #[arg(long = "body", value_name = "PATH")]
        body_scripts: Vec<String>,
    },
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let mut settings = Settings::load(path)?;
                settings.apply_env_overrides(|key| std::env::var(key).ok());
                settings
            }
            None => Settings::from_env_or_default()?,
        };
        if self.debug {
            settings.debug = true;
        }
        if self.diagnostics {
            settings.diagnostics = true;
        }
        Ok(settings)
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Serve { .. } => "serve",
        _ => "cli",
    };
    let _guard =
        pagebundle_core::logging::init_logging(component, matches!(cli.command, Commands::Serve { .. }));

    let settings = cli.settings()?;

    match cli.command {
        Commands::Serve {
            bind,
            area,
            scripts,
            styles,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve::run(settings, bind, area, &scripts, &styles))
        }
        Commands::Intern { file, style } => intern::run(&settings, &file, style),
        Commands::Render {
            styles,
            head_scripts,
            body_scripts,
        } => render::run(&settings, &styles, &head_scripts, &body_scripts),
    }
}
