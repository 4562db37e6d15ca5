//! CLI entry point for the documentation link resolver.
//!
//! Provides commands for initializing configuration, inspecting the
//! declaration index, resolving single queries and serving links over HTTP.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use doclink::io::{ExitCode, JsonResponse, OutputFormat};
use doclink::{
    ArtifactWalker, DeclarationIndex, IndexBuilder, IndexError, LinkResolver, Settings,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Documentation link resolver
#[derive(Parser)]
#[command(
    name = "doclink",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve API identifiers to documentation links",
    long_about = "Index compiled API classes and resolve short identifiers such as \
                  'sayHello', 'Foo.Bar' or 'Foo#bar type=property' to documentation URLs.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize project
    #[command(about = "Set up .doclink directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .doclink/settings.toml")]
    Config,

    /// Build the declaration index and report what it contains
    #[command(about = "Build the declaration index and print its statistics")]
    Index {
        /// Number of threads decoding metadata
        #[arg(short, long)]
        threads: Option<usize>,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve one query
    #[command(
        about = "Resolve a query to a documentation link",
        after_help = "Examples:\n  doclink resolve sayHello\n  doclink resolve Foo.Bar\n  doclink resolve Foo#bar type=property"
    )]
    Resolve {
        /// Identifier followed by optional key=value flags
        #[arg(num_args = 1.., required = true)]
        query: Vec<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP link server
    #[command(about = "Serve documentation links over HTTP")]
    Serve {
        /// Address to bind, overrides server.bind
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Commands::Init { force } = &cli.command {
        let workspace = std::env::current_dir().unwrap_or_default();
        match Settings::init_config_file(&workspace, *force) {
            Ok(path) => {
                println!("Created configuration file at: {}", path.display());
                println!("Edit this file to customize your settings.");
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(ExitCode::ConfigError.into());
            }
        }
        return;
    }

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Settings::load_from(config_path).unwrap_or_else(|e| {
            eprintln!(
                "Configuration error loading from {}: {}",
                config_path.display(),
                e
            );
            std::process::exit(ExitCode::ConfigError.into());
        })
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            eprintln!("Using default configuration.");
            Settings::default()
        })
    };

    init_tracing(cli.verbose || config.debug);

    match cli.command {
        Commands::Init { .. } => {
            // Already handled above
            unreachable!()
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            match toml::to_string_pretty(&config) {
                Ok(toml_str) => println!("{toml_str}"),
                Err(e) => eprintln!("Error displaying config: {e}"),
            }
        }

        Commands::Index { threads, json } => {
            if let Some(threads) = threads {
                config.index.parallel_threads = threads;
            }
            let index = build_index_or_exit(&config, OutputFormat::from_json_flag(json));
            if json {
                print_json(&JsonResponse::success(index.stats()));
            } else {
                index.stats().display();
            }
        }

        Commands::Resolve { query, json } => {
            let format = OutputFormat::from_json_flag(json);
            let index = build_index_or_exit(&config, format);
            let resolver = LinkResolver::new(Arc::new(index), config.link_builder());

            match resolver.resolve_identifier(&query.join(" ")) {
                Ok(link) => {
                    if format.is_json() {
                        print_json(&JsonResponse::success(&link));
                    } else {
                        println!("{}", link.label);
                        println!("{}", link.url);
                    }
                }
                Err(e) => {
                    if format.is_json() {
                        print_json(&JsonResponse::from_resolution_error(&e));
                    } else {
                        eprintln!("Error: {e}");
                        for suggestion in e.recovery_suggestions() {
                            eprintln!("  - {suggestion}");
                        }
                    }
                    std::process::exit(ExitCode::from_resolution_error(&e).into());
                }
            }
        }

        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let index = build_index_or_exit(&config, OutputFormat::Text);
            let resolver = Arc::new(LinkResolver::new(Arc::new(index), config.link_builder()));

            if let Err(e) = serve(resolver, &bind).await {
                eprintln!("Server error: {e:#}");
                std::process::exit(ExitCode::GeneralError.into());
            }
        }
    }
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_index(config: &Settings) -> Result<DeclarationIndex, IndexError> {
    let source = ArtifactWalker::new(config.artifact_roots());
    IndexBuilder::new(config.package_filter())
        .with_threads(config.index.parallel_threads)
        .build(&source)
}

/// Build the index, exiting with the index error's code when the artifacts
/// cannot be scanned
fn build_index_or_exit(config: &Settings, format: OutputFormat) -> DeclarationIndex {
    build_index(config).unwrap_or_else(|e| {
        if format.is_json() {
            print_json(&JsonResponse::from_error(&e));
        } else {
            eprintln!("Error: {e}");
            for suggestion in e.recovery_suggestions() {
                eprintln!("  - {suggestion}");
            }
        }
        std::process::exit(ExitCode::from_error(&e).into());
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing output: {e}"),
    }
}

#[cfg(feature = "http-server")]
async fn serve(resolver: Arc<LinkResolver>, bind: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    doclink::server::serve_http(resolver, bind)
        .await
        .with_context(|| format!("link server on {bind}"))
}

#[cfg(not(feature = "http-server"))]
async fn serve(_resolver: Arc<LinkResolver>, _bind: &str) -> anyhow::Result<()> {
    anyhow::bail!("HTTP server support is not compiled in. Rebuild with: cargo build --features http-server")
}
