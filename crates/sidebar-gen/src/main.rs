//! sidebar-gen: Keeps a docs site's sidebar.json in step with its Markdown files.

use anyhow::Result;
use clap::Parser;
use serde_json::{Map, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sidebar_gen::plugin::SidebarPlugin;
use sidebar_gen::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging - respects RUST_LOG env var, defaults to info (or debug with --verbose).
    // Logs go to stderr so `generate --print` output can be piped.
    let default_filter = if cli.verbose {
        "debug,sidebar_gen=debug,sidebar_core=debug"
    } else {
        "info,sidebar_gen=info,sidebar_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.resolve_config()?;
    info!("Docs directory: {}", config.docs_dir.display());
    info!("Sidebar file: {}", config.sidebar_file.display());
    if config.include_dirs.is_empty() {
        info!("No include directories configured, the generated sidebar will be empty");
    }

    let plugin = SidebarPlugin::new(config);

    match cli.command {
        Command::Generate { print } => {
            let sidebar = plugin.synthesizer().synthesize();
            if print {
                println!("{}", serde_json::to_string_pretty(&sidebar)?);
            }
        }
        Command::Watch => {
            let mut site_config = Value::Object(Map::new());
            plugin.resolve_config(&mut site_config);
            let sections = site_config["themeConfig"]["sidebar"]
                .as_object()
                .map_or(0, |sidebar| sidebar.len());
            info!("Initial sidebar has {} section(s)", sections);

            let server = plugin.configure_server()?;
            info!("Watching for Markdown changes. Press Ctrl+C to stop.");
            server.run_until(tokio::signal::ctrl_c()).await;
            info!("Shutting down");
        }
    }

    Ok(())
}
