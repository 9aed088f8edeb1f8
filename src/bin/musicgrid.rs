//! Command-line interface for musicgrid
//!
//! Usage:
//!   musicgrid `<file>` [-o `<output>`] [-f `<format>`] [-c `<config>`]   - Compile once
//!   musicgrid `<file>` watch                                            - Recompile on change
//!   musicgrid `<file>` serve [--port `<port>`]                          - Watch and serve with live reload
//!   musicgrid --list-formats                                            - List output formats

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};
use musicgrid::compile::{read_source, Compiler};
use musicgrid::config::{GridConfig, Loader, LOCAL_CONFIG_FILE};
use musicgrid::grid::formats::FormatRegistry;
use musicgrid::serve::LiveServer;
use musicgrid::watch::{ChangeFlag, Watcher};
use musicgrid::Result;
use std::path::Path;

fn cli() -> Command {
    Command::new("musicgrid")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile plain-text chord grids into HTML pages")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the grid source file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output HTML file (default from config: index.html)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format; html is written to the output file, others go to stdout")
                .default_value("html"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./musicgrid.toml"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("watch").about("Recompile whenever the source file changes"))
        .subcommand(
            Command::new("serve")
                .about("Watch the source and serve the page with live reload")
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .help("First port to try")
                        .value_parser(value_parser!(u16)),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let Some(path) = matches.get_one::<String>("path") else {
        return Ok(());
    };
    let input = Path::new(path);
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("html");
    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("watch", _)) => {
            warn_ignored_format(format);
            handle_watch_command(input, &config)
        }
        Some(("serve", _)) => {
            warn_ignored_format(format);
            handle_serve_command(input, &config)
        }
        _ => handle_compile_command(input, format, &config),
    }
}

fn load_config(matches: &ArgMatches) -> Result<GridConfig> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(output) = matches.get_one::<String>("output") {
        loader = loader.set_override("output.path", output.as_str())?;
    }
    if let Some(("serve", serve)) = matches.subcommand() {
        if let Some(port) = serve.get_one::<u16>("port") {
            loader = loader.set_override("server.port", i64::from(*port))?;
        }
    }
    Ok(loader.build()?)
}

fn warn_ignored_format(format: &str) {
    if format != "html" {
        warn!("--format {} is ignored; watch and serve always write HTML", format);
    }
}

/// Compile once: html to the output file, other formats to stdout
fn handle_compile_command(input: &Path, format: &str, config: &GridConfig) -> Result<()> {
    let compiler = Compiler::from_config(config)?;
    if format == "html" {
        compiler.compile_file(input, &config.output.path)?;
        return Ok(());
    }

    let source = read_source(input)?;
    print!("{}", compiler.compile_source(&source, format)?);
    Ok(())
}

fn handle_watch_command(input: &Path, config: &GridConfig) -> Result<()> {
    let compiler = Compiler::from_config(config)?;
    let mut watcher = Watcher::new(
        compiler,
        input,
        &config.output.path,
        config.watch.poll_interval(),
    );
    watcher.poll_once()?;

    info!("watching {} (Ctrl+C to stop)", input.display());
    watcher.spawn().join();
    Ok(())
}

fn handle_serve_command(input: &Path, config: &GridConfig) -> Result<()> {
    let flag = ChangeFlag::new();
    let server = LiveServer::bind(
        &config.server.host,
        config.server.port,
        config.server.max_port_attempts,
        &config.output.path,
        flag.clone(),
    )?;

    let compiler = Compiler::from_config(config)?.with_live_address(server.address());
    let mut watcher = Watcher::new(
        compiler,
        input,
        &config.output.path,
        config.watch.poll_interval(),
    )
    .with_change_flag(flag.clone());
    watcher.poll_once()?;
    // the first page load is already fresh
    flag.take();

    info!("open {} in a browser (Ctrl+C to stop)", server.address());
    let server = server.spawn();
    watcher.spawn().join();
    server.stop();
    Ok(())
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");

    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|formatter| formatter.description())
            .unwrap_or_default();
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
