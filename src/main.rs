use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

use treeline::{
    ConfigFile, DocumentParser, DocumentRenderer, MarkerStyle, MaxDepth, NodeId, OutputFormat,
    RenderSession, ViewKind,
};

fn cli() -> Command {
    Command::new("treeline")
        .about("Render tree-shaped JSON (file trees, comment threads, menus) as indented text")
        .arg(
            Arg::new("input")
                .help("Input JSON document")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("view")
                .long("view")
                .help("Kind of tree: tree, thread or menu")
                .value_parser(clap::value_parser!(ViewKind))
                .default_value("tree"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Deepest level to expand before truncating, or `unbounded`")
                .value_parser(clap::value_parser!(MaxDepth)),
        )
        .arg(
            Arg::new("toggle")
                .long("toggle")
                .short('t')
                .help("Toggle a node by id before rendering (repeatable, applied in order)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format: text or json")
                .value_parser(clap::value_parser!(OutputFormat))
                .default_value("text"),
        )
        .arg(
            Arg::new("icons")
                .long("icons")
                .help("Use icon markers instead of ASCII")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per nesting level")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (defaults to the per-user treeline/config.json)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let input_file = matches
        .get_one::<String>("input")
        .context("missing input file")?;
    let kind = matches
        .get_one::<ViewKind>("view")
        .copied()
        .unwrap_or(ViewKind::FileTree);

    let config_file = ConfigFile::discover(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let mut config = config_file.view_config(kind);
    if let Some(max_depth) = matches.get_one::<MaxDepth>("max-depth") {
        config.max_depth = *max_depth;
    }
    if let Some(indent) = matches.get_one::<usize>("indent") {
        config.indent_width = *indent;
    }
    if matches.get_flag("icons") {
        config.markers = MarkerStyle::Icons;
    }

    // Read and parse the JSON file
    let json_content = fs::read_to_string(input_file)
        .with_context(|| format!("failed to read {}", input_file))?;
    let document = DocumentParser::new(kind)
        .parse_str(&json_content)
        .with_context(|| format!("failed to load {}", input_file))?;
    config.hide_root |= document.synthetic_root;

    let format = matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or_default();
    let context = config.render_context().with_format(format);

    let mut session = RenderSession::new(document.arena, config);
    for id in matches.get_many::<String>("toggle").into_iter().flatten() {
        session.toggle(&NodeId::from(id.as_str()));
    }

    let instructions = session.render().context("failed to render tree")?;
    info!(lines = instructions.len(), view = %kind, "rendered");

    let output = DocumentRenderer.render(&instructions, &context)?;
    print!("{}", output);

    Ok(())
}
