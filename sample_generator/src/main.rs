use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use xmlsamplegenerator::{
    DEFAULT_INDENT, DEFAULT_LIST_LENGTH, DEFAULT_OCCURS_THRESHOLD, DEFAULT_SEED, GeneratorOptions,
    QualifiedName, SchemaSource, XmlGenerator,
};

/// Generate a sample XML document from an XML schema
#[derive(Debug, Parser)]
#[command(name = "xmlsample", version)]
struct Args {
    /// Schema file (XSD)
    schema: PathBuf,

    /// Root element, as `local` or `{namespace}local`
    #[arg(short, long)]
    root: Option<String>,

    /// Cap for unbounded or large maxOccurs values
    #[arg(long, default_value_t = DEFAULT_OCCURS_THRESHOLD)]
    occurs_threshold: usize,

    /// Number of items generated for list types
    #[arg(long, default_value_t = DEFAULT_LIST_LENGTH)]
    list_length: usize,

    /// Seed for generated values
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Spaces per nesting level, 0 writes a single line
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// -v - info, -vv - debug, -vvv - trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("Failed to initialize logging")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let mut options = GeneratorOptions::new()
        .with_occurs_threshold(args.occurs_threshold)
        .with_list_length(args.list_length)
        .with_seed(args.seed)
        .with_indent(args.indent);

    if let Some(root) = &args.root {
        let root: QualifiedName = root
            .parse()
            .map_err(|err: String| anyhow::anyhow!(err))
            .context("Invalid root element name")?;
        options = options.with_root_element(root);
    }

    let source = SchemaSource::File(args.schema.clone());
    let generator = XmlGenerator::new(&source, options)
        .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            generator.write_xml(BufWriter::new(file))?;
        }
        None => {
            let mut stdout = generator.write_xml(io::stdout().lock())?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
