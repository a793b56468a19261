//! rdfjson — command-line front end for the RDF/JSON codec
//!
//! Converts between RDF/JSON and N-Triples/Turtle, validates documents and
//! summarises their shape.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use rdfjson::rdf::serialization::json::{CodecConfig, RdfJsonDecoder, RdfJsonEncoder};
use rdfjson::rdf::{Graph, RdfFormat, RdfParser, RdfSerializer, Triple};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "rdfjson", version, about = "RDF/JSON reader and writer")]
struct Cli {
    /// YAML file with decoder/encoder options
    #[arg(long, global = true, env = "RDFJSON_CONFIG")]
    config: Option<PathBuf>,

    /// Abort on the first malformed statement
    #[arg(long, global = true, conflicts_with = "lenient")]
    strict: bool,

    /// Skip malformed statements and keep going
    #[arg(long, global = true)]
    lenient: bool,

    /// Check lexical forms against their datatypes
    #[arg(long, global = true)]
    validate: bool,

    /// Rewrite lexical forms to canonical form
    #[arg(long, global = true)]
    canonicalize: bool,

    /// Output format for reports
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Interchange {
    Nt,
    Ttl,
}

impl From<Interchange> for RdfFormat {
    fn from(format: Interchange) -> Self {
        match format {
            Interchange::Nt => RdfFormat::NTriples,
            Interchange::Ttl => RdfFormat::Turtle,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an RDF/JSON document to N-Triples or Turtle
    Decode {
        /// Input document, `-` for stdin
        file: PathBuf,

        /// Output syntax
        #[arg(long, default_value = "nt")]
        to: Interchange,
    },
    /// Convert N-Triples or Turtle to an RDF/JSON document
    Encode {
        /// Input document, `-` for stdin
        file: PathBuf,

        /// Input syntax (defaults to the file extension)
        #[arg(long)]
        from: Option<Interchange>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Report every malformed or invalid statement in an RDF/JSON document
    Validate {
        /// Input document, `-` for stdin
        file: PathBuf,
    },
    /// Count objects per subject and predicate
    Inspect {
        /// Input document, `-` for stdin
        file: PathBuf,
    },
    /// List the supported formats
    Formats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Decode { ref file, to } => run_decode(file, to.into(), &config),
        Commands::Encode { ref file, from, pretty } => {
            let mut config = config;
            config.encoder.pretty |= pretty;
            run_encode(file, from, &config)
        }
        Commands::Validate { ref file } => run_validate(file, &config, &cli.format),
        Commands::Inspect { ref file } => run_inspect(file, &config, &cli.format),
        Commands::Formats => run_formats(&cli.format),
    }
}

/// File values first, then command-line overrides
fn load_config(cli: &Cli) -> Result<CodecConfig> {
    let mut config = match &cli.config {
        Some(path) => CodecConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CodecConfig::default(),
    };

    if cli.strict {
        config.decoder.strict = true;
    }
    if cli.lenient {
        config.decoder.strict = false;
    }
    config.decoder.validate |= cli.validate;
    config.decoder.canonicalize |= cli.canonicalize;
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn decode_graph(path: &Path, config: &CodecConfig) -> Result<Graph> {
    let input = read_input(path)?;
    let triples = RdfJsonDecoder::with_config(config.decoder.clone())
        .decode_all(&input)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    info!(triples = triples.len(), "decoded {}", path.display());
    Ok(triples.into_iter().collect())
}

fn run_decode(path: &Path, to: RdfFormat, config: &CodecConfig) -> Result<()> {
    let graph = decode_graph(path, config)?;
    let output = RdfSerializer::serialize_graph(&graph, to)?;
    print!("{}", output);
    Ok(())
}

fn run_encode(path: &Path, from: Option<Interchange>, config: &CodecConfig) -> Result<()> {
    let format = match from {
        Some(format) => format.into(),
        None => match RdfFormat::from_path(path) {
            Some(RdfFormat::RdfJson) | None => {
                bail!("cannot tell the input syntax of {}; pass --from nt|ttl", path.display())
            }
            Some(format) => format,
        },
    };

    let input = read_input(path)?;
    let triples: Vec<Triple> = RdfParser::parse(&input, format)
        .with_context(|| format!("failed to parse {} as {}", path.display(), format))?;
    info!(triples = triples.len(), "parsed {}", path.display());

    let mut encoder = RdfJsonEncoder::with_config(config.encoder.clone());
    encoder.extend(triples);
    encoder
        .finish_to_writer(std::io::stdout().lock())
        .context("failed to write output")?;
    Ok(())
}

fn run_validate(path: &Path, config: &CodecConfig, format: &OutputFormat) -> Result<()> {
    let input = read_input(path)?;
    let mut decoder_config = config.decoder.clone();
    decoder_config.strict = false;
    decoder_config.validate = true;

    let mut statements = RdfJsonDecoder::with_config(decoder_config)
        .decode(&input)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let valid = statements.by_ref().filter(Result::is_ok).count();
    let errors: Vec<String> = statements.errors().iter().map(|e| e.to_string()).collect();

    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "file": path.display().to_string(),
                "valid": valid,
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            for error in &errors {
                println!("{}", error);
            }
            println!("{} valid statement(s), {} error(s)", valid, errors.len());
        }
    }

    if !errors.is_empty() {
        bail!("{} is not valid RDF/JSON", path.display());
    }
    Ok(())
}

fn run_inspect(path: &Path, config: &CodecConfig, format: &OutputFormat) -> Result<()> {
    let graph = decode_graph(path, config)?;

    let mut rows: Vec<(String, String, usize)> = Vec::new();
    for subject in graph.subjects() {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for triple in graph.triples_with_subject(subject) {
            let predicate = triple.predicate.as_str();
            match counts.iter_mut().find(|(p, _)| p == predicate) {
                Some((_, count)) => *count += 1,
                None => counts.push((predicate.to_string(), 1)),
            }
        }
        for (predicate, count) in counts {
            rows.push((subject.to_string(), predicate, count));
        }
    }

    match format {
        OutputFormat::Json => {
            let report: Vec<serde_json::Value> = rows
                .iter()
                .map(|(subject, predicate, count)| {
                    serde_json::json!({"subject": subject, "predicate": predicate, "objects": count})
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(empty graph)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Subject", "Predicate", "Objects"]);
            for (subject, predicate, count) in &rows {
                table.add_row(vec![subject.clone(), predicate.clone(), count.to_string()]);
            }

            println!("{}", table);
            println!("{} statement(s), {} subject(s)", graph.len(), graph.subjects().len());
        }
    }

    Ok(())
}

fn run_formats(format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report: Vec<serde_json::Value> = RdfFormat::ALL
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "name": f.name(),
                        "content_types": f.content_types(),
                        "extensions": f.extensions(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Format", "Content types", "Extensions"]);
            for f in RdfFormat::ALL {
                table.add_row(vec![
                    f.name().to_string(),
                    f.content_types().join(", "),
                    f.extensions().join(", "),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}
