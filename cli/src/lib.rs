use anyhow::{anyhow, Error, Result};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use hydra_rdf::util::{media_type_for_path, write_quads};
use hydra_rdf::{MediaTypeProcessor, ProcessorConfig, TextResponse};
use log::info;
use oxigraph::io::RdfFormat;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "hydra-rdf")]
#[command(about = "Parse Hydra API responses into RDF and materialize implied triples")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// Path to a JSON processor configuration file
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints the version of the hydra-rdf binary
    Version,
    /// Run a local file through the parse and inference pipeline
    Process {
        /// The file holding the response body
        file: PathBuf,
        /// Declared media type of the body; guessed from the file extension if omitted
        #[clap(long, short)]
        media_type: Option<String>,
        /// Base IRI for relative references; defaults to the file's file:// IRI
        #[clap(long, short)]
        base: Option<String>,
        /// Output serialization, given as a media type or file extension
        #[clap(long, short, default_value = "application/n-quads")]
        format: String,
        /// Write output to this file instead of stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// List the media types the processor accepts
    Formats,
    /// Check whether a media type can be processed
    Check {
        /// The media type, parameters allowed
        media_type: String,
    },
}

pub fn run() -> Result<()> {
    hydra_rdf::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    hydra_rdf::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn execute(cmd: Cli) -> Result<()> {
    // The RUST_LOG env var is set by `init_logging` if HYDRA_RDF_LOG is present.
    // CLI flags for verbosity take precedence. If nothing is set, we default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    let config = match &cmd.config {
        Some(path) => ProcessorConfig::from_file(path)?,
        None => ProcessorConfig::default(),
    };
    if cmd.verbose || cmd.debug {
        config.print();
    }
    let processor = MediaTypeProcessor::from_config(&config);

    match cmd.command {
        Commands::Version => {
            println!("hydra-rdf {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Process {
            file,
            media_type,
            base,
            format,
            output,
        } => {
            let format = parse_format(&format)?;
            let media_type = match media_type {
                Some(media_type) => media_type,
                None => media_type_for_path(&file)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        anyhow!("Cannot guess the media type of {}; pass --media-type", file.display())
                    })?,
            };
            let base = match base {
                Some(base) => base,
                None => file_iri(&file)?,
            };
            let body = std::fs::read_to_string(&file)?;
            let response = TextResponse::new(body, media_type);
            let quads = block_on(processor.process(&base, &response))?;
            let count = match output {
                Some(path) => {
                    let writer = BufWriter::new(File::create(&path)?);
                    write_quads(quads, format, writer)?
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut lock = stdout.lock();
                    let count = write_quads(quads, format, &mut lock)?;
                    lock.flush()?;
                    count
                }
            };
            info!("Processed {} into {} quads", file.display(), count);
        }
        Commands::Formats => {
            for media_type in processor.media_types() {
                println!("{}", media_type);
            }
        }
        Commands::Check { media_type } => {
            if !processor.can_process(&media_type) {
                return Err(anyhow!("Cannot process media type '{}'", media_type));
            }
            println!("{} can be processed", hydra_rdf::media_type::normalize(&media_type));
        }
    }
    Ok(())
}

fn parse_format(format: &str) -> Result<RdfFormat> {
    RdfFormat::from_media_type(format)
        .or_else(|| RdfFormat::from_extension(format))
        .ok_or_else(|| anyhow!("Unknown output format '{}'", format))
}

fn file_iri(path: &Path) -> Result<String> {
    let absolute = std::fs::canonicalize(path)?;
    Url::from_file_path(&absolute)
        .map(|url| url.to_string())
        .map_err(|_| anyhow!("Cannot build a file IRI for {}", absolute.display()))
}
