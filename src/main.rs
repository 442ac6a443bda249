use clap::Parser;
use shapeprep::config::Config;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shapeprep",
    about = "Prepare administrative-region shapes: rename, project and transliterate GeoJSON"
)]
struct Cli {
    /// Input GeoJSON file(s) or directory
    #[arg(default_value = "data/shapes.json")]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Property holding the raw region name (default: nomera)
    #[arg(long)]
    source_field: Option<String>,

    /// Property to write the normalized name to (default: administrativeRegion)
    #[arg(long)]
    target_field: Option<String>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Fail when a character has no ASCII transliteration
    #[arg(long)]
    strict: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn load_config(path: &PathBuf) -> Config {
    Config::from_file(path).unwrap_or_else(|e| die(&e.to_string()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load config
    let mut config = if let Some(ref config_path) = cli.config {
        load_config(config_path)
    } else {
        let defaults = ["shapeprep.config.json", "config/shapeprep.config.json"];
        defaults
            .into_iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .map(|p| load_config(&p))
            .unwrap_or_default()
    };

    // CLI overrides
    if let Some(field) = cli.source_field {
        config.source_field = field;
    }
    if let Some(field) = cli.target_field {
        config.target_field = field;
    }
    if cli.pretty {
        config.pretty = true;
    }
    if cli.strict {
        config.strict = true;
    }

    // Collect input files
    let files = shapeprep::list_files(&cli.inputs).unwrap_or_else(|e| die(&e.to_string()));
    if files.is_empty() {
        die("no input files found");
    }

    let prepared = shapeprep::load_all(&files, &config).unwrap_or_else(|e| die(&e.to_string()));

    if let Some(ref output_path) = cli.output {
        shapeprep::write_geojson(output_path, &prepared.shapes, &config)
            .unwrap_or_else(|e| die(&e.to_string()));
        info!(
            files = files.len(),
            records = prepared.shapes.len(),
            warnings = prepared.warnings.len(),
            "wrote {}",
            output_path.display()
        );
    } else {
        print!("{}", shapeprep::emit::emit_geojson(&prepared.shapes, &config));
    }
}
