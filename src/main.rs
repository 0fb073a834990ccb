use clap::Parser;
use gallery_meta::types::Diagnostic;
use gallery_meta::{config, generate, output};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "gallery-meta")]
#[command(about = "Generate gallery data files from a directory of photos")]
#[command(long_about = "\
Generate gallery data files from a directory of photos

Walks the gallery directory for jpg/jpeg/png images, reconciles them with
the curated metadata file from earlier runs, fills in what's missing and
writes two files into the gallery directory:

  gallery/
  ├── gallery-meta.toml     # Optional config (see --gen-config)
  ├── metadata.yaml         # Curation store: edit titles, descriptions,
  │                         #   collections here, then re-run
  ├── gallery.yaml          # Generated for the site renderer, don't edit
  ├── a.jpg                 # Title \"A\", no collection
  └── foo/
      └── my_photo-01.png   # Title \"My Photo 01\", collection \"foo\"

Field resolution (first available wins):
  Title:       metadata.yaml → filename (my_photo-01 → \"My Photo 01\")
  Collections: metadata.yaml → parent directory
  Description: metadata.yaml only (missing ones are reported)

Records in metadata.yaml whose image no longer exists are dropped with a
warning.")]
#[command(version = version_string())]
struct Cli {
    /// Gallery directory containing the images
    #[arg(required_unless_present = "gen_config")]
    dir: Option<PathBuf>,

    /// Report what would be generated without writing any files
    #[arg(long)]
    check: bool,

    /// Print a stock gallery-meta.toml with all options documented
    #[arg(long, conflicts_with = "check")]
    gen_config: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Always shown, regardless of RUST_LOG
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let dir = cli.dir.ok_or("No gallery directory provided")?;
    generate::ensure_gallery_dir(&dir)?;
    let config = config::load_config(&dir)?;

    if cli.check {
        println!("==> Checking {}", dir.display());
        let generated = generate::generate(&dir, &config)?;
        report_diagnostics(&generated.diagnostics);
        output::print_generated(&generated);
    } else {
        println!("==> Generating gallery data for {}", dir.display());
        let report = generate::run(&dir, &config)?;
        report_diagnostics(&report.generated.diagnostics);
        output::print_run_output(&report);
    }
    Ok(())
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        log::warn!("{}", output::format_diagnostic(diagnostic));
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
