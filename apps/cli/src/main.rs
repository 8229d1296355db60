use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_core::document::{is_language, DEFAULT_LANGUAGE};
use cv_core::site::{build_site, SitePaths};
use cv_core::store::load_document;
use cv_core::{localize, pdf, PageOptions, Renderer};

/// Build the portfolio site and export CV PDFs from a bilingual JSON document.
#[derive(Parser)]
#[command(name = "cvgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the static portfolio site into ./site
    Build,
    /// Render the CV to one PDF per requested language
    Pdf(PdfArgs),
}

#[derive(Args)]
struct PdfArgs {
    /// Path to the JSON data file
    #[arg(short, long, default_value = "data/cv.json")]
    data: PathBuf,

    /// Path to the HTML template
    #[arg(short, long, default_value = "templates/cv_pdf.html")]
    template: PathBuf,

    /// Output PDF path (default: cv_<name>.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Language codes to render
    #[arg(short, long, num_args = 1.., default_value = DEFAULT_LANGUAGE)]
    lang: Vec<String>,

    /// Also write the rendered HTML next to each PDF
    #[arg(long)]
    html: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build => run_build(),
        Command::Pdf(args) => run_pdf(args),
    }
}

fn run_build() -> Result<()> {
    let paths = SitePaths {
        data: PathBuf::from("data/cv.json"),
        templates: PathBuf::from("templates"),
        assets: PathBuf::from("assets"),
        output: PathBuf::from("site"),
    };
    let report = build_site(&paths).context("site build failed")?;
    info!(
        "Built {} pages and copied {} assets into {}",
        report.pages_written,
        report.assets_copied,
        paths.output.display()
    );
    Ok(())
}

fn run_pdf(args: PdfArgs) -> Result<()> {
    let doc = load_document(&args.data)
        .with_context(|| format!("cannot load data file {}", args.data.display()))?;

    let template_dir = args
        .template
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let template_name = args
        .template
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid template path {}", args.template.display()))?;
    let renderer = Renderer::from_dir(template_dir)
        .with_context(|| format!("cannot load templates from {}", template_dir.display()))?;

    let base_dir = std::env::current_dir()?;
    let multi = args.lang.len() > 1;

    for lang in &args.lang {
        if !is_language(lang) {
            bail!("unsupported language: {lang}");
        }

        let localized = localize(&doc, lang);
        let markup = renderer.render(template_name, &localized, &PageOptions::new(lang))?;

        let output = output_path(args.output.as_deref(), &doc, lang, multi);
        if args.html {
            let sidecar = output.with_extension("html");
            fs::write(&sidecar, &markup)
                .with_context(|| format!("cannot write {}", sidecar.display()))?;
            info!("HTML written: {}", sidecar.display());
        }

        let bytes = pdf::export_pdf(&markup, &base_dir)?;
        fs::write(&output, &bytes)
            .with_context(|| format!("cannot write {}", output.display()))?;
        info!("PDF written: {}", output.display());
    }

    Ok(())
}

/// Output location for one language. Defaults to `cv_<name>.pdf` derived
/// from `personal.name`; with several languages the code is suffixed to
/// the stem so the files don't overwrite each other.
fn output_path(
    explicit: Option<&Path>,
    doc: &serde_json::Value,
    lang: &str,
    multi: bool,
) -> PathBuf {
    let base = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let name = doc
                .get("personal")
                .and_then(|p| p.get("name"))
                .and_then(|n| n.as_str())
                .unwrap_or("cv")
                .to_lowercase()
                .replace(' ', "_");
            PathBuf::from(format!("cv_{name}.pdf"))
        }
    };

    if multi {
        let stem = base
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("cv")
            .to_string();
        base.with_file_name(format!("{stem}_{lang}.pdf"))
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_output_derives_from_personal_name() {
        let doc = json!({"personal": {"name": "Maartje van den Berg"}});
        assert_eq!(
            output_path(None, &doc, "en", false),
            PathBuf::from("cv_maartje_van_den_berg.pdf")
        );
    }

    #[test]
    fn multiple_languages_suffix_the_stem() {
        let doc = json!({});
        assert_eq!(
            output_path(Some(Path::new("out/cv.pdf")), &doc, "nl", true),
            PathBuf::from("out/cv_nl.pdf")
        );
    }

    #[test]
    fn missing_name_falls_back_to_cv() {
        let doc = json!({});
        assert_eq!(output_path(None, &doc, "en", false), PathBuf::from("cv_cv.pdf"));
    }
}
