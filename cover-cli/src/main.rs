//! # Coverdeck CLI
//!
//! Headless front end for the cover engine: load a saved project and
//! export it, or generate a layout from a prompt and export that.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cover_ai::CoverGenerator;
use cover_core::{Editor, ProjectDocument};
use cover_renderer::{CoverExporter, ExportConfig, ExportFormat};

#[derive(Debug, Parser)]
#[command(name = "coverdeck", about = "Compose and export cover images", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Jpeg,
    Svg,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => Self::Png,
            Format::Jpeg => Self::Jpeg,
            Format::Svg => Self::Svg,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export a saved project to an image or SVG document.
    Render {
        /// Path to the project JSON file.
        input: PathBuf,
        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,
        /// Output format; inferred from the output extension when omitted.
        #[arg(short, long)]
        format: Option<Format>,
        /// JPEG quality, 1-100.
        #[arg(long, default_value_t = 85)]
        quality: u8,
        /// Output scale factor.
        #[arg(long, default_value_t = 1.0)]
        scale: f32,
    },

    /// Generate a layout from a prompt and export it.
    Generate {
        /// Natural-language description of the cover.
        prompt: String,
        /// Canvas width in pixels.
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Canvas height in pixels.
        #[arg(long, default_value_t = 720)]
        height: u32,
        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,
        /// Output format; inferred from the output extension when omitted.
        #[arg(short, long)]
        format: Option<Format>,
        /// API key for remote generation; the local template generator is
        /// used when absent.
        #[arg(long, env = "COVERDECK_API_KEY")]
        api_key: Option<String>,
        /// Also write the project JSON next to the rendered output.
        #[arg(long)]
        save_project: bool,
    },
}

/// Set up structured logging, controlled by `RUST_LOG`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cover_cli=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Pick the export format from an explicit flag or the output extension.
fn resolve_format(format: Option<Format>, output: &Path) -> anyhow::Result<ExportFormat> {
    if let Some(format) = format {
        return Ok(format.into());
    }
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("png") => Ok(ExportFormat::Png),
        Some("jpg" | "jpeg") => Ok(ExportFormat::Jpeg),
        Some("svg") => Ok(ExportFormat::Svg),
        other => anyhow::bail!(
            "cannot infer format from extension {other:?}; pass --format",
        ),
    }
}

fn export_scene(
    editor: &Editor,
    output: &Path,
    format: ExportFormat,
    quality: u8,
    scale: f32,
) -> anyhow::Result<()> {
    let exporter = CoverExporter::new(ExportConfig {
        jpeg_quality: quality,
        scale,
        ..Default::default()
    });
    let bytes = exporter
        .export(editor.scene(), format)
        .context("export failed")?;
    std::fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(
        "wrote {} bytes to {} ({format:?})",
        bytes.len(),
        output.display()
    );
    Ok(())
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
    })
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Render {
            input,
            output,
            format,
            quality,
            scale,
        } => {
            let format = resolve_format(format, &output)?;
            let json = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let document = ProjectDocument::from_json(&json)
                .with_context(|| format!("failed to parse {}", input.display()))?;

            let mut editor = Editor::new();
            document.apply(&mut editor);
            tracing::info!(
                "loaded project: {}x{}, {} elements",
                editor.scene().canvas_width,
                editor.scene().canvas_height,
                editor.scene().element_count()
            );
            export_scene(&editor, &output, format, quality, scale)
        }

        Command::Generate {
            prompt,
            width,
            height,
            output,
            format,
            api_key,
            save_project,
        } => {
            let format = resolve_format(format, &output)?;
            let generator = match api_key {
                Some(key) => CoverGenerator::with_api_key(key),
                None => CoverGenerator::offline(),
            };
            let result = generator
                .generate(&prompt, width, height)
                .await
                .context("generation failed")?;
            tracing::info!("{}", result.description);

            let mut editor = Editor::new();
            editor.set_canvas_size(width, height);
            editor.add_elements(result.into_elements());

            if save_project {
                let document =
                    ProjectDocument::from_scene(editor.scene(), current_timestamp_ms());
                let path = output.with_extension("json");
                std::fs::write(&path, document.to_json()?)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("saved project to {}", path.display());
            }

            export_scene(&editor, &output, format, 85, 1.0)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    run(Cli::parse()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        let png = resolve_format(None, Path::new("out.png")).expect("png");
        assert_eq!(png, ExportFormat::Png);
        let jpeg = resolve_format(None, Path::new("out.JPG")).expect("jpg");
        assert_eq!(jpeg, ExportFormat::Jpeg);
        let svg = resolve_format(None, Path::new("out.svg")).expect("svg");
        assert_eq!(svg, ExportFormat::Svg);
        assert!(resolve_format(None, Path::new("out.bmp")).is_err());
    }

    #[test]
    fn test_explicit_format_wins() {
        let format = resolve_format(Some(Format::Svg), Path::new("out.png")).expect("svg");
        assert_eq!(format, ExportFormat::Svg);
    }

    #[tokio::test]
    async fn test_generate_then_render_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let png_path = dir.path().join("cover.png");

        let cli = Cli {
            command: Command::Generate {
                prompt: "neon tech cover".to_string(),
                width: 320,
                height: 180,
                output: png_path.clone(),
                format: None,
                api_key: None,
                save_project: true,
            },
        };
        run(cli).await.expect("generate");
        assert!(png_path.exists());

        let project_path = png_path.with_extension("json");
        assert!(project_path.exists());

        let svg_path = dir.path().join("cover.svg");
        let cli = Cli {
            command: Command::Render {
                input: project_path,
                output: svg_path.clone(),
                format: None,
                quality: 85,
                scale: 1.0,
            },
        };
        run(cli).await.expect("render");
        let svg = std::fs::read_to_string(svg_path).expect("svg file");
        assert!(svg.starts_with("<svg"));
    }
}
