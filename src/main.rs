use clap::{Parser, ValueEnum};
use focalcrop::{
    EncodeFormat, PipelineEvent, Quality, RustCodec, ThumbnailOptions, entropy_profile,
    generate_thumbnail, normalize_orientation,
};
use focalcrop::{GrayscaleBuffer, ImageCodec};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
    Webp,
}

impl From<FormatArg> for EncodeFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Jpeg => EncodeFormat::Jpeg,
            FormatArg::Png => EncodeFormat::Png,
            FormatArg::Webp => EncodeFormat::WebP,
        }
    }
}

#[derive(Parser)]
#[command(name = "focalcrop")]
#[command(about = "Entropy-guided square thumbnails")]
#[command(long_about = "\
Entropy-guided square thumbnails

Scans each image's long axis for the square window with the highest
information content (Shannon entropy of pixel intensities) and crops there
instead of at the geometric center. The scan runs on a small analysis decode
(--input-size); the crop is taken from the full-resolution image and scaled
to --output-size.

Inputs are processed in parallel; each produces <stem>-thumb.<ext> next to
the source (or under --out-dir).")]
#[command(version)]
struct Cli {
    /// Input image files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for generated thumbnails (defaults to each input's directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Square side of the output thumbnail in pixels (0 = default 512)
    #[arg(long, default_value_t = 512)]
    output_size: u32,

    /// Cap on the analysis decode's short side in pixels (0 = default 256)
    #[arg(long, default_value_t = 256)]
    input_size: u32,

    /// Output encoding
    #[arg(long, value_enum, default_value = "jpeg")]
    format: FormatArg,

    /// Encoding quality, 1-100 (lossy formats only)
    #[arg(long, default_value_t = 80)]
    quality: u8,

    /// Emit the per-window entropy profile as JSON on stdout
    #[arg(long)]
    profile: bool,

    /// Report each pipeline stage per file
    #[arg(short, long)]
    verbose: bool,
}

type RunError = Box<dyn std::error::Error + Send + Sync>;

fn output_path(input: &Path, out_dir: Option<&Path>, format: EncodeFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "thumbnail".to_string());
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}-thumb.{}", stem, format.extension()))
}

fn format_event(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::Decoded { width, height } => {
            format!("  decoded analysis image {width}x{height}")
        }
        PipelineEvent::Normalized { transposed: true } => {
            "  transposed for analysis".to_string()
        }
        PipelineEvent::Normalized { transposed: false } => "  orientation ok".to_string(),
        PipelineEvent::Scanned { window } => format!(
            "  best window at offset {} ({:.4} bits)",
            window.offset, window.entropy
        ),
        PipelineEvent::ScanSkipped => "  square image, scan skipped".to_string(),
        PipelineEvent::Cropped {
            region,
            output_side,
        } => format!(
            "  crop {}x{}+{}+{} → {output_side}px",
            region.side, region.side, region.x, region.y
        ),
        PipelineEvent::Encoded { bytes } => format!("  encoded {bytes} bytes"),
    }
}

/// Entropy profile of one input, serialized for `--profile`.
#[derive(serde::Serialize)]
struct ProfileReport {
    file: String,
    windows: Vec<focalcrop::EntropyWindow>,
}

fn print_profile(codec: &RustCodec, input: &Path, input_size: u32) -> Result<(), RunError> {
    let bytes = std::fs::read(input)?;
    let analysis = codec.decode(&bytes, Some(input_size))?;
    let (normalized, _) = normalize_orientation(analysis)?;
    let gray = GrayscaleBuffer::from_raster(&normalized)?;
    let report = ProfileReport {
        file: input.display().to_string(),
        windows: entropy_profile(&gray),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn process(
    codec: &RustCodec,
    input: &Path,
    options: &ThumbnailOptions,
    cli: &Cli,
) -> Result<Vec<String>, RunError> {
    let bytes = std::fs::read(input)?;
    let mut lines = Vec::new();

    let thumb = if cli.verbose {
        let (tx, rx) = mpsc::channel();
        let thumb = generate_thumbnail(codec, &bytes, options, Some(&tx))?;
        drop(tx);
        lines.extend(rx.iter().map(|event| format_event(&event)));
        thumb
    } else {
        generate_thumbnail(codec, &bytes, options, None)?
    };

    let output = output_path(input, cli.out_dir.as_deref(), options.format);
    std::fs::write(&output, &thumb)?;
    lines.push(format!("{} → {}", input.display(), output.display()));
    Ok(lines)
}

fn main() -> Result<(), RunError> {
    let cli = Cli::parse();
    let codec = RustCodec::new();
    let options = ThumbnailOptions {
        output_size: cli.output_size,
        input_size: cli.input_size,
        format: cli.format.into(),
        quality: Quality::new(cli.quality),
    };

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    if cli.profile {
        let input_size = options.effective_input_size();
        for input in &cli.inputs {
            print_profile(&codec, input, input_size)?;
        }
        return Ok(());
    }

    let results: Vec<(&PathBuf, Result<Vec<String>, RunError>)> = cli
        .inputs
        .par_iter()
        .map(|input| (input, process(&codec, input, &options, &cli)))
        .collect();

    let mut failures = 0;
    for (input, result) in &results {
        match result {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(e) => {
                eprintln!("{}: {e}", input.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{failures} of {} inputs failed", results.len()).into());
    }
    Ok(())
}
