use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use tracing::{debug, info, warn};

use wrapline_core::{PropertyMap, TextMetricsProducer, TextStyle};
use wrapline_render::{CachedMeasurer, CommandRecorder, GridSurface, MonospaceMeasurer, TextBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Tree,
    Detailed,
    Json,
}

#[derive(Parser)]
#[command(name = "wrapline-debug")]
#[command(about = "Wrap text with a measured layout pass and print the result")]
struct Args {
    /// Text to wrap (use --file to read it from disk instead)
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Available width in layout units
    #[arg(short, long, default_value = "40")]
    width: f32,

    /// Width of one character cell
    #[arg(long, default_value = "1")]
    char_width: f32,

    /// Natural line height
    #[arg(long, default_value = "1")]
    line_height: f32,

    /// Enable word wrapping (same as --prop word-wrap=true)
    #[arg(long)]
    wrap: bool,

    /// Style property override, e.g. --prop text-align=center (repeatable)
    #[arg(long = "prop", value_name = "KEY=VALUE")]
    props: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,

    /// Also paint the block onto a character grid
    #[arg(long)]
    preview: bool,

    /// Measure with system fonts at this size instead of fixed-width cells
    #[cfg(feature = "cosmic-text")]
    #[arg(long)]
    font_size: Option<f32>,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?,
        (None, None) => anyhow::bail!("No text given"),
    };

    let mut props = PropertyMap::new();
    for assignment in &args.props {
        if props.set_assignment(assignment).is_none() {
            anyhow::bail!("Invalid property override {:?}, expected KEY=VALUE", assignment);
        }
    }

    let mut style = TextStyle::default().with_word_wrap(args.wrap);
    let diagnostics = style.resolve_from(&props);
    for diagnostic in &diagnostics {
        warn!("Ignoring style property: {}", diagnostic);
    }
    debug!("Resolved style: {:?}", style);

    let measurer = CachedMeasurer::new(build_measurer(&args));
    let mut block = TextBlock::new(text, style);
    let size = block
        .layout(&measurer, args.width)
        .context("Text layout failed")?;
    info!(
        "Laid out {} line(s), size {:.1}x{:.1} ({} cached measurements)",
        block.lines().len().max(1),
        size.width,
        size.height,
        measurer.len()
    );

    let mut output_text = match args.format {
        Format::Tree => generate_tree_output(&block, &args),
        Format::Detailed => generate_detailed_output(&block, &measurer, &args)?,
        Format::Json => generate_json_output(&block, &args, &diagnostics)?,
    };

    if args.preview {
        output_text.push_str(&generate_preview(&block, &args)?);
    }

    if let Some(output_file) = &args.output {
        fs::write(output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file.display()))?;
        println!("Output written to: {}", output_file.display());
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn build_measurer(args: &Args) -> Box<dyn TextMetricsProducer> {
    if let Some(measurer) = font_measurer(args) {
        return measurer;
    }

    Box::new(
        MonospaceMeasurer::cells()
            .with_char_width(args.char_width)
            .with_line_height(args.line_height),
    )
}

#[cfg(feature = "cosmic-text")]
fn font_measurer(args: &Args) -> Option<Box<dyn TextMetricsProducer>> {
    let font_size = args.font_size?;
    info!("Measuring with system fonts at {}px", font_size);
    Some(Box::new(wrapline_render::CosmicMeasurer::new(font_size)))
}

#[cfg(not(feature = "cosmic-text"))]
fn font_measurer(_args: &Args) -> Option<Box<dyn TextMetricsProducer>> {
    None
}

/// Lines to report: the wrapped lines, or the single unwrapped string.
fn display_lines(block: &TextBlock) -> Vec<&str> {
    if block.style().word_wrap {
        block.lines().iter().map(String::as_str).collect()
    } else {
        vec![block.text()]
    }
}

fn generate_tree_output(block: &TextBlock, args: &Args) -> String {
    let style = block.style();
    let size = block.size();
    let lines = display_lines(block);

    let mut output = String::new();
    output.push_str(&format!(
        "TextBlock width:{} wrap:{} align:{}\n",
        args.width, style.word_wrap, style.align
    ));
    output.push_str(&format!("├── size:({:.1},{:.1})\n", size.width, size.height));
    output.push_str(&format!("├── line_advance:{:.1}\n", block.line_advance()));
    output.push_str(&format!("└── lines ({})\n", lines.len()));
    for (i, line) in lines.iter().enumerate() {
        let tree_char = if i + 1 == lines.len() { "└── " } else { "├── " };
        output.push_str(&format!("    {}[{}] {:?}\n", tree_char, i, line));
    }
    output
}

fn generate_detailed_output<M: TextMetricsProducer + ?Sized>(
    block: &TextBlock,
    measurer: &M,
    args: &Args,
) -> Result<String> {
    let mut output = generate_tree_output(block, args);

    output.push_str("\nStyle:\n");
    output.push_str(&format!("{:#?}\n", block.style()));

    output.push_str("\nLine widths:\n");
    for (i, line) in display_lines(block).iter().enumerate() {
        let measured = measurer
            .measure(line)
            .with_context(|| format!("Failed to measure line {}", i))?;
        let marker = if measured.width > args.width { " (overflow)" } else { "" };
        output.push_str(&format!("  [{}] {:.1}{}\n", i, measured.width, marker));
    }

    let mut recorder = CommandRecorder::new();
    block
        .render(&mut recorder, Vec2::ZERO, block.size())
        .context("Failed to record render commands")?;
    output.push_str("\nRender commands:\n");
    for command in recorder.commands() {
        output.push_str(&format!("  {:?}\n", command));
    }

    Ok(output)
}

fn generate_json_output(
    block: &TextBlock,
    args: &Args,
    diagnostics: &[wrapline_core::ConfigError],
) -> Result<String> {
    let report = serde_json::json!({
        "max_width": args.width,
        "style": block.style(),
        "size": block.size(),
        "line_advance": block.line_advance(),
        "lines": display_lines(block),
        "diagnostics": diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>(),
    });
    let mut output =
        serde_json::to_string_pretty(&report).context("Failed to serialize layout report")?;
    output.push('\n');
    Ok(output)
}

fn generate_preview(block: &TextBlock, args: &Args) -> Result<String> {
    let cell = Vec2::new(args.char_width, args.line_height);
    if cell.x <= 0.0 || cell.y <= 0.0 {
        anyhow::bail!("Preview needs a positive --char-width and --line-height");
    }

    let columns = (args.width.max(block.size().width) / cell.x).ceil().max(1.0) as usize;
    let rows = (block.size().height / cell.y).ceil().max(1.0) as usize;
    let mut grid = GridSurface::new(columns, rows).with_cell_size(cell);

    let size = wrapline_core::TextSize::new(args.width, block.size().height);
    block
        .render(&mut grid, Vec2::ZERO, size)
        .context("Failed to paint preview")?;

    let border = "-".repeat(columns);
    let mut output = format!("\n+{}+\n", border);
    for row in grid.to_lines() {
        output.push_str(&format!("|{:<width$}|\n", row, width = columns));
    }
    output.push_str(&format!("+{}+\n", border));
    Ok(output)
}
