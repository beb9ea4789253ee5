//! One-shot file conversion for the `convert` subcommand

use danmaku_lib::LayoutConfig;
use std::io::Write;

use crate::cli::{ConvertArgs, OutputFormat};
use crate::error::Result;

/// Decode the input segments and render them in the requested format
pub fn render(args: &ConvertArgs, layout: &LayoutConfig) -> Result<String> {
    let records = danmaku_lib::decode_files(&args.inputs)?;
    tracing::info!(
        inputs = args.inputs.len(),
        records = records.len(),
        format = ?args.format,
        "decoded input"
    );

    let document = match args.format {
        OutputFormat::Xml => {
            danmaku_lib::to_markup(&records, args.date.as_deref(), args.hour)?
        }
        OutputFormat::Ass => danmaku_lib::to_subtitle_with(&records, layout),
        OutputFormat::Json => danmaku_lib::to_json(&records)?,
    };
    Ok(document)
}

/// Run the `convert` subcommand, writing to the output file or stdout
pub fn run(args: &ConvertArgs, layout: &LayoutConfig) -> Result<()> {
    if args.format != OutputFormat::Xml && (args.date.is_some() || args.hour.is_some()) {
        tracing::warn!("--date/--hour only apply to xml output, ignoring");
    }

    let document = render(args, layout)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &document)?;
            tracing::info!(path = %path.display(), bytes = document.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
