use clap::Parser;
use std::path::PathBuf;
use webpify::batch::{self, ConvertConfig, IfExists};
use webpify::imaging::{Quality, ResizeLimits};
use webpify::output::{self, ReportFormat};

#[derive(Parser)]
#[command(name = "webpify")]
#[command(about = "Convert a folder of HEIC/JPEG/PNG photos to lossy WebP")]
#[command(long_about = "\
Convert a folder of HEIC/JPEG/PNG photos to lossy WebP

Every .heic, .jpg, .jpeg, and .png file directly inside INPUT_FOLDER is
converted to <stem>.webp in OUTPUT_FOLDER (created if missing). Files are
processed in name order, one progress line per file showing the output
path and its size in KB.

With --max-width and/or --max-height, images larger than the box are
scaled down to fit it, preserving aspect ratio. Images already inside the
box are never enlarged.

A corrupt file does not stop the run. It is reported, the batch moves on,
and the exit status is 1 if any file failed.")]
#[command(version)]
struct Cli {
    /// Folder containing the photos to convert
    input_folder: PathBuf,

    /// Folder to write .webp files into (created if missing)
    output_folder: PathBuf,

    /// WebP quality, 0 (smallest) to 100 (best)
    #[arg(short, long, default_value_t = 80, value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: u32,

    /// Scale down images wider than this many pixels
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    max_width: Option<u32>,

    /// Scale down images taller than this many pixels
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    max_height: Option<u32>,

    /// What to do when the output .webp already exists
    #[arg(long, value_enum, default_value = "overwrite")]
    if_exists: IfExists,

    /// Report style
    #[arg(long, value_enum, default_value = "human")]
    report: ReportFormat,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let files = batch::discover(&cli.input_folder)?;
    let config = ConvertConfig {
        output_dir: cli.output_folder.clone(),
        quality: Quality::new(cli.quality),
        limits: ResizeLimits::new(cli.max_width, cli.max_height),
        if_exists: cli.if_exists,
    };

    let report = match cli.report {
        ReportFormat::Human => {
            if files.is_empty() {
                println!("{}", output::format_empty_notice(&cli.input_folder));
                return Ok(());
            }
            println!(
                "{}",
                output::format_batch_header(files.len(), &cli.input_folder, &cli.output_folder)
            );
            println!();
            let report = batch::run(&files, &config, output::print_file_line)?;
            println!();
            output::print_summary(&report);
            report
        }
        ReportFormat::Json => {
            let report = batch::run(&files, &config, |_, _, _| {})?;
            println!("{}", output::format_report_json(&report)?);
            report
        }
    };

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
