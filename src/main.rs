use clap::{CommandFactory, Parser};
use colony_crop::config::MontageConfig;
use colony_crop::{montage, output, scan};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "colony-crop")]
#[command(version)]
#[command(about = "Crop photos to centered squares and tile them into bordered montages")]
#[command(long_about = "\
Crop photos to centered squares and tile them into bordered montages

Every .png, .jpg and .jpeg file in the input directory is cropped to a
centered square (a fraction of the image width), tiled in filename order
into a near-square grid with 2px black borders between cells, brightened
by 1.3x, and saved as a JPEG. One montage is written per crop ratio (25% and
90% of the image width):

  photos/
  ├── 01.jpg
  ├── 02.jpg
  └── output/
      ├── tiled_image_with_borders_25_percent.jpg
      └── tiled_image_with_borders_90_percent.jpg

There are no options: the directory argument is the only input.")]
struct Cli {
    /// Directory containing the images to tile
    input_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(input_dir) = cli.input_dir else {
        println!("need directory name as argument");
        println!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    };

    match run(&input_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(input_dir: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Stage 1: Scanning {}", input_dir.display());
    let images = scan::scan(input_dir)?;
    output::print_scan_output(&images);

    let config = MontageConfig::default();
    let output_dir = montage::output_directory(input_dir, &config);

    println!("==> Stage 2: Building montages → {}", output_dir.display());
    let (tx, rx) = std::sync::mpsc::channel();
    let result = montage::render_all(
        &colony_crop::imaging::RustBackend::new(),
        &images,
        &output_dir,
        &config,
        Some(tx),
    );
    // The sender is dropped when render_all returns, so this drains and ends.
    for event in rx {
        for line in output::format_montage_event(&event, input_dir) {
            println!("{}", line);
        }
    }
    let manifest = result?;

    output::print_manifest(&manifest);
    Ok(())
}
