use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use packer_core::{PackRequest, PackResult, Packer};
use std::path::PathBuf;

mod viz;

#[derive(Parser)]
#[command(name = "packer")]
#[command(about = "3D Box Packer - Distribute cuboid items into boxes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack items into boxes
    Pack {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a 3D visualization page from a saved result
    Visualize {
        /// Original request file (YAML or JSON), for the box dimensions
        #[arg(long)]
        request: PathBuf,

        /// Result file (JSON)
        #[arg(long)]
        result: PathBuf,

        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack { input, output } => {
            pack_command(input, output)?;
        }
        Commands::Visualize {
            request,
            result,
            output,
        } => {
            visualize_command(request, result, output)?;
        }
    }

    Ok(())
}

/// Reads a request file, keyed on its extension (YAML or JSON).
fn load_request(path: &PathBuf) -> Result<PackRequest> {
    let content = std::fs::read_to_string(path)?;
    let request = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
        || path.extension().and_then(|s| s.to_str()) == Some("yml")
    {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(request)
}

fn pack_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading input...".bright_blue());

    let request = load_request(&input)?;

    println!(
        "  {} items to pack",
        request.items.len().to_string().bright_white().bold()
    );
    println!(
        "  {} box types available",
        request.boxes.len().to_string().bright_white().bold()
    );
    println!();

    println!("{}", "🚀 Running packer...".bright_blue());

    // Run packing
    let packer = Packer::new(request)?;
    let result = packer.pack()?;

    println!();
    println!("{}", "✅ Packing complete!".bright_green().bold());
    println!();

    // Display results
    println!("{}", "📊 Results:".bright_yellow().bold());
    for (number, packed) in result.packed_boxes.iter().enumerate() {
        println!(
            "    • Box {} ({}): {} items",
            number + 1,
            packed.box_id.bright_white(),
            packed.contents.len()
        );
    }
    println!();
    println!(
        "  Total boxes: {}",
        result
            .packed_boxes
            .len()
            .to_string()
            .bright_white()
            .bold()
    );
    println!(
        "  Utilization: {}%",
        format!("{:.1}", result.summary.utilization_percent).bright_green()
    );

    if !result.unpacked_items.is_empty() {
        println!();
        println!("  {}", "Unpacked items:".bright_red());
        for item in &result.unpacked_items {
            println!(
                "    • {} ({}x{}x{}) x{}",
                item.id.bright_white(),
                item.w,
                item.h,
                item.d,
                item.quantity
            );
        }
    }

    println!();

    // Save output
    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        // Print to stdout
        let json = serde_json::to_string_pretty(&result)?;
        println!("{}", json);
    }

    Ok(())
}

fn visualize_command(request: PathBuf, result: PathBuf, output: PathBuf) -> Result<()> {
    println!("{}", "🔍 Loading request and result...".bright_blue());

    let request = load_request(&request)?;
    let content = std::fs::read_to_string(&result)?;
    let result: PackResult = serde_json::from_str(&content)?;

    println!("{}", "🎨 Generating visualization...".bright_blue());

    let html = viz::render_html(&result.packed_boxes, &request.boxes);

    // Save HTML
    std::fs::write(&output, html)?;

    println!();
    println!(
        "{} Saved visualization to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}
