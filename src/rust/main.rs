use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use greentrash::{
    decode_image, ClassificationResult, ClassifierInput, ProbabilityDistribution, WasteClassifier,
};
use image::DynamicImage;
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Free-text description of the item
    #[arg(short, long, default_value = "")]
    text: String,

    /// Photo of the item (PNG or JPEG)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Model output to decide on, in class order Organic,Recyclable,Reject,Hazardous
    #[arg(short, long, value_delimiter = ',', conflicts_with = "image")]
    probabilities: Option<Vec<f64>>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn load_image(path: &PathBuf) -> Result<DynamicImage> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let image = decode_image(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(image)
}

fn print_result(result: &ClassificationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("\nResults:");
    println!("  Predicted class: {}", result.predicted_class);
    println!("  Confidence: {:.1}%", result.confidence * 100.0);
    println!("  Explanation: {}", result.explanation);
    println!("  Disposal tip: {}", result.disposal_tip);
    if result.needs_feedback {
        println!("  Please confirm this classification.");
    }
    println!("  Probabilities (sorted):");
    for (class, p) in result.probabilities.ranked() {
        println!("    {}: {:.1}%", class, p * 100.0);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start_time = Instant::now();
    let classifier = WasteClassifier::builder().build()?;
    info!("Classifier ready: {:?}", classifier.info());

    let result = match &args.probabilities {
        Some(values) => {
            let probabilities = ProbabilityDistribution::from_slice(values)?;
            classifier.classify(ClassifierInput::Probabilities(&probabilities), &args.text, true)?
        }
        None => {
            let image = args.image.as_ref().map(load_image).transpose()?;
            classifier.classify_input(image.as_ref(), &args.text)?
        }
    };

    print_result(&result, args.json)?;
    info!("Classification took {:.2?}", start_time.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_parse_as_list() {
        let args = Args::try_parse_from(["greentrash", "-p", "0.1,0.2,0.3,0.4", "--json"]).unwrap();
        assert_eq!(args.probabilities, Some(vec![0.1, 0.2, 0.3, 0.4]));
        assert!(args.json);
    }

    #[test]
    fn test_probabilities_conflict_with_image() {
        let result = Args::try_parse_from(["greentrash", "-p", "0.25,0.25,0.25,0.25", "-i", "item.png"]);
        let err = result.err().map(|e| e.kind());
        assert_eq!(err, Some(clap::error::ErrorKind::ArgumentConflict));
    }
}
