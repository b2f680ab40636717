//! `alnshade`: look up feature colours from the command line.
//!
//! ```text
//! alnshade <descriptor> <value>...   print "value<TAB>hex" per value
//! alnshade --schema                  print the options JSON schema
//! ```
#![allow(clippy::print_stdout)]

use alnshade::feature::{FeatureColour, SequenceFeature};
use alnshade::options::Options;

fn usage() -> ! {
    log::error!(
        "Usage: alnshade <colour descriptor> <value>... | alnshade --schema"
    );
    std::process::exit(1);
}

fn print_schema() {
    match serde_json::to_string_pretty(&Options::json_schema()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((first, values)) = args.split_first() else {
        usage();
    };
    if first == "--schema" {
        print_schema();
        return;
    }
    if values.is_empty() {
        usage();
    }

    let colour = match FeatureColour::parse(first) {
        Ok(colour) => colour,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("{}", colour.description());

    for value in values {
        let score = value.trim().parse().unwrap_or_else(|_| {
            log::warn!("'{value}' is not a number; treating it as no value");
            f32::NAN
        });
        let feature = SequenceFeature::new("cli")
            .with_score(score)
            .with_description(value.as_str());
        let hex = colour
            .colour_for(&feature)
            .map_or_else(|| "none".to_owned(), alnshade::Rgb::to_hex);
        println!("{value}\t{hex}");
    }
}
