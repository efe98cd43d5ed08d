use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use plotvg_cmpimg::{diff_images, encode_png, equal_approx, Codec};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// plotvg: compare rendered plot images and produce visual diffs
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether two images are equal, optionally within a tolerance.
    ///
    /// Prints "equal" and exits 0, or prints "different" and exits 1.
    Compare {
        /// Path to the first image
        a: PathBuf,

        /// Path to the second image
        b: PathBuf,

        /// Codec name (png, jpeg, gif, bmp, tiff, svg). Defaults to the extension of A
        #[clap(short, long)]
        codec: Option<String>,

        /// Maximum per-channel difference, in 8-bit units
        #[clap(short, long, default_value_t = 0)]
        delta: u8,
    },

    /// Write a 16-bit PNG highlighting where two images differ.
    Diff {
        /// Path to the first image
        a: PathBuf,

        /// Path to the second image
        b: PathBuf,

        /// Path to the diff PNG file to be created
        #[clap(short, long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(args.command) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(2);
        }
    }
}

fn run(command: Commands) -> anyhow::Result<i32> {
    match command {
        Commands::Compare {
            a,
            b,
            codec,
            delta,
        } => {
            let codec = match codec {
                Some(name) => Codec::from_name(&name)?,
                None => Codec::from_path(&a)?,
            };
            let a_data = read_input(&a)?;
            let b_data = read_input(&b)?;
            log::info!("comparing {} and {} as {}", a.display(), b.display(), codec.name());

            if equal_approx(codec.name(), &a_data, &b_data, delta)? {
                println!("equal");
                Ok(0)
            } else {
                println!("different");
                Ok(1)
            }
        }
        Commands::Diff { a, b, output } => {
            let a_img = decode_input(&a)?;
            let b_img = decode_input(&b)?;
            let (dst, bounds) = diff_images(&a_img, &b_img);
            let png = encode_png(&dst)?;
            fs::write(&output, png).with_context(|| {
                format!("Failed to write diff output to {}", output.display())
            })?;
            println!(
                "({}, {})-({}, {})",
                bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
            );
            Ok(0)
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn decode_input(path: &Path) -> anyhow::Result<image::DynamicImage> {
    let codec = Codec::from_path(path)?;
    if codec == Codec::Svg {
        bail!("cannot diff {}: svg has no pixel representation", path.display());
    }
    let data = read_input(path)?;
    codec
        .decode(&data)
        .with_context(|| format!("Failed to decode {}", path.display()))
}
