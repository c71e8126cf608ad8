//! Sprite Atlas CLI
//!
//! Pack sprites into atlases, assemble cubemaps and sample images.

use clap::{Parser, Subcommand};
use sprite_atlas::loader::decode_png;
use sprite_atlas::{
    assemble_cubemap, build_atlas, evaluate, load_sprites, sample_nearest, save_png, PixelBuffer,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sprite-atlas")]
#[command(author, version, about = "Pack sprites into texture atlases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a directory or ZIP of PNG sprites into one atlas
    Pack {
        /// Sprite source (ZIP or directory)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (without extension); writes .png and .json
        #[arg(short, long)]
        output: PathBuf,

        /// Gutter around each sprite, in texels
        #[arg(short, long, default_value = "0")]
        padding: u32,

        /// Store regions with V flipped
        #[arg(long)]
        flip_y: bool,

        /// Fill gutters with sprite edge texels
        #[arg(long)]
        bleed: bool,
    },

    /// Assemble six PNG faces into a vertical cubemap strip
    Cubemap {
        /// Faces in order: +X -X +Y -Y +Z -Z
        #[arg(num_args = 6, required = true)]
        faces: Vec<PathBuf>,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Mirror every face vertically
        #[arg(long)]
        flip_y: bool,
    },

    /// Sample a PNG at a normalized position
    Sample {
        /// Image to sample
        #[arg(short, long)]
        input: PathBuf,

        /// Horizontal position (0.0 to 1.0)
        x: f32,

        /// Vertical position (0.0 to 1.0)
        y: f32,

        /// Use the nearest texel instead of bilinear filtering
        #[arg(long)]
        nearest: bool,
    },

    /// Show the sprites found in a directory or ZIP
    Info {
        /// Sprite source (ZIP or directory)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            input,
            output,
            padding,
            flip_y,
            bleed,
        } => {
            pack_sprites(&input, &output, padding, flip_y, bleed)?;
        }
        Commands::Cubemap {
            faces,
            output,
            flip_y,
        } => {
            build_cubemap(&faces, &output, flip_y)?;
        }
        Commands::Sample {
            input,
            x,
            y,
            nearest,
        } => {
            sample_image(&input, x, y, nearest)?;
        }
        Commands::Info { input } => {
            show_sprite_info(&input)?;
        }
    }

    Ok(())
}

fn pack_sprites(
    input: &Path,
    output: &Path,
    padding: u32,
    flip_y: bool,
    bleed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading sprites from {:?}...", input);
    let sprites = load_sprites(input)?;
    println!("  Found {} sprites", sprites.len());

    println!("Packing with config:");
    println!("  - Padding: {}", padding);
    println!("  - Flip Y: {}", flip_y);
    println!("  - Bleed: {}", bleed);

    let atlas = build_atlas(sprites, padding, flip_y, bleed)?;
    println!("Built {} atlas", atlas);

    let png_path = output.with_extension("png");
    let json_path = output.with_extension("json");
    save_png(atlas.pixels(), &png_path)?;
    atlas.manifest().save(&json_path)?;

    println!("Exported atlas to {:?}", png_path);
    println!("  Manifest: {:?}", json_path);
    Ok(())
}

fn build_cubemap(
    faces: &[PathBuf],
    output: &Path,
    flip_y: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let buffers = faces
        .iter()
        .map(|path| read_png(path))
        .collect::<Result<Vec<_>, _>>()?;

    let [right, left, up, down, forward, back] = buffers.as_slice() else {
        return Err(format!("expected 6 faces, got {}", buffers.len()).into());
    };

    let cubemap = assemble_cubemap([right, left, up, down, forward, back], flip_y)?;
    println!(
        "Assembled {}x{} cubemap",
        cubemap.face_width(),
        cubemap.face_height()
    );

    save_png(&cubemap.into_strip(), output)?;
    println!("Exported cubemap strip to {:?}", output);
    Ok(())
}

fn sample_image(
    input: &Path,
    x: f32,
    y: f32,
    nearest: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let buffer = read_png(input)?;
    let position = glam::Vec2::new(x, y);

    if nearest {
        let texel = sample_nearest(&buffer, position)?;
        println!("{}", texel);
    } else {
        let color = evaluate(&buffer, position)?;
        println!("{:.4},{:.4},{:.4},{:.4}", color.x, color.y, color.z, color.w);
    }
    Ok(())
}

fn show_sprite_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading sprites from {:?}...", input);
    let sprites = load_sprites(input)?;

    println!("\nSprite Info:");
    println!("  Sprites: {}", sprites.len());
    for sprite in &sprites {
        let transparency = if sprite.pixels().has_transparency() {
            " (transparent)"
        } else {
            ""
        };
        println!("  - {} {}{}", sprite.name(), sprite.pixels(), transparency);
    }
    Ok(())
}

fn read_png(path: &Path) -> Result<PixelBuffer, Box<dyn std::error::Error>> {
    let data = std::fs::read(path)?;
    Ok(decode_png(&data)?)
}
