use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use drawcheck::{
    rasterize, AsserterConfig, Color, MismatchMode, PixelColorAsserter, RecordingReporter,
    Renderable, Scene,
};

/// Render a JSON scene and check that every pixel is one color
#[derive(Parser, Debug)]
#[command(name = "drawcheck", version, about)]
struct Args {
    /// Scene file (intrinsic size plus paint commands)
    scene: PathBuf,

    /// Expected color as #RRGGBB or #AARRGGBB
    #[arg(short, long, required_unless_present = "digest")]
    color: Option<Color>,

    /// Render width; defaults to the scene's intrinsic width
    #[arg(long, requires = "height")]
    width: Option<i32>,

    /// Render height; defaults to the scene's intrinsic height
    #[arg(long, requires = "width")]
    height: Option<i32>,

    /// Print the SHA-256 digest of the rendered pixels instead of checking
    #[arg(long)]
    digest: bool,
}

/// Returns `true` when every pixel matched (or a digest was printed).
fn run(args: Args, out: &mut impl Write) -> anyhow::Result<bool> {
    let scene = Scene::load(&args.scene)
        .with_context(|| format!("loading scene {}", args.scene.display()))?;
    let mut drawable = scene.into_drawable();
    let prefix = args.scene.display().to_string();

    if args.digest {
        let width = args.width.unwrap_or_else(|| drawable.intrinsic_width());
        let height = args.height.unwrap_or_else(|| drawable.intrinsic_height());
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            anyhow::bail!("cannot rasterize at {}x{}", width, height);
        };
        writeln!(out, "{}", rasterize(&mut drawable, w, h)?.digest_hex())?;
        return Ok(true);
    }

    let Some(color) = args.color else {
        anyhow::bail!("--color is required unless --digest is given");
    };
    let asserter = PixelColorAsserter::new(AsserterConfig::default());
    let mut reporter = RecordingReporter::new();
    match (args.width, args.height) {
        (Some(w), Some(h)) => {
            if let Err(e) = asserter.assert_all_same_color_sized(
                &prefix,
                &mut drawable,
                w,
                h,
                color,
                MismatchMode::Raise,
                &mut reporter,
            ) {
                if e.mismatch().is_some() {
                    writeln!(out, "{}", e)?;
                    return Ok(false);
                }
                return Err(e.into());
            }
        }
        _ => asserter.assert_all_same_color(&prefix, &mut drawable, color, &mut reporter)?,
    }

    for failure in reporter.failures() {
        writeln!(out, "{}", failure)?;
    }
    if reporter.is_clean() {
        writeln!(out, "ok")?;
    }
    Ok(reporter.is_clean())
}

fn exit_code(result: &anyhow::Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let result = run(Args::parse(), &mut io::stdout().lock());
    if let Err(e) = &result {
        eprintln!("drawcheck: {:#}", e);
    }
    ExitCode::from(exit_code(&result))
}
