//! Renders a demo scene exercising every shape and writes it to an image
//! file. Useful for eyeballing crisp output after rasterizer changes.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crispcanvas::{Canvas, OutputFormat, Result, write_image};

#[derive(Parser, Debug)]
#[command(name = "crispdemo", about = "Render the crispcanvas demo scene")]
struct Args {
  /// Output file path
  #[arg(short, long, default_value = "demo.png")]
  output: String,

  /// Canvas width in pixels
  #[arg(long, default_value_t = 400)]
  width: u32,

  /// Canvas height in pixels
  #[arg(long, default_value_t = 300)]
  height: u32,

  /// Encode as JPEG at the given quality instead of PNG
  #[arg(long)]
  jpeg_quality: Option<u8>,
}

fn draw_scene(canvas: &mut Canvas) -> Result<()> {
  // Background
  canvas.set_fill_style("#f5f0e8")?;
  canvas.fill_rect(0.0, 0.0, canvas.width() as f32, canvas.height() as f32);

  // Crisp 1px grid lines every 50px
  canvas.set_stroke_style("#d8d0c0")?;
  canvas.set_line_width(1.0);
  let (w, h) = (canvas.width() as f32, canvas.height() as f32);
  let mut x = 50.0;
  while x < w {
    canvas.stroke_line(x, 0.0, x, h);
    x += 50.0;
  }
  let mut y = 50.0;
  while y < h {
    canvas.stroke_line(0.0, y, w, y);
    y += 50.0;
  }

  // A filled and stroked rect with parity-adjusted edges
  canvas.set_fill_style("#2d8f4e")?;
  canvas.set_stroke_style("#1a4d2e")?;
  canvas.set_line_width(3.0);
  canvas.fill_and_stroke_rect(30.0, 30.0, 90.0, 70.0);

  // Rounded rect
  canvas.set_fill_style("rgba(220, 80, 60, 0.85)")?;
  canvas.fill_rounded_rect(150.0, 30.0, 100.0, 70.0, 12.0);
  canvas.set_stroke_style("#7a2418")?;
  canvas.set_line_width(1.0);
  canvas.stroke_rounded_rect(150.0, 30.0, 100.0, 70.0, 12.0);

  // Circle family: fill, 1px outline, thick ring
  canvas.set_fill_style("#3b6fb5")?;
  canvas.fill_circle(70.0, 180.0, 40.0);
  canvas.set_stroke_style("#000")?;
  canvas.stroke_circle(70.0, 180.0, 46.0);
  canvas.set_stroke_style("rgba(59, 111, 181, 0.5)")?;
  canvas.set_line_width(6.0);
  canvas.stroke_circle(180.0, 180.0, 40.0);

  // Pie slices
  canvas.set_fill_style("#c9a227")?;
  canvas.fill_arc(300.0, 180.0, 45.0, 0.0, 120.0);
  canvas.set_fill_style("#8f6f1b")?;
  canvas.fill_arc(300.0, 180.0, 45.0, 120.0, 200.0);

  // A rotated rect through the quad path, inside a clip
  canvas.save();
  canvas.begin_path();
  canvas.rect(260.0, 20.0, 130.0, 110.0);
  canvas.clip();
  canvas.translate(325.0, 75.0);
  canvas.rotate(0.4);
  canvas.set_fill_style("rgba(90, 50, 140, 0.9)")?;
  canvas.fill_rect(-45.0, -35.0, 90.0, 70.0);
  canvas.restore()?;

  Ok(())
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let args = Args::parse();
  let mut canvas = Canvas::new(args.width, args.height)?;
  draw_scene(&mut canvas)?;

  let format = match args.jpeg_quality {
    Some(q) => OutputFormat::Jpeg(q),
    None => OutputFormat::Png,
  };
  write_image(&canvas, &args.output, format)?;
  println!("wrote {}", args.output);
  Ok(())
}
