//! Transform command implementation.
//!
//! Applies the single-image operations in a fixed order: crop, resize,
//! then colour adjustment.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use crate::codec::{load_image, save_image};
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::transform::{resample, Adjustments, Crop, ResampleMethod};

/// Crop, resize and colour-adjust a single image
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Image to read
    pub input: PathBuf,

    /// Where to write the result (.png or .jpg)
    #[arg(long, short)]
    pub output: PathBuf,

    /// Cut a rectangle: x,y,width,height
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_rect, allow_hyphen_values = true,
          conflicts_with_all = ["circle", "ellipse"])]
    pub crop: Option<Crop>,

    /// Cut a circle: cx,cy,r
    #[arg(long, value_name = "CX,CY,R", value_parser = parse_circle, allow_hyphen_values = true,
          conflicts_with = "ellipse")]
    pub circle: Option<Crop>,

    /// Cut an ellipse: cx,cy,rx,ry
    #[arg(long, value_name = "CX,CY,RX,RY", value_parser = parse_ellipse, allow_hyphen_values = true)]
    pub ellipse: Option<Crop>,

    /// Resample to WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub resize: Option<(u32, u32)>,

    /// Interpolation used by --resize
    #[arg(long, value_enum, default_value_t = ResampleMethod::Nearest)]
    pub method: ResampleMethod,

    /// Scale hue by a percentage (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    pub hue: Option<f32>,

    /// Scale saturation by a percentage (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    pub saturation: Option<f32>,

    /// Scale brightness by a percentage (-100..100)
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<f32>,

    /// Set opacity to a percentage of the current alpha (0..100)
    #[arg(long)]
    pub opacity: Option<f32>,
}

impl TransformArgs {
    fn crop(&self) -> Option<Crop> {
        self.crop.or(self.circle).or(self.ellipse)
    }

    fn adjustments(&self) -> Adjustments {
        Adjustments {
            hue: self.hue,
            saturation: self.saturation,
            brightness: self.brightness,
            opacity: self.opacity,
        }
    }
}

pub fn run(args: TransformArgs, printer: &Printer) -> Result<()> {
    let mut img = load_image(&args.input)?;
    printer.status(
        "Loaded",
        &format!("{} ({}x{})", display_path(&args.input), img.width(), img.height()),
    );

    if let Some(crop) = args.crop() {
        img = crop.apply(&img);
        printer.info("Cropped", &format!("{}x{}", img.width(), img.height()));
    }

    if let Some((width, height)) = args.resize {
        img = resample(&img, width, height, args.method);
        printer.info("Resized", &format!("{}x{} ({:?})", width, height, args.method));
    }

    let adjustments = args.adjustments();
    if !adjustments.is_identity() {
        img = adjustments.apply(&img);
        printer.info("Adjusted", &describe(&adjustments));
    }

    save_image(&img, &args.output)?;
    printer.success("Wrote", &display_path(&args.output));
    Ok(())
}

fn describe(adjustments: &Adjustments) -> String {
    [
        ("hue", adjustments.hue),
        ("saturation", adjustments.saturation),
        ("brightness", adjustments.brightness),
        ("opacity", adjustments.opacity),
    ]
    .iter()
    .filter_map(|(name, v)| v.map(|v| format!("{name} {v}")))
    .collect::<Vec<_>>()
    .join(", ")
}

fn parse_list<T: FromStr, const N: usize>(s: &str) -> std::result::Result<[T; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated values, got '{}'", N, s));
    }
    let values = parts
        .iter()
        .map(|p| p.parse::<T>().map_err(|_| format!("invalid number '{}'", p)))
        .collect::<std::result::Result<Vec<T>, String>>()?;
    values
        .try_into()
        .map_err(|_| format!("expected {} values", N))
}

fn parse_rect(s: &str) -> std::result::Result<Crop, String> {
    let [x, y, width, height] = parse_list::<i64, 4>(s)?;
    Ok(Crop::Rect {
        x,
        y,
        width: non_negative(width)?,
        height: non_negative(height)?,
    })
}

fn parse_circle(s: &str) -> std::result::Result<Crop, String> {
    let [cx, cy, r] = parse_list::<i64, 3>(s)?;
    Ok(Crop::Circle {
        cx,
        cy,
        r: non_negative(r)?,
    })
}

fn parse_ellipse(s: &str) -> std::result::Result<Crop, String> {
    let [cx, cy, rx, ry] = parse_list::<i64, 4>(s)?;
    Ok(Crop::Ellipse {
        cx,
        cy,
        rx: non_negative(rx)?,
        ry: non_negative(ry)?,
    })
}

fn parse_size(s: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    Ok((w, h))
}

fn non_negative(v: i64) -> std::result::Result<u32, String> {
    u32::try_from(v).map_err(|_| format!("size must be non-negative, got {}", v))
}
