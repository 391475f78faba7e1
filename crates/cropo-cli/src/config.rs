//! Crop selection flags shared by every subcommand.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context as _};
use clap::{Args, ValueEnum};
use cropo_core::decode::DecodedImage;
use cropo_core::geometry::{DISPLAY_MAX_HEIGHT, DISPLAY_MAX_WIDTH};
use cropo_core::{constrain_selection, initial_selection, CropRegion, DisplayedImage};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitArg {
    /// Rendered pixels.
    Px,
    /// Percent of the rendered size.
    Percent,
}

/// A `WIDTHxHEIGHT` pair, e.g. `300x400`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedSize {
    pub width: f64,
    pub height: f64,
}

impl FromStr for RenderedSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid size '{v}': {e}"))
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Width of the box the photo is displayed in.
    #[arg(long, default_value_t = DISPLAY_MAX_WIDTH)]
    pub display_width: f64,

    /// Height of the box the photo is displayed in.
    #[arg(long, default_value_t = DISPLAY_MAX_HEIGHT)]
    pub display_height: f64,

    /// Exact rendered size (WIDTHxHEIGHT); overrides the display box.
    #[arg(long)]
    pub rendered: Option<RenderedSize>,

    /// Unit of --x/--y/--width/--height.
    #[arg(long, value_enum, default_value_t = UnitArg::Px)]
    pub unit: UnitArg,

    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<f64>,

    #[arg(long)]
    pub width: Option<f64>,

    #[arg(long)]
    pub height: Option<f64>,

    /// JSON crop region (`{"unit":"px","x":..,"y":..,"width":..,"height":..}`).
    #[arg(long, conflicts_with_all = ["x", "y", "width", "height"])]
    pub crop_file: Option<PathBuf>,

    /// Fit the selection to the passport ratio and the photo bounds first.
    #[arg(long, default_value_t = false)]
    pub constrain: bool,
}

impl SelectionArgs {
    /// Lay the decoded photo out the way the crop coordinates expect.
    pub fn layout(&self, image: DecodedImage) -> anyhow::Result<DisplayedImage> {
        let displayed = match self.rendered {
            Some(size) => DisplayedImage::with_rendered_size(image, size.width, size.height)?,
            None => DisplayedImage::fit_within(image, self.display_width, self.display_height)?,
        };
        Ok(displayed)
    }

    /// The crop to rasterize. Without any crop flags, the selection a fresh
    /// photo starts with is used.
    pub fn crop_region(&self, image: &DisplayedImage) -> anyhow::Result<CropRegion> {
        let crop = match (&self.crop_file, self.coordinates()?) {
            (Some(path), _) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("read crop file '{}'", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("parse crop file '{}'", path.display()))?
            }
            (None, Some(crop)) => crop,
            (None, None) => return Ok(initial_selection(image.geometry())),
        };

        if self.constrain {
            Ok(constrain_selection(&crop, image.geometry()))
        } else {
            Ok(crop)
        }
    }

    fn coordinates(&self) -> anyhow::Result<Option<CropRegion>> {
        match (self.x, self.y, self.width, self.height) {
            (None, None, None, None) => Ok(None),
            (Some(x), Some(y), Some(width), Some(height)) => Ok(Some(match self.unit {
                UnitArg::Px => CropRegion::pixels(x, y, width, height),
                UnitArg::Percent => CropRegion::percent(x, y, width, height),
            })),
            _ => bail!("--x, --y, --width and --height must be given together"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use cropo_core::{CropUnit, PASSPORT_ASPECT};

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        selection: SelectionArgs,
    }

    fn parse(args: &[&str]) -> SelectionArgs {
        let argv = std::iter::once("cropo").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().selection
    }

    fn photo(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![0u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_rendered_size_parse() {
        assert_eq!(
            "300x400".parse::<RenderedSize>().unwrap(),
            RenderedSize {
                width: 300.0,
                height: 400.0
            }
        );
        assert!("300".parse::<RenderedSize>().is_err());
        assert!("axb".parse::<RenderedSize>().is_err());
    }

    #[test]
    fn test_default_layout_fits_display_box() {
        let args = parse(&[]);
        let image = args.layout(photo(900, 1200)).unwrap();

        assert!((image.geometry().rendered_height() - 384.0).abs() < 1e-9);
        assert!((image.geometry().rendered_width() - 288.0).abs() < 1e-9);
    }

    #[test]
    fn test_rendered_overrides_display_box() {
        let args = parse(&["--rendered", "300x400"]);
        let image = args.layout(photo(900, 1200)).unwrap();

        assert_eq!(image.geometry().scale_x(), 3.0);
        assert_eq!(image.geometry().scale_y(), 3.0);
    }

    #[test]
    fn test_explicit_pixel_crop() {
        let args = parse(&["--x", "10", "--y", "20", "--width", "140", "--height", "180"]);
        let image = args.layout(photo(900, 1200)).unwrap();

        let crop = args.crop_region(&image).unwrap();
        assert_eq!(crop, CropRegion::pixels(10.0, 20.0, 140.0, 180.0));
    }

    #[test]
    fn test_percent_unit() {
        let args = parse(&[
            "--unit", "percent", "--x", "0", "--y", "0", "--width", "50", "--height", "50",
        ]);
        let image = args.layout(photo(100, 100)).unwrap();

        let crop = args.crop_region(&image).unwrap();
        assert_eq!(crop.unit, CropUnit::Percent);
    }

    #[test]
    fn test_partial_coordinates_rejected() {
        let args = parse(&["--x", "10", "--width", "140"]);
        let image = args.layout(photo(100, 100)).unwrap();

        assert!(args.crop_region(&image).is_err());
    }

    #[test]
    fn test_no_flags_uses_initial_selection() {
        let args = parse(&[]);
        let image = args.layout(photo(900, 1200)).unwrap();

        let crop = args.crop_region(&image).unwrap();
        assert_eq!(crop, initial_selection(image.geometry()));
    }

    #[test]
    fn test_constrain_flag() {
        let args = parse(&[
            "--rendered", "300x400", "--x", "0", "--y", "0", "--width", "50", "--height", "50",
            "--constrain",
        ]);
        let image = args.layout(photo(900, 1200)).unwrap();

        let crop = args.crop_region(&image).unwrap();
        assert!((crop.aspect() - PASSPORT_ASPECT).abs() < 1e-9);
        assert!((crop.width - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_crop_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crop.json");
        std::fs::write(
            &path,
            r#"{"unit":"px","x":5,"y":6,"width":140,"height":180}"#,
        )
        .unwrap();

        let args = parse(&["--crop-file", path.to_str().unwrap()]);
        let image = args.layout(photo(900, 1200)).unwrap();

        let crop = args.crop_region(&image).unwrap();
        assert_eq!(crop, CropRegion::pixels(5.0, 6.0, 140.0, 180.0));
    }

    #[test]
    fn test_crop_file_conflicts_with_coordinates() {
        let result = TestCli::try_parse_from(["cropo", "--crop-file", "c.json", "--x", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_crop_file_reports_path() {
        let args = parse(&["--crop-file", "/nonexistent/crop.json"]);
        let image = args.layout(photo(10, 10)).unwrap();

        let err = args.crop_region(&image).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/crop.json"));
    }
}
