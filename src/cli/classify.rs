//! `classify` command: which zone a point falls in.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliResult};
use crate::config::Config;
use crate::constants::{DEFAULT_KEYPAD_HEIGHT, DEFAULT_KEYPAD_WIDTH};
use crate::decoder::classify;
use crate::models::{CircleGeometry, Dimension, Point, Zone};

/// Classify a point on the ring
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Horizontal position in keypad pixels
    #[arg(long, allow_hyphen_values = true)]
    x: f32,

    /// Vertical position in keypad pixels (grows downwards)
    #[arg(long, allow_hyphen_values = true)]
    y: f32,

    /// Keypad width in pixels
    #[arg(long, default_value_t = DEFAULT_KEYPAD_WIDTH)]
    width: u32,

    /// Keypad height in pixels
    #[arg(long, default_value_t = DEFAULT_KEYPAD_HEIGHT)]
    height: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ClassifyOutput {
    x: f32,
    y: f32,
    zone: String,
    angle_degrees: f32,
    distance: f32,
    in_bounds: bool,
    geometry: CircleGeometry,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let dimension = Dimension::new(self.width, self.height);
        let geometry = CircleGeometry::for_keypad(dimension, &config.decoder);
        let point = Point::new(self.x, self.y);
        let zone = classify(point, &geometry, config.decoder.rotation_offset_degrees);

        let output = ClassifyOutput {
            x: self.x,
            y: self.y,
            zone: zone.to_string(),
            angle_degrees: geometry.angle_of(point),
            distance: point.distance_to(geometry.center),
            in_bounds: dimension.contains(point),
            geometry,
        };

        if self.json {
            print_json(&output)?;
        } else {
            match zone {
                Zone::Center => println!("({}, {}) is in the dead zone", self.x, self.y),
                Zone::Sector(sector) => println!(
                    "({}, {}) is in sector {} at {:.1}°",
                    self.x, self.y, sector, output.angle_degrees
                ),
            }
            if !output.in_bounds {
                println!("Note: point lies outside the {}x{} keypad", self.width, self.height);
            }
        }
        Ok(())
    }
}
