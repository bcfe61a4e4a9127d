use crate::error::ExportError;
use crate::profile::HorizonProfile;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const HRZ_EXTENSION: &str = "hrz";
pub const HRZ_HEADER: &str = "Az Alt";

// Layout of the two-column text; the point ordering is chosen separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HrzStyle {
    // No header, whole-degree azimuth, elevation to one decimal
    #[default]
    Rounded,
    // `Az Alt` header, both columns to two decimals
    Labelled,
}

impl HrzStyle {
    pub const ALL: [HrzStyle; 2] = [HrzStyle::Rounded, HrzStyle::Labelled];

    pub fn label(&self) -> &'static str {
        match self {
            HrzStyle::Rounded => "Rounded (0 12.5)",
            HrzStyle::Labelled => "With header (0.00 12.50)",
        }
    }

    fn has_header(&self) -> bool {
        matches!(self, HrzStyle::Labelled)
    }

    fn azimuth_decimals(&self) -> usize {
        match self {
            HrzStyle::Rounded => 0,
            HrzStyle::Labelled => 2,
        }
    }

    fn elevation_decimals(&self) -> usize {
        match self {
            HrzStyle::Rounded => 1,
            HrzStyle::Labelled => 2,
        }
    }
}

// Fixed-point formatting that never prints a negative zero
fn fixed(value: f32, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(digits) if digits.chars().all(|c| c == '0' || c == '.') => digits.to_string(),
        _ => text,
    }
}

pub fn write_hrz<W: Write>(mut writer: W, profile: &HorizonProfile, style: HrzStyle) -> io::Result<()> {
    if style.has_header() {
        writeln!(writer, "{}", HRZ_HEADER)?;
    }
    for point in profile {
        writeln!(
            writer,
            "{} {}",
            fixed(point.azimuth, style.azimuth_decimals()),
            fixed(point.elevation, style.elevation_decimals())
        )?;
    }
    writer.flush()
}

pub fn render_hrz(profile: &HorizonProfile, style: HrzStyle) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_hrz(&mut buffer, profile, style);
    String::from_utf8_lossy(&buffer).into_owned()
}

pub fn save_hrz(path: &Path, profile: &HorizonProfile, style: HrzStyle) -> Result<(), ExportError> {
    let write_error = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    write_hrz(BufWriter::new(file), profile, style).map_err(write_error)?;

    log::info!("Horizon file saved to {:?} ({} points)", path, profile.len());
    Ok(())
}
