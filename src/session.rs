use crate::angle::AngleConverter;
use crate::error::{ExportError, ProfileError};
use crate::hrz::{self, HrzStyle};
use crate::point::ClickPoint;
use crate::profile::{self, HorizonProfile, ProfileOrdering};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    pub style: HrzStyle,
    pub ordering: ProfileOrdering,
}

/// Marking state for the one image being worked on.
#[derive(Debug, Clone, Default)]
pub struct Session {
    image_size: Option<(f32, f32)>,
    clicks: Vec<ClickPoint>,
    azimuth_zero: Option<f32>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // Start over on a new image
    pub fn load_image(&mut self, width: f32, height: f32) {
        self.image_size = Some((width, height));
        self.reset();
        log::info!("Session started on {}x{} image", width, height);
    }

    pub fn reset(&mut self) {
        self.clicks.clear();
        self.azimuth_zero = None;
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        self.clicks.push(ClickPoint::new(x, y));
        log::debug!("Point {} at ({:.1}, {:.1})", self.clicks.len(), x, y);
    }

    pub fn set_azimuth_zero(&mut self, x: f32) {
        self.azimuth_zero = Some(x);
        log::info!("Azimuth zero set at column {:.1}", x);
    }

    pub fn clicks(&self) -> &[ClickPoint] {
        &self.clicks
    }

    pub fn azimuth_zero(&self) -> Option<f32> {
        self.azimuth_zero
    }

    pub fn image_size(&self) -> Option<(f32, f32)> {
        self.image_size
    }

    pub fn converter(&self) -> Option<AngleConverter> {
        let (width, height) = self.image_size?;
        let azimuth_zero = self.azimuth_zero?;
        Some(AngleConverter::new(width, height, azimuth_zero))
    }

    pub fn is_ready(&self) -> bool {
        self.check_ready().is_ok()
    }

    fn check_ready(&self) -> Result<AngleConverter, ProfileError> {
        if self.image_size.is_none() {
            return Err(ProfileError::NoImage);
        }
        if self.clicks.is_empty() {
            return Err(ProfileError::NoPoints);
        }
        self.converter().ok_or(ProfileError::NoAzimuthZero)
    }

    pub fn build_profile(&self, ordering: ProfileOrdering) -> Result<HorizonProfile, ProfileError> {
        let converter = self.check_ready()?;
        profile::build_profile(&self.clicks, &converter, ordering)
    }

    pub fn export_profile(&self, path: &Path, options: &ExportOptions) -> Result<HorizonProfile, ExportError> {
        let profile = self.build_profile(options.ordering)?;
        hrz::save_hrz(path, &profile, options.style)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> Session {
        let mut session = Session::new();
        session.load_image(360.0, 180.0);
        session.add_point(100.0, 90.0);
        session.add_point(200.0, 0.0);
        session.add_point(50.0, 180.0);
        session.set_azimuth_zero(100.0);
        session
    }

    #[test]
    fn preconditions_are_reported_in_order() {
        let mut session = Session::new();
        assert_eq!(
            session.build_profile(ProfileOrdering::ClickOrder),
            Err(ProfileError::NoImage)
        );

        session.load_image(360.0, 180.0);
        assert_eq!(
            session.build_profile(ProfileOrdering::ClickOrder),
            Err(ProfileError::NoPoints)
        );

        session.add_point(10.0, 10.0);
        assert_eq!(
            session.build_profile(ProfileOrdering::ClickOrder),
            Err(ProfileError::NoAzimuthZero)
        );
        assert!(!session.is_ready());

        session.set_azimuth_zero(0.0);
        assert!(session.is_ready());
    }

    #[test]
    fn clicks_keep_insertion_order() {
        let session = ready_session();
        let xs: Vec<f32> = session.clicks().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![100.0, 200.0, 50.0]);
    }

    #[test]
    fn zero_can_be_set_after_points() {
        let session = ready_session();
        let profile = session.build_profile(ProfileOrdering::ClickOrder).unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.points()[2].azimuth, 310.0);
    }

    #[test]
    fn loading_an_image_starts_over() {
        let mut session = ready_session();
        session.load_image(720.0, 360.0);
        assert!(session.clicks().is_empty());
        assert_eq!(session.azimuth_zero(), None);
        assert_eq!(session.image_size(), Some((720.0, 360.0)));
    }

    #[test]
    fn reset_keeps_image() {
        let mut session = ready_session();
        session.reset();
        assert!(session.clicks().is_empty());
        assert!(session.converter().is_none());
        assert_eq!(session.image_size(), Some((360.0, 180.0)));
    }

    #[test]
    fn export_without_preconditions_writes_nothing() {
        let path = std::env::temp_dir().join(format!("horizon_marker_unready_{}.hrz", std::process::id()));
        let session = Session::new();

        let result = session.export_profile(&path, &ExportOptions::default());
        assert!(matches!(result, Err(ExportError::Profile(ProfileError::NoImage))));
        assert!(!path.exists());
    }

    #[test]
    fn export_writes_profile() {
        let path = std::env::temp_dir().join(format!("horizon_marker_session_{}.hrz", std::process::id()));
        let options = ExportOptions {
            style: HrzStyle::Labelled,
            ordering: ProfileOrdering::Ascending,
        };

        let profile = ready_session().export_profile(&path, &options).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(profile.len(), 3);
        assert_eq!(written, "Az Alt\n0.00 0.00\n100.00 90.00\n310.00 -90.00\n");
    }
}
