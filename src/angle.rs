use crate::point::{ClickPoint, HorizonPoint};

// The panorama spans the full vertical half-sphere
pub const VERTICAL_FOV_DEG: f32 = 180.0;

const FULL_TURN_DEG: f32 = 360.0;

/// Maps image pixels to azimuth/elevation for one image and zero column.
/// Width and height are in the pixel space the clicks were recorded in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleConverter {
    width: f32,
    height: f32,
    azimuth_zero: f32,
}

impl AngleConverter {
    pub fn new(width: f32, height: f32, azimuth_zero: f32) -> Self {
        Self {
            width,
            height,
            azimuth_zero,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn azimuth_zero(&self) -> f32 {
        self.azimuth_zero
    }

    // Unrounded azimuth in [0, 360); columns left of the zero line wrap around
    pub fn azimuth_exact(&self, x: f32) -> f32 {
        let offset = (x - self.azimuth_zero).rem_euclid(self.width);
        let degrees = offset / self.width * FULL_TURN_DEG;
        // rem_euclid can return the full width for tiny negative offsets
        if degrees >= FULL_TURN_DEG {
            0.0
        } else {
            degrees
        }
    }

    /// Azimuth of a pixel column rounded to a whole degree, always in `[0, 360)`.
    pub fn azimuth(&self, x: f32) -> f32 {
        // An offset just short of a full width rounds up to 360
        self.azimuth_exact(x).round() % FULL_TURN_DEG
    }

    // +90 at the top edge, -90 at the bottom
    pub fn elevation(&self, y: f32) -> f32 {
        let half_height = self.height / 2.0;
        (half_height - y) / half_height * (VERTICAL_FOV_DEG / 2.0)
    }

    pub fn convert(&self, point: ClickPoint) -> HorizonPoint {
        HorizonPoint::new(self.azimuth(point.x), self.elevation(point.y))
    }

    pub fn convert_exact(&self, point: ClickPoint) -> HorizonPoint {
        HorizonPoint::new(self.azimuth_exact(point.x), self.elevation(point.y))
    }

    pub fn is_right_of_zero(&self, x: f32) -> bool {
        x >= self.azimuth_zero
    }

    pub fn column_for_azimuth(&self, azimuth: f32) -> f32 {
        (self.azimuth_zero + azimuth / FULL_TURN_DEG * self.width).rem_euclid(self.width)
    }

    pub fn row_for_elevation(&self, elevation: f32) -> f32 {
        let half_height = self.height / 2.0;
        half_height - elevation / (VERTICAL_FOV_DEG / 2.0) * half_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_column_has_zero_azimuth() {
        for width in [1.0, 360.0, 1023.0, 8000.0] {
            let converter = AngleConverter::new(width, 100.0, width / 3.0);
            assert_eq!(converter.azimuth(width / 3.0), 0.0);
        }
    }

    #[test]
    fn columns_left_of_zero_wrap_around() {
        let converter = AngleConverter::new(360.0, 180.0, 100.0);
        assert_eq!(converter.azimuth(200.0), 100.0);
        assert_eq!(converter.azimuth(50.0), 310.0);
        assert_eq!(converter.azimuth(0.0), 260.0);
    }

    #[test]
    fn azimuth_rounding_up_to_full_turn_wraps_to_zero() {
        let converter = AngleConverter::new(1000.0, 100.0, 0.0);
        // 999 / 1000 * 360 = 359.64
        assert_eq!(converter.azimuth(999.0), 0.0);
        assert_eq!(converter.azimuth(998.0), 359.0);
    }

    #[test]
    fn exact_azimuth_keeps_fractions() {
        let converter = AngleConverter::new(1000.0, 500.0, 0.0);
        assert!((converter.azimuth_exact(5.0) - 1.8).abs() < 1e-4);
        assert!((converter.azimuth_exact(12.0) - 4.32).abs() < 1e-4);
        assert_eq!(converter.azimuth(12.0), 4.0);

        let converter = AngleConverter::new(360.0, 180.0, 100.0);
        assert!((converter.azimuth_exact(50.5) - 310.5).abs() < 1e-3);
        assert!(converter.azimuth_exact(99.99999) < 360.0);
    }

    #[test]
    fn elevation_edges_and_center() {
        let converter = AngleConverter::new(360.0, 180.0, 0.0);
        assert_eq!(converter.elevation(0.0), 90.0);
        assert_eq!(converter.elevation(180.0), -90.0);
        assert_eq!(converter.elevation(90.0), 0.0);
        assert_eq!(converter.elevation(45.0), 45.0);
    }

    #[test]
    fn elevation_is_not_rounded() {
        let converter = AngleConverter::new(100.0, 200.0, 0.0);
        assert!((converter.elevation(99.0) - 0.9).abs() < 1e-4);
    }

    #[test]
    fn partition_predicate_includes_zero_column() {
        let converter = AngleConverter::new(360.0, 180.0, 100.0);
        assert!(converter.is_right_of_zero(100.0));
        assert!(converter.is_right_of_zero(359.0));
        assert!(!converter.is_right_of_zero(99.5));
    }

    #[test]
    fn inverse_mappings_land_on_expected_pixels() {
        let converter = AngleConverter::new(360.0, 180.0, 100.0);
        assert_eq!(converter.column_for_azimuth(0.0), 100.0);
        assert!((converter.column_for_azimuth(310.0) - 50.0).abs() < 1e-3);
        assert_eq!(converter.row_for_elevation(90.0), 0.0);
        assert_eq!(converter.row_for_elevation(0.0), 90.0);
        assert_eq!(converter.row_for_elevation(-90.0), 180.0);
    }

    proptest! {
        #[test]
        fn azimuth_stays_in_range(
            width in 1u32..10_000,
            x_frac in 0.0f32..1.0,
            zero_frac in 0.0f32..1.0,
        ) {
            let width = width as f32;
            let converter = AngleConverter::new(width, 100.0, (zero_frac * width).floor());
            let azimuth = converter.azimuth((x_frac * width).floor());
            prop_assert!((0.0..360.0).contains(&azimuth));
            prop_assert_eq!(azimuth, azimuth.round());
            prop_assert!((0.0..360.0).contains(&converter.azimuth_exact(x_frac * width)));
        }

        #[test]
        fn elevation_stays_in_range(height in 1u32..10_000, y_frac in 0.0f32..=1.0) {
            let height = height as f32;
            let converter = AngleConverter::new(100.0, height, 0.0);
            let elevation = converter.elevation(y_frac * height);
            prop_assert!((-90.0001..=90.0001).contains(&elevation));
        }
    }
}
