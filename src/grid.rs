use crate::angle::AngleConverter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub degrees: f32,
    pub position: f32,
}

pub struct AngleGrid {
    step: f32,
    visible: bool,
}

impl AngleGrid {
    pub const MIN_STEP: f32 = 5.0;
    pub const MAX_STEP: f32 = 90.0;

    pub fn new(step: f32, visible: bool) -> Self {
        Self {
            step: step.clamp(Self::MIN_STEP, Self::MAX_STEP),
            visible,
        }
    }

    pub fn get_step(&self) -> f32 {
        self.step
    }

    pub fn set_step(&mut self, step: f32) {
        self.step = step.clamp(Self::MIN_STEP, Self::MAX_STEP);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // Columns for every multiple of the step below 360
    pub fn azimuth_lines(&self, converter: &AngleConverter) -> Vec<GridLine> {
        let count = (360.0 / self.step).ceil() as usize;
        (0..count)
            .map(|i| i as f32 * self.step)
            .filter(|degrees| *degrees < 360.0)
            .map(|degrees| GridLine {
                degrees,
                position: converter.column_for_azimuth(degrees),
            })
            .collect()
    }

    pub fn elevation_lines(&self, converter: &AngleConverter) -> Vec<GridLine> {
        let per_side = (90.0 / self.step).floor() as i32;
        (-per_side..=per_side)
            .map(|i| i as f32 * self.step)
            .map(|degrees| GridLine {
                degrees,
                position: converter.row_for_elevation(degrees),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_clamped() {
        let mut grid = AngleGrid::new(1.0, true);
        assert_eq!(grid.get_step(), AngleGrid::MIN_STEP);
        grid.set_step(400.0);
        assert_eq!(grid.get_step(), AngleGrid::MAX_STEP);
    }

    #[test]
    fn azimuth_lines_start_at_zero_column() {
        let grid = AngleGrid::new(90.0, true);
        let converter = AngleConverter::new(360.0, 180.0, 100.0);
        let lines = grid.azimuth_lines(&converter);

        let degrees: Vec<f32> = lines.iter().map(|l| l.degrees).collect();
        assert_eq!(degrees, vec![0.0, 90.0, 180.0, 270.0]);
        assert_eq!(lines[0].position, 100.0);
        assert!((lines[3].position - 10.0).abs() < 1e-3);
    }

    #[test]
    fn elevation_lines_are_symmetric_about_horizon() {
        let grid = AngleGrid::new(30.0, true);
        let converter = AngleConverter::new(360.0, 180.0, 0.0);
        let lines = grid.elevation_lines(&converter);

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].degrees, -90.0);
        assert_eq!(lines[0].position, 180.0);
        assert_eq!(lines[3].degrees, 0.0);
        assert_eq!(lines[3].position, 90.0);
        assert_eq!(lines[6].position, 0.0);
    }

    #[test]
    fn uneven_step_stays_inside_range() {
        let grid = AngleGrid::new(35.0, true);
        let converter = AngleConverter::new(360.0, 180.0, 0.0);

        assert!(grid.azimuth_lines(&converter).iter().all(|l| l.degrees < 360.0));
        let elevations: Vec<f32> = grid.elevation_lines(&converter).iter().map(|l| l.degrees).collect();
        assert_eq!(elevations, vec![-70.0, -35.0, 0.0, 35.0, 70.0]);
    }
}
