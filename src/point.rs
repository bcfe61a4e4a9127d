// A click in the pixel space of the displayed image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickPoint {
    pub x: f32,
    pub y: f32,
}

impl ClickPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonPoint {
    pub azimuth: f32,   // Degrees clockwise from the zero column, [0, 360)
    pub elevation: f32, // Degrees above (+) or below (-) the horizontal
}

impl HorizonPoint {
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        Self { azimuth, elevation }
    }
}
