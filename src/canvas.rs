use egui::{Pos2, Rect, Vec2};

const DEFAULT_ZOOM: f32 = 1.0;

pub struct Canvas {
    width: f32,
    height: f32,
    offset: Vec2,
    zoom: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn show_image(&mut self, width: f32, height: f32, view_size: Vec2) {
        self.width = width;
        self.height = height;
        self.fit_to(view_size);
    }

    pub fn get_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn zoom_at(&mut self, factor: f32, pos: Pos2, view_rect: Rect) {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * factor).clamp(0.05, 20.0);

        let view_center = view_rect.center() + self.offset;
        let mouse_offset = pos - view_center;
        self.offset -= mouse_offset * (self.zoom / old_zoom - 1.0);
    }

    // Largest zoom that shows the whole image
    pub fn fit_to(&mut self, view_size: Vec2) {
        self.offset = Vec2::ZERO;
        self.zoom = if self.width > 0.0 && self.height > 0.0 && view_size.x > 0.0 && view_size.y > 0.0 {
            (view_size.x / self.width).min(view_size.y / self.height)
        } else {
            DEFAULT_ZOOM
        };
    }

    pub fn get_zoom(&self) -> f32 {
        self.zoom
    }

    pub fn get_screen_rect(&self, view_rect: Rect) -> Rect {
        let center = view_rect.center() + self.offset;
        let half_size = Vec2::new(self.width, self.height) * 0.5 * self.zoom;
        Rect::from_center_size(center, half_size * 2.0)
    }

    pub fn screen_to_image_pos(&self, screen_pos: Pos2, view_rect: Rect) -> Pos2 {
        let screen_rect = self.get_screen_rect(view_rect);
        let image_pos = (screen_pos - screen_rect.min) / self.zoom;
        Pos2::new(image_pos.x, image_pos.y)
    }

    pub fn image_to_screen_pos(&self, image_pos: Pos2, view_rect: Rect) -> Pos2 {
        let screen_rect = self.get_screen_rect(view_rect);
        screen_rect.min + image_pos.to_vec2() * self.zoom
    }

    pub fn contains_image_pos(&self, image_pos: Pos2) -> bool {
        image_pos.x >= 0.0 && image_pos.x <= self.width && image_pos.y >= 0.0 && image_pos.y <= self.height
    }
}
