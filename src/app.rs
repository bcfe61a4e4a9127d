use crate::canvas::Canvas;
use crate::ui::{Settings, UiState};
use clipboard::ClipboardContext;
use clipboard::ClipboardProvider;
use egui::{Color32, Context, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use horizon_marker::hrz::HRZ_EXTENSION;
use horizon_marker::{
    render_hrz, AngleConverter, AngleGrid, ClickPoint, HorizonProfile, HrzStyle, ProfileOrdering, Session,
};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "JPG"];

struct LoadedImage {
    path: PathBuf,
    texture: egui::TextureHandle,
}

pub struct HorizonMarkerApp {
    canvas: Canvas,
    grid: AngleGrid,
    session: Session,
    image: Option<LoadedImage>,
    ui_state: UiState,
    clipboard: Option<ClipboardContext>,
    // Fit the image to the panel on the next frame
    fit_pending: bool,
}

impl HorizonMarkerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        cc.egui_ctx.set_style(style);

        let settings: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let clipboard = match ClipboardProvider::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("Clipboard unavailable: {}", e);
                None
            }
        };

        Self {
            canvas: Canvas::new(0.0, 0.0),
            grid: AngleGrid::new(settings.grid_step, settings.show_grid),
            session: Session::new(),
            image: None,
            ui_state: UiState::new(settings),
            clipboard,
            fit_pending: false,
        }
    }

    pub fn copy_to_clipboard(&mut self, text: String) -> bool {
        if let Some(clipboard) = &mut self.clipboard {
            clipboard.set_contents(text).is_ok()
        } else {
            false
        }
    }

    fn open_image(&mut self, ctx: &Context) {
        let mut dialog = rfd::FileDialog::new().add_filter("Images", &IMAGE_EXTENSIONS);
        if let Some(dir) = &self.ui_state.settings.last_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };

        match self.load_image(ctx, &path) {
            Ok((width, height)) => {
                self.ui_state
                    .set_status(format!("Loaded {} ({}x{})", path.display(), width, height));
                self.ui_state.settings.last_dir = path.parent().map(Path::to_path_buf);
            }
            Err(e) => {
                log::error!("Failed to load image {:?}: {}", path, e);
                self.ui_state.set_status(format!("Could not open {}: {}", path.display(), e));
            }
        }
    }

    fn load_image(&mut self, ctx: &Context, path: &Path) -> Result<(u32, u32), image::ImageError> {
        log::info!("Loading image: {:?}", path);
        let mut image = image::open(path)?;

        // Panoramas can be wider than the GPU accepts as one texture
        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        if image.width() > max_side || image.height() > max_side {
            log::info!(
                "Downscaling {}x{} image to fit {} px textures",
                image.width(),
                image.height(),
                max_side
            );
            image = image.resize(max_side, max_side, image::imageops::FilterType::Lanczos3);
        }

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            rgba.as_flat_samples().as_slice(),
        );
        let texture = ctx.load_texture("panorama", color_image, egui::TextureOptions::LINEAR);

        // Clicks are recorded in the pixel space of the displayed texture
        self.session.load_image(width as f32, height as f32);
        self.canvas.show_image(width as f32, height as f32, egui::Vec2::ZERO);
        self.fit_pending = true;
        self.image = Some(LoadedImage {
            path: path.to_path_buf(),
            texture,
        });

        Ok((width, height))
    }

    fn default_hrz_name(&self) -> String {
        self.image
            .as_ref()
            .and_then(|image| image.path.file_stem())
            .map(|stem| format!("{}.{}", stem.to_string_lossy(), HRZ_EXTENSION))
            .unwrap_or_else(|| format!("horizon.{}", HRZ_EXTENSION))
    }

    fn current_profile(&self) -> Option<HorizonProfile> {
        self.session
            .build_profile(self.ui_state.settings.export.ordering)
            .ok()
    }

    fn save_hrz(&mut self) {
        if let Err(e) = self.session.build_profile(self.ui_state.settings.export.ordering) {
            log::warn!("Nothing to save: {}", e);
            return;
        }

        let mut dialog = rfd::FileDialog::new()
            .add_filter("HRZ files", &[HRZ_EXTENSION])
            .set_file_name(&self.default_hrz_name());
        if let Some(dir) = &self.ui_state.settings.last_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(mut path) = dialog.save_file() else {
            return;
        };
        if path.extension().is_none() {
            path.set_extension(HRZ_EXTENSION);
        }

        match self.session.export_profile(&path, &self.ui_state.settings.export) {
            Ok(profile) => {
                self.ui_state
                    .set_status(format!("Saved {} points to {}", profile.len(), path.display()));
                self.ui_state.settings.last_dir = path.parent().map(Path::to_path_buf);
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.ui_state.set_status(format!("Export failed: {}", e));
            }
        }
    }

    fn copy_hrz(&mut self) {
        let Some(profile) = self.current_profile() else {
            return;
        };
        let text = render_hrz(&profile, self.ui_state.settings.export.style);
        if self.copy_to_clipboard(text) {
            self.ui_state.set_status(format!("Copied {} points", profile.len()));
        } else {
            self.ui_state.set_status("Clipboard unavailable");
        }
    }

    // Handle mouse interactions with the canvas
    fn handle_canvas_interactions(&mut self, ui: &mut Ui, response: egui::Response) {
        let canvas_rect = response.rect;

        if response.dragged_by(egui::PointerButton::Middle)
            || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.alt))
        {
            self.canvas.pan(response.drag_delta());
        }

        if response.hovered() {
            let scroll_delta = ui.input(|i| i.scroll_delta.y);
            if scroll_delta != 0.0 {
                let zoom_factor = if scroll_delta > 0.0 { 1.1 } else { 1.0 / 1.1 };
                if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
                    self.canvas.zoom_at(zoom_factor, pos, canvas_rect);
                }
            }
        }

        if self.image.is_none() {
            return;
        }

        let hovered = response
            .hover_pos()
            .map(|pos| self.canvas.screen_to_image_pos(pos, canvas_rect))
            .filter(|pos| self.canvas.contains_image_pos(*pos));

        self.ui_state.hover_pixel = hovered;
        self.ui_state.hover_angles = hovered.and_then(|pos| {
            self.session
                .converter()
                .map(|converter| converter.convert(ClickPoint::new(pos.x, pos.y)))
        });

        let Some(image_pos) = hovered else {
            return;
        };

        if response.clicked() && !ui.input(|i| i.modifiers.alt) {
            self.session.add_point(image_pos.x, image_pos.y);
        }

        if response.secondary_clicked() {
            self.session.set_azimuth_zero(image_pos.x);
            self.ui_state
                .set_status(format!("Azimuth zero set at column {:.0}", image_pos.x));
        }
    }

    // Draw the panorama and everything marked on it
    fn draw_canvas(&self, ui: &mut Ui) -> egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;
        let bg_color = if self.ui_state.settings.dark_mode {
            Color32::from_rgb(20, 20, 20)
        } else {
            Color32::from_rgb(240, 240, 240)
        };
        painter.rect_filled(canvas_rect, 0.0, bg_color);

        let Some(image) = &self.image else {
            painter.text(
                canvas_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Open a panoramic image to start marking the horizon",
                egui::FontId::proportional(18.0),
                Color32::GRAY,
            );
            return response;
        };

        let image_rect = self.canvas.get_screen_rect(canvas_rect);
        painter.image(
            image.texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        let (width, height) = self.canvas.get_size();
        let converter = self.session.converter();

        if self.grid.is_visible() {
            self.draw_grid(&painter, canvas_rect, image_rect, width, height, converter.as_ref());
        }

        if let Some(converter) = &converter {
            let x = self
                .canvas
                .image_to_screen_pos(egui::pos2(converter.azimuth_zero(), 0.0), canvas_rect)
                .x;
            painter.extend(egui::Shape::dashed_line(
                &[egui::pos2(x, image_rect.min.y), egui::pos2(x, image_rect.max.y)],
                Stroke::new(1.5, self.ui_state.settings.zero_line_color()),
                4.0,
                2.0,
            ));
        }

        let marker_color = self.ui_state.settings.marker_color();
        let screen_points: Vec<egui::Pos2> = self
            .session
            .clicks()
            .iter()
            .map(|click| self.canvas.image_to_screen_pos(egui::pos2(click.x, click.y), canvas_rect))
            .collect();
        for pair in screen_points.windows(2) {
            painter.line_segment([pair[0], pair[1]], Stroke::new(1.5, marker_color));
        }
        for point in &screen_points {
            painter.circle_filled(*point, 3.0, marker_color);
        }

        if let Some(mouse_pos) = response.hover_pos() {
            let crosshair_color = Color32::from_rgb(255, 0, 0);
            let crosshair_size = 10.0;

            painter.line_segment(
                [
                    egui::pos2(mouse_pos.x - crosshair_size, mouse_pos.y),
                    egui::pos2(mouse_pos.x + crosshair_size, mouse_pos.y),
                ],
                Stroke::new(1.0, crosshair_color),
            );

            painter.line_segment(
                [
                    egui::pos2(mouse_pos.x, mouse_pos.y - crosshair_size),
                    egui::pos2(mouse_pos.x, mouse_pos.y + crosshair_size),
                ],
                Stroke::new(1.0, crosshair_color),
            );
        }

        response
    }

    // Elevation lines need only the image height, azimuth lines need the zero column
    fn draw_grid(
        &self,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
        image_rect: egui::Rect,
        width: f32,
        height: f32,
        converter: Option<&AngleConverter>,
    ) {
        let grid_color = if self.ui_state.settings.dark_mode {
            Color32::from_rgba_premultiplied(180, 180, 180, 60)
        } else {
            Color32::from_rgba_premultiplied(80, 80, 80, 80)
        };
        let horizon_color = Color32::from_rgba_premultiplied(0, 200, 0, 150);
        let text_color = if self.ui_state.settings.dark_mode {
            Color32::WHITE
        } else {
            Color32::BLACK
        };

        let rows = AngleConverter::new(width, height, 0.0);
        for line in self.grid.elevation_lines(&rows) {
            let y = self
                .canvas
                .image_to_screen_pos(egui::pos2(0.0, line.position), canvas_rect)
                .y;
            let stroke = if line.degrees == 0.0 {
                Stroke::new(1.5, horizon_color)
            } else {
                Stroke::new(1.0, grid_color)
            };
            painter.line_segment([egui::pos2(image_rect.min.x, y), egui::pos2(image_rect.max.x, y)], stroke);
            painter.text(
                egui::pos2(image_rect.min.x + 4.0, y),
                egui::Align2::LEFT_BOTTOM,
                format!("{:.0}°", line.degrees),
                egui::FontId::default(),
                text_color,
            );
        }

        let Some(converter) = converter else {
            return;
        };
        for line in self.grid.azimuth_lines(converter) {
            let x = self
                .canvas
                .image_to_screen_pos(egui::pos2(line.position, 0.0), canvas_rect)
                .x;
            painter.line_segment(
                [egui::pos2(x, image_rect.min.y), egui::pos2(x, image_rect.max.y)],
                Stroke::new(1.0, grid_color),
            );
            painter.text(
                egui::pos2(x + 4.0, image_rect.min.y + 4.0),
                egui::Align2::LEFT_TOP,
                format!("{:.0}°", line.degrees),
                egui::FontId::default(),
                text_color,
            );
        }
    }

    fn profile_table(&self, ui: &mut Ui, profile: &HorizonProfile) {
        ui.push_id("profile_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(60.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Az");
                    });
                    header.col(|ui| {
                        ui.strong("Alt");
                    });
                })
                .body(|mut body| {
                    for point in profile {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(format!("{:.0}", point.azimuth));
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.1}", point.elevation));
                            });
                        });
                    }
                });
        });
    }
}

impl eframe::App for HorizonMarkerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut style = (*ctx.style()).clone();
        if self.ui_state.settings.dark_mode {
            style.visuals = egui::Visuals::dark();
        } else {
            style.visuals = egui::Visuals::light();
        }
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Horizon Marker");
                ui.separator();
                if ui.button("Open Image…").clicked() {
                    self.open_image(ctx);
                }
                if ui
                    .add_enabled(self.session.is_ready(), egui::Button::new("Save HRZ…"))
                    .clicked()
                {
                    self.save_hrz();
                }
                if ui
                    .add_enabled(self.session.is_ready(), egui::Button::new("Copy HRZ"))
                    .clicked()
                {
                    self.copy_hrz();
                }
                ui.separator();
                if ui.button("Reset View").clicked() {
                    self.fit_pending = true;
                }
                if ui.button("Start Over").clicked() {
                    self.session.reset();
                    self.ui_state.set_status("Cleared points and azimuth zero");
                }
                ui.separator();
                ui.label("Zoom:");
                ui.label(format!("{}%", (self.canvas.get_zoom() * 100.0) as i32));
            });
            if !self.ui_state.status.is_empty() {
                ui.label(self.ui_state.status.as_str());
            }
        });

        egui::SidePanel::right("settings_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Current Position");
                    match (self.ui_state.hover_pixel, self.ui_state.hover_angles) {
                        (Some(pixel), Some(angles)) => {
                            ui.label(format!("Pixel: ({:.0}, {:.0})", pixel.x, pixel.y));
                            ui.label(format!("Az {:.0}°  Alt {:.1}°", angles.azimuth, angles.elevation));
                        }
                        (Some(pixel), None) => {
                            ui.label(format!("Pixel: ({:.0}, {:.0})", pixel.x, pixel.y));
                            ui.label("Right-click to set azimuth zero");
                        }
                        _ => {
                            ui.label("-");
                        }
                    }

                    ui.separator();

                    ui.heading("Horizon");
                    ui.label(format!("Points marked: {}", self.session.clicks().len()));
                    match self.session.azimuth_zero() {
                        Some(x) => ui.label(format!("Azimuth zero: column {:.0}", x)),
                        None => ui.label("Azimuth zero: not set"),
                    };

                    ui.collapsing("Export", |ui| {
                        let export = &mut self.ui_state.settings.export;
                        egui::ComboBox::from_label("Format")
                            .selected_text(export.style.label())
                            .show_ui(ui, |ui| {
                                for style in HrzStyle::ALL {
                                    ui.selectable_value(&mut export.style, style, style.label());
                                }
                            });
                        egui::ComboBox::from_label("Ordering")
                            .selected_text(export.ordering.label())
                            .show_ui(ui, |ui| {
                                for ordering in ProfileOrdering::ALL {
                                    ui.selectable_value(&mut export.ordering, ordering, ordering.label());
                                }
                            });
                    });

                    ui.collapsing("Profile Preview", |ui| {
                        match self.session.build_profile(self.ui_state.settings.export.ordering) {
                            Ok(profile) => self.profile_table(ui, &profile),
                            Err(e) => {
                                ui.label(format!("Not ready: {}", e));
                            }
                        }
                    });

                    ui.separator();

                    ui.collapsing("Grid", |ui| {
                        let visible_changed = ui
                            .checkbox(&mut self.ui_state.settings.show_grid, "Show Grid")
                            .changed();

                        let mut step_changed = false;
                        ui.horizontal(|ui| {
                            ui.label("Step (°):");
                            step_changed = ui
                                .add(
                                    egui::DragValue::new(&mut self.ui_state.settings.grid_step)
                                        .speed(1.0)
                                        .clamp_range(AngleGrid::MIN_STEP..=AngleGrid::MAX_STEP),
                                )
                                .changed();
                        });

                        if visible_changed || step_changed {
                            self.grid.set_visible(self.ui_state.settings.show_grid);
                            self.grid.set_step(self.ui_state.settings.grid_step);
                        }
                    });

                    ui.collapsing("Appearance", |ui| {
                        ui.horizontal(|ui| {
                            ui.label("Marker Color:");
                            ui.color_edit_button_srgb(&mut self.ui_state.settings.marker_color);
                        });
                        ui.horizontal(|ui| {
                            ui.label("Zero Line Color:");
                            ui.color_edit_button_srgb(&mut self.ui_state.settings.zero_line_color);
                        });
                        ui.checkbox(&mut self.ui_state.settings.dark_mode, "Dark Mode");
                    });

                    ui.collapsing("Help", |ui| {
                        ui.label("• Click along the horizon to add points");
                        ui.label("• Right-click to set the azimuth zero column");
                        ui.label("• Save HRZ writes the profile once both are set");
                        ui.label("• Middle-click or Alt+drag to pan");
                        ui.label("• Scroll to zoom in/out");
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.fit_pending {
                self.canvas.fit_to(ui.available_size());
                self.fit_pending = false;
            }
            let response = self.draw_canvas(ui);
            self.handle_canvas_interactions(ui, response);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.ui_state.settings);
    }
}
