//! Desktop preview app for dimmer-curve
//!
//! Plots the generated delay curve while the calibration parameters are
//! tuned, and exports the table in the comma-separated firmware format.

use eframe::egui::{self};
use dimmer_curve::{
    CalibrationParameters, ConfigurationError, CurveTable, DelayCommand, generate,
};

/// Maximum number of levels the preview supports
const MAX_LEVELS: usize = 256;

/// Height of the curve plot in pixels
const PLOT_HEIGHT: f32 = 280.0;

/// Gap between bars
const BAR_GAP: f32 = 1.0;

/// Generator output frequency, ticks per second
const CURVE_HZ: u32 = 1_000_000;

/// Coprocessor delay loop: 59247 ticks per 10 ms
const COPROCESSOR_HZ: u32 = 5_924_700;

type PreviewCurve = CurveTable<MAX_LEVELS>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("Dimmer Curve Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "dimmer-curve-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// Parameters the curve is generated from
    params: CalibrationParameters,
    /// Delay at the brightest level, edited in milliseconds
    min_delay_ms: f64,
    /// Delay at the dimmest level, edited in milliseconds
    max_delay_ms: f64,
    /// Last generation result
    curve: Result<PreviewCurve, ConfigurationError>,
    /// Level inspected below the plot (1-based)
    level: usize,
    /// Show entries converted to coprocessor ticks
    coprocessor_ticks: bool,
}

impl PreviewApp {
    fn new() -> Self {
        let params = CalibrationParameters::default();
        Self {
            params,
            min_delay_ms: params.min_delay * 1000.0,
            max_delay_ms: params.max_delay * 1000.0,
            curve: generate(&params),
            level: params.level_count,
            coprocessor_ticks: false,
        }
    }

    /// Reset parameters to the firmware defaults
    fn reset(&mut self) {
        *self = Self::new();
    }

    /// Regenerate the curve from the current parameters
    fn regenerate(&mut self) {
        self.params = self
            .params
            .with_delay_range(self.min_delay_ms / 1000.0, self.max_delay_ms / 1000.0);
        self.curve = generate(&self.params);
        self.level = self.level.clamp(1, self.params.level_count.max(1));
    }

    /// Curve as displayed, optionally in coprocessor ticks
    fn displayed_curve(&self) -> Result<PreviewCurve, String> {
        let curve = self.curve.as_ref().map_err(ToString::to_string)?;
        if self.coprocessor_ticks {
            return curve
                .rescaled(CURVE_HZ, COPROCESSOR_HZ)
                .map_err(|error| error.to_string());
        }
        Ok(curve.clone())
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let old_params = self.params;
            let old_delays = (self.min_delay_ms, self.max_delay_ms);

            ui.horizontal(|ui| {
                // <CurveControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Gamma:");
                        ui.add(
                            egui::Slider::new(&mut self.params.gamma, 0.1..=5.0)
                                .logarithmic(true),
                        );
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Levels:");
                        ui.add(egui::Slider::new(
                            &mut self.params.level_count,
                            2usize..=MAX_LEVELS,
                        ));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Fallback step:");
                        ui.add(
                            egui::DragValue::new(&mut self.params.fallback_step)
                                .range(1u32..=1000u32),
                        );
                    });
                });
                // </CurveControls>
                ui.add_space(16.0);
                // <TimingControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Dimmest delay (ms):");
                        ui.add(egui::Slider::new(&mut self.max_delay_ms, 0.0..=10.0));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Brightest delay (ms):");
                        ui.add(egui::Slider::new(&mut self.min_delay_ms, 0.0..=10.0));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Timer (Hz):");
                        ui.add(
                            egui::Slider::new(
                                &mut self.params.timer_frequency_hz,
                                1e3..=1e7,
                            )
                            .logarithmic(true),
                        );
                    });
                });
                // </TimingControls>
                ui.add_space(16.0);

                ui.vertical(|ui| {
                    if ui.button("⟲ Defaults").clicked() {
                        self.reset();
                    }
                    ui.checkbox(&mut self.coprocessor_ticks, "Coprocessor ticks");
                });
            });

            if self.params != old_params
                || (self.min_delay_ms, self.max_delay_ms) != old_delays
            {
                self.regenerate();
            }

            ui.add_space(16.0);

            let curve = match self.displayed_curve() {
                Ok(curve) => curve,
                Err(message) => {
                    ui.colored_label(egui::Color32::LIGHT_RED, message);
                    return;
                }
            };

            // === Curve plot ===
            let available_width = ui.available_width();
            let (response, painter) = ui.allocate_painter(
                egui::vec2(available_width, PLOT_HEIGHT),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            let bar_pitch = available_width / curve.len() as f32;
            let bar_width = (bar_pitch - BAR_GAP).max(1.0);
            #[allow(clippy::cast_precision_loss)]
            let longest = curve.first().unwrap_or(1).max(1) as f32;

            #[allow(clippy::cast_precision_loss)]
            for (index, &ticks) in curve.iter().enumerate() {
                let height = ticks as f32 / longest * PLOT_HEIGHT;
                let x = origin.x + index as f32 * bar_pitch;
                let y = origin.y + PLOT_HEIGHT - height;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(bar_width, height),
                );
                let color = if index + 1 == self.level {
                    egui::Color32::from_rgb(255, 180, 100)
                } else {
                    egui::Color32::from_rgb(90, 140, 200)
                };
                painter.rect_filled(rect, 0.0, color);
            }

            ui.add_space(8.0);

            // === Level inspector ===
            ui.horizontal(|ui| {
                ui.label("Level:");
                ui.add(egui::Slider::new(&mut self.level, 1usize..=curve.len()));

                let ticks = curve.delay_for_level(self.level);
                ui.label(format!("{ticks} ticks"));

                ui.add_space(8.0);

                match DelayCommand::from_ticks(ticks) {
                    Ok(command) => {
                        let [high, low] = command.to_be_bytes();
                        ui.label(format!("{command:?} → 0x{high:02X} 0x{low:02X}"));
                    }
                    Err(error) => {
                        ui.colored_label(egui::Color32::LIGHT_RED, error.to_string());
                    }
                }
            });

            ui.add_space(8.0);

            // === Export ===
            let csv = curve.to_string();
            ui.horizontal(|ui| {
                ui.label(format!("{} entries", curve.len()));
                if ui.button("Copy").clicked() {
                    ui.ctx().copy_text(csv.clone());
                }
            });
            egui::ScrollArea::vertical()
                .max_height(120.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut csv.as_str())
                            .desired_width(f32::INFINITY),
                    );
                });
        });
    }
}
