// Application state: the design being edited, swept results, text panels.

use speaker_core::{Design, EvalConfig, SweepResult};

use crate::{plot_view, ui};

pub struct App {
    design: Design,
    config: EvalConfig,
    /// One entry per swept design, overlaid in the plots by label.
    results: Vec<SweepResult>,
    report_text: String,
    design_text: String,
    /// Last configuration error, shown until the next successful action.
    error: Option<String>,
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let design = Design::default();
        let design_text = design.to_json().unwrap_or_default();
        Self {
            design,
            config: EvalConfig::default(),
            results: Vec::new(),
            report_text: String::new(),
            design_text,
            error: None,
        }
    }

    /// Sweep the current design and overlay (or refresh) its curves.
    fn run_sweep(&mut self, clear_first: bool) {
        if clear_first {
            self.results.clear();
        }
        match speaker_core::compute(&self.design, &self.config) {
            Ok(result) => {
                self.report_text = result.report.to_string();
                if let Ok(text) = self.design.to_json() {
                    self.design_text = text;
                }
                // a re-sweep of the same label replaces its series
                self.results.retain(|r| r.label != result.label);
                self.results.push(result);
                self.error = None;
            }
            Err(err) => {
                log::warn!("sweep rejected: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Replace the edited parameters with the design text's contents.
    fn load_design(&mut self) {
        match Design::from_json(&self.design_text) {
            Ok(design) => {
                self.design = design;
                self.error = None;
            }
            Err(err) => {
                log::warn!("design text rejected: {err}");
                self.error = Some(err.to_string());
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let action = ui::draw_controls(ctx, &mut self.design, &mut self.config, self.error.as_deref());

        if action.update {
            self.run_sweep(false);
        }
        if action.clear_and_update {
            self.run_sweep(true);
        }
        if action.load_design {
            self.load_design();
        }

        ui::draw_text_panels(ctx, &self.report_text, &mut self.design_text);
        plot_view::draw_response_plots(ctx, &self.results, self.config.velocity_units);
    }
}
