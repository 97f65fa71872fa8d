// egui control panel: parameter fields, policy selectors, action buttons.

use speaker_core::{Design, EvalConfig, PortShape, VelocityUnits, VoltageConvention};

/// What the user asked for this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct UiAction {
    pub update: bool,
    pub clear_and_update: bool,
    pub load_design: bool,
}

/// A numeric field displayed in presentation units (`scale` × SI value).
fn scaled_field(ui: &mut egui::Ui, label: &str, value: &mut f64, scale: f64, speed: f64) {
    ui.horizontal(|ui| {
        let mut shown = *value * scale;
        if ui.add(egui::DragValue::new(&mut shown).speed(speed)).changed() {
            *value = shown / scale;
        }
        ui.label(label);
    });
}

/// Draw the right-side parameter panel. Returns the requested action.
pub fn draw_controls(
    ctx: &egui::Context,
    design: &mut Design,
    config: &mut EvalConfig,
    error: Option<&str>,
) -> UiAction {
    let mut action = UiAction::default();

    egui::SidePanel::right("parameters")
        .min_width(300.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("design");
                    ui.text_edit_singleline(&mut design.name);
                });
                ui.separator();

                // --- Driver ---
                ui.heading("Driver parameters");
                let driver = &mut design.driver;
                scaled_field(ui, "F_s (Hz)", &mut driver.fs, 1.0, 0.1);
                scaled_field(ui, "R_e (Ohms)", &mut driver.re, 1.0, 0.01);
                scaled_field(ui, "L_e (mH)", &mut driver.le, 1e3, 0.01);
                scaled_field(ui, "Q_ms", &mut driver.qms, 1.0, 0.01);
                scaled_field(ui, "Q_es", &mut driver.qes, 1.0, 0.01);
                scaled_field(ui, "Vas (liters)", &mut driver.vas, 1e3, 1.0);
                scaled_field(ui, "Xmax (mm)", &mut driver.xmax, 1e3, 0.1);
                scaled_field(ui, "S_d (cm^2)", &mut driver.sd, 1e4, 1.0);
                ui.separator();

                // --- Box ---
                ui.heading("Box parameters");
                let enclosure = &mut design.enclosure;
                scaled_field(ui, "V_box (liters)", &mut enclosure.v_box, 1e3, 1.0);
                ui.horizontal(|ui| {
                    ui.add(egui::DragValue::new(&mut enclosure.n_ports));
                    ui.label("ports (0 = sealed)");
                });
                scaled_field(ui, "f_port (Hz)", &mut enclosure.f_port, 1.0, 0.1);
                scaled_field(ui, "Q_port", &mut enclosure.q_port, 1.0, 0.5);
                ui.horizontal(|ui| {
                    ui.label("port shape");
                    ui.radio_value(&mut enclosure.port_shape, PortShape::Rectangular, "rectangular");
                    ui.radio_value(&mut enclosure.port_shape, PortShape::Circular, "circular");
                });
                match enclosure.port_shape {
                    PortShape::Circular => {
                        scaled_field(ui, "d_port (cm)", &mut enclosure.d_port, 1e2, 0.1);
                    }
                    PortShape::Rectangular => {
                        scaled_field(ui, "a_port (cm)", &mut enclosure.a_port, 1e2, 0.1);
                        scaled_field(ui, "b_port (cm)", &mut enclosure.b_port, 1e2, 0.1);
                    }
                }
                scaled_field(ui, "end correction", &mut enclosure.end_correct, 1.0, 0.01);
                ui.separator();

                // --- System ---
                ui.heading("System parameters");
                scaled_field(ui, "Znom (Ohms)", &mut design.system.znom, 1.0, 0.1);
                scaled_field(ui, "Pin (W rms)", &mut design.system.pin, 1.0, 1.0);
                ui.separator();

                // --- Conventions ---
                ui.label("drive voltage from");
                ui.radio_value(
                    &mut config.voltage_convention,
                    VoltageConvention::NominalLoad,
                    "nominal impedance",
                );
                ui.radio_value(
                    &mut config.voltage_convention,
                    VoltageConvention::CoilResistance,
                    "coil resistance (WinISD)",
                );
                ui.label("port air speed in");
                ui.radio_value(
                    &mut config.velocity_units,
                    VelocityUnits::MetersPerSecond,
                    "m/s",
                );
                ui.radio_value(&mut config.velocity_units, VelocityUnits::Mach, "Mach");
                ui.separator();

                // --- Actions ---
                if ui.button("Update graph").clicked() {
                    action.update = true;
                }
                if ui.button("Clear and update graph").clicked() {
                    action.clear_and_update = true;
                }
                if ui.button("Load design from JSON below").clicked() {
                    action.load_design = true;
                }

                if let Some(message) = error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, message);
                }
            });
        });

    action
}

/// Bottom panel: the modeling report next to the editable design JSON.
pub fn draw_text_panels(ctx: &egui::Context, report_text: &str, design_text: &mut String) {
    egui::TopBottomPanel::bottom("text_panels")
        .resizable(true)
        .default_height(220.0)
        .show(ctx, |ui| {
            ui.columns(2, |columns| {
                columns[0].heading("Modeling report");
                egui::ScrollArea::vertical()
                    .id_salt("report_scroll")
                    .show(&mut columns[0], |ui| {
                        ui.monospace(report_text);
                    });

                columns[1].heading("Design parameters (editable, save as a text file)");
                egui::ScrollArea::vertical()
                    .id_salt("design_scroll")
                    .show(&mut columns[1], |ui| {
                        ui.add(
                            egui::TextEdit::multiline(design_text)
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY),
                        );
                    });
            });
        });
}
