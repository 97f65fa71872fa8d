// Response curves via egui_plot, overlaid per design label.

use std::ops::RangeInclusive;

use egui_plot::{GridMark, Legend, Line, Plot};
use speaker_core::{SweepResult, VelocityUnits};

/// Plots use log₁₀(frequency) on the x axis; ticks are labeled back in Hz.
fn hz_formatter(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format!("{:.0}", 10f64.powf(mark.value))
}

/// `[log₁₀ f, value]` points, skipping non-finite samples (SPL is −∞ at a
/// degenerate bin, e.g. ω = 0).
fn curve_points(frequencies: &[f64], values: impl Iterator<Item = f64>) -> Vec<[f64; 2]> {
    frequencies
        .iter()
        .zip(values)
        .filter(|(_, v)| v.is_finite())
        .map(|(&f, v)| [f.log10(), v])
        .collect()
}

fn draw_plot(
    ui: &mut egui::Ui,
    id: &str,
    y_label: &str,
    series: Vec<(String, Vec<[f64; 2]>)>,
) {
    Plot::new(id.to_owned())
        .height(220.0)
        .x_axis_label("frequency (Hz)")
        .x_axis_formatter(hz_formatter)
        .y_axis_label(y_label.to_owned())
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (label, points) in series {
                plot_ui.line(Line::new(points).name(label));
            }
        });
}

/// Draw the four diagnostic curves in the central panel.
pub fn draw_response_plots(
    ctx: &egui::Context,
    results: &[SweepResult],
    velocity_units: VelocityUnits,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .id_salt("plots_scroll")
            .show(ui, |ui| {
                draw_plot(
                    ui,
                    "excursion_plot",
                    "cone excursion amplitude (mm)",
                    results
                        .iter()
                        .map(|r| {
                            (
                                r.label.clone(),
                                curve_points(
                                    &r.frequencies,
                                    r.curves.excursion.iter().map(|x| x.norm() * 1000.0),
                                ),
                            )
                        })
                        .collect(),
                );

                draw_plot(
                    ui,
                    "impedance_plot",
                    "impedance (Ohms)",
                    results
                        .iter()
                        .map(|r| {
                            (
                                r.label.clone(),
                                curve_points(
                                    &r.frequencies,
                                    r.curves.impedance.iter().map(|z| z.norm()),
                                ),
                            )
                        })
                        .collect(),
                );

                draw_plot(
                    ui,
                    "spl_plot",
                    "sound pressure (dB SPL)",
                    results
                        .iter()
                        .map(|r| {
                            (
                                r.label.clone(),
                                curve_points(&r.frequencies, r.curves.spl.iter().copied()),
                            )
                        })
                        .collect(),
                );

                let speed_label = match velocity_units {
                    VelocityUnits::MetersPerSecond => "port air speed (m/s)",
                    VelocityUnits::Mach => "port air speed (Mach)",
                };
                // sealed designs have no port series and simply don't appear
                draw_plot(
                    ui,
                    "port_speed_plot",
                    speed_label,
                    results
                        .iter()
                        .filter_map(|r| {
                            r.curves.port_velocity.as_ref().map(|v| {
                                (
                                    r.label.clone(),
                                    curve_points(&r.frequencies, v.iter().map(|s| s.norm())),
                                )
                            })
                        })
                        .collect(),
                );
            });
    });
}
