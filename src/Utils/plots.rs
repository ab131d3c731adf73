use crate::Utils::logger::ExportError;
use plotters::prelude::*;

/// Draws the sampled curve into `<filename>.png`. Non-finite samples are skipped.
pub fn plot_curve(
    samples: &[(f64, f64)],
    arg: &str,
    caption: &str,
    filename: &str,
) -> Result<(), ExportError> {
    let series: Vec<(f64, f64)> = samples
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if series.is_empty() {
        return Err(ExportError::NothingToPlot);
    }
    let (x_min, x_max) = bounds(series.iter().map(|(x, _)| *x));
    let (y_min, y_max) = bounds(series.iter().map(|(_, y)| *y));
    let y_margin = 0.05 * (y_max - y_min);

    let filename = format!("{}.png", filename);
    let root_area = BitMapBackend::new(&filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(caption, ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, (y_min - y_margin)..(y_max + y_margin))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(arg)
        .y_desc(caption)
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(series, &Palette99::pick(0)))
        .map_err(plot_err)?
        .label(caption)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(0)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;
    root_area.present().map_err(plot_err)?;
    Ok(())
}

fn plot_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Plot(e.to_string())
}

/// min and max of a non-empty sequence, widened when they coincide
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min == max { (min - 1.0, max + 1.0) } else { (min, max) }
}
