use std::path::PathBuf;

use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::{debug, info, warn};

use crate::api::thingspeak::{FieldFeedResponse, ThingSpeakClient};
use crate::models::{
    ChartSettings, RenderedWidget, SmoothPath, TextLine, TextWeight, WidgetContent, WidgetSettings,
    WidgetSize,
};
use crate::services::{chart_service, series_service};
use crate::utils::{format_created, format_value, parse_hex_color, SeriesError, WidgetError};

const BACKGROUND: RGBColor = RGBColor(0xff, 0xf7, 0xf2);
const TEXT_COLOR: RGBColor = BLACK;
/// Widget padding on every side, in points
const PADDING: f64 = 15.0;
/// Line box height relative to font size
const LINE_HEIGHT: f64 = 1.2;
/// Polyline resolution used when filling the curve
const SEGMENTS_PER_CURVE: usize = 12;

/// Lay out the text stack top to bottom, in points
///
/// Order: channel name, spacer, field name, value, spacer, timestamp.
pub fn layout_text(content: &WidgetContent) -> Vec<TextLine> {
    let mut top = PADDING;
    let mut lines = Vec::with_capacity(4);

    let mut push = |text: &str, font_size: f64, weight: TextWeight, min_scale: f64, spacer_after: f64| {
        lines.push(TextLine {
            text: text.to_string(),
            font_size,
            weight,
            min_scale,
            top,
        });
        top += font_size * LINE_HEIGHT + spacer_after;
    };

    push(&content.channel_name, 12.0, TextWeight::Regular, 0.5, 5.0);
    push(&content.field_name, 12.0, TextWeight::Regular, 0.5, 0.0);
    push(&content.value_text, 30.0, TextWeight::Semibold, 0.3, 5.0);
    if let Some(created) = &content.created_text {
        push(created, 9.0, TextWeight::Regular, 0.6, 0.0);
    }

    lines
}

/// Factor a line must shrink by to fit `available`, never below `min_scale`
pub fn fit_scale(measured: f64, available: f64, min_scale: f64) -> f64 {
    if measured <= available || measured <= 0.0 {
        1.0
    } else {
        (available / measured).max(min_scale)
    }
}

/// Build the overlay text from the API response
pub fn build_content(
    response: &FieldFeedResponse,
    settings: &WidgetSettings,
) -> Result<WidgetContent, SeriesError> {
    let reading = series_service::latest_reading(&response.feeds, &settings.field_id)
        .ok_or(SeriesError::NoNumericSamples { feeds: response.feeds.len() })?;

    let field_name = response
        .channel
        .field_name(&settings.field_id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("field{}", settings.field_id));

    Ok(WidgetContent {
        channel_name: response.channel.name.to_uppercase(),
        field_name,
        value_text: format_value(reading.value),
        created_text: settings.show_created.then(|| format_created(&reading.created_at)),
    })
}

/// Rendered PNG on disk, removed when dropped
struct TempImage(PathBuf);

impl Drop for TempImage {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn font_for(line: &TextLine, px: f64) -> FontDesc<'static> {
    let style = match line.weight {
        TextWeight::Regular => FontStyle::Normal,
        TextWeight::Semibold => FontStyle::Bold,
    };
    FontDesc::new(FontFamily::SansSerif, px, style)
}

/// Rasterize chart and text into PNG bytes
pub fn render_widget(
    path: &SmoothPath,
    content: &WidgetContent,
    chart: &ChartSettings,
    size: WidgetSize,
) -> Result<Vec<u8>, WidgetError> {
    let (width, height) = size.chart_dimensions();
    let scale = size.scale();
    let (point_width, _) = size.point_dimensions();
    let available = (point_width - 2.0 * PADDING) * scale;

    let fill = parse_hex_color(&chart.color).map_err(WidgetError::Render)?;
    let opacity = chart.opacity.clamp(0.0, 1.0);

    let temp_file = TempImage(
        std::env::temp_dir().join(format!("thingspeak_widget_{}.png", uuid::Uuid::new_v4())),
    );

    {
        let backend = BitMapBackend::new(&temp_file.0, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&BACKGROUND)
            .map_err(|e| WidgetError::Render(format!("Failed to fill canvas: {}", e)))?;

        // Canvas may differ from the path bounds; stretch like a background image
        let sx = width as f64 / path.width;
        let sy = height as f64 / path.height;
        let polygon: Vec<(i32, i32)> = path
            .flatten(SEGMENTS_PER_CURVE)
            .iter()
            .map(|p| ((p.x * sx).round() as i32, (p.y * sy).round() as i32))
            .collect();

        root.draw(&Polygon::new(polygon, fill.mix(opacity).filled()))
            .map_err(|e| WidgetError::Render(format!("Failed to draw chart: {}", e)))?;

        let left = (PADDING * scale).round() as i32;
        for line in layout_text(content) {
            let nominal = line.font_size * scale;
            let measured = match font_for(&line, nominal).box_size(&line.text) {
                Ok((w, _)) => w as f64,
                Err(e) => {
                    warn!("Could not measure '{}': {:?}", line.text, e);
                    0.0
                }
            };
            let factor = fit_scale(measured, available, line.min_scale);
            if factor < 1.0 {
                debug!("Shrinking '{}' to {:.2}x", line.text, factor);
            }

            let style = font_for(&line, nominal * factor).color(&TEXT_COLOR);
            let top = (line.top * scale).round() as i32;
            root.draw(&Text::new(line.text.clone(), (left, top), style))
                .map_err(|e| WidgetError::Render(format!("Failed to draw text: {}", e)))?;
        }

        root.present()
            .map_err(|e| WidgetError::Render(format!("Failed to render widget: {}", e)))?;
    }

    // Read the temporary file into memory; the guard removes it on every path
    let image_data = std::fs::read(&temp_file.0)
        .map_err(|e| WidgetError::Render(format!("Failed to read widget file: {}", e)))?;

    Ok(image_data)
}

/// Fetch the feed, build the chart and render the finished widget
pub async fn generate_widget(
    client: &ThingSpeakClient,
    settings: &WidgetSettings,
    chart: &ChartSettings,
    size: WidgetSize,
) -> Result<RenderedWidget, WidgetError> {
    info!(
        "📡 Fetching channel {} field {}",
        settings.channel_id, settings.field_id
    );
    let response = client
        .get_field_feed(
            &settings.channel_id,
            &settings.field_id,
            settings.query_params.as_deref(),
            settings.read_key.as_deref(),
        )
        .await?;
    info!("Received {} feeds for '{}'", response.feeds.len(), response.channel.name);

    let series = series_service::extract_series(&response.feeds, &settings.field_id);
    let samples = series_service::finite_samples(&series);
    if samples.len() < series.len() {
        warn!(
            "Dropped {} of {} samples without a numeric field{} value",
            series.len() - samples.len(),
            series.len(),
            settings.field_id
        );
    }

    let (width, height) = size.chart_dimensions();
    let path = chart_service::build_smooth_path(&samples, width as f64, height as f64)?;
    let content = build_content(&response, settings)?;

    info!("🎨 Rendering {} widget ({}x{})", size, width, height);
    let png = render_widget(&path, &content, chart, size)?;

    Ok(RenderedWidget {
        png,
        url: settings.channel_url(),
        width,
        height,
    })
}
