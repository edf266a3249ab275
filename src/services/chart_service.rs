use std::io::Cursor;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageOutputFormat, RgbImage, RgbaImage};
use plotters::coord::combinators::BindKeyPoints;
use plotters::coord::Shift;
use plotters::element::BitMapElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use tracing::debug;

use crate::models::chart::{Annotation, ChartPlan, InsetPlacement};
use crate::models::config::Theme;
use crate::models::event::{Event, DEFAULT_EVENT_COLOR};
use crate::models::series::PriceSeries;
use crate::utils::color::parse_hex_color;
use crate::utils::errors::ChartError;

/// Volume axis max as a multiple of the tallest bar, keeping bars in the bottom third
const VOLUME_HEADROOM: f64 = 3.0;
/// Inset edge length as a fraction of the figure
const INSET_SIZE: f64 = 0.1;
const MAX_MONTH_TICKS: usize = 24;
/// Pixel offset of the annotation text from the point it describes
const ANNOTATION_OFFSET: i32 = 20;
const ARROW_HEAD: f64 = 8.0;
/// Gap between the X axis and the top of a rotated date label
const DATE_LABEL_GAP: i32 = 8;

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn rgb(hex: &str) -> RGBColor {
    let (r, g, b) = parse_hex_color(hex).unwrap_or((0x80, 0x80, 0x80));
    RGBColor(r, g, b)
}

fn event_color(hex: &str) -> RGBColor {
    parse_hex_color(hex)
        .or_else(|_| parse_hex_color(DEFAULT_EVENT_COLOR))
        .map(|(r, g, b)| RGBColor(r, g, b))
        .unwrap_or(RGBColor(0xFF, 0x98, 0x00))
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
}

/// Resolve an event to the bar nearest its date
fn annotate(series: &PriceSeries, event: &Event) -> Option<Annotation> {
    let target = midnight(event.date)?;
    let bar_index = series.nearest_index(target)?;
    let bar = &series.bars()[bar_index];

    Some(Annotation {
        bar_index,
        timestamp: bar.timestamp,
        price: bar.close,
        text: event.description.clone(),
        color: event.color.clone(),
        image_url: event.image_url.clone(),
    })
}

/// First-of-month timestamps inside `[start, end]`, thinned when there are too many
pub fn month_ticks(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut ticks = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());

    loop {
        let Some(tick) = NaiveDate::from_ymd_opt(year, month, 1).and_then(midnight) else {
            break;
        };
        if tick > end {
            break;
        }
        if tick >= start {
            ticks.push(tick);
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    if ticks.len() > MAX_MONTH_TICKS {
        let step = ticks.len().div_ceil(MAX_MONTH_TICKS);
        ticks = ticks.into_iter().step_by(step).collect();
    }
    if ticks.len() < 2 {
        ticks = vec![start, end];
    }
    ticks
}

/// Half the width of one volume bar: 80% of the mean bar spacing, split in two
fn bar_half_width(series: &PriceSeries) -> Duration {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() > 1 => {
            let spacing = (last.timestamp - first.timestamp).num_seconds() as f64 / (series.len() - 1) as f64;
            Duration::seconds((spacing * 0.4) as i64)
        }
        _ => Duration::hours(12),
    }
}

/// Compute ranges, ticks and annotation targets for a chart.
///
/// Annotations follow `events` order. Fails only for an empty series.
pub fn plan_chart<'a>(
    series: &'a PriceSeries,
    symbol: &str,
    events: &[Event],
    theme: Theme,
) -> Result<ChartPlan<'a>, ChartError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (f.timestamp, l.timestamp),
        _ => return Err(ChartError::Render("No data to plot".to_string())),
    };
    let x_range = if first == last {
        (first - Duration::days(1), last + Duration::days(1))
    } else {
        (first, last)
    };

    let (min_close, max_close) = series.close_range().unwrap_or((0.0, 1.0));
    let padding = ((max_close - min_close) * 0.05).max(max_close.abs() * 0.01).max(0.01);
    let price_range = (min_close - padding, max_close + padding);

    let max_volume = series.max_volume();
    let volume_max = if max_volume > 0.0 { max_volume * VOLUME_HEADROOM } else { 1.0 };

    let annotations: Vec<Annotation> = events.iter().filter_map(|e| annotate(series, e)).collect();

    Ok(ChartPlan {
        series,
        symbol: symbol.to_string(),
        theme,
        x_range,
        price_range,
        volume_max,
        bar_half_width: bar_half_width(series),
        month_ticks: month_ticks(x_range.0, x_range.1),
        annotations,
    })
}

/// Inset rectangle for an annotation's thumbnail.
///
/// Horizontal position is the point's place in the date range; vertical is its
/// place on the price axis, lowered by one inset height. May fall off the figure.
pub fn inset_placement(plan: &ChartPlan, annotation: &Annotation) -> InsetPlacement {
    let (x0, x1) = plan.x_range;
    let span = (x1 - x0).num_seconds() as f64;
    let left = if span > 0.0 {
        (annotation.timestamp - x0).num_seconds() as f64 / span
    } else {
        0.5
    };

    let (y0, y1) = plan.price_range;
    let bottom = (annotation.price - y0) / (y1 - y0) - INSET_SIZE;

    InsetPlacement {
        left,
        bottom,
        width: INSET_SIZE,
        height: INSET_SIZE,
    }
}

/// Pixel origin and edge of a square thumbnail anchored to the inset's top-right corner
fn inset_pixels(placement: &InsetPlacement, width: u32, height: u32) -> ((i32, i32), u32) {
    let (w, h) = (width as f64, height as f64);
    let box_w = placement.width * w;
    let box_h = placement.height * h;
    let side = box_w.min(box_h).max(1.0);

    let left = placement.left * w;
    let top = h - (placement.bottom + placement.height) * h;
    (((left + box_w - side).round() as i32, top.round() as i32), side as u32)
}

/// Part of a `size`×`size` square at `pos` that lies on the canvas, as (x, y, w, h) in the square
fn visible_region(pos: (i32, i32), size: u32, canvas: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
    let x0 = pos.0.max(0);
    let y0 = pos.1.max(0);
    let x1 = (pos.0 + size as i32).min(canvas.0 as i32);
    let y1 = (pos.1 + size as i32).min(canvas.1 as i32);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(((x0 - pos.0) as u32, (y0 - pos.1) as u32, (x1 - x0) as u32, (y1 - y0) as u32))
}

/// Alpha-composite onto a solid background, producing packed RGB
fn flatten_onto(img: &RgbaImage, background: (u8, u8, u8)) -> Vec<u8> {
    let blend = |c: u8, bg: u8, a: u16| ((c as u16 * a + bg as u16 * (255 - a)) / 255) as u8;
    img.pixels()
        .flat_map(|p| {
            let a = p[3] as u16;
            [
                blend(p[0], background.0, a),
                blend(p[1], background.1, a),
                blend(p[2], background.2, a),
            ]
        })
        .collect()
}

/// Triangle for an arrow pointing from `tail` to `tip`
fn arrow_head(tail: (i32, i32), tip: (i32, i32)) -> [(i32, i32); 3] {
    let (dx, dy) = ((tip.0 - tail.0) as f64, (tip.1 - tail.1) as f64);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return [tip; 3];
    }

    let (ux, uy) = (dx / len, dy / len);
    let (bx, by) = (tip.0 as f64 - ux * ARROW_HEAD, tip.1 as f64 - uy * ARROW_HEAD);
    let (px, py) = (-uy * ARROW_HEAD / 2.0, ux * ARROW_HEAD / 2.0);
    [
        tip,
        ((bx + px).round() as i32, (by + py).round() as i32),
        ((bx - px).round() as i32, (by - py).round() as i32),
    ]
}

/// Compact volume label, e.g. `68.9M`
pub fn format_volume(volume: f64) -> String {
    let abs = volume.abs();
    if abs >= 1e9 {
        format!("{:.1}B", volume / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", volume / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", volume / 1e3)
    } else {
        format!("{:.0}", volume)
    }
}

fn draw_annotation(
    root: &Canvas,
    anchor: (i32, i32),
    annotation: &Annotation,
    arrow_color: RGBColor,
) -> Result<(), ChartError> {
    let color = event_color(&annotation.color);
    let style = ("sans-serif", 14).into_font().color(&color);
    let (text_w, text_h) = root
        .estimate_text_size(&annotation.text, &style)
        .map_err(render_error)?;

    let origin = (anchor.0 + ANNOTATION_OFFSET, anchor.1 - ANNOTATION_OFFSET - text_h as i32);
    let pad = 4;
    let top_left = (origin.0 - pad, origin.1 - pad);
    let bottom_right = (origin.0 + text_w as i32 + pad, origin.1 + text_h as i32 + pad);

    root.draw(&Rectangle::new([top_left, bottom_right], BLACK.mix(0.4).filled()))
        .map_err(render_error)?;
    root.draw(&Rectangle::new([top_left, bottom_right], color.stroke_width(1)))
        .map_err(render_error)?;
    root.draw(&Text::new(annotation.text.clone(), origin, style.clone()))
        .map_err(render_error)?;

    let tail = (top_left.0, bottom_right.1);
    root.draw(&PathElement::new(vec![tail, anchor], arrow_color.stroke_width(1)))
        .map_err(render_error)?;
    root.draw(&Polygon::new(arrow_head(tail, anchor).to_vec(), arrow_color.filled()))
        .map_err(render_error)?;
    Ok(())
}

fn draw_inset(
    root: &Canvas,
    placement: InsetPlacement,
    thumbnail: &RgbaImage,
    background: (u8, u8, u8),
    canvas: (u32, u32),
) -> Result<(), ChartError> {
    let (pos, side) = inset_pixels(&placement, canvas.0, canvas.1);
    let Some((sx, sy, w, h)) = visible_region(pos, side, canvas) else {
        debug!("Inset at {:?} lies off the canvas, skipping", pos);
        return Ok(());
    };

    let scaled = imageops::resize(thumbnail, side, side, FilterType::Lanczos3);
    let visible = imageops::crop_imm(&scaled, sx, sy, w, h).to_image();
    let element: BitMapElement<(i32, i32)> = BitMapElement::with_owned_buffer(
        (pos.0 + sx as i32, pos.1 + sy as i32),
        (w, h),
        flatten_onto(&visible, background),
    )
    .ok_or_else(|| ChartError::Render("Thumbnail buffer size mismatch".to_string()))?;

    root.draw(&element).map_err(render_error)
}

/// Draw a planned chart and encode it as PNG.
///
/// `thumbnails[i]` belongs to `plan.annotations[i]`; `None` means no inset.
pub fn render_chart(
    plan: &ChartPlan,
    thumbnails: &[Option<RgbaImage>],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ChartError> {
    if width == 0 || height == 0 {
        return Err(ChartError::Render(format!("Canvas must be at least 1x1, got {}x{}", width, height)));
    }

    let palette = plan.theme.palette();
    let background = rgb(palette.background);
    let grid = rgb(palette.grid);
    let text = rgb(palette.text);
    let line = rgb(palette.line);
    let volume = rgb(palette.volume);

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&background).map_err(render_error)?;

        let (x_min, x_max) = plan.x_range;
        let (y_min, y_max) = plan.price_range;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} Price Chart", plan.symbol),
                ("sans-serif", 28).into_font().color(&text),
            )
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(90)
            .right_y_label_area_size(80)
            .build_cartesian_2d((x_min..x_max).with_key_points(plan.month_ticks.clone()), y_min..y_max)
            .map_err(render_error)?
            .set_secondary_coord(x_min..x_max, 0f64..plan.volume_max);

        chart
            .configure_mesh()
            .bold_line_style(grid.stroke_width(1))
            .light_line_style(TRANSPARENT.stroke_width(1))
            .axis_style(text.stroke_width(1))
            .x_desc("Date")
            .y_desc("Price")
            .label_style(("sans-serif", 13).into_font().color(&text))
            .axis_desc_style(("sans-serif", 15).into_font().color(&text))
            // Tick marks only; the rotated dates are drawn below
            .x_label_formatter(&|_: &DateTime<Utc>| String::new())
            .y_label_formatter(&|v: &f64| format!("${:.2}", v))
            .draw()
            .map_err(render_error)?;

        chart
            .configure_secondary_axes()
            .y_desc("Volume")
            .label_style(("sans-serif", 12).into_font().color(&volume))
            .axis_desc_style(("sans-serif", 13).into_font().color(&volume))
            .axis_style(volume.stroke_width(1))
            .y_label_formatter(&|v: &f64| format_volume(*v))
            .draw()
            .map_err(render_error)?;

        // The mesh centers rotated labels on the axis line, so hang them from their top instead
        let date_style = ("sans-serif", 12)
            .into_font()
            .color(&text)
            .transform(FontTransform::Rotate90)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for tick in &plan.month_ticks {
            let (x, y) = chart.backend_coord(&(*tick, y_min));
            root.draw(&Text::new(
                tick.format("%Y-%m-%d").to_string(),
                (x, y + DATE_LABEL_GAP),
                date_style.clone(),
            ))
            .map_err(render_error)?;
        }

        let half = plan.bar_half_width;
        let bar_style = volume.mix(0.3).filled();
        chart
            .draw_secondary_series(plan.series.bars().iter().map(|bar| {
                Rectangle::new(
                    [(bar.timestamp - half, 0.0), (bar.timestamp + half, bar.volume)],
                    bar_style,
                )
            }))
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new(
                plan.series.bars().iter().map(|bar| (bar.timestamp, bar.close)),
                line.stroke_width(2),
            ))
            .map_err(render_error)?
            .label("Price")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line.stroke_width(2)));

        let background_rgb = (background.0, background.1, background.2);
        for (i, annotation) in plan.annotations.iter().enumerate() {
            let anchor = chart.backend_coord(&(annotation.timestamp, annotation.price));
            draw_annotation(&root, anchor, annotation, text)?;

            if let Some(thumbnail) = thumbnails.get(i).and_then(Option::as_ref) {
                let placement = inset_placement(plan, annotation);
                draw_inset(&root, placement, thumbnail, background_rgb, (width, height))?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(background.filled())
            .border_style(grid.stroke_width(1))
            .label_font(("sans-serif", 14).into_font().color(&text))
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    let canvas = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ChartError::Render("Canvas buffer size mismatch".to_string()))?;
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(render_error)?;

    debug!(
        "Rendered {} chart: {} bars, {} annotations, {} bytes",
        plan.symbol,
        plan.series.len(),
        plan.annotations.len(),
        png.len()
    );
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::series::PriceBar;
    use chrono::TimeZone;
    use image::Rgba;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn series(days: &[(DateTime<Utc>, f64, f64)]) -> PriceSeries {
        PriceSeries::new(
            days.iter()
                .map(|&(timestamp, close, volume)| PriceBar {
                    timestamp,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume,
                })
                .collect(),
        )
    }

    fn event(date: (i32, u32, u32), description: &str) -> Event {
        Event {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: description.to_string(),
            color: DEFAULT_EVENT_COLOR.to_string(),
            image_url: None,
        }
    }

    fn trading_week() -> PriceSeries {
        series(&[
            (day(2023, 5, 30), 177.30, 55_964_400.0),
            (day(2023, 5, 31), 177.25, 99_625_300.0),
            (day(2023, 6, 1), 180.09, 68_901_800.0),
            (day(2023, 6, 2), 180.95, 61_945_900.0),
            (day(2023, 6, 5), 179.58, 121_946_500.0),
        ])
    }

    #[test]
    fn test_plan_resolves_events_to_nearest_trading_day() {
        let data = trading_week();
        let events = vec![
            event((2023, 6, 1), "Product launch"),
            event((2023, 6, 3), "Weekend news"),
            event((2020, 1, 1), "Long ago"),
        ];
        let plan = plan_chart(&data, "AAPL", &events, Theme::Dark).unwrap();

        assert_eq!(plan.annotations.len(), 3);
        assert_eq!(plan.annotations[0].timestamp, day(2023, 6, 1));
        assert_eq!(plan.annotations[0].price, 180.09);
        assert_eq!(plan.annotations[0].text, "Product launch");
        assert_eq!(plan.annotations[1].timestamp, day(2023, 6, 2));
        assert_eq!(plan.annotations[2].bar_index, 0);
    }

    #[test]
    fn test_weekend_tie_picks_earlier_bar() {
        // 2023-06-03 is exactly one day from each bar
        let data = series(&[(day(2023, 6, 2), 1.0, 1.0), (day(2023, 6, 4), 2.0, 1.0)]);
        let plan = plan_chart(&data, "X", &[event((2023, 6, 3), "tie")], Theme::Dark).unwrap();
        assert_eq!(plan.annotations[0].bar_index, 0);
    }

    #[test]
    fn test_volume_axis_is_three_times_peak() {
        let data = trading_week();
        let plan = plan_chart(&data, "AAPL", &[], Theme::Light).unwrap();

        assert_eq!(plan.volume_max, 121_946_500.0 * 3.0);
        assert!(plan.price_range.0 < 177.25 && plan.price_range.1 > 180.95);
        assert_eq!(plan.x_range, (day(2023, 5, 30), day(2023, 6, 5)));
        assert!(plan.annotations.is_empty());
    }

    #[test]
    fn test_theme_does_not_change_geometry() {
        let data = trading_week();
        let events = vec![event((2023, 6, 1), "Product launch")];
        let dark = plan_chart(&data, "AAPL", &events, Theme::Dark).unwrap();
        let light = plan_chart(&data, "AAPL", &events, Theme::Light).unwrap();

        assert_eq!(dark.annotations, light.annotations);
        assert_eq!(dark.price_range, light.price_range);
        assert_eq!(dark.month_ticks, light.month_ticks);
    }

    #[test]
    fn test_empty_series_cannot_be_planned() {
        let empty = PriceSeries::default();
        assert!(matches!(plan_chart(&empty, "AAPL", &[], Theme::Dark), Err(ChartError::Render(_))));
    }

    #[test]
    fn test_single_bar_gets_padded_range() {
        let data = series(&[(day(2024, 2, 15), 10.0, 0.0)]);
        let plan = plan_chart(&data, "ONE", &[], Theme::Dark).unwrap();

        assert_eq!(plan.x_range, (day(2024, 2, 14), day(2024, 2, 16)));
        assert_eq!(plan.volume_max, 1.0);
        assert!(plan.price_range.0 < 10.0 && plan.price_range.1 > 10.0);
    }

    #[test]
    fn test_month_ticks_fall_on_month_starts() {
        let ticks = month_ticks(day(2023, 1, 15), day(2023, 5, 2));
        assert_eq!(ticks, vec![day(2023, 2, 1), day(2023, 3, 1), day(2023, 4, 1), day(2023, 5, 1)]);

        let year_end = month_ticks(day(2022, 11, 1), day(2023, 1, 31));
        assert_eq!(year_end, vec![day(2022, 11, 1), day(2022, 12, 1), day(2023, 1, 1)]);
    }

    #[test]
    fn test_month_ticks_thin_long_ranges_and_pad_short_ones() {
        let five_years = month_ticks(day(2019, 1, 1), day(2023, 12, 31));
        assert!(five_years.len() <= MAX_MONTH_TICKS);
        assert_eq!(five_years[0], day(2019, 1, 1));
        assert!(five_years.iter().all(|t| t.day() == 1));

        let short = month_ticks(day(2023, 6, 5), day(2023, 6, 20));
        assert_eq!(short, vec![day(2023, 6, 5), day(2023, 6, 20)]);
    }

    #[test]
    fn test_inset_placement_tracks_relative_position() {
        let data = trading_week();
        let events = vec![event((2023, 5, 30), "start"), event((2023, 6, 5), "end")];
        let plan = plan_chart(&data, "AAPL", &events, Theme::Dark).unwrap();

        let start = inset_placement(&plan, &plan.annotations[0]);
        assert_eq!(start.left, 0.0);
        assert_eq!((start.width, start.height), (0.1, 0.1));

        let end = inset_placement(&plan, &plan.annotations[1]);
        assert_eq!(end.left, 1.0);
        let (y0, y1) = plan.price_range;
        let expected = (179.58 - y0) / (y1 - y0) - 0.1;
        assert!((end.bottom - expected).abs() < 1e-9);
    }

    #[test]
    fn test_inset_pixels_anchor_top_right() {
        let placement = InsetPlacement { left: 0.5, bottom: 0.5, width: 0.1, height: 0.1 };
        let (pos, side) = inset_pixels(&placement, 1400, 800);
        assert_eq!(side, 80);
        // box spans x 700..840, y 320..400; the square hugs its right edge
        assert_eq!(pos, (760, 320));
    }

    #[test]
    fn test_visible_region_clips_to_canvas() {
        assert_eq!(visible_region((10, 10), 80, (1400, 800)), Some((0, 0, 80, 80)));
        assert_eq!(visible_region((-20, 770), 80, (1400, 800)), Some((20, 0, 60, 30)));
        assert_eq!(visible_region((1400, 0), 80, (1400, 800)), None);
    }

    #[test]
    fn test_flatten_onto_background() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 0]));
        assert_eq!(flatten_onto(&img, (30, 30, 30)), vec![255, 0, 0, 30, 30, 30]);
    }

    #[test]
    fn test_arrow_head_points_at_tip() {
        assert_eq!(arrow_head((0, 0), (20, 0)), [(20, 0), (12, 4), (12, -4)]);
        assert_eq!(arrow_head((5, 5), (5, 5)), [(5, 5); 3]);
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(68_901_800.0), "68.9M");
        assert_eq!(format_volume(2_500_000_000.0), "2.5B");
        assert_eq!(format_volume(1_500.0), "1.5K");
        assert_eq!(format_volume(42.0), "42");
    }

    #[test]
    fn test_event_color_falls_back_to_default() {
        assert_eq!(event_color("#2962FF"), RGBColor(0x29, 0x62, 0xFF));
        assert_eq!(event_color("nonsense"), RGBColor(0xFF, 0x98, 0x00));
    }

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

    #[test]
    fn test_render_chart_in_both_themes() {
        let data = trading_week();
        let mut launch = event((2023, 6, 1), "Product launch");
        launch.image_url = Some("https://example.com/launch.png".to_string());
        let thumbnail = RgbaImage::from_pixel(100, 100, Rgba([200, 40, 40, 255]));

        for theme in [Theme::Dark, Theme::Light] {
            let plan = plan_chart(&data, "AAPL", &[launch.clone()], theme).unwrap();
            let png = render_chart(&plan, &[Some(thumbnail.clone())], 800, 500).unwrap();

            assert_eq!(&png[..8], &PNG_MAGIC);
            let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
            assert_eq!(decoded.dimensions(), (800, 500));
            let (r, g, b) = parse_hex_color(theme.palette().background).unwrap();
            assert_eq!(decoded.get_pixel(0, 0).0, [r, g, b]);
        }
    }

    #[test]
    fn test_render_chart_without_thumbnails() {
        let data = trading_week();
        let plan = plan_chart(&data, "AAPL", &[event((2023, 6, 2), "Earnings")], Theme::Dark).unwrap();

        let png = render_chart(&plan, &[None], 640, 400).unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_render_chart_rejects_empty_canvas() {
        let data = trading_week();
        let plan = plan_chart(&data, "AAPL", &[], Theme::Dark).unwrap();

        assert!(matches!(render_chart(&plan, &[], 0, 400), Err(ChartError::Render(_))));
        assert!(matches!(render_chart(&plan, &[], 400, 0), Err(ChartError::Render(_))));
    }
}
