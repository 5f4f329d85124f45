use std::f32::consts::FRAC_PI_2;

use eframe::egui::epaint::TextShape;
use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui, pos2, vec2,
};

use crate::skills::DenseGrid;
use crate::util::{format_count, format_ratio, truncate_label};

use super::super::render_utils::{
    AXIS_COLOR, GRID_COLOR, LABEL_COLOR, REFERENCE_LINE_COLOR, blend_color, draw_background,
    to_color32,
};
use super::build::{BAR_WIDTH, ChartModel, GLOBAL_AVERAGE};

const MARGIN_LEFT: f32 = 78.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 36.0;
const MARGIN_BOTTOM: f32 = 170.0;
const COUNTRY_LABEL_SPACE: f32 = 110.0;
const COUNTRY_LABEL_CHARS: usize = 18;

pub(in crate::app) const X_AXIS_LABEL: &str = "Skill Group Name, Country";
pub(in crate::app) const Y_AXIS_LABEL: &str = "Relative Skill Group Penetration";
pub(in crate::app) const OCCUPATIONS_LABEL: &str =
    "No. of Occupations in this Country with Positive Skill Group Penetration for this Skill";

struct PlotFrame {
    outer: Rect,
    plot: Rect,
    x_min: f64,
    x_span: f64,
    y_max: f64,
}

impl PlotFrame {
    fn x(&self, value: f64) -> f32 {
        self.plot.left() + ((value - self.x_min) / self.x_span) as f32 * self.plot.width()
    }

    fn y(&self, value: f64) -> f32 {
        self.plot.bottom() - (value / self.y_max) as f32 * self.plot.height()
    }

    fn data_x(&self, screen_x: f32) -> f64 {
        self.x_min + ((screen_x - self.plot.left()) / self.plot.width()) as f64 * self.x_span
    }
}

/// Paints the bar chart for `grid` into the remaining space of `ui`, with a
/// read-out for the hovered bar.
pub(in crate::app) fn draw_chart(ui: &mut Ui, grid: &DenseGrid) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;
    draw_background(&painter, rect);

    if grid.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Select at least one skill group and one country.",
            FontId::proportional(16.0),
            LABEL_COLOR,
        );
        return;
    }

    let model = ChartModel::build(grid);
    let plot = Rect::from_min_max(
        pos2(rect.left() + MARGIN_LEFT, rect.top() + MARGIN_TOP),
        pos2(rect.right() - MARGIN_RIGHT, rect.bottom() - MARGIN_BOTTOM),
    );
    if plot.width() <= 1.0 || plot.height() <= 1.0 {
        return;
    }

    let frame = PlotFrame {
        outer: rect,
        plot,
        x_min: model.x_min,
        x_span: model.x_span(),
        y_max: model.y_max,
    };

    let hovered = response
        .hover_pos()
        .filter(|pointer| {
            pointer.x >= plot.left()
                && pointer.x <= plot.right()
                && pointer.y >= plot.top()
                && pointer.y <= plot.bottom() + COUNTRY_LABEL_SPACE
        })
        .and_then(|pointer| model.bar_at(frame.data_x(pointer.x)))
        .map(|bar| bar.entry_index);

    draw_y_axis(&painter, &frame, &model);
    draw_bars(&painter, &frame, &model, hovered);
    draw_global_average(&painter, &frame);
    draw_x_axis(&painter, &frame, &model, grid);
    draw_legend(&painter, plot);

    if let Some(index) = hovered {
        draw_hover_panel(&painter, plot, grid, index);
    }
}

fn tick_label(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{value:.0}")
    } else if step >= 0.1 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

/// Draws `text` reading bottom-to-top, starting at `bottom_left`.
fn draw_rotated_text(painter: &Painter, bottom_left: Pos2, text: String, font: FontId) {
    let galley = painter.layout_no_wrap(text, font, LABEL_COLOR);
    painter.add(TextShape::new(bottom_left, galley, LABEL_COLOR).with_angle(-FRAC_PI_2));
}

fn draw_y_axis(painter: &Painter, frame: &PlotFrame, model: &ChartModel) {
    let plot = frame.plot;
    for tick in model.y_ticks() {
        let y = frame.y(tick);
        painter.line_segment(
            [pos2(plot.left(), y), pos2(plot.right(), y)],
            Stroke::new(1.0, GRID_COLOR),
        );
        painter.text(
            pos2(plot.left() - 8.0, y),
            Align2::RIGHT_CENTER,
            tick_label(tick, model.y_step),
            FontId::proportional(12.0),
            LABEL_COLOR,
        );
    }

    painter.line_segment(
        [plot.left_top(), plot.left_bottom()],
        Stroke::new(2.0, AXIS_COLOR),
    );

    let font = FontId::proportional(13.0);
    let width = painter
        .layout_no_wrap(Y_AXIS_LABEL.to_owned(), font.clone(), LABEL_COLOR)
        .size()
        .x;
    draw_rotated_text(
        painter,
        pos2(frame.outer.left() + 8.0, plot.center().y + width / 2.0),
        Y_AXIS_LABEL.to_owned(),
        font,
    );
}

fn draw_bars(painter: &Painter, frame: &PlotFrame, model: &ChartModel, hovered: Option<usize>) {
    let half_width = BAR_WIDTH / 2.0;
    let baseline = frame.y(0.0);

    for bar in &model.bars {
        let left = frame.x(bar.center - half_width);
        let right = frame.x(bar.center + half_width);
        let is_hovered = hovered == Some(bar.entry_index);

        if is_hovered {
            painter.rect_filled(
                Rect::from_min_max(pos2(left, frame.plot.top()), pos2(right, baseline)),
                0.0,
                Color32::from_white_alpha(14),
            );
        }

        // Missing pairs stay as a visible gap.
        let Some(ratio) = bar.ratio else {
            continue;
        };

        let top = frame.y(ratio.clamp(0.0, frame.y_max));
        let mut fill = to_color32(bar.color);
        if is_hovered {
            fill = blend_color(fill, Color32::WHITE, 0.3);
        }
        painter.rect_filled(
            Rect::from_min_max(pos2(left, top), pos2(right, baseline)),
            0.0,
            fill,
        );
    }

    painter.line_segment(
        [pos2(frame.plot.left(), baseline), pos2(frame.plot.right(), baseline)],
        Stroke::new(2.0, AXIS_COLOR),
    );
}

fn draw_global_average(painter: &Painter, frame: &PlotFrame) {
    let y = frame.y(GLOBAL_AVERAGE);
    painter.extend(Shape::dashed_line(
        &[pos2(frame.plot.left(), y), pos2(frame.plot.right(), y)],
        Stroke::new(2.0, REFERENCE_LINE_COLOR),
        8.0,
        5.0,
    ));
}

fn draw_x_axis(painter: &Painter, frame: &PlotFrame, model: &ChartModel, grid: &DenseGrid) {
    let plot = frame.plot;
    let slot_width = frame.x(1.0) - frame.x(0.0);
    let font = FontId::proportional((slot_width * 0.8).clamp(7.0, 12.0));
    let label_top = plot.bottom() + 6.0;

    // Bars are laid out in grid order, one per pair.
    for (bar, pair) in model.bars.iter().zip(grid.pairs()) {
        let text = truncate_label(pair.country(), COUNTRY_LABEL_CHARS);
        let size = painter
            .layout_no_wrap(text.clone(), font.clone(), LABEL_COLOR)
            .size();
        draw_rotated_text(
            painter,
            pos2(frame.x(bar.center) - size.y / 2.0, label_top + size.x),
            text,
            font.clone(),
        );
    }

    let group_top = label_top + COUNTRY_LABEL_SPACE + 6.0;
    for (index, group) in model.groups.iter().enumerate() {
        let start = frame.x(group.start);
        let end = frame.x(group.end);
        let max_chars = ((end - start) / 7.0).max(3.0) as usize;
        painter.text(
            pos2((start + end) / 2.0, group_top),
            Align2::CENTER_TOP,
            truncate_label(&group.skill, max_chars),
            FontId::proportional(12.0),
            LABEL_COLOR,
        );

        if index > 0 {
            let previous_end = frame.x(model.groups[index - 1].end);
            let x = (previous_end + start) / 2.0;
            painter.line_segment(
                [pos2(x, plot.bottom()), pos2(x, group_top + 16.0)],
                Stroke::new(1.0, GRID_COLOR),
            );
        }
    }

    painter.text(
        pos2(plot.center().x, frame.outer.bottom() - 6.0),
        Align2::CENTER_BOTTOM,
        X_AXIS_LABEL,
        FontId::proportional(13.0),
        LABEL_COLOR,
    );
}

fn draw_legend(painter: &Painter, plot: Rect) {
    let start = pos2(plot.right() - 150.0, plot.top() + 14.0);
    painter.line_segment(
        [start, start + vec2(24.0, 0.0)],
        Stroke::new(2.0, Color32::GRAY),
    );
    painter.text(
        start + vec2(30.0, 0.0),
        Align2::LEFT_CENTER,
        "Global Average",
        FontId::proportional(12.0),
        LABEL_COLOR,
    );
}

fn draw_hover_panel(painter: &Painter, plot: Rect, grid: &DenseGrid, index: usize) {
    let Some(entry) = grid.entries().get(index) else {
        return;
    };

    let text = format!(
        "{X_AXIS_LABEL}: {}, {}\n{Y_AXIS_LABEL}: {}\n{OCCUPATIONS_LABEL}: {}",
        entry.key.skill(),
        entry.key.country(),
        format_ratio(entry.ratio),
        format_count(entry.occupations),
    );
    let galley = painter.layout(
        text,
        FontId::proportional(13.0),
        Color32::from_gray(240),
        (plot.width() - 40.0).max(120.0),
    );

    let origin = plot.left_top() + vec2(10.0, 10.0);
    let background = Rect::from_min_size(origin, galley.size()).expand(6.0);
    painter.rect_filled(background, 4.0, Color32::from_black_alpha(200));
    painter.galley(origin, galley, Color32::from_gray(240));
}
