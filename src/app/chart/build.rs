use crate::skills::{DenseGrid, Rgb};
use crate::util::nice_tick_step;

/// Blank space between two skill groups, in bar slots.
const GROUP_PADDING: f64 = 1.4;
/// Share of the x span added as margin, split over both sides.
const RANGE_PADDING: f64 = 0.05;
pub(super) const BAR_WIDTH: f64 = 0.75;
pub(super) const GLOBAL_AVERAGE: f64 = 1.0;
const Y_HEADROOM: f64 = 1.1;
const TARGET_Y_TICKS: usize = 6;
const MAX_Y_TICKS: usize = 50;

pub(super) struct BarSlot {
    pub(super) entry_index: usize,
    pub(super) center: f64,
    pub(super) ratio: Option<f64>,
    pub(super) color: Rgb,
}

pub(super) struct GroupSpan {
    pub(super) skill: String,
    pub(super) start: f64,
    pub(super) end: f64,
}

/// Chart geometry in data units, derived from a [`DenseGrid`].
pub(super) struct ChartModel {
    pub(super) bars: Vec<BarSlot>,
    pub(super) groups: Vec<GroupSpan>,
    pub(super) x_min: f64,
    pub(super) x_max: f64,
    pub(super) y_max: f64,
    pub(super) y_step: f64,
}

impl ChartModel {
    pub(super) fn build(grid: &DenseGrid) -> Self {
        let mut bars = Vec::with_capacity(grid.len());
        let mut groups: Vec<GroupSpan> = Vec::with_capacity(grid.skills().len());
        let mut cursor = 0.0;

        for (entry_index, entry) in grid.entries().iter().enumerate() {
            let skill = entry.key.skill();
            let same_group = groups.last().is_some_and(|group| group.skill == skill);
            if !same_group {
                if !groups.is_empty() {
                    cursor += GROUP_PADDING;
                }
                groups.push(GroupSpan {
                    skill: skill.to_owned(),
                    start: cursor,
                    end: cursor,
                });
            }

            bars.push(BarSlot {
                entry_index,
                center: cursor + 0.5,
                ratio: entry.ratio,
                color: entry.color,
            });
            cursor += 1.0;
            if let Some(group) = groups.last_mut() {
                group.end = cursor;
            }
        }

        let padding = cursor * RANGE_PADDING / 2.0;
        let (y_max, y_step) = y_scale(grid.max_ratio().unwrap_or(0.0));

        Self {
            bars,
            groups,
            x_min: -padding,
            x_max: cursor + padding,
            y_max,
            y_step,
        }
    }

    pub(super) fn x_span(&self) -> f64 {
        (self.x_max - self.x_min).max(f64::EPSILON)
    }

    /// Index of the bar whose slot contains `x`, in data units.
    pub(super) fn bar_at(&self, x: f64) -> Option<&BarSlot> {
        self.bars
            .iter()
            .find(|bar| (bar.center - x).abs() <= 0.5)
    }

    pub(super) fn y_ticks(&self) -> impl Iterator<Item = f64> + '_ {
        let count = ((self.y_max / self.y_step).round() as usize).min(MAX_Y_TICKS);
        (0..=count).map(move |index| index as f64 * self.y_step)
    }
}

/// Top of the y axis and the tick step, both finite even for ratios near
/// `f64::MAX`.
fn y_scale(max_ratio: f64) -> (f64, f64) {
    let peak = (max_ratio.max(GLOBAL_AVERAGE) * Y_HEADROOM).min(f64::MAX);
    let step = nice_tick_step(peak, TARGET_Y_TICKS);
    let y_max = (peak / step).ceil() * step;

    if y_max.is_finite() && step.is_finite() && step > 0.0 {
        (y_max, step)
    } else {
        // Power-of-two split keeps every tick exact and finite.
        (peak, peak / 8.0)
    }
}
