mod build;
mod view;

pub(super) use view::draw_chart;
