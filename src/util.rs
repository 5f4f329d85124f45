pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_owned(),
    }
}

pub fn format_count(count: Option<u64>) -> String {
    let Some(count) = count else {
        return "n/a".to_owned();
    };

    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Shortens a label to at most `max_chars` characters, ending with an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }

    let kept = max_chars.saturating_sub(1);
    let mut short = label.chars().take(kept).collect::<String>();
    short.push('…');
    short
}

/// Step between axis ticks so that roughly `target_ticks` fit in `span`.
pub fn nice_tick_step(span: f64, target_ticks: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 || target_ticks == 0 {
        return 1.0;
    }

    let raw = span / target_ticks as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
