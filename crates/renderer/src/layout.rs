//! Plot geometry: where the data area sits and how values map onto it

use crate::style::ChartStyle;

/// The data area of a chart in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Canvas size minus the style's margins, never negative
    pub fn for_canvas(width: f64, height: f64, style: &ChartStyle) -> Self {
        let m = style.margins;
        Self {
            left: m.left,
            top: m.top,
            width: (width - m.left - m.right).max(0.0),
            height: (height - m.top - m.bottom).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.left && x <= self.right()
    }
}

/// Round a data range out to a "nice" tick interval.
///
/// Returns `(interval, start, end)` with `start <= min` and `end >= max`.
/// Flat ranges get a unit interval around the value.
pub fn calculate_y_axis_interval(min: f64, max: f64) -> (f64, f64, f64) {
    let range = max - min;
    if range == 0.0 {
        return (1.0, min.floor() - 1.0, min.ceil() + 1.0);
    }

    let target_intervals = 5.0;
    let raw_interval = range / target_intervals;

    let exponent = raw_interval.log10().floor();
    let base = 10f64.powf(exponent);
    let fraction = raw_interval / base;

    let nice_fraction: f64 = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    let interval = nice_fraction * base;

    // Snap the axis start and end to the interval
    let start = (min / interval).floor() * interval;
    let end = (max / interval).ceil() * interval;

    (interval, start, end)
}

/// Value axis fitted to the data, not anchored at zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YAxisScale {
    pub start: f64,
    pub end: f64,
    pub interval: f64,
}

impl YAxisScale {
    /// `None` when there is no finite value to fit
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let (interval, start, end) = calculate_y_axis_interval(min, max);
        Some(Self {
            start,
            end,
            interval,
        })
    }

    pub fn ticks(&self) -> Vec<f64> {
        let steps = ((self.end - self.start) / self.interval).round() as usize;
        (0..=steps)
            .map(|i| self.start + i as f64 * self.interval)
            .collect()
    }

    /// Screen y of `value`; larger values sit higher
    pub fn to_screen(&self, value: f64, area: &PlotArea) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return area.top + area.height / 2.0;
        }
        area.bottom() - (value - self.start) / span * area.height
    }
}

/// Screen x of the `index`th of `count` evenly spaced categories
pub fn x_position(index: usize, count: usize, area: &PlotArea) -> f64 {
    if count <= 1 {
        return area.left + area.width / 2.0;
    }
    area.left + index as f64 / (count - 1) as f64 * area.width
}

/// Indices that get an x tick label, at most `max_ticks` of them
pub fn x_tick_indices(count: usize, max_ticks: usize) -> Vec<usize> {
    if count == 0 || max_ticks == 0 {
        return Vec::new();
    }
    if count <= max_ticks {
        return (0..count).collect();
    }
    let step = if max_ticks == 1 {
        count
    } else {
        (count - 1).div_ceil(max_ticks - 1)
    };
    (0..count).step_by(step).collect()
}

/// Category under the pointer, for index-mode hover
pub fn nearest_index(x: f64, count: usize, area: &PlotArea) -> Option<usize> {
    if count == 0 || !area.contains_x(x) {
        return None;
    }
    if count == 1 || area.width <= 0.0 {
        return Some(0);
    }
    let fraction = (x - area.left) / area.width;
    let index = (fraction * (count - 1) as f64).round() as usize;
    Some(index.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> PlotArea {
        PlotArea {
            left: 50.0,
            top: 10.0,
            width: 300.0,
            height: 200.0,
        }
    }

    #[test]
    fn test_basic_range() {
        let (interval, start, end) = calculate_y_axis_interval(2.9, 7.1);
        assert!((interval - 1.0).abs() < 1e-9);
        assert!((start - 2.0).abs() < 1e-9);
        assert!((end - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_range_is_padded() {
        let scale = YAxisScale::from_values(&[5.0, 5.0]).unwrap();
        assert!(scale.start < 5.0 && scale.end > 5.0);
        assert_eq!(scale.to_screen(5.0, &area()), 110.0);
    }

    #[test]
    fn test_scale_is_not_zero_anchored() {
        let scale = YAxisScale::from_values(&[1000.0, 1010.0, f64::NAN]).unwrap();
        assert!(scale.start >= 1000.0 - scale.interval);
        assert!(scale.end <= 1010.0 + scale.interval);
        let ticks = scale.ticks();
        assert_eq!(ticks.first(), Some(&scale.start));
        assert_eq!(ticks.last(), Some(&scale.end));
    }

    #[test]
    fn test_no_values_means_no_scale() {
        assert_eq!(YAxisScale::from_values(&[]), None);
        assert_eq!(YAxisScale::from_values(&[f64::INFINITY]), None);
    }

    #[test]
    fn test_to_screen_maps_extremes_to_edges() {
        let scale = YAxisScale {
            start: 0.0,
            end: 10.0,
            interval: 2.0,
        };
        assert_eq!(scale.to_screen(0.0, &area()), 210.0);
        assert_eq!(scale.to_screen(10.0, &area()), 10.0);
    }

    #[test]
    fn test_x_tick_indices_are_capped() {
        assert_eq!(x_tick_indices(0, 8), Vec::<usize>::new());
        assert_eq!(x_tick_indices(3, 8), vec![0, 1, 2]);
        let ticks = x_tick_indices(100, 8);
        assert!(ticks.len() <= 8);
        assert_eq!(ticks[0], 0);
        assert_eq!(ticks[1], 15);
    }

    #[test]
    fn test_x_position_and_nearest_index_agree() {
        let a = area();
        for i in 0..10 {
            let x = x_position(i, 10, &a);
            assert_eq!(nearest_index(x, 10, &a), Some(i));
        }
        assert_eq!(x_position(0, 1, &a), 200.0);
        assert_eq!(nearest_index(10.0, 10, &a), None);
        assert_eq!(nearest_index(100.0, 0, &a), None);
    }
}
