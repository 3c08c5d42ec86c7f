use chrono::{Datelike, Duration, NaiveDate};

/// Display granularity of the timeline. Controls how many days are rendered
/// and how wide each day cell is before zoom is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Day,
    Week,
    Month,
    Quarter,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Day, ViewMode::Week, ViewMode::Month, ViewMode::Quarter];

    /// Number of day cells rendered in this mode.
    pub fn day_count(&self) -> usize {
        match self {
            ViewMode::Day => 21,
            ViewMode::Week => 60,
            ViewMode::Month => 90,
            ViewMode::Quarter => 120,
        }
    }

    /// Unzoomed pixel width of one day cell.
    pub fn base_cell_width(&self) -> f32 {
        match self {
            ViewMode::Day => 140.0,
            ViewMode::Week => 60.0,
            ViewMode::Month => 40.0,
            ViewMode::Quarter => 20.0,
        }
    }

    /// How far prev/next moves the window.
    pub fn navigation_weeks(&self) -> i64 {
        match self {
            ViewMode::Day | ViewMode::Week => 1,
            ViewMode::Month => 4,
            ViewMode::Quarter => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Quarter => "Quarter",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;
pub const ZOOM_STEP: f32 = 0.25;

/// Horizontal placement of a bar relative to the start of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub left: f32,
    pub width: f32,
}

impl BarSpan {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// The contiguous range of dates currently rendered, anchored at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub mode: ViewMode,
    zoom: f32,
}

impl TimelineWindow {
    pub fn new(start: NaiveDate, mode: ViewMode) -> Self {
        Self {
            start,
            mode,
            zoom: 1.0,
        }
    }

    /// The default window: the Monday of the week before `today`.
    pub fn around(today: NaiveDate) -> Self {
        Self::new(anchor_for(today), ViewMode::Week)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Zoom as a whole percentage, for labels.
    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0).round() as i32
    }

    pub fn day_count(&self) -> usize {
        self.mode.day_count()
    }

    pub fn cell_width(&self) -> f32 {
        self.mode.base_cell_width() * self.zoom
    }

    pub fn total_width(&self) -> f32 {
        self.day_count() as f32 * self.cell_width()
    }

    /// Every rendered date, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.day_count() as i64)
            .map(|i| self.start + Duration::days(i))
            .collect()
    }

    pub fn offset_days(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    pub fn date_at_offset(&self, days: i64) -> NaiveDate {
        self.start + Duration::days(days)
    }

    /// Place a bar covering `[start, end]` inclusive.
    pub fn bar_span(&self, start: NaiveDate, end: NaiveDate) -> BarSpan {
        let cell = self.cell_width();
        BarSpan {
            left: self.offset_days(start) as f32 * cell,
            width: ((end - start).num_days() + 1) as f32 * cell,
        }
    }

    /// Offset of `today` in days, or `None` when it falls outside the window.
    pub fn today_offset(&self, today: NaiveDate) -> Option<i64> {
        let diff = self.offset_days(today);
        (diff >= 0 && diff < self.day_count() as i64).then_some(diff)
    }

    pub fn navigate(&mut self, direction: Direction) {
        let weeks = self.mode.navigation_weeks();
        let step = match direction {
            Direction::Prev => -weeks,
            Direction::Next => weeks,
        };
        self.start += Duration::weeks(step);
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.start = anchor_for(today);
    }
}

/// Monday of the week preceding `today`.
pub fn anchor_for(today: NaiveDate) -> NaiveDate {
    let last_week = today - Duration::weeks(1);
    last_week - Duration::days(last_week.weekday().num_days_from_monday() as i64)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn dates_have_mode_length() {
        for mode in ViewMode::ALL {
            let window = TimelineWindow::new(d(2024, 1, 8), mode);
            let dates = window.dates();
            assert_eq!(dates.len(), mode.day_count());
            assert_eq!(dates[0], d(2024, 1, 8));
            assert_eq!(*dates.last().unwrap(), d(2024, 1, 8) + Duration::days(mode.day_count() as i64 - 1));
        }
    }

    #[test]
    fn cell_width_scales_with_zoom() {
        let mut window = TimelineWindow::new(d(2024, 1, 8), ViewMode::Week);
        assert_eq!(window.cell_width(), 60.0);
        window.set_zoom(1.5);
        assert_eq!(window.cell_width(), 90.0);
        window.mode = ViewMode::Day;
        assert_eq!(window.cell_width(), 210.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut window = TimelineWindow::new(d(2024, 1, 8), ViewMode::Week);
        for _ in 0..10 {
            window.zoom_in();
        }
        assert_eq!(window.zoom(), MAX_ZOOM);
        for _ in 0..10 {
            window.zoom_out();
        }
        assert_eq!(window.zoom(), MIN_ZOOM);
        assert_eq!(window.zoom_percent(), 50);
    }

    #[test]
    fn bar_span_covers_inclusive_range() {
        let window = TimelineWindow::new(d(2024, 1, 8), ViewMode::Week);
        let span = window.bar_span(d(2024, 1, 10), d(2024, 1, 15));
        assert_eq!(span.left, 120.0);
        assert_eq!(span.width, 360.0);
        assert_eq!(span.right(), 480.0);
    }

    #[test]
    fn bar_before_window_has_negative_left() {
        let window = TimelineWindow::new(d(2024, 1, 8), ViewMode::Month);
        let span = window.bar_span(d(2024, 1, 6), d(2024, 1, 6));
        assert_eq!(span.left, -80.0);
        assert_eq!(span.width, 40.0);
    }

    #[test]
    fn today_marker_only_inside_window() {
        let window = TimelineWindow::new(d(2024, 1, 8), ViewMode::Day);
        assert_eq!(window.today_offset(d(2024, 1, 8)), Some(0));
        assert_eq!(window.today_offset(d(2024, 1, 28)), Some(20));
        assert_eq!(window.today_offset(d(2024, 1, 29)), None);
        assert_eq!(window.today_offset(d(2024, 1, 7)), None);
    }

    #[test]
    fn anchor_is_monday_of_previous_week() {
        // 2024-01-23 is a Tuesday.
        assert_eq!(anchor_for(d(2024, 1, 23)), d(2024, 1, 15));
        // Mondays anchor exactly one week back.
        assert_eq!(anchor_for(d(2024, 1, 22)), d(2024, 1, 15));
        // Sundays belong to the week that started six days earlier.
        assert_eq!(anchor_for(d(2024, 1, 28)), d(2024, 1, 15));
    }

    #[test]
    fn navigation_step_depends_on_mode() {
        let mut window = TimelineWindow::new(d(2024, 1, 15), ViewMode::Week);
        window.navigate(Direction::Next);
        assert_eq!(window.start, d(2024, 1, 22));

        window.mode = ViewMode::Month;
        window.navigate(Direction::Prev);
        assert_eq!(window.start, d(2023, 12, 25));

        window.mode = ViewMode::Quarter;
        window.navigate(Direction::Next);
        assert_eq!(window.start, d(2024, 3, 18));
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!(ViewMode::parse("quarter"), Some(ViewMode::Quarter));
        assert_eq!(ViewMode::parse("Day"), Some(ViewMode::Day));
        assert_eq!(ViewMode::parse("year"), None);
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(d(2024, 1, 20)));
        assert!(is_weekend(d(2024, 1, 21)));
        assert!(!is_weekend(d(2024, 1, 22)));
    }
}
