use chrono::NaiveDate;

/// Grid granularity of the timeline header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

/// Visible date window and zoom of the objective timeline.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub scale: TimelineScale,
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub const MIN_PIXELS_PER_DAY: f32 = 2.0;
    pub const MAX_PIXELS_PER_DAY: f32 = 60.0;

    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: end.max(start),
            scale: TimelineScale::Weeks,
            pixels_per_day: 10.0,
        }
    }

    /// Window covering `start..=end` with a week of margin on both sides.
    pub fn around(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(
            start - chrono::Duration::days(7),
            end.max(start) + chrono::Duration::days(7),
        )
    }

    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        (date - self.start).num_days() as f32 * self.pixels_per_day
    }

    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(Self::MAX_PIXELS_PER_DAY);
    }

    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(Self::MIN_PIXELS_PER_DAY);
    }

    /// Zoom so the whole window spans `width` pixels.
    pub fn fit_width(&mut self, width: f32) {
        let days = (self.end - self.start).num_days().max(1) as f32;
        self.pixels_per_day =
            (width / days).clamp(Self::MIN_PIXELS_PER_DAY, Self::MAX_PIXELS_PER_DAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_around_pads_a_week() {
        let vp = TimelineViewport::around(date(1, 8), date(3, 24));
        assert_eq!(vp.start, date(1, 1));
        assert_eq!(vp.end, date(3, 31));
        assert!(vp.contains(date(2, 14)));
        assert!(!vp.contains(date(4, 1)));
    }

    #[test]
    fn test_zoom_is_bounded() {
        let mut vp = TimelineViewport::new(date(1, 1), date(3, 31));
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.pixels_per_day, TimelineViewport::MAX_PIXELS_PER_DAY);
        vp.fit_width(890.0);
        assert_eq!(vp.pixels_per_day, 10.0);
        assert_eq!(vp.date_to_x(date(1, 11)), 100.0);
    }
}
