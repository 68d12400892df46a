//! Segment schedule and the row → representative-row fan-out map.
//!
//! ROI rows are grouped into segments of `segment_width` rows starting at
//! `start_offset` and spaced `step` rows apart. Each segment is averaged
//! into one representative profile row (its center row). Segments may
//! overlap when `step < segment_width`, so a single source row can feed
//! several representative rows; the fan-out map records that relation once
//! at configuration time.

/// Immutable segment schedule for one ROI configuration.
#[derive(Clone, Debug)]
pub struct SegmentSchedule {
    segment_width: usize,
    start_offset: usize,
    step: usize,
    rep_rows: Vec<usize>,
    /// Per ROI-local row, the indices of the segments this row feeds.
    fanout: Vec<Vec<usize>>,
}

impl SegmentSchedule {
    /// Build the schedule. `count_max < 0` leaves the segment count
    /// unbounded; `segment_width` and `step` must be non-zero.
    pub fn new(
        roi_height: usize,
        segment_width: usize,
        start_offset: usize,
        step: usize,
        count_max: i64,
    ) -> Self {
        debug_assert!(segment_width > 0 && step > 0);
        let mut count = if roi_height >= start_offset + segment_width {
            (roi_height - start_offset - segment_width) / step + 1
        } else {
            0
        };
        if count_max >= 0 {
            count = count.min(count_max as usize);
        }

        let rep_rows: Vec<usize> = (0..count)
            .map(|n| start_offset + step * n + segment_width / 2)
            .collect();

        let mut fanout = vec![Vec::new(); roi_height];
        for n in 0..count {
            let first = start_offset + step * n;
            for row in first..first + segment_width {
                fanout[row].push(n);
            }
        }

        Self {
            segment_width,
            start_offset,
            step,
            rep_rows,
            fanout,
        }
    }

    /// Number of segments in the schedule.
    #[inline]
    pub fn count(&self) -> usize {
        self.rep_rows.len()
    }

    #[inline]
    pub fn segment_width(&self) -> usize {
        self.segment_width
    }

    /// Representative (center) row of segment `n`.
    #[inline]
    pub fn rep_row(&self, n: usize) -> usize {
        self.rep_rows[n]
    }

    /// All representative rows, in segment order.
    #[inline]
    pub fn rep_rows(&self) -> &[usize] {
        &self.rep_rows
    }

    /// Source rows covered by segment `n`.
    #[inline]
    pub fn rows(&self, n: usize) -> std::ops::Range<usize> {
        let first = self.start_offset + self.step * n;
        first..first + self.segment_width
    }

    /// Segments fed by a ROI-local source row.
    #[inline]
    pub fn segments_fed_by(&self, row: usize) -> &[usize] {
        &self.fanout[row]
    }

    /// Whether a ROI-local row contributes to any segment. Inactive rows are
    /// never sampled.
    #[inline]
    pub fn is_active_row(&self, row: usize) -> bool {
        !self.fanout[row].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_formula_matches_reference() {
        // floor((800 - 0 - 3) / 3) + 1 = 266
        let s = SegmentSchedule::new(800, 3, 0, 3, -1);
        assert_eq!(s.count(), 266);
    }

    #[test]
    fn count_is_clamped_by_maximum() {
        let s = SegmentSchedule::new(800, 3, 0, 3, 10);
        assert_eq!(s.count(), 10);
        let unbounded = SegmentSchedule::new(800, 3, 0, 3, -1);
        assert_eq!(unbounded.count(), 266);
    }

    #[test]
    fn short_roi_yields_zero_segments() {
        let s = SegmentSchedule::new(4, 5, 0, 2, -1);
        assert_eq!(s.count(), 0);
        let offset_eats_all = SegmentSchedule::new(10, 3, 9, 2, -1);
        assert_eq!(offset_eats_all.count(), 0);
    }

    #[test]
    fn representative_row_is_segment_center() {
        let s = SegmentSchedule::new(20, 5, 1, 4, -1);
        // Segment 0 covers rows [1, 6), center 1 + 5/2 = 3.
        assert_eq!(s.rep_row(0), 3);
        assert_eq!(s.rows(0), 1..6);
        assert_eq!(s.rep_row(1), 7);
    }

    #[test]
    fn overlapping_segments_share_rows() {
        // step < width: rows in the overlap feed two segments.
        let s = SegmentSchedule::new(12, 4, 0, 2, -1);
        assert_eq!(s.segments_fed_by(0), &[0]);
        assert_eq!(s.segments_fed_by(2), &[0, 1]);
        assert_eq!(s.segments_fed_by(3), &[0, 1]);
        assert!(s.is_active_row(5));
    }

    #[test]
    fn rows_before_offset_are_inactive() {
        let s = SegmentSchedule::new(20, 3, 4, 3, -1);
        assert!(!s.is_active_row(0));
        assert!(!s.is_active_row(3));
        assert!(s.is_active_row(4));
    }
}
