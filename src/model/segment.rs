use super::interval::TimeInterval;

/// Interval segments narrower than this (in hours) are not rendered.
/// A display threshold against sub-6-minute slivers, not a data rule.
pub const MIN_SEGMENT_WIDTH: f32 = 0.1;

/// What a segment represents. Variant order is the paint order:
/// schedule lowest, markings topmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SegmentKind {
    Schedule,
    Absence,
    Regular,
    Overtime,
    Marking,
}

impl SegmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::Schedule => "Scheduled",
            SegmentKind::Absence => "Absent",
            SegmentKind::Regular => "Worked",
            SegmentKind::Overtime => "Overtime",
            SegmentKind::Marking => "Marking",
        }
    }
}

/// One labeled span in hour-space. Markings are points (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: f32,
    pub end: f32,
}

impl Segment {
    pub fn width(&self) -> f32 {
        self.end - self.start
    }

    pub fn is_marking(&self) -> bool {
        self.kind == SegmentKind::Marking
    }
}

/// Derive the colored segments for one employee-day cell from its
/// planned schedule, actual worked span, and point markings.
///
/// The returned Vec is in paint order; overlapping segments layer in
/// that order, so "what's on top" at a pixel reads as schedule <
/// absence < worked < overtime < markings.
///
/// Worked time before the schedule start is not classified as
/// overtime; only time past the schedule end is.
pub fn compute_segments(
    schedule: Option<TimeInterval>,
    worked: Option<TimeInterval>,
    marking_times: &[f32],
) -> Vec<Segment> {
    let mut out = Vec::new();

    if let Some(s) = schedule {
        push_span(&mut out, SegmentKind::Schedule, s.start, s.end);

        match worked {
            // No clock data at all: the whole shift reads as absence.
            None => push_span(&mut out, SegmentKind::Absence, s.start, s.end),
            Some(w) => {
                if w.start > s.start {
                    push_span(&mut out, SegmentKind::Absence, s.start, w.start.min(s.end));
                }
                if w.end < s.end {
                    push_span(&mut out, SegmentKind::Absence, w.end.max(s.start), s.end);
                }
            }
        }
    }

    if let Some(w) = worked {
        // Without a schedule the bounds are open: everything clocked is regular.
        let (s_start, s_end) = match schedule {
            Some(s) => (s.start, s.end),
            None => (f32::NEG_INFINITY, f32::INFINITY),
        };
        push_span(
            &mut out,
            SegmentKind::Regular,
            w.start.max(s_start),
            w.end.min(s_end),
        );
        push_span(&mut out, SegmentKind::Overtime, w.start.max(s_end), w.end);
    }

    // Markings are independent of the intervals: input order, no dedup.
    for &t in marking_times {
        out.push(Segment {
            kind: SegmentKind::Marking,
            start: t,
            end: t,
        });
    }

    out
}

fn push_span(out: &mut Vec<Segment>, kind: SegmentKind, start: f32, end: f32) {
    if end - start > MIN_SEGMENT_WIDTH {
        out.push(Segment { kind, start, end });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: f32, end: f32) -> TimeInterval {
        TimeInterval::new(start, end)
    }

    fn spans(segments: &[Segment], kind: SegmentKind) -> Vec<(f32, f32)> {
        segments
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn worked_inside_schedule_is_all_regular() {
        let segs = compute_segments(Some(iv(8.0, 17.0)), Some(iv(8.0, 17.0)), &[]);
        assert_eq!(spans(&segs, SegmentKind::Schedule), vec![(8.0, 17.0)]);
        assert_eq!(spans(&segs, SegmentKind::Regular), vec![(8.0, 17.0)]);
        assert!(spans(&segs, SegmentKind::Absence).is_empty());
        assert!(spans(&segs, SegmentKind::Overtime).is_empty());
    }

    #[test]
    fn late_start_early_end_produces_both_absences() {
        let segs = compute_segments(Some(iv(8.0, 17.0)), Some(iv(9.0, 16.0)), &[]);
        assert_eq!(
            spans(&segs, SegmentKind::Absence),
            vec![(8.0, 9.0), (16.0, 17.0)]
        );
        assert_eq!(spans(&segs, SegmentKind::Regular), vec![(9.0, 16.0)]);
        for (a, b) in spans(&segs, SegmentKind::Absence) {
            assert!(b - a < 9.0);
        }
    }

    #[test]
    fn work_past_schedule_end_is_overtime() {
        let segs = compute_segments(Some(iv(8.0, 16.0)), Some(iv(8.0, 18.5)), &[]);
        assert_eq!(spans(&segs, SegmentKind::Overtime), vec![(16.0, 18.5)]);
        assert_eq!(spans(&segs, SegmentKind::Regular), vec![(8.0, 16.0)]);
    }

    #[test]
    fn no_schedule_means_unbounded_regular() {
        let segs = compute_segments(None, Some(iv(10.0, 14.0)), &[]);
        assert_eq!(spans(&segs, SegmentKind::Regular), vec![(10.0, 14.0)]);
        assert!(spans(&segs, SegmentKind::Schedule).is_empty());
        assert!(spans(&segs, SegmentKind::Absence).is_empty());
        assert!(spans(&segs, SegmentKind::Overtime).is_empty());
    }

    #[test]
    fn no_worked_means_full_absence() {
        let segs = compute_segments(Some(iv(9.0, 15.0)), None, &[]);
        assert_eq!(spans(&segs, SegmentKind::Absence), vec![(9.0, 15.0)]);
    }

    #[test]
    fn nothing_but_markings() {
        let segs = compute_segments(None, None, &[12.5, 7.0, 12.5]);
        assert_eq!(segs.len(), 3);
        // Input order, no sort, no dedup
        assert_eq!(segs[0].start, 12.5);
        assert_eq!(segs[1].start, 7.0);
        assert_eq!(segs[2].start, 12.5);
        assert!(segs.iter().all(|s| s.is_marking() && s.width() == 0.0));
    }

    #[test]
    fn sub_epsilon_segments_are_suppressed() {
        let segs = compute_segments(Some(iv(9.0, 9.05)), None, &[]);
        assert!(segs.is_empty());

        // 3-minute absence sliver is dropped, the rest stays
        let segs = compute_segments(Some(iv(8.0, 16.0)), Some(iv(8.05, 16.0)), &[]);
        assert!(spans(&segs, SegmentKind::Absence).is_empty());
        assert_eq!(spans(&segs, SegmentKind::Regular), vec![(8.05, 16.0)]);
    }

    #[test]
    fn early_start_is_not_overtime() {
        // Clocking in before the shift neither counts as overtime nor
        // widens the regular span.
        let segs = compute_segments(Some(iv(9.0, 17.0)), Some(iv(7.0, 17.0)), &[]);
        assert_eq!(spans(&segs, SegmentKind::Regular), vec![(9.0, 17.0)]);
        assert!(spans(&segs, SegmentKind::Overtime).is_empty());
        assert!(spans(&segs, SegmentKind::Absence).is_empty());
    }

    #[test]
    fn worked_example_from_the_rota() {
        let segs = compute_segments(Some(iv(8.0, 17.0)), Some(iv(8.5, 18.0)), &[]);
        assert_eq!(spans(&segs, SegmentKind::Schedule), vec![(8.0, 17.0)]);
        assert_eq!(spans(&segs, SegmentKind::Absence), vec![(8.0, 8.5)]);
        assert_eq!(spans(&segs, SegmentKind::Regular), vec![(8.5, 17.0)]);
        assert_eq!(spans(&segs, SegmentKind::Overtime), vec![(17.0, 18.0)]);
    }

    #[test]
    fn output_is_in_paint_order() {
        let segs = compute_segments(Some(iv(8.0, 17.0)), Some(iv(8.5, 18.0)), &[12.0]);
        let kinds: Vec<SegmentKind> = segs.iter().map(|s| s.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
        assert_eq!(*kinds.last().unwrap(), SegmentKind::Marking);
    }

    #[test]
    fn disjoint_worked_after_schedule() {
        // Worked span entirely past the schedule: full absence plus pure overtime.
        let segs = compute_segments(Some(iv(8.0, 12.0)), Some(iv(13.0, 15.0)), &[]);
        assert_eq!(spans(&segs, SegmentKind::Absence), vec![(8.0, 12.0)]);
        assert!(spans(&segs, SegmentKind::Regular).is_empty());
        assert_eq!(spans(&segs, SegmentKind::Overtime), vec![(13.0, 15.0)]);
    }
}
