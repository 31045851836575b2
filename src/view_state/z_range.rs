//! Z-range calculation: where each item is the frontmost member of its stack.

use super::timeline::Timeline;
use super::types::DepthPosition;
use crate::model::Section;
use serde::Serialize;

/// Half-open interval `[start, end)` of depth positions during which an item
/// is in focus.
///
/// # Invariants
/// - `start <= end`
/// - within one section, ranges are contiguous and never overlap
/// - an `open_ended` range (the newest item of its section) also contains
///   every depth beyond `end`
/// - a `sole` range (the only item of its section) contains every depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZRange {
    start: f64,
    end: f64,
    open_ended: bool,
    sole: bool,
}

impl ZRange {
    pub fn new(start: f64, end: f64, open_ended: bool) -> Self {
        debug_assert!(start <= end, "z-range start {start} > end {end}");
        Self {
            start,
            end,
            open_ended,
            sole: false,
        }
    }

    /// Degenerate range of the only item in a section, pinned at `position`.
    pub fn sole(position: f64) -> Self {
        Self {
            start: position,
            end: position,
            open_ended: true,
            sole: true,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_open_ended(&self) -> bool {
        self.open_ended
    }

    /// True for the range of a section's only item.
    pub fn is_sole(&self) -> bool {
        self.sole
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// True when `start == end`.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, depth: DepthPosition) -> bool {
        let depth = depth.get();
        if self.sole {
            !depth.is_nan()
        } else if self.open_ended {
            depth >= self.start
        } else {
            depth >= self.start && depth < self.end
        }
    }

    /// Signed distance from `depth` to this range.
    ///
    /// Zero inside the range, positive once the depth has moved past `end`
    /// (the item has receded), negative while the depth is still before
    /// `start` (the item is arriving).
    pub fn signed_distance(&self, depth: DepthPosition) -> f64 {
        if self.contains(depth) {
            0.0
        } else if depth.get() < self.start {
            depth.get() - self.start
        } else {
            depth.get() - self.end
        }
    }

    /// True when the two ranges share any depth position.
    pub fn overlaps(&self, other: &ZRange) -> bool {
        let bounds = |range: &ZRange| {
            let start = if range.sole { f64::NEG_INFINITY } else { range.start };
            let end = if range.open_ended { f64::INFINITY } else { range.end };
            (start, end)
        };
        let (self_start, self_end) = bounds(self);
        let (other_start, other_end) = bounds(other);
        self_start < other_end && other_start < self_end
    }
}

/// Compute a z-range for every timeline entry, aligned with `timeline.entries()`.
///
/// For an item at merged rank `r` in section `S`:
/// - `start` is the previous `S` item's `end`, or the item's own focus position
/// - `end` is the next `S` item's focus position minus `item_height`, or the
///   focus position of the last merged item when no later `S` item exists
///
/// A section with exactly one item gets `start == end == focus position`
/// and stays in focus at every depth.
pub fn compute_z_ranges(timeline: &Timeline, item_height: f64) -> Vec<ZRange> {
    let entries = timeline.entries();
    let mut ranges = vec![ZRange::new(0.0, 0.0, false); entries.len()];
    let Some(last_focus) = timeline.last_focus_position() else {
        return ranges;
    };

    for section in Section::ALL {
        let ranks: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.key.section == section)
            .map(|(rank, _)| rank)
            .collect();

        let mut previous_end: Option<f64> = None;
        for (i, &rank) in ranks.iter().enumerate() {
            let focus = entries[rank].focus_position.get();
            if ranks.len() == 1 {
                ranges[rank] = ZRange::sole(focus);
                continue;
            }
            let start = previous_end.unwrap_or(focus);
            let next = ranks.get(i + 1);
            let end = match next {
                Some(&next_rank) => entries[next_rank].focus_position.get() - item_height,
                None => last_focus.get().max(start),
            };

            ranges[rank] = ZRange::new(start, end, next.is_none());
            previous_end = Some(end);
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, StackItem};
    use crate::view_state::timeline::{merge_sections, ItemSet};

    fn item(id: &str, section: Section, sort_value: f64) -> StackItem {
        StackItem::new(ItemId::new(id).unwrap(), section, sort_value)
    }

    fn ranges_for(items: Vec<StackItem>, h: f64) -> Vec<(String, ZRange)> {
        let timeline = merge_sections(&ItemSet::from_items(items), h);
        let ranges = compute_z_ranges(&timeline, h);
        timeline
            .entries()
            .iter()
            .zip(ranges)
            .map(|(e, r)| (e.key.to_string(), r))
            .collect()
    }

    #[test]
    fn two_interleaved_sections() {
        let ranges = ranges_for(
            vec![
                item("a0", Section::Outgoing, 0.0),
                item("a1", Section::Outgoing, 1.0),
                item("a2", Section::Outgoing, 2.0),
                item("b0", Section::Incoming, 0.5),
                item("b1", Section::Incoming, 1.5),
                item("b2", Section::Incoming, 2.5),
            ],
            100.0,
        );

        let expect = [
            ("0/a0", 0.0, 100.0, false),
            ("1/b0", 100.0, 200.0, false),
            ("0/a1", 100.0, 300.0, false),
            ("1/b1", 200.0, 400.0, false),
            ("0/a2", 300.0, 500.0, true),
            ("1/b2", 400.0, 500.0, true),
        ];
        for ((key, range), (ek, es, ee, eo)) in ranges.iter().zip(expect) {
            assert_eq!(key, ek);
            assert_eq!(range.start(), es, "start of {key}");
            assert_eq!(range.end(), ee, "end of {key}");
            assert_eq!(range.is_open_ended(), eo, "open-endedness of {key}");
        }
    }

    #[test]
    fn single_item_section_is_degenerate() {
        let ranges = ranges_for(
            vec![
                item("only", Section::Incoming, 1.0),
                item("a", Section::Outgoing, 0.0),
                item("b", Section::Outgoing, 2.0),
            ],
            100.0,
        );
        let (_, only) = ranges.iter().find(|(k, _)| k == "1/only").unwrap();
        assert!(only.is_degenerate());
        assert_eq!(only.start(), 100.0);
        assert!(only.is_open_ended());
        assert!(only.is_sole());
    }

    #[test]
    fn consecutive_same_section_items_touch() {
        let ranges = ranges_for(
            vec![
                item("a", Section::Outgoing, 0.0),
                item("b", Section::Outgoing, 1.0),
                item("c", Section::Outgoing, 2.0),
            ],
            50.0,
        );
        assert_eq!(ranges[0].1.end(), ranges[1].1.start());
        assert_eq!(ranges[1].1.end(), ranges[2].1.start());
        assert!(!ranges[0].1.overlaps(&ranges[1].1));
        assert!(!ranges[1].1.overlaps(&ranges[2].1));
    }

    #[test]
    fn middle_items_span_at_least_one_item_height() {
        let ranges = ranges_for(
            (0..6)
                .map(|i| item(&format!("m{i}"), Section::Outgoing, i as f64))
                .collect(),
            40.0,
        );
        for (_, range) in &ranges[1..ranges.len() - 1] {
            assert!(range.width() >= 40.0);
        }
    }

    #[test]
    fn empty_timeline_has_no_ranges() {
        let timeline = merge_sections(&ItemSet::new(), 100.0);
        assert!(compute_z_ranges(&timeline, 100.0).is_empty());
    }

    mod z_range {
        use super::*;

        #[test]
        fn contains_is_half_open() {
            let range = ZRange::new(100.0, 200.0, false);
            assert!(range.contains(DepthPosition::new(100.0)));
            assert!(range.contains(DepthPosition::new(199.9)));
            assert!(!range.contains(DepthPosition::new(200.0)));
            assert!(!range.contains(DepthPosition::new(99.9)));
        }

        #[test]
        fn open_ended_contains_everything_past_start() {
            let range = ZRange::new(100.0, 200.0, true);
            assert!(range.contains(DepthPosition::new(10_000.0)));
            assert!(!range.contains(DepthPosition::new(50.0)));
        }

        #[test]
        fn degenerate_open_ended_contains_its_point() {
            let range = ZRange::new(300.0, 300.0, true);
            assert!(range.contains(DepthPosition::new(300.0)));
            assert_eq!(range.signed_distance(DepthPosition::new(300.0)), 0.0);
        }

        #[test]
        fn sole_range_contains_every_depth() {
            let range = ZRange::sole(300.0);
            for depth in [-50.0, 0.0, 150.0, 300.0, 900.0] {
                assert!(range.contains(DepthPosition::new(depth)), "depth {depth}");
                assert_eq!(range.signed_distance(DepthPosition::new(depth)), 0.0);
            }
            assert!(!range.contains(DepthPosition::new(f64::NAN)));
        }

        #[test]
        fn signed_distance_sign_convention() {
            let range = ZRange::new(100.0, 200.0, false);
            assert_eq!(range.signed_distance(DepthPosition::new(150.0)), 0.0);
            assert_eq!(range.signed_distance(DepthPosition::new(250.0)), 50.0);
            assert_eq!(range.signed_distance(DepthPosition::new(40.0)), -60.0);
        }

        #[test]
        fn overlap_detection() {
            let a = ZRange::new(0.0, 100.0, false);
            let b = ZRange::new(100.0, 200.0, false);
            let c = ZRange::new(50.0, 150.0, false);
            assert!(!a.overlaps(&b));
            assert!(a.overlaps(&c));
            assert!(ZRange::new(150.0, 150.0, true).overlaps(&b));
        }
    }
}
