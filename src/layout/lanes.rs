use std::collections::HashSet;

/// Occupied lanes per gap between adjacent baseline positions; gap `i`
/// sits between positions `i` and `i + 1`. Lanes above the baseline are
/// positive, lanes below are negative, and the registry lives for exactly
/// one layout computation.
#[derive(Debug)]
pub(super) struct LaneRegistry {
    gaps: Vec<HashSet<i32>>,
}

impl LaneRegistry {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            gaps: vec![HashSet::new(); node_count.saturating_sub(1)],
        }
    }

    /// Nearest free lane in direction `dir`, claimed across every gap the
    /// span covers. A lane is free only if no gap in the span has it. Zero
    /// width spans take the innermost lane without claiming anything.
    pub(super) fn assign(&mut self, source: usize, target: usize, dir: i32) -> i32 {
        let (lo, hi) = if source <= target {
            (source, target)
        } else {
            (target, source)
        };
        let mut level = dir;
        loop {
            if self.gaps[lo..hi].iter().all(|gap| !gap.contains(&level)) {
                for gap in &mut self.gaps[lo..hi] {
                    gap.insert(level);
                }
                return level;
            }
            level += dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_spans_move_outward() {
        let mut lanes = LaneRegistry::new(3);
        assert_eq!(lanes.assign(0, 2, 1), 1);
        assert_eq!(lanes.assign(0, 2, 1), 2);
        assert_eq!(lanes.assign(0, 2, 1), 3);
    }

    #[test]
    fn disjoint_spans_share_a_lane() {
        let mut lanes = LaneRegistry::new(3);
        assert_eq!(lanes.assign(0, 1, -1), -1);
        assert_eq!(lanes.assign(1, 2, -1), -1);
    }

    #[test]
    fn nested_span_is_pushed_past_the_inner_one() {
        let mut lanes = LaneRegistry::new(4);
        assert_eq!(lanes.assign(1, 2, 1), 1);
        assert_eq!(lanes.assign(0, 3, 1), 2);
    }

    #[test]
    fn span_endpoints_are_normalized() {
        let mut lanes = LaneRegistry::new(3);
        assert_eq!(lanes.assign(2, 0, 1), 1);
        assert_eq!(lanes.assign(0, 2, 1), 2);
    }

    #[test]
    fn zero_width_span_never_escalates_or_blocks() {
        let mut lanes = LaneRegistry::new(2);
        assert_eq!(lanes.assign(1, 1, 1), 1);
        assert_eq!(lanes.assign(1, 1, 1), 1);
        assert_eq!(lanes.assign(0, 1, 1), 1);
    }

    #[test]
    fn directions_keep_separate_lane_sets() {
        let mut lanes = LaneRegistry::new(2);
        assert_eq!(lanes.assign(0, 1, 1), 1);
        assert_eq!(lanes.assign(0, 1, -1), -1);
        assert_eq!(lanes.assign(0, 1, -1), -2);
    }
}
