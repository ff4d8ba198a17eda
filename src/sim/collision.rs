//! Capture detection
//!
//! A linear scan over the live targets. Captured targets are marked first and
//! removed afterwards, so removal never skips or revisits an entry.

use super::state::{Collector, Target};

/// Result of one capture scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureReport {
    /// Captured targets, in spawn order
    pub removed: Vec<Target>,
    /// Points earned this scan (one per captured target)
    pub score_delta: u64,
}

impl CaptureReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Remove every target strictly inside the collector's capture radius
pub fn capture_targets(collector: &Collector, targets: &mut Vec<Target>) -> CaptureReport {
    let marked: Vec<bool> = targets.iter().map(|t| collector.captures(t.pos)).collect();
    if !marked.contains(&true) {
        return CaptureReport::default();
    }

    let mut removed = Vec::new();
    let mut flags = marked.into_iter();
    targets.retain(|t| {
        let hit = flags.next().unwrap_or(false);
        if hit {
            removed.push(*t);
        }
        !hit
    });

    CaptureReport {
        score_delta: removed.len() as u64,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn target(id: u32, x: f32, z: f32) -> Target {
        Target {
            id,
            pos: Vec3::new(x, 0.0, z),
        }
    }

    #[test]
    fn test_capture_at_center() {
        let collector = Collector::new(Vec3::ZERO, 0.2);
        let mut targets = vec![target(1, 0.0, 0.0)];

        let report = capture_targets(&collector, &mut targets);
        assert_eq!(report.score_delta, 1);
        assert_eq!(report.removed[0].id, 1);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_no_capture_on_rim() {
        let collector = Collector::new(Vec3::ZERO, 0.2);
        let mut targets = vec![target(1, 0.2, 0.0), target(2, 0.0, -0.2)];

        let report = capture_targets(&collector, &mut targets);
        assert!(report.is_empty());
        assert_eq!(report.score_delta, 0);
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_multi_capture_keeps_order() {
        let collector = Collector::new(Vec3::new(1.0, 0.0, 1.0), 0.2);
        let mut targets = vec![
            target(1, 1.05, 1.0),
            target(2, 3.0, 3.0),
            target(3, 1.0, 0.9),
            target(4, -2.0, 0.0),
        ];

        let report = capture_targets(&collector, &mut targets);
        assert_eq!(report.score_delta, 2);
        assert_eq!(
            report.removed.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(targets.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_adjacent_captures_not_skipped() {
        // Consecutive hits are where in-place removal during iteration goes wrong
        let collector = Collector::new(Vec3::ZERO, 0.2);
        let mut targets: Vec<Target> = (0..5).map(|id| target(id, 0.01 * id as f32, 0.0)).collect();

        let report = capture_targets(&collector, &mut targets);
        assert_eq!(report.score_delta, 5);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_empty_scan() {
        let collector = Collector::new(Vec3::ZERO, 0.2);
        let mut targets = Vec::new();
        assert_eq!(capture_targets(&collector, &mut targets), CaptureReport::default());
    }
}
