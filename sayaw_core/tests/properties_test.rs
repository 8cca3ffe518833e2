use glam::Vec3;
use proptest::prelude::*;
use sayaw_core::config::ScoringConfig;
use sayaw_core::gameplay::performance::{grade_for, Grade, PerformanceTracker};
use sayaw_core::gameplay::resolver::{score_wall, Registration, WallResolver};
use sayaw_core::wall::{HitReport, GOOD_DISTANCE};
use wall_schema::{BodyPart, WallId};

fn report(part: BodyPart, distance: f32, kind: BodyPart) -> HitReport {
    HitReport {
        wall: WallId(1),
        body_part: part,
        position: Vec3::ZERO,
        hit_point: kind.hit_point_marker(),
        distance,
        hit_point_type: kind,
    }
}

fn any_part() -> impl Strategy<Value = BodyPart> {
    prop_oneof![Just(BodyPart::LeftArm), Just(BodyPart::RightArm)]
}

proptest! {
    #[test]
    fn wall_resolves_exactly_once(
        strikes in prop::collection::vec((any_part(), 0.0f32..1.5, any_part()), 1..20)
    ) {
        let mut resolver = WallResolver::new(ScoringConfig::default());
        let mut resolutions = 0;
        for (part, distance, kind) in &strikes {
            if let Registration::Resolved { .. } = resolver.register(report(*part, *distance, *kind)) {
                resolutions += 1;
            }
        }

        let covered = strikes.iter().any(|s| s.0 == BodyPart::LeftArm)
            && strikes.iter().any(|s| s.0 == BodyPart::RightArm);
        prop_assert_eq!(resolutions, usize::from(covered));
        prop_assert_eq!(resolver.is_processed(WallId(1)), covered);
    }

    #[test]
    fn any_far_part_zeroes_the_wall(
        near in 0.0f32..=GOOD_DISTANCE,
        far in 0.5001f32..3.0,
        left_kind in any_part(),
        right_kind in any_part(),
    ) {
        let reports = [
            report(BodyPart::LeftArm, near, left_kind),
            report(BodyPart::RightArm, far, right_kind),
        ];
        let resolution = score_wall(WallId(1), reports.iter(), &ScoringConfig::default());
        prop_assert_eq!(resolution.score, 0);
        prop_assert!(!resolution.step_correct);
    }

    #[test]
    fn cohesion_iff_same_kind_and_positive_score(
        left in 0.0f32..1.0,
        right in 0.0f32..1.0,
        left_kind in any_part(),
        right_kind in any_part(),
    ) {
        let reports = [
            report(BodyPart::LeftArm, left, left_kind),
            report(BodyPart::RightArm, right, right_kind),
        ];
        let resolution = score_wall(WallId(1), reports.iter(), &ScoringConfig::default());
        let expected = left_kind == right_kind && resolution.base_score > 0;
        prop_assert_eq!(resolution.cohesion_awarded, expected);
        prop_assert_eq!(resolution.score - resolution.base_score, if expected { 20 } else { 0 });
    }

    #[test]
    fn accuracy_is_mean_of_resolved_walls(
        distances in prop::collection::vec(0.0f32..1.0, 1..12),
        misses in 0u32..5,
    ) {
        let config = ScoringConfig::default();
        let mut tracker = PerformanceTracker::new();
        let mut expected = 0.0f32;
        for d in &distances {
            let reports = [
                report(BodyPart::LeftArm, *d, BodyPart::LeftArm),
                report(BodyPart::RightArm, *d, BodyPart::LeftArm),
            ];
            let resolution = score_wall(WallId(1), reports.iter(), &config);
            expected += resolution.quality;
            tracker.record_seen();
            tracker.record_resolution(&resolution);
        }
        for i in 0..misses {
            let mut resolver = WallResolver::new(config.clone());
            let missed = resolver.register_missed(WallId(100 + u64::from(i))).unwrap();
            tracker.record_missed(&missed);
        }

        expected /= distances.len() as f32;
        prop_assert!((tracker.accuracy() - expected).abs() < 1e-4);
    }
}

#[test]
fn grade_examples() {
    assert_eq!(grade_for(1.0, 10, 10), Grade::SPlus);
    // 0.6 * 0.55 + 0.4 * 0.5 = 0.53
    assert_eq!(grade_for(0.55, 5, 10), Grade::D);
    assert_eq!(grade_for(0.0, 0, 0), Grade::F);
    assert_eq!(grade_for(0.85, 10, 10), Grade::S);
}
