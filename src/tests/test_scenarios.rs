#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::annotations::StepFlags;
    use crate::corrector::Corrector;
    use crate::parameters::path_correction::Parameters;
    use crate::path_traits::Position;
    use crate::tests::test_utils::{one_second, quarter_second_path, three_sample_path};
    #[cfg(feature = "allow_filesystem")]
    use crate::{
        segments::{closest_approaches, detect_segments},
        tests::test_utils::load_two_gates,
    };

    #[test]
    fn test_unperturbed_passthrough() {
        let corrector = Corrector::new(&one_second(0.0, 100.0, 1)).expect("valid parameters");
        let positions = corrector.correct(&three_sample_path()).expect("correction").positions();

        let expected = [Position::new(1.0, 0.0, 0.0), Position::new(2.0, 0.0, 0.0)];
        assert_eq!(positions.len(), expected.len());
        for (actual, expected) in positions.iter().zip(&expected) {
            assert!((actual - expected).norm() < 1e-12, "{} != {}", actual, expected);
        }
    }

    #[test]
    fn test_oscillating_gate_shifts_up_down_axis() {
        let path = quarter_second_path();
        let parameters = Parameters {
            gate_frequency: 1.0,
            ..one_second(0.02, 100.0, 1)
        };
        let corrected = Corrector::new(&parameters)
            .expect("valid parameters")
            .correct(&path)
            .expect("correction");
        assert_eq!(corrected.len(), 2);

        // Step i starts at t_i and emits sample i + 1 shifted by the gate displacement at t_i.
        for (i, step) in corrected.steps.iter().enumerate() {
            let recorded = path.tooltip(i + 1);
            let shift = 0.02 * (2.0 * PI * 1.0 * path.time(i) / 1.0).sin();
            assert!((step.position.y - (recorded.y + shift)).abs() < 1e-9, "step {}: {}", i, step.position);
            assert!((step.position.x - recorded.x).abs() < 1e-9);
            assert!((step.position.z - recorded.z).abs() < 1e-9);
        }
        // The quarter period step moves by the full amplitude.
        assert!((corrected.steps[1].position.y - 0.02).abs() < 1e-9);
        assert!(corrected.steps[1].flags.contains(StepFlags::GATE_CHASE));
    }

    #[test]
    fn test_acceleration_limit_holds_back_gate_chase() {
        let path = quarter_second_path();
        let parameters = Parameters {
            gate_frequency: 1.0,
            ..one_second(0.02, 0.1, 1)
        };
        let corrected = Corrector::new(&parameters)
            .expect("valid parameters")
            .correct(&path)
            .expect("correction");

        let shift = corrected.steps[1].position.y - path.tooltip(2).y;
        assert!(shift > 0.0, "shift {}", shift);
        assert!(shift < 0.02, "shift {}", shift);
        assert!(corrected.steps[1].flags.contains(StepFlags::ACCEL_LIMITED));
    }

    #[test]
    fn test_oscillating_gate_with_tight_acceleration_limit() {
        let path = three_sample_path();
        let still = Corrector::new(&one_second(0.0, 100.0, 1)).expect("valid parameters");
        let limited = Corrector::new(&one_second(0.02, 0.01, 1)).expect("valid parameters");

        let unperturbed = still.correct(&path).expect("correction").positions();
        let corrected = limited.correct(&path).expect("correction");

        for (step, free) in corrected.steps.iter().zip(&unperturbed) {
            assert!(step.acceleration.norm() <= 0.01 + 1e-12);
            assert!((step.position.y - free.y).abs() <= 0.02);
            assert!(step.flags.contains(StepFlags::ACCEL_LIMITED));
        }
    }

    #[cfg(feature = "allow_filesystem")]
    #[test]
    fn test_sample_file_segments() {
        let mut path = load_two_gates();
        path.normalize_time().expect("increasing time");
        assert_eq!(path.len(), 21);

        let segments = detect_segments(&path).expect("segments");
        assert_eq!(segments.ends(), &[5, 21]);

        let approaches = closest_approaches(&path, &segments);
        assert!(approaches[0] < 1e-9);
        // Tooltip ends at x = 0.2, the second gate is at x = 0.15.
        assert!((approaches[1] - 0.05).abs() < 1e-9);
    }

    #[cfg(feature = "allow_filesystem")]
    #[test]
    fn test_sample_file_correction() {
        let mut path = load_two_gates();
        path.normalize_time().expect("increasing time");
        let parameters = Parameters {
            layout: *path.layout(),
            ..Parameters::default()
        };
        let corrected = Corrector::new(&parameters)
            .expect("valid parameters")
            .correct(&path)
            .expect("correction");
        assert_eq!(corrected.len(), path.len() - 1);

        let segments: Vec<usize> = corrected.steps.iter().map(|step| step.segment).collect();
        assert_eq!(segments.iter().filter(|&&s| s == 0).count(), 6);
        assert!(corrected.steps[6].flags.contains(StepFlags::SEGMENT_START));
        assert!(corrected.steps[6].flags.contains(StepFlags::FINAL_SEGMENT));
        assert!(corrected.peak_acceleration() <= parameters.max_acceleration + 1e-9);

        let full = path.with_corrected_tooltips(&corrected.positions()).expect("full record");
        assert_eq!(full.len(), path.len() - 1);
        for row in 0..full.len() {
            assert_eq!(full.time(row), path.time(row));
            assert_eq!(full.gate(row, 0), path.gate(row, 0));
            assert_eq!(full.gate(row, 1), path.gate(row, 1));
            assert_eq!(full.tooltip(row), corrected.steps[row].position);
        }
    }
}
