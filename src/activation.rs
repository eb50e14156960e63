//! Element-wise activation and byte scaling for probability maps
//!
//! All operations are in place and carry no ordering dependency between
//! elements.

/// Replace every logit with `1 / (1 + exp(-x))`.
pub fn sigmoid_in_place(values: &mut [f32]) {
    for v in values {
        let x = *v;
        *v = 1.0 / (1.0 + (-x).exp());
    }
}

/// Clip every element into [0, 1]. Idempotent.
pub fn clamp01_in_place(values: &mut [f32]) {
    for v in values {
        *v = v.clamp(0.0, 1.0);
    }
}

/// Map probabilities in [0, 1] to bytes via `round(v * 255)`, clamped to
/// [0, 255]. Uses the add-0.5-then-truncate idiom.
#[must_use]
pub fn to_bytes(values: &[f32]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_of_zero_is_half() {
        let mut values = vec![0.0f32];
        sigmoid_in_place(&mut values);
        assert!((values[0] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sigmoid_stays_in_unit_interval() {
        // Moderate logits land strictly inside (0, 1)
        let mut values = vec![-16.0, -1.0, 0.0, 1.0, 16.0];
        sigmoid_in_place(&mut values);
        for v in values {
            assert!(v > 0.0 && v < 1.0, "sigmoid out of (0,1): {v}");
        }

        // Extreme logits saturate to the f32 endpoints but never escape [0, 1]
        let mut extremes = vec![-50.0, 50.0, f32::MIN, f32::MAX];
        sigmoid_in_place(&mut extremes);
        for v in &extremes {
            assert!((0.0..=1.0).contains(v), "sigmoid out of [0,1]: {v}");
        }
        assert!(extremes[2].abs() < f32::EPSILON);
        assert!((extremes[3] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clamp01_idempotent() {
        let mut once = vec![-0.5, 0.0, 0.25, 1.0, 1.5];
        clamp01_in_place(&mut once);
        let mut twice = once.clone();
        clamp01_in_place(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(once, vec![0.0, 0.0, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn test_to_bytes_rounding_and_clamping() {
        let bytes = to_bytes(&[0.0, 0.5, 1.0, -0.2, 1.2]);
        assert_eq!(bytes, vec![0, 128, 255, 0, 255]);
    }
}
