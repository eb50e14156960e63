//! Bilinear resampling of 2-D float grids
//!
//! Used to map the model-resolution probability map back to the original
//! image resolution. Interpolation runs in the float domain before byte
//! quantization so mask edges keep their fidelity.

/// Resize a row-major float grid with bilinear interpolation.
///
/// Identical source and destination dimensions return the source buffer
/// unchanged; callers must not rely on distinct-identity semantics.
/// Neighbor lookups are edge-clamped, there is no extrapolation past the
/// border.
#[must_use]
pub fn resize_bilinear(
    src: Vec<f32>,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
) -> Vec<f32> {
    debug_assert_eq!(src.len(), src_width * src_height);
    if src_width == dst_width && src_height == dst_height {
        return src;
    }

    let x_ratio = src_width as f32 / dst_width as f32;
    let y_ratio = src_height as f32 / dst_height as f32;

    let mut dst = Vec::with_capacity(dst_width * dst_height);
    for j in 0..dst_height {
        let sy = j as f32 * y_ratio;
        let y0 = sy as usize;
        let y1 = (y0 + 1).min(src_height - 1);
        let wy = sy - y0 as f32;

        for i in 0..dst_width {
            let sx = i as f32 * x_ratio;
            let x0 = sx as usize;
            let x1 = (x0 + 1).min(src_width - 1);
            let wx = sx - x0 as f32;

            let top = src[y0 * src_width + x0] * (1.0 - wx) + src[y0 * src_width + x1] * wx;
            let bottom = src[y1 * src_width + x0] * (1.0 - wx) + src[y1 * src_width + x1] * wx;
            dst.push(top * (1.0 - wy) + bottom * wy);
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_size_is_identity() {
        let src = vec![0.1, 0.2, 0.3, 0.4];
        let dst = resize_bilinear(src.clone(), 2, 2, 2, 2);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_constant_grid_stays_constant() {
        let src = vec![0.5; 4];
        let dst = resize_bilinear(src, 2, 2, 5, 3);
        assert_eq!(dst.len(), 15);
        for v in dst {
            assert!((v - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_horizontal_gradient_interpolation() {
        // 2x1 grid upsampled to 4x1: sx = i * 2/4 = {0, 0.5, 1.0, 1.5}
        let dst = resize_bilinear(vec![0.0, 1.0], 2, 1, 4, 1);
        let expected = [0.0, 0.5, 1.0, 1.0]; // last sample edge-clamped
        for (got, want) in dst.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-6, "{got} != {want}");
        }
    }

    #[test]
    fn test_downsample_picks_interpolated_samples() {
        // 4x1 -> 2x1: sx = {0, 2.0} so values land exactly on sources
        let dst = resize_bilinear(vec![0.0, 0.25, 0.5, 0.75], 4, 1, 2, 1);
        assert!((dst[0] - 0.0).abs() < 1e-6);
        assert!((dst[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_upsample_2x2_to_4x4_corners() {
        let dst = resize_bilinear(vec![0.0, 1.0, 1.0, 0.0], 2, 2, 4, 4);
        assert_eq!(dst.len(), 16);
        // Top-left corner maps exactly onto the first source sample
        assert!((dst[0] - 0.0).abs() < 1e-6);
        // Center row blends horizontally between 0 and 1
        assert!((dst[4 + 1] - 0.5).abs() < 1e-6);
    }
}
