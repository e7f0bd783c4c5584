// Copyright @yucwang 2023

use super::constants::{ INV_FOUR_PI, INV_PI, INV_TWO_PI, PI, Float, Vector2f, Vector3f };

pub fn sample_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1. - z * z).max(0.0).sqrt();
    let phi: Float = 2. * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

pub fn sample_uniform_sphere(u: &Vector2f) -> Vector3f {
    let z: Float = 1. - 2. * u.x;
    let r: Float = (1. - z * z).max(0.0).sqrt();
    let phi: Float = 2. * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}

pub fn sample_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r:   Float;

    if r1 == 0. && r2 == 0. {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let p = sample_uniform_disk_concentric(u);
    let z = (1. - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    cos_theta * INV_PI
}

/// Phong lobe around `+z`: density proportional to `cos^exponent`.
pub fn sample_phong_lobe(u: &Vector2f, exponent: Float) -> Vector3f {
    let cos_theta = u.x.powf(1.0 / (exponent + 1.0));
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();

    Vector3f::new(cos_phi * sin_theta, sin_phi * sin_theta, cos_theta)
}

pub fn sample_phong_lobe_pdf(cos_alpha: Float, exponent: Float) -> Float {
    if cos_alpha <= 0.0 {
        return 0.0;
    }
    (exponent + 1.0) * INV_TWO_PI * cos_alpha.powf(exponent)
}

/// Uniform point on the unit square mapped onto `[-1, 1]^2`.
pub fn square_to_centered_square(u: &Vector2f) -> Vector2f {
    Vector2f::new(2.0 * u.x - 1.0, 2.0 * u.y - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn stratified_mean<F: Fn(&Vector2f) -> Float>(n: usize, f: F) -> Float {
        let mut sum = 0.0f64;
        for i in 0..n {
            for j in 0..n {
                let u = Vector2f::new((i as Float + 0.5) / n as Float,
                                      (j as Float + 0.5) / n as Float);
                sum += f(&u) as f64;
            }
        }
        (sum / (n * n) as f64) as Float
    }

    #[test]
    fn test_cosine_hemisphere_is_normalized() {
        for i in 0..16 {
            for j in 0..16 {
                let u = Vector2f::new(i as Float / 16.0, j as Float / 16.0);
                let w = sample_cosine_hemisphere(&u);
                assert_abs_diff_eq!(w.norm(), 1.0, epsilon = 1e-4);
                assert!(w.z >= 0.0);
            }
        }
    }

    #[test]
    fn test_cosine_pdf_integrates_to_one() {
        // Uniform hemisphere samples: E[pdf / uniform_pdf] = 1.
        let mean = stratified_mean(256, |u| {
            let w = sample_uniform_hemisphere(u);
            sample_cosine_hemisphere_pdf(w.z) / sample_uniform_hemisphere_pdf()
        });
        assert_abs_diff_eq!(mean, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_phong_lobe_pdf_integrates_to_one() {
        for exponent in [1.0, 20.0, 100.0].iter() {
            let mean = stratified_mean(400, |u| {
                let w = sample_uniform_hemisphere(u);
                sample_phong_lobe_pdf(w.z, *exponent) / sample_uniform_hemisphere_pdf()
            });
            assert_abs_diff_eq!(mean, 1.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_phong_lobe_points_up() {
        let w = sample_phong_lobe(&Vector2f::new(0.999, 0.3), 50.0);
        assert!(w.z > 0.99);
        assert_abs_diff_eq!(w.norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_uniform_sphere_covers_both_hemispheres() {
        assert!(sample_uniform_sphere(&Vector2f::new(0.1, 0.2)).z > 0.0);
        assert!(sample_uniform_sphere(&Vector2f::new(0.9, 0.2)).z < 0.0);
        assert_abs_diff_eq!(sample_uniform_sphere_pdf() * 4.0 * PI, 1.0, epsilon = 1e-6);
    }
}
