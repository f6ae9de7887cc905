//! Quaternion and frame math for 3D motion models.
//!
//! Quaternions are Hamilton convention, scalar-first `[w, x, y, z]`, and a
//! full frame is the 7-vector `[px, py, pz, qw, qx, qy, qz]`. Everything here
//! is plain function + Jacobian pairs so motion models can assemble exact
//! transition blocks.

use nalgebra::{Matrix4, Matrix4x3, Vector3, Vector4};

/// Number of slots in a full frame (position + quaternion).
pub const FRAME_SIZE: usize = 7;

/// Squared-angle threshold below which the rotation-vector exponential
/// switches to its series expansion.
const SMALL_ANGLE_SQ: f64 = 1e-10;

/// The origin frame: zero position, identity orientation.
#[inline]
pub fn origin_frame() -> [f64; FRAME_SIZE] {
    [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]
}

/// The identity quaternion `[1, 0, 0, 0]`.
#[inline]
pub fn quat_identity() -> Vector4<f64> {
    Vector4::new(1.0, 0.0, 0.0, 0.0)
}

/// Hamilton product `q ⊗ r`.
///
/// ```text
/// (q ⊗ r).w = qw·rw − qv·rv
/// (q ⊗ r).v = qw·rv + rw·qv + qv × rv
/// ```
#[inline]
pub fn quat_product(q: &Vector4<f64>, r: &Vector4<f64>) -> Vector4<f64> {
    Vector4::new(
        q[0] * r[0] - q[1] * r[1] - q[2] * r[2] - q[3] * r[3],
        q[0] * r[1] + q[1] * r[0] + q[2] * r[3] - q[3] * r[2],
        q[0] * r[2] - q[1] * r[3] + q[2] * r[0] + q[3] * r[1],
        q[0] * r[3] + q[1] * r[2] - q[2] * r[1] + q[3] * r[0],
    )
}

/// Left product matrix `L(q)` such that `q ⊗ r = L(q)·r`.
///
/// This is the Jacobian of the product with respect to the right factor:
/// `∂(q ⊗ r)/∂r = L(q)`.
#[inline]
pub fn quat_product_left(q: &Vector4<f64>) -> Matrix4<f64> {
    let (w, x, y, z) = (q[0], q[1], q[2], q[3]);
    Matrix4::new(
        w, -x, -y, -z, //
        x, w, -z, y, //
        y, z, w, -x, //
        z, -y, x, w,
    )
}

/// Right product matrix `R(r)` such that `q ⊗ r = R(r)·q`.
///
/// This is the Jacobian of the product with respect to the left factor:
/// `∂(q ⊗ r)/∂q = R(r)`.
#[inline]
pub fn quat_product_right(r: &Vector4<f64>) -> Matrix4<f64> {
    let (w, x, y, z) = (r[0], r[1], r[2], r[3]);
    Matrix4::new(
        w, -x, -y, -z, //
        x, w, z, -y, //
        y, -z, w, x, //
        z, y, -x, w,
    )
}

/// Rotation-vector exponential: the unit quaternion rotating by `v`.
///
/// ```text
/// θ = |v|
/// q = [cos(θ/2), sin(θ/2)·v/θ]
/// ```
///
/// Falls back to the second-order series near θ = 0.
pub fn rotation_vector_to_quat(v: &Vector3<f64>) -> Vector4<f64> {
    let theta_sq = v.norm_squared();
    if theta_sq < SMALL_ANGLE_SQ {
        // cos(θ/2) ≈ 1 − θ²/8, sin(θ/2)/θ ≈ 1/2 − θ²/48
        let w = 1.0 - theta_sq / 8.0;
        let k = 0.5 - theta_sq / 48.0;
        Vector4::new(w, k * v[0], k * v[1], k * v[2])
    } else {
        let theta = theta_sq.sqrt();
        let half = 0.5 * theta;
        let k = half.sin() / theta;
        Vector4::new(half.cos(), k * v[0], k * v[1], k * v[2])
    }
}

/// Jacobian of [`rotation_vector_to_quat`] with respect to `v` (4×3).
///
/// ```text
/// ∂qw/∂v = −(sin(θ/2)/2)·uᵀ                   with u = v/θ
/// ∂qv/∂v = (sin(θ/2)/θ)·I + (cos(θ/2)/2 − sin(θ/2)/θ)·u·uᵀ
/// ```
///
/// Near θ = 0 this reduces to `∂qw/∂v = −vᵀ/4`, `∂qv/∂v = I/2`.
pub fn rotation_vector_to_quat_jacobian(v: &Vector3<f64>) -> Matrix4x3<f64> {
    let theta_sq = v.norm_squared();
    let mut jac = Matrix4x3::zeros();
    if theta_sq < SMALL_ANGLE_SQ {
        for i in 0..3 {
            jac[(0, i)] = -v[i] / 4.0;
            jac[(1 + i, i)] = 0.5;
        }
        return jac;
    }

    let theta = theta_sq.sqrt();
    let half = 0.5 * theta;
    let (sin_h, cos_h) = (half.sin(), half.cos());
    let u = v / theta;
    let k = sin_h / theta;
    let m = 0.5 * cos_h - k;
    for i in 0..3 {
        jac[(0, i)] = -0.5 * sin_h * u[i];
        for j in 0..3 {
            jac[(1 + i, j)] = m * u[i] * u[j];
        }
        jac[(1 + i, i)] += k;
    }
    jac
}
