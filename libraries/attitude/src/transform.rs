use nalgebra as na;

/// Convert roll, pitch and yaw (radians) into the forward axis and up vector
/// of the posed body.
///
/// The convention is fixed: zero attitude looks down +X with up along -Z,
/// positive yaw turns the nose towards -Y and positive pitch raises it
/// towards +Z. Both vectors come out unit length; they are not
/// re-orthogonalized.
pub fn transform(roll: f64, pitch: f64, yaw: f64) -> (na::Vector3<f64>, na::Vector3<f64>) {
    let (sin_roll, cos_roll) = roll.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let (sin_yaw, cos_yaw) = yaw.sin_cos();

    let axis = na::Vector3::new(cos_pitch * cos_yaw, -cos_pitch * sin_yaw, sin_pitch);
    let up = na::Vector3::new(
        sin_roll * sin_yaw + cos_roll * sin_pitch * cos_yaw,
        sin_roll * cos_yaw - cos_roll * sin_pitch * sin_yaw,
        -cos_roll * cos_pitch,
    );

    (axis, up)
}
