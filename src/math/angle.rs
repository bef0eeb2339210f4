/// Wraps an angle in degrees into [0, 360).
///
/// A single conditional subtraction is not enough here: a long frame (or a
/// high time scale) can advance an angle by more than a full turn in one
/// update, so we always reduce modulo 360.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
