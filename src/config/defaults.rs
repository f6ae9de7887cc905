//! Default value functions for serde deserialization.

pub fn max_size() -> usize {
    300
}

pub fn linear_impulse_std() -> f64 {
    0.5
}

pub fn angular_impulse_std() -> f64 {
    0.35
}

pub fn default_dt() -> f64 {
    0.1
}

pub fn initial_position_std() -> f64 {
    0.0
}

pub fn initial_velocity_std() -> f64 {
    0.1
}
