//! Sensors mounted on robots.

use crate::core::SlotRange;

use super::{RobotId, SensorId};

/// Slots an estimated sensor pose occupies (position + quaternion).
pub const SENSOR_POSE_SIZE: usize = 7;

/// How a sensor's mounting pose is treated at creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorMount {
    /// Calibrate the pose online: the sensor claims state slots.
    Estimated,
    /// Use a fixed external calibration frame; no slots claimed.
    Fixed([f64; SENSOR_POSE_SIZE]),
}

/// A sensor's mounting pose after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorPose {
    /// Pose lives in the shared state at this range.
    Estimated(SlotRange),
    /// Pose is externally fixed to this frame.
    Fixed([f64; SENSOR_POSE_SIZE]),
}

/// A sensor owned by exactly one robot.
///
/// The back-reference to the owning robot is a plain id; ownership of the
/// `Sensor` value itself lies with the [`Robot`](super::Robot).
#[derive(Debug, Clone)]
pub struct Sensor {
    id: SensorId,
    name: String,
    robot: RobotId,
    pose: SensorPose,
}

impl Sensor {
    pub(crate) fn new(id: SensorId, name: &str, robot: RobotId, pose: SensorPose) -> Self {
        Self {
            id,
            name: name.to_string(),
            robot,
            pose,
        }
    }

    /// Sensor id, unique across all robots.
    #[inline]
    pub fn id(&self) -> SensorId {
        self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the owning robot.
    #[inline]
    pub fn robot(&self) -> RobotId {
        self.robot
    }

    /// The mounting pose.
    #[inline]
    pub fn pose(&self) -> &SensorPose {
        &self.pose
    }

    /// True when the pose is estimated in the shared state.
    #[inline]
    pub fn is_in_map(&self) -> bool {
        matches!(self.pose, SensorPose::Estimated(_))
    }

    /// Slot range of an estimated pose; `None` for a fixed mount.
    #[inline]
    pub fn range(&self) -> Option<SlotRange> {
        match self.pose {
            SensorPose::Estimated(range) => Some(range),
            SensorPose::Fixed(_) => None,
        }
    }

    /// Slots this sensor occupies in the shared state.
    #[inline]
    pub fn state_size(&self) -> usize {
        match self.pose {
            SensorPose::Estimated(_) => SENSOR_POSE_SIZE,
            SensorPose::Fixed(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame;

    #[test]
    fn test_estimated_sensor_claims_slots() {
        let s = Sensor::new(
            SensorId(0),
            "front-cam",
            RobotId(0),
            SensorPose::Estimated(SlotRange::new(13, SENSOR_POSE_SIZE)),
        );
        assert!(s.is_in_map());
        assert_eq!(s.state_size(), 7);
        assert_eq!(s.range().unwrap().start(), 13);
    }

    #[test]
    fn test_fixed_sensor_claims_nothing() {
        let s = Sensor::new(
            SensorId(1),
            "rear-cam",
            RobotId(0),
            SensorPose::Fixed(frame::origin_frame()),
        );
        assert!(!s.is_in_map());
        assert_eq!(s.state_size(), 0);
        assert!(s.range().is_none());
    }
}
