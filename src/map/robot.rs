//! Robots and their sensor ownership.

use crate::core::SlotRange;
use crate::motion::MotionModel;

use super::{RobotId, Sensor, SensorId};

/// A robot in the map.
///
/// Owns its slot range, its motion model, and its sensors. The leading
/// `pose_size` slots of the range form the robot's pose frame; the rest is
/// model-specific (velocities for the constant-velocity model).
#[derive(Debug)]
pub struct Robot {
    id: RobotId,
    name: String,
    range: SlotRange,
    model: Box<dyn MotionModel>,
    sensors: Vec<Sensor>,
}

impl Robot {
    pub(crate) fn new(id: RobotId, name: &str, range: SlotRange, model: Box<dyn MotionModel>) -> Self {
        Self {
            id,
            name: name.to_string(),
            range,
            model,
            sensors: Vec::new(),
        }
    }

    /// Robot id.
    #[inline]
    pub fn id(&self) -> RobotId {
        self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot range owned by this robot.
    #[inline]
    pub fn range(&self) -> SlotRange {
        self.range
    }

    /// Leading sub-range holding the robot's pose frame.
    #[inline]
    pub fn pose_range(&self) -> SlotRange {
        self.range.head(self.model.pose_size())
    }

    /// The motion model driving this robot.
    #[inline]
    pub fn model(&self) -> &dyn MotionModel {
        self.model.as_ref()
    }

    /// Sensors mounted on this robot.
    #[inline]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// The mounted sensor with id `sensor`, if this robot owns it.
    pub fn sensor(&self, sensor: SensorId) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id() == sensor)
    }

    pub(crate) fn mount_sensor(&mut self, sensor: Sensor) {
        self.sensors.push(sensor);
    }

    pub(crate) fn unmount_sensor(&mut self, sensor: SensorId) -> Option<Sensor> {
        let at = self.sensors.iter().position(|s| s.id() == sensor)?;
        Some(self.sensors.remove(at))
    }
}
