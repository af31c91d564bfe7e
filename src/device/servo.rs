//! Sprinkler servo duty mapping.
//!
//! Hobby servo on a 50 Hz PWM channel with a 10-bit duty register:
//! duty 26 ≈ 0.5 ms pulse (0°), duty 128 ≈ 2.5 ms pulse (180°).

use crate::app::ports::DutyCycleMapper;
use crate::state::model::ANGLE_MAX_DEG;

/// Linear angle → duty mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoDutyMapper {
    /// Duty at 0°.
    pub min_duty: u16,
    /// Duty added across the full 0–180° sweep.
    pub span: u16,
}

impl Default for ServoDutyMapper {
    fn default() -> Self {
        Self {
            min_duty: 26,
            span: 102,
        }
    }
}

impl DutyCycleMapper for ServoDutyMapper {
    fn duty_for(&self, angle_deg: u8) -> u16 {
        let angle = u32::from(angle_deg.min(ANGLE_MAX_DEG));
        let offset = angle * u32::from(self.span) / u32::from(ANGLE_MAX_DEG);
        self.min_duty.saturating_add(offset as u16)
    }
}
