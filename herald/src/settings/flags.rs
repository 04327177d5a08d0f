use super::Phase;
use crate::error::{EventError, EventResult};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// 事件标志集合
///
/// 构造事件时确定，之后不再改变。
///
/// # 示例
///
/// ```
/// use herald::settings::EventFlags;
///
/// let flags = EventFlags::CANCELLABLE | EventFlags::CHRONICLED;
/// assert!(flags.is_cancellable());
/// assert!(flags.is_chronicled());
/// assert!(!EventFlags::NONE.is_gatable());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFlags {
    cancellable: bool,
    chronicled: bool,
}

impl EventFlags {
    pub const NONE: Self = Self {
        cancellable: false,
        chronicled: false,
    };
    pub const CANCELLABLE: Self = Self {
        cancellable: true,
        chronicled: false,
    };
    pub const CHRONICLED: Self = Self {
        cancellable: false,
        chronicled: true,
    };

    pub const fn union(self, other: Self) -> Self {
        Self {
            cancellable: self.cancellable || other.cancellable,
            chronicled: self.chronicled || other.chronicled,
        }
    }

    pub const fn is_cancellable(&self) -> bool {
        self.cancellable
    }

    pub const fn is_chronicled(&self) -> bool {
        self.chronicled
    }

    /// 是否允许携带后续动作触发（`trigger_with`）
    pub const fn is_gatable(&self) -> bool {
        self.cancellable || self.chronicled
    }

    /// 绑定时的阶段校验：编年事件必须显式绑定到 PRE/POST
    pub(crate) fn check_bind_phase(&self, phase: Phase) -> EventResult<()> {
        self.check_trigger_phase(phase)?;
        if phase == Phase::Default && self.chronicled {
            return Err(EventError::InvalidPhase {
                phase,
                reason: "event is chronicled, bind to either pre or post",
            });
        }
        Ok(())
    }

    /// 触发时的阶段校验：非编年事件只有 DEFAULT 阶段
    pub(crate) fn check_trigger_phase(&self, phase: Phase) -> EventResult<()> {
        if phase != Phase::Default && !self.chronicled {
            return Err(EventError::InvalidPhase {
                phase,
                reason: "event is not chronicled",
            });
        }
        Ok(())
    }
}

impl BitOr for EventFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for EventFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.cancellable, self.chronicled) {
            (false, false) => f.write_str("none"),
            (true, false) => f.write_str("cancellable"),
            (false, true) => f.write_str("chronicled"),
            (true, true) => f.write_str("cancellable|chronicled"),
        }
    }
}

/// 事件配置
///
/// 除标志外还可携带一个名称，仅用于日志。
///
/// ```
/// use herald::settings::EventConfig;
///
/// let config = EventConfig::builder()
///     .cancellable(true)
///     .name("player.collect".to_string())
///     .build();
/// assert!(config.flags().is_cancellable());
/// assert_eq!(config.name(), Some("player.collect"));
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    #[builder(default)]
    cancellable: bool,
    #[builder(default)]
    chronicled: bool,
    /// 事件名称（日志字段）
    name: Option<String>,
}

impl EventConfig {
    pub fn flags(&self) -> EventFlags {
        EventFlags {
            cancellable: self.cancellable,
            chronicled: self.chronicled,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<EventFlags> for EventConfig {
    fn from(flags: EventFlags) -> Self {
        Self {
            cancellable: flags.cancellable,
            chronicled: flags.chronicled,
            name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_union() {
        let flags = EventFlags::CANCELLABLE | EventFlags::CHRONICLED;
        assert!(flags.is_cancellable());
        assert!(flags.is_chronicled());
        assert_eq!(flags | EventFlags::NONE, flags);
        assert_eq!(EventFlags::default(), EventFlags::NONE);
    }

    #[test]
    fn test_flags_display() {
        assert_eq!(EventFlags::NONE.to_string(), "none");
        assert_eq!(
            (EventFlags::CHRONICLED | EventFlags::CANCELLABLE).to_string(),
            "cancellable|chronicled"
        );
    }

    #[test]
    fn test_bind_phase_rules() {
        let plain = EventFlags::CANCELLABLE;
        assert!(plain.check_bind_phase(Phase::Default).is_ok());
        assert!(matches!(
            plain.check_bind_phase(Phase::Pre),
            Err(EventError::InvalidPhase { phase: Phase::Pre, .. })
        ));

        let chronicled = EventFlags::CHRONICLED;
        assert!(chronicled.check_bind_phase(Phase::Pre).is_ok());
        assert!(chronicled.check_bind_phase(Phase::Post).is_ok());
        assert!(matches!(
            chronicled.check_bind_phase(Phase::Default),
            Err(EventError::InvalidPhase {
                phase: Phase::Default,
                ..
            })
        ));
    }

    #[test]
    fn test_trigger_phase_rules() {
        assert!(EventFlags::NONE.check_trigger_phase(Phase::Default).is_ok());
        assert!(EventFlags::NONE.check_trigger_phase(Phase::Post).is_err());
        // 编年事件允许 DEFAULT，由调度器展开为 PRE + POST
        assert!(EventFlags::CHRONICLED.check_trigger_phase(Phase::Default).is_ok());
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = EventConfig::builder().build();
        assert_eq!(config.flags(), EventFlags::NONE);
        assert_eq!(config.name(), None);
        assert_eq!(config, EventConfig::default());
    }

    #[test]
    fn test_config_from_json() {
        let config: EventConfig =
            serde_json::from_str(r#"{"chronicled":true,"name":"door.open"}"#).unwrap();
        assert_eq!(config.flags(), EventFlags::CHRONICLED);
        assert_eq!(config.name(), Some("door.open"));
    }

    #[test]
    fn test_config_from_flags() {
        let config = EventConfig::from(EventFlags::CANCELLABLE);
        assert!(config.flags().is_cancellable());
        assert!(!config.flags().is_chronicled());
    }
}
