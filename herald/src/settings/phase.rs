use serde::{Deserialize, Serialize};
use std::fmt;

/// 事件阶段
///
/// - `Default`：普通事件的唯一阶段；
/// - `Pre` / `Post`：编年（chronicled）事件围绕后续动作的前置与后置阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Default,
    Pre,
    Post,
}

impl Phase {
    /// 阶段队列下标（注册表内部按阶段分桶）
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Default => 0,
            Self::Pre => 1,
            Self::Post => 2,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Default.to_string(), "default");
        assert_eq!(Phase::Pre.to_string(), "pre");
        assert_eq!(Phase::Post.to_string(), "post");
    }

    #[test]
    fn test_phase_serde() {
        let json = serde_json::to_string(&Phase::Pre).unwrap();
        assert_eq!(json, "\"pre\"");

        let phase: Phase = serde_json::from_str("\"post\"").unwrap();
        assert_eq!(phase, Phase::Post);
    }

    #[test]
    fn test_phase_index_distinct() {
        assert_ne!(Phase::Default.index(), Phase::Pre.index());
        assert_ne!(Phase::Pre.index(), Phase::Post.index());
        assert_ne!(Phase::Default.index(), Phase::Post.index());
    }
}
