// status-backend/src/domain/incident_impact.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// インシデントの影響度を表すenum
///
/// 深刻度の全順序は variant の宣言順（Low < Medium < High < Critical）。
/// ステータス導出とタイムラインの凡例は両方ともこの順序を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentImpact {
    Low,
    Medium,
    High,
    Critical,
}

impl IncidentImpact {
    /// 文字列からIncidentImpactに変換
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// IncidentImpactを文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// すべての有効な影響度を取得
    pub fn all() -> Vec<Self> {
        vec![Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    /// タイムライン描画用の固定カラーコードを取得
    pub fn hex_color(&self) -> &'static str {
        match self {
            Self::Critical => "#dc2626", // Red
            Self::High => "#ea580c",     // Orange
            Self::Medium => "#ca8a04",   // Yellow
            Self::Low => "#16a34a",      // Green
        }
    }

    /// 影響度の表示名を取得
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for IncidentImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IncidentImpact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid incident impact: '{}'. Valid impacts are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|i| i.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

// データベースとの変換用
impl From<IncidentImpact> for String {
    fn from(impact: IncidentImpact) -> Self {
        impact.as_str().to_string()
    }
}

impl TryFrom<String> for IncidentImpact {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for IncidentImpact {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(IncidentImpact::from_str("low"), Some(IncidentImpact::Low));
        assert_eq!(
            IncidentImpact::from_str("MEDIUM"),
            Some(IncidentImpact::Medium)
        );
        assert_eq!(IncidentImpact::from_str("high"), Some(IncidentImpact::High));
        assert_eq!(
            IncidentImpact::from_str("critical"),
            Some(IncidentImpact::Critical)
        );
        assert_eq!(IncidentImpact::from_str("severe"), None);
    }

    #[test]
    fn test_severity_ordering() {
        // 宣言順がそのまま深刻度の全順序になる
        assert!(IncidentImpact::Critical > IncidentImpact::High);
        assert!(IncidentImpact::High > IncidentImpact::Medium);
        assert!(IncidentImpact::Medium > IncidentImpact::Low);

        let max = [
            IncidentImpact::Low,
            IncidentImpact::Critical,
            IncidentImpact::Medium,
        ]
        .into_iter()
        .max();
        assert_eq!(max, Some(IncidentImpact::Critical));
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(IncidentImpact::Critical.hex_color(), "#dc2626");
        assert_eq!(IncidentImpact::High.hex_color(), "#ea580c");
        assert_eq!(IncidentImpact::Medium.hex_color(), "#ca8a04");
        assert_eq!(IncidentImpact::Low.hex_color(), "#16a34a");
    }

    #[test]
    fn test_serde() {
        let impact = IncidentImpact::Critical;
        let serialized = serde_json::to_string(&impact).unwrap();
        assert_eq!(serialized, r#""critical""#);

        let deserialized: IncidentImpact = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, IncidentImpact::Critical);
    }
}
