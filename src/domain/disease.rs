// ==========================================
// 农情智能查询核心 - 病害风险实体
// ==========================================

use crate::domain::types::RiskLevel;
use serde::{Deserialize, Serialize};

/// 病害风险记录（一个作物可对应多条）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub crop_name: String,
    pub disease_name: String,
    /// 可识别的风险等级；无法识别或为空时为 None
    pub risk_level: Option<RiskLevel>,
    /// 表中原始风险文本
    pub risk_text: String,
    pub prevention_advice: String,
}

impl DiseaseRecord {
    /// 展示用风险文本: 可识别时取规范写法，否则原样
    pub fn risk_display(&self) -> String {
        match self.risk_level {
            Some(level) => level.to_string(),
            None => self.risk_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(risk_level: Option<RiskLevel>, risk_text: &str) -> DiseaseRecord {
        DiseaseRecord {
            crop_name: "Barley".to_string(),
            disease_name: "Stripe Disease".to_string(),
            risk_level,
            risk_text: risk_text.to_string(),
            prevention_advice: String::new(),
        }
    }

    #[test]
    fn test_risk_display() {
        assert_eq!(record(Some(RiskLevel::High), "HIGH").risk_display(), "High");
        assert_eq!(record(None, "Severe").risk_display(), "Severe");
    }
}
