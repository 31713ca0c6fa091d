// ==========================================
// 农情智能查询核心 - 领域类型定义
// ==========================================
// 职责: 地区 / 作物 / 季节 / 品种类别 / 风险等级枚举
// 红线: 所有外部字符串在此处一次性规范化（trim + 大小写不敏感）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 领域枚举解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainParseError {
    #[error("unsupported {kind}: '{value}'")]
    Unsupported { kind: &'static str, value: String },
}

/// 规范化外部输入: 去除首尾空白，合并内部连续空白
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ==========================================
// 地区 (District)
// ==========================================
// 普凡查尔 27 个地区，显示名为大写原始拼写
// 序列化名与 as_str 一致（多词地区保留空格），保证可经 FromStr 回读
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum District {
    Allahabad,
    #[serde(rename = "AMBEDKAR NAGAR")]
    AmbedkarNagar,
    Azamgarh,
    Bahraich,
    Ballia,
    Balrampur,
    Basti,
    Chandauli,
    Deoria,
    Fatehpur,
    Ghazipur,
    Gonda,
    Gorakhpur,
    Jaunpur,
    Kaushambi,
    #[serde(rename = "KUSHI NAGAR")]
    KushiNagar,
    Maharajganj,
    Mau,
    Mirzapur,
    Pratapgarh,
    #[serde(rename = "SANT KABEER NAGAR")]
    SantKabeerNagar,
    #[serde(rename = "SANT RAVIDAS NAGAR")]
    SantRavidasNagar,
    Shravasti,
    #[serde(rename = "SIDDHARTH NAGAR")]
    SiddharthNagar,
    Sonbhadra,
    Sultanpur,
    Varanasi,
}

impl District {
    pub const ALL: [District; 27] = [
        District::Allahabad,
        District::AmbedkarNagar,
        District::Azamgarh,
        District::Bahraich,
        District::Ballia,
        District::Balrampur,
        District::Basti,
        District::Chandauli,
        District::Deoria,
        District::Fatehpur,
        District::Ghazipur,
        District::Gonda,
        District::Gorakhpur,
        District::Jaunpur,
        District::Kaushambi,
        District::KushiNagar,
        District::Maharajganj,
        District::Mau,
        District::Mirzapur,
        District::Pratapgarh,
        District::SantKabeerNagar,
        District::SantRavidasNagar,
        District::Shravasti,
        District::SiddharthNagar,
        District::Sonbhadra,
        District::Sultanpur,
        District::Varanasi,
    ];

    /// 模型训练数据中使用的地区名（大写）
    pub fn as_str(&self) -> &'static str {
        match self {
            District::Allahabad => "ALLAHABAD",
            District::AmbedkarNagar => "AMBEDKAR NAGAR",
            District::Azamgarh => "AZAMGARH",
            District::Bahraich => "BAHRAICH",
            District::Ballia => "BALLIA",
            District::Balrampur => "BALRAMPUR",
            District::Basti => "BASTI",
            District::Chandauli => "CHANDAULI",
            District::Deoria => "DEORIA",
            District::Fatehpur => "FATEHPUR",
            District::Ghazipur => "GHAZIPUR",
            District::Gonda => "GONDA",
            District::Gorakhpur => "GORAKHPUR",
            District::Jaunpur => "JAUNPUR",
            District::Kaushambi => "KAUSHAMBI",
            District::KushiNagar => "KUSHI NAGAR",
            District::Maharajganj => "MAHARAJGANJ",
            District::Mau => "MAU",
            District::Mirzapur => "MIRZAPUR",
            District::Pratapgarh => "PRATAPGARH",
            District::SantKabeerNagar => "SANT KABEER NAGAR",
            District::SantRavidasNagar => "SANT RAVIDAS NAGAR",
            District::Shravasti => "SHRAVASTI",
            District::SiddharthNagar => "SIDDHARTH NAGAR",
            District::Sonbhadra => "SONBHADRA",
            District::Sultanpur => "SULTANPUR",
            District::Varanasi => "VARANASI",
        }
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for District {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s).to_uppercase();
        District::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| DomainParseError::Unsupported {
                kind: "district",
                value: s.to_string(),
            })
    }
}

// ==========================================
// 作物 (Crop)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Crop {
    Rice,
    Wheat,
    Barley,
    Mustard,
}

impl Crop {
    pub const ALL: [Crop; 4] = [Crop::Rice, Crop::Wheat, Crop::Barley, Crop::Mustard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Rice => "Rice",
            Crop::Wheat => "Wheat",
            Crop::Barley => "Barley",
            Crop::Mustard => "Mustard",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crop {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Crop::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(&key))
            .ok_or_else(|| DomainParseError::Unsupported {
                kind: "crop",
                value: s.to_string(),
            })
    }
}

// ==========================================
// 播种季节 (Season)
// ==========================================
// 模型编码: Rabi = 1, Kharif = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::Kharif, Season::Rabi];

    /// 传给模型的二值编码
    pub fn model_code(&self) -> u8 {
        match self {
            Season::Kharif => 0,
            Season::Rabi => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Season::ALL
            .iter()
            .copied()
            .find(|season| season.as_str().eq_ignore_ascii_case(&key))
            .ok_or_else(|| DomainParseError::Unsupported {
                kind: "season",
                value: s.to_string(),
            })
    }
}

// ==========================================
// 品种类别 (Variety Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarietyCategory {
    Stable,        // 稳产
    HighYield,     // 高产
    ShortDuration, // 早熟
}

impl VarietyCategory {
    pub const ALL: [VarietyCategory; 3] = [
        VarietyCategory::Stable,
        VarietyCategory::HighYield,
        VarietyCategory::ShortDuration,
    ];

    /// 宽表中对应的列名
    pub fn wide_column(&self) -> &'static str {
        match self {
            VarietyCategory::Stable => "Stable Variety",
            VarietyCategory::HighYield => "High Yield Variety",
            VarietyCategory::ShortDuration => "Short Duration Variety",
        }
    }
}

impl fmt::Display for VarietyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarietyCategory::Stable => write!(f, "STABLE"),
            VarietyCategory::HighYield => write!(f, "HIGH_YIELD"),
            VarietyCategory::ShortDuration => write!(f, "SHORT_DURATION"),
        }
    }
}

impl FromStr for VarietyCategory {
    type Err = DomainParseError;

    /// 接受 "High Yield" / "High-Yield" / "HIGH_YIELD" / "High Yield Variety" 等写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        let compact = compact.strip_suffix("variety").unwrap_or(&compact);

        match compact {
            "stable" => Ok(VarietyCategory::Stable),
            "highyield" => Ok(VarietyCategory::HighYield),
            "shortduration" | "short" => Ok(VarietyCategory::ShortDuration),
            _ => Err(DomainParseError::Unsupported {
                kind: "variety category",
                value: s.to_string(),
            }),
        }
    }
}

// ==========================================
// 病害风险等级 (Risk Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "moderate" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(DomainParseError::Unsupported {
                kind: "risk level",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_district_parse_is_trimmed_and_case_insensitive() {
        assert_eq!(" varanasi ".parse::<District>(), Ok(District::Varanasi));
        assert_eq!(
            "sant  kabeer nagar".parse::<District>(),
            Ok(District::SantKabeerNagar)
        );
        assert!("LUCKNOW".parse::<District>().is_err());
    }

    #[test]
    fn test_district_list_is_complete() {
        assert_eq!(District::ALL.len(), 27);
        for d in District::ALL {
            assert_eq!(d.as_str().parse::<District>(), Ok(d));
        }
    }

    #[test]
    fn test_district_serde_name_parses_back() {
        for d in District::ALL {
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, format!("\"{}\"", d.as_str()));

            let name: String = serde_json::from_str(&json).unwrap();
            assert_eq!(name.parse::<District>(), Ok(d));
            assert_eq!(serde_json::from_str::<District>(&json).unwrap(), d);
        }
    }

    #[test]
    fn test_crop_parse() {
        assert_eq!(" rice ".parse::<Crop>(), Ok(Crop::Rice));
        assert_eq!("MUSTARD".parse::<Crop>(), Ok(Crop::Mustard));
        assert!("Maize".parse::<Crop>().is_err());
    }

    #[test]
    fn test_season_model_code() {
        assert_eq!(Season::Rabi.model_code(), 1);
        assert_eq!(Season::Kharif.model_code(), 0);
        assert_eq!("rabi".parse::<Season>(), Ok(Season::Rabi));
    }

    #[test]
    fn test_variety_category_aliases() {
        assert_eq!("Stable".parse::<VarietyCategory>(), Ok(VarietyCategory::Stable));
        assert_eq!(
            "High-Yield".parse::<VarietyCategory>(),
            Ok(VarietyCategory::HighYield)
        );
        assert_eq!(
            "HIGH_YIELD".parse::<VarietyCategory>(),
            Ok(VarietyCategory::HighYield)
        );
        assert_eq!(
            "Short Duration Variety".parse::<VarietyCategory>(),
            Ok(VarietyCategory::ShortDuration)
        );
        assert!("Hybrid".parse::<VarietyCategory>().is_err());
    }

    #[test]
    fn test_risk_level_parse() {
        assert_eq!("HIGH".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert_eq!(" moderate ".parse::<RiskLevel>(), Ok(RiskLevel::Medium));
        assert!("severe".parse::<RiskLevel>().is_err());
    }
}
