//! 检测器配置.
//!
//! 所有可调参数都通过 [`DetectorConfig`] 显式注入, 检测器本身不依赖任何数据集目录结构.
//! 开启 `serde` feature 时可以从 JSON 加载:
//!
//! ```no_run
//! # #[cfg(feature = "serde")]
//! # fn main() -> fundus_berry::DetectResult<()> {
//! use fundus_berry::DetectorConfig;
//!
//! let config = DetectorConfig::from_json_file("detector.json")?;
//! # let _ = config;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```

use crate::consts::{DEFAULT_AREA_THRESHOLD, DEFAULT_BLEED_RADIUS, DEFAULT_OD_RATIO};
use crate::error::{DetectError, DetectResult};
use crate::morph::OpeningMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 检测器配置.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DetectorConfig {
    /// 大区域屏蔽的面积阈值, 以 ROI 像素总数的比例表示. 必须位于 (0, 1).
    pub area_threshold: f64,

    /// 第二大亮区域面积超过最大亮区域面积的该比例时, 也视为视盘附近伪影.
    /// 必须位于 (0, 1).
    pub od_ratio: f64,

    /// 形态学清理的开运算方式.
    pub opening: OpeningMode,

    /// 血管泛洪可越过非血管像素的最大步数.
    pub bleed_radius: u32,

    /// 是否在每次精化后输出调试叠加图.
    pub debug: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            area_threshold: DEFAULT_AREA_THRESHOLD,
            od_ratio: DEFAULT_OD_RATIO,
            opening: OpeningMode::default(),
            bleed_radius: DEFAULT_BLEED_RADIUS,
            debug: false,
        }
    }
}

/// 检查面积阈值是否位于开区间 (0, 1).
#[inline]
pub(crate) fn check_threshold(thresh: f64) -> DetectResult<()> {
    if 0.0 < thresh && thresh < 1.0 {
        Ok(())
    } else {
        Err(DetectError::InvalidThreshold(thresh))
    }
}

impl DetectorConfig {
    /// 检查所有参数是否合法.
    pub fn validate(&self) -> DetectResult<()> {
        check_threshold(self.area_threshold)?;
        if !(0.0 < self.od_ratio && self.od_ratio < 1.0) {
            return Err(DetectError::InvalidRatio(self.od_ratio));
        }
        Ok(())
    }

    /// 设置面积阈值.
    #[inline]
    pub fn with_area_threshold(mut self, thresh: f64) -> Self {
        self.area_threshold = thresh;
        self
    }

    /// 设置开运算方式.
    #[inline]
    pub fn with_opening(mut self, opening: OpeningMode) -> Self {
        self.opening = opening;
        self
    }

    /// 设置调试开关.
    #[inline]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// 设置血管泛洪的最大越界步数.
    #[inline]
    pub fn with_bleed_radius(mut self, radius: u32) -> Self {
        self.bleed_radius = radius;
        self
    }
}

#[cfg(feature = "serde")]
impl DetectorConfig {
    /// 从 JSON 字符串解析并检查配置. 缺省字段取默认值.
    pub fn from_json_str(s: &str) -> DetectResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并检查配置.
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> DetectResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// 序列化为格式化的 JSON.
    pub fn to_json_string(&self) -> DetectResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::DetectorConfig;
    use crate::{DetectError, OpeningMode};

    #[test]
    fn test_default_config_is_valid() {
        let c = DetectorConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.area_threshold, 0.005);
        assert_eq!(c.opening, OpeningMode::PerClass);
        assert!(!c.debug);
    }

    #[test]
    fn test_threshold_out_of_range() {
        for t in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            let c = DetectorConfig::default().with_area_threshold(t);
            assert!(matches!(c.validate(), Err(DetectError::InvalidThreshold(_))));
        }
    }

    #[test]
    fn test_ratio_out_of_range() {
        let c = DetectorConfig {
            od_ratio: 1.0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(DetectError::InvalidRatio(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_partial_config() {
        let c = DetectorConfig::from_json_str(r#"{"area_threshold": 0.01, "opening": "Grayscale"}"#)
            .unwrap();
        assert_eq!(c.area_threshold, 0.01);
        assert_eq!(c.opening, OpeningMode::Grayscale);
        assert_eq!(c.od_ratio, 0.7);

        let back = DetectorConfig::from_json_str(&c.to_json_string().unwrap()).unwrap();
        assert_eq!(back, c);

        assert!(matches!(
            DetectorConfig::from_json_str(r#"{"area_threshold": 3.0}"#),
            Err(DetectError::InvalidThreshold(_))
        ));
        assert!(matches!(
            DetectorConfig::from_json_str("{"),
            Err(DetectError::Config(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_file() {
        let c = DetectorConfig::default()
            .with_area_threshold(0.02)
            .with_bleed_radius(3)
            .with_debug(true);
        let path = std::env::temp_dir().join("fundus_berry_detector_config.json");
        std::fs::write(&path, c.to_json_string().unwrap()).unwrap();
        let back = DetectorConfig::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back.unwrap(), c);

        let missing = std::env::temp_dir().join("fundus_berry_no_such_config.json");
        assert!(matches!(
            DetectorConfig::from_json_file(missing),
            Err(DetectError::Io(_))
        ));
    }
}
