//! 通用常量.

/// 标签图中各像素类别的整数编码.
///
/// 编码的数值顺序只用于存储和展示, 任何精化算法都不依赖编码之间的大小关系.
pub mod label {
    /// 背景 (包括纹理等无关区域).
    pub const BACKGROUND: u8 = 0;

    /// 玻璃膜疣 / 硬性渗出 (亮病灶).
    pub const DRUSEN: u8 = 1;

    /// 出血 / 微动脉瘤 (暗病灶).
    pub const HAEMORAGE: u8 = 2;

    /// 相机色调 / 眩光伪影.
    pub const CAMERA_HUE: u8 = 3;

    /// 视盘 (Optic Disc).
    pub const OD: u8 = 4;

    /// 血管.
    pub const BLOOD_VESSEL: u8 = 5;

    /// 已屏蔽, 不再作为病灶候选.
    pub const MASKED: u8 = 6;

    /// 合法编码的个数.
    pub const LABEL_COUNT: usize = 7;

    /// 像素是否是背景?
    #[inline]
    pub const fn is_background(p: u8) -> bool {
        matches!(p, BACKGROUND)
    }

    /// 像素是否是亮病灶?
    #[inline]
    pub const fn is_drusen(p: u8) -> bool {
        matches!(p, DRUSEN)
    }

    /// 像素是否是暗病灶?
    #[inline]
    pub const fn is_haemorage(p: u8) -> bool {
        matches!(p, HAEMORAGE)
    }

    /// 像素是否是病灶 (亮或暗)?
    #[inline]
    pub const fn is_lesion(p: u8) -> bool {
        matches!(p, DRUSEN | HAEMORAGE)
    }

    /// 像素是否是视盘?
    #[inline]
    pub const fn is_od(p: u8) -> bool {
        matches!(p, OD)
    }

    /// 像素是否是血管?
    #[inline]
    pub const fn is_vessel(p: u8) -> bool {
        matches!(p, BLOOD_VESSEL)
    }

    /// 像素是否已被屏蔽?
    #[inline]
    pub const fn is_masked(p: u8) -> bool {
        matches!(p, MASKED)
    }

    /// 编码是否合法?
    #[inline]
    pub const fn is_valid(p: u8) -> bool {
        (p as usize) < LABEL_COUNT
    }
}

/// 叠加图使用的 RGB 颜色.
pub mod color {
    /// 亮病灶: 绿色.
    pub const DRUSEN: [u8; 3] = [0, 255, 0];

    /// 暗病灶: 红色.
    pub const HAEMORAGE: [u8; 3] = [255, 0, 0];

    /// 视盘: 黄色.
    pub const OD: [u8; 3] = [255, 255, 0];

    /// 血管: 蓝色.
    pub const BLOOD_VESSEL: [u8; 3] = [0, 0, 255];

    /// 已屏蔽区域: 品红.
    pub const MASKED: [u8; 3] = [255, 0, 255];
}

/// 单通道灰度.
pub mod gray {
    /// 单通道黑色.
    pub const BLACK: u8 = 0b_0000_0000;

    /// 单通道白色.
    pub const WHITE: u8 = 0b_1111_1111;

    /// 标签空间之外的编码在可视化时使用的灰度.
    pub const UNKNOWN: u8 = 232;
}

/// 面积阈值的默认值: ROI 像素数的 0.5%.
pub const DEFAULT_AREA_THRESHOLD: f64 = 0.005;

/// 视盘第二候选区域判定比例的默认值.
pub const DEFAULT_OD_RATIO: f64 = 0.7;

/// 血管泛洪越过非血管像素的默认最大步数.
pub const DEFAULT_BLEED_RADIUS: u32 = 2;

/// 视盘识别与大区域屏蔽所用连通域标记的方形结构元边长.
pub const COMPONENT_KERNEL: usize = 5;

/// 血管连通域标记的方形结构元边长.
pub const VESSEL_KERNEL: usize = 9;

/// 形态学清理所用椭圆结构元的边长.
pub const OPENING_KERNEL: usize = 5;

/// 像素类别.
///
/// 与 [`label`] 中的编码一一对应. 需要整数编码时用 `Label::code`,
/// 从整数编码构造时用 `Label::try_from`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Label {
    /// 背景.
    Background = label::BACKGROUND,

    /// 亮病灶.
    Drusen = label::DRUSEN,

    /// 暗病灶.
    Haemorage = label::HAEMORAGE,

    /// 相机色调伪影.
    CameraHue = label::CAMERA_HUE,

    /// 视盘.
    OD = label::OD,

    /// 血管.
    BloodVessel = label::BLOOD_VESSEL,

    /// 已屏蔽.
    Masked = label::MASKED,
}

impl Label {
    /// 全部类别, 按编码升序.
    pub const ALL: [Label; label::LABEL_COUNT] = [
        Label::Background,
        Label::Drusen,
        Label::Haemorage,
        Label::CameraHue,
        Label::OD,
        Label::BloodVessel,
        Label::Masked,
    ];

    /// 整数编码.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// 叠加图颜色. 背景和相机伪影不着色.
    pub const fn color(self) -> Option<[u8; 3]> {
        match self {
            Label::Drusen => Some(color::DRUSEN),
            Label::Haemorage => Some(color::HAEMORAGE),
            Label::OD => Some(color::OD),
            Label::BloodVessel => Some(color::BLOOD_VESSEL),
            Label::Masked => Some(color::MASKED),
            Label::Background | Label::CameraHue => None,
        }
    }
}

impl TryFrom<u8> for Label {
    type Error = crate::DetectError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Label::ALL
            .get(code as usize)
            .copied()
            .ok_or(crate::DetectError::UnknownLabel(code))
    }
}

impl From<Label> for u8 {
    #[inline]
    fn from(value: Label) -> Self {
        value.code()
    }
}

#[cfg(test)]
mod tests {
    use super::{label, Label};

    #[test]
    fn test_label_codes_round_trip() {
        for l in Label::ALL {
            assert_eq!(Label::try_from(l.code()).unwrap(), l);
            assert!(label::is_valid(l.code()));
        }
        assert!(Label::try_from(label::LABEL_COUNT as u8).is_err());
        assert!(!label::is_valid(200));
    }

    #[test]
    fn test_lesion_predicate() {
        assert!(label::is_lesion(label::DRUSEN));
        assert!(label::is_lesion(label::HAEMORAGE));
        assert!(!label::is_lesion(label::BLOOD_VESSEL));
        assert!(!label::is_lesion(label::MASKED));
    }
}
