//! 运行时错误.

use crate::Idx2d;
use thiserror::Error;

/// 外部协作者 (分类器, 血管检测器) 返回的不透明错误.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 检测与精化流程的错误.
///
/// 前置条件不满足时立即返回错误, 不做任何修改; 退化输入 (如找不到任何亮区域)
/// 不是错误.
#[derive(Debug, Error)]
pub enum DetectError {
    /// 面积阈值必须位于开区间 (0, 1).
    #[error("面积阈值必须位于 (0, 1), 但得到 {0}")]
    InvalidThreshold(f64),

    /// 视盘第二候选比例必须位于开区间 (0, 1).
    #[error("视盘候选比例必须位于 (0, 1), 但得到 {0}")]
    InvalidRatio(f64),

    /// 结构元尺寸必须为正奇数.
    #[error("结构元尺寸必须为正奇数, 但得到 {0}")]
    InvalidKernel(usize),

    /// 尚未得到初始分类结果.
    #[error("尚未计算初始分类结果")]
    NoPrediction,

    /// 两个网格的形状 (高, 宽) 不一致.
    #[error("形状不一致: 期望 {expected:?}, 实际 {found:?}")]
    ShapeMismatch {
        /// 期望形状.
        expected: Idx2d,
        /// 实际形状.
        found: Idx2d,
    },

    /// 图像或掩膜为空 (高或宽为 0).
    #[error("图像为空")]
    EmptyImage,

    /// 出现了标签空间之外的编码.
    #[error("未知的标签编码 `{0}`")]
    UnknownLabel(u8),

    /// 外部分类器失败.
    #[error("区域分类器失败")]
    Classifier(#[source] BoxedError),

    /// 外部血管检测器失败.
    #[error("血管检测器失败")]
    VesselDetector(#[source] BoxedError),

    /// 配置文件解析失败.
    #[cfg(feature = "serde")]
    #[error("配置解析失败")]
    Config(#[from] serde_json::Error),

    /// 底层 I/O 错误.
    #[error("I/O 错误")]
    Io(#[from] std::io::Error),

    /// 图像编解码错误.
    #[error("图像错误")]
    Image(#[from] image::ImageError),
}

/// 检测与精化流程的运行结果.
pub type DetectResult<T> = Result<T, DetectError>;

/// 检查两个形状是否一致.
#[inline]
pub(crate) fn ensure_shape(expected: Idx2d, found: Idx2d) -> DetectResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(DetectError::ShapeMismatch { expected, found })
    }
}
