//! 外部血管检测器接口, 以及血管掩膜的尺寸还原.

use crate::error::{BoxedError, DetectError, DetectResult};
use crate::Idx2d;
use image::imageops::{self, FilterType};
use image::GrayImage;
use ndarray::{Array2, ArrayView2};

/// 血管检测器.
///
/// 输入是亮病灶证据的二值掩膜 (`255` / `0`), 作为检测器的兴趣区域提示;
/// 输出二值血管掩膜, 其分辨率可以低于输入 (例如检测器内部做过小波变换降采样).
/// 实现者对每次调用应当是无状态的.
pub trait VesselDetector {
    /// 检测血管.
    fn detect_vessels(&self, evidence: ArrayView2<u8>) -> Result<Array2<u8>, BoxedError>;
}

impl<T: VesselDetector + ?Sized> VesselDetector for &T {
    #[inline]
    fn detect_vessels(&self, evidence: ArrayView2<u8>) -> Result<Array2<u8>, BoxedError> {
        (**self).detect_vessels(evidence)
    }
}

/// 直接返回一份事先算好的血管掩膜, 忽略输入证据.
#[derive(Clone, Debug)]
pub struct PrecomputedVessels(pub Array2<u8>);

impl VesselDetector for PrecomputedVessels {
    fn detect_vessels(&self, _evidence: ArrayView2<u8>) -> Result<Array2<u8>, BoxedError> {
        Ok(self.0.clone())
    }
}

/// 不检测任何血管.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoVessels;

impl VesselDetector for NoVessels {
    fn detect_vessels(&self, evidence: ArrayView2<u8>) -> Result<Array2<u8>, BoxedError> {
        Ok(Array2::zeros(evidence.dim()))
    }
}

/// 以最近邻插值将 `mask` 缩放到 `(h, w)`. 非零像素统一输出为 `255`.
///
/// 形状已经一致时直接复制.
pub fn rescale_mask(mask: ArrayView2<u8>, (h, w): Idx2d) -> DetectResult<Array2<u8>> {
    let (mh, mw) = mask.dim();
    if mh == 0 || mw == 0 || h == 0 || w == 0 {
        return Err(DetectError::EmptyImage);
    }
    let binary = mask.mapv(|p| if p != 0 { u8::MAX } else { 0 });
    if (mh, mw) == (h, w) {
        return Ok(binary);
    }

    // 行优先. 缓冲区长度恰好为 mh * mw, 不会失败.
    let raw: Vec<u8> = binary.iter().copied().collect();
    let src = GrayImage::from_raw(mw as u32, mh as u32, raw)
        .ok_or(DetectError::EmptyImage)?;
    let dst = imageops::resize(&src, w as u32, h as u32, FilterType::Nearest);
    let data = Array2::from_shape_vec((h, w), dst.into_raw()).map_err(|_| {
        DetectError::ShapeMismatch {
            expected: (h, w),
            found: (mh, mw),
        }
    })?;
    Ok(data.mapv(|p| if p != 0 { u8::MAX } else { 0 }))
}
