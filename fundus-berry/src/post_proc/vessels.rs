//! 血管叠加.

use crate::consts::label::*;
use crate::error::{DetectError, DetectResult};
use crate::vessel::{rescale_mask, VesselDetector};
use crate::{LabelViewMut, RoiMask};
use log::debug;
use ndarray::{Array2, ArrayView2};

/// 一次血管叠加的结果.
#[derive(Clone, Debug)]
pub struct VesselOverlay {
    /// 还原到标签图分辨率的血管掩膜 (`255` / `0`).
    pub markers: Array2<u8>,

    /// 被改写为 `BLOOD_VESSEL` 的像素个数.
    pub painted: usize,
}

/// 将外部血管检测结果并入标签图.
///
/// 以亮病灶区域的二值掩膜作为检测器输入, 把检测器输出的血管掩膜按最近邻插值还原到
/// 标签图的分辨率, 然后把所有血管像素改为 `BLOOD_VESSEL`, 无论它们原先是什么类别
/// (包括 `MASKED`). 血管证据优先, 以免之后把血管误判为暗病灶.
pub fn overlay_vessels<V: VesselDetector + ?Sized>(
    map: &mut LabelViewMut<'_>,
    roi: &RoiMask,
    detector: &V,
) -> DetectResult<VesselOverlay> {
    let evidence = map.region_binary(DRUSEN, roi)?;
    let raw = detector
        .detect_vessels(evidence.view())
        .map_err(DetectError::VesselDetector)?;
    let markers = rescale_mask(raw.view(), map.shape())?;
    let painted = paint_vessels(map, markers.view())?;
    debug!(
        "血管叠加: 检测器输出 {:?}, 改写 {painted} 像素",
        raw.dim()
    );
    Ok(VesselOverlay { markers, painted })
}

/// 把 `markers` 中非零位置全部改为 `BLOOD_VESSEL`. `markers` 必须已是标签图的分辨率.
#[inline]
pub fn paint_vessels(map: &mut LabelViewMut<'_>, markers: ArrayView2<u8>) -> DetectResult<usize> {
    map.fill_where(markers, BLOOD_VESSEL)
}
