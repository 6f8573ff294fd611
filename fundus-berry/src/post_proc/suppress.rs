//! 大区域屏蔽.

use crate::config::check_threshold;
use crate::consts::{label::*, COMPONENT_KERNEL};
use crate::error::{ensure_shape, DetectResult};
use crate::morph::StructElem;
use crate::region::Components;
use crate::{LabelViewMut, RoiMask};
use log::debug;

/// 屏蔽面积过大的亮/暗区域.
///
/// 真实病灶相对整个眼底区域都很小. 把视盘, 亮病灶, 暗病灶三类像素合并后以
/// 5 * 5 方形结构元做连通域标记, 面积不小于 `roi.area() * thresh` 的连通域
/// (视盘光晕残留, 色带, 眩光等) 全部改为 `MASKED`.
///
/// `thresh` 必须位于开区间 (0, 1). 返回被屏蔽的连通域个数.
pub fn suppress_large_regions(
    map: &mut LabelViewMut<'_>,
    roi: &RoiMask,
    thresh: f64,
) -> DetectResult<usize> {
    check_threshold(thresh)?;
    ensure_shape(map.shape(), roi.shape())?;

    let cutoff = roi.area() as f64 * thresh;
    let combined = map.region_where(|p| is_od(p) || is_lesion(p), roi)?;
    let components = Components::label(combined.view(), &StructElem::square(COMPONENT_KERNEL)?);

    let mut removed = 0usize;
    for (id, area) in components.iter() {
        if area.len() as f64 >= cutoff {
            debug!("屏蔽第 {id} 号大区域: {} 像素 (阈值 {cutoff:.1})", area.len());
            map.fill_batch(area.iter().copied(), MASKED);
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::suppress_large_regions;
    use crate::consts::label::*;
    use crate::testing::paint_rect;
    use crate::{DetectError, OwnedLabelMap, RoiMask};

    #[test]
    fn test_only_large_blob_is_masked() {
        // ROI 10000 像素, 阈值 0.005 => 50 像素.
        let mut map = OwnedLabelMap::background((100, 100));
        let mut m = map.as_mutable();
        paint_rect(&mut m, (5, 5), (10, 10), DRUSEN);
        paint_rect(&mut m, (50, 50), (4, 4), DRUSEN);
        paint_rect(&mut m, (70, 10), (5, 6), HAEMORAGE);
        paint_rect(&mut m, (30, 80), (7, 7), OD);
        let roi = RoiMask::full((100, 100));

        let removed = suppress_large_regions(&mut map.as_mutable(), &roi, 0.005).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(map.as_immut().count(MASKED), 100);
        assert_eq!(map.as_immut().count(DRUSEN), 16);
        assert_eq!(map.as_immut().count(HAEMORAGE), 30);
        assert_eq!(map.as_immut().count(OD), 49);
    }

    #[test]
    fn test_mixed_classes_form_one_region() {
        // 亮病灶与暗病灶相邻时合并计算面积.
        let mut map = OwnedLabelMap::background((100, 100));
        let mut m = map.as_mutable();
        paint_rect(&mut m, (10, 10), (5, 6), DRUSEN);
        paint_rect(&mut m, (15, 10), (5, 6), HAEMORAGE);
        let roi = RoiMask::full((100, 100));

        let removed = suppress_large_regions(&mut map.as_mutable(), &roi, 0.005).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(map.as_immut().count(MASKED), 60);
    }

    #[test]
    fn test_threshold_precondition() {
        let mut map = OwnedLabelMap::background((4, 4));
        let roi = RoiMask::full((4, 4));
        for t in [0.0, 1.0, 1.5] {
            assert!(matches!(
                suppress_large_regions(&mut map.as_mutable(), &roi, t),
                Err(DetectError::InvalidThreshold(_))
            ));
        }
    }
}
