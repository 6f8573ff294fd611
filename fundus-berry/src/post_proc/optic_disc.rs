//! 视盘识别与屏蔽.

use crate::consts::{label::*, COMPONENT_KERNEL};
use crate::error::{DetectError, DetectResult};
use crate::morph::StructElem;
use crate::region::Components;
use crate::{LabelViewMut, RoiMask};
use log::debug;

/// 被屏蔽的视盘区域描述.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OpticDisc {
    /// 视盘 (最大亮区域) 的像素个数.
    pub disc: usize,

    /// 一并屏蔽的第二大亮区域 (通常是视盘附近的相机眩光) 的像素个数.
    pub secondary: Option<usize>,
}

/// 屏蔽视盘.
///
/// 分类器无法区分视盘和亮病灶, 因此把亮病灶与视盘两类像素合并,
/// 以 5 * 5 方形结构元做连通域标记, 并假设面积最大的连通域是视盘.
/// 若第二大连通域的面积超过最大连通域面积的 `ratio` 倍, 则认为它是视盘附近的眩光,
/// 一并屏蔽. 两个大区域难分伯仲时宁可都屏蔽, 也不把病灶当成视盘留下.
///
/// 被选中的连通域像素全部改为 `MASKED`. 不存在任何亮区域时什么也不做, 返回 `None`.
pub fn mask_off_optic_disc(
    map: &mut LabelViewMut<'_>,
    roi: &RoiMask,
    ratio: f64,
) -> DetectResult<Option<OpticDisc>> {
    if !(0.0 < ratio && ratio < 1.0) {
        return Err(DetectError::InvalidRatio(ratio));
    }
    let bright = map.region_where(|p| is_drusen(p) || is_od(p), roi)?;
    let components = Components::label(bright.view(), &StructElem::square(COMPONENT_KERNEL)?);

    let Some(disc) = components.largest() else {
        debug!("没有亮区域, 跳过视盘屏蔽");
        return Ok(None);
    };
    let disc_size = components.size(disc);
    let secondary = components
        .largest_except(Some(disc))
        .filter(|&id| components.size(id) as f64 > ratio * disc_size as f64);

    let mut ans = OpticDisc {
        disc: disc_size,
        secondary: None,
    };
    if let Some(id) = secondary {
        let area = components.area(id).unwrap_or_default();
        map.fill_batch(area.iter().copied(), MASKED);
        ans.secondary = Some(area.len());
    }
    map.fill_batch(components.area(disc).unwrap_or_default().iter().copied(), MASKED);

    debug!(
        "视盘屏蔽: 最大亮区域 {} 像素, 第二候选 {:?}",
        ans.disc, ans.secondary
    );
    Ok(Some(ans))
}
