//! 血管邻域泛洪.

use crate::consts::{label::*, VESSEL_KERNEL};
use crate::error::{ensure_shape, DetectResult};
use crate::flood::bounded_flood;
use crate::morph::StructElem;
use crate::region::Components;
use crate::{LabelViewMut, RoiMask};
use log::debug;
use ndarray::{Array2, Zip};

/// 把紧贴血管的零散像素并入血管.
///
/// 阻挡集合在泛洪前一次性算出: 病灶像素 (亮/暗), 已屏蔽像素, 以及 ROI 之外的像素.
/// 血管像素以 9 * 9 方形结构元分组, 每组取行优先的首个像素作为种子,
/// 从种子出发做 4-相邻泛洪: 可以任意穿越血管像素,
/// 也可以越过其它未被阻挡的像素, 但离开最近的血管像素不能超过 `bleed` 步.
/// 所有到达的像素改为 `BLOOD_VESSEL`.
///
/// 返回新改为血管的像素个数.
pub fn eliminate_vessel_neighbours(
    map: &mut LabelViewMut<'_>,
    roi: &RoiMask,
    bleed: u32,
) -> DetectResult<usize> {
    ensure_shape(map.shape(), roi.shape())?;
    let shape = map.shape();

    let mut blocked = Array2::from_elem(shape, false);
    Zip::from(&mut blocked)
        .and(map.array_view())
        .and(roi.array_view())
        .for_each(|b, &p, &inside| *b = !inside || is_lesion(p) || is_masked(p));

    let vessels = map.region_binary(BLOOD_VESSEL, roi)?;
    let core = vessels.mapv(|p| p != 0);
    let components = Components::label(vessels.view(), &StructElem::square(VESSEL_KERNEL)?);

    let mut reached = Array2::from_elem(shape, false);
    for seed in components.seeds() {
        // 同一 4-连通血管段上的种子得到的泛洪结果相同.
        if reached[seed] {
            continue;
        }
        for pos in bounded_flood(core.view(), blocked.view(), seed, bleed) {
            reached[pos] = true;
        }
    }

    let mut changed = 0usize;
    Zip::from(map.array_view_mut())
        .and(&reached)
        .for_each(|p, &hit| {
            if hit && *p != BLOOD_VESSEL {
                *p = BLOOD_VESSEL;
                changed += 1;
            }
        });
    debug!(
        "血管邻域泛洪: {} 个血管连通域, 新增 {changed} 个血管像素",
        components.len()
    );
    Ok(changed)
}
