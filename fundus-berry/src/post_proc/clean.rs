//! 形态学清理.

use crate::consts::OPENING_KERNEL;
use crate::error::DetectResult;
use crate::morph::{self, OpeningMode, StructElem};
use crate::LabelViewMut;

/// 以 5 * 5 椭圆结构元对整张标签图做开运算, 去掉分类器留下的零星小簇.
///
/// 返回被改变的像素个数. 对已清理过的标签图再次调用不会有任何改变.
pub fn clean(map: &mut LabelViewMut<'_>, mode: OpeningMode) -> DetectResult<usize> {
    let elem = StructElem::ellipse(OPENING_KERNEL)?;
    let opened = morph::open(map.array_view(), &elem, mode);
    let changed = opened
        .iter()
        .zip(map.iter())
        .filter(|(new, old)| new != old)
        .count();
    map.assign(opened.view())?;
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::clean;
    use crate::consts::label::*;
    use crate::testing::paint_rect;
    use crate::{OpeningMode, OwnedLabelMap};

    #[test]
    fn test_clean_removes_stray_and_is_idempotent() {
        for mode in [OpeningMode::PerClass, OpeningMode::Grayscale] {
            let mut map = OwnedLabelMap::background((30, 30));
            let mut m = map.as_mutable();
            paint_rect(&mut m, (2, 2), (3, 3), HAEMORAGE);
            paint_rect(&mut m, (10, 10), (12, 12), DRUSEN);
            m[(25, 25)] = CAMERA_HUE;

            let changed = clean(&mut map.as_mutable(), mode).unwrap();
            // 3 * 3 小簇, 孤立像素, 以及大方块的 4 个角 (每角 2 像素).
            assert_eq!(changed, 9 + 1 + 8, "{mode:?}");
            assert_eq!(map.as_immut().count(HAEMORAGE), 0);
            assert_eq!(map.as_immut().count(CAMERA_HUE), 0);
            assert_eq!(map[(15, 15)], DRUSEN);

            let snapshot = map.clone();
            assert_eq!(clean(&mut map.as_mutable(), mode).unwrap(), 0);
            assert_eq!(map, snapshot);
        }
    }
}
