use super::LabelMirror;
use crate::consts::label::*;
use crate::error::{ensure_shape, DetectError, DetectResult};
use crate::{Idx2d, RoiMask};
use ndarray::iter::Iter;
use ndarray::{Array2, ArrayView2, ArrayViewMut2, Ix2, Zip};
use std::ops::{Index, IndexMut};

/// 不可变、借用的二维标签图.
pub struct LabelView<'a> {
    /// 底层数据的轻量级视图, 借用于 [`OwnedLabelMap`].
    data: ArrayView2<'a, u8>,
}

impl Index<Idx2d> for LabelView<'_> {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

/// 可变、借用的二维标签图. 各精化阶段都就地修改它.
pub struct LabelViewMut<'a> {
    /// 底层数据的轻量级视图, 借用于 [`OwnedLabelMap`].
    data: ArrayViewMut2<'a, u8>,
}

/// 可变方法集合.
impl<'a> LabelViewMut<'a> {
    /// 获得 **底层** 数据的一份可变 shallow copy.
    #[inline]
    pub fn array_view_mut(&mut self) -> ArrayViewMut2<u8> {
        self.data.view_mut()
    }

    /// 将 `it` 中的每个索引对应的像素改为 `new`.
    pub fn fill_batch<I: IntoIterator<Item = Idx2d>>(&mut self, it: I, new: u8) {
        for pos in it.into_iter() {
            self[pos] = new;
        }
    }

    /// 将 `mask` 中非零位置对应的像素改为 `new`, 返回修改的像素个数.
    ///
    /// `mask` 的形状必须与标签图一致.
    pub fn fill_where(&mut self, mask: ArrayView2<u8>, new: u8) -> DetectResult<usize> {
        ensure_shape(self.shape(), mask.dim())?;
        let mut cnt = 0usize;
        Zip::from(&mut self.data).and(&mask).for_each(|p, &m| {
            if m != 0 {
                *p = new;
                cnt += 1;
            }
        });
        Ok(cnt)
    }

    /// 用 `other` 整体覆写标签图. 形状必须一致.
    pub fn assign(&mut self, other: ArrayView2<u8>) -> DetectResult<()> {
        ensure_shape(self.shape(), other.dim())?;
        self.data.assign(&other);
        Ok(())
    }
}

impl Index<Idx2d> for LabelViewMut<'_> {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<Idx2d> for LabelViewMut<'_> {
    #[inline]
    fn index_mut(&mut self, index: Idx2d) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// label 不可变方法集合.
macro_rules! impl_label_view_immut {
    ($life: lifetime, $view: ty, $array: ty) => {
        /// 不可变方法集合.
        impl<$life> $view {
            /// 直接初始化.
            #[inline]
            pub(crate) fn new(data: $array) -> Self {
                Self { data }
            }

            /// 获得 **底层** 数据的一份不可变 shallow copy.
            #[inline]
            pub fn array_view(&self) -> ArrayView2<u8> {
                self.data.view()
            }

            /// 获取可以迭代像素的迭代器.
            #[inline]
            pub fn iter(&self) -> Iter<'_, u8, Ix2> {
                self.data.iter()
            }

            /// 该图是否为全背景图?
            #[inline]
            pub fn is_background(&self) -> bool {
                self.data.iter().copied().all(is_background)
            }

            /// 标签图的分辨率 (高, 宽).
            #[inline]
            pub fn shape(&self) -> Idx2d {
                self.data.dim()
            }

            /// 统计值为 `label` 的像素总个数.
            #[inline]
            pub fn count(&self, label: u8) -> usize {
                self.data.iter().filter(|&p| *p == label).count()
            }

            /// 获取各类别的像素个数, 下标即标签编码.
            ///
            /// 标签空间之外的编码不计入.
            pub fn statistics(&self) -> [usize; LABEL_COUNT] {
                let mut ans = [0; LABEL_COUNT];
                for pixel in self.data.iter().filter(|p| is_valid(**p)) {
                    ans[*pixel as usize] += 1;
                }
                ans
            }

            /// 检查是否所有像素都属于标签空间.
            pub fn validate(&self) -> DetectResult<()> {
                match self.data.iter().copied().find(|p| !is_valid(*p)) {
                    Some(bad) => Err(DetectError::UnknownLabel(bad)),
                    None => Ok(()),
                }
            }

            /// 提取 `label` 区域.
            ///
            /// 返回一份新网格: 值不等于 `label` 的像素以及 `roi` 之外的像素都被置为
            /// `BACKGROUND`, 其余像素保留 `label`. 不修改标签图本身.
            pub fn region(&self, label: u8, roi: &RoiMask) -> DetectResult<Array2<u8>> {
                self.region_where(|p| p == label, roi)
            }

            /// 同 [`Self::region`], 但输出二值指示 (`255` / `0`).
            pub fn region_binary(&self, label: u8, roi: &RoiMask) -> DetectResult<Array2<u8>> {
                let mut region = self.region(label, roi)?;
                region.mapv_inplace(|p| if p != BACKGROUND { u8::MAX } else { 0 });
                Ok(region)
            }

            /// 提取满足谓词 `pred` 且位于 `roi` 之内的像素, 其余像素为 `BACKGROUND`.
            pub fn region_where(
                &self,
                mut pred: impl FnMut(u8) -> bool,
                roi: &RoiMask,
            ) -> DetectResult<Array2<u8>> {
                ensure_shape(self.shape(), roi.shape())?;
                let mut ans = Array2::from_elem(self.shape(), BACKGROUND);
                Zip::from(&mut ans)
                    .and(&self.data)
                    .and(roi.array_view())
                    .for_each(|out, &p, &inside| {
                        if inside && pred(p) {
                            *out = p;
                        }
                    });
                Ok(ans)
            }

            /// 获取拥有所有权的镜像, 供以后可能的恢复.
            #[inline]
            pub fn mirror(&self) -> LabelMirror {
                self.into()
            }

            /// 获得一份不可变的 **本体** shallow copy.
            #[inline]
            pub fn shallow_copy(&self) -> LabelView {
                LabelView { data: self.array_view() }
            }

            /// 以行优先规则, 获取能迭代所有索引的迭代器.
            #[inline]
            pub fn pos_iter(&self) -> super::iter::PosIter {
                super::iter::PosIter::new(self.shape())
            }

            /// 以行优先规则, 获取能迭代所有 `(索引, 像素值)` 的迭代器.
            #[inline]
            pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx2d, &u8)> {
                self.data.indexed_iter()
            }
        }
    };
}
impl_label_view_immut!('a, LabelView<'a>, ArrayView2<'a, u8>);
impl_label_view_immut!('a, LabelViewMut<'a>, ArrayViewMut2<'a, u8>);

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 拥有所有权的二维标签图.
///
/// `OwnedLabelMap` 仅提供到 `LabelView` 和 `LabelViewMut`
/// 的轻量转换和底层数据移动, 不提供任何其它方法.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedLabelMap {
    data: Array2<u8>,
}

impl OwnedLabelMap {
    /// 从现成的编码矩阵创建标签图. 所有编码都必须属于标签空间.
    pub fn from_array(data: Array2<u8>) -> DetectResult<Self> {
        let (h, w) = data.dim();
        if h == 0 || w == 0 {
            return Err(DetectError::EmptyImage);
        }
        let ans = Self { data };
        ans.as_immut().validate()?;
        Ok(ans)
    }

    /// 创建全背景标签图.
    pub fn background((h, w): Idx2d) -> Self {
        Self {
            data: Array2::from_elem((h, w), BACKGROUND),
        }
    }

    /// 获得不可变视图.
    #[inline]
    pub fn as_immut(&self) -> LabelView<'_> {
        LabelView::new(self.data.view())
    }

    /// 获得可变视图.
    #[inline]
    pub fn as_mutable(&mut self) -> LabelViewMut<'_> {
        LabelViewMut::new(self.data.view_mut())
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array2<u8> {
        self.data
    }
}

impl Index<Idx2d> for OwnedLabelMap {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::OwnedLabelMap;
    use crate::consts::label::*;
    use crate::testing::{paint_rect, roi_rect};
    use crate::{DetectError, RoiMask};

    #[test]
    fn test_region_outside_roi_is_background() {
        let mut map = OwnedLabelMap::background((12, 12));
        let mut m = map.as_mutable();
        paint_rect(&mut m, (0, 0), (12, 12), DRUSEN);
        paint_rect(&mut m, (4, 4), (4, 4), OD);
        let roi = roi_rect((12, 12), (2, 2), (8, 8));

        for code in [BACKGROUND, DRUSEN, OD, MASKED] {
            let region = map.as_immut().region(code, &roi).unwrap();
            for (pos, &v) in region.indexed_iter() {
                if !roi.contains(pos) {
                    assert_eq!(v, BACKGROUND);
                }
            }
        }
    }

    #[test]
    fn test_region_keeps_only_target() {
        let mut map = OwnedLabelMap::background((6, 6));
        let mut m = map.as_mutable();
        paint_rect(&mut m, (0, 0), (2, 2), DRUSEN);
        paint_rect(&mut m, (3, 3), (2, 2), HAEMORAGE);
        let roi = RoiMask::full((6, 6));

        let region = map.as_immut().region(DRUSEN, &roi).unwrap();
        assert_eq!(region.iter().filter(|p| **p == DRUSEN).count(), 4);
        assert_eq!(region.iter().filter(|p| **p == HAEMORAGE).count(), 0);

        let binary = map.as_immut().region_binary(HAEMORAGE, &roi).unwrap();
        assert_eq!(binary.iter().filter(|p| **p == u8::MAX).count(), 4);
        // 原图不变
        assert_eq!(map.as_immut().count(HAEMORAGE), 4);
    }

    #[test]
    fn test_region_shape_mismatch() {
        let map = OwnedLabelMap::background((4, 5));
        let roi = RoiMask::full((5, 4));
        assert!(matches!(
            map.as_immut().region(DRUSEN, &roi),
            Err(DetectError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_array_rejects_unknown_codes() {
        let data = ndarray::Array2::from_elem((2, 2), 42u8);
        assert!(matches!(
            OwnedLabelMap::from_array(data),
            Err(DetectError::UnknownLabel(42))
        ));
        let empty = ndarray::Array2::<u8>::zeros((0, 3));
        assert!(matches!(
            OwnedLabelMap::from_array(empty),
            Err(DetectError::EmptyImage)
        ));
    }

    #[test]
    fn test_mirror_tracks_changes() {
        let mut map = OwnedLabelMap::background((3, 3));
        let before = map.as_immut().mirror();
        let mut m = map.as_mutable();
        m.fill_batch([(0, 0), (2, 2)], MASKED);
        assert_eq!(m.count(MASKED), 2);
        assert_eq!(before.diff_count(&map.as_immut().mirror()), Some(2));
        let other = OwnedLabelMap::background((2, 2)).as_immut().mirror();
        assert_eq!(before.diff_count(&other), None);
    }
}
