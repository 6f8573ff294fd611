//! 邻域与连通域标记.

use crate::morph::StructElem;
use crate::{Area2d, Areas2d, Idx2d};
use ndarray::{Array2, ArrayView2};
use std::collections::VecDeque;

/// 获得 `(h, w)` 的 4-邻居索引. 不检查越界.
#[inline]
pub(crate) fn neighbour4((h, w): Idx2d) -> [Idx2d; 4] {
    [
        (h.wrapping_sub(1), w),
        (h.saturating_add(1), w),
        (h, w.wrapping_sub(1)),
        (h, w.saturating_add(1)),
    ]
}

/// `pos` 偏移 `(dh, dw)` 后的索引. 越界时返回 `None`.
#[inline]
pub(crate) fn offset((h, w): Idx2d, (dh, dw): (isize, isize), (h_len, w_len): Idx2d) -> Option<Idx2d> {
    let nh = h.checked_add_signed(dh)?;
    let nw = w.checked_add_signed(dw)?;
    (nh < h_len && nw < w_len).then_some((nh, nw))
}

/// 一次连通域标记的结果.
///
/// 连通域按其第一个像素的行优先顺序从 1 开始编号, 0 号保留给背景.
/// 每个连通域内的像素也按发现顺序保存, 第一个像素即该连通域行优先意义下的首个像素.
#[derive(Clone, Debug)]
pub struct Components {
    index: Array2<u32>,
    areas: Areas2d,
    background: usize,
}

impl Components {
    /// 对 `mask` 的非零像素做连通域标记. 两个前景像素相邻,
    /// 当且仅当其中一个落在以另一个为锚点的结构元 `elem` 之内.
    ///
    /// `elem` 应当是中心对称的 (方形结构元总是如此).
    pub fn label(mask: ArrayView2<u8>, elem: &StructElem) -> Self {
        let shape = mask.dim();
        let offsets: Vec<(isize, isize)> = elem
            .offsets()
            .into_iter()
            .filter(|d| *d != (0, 0))
            .collect();
        let mut index = Array2::<u32>::zeros(shape);
        let mut areas = Areas2d::with_capacity(4);
        let mut bfs_q = VecDeque::with_capacity(16);
        let mut background = 0usize;

        for (pos, &pix) in mask.indexed_iter() {
            if pix == 0 {
                background += 1;
                continue;
            }
            if index[pos] != 0 {
                continue;
            }
            let id = areas.len() as u32 + 1;
            index[pos] = id;
            bfs_q.push_back(pos);
            let mut this_area = Area2d::with_capacity(1);
            while let Some(cur) = bfs_q.pop_front() {
                this_area.push(cur);
                for next in offsets.iter().filter_map(|d| offset(cur, *d, shape)) {
                    if mask[next] != 0 && index[next] == 0 {
                        index[next] = id;
                        bfs_q.push_back(next);
                    }
                }
            }
            areas.push(this_area);
        }

        Self {
            index,
            areas,
            background,
        }
    }

    /// 前景连通域个数 (不含背景).
    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// 是否不存在前景连通域?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// 连通域编号网格, 0 为背景.
    #[inline]
    pub fn index(&self) -> ArrayView2<u32> {
        self.index.view()
    }

    /// 各编号的像素个数, 下标即编号. 0 号为背景像素个数.
    pub fn sizes(&self) -> Vec<usize> {
        std::iter::once(self.background)
            .chain(self.areas.iter().map(Vec::len))
            .collect()
    }

    /// 编号为 `id` 的连通域像素个数. `id` 为 0 或越界时返回 0.
    #[inline]
    pub fn size(&self, id: usize) -> usize {
        self.area(id).map_or(0, <[Idx2d]>::len)
    }

    /// 编号为 `id` (从 1 开始) 的连通域像素集合.
    #[inline]
    pub fn area(&self, id: usize) -> Option<&[Idx2d]> {
        id.checked_sub(1)
            .and_then(|i| self.areas.get(i))
            .map(Vec::as_slice)
    }

    /// 迭代所有 `(编号, 像素集合)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Idx2d])> + '_ {
        self.areas
            .iter()
            .enumerate()
            .map(|(i, area)| (i + 1, area.as_slice()))
    }

    /// 面积最大的连通域编号. 并列时取编号最小者. 不存在前景时返回 `None`.
    pub fn largest(&self) -> Option<usize> {
        self.largest_except(None)
    }

    /// 除 `except` 以外面积最大的连通域编号. 并列时取编号最小者.
    pub fn largest_except(&self, except: Option<usize>) -> Option<usize> {
        self.iter()
            .filter(|(id, _)| Some(*id) != except)
            .fold(None, |best: Option<(usize, usize)>, (id, area)| match best {
                Some((_, len)) if len >= area.len() => best,
                _ => Some((id, area.len())),
            })
            .map(|(id, _)| id)
    }

    /// 每个连通域的首个像素 (行优先).
    pub fn seeds(&self) -> Vec<Idx2d> {
        self.areas.iter().filter_map(|a| a.first().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{neighbour4, offset, Components};
    use crate::morph::StructElem;
    use ndarray::{array, Array2};

    #[test]
    fn test_square_5_bridges_two_pixel_gap() {
        // 两块之间隔了一列空白, 切比雪夫距离为 2.
        let mask = array![
            [1u8, 0, 1, 0, 0, 0, 1],
            [1, 0, 1, 0, 0, 0, 0],
        ];
        let c5 = Components::label(mask.view(), &StructElem::square(5).unwrap());
        assert_eq!(c5.len(), 2);
        assert_eq!(c5.sizes(), vec![9, 4, 1]);

        let c3 = Components::label(mask.view(), &StructElem::square(3).unwrap());
        assert_eq!(c3.len(), 3);
    }

    #[test]
    fn test_components_numbered_row_major() {
        let mut mask = Array2::<u8>::zeros((10, 10));
        mask[(7, 1)] = 255;
        mask[(1, 8)] = 255;
        mask[(1, 9)] = 255;
        let c = Components::label(mask.view(), &StructElem::square(3).unwrap());
        assert_eq!(c.len(), 2);
        assert_eq!(c.index()[(1, 8)], 1);
        assert_eq!(c.index()[(7, 1)], 2);
        assert_eq!(c.seeds(), vec![(1, 8), (7, 1)]);
        assert_eq!(c.largest(), Some(1));
        assert_eq!(c.largest_except(Some(1)), Some(2));
    }

    #[test]
    fn test_largest_tie_takes_first() {
        let mask = array![[1u8, 0, 0, 1]];
        let c = Components::label(mask.view(), &StructElem::square(3).unwrap());
        assert_eq!(c.largest(), Some(1));
        assert_eq!(c.largest_except(Some(1)), Some(2));
        assert_eq!(c.largest_except(Some(2)), Some(1));
    }

    #[test]
    fn test_empty_mask_has_no_components() {
        let mask = Array2::<u8>::zeros((4, 4));
        let c = Components::label(mask.view(), &StructElem::square(5).unwrap());
        assert!(c.is_empty());
        assert_eq!(c.largest(), None);
        assert_eq!(c.sizes(), vec![16]);
        assert_eq!(c.size(0), 0);
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(offset((0, 0), (-1, 0), (3, 3)), None);
        assert_eq!(offset((2, 2), (0, 1), (3, 3)), None);
        assert_eq!(offset((1, 1), (1, -1), (3, 3)), Some((2, 0)));
        assert_eq!(neighbour4((1, 1)).len(), 4);
    }
}
