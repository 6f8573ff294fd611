//! 二维形态学操作.
//!
//! 腐蚀取结构元覆盖范围内的最小值, 膨胀取最大值; 越界的邻居一律忽略.
//! 因此开运算等价于 "所有能完整放入前景的 (被图像边界裁剪的) 结构元之并",
//! 无论灰度还是二值, 开运算都是幂等的.

mod kernel;

pub use kernel::StructElem;

use crate::consts::label::BACKGROUND;
use crate::region::offset;
use itertools::Itertools;
use ndarray::{Array2, ArrayView2, Zip};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 对整张标签图做开运算的方式.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpeningMode {
    /// 每个非背景类别各自作为二值掩膜做开运算, 再合并.
    /// 未被任何类别保留的像素成为背景.
    ///
    /// 相邻的不同类别小区域不会互相影响.
    #[default]
    PerClass,

    /// 把整张多值标签图当作灰度图做开运算 (旧行为).
    ///
    /// 结果依赖于标签编码的数值大小: 细小的大编码区域会被相邻的小编码区域吞并.
    Grayscale,
}

/// 灰度腐蚀: 每个像素取结构元覆盖范围内 (忽略越界) 的最小值.
pub fn erode(data: ArrayView2<u8>, elem: &StructElem) -> Array2<u8> {
    let shape = data.dim();
    let offsets = elem.offsets();
    let mut out = Array2::zeros(shape);
    Zip::indexed(&mut out).for_each(|pos, o| {
        *o = offsets
            .iter()
            .filter_map(|d| offset(pos, *d, shape))
            .map(|p| data[p])
            .min()
            .unwrap_or(data[pos]);
    });
    out
}

/// 灰度膨胀: 每个像素取反射结构元覆盖范围内 (忽略越界) 的最大值.
pub fn dilate(data: ArrayView2<u8>, elem: &StructElem) -> Array2<u8> {
    let shape = data.dim();
    let reflected = elem
        .offsets()
        .into_iter()
        .map(|(dh, dw)| (-dh, -dw))
        .collect_vec();
    let mut out = Array2::zeros(shape);
    Zip::indexed(&mut out).for_each(|pos, o| {
        *o = reflected
            .iter()
            .filter_map(|d| offset(pos, *d, shape))
            .map(|p| data[p])
            .max()
            .unwrap_or(data[pos]);
    });
    out
}

/// 灰度开运算, 即先腐蚀后膨胀.
pub fn open_grayscale(data: ArrayView2<u8>, elem: &StructElem) -> Array2<u8> {
    let eroded = erode(data, elem);
    dilate(eroded.view(), elem)
}

/// 二值开运算. `mask` 非零为前景, 返回 `255` / `0` 指示.
pub fn open_binary(mask: ArrayView2<u8>, elem: &StructElem) -> Array2<u8> {
    let binary = mask.mapv(|p| if p != 0 { u8::MAX } else { 0 });
    open_grayscale(binary.view(), elem)
}

/// 逐类别开运算.
///
/// 对每个出现过的非背景编码, 提取其二值掩膜做开运算; 被保留的像素恢复原编码.
/// 由于每个类别的开运算结果都是其原掩膜的子集, 各类别结果互不重叠.
pub fn open_per_class(data: ArrayView2<u8>, elem: &StructElem) -> Array2<u8> {
    let mut out = Array2::from_elem(data.dim(), BACKGROUND);
    let classes = data
        .iter()
        .copied()
        .filter(|p| *p != BACKGROUND)
        .unique()
        .sorted()
        .collect_vec();
    for class in classes {
        let mask = data.mapv(|p| if p == class { u8::MAX } else { 0 });
        let opened = open_grayscale(mask.view(), elem);
        Zip::from(&mut out).and(&opened).for_each(|o, &kept| {
            if kept != 0 {
                *o = class;
            }
        });
    }
    out
}

/// 按 `mode` 对整张标签图做开运算.
pub fn open(data: ArrayView2<u8>, elem: &StructElem, mode: OpeningMode) -> Array2<u8> {
    match mode {
        OpeningMode::PerClass => open_per_class(data, elem),
        OpeningMode::Grayscale => open_grayscale(data, elem),
    }
}
