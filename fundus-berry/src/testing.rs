//! 单元测试共用的合成数据构造工具.

use crate::{Idx2d, LabelViewMut, RoiMask};
use ndarray::{s, Array2};

/// 把左上角为 `(top, left)`, 大小为 `(h, w)` 的矩形区域涂成 `code`.
pub(crate) fn paint_rect(map: &mut LabelViewMut<'_>, (top, left): Idx2d, (h, w): Idx2d, code: u8) {
    map.array_view_mut()
        .slice_mut(s![top..top + h, left..left + w])
        .fill(code);
}

/// 只有矩形区域有效的 ROI 掩膜.
pub(crate) fn roi_rect(shape: Idx2d, (top, left): Idx2d, (h, w): Idx2d) -> RoiMask {
    let mut data = Array2::<u8>::zeros(shape);
    data.slice_mut(s![top..top + h, left..left + w]).fill(1);
    RoiMask::from_array(data.view()).unwrap()
}

/// 以 `(ch, cw)` 为中心, `r` 为半径的实心圆盘像素.
pub(crate) fn disc_pixels(shape: Idx2d, (ch, cw): Idx2d, r: usize) -> Vec<Idx2d> {
    let r2 = (r * r) as isize;
    ndarray::indices(shape)
        .into_iter()
        .filter(|&(h, w)| {
            let dh = h as isize - ch as isize;
            let dw = w as isize - cw as isize;
            dh * dh + dw * dw <= r2
        })
        .collect()
}
