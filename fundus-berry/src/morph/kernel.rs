use crate::error::{DetectError, DetectResult};
use itertools::iproduct;
use ndarray::Array2;

/// 结构元. 锚点固定在中心, 因此边长必须为正奇数.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructElem {
    cells: Array2<bool>,
}

impl StructElem {
    /// `size * size` 的全 1 方形结构元.
    ///
    /// 用作连通域标记时, 两个像素的切比雪夫距离不超过 `size / 2` 即视为相邻.
    pub fn square(size: usize) -> DetectResult<Self> {
        check_size(size)?;
        Ok(Self {
            cells: Array2::from_elem((size, size), true),
        })
    }

    /// `size * size` 的椭圆结构元, 与 OpenCV `MORPH_ELLIPSE` 的构造方式相同.
    ///
    /// 例如 5 * 5 椭圆:
    ///
    /// ```text
    /// . . # . .
    /// # # # # #
    /// # # # # #
    /// # # # # #
    /// . . # . .
    /// ```
    pub fn ellipse(size: usize) -> DetectResult<Self> {
        check_size(size)?;
        let r = (size / 2) as f64;
        let c = (size / 2) as i64;
        let mut cells = Array2::from_elem((size, size), false);
        if r == 0.0 {
            cells[(0, 0)] = true;
            return Ok(Self { cells });
        }
        for row in 0..size {
            let dy = row as f64 - r;
            let dx = (r * ((r * r - dy * dy) / (r * r)).sqrt()).round() as i64;
            let lo = (c - dx).max(0) as usize;
            let hi = ((c + dx + 1) as usize).min(size);
            for col in lo..hi {
                cells[(row, col)] = true;
            }
        }
        Ok(Self { cells })
    }

    /// 边长.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.dim().0
    }

    /// 半径, 即 `size / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size() / 2
    }

    /// 位置 `(row, col)` 是否属于结构元.
    #[inline]
    pub fn contains(&self, pos: (usize, usize)) -> bool {
        self.cells.get(pos).copied().unwrap_or(false)
    }

    /// 相对锚点的全部偏移量 `(dh, dw)`, 行优先.
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let n = self.size();
        let r = self.radius() as isize;
        iproduct!(0..n, 0..n)
            .filter(|pos| self.cells[*pos])
            .map(|(h, w)| (h as isize - r, w as isize - r))
            .collect()
    }
}

fn check_size(size: usize) -> DetectResult<()> {
    if size % 2 == 1 {
        Ok(())
    } else {
        Err(DetectError::InvalidKernel(size))
    }
}
