//! 带显式阻挡集合的受限泛洪.

use crate::region::neighbour4;
use crate::Idx2d;
use ndarray::{Array2, ArrayView2};
use std::collections::VecDeque;

/// 从 `seed` 出发, 以 4-相邻规则泛洪, 返回所有到达的像素 (行优先顺序).
///
/// - `blocked` 为真的像素永远不可到达, 泛洪在此停止;
/// - `core` 为真的像素可以任意穿越;
/// - 其它像素只能在离开最近一个 `core` 像素后的 `bleed` 步之内到达.
///
/// `seed` 本身被阻挡或越界时返回空集合. 阻挡集合在泛洪开始前一次性给定,
/// 与标签编码的数值大小无关.
pub fn bounded_flood(
    core: ArrayView2<bool>,
    blocked: ArrayView2<bool>,
    seed: Idx2d,
    bleed: u32,
) -> Vec<Idx2d> {
    assert_eq!(core.dim(), blocked.dim(), "阻挡集合与核心集合形状不符");
    if !matches!(blocked.get(seed), Some(false)) {
        return vec![];
    }

    // 距最近核心像素的步数.
    let mut dist = Array2::from_elem(core.dim(), u32::MAX);
    let mut q = VecDeque::with_capacity(16);
    dist[seed] = if core[seed] { 0 } else { 1 };
    if dist[seed] > bleed {
        return vec![];
    }
    q.push_back(seed);

    while let Some(cur) = q.pop_front() {
        let d = dist[cur];
        for next in neighbour4(cur) {
            let Some(&false) = blocked.get(next) else {
                continue;
            };
            let nd = if core[next] { 0 } else { d + 1 };
            if nd > bleed || nd >= dist[next] {
                continue;
            }
            dist[next] = nd;
            // 保持队列单调: 核心像素距离为 0, 放在队首.
            if nd == 0 {
                q.push_front(next);
            } else {
                q.push_back(next);
            }
        }
    }

    dist.indexed_iter()
        .filter_map(|(pos, d)| (*d != u32::MAX).then_some(pos))
        .collect()
}
