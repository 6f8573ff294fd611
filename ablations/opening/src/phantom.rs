//! 合成眼底标签图.

use fundus_berry::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 一张合成标签图.
pub struct Phantom {
    /// 真值: 视盘, 病灶, 血管.
    pub truth: OwnedLabelMap,

    /// 在真值上撒了零星噪声像素的标签图, 模拟分类器输出.
    pub noisy: OwnedLabelMap,
}

impl Phantom {
    /// 真值中是否存在病灶?
    pub fn has_lesion(&self) -> bool {
        let v = self.truth.as_immut();
        v.count(DRUSEN) + v.count(HAEMORAGE) > 0
    }
}

/// 矩形区域的全部索引.
fn rect((top, left): Idx2d, (h, w): Idx2d) -> impl Iterator<Item = Idx2d> {
    (top..top + h).flat_map(move |r| (left..left + w).map(move |c| (r, c)))
}

/// 随机放置一个 `h * w` 的矩形, 保证不越界.
fn random_rect(rng: &mut StdRng, (h_len, w_len): Idx2d, (h, w): Idx2d) -> impl Iterator<Item = Idx2d> {
    let top = rng.random_range(0..h_len - h);
    let left = rng.random_range(0..w_len - w);
    rect((top, left), (h, w))
}

fn one(rng: &mut StdRng, shape: Idx2d) -> Phantom {
    let (h_len, w_len) = shape;
    let mut truth = OwnedLabelMap::background(shape);
    let mut m = truth.as_mutable();

    // 视盘.
    let r = rng.random_range(15..30usize);
    let (ch, cw) = (rng.random_range(r..h_len - r), rng.random_range(r..w_len - r));
    let disc = m
        .pos_iter()
        .filter(|&(h, w)| h.abs_diff(ch).pow(2) + w.abs_diff(cw).pow(2) <= r * r)
        .collect::<Vec<_>>();
    m.fill_batch(disc, OD);

    // 约五分之一的图像不含病灶.
    if rng.random_bool(0.8) {
        for _ in 0..rng.random_range(2..8) {
            let size = (rng.random_range(5..14), rng.random_range(5..14));
            let it = random_rect(rng, shape, size);
            m.fill_batch(it, DRUSEN);
        }
        for _ in 0..rng.random_range(2..8) {
            let size = (rng.random_range(5..14), rng.random_range(5..14));
            let it = random_rect(rng, shape, size);
            m.fill_batch(it, HAEMORAGE);
        }
    }

    // 细血管横穿整张图像, 可能切开病灶.
    for _ in 0..rng.random_range(1..4) {
        let width = rng.random_range(1..4);
        let it = if rng.random_bool(0.5) {
            rect((rng.random_range(0..h_len - width), 0), (width, w_len))
        } else {
            rect((0, rng.random_range(0..w_len - width)), (h_len, width))
        };
        m.fill_batch(it.collect::<Vec<_>>(), BLOOD_VESSEL);
    }

    let mut noisy = truth.clone();
    let mut n = noisy.as_mutable();
    let salt = (h_len * w_len) / 200;
    for _ in 0..salt {
        let pos = (rng.random_range(0..h_len), rng.random_range(0..w_len));
        n[pos] = [DRUSEN, HAEMORAGE, CAMERA_HUE][rng.random_range(0..3)];
    }

    Phantom { truth, noisy }
}

/// 以固定种子生成 `count` 张 `shape` 大小的合成标签图.
pub fn generate(seed: u64, count: usize, shape: Idx2d) -> Vec<Phantom> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| one(&mut rng, shape)).collect()
}

#[cfg(test)]
mod tests {
    use super::generate;
    use fundus_berry::prelude::*;

    #[test]
    fn test_same_seed_same_phantoms() {
        let a = generate(7, 4, (96, 96));
        let b = generate(7, 4, (96, 96));
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.truth, y.truth);
            assert_eq!(x.noisy, y.noisy);
            assert!(x.truth.as_immut().validate().is_ok());
            assert!(x.truth.as_immut().count(OD) > 0);
        }
    }
}
