//! 程序运行函数.

use crate::phantom::Phantom;
use crate::profile::Profile;
use crate::result::AblationResult;
use fundus_berry::post_proc;
use fundus_berry::prelude::*;
use log::{info, warn};
use std::thread;

/// 统计一张图像开运算前后的像素变化: (病灶损失, 残留噪声, 类别串扰).
fn compare(p: &Phantom, out: &LabelView<'_>) -> (usize, usize, usize) {
    let truth = p.truth.as_immut();
    let noisy = p.noisy.as_immut();
    let mut ans = (0, 0, 0);
    for ((pos, &t), &o) in truth.indexed_iter().zip(out.iter()) {
        let n = noisy[pos];
        if matches!(t, DRUSEN | HAEMORAGE) && o != t {
            ans.0 += 1;
        }
        if n != t && o == n {
            ans.1 += 1;
        }
        if t != BACKGROUND && o != BACKGROUND && o != t {
            ans.2 += 1;
        }
    }
    ans
}

/// 以 `mode` 清理全部合成图像.
fn opening(phantoms: &[Phantom], mode: OpeningMode) -> Profile {
    let mut profile = Profile::new();
    for (i, p) in phantoms.iter().enumerate() {
        profile.count_image(p.has_lesion());
        let mut map = p.noisy.clone();

        profile.opening_start();
        let changed = post_proc::clean(&mut map.as_mutable(), mode);
        profile.opening_elapsed();

        match changed {
            Ok(changed) => {
                let (lost, left, cross) = compare(p, &map.as_immut());
                profile.count_pixels(changed, lost, left, cross);
            }
            Err(e) => warn!("{mode:?}: phantom {i} failed: {e}"),
        }
    }
    profile.finish()
}

/// 实际运行. 两种开运算方式各占一个线程.
pub fn run(phantoms: &[Phantom]) -> AblationResult {
    info!("Running ablation studies...");
    thread::scope(|s| {
        let modes = [OpeningMode::PerClass, OpeningMode::Grayscale];
        let handles = modes.map(|m| s.spawn(move || opening(phantoms, m)));

        AblationResult::from_iter(
            ["per-class", "grayscale"].into_iter().zip(
                handles
                    .into_iter()
                    .map(|th| th.join().expect("Thread joining error")),
            ),
        )
    })
}
