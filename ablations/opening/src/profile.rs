//! 算法运行统计.

use std::time::{Duration, Instant};

/// 可累加的计时器.
#[derive(Clone, Debug)]
struct AccTimer {
    consumed: Duration,
    since: Instant,
}

impl AccTimer {
    /// 初始化计时器, 并视为已经开始计时.
    #[inline]
    fn new() -> Self {
        Self {
            consumed: Duration::ZERO,
            since: Instant::now(),
        }
    }

    /// 开始计时.
    #[inline]
    fn start(&mut self) {
        self.since = Instant::now();
    }

    /// 结束计时, 并将这一区间的时间累加. 返回本轮计时时长.
    #[inline]
    fn elapsed(&mut self) -> Duration {
        let d = self.since.elapsed();
        self.consumed += d;
        d
    }

    /// 累计时间 (微秒).
    #[inline]
    fn total_us(&self) -> u64 {
        self.consumed.as_micros() as u64
    }
}

/// 一种开运算方式在全部合成图像上的统计.
#[derive(Clone, Debug)]
pub struct Profile {
    /// 不含病灶的图像个数.
    trivial: u64,

    /// 含病灶的图像个数.
    target: u64,

    /// 开运算本身花费的总时间.
    opening_time: AccTimer,

    /// 整个任务花费的总时间.
    real_time: AccTimer,

    /// 最耗时的一次开运算.
    most: Option<Duration>,

    /// 开运算改变的像素总数.
    changed: u64,

    /// 真值为病灶, 但开运算后类别不再相同的像素总数.
    lesion_lost: u64,

    /// 开运算后仍然保留的噪声像素总数.
    noise_left: u64,

    /// 开运算后被赋予了真值中另一个非背景类别的像素总数.
    crosstalk: u64,
}

impl Profile {
    /// 初始化.
    pub fn new() -> Self {
        Self {
            trivial: 0,
            target: 0,
            opening_time: AccTimer::new(),
            real_time: AccTimer::new(),
            most: None,
            changed: 0,
            lesion_lost: 0,
            noise_left: 0,
            crosstalk: 0,
        }
    }

    /// 记录一张图像. `has_lesion` 表明真值是否含病灶.
    #[inline]
    pub fn count_image(&mut self, has_lesion: bool) {
        if has_lesion {
            self.target += 1;
        } else {
            self.trivial += 1;
        }
    }

    /// 开始一次开运算计时.
    #[inline]
    pub fn opening_start(&mut self) {
        self.opening_time.start();
    }

    /// 结束一次开运算计时.
    #[inline]
    pub fn opening_elapsed(&mut self) {
        let d = self.opening_time.elapsed();
        self.most = Some(self.most.map_or(d, |m| m.max(d)));
    }

    /// 累加一张图像的像素统计.
    #[inline]
    pub fn count_pixels(&mut self, changed: usize, lesion_lost: usize, noise_left: usize, crosstalk: usize) {
        self.changed += changed as u64;
        self.lesion_lost += lesion_lost as u64;
        self.noise_left += noise_left as u64;
        self.crosstalk += crosstalk as u64;
    }

    /// 结束全部计时.
    #[inline]
    pub fn finish(mut self) -> Self {
        self.real_time.elapsed();
        self
    }

    /// 图像总数.
    #[inline]
    pub fn images(&self) -> u64 {
        self.trivial + self.target
    }

    /// 不含病灶的图像个数.
    #[inline]
    pub fn trivial(&self) -> u64 {
        self.trivial
    }

    /// 开运算总耗时 (微秒).
    #[inline]
    pub fn opening_time_us(&self) -> u64 {
        self.opening_time.total_us()
    }

    /// 任务总耗时 (微秒).
    #[inline]
    pub fn real_time_us(&self) -> u64 {
        self.real_time.total_us()
    }

    /// 平均每张图像的开运算耗时 (微秒).
    pub fn avg_opening_time_us(&self) -> Option<f64> {
        match self.images() {
            0 => None,
            n => Some(self.opening_time_us() as f64 / n as f64),
        }
    }

    /// 最耗时的一次开运算. 没有任何图像时返回 `None`.
    #[inline]
    pub fn most_time_consuming(&self) -> Option<Duration> {
        self.most
    }

    /// 改变的像素总数.
    #[inline]
    pub fn changed(&self) -> u64 {
        self.changed
    }

    /// 病灶损失像素总数.
    #[inline]
    pub fn lesion_lost(&self) -> u64 {
        self.lesion_lost
    }

    /// 残留噪声像素总数.
    #[inline]
    pub fn noise_left(&self) -> u64 {
        self.noise_left
    }

    /// 类别串扰像素总数.
    #[inline]
    pub fn crosstalk(&self) -> u64 {
        self.crosstalk
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}
