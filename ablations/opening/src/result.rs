//! 实验结果.

use crate::profile::Profile;
use std::io::{self, Write};

const SEP: &str = "--------------------------------------------------------";

/// 将 `p` 的结果写进 `w` 中.
fn describe_into<W: Write>(name: &str, p: &Profile, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn f64_to_display(f: Option<f64>) -> String {
        match f {
            Some(f) => format!("{f:.3}"),
            None => "/".to_string(),
        }
    }

    #[inline]
    fn per_image(total: u64, images: u64) -> Option<f64> {
        (images != 0).then(|| total as f64 / images as f64)
    }

    let n = p.images();
    writeln!(w, "Profile `{name}`:")?;
    writeln!(w, "{S4}Images: {n} ({} without lesions)", p.trivial())?;
    writeln!(w, "{S4}Changed pixels: {}", p.changed())?;
    writeln!(
        w,
        "{S4}Lesion pixels lost: {} ({} per image)",
        p.lesion_lost(),
        f64_to_display(per_image(p.lesion_lost(), n))
    )?;
    writeln!(
        w,
        "{S4}Noise pixels left: {} ({} per image)",
        p.noise_left(),
        f64_to_display(per_image(p.noise_left(), n))
    )?;
    writeln!(w, "{S4}Cross-class pixels: {}", p.crosstalk())?;
    writeln!(w, "{S4}Opening total time: {} us", p.opening_time_us())?;
    writeln!(
        w,
        "{S4}Opening average time: {} us",
        f64_to_display(p.avg_opening_time_us())
    )?;
    writeln!(w, "{S4}Total machine time: {} us", p.real_time_us())?;
    let t = p.most_time_consuming().map(|d| d.as_micros() as f64);
    write!(w, "{S4}Most time-consuming opening costs {} us", f64_to_display(t))?;
    Ok(())
}

/// 消融实验最终结果.
pub struct AblationResult {
    data: Vec<(&'static str, Profile)>,
}

impl AblationResult {
    pub fn from_iter<I: IntoIterator<Item = (&'static str, Profile)>>(it: I) -> Self {
        Self {
            data: it.into_iter().collect(),
        }
    }

    /// 输出全部结果.
    pub fn analyze(&self) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if let Err(e) = self.write_to(&mut lock) {
            log::error!("Failed to write ablation report: {e}");
        }
    }

    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{SEP}")?;
        for (key, profile) in self.data.iter() {
            describe_into(key, profile, w)?;
            writeln!(w)?;
            writeln!(w, "{SEP}")?;
        }
        Ok(())
    }
}
