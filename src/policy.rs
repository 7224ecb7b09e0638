//! 策略热力图：把九个格子的评估值映射为背景色

use crate::color::Rgb;
use crate::error::GuiError;
use crate::models::CELLS;

/// 绝对值低于此阈值的格子显示为中性灰
pub const NEUTRAL_THRESHOLD: f64 = 1e-2;

/// 以有限值的均值为中心、按最大绝对值缩放到 [-1, 1]；非有限值置 0
pub fn normalize(values: &[f64]) -> Result<[f64; CELLS], GuiError> {
    let mut q: [f64; CELLS] = values
        .try_into()
        .map_err(|_| GuiError::InvalidPolicyLength(values.len()))?;

    let finite: Vec<usize> = (0..CELLS).filter(|&i| q[i].is_finite()).collect();
    if !finite.is_empty() {
        let mean = finite.iter().map(|&i| q[i]).sum::<f64>() / finite.len() as f64;
        for &i in &finite {
            q[i] -= mean;
        }

        let min = finite.iter().map(|&i| q[i]).fold(f64::INFINITY, f64::min);
        let max = finite.iter().map(|&i| q[i]).fold(f64::NEG_INFINITY, f64::max);
        let max_scale = min.abs().max(max);
        if max_scale > 0.0 {
            for &i in &finite {
                q[i] /= max_scale;
            }
        }
    }

    for v in q.iter_mut().filter(|v| !v.is_finite()) {
        *v = 0.0;
    }
    Ok(q)
}

/// 单个归一化值对应的颜色
pub fn heat_color(q: f64) -> Rgb {
    if q.abs() < NEUTRAL_THRESHOLD {
        Rgb::NEUTRAL_GRAY
    } else if q > 0.0 {
        Rgb::green(q)
    } else {
        Rgb::red(-q)
    }
}

/// 九个格子的热力图颜色（行优先）
pub fn heat_colors(values: &[f64]) -> Result<[Rgb; CELLS], GuiError> {
    let q = normalize(values)?;
    Ok(q.map(heat_color))
}
