//! # 容量检查模块
//!
//! 只依赖图像宽高与消息长度，在编码器修改任何像素之前判断图像是否足够大。

use crate::constants::PIXELS_PER_UNIT;
use crate::error::{Result, StegoError};

/// 隐藏 `message_len` 个字符 (另加 1 个结束标记) 所需的像素数。
pub fn required_pixels(message_len: usize) -> usize {
    message_len
        .saturating_add(1)
        .saturating_mul(PIXELS_PER_UNIT)
}

/// `width x height` 的图像最多能隐藏的字符数 (不含结束标记)。
pub fn max_message_len(width: u32, height: u32) -> usize {
    (available_pixels(width, height) / PIXELS_PER_UNIT).saturating_sub(1)
}

fn available_pixels(width: u32, height: u32) -> usize {
    (width as usize).saturating_mul(height as usize)
}

/// 检查 `width x height` 的图像能否容纳 `message_len` 个字符。
///
/// # Errors
///
/// 像素不足时返回 [`StegoError::Capacity`]，携带所需与可用的像素数。
pub fn check(width: u32, height: u32, message_len: usize) -> Result<()> {
    let needed = required_pixels(message_len);
    let available = available_pixels(width, height);
    if available < needed {
        return Err(StegoError::Capacity { needed, available });
    }
    Ok(())
}
