//! # 位-像素编解码模块
//!
//! 用通道值的奇偶性表示 1 bit：奇数为 1，偶数为 0。
//! 一个字符的 8 bit (高位在前) 依次写入 3 个连续像素的前 8 个 RGB 通道，
//! 第 3 个像素的蓝色通道不参与编码。

use crate::constants::BITS_PER_UNIT;
use crate::grid::Pixel;

/// 将通道值调整为奇偶性等于 `bit` 的最近值。
///
/// 奇偶性已符合时原样返回；否则加 1，在 255 处改为减 1；
/// 对应地，清零时减 1，在 0 处改为加 1。变化量始终不超过 1。
pub fn write_bit(value: u8, bit: bool) -> u8 {
    if read_bit(value) == bit {
        return value;
    }
    match (bit, value) {
        (true, u8::MAX) => value - 1,
        (true, _) => value + 1,
        (false, 0) => value + 1,
        (false, _) => value - 1,
    }
}

/// 通道值的最低有效位。
pub fn read_bit(value: u8) -> bool {
    value & 1 == 1
}

/// 将 `code` 按高位在前写入一个编码单元。
///
/// `unit` 应为 3 个像素；只修改前 8 个通道，其余通道保持不变。
pub fn embed_unit(code: u8, unit: &mut [Pixel]) {
    unit.iter_mut()
        .flat_map(|pixel| pixel.iter_mut())
        .take(BITS_PER_UNIT)
        .enumerate()
        .for_each(|(i, channel)| {
            let bit = (code >> (BITS_PER_UNIT - 1 - i)) & 1 == 1;
            *channel = write_bit(*channel, bit);
        });
}

/// 从一个编码单元的前 8 个通道读出字符码 (高位在前)。
pub fn extract_unit(unit: &[Pixel]) -> u8 {
    unit.iter()
        .flat_map(|pixel| pixel.iter())
        .take(BITS_PER_UNIT)
        .fold(0u8, |code, &channel| (code << 1) | u8::from(read_bit(channel)))
}
