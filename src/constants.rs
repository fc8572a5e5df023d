/// 每个编码单元 (一个字符) 占用的像素数。
/// 3 个像素提供 9 个 RGB 通道，前 8 个通道各承载 1 bit，
/// 第 3 个像素的蓝色通道保持不变。
pub const PIXELS_PER_UNIT: usize = 3;

/// 每个编码单元承载的 bit 数，即一个 8 位字符码。
pub const BITS_PER_UNIT: usize = 8;

/// 消息结束标记 (NUL)。不能作为消息内容出现。
pub const TERMINATOR: u8 = 0;

/// 输出图像统一使用的无损格式扩展名。
pub const OUTPUT_EXTENSION: &str = "png";

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";
