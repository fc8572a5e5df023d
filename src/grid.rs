//! # 像素网格模块
//!
//! 将图像表示为按行优先 (y 在外层, x 在内层) 排列、可随机访问的 RGB 像素序列。
//! 编码器与解码器都只通过扫描序号访问像素，序号 `i` 对应坐标
//! `(i % width, i / width)`。

use crate::error::{Result, StegoError};
use image::{DynamicImage, RgbImage};

/// 一个像素的红、绿、蓝三个 8 位通道。
pub type Pixel = [u8; 3];

/// 固定宽高的二维像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// 创建一个所有像素都为 `fill` 的网格。
    pub fn new(width: u32, height: u32, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// 由按扫描顺序排列的像素构造网格。
    ///
    /// # Errors
    ///
    /// 像素数量不等于 `width * height` 时返回 [`StegoError::GridSize`]。
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(StegoError::GridSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 由紧密排列的 RGB 字节 (每像素 3 字节) 构造网格。
    ///
    /// # Errors
    ///
    /// 字节长度不等于 `width * height * 3` 时返回 [`StegoError::GridSize`]。
    pub fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Result<Self> {
        if raw.len() != width as usize * height as usize * 3 {
            return Err(StegoError::GridSize {
                width,
                height,
                len: raw.len(),
            });
        }
        let pixels = raw
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 像素总数，即 `width * height`。
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// 按扫描序号读取像素。
    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    /// 按坐标读取像素。
    pub fn get_xy(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.get(y as usize * self.width as usize + x as usize)
    }

    /// 扫描序号对应的 `(x, y)` 坐标。宽度为 0 时返回 `None`。
    pub fn position(&self, index: usize) -> Option<(u32, u32)> {
        if self.width == 0 {
            return None;
        }
        let width = self.width as usize;
        Some(((index % width) as u32, (index / width) as u32))
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// 转换为 3 通道的 `RgbImage`，用于无损保存。
    pub fn into_rgb_image(self) -> RgbImage {
        let raw: Vec<u8> = self.pixels.into_iter().flatten().collect();
        // 长度在构造时已校验为 width * height * 3
        RgbImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}

impl From<RgbImage> for PixelGrid {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// 只取前三个通道，Alpha 通道被丢弃。
impl From<&DynamicImage> for PixelGrid {
    fn from(image: &DynamicImage) -> Self {
        Self::from(image.to_rgb8())
    }
}
