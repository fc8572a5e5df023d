use image::{ColorType, ImageBuffer, Rgba};
use lsb_parity::{
    PixelGrid, decode,
    cli::{CapacityArgs, HideArgs, RecoverArgs},
    handler::{handle_capacity, handle_hide, handle_recover},
};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 创建一个所有像素相同的测试图像
fn create_solid_image(path: &Path, width: u32, height: u32, pixel: [u8; 4]) {
    ImageBuffer::from_pixel(width, height, Rgba(pixel))
        .save(path)
        .expect("Failed to create test image.");
}

fn hide_args(image: &Path, text: &Path, dest: Option<PathBuf>, force: bool) -> HideArgs {
    HideArgs {
        image: image.to_path_buf(),
        text: Some(text.to_path_buf()),
        message: None,
        dest,
        force,
    }
}

fn recover_args(image: &Path, text: Option<PathBuf>) -> RecoverArgs {
    RecoverArgs {
        image: image.to_path_buf(),
        text,
        force: false,
        print: false,
        strict: false,
    }
}

/// 验证从隐藏到恢复的完整流程
#[test]
fn test_handle_hide_and_recover_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_text_path = dir.path().join("source.txt");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler! Ça marche très bien.";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide
    handle_hide(hide_args(
        &original_image_path,
        &source_text_path,
        Some(hidden_image_path.clone()),
        false,
    ))?;
    assert!(
        hidden_image_path.exists(),
        "Hidden image should be created."
    );

    // 3. 测试 handle_recover
    handle_recover(recover_args(
        &hidden_image_path,
        Some(recovered_text_path.clone()),
    ))?;
    assert!(
        recovered_text_path.exists(),
        "Recovered text file should be created."
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    Ok(())
}

/// 验证输出图像是 3 通道的，且只有前 3*(N+1) 个像素发生了变化
#[test]
fn test_output_is_rgb_and_tail_is_untouched() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");

    create_test_image(&original_image_path, 20, 20);
    handle_hide(HideArgs {
        image: original_image_path.clone(),
        text: None,
        message: Some("  inline secret \n".to_string()),
        dest: Some(hidden_image_path.clone()),
        force: false,
    })?;

    let hidden = image::open(&hidden_image_path)?;
    assert_eq!(hidden.color(), ColorType::Rgb8);

    let before = PixelGrid::from(&image::open(&original_image_path)?);
    let after = PixelGrid::from(&hidden);
    let used = 3 * ("inline secret".len() + 1);
    assert_eq!(&after.pixels()[used..], &before.pixels()[used..]);
    assert_eq!(decode(&after)?.to_text(), "inline secret");

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_hide_and_recover_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let source_text_path = dir.path().join("source.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "Testing default path generation.";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide，不提供 dest 路径
    handle_hide(hide_args(&original_image_path, &source_text_path, None, false))?;

    // 验证默认的隐藏图像文件是否已创建
    let expected_hidden_path = dir.path().join("doctored_original.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // 3. 测试 handle_recover，不提供 text 输出路径
    handle_recover(recover_args(&expected_hidden_path, None))?;

    // 验证默认的恢复文本文件是否已创建
    let expected_recovered_path = dir.path().join("recovered_doctored_original.txt");
    assert!(
        expected_recovered_path.exists(),
        "Default recovered text file should be created at: {:?}",
        expected_recovered_path
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&expected_recovered_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text from default file must match the original."
    );

    Ok(())
}

/// 验证非 PNG 的输出路径会被追加 .png 扩展名
#[test]
fn test_non_png_destination_gets_png_extension() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("text.txt");
    create_test_image(&image_path, 30, 30);
    fs::write(&text_path, "extension")?;

    handle_hide(hide_args(
        &image_path,
        &text_path,
        Some(dir.path().join("out.bmp")),
        false,
    ))?;

    let written = dir.path().join("out.bmp.png");
    assert!(written.exists());
    assert!(!dir.path().join("out.bmp").exists());
    assert_eq!(
        image::ImageFormat::from_path(&written)?,
        image::ImageFormat::Png
    );

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("text.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&text_path, "some text")?;

    // 2. 场景一：测试覆盖保护
    // 先创建一个同名的目标文件，模拟“文件已存在”的场景
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    // 执行并断言操作会失败
    let result = handle_hide(hide_args(
        &image_path,
        &text_path,
        Some(dest_path.clone()),
        false,
    ));
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let result = handle_hide(hide_args(
        &image_path,
        &text_path,
        Some(dest_path.clone()),
        true,
    ));
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    // 验证文件确实被覆盖（内容不再是 "this is a dummy file..."）
    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理，并确认没有写出任何文件
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let text_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    // 创建一个非常小的图片
    create_test_image(&image_path, 10, 10);
    // 创建一个非常大的文本
    let large_text = "a".repeat(5000);
    fs::write(&text_path, large_text)?;

    // 2. 执行并断言错误
    let result = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone()), false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists());

    Ok(())
}

/// 验证无法用单字节表示的字符和空消息会被拒绝
#[test]
fn test_handle_hide_rejects_invalid_messages() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("wide.txt");
    create_test_image(&image_path, 50, 50);

    fs::write(&text_path, "这是一个测试信息")?;
    let result = handle_hide(hide_args(&image_path, &text_path, None, false));
    assert!(result.is_err());
    assert!(!dir.path().join("doctored_image.png").exists());

    fs::write(&text_path, " \n\t ")?;
    let result = handle_hide(hide_args(&image_path, &text_path, None, false));
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("empty"));
    }

    Ok(())
}

/// 验证没有结束标记的图像：默认返回部分文本，--strict 时报错
#[test]
fn test_recover_unterminated_image() -> anyhow::Result<()> {
    let dir = tempdir()?;
    // 所有通道均为奇数，每个编码单元都解出 0xFF
    let image_path = dir.path().join("white.png");
    create_solid_image(&image_path, 4, 3, [255, 255, 255, 255]);

    let result = handle_recover(RecoverArgs {
        strict: true,
        ..recover_args(&image_path, None)
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("truncated"));
    }

    handle_recover(recover_args(&image_path, None))?;
    let recovered = fs::read_to_string(dir.path().join("recovered_white.txt"))?;
    assert_eq!(recovered, "ÿÿÿÿ");

    Ok(())
}

/// 验证像素不足 3 个的图像没有隐藏消息
#[test]
fn test_recover_reports_no_message() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("tiny.png");
    create_test_image(&image_path, 2, 1);

    let result = handle_recover(recover_args(&image_path, None));
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("No hidden message found"));
    }
    assert!(!dir.path().join("recovered_tiny.txt").exists());

    Ok(())
}

#[test]
fn test_handle_capacity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 10, 10);

    handle_capacity(CapacityArgs {
        image: image_path.clone(),
    })?;

    let missing = handle_capacity(CapacityArgs {
        image: dir.path().join("missing.png"),
    });
    assert!(missing.is_err());

    Ok(())
}
