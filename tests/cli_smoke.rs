use std::path::PathBuf;

use glitchmask::{Channels, GlitchSpec, PixelBuffer, Rgb8, load_image, save_image};

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_glitchmask")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "glitchmask.exe"
            } else {
                "glitchmask"
            });
            p
        })
}

#[test]
fn cli_mask_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let out_path = dir.join("mask.png");
    let _ = std::fs::remove_file(&out_path);

    let out_arg = out_path.to_string_lossy().to_string();
    let status = std::process::Command::new(bin_path())
        .args([
            "mask", "--width", "64", "--height", "48", "--seed", "7", "--out",
        ])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let mask = load_image(&out_path).unwrap();
    assert_eq!(mask.width(), 64);
    assert_eq!(mask.height(), 48);
}

#[test]
fn cli_mask_reads_spec_file() {
    let dir = PathBuf::from("target").join("cli_smoke_spec");
    std::fs::create_dir_all(&dir).unwrap();

    let spec_path = dir.join("spec.json");
    let out_path = dir.join("mask.png");
    let _ = std::fs::remove_file(&out_path);

    let spec = GlitchSpec {
        seed: Some(11),
        height_ratio: 1.0,
        palette: vec![Rgb8::new(1, 2, 3)],
        ..GlitchSpec::default()
    };
    let f = std::fs::File::create(&spec_path).unwrap();
    serde_json::to_writer_pretty(f, &spec).unwrap();

    let spec_arg = spec_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(bin_path())
        .args([
            "mask", "--width", "32", "--height", "16", "--spec", spec_arg.as_str(), "--out",
        ])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let mask = load_image(&out_path).unwrap();
    // The file's one-color palette must be the only non-black color left
    // after displacement.
    let mut saw_bar = false;
    for px in mask.data().chunks_exact(3) {
        if px.iter().any(|&s| s != 0) {
            assert_eq!(px, &[1, 2, 3]);
            saw_bar = true;
        }
    }
    assert!(saw_bar, "spec-driven mask should contain bars");
}

#[test]
fn cli_apply_writes_composite_and_stage_dumps() {
    let dir = PathBuf::from("target").join("cli_smoke_apply");
    std::fs::create_dir_all(&dir).unwrap();

    let photo_path = dir.join("photo.png");
    let out_path = dir.join("out.png");
    let stages_dir = dir.join("stages");

    let mut photo = PixelBuffer::black(40, 30, Channels::Rgb).unwrap();
    photo.fill(&[50, 60, 70]);
    save_image(&photo, &photo_path).unwrap();

    let status = std::process::Command::new(bin_path())
        .args(["apply", "--seed", "3", "--in"])
        .arg(photo_path.as_os_str())
        .arg("--out")
        .arg(out_path.as_os_str())
        .arg("--dump-stages")
        .arg(stages_dir.as_os_str())
        .status()
        .unwrap();

    assert!(status.success());
    let out = load_image(&out_path).unwrap();
    assert_eq!(out.width(), 40);
    assert_eq!(out.height(), 30);

    for name in [
        "step1_bars.png",
        "step2_bars_vertical.png",
        "step3_bars_horizontal.png",
        "step4_masked.png",
    ] {
        assert!(stages_dir.join(name).exists(), "missing stage dump {name}");
    }
}

#[test]
fn cli_overlay_strict_fails_on_mismatch() {
    let dir = PathBuf::from("target").join("cli_smoke_overlay");
    std::fs::create_dir_all(&dir).unwrap();

    let photo_path = dir.join("photo.png");
    let mask_path = dir.join("mask.png");
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let mut photo = PixelBuffer::black(16, 16, Channels::Rgb).unwrap();
    photo.fill(&[1, 2, 3]);
    save_image(&photo, &photo_path).unwrap();

    let mask = glitchmask::generate_mask(
        8,
        8,
        &GlitchSpec {
            seed: Some(2),
            ..GlitchSpec::default()
        },
    )
    .unwrap();
    save_image(&mask, &mask_path).unwrap();

    let strict = std::process::Command::new(bin_path())
        .args(["overlay", "--strict-dimensions", "--photo"])
        .arg(photo_path.as_os_str())
        .arg("--mask")
        .arg(mask_path.as_os_str())
        .arg("--out")
        .arg(out_path.as_os_str())
        .status()
        .unwrap();
    assert!(!strict.success());
    assert!(!out_path.exists());

    // Without the flag the mask is resampled up to the photo's size.
    let relaxed = std::process::Command::new(bin_path())
        .args(["overlay", "--photo"])
        .arg(photo_path.as_os_str())
        .arg("--mask")
        .arg(mask_path.as_os_str())
        .arg("--out")
        .arg(out_path.as_os_str())
        .status()
        .unwrap();
    assert!(relaxed.success());
    let out = load_image(&out_path).unwrap();
    assert_eq!(out.width(), 16);
    assert_eq!(out.height(), 16);
}
