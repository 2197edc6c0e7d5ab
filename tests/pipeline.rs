use std::fs;
use std::path::Path;

use deeptor::api::iterate_entries;
use deeptor::{
    BatchReport, Error, OutputFormat, PixelFormat, PrecomputedEngine, ProbabilityTensor,
    RasterImage, ResizePolicy, SegmentationParams, SegmentationSession, Tensor3D, TensorLayout,
    mask_directory_to_path, mask_tensor_file_to_path, prepare, prepare_image_to_path,
    segment_with_engine_to_path, threshold, to_display_image,
};

fn write_raw(path: &Path, values: &[f32]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    fs::write(path, bytes).unwrap();
}

#[test]
fn uniform_map_becomes_solid_white() {
    let data = vec![0.7f32; 256 * 256];
    let tensor = Tensor3D::new(&data, [1, 256, 256], [256 * 256, 256, 1]).unwrap();
    let mask = threshold(&tensor, 0.5).unwrap();
    assert_eq!(mask.foreground_count(), 256 * 256);
    let display = to_display_image(&mask, 0.0, 1.0).unwrap();
    assert_eq!(display.dimensions(), (256, 256));
    assert!(display.data().iter().all(|&p| p == 255));
}

#[test]
fn scale_to_fit_keeps_short_axis_short() {
    let src = RasterImage::filled(512, 256, PixelFormat::Rgb8, 128);
    let prepared = prepare(src, (256, 256), ResizePolicy::ScaleToFitExact).unwrap();
    assert_eq!(prepared.image.dimensions(), (256, 128));
}

#[test]
fn degenerate_inputs_fail_fast() {
    let mask = threshold(&Tensor3D::contiguous(&[1.0], [1, 1, 1]).unwrap(), 0.5).unwrap();
    assert!(matches!(
        to_display_image(&mask, 1.0, 1.0),
        Err(Error::InvalidRange { .. })
    ));

    let empty = Tensor3D::contiguous(&[], [1, 0, 256]).unwrap();
    assert!(matches!(threshold(&empty, 0.5), Err(Error::ShapeMismatch(_))));
}

#[test]
fn prepare_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("eye.png");
    image::RgbImage::from_pixel(300, 600, image::Rgb([10, 20, 30]))
        .save(&input)
        .unwrap();

    let output = dir.path().join("prepared.png");
    let params = SegmentationParams {
        policy: ResizePolicy::ScaleToFitExact,
        ..SegmentationParams::default()
    };
    prepare_image_to_path(&input, &output, &params).unwrap();

    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (128, 256));
}

#[test]
fn mask_file_with_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("probs.f32");
    let mut values = vec![0.0f32; 256 * 256];
    values[..256].fill(0.5);
    write_raw(&input, &values);

    let output = dir.path().join("mask.png");
    let mask = mask_tensor_file_to_path(
        &input,
        &output,
        TensorLayout::default(),
        &SegmentationParams::default(),
        true,
    )
    .unwrap();
    assert_eq!(mask.foreground_count(), 256);

    let decoded = image::open(&output).unwrap().to_luma8();
    assert_eq!(decoded.get_pixel(10, 0)[0], 255);
    assert_eq!(decoded.get_pixel(10, 1)[0], 0);

    let sidecar: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("mask.png.json")).unwrap())
            .unwrap();
    assert_eq!(sidecar["foreground_pixels"], 256);
    assert_eq!(sidecar["width"], 256);
}

#[test]
fn batch_skips_foreign_files_and_counts_errors() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let layout = TensorLayout {
        shape: [1, 4, 4],
        strides: None,
    };
    let params = SegmentationParams {
        expected_output: Some((4, 4)),
        format: OutputFormat::TIFF,
        ..SegmentationParams::default()
    };

    write_raw(&input_dir.path().join("a.f32"), &[0.9; 16]);
    write_raw(&input_dir.path().join("b.bin"), &[0.1; 16]);
    write_raw(&input_dir.path().join("broken.f32"), &[0.1; 3]);
    fs::write(input_dir.path().join("notes.txt"), "not a tensor").unwrap();

    let report = mask_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        layout,
        &params,
        false,
        true,
    )
    .unwrap();
    assert_eq!(
        report,
        BatchReport {
            processed: 2,
            skipped: 1,
            errors: 1
        }
    );
    assert!(output_dir.path().join("a.tiff").exists());
    assert!(output_dir.path().join("b.tiff").exists());

    let strict = mask_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        layout,
        &params,
        false,
        false,
    );
    assert!(matches!(strict, Err(Error::ShapeMismatch(_))));
}

#[test]
fn batch_refuses_to_overwrite_mask_with_shared_stem() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let layout = TensorLayout {
        shape: [1, 4, 4],
        strides: None,
    };
    let params = SegmentationParams {
        expected_output: Some((4, 4)),
        ..SegmentationParams::default()
    };

    // Both map to eye.png; eye.bin sorts first and wins.
    write_raw(&input_dir.path().join("eye.bin"), &[0.9; 16]);
    write_raw(&input_dir.path().join("eye.f32"), &[0.1; 16]);

    let report = mask_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        layout,
        &params,
        false,
        true,
    )
    .unwrap();
    assert_eq!(
        report,
        BatchReport {
            processed: 1,
            skipped: 0,
            errors: 1
        }
    );
    let written: Vec<_> = fs::read_dir(output_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(written, vec![std::ffi::OsString::from("eye.png")]);
    let decoded = image::open(output_dir.path().join("eye.png")).unwrap().to_luma8();
    assert!(decoded.pixels().all(|p| p[0] == 255));

    let fresh = tempfile::tempdir().unwrap();
    let strict = mask_directory_to_path(
        input_dir.path(),
        fresh.path(),
        layout,
        &params,
        false,
        false,
    );
    assert!(matches!(strict, Err(Error::Processing(_))));
}

#[test]
fn iterate_entries_lists_everything_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_raw(&dir.path().join("b.f32"), &[0.0]);
    fs::write(dir.path().join("a.txt"), "notes").unwrap();
    fs::create_dir(dir.path().join("c")).unwrap();

    let names: Vec<String> = iterate_entries(dir.path())
        .unwrap()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.txt", "b.f32", "c"]);
}

#[test]
fn session_writes_mask_for_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("eye.png");
    image::RgbImage::new(400, 300).save(&input).unwrap();
    let output = dir.path().join("mask.png");

    let engine = PrecomputedEngine::new("replay", ProbabilityTensor::filled([1, 256, 256], 0.2));
    let mut session = SegmentationSession::new(engine, SegmentationParams::default()).unwrap();
    let result = segment_with_engine_to_path(&mut session, &input, &output, false).unwrap();
    assert_eq!(result.mask.foreground_count(), 0);

    let decoded = image::open(&output).unwrap().to_luma8();
    assert!(decoded.pixels().all(|p| p[0] == 0));

    // The replayed result was consumed; a second request reports the missing result.
    let again = segment_with_engine_to_path(&mut session, &input, &output, false);
    assert!(matches!(again, Err(Error::InferenceFailed(_))));
}
