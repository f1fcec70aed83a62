mod common;

use common::{MockBackend, memory_model};
use depthcam_base::RgbFrame;
use depthcam_infer::{
    DepthConfig, ElementType, InferError, ModelHandle, TensorLayout, preprocess,
};

fn handle(backend: &MockBackend) -> ModelHandle {
    ModelHandle::load(&memory_model(), backend, &DepthConfig::default()).unwrap()
}

fn two_by_two() -> RgbFrame {
    RgbFrame::new(
        2,
        2,
        vec![255, 0, 51, 10, 20, 30, 40, 50, 60, 70, 80, 90],
    )
    .unwrap()
}

#[test]
fn test_float_nhwc_divides_by_255() {
    let backend = MockBackend::float(2, 2, &[0.0; 4]);
    let model = handle(&backend);

    let tensor = preprocess(&two_by_two(), model.descriptor()).unwrap();
    assert_eq!(tensor.shape(), &[1, 2, 2, 3]);
    assert_eq!(tensor.element_type(), &ElementType::Float32);
    assert_eq!(tensor.bytes().len(), 2 * 2 * 3 * 4);

    let values = tensor.to_f32().unwrap();
    assert_eq!(values[0], 1.0);
    assert_eq!(values[1], 0.0);
    assert!((values[2] - 0.2).abs() < 1e-6);
    assert!((values[11] - 90.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_float_nchw_is_planar() {
    let backend = MockBackend::float(2, 2, &[0.0; 4]).with_input_shape(vec![1, 3, 2, 2]);
    let model = handle(&backend);
    assert_eq!(model.descriptor().layout(), TensorLayout::Nchw);

    let tensor = preprocess(&two_by_two(), model.descriptor()).unwrap();
    assert_eq!(tensor.shape(), &[1, 3, 2, 2]);

    let values: Vec<u8> = tensor
        .to_f32()
        .unwrap()
        .iter()
        .map(|v| (v * 255.0).round() as u8)
        .collect();
    assert_eq!(values, vec![255, 10, 40, 70, 0, 20, 50, 80, 51, 30, 60, 90]);
}

#[test]
fn test_uint8_input_keeps_raw_pixels() {
    let backend = MockBackend::quantized(2, 2, &[0; 4]);
    let model = handle(&backend);

    let frame = two_by_two();
    let tensor = preprocess(&frame, model.descriptor()).unwrap();
    assert_eq!(tensor.bytes(), frame.data());
    assert!(tensor.to_f32().is_none());
}

#[test]
fn test_resizes_to_model_side() {
    let backend = MockBackend::float(4, 4, &[0.0; 16]);
    let model = handle(&backend);

    let frame = RgbFrame::filled(9, 5, [128, 128, 128]).unwrap();
    let tensor = preprocess(&frame, model.descriptor()).unwrap();
    assert_eq!(tensor.shape(), &[1, 4, 4, 3]);
    assert_eq!(tensor.bytes().len(), 4 * 4 * 3 * 4);
    let values = tensor.to_f32().unwrap();
    assert!(values.iter().all(|v| (v - 128.0 / 255.0).abs() < 1e-6));
}

#[test]
fn test_zero_area_is_malformed() {
    let backend = MockBackend::float(2, 2, &[0.0; 4]);
    let model = handle(&backend);

    let empty = RgbFrame::new(0, 3, Vec::new()).unwrap();
    let result = preprocess(&empty, model.descriptor());
    assert!(matches!(result, Err(InferError::MalformedInput(_))));
}
