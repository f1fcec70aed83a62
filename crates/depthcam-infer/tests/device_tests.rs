use depthcam_infer::{DepthConfig, Device, InferError, Palette};

#[test]
fn test_device_parse() {
    assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
    assert_eq!("GPU".parse::<Device>().unwrap(), Device::Gpu { device_id: 0 });
    assert_eq!("gpu:1".parse::<Device>().unwrap(), Device::Gpu { device_id: 1 });
    assert_eq!("cuda".parse::<Device>().unwrap(), Device::Gpu { device_id: 0 });
    assert_eq!("npu".parse::<Device>().unwrap(), Device::NeuralAccelerator);
    assert_eq!("coreml".parse::<Device>().unwrap(), Device::NeuralAccelerator);
    assert_eq!("neural".parse::<Device>().unwrap(), Device::NeuralAccelerator);
}

#[test]
fn test_device_parse_errors() {
    assert!(matches!("tpu".parse::<Device>(), Err(InferError::Config(_))));
    assert!(matches!("gpu:x".parse::<Device>(), Err(InferError::Config(_))));
    assert!(matches!("cpu:0".parse::<Device>(), Err(InferError::Config(_))));
}

#[test]
fn test_fallback_chain() {
    assert_eq!(
        Device::Gpu { device_id: 2 }.fallback_chain(),
        vec![Device::Gpu { device_id: 2 }, Device::Cpu]
    );
    assert_eq!(
        Device::NeuralAccelerator.fallback_chain(),
        vec![Device::NeuralAccelerator]
    );
    assert_eq!(Device::Cpu.fallback_chain(), vec![Device::Cpu]);
}

#[test]
fn test_device_display() {
    assert_eq!(Device::Cpu.to_string(), "CPU");
    assert_eq!(Device::Gpu { device_id: 3 }.to_string(), "GPU(device_id=3)");
}

#[test]
fn test_depth_config_defaults() {
    let config = DepthConfig::default();
    assert_eq!(config.device(), Device::Cpu);
    assert_eq!(config.palette(), Palette::Inferno);
    assert_eq!(config.fallback_side(), 518);
    assert_eq!(config.result_capacity(), 2);
}

#[test]
fn test_depth_config_builder() {
    let config = DepthConfig::default()
        .with_device(Device::NeuralAccelerator)
        .with_palette(Palette::Magma)
        .with_fallback_side(0)
        .with_result_capacity(0);

    assert_eq!(config.device(), Device::NeuralAccelerator);
    assert_eq!(config.palette(), Palette::Magma);
    assert_eq!(config.fallback_side(), 1);
    assert_eq!(config.result_capacity(), 1);
}

#[test]
fn test_error_display() {
    let err = InferError::UnsupportedDevice(Device::Gpu { device_id: 0 });
    assert!(err.to_string().contains("GPU(device_id=0)"));

    let err = InferError::ShapeMismatch {
        expected: "[1, 3]".to_string(),
        got: "[2]".to_string(),
    };
    assert!(err.to_string().contains("expected [1, 3], got [2]"));
    assert_eq!(InferError::Closed.to_string(), "model handle is closed");
}
