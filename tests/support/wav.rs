use std::path::Path;

/// Write a mono 8 kHz silent clip of `seconds` length.
pub fn write_silent_wav(path: &Path, seconds: f32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create wav parent dirs");
    }
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav writer");
    let frames = (seconds * spec.sample_rate as f32) as usize;
    for _ in 0..frames {
        writer.write_sample(0i16).expect("write wav sample");
    }
    writer.finalize().expect("finalize wav");
}
