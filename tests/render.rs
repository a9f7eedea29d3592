use anyhow::Result;
use stereopan::io::wav::{self, StereoClip};
use stereopan::pan::ParamValues;
use stereopan::render::Renderer;
use stereopan::settings::Settings;
use tempfile::TempDir;

fn sine_clip(frames: usize) -> StereoClip {
    let mut clip = StereoClip::silent(48_000, frames);
    for i in 0..frames {
        let phase = i as f32 * 2.0 * std::f32::consts::PI / 64.0;
        clip.left[i] = phase.sin() * 0.5;
        clip.right[i] = phase.cos() * 0.25;
    }
    clip
}

#[test]
fn renders_wav_file_end_to_end() -> Result<()> {
    let tmp = TempDir::new()?;
    let input_path = tmp.path().join("in.wav");
    let output_path = tmp.path().join("out.wav");
    wav::write_stereo(&input_path, &sine_clip(1000))?;

    let settings = Settings {
        block_size: 128,
        target: ParamValues::new(1.0, -1.0, 0.0),
        ..Settings::default()
    };
    let input = wav::read_stereo(&input_path)?;
    let output = Renderer::new(&settings).render(&input);
    wav::write_stereo(&output_path, &output)?;

    let reread = wav::read_stereo(&output_path)?;
    assert_eq!(reread.sample_rate, 48_000);
    assert_eq!(reread.frames(), 1000);

    // After the first block the channels are fully swapped.
    for i in 128..1000 {
        assert!((reread.left[i] - input.right[i]).abs() < 1e-5);
        assert!((reread.right[i] - input.left[i]).abs() < 1e-5);
    }
    Ok(())
}

#[test]
fn block_size_does_not_change_steady_state() {
    let input = sine_clip(512);
    let mut outputs = Vec::new();
    for block_size in [1, 32, 100, 512] {
        let settings = Settings {
            block_size,
            target: ParamValues::new(0.8, 0.5, -0.25),
            initial: ParamValues::new(0.8, 0.5, -0.25),
            ..Settings::default()
        };
        outputs.push(Renderer::new(&settings).render(&input));
    }

    for output in &outputs[1..] {
        for (a, b) in output.left.iter().zip(&outputs[0].left) {
            assert!((a - b).abs() < 1e-6);
        }
        for (a, b) in output.right.iter().zip(&outputs[0].right) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
