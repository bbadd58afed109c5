//! Loop material for the demo: a plucked bass line, so the auto-wah has
//! transients to follow and the shelf has harmonics to work on.

const NOTES_HZ: [f32; 8] = [55.0, 55.0, 82.41, 73.42, 55.0, 65.41, 82.41, 98.0];
const STEP_SECS: f32 = 0.25;
const DECAY_PER_SEC: f32 = 6.0;

pub fn bass_loop(sample_rate: f32) -> Vec<f32> {
    let step_frames = (STEP_SECS * sample_rate) as usize;
    let mut buffer = Vec::with_capacity(step_frames * NOTES_HZ.len());

    for &freq in &NOTES_HZ {
        let mut phase = 0.0f32;
        for i in 0..step_frames {
            let t = i as f32 / sample_rate;
            // Naive saw, bright enough for a filter to chew on
            let saw = 2.0 * phase - 1.0;
            buffer.push(0.5 * saw * (-DECAY_PER_SEC * t).exp());
            phase = (phase + freq / sample_rate).fract();
        }
    }

    buffer
}
