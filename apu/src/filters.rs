// The analogue stage between the DAC and the console's audio out.
// These run at the host's sampling rate over values pulled from `APU::output`.

/// Time constant and sampling interval for a first-order filter at a
/// given corner frequency (f)
struct FilterTiming {
    rc: f32, // Time constant
    dt: f32, // Sampling interval
}

impl FilterTiming {
    fn new(f: f32, sample_rate: u32) -> Self {
        Self {
            rc: 1.0 / (2.0 * std::f32::consts::PI * f),
            dt: 1.0 / sample_rate as f32,
        }
    }
}

pub trait Filter {
    fn process(&mut self, in_curr: f32) -> f32;
}

// https://en.wikipedia.org/wiki/Low-pass_filter
pub struct LowPassFilter {
    alpha: f32,
    out_prev: f32,
}

impl LowPassFilter {
    pub fn new(f: f32, sample_rate: u32) -> Self {
        let timing = FilterTiming::new(f, sample_rate);
        Self {
            alpha: timing.dt / (timing.rc + timing.dt),
            out_prev: 0.0,
        }
    }
}

impl Filter for LowPassFilter {
    fn process(&mut self, in_curr: f32) -> f32 {
        self.out_prev = self.alpha * in_curr + (1.0 - self.alpha) * self.out_prev;
        self.out_prev
    }
}

// https://en.wikipedia.org/wiki/High-pass_filter
pub struct HighPassFilter {
    alpha: f32,
    in_prev: f32,
    out_prev: f32,
}

impl HighPassFilter {
    pub fn new(f: f32, sample_rate: u32) -> Self {
        let timing = FilterTiming::new(f, sample_rate);
        Self {
            alpha: timing.rc / (timing.rc + timing.dt),
            in_prev: 0.0,
            out_prev: 0.0,
        }
    }
}

impl Filter for HighPassFilter {
    fn process(&mut self, in_curr: f32) -> f32 {
        self.out_prev = self.alpha * (self.out_prev + in_curr - self.in_prev);
        self.in_prev = in_curr;
        self.out_prev
    }
}

pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }

    /// https://wiki.nesdev.com/w/index.php/APU_Mixer#Emulation
    pub fn nes(sample_rate: u32) -> Self {
        Self::new(vec![
            Box::new(HighPassFilter::new(90.0, sample_rate)),
            Box::new(HighPassFilter::new(440.0, sample_rate)),
            Box::new(LowPassFilter::new(14000.0, sample_rate)),
        ])
    }

    pub fn process(&mut self, sample: f32) -> f32 {
        self.filters
            .iter_mut()
            .fold(sample, |acc, filter| filter.process(acc))
    }
}
