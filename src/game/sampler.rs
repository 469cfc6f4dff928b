use rand::{thread_rng, Rng};

/// Uniform index source behind the challenge draws and the distractor picks,
/// kept as a trait so tests can script the selection.
pub trait Sampler: Send {
    /// Returns a uniformly distributed value in `[0, upper_bound)`.
    fn pick(&mut self, upper_bound: usize) -> usize;
}

pub struct RandomSampler;

impl Sampler for RandomSampler {
    fn pick(&mut self, upper_bound: usize) -> usize {
        thread_rng().gen_range(0..upper_bound)
    }
}
