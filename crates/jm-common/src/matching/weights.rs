/// Fixed weight table for the total score. These values are a behavioral
/// contract: persisted totals and the ranking order depend on them, so they
/// are constants rather than configuration.
pub const MATCH_WEIGHTS: Weights = Weights {
    title: 0.20,
    skills: 0.30,
    degree: 0.10,
    location: 0.10,
    duration: 0.10,
    industry: 0.10,
    resume: 0.10,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub title: f64,
    pub skills: f64,
    pub degree: f64,
    pub location: f64,
    pub duration: f64,
    pub industry: f64,
    pub resume: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.title
            + self.skills
            + self.degree
            + self.location
            + self.duration
            + self.industry
            + self.resume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((MATCH_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }
}
