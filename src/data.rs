//! Labelled data consumed and produced by a `Network`.

/// A single labelled training example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl TrainingExample {
    pub fn new<I, T>(input: I, target: T) -> Self
    where
        I: Into<Vec<f64>>,
        T: Into<Vec<f64>>,
    {
        TrainingExample {
            input: input.into(),
            target: target.into(),
        }
    }
}

impl<I, T> From<(I, T)> for TrainingExample
where
    I: Into<Vec<f64>>,
    T: Into<Vec<f64>>,
{
    fn from((input, target): (I, T)) -> Self {
        TrainingExample::new(input, target)
    }
}

/// The outcome of running one example through `Network::test`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub input: Vec<f64>,
    pub prediction: Vec<f64>,
    pub target: Vec<f64>,
}

impl TestRecord {
    /// Returns the largest absolute difference between prediction and
    /// target.
    pub fn max_error(&self) -> f64 {
        self.prediction
            .iter()
            .zip(&self.target)
            .map(|(p, t)| (p - t).abs())
            .fold(0.0, f64::max)
    }
}
