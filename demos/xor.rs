//! Trains a small sigmoid network on XOR and on a noisy quadrant
//! classification task, then reports how well it learned each.

use perceptron::trainer::{Logging, StopCondition, Trainer};
use perceptron::{Activator, Network, Properties, TrainingExample};

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

fn generate_data<R: Rng>(num_samples: usize, rng: &mut R) -> Vec<TrainingExample> {
    let radians = Uniform::new(0.0, 2.0 * std::f64::consts::PI);
    let noise = Uniform::new(-0.1, 0.1);

    let mut data = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        let theta = radians.sample(rng);
        let point = vec![
            theta.cos() + noise.sample(rng),
            theta.sin() + noise.sample(rng),
        ];
        let class = if point[0] * point[1] > 0.0 {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        };
        data.push(TrainingExample::new(point, class));
    }
    data
}

fn score(set_name: &str, network: &mut Network, test_data: &[TrainingExample]) {
    let mut num_correct = 0;
    for record in network.test(test_data).expect("examples match network") {
        let class = if record.prediction[0] > record.prediction[1] { 0 } else { 1 };
        if record.target[class] == 1.0 {
            num_correct += 1;
        }
    }
    println!(
        "{} set results: {} of {} correct",
        set_name,
        num_correct,
        test_data.len()
    );
}

fn main() {
    tracing_subscriber::fmt::init();

    let xor: Vec<TrainingExample> = vec![
        ([0.0, 1.0], [1.0]).into(),
        ([0.0, 0.0], [0.0]).into(),
        ([1.0, 0.0], [1.0]).into(),
        ([1.0, 1.0], [0.0]).into(),
    ];
    let properties = Properties {
        num_inputs: 2,
        num_hidden_layers: 1,
        neurons_per_hidden_layer: 4,
        num_outputs: 1,
        learning_rate: 0.5,
        epochs: 20_000,
        activation: Activator::Sigmoid,
        seed: Some(7),
        ..Properties::default()
    };
    let mut network = Trainer::from_properties(&properties)
        .and_then(|trainer| {
            trainer.logging(Logging::Iterations(5000)).train(&xor)
        })
        .expect("valid XOR network");
    for record in network.test(&xor).expect("examples match network") {
        println!("{:?} -> {:.3}", record.input, record.prediction[0]);
    }

    let mut rng = rand::thread_rng();
    let training_data = generate_data(2_000, &mut rng);
    let network = Network::new(2, 2, 5, 2, Activator::Sigmoid)
        .expect("valid quadrant network");
    let mut network = Trainer::new(network)
        .learning_rate(0.3)
        .stop_condition(StopCondition::Epochs(200))
        .logging(Logging::Iterations(20))
        .train(&training_data)
        .expect("examples match network");

    println!();
    score("Training", &mut network, &training_data);
    score("Test", &mut network, &generate_data(500, &mut rng));
}
