//! Demo: shallow neural classifier on the UCI wine dataset.

use anyhow::Result;
use burn::backend::{Autodiff, NdArray, ndarray::NdArrayDevice};
use shallow_classifier::{
    Activation, ClassifierConfig, FitOptions, ShallowNeuralClassifier, accuracy, data,
};

type Backend = Autodiff<NdArray>;

const SEED: u64 = 42;
const TRAIN_RATIO: f64 = 0.7;

fn main() -> Result<()> {
    let wine_df = data::fetch_wine()?;
    let (features, labels) = data::split_features_labels(wine_df)?;

    let features = data::standardize(features)?;
    let rows = data::to_rows(&features)?;
    let targets = data::to_labels(&labels)?;
    println!(
        "Loaded {} examples with {} features each",
        rows.len(),
        rows.first().map_or(0, Vec::len)
    );

    let (x_train, y_train, x_test, y_test) =
        data::train_test_split(rows, targets, TRAIN_RATIO, SEED);
    println!(
        "Split into {} train / {} test examples",
        x_train.len(),
        x_test.len()
    );

    let config = ClassifierConfig::new()
        .with_hidden_dim(16)
        .with_activation(Activation::Relu)
        .with_batch_size(32)
        .with_learning_rate(0.001)
        .with_l2_strength(0.0001)
        .with_max_epochs(200);
    let classifier = ShallowNeuralClassifier::<Backend>::new(config, NdArrayDevice::Cpu);

    let model = classifier.fit_with(
        &x_train,
        &y_train,
        FitOptions::new()
            .with_dev_set(x_test.clone())
            .with_dev_iter(50),
    )?;

    println!();
    println!("Classes: {:?}", model.classes());
    println!("Final epoch error: {:.4}", model.errors().last().unwrap_or(&f64::NAN));

    for (epoch, snapshot) in model.dev_predictions() {
        println!(
            "Dev accuracy at epoch {}: {:.4}",
            epoch,
            accuracy(snapshot, &y_test)
        );
    }

    let train_predictions = model.predict(&x_train)?;
    let test_predictions = model.predict(&x_test)?;
    println!(
        "Train accuracy: {:.4}",
        accuracy(&train_predictions, &y_train)
    );
    println!(
        "Test accuracy: {:.4}",
        accuracy(&test_predictions, &y_test)
    );

    Ok(())
}
