//! End-to-end classifier tests on the `Autodiff<NdArray>` backend.
//!
//! These run real (tiny) training jobs, so epoch counts are kept small.

use burn::backend::{Autodiff, NdArray, ndarray::NdArrayDevice};
use shallow_classifier::{ClassifierConfig, FitOptions, FittedModel, ShallowNeuralClassifier};

type Backend = Autodiff<NdArray>;

fn xor_data() -> (Vec<Vec<f32>>, Vec<i64>) {
    (
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        vec![0, 1, 1, 0],
    )
}

fn fit_xor(config: ClassifierConfig, options: FitOptions) -> FittedModel<Backend, i64> {
    let (x, y) = xor_data();
    ShallowNeuralClassifier::<Backend>::new(config, NdArrayDevice::Cpu)
        .fit_with(&x, &y, options)
        .unwrap()
}

#[test]
fn xor_scenario_with_default_hyperparameters() {
    let (x, _) = xor_data();
    let model = fit_xor(
        ClassifierConfig::new().with_max_epochs(50),
        FitOptions::new(),
    );

    assert_eq!(model.errors().len(), 50);
    for label in model.predict(&x).unwrap() {
        assert!(label == 0 || label == 1);
    }
}

#[test]
fn label_mapping_is_sorted_and_complete() {
    let x = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0], vec![0.5, 0.5]];
    let y = vec![7, 3, 7, 5];

    let model = ShallowNeuralClassifier::<Backend>::new(
        ClassifierConfig::new().with_max_epochs(5),
        NdArrayDevice::Cpu,
    )
    .fit(&x, &y)
    .unwrap();

    assert_eq!(model.classes(), &[3, 5, 7]);
    assert_eq!(model.n_classes(), 3);
    assert_eq!(model.input_dim(), 2);

    for label in model.predict(&x).unwrap() {
        assert!(model.classes().contains(&label));
    }
}

#[test]
fn string_labels_round_trip() {
    let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
    let y = vec!["low", "low", "high", "high"];

    let model = ShallowNeuralClassifier::<Backend>::new(
        ClassifierConfig::new().with_max_epochs(20),
        NdArrayDevice::Cpu,
    )
    .fit(&x, &y)
    .unwrap();

    assert_eq!(model.classes(), &["high", "low"]);
    for label in model.predict(&x).unwrap() {
        assert!(label == "low" || label == "high");
    }
}

#[test]
fn probabilities_are_row_stochastic() {
    let (x, _) = xor_data();
    let model = fit_xor(
        ClassifierConfig::new().with_max_epochs(10),
        FitOptions::new(),
    );

    let probabilities = model.predict_proba(&x).unwrap();
    assert_eq!(probabilities.len(), 4);
    for row in &probabilities {
        assert_eq!(row.len(), 2);
        let sum: f32 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "row sums to {sum}");
        for &p in row {
            assert!((0.0..=1.0).contains(&p));
        }
    }
}

#[test]
fn inference_is_idempotent() {
    let (x, _) = xor_data();
    let model = fit_xor(
        ClassifierConfig::new().with_max_epochs(10),
        FitOptions::new(),
    );

    let first = model.predict_proba(&x).unwrap();
    let second = model.predict_proba(&x).unwrap();
    assert_eq!(first, second);
}

#[test]
fn predict_matches_argmax_of_predict_proba() {
    let (x, _) = xor_data();
    let model = fit_xor(
        ClassifierConfig::new().with_max_epochs(10),
        FitOptions::new(),
    );

    let probabilities = model.predict_proba(&x).unwrap();
    let predictions = model.predict(&x).unwrap();

    for (row, predicted) in probabilities.iter().zip(&predictions) {
        let mut best = 0;
        for (index, value) in row.iter().enumerate() {
            if *value > row[best] {
                best = index;
            }
        }
        assert_eq!(model.classes()[best], *predicted);
    }
}

#[test]
fn dev_snapshots_follow_the_configured_stride() {
    let (x_dev, _) = xor_data();
    let model = fit_xor(
        ClassifierConfig::new().with_max_epochs(25),
        FitOptions::new().with_dev_set(x_dev).with_dev_iter(10),
    );

    let snapshots = model.dev_predictions();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots.keys().copied().collect::<Vec<_>>(), vec![10, 20]);
    for predictions in snapshots.values() {
        assert_eq!(predictions.len(), 4);
        for label in predictions {
            assert!(model.classes().contains(label));
        }
    }
}

#[test]
fn no_dev_set_means_no_snapshots() {
    let model = fit_xor(
        ClassifierConfig::new().with_max_epochs(20),
        FitOptions::new(),
    );

    assert!(model.dev_predictions().is_empty());
}

#[test]
fn refitting_leaves_the_previous_model_intact() {
    let (x, y) = xor_data();
    let classifier = ShallowNeuralClassifier::<Backend>::new(
        ClassifierConfig::new().with_max_epochs(5),
        NdArrayDevice::Cpu,
    );

    let first = classifier.fit(&x, &y).unwrap();
    let first_probabilities = first.predict_proba(&x).unwrap();

    let second = classifier.fit(&x, &[2i64, 4, 6, 8]).unwrap();
    assert_eq!(second.classes(), &[2, 4, 6, 8]);

    assert_eq!(first.predict_proba(&x).unwrap(), first_probabilities);
    assert_eq!(first.classes(), &[0, 1]);
}

#[test]
fn invalid_inputs_are_rejected() {
    let classifier = ShallowNeuralClassifier::<Backend>::new(
        ClassifierConfig::new().with_max_epochs(5),
        NdArrayDevice::Cpu,
    );

    let empty: Vec<Vec<f32>> = vec![];
    assert!(classifier.fit(&empty, &[] as &[i64]).is_err());

    let (x, _) = xor_data();
    assert!(classifier.fit(&x, &[0i64, 1]).is_err());

    let ragged = vec![vec![0.0, 1.0], vec![0.0]];
    assert!(classifier.fit(&ragged, &[0i64, 1]).is_err());

    let zero_hidden = ShallowNeuralClassifier::<Backend>::new(
        ClassifierConfig::new().with_hidden_dim(0),
        NdArrayDevice::Cpu,
    );
    assert!(zero_hidden.fit(&x, &[0i64, 1, 1, 0]).is_err());
}

#[test]
fn sgd_and_adamw_optimizers_also_train() {
    use shallow_classifier::OptimizerKind;

    for optimizer in [OptimizerKind::Sgd, OptimizerKind::AdamW] {
        let model = fit_xor(
            ClassifierConfig::new()
                .with_max_epochs(10)
                .with_optimizer(optimizer)
                .with_l2_strength(0.0001),
            FitOptions::new(),
        );
        assert_eq!(model.errors().len(), 10);
    }
}
