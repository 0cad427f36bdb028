use emovoice::classifier::{KnnClassifier, TrainingSet};
use emovoice::RecognitionError;

fn training(points: &[(&[f64], &str)]) -> TrainingSet {
    TrainingSet::new(
        points.iter().map(|(v, _)| v.to_vec()).collect(),
        points.iter().map(|(_, l)| l.to_string()).collect(),
    )
    .expect("valid training set")
}

#[test]
fn majority_vote_over_three_neighbors() {
    // Neighbors of [0.1, 0.1] in distance order are A, B, B; majority is B.
    let knn = KnnClassifier::fit(
        3,
        training(&[
            (&[0.0, 0.0], "A"),
            (&[1.0, 1.0], "B"),
            (&[2.0, 2.0], "B"),
        ]),
    )
    .unwrap();
    assert_eq!(knn.predict_one(&[0.1, 0.1]).unwrap(), "B");
}

#[test]
fn single_neighbor_returns_nearest_label() {
    let knn = KnnClassifier::fit(1, training(&[(&[0.0], "X"), (&[10.0], "Y")])).unwrap();
    assert_eq!(knn.predict_one(&[9.0]).unwrap(), "Y");
}

#[test]
fn duplicate_training_vectors_with_same_label_still_win() {
    let knn = KnnClassifier::fit(
        1,
        training(&[(&[1.0, 1.0], "Z"), (&[1.0, 1.0], "Z"), (&[5.0, 5.0], "W")]),
    )
    .unwrap();
    assert_eq!(knn.predict_one(&[1.0, 1.0]).unwrap(), "Z");
}

#[test]
fn uniform_labels_always_win() {
    let knn = KnnClassifier::fit(
        2,
        training(&[(&[0.0], "only"), (&[5.0], "only"), (&[9.0], "only")]),
    )
    .unwrap();
    for query in [-100.0, 0.0, 4.5, 1e6] {
        assert_eq!(knn.predict_one(&[query]).unwrap(), "only");
    }
}

#[test]
fn dimension_mismatch_never_returns_a_label() {
    let knn = KnnClassifier::fit(1, training(&[(&[0.0, 0.0], "A")])).unwrap();
    let err = knn.predict_one(&[0.0, 0.0, 0.0]).unwrap_err();
    assert_eq!(
        err,
        RecognitionError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn predict_empty_batch_returns_empty() {
    let knn = KnnClassifier::fit(1, training(&[(&[0.0], "A")])).unwrap();
    assert!(knn.predict(&[]).unwrap().is_empty());
}

#[test]
fn predict_preserves_input_order() {
    let knn = KnnClassifier::fit(1, training(&[(&[0.0], "low"), (&[10.0], "high")])).unwrap();
    let labels = knn
        .predict(&[vec![9.0], vec![1.0], vec![8.0]])
        .unwrap();
    assert_eq!(labels, vec!["high", "low", "high"]);
}

#[test]
fn refitting_with_same_data_is_idempotent() {
    let points: &[(&[f64], &str)] = &[
        (&[0.0, 0.0], "A"),
        (&[1.0, 1.0], "B"),
        (&[2.0, 2.0], "B"),
    ];
    let first = KnnClassifier::fit(3, training(points)).unwrap();
    let second = KnnClassifier::fit(3, training(points)).unwrap();

    let queries = vec![vec![0.1, 0.1], vec![2.0, 1.9], vec![-3.0, 4.0]];
    assert_eq!(
        first.predict(&queries).unwrap(),
        second.predict(&queries).unwrap()
    );
}

#[test]
fn predictions_are_stable_across_runs_with_exact_ties() {
    // Four training points equidistant from the origin, two labels. The
    // outcome must be identical on every call: stable selection keeps
    // insertion order among the tied distances.
    let knn = KnnClassifier::fit(
        3,
        training(&[
            (&[1.0, 0.0], "P"),
            (&[0.0, 1.0], "Q"),
            (&[-1.0, 0.0], "P"),
            (&[0.0, -1.0], "Q"),
        ]),
    )
    .unwrap();
    let first = knn.predict_one(&[0.0, 0.0]).unwrap();
    assert_eq!(first, "P");
    for _ in 0..25 {
        assert_eq!(knn.predict_one(&[0.0, 0.0]).unwrap(), first);
    }
}

#[test]
fn shared_classifier_predicts_from_multiple_threads() {
    use std::sync::Arc;

    let knn = Arc::new(
        KnnClassifier::fit(1, training(&[(&[0.0], "low"), (&[10.0], "high")])).unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let knn = Arc::clone(&knn);
            std::thread::spawn(move || knn.predict_one(&[9.0]).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "high");
    }
}
