use std::hint::black_box;

use churnsight::features::{self, CustomerForm};
use churnsight::ml::forest::RandomForestModel;
use churnsight::ml::label_encoder::LabelEncoder;
use churnsight::predict;
use criterion::{Criterion, criterion_group, criterion_main};

const MODEL_JSON: &[u8] = include_bytes!("../models/RandomForest/churn_pred_rf_model.json");
const ENCODER_JSON: &[u8] = include_bytes!("../models/RandomForest/random_label.json");

fn bench_encode_and_predict(c: &mut Criterion) {
    let model = RandomForestModel::from_json_slice(MODEL_JSON).expect("bundled model");
    let encoder = LabelEncoder::from_json_slice(ENCODER_JSON).expect("bundled encoder");
    let form = CustomerForm::default();

    c.bench_function("encode", |b| {
        b.iter(|| features::encode(black_box(&form), Some(&encoder)));
    });
    c.bench_function("encode_predict", |b| {
        b.iter(|| {
            let vector = features::encode(black_box(&form), Some(&encoder));
            predict::predict(&model, &vector).expect("predict")
        });
    });
}

criterion_group!(benches, bench_encode_and_predict);
criterion_main!(benches);
