use crate::sequence::*;

fn records(sequences: &[&str]) -> Vec<Record> {
    sequences
        .iter()
        .enumerate()
        .map(|(i, s)| Record { id: format!("prediction_{i}"), sequence: s.to_string() })
        .collect()
}

#[test]
fn right_pad_keeps_ids_and_evens_lengths() {
    let padded = right_pad(&records(&["MKTIIALSYIFCLALG", "MKTIIALSYILCLVFA", "MKTIIALSHIFCLALGQ"]));
    assert!(padded.iter().all(|r| r.len() == 17));
    assert_eq!(padded[0].sequence, "MKTIIALSYIFCLALG*");
    assert_eq!(padded[2].sequence, "MKTIIALSHIFCLALGQ");
    assert_eq!(padded[1].id, "prediction_1");
    assert!(right_pad(&[]).is_empty());
}

#[test]
fn encoder_without_padding() {
    let input = records(&["ACGT", "TGCA"]);
    let encoder = Encoder::fit(&input);
    assert_eq!(encoder.alphabet, ['A', 'C', 'G', 'T']);
    assert_eq!(encoder.width(), 16);

    let encoded = encoder.encode(&input);
    // one flag per position
    assert!(encoded.iter().all(|row| row.iter().map(|f| *f as usize).sum::<usize>() == 4));
    assert_eq!(encoder.decode(&encoded), ["ACGT", "TGCA"]);
}

#[test]
fn decode_scores_takes_best_symbol() {
    let encoder = Encoder::fit(&records(&["AC", "CA"]));
    let scores = vec![vec![0.9_f64, 0.1, 0.4, 0.6], vec![0.2, 0.2, 0.7, 0.3]];
    // ties go to the first symbol
    assert_eq!(encoder.decode(&scores), ["AC", "AA"]);
}

#[test]
fn unknown_symbols_leave_empty_blocks() {
    let encoder = Encoder::fit(&records(&["AC"]));
    let encoded = encoder.encode(&records(&["AX", "ACAAA"]));
    assert_eq!(encoded[0], [1, 0, 0, 0]);
    assert_eq!(encoded[1], [1, 0, 0, 1]);
}

#[test]
fn density_interval_interpolates() {
    let values: Vec<f64> = (0..=10).map(f64::from).rev().collect();
    assert_eq!(density_interval(90.0, &values), Some((0.5, 9.5)));
    assert_eq!(density_interval(0.0, &values), Some((5.0, 5.0)));
    assert_eq!(density_interval(120.0, &values), None);
    assert_eq!(density_interval(50.0, &[1.0, f64::NAN]), None);
    assert_eq!(density_interval(50.0, &[3.0]), Some((3.0, 3.0)));
}
