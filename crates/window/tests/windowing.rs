//! Integration tests for window construction properties.

use flowcast_window::{SlidingWindow, Windows};

fn series(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.37).sin() * 40.0 + 50.0).collect()
}

#[test]
fn window_count_is_n_minus_l() {
    for n in [0usize, 1, 5, 23, 24, 25, 100] {
        for l in [1usize, 3, 24] {
            let w = Windows::new(&series(n), l).unwrap();
            assert_eq!(w.len(), n.saturating_sub(l), "n={n} l={l}");
        }
    }
}

#[test]
fn every_window_has_length_l_and_next_label() {
    let data = series(60);
    let l = 24;
    let w = Windows::new(&data, l).unwrap();
    for (i, (window, label)) in w.iter().enumerate() {
        assert_eq!(window.len(), l);
        assert_eq!(window, &data[i..i + l]);
        assert_eq!(label, data[i + l]);
    }
}

#[test]
fn splits_partition_all_windows() {
    let data = series(1000);
    let w = Windows::new(&data, 24).unwrap();
    let (train, test) = w.split_fraction(0.2).unwrap();
    assert_eq!(train.len() + test.len(), w.len());

    let rejoined: Vec<f64> = train
        .labels()
        .iter()
        .chain(test.labels())
        .copied()
        .collect();
    assert_eq!(rejoined.as_slice(), w.labels());
}

#[test]
fn sliding_window_reproduces_windows() {
    // Pushing the true continuation reproduces successive windows.
    let data = series(40);
    let l = 6;
    let w = Windows::new(&data, l).unwrap();
    let mut slide = SlidingWindow::new(w.window(0)).unwrap();
    for i in 0..w.len() {
        assert_eq!(slide.as_slice(), w.window(i));
        slide.push(w.label(i));
    }
}
