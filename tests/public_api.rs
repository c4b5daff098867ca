//! The umbrella crate alone must cover the full fill, grow, and persist
//! cycle without reaching into the member crates.

use gridhist::{Axis, Histogram};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

#[test]
fn test_fill_grow_and_persist_through_the_facade() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let dist = LogNormal::new(0.0, 1.0).unwrap();

    // one decade per bin to start with, growing as the stream spreads out
    let mut hist: Histogram = Histogram::new(vec![Axis::log10_extendable(&[0.1, 1.0], 4, 4)
        .unwrap()
        .with_label("charge")])
    .unwrap();

    for _ in 0..500 {
        hist.fill(&[dist.sample(&mut rng)]).unwrap();
    }
    hist.flush().unwrap();

    // log-normal samples are strictly positive, so none can be dropped
    assert_eq!(hist.pending_fills(), 0);
    assert_eq!(hist.total_entries(), 500);
    assert!(hist.axis(0).n_bins() > 1);

    let restored = Histogram::from_snapshot(&hist.snapshot()).unwrap();
    assert_eq!(restored.shape(), hist.shape());
    assert_eq!(restored.axis(0).label(), Some("charge"));
    assert_eq!(restored.total_entries(), hist.total_entries());
    for i in 0..hist.shape()[0] {
        assert_eq!(restored.get_bin(&[i]), hist.get_bin(&[i]));
    }
}
