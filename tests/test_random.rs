use side_shooter::random::Random;

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_sequence() {
    let mut a = Random::new(42);
    let mut b = Random::new(42);
    for _ in 0..100 {
        assert_eq!(a.uniform_uint(0, 1000), b.uniform_uint(0, 1000));
        assert_eq!(a.uniform_float(-1.0, 1.0), b.uniform_float(-1.0, 1.0));
        assert_eq!(a.bernoulli(0.3), b.bernoulli(0.3));
    }
}

#[test]
fn reseed_restarts_sequence() {
    let mut rng = Random::new(7);
    let first: Vec<u32> = (0..10).map(|_| rng.uniform_uint(0, 99)).collect();
    rng.reseed(7);
    let again: Vec<u32> = (0..10).map(|_| rng.uniform_uint(0, 99)).collect();
    assert_eq!(first, again);
}

#[test]
fn different_seeds_diverge() {
    let mut a = Random::new(1);
    let mut b = Random::new(2);
    let xs: Vec<u32> = (0..20).map(|_| a.uniform_uint(0, u32::MAX)).collect();
    let ys: Vec<u32> = (0..20).map(|_| b.uniform_uint(0, u32::MAX)).collect();
    assert_ne!(xs, ys);
}

// ── Ranges ────────────────────────────────────────────────────────────────────

#[test]
fn uniform_uint_is_inclusive() {
    let mut rng = Random::new(3);
    let mut seen = [false; 4];
    for _ in 0..1000 {
        let v = rng.uniform_uint(2, 5);
        assert!((2..=5).contains(&v));
        seen[(v - 2) as usize] = true;
    }
    assert!(seen.iter().all(|&s| s), "both ends must be reachable");
}

#[test]
fn uniform_uint_degenerate_range() {
    let mut rng = Random::new(3);
    assert_eq!(rng.uniform_uint(9, 9), 9);
}

#[test]
fn uniform_float_stays_in_range() {
    let mut rng = Random::new(11);
    for _ in 0..1000 {
        let v = rng.uniform_float(1.0, 3.0);
        assert!((1.0..=3.0).contains(&v));
    }
    assert_eq!(rng.uniform_float(2.5, 2.5), 2.5);
}

// ── Bernoulli ─────────────────────────────────────────────────────────────────

#[test]
fn bernoulli_extremes() {
    let mut rng = Random::new(5);
    assert!((0..200).all(|_| rng.bernoulli(1.0)));
    assert!((0..200).all(|_| !rng.bernoulli(0.0)));
}

#[test]
fn bernoulli_tracks_probability() {
    let mut rng = Random::new(99);
    let hits = (0..10_000).filter(|_| rng.bernoulli(0.25)).count();
    assert!((2000..3000).contains(&hits), "got {hits} hits");
}

#[test]
fn coin_is_roughly_fair() {
    let mut rng = Random::new(123);
    let heads = (0..10_000).filter(|_| rng.coin()).count();
    assert!((4500..5500).contains(&heads), "got {heads} heads");
}
