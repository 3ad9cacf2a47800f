#[test]
fn uniform_translation_has_zero_msd() {
    let mut rng = StdRng::seed_from_u64(21);
    let start: Vec<Vec3> = (0..20).map(|_| random_vec(&mut rng, 10.0)).collect();
    let v = random_vec(&mut rng, 1.0);
    let velocities = vec![v; start.len()];
    let traj = InMemoryTraj::new(ballistic_frames(&start, &velocities, 10))
        .read_all()
        .unwrap();
    let msd = mean_squared_displacement(&traj, 0).unwrap();
    assert!(msd.iter().all(|m| m.abs() < 1e-12), "{msd:?}");
    let windowed = windowed_msd(&traj).unwrap();
    assert!(windowed.iter().all(|m| m.abs() < 1e-9));
}

#[test]
fn ballistic_msd_follows_relative_velocities() {
    let mut rng = StdRng::seed_from_u64(42);
    let n_atoms = 16;
    let start: Vec<Vec3> = (0..n_atoms).map(|_| random_vec(&mut rng, 10.0)).collect();
    let velocities: Vec<Vec3> = (0..n_atoms).map(|_| random_vec(&mut rng, 0.5)).collect();
    let traj = InMemoryTraj::new(ballistic_frames(&start, &velocities, 12))
        .read_all()
        .unwrap();

    let mut v_mean = Vec3::ZERO;
    for &v in &velocities {
        v_mean = v_mean + v;
    }
    let v_mean = v_mean.scale(1.0 / n_atoms as f64);
    let v_rel2: f64 = velocities.iter().map(|&v| (v - v_mean).norm2()).sum::<f64>() / n_atoms as f64;

    let msd = mean_squared_displacement(&traj, 0).unwrap();
    let windowed = windowed_msd(&traj).unwrap();
    for f in 0..traj.n_frames() {
        let expected = v_rel2 * (f * f) as f64 / 3.0;
        assert_close(msd[f], expected, 1e-9);
        assert_close(windowed[f], expected, 1e-8);
    }
}

#[test]
fn msd_from_later_reference_frame() {
    let mut rng = StdRng::seed_from_u64(8);
    let start: Vec<Vec3> = (0..4).map(|_| random_vec(&mut rng, 3.0)).collect();
    let velocities: Vec<Vec3> = (0..4).map(|_| random_vec(&mut rng, 1.0)).collect();
    let traj = InMemoryTraj::new(ballistic_frames(&start, &velocities, 6))
        .read_all()
        .unwrap();
    let msd = mean_squared_displacement(&traj, 3).unwrap();
    assert!(msd[3].abs() < 1e-12);
    assert_close(msd[2], msd[4], 1e-9);
}

#[test]
fn diffusion_recovered_from_linear_msd() {
    let d0 = 2.5e-9;
    let time = frame_times(40, 1e-12);
    let msd: Vec<f64> = time.iter().map(|t| 6.0 * d0 * t).collect();
    let d = diffusion_coefficient(&msd, &time, 3).unwrap();
    assert_close(d, d0, 1e-10);
}

#[test]
fn diffusion_from_random_walk_is_positive() {
    let mut rng = StdRng::seed_from_u64(99);
    let n_atoms = 50;
    let n_frames = 64;
    let mut current: Vec<Vec3> = (0..n_atoms).map(|_| random_vec(&mut rng, 20.0)).collect();
    let mut frames = Vec::with_capacity(n_frames);
    for _ in 0..n_frames {
        frames.push(current.clone());
        for r in &mut current {
            *r = *r + random_vec(&mut rng, 0.1);
        }
    }
    let traj = InMemoryTraj::new(frames).read_all().unwrap();
    let msd = windowed_msd(&traj).unwrap();
    let time = frame_times(traj.n_frames(), 1.0);
    let d = diffusion_coefficient(&msd, &time, 3).unwrap();
    // per-axis step variance of U(-0.1, 0.1)
    let sigma2 = 0.2f64.powi(2) / 12.0;
    let expected = sigma2 / 6.0;
    assert!((d - expected).abs() < 0.5 * expected, "{d} vs {expected}");
}
