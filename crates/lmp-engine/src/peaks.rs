/// Indices of local maxima of `y`.
///
/// A flat top counts once, at its middle sample (left of centre for an even
/// width). Peaks lower than `height` are dropped. Within `distance` samples of
/// a kept peak, lower peaks are removed; the tallest peaks are kept first.
pub fn find_peaks(y: &[f64], height: Option<f64>, distance: usize) -> Vec<usize> {
    let mut peaks = Vec::new();
    let n = y.len();
    let mut i = 1;
    while i + 1 < n {
        if y[i - 1] < y[i] {
            let mut ahead = i + 1;
            while ahead + 1 < n && y[ahead] == y[i] {
                ahead += 1;
            }
            if y[ahead] < y[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    if let Some(h) = height {
        peaks.retain(|&p| y[p] >= h);
    }
    if distance <= 1 || peaks.len() < 2 {
        return peaks;
    }

    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| y[peaks[b]].total_cmp(&y[peaks[a]]).then(b.cmp(&a)));
    let mut keep = vec![true; peaks.len()];
    for &idx in &order {
        if !keep[idx] {
            continue;
        }
        let centre = peaks[idx];
        for j in (0..idx).rev() {
            if centre - peaks[j] >= distance {
                break;
            }
            keep[j] = false;
        }
        for j in idx + 1..peaks.len() {
            if peaks[j] - centre >= distance {
                break;
            }
            keep[j] = false;
        }
    }
    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect()
}
