use num::Float;

/// Similar to numpy.interp. `coords` must be sorted by x; an empty `coords`
/// yields NaN.
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input.into_iter().map(|x| interp_one(x, coords)).collect()
}

fn interp_one<F: Float>(x: F, coords: &[(F, F)]) -> F {
    match coords {
        [] => F::nan(),
        [(x1, y1), ..] if x <= *x1 => *y1,
        [.., (xn, yn)] if x >= *xn => *yn,
        _ => coords
            .windows(2)
            .find(|w| w[0].0 <= x && x <= w[1].0)
            .map(|w| {
                let ((x1, y1), (x2, y2)) = (w[0], w[1]);

                y1 + (x - x1) * (y2 - y1) / (x2 - x1)
            })
            .unwrap_or_else(F::nan),
    }
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
    assert!(interp([1.], &[] as &[(f64, f64)])[0].is_nan());
}
