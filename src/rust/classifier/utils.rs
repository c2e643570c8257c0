use ndarray::Array1;

/// Divides each entry by the sum of all entries. A vector with no mass is
/// returned as zeros rather than NaN.
pub(crate) fn l1_normalize(vec: &Array1<f64>) -> Array1<f64> {
    let total: f64 = vec.sum();
    if total > 1e-10 {
        vec / total
    } else {
        Array1::zeros(vec.len())
    }
}

/// Index of the largest value; the first one wins on ties.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l1_normalize() {
        let v = Array1::from_vec(vec![1.0, 3.0]);
        assert_eq!(l1_normalize(&v).to_vec(), vec![0.25, 0.75]);
        assert_eq!(l1_normalize(&Array1::zeros(3)).to_vec(), vec![0.0; 3]);
    }

    #[test]
    fn test_argmax_prefers_first() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), Some(1));
        assert_eq!(argmax(&[]), None);
    }
}
